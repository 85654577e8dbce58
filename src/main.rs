use clap::Parser;
use secret_santa::core::ConfigProvider;
use secret_santa::utils::{logger, validation::Validate};
use secret_santa::{CliConfig, GameEngine, LocalStorage, SantaError, SecretSantaPipeline, TomlConfig};

async fn run<C>(config: C) -> secret_santa::Result<String>
where
    C: ConfigProvider + Validate + std::fmt::Debug,
{
    config.validate()?;
    tracing::debug!("Resolved config: {:?}", config);

    // 相對路徑以目前工作目錄為準
    let storage = LocalStorage::new(".".to_string());
    let pipeline = SecretSantaPipeline::new(storage, config);

    GameEngine::new(pipeline).run().await
}

fn load_toml(args: &CliConfig, path: &str) -> secret_santa::Result<TomlConfig> {
    tracing::info!("📁 Loading configuration from: {}", path);
    let mut config = TomlConfig::from_file(path)?;

    if let Some(seed) = args.seed {
        config.search.seed = Some(seed);
        tracing::info!("🔧 Seed overridden to: {}", seed);
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🎅 Starting secret-santa");

    let result = match args.config.as_deref() {
        Some(path) => match load_toml(&args, path) {
            Ok(config) => run(config).await,
            Err(e) => Err(e),
        },
        None => run(args.clone()).await,
    };

    match result {
        Ok(output_path) => {
            println!("✅ Assignments written to {}", output_path);
        }
        Err(e) => report_and_exit(e),
    }

    Ok(())
}

fn report_and_exit(e: SantaError) -> ! {
    tracing::error!(
        "❌ Secret Santa draw failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}
