use crate::config::toml_config::default_output_file;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use chrono::Datelike;
use clap::Parser;
use serde::{Deserialize, Serialize};

fn current_round_output() -> String {
    default_output_file(chrono::Local::now().year())
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "secret-santa")]
#[command(about = "Draw Secret Santa pairs without repeating last year's")]
pub struct CliConfig {
    /// Roster CSV with Employee_Name and Employee_EmailID columns
    #[arg(long, default_value = "Employee-List.csv")]
    pub employees: String,

    /// Last round's result file; a missing file means no history
    #[arg(long)]
    pub previous: Option<String>,

    /// Result file (.csv or .json)
    #[arg(long, default_value_t = current_round_output())]
    pub output: String,

    /// Fix the random seed for a reproducible draw
    #[arg(long)]
    pub seed: Option<u64>,

    /// TOML configuration file; takes precedence over the file flags
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn employees_file(&self) -> &str {
        &self.employees
    }

    fn previous_file(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    fn output_file(&self) -> &str {
        &self.output
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("employees", &self.employees)?;
        if let Some(previous) = &self.previous {
            validate_path("previous", previous)?;
        }
        validate_path("output", &self.output)?;
        validate_file_extension("output", &self.output, &["csv", "json"])?;
        Ok(())
    }
}
