use anyhow::Result;
use secret_santa::core::records;
use secret_santa::{CliConfig, GameEngine, LocalStorage, SantaError, SecretSantaPipeline, TomlConfig};
use std::collections::{HashMap, HashSet};
use tempfile::TempDir;

const EMPLOYEES: &str = "Employee_Name,Employee_EmailID
Alice,alice@acme.com
Bob,bob@acme.com
Charlie,charlie@acme.com
Dana,dana@acme.com
Erin,erin@acme.com
";

const PREVIOUS: &str = "Employee_Name,Employee_EmailID,Secret_Child_Name,Secret_Child_EmailID
Alice,alice@acme.com,Bob,bob@acme.com
Bob,bob@acme.com,Charlie,charlie@acme.com
Charlie,charlie@acme.com,Dana,dana@acme.com
Dana,dana@acme.com,Erin,erin@acme.com
Erin,erin@acme.com,Alice,alice@acme.com
";

fn cli_config(previous: Option<&str>, output: &str, seed: Option<u64>) -> CliConfig {
    CliConfig {
        employees: "employees.csv".to_string(),
        previous: previous.map(str::to_string),
        output: output.to_string(),
        seed,
        config: None,
        verbose: false,
    }
}

fn storage_for(temp_dir: &TempDir) -> LocalStorage {
    LocalStorage::new(temp_dir.path().to_str().unwrap().to_string())
}

fn read_result(temp_dir: &TempDir, file: &str) -> Result<HashMap<String, String>> {
    let data = std::fs::read(temp_dir.path().join(file))?;
    let history = records::read_previous_assignments(&data, file)?;
    Ok(history
        .iter()
        .map(|(giver, receiver)| (giver.to_string(), receiver.to_string()))
        .collect())
}

#[tokio::test]
async fn test_end_to_end_draw_avoids_last_year() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("employees.csv"), EMPLOYEES)?;
    std::fs::write(temp_dir.path().join("previous.csv"), PREVIOUS)?;

    let pipeline = SecretSantaPipeline::new(
        storage_for(&temp_dir),
        cli_config(Some("previous.csv"), "result.csv", None),
    );
    let output = GameEngine::new(pipeline).run().await?;
    assert_eq!(output, "result.csv");

    let pairs = read_result(&temp_dir, "result.csv")?;
    let last_year = read_result(&temp_dir, "previous.csv")?;

    assert_eq!(pairs.len(), 5);
    let receivers: HashSet<&String> = pairs.values().collect();
    assert_eq!(receivers.len(), 5);
    for (giver, receiver) in &pairs {
        assert_ne!(giver, receiver);
        assert_ne!(last_year.get(giver), Some(receiver));
    }

    Ok(())
}

#[tokio::test]
async fn test_result_feeds_next_round() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("employees.csv"), EMPLOYEES)?;

    let first = SecretSantaPipeline::new(
        storage_for(&temp_dir),
        cli_config(None, "2023.csv", Some(1)),
    );
    GameEngine::new(first).run().await?;

    let second = SecretSantaPipeline::new(
        storage_for(&temp_dir),
        cli_config(Some("2023.csv"), "2024.csv", Some(2)),
    );
    GameEngine::new(second).run().await?;

    let round_2023 = read_result(&temp_dir, "2023.csv")?;
    let round_2024 = read_result(&temp_dir, "2024.csv")?;
    for (giver, receiver) in &round_2024 {
        assert_ne!(round_2023.get(giver), Some(receiver));
    }

    Ok(())
}

#[tokio::test]
async fn test_same_seed_reproduces_draw() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("employees.csv"), EMPLOYEES)?;

    for output in ["a.csv", "b.csv"] {
        let pipeline =
            SecretSantaPipeline::new(storage_for(&temp_dir), cli_config(None, output, Some(77)));
        GameEngine::new(pipeline).run().await?;
    }

    let a = std::fs::read_to_string(temp_dir.path().join("a.csv"))?;
    let b = std::fs::read_to_string(temp_dir.path().join("b.csv"))?;
    assert_eq!(a, b);

    Ok(())
}

#[tokio::test]
async fn test_json_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("employees.csv"), EMPLOYEES)?;

    let pipeline =
        SecretSantaPipeline::new(storage_for(&temp_dir), cli_config(None, "out/result.json", None));
    GameEngine::new(pipeline).run().await?;

    let data = std::fs::read(temp_dir.path().join("out/result.json"))?;
    let rows: Vec<records::AssignmentRow> = serde_json::from_slice(&data)?;
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].employee_email, "alice@acme.com");

    Ok(())
}

#[tokio::test]
async fn test_missing_roster_is_reported() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let pipeline =
        SecretSantaPipeline::new(storage_for(&temp_dir), cli_config(None, "result.csv", None));
    let err = GameEngine::new(pipeline).run().await.unwrap_err();

    assert!(matches!(err, SantaError::InputNotFound { .. }));
    assert!(!temp_dir.path().join("result.csv").exists());

    Ok(())
}

#[tokio::test]
async fn test_unknown_previous_participant_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(temp_dir.path().join("employees.csv"), EMPLOYEES)?;
    std::fs::write(
        temp_dir.path().join("previous.csv"),
        "Employee_EmailID,Secret_Child_EmailID\nmallory@acme.com,alice@acme.com\n",
    )?;

    let pipeline = SecretSantaPipeline::new(
        storage_for(&temp_dir),
        cli_config(Some("previous.csv"), "result.csv", None),
    );
    let err = GameEngine::new(pipeline).run().await.unwrap_err();

    assert!(
        matches!(err, SantaError::UnknownParticipant { ref email } if email == "mallory@acme.com")
    );

    Ok(())
}

#[tokio::test]
async fn test_infeasible_pair_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("employees.csv"),
        "Employee_Name,Employee_EmailID\nAlice,alice@acme.com\nBob,bob@acme.com\n",
    )?;
    std::fs::write(
        temp_dir.path().join("previous.csv"),
        "Employee_EmailID,Secret_Child_EmailID\nalice@acme.com,bob@acme.com\nbob@acme.com,alice@acme.com\n",
    )?;

    let pipeline = SecretSantaPipeline::new(
        storage_for(&temp_dir),
        cli_config(Some("previous.csv"), "result.csv", None),
    );
    let err = GameEngine::new(pipeline).run().await.unwrap_err();

    assert!(matches!(err, SantaError::NoValidAssignment { participants: 2 }));
    assert!(!temp_dir.path().join("result.csv").exists());

    Ok(())
}

#[tokio::test]
async fn test_toml_config_drives_pipeline() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path().to_str().unwrap().replace('\\', "/");
    std::fs::write(temp_dir.path().join("employees.csv"), EMPLOYEES)?;

    let config_content = format!(
        r#"
[game]
name = "toml-driven"
year = 2024

[input]
employees = "{base}/employees.csv"

[output]
path = "{base}/draw.csv"

[search]
seed = 5
"#
    );
    let config_path = temp_dir.path().join("santa.toml");
    std::fs::write(&config_path, config_content)?;

    let config = TomlConfig::from_file(&config_path)?;
    let pipeline = SecretSantaPipeline::new(LocalStorage::new(".".to_string()), config);
    GameEngine::new(pipeline).run().await?;

    let pairs = read_result(&temp_dir, "draw.csv")?;
    assert_eq!(pairs.len(), 5);

    Ok(())
}
