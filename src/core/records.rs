use crate::domain::model::{Assignment, History, Participant};
use crate::utils::error::{Result, SantaError};
use crate::utils::validation::validate_non_empty_string;
use serde::{Deserialize, Serialize};

pub const EMPLOYEE_NAME: &str = "Employee_Name";
pub const EMPLOYEE_EMAIL: &str = "Employee_EmailID";
pub const CHILD_NAME: &str = "Secret_Child_Name";
pub const CHILD_EMAIL: &str = "Secret_Child_EmailID";

#[derive(Debug, Deserialize)]
struct EmployeeRow {
    #[serde(rename = "Employee_Name")]
    name: String,
    #[serde(rename = "Employee_EmailID")]
    email: String,
}

#[derive(Debug, Deserialize)]
struct PreviousRow {
    #[serde(rename = "Employee_EmailID")]
    giver_email: String,
    #[serde(rename = "Secret_Child_EmailID")]
    receiver_email: String,
}

/// One line of the result file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    #[serde(rename = "Employee_Name")]
    pub employee_name: String,
    #[serde(rename = "Employee_EmailID")]
    pub employee_email: String,
    #[serde(rename = "Secret_Child_Name")]
    pub child_name: String,
    #[serde(rename = "Secret_Child_EmailID")]
    pub child_email: String,
}

impl AssignmentRow {
    fn rows(assignment: &Assignment) -> Vec<AssignmentRow> {
        assignment
            .iter()
            .map(|pairing| AssignmentRow {
                employee_name: pairing.giver.name().to_string(),
                employee_email: pairing.giver.email().to_string(),
                child_name: pairing.receiver.name().to_string(),
                child_email: pairing.receiver.email().to_string(),
            })
            .collect()
    }
}

fn reader(data: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data)
}

fn require_columns(reader: &mut csv::Reader<&[u8]>, source: &str, required: &[&str]) -> Result<()> {
    let headers = reader.headers()?;
    let missing: Vec<String> = required
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SantaError::MissingColumns {
            path: source.to_string(),
            columns: missing,
        })
    }
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}

/// 讀取員工名單
pub fn read_employees(data: &[u8], source: &str) -> Result<Vec<Participant>> {
    let mut rdr = reader(data);
    require_columns(&mut rdr, source, &[EMPLOYEE_NAME, EMPLOYEE_EMAIL])?;
    let headers = rdr.headers()?.clone();

    let mut participants = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row: EmployeeRow = record.deserialize(Some(&headers))?;

        validate_non_empty_string(EMPLOYEE_EMAIL, &row.email).map_err(|_| {
            SantaError::InvalidRecord {
                path: source.to_string(),
                line: line_of(&record),
                reason: format!("{} is empty", EMPLOYEE_EMAIL),
            }
        })?;

        participants.push(Participant::new(row.name, row.email));
    }

    tracing::debug!("Read {} employees from {}", participants.len(), source);
    Ok(participants)
}

/// 讀取上一輪的配對結果
pub fn read_previous_assignments(data: &[u8], source: &str) -> Result<History> {
    let mut rdr = reader(data);
    require_columns(&mut rdr, source, &[EMPLOYEE_EMAIL, CHILD_EMAIL])?;

    let mut history = History::new();
    for row in rdr.deserialize::<PreviousRow>() {
        let row = row?;
        history.insert(row.giver_email, row.receiver_email);
    }

    tracing::debug!("Read {} previous pairings from {}", history.len(), source);
    Ok(history)
}

pub fn write_assignments_csv(assignment: &Assignment) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    // 空結果也要輸出標頭
    writer.write_record([EMPLOYEE_NAME, EMPLOYEE_EMAIL, CHILD_NAME, CHILD_EMAIL])?;
    for row in AssignmentRow::rows(assignment) {
        writer.write_record([
            &row.employee_name,
            &row.employee_email,
            &row.child_name,
            &row.child_email,
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| SantaError::IoError(e.into_error()))
}

pub fn write_assignments_json(assignment: &Assignment) -> Result<Vec<u8>> {
    let json = serde_json::to_vec_pretty(&AssignmentRow::rows(assignment))?;
    Ok(json)
}
