use crate::domain::model::ParticipantRegistry;
use crate::utils::error::{Result, SantaError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => Ok(()),
        Some(extension) => Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Preconditions the assignment engine relies on: a non-empty roster, unique
/// emails, and previous-round givers that are still on the roster.
impl Validate for ParticipantRegistry {
    fn validate(&self) -> Result<()> {
        if self.participants.is_empty() {
            return Err(SantaError::EmptyRoster {
                path: self.source.clone(),
            });
        }

        let mut emails = HashSet::new();
        for participant in &self.participants {
            if !emails.insert(participant.email()) {
                return Err(SantaError::DuplicateParticipant {
                    email: participant.email().to_string(),
                });
            }
        }

        // 排序後檢查，錯誤訊息才會穩定
        let mut givers: Vec<&str> = self.history.iter().map(|(giver, _)| giver).collect();
        givers.sort_unstable();
        for giver in givers {
            if !emails.contains(giver) {
                return Err(SantaError::UnknownParticipant {
                    email: giver.to_string(),
                });
            }
        }

        for (giver, receiver) in self.history.iter() {
            if !emails.contains(receiver) {
                tracing::debug!(
                    "Previous receiver {} of {} is no longer on the roster; ignoring",
                    receiver,
                    giver
                );
            }
        }

        Ok(())
    }
}
