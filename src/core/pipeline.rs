use crate::core::assigner::SecretSantaAssigner;
use crate::core::records;
use crate::core::{Assignment, ConfigProvider, ParticipantRegistry, Pipeline, Storage};
use crate::domain::model::History;
use crate::utils::error::{Result, SantaError};
use crate::utils::validation::Validate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Mutex;

pub struct SecretSantaPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    rng: Mutex<StdRng>,
}

impl<S: Storage, C: ConfigProvider> SecretSantaPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let rng = match config.seed() {
            Some(seed) => {
                tracing::debug!("Using fixed seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        Self {
            storage,
            config,
            rng: Mutex::new(rng),
        }
    }

    async fn read_history(&self) -> Result<History> {
        let Some(path) = self.config.previous_file() else {
            tracing::info!("No previous assignments file given, starting fresh");
            return Ok(History::new());
        };

        match self.storage.read_file(path).await {
            Ok(data) => records::read_previous_assignments(&data, path),
            // 第一年沒有上一輪的結果檔是正常的
            Err(SantaError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("Previous assignments file {} not found, starting fresh", path);
                Ok(History::new())
            }
            Err(e) => Err(e),
        }
    }

    fn is_json_output(&self) -> bool {
        Path::new(self.config.output_file())
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SecretSantaPipeline<S, C> {
    async fn extract(&self) -> Result<ParticipantRegistry> {
        let employees_file = self.config.employees_file();
        tracing::debug!("Reading employees from: {}", employees_file);

        let data = match self.storage.read_file(employees_file).await {
            Ok(data) => data,
            Err(SantaError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                return Err(SantaError::InputNotFound {
                    path: employees_file.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        let participants = records::read_employees(&data, employees_file)?;
        let history = self.read_history().await?;

        let registry = ParticipantRegistry::new(employees_file, participants, history);
        registry.validate()?;
        Ok(registry)
    }

    async fn transform(&self, registry: ParticipantRegistry) -> Result<Assignment> {
        let assigner = SecretSantaAssigner::new(&registry.participants, &registry.history);
        let found = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            assigner.assign_with(&mut *rng)
        };

        found.ok_or(SantaError::NoValidAssignment {
            participants: registry.participants.len(),
        })
    }

    async fn load(&self, assignment: Assignment) -> Result<String> {
        let output_file = self.config.output_file();

        let data = if self.is_json_output() {
            records::write_assignments_json(&assignment)?
        } else {
            records::write_assignments_csv(&assignment)?
        };

        tracing::debug!("Writing {} bytes to {}", data.len(), output_file);
        self.storage.write_file(output_file, &data).await?;

        Ok(output_file.to_string())
    }
}
