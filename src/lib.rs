pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{LocalStorage, TomlConfig};

pub use crate::core::{assigner::SecretSantaAssigner, game::GameEngine, pipeline::SecretSantaPipeline};
pub use crate::domain::model::{Assignment, History, Pairing, Participant, ParticipantRegistry};
pub use crate::utils::error::{Result, SantaError};
