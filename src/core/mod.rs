pub mod assigner;
pub mod game;
pub mod pipeline;
pub mod records;

pub use crate::domain::model::{Assignment, Participant, ParticipantRegistry};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
