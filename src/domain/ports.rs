use crate::domain::model::{Assignment, ParticipantRegistry};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn employees_file(&self) -> &str;
    /// Last round's result file. `None` means this is the first round.
    fn previous_file(&self) -> Option<&str>;
    fn output_file(&self) -> &str;
    fn seed(&self) -> Option<u64>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ParticipantRegistry>;
    async fn transform(&self, registry: ParticipantRegistry) -> Result<Assignment>;
    async fn load(&self, assignment: Assignment) -> Result<String>;
}
