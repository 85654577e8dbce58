use crate::core::Pipeline;
use crate::utils::error::Result;

/// Drives a [`Pipeline`] through extract, transform and load.
pub struct GameEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> GameEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting Secret Santa draw...");

        tracing::info!("Reading participants...");
        let registry = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} participants ({} previous pairings)",
            registry.participants.len(),
            registry.history.len()
        );

        tracing::info!("Drawing assignments...");
        let assignment = self.pipeline.transform(registry).await?;
        tracing::info!("Assigned {} pairs", assignment.len());
        for pairing in &assignment {
            tracing::debug!("{} -> {}", pairing.giver, pairing.receiver);
        }

        tracing::info!("Writing results...");
        let output_path = self.pipeline.load(assignment).await?;
        tracing::info!("Assignments written to {}", output_path);

        Ok(output_path)
    }
}
