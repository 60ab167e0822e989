use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting {} pipeline", self.pipeline.name());

        tracing::debug!("Extracting...");
        let raw_data = self.pipeline.extract()?;

        tracing::debug!("Transforming...");
        let transformed = self.pipeline.transform(raw_data)?;

        tracing::debug!("Loading...");
        let output_path = self.pipeline.load(transformed)?;

        tracing::info!(
            "{} pipeline finished in {:?}, output saved to: {}",
            self.pipeline.name(),
            started.elapsed(),
            output_path
        );
        Ok(output_path)
    }
}
