//! Binary runner utilities
//!
//! Provides a standardized way to run binaries with
//! banners around a single unit of work.

use tracing::info;

/// Configuration for running a binary application
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Name of the binary (for logging)
    pub name: String,
    /// Base44 application the binary talks to
    pub app_id: Option<String>,
}

impl RunConfig {
    /// Create a new run configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            app_id: None,
        }
    }

    /// Set application id shown in the banner
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }
}

/// Trait for binary applications
pub trait BinaryRunner {
    /// Run the application
    async fn run(&mut self) -> anyhow::Result<()>;

    /// Get the run configuration
    fn config(&self) -> &RunConfig;

    /// Print startup banner
    fn print_banner(&self) {
        let config = self.config();
        info!("========================================");
        info!("Starting {}", config.name);
        if let Some(app_id) = &config.app_id {
            info!("Base44 app: {}", app_id);
        }
        info!("========================================");
    }

    /// Print completion banner
    fn print_shutdown(&self, outcome: &str) {
        let config = self.config();
        info!("========================================");
        info!("{} {}", config.name, outcome);
        info!("========================================");
    }

    /// Execute the binary with banners around `run`
    async fn execute(&mut self) -> anyhow::Result<()> {
        self.print_banner();
        let result = self.run().await;
        self.print_shutdown(if result.is_ok() { "finished" } else { "failed" });
        result
    }
}
