//! BEAM command line
//!
//! Loads the service configuration, initializes the process-wide Base44
//! client and runs one command against it.
//!
//! Usage:
//!   beam [--config PATH] [info | whoami | summary [PROJECT_ID] | reset [PROJECT_ID]]
//!
//! Environment (also read from `.env`):
//!   - BEAM_CONFIG_PATH (default config/beam.yaml, ignored with --config)
//!   - BASE44_ACCESS_TOKEN or BASE44_TOKEN_FILE
//!   - BASE44_APP_ID, BASE44_SERVER_URL (overrides)

use anyhow::{Context, Result};
use beam_app::base44::{init_tracing, Base44Factory, ServiceConfig};
use beam_app::beam::{self, EmissionsStore, MaterialTable, ProjectInfo, Section};
use beam_app::bin_common::{
    load_config_from_env, parse_args, take_config_arg, BinaryRunner, Command, RunConfig,
};
use tracing::info;

struct BeamApp {
    run_config: RunConfig,
    command: Command,
    store: EmissionsStore,
}

impl BinaryRunner for BeamApp {
    async fn run(&mut self) -> Result<()> {
        let client = self.store.client();

        match &self.command {
            Command::Info => {
                info!("App id: {}", client.application_id());
                info!("Requires auth: {}", client.requires_auth());
                info!("Authenticated: {}", client.is_authenticated());
            }
            Command::WhoAmI => {
                let user = client.me().await?;
                info!(
                    "Signed in as {} <{}>",
                    user.full_name.as_deref().unwrap_or("(no name)"),
                    user.email
                );
            }
            Command::Summary { project_id } => {
                if let Some(project) = self.store.load_project(project_id).await? {
                    info!(
                        "Project: {} ({}, {} m²)",
                        project.project_name, project.building_type, project.floor_area_m2
                    );
                }

                let table = self.store.load_materials(project_id).await?;
                for section in Section::ALL {
                    info!("{}", table.section_report(section));
                }

                let summary = beam::EmissionsSummary::from_table(&table);
                for row in &summary.rows {
                    info!("  {:<20} {:>10.3} t CO2e", row.material, row.emissions_t_co2e);
                }
                info!("Total Emissions: {}", summary.headline());
            }
            Command::Reset { project_id } => {
                let project = ProjectInfo {
                    project_id: project_id.clone(),
                    ..Default::default()
                };
                self.store.save_project(&project).await?;
                let rows = self
                    .store
                    .replace_materials(project_id, &MaterialTable::with_defaults())
                    .await?;
                info!("Stored {} default material rows for {}", rows, project_id);
            }
        }

        Ok(())
    }

    fn config(&self) -> &RunConfig {
        &self.run_config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let (config_type, args) = take_config_arg(parse_args()).map_err(anyhow::Error::msg)?;
    let command = Command::parse(&args).map_err(anyhow::Error::msg)?;

    let config_path = load_config_from_env(config_type);
    let config = ServiceConfig::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    init_tracing(&config.log_level);
    config.log();

    let client = beam::init_client(&Base44Factory, &config)?;

    let mut app = BeamApp {
        run_config: RunConfig::new("beam").with_app_id(client.application_id()),
        command,
        store: EmissionsStore::new(client),
    };

    app.execute().await
}
