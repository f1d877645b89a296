//! BEAM's Base44 client
//!
//! The application talks to one Base44 app and every call must be
//! authenticated. Startup initializes the handle once; the rest of the
//! application reads it with [`client`].
//!
//! The service configuration only tunes the transport (server URL, timeout,
//! access token). The auth policy is fixed, and the app id can only be
//! changed through the `BASE44_APP_ID` environment override.

use base44::registry::global;
use base44::{ClientConfiguration, ClientFactory, ClientHandle, RegistryError, ServiceConfig};
use std::time::Duration;
use tracing::warn;

/// Base44 application id for BEAM
pub const BEAM_APP_ID: &str = "6862a46146d51035d8059d9d";

/// Every BEAM operation requires an authenticated user
pub const BEAM_REQUIRES_AUTH: bool = true;

/// BEAM's client configuration with transport settings from `config`
pub fn configuration(config: &ServiceConfig) -> ClientConfiguration {
    if !config.requires_auth {
        warn!("Ignoring requires_auth: false, BEAM always requires authentication");
    }

    let app_id = if config.app_id_overridden {
        config.app_id.as_str()
    } else {
        if config.app_id != BEAM_APP_ID {
            warn!(
                "Ignoring app_id {} from config file, using {}",
                config.app_id, BEAM_APP_ID
            );
        }
        BEAM_APP_ID
    };

    ClientConfiguration::new(app_id, BEAM_REQUIRES_AUTH)
        .with_server_url(config.server_url.clone())
        .with_timeout(Duration::from_secs(config.timeout_secs))
        .with_access_token(config.access_token.clone())
}

/// Initialize the process-wide client for BEAM
pub fn init_client<F: ClientFactory>(
    factory: &F,
    config: &ServiceConfig,
) -> Result<ClientHandle, F::Error> {
    global().initialize(factory, configuration(config))
}

/// The process-wide client
pub fn client() -> Result<ClientHandle, RegistryError> {
    global().handle()
}
