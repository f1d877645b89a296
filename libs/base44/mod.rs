//! Base44 service client
//!
//! Authenticated client façade for the Base44 backend-as-a-service platform.
//!
//! ## Layout
//!
//! - **config**: client configuration record and YAML/env loading
//! - **client**: the `AuthenticatedServiceClient` trait and its HTTP implementation
//! - **factory**: `ClientFactory` and the production `Base44Factory`
//! - **registry**: process-wide singleton slot for the one client handle
//! - **logging**: tracing initialization

pub mod client;
pub mod config;
pub mod factory;
pub mod logging;
pub mod registry;

pub use client::{
    auth::{default_token_sources, get_access_token, AccessToken, TokenSource},
    types::{EntityRecord, ListQuery, User},
    AuthenticatedServiceClient, Base44Client, ClientError, ClientHandle,
};
pub use config::{ClientConfiguration, ConfigError, ServiceConfig, DEFAULT_SERVER_URL};
pub use factory::{create_client, Base44Factory, ClientFactory};
pub use logging::init_tracing;
pub use registry::{ClientRegistry, RegistryError};
