//! Process-wide client slot
//!
//! Startup calls `initialize` once; everything else reads the handle with
//! `get`/`handle`. The slot is never cleared or replaced.

use crate::client::ClientHandle;
use crate::config::ClientConfiguration;
use crate::factory::ClientFactory;
use parking_lot::Mutex;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Client has not been initialized")]
    NotInitialized,
}

struct Slot {
    config: ClientConfiguration,
    handle: ClientHandle,
}

/// Holds the single client handle and the configuration it was built from
#[derive(Default)]
pub struct ClientRegistry {
    slot: Mutex<Option<Slot>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the handle on first call; later calls return the same handle.
    ///
    /// Factory errors come back untouched and leave the registry empty.
    /// A later call with a different configuration does not rebuild anything.
    pub fn initialize<F: ClientFactory>(
        &self,
        factory: &F,
        config: ClientConfiguration,
    ) -> Result<ClientHandle, F::Error> {
        let mut slot = self.slot.lock();

        if let Some(existing) = slot.as_ref() {
            if existing.config != config {
                warn!(
                    "Client already initialized for app {}, ignoring new configuration for app {}",
                    existing.config.application_id(),
                    config.application_id()
                );
            }
            return Ok(existing.handle.clone());
        }

        let handle = factory.create_client(&config)?;
        info!("Client initialized for app {}", config.application_id());

        *slot = Some(Slot {
            config,
            handle: handle.clone(),
        });
        Ok(handle)
    }

    pub fn get(&self) -> Option<ClientHandle> {
        self.slot.lock().as_ref().map(|s| s.handle.clone())
    }

    pub fn handle(&self) -> Result<ClientHandle, RegistryError> {
        self.get().ok_or(RegistryError::NotInitialized)
    }

    pub fn configuration(&self) -> Option<ClientConfiguration> {
        self.slot.lock().as_ref().map(|s| s.config.clone())
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.lock().is_some()
    }
}

/// The process-wide registry
pub fn global() -> &'static ClientRegistry {
    static GLOBAL: OnceLock<ClientRegistry> = OnceLock::new();
    GLOBAL.get_or_init(ClientRegistry::new)
}
