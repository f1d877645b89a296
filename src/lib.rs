//! BEAM - Main Library
//!
//! Building emissions accounting on top of the Base44 client façade.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI, runners)
//! - **base44**: Authenticated Base44 client (re-exported from workspace)
//! - **beam**: Emissions domain and storage (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use beam_app::bin_common::{load_config_from_env, ConfigType};
//! use beam_app::beam::EmissionsStore;
//! ```

// Re-export workspace libraries for convenience
pub use base44;
pub use beam;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod runner;

    pub use cli::{
        load_config_from_env, parse_args, take_config_arg, Command, ConfigType,
        DEFAULT_PROJECT_ID,
    };
    pub use runner::{BinaryRunner, RunConfig};
}
