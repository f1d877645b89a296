//! BEAM - Building Emissions Accounting
//!
//! Embodied-carbon bookkeeping for a building project, persisted through the
//! Base44 client.

pub mod client;
pub mod domain;
pub mod store;

pub use client::{client, init_client, BEAM_APP_ID, BEAM_REQUIRES_AUTH};
pub use domain::{
    BuildingType, EmissionsSummary, MaterialEntry, MaterialSummary, MaterialTable, ProjectInfo,
    Section,
};
pub use store::{EmissionsStore, StoreError};
