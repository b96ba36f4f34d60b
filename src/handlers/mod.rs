// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components and the shared application state types

pub mod bucket;
pub mod create;
pub mod health;
pub mod plans;
pub mod session;
pub mod social;

use crate::services::{AppController, ItinerarySupplier};
use std::sync::Arc;
use tokio::sync::Mutex;

pub use bucket::config as bucket_config;
pub use create::config as create_config;
pub use health::config as health_config;
pub use plans::config as plans_config;
pub use session::config as session_config;
pub use social::config as social_config;

/// Application state shared by every worker
/// DOCUMENTATION: The lock is never held across a supplier call
pub type SharedController = Mutex<AppController>;

/// Supplier picked once at startup
pub type SharedSupplier = Arc<dyn ItinerarySupplier>;
