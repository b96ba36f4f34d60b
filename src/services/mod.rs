// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod app_controller;
pub mod gemini_client;
pub mod live_supplier;
pub mod map_visualizer;
pub mod mock_supplier;
pub mod plan_creator;
pub mod supplier;

pub use app_controller::*;
pub use gemini_client::GeminiClient;
pub use live_supplier::LiveSupplier;
pub use mock_supplier::{mock_itinerary, DeterministicMockSupplier};
pub use plan_creator::*;
pub use supplier::*;
