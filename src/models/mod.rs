// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod bucket;
pub mod itinerary;
pub mod plan;
pub mod social;

pub use bucket::*;
pub use itinerary::*;
pub use plan::*;
pub use social::*;
