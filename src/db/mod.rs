// src/db/mod.rs
// DOCUMENTATION: Persistence module organization
// PURPOSE: Re-export persistence components

pub mod auth_repository;

pub use auth_repository::*;
