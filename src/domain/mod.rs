//! Domain layer containing business entities and the storage contract.
//!
//! This module has no dependencies on infrastructure or presentation layers.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`errors`] - Failure taxonomy of the allocator and the link store
//!
//! Business logic lives in services (see [`crate::application::services`]);
//! concrete stores live in [`crate::infrastructure::persistence`].

pub mod entities;
pub mod errors;
pub mod repositories;
