//! Link store implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - PostgreSQL via SQLx; uniqueness and click counting
//!   are enforced by single SQL statements
//! - [`InMemoryLinkRepository`] - process-local map guarded by a mutex, used for
//!   `STORAGE_BACKEND=memory` and tests

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::InMemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
