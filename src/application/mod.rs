//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::code_allocator::CodeAllocator`] - Decides the short code of a new link
//! - [`services::link_service::LinkService`] - Link creation, lookup, redirect and deletion

pub mod services;
