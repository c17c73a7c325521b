//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! with `mockall` for unit tests.

pub mod url_registry;

pub use url_registry::UrlRegistry;

#[cfg(test)]
pub use url_registry::MockUrlRegistry;
