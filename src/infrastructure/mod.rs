//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - registry implementations (in-memory and PostgreSQL)
//! - [`telemetry`] - fire-and-forget event shipping

pub mod persistence;
pub mod telemetry;
