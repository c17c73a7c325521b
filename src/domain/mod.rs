//! Domain layer containing business entities and rules.
//!
//! This module has no dependency on HTTP or storage drivers.
//!
//! - [`entities`] - mapping and click data structures
//! - [`repositories`] - storage contract ([`repositories::UrlRegistry`])
//! - [`expiry`] - validity window computation and liveness
//! - [`clock`] - injectable time source
//!
//! # Lifecycle of a mapping
//!
//! 1. Created once with an allocated short code and a fixed expiry
//! 2. Read by redirects and stats lookups
//! 3. Mutated only by click appends on live redirects
//! 4. Considered expired once `now > expires_at`; never deleted

pub mod clock;
pub mod entities;
pub mod expiry;
pub mod repositories;
