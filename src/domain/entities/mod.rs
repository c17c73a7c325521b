//! Core domain entities.
//!
//! - [`Mapping`] - a short code bound to an original URL and a validity window
//! - [`ClickEvent`] - one recorded redirect
//!
//! [`NewMapping`] carries creation input before a short code is allocated.

pub mod click;
pub mod mapping;

pub use click::{ClickEvent, DIRECT_REFERRER, UNKNOWN_LOCATION};
pub use mapping::{Mapping, NewMapping};
