//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::UrlRegistry`] trait and
//! give HTTP handlers and the admin CLI a small API.
//!
//! - [`services::link_service::LinkService`] - creation and redirect resolution
//! - [`services::code_allocator::CodeAllocator`] - unique short code claiming
//! - [`services::click_recorder::ClickRecorder`] - click appends
//! - [`services::stats_service::StatsService`] - click statistics

pub mod services;
