//! Business logic services for the application layer.

pub mod click_recorder;
pub mod code_allocator;
pub mod link_service;
pub mod stats_service;

pub use click_recorder::ClickRecorder;
pub use code_allocator::CodeAllocator;
pub use link_service::{CreateLink, LinkService, Redirect};
pub use stats_service::{LinkStats, StatsService, summarize};
