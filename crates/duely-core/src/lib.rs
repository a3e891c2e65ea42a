//! duely-core
//!
//! Business logic and services for Duely: occurrence generation, urgency
//! scoring, the urgent-bill predicate, and template/status mutations.
//! Depends on duely-domain. No CLI, no terminal I/O, no direct storage
//! interactions.

pub mod alert_service;
pub mod error;
pub mod occurrence_service;
pub mod status_service;
pub mod storage;
pub mod template_service;
pub mod time;
pub mod urgency;

pub use alert_service::*;
pub use error::CoreError;
pub use occurrence_service::*;
pub use status_service::*;
pub use template_service::*;
pub use time::*;
pub use urgency::*;
