//! duely-domain
//!
//! Pure domain models for bill tracking (PaymentTemplate, MonthStatus,
//! Occurrence, BillBook) plus calendar-month arithmetic.
//! No I/O, no CLI, no storage. Only data types and date helpers.

pub mod book;
pub mod calendar;
pub mod common;
pub mod occurrence;
pub mod status;
pub mod template;

pub use book::*;
pub use calendar::*;
pub use common::*;
pub use occurrence::*;
pub use status::*;
pub use template::*;
