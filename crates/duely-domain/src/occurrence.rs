//! Derived occurrences: a template resolved into one concrete month.

use chrono::NaiveDate;

use crate::calendar::MonthKey;
use crate::template::PaymentTemplate;

/// A template's concrete instance for one calendar month, with its resolved
/// due date and paid flag. Recomputed on every query; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub template: PaymentTemplate,
    pub month: MonthKey,
    pub due_date: NaiveDate,
    pub is_paid: bool,
}
