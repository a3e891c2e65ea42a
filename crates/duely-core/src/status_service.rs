//! Paid-status upserts keyed by (template, month).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use duely_domain::{calendar::MonthKey, BillBook, MonthStatus};

use crate::CoreError;

pub struct StatusService;

impl StatusService {
    /// Marks a template paid or unpaid for one month.
    ///
    /// Updates the existing record in place or appends a new one, so each
    /// `(template_id, month)` pair keeps a single record. `paid_at` is set
    /// when paying and cleared when unpaying.
    pub fn set_paid(
        book: &mut BillBook,
        template_id: Uuid,
        month: MonthKey,
        paid: bool,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        if book.template(template_id).is_none() {
            return Err(CoreError::TemplateNotFound(template_id));
        }
        let existing = book
            .statuses
            .iter()
            .position(|status| status.template_id == template_id && status.month == month);
        match existing {
            Some(index) => {
                let status = &mut book.statuses[index];
                status.is_paid = paid;
                status.paid_at = paid.then_some(now);
            }
            None => {
                book.statuses
                    .push(MonthStatus::new(template_id, month, paid, paid.then_some(now)));
            }
        }
        book.touch();
        Ok(())
    }
}
