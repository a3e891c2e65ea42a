//! The urgent-bill predicate behind the alert indicator.

use chrono::{Duration, NaiveDate};

use duely_domain::{calendar::MonthKey, BillBook};

use crate::occurrence_service::{OccurrenceOptions, OccurrenceService};

pub struct AlertService;

impl AlertService {
    /// True iff any unpaid occurrence in the current or next calendar month
    /// is due within `[today, today + alert_days]` inclusive.
    pub fn has_urgent_bills(book: &BillBook, alert_days: u32, today: NaiveDate) -> bool {
        let threshold = today + Duration::days(i64::from(alert_days));
        let current = MonthKey::from_date(today);
        [current, current.next()].into_iter().any(|month| {
            OccurrenceService::for_month(book, month, OccurrenceOptions::default())
                .iter()
                .any(|occurrence| {
                    !occurrence.is_paid
                        && occurrence.due_date >= today
                        && occurrence.due_date <= threshold
                })
        })
    }
}
