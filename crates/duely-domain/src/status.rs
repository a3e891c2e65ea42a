//! Per-month paid-status records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::MonthKey;
use crate::common::Identifiable;

/// Records whether a template's occurrence in one month has been paid.
/// At most one record exists per `(template_id, month)` pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthStatus {
    pub id: Uuid,
    pub template_id: Uuid,
    pub month: MonthKey,
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

impl MonthStatus {
    pub fn new(
        template_id: Uuid,
        month: MonthKey,
        is_paid: bool,
        paid_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            template_id,
            month,
            is_paid,
            paid_at,
        }
    }
}

impl Identifiable for MonthStatus {
    fn id(&self) -> Uuid {
        self.id
    }
}
