//! The bill book: the single owning collection of templates and statuses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::MonthKey;
use crate::status::MonthStatus;
use crate::template::PaymentTemplate;

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Owns all templates and paid-status records. Occurrences are projected
/// from it on demand; callers serialize writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillBook {
    #[serde(default)]
    pub templates: Vec<PaymentTemplate>,
    #[serde(default)]
    pub statuses: Vec<MonthStatus>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default = "BillBook::schema_version_default")]
    pub schema_version: u8,
}

impl BillBook {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            templates: Vec::new(),
            statuses: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn template(&self, id: Uuid) -> Option<&PaymentTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    pub fn template_mut(&mut self, id: Uuid) -> Option<&mut PaymentTemplate> {
        self.templates.iter_mut().find(|template| template.id == id)
    }

    pub fn status(&self, template_id: Uuid, month: MonthKey) -> Option<&MonthStatus> {
        self.statuses
            .iter()
            .find(|status| status.template_id == template_id && status.month == month)
    }

    /// Paid flag for a (template, month) pair; absent record means unpaid.
    pub fn is_paid(&self, template_id: Uuid, month: MonthKey) -> bool {
        self.status(template_id, month)
            .map(|status| status.is_paid)
            .unwrap_or(false)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for BillBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn deserializes_bare_template_status_payload() {
        // Older data files carry only templates and statuses.
        let json = r#"{"templates": [], "statuses": []}"#;
        let book: BillBook = serde_json::from_str(json).unwrap();
        assert!(book.templates.is_empty());
        assert_eq!(book.schema_version, BillBook::schema_version_default());
    }

    #[test]
    fn missing_status_record_reads_as_unpaid() {
        let mut book = BillBook::new();
        let template = PaymentTemplate::monthly("Water", dec!(85), 10);
        let id = template.id;
        book.templates.push(template);
        let month = MonthKey::new(2024, 5).unwrap();

        assert!(!book.is_paid(id, month));

        book.statuses
            .push(MonthStatus::new(id, month, true, Some(Utc::now())));
        assert!(book.is_paid(id, month));
        assert!(!book.is_paid(id, month.next()));
    }
}
