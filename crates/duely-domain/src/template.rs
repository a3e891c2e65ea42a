//! Domain models for payment templates and their due rules.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, Identifiable, DEFAULT_CURRENCY};

/// A user-defined bill: either recurring on a day of every month, or one-off
/// on a fixed date. The recurrence enum guarantees exactly one due rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentTemplate {
    pub id: Uuid,
    pub title: String,
    pub amount: Decimal,
    pub currency: String,
    pub recurrence: Recurrence,
}

impl PaymentTemplate {
    pub fn monthly(title: impl Into<String>, amount: Decimal, due_day: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            currency: DEFAULT_CURRENCY.into(),
            recurrence: Recurrence::Monthly { due_day },
        }
    }

    pub fn once(title: impl Into<String>, amount: Decimal, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            currency: DEFAULT_CURRENCY.into(),
            recurrence: Recurrence::Once { due_date },
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

impl Identifiable for PaymentTemplate {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for PaymentTemplate {
    fn display_label(&self) -> String {
        format!("{} ({} {})", self.title, self.amount, self.currency)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
/// Due rule for a template. `Monthly` repeats indefinitely on `due_day`
/// (clamped into short months); `Once` fires in a single calendar month.
pub enum Recurrence {
    Monthly { due_day: u32 },
    Once { due_date: NaiveDate },
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Monthly { due_day } => write!(f, "monthly on day {due_day}"),
            Recurrence::Once { due_date } => write!(f, "once on {due_date}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn recurrence_serializes_with_kind_tag() {
        let template = PaymentTemplate::monthly("Rent", dec!(2400), 1);
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["recurrence"]["kind"], "monthly");
        assert_eq!(json["recurrence"]["due_day"], 1);

        let due = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let template = PaymentTemplate::once("Insurance", dec!(980.50), due);
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["recurrence"]["kind"], "once");
        assert_eq!(json["recurrence"]["due_date"], "2024-03-15");
    }

    #[test]
    fn amount_round_trips_exactly() {
        let template =
            PaymentTemplate::monthly("Electricity", dec!(123.45), 20).with_currency("EUR");
        let json = serde_json::to_string(&template).unwrap();
        let back: PaymentTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(back.amount, dec!(123.45));
        assert_eq!(back.currency, "EUR");
        assert_eq!(back, template);
    }
}
