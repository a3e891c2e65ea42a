//! Projects templates into concrete occurrences for a calendar month.

use rust_decimal::Decimal;

use duely_domain::{
    calendar::{clamped_date, MonthKey},
    BillBook, Occurrence, Recurrence, DEFAULT_CURRENCY,
};

/// Controls which occurrences a query returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct OccurrenceOptions {
    /// Drop occurrences that are already paid.
    pub hide_paid: bool,
}

/// Paid/total amounts across one month's occurrences.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotals {
    pub paid: Decimal,
    pub total: Decimal,
    pub currency: String,
}

pub struct OccurrenceService;

impl OccurrenceService {
    /// Resolves every template against one calendar month.
    ///
    /// Monthly templates contribute exactly one occurrence per month, with
    /// the due day clamped into short months. One-off templates contribute
    /// only in the month containing their fixed date. Sort order: unpaid
    /// before paid, then ascending due date, then title.
    pub fn for_month(
        book: &BillBook,
        month: MonthKey,
        options: OccurrenceOptions,
    ) -> Vec<Occurrence> {
        let mut occurrences: Vec<Occurrence> = book
            .templates
            .iter()
            .filter_map(|template| {
                let due_date = match template.recurrence {
                    Recurrence::Monthly { due_day } => {
                        Some(clamped_date(month.year(), month.month(), due_day))
                    }
                    Recurrence::Once { due_date } => month.contains(due_date).then_some(due_date),
                }?;
                Some(Occurrence {
                    template: template.clone(),
                    month,
                    due_date,
                    is_paid: book.is_paid(template.id, month),
                })
            })
            .collect();

        if options.hide_paid {
            occurrences.retain(|occurrence| !occurrence.is_paid);
        }

        occurrences.sort_by(|a, b| {
            a.is_paid
                .cmp(&b.is_paid)
                .then_with(|| a.due_date.cmp(&b.due_date))
                .then_with(|| a.template.title.cmp(&b.template.title))
        });

        occurrences
    }

    /// Sums paid and total amounts for a month. Totals always cover every
    /// occurrence, including paid ones hidden from listings.
    pub fn month_totals(book: &BillBook, month: MonthKey) -> MonthTotals {
        let occurrences = Self::for_month(book, month, OccurrenceOptions::default());
        let currency = occurrences
            .first()
            .map(|occurrence| occurrence.template.currency.clone())
            .unwrap_or_else(|| DEFAULT_CURRENCY.into());
        let mut totals = MonthTotals {
            paid: Decimal::ZERO,
            total: Decimal::ZERO,
            currency,
        };
        for occurrence in &occurrences {
            totals.total += occurrence.template.amount;
            if occurrence.is_paid {
                totals.paid += occurrence.template.amount;
            }
        }
        totals
    }
}
