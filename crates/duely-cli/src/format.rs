//! Terminal rendering: amount parsing, month tables, urgency bars.

use chrono::{NaiveDate, NaiveDateTime};
use colored::Colorize;
use comfy_table::Table;
use rust_decimal::Decimal;

use duely_core::{countdown_label, MonthTotals, Urgency};
use duely_domain::{calendar::MonthKey, Occurrence};

const BAR_WIDTH: usize = 10;

/// Parses a user-supplied amount as an exact decimal. Spaces are stripped
/// and a comma decimal separator is accepted.
pub fn parse_amount(text: &str) -> Result<Decimal, String> {
    let normalized = text.trim().replace(' ', "").replace(',', ".");
    if normalized.is_empty() {
        return Err("amount is empty".into());
    }
    Decimal::from_str_exact(&normalized)
        .map_err(|err| format!("could not parse amount `{}`: {}", text, err))
}

pub fn currency_symbol(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "PLN" => "zł".into(),
        _ => code.into(),
    }
}

/// Short due-date form, e.g. "14 Jan".
pub fn short_date(date: NaiveDate) -> String {
    date.format("%-d %b").to_string()
}

pub fn month_heading(month: MonthKey, totals: &MonthTotals) -> String {
    let name = month.first_day().format("%B %Y").to_string();
    if totals.total > Decimal::ZERO {
        format!(
            "{} ({} / {} {})",
            name,
            totals.paid,
            totals.total,
            currency_symbol(&totals.currency)
        )
    } else {
        name
    }
}

/// A fixed-width bar filled by remaining headroom and colored by the band.
pub fn urgency_bar(urgency: Urgency, is_paid: bool) -> String {
    let filled = ((urgency.progress * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
    if is_paid {
        bar.dimmed().to_string()
    } else {
        let color = urgency.color;
        bar.truecolor(color.r, color.g, color.b).to_string()
    }
}

pub fn month_table(
    occurrences: &[Occurrence],
    window_days: f64,
    now: NaiveDateTime,
    today: NaiveDate,
) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Bill", "Amount", "Due", "Left", "Urgency"]);
    for occurrence in occurrences {
        let urgency = Urgency::score(occurrence.due_date, occurrence.is_paid, window_days, now);
        let id = occurrence.template.id.to_string();
        table.add_row(vec![
            id[..8].to_string(),
            occurrence.template.title.clone(),
            format!(
                "{} {}",
                occurrence.template.amount,
                currency_symbol(&occurrence.template.currency)
            ),
            short_date(occurrence.due_date),
            countdown_label(occurrence.due_date, occurrence.is_paid, today),
            urgency_bar(urgency, occurrence.is_paid),
        ]);
    }
    table
}
