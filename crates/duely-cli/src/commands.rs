//! Command handlers behind the `duely` binary.

use std::{error::Error, process::ExitCode};

use tracing::warn;
use uuid::Uuid;

use duely_config::{Settings, SettingsManager};
use duely_core::{
    storage::BillStorage, AlertService, Clock, OccurrenceOptions, OccurrenceService, StatusService,
    SystemClock, TemplateService, DEFAULT_WINDOW_DAYS,
};
use duely_domain::{calendar::MonthKey, BillBook, Displayable, PaymentTemplate};
use duely_storage_json::JsonBillStorage;

use crate::format;

pub struct AppContext {
    pub settings_manager: SettingsManager,
    pub settings: Settings,
    pub storage: JsonBillStorage,
    pub clock: Box<dyn Clock>,
}

impl AppContext {
    /// Loads the bill book, starting empty when no data file exists yet or
    /// when the existing one was quarantined as unreadable.
    fn load_book(&self) -> Result<BillBook, Box<dyn Error>> {
        match self.storage.load() {
            Ok(Some(book)) => Ok(book),
            Ok(None) => Ok(BillBook::new()),
            Err(err) => {
                warn!(%err, "starting with an empty bill book");
                eprintln!("warning: {err}");
                Ok(BillBook::new())
            }
        }
    }

    fn parse_month(&self, month: Option<&str>) -> Result<MonthKey, Box<dyn Error>> {
        match month {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(MonthKey::from_date(self.clock.today())),
        }
    }

    /// Resolves user input to a template: full id, unique id prefix, or
    /// exact (case-insensitive) title.
    fn resolve_template<'a>(
        &self,
        book: &'a BillBook,
        query: &str,
    ) -> Result<&'a PaymentTemplate, Box<dyn Error>> {
        if let Ok(id) = query.parse::<Uuid>() {
            return book
                .template(id)
                .ok_or_else(|| format!("no template with id {id}").into());
        }

        let by_prefix: Vec<_> = book
            .templates
            .iter()
            .filter(|template| template.id.to_string().starts_with(query))
            .collect();
        match by_prefix.as_slice() {
            [single] => return Ok(*single),
            [] => {}
            _ => return Err(format!("id prefix `{query}` is ambiguous").into()),
        }

        let by_title: Vec<_> = book
            .templates
            .iter()
            .filter(|template| template.title.eq_ignore_ascii_case(query))
            .collect();
        match by_title.as_slice() {
            [single] => Ok(*single),
            [] => Err(format!("no template matching `{query}`").into()),
            _ => Err(format!("title `{query}` matches several templates; use the id").into()),
        }
    }
}

pub fn list(
    ctx: &AppContext,
    month: Option<&str>,
    all: bool,
) -> Result<ExitCode, Box<dyn Error>> {
    let book = ctx.load_book()?;
    let today = ctx.clock.today();
    let now = ctx.clock.local_now();
    let options = OccurrenceOptions {
        hide_paid: ctx.settings.hide_paid && !all,
    };

    let months = match month {
        Some(raw) => vec![raw.parse::<MonthKey>()?],
        None => {
            let current = MonthKey::from_date(today);
            vec![current, current.next()]
        }
    };

    for month in months {
        let totals = OccurrenceService::month_totals(&book, month);
        println!("{}", format::month_heading(month, &totals));
        let occurrences = OccurrenceService::for_month(&book, month, options);
        if occurrences.is_empty() {
            println!("No items");
        } else {
            let table = format::month_table(&occurrences, DEFAULT_WINDOW_DAYS, now, today);
            println!("{table}");
        }
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

pub fn add(
    ctx: &AppContext,
    title: &str,
    amount: &str,
    day: Option<u32>,
    date: Option<&str>,
    currency: Option<&str>,
) -> Result<ExitCode, Box<dyn Error>> {
    let amount = format::parse_amount(amount)?;
    let template = match (day, date) {
        (Some(day), None) => PaymentTemplate::monthly(title, amount, day),
        (None, Some(date)) => PaymentTemplate::once(title, amount, date.parse()?),
        _ => return Err("pass either --day N or --date YYYY-MM-DD".into()),
    };
    let currency = currency.unwrap_or(&ctx.settings.currency);
    let template = template.with_currency(currency);
    let label = template.display_label();

    let mut book = ctx.load_book()?;
    let id = TemplateService::add(&mut book, template)?;
    ctx.storage.save(&book)?;
    println!("added {label} ({id})");
    Ok(ExitCode::SUCCESS)
}

pub fn set_paid(
    ctx: &AppContext,
    query: &str,
    month: Option<&str>,
    paid: bool,
) -> Result<ExitCode, Box<dyn Error>> {
    let mut book = ctx.load_book()?;
    let template = ctx.resolve_template(&book, query)?;
    let id = template.id;
    let title = template.title.clone();
    let month = ctx.parse_month(month)?;

    StatusService::set_paid(&mut book, id, month, paid, ctx.clock.now())?;
    ctx.storage.save(&book)?;
    println!(
        "{} {} for {}",
        if paid { "paid" } else { "unpaid" },
        title,
        month
    );
    Ok(ExitCode::SUCCESS)
}

pub fn remove(ctx: &AppContext, query: &str) -> Result<ExitCode, Box<dyn Error>> {
    let mut book = ctx.load_book()?;
    let template = ctx.resolve_template(&book, query)?;
    let id = template.id;
    let title = template.title.clone();

    TemplateService::remove(&mut book, id)?;
    ctx.storage.save(&book)?;
    println!("removed {title}");
    Ok(ExitCode::SUCCESS)
}

pub fn alert(ctx: &AppContext) -> Result<ExitCode, Box<dyn Error>> {
    let book = ctx.load_book()?;
    let today = ctx.clock.today();
    if AlertService::has_urgent_bills(&book, ctx.settings.alert_days, today) {
        println!(
            "! unpaid bills due within {} day(s)",
            ctx.settings.alert_days
        );
        Ok(ExitCode::from(1))
    } else {
        println!("no urgent bills");
        Ok(ExitCode::SUCCESS)
    }
}

pub fn show_settings(ctx: &AppContext) -> Result<ExitCode, Box<dyn Error>> {
    let settings = &ctx.settings;
    println!("hide_paid: {}", settings.hide_paid);
    println!("alert_days: {}", settings.alert_days);
    println!("backup_retention_days: {}", settings.backup_retention_days);
    println!("currency: {}", settings.currency);
    println!("data_dir: {}", ctx.storage.data_dir().display());
    Ok(ExitCode::SUCCESS)
}

pub fn update_settings(
    ctx: &mut AppContext,
    hide_paid: Option<bool>,
    alert_days: Option<u32>,
    retention: Option<u32>,
    currency: Option<&str>,
) -> Result<ExitCode, Box<dyn Error>> {
    if hide_paid.is_none() && alert_days.is_none() && retention.is_none() && currency.is_none() {
        return Err("nothing to change; pass at least one setting flag".into());
    }
    if let Some(hide_paid) = hide_paid {
        ctx.settings.hide_paid = hide_paid;
    }
    if let Some(alert_days) = alert_days {
        ctx.settings.alert_days = alert_days;
    }
    if let Some(retention) = retention {
        ctx.settings.backup_retention_days = retention;
    }
    if let Some(currency) = currency {
        ctx.settings.currency = currency.to_uppercase();
    }
    ctx.settings_manager.save(&ctx.settings)?;
    println!("settings saved");
    Ok(ExitCode::SUCCESS)
}

pub fn list_backups(ctx: &AppContext) -> Result<ExitCode, Box<dyn Error>> {
    let backups = ctx.storage.list_backups()?;
    if backups.is_empty() {
        println!("no backups");
        return Ok(ExitCode::SUCCESS);
    }
    for backup in backups {
        println!(
            "{}  {:>8} bytes  {}",
            backup.date,
            backup.size_bytes,
            backup.path.display()
        );
    }
    Ok(ExitCode::SUCCESS)
}

pub fn build_context(data_dir: Option<std::path::PathBuf>) -> Result<AppContext, Box<dyn Error>> {
    let base_dir = data_dir
        .clone()
        .unwrap_or_else(|| Settings::default().resolve_data_dir());
    let settings_manager = SettingsManager::in_dir(&base_dir);
    let settings = settings_manager.load()?;
    let storage_dir = data_dir
        .or_else(|| settings.data_dir.clone())
        .unwrap_or(base_dir);
    let storage = JsonBillStorage::with_retention(storage_dir, settings.backup_retention_days)?;
    Ok(AppContext {
        settings_manager,
        settings,
        storage,
        clock: Box::new(SystemClock),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn context(dir: &std::path::Path) -> AppContext {
        build_context(Some(dir.to_path_buf())).expect("build context")
    }

    #[test]
    fn resolve_template_by_prefix_and_title() {
        let dir = tempdir().expect("tempdir");
        let ctx = context(dir.path());
        let mut book = BillBook::new();
        let rent = PaymentTemplate::monthly("Rent", dec!(2400), 1);
        let rent_id = rent.id;
        TemplateService::add(&mut book, rent).expect("add rent");
        TemplateService::add(&mut book, PaymentTemplate::monthly("Water", dec!(85), 10))
            .expect("add water");

        let prefix = rent_id.to_string()[..8].to_string();
        assert_eq!(ctx.resolve_template(&book, &prefix).unwrap().id, rent_id);
        assert_eq!(ctx.resolve_template(&book, "rent").unwrap().id, rent_id);
        assert_eq!(
            ctx.resolve_template(&book, &rent_id.to_string()).unwrap().id,
            rent_id
        );
        assert!(ctx.resolve_template(&book, "electricity").is_err());
    }

    #[test]
    fn ambiguous_title_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let ctx = context(dir.path());
        let mut book = BillBook::new();
        TemplateService::add(&mut book, PaymentTemplate::monthly("Rent", dec!(2400), 1))
            .expect("add first");
        TemplateService::add(&mut book, PaymentTemplate::monthly("rent", dec!(100), 2))
            .expect("add second");

        assert!(ctx.resolve_template(&book, "Rent").is_err());
    }
}
