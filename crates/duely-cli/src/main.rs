mod args;
mod commands;
mod format;

use std::{process::ExitCode, sync::Once};

use clap::Parser;

use args::{Cli, Command};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env().add_directive("duely=info".parse().unwrap());

        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut ctx = commands::build_context(cli.data_dir)?;

    match cli.command {
        Command::List { month, all } => commands::list(&ctx, month.as_deref(), all),
        Command::Add {
            title,
            amount,
            day,
            date,
            currency,
        } => commands::add(
            &ctx,
            &title,
            &amount,
            day,
            date.as_deref(),
            currency.as_deref(),
        ),
        Command::Pay { template, month } => {
            commands::set_paid(&ctx, &template, month.as_deref(), true)
        }
        Command::Unpay { template, month } => {
            commands::set_paid(&ctx, &template, month.as_deref(), false)
        }
        Command::Remove { template } => commands::remove(&ctx, &template),
        Command::Alert => commands::alert(&ctx),
        Command::Settings => commands::show_settings(&ctx),
        Command::Set {
            hide_paid,
            alert_days,
            retention,
            currency,
        } => commands::update_settings(
            &mut ctx,
            hide_paid,
            alert_days,
            retention,
            currency.as_deref(),
        ),
        Command::Backups => commands::list_backups(&ctx),
    }
}
