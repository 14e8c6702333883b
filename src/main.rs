use anyhow::{bail, Context, Result};
use chrono::Local;
use prazoscan::{
    config::MonitorConfig,
    notify::{HttpTransport, LogTransport, OutboundMessage, Transport},
    report, scan,
    source::CsvWorkbook,
};
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();
    info!("startup");

    let args: Vec<String> = env::args().collect();
    let dry_run = args.iter().any(|a| a == "--dry-run");
    let positional: Vec<&String> = args.iter().skip(1).filter(|a| *a != "--dry-run").collect();
    if positional.len() != 2 {
        bail!("usage: prazoscan <config.yaml> <data-dir> [--dry-run]");
    }
    let (config_path, data_dir) = (positional[0], positional[1]);

    // ─── 2) load + validate configuration ────────────────────────────
    let config = MonitorConfig::load(config_path)?;
    let alert_days = config.alert_days_set()?;
    let shape = config.shape();

    // ─── 3) resolve the monitored sheet ──────────────────────────────
    let workbook = CsvWorkbook::open(data_dir)?;
    let sheet = workbook
        .sheet(&config.sheet)
        .with_context(|| format!("sheet not found: '{}'", config.sheet))?;
    info!(sheet = %sheet.name, rows = sheet.row_count(), "sheet loaded");

    shape.validate(sheet.column_count())?;
    if sheet.row_count() < shape.start_row {
        info!("no data rows past the header; nothing to scan");
        return Ok(());
    }

    // ─── 4) scan ─────────────────────────────────────────────────────
    // the clock is read exactly once, here; the scan itself is pure
    let today = Local::now().date_naive();
    let outcome = scan::scan(&sheet.rows, &shape, &alert_days, today);

    info!(
        rows = outcome.rows_scanned,
        alerts = outcome.events.len(),
        "scan complete"
    );
    for obs in &outcome.invalid_dates {
        warn!(row = obs.row, column = obs.column, value = %obs.value, "unparseable date cell");
    }

    if outcome.events.is_empty() {
        info!("no alerts to send today");
        return Ok(());
    }

    // ─── 5) render + deliver ─────────────────────────────────────────
    let intro = format!(
        "The items below are due in {} days:",
        alert_days.describe()
    );
    let table = report::render(&config.email.title, &intro, &outcome.events);
    let message = OutboundMessage {
        subject: config.email.subject.clone(),
        to: config.email.to.clone(),
        bcc: config.email.bcc.clone(),
        html_body: report::html_body(&table),
    };

    let delivery = match (&config.email.endpoint, dry_run) {
        (Some(endpoint), false) => HttpTransport::new(endpoint)?.send(&message),
        _ => LogTransport.send(&message),
    };
    if let Err(err) = delivery {
        // the scan's findings stand; only the delivery failed
        error!("delivery failed: {err:#}");
        bail!("notification delivery failed");
    }

    info!("all done");
    Ok(())
}
