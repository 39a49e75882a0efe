//! CLI smoke entry point.
//!
//! # Responsibility
//! - Run the demo incident set (or a JSON record file) through one session.
//! - Print view descriptors as JSON for quick local sanity checks.
//!
//! Environment:
//! - `INCIDENT_DASH_LOG_DIR`: absolute directory enabling file logs.
//! - `INCIDENT_DASH_LOG_LEVEL`: log level, defaults per build mode.
//! - `INCIDENT_DASH_CONFIG`: optional engine config JSON file.

use incident_core::{
    default_log_level, ingest_records, init_logging, load_records_json, DashboardSession,
    EngineConfig, InteractionEvent, RawRecord, Record, ViewState,
};
use log::info;
use std::collections::BTreeMap;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("incident_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    if let Some(log_dir) = env_value("INCIDENT_DASH_LOG_DIR") {
        let level =
            env_value("INCIDENT_DASH_LOG_LEVEL").unwrap_or_else(|| default_log_level().to_string());
        init_logging(&level, &log_dir).map_err(|err| err.to_string())?;
    }

    let config = match env_value("INCIDENT_DASH_CONFIG") {
        Some(path) => EngineConfig::from_json_file(&path).map_err(|err| err.to_string())?,
        None => EngineConfig::default(),
    };
    let records = match std::env::args().nth(1) {
        Some(path) => load_records_json(&path).map_err(|err| err.to_string())?,
        None => demo_records(),
    };

    info!(
        "event=cli_run module=cli status=ok records={}",
        records.len()
    );
    println!("incident_core version={}", incident_core::core_version());
    let mut session = DashboardSession::new(records, config);
    print_view("initial", &session.view())?;

    let first_label = session
        .projection()
        .get(0)
        .map(|record| record.label.clone());
    if let Some(label) = first_label {
        let view = session.handle_event(&InteractionEvent::Map { label });
        print_view("map_click", &view)?;
    }

    let mut counters = vec![0; session.projection().len()];
    if let Some(last) = counters.last_mut() {
        *last = 1;
        let view = session.handle_event(&InteractionEvent::CardPoll { counters });
        print_view("card_click", &view)?;
    }
    Ok(())
}

fn print_view(step: &str, view: &ViewState) -> Result<(), String> {
    let json = serde_json::to_string_pretty(view).map_err(|err| err.to_string())?;
    println!("--- {step}\n{json}");
    Ok(())
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn demo_records() -> Vec<Record> {
    let rows = [
        ("1", "53.3498, -6.2603", "Minor fire in residential area"),
        ("2", "53.3550, -6.2700", "Commercial building smoke alarm"),
        ("3", "53.3400, -6.2550", "Brush fire near park"),
    ]
    .into_iter()
    .map(|(label, location, description)| RawRecord {
        label: label.to_string(),
        location: Some(location.to_string()),
        fields: BTreeMap::from([
            ("description".to_string(), description.to_string()),
            ("location".to_string(), location.to_string()),
        ]),
        ..RawRecord::default()
    })
    .collect::<Vec<_>>();
    ingest_records(&rows)
}
