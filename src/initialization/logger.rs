//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::kv::{self, Key, Source, VisitSource};
use log::{LevelFilter, Record};
use serde_json::{Map, Value};

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors and emojis) and JSON formats for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter overrides it for this crate.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Quieter dependencies, verbose pipeline
/// RUST_LOG=reqwest=warn ATLAS_GELF_LOG_LEVEL=debug atlas_gelf 12345 5
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("sqlx", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("atlas_gelf", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(record, chrono::Utc::now().timestamp_millis())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                let emoji = match level {
                    log::Level::Error => "❌",
                    log::Level::Warn => "⚠️",
                    log::Level::Info => "✔️",
                    log::Level::Debug => "🔍",
                    log::Level::Trace => "🔬",
                };

                let stage = record_fields(record)
                    .get("stage")
                    .and_then(Value::as_str)
                    .map(|stage| format!(" <{stage}>").dimmed().to_string())
                    .unwrap_or_default();

                writeln!(
                    buf,
                    "{} {} [{}]{} {}",
                    emoji,
                    record.target().cyan(),
                    colored_level,
                    stage,
                    record.args()
                )
            });
        }
    }

    // try_init so repeated initialization in tests returns an error instead of panicking
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Renders one record as a JSON object.
///
/// Structured fields attached at the call site (`measurement_id`, `stage`,
/// `probe_id`) become top-level keys next to `ts`, `level`, `target` and `msg`.
fn json_line(record: &Record, ts_millis: i64) -> String {
    let mut line = Map::new();
    line.insert("ts".to_string(), Value::from(ts_millis));
    line.insert("level".to_string(), Value::from(record.level().as_str()));
    line.insert("target".to_string(), Value::from(record.target()));
    line.insert("msg".to_string(), Value::from(record.args().to_string()));
    for (key, value) in record_fields(record) {
        line.entry(key).or_insert(value);
    }
    Value::Object(line).to_string()
}

/// Collects a record's key-values, keeping numbers and booleans typed.
fn record_fields(record: &Record) -> Map<String, Value> {
    struct Collect(Map<String, Value>);

    impl<'kvs> VisitSource<'kvs> for Collect {
        fn visit_pair(&mut self, key: Key<'kvs>, value: kv::Value<'kvs>) -> Result<(), kv::Error> {
            let value = if let Some(n) = value.to_i64() {
                Value::from(n)
            } else if let Some(n) = value.to_u64() {
                Value::from(n)
            } else if let Some(b) = value.to_bool() {
                Value::from(b)
            } else {
                Value::from(value.to_string())
            };
            self.0.insert(key.as_str().to_string(), value);
            Ok(())
        }
    }

    let mut fields = Collect(Map::new());
    // Visiting an in-memory source cannot fail
    let _ = record.key_values().visit(&mut fields);
    fields.0
}
