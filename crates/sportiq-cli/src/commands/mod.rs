pub mod config;
pub mod launch;
pub mod onboarding;
pub mod profile;
pub mod quiz;
pub mod workout;

use std::sync::Arc;

use serde::Serialize;
use sportiq_core::{AnalyticsSink, Clock, Event, Store, SystemClock, TracingSink};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

pub fn open_store() -> Result<Store, Box<dyn std::error::Error>> {
    Ok(Store::open()?)
}

pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Print an event as one JSON line and record it for analytics.
pub fn emit(event: &Event) {
    TracingSink.record(event);
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::warn!(error = %e, "could not print event"),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
