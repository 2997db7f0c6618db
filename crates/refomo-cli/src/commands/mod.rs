pub mod config;
pub mod history;
pub mod meditate;
pub mod record;
pub mod timer;

use std::path::PathBuf;

use refomo_core::storage::data_dir;
use refomo_core::{Config, Event, RecordStore, SessionCoordinator, TimerEngine};

const ENGINE_STATE_FILE: &str = "timer.json";

fn state_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(data_dir()?.join(ENGINE_STATE_FILE))
}

/// Restore the engine snapshot from the previous invocation, or start
/// fresh from the configured dial position. A corrupt snapshot degrades
/// to a fresh engine, mirroring the record store's load policy.
fn load_engine(config: &Config) -> Result<TimerEngine, Box<dyn std::error::Error>> {
    let path = state_path()?;
    if let Ok(json) = std::fs::read_to_string(&path) {
        if let Ok(engine) = serde_json::from_str::<TimerEngine>(&json) {
            return Ok(engine);
        }
    }
    Ok(TimerEngine::with_selected_minutes(config.timer.default_minutes))
}

pub(crate) fn save_engine(engine: &TimerEngine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(engine)?;
    std::fs::write(state_path()?, json)?;
    Ok(())
}

pub(crate) fn open_coordinator() -> Result<SessionCoordinator, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let engine = load_engine(&config)?;
    let store = RecordStore::open(&config.storage.records_file)?;
    Ok(SessionCoordinator::new(engine, store))
}

pub(crate) fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}
