mod config;
mod records;

pub use config::Config;
pub use records::{RecordStore, SessionRecord};

use std::path::PathBuf;

/// Returns the application data directory, created on demand.
///
/// `$REFOMO_DATA_DIR` overrides everything (used by scripts and E2E
/// tests). Otherwise `~/.config/refomo`, or `~/.config/refomo-dev` when
/// `REFOMO_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dir = if let Ok(custom) = std::env::var("REFOMO_DATA_DIR") {
        PathBuf::from(custom)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");
        let env = std::env::var("REFOMO_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("refomo-dev")
        } else {
            base_dir.join("refomo")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
