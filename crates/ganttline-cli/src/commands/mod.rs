pub mod config;
pub mod lanes;
pub mod layout;

use std::io::Read;
use std::path::{Path, PathBuf};

use ganttline_core::{Config, TimelineItem};

/// Read an item list from a JSON file, or stdin when the path is `-`.
pub fn read_items(path: &Path) -> Result<Vec<TimelineItem>, Box<dyn std::error::Error>> {
    let json = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?
    };
    let items = ganttline_core::parse_items(&json)?;
    tracing::debug!(path = %path.display(), items = items.len(), "loaded items");
    Ok(items)
}

/// Explicit `--config` file, or the user config (defaults if unreadable).
pub fn load_config(path: Option<&PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using explicit config");
            Ok(Config::load_from(path)?)
        }
        None => Ok(Config::load_or_default()),
    }
}
