pub mod check;
pub mod export;
pub mod show;
pub mod tui;

use std::path::Path;

use cs_core::{CharacterModel, RawSheet};

/// Read and derive a sheet file. The raw sheet is returned too, for linting.
fn load_sheet(path: &Path) -> Result<(RawSheet, CharacterModel), String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let raw = RawSheet::from_json(&text).map_err(|e| e.to_string())?;
    let model = cs_core::derive(&raw).map_err(|e| e.to_string())?;
    tracing::info!(path = %path.display(), name = model.name(), "loaded sheet");
    Ok((raw, model))
}
