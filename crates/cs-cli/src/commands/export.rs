use std::path::Path;

pub fn run(path: &Path, output: Option<&Path>) -> Result<(), String> {
    let (_, model) = super::load_sheet(path)?;

    let content = serde_json::to_string_pretty(&model)
        .map_err(|e| format!("JSON serialization error: {e}"))?;

    if let Some(out) = output {
        std::fs::write(out, format!("{content}\n"))
            .map_err(|e| format!("cannot write to {}: {e}", out.display()))?;
        println!("  Exported to {}", out.display());
    } else {
        println!("{content}");
    }

    Ok(())
}
