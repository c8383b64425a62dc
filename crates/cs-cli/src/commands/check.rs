use std::path::Path;

use colored::Colorize;
use cs_core::validate_sheet;

pub fn run(path: &Path, strict: bool) -> Result<(), String> {
    let (raw, model) = super::load_sheet(path)?;
    let issues = validate_sheet(&raw, &model);

    for issue in &issues {
        println!("  {} {}: {}", "warning:".yellow(), issue.field, issue.message);
    }
    if !issues.is_empty() {
        println!();
    }

    println!("  Sheet for '{}' derived successfully.", model.name());
    println!(
        "  level {} {}, AC {}, {} warning{}",
        model.level(),
        model.personal().class,
        model.armor_class().total(),
        issues.len(),
        if issues.len() == 1 { "" } else { "s" },
    );

    if strict && !issues.is_empty() {
        return Err(format!("{} warning(s) in strict mode", issues.len()));
    }
    Ok(())
}
