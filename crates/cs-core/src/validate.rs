//! Non-fatal checks on a sheet that derived successfully.
//!
//! Derivation rejects sheets it cannot compute. This module flags sheets it
//! *can* compute but that probably contain a data-entry mistake.

use std::collections::HashSet;

use crate::model::CharacterModel;
use crate::raw::RawSheet;

/// Lowest ability score the rules expect.
pub const MIN_SCORE: i32 = 1;
/// Highest ability score the rules expect.
pub const MAX_SCORE: i32 = 30;
/// Hit die sizes that classes use.
pub const STANDARD_HIT_DICE: [u32; 4] = [6, 8, 10, 12];

/// A suspicious value found in a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetIssue {
    /// Path of the field the issue concerns.
    pub field: String,
    /// A human-readable description of the issue.
    pub message: String,
}

impl std::fmt::Display for SheetIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "warning: {}: {}", self.field, self.message)
    }
}

/// Lint a sheet against its derived model.
///
/// Returns an empty list for a clean sheet.
pub fn validate_sheet(raw: &RawSheet, model: &CharacterModel) -> Vec<SheetIssue> {
    let mut issues = Vec::new();

    for (ability, score) in model.ability_scores().iter() {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score.raw()) {
            issues.push(SheetIssue {
                field: format!("ability scores.{}", ability.name()),
                message: format!(
                    "score {} is outside {MIN_SCORE}..={MAX_SCORE}",
                    score.raw()
                ),
            });
        }
    }

    let hp = &model.combat().hit_points;
    if hp.current > hp.max {
        issues.push(SheetIssue {
            field: "hp.current".to_string(),
            message: format!("current HP ({}) is above max HP ({})", hp.current, hp.max),
        });
    }
    if !STANDARD_HIT_DICE.contains(&hp.hit_die) {
        issues.push(SheetIssue {
            field: "hp.hit die".to_string(),
            message: format!("d{} is not a standard hit die", hp.hit_die),
        });
    }

    let ac = model.armor_class();
    let profs = model.proficiencies();
    if !profs.covers_armor(ac.armor_type()) {
        issues.push(SheetIssue {
            field: "ac.armor type".to_string(),
            message: format!("wearing {} armor without proficiency", ac.armor_type()),
        });
    }
    if ac.shield_equipped() && !profs.shields {
        issues.push(SheetIssue {
            field: "ac.shield equipped".to_string(),
            message: "shield equipped without shield proficiency".to_string(),
        });
    }

    let lists = [
        ("proficiencies.saving throws", &raw.proficiencies.saving_throws),
        ("proficiencies.skills", &raw.proficiencies.skills),
        ("proficiencies.languages", &raw.proficiencies.languages),
        ("proficiencies.tools", &raw.proficiencies.tools),
    ];
    for (field, entries) in lists {
        let mut seen = HashSet::new();
        for entry in entries {
            if !seen.insert(entry.as_str()) {
                issues.push(SheetIssue {
                    field: field.to_string(),
                    message: format!("\"{entry}\" is listed more than once"),
                });
            }
        }
    }

    issues
}
