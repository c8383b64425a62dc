//! Character sheet derivation engine.
//!
//! Reads a raw tabletop character sheet and resolves every secondary
//! statistic a player needs at the table: ability modifiers, proficiency
//! bonus, saves, skills, armor class, initiative and passive scores.
//! Derivation is a pure, deterministic function of the sheet.

pub mod derive;
pub mod error;
pub mod model;
pub mod raw;
pub mod rules;
pub mod table;
pub mod validate;

pub use derive::derive;
pub use error::{SheetError, SheetResult};
pub use model::{
    AbilityScore, ArmorClass, CharacterModel, CombatStats, DeathSaves, HitPoints, PassiveScores,
    PersonalInfo, ProficiencyAwareModifier, Proficiencies, Speeds,
};
pub use raw::RawSheet;
pub use rules::{Ability, ArmorType, Skill};
pub use table::{AbilityMap, SkillMap};
pub use validate::{SheetIssue, validate_sheet};

/// Parse and derive a sheet from its JSON text in one step.
pub fn load_json(text: &str) -> SheetResult<CharacterModel> {
    derive(&RawSheet::from_json(text)?)
}
