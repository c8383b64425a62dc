//! The raw character sheet as it appears on disk.
//!
//! Field names follow the canonical JSON schema (space-separated keys,
//! ability scores keyed by full ability name). Values are taken as written;
//! range and name checks happen during derivation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{SheetError, SheetResult};

/// A character sheet before any derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSheet {
    /// Character name.
    pub name: String,
    /// Character level; must be in 1..=20 to derive.
    pub level: i64,
    /// Class name.
    pub class: String,
    /// Subclass name.
    #[serde(default)]
    pub subclass: String,
    /// Background.
    pub background: String,
    /// Alignment.
    pub alignment: String,
    /// Race.
    pub race: String,
    /// Size category.
    #[serde(default)]
    pub size: String,
    /// Scores keyed by full ability name (`"dexterity": 14`).
    #[serde(rename = "ability scores")]
    pub ability_scores: BTreeMap<String, i32>,
    /// Proficiency lists and category flags.
    pub proficiencies: RawProficiencies,
    /// Armor class inputs.
    pub ac: RawArmorClass,
    /// Flat bonus added to the dexterity modifier for initiative.
    #[serde(rename = "initiative bonus", default)]
    pub initiative_bonus: i32,
    /// Movement speeds in feet.
    #[serde(rename = "movement speed")]
    pub movement_speed: RawSpeeds,
    /// Hit point and hit dice state.
    pub hp: RawHitPoints,
    /// Racial trait names, in sheet order.
    #[serde(rename = "racial traits", default)]
    pub racial_traits: Vec<String>,
}

/// The `proficiencies` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProficiencies {
    /// Full ability names the character is proficient in saving with.
    #[serde(rename = "saving throws")]
    pub saving_throws: Vec<String>,
    /// Skill names the character is proficient in.
    pub skills: Vec<String>,
    /// Simple weapon proficiency.
    #[serde(rename = "simple weapons", default)]
    pub simple_weapons: bool,
    /// Martial weapon proficiency.
    #[serde(rename = "martial weapons", default)]
    pub martial_weapons: bool,
    /// Light armor proficiency.
    #[serde(rename = "light armor", default)]
    pub light_armor: bool,
    /// Medium armor proficiency.
    #[serde(rename = "medium armor", default)]
    pub medium_armor: bool,
    /// Heavy armor proficiency.
    #[serde(rename = "heavy armor", default)]
    pub heavy_armor: bool,
    /// Shield proficiency.
    #[serde(default)]
    pub shields: bool,
    /// Known languages.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Tool proficiencies.
    #[serde(default)]
    pub tools: Vec<String>,
    /// Anything else worth listing.
    #[serde(default)]
    pub other: Vec<String>,
}

/// The `ac` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArmorClass {
    /// Base armor value.
    pub base: i32,
    /// `light`, `medium`, `heavy`, or absent for no armor.
    #[serde(rename = "armor type", default)]
    pub armor_type: Option<String>,
    /// Whether a shield is currently equipped.
    #[serde(rename = "shield equipped", default)]
    pub shield_equipped: bool,
    /// AC granted by the shield when equipped.
    #[serde(rename = "shield bonus", default)]
    pub shield_bonus: i32,
    /// Named miscellaneous bonuses (`"ring of protection": 1`).
    #[serde(rename = "other bonuses", default)]
    pub other_bonuses: BTreeMap<String, i32>,
}

/// The `movement speed` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSpeeds {
    /// Walking speed.
    pub walking: u32,
    /// Swimming speed.
    pub swimming: u32,
    /// Flying speed.
    pub flying: u32,
}

/// The `hp` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHitPoints {
    /// Maximum hit points.
    pub max: u32,
    /// Current hit points.
    pub current: u32,
    /// Temporary hit points.
    pub temp: u32,
    /// Hit die size (8 for d8).
    #[serde(rename = "hit die")]
    pub hit_die: u32,
    /// Hit dice already spent.
    #[serde(rename = "hit dice used")]
    pub hit_dice_used: u32,
}

impl RawSheet {
    /// Parse a sheet from its JSON text.
    ///
    /// Structural problems (missing keys, wrong value types) are reported as
    /// [`SheetError::MalformedSheet`].
    pub fn from_json(text: &str) -> SheetResult<Self> {
        let mut de = serde_json::Deserializer::from_str(text);
        let sheet = serde_path_to_error::deserialize(&mut de).map_err(json_error)?;
        de.end().map_err(|e| {
            SheetError::malformed("<document>", format!("could not be parsed: {e}"))
        })?;
        Ok(sheet)
    }
}

/// Turn a serde error into a sheet error naming the dotted path of the
/// offending key (`hp.hit die`).
fn json_error(err: serde_path_to_error::Error<serde_json::Error>) -> SheetError {
    let path = err.path().to_string();
    let parent = (!path.is_empty() && path != ".").then_some(path);
    let err = err.into_inner();
    let location = format!("line {}, column {}", err.line(), err.column());

    if !err.is_data() {
        return SheetError::malformed("<document>", format!("could not be parsed: {err}"));
    }

    let message = err.to_string();
    if let Some(rest) = message.strip_prefix("missing field `")
        && let Some((leaf, _)) = rest.split_once('`')
    {
        let field = match parent {
            Some(parent) => format!("{parent}.{leaf}"),
            None => leaf.to_string(),
        };
        return SheetError::malformed(field, format!("is missing ({location})"));
    }

    match parent {
        Some(field) => SheetError::malformed(field, format!("is invalid: {message}")),
        None => SheetError::malformed("<document>", format!("could not be parsed: {message}")),
    }
}
