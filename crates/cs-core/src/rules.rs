//! Static rule tables: abilities, skills, proficiency bonus, armor types.
//!
//! Everything here is constant data plus lookups. The derivation engine
//! reads these tables; nothing writes to them.

use serde::{Deserialize, Serialize};

use crate::error::{SheetError, SheetResult};

/// Lowest character level the proficiency table covers.
pub const MIN_LEVEL: u32 = 1;
/// Highest character level the proficiency table covers.
pub const MAX_LEVEL: u32 = 20;
/// Maximum dexterity bonus medium armor allows.
pub const MEDIUM_ARMOR_DEX_CAP: i32 = 2;
/// Base value passive scores are computed from.
pub const PASSIVE_BASE: i32 = 10;
/// Lowest raw ability score a sheet may carry.
pub const MIN_ABILITY_SCORE: i32 = 0;
/// Highest raw ability score a sheet may carry.
pub const MAX_ABILITY_SCORE: i32 = 99;

/// One of the six base attributes.
///
/// Variant order is the canonical presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    /// Strength.
    Str,
    /// Dexterity.
    Dex,
    /// Constitution.
    Con,
    /// Intelligence.
    Int,
    /// Wisdom.
    Wis,
    /// Charisma.
    Cha,
}

impl Ability {
    /// All six abilities in canonical order.
    pub const ALL: [Ability; 6] = [
        Self::Str,
        Self::Dex,
        Self::Con,
        Self::Int,
        Self::Wis,
        Self::Cha,
    ];

    /// Three-letter key (`"str"`, `"dex"`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Dex => "dex",
            Self::Con => "con",
            Self::Int => "int",
            Self::Wis => "wis",
            Self::Cha => "cha",
        }
    }

    /// Full lowercase name as used in sheets (`"strength"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Self::Str => "strength",
            Self::Dex => "dexterity",
            Self::Con => "constitution",
            Self::Int => "intelligence",
            Self::Wis => "wisdom",
            Self::Cha => "charisma",
        }
    }

    /// Look up an ability by its full name. Case-sensitive, like the sheet keys.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Look up an ability by its three-letter key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }

    /// Skills governed by this ability, in presentation order.
    pub fn skills(self) -> impl Iterator<Item = Skill> {
        Skill::ALL.into_iter().filter(move |s| s.ability() == self)
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the eighteen standard skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    /// Athletics (str).
    Athletics,
    /// Acrobatics (dex).
    Acrobatics,
    /// Sleight of Hand (dex).
    #[serde(rename = "sleight of hand")]
    SleightOfHand,
    /// Stealth (dex).
    Stealth,
    /// Arcana (int).
    Arcana,
    /// History (int).
    History,
    /// Investigation (int).
    Investigation,
    /// Nature (int).
    Nature,
    /// Religion (int).
    Religion,
    /// Animal Handling (wis).
    #[serde(rename = "animal handling")]
    AnimalHandling,
    /// Insight (wis).
    Insight,
    /// Medicine (wis).
    Medicine,
    /// Perception (wis).
    Perception,
    /// Survival (wis).
    Survival,
    /// Deception (cha).
    Deception,
    /// Intimidation (cha).
    Intimidation,
    /// Performance (cha).
    Performance,
    /// Persuasion (cha).
    Persuasion,
}

impl Skill {
    /// All eighteen skills, grouped by governing ability.
    pub const ALL: [Skill; 18] = [
        Self::Athletics,
        Self::Acrobatics,
        Self::SleightOfHand,
        Self::Stealth,
        Self::Arcana,
        Self::History,
        Self::Investigation,
        Self::Nature,
        Self::Religion,
        Self::AnimalHandling,
        Self::Insight,
        Self::Medicine,
        Self::Perception,
        Self::Survival,
        Self::Deception,
        Self::Intimidation,
        Self::Performance,
        Self::Persuasion,
    ];

    /// The ability that governs this skill.
    pub fn ability(self) -> Ability {
        match self {
            Self::Athletics => Ability::Str,
            Self::Acrobatics | Self::SleightOfHand | Self::Stealth => Ability::Dex,
            Self::Arcana | Self::History | Self::Investigation | Self::Nature | Self::Religion => {
                Ability::Int
            }
            Self::AnimalHandling
            | Self::Insight
            | Self::Medicine
            | Self::Perception
            | Self::Survival => Ability::Wis,
            Self::Deception | Self::Intimidation | Self::Performance | Self::Persuasion => {
                Ability::Cha
            }
        }
    }

    /// Lowercase name as used in sheets (`"sleight of hand"`).
    pub fn name(self) -> &'static str {
        match self {
            Self::Athletics => "athletics",
            Self::Acrobatics => "acrobatics",
            Self::SleightOfHand => "sleight of hand",
            Self::Stealth => "stealth",
            Self::Arcana => "arcana",
            Self::History => "history",
            Self::Investigation => "investigation",
            Self::Nature => "nature",
            Self::Religion => "religion",
            Self::AnimalHandling => "animal handling",
            Self::Insight => "insight",
            Self::Medicine => "medicine",
            Self::Perception => "perception",
            Self::Survival => "survival",
            Self::Deception => "deception",
            Self::Intimidation => "intimidation",
            Self::Performance => "performance",
            Self::Persuasion => "persuasion",
        }
    }

    /// Look up a skill by its sheet name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Armor category, which decides how much dexterity counts toward AC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArmorType {
    /// No armor worn.
    #[default]
    Unarmored,
    /// Light armor: full dexterity bonus.
    Light,
    /// Medium armor: dexterity bonus capped at [`MEDIUM_ARMOR_DEX_CAP`].
    Medium,
    /// Heavy armor: no dexterity bonus.
    Heavy,
}

impl ArmorType {
    /// Parse the sheet's `armor type` value.
    ///
    /// Absent, empty, and `"none"` mean unarmored. Anything else that is not
    /// light/medium/heavy is rejected.
    pub fn parse(value: Option<&str>) -> SheetResult<Self> {
        let Some(raw) = value else {
            return Ok(Self::Unarmored);
        };
        match raw.trim().to_lowercase().as_str() {
            "" | "none" | "unarmored" => Ok(Self::Unarmored),
            "light" => Ok(Self::Light),
            "medium" => Ok(Self::Medium),
            "heavy" => Ok(Self::Heavy),
            _ => Err(SheetError::malformed(
                "ac.armor type",
                format!("has unknown armor type \"{raw}\" (expected light, medium, heavy)"),
            )),
        }
    }

    /// Dexterity bonus this armor type lets through.
    pub fn dex_bonus(self, dex_modifier: i32) -> i32 {
        match self {
            Self::Light => dex_modifier,
            Self::Medium => dex_modifier.min(MEDIUM_ARMOR_DEX_CAP),
            Self::Heavy | Self::Unarmored => 0,
        }
    }

    /// Lowercase name (`"medium"`).
    pub fn name(self) -> &'static str {
        match self {
            Self::Unarmored => "unarmored",
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
        }
    }
}

impl std::fmt::Display for ArmorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// `floor((score - 10) / 2)`, rounding toward negative infinity.
pub fn ability_modifier(score: i32) -> i32 {
    score.saturating_sub(10).div_euclid(2)
}

/// Proficiency bonus for a level in `MIN_LEVEL..=MAX_LEVEL`.
pub fn proficiency_bonus(level: u32) -> SheetResult<i32> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(SheetError::malformed(
            "level",
            format!("must be between {MIN_LEVEL} and {MAX_LEVEL}, got {level}"),
        ));
    }
    Ok(((level - 1) / 4) as i32 + 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn modifier_boundaries() {
        let pairs = [
            (1, -5),
            (8, -1),
            (9, -1),
            (10, 0),
            (11, 0),
            (12, 1),
            (15, 2),
            (20, 5),
            (30, 10),
        ];
        for (score, expected) in pairs {
            assert_eq!(ability_modifier(score), expected, "score {score}");
        }
    }

    #[test]
    fn proficiency_table() {
        assert_eq!(proficiency_bonus(1).unwrap(), 2);
        assert_eq!(proficiency_bonus(4).unwrap(), 2);
        assert_eq!(proficiency_bonus(5).unwrap(), 3);
        assert_eq!(proficiency_bonus(9).unwrap(), 4);
        assert_eq!(proficiency_bonus(13).unwrap(), 5);
        assert_eq!(proficiency_bonus(17).unwrap(), 6);
        assert_eq!(proficiency_bonus(20).unwrap(), 6);
    }

    #[test]
    fn proficiency_out_of_range() {
        let err = proficiency_bonus(0).unwrap_err();
        assert_eq!(err.field(), "level");
        assert!(proficiency_bonus(21).is_err());
    }

    #[test]
    fn proficiency_non_decreasing() {
        let bonuses: Vec<i32> = (MIN_LEVEL..=MAX_LEVEL)
            .map(|l| proficiency_bonus(l).unwrap())
            .collect();
        assert!(bonuses.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn skill_mapping_is_total() {
        assert_eq!(Skill::ALL.len(), 18);
        let total: usize = Ability::ALL.iter().map(|a| a.skills().count()).sum();
        assert_eq!(total, 18);
        assert_eq!(Ability::Con.skills().count(), 0);
        assert_eq!(Skill::Stealth.ability(), Ability::Dex);
        assert_eq!(Skill::Arcana.ability(), Ability::Int);
    }

    #[test]
    fn names_round_trip() {
        for skill in Skill::ALL {
            assert_eq!(Skill::from_name(skill.name()), Some(skill));
        }
        for ability in Ability::ALL {
            assert_eq!(Ability::from_name(ability.name()), Some(ability));
            assert_eq!(Ability::from_key(ability.key()), Some(ability));
        }
        assert_eq!(Skill::from_name("Stealth"), None);
        assert_eq!(Ability::from_name("str"), None);
    }

    #[test]
    fn armor_type_parse() {
        assert_eq!(ArmorType::parse(None).unwrap(), ArmorType::Unarmored);
        assert_eq!(ArmorType::parse(Some("")).unwrap(), ArmorType::Unarmored);
        assert_eq!(ArmorType::parse(Some("none")).unwrap(), ArmorType::Unarmored);
        assert_eq!(ArmorType::parse(Some("Medium")).unwrap(), ArmorType::Medium);
        let err = ArmorType::parse(Some("mithral")).unwrap_err();
        assert_eq!(err.field(), "ac.armor type");
    }

    #[test]
    fn armor_dex_caps() {
        assert_eq!(ArmorType::Medium.dex_bonus(4), 2);
        assert_eq!(ArmorType::Medium.dex_bonus(-1), -1);
        assert_eq!(ArmorType::Light.dex_bonus(4), 4);
        assert_eq!(ArmorType::Heavy.dex_bonus(4), 0);
        assert_eq!(ArmorType::Unarmored.dex_bonus(4), 0);
    }

    proptest! {
        #[test]
        fn modifier_matches_floor_formula(score in 1i32..=30) {
            let expected = ((score - 10) as f64 / 2.0).floor() as i32;
            prop_assert_eq!(ability_modifier(score), expected);
        }

        #[test]
        fn modifier_sign_holds_for_any_score(score in any::<i32>()) {
            prop_assert_eq!(ability_modifier(score) >= 0, score >= 10);
        }

        #[test]
        fn proficiency_matches_formula(level in MIN_LEVEL..=MAX_LEVEL) {
            let expected = ((level as f64 - 1.0) / 4.0).floor() as i32 + 2;
            prop_assert_eq!(proficiency_bonus(level).unwrap(), expected);
        }
    }
}
