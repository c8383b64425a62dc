//! The resolved character model handed to presentation layers.
//!
//! A [`CharacterModel`] only comes out of [`crate::derive::derive`]; every
//! field is filled in at that point and nothing is recomputed later.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::rules::{self, Ability, ArmorType, Skill};
use crate::table::{AbilityMap, SkillMap};

/// A raw ability score together with its modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AbilityScore {
    raw: i32,
    modifier: i32,
}

impl AbilityScore {
    /// Wrap a raw score; the modifier is always derived from it.
    pub fn new(raw: i32) -> Self {
        Self {
            raw,
            modifier: rules::ability_modifier(raw),
        }
    }

    /// The score as written on the sheet.
    pub fn raw(&self) -> i32 {
        self.raw
    }

    /// `floor((raw - 10) / 2)`.
    pub fn modifier(&self) -> i32 {
        self.modifier
    }
}

/// A save or skill modifier, with whether proficiency was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProficiencyAwareModifier {
    value: i32,
    proficient: bool,
}

impl ProficiencyAwareModifier {
    /// Ability modifier plus the proficiency bonus when `proficient`.
    pub fn resolve(ability_modifier: i32, proficiency_bonus: i32, proficient: bool) -> Self {
        let bonus = if proficient { proficiency_bonus } else { 0 };
        Self {
            value: ability_modifier + bonus,
            proficient,
        }
    }

    /// The total modifier.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Whether the proficiency bonus is included.
    pub fn proficient(&self) -> bool {
        self.proficient
    }
}

/// Armor class and the pieces it is made of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArmorClass {
    pub(crate) base: i32,
    pub(crate) armor_type: ArmorType,
    pub(crate) dex_bonus: i32,
    pub(crate) shield_equipped: bool,
    pub(crate) shield_bonus: i32,
    pub(crate) misc_bonuses: BTreeMap<String, i32>,
    pub(crate) total: i32,
}

impl ArmorClass {
    /// Base armor value.
    pub fn base(&self) -> i32 {
        self.base
    }

    /// Armor category worn.
    pub fn armor_type(&self) -> ArmorType {
        self.armor_type
    }

    /// Dexterity contribution after the armor-type cap.
    pub fn dex_bonus(&self) -> i32 {
        self.dex_bonus
    }

    /// Whether a shield is equipped.
    pub fn shield_equipped(&self) -> bool {
        self.shield_equipped
    }

    /// The shield's bonus, whether or not it is equipped.
    pub fn shield_bonus(&self) -> i32 {
        self.shield_bonus
    }

    /// Named miscellaneous bonuses.
    pub fn misc_bonuses(&self) -> &BTreeMap<String, i32> {
        &self.misc_bonuses
    }

    /// The final armor class.
    pub fn total(&self) -> i32 {
        self.total
    }
}

/// Death saving throw marks. Three of either kind ends the sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeathSaves {
    /// Success marks.
    pub successes: [bool; 3],
    /// Failure marks.
    pub failures: [bool; 3],
}

impl DeathSaves {
    /// Number of successes marked.
    pub fn success_count(&self) -> usize {
        self.successes.iter().filter(|s| **s).count()
    }

    /// Number of failures marked.
    pub fn failure_count(&self) -> usize {
        self.failures.iter().filter(|f| **f).count()
    }

    /// Three successes.
    pub fn is_stable(&self) -> bool {
        self.success_count() == 3
    }

    /// Three failures.
    pub fn is_dead(&self) -> bool {
        self.failure_count() == 3
    }
}

/// Who the character is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalInfo {
    /// Character name.
    pub name: String,
    /// Level, 1..=20.
    pub level: u32,
    /// Class.
    pub class: String,
    /// Subclass, possibly empty.
    pub subclass: String,
    /// Background.
    pub background: String,
    /// Alignment.
    pub alignment: String,
    /// Race.
    pub race: String,
    /// Size category, possibly empty.
    pub size: String,
}

/// Movement speeds in feet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Speeds {
    /// Walking speed.
    pub walking: u32,
    /// Swimming speed.
    pub swimming: u32,
    /// Flying speed.
    pub flying: u32,
}

/// Hit points and hit dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HitPoints {
    /// Maximum hit points.
    pub max: u32,
    /// Current hit points.
    pub current: u32,
    /// Temporary hit points.
    pub temp: u32,
    /// Hit die size.
    pub hit_die: u32,
    /// Hit dice left to spend.
    pub hit_dice_remaining: u32,
}

impl HitPoints {
    /// Current plus temporary hit points.
    pub fn effective(&self) -> u32 {
        self.current.saturating_add(self.temp)
    }
}

/// Passive scores (10 + the resolved skill modifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassiveScores {
    /// Passive Perception.
    pub perception: i32,
    /// Passive Insight.
    pub insight: i32,
    /// Passive Investigation.
    pub investigation: i32,
}

/// Weapon, armor, language, and tool proficiencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Proficiencies {
    /// Simple weapons.
    pub simple_weapons: bool,
    /// Martial weapons.
    pub martial_weapons: bool,
    /// Light armor.
    pub light_armor: bool,
    /// Medium armor.
    pub medium_armor: bool,
    /// Heavy armor.
    pub heavy_armor: bool,
    /// Shields.
    pub shields: bool,
    /// Known languages.
    pub languages: Vec<String>,
    /// Tool proficiencies.
    pub tools: Vec<String>,
    /// Other proficiencies.
    pub other: Vec<String>,
}

impl Proficiencies {
    /// Whether the character is trained in the given armor type.
    /// Unarmored needs no training.
    pub fn covers_armor(&self, armor_type: ArmorType) -> bool {
        match armor_type {
            ArmorType::Unarmored => true,
            ArmorType::Light => self.light_armor,
            ArmorType::Medium => self.medium_armor,
            ArmorType::Heavy => self.heavy_armor,
        }
    }
}

/// Combat-facing numbers grouped the way a dashboard shows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatStats {
    /// Armor class breakdown.
    pub armor_class: ArmorClass,
    /// Initiative modifier.
    pub initiative: i32,
    /// Movement speeds.
    pub speed: Speeds,
    /// Hit points.
    pub hit_points: HitPoints,
    /// Death save marks.
    pub death_saves: DeathSaves,
}

/// A fully resolved character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterModel {
    pub(crate) personal: PersonalInfo,
    pub(crate) ability_scores: AbilityMap<AbilityScore>,
    pub(crate) proficiency_bonus: i32,
    pub(crate) saves: AbilityMap<ProficiencyAwareModifier>,
    pub(crate) skills: SkillMap<ProficiencyAwareModifier>,
    pub(crate) combat: CombatStats,
    pub(crate) passives: PassiveScores,
    pub(crate) proficiencies: Proficiencies,
    pub(crate) racial_traits: Vec<String>,
}

impl CharacterModel {
    /// Name, class, race and the rest of the identity block.
    pub fn personal(&self) -> &PersonalInfo {
        &self.personal
    }

    /// Shorthand for `personal().name`.
    pub fn name(&self) -> &str {
        &self.personal.name
    }

    /// Shorthand for `personal().level`.
    pub fn level(&self) -> u32 {
        self.personal.level
    }

    /// All six ability scores.
    pub fn ability_scores(&self) -> &AbilityMap<AbilityScore> {
        &self.ability_scores
    }

    /// One ability score.
    pub fn ability(&self, ability: Ability) -> &AbilityScore {
        self.ability_scores.get(ability)
    }

    /// Level-derived proficiency bonus.
    pub fn proficiency_bonus(&self) -> i32 {
        self.proficiency_bonus
    }

    /// Saving throw modifiers.
    pub fn saves(&self) -> &AbilityMap<ProficiencyAwareModifier> {
        &self.saves
    }

    /// One saving throw modifier.
    pub fn save(&self, ability: Ability) -> &ProficiencyAwareModifier {
        self.saves.get(ability)
    }

    /// Skill modifiers; use [`SkillMap::for_ability`] for the grouped view.
    pub fn skills(&self) -> &SkillMap<ProficiencyAwareModifier> {
        &self.skills
    }

    /// One skill modifier.
    pub fn skill(&self, skill: Skill) -> &ProficiencyAwareModifier {
        self.skills.get(skill)
    }

    /// AC, initiative, speeds, hit points, death saves.
    pub fn combat(&self) -> &CombatStats {
        &self.combat
    }

    /// Shorthand for `combat().armor_class`.
    pub fn armor_class(&self) -> &ArmorClass {
        &self.combat.armor_class
    }

    /// Shorthand for `combat().initiative`.
    pub fn initiative(&self) -> i32 {
        self.combat.initiative
    }

    /// Passive perception, insight and investigation.
    pub fn passives(&self) -> &PassiveScores {
        &self.passives
    }

    /// Weapon/armor flags, languages, tools.
    pub fn proficiencies(&self) -> &Proficiencies {
        &self.proficiencies
    }

    /// Racial traits in sheet order.
    pub fn racial_traits(&self) -> &[String] {
        &self.racial_traits
    }
}
