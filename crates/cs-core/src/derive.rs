//! The derivation engine: raw sheet in, resolved model out.
//!
//! Each `compute_*` function is a pure step over rule tables and already
//! validated inputs. [`derive`] checks the whole sheet first and only then
//! runs the steps, so a failure never leaves half a model behind.

use std::collections::BTreeMap;

use crate::error::{SheetError, SheetResult};
use crate::model::{
    AbilityScore, ArmorClass, CharacterModel, CombatStats, DeathSaves, HitPoints, PassiveScores,
    PersonalInfo, ProficiencyAwareModifier, Proficiencies, Speeds,
};
use crate::raw::RawSheet;
use crate::rules::{self, Ability, ArmorType, PASSIVE_BASE, Skill};
use crate::table::{AbilityMap, SkillMap};

/// Build a score for every ability from raw values.
pub fn compute_ability_scores(raw: &AbilityMap<i32>) -> AbilityMap<AbilityScore> {
    AbilityMap::from_fn(|ability| AbilityScore::new(*raw.get(ability)))
}

/// Proficiency bonus for a level; errors outside 1..=20.
pub fn compute_proficiency_bonus(level: u32) -> SheetResult<i32> {
    rules::proficiency_bonus(level)
}

/// Saving throw modifiers, adding the bonus for abilities in `proficient`.
pub fn compute_save_modifiers(
    scores: &AbilityMap<AbilityScore>,
    proficiency_bonus: i32,
    proficient: &[Ability],
) -> AbilityMap<ProficiencyAwareModifier> {
    AbilityMap::from_fn(|ability| {
        ProficiencyAwareModifier::resolve(
            scores.get(ability).modifier(),
            proficiency_bonus,
            proficient.contains(&ability),
        )
    })
}

/// Skill modifiers from each skill's governing ability, adding the bonus for
/// skills in `proficient`.
pub fn compute_skill_modifiers(
    scores: &AbilityMap<AbilityScore>,
    proficiency_bonus: i32,
    proficient: &[Skill],
) -> SkillMap<ProficiencyAwareModifier> {
    SkillMap::from_fn(|skill| {
        ProficiencyAwareModifier::resolve(
            scores.get(skill.ability()).modifier(),
            proficiency_bonus,
            proficient.contains(&skill),
        )
    })
}

/// Compose armor class. The shield counts only while equipped.
///
/// Fails when the parts do not fit in an `i32` total.
pub fn compute_armor_class(
    base: i32,
    armor_type: ArmorType,
    dex_modifier: i32,
    shield_equipped: bool,
    shield_bonus: i32,
    misc_bonuses: &BTreeMap<String, i32>,
) -> SheetResult<ArmorClass> {
    let dex_bonus = armor_type.dex_bonus(dex_modifier);
    let shield = if shield_equipped { shield_bonus } else { 0 };

    let total = misc_bonuses
        .values()
        .try_fold(base, |sum, bonus| sum.checked_add(*bonus))
        .and_then(|sum| sum.checked_add(dex_bonus))
        .and_then(|sum| sum.checked_add(shield))
        .ok_or_else(|| SheetError::malformed("ac", "adds up to an armor class out of range"))?;

    Ok(ArmorClass {
        base,
        armor_type,
        dex_bonus,
        shield_equipped,
        shield_bonus,
        misc_bonuses: misc_bonuses.clone(),
        total,
    })
}

/// Dexterity modifier plus any flat initiative bonus.
pub fn compute_initiative(dex_modifier: i32, initiative_bonus: i32) -> SheetResult<i32> {
    dex_modifier.checked_add(initiative_bonus).ok_or_else(|| {
        SheetError::malformed(
            "initiative bonus",
            format!("{initiative_bonus} puts initiative out of range"),
        )
    })
}

/// `10 + modifier` for a resolved skill.
pub fn compute_passive_score(skill: &ProficiencyAwareModifier) -> i32 {
    PASSIVE_BASE + skill.value()
}

/// Derive a complete [`CharacterModel`] from a raw sheet.
///
/// All inputs are checked before anything is computed; any problem aborts
/// with a [`SheetError`].
pub fn derive(raw: &RawSheet) -> SheetResult<CharacterModel> {
    let inputs = Validated::check(raw)?;

    let ability_scores = compute_ability_scores(&inputs.scores);
    let proficiency_bonus = compute_proficiency_bonus(inputs.level)?;
    let saves = compute_save_modifiers(&ability_scores, proficiency_bonus, &inputs.saves);
    let skills = compute_skill_modifiers(&ability_scores, proficiency_bonus, &inputs.skills);

    let dex = ability_scores.get(Ability::Dex).modifier();
    let armor_class = compute_armor_class(
        raw.ac.base,
        inputs.armor_type,
        dex,
        raw.ac.shield_equipped,
        raw.ac.shield_bonus,
        &raw.ac.other_bonuses,
    )?;

    let passives = PassiveScores {
        perception: compute_passive_score(skills.get(Skill::Perception)),
        insight: compute_passive_score(skills.get(Skill::Insight)),
        investigation: compute_passive_score(skills.get(Skill::Investigation)),
    };

    let combat = CombatStats {
        armor_class,
        initiative: compute_initiative(dex, raw.initiative_bonus)?,
        speed: Speeds {
            walking: raw.movement_speed.walking,
            swimming: raw.movement_speed.swimming,
            flying: raw.movement_speed.flying,
        },
        hit_points: HitPoints {
            max: raw.hp.max,
            current: raw.hp.current,
            temp: raw.hp.temp,
            hit_die: raw.hp.hit_die,
            hit_dice_remaining: inputs.level - raw.hp.hit_dice_used,
        },
        death_saves: DeathSaves::default(),
    };

    let profs = &raw.proficiencies;
    let proficiencies = Proficiencies {
        simple_weapons: profs.simple_weapons,
        martial_weapons: profs.martial_weapons,
        light_armor: profs.light_armor,
        medium_armor: profs.medium_armor,
        heavy_armor: profs.heavy_armor,
        shields: profs.shields,
        languages: profs.languages.clone(),
        tools: profs.tools.clone(),
        other: profs.other.clone(),
    };

    tracing::debug!(
        name = %raw.name,
        level = inputs.level,
        proficiency_bonus,
        armor_class = combat.armor_class.total(),
        initiative = combat.initiative,
        "derived character model"
    );

    Ok(CharacterModel {
        personal: PersonalInfo {
            name: raw.name.clone(),
            level: inputs.level,
            class: raw.class.clone(),
            subclass: raw.subclass.clone(),
            background: raw.background.clone(),
            alignment: raw.alignment.clone(),
            race: raw.race.clone(),
            size: raw.size.clone(),
        },
        ability_scores,
        proficiency_bonus,
        saves,
        skills,
        combat,
        passives,
        proficiencies,
        racial_traits: raw.racial_traits.clone(),
    })
}

/// Sheet values that need checking or name resolution before derivation.
struct Validated {
    level: u32,
    scores: AbilityMap<i32>,
    saves: Vec<Ability>,
    skills: Vec<Skill>,
    armor_type: ArmorType,
}

impl Validated {
    fn check(raw: &RawSheet) -> SheetResult<Self> {
        let level = u32::try_from(raw.level)
            .ok()
            .filter(|l| (rules::MIN_LEVEL..=rules::MAX_LEVEL).contains(l))
            .ok_or_else(|| {
                SheetError::malformed(
                    "level",
                    format!(
                        "must be between {} and {}, got {}",
                        rules::MIN_LEVEL,
                        rules::MAX_LEVEL,
                        raw.level
                    ),
                )
            })?;

        let scores = resolve_scores(&raw.ability_scores)?;

        let saves = raw
            .proficiencies
            .saving_throws
            .iter()
            .map(|name| {
                Ability::from_name(name)
                    .ok_or_else(|| SheetError::unrecognized("proficiencies.saving throws", name))
            })
            .collect::<SheetResult<Vec<_>>>()?;

        let skills = raw
            .proficiencies
            .skills
            .iter()
            .map(|name| {
                Skill::from_name(name)
                    .ok_or_else(|| SheetError::unrecognized("proficiencies.skills", name))
            })
            .collect::<SheetResult<Vec<_>>>()?;

        let armor_type = ArmorType::parse(raw.ac.armor_type.as_deref())?;

        if raw.hp.hit_die == 0 {
            return Err(SheetError::malformed("hp.hit die", "must be greater than 0"));
        }
        if raw.hp.hit_dice_used > level {
            return Err(SheetError::malformed(
                "hp.hit dice used",
                format!(
                    "is {} but the character only has {level} hit dice",
                    raw.hp.hit_dice_used
                ),
            ));
        }

        Ok(Self {
            level,
            scores,
            saves,
            skills,
            armor_type,
        })
    }
}

/// Map full-name score keys onto abilities. Every ability must be present,
/// within `MIN_ABILITY_SCORE..=MAX_ABILITY_SCORE`, and no unknown key may
/// appear.
fn resolve_scores(raw: &BTreeMap<String, i32>) -> SheetResult<AbilityMap<i32>> {
    if let Some(unknown) = raw.keys().find(|k| Ability::from_name(k).is_none()) {
        return Err(SheetError::unrecognized("ability scores", unknown));
    }
    if let Some(missing) = Ability::ALL
        .into_iter()
        .find(|a| !raw.contains_key(a.name()))
    {
        return Err(SheetError::malformed(
            format!("ability scores.{}", missing.name()),
            "is missing",
        ));
    }
    let allowed = rules::MIN_ABILITY_SCORE..=rules::MAX_ABILITY_SCORE;
    if let Some((name, score)) = raw.iter().find(|(_, score)| !allowed.contains(*score)) {
        return Err(SheetError::malformed(
            format!("ability scores.{name}"),
            format!(
                "must be between {} and {}, got {score}",
                rules::MIN_ABILITY_SCORE,
                rules::MAX_ABILITY_SCORE
            ),
        ));
    }

    Ok(AbilityMap::from_fn(|a| {
        raw.get(a.name()).copied().unwrap_or_default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::tests::SAMPLE;

    fn sample() -> RawSheet {
        RawSheet::from_json(SAMPLE).unwrap()
    }

    fn scores(values: [i32; 6]) -> AbilityMap<AbilityScore> {
        compute_ability_scores(&AbilityMap::from_fn(|a| values[a as usize]))
    }

    #[test]
    fn derives_sample() {
        let model = derive(&sample()).unwrap();
        assert_eq!(model.name(), "Vex");
        assert_eq!(model.proficiency_bonus(), 3);
        assert_eq!(model.ability(Ability::Dex).modifier(), 4);
        assert_eq!(model.ability(Ability::Str).modifier(), -1);

        // dex save proficient: 4 + 3
        assert_eq!(model.save(Ability::Dex).value(), 7);
        assert!(model.save(Ability::Dex).proficient());
        assert_eq!(model.save(Ability::Wis).value(), 1);

        assert_eq!(model.skill(Skill::Stealth).value(), 7);
        assert_eq!(model.skill(Skill::Acrobatics).value(), 4);

        // light armor: 11 + 4, shield not equipped
        assert_eq!(model.armor_class().total(), 15);
        assert_eq!(model.initiative(), 4);

        let hp = model.combat().hit_points;
        assert_eq!(hp.hit_dice_remaining, 3);
        assert_eq!(hp.effective(), 32);
        assert_eq!(model.combat().death_saves, DeathSaves::default());
        assert_eq!(model.racial_traits(), ["Darkvision", "Fey Ancestry"]);
    }

    #[test]
    fn passives_use_resolved_skill() {
        let model = derive(&sample()).unwrap();
        // wis +1, proficient in perception (+3), not insight
        assert_eq!(model.passives().perception, 14);
        assert_eq!(model.passives().insight, 11);
        // int +1, proficient in investigation
        assert_eq!(model.passives().investigation, 14);
    }

    #[test]
    fn passive_changes_with_proficiency_and_score() {
        let base = derive(&sample()).unwrap().passives().insight;

        let mut raw = sample();
        raw.proficiencies.skills.push("insight".to_string());
        assert_eq!(derive(&raw).unwrap().passives().insight, base + 3);

        let mut raw = sample();
        raw.ability_scores.insert("wisdom".to_string(), 14);
        assert_eq!(derive(&raw).unwrap().passives().insight, base + 1);

        let mut raw = sample();
        raw.ability_scores.insert("charisma".to_string(), 20);
        raw.proficiencies.skills.push("persuasion".to_string());
        assert_eq!(derive(&raw).unwrap().passives().insight, base);
    }

    #[test]
    fn medium_armor_with_shield_and_ring() {
        let mut raw = sample();
        raw.ac.base = 12;
        raw.ac.armor_type = Some("medium".to_string());
        raw.ac.shield_equipped = true;
        raw.ac.shield_bonus = 2;
        raw.ac.other_bonuses.insert("ring".to_string(), 1);

        let model = derive(&raw).unwrap();
        let ac = model.armor_class();
        assert_eq!(ac.dex_bonus(), 2);
        assert_eq!(ac.total(), 17);
    }

    #[test]
    fn armor_class_components() {
        let misc = BTreeMap::from([("cloak".to_string(), 1), ("ring".to_string(), 1)]);
        let ac = compute_armor_class(10, ArmorType::Light, 4, false, 2, &misc).unwrap();
        assert_eq!(ac.dex_bonus(), 4);
        assert_eq!(ac.total(), 16);
        assert_eq!(ac.shield_bonus(), 2);

        let ac = compute_armor_class(18, ArmorType::Heavy, 4, true, 2, &BTreeMap::new()).unwrap();
        assert_eq!(ac.dex_bonus(), 0);
        assert_eq!(ac.total(), 20);

        let ac = compute_armor_class(10, ArmorType::Medium, -1, false, 0, &BTreeMap::new()).unwrap();
        assert_eq!(ac.total(), 9);
    }

    #[test]
    fn level_nine_proficient_skill() {
        let mut raw = sample();
        raw.level = 9;
        raw.ability_scores.insert("intelligence".to_string(), 16);
        let model = derive(&raw).unwrap();
        assert_eq!(model.proficiency_bonus(), 4);
        assert_eq!(model.skill(Skill::Investigation).value(), 7);
        assert_eq!(model.skill(Skill::Arcana).value(), 3);
    }

    #[test]
    fn every_skill_follows_governing_ability() {
        let scores = scores([8, 18, 14, 13, 12, 10]);
        let all = Skill::ALL;
        let none: &[Skill] = &[];

        for proficient in [all.as_slice(), none] {
            let skills = compute_skill_modifiers(&scores, 3, proficient);
            for skill in Skill::ALL {
                let base = scores.get(skill.ability()).modifier();
                let listed = proficient.contains(&skill);
                let expected = if listed { base + 3 } else { base };
                let resolved = skills.get(skill);
                assert_eq!(resolved.value(), expected, "{skill} proficient={listed}");
                assert_eq!(resolved.proficient(), listed, "{skill}");
            }
        }
    }

    #[test]
    fn saves_add_bonus_only_when_listed() {
        let scores = scores([16, 10, 14, 8, 12, 10]);
        let saves = compute_save_modifiers(&scores, 2, &[Ability::Str, Ability::Con]);
        assert_eq!(saves.get(Ability::Str).value(), 5);
        assert_eq!(saves.get(Ability::Con).value(), 4);
        assert_eq!(saves.get(Ability::Int).value(), -1);
        assert!(!saves.get(Ability::Int).proficient());
    }

    #[test]
    fn initiative_is_uncapped_sum() {
        assert_eq!(compute_initiative(4, 5), Ok(9));
        assert_eq!(compute_initiative(-1, 0), Ok(-1));
    }

    #[test]
    fn derivation_is_idempotent() {
        let raw = sample();
        assert_eq!(derive(&raw).unwrap(), derive(&raw).unwrap());
    }

    #[test]
    fn rejects_bad_level() {
        for level in [0, 21, -3] {
            let mut raw = sample();
            raw.level = level;
            let err = derive(&raw).unwrap_err();
            assert_eq!(err.field(), "level", "level {level}");
        }
    }

    #[test]
    fn rejects_unknown_armor_type() {
        let mut raw = sample();
        raw.ac.armor_type = Some("adamantine".to_string());
        assert_eq!(derive(&raw).unwrap_err().field(), "ac.armor type");
    }

    #[test]
    fn rejects_missing_ability() {
        let mut raw = sample();
        raw.ability_scores.remove("wisdom");
        let err = derive(&raw).unwrap_err();
        assert_eq!(err.field(), "ability scores.wisdom");
    }

    #[test]
    fn rejects_short_ability_keys() {
        let mut raw = sample();
        let dex = raw.ability_scores.remove("dexterity").unwrap();
        raw.ability_scores.insert("dex".to_string(), dex);
        let err = derive(&raw).unwrap_err();
        assert_eq!(err, SheetError::unrecognized("ability scores", "dex"));
    }

    #[test]
    fn rejects_unknown_skill_and_save() {
        let mut raw = sample();
        raw.proficiencies.skills.push("basket weaving".to_string());
        assert_eq!(
            derive(&raw).unwrap_err(),
            SheetError::unrecognized("proficiencies.skills", "basket weaving")
        );

        let mut raw = sample();
        raw.proficiencies.saving_throws.push("luck".to_string());
        assert_eq!(
            derive(&raw).unwrap_err().field(),
            "proficiencies.saving throws"
        );
    }

    #[test]
    fn rejects_overspent_hit_dice() {
        let mut raw = sample();
        raw.hp.hit_dice_used = 6;
        assert_eq!(derive(&raw).unwrap_err().field(), "hp.hit dice used");

        raw.hp.hit_dice_used = 5;
        assert_eq!(derive(&raw).unwrap().combat().hit_points.hit_dice_remaining, 0);
    }

    #[test]
    fn rejects_zero_hit_die() {
        let mut raw = sample();
        raw.hp.hit_die = 0;
        assert_eq!(derive(&raw).unwrap_err().field(), "hp.hit die");
    }

    #[test]
    fn rejects_out_of_range_scores() {
        for score in [i32::MIN, -1, 100, i32::MAX] {
            let mut raw = sample();
            raw.ability_scores.insert("strength".to_string(), score);
            let err = derive(&raw).unwrap_err();
            assert_eq!(err.field(), "ability scores.strength", "score {score}");
        }

        let mut raw = sample();
        raw.ability_scores.insert("strength".to_string(), 0);
        raw.ability_scores.insert("dexterity".to_string(), 99);
        assert!(derive(&raw).is_ok());
    }

    #[test]
    fn rejects_overflowing_armor_class() {
        let mut raw = sample();
        raw.ac.base = i32::MAX;
        assert_eq!(derive(&raw).unwrap_err().field(), "ac");

        let mut raw = sample();
        raw.ac.other_bonuses.insert("a".to_string(), i32::MAX);
        raw.ac.other_bonuses.insert("b".to_string(), i32::MAX);
        assert_eq!(derive(&raw).unwrap_err().field(), "ac");

        let mut raw = sample();
        raw.ac.base = i32::MIN;
        raw.ac.armor_type = None;
        raw.ac.shield_equipped = true;
        raw.ac.shield_bonus = -1;
        assert_eq!(derive(&raw).unwrap_err().field(), "ac");
    }

    #[test]
    fn rejects_overflowing_initiative() {
        let mut raw = sample();
        raw.initiative_bonus = i32::MAX;
        assert_eq!(derive(&raw).unwrap_err().field(), "initiative bonus");

        raw.initiative_bonus = i32::MIN;
        assert_eq!(derive(&raw).unwrap().initiative(), i32::MIN + 4);
    }

    #[test]
    fn huge_hit_points_do_not_overflow() {
        let mut raw = sample();
        raw.hp.current = u32::MAX;
        raw.hp.temp = u32::MAX;
        let model = derive(&raw).unwrap();
        assert_eq!(model.combat().hit_points.effective(), u32::MAX);
    }

    #[test]
    fn model_serializes_grouped() {
        let model = derive(&sample()).unwrap();
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["personal"]["name"], "Vex");
        assert_eq!(json["ability_scores"]["dex"]["modifier"], 4);
        assert_eq!(json["skills"]["dex"]["stealth"]["value"], 7);
        assert_eq!(json["combat"]["armor_class"]["total"], 15);
        assert_eq!(json["passives"]["perception"], 14);
    }
}
