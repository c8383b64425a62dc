//! Text formatting shared by the static dashboard and the TUI.

use cs_core::model::{HitPoints, PersonalInfo};
use cs_core::{AbilityScore, ArmorClass, Skill};

/// Signed modifier: `+3`, `+0`, `-1`.
pub fn signed(n: i32) -> String {
    if n >= 0 { format!("+{n}") } else { n.to_string() }
}

/// Skill name in title case, keeping "of" lowercase ("Sleight of Hand").
pub fn skill_title(skill: Skill) -> String {
    skill
        .name()
        .split(' ')
        .map(|word| {
            if word == "of" {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalized ability name ("Dexterity").
pub fn ability_title(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `Rogue 5 (Arcane Trickster)`, without the parentheses when there is no
/// subclass.
pub fn class_line(personal: &PersonalInfo) -> String {
    if personal.subclass.is_empty() {
        format!("{} {}", personal.class, personal.level)
    } else {
        format!(
            "{} {} ({})",
            personal.class, personal.level, personal.subclass
        )
    }
}

/// Raw score right-aligned with its modifier: `18 (+4)`.
pub fn ability_line(score: &AbilityScore) -> String {
    format!("{:>2} ({})", score.raw(), signed(score.modifier()))
}

/// `27 + 5 = 32`.
pub fn hp_line(hp: &HitPoints) -> String {
    format!("{} + {} = {}", hp.current, hp.temp, hp.effective())
}

/// Remaining over total hit dice: `3d8/5d8`.
pub fn hit_dice_line(hp: &HitPoints, level: u32) -> String {
    format!(
        "{}d{}/{}d{}",
        hp.hit_dice_remaining, hp.hit_die, level, hp.hit_die
    )
}

/// Speed in feet, right-aligned to two digits: `30 ft.`, ` 0 ft.`.
pub fn speed_line(feet: u32) -> String {
    format!("{feet:>2} ft.")
}

/// `Yes (+2 AC)` or `No`.
pub fn shield_line(ac: &ArmorClass) -> String {
    if ac.shield_equipped() {
        format!("Yes ({} AC)", signed(ac.shield_bonus()))
    } else {
        "No".to_string()
    }
}

/// How the AC total was reached: `12 base + 2 dex + 2 shield + 1 ring`.
pub fn ac_breakdown(ac: &ArmorClass) -> String {
    let mut parts = vec![format!("{} base", ac.base())];
    if ac.dex_bonus() != 0 {
        parts.push(format!("{} dex", ac.dex_bonus()));
    }
    if ac.shield_equipped() {
        parts.push(format!("{} shield", ac.shield_bonus()));
    }
    for (name, bonus) in ac.misc_bonuses() {
        parts.push(format!("{bonus} {name}"));
    }
    parts.join(" + ")
}

/// Filled or empty box.
pub fn mark(set: bool) -> &'static str {
    if set { "[■]" } else { "[ ]" }
}

/// Proficiency marker for a save or skill row.
pub fn proficiency_mark(proficient: bool) -> &'static str {
    if proficient { "[P]" } else { "[ ]" }
}

/// Three death save boxes separated by spaces.
pub fn death_marks(marks: &[bool; 3]) -> String {
    marks.iter().map(|m| mark(*m)).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hp() -> HitPoints {
        HitPoints {
            max: 33,
            current: 27,
            temp: 5,
            hit_die: 8,
            hit_dice_remaining: 3,
        }
    }

    #[test]
    fn signed_modifiers() {
        assert_eq!(signed(0), "+0");
        assert_eq!(signed(4), "+4");
        assert_eq!(signed(-1), "-1");
    }

    #[test]
    fn skill_titles() {
        assert_eq!(skill_title(Skill::SleightOfHand), "Sleight of Hand");
        assert_eq!(skill_title(Skill::AnimalHandling), "Animal Handling");
        assert_eq!(skill_title(Skill::Stealth), "Stealth");
    }

    #[test]
    fn class_line_with_and_without_subclass() {
        let mut personal = PersonalInfo {
            name: "Vex".to_string(),
            level: 5,
            class: "Rogue".to_string(),
            subclass: "Arcane Trickster".to_string(),
            background: String::new(),
            alignment: String::new(),
            race: String::new(),
            size: String::new(),
        };
        assert_eq!(class_line(&personal), "Rogue 5 (Arcane Trickster)");
        personal.subclass.clear();
        assert_eq!(class_line(&personal), "Rogue 5");
    }

    #[test]
    fn hit_point_lines() {
        assert_eq!(hp_line(&hp()), "27 + 5 = 32");
        assert_eq!(hit_dice_line(&hp(), 5), "3d8/5d8");
    }

    #[test]
    fn ability_and_speed_padding() {
        assert_eq!(ability_line(&AbilityScore::new(8)), " 8 (-1)");
        assert_eq!(ability_line(&AbilityScore::new(18)), "18 (+4)");
        assert_eq!(speed_line(0), " 0 ft.");
        assert_eq!(speed_line(30), "30 ft.");
    }

    #[test]
    fn death_mark_row() {
        assert_eq!(death_marks(&[true, false, false]), "[■] [ ] [ ]");
    }
}
