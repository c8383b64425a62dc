use std::path::Path;

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS};
use cs_core::{Ability, CharacterModel};

use crate::render;
use crate::theme::{self, Theme};

pub fn run(path: &Path, theme_path: Option<&Path>, no_color: bool) -> Result<(), String> {
    let (_, model) = super::load_sheet(path)?;
    let theme = Theme::load(theme_path)?;

    if no_color {
        colored::control::set_override(false);
    }

    print!("{}", render_dashboard(&model, &theme, !no_color));
    Ok(())
}

/// Render every panel, top to bottom, in dashboard order.
pub fn render_dashboard(model: &CharacterModel, theme: &Theme, styled: bool) -> String {
    let panels = [
        ("Personal Info", personal_info(model, theme)),
        ("Game Stats", game_stats(model, theme)),
        ("Proficiencies", proficiencies(model, theme)),
        ("Racial Traits", racial_traits(model, theme)),
        ("Combat Stats", combat_stats(model, theme)),
        ("Skill Modifiers", skill_modifiers(model, theme)),
    ];

    let mut out = String::new();
    for (title, mut table) in panels {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if let Some(width) = theme.width {
            table.set_width(width);
        }
        if !styled {
            table.force_no_tty();
        }
        let heading = title.color(theme.color(theme::TITLE)).bold();
        out.push_str(&format!("  {heading}\n{table}\n\n"));
    }
    out
}

fn cell(text: impl ToString, theme: &Theme, role: &str) -> Cell {
    Cell::new(text).fg(theme.color(role).into())
}

/// Green when positive, red when negative, plain at zero.
fn modifier_cell(text: String, n: i32, theme: &Theme) -> Cell {
    match n.signum() {
        1 => cell(text, theme, theme::GOOD),
        -1 => cell(text, theme, theme::BAD),
        _ => Cell::new(text),
    }
}

/// `Simple [■]`, muted when the flag is off.
fn flag_cell(label: &str, set: bool, theme: &Theme) -> Cell {
    let role = if set { theme::VALUE } else { theme::MUTED };
    cell(format!("{label} {}", render::mark(set)), theme, role)
}

fn personal_info(model: &CharacterModel, theme: &Theme) -> Table {
    let p = model.personal();
    let mut table = Table::new();
    for (label, value) in [
        ("Name", p.name.clone()),
        ("Class", render::class_line(p)),
        ("Race", p.race.clone()),
        ("Background", p.background.clone()),
        ("Alignment", p.alignment.clone()),
    ] {
        table.add_row(vec![
            cell(label, theme, theme::LABEL),
            cell(value, theme, theme::VALUE),
        ]);
    }
    table
}

fn game_stats(model: &CharacterModel, theme: &Theme) -> Table {
    let mut table = Table::new();
    for (ability, score) in model.ability_scores().iter() {
        table.add_row(vec![
            cell(render::ability_title(ability.name()), theme, theme::TITLE),
            modifier_cell(render::ability_line(score), score.modifier(), theme),
        ]);
    }

    let bonus = model.proficiency_bonus();
    table.add_row(vec![
        cell("Proficiency Bonus", theme, theme::LABEL),
        modifier_cell(render::signed(bonus), bonus, theme),
    ]);

    let passives = model.passives();
    for (label, value) in [
        ("Passive Perception", passives.perception),
        ("Passive Insight", passives.insight),
        ("Passive Investigation", passives.investigation),
    ] {
        table.add_row(vec![cell(label, theme, theme::LABEL), Cell::new(value)]);
    }
    table
}

fn proficiencies(model: &CharacterModel, theme: &Theme) -> Table {
    let p = model.proficiencies();
    let columns: [Vec<Cell>; 5] = [
        vec![
            flag_cell("Simple", p.simple_weapons, theme),
            flag_cell("Martial", p.martial_weapons, theme),
        ],
        vec![
            flag_cell("Light", p.light_armor, theme),
            flag_cell("Medium", p.medium_armor, theme),
            flag_cell("Heavy", p.heavy_armor, theme),
            flag_cell("Shields", p.shields, theme),
        ],
        p.tools.iter().map(|t| cell(t, theme, theme::VALUE)).collect(),
        p.languages.iter().map(|l| cell(l, theme, theme::VALUE)).collect(),
        p.other.iter().map(|o| cell(o, theme, theme::VALUE)).collect(),
    ];

    let mut table = Table::new();
    table.set_header(
        ["Weapons", "Armor", "Tools", "Languages", "Other"]
            .into_iter()
            .map(|h| cell(h, theme, theme::TITLE)),
    );

    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    for i in 0..rows {
        table.add_row(
            columns
                .iter()
                .map(|col| col.get(i).cloned().unwrap_or_else(|| Cell::new(""))),
        );
    }
    table
}

fn racial_traits(model: &CharacterModel, theme: &Theme) -> Table {
    let mut table = Table::new();
    if model.racial_traits().is_empty() {
        table.add_row(vec![cell("—", theme, theme::MUTED)]);
    }
    for name in model.racial_traits() {
        table.add_row(vec![cell(name, theme, theme::VALUE)]);
    }
    table
}

fn combat_stats(model: &CharacterModel, theme: &Theme) -> Table {
    let combat = model.combat();
    let ac = &combat.armor_class;
    let hp = &combat.hit_points;

    let mut table = Table::new();
    let mut row = |label: &str, value: Cell| {
        table.add_row(vec![cell(label, theme, theme::LABEL), value]);
    };

    row("Size", Cell::new(&model.personal().size));
    row(
        "Initiative",
        modifier_cell(render::signed(combat.initiative), combat.initiative, theme),
    );
    row(
        "Armor Class",
        Cell::new(format!("{} ({})", ac.total(), render::ac_breakdown(ac))),
    );
    row("Shield", Cell::new(render::shield_line(ac)));
    row("Max HP", Cell::new(hp.max));
    row("Current HP", cell(render::hp_line(hp), theme, theme::BAD));
    row(
        "Hit Dice",
        cell(render::hit_dice_line(hp, model.level()), theme, theme::VALUE),
    );

    for (label, feet) in [
        ("Walking", combat.speed.walking),
        ("Swimming", combat.speed.swimming),
        ("Flying", combat.speed.flying),
    ] {
        let role = if feet > 0 { theme::VALUE } else { theme::MUTED };
        row(label, cell(render::speed_line(feet), theme, role));
    }

    let saves = &combat.death_saves;
    row(
        "Death Save Successes",
        cell(render::death_marks(&saves.successes), theme, theme::GOOD),
    );
    row(
        "Death Save Failures",
        cell(render::death_marks(&saves.failures), theme, theme::BAD),
    );
    table
}

fn skill_modifiers(model: &CharacterModel, theme: &Theme) -> Table {
    let mut table = Table::new();
    table.set_header(
        ["Ability", "Check", "Modifier"]
            .into_iter()
            .map(|h| cell(h, theme, theme::TITLE)),
    );

    for ability in Ability::ALL {
        let save = model.save(ability);
        table.add_row(vec![
            cell(render::ability_title(ability.name()), theme, theme::TITLE),
            cell("Saving Throw", theme, theme::LABEL),
            modifier_cell(
                format!(
                    "{} {}",
                    render::proficiency_mark(save.proficient()),
                    render::signed(save.value())
                ),
                save.value(),
                theme,
            ),
        ]);

        for (skill, resolved) in model.skills().for_ability(ability) {
            table.add_row(vec![
                Cell::new(""),
                cell(render::skill_title(skill), theme, theme::VALUE),
                modifier_cell(
                    format!(
                        "{} {}",
                        render::proficiency_mark(resolved.proficient()),
                        render::signed(resolved.value())
                    ),
                    resolved.value(),
                    theme,
                ),
            ]);
        }
    }
    table
}
