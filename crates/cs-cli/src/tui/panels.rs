//! Dashboard layout: personal and game stats on the left, combat and skills
//! in the center, sheet notes on the right.

use cs_core::Ability;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use super::app::Dashboard;
use crate::render;
use crate::theme::{self, Theme};

pub fn draw(frame: &mut Frame, app: &Dashboard) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Panels
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(45),
            Constraint::Length(60),
            Constraint::Min(30),
        ])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(13),
            Constraint::Length(8),
            Constraint::Min(3),
        ])
        .split(columns[0]);

    let center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(17), Constraint::Min(5)])
        .split(columns[1]);

    let t = &app.theme;
    panel(frame, t, "Personal Info", personal_info(app), left[0]);
    panel(frame, t, "Game Stats", game_stats(app), left[1]);
    panel(frame, t, "Proficiencies", proficiencies(app), left[2]);
    panel(frame, t, "Racial Traits", racial_traits(app), left[3]);
    panel(frame, t, "Combat Stats", combat_stats(app), center[0]);

    let skills = Paragraph::new(skill_modifiers(app))
        .block(block(t, "Skill Modifiers"))
        .scroll((app.skill_scroll, 0));
    frame.render_widget(skills, center[1]);

    panel(frame, t, "Sheet Notes", notes(app), columns[2]);

    let status = Paragraph::new(format!(
        "{} | j/k:scroll skills  ?:help  q:quit",
        app.model.name()
    ))
    .style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, rows[1]);

    if app.show_help {
        draw_help_popup(frame, t);
    }
}

fn block<'a>(theme: &Theme, title: &'a str) -> Block<'a> {
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(theme.color(theme::TITLE).into()).bold(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.color(theme::BORDER).into()))
}

fn panel(frame: &mut Frame, theme: &Theme, title: &str, lines: Vec<Line<'static>>, area: Rect) {
    let widget = Paragraph::new(lines)
        .block(block(theme, title))
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn span(text: impl Into<String>, theme: &Theme, role: &str) -> Span<'static> {
    Span::styled(text.into(), Style::default().fg(theme.color(role).into()))
}

/// Label padded to a fixed column, then the value.
fn row(label: &str, width: usize, value: Span<'static>, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        span(format!("{label:<width$}"), theme, theme::LABEL),
        value,
    ])
}

fn modifier_span(text: String, n: i32, theme: &Theme) -> Span<'static> {
    match n.signum() {
        1 => span(text, theme, theme::GOOD),
        -1 => span(text, theme, theme::BAD),
        _ => Span::raw(text),
    }
}

fn personal_info(app: &Dashboard) -> Vec<Line<'static>> {
    let t = &app.theme;
    let p = app.model.personal();
    vec![
        row("Name", 12, span(p.name.clone(), t, theme::VALUE), t),
        row("Class", 12, span(render::class_line(p), t, theme::VALUE), t),
        row("Race", 12, Span::raw(p.race.clone()), t),
        row("Background", 12, Span::raw(p.background.clone()), t),
        row("Alignment", 12, Span::raw(p.alignment.clone()), t),
    ]
}

fn game_stats(app: &Dashboard) -> Vec<Line<'static>> {
    let t = &app.theme;
    let model = &app.model;
    let mut lines: Vec<Line<'static>> = model
        .ability_scores()
        .iter()
        .map(|(ability, score)| {
            Line::from(vec![
                span(
                    format!("{:<14}", render::ability_title(ability.name())),
                    t,
                    theme::TITLE,
                ),
                modifier_span(render::ability_line(score), score.modifier(), t),
            ])
        })
        .collect();

    let bonus = model.proficiency_bonus();
    let passives = model.passives();
    lines.push(Line::from(""));
    lines.push(row(
        "Proficiency Bonus",
        23,
        modifier_span(render::signed(bonus), bonus, t),
        t,
    ));
    lines.push(row(
        "Passive Perception",
        23,
        Span::raw(passives.perception.to_string()),
        t,
    ));
    lines.push(row(
        "Passive Insight",
        23,
        Span::raw(passives.insight.to_string()),
        t,
    ));
    lines.push(row(
        "Passive Investigation",
        23,
        Span::raw(passives.investigation.to_string()),
        t,
    ));
    lines
}

fn flag(label: &str, set: bool, theme: &Theme) -> Span<'static> {
    let role = if set { theme::VALUE } else { theme::MUTED };
    span(format!("{label} {}  ", render::mark(set)), theme, role)
}

fn proficiencies(app: &Dashboard) -> Vec<Line<'static>> {
    let t = &app.theme;
    let p = app.model.proficiencies();
    let list = |items: &[String]| {
        if items.is_empty() {
            span("—", t, theme::MUTED)
        } else {
            span(items.join(", "), t, theme::VALUE)
        }
    };

    vec![
        Line::from(vec![
            span("Weapons    ", t, theme::LABEL),
            flag("Simple", p.simple_weapons, t),
            flag("Martial", p.martial_weapons, t),
        ]),
        Line::from(vec![
            span("Armor      ", t, theme::LABEL),
            flag("Light", p.light_armor, t),
            flag("Medium", p.medium_armor, t),
        ]),
        Line::from(vec![
            span("           ", t, theme::LABEL),
            flag("Heavy", p.heavy_armor, t),
            flag("Shields", p.shields, t),
        ]),
        row("Tools", 11, list(&p.tools), t),
        row("Languages", 11, list(&p.languages), t),
        row("Other", 11, list(&p.other), t),
    ]
}

fn racial_traits(app: &Dashboard) -> Vec<Line<'static>> {
    let t = &app.theme;
    app.model
        .racial_traits()
        .iter()
        .map(|name| Line::from(span(name.clone(), t, theme::VALUE)))
        .collect()
}

fn combat_stats(app: &Dashboard) -> Vec<Line<'static>> {
    let t = &app.theme;
    let model = &app.model;
    let combat = model.combat();
    let ac = &combat.armor_class;
    let hp = &combat.hit_points;
    let saves = &combat.death_saves;

    let mut lines = vec![
        row("Size", 14, Span::raw(model.personal().size.clone()), t),
        row(
            "Initiative",
            14,
            modifier_span(render::signed(combat.initiative), combat.initiative, t),
            t,
        ),
        row("Armor Class", 14, Span::raw(ac.total().to_string()), t),
        row("Shield", 14, Span::raw(render::shield_line(ac)), t),
        Line::from(""),
        row("Max HP", 14, Span::raw(hp.max.to_string()), t),
        row("Current HP", 14, span(render::hp_line(hp), t, theme::BAD), t),
        row(
            "Hit Dice",
            14,
            span(render::hit_dice_line(hp, model.level()), t, theme::VALUE),
            t,
        ),
        Line::from(""),
    ];

    for (label, feet) in [
        ("Walking", combat.speed.walking),
        ("Swimming", combat.speed.swimming),
        ("Flying", combat.speed.flying),
    ] {
        let role = if feet > 0 { theme::VALUE } else { theme::MUTED };
        lines.push(row(label, 14, span(render::speed_line(feet), t, role), t));
    }

    lines.push(Line::from(""));
    lines.push(row(
        "Successes",
        14,
        span(render::death_marks(&saves.successes), t, theme::GOOD),
        t,
    ));
    lines.push(row(
        "Failures",
        14,
        span(render::death_marks(&saves.failures), t, theme::BAD),
        t,
    ));
    lines
}

fn skill_modifiers(app: &Dashboard) -> Vec<Line<'static>> {
    let t = &app.theme;
    let model = &app.model;
    let mut lines = Vec::new();

    for ability in Ability::ALL {
        let save = model.save(ability);
        lines.push(Line::from(vec![
            span(
                format!("{:<14}", render::ability_title(ability.name())),
                t,
                theme::TITLE,
            ),
            span(format!("{:<18}", "Saving Throw"), t, theme::LABEL),
            modifier_span(
                format!(
                    "{} {}",
                    render::proficiency_mark(save.proficient()),
                    render::signed(save.value())
                ),
                save.value(),
                t,
            ),
        ]));

        for (skill, resolved) in model.skills().for_ability(ability) {
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(14)),
                span(format!("{:<18}", render::skill_title(skill)), t, theme::VALUE),
                modifier_span(
                    format!(
                        "{} {}",
                        render::proficiency_mark(resolved.proficient()),
                        render::signed(resolved.value())
                    ),
                    resolved.value(),
                    t,
                ),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines
}

fn notes(app: &Dashboard) -> Vec<Line<'static>> {
    let t = &app.theme;
    let ac = app.model.armor_class();
    let mut lines = vec![
        Line::from(span("Armor Class", t, theme::LABEL)),
        Line::from(span(
            format!("{} armor", ac.armor_type()),
            t,
            theme::DIM,
        )),
        Line::from(span(render::ac_breakdown(ac), t, theme::DIM)),
        Line::from(""),
        Line::from(span("Warnings", t, theme::LABEL)),
    ];

    if app.issues.is_empty() {
        lines.push(Line::from(span("none", t, theme::MUTED)));
    }
    for issue in &app.issues {
        lines.push(Line::from(span(
            format!("{}: {}", issue.field, issue.message),
            t,
            theme::BAD,
        )));
    }
    lines
}

fn draw_help_popup(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect(40, 40, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("  j / ↓       Scroll skills down"),
        Line::from("  k / ↑       Scroll skills up"),
        Line::from("  g / G       Top / bottom of skills"),
        Line::from("  ?           Toggle this help"),
        Line::from("  Esc         Close help / quit"),
        Line::from("  q           Quit"),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(help_text).block(block(theme, "Help")), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    const SHEET: &str = include_str!("../../tests/fixtures/vex.json");

    fn screen(app: &Dashboard) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 50)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(cs_core::load_json(SHEET).unwrap(), Theme::default(), Vec::new())
    }

    #[test]
    fn draws_all_panels() {
        let out = screen(&dashboard());
        for title in [
            "Personal Info",
            "Game Stats",
            "Proficiencies",
            "Racial Traits",
            "Combat Stats",
            "Skill Modifiers",
            "Sheet Notes",
        ] {
            assert!(out.contains(title), "missing panel {title}");
        }
        assert!(out.contains("Rogue 5 (Arcane Trickster)"));
        assert!(out.contains("27 + 5 = 32"));
    }

    #[test]
    fn scrolling_hides_first_skill_rows() {
        let mut app = dashboard();
        assert!(screen(&app).contains("Saving Throw"));
        app.skill_scroll = 2;
        let out = screen(&app);
        assert!(!out.contains("Athletics"));
        assert!(out.contains("Acrobatics"));
    }

    #[test]
    fn help_popup_toggles() {
        let mut app = dashboard();
        assert!(!screen(&app).contains("Keyboard Shortcuts"));
        app.show_help = true;
        assert!(screen(&app).contains("Keyboard Shortcuts"));
    }
}
