use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cs_core::{CharacterModel, SheetIssue};

use crate::theme::Theme;

/// State of the interactive dashboard. The model is read-only; only the view
/// state changes.
pub struct Dashboard {
    pub model: CharacterModel,
    pub theme: Theme,
    pub issues: Vec<SheetIssue>,
    pub skill_scroll: u16,
    pub show_help: bool,
    pub should_quit: bool,
}

impl Dashboard {
    pub fn new(model: CharacterModel, theme: Theme, issues: Vec<SheetIssue>) -> Self {
        Self {
            model,
            theme,
            issues,
            skill_scroll: 0,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Char('j') | KeyCode::Down => {
                self.skill_scroll = self.skill_scroll.saturating_add(1).min(self.max_scroll());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.skill_scroll = self.skill_scroll.saturating_sub(1);
            }
            KeyCode::Char('g') => self.skill_scroll = 0,
            KeyCode::Char('G') => self.skill_scroll = self.max_scroll(),
            _ => {}
        }
    }

    /// Skill panel rows: one save row per ability, one row per skill, and a
    /// blank separator between abilities.
    pub fn skill_rows(&self) -> u16 {
        (cs_core::Ability::ALL.len() * 2 + cs_core::Skill::ALL.len()) as u16
    }

    fn max_scroll(&self) -> u16 {
        self.skill_rows().saturating_sub(1)
    }
}
