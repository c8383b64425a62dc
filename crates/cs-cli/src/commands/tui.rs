use std::path::Path;

use crate::theme::Theme;
use crate::tui::Dashboard;

pub fn run(path: &Path, theme: Option<&Path>) -> Result<(), String> {
    let (raw, model) = super::load_sheet(path)?;
    let theme = Theme::load(theme)?;
    let issues = cs_core::validate_sheet(&raw, &model);
    crate::tui::run(Dashboard::new(model, theme, issues))
}
