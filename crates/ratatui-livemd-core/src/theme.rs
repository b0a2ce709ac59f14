use ratatui::style::Modifier;
use ratatui::style::Style;

/// Styles shared by the editing surface and the markdown stand-ins painted over it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
    pub code_inline: Style,
    /// Indexed by heading level minus one; levels past the end reuse the last entry.
    pub headings: Vec<Style>,
    pub strike: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            code_inline: Style::default().cyan(),
            headings: vec![
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                Style::default().add_modifier(Modifier::BOLD),
                Style::default().add_modifier(Modifier::BOLD).italic(),
            ],
            strike: Style::default().add_modifier(Modifier::CROSSED_OUT),
        }
    }
}

impl Theme {
    pub fn heading(&self, level: u8) -> Style {
        let idx = (level.max(1) - 1) as usize;
        self.headings
            .get(idx)
            .or(self.headings.last())
            .copied()
            .unwrap_or(self.text_primary)
    }

    pub fn link(&self) -> Style {
        self.accent.add_modifier(Modifier::UNDERLINED)
    }
}
