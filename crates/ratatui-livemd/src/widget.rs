//! Stand-ins painted in place of raw markup.

use std::fmt;

use ratatui::style::Style;
use ratatui::text::Span;
use ratatui_livemd_core::render;
use ratatui_livemd_core::theme::Theme;
use url::Url;

use crate::decoration::DecorationSet;
use crate::decoration::MarkupKind;
use crate::decoration::Replacement;
use crate::error::RenderError;
use crate::window::TextWindow;

/// Visual class of a styled label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleClass {
    Heading(u8),
    Strong,
    Emphasis,
    Code,
    Strike,
    Link,
}

impl StyleClass {
    pub fn for_kind(kind: &MarkupKind) -> Self {
        match kind {
            MarkupKind::Heading { level } => StyleClass::Heading(*level),
            MarkupKind::Bold => StyleClass::Strong,
            MarkupKind::Italic => StyleClass::Emphasis,
            MarkupKind::InlineCode => StyleClass::Code,
            MarkupKind::Strikethrough => StyleClass::Strike,
            MarkupKind::Link { .. } => StyleClass::Link,
        }
    }

    pub fn style(self, theme: &Theme) -> Style {
        use ratatui::style::Modifier;

        match self {
            StyleClass::Heading(level) => theme.text_primary.patch(theme.heading(level)),
            StyleClass::Strong => theme.text_primary.add_modifier(Modifier::BOLD),
            StyleClass::Emphasis => theme.text_primary.add_modifier(Modifier::ITALIC),
            StyleClass::Code => theme.code_inline,
            StyleClass::Strike => theme.text_primary.patch(theme.strike),
            StyleClass::Link => theme.link(),
        }
    }
}

impl fmt::Display for StyleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleClass::Heading(level) => write!(f, "heading-{level}"),
            StyleClass::Strong => f.write_str("strong"),
            StyleClass::Emphasis => f.write_str("emphasis"),
            StyleClass::Code => f.write_str("code"),
            StyleClass::Strike => f.write_str("strike"),
            StyleClass::Link => f.write_str("link"),
        }
    }
}

/// The concrete stand-in for one replacement.
///
/// Stand-ins are inert: they never consume pointer or caret input. Hosts translate any
/// interaction inside a stand-in back to raw offsets so the markup underneath stays editable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Widget {
    Label {
        text: String,
        class: StyleClass,
        style: Style,
    },
    /// An activatable label. `target` is the resolved link destination.
    Link {
        text: String,
        target: String,
        style: Style,
    },
    /// Undecorated raw source, used when the replacement could not be rendered.
    Raw { text: String, reason: RenderError },
}

impl Widget {
    pub fn text(&self) -> &str {
        match self {
            Widget::Label { text, .. } | Widget::Link { text, .. } | Widget::Raw { text, .. } => {
                text
            }
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Widget::Label { style, .. } | Widget::Link { style, .. } => *style,
            Widget::Raw { .. } => Style::default(),
        }
    }

    pub fn class(&self) -> Option<StyleClass> {
        match self {
            Widget::Label { class, .. } => Some(*class),
            Widget::Link { .. } => Some(StyleClass::Link),
            Widget::Raw { .. } => None,
        }
    }

    pub fn link_target(&self) -> Option<&str> {
        match self {
            Widget::Link { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Always `true`: interaction inside a stand-in passes through to the editing surface.
    pub fn ignores_events(&self) -> bool {
        true
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Widget::Raw { .. })
    }

    /// Width in terminal cells.
    pub fn cols(&self) -> usize {
        render::str_cols(self.text())
    }

    pub fn to_span(&self) -> Span<'static> {
        Span::styled(self.text().to_string(), self.style())
    }
}

/// Builds stand-ins from replacements using a [`Theme`].
#[derive(Clone, Debug, Default)]
pub struct WidgetRenderer {
    theme: Theme,
    base_url: Option<String>,
}

impl WidgetRenderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            base_url: None,
        }
    }

    /// Relative link targets are joined onto `base_url`.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Renders `replacement`, falling back to its raw source text on failure.
    pub fn render(&self, replacement: &Replacement, window: &TextWindow) -> Widget {
        match self.try_render(replacement) {
            Ok(widget) => widget,
            Err(reason) => {
                tracing::debug!(
                    start = replacement.start,
                    end = replacement.end,
                    kind = ?replacement.kind,
                    %reason,
                    "widget.fallback"
                );
                let text = window
                    .slice(replacement.start, replacement.end)
                    .unwrap_or(&replacement.display_text)
                    .to_string();
                Widget::Raw { text, reason }
            }
        }
    }

    pub fn try_render(&self, replacement: &Replacement) -> Result<Widget, RenderError> {
        let text = &replacement.display_text;
        check_label(text)?;
        let class = StyleClass::for_kind(&replacement.kind);
        let style = class.style(&self.theme);
        match &replacement.kind {
            MarkupKind::Link { url } => {
                let target = resolve_url(self.base_url.as_deref(), url);
                if target.is_empty() || target.chars().any(|c| c.is_whitespace() || c.is_control())
                {
                    return Err(RenderError::InvalidLinkTarget(url.clone()));
                }
                Ok(Widget::Link {
                    text: text.clone(),
                    target,
                    style,
                })
            }
            _ => Ok(Widget::Label {
                text: text.clone(),
                class,
                style,
            }),
        }
    }

    /// One widget per replacement, in the same order.
    pub fn render_set(&self, set: &DecorationSet, window: &TextWindow) -> Vec<Widget> {
        set.iter().map(|r| self.render(r, window)).collect()
    }
}

fn check_label(text: &str) -> Result<(), RenderError> {
    if text.is_empty() {
        return Err(RenderError::EmptyLabel);
    }
    if let Some(c) = text.chars().find(|c| c.is_control() && *c != '\t') {
        return Err(RenderError::ControlCharacter(c));
    }
    Ok(())
}

fn resolve_url(base_url: Option<&str>, dest: &str) -> String {
    let dest = dest.trim();
    if dest.is_empty() || is_absolute_url(dest) {
        return dest.to_string();
    }
    let Some(base) = base_url.map(str::trim).filter(|s| !s.is_empty()) else {
        return dest.to_string();
    };

    if let Ok(base) = Url::parse(base) {
        return base
            .join(dest)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| dest.to_string());
    }

    let mut joined = base.trim_end_matches(['/', '\\']).to_string();
    joined.push('/');
    joined.push_str(dest.trim_start_matches("./").trim_start_matches('/'));
    joined
}

fn is_absolute_url(dest: &str) -> bool {
    dest.starts_with('#')
        || dest.starts_with('/')
        || dest.starts_with("mailto:")
        || Url::parse(dest).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    fn rep(kind: MarkupKind, text: &str) -> Replacement {
        Replacement {
            start: 0,
            end: text.len() + 4,
            kind,
            display_text: text.to_string(),
        }
    }

    #[test]
    fn labels_get_class_and_theme_style() {
        let r = WidgetRenderer::default();
        let w = r.try_render(&rep(MarkupKind::Bold, "world")).unwrap();
        assert_eq!(w.text(), "world");
        assert_eq!(w.class(), Some(StyleClass::Strong));
        assert!(w.style().add_modifier.contains(Modifier::BOLD));

        let w = r
            .try_render(&rep(MarkupKind::Heading { level: 1 }, "Title"))
            .unwrap();
        assert_eq!(w.class().map(|c| c.to_string()).as_deref(), Some("heading-1"));
        assert!(w.style().add_modifier.contains(Modifier::UNDERLINED));

        let w = r.try_render(&rep(MarkupKind::Strikethrough, "old")).unwrap();
        assert!(w.style().add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn links_carry_target_but_show_label() {
        let r = WidgetRenderer::default();
        let w = r
            .try_render(&rep(
                MarkupKind::Link {
                    url: "https://x.io".to_string(),
                },
                "docs",
            ))
            .unwrap();
        assert_eq!(w.text(), "docs");
        assert_eq!(w.link_target(), Some("https://x.io"));
        assert_eq!(w.to_span().content, "docs");
        assert!(w.ignores_events());
    }

    #[test]
    fn relative_links_resolve_against_base_url() {
        let r = WidgetRenderer::default()
            .with_base_url(Some("https://example.com/docs/".to_string()));
        let link = |url: &str| {
            r.try_render(&rep(
                MarkupKind::Link {
                    url: url.to_string(),
                },
                "l",
            ))
            .unwrap()
            .link_target()
            .map(str::to_string)
        };
        assert_eq!(
            link("./guide.md").as_deref(),
            Some("https://example.com/docs/guide.md")
        );
        assert_eq!(link("#top").as_deref(), Some("#top"));
        assert_eq!(link("mailto:a@b.c").as_deref(), Some("mailto:a@b.c"));
        assert_eq!(link("https://x.io").as_deref(), Some("https://x.io"));

        let plain = WidgetRenderer::default().with_base_url(Some("notes".to_string()));
        let w = plain
            .try_render(&rep(
                MarkupKind::Link {
                    url: "./a.md".to_string(),
                },
                "a",
            ))
            .unwrap();
        assert_eq!(w.link_target(), Some("notes/a.md"));
    }

    #[test]
    fn unrenderable_replacements_fall_back_to_raw_text() {
        let r = WidgetRenderer::default();
        let window = TextWindow::whole("# \n[a](b c)");
        let heading = Replacement {
            start: 0,
            end: 2,
            kind: MarkupKind::Heading { level: 1 },
            display_text: String::new(),
        };
        let w = r.render(&heading, &window);
        assert_eq!(
            w,
            Widget::Raw {
                text: "# ".to_string(),
                reason: RenderError::EmptyLabel,
            }
        );
        assert!(w.is_fallback());

        let link = Replacement {
            start: 3,
            end: 11,
            kind: MarkupKind::Link {
                url: "b c".to_string(),
            },
            display_text: "a".to_string(),
        };
        let w = r.render(&link, &window);
        assert_eq!(w.text(), "[a](b c)");
        assert_eq!(w.link_target(), None);
    }

    #[test]
    fn control_characters_are_rejected() {
        assert_eq!(check_label("a\u{7}b"), Err(RenderError::ControlCharacter('\u{7}')));
        assert_eq!(check_label("a\tb"), Ok(()));
    }
}
