//! A markdown editing surface with live inline decorations.
//!
//! [`LiveMarkdownEditor`] wraps a [`TextArea`] and keeps a [`RefreshController`] in sync with
//! it: edits trigger a document refresh, scrolling and resizing trigger a viewport refresh.
//! Each visible row is painted with stand-ins spliced over their raw spans, while the caret,
//! clicks and edits keep operating on the raw markdown underneath.

use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui_livemd_core::input;
use ratatui_livemd_core::input::InputEvent;
use ratatui_livemd_core::input::KeyEvent;
use ratatui_livemd_core::input::MouseEvent;
use ratatui_livemd_core::input::MouseEventKind;
use ratatui_livemd_core::render;
use ratatui_livemd_core::textarea::TextArea;
use ratatui_livemd_core::textarea::TextAreaAction;
use ratatui_livemd_core::textarea::TextAreaOptions;
use ratatui_livemd_core::textarea::col_from_display_x;
use ratatui_livemd_core::theme::Theme;

use crate::decoration::PublishedDecorations;
use crate::decoration::Replacement;
use crate::options::DecorationMode;
use crate::options::DecorationOptions;
use crate::refresh::HostSurface;
use crate::refresh::RefreshController;
use crate::refresh::RefreshOutcome;
use crate::widget::Widget;
use crate::window::TextWindow;

#[derive(Clone, Debug)]
pub struct LiveMarkdownEditorOptions {
    pub decorations: DecorationOptions,
    pub text_area: TextAreaOptions,
    /// Activates the link under the caret.
    pub open_link: Vec<KeyEvent>,
}

impl Default for LiveMarkdownEditorOptions {
    fn default() -> Self {
        Self {
            decorations: DecorationOptions::default(),
            text_area: TextAreaOptions::default(),
            open_link: vec![input::key_ctrl('o')],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorAction {
    None,
    /// The document was edited.
    Changed,
    /// Only the caret or the viewport moved.
    Redraw,
    /// The user activated a link; the app decides what opening it means.
    OpenLink(String),
    Submitted(String),
}

#[derive(Clone, Debug)]
struct Surface {
    text_area: TextArea,
    published: PublishedDecorations,
}

impl HostSurface for Surface {
    fn visible_window(&self) -> TextWindow {
        let (range, text) = self.text_area.visible_window();
        TextWindow::at(range.start, text)
    }

    fn publish(&mut self, decorations: PublishedDecorations) {
        self.published = decorations;
    }
}

#[derive(Clone, Debug)]
pub struct LiveMarkdownEditor {
    surface: Surface,
    controller: RefreshController,
    options: LiveMarkdownEditorOptions,
    last_revision: Option<u64>,
    last_window: Range<usize>,
    last_area: Option<Rect>,
    /// Horizontal scroll in decorated columns; `state.x` of the text area mirrors it.
    scroll_x: u32,
}

impl Default for LiveMarkdownEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveMarkdownEditor {
    pub fn new() -> Self {
        Self::with_options(LiveMarkdownEditorOptions::default())
    }

    pub fn with_options(options: LiveMarkdownEditorOptions) -> Self {
        Self {
            surface: Surface {
                text_area: TextArea::with_options(options.text_area.clone()),
                published: PublishedDecorations::default(),
            },
            controller: RefreshController::new(&options.decorations, Theme::default()),
            options,
            last_revision: None,
            last_window: 0..0,
            last_area: None,
            scroll_x: 0,
        }
    }

    pub fn options(&self) -> &LiveMarkdownEditorOptions {
        &self.options
    }

    /// Restyles the stand-ins; takes effect on the next refresh, which this forces.
    pub fn set_theme(&mut self, theme: Theme) {
        self.controller.decorator_mut().set_theme(theme);
        self.last_revision = None;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.surface.text_area.set_text(text);
        self.sync();
    }

    pub fn text(&self) -> String {
        self.surface.text_area.text()
    }

    pub fn text_area(&self) -> &TextArea {
        &self.surface.text_area
    }

    pub fn decorations(&self) -> &PublishedDecorations {
        &self.surface.published
    }

    pub fn controller(&self) -> &RefreshController {
        &self.controller
    }

    pub fn set_cursor_offset(&mut self, offset: usize) {
        self.surface.text_area.set_cursor_offset(offset);
        self.sync();
    }

    pub fn set_viewport(&mut self, area: Rect) {
        self.surface.text_area.set_viewport(area);
        self.last_area = Some(area);
    }

    /// Refreshes decorations if the document or the visible window changed since the last
    /// refresh, then keeps the caret in view on its decorated row. Returns `None` when nothing
    /// changed or the refresh was rejected.
    pub fn sync(&mut self) -> Option<RefreshOutcome> {
        let outcome = self.refresh_if_changed();
        self.follow_caret_x();
        outcome
    }

    fn refresh_if_changed(&mut self) -> Option<RefreshOutcome> {
        let revision = self.surface.text_area.revision();
        let (window, _) = self.surface.text_area.visible_window();
        let document_changed = self.last_revision != Some(revision);
        if !document_changed && window == self.last_window {
            return None;
        }
        tracing::debug!(
            revision,
            window_start = window.start,
            window_end = window.end,
            document_changed,
            "editor.sync"
        );
        self.last_revision = Some(revision);
        self.last_window = window;

        let result = if document_changed {
            self.controller.on_document_changed(&mut self.surface)
        } else {
            self.controller.on_viewport_changed(&mut self.surface)
        };
        result.ok()
    }

    /// Sideways scroll measured on the caret's decorated row, not its raw text.
    fn follow_caret_x(&mut self) {
        let (caret, width) = {
            let text_area = &self.surface.text_area;
            let row = text_area.cursor().row;
            let Some(line) = text_area.line(row) else {
                return;
            };
            let line_start = text_area.line_start(row);
            let segments = row_segments(&self.surface.published, self.mode(), line_start, line);
            (
                display_col(&segments, text_area.cursor_offset()) as u32,
                display_col(&segments, line_start + line.len()) as u32,
            )
        };
        let view = u32::from(self.surface.text_area.state.viewport_w);
        let mut x = self.scroll_x;
        if caret < x {
            x = caret;
        } else if view > 0 && caret >= x + view {
            x = caret + 1 - view;
        }
        // One extra column so the caret can sit after the last character.
        x = x.min((width + 1).saturating_sub(view));
        self.scroll_x = x;
        self.surface.text_area.state.x = x;
    }

    fn mode(&self) -> DecorationMode {
        self.options.decorations.mode
    }

    /// Target of the link whose stand-in covers the caret.
    pub fn link_at_cursor(&self) -> Option<&str> {
        let offset = self.surface.text_area.cursor_offset();
        self.surface
            .published
            .at(offset)
            .and_then(|(_, widget)| widget.link_target())
    }

    /// Handles an event. Mouse clicks are mapped using the area of the last render.
    pub fn input(&mut self, event: InputEvent) -> EditorAction {
        let action = match event {
            InputEvent::Key(key) if input::any_matches(&self.options.open_link, &key) => self
                .link_at_cursor()
                .map(|url| EditorAction::OpenLink(url.to_string()))
                .unwrap_or(EditorAction::None),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            event => {
                let before = (self.surface.text_area.cursor(), self.surface.text_area.state);
                match self.surface.text_area.input(event) {
                    TextAreaAction::Changed => EditorAction::Changed,
                    TextAreaAction::Submitted(text) => EditorAction::Submitted(text),
                    TextAreaAction::None => {
                        let after = (self.surface.text_area.cursor(), self.surface.text_area.state);
                        if before != after {
                            EditorAction::Redraw
                        } else {
                            EditorAction::None
                        }
                    }
                }
            }
        };
        self.sync();
        action
    }

    /// Like [`Self::input`], but first lays out for `area`.
    pub fn input_in_area(&mut self, area: Rect, event: InputEvent) -> EditorAction {
        self.set_viewport(area);
        self.input(event)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> EditorAction {
        match mouse.kind {
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                self.surface.text_area.input(InputEvent::Mouse(mouse));
                EditorAction::Redraw
            }
            _ if mouse.is_left_click() => {
                let Some(area) = self.last_area else {
                    return EditorAction::None;
                };
                let Some(offset) = self.offset_at(area, mouse.x, mouse.y) else {
                    return EditorAction::None;
                };
                if mouse.modifiers.ctrl {
                    let link = self
                        .surface
                        .published
                        .at(offset)
                        .and_then(|(_, widget)| widget.link_target());
                    if let Some(url) = link {
                        return EditorAction::OpenLink(url.to_string());
                    }
                }
                self.surface.text_area.set_cursor_offset(offset);
                EditorAction::Redraw
            }
            _ => EditorAction::None,
        }
    }

    /// Raw byte offset under a screen cell, looking through stand-ins.
    pub fn offset_at(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        let text_area = &self.surface.text_area;
        let (row, col) = text_area.hit_test(area, x, y)?;
        let line = text_area.line(row)?;
        let line_start = text_area.line_start(row);
        if col == usize::MAX {
            return Some(line_start + line.len());
        }
        let segments = row_segments(&self.surface.published, self.mode(), line_start, line);
        Some(offset_at_col(&segments, line_start + line.len(), col))
    }

    /// Screen cell of the caret, measured against the decorated row.
    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        let text_area = &self.surface.text_area;
        let row = text_area.cursor().row;
        let line = text_area.line(row)?;
        let segments = row_segments(
            &self.surface.published,
            self.mode(),
            text_area.line_start(row),
            line,
        );
        let x = display_col(&segments, text_area.cursor_offset());
        text_area.screen_pos_for(area, row, x)
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.set_viewport(area);
        self.sync();

        let mode = self.mode();
        let published = &self.surface.published;
        let text_area = &mut self.surface.text_area;
        let rows = text_area.state.visible_rows();
        let first = rows.start;
        let mut next_start = text_area.line_start(first);
        let starts: Vec<usize> = text_area
            .lines()
            .get(rows)
            .unwrap_or_default()
            .iter()
            .map(|line| {
                let start = next_start;
                next_start += line.len() + 1;
                start
            })
            .collect();

        text_area.render_rows_ref(area, buf, |idx, line| {
            match idx.checked_sub(first).and_then(|i| starts.get(i)) {
                Some(&line_start) => row_spans(&row_segments(published, mode, line_start, line)),
                None => vec![Span::raw(line.to_string())],
            }
        });
    }
}

/// A run of one row: raw text, possibly styled in place, or a stand-in covering `replacement`.
enum Segment<'a> {
    Raw {
        start: usize,
        text: &'a str,
        style: Style,
    },
    Decorated {
        replacement: &'a Replacement,
        widget: &'a Widget,
    },
}

fn row_segments<'a>(
    published: &'a PublishedDecorations,
    mode: DecorationMode,
    line_start: usize,
    line: &'a str,
) -> Vec<Segment<'a>> {
    let line_end = line_start + line.len();
    let mut out = Vec::new();
    let mut cursor = line_start;
    for (replacement, widget) in published.overlapping(line_start..line_end) {
        let (start, end) = (replacement.start, replacement.end);
        if start < cursor
            || end > line_end
            || !line.is_char_boundary(start - line_start)
            || !line.is_char_boundary(end - line_start)
        {
            continue;
        }
        if start > cursor {
            out.push(Segment::Raw {
                start: cursor,
                text: &line[cursor - line_start..start - line_start],
                style: Style::default(),
            });
        }
        out.push(match mode {
            DecorationMode::Replace => Segment::Decorated {
                replacement,
                widget,
            },
            DecorationMode::Mark => Segment::Raw {
                start,
                text: &line[start - line_start..end - line_start],
                style: widget.style(),
            },
        });
        cursor = end;
    }
    if cursor < line_end {
        out.push(Segment::Raw {
            start: cursor,
            text: &line[cursor - line_start..],
            style: Style::default(),
        });
    }
    out
}

fn row_spans(segments: &[Segment<'_>]) -> Vec<Span<'static>> {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Raw { text, style, .. } => Span::styled(text.to_string(), *style),
            Segment::Decorated { widget, .. } => widget.to_span(),
        })
        .collect()
}

/// Display column of raw `offset` on a decorated row.
fn display_col(segments: &[Segment<'_>], offset: usize) -> usize {
    let mut x = 0usize;
    for segment in segments {
        match segment {
            Segment::Raw { start, text, .. } => {
                if offset < start + text.len() {
                    let rel = offset.saturating_sub(*start);
                    return x + text.get(..rel).map_or(0, render::str_cols);
                }
                x += render::str_cols(text);
            }
            Segment::Decorated {
                replacement,
                widget,
            } => {
                if offset < replacement.start {
                    return x;
                }
                if offset < replacement.end {
                    return x + label_col(replacement, widget, offset);
                }
                x += widget.cols();
            }
        }
    }
    x
}

fn label_col(replacement: &Replacement, widget: &Widget, offset: usize) -> usize {
    let label = if widget.is_fallback() {
        replacement.range()
    } else {
        replacement.label_range()
    };
    let rel = offset.clamp(label.start, label.end) - label.start;
    widget.text().get(..rel).map_or(0, render::str_cols)
}

/// Raw byte offset shown at display column `col` of a decorated row.
fn offset_at_col(segments: &[Segment<'_>], line_end: usize, col: usize) -> usize {
    let mut x = 0usize;
    for segment in segments {
        let (text, base) = match segment {
            Segment::Raw { start, text, .. } => (*text, *start),
            Segment::Decorated {
                replacement,
                widget,
            } => {
                let base = if widget.is_fallback() {
                    replacement.start
                } else {
                    replacement.label_range().start
                };
                (widget.text(), base)
            }
        };
        let width = render::str_cols(text);
        if col < x + width {
            let char_idx = col_from_display_x(text, col - x);
            let byte = text
                .char_indices()
                .nth(char_idx)
                .map_or(text.len(), |(i, _)| i);
            return base + byte;
        }
        x += width;
    }
    line_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;
    use ratatui_livemd_core::input::KeyCode;
    use ratatui_livemd_core::input::KeyModifiers;
    use ratatui_livemd_core::input::MouseButton;
    use ratatui_livemd_core::textarea::SubmitRule;

    fn editor(text: &str) -> LiveMarkdownEditor {
        let mut ed = LiveMarkdownEditor::with_options(LiveMarkdownEditorOptions {
            text_area: TextAreaOptions {
                show_scrollbar: false,
                ..TextAreaOptions::default()
            },
            ..LiveMarkdownEditorOptions::default()
        });
        ed.set_text(text);
        ed
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn paint(ed: &mut LiveMarkdownEditor, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        ed.render_ref(area, &mut buf);
        buf
    }

    fn click(x: u16, y: u16) -> InputEvent {
        InputEvent::Mouse(MouseEvent::new(x, y, MouseEventKind::Down(MouseButton::Left)))
    }

    #[test]
    fn renders_stand_ins_over_raw_markup() {
        let mut ed = editor("Hello **world**, `code`\n# Title");
        let buf = paint(&mut ed, Rect::new(0, 0, 30, 2));
        assert_eq!(row(&buf, 0), "Hello world, code");
        assert_eq!(row(&buf, 1), "Title");
        assert!(
            buf.cell((6, 0))
                .unwrap()
                .style()
                .add_modifier
                .contains(Modifier::BOLD)
        );
        assert_eq!(ed.text(), "Hello **world**, `code`\n# Title");
    }

    #[test]
    fn first_layout_triggers_a_viewport_refresh() {
        let mut ed = editor("**a**");
        assert!(ed.decorations().is_empty());
        let before = ed.controller().generation();
        paint(&mut ed, Rect::new(0, 0, 10, 1));
        assert_eq!(ed.controller().generation(), before + 1);
        assert_eq!(ed.decorations().len(), 1);
        // A second frame with nothing changed does not refresh again.
        paint(&mut ed, Rect::new(0, 0, 10, 1));
        assert_eq!(ed.controller().generation(), before + 1);
    }

    #[test]
    fn edits_redecorate_the_document() {
        let mut ed = editor("a *b");
        let area = Rect::new(0, 0, 10, 1);
        paint(&mut ed, area);
        assert!(ed.decorations().is_empty());
        ed.set_cursor_offset(4);
        let action = ed.input(InputEvent::Key(KeyEvent::new(KeyCode::Char('*'))));
        assert_eq!(action, EditorAction::Changed);
        assert_eq!(ed.decorations().len(), 1);
        let buf = paint(&mut ed, area);
        assert_eq!(row(&buf, 0), "a b");
    }

    #[test]
    fn caret_inside_stand_in_sits_inside_label() {
        let mut ed = editor("**ab** c");
        let area = Rect::new(0, 0, 20, 1);
        paint(&mut ed, area);
        ed.set_cursor_offset(3);
        assert_eq!(ed.cursor_pos(area), Some((1, 0)));
        ed.set_cursor_offset(0);
        assert_eq!(ed.cursor_pos(area), Some((0, 0)));
        ed.set_cursor_offset(7);
        assert_eq!(ed.cursor_pos(area), Some((3, 0)));
        ed.set_cursor_offset(8);
        assert_eq!(ed.cursor_pos(area), Some((4, 0)));
    }

    #[test]
    fn clicks_pass_through_stand_ins_to_raw_offsets() {
        let mut ed = editor("**ab** c");
        let area = Rect::new(0, 0, 20, 1);
        paint(&mut ed, area);
        assert_eq!(ed.input(click(1, 0)), EditorAction::Redraw);
        assert_eq!(ed.text_area().cursor_offset(), 3);
        ed.input(click(3, 0));
        assert_eq!(ed.text_area().cursor_offset(), 7);
        ed.input(click(15, 0));
        assert_eq!(ed.text_area().cursor_offset(), 8);
        assert_eq!(ed.text(), "**ab** c");
    }

    #[test]
    fn links_open_from_caret_or_ctrl_click() {
        let mut ed = editor("see [docs](https://x.io)");
        let area = Rect::new(0, 0, 30, 1);
        let buf = paint(&mut ed, area);
        assert_eq!(row(&buf, 0), "see docs");
        assert!(
            buf.cell((4, 0))
                .unwrap()
                .style()
                .add_modifier
                .contains(Modifier::UNDERLINED)
        );

        ed.set_cursor_offset(6);
        let open = InputEvent::Key(input::key_ctrl('o'));
        assert_eq!(
            ed.input(open.clone()),
            EditorAction::OpenLink("https://x.io".to_string())
        );
        ed.set_cursor_offset(1);
        assert_eq!(ed.input(open), EditorAction::None);

        let ctrl_click = InputEvent::Mouse(
            MouseEvent::new(5, 0, MouseEventKind::Down(MouseButton::Left))
                .with_modifiers(KeyModifiers::CTRL),
        );
        assert_eq!(
            ed.input(ctrl_click),
            EditorAction::OpenLink("https://x.io".to_string())
        );
        assert_eq!(ed.input(click(5, 0)), EditorAction::Redraw);
        assert_eq!(ed.link_at_cursor(), Some("https://x.io"));
    }

    #[test]
    fn unrenderable_spans_show_raw_text() {
        let mut ed = editor("[a](b c) **k**");
        let buf = paint(&mut ed, Rect::new(0, 0, 20, 1));
        assert_eq!(row(&buf, 0), "[a](b c) k");
    }

    #[test]
    fn scrolling_redecorates_the_new_window() {
        let text: Vec<String> = (0..10).map(|i| format!("**{i}**")).collect();
        let mut ed = editor(&text.join("\n"));
        let area = Rect::new(0, 0, 10, 2);
        paint(&mut ed, area);
        assert_eq!(ed.decorations().len(), 2);
        let generation = ed.controller().generation();

        let wheel = InputEvent::Mouse(MouseEvent::new(0, 0, MouseEventKind::ScrollDown));
        assert_eq!(ed.input(wheel), EditorAction::Redraw);
        assert_eq!(ed.controller().generation(), generation + 1);
        let starts: Vec<usize> = ed.decorations().set().iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![18, 24]);

        let buf = paint(&mut ed, area);
        assert_eq!(row(&buf, 0), "3");
        assert_eq!(row(&buf, 1), "4");
    }

    #[test]
    fn sideways_scroll_follows_the_decorated_row() {
        let mut ed = editor("**a** **b** **c** **d** xyz");
        let area = Rect::new(0, 0, 10, 1);
        paint(&mut ed, area);
        ed.set_cursor_offset(27);
        assert_eq!(ed.text_area().state.x, 2);
        let buf = paint(&mut ed, area);
        assert_eq!(row(&buf, 0), " b c d xyz");
        assert_eq!(ed.cursor_pos(area), Some((9, 0)));

        ed.input(InputEvent::Key(KeyEvent::new(KeyCode::Home)));
        let buf = paint(&mut ed, area);
        assert_eq!(row(&buf, 0), "a b c d xy");
        assert_eq!(ed.cursor_pos(area), Some((0, 0)));
    }

    #[test]
    fn clicks_on_a_scrolled_row_use_decorated_columns() {
        let mut ed = editor("**a** **b** **c** **d** xyz");
        let area = Rect::new(0, 0, 10, 1);
        paint(&mut ed, area);
        ed.set_cursor_offset(27);
        paint(&mut ed, area);
        // Screen column 0 shows decorated column 2, the `b` label.
        ed.input(click(0, 0));
        assert_eq!(ed.text_area().cursor_offset(), 8);
    }

    #[test]
    fn mark_mode_styles_raw_spans_in_place() {
        let mut ed = LiveMarkdownEditor::with_options(LiveMarkdownEditorOptions {
            decorations: DecorationOptions::default().with_mode(DecorationMode::Mark),
            text_area: TextAreaOptions {
                show_scrollbar: false,
                ..TextAreaOptions::default()
            },
            ..LiveMarkdownEditorOptions::default()
        });
        ed.set_text("Hello **world** [d](https://x.io)");
        let area = Rect::new(0, 0, 40, 1);
        let buf = paint(&mut ed, area);
        assert_eq!(row(&buf, 0), "Hello **world** [d](https://x.io)");
        let bold = |x: u16| {
            buf.cell((x, 0))
                .unwrap()
                .style()
                .add_modifier
                .contains(Modifier::BOLD)
        };
        assert!(!bold(5));
        assert!(bold(6));
        assert!(bold(14));
        assert!(!bold(15));
        assert!(
            buf.cell((16, 0))
                .unwrap()
                .style()
                .add_modifier
                .contains(Modifier::UNDERLINED)
        );

        ed.set_cursor_offset(8);
        assert_eq!(ed.cursor_pos(area), Some((8, 0)));
        ed.input(click(20, 0));
        assert_eq!(ed.text_area().cursor_offset(), 20);
        assert_eq!(
            ed.input(InputEvent::Key(input::key_ctrl('o'))),
            EditorAction::OpenLink("https://x.io".to_string())
        );
    }

    #[test]
    fn submit_clears_and_redecorates() {
        let mut ed = LiveMarkdownEditor::with_options(LiveMarkdownEditorOptions {
            text_area: TextAreaOptions {
                submit_rule: SubmitRule::EnterSubmitsShiftNewline,
                ..TextAreaOptions::default()
            },
            ..LiveMarkdownEditorOptions::default()
        });
        ed.set_text("**x**");
        paint(&mut ed, Rect::new(0, 0, 10, 1));
        assert_eq!(ed.decorations().len(), 1);
        let action = ed.input(InputEvent::Key(KeyEvent::new(KeyCode::Enter)));
        assert_eq!(action, EditorAction::Submitted("**x**".to_string()));
        assert!(ed.decorations().is_empty());
    }

    #[test]
    fn theme_changes_force_a_refresh() {
        let mut ed = editor("`c`");
        let area = Rect::new(0, 0, 10, 1);
        paint(&mut ed, area);
        let generation = ed.controller().generation();
        let theme = Theme {
            code_inline: ratatui::style::Style::default().add_modifier(Modifier::REVERSED),
            ..Theme::default()
        };
        ed.set_theme(theme);
        let buf = paint(&mut ed, area);
        assert_eq!(ed.controller().generation(), generation + 1);
        assert!(
            buf.cell((0, 0))
                .unwrap()
                .style()
                .add_modifier
                .contains(Modifier::REVERSED)
        );
    }
}
