//! A multi-line, line-based editing surface.
//!
//! Besides row/column cursor movement, [`TextArea`] exposes the document as UTF-8 byte offsets
//! (`offset_of`, `set_cursor_offset`, `visible_window`) and a `revision` counter that increases
//! on every content change, so hosts can tell edits apart from pure scrolling.

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::render;
use crate::viewport::ViewportState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnterBehavior {
    Newline,
    Submit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitRule {
    #[default]
    Never,
    EnterSubmitsShiftNewline,
    ShiftEnterSubmitsEnterNewline,
}

#[derive(Clone, Debug)]
pub struct TextAreaOptions {
    pub show_scrollbar: bool,
    pub style: Style,
    pub scrollbar_style: Style,
    pub submit_rule: SubmitRule,
    /// Rows per mouse wheel notch.
    pub scroll_step: i32,
}

impl Default for TextAreaOptions {
    fn default() -> Self {
        Self {
            show_scrollbar: true,
            style: Style::default(),
            scrollbar_style: Style::default(),
            submit_rule: SubmitRule::default(),
            scroll_step: 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize, // char index within line
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextAreaAction {
    None,
    Changed,
    Submitted(String),
}

#[derive(Clone, Debug)]
pub struct TextArea {
    lines: Vec<String>,
    cursor: Cursor,
    preferred_x: Option<usize>, // display columns
    revision: u64,
    pub state: ViewportState,
    options: TextAreaOptions,
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl TextArea {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Cursor::default(),
            preferred_x: None,
            revision: 0,
            state: ViewportState::default(),
            options: TextAreaOptions::default(),
        }
    }

    pub fn with_options(options: TextAreaOptions) -> Self {
        Self {
            options,
            ..Self::new()
        }
    }

    pub fn options(&self) -> &TextAreaOptions {
        &self.options
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = normalize_newlines(&text.into());
        self.lines = text.split('\n').map(str::to_string).collect();
        self.cursor = Cursor::default();
        self.preferred_x = None;
        self.bump_revision();
        self.recompute_content_size();
        self.state.clamp();
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Monotonic counter bumped on every content change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Moves the cursor, clamping row and column to the document.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        let row = cursor.row.min(self.lines.len() - 1);
        let col = cursor.col.min(self.lines[row].chars().count());
        self.cursor = Cursor { row, col };
        self.preferred_x = None;
        self.ensure_cursor_visible();
    }

    /// Byte offset of the first byte of `row` in [`Self::text`].
    pub fn line_start(&self, row: usize) -> usize {
        self.lines
            .iter()
            .take(row.min(self.lines.len()))
            .map(|l| l.len() + 1)
            .sum()
    }

    /// Byte offset of `cursor` in [`Self::text`]. Out of range positions are clamped.
    pub fn offset_of(&self, cursor: Cursor) -> usize {
        let row = cursor.row.min(self.lines.len() - 1);
        self.line_start(row) + byte_index_from_char_index(&self.lines[row], cursor.col)
    }

    pub fn cursor_offset(&self) -> usize {
        self.offset_of(self.cursor)
    }

    /// Inverse of [`Self::offset_of`]. Offsets inside a multi-byte char snap to its start.
    pub fn cursor_at_offset(&self, offset: usize) -> Cursor {
        let mut start = 0usize;
        for (row, line) in self.lines.iter().enumerate() {
            let end = start + line.len();
            if offset <= end || row + 1 == self.lines.len() {
                let local = offset.saturating_sub(start).min(line.len());
                let col = line
                    .char_indices()
                    .take_while(|(b, _)| *b < local)
                    .count();
                let col = if line.is_char_boundary(local) {
                    col
                } else {
                    col.saturating_sub(1)
                };
                return Cursor { row, col };
            }
            start = end + 1;
        }
        Cursor::default()
    }

    pub fn set_cursor_offset(&mut self, offset: usize) {
        let cursor = self.cursor_at_offset(offset);
        self.set_cursor(cursor);
    }

    /// Byte range and text of the rows currently on screen.
    ///
    /// The range starts at the first visible row and ends after the last visible row's content
    /// (line terminators between visible rows are included, the trailing one is not).
    pub fn visible_window(&self) -> (Range<usize>, String) {
        let rows = self.state.visible_rows();
        let end_row = rows.end.min(self.lines.len());
        let start_row = rows.start.min(end_row);
        let start = self.line_start(start_row);
        if start_row == end_row {
            return (start..start, String::new());
        }
        let text = self.lines[start_row..end_row].join("\n");
        (start..start + text.len(), text)
    }

    /// Area left for text after reserving the scrollbar column.
    pub fn content_area(&self, area: Rect) -> Rect {
        if self.options.show_scrollbar && area.width >= 2 {
            Rect::new(area.x, area.y, area.width - 1, area.height)
        } else {
            area
        }
    }

    /// Lays out for `area`. The cursor is only pulled into view when the size changes, so
    /// wheel scrolling survives the next frame.
    pub fn set_viewport(&mut self, area: Rect) {
        let content_area = self.content_area(area);
        let resized = self.state.viewport_w != content_area.width
            || self.state.viewport_h != content_area.height;
        self.state
            .set_viewport(content_area.width, content_area.height);
        self.recompute_content_size();
        if resized {
            self.ensure_cursor_visible();
        }
    }

    /// Maps a screen cell to `(row, content column)`; the column includes horizontal scroll.
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<(usize, usize)> {
        let content_area = self.content_area(area);
        if x < content_area.x
            || y < content_area.y
            || x >= content_area.x.saturating_add(content_area.width)
            || y >= content_area.y.saturating_add(content_area.height)
        {
            return None;
        }
        let row = self.state.y as usize + (y - content_area.y) as usize;
        if row >= self.lines.len() {
            return Some((self.lines.len() - 1, usize::MAX));
        }
        let col = self.state.x as usize + (x - content_area.x) as usize;
        Some((row, col))
    }

    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        let x = self.cursor_display_x();
        self.screen_pos_for(area, self.cursor.row, x)
    }

    /// Screen cell for content position (`row`, display column `x`), if it is on screen.
    pub fn screen_pos_for(&self, area: Rect, row: usize, x: usize) -> Option<(u16, u16)> {
        if area.width == 0 || area.height == 0 {
            return None;
        }
        let content_area = self.content_area(area);
        let x = (x as u32).checked_sub(self.state.x)?;
        let y = (row as u32).checked_sub(self.state.y)?;
        if x >= content_area.width as u32 || y >= content_area.height as u32 {
            return None;
        }
        Some((content_area.x + x as u16, content_area.y + y as u16))
    }

    pub fn input(&mut self, event: InputEvent) -> TextAreaAction {
        match event {
            InputEvent::Paste(s) => {
                self.insert_str(&s);
                self.after_edit()
            }
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(m) => {
                self.handle_wheel(m);
                TextAreaAction::None
            }
        }
    }

    /// Moves the cursor to a clicked cell using raw (undecorated) column mapping.
    pub fn click(&mut self, area: Rect, x: u16, y: u16) -> bool {
        let Some((row, col)) = self.hit_test(area, x, y) else {
            return false;
        };
        let char_col = col_from_display_x(&self.lines[row], col);
        self.set_cursor(Cursor { row, col: char_col });
        true
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer) {
        let style = self.options.style;
        self.render_rows_ref(area, buf, |_, line| vec![Span::styled(line.to_string(), style)]);
    }

    /// Renders every visible row through `paint_row(row_index, raw_line)`.
    ///
    /// Hosts use this to splice decorations over the raw text without touching the buffer.
    pub fn render_rows_ref<F>(&mut self, area: Rect, buf: &mut Buffer, mut paint_row: F)
    where
        F: FnMut(usize, &str) -> Vec<Span<'static>>,
    {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.set_viewport(area);

        let content_area = self.content_area(area);
        for row in 0..content_area.height {
            let y = content_area.y + row;
            let idx = (self.state.y as usize).saturating_add(row as usize);
            buf.set_style(
                Rect::new(content_area.x, y, content_area.width, 1),
                self.options.style,
            );
            if let Some(line) = self.lines.get(idx) {
                let spans = paint_row(idx, line);
                render::render_spans_clipped(
                    content_area.x,
                    y,
                    self.state.x,
                    content_area.width,
                    buf,
                    &spans,
                    self.options.style,
                );
            }
        }

        if content_area.width < area.width {
            render::render_scrollbar(
                Rect::new(area.x + area.width - 1, area.y, 1, area.height),
                buf,
                &self.state,
                self.options.scrollbar_style,
            );
        }
    }

    fn handle_wheel(&mut self, m: MouseEvent) {
        let step = self.options.scroll_step;
        match m.kind {
            MouseEventKind::ScrollUp => self.state.scroll_y_by(-step),
            MouseEventKind::ScrollDown => self.state.scroll_y_by(step),
            _ => {}
        }
    }

    fn after_edit(&mut self) -> TextAreaAction {
        self.preferred_x = None;
        self.bump_revision();
        self.recompute_content_size();
        self.ensure_cursor_visible();
        TextAreaAction::Changed
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn handle_key(&mut self, key: KeyEvent) -> TextAreaAction {
        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.has_command() {
                    return TextAreaAction::None;
                }
                self.insert_char(c);
                self.after_edit()
            }
            KeyCode::Tab => {
                if key.modifiers.has_command() {
                    return TextAreaAction::None;
                }
                self.insert_char('\t');
                self.after_edit()
            }
            KeyCode::Enter => match self.enter_behavior(&key) {
                EnterBehavior::Newline => {
                    self.insert_newline();
                    self.after_edit()
                }
                EnterBehavior::Submit => {
                    let submitted = self.text();
                    self.set_text("");
                    TextAreaAction::Submitted(submitted)
                }
            },
            KeyCode::Backspace => {
                if self.backspace() {
                    self.after_edit()
                } else {
                    TextAreaAction::None
                }
            }
            KeyCode::Delete => {
                if self.delete() {
                    self.after_edit()
                } else {
                    TextAreaAction::None
                }
            }
            KeyCode::Left => {
                self.move_left();
                self.ensure_cursor_visible();
                TextAreaAction::None
            }
            KeyCode::Right => {
                self.move_right();
                self.ensure_cursor_visible();
                TextAreaAction::None
            }
            KeyCode::Up => {
                self.move_up();
                self.ensure_cursor_visible();
                TextAreaAction::None
            }
            KeyCode::Down => {
                self.move_down();
                self.ensure_cursor_visible();
                TextAreaAction::None
            }
            KeyCode::Home => {
                self.cursor.col = 0;
                self.preferred_x = Some(0);
                self.ensure_cursor_visible();
                TextAreaAction::None
            }
            KeyCode::End => {
                self.cursor.col = self.current_line_char_len();
                self.preferred_x = Some(self.cursor_display_x());
                self.ensure_cursor_visible();
                TextAreaAction::None
            }
            KeyCode::PageDown => {
                self.state.page_down();
                TextAreaAction::None
            }
            KeyCode::PageUp => {
                self.state.page_up();
                TextAreaAction::None
            }
            KeyCode::Esc => TextAreaAction::None,
        }
    }

    fn enter_behavior(&self, key: &KeyEvent) -> EnterBehavior {
        match self.options.submit_rule {
            SubmitRule::Never => EnterBehavior::Newline,
            SubmitRule::EnterSubmitsShiftNewline => {
                if key.modifiers.shift {
                    EnterBehavior::Newline
                } else {
                    EnterBehavior::Submit
                }
            }
            SubmitRule::ShiftEnterSubmitsEnterNewline => {
                if key.modifiers.shift {
                    EnterBehavior::Submit
                } else {
                    EnterBehavior::Newline
                }
            }
        }
    }

    fn recompute_content_size(&mut self) {
        let content_h = self.lines.len() as u32;
        let content_w = self
            .lines
            .iter()
            .map(|l| render::str_cols(l) as u32)
            .max()
            .unwrap_or(0);
        // One extra column so the cursor can sit after the last character.
        self.state.set_content(content_w.saturating_add(1), content_h);
    }

    fn ensure_cursor_visible(&mut self) {
        let cx = self.cursor_display_x() as u32;
        let cy = self.cursor.row.min(self.lines.len().saturating_sub(1)) as u32;
        if cy < self.state.y {
            self.state.y = cy;
        } else if cy >= self.state.y.saturating_add(self.state.viewport_h as u32) {
            self.state.y = cy.saturating_sub(self.state.viewport_h.saturating_sub(1) as u32);
        }

        if cx < self.state.x {
            self.state.x = cx;
        } else if cx >= self.state.x.saturating_add(self.state.viewport_w as u32) {
            self.state.x = cx.saturating_sub(self.state.viewport_w.saturating_sub(1) as u32);
        }

        self.state.clamp();
    }

    fn cursor_display_x(&self) -> usize {
        self.current_line()
            .chars()
            .take(self.cursor.col)
            .map(render::char_cols)
            .sum()
    }

    fn current_line(&self) -> &str {
        self.lines
            .get(self.cursor.row)
            .map(String::as_str)
            .unwrap_or("")
    }

    fn current_line_char_len(&self) -> usize {
        self.current_line().chars().count()
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.current_line_char_len();
        }
        self.preferred_x = Some(self.cursor_display_x());
    }

    fn move_right(&mut self) {
        let len = self.current_line_char_len();
        if self.cursor.col < len {
            self.cursor.col += 1;
        } else if self.cursor.row + 1 < self.lines.len() {
            self.cursor.row += 1;
            self.cursor.col = 0;
        }
        self.preferred_x = Some(self.cursor_display_x());
    }

    fn move_up(&mut self) {
        if self.cursor.row == 0 {
            return;
        }
        let target_x = self.preferred_x.unwrap_or_else(|| self.cursor_display_x());
        self.cursor.row -= 1;
        self.cursor.col = col_from_display_x(self.current_line(), target_x);
        self.preferred_x = Some(target_x);
    }

    fn move_down(&mut self) {
        if self.cursor.row + 1 >= self.lines.len() {
            return;
        }
        let target_x = self.preferred_x.unwrap_or_else(|| self.cursor_display_x());
        self.cursor.row += 1;
        self.cursor.col = col_from_display_x(self.current_line(), target_x);
        self.preferred_x = Some(target_x);
    }

    fn insert_char(&mut self, ch: char) {
        let row = self.cursor.row.min(self.lines.len() - 1);
        let line = &mut self.lines[row];
        let byte_idx = byte_index_from_char_index(line, self.cursor.col);
        line.insert(byte_idx, ch);
        self.cursor.row = row;
        self.cursor.col += 1;
    }

    fn insert_newline(&mut self) {
        let row = self.cursor.row.min(self.lines.len() - 1);
        let line = &mut self.lines[row];
        let byte_idx = byte_index_from_char_index(line, self.cursor.col);
        let tail = line.split_off(byte_idx);
        self.lines.insert(row + 1, tail);
        self.cursor.row = row + 1;
        self.cursor.col = 0;
    }

    fn insert_str(&mut self, s: &str) {
        let s = normalize_newlines(s);
        let mut parts = s.split('\n');
        let Some(first) = parts.next() else {
            return;
        };
        let rest: Vec<&str> = parts.collect();
        if rest.is_empty() {
            for ch in first.chars() {
                self.insert_char(ch);
            }
            return;
        }

        let row = self.cursor.row.min(self.lines.len() - 1);
        let byte_idx = byte_index_from_char_index(&self.lines[row], self.cursor.col);
        let tail = self.lines[row].split_off(byte_idx);
        self.lines[row].push_str(first);

        let mut insert_at = row + 1;
        for mid in &rest[..rest.len() - 1] {
            self.lines.insert(insert_at, (*mid).to_string());
            insert_at += 1;
        }

        let last = rest[rest.len() - 1];
        self.lines.insert(insert_at, format!("{last}{tail}"));

        self.cursor.row = insert_at;
        self.cursor.col = last.chars().count();
    }

    fn backspace(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.cursor.col > 0 {
            let row = self.cursor.row.min(self.lines.len() - 1);
            let line = &mut self.lines[row];
            let start = byte_index_from_char_index(line, self.cursor.col - 1);
            let end = byte_index_from_char_index(line, self.cursor.col);
            line.replace_range(start..end, "");
            self.cursor.row = row;
            self.cursor.col -= 1;
            return true;
        }
        if self.cursor.row > 0 {
            let cur = self.lines.remove(self.cursor.row);
            self.cursor.row -= 1;
            let prev = &mut self.lines[self.cursor.row];
            self.cursor.col = prev.chars().count();
            prev.push_str(&cur);
            return true;
        }
        false
    }

    fn delete(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let row = self.cursor.row.min(self.lines.len() - 1);
        let line_len = self.lines[row].chars().count();
        if self.cursor.col < line_len {
            let line = &mut self.lines[row];
            let start = byte_index_from_char_index(line, self.cursor.col);
            let end = byte_index_from_char_index(line, self.cursor.col + 1);
            line.replace_range(start..end, "");
            return true;
        }
        if row + 1 < self.lines.len() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
            return true;
        }
        false
    }
}

/// Char index in `line` whose display column is closest to (but not past) `target_x`.
pub fn col_from_display_x(line: &str, target_x: usize) -> usize {
    let mut cols = 0usize;
    let mut col = 0usize;
    for ch in line.chars() {
        let w = render::char_cols(ch);
        if cols + w > target_x {
            break;
        }
        cols += w;
        col += 1;
    }
    col
}

fn byte_index_from_char_index(s: &str, char_idx: usize) -> usize {
    match s.char_indices().nth(char_idx) {
        Some((i, _)) => i,
        None => s.len(),
    }
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}
