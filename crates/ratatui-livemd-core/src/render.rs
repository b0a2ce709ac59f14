use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;

use crate::viewport::ViewportState;

/// Columns a tab expands to when painted.
pub const TAB_WIDTH: usize = 4;

/// Display width of `ch` in terminal cells, with tabs expanded to [`TAB_WIDTH`].
pub fn char_cols(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(0)
    }
}

/// Display width of `s` in terminal cells, with tabs expanded.
pub fn str_cols(s: &str) -> usize {
    s.chars().map(char_cols).sum()
}

pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 {
        return;
    }
    if state.content_h <= state.viewport_h as u32 || state.content_h == 0 {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((state.viewport_h as f64 / state.content_h as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;

    let max_y = state
        .content_h
        .saturating_sub(state.viewport_h as u32)
        .max(1) as f64;
    let thumb_top = ((state.y as f64 / max_y) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            " "
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

/// Writes cells left to right, skipping the first `start_col` columns and stopping after
/// `max_cols` columns.
struct ClippedWriter<'a> {
    buf: &'a mut Buffer,
    x: u16,
    y: u16,
    start_col: usize,
    max_cols: usize,
    col: usize,
    out_cols: usize,
}

impl ClippedWriter<'_> {
    fn is_full(&self) -> bool {
        self.out_cols >= self.max_cols
    }

    /// Returns `false` once the writer is out of room.
    fn put(&mut self, ch: char, style: Style) -> bool {
        if ch == '\t' {
            for _ in 0..TAB_WIDTH {
                if !self.put_cell(" ", 1, style) {
                    return false;
                }
            }
            return true;
        }

        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            return true;
        }
        let mut tmp = [0u8; 4];
        let symbol = ch.encode_utf8(&mut tmp);
        self.put_cell(symbol, w, style)
    }

    fn put_cell(&mut self, symbol: &str, w: usize, style: Style) -> bool {
        // Glyphs that start before the horizontal scroll offset are dropped whole.
        if self.col < self.start_col {
            self.col += w;
            return true;
        }
        if self.out_cols + w > self.max_cols {
            return false;
        }
        let dx = self.out_cols as u16;
        if let Some(cell) = self.buf.cell_mut((self.x + dx, self.y)) {
            cell.set_style(style);
            cell.set_symbol(symbol);
        }
        for pad in 1..w {
            if let Some(cell) = self.buf.cell_mut((self.x + dx + pad as u16, self.y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
        }
        self.out_cols += w;
        self.col += w;
        true
    }
}

pub fn render_spans_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    spans: &[Span<'_>],
    fallback_style: Style,
) {
    if max_cols == 0 {
        return;
    }

    let mut writer = ClippedWriter {
        buf,
        x,
        y,
        start_col: start_col as usize,
        max_cols: max_cols as usize,
        col: 0,
        out_cols: 0,
    };

    for span in spans {
        let style = if span.style == Style::default() {
            fallback_style
        } else {
            fallback_style.patch(span.style)
        };
        for ch in span.content.chars() {
            if !writer.put(ch, style) || writer.is_full() {
                return;
            }
        }
    }
}
