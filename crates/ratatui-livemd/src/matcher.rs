//! Span matching: one recognizer per markup kind, all scanning the same window independently.
//!
//! Each recognizer reports, for every offset where its pattern can begin, the shortest match
//! starting there. A recognizer's candidates may therefore overlap each other (for example the
//! italic pattern matches both `*world*` inside `**world**` and `*, x *` after it); sorting that
//! out is the resolver's job. Nothing is retained between scans.

use std::sync::OnceLock;

use regex::Captures;
use regex::Regex;

use crate::decoration::Candidate;
use crate::decoration::MarkupKind;
use crate::window::TextWindow;

/// The closed set of recognizers, declared in tie-break priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Recognizer {
    Heading,
    Link,
    InlineCode,
    Strikethrough,
    Bold,
    Italic,
}

impl Recognizer {
    pub const ALL: [Recognizer; 6] = [
        Recognizer::Heading,
        Recognizer::Link,
        Recognizer::InlineCode,
        Recognizer::Strikethrough,
        Recognizer::Bold,
        Recognizer::Italic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Recognizer::Heading => "heading",
            Recognizer::Link => "link",
            Recognizer::InlineCode => "inline-code",
            Recognizer::Strikethrough => "strikethrough",
            Recognizer::Bold => "bold",
            Recognizer::Italic => "italic",
        }
    }

    /// All candidates this recognizer finds in `window`, ordered by start offset.
    pub fn scan(self, window: &TextWindow) -> Vec<Candidate> {
        let mut out = Vec::new();
        self.scan_into(window, &mut out);
        out
    }

    pub fn scan_into(self, window: &TextWindow, out: &mut Vec<Candidate>) {
        let text = window.text();
        let re = self.regex();
        let mut pos = 0usize;
        while pos < text.len() {
            let Some(caps) = re.captures_at(text, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            if let Some(candidate) = self.candidate(window, &caps) {
                out.push(candidate);
            }
            let step = text[whole.start()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            pos = whole.start() + step;
        }
    }

    fn candidate(self, window: &TextWindow, caps: &Captures<'_>) -> Option<Candidate> {
        let whole = caps.get(0)?;
        let inner = caps.get(1)?.as_str();
        let (kind, display_text) = match self {
            Recognizer::Heading => {
                let body = caps.get(2)?.as_str();
                (
                    MarkupKind::Heading {
                        level: inner.len() as u8,
                    },
                    body,
                )
            }
            Recognizer::Link => (
                MarkupKind::Link {
                    url: caps.get(2)?.as_str().to_string(),
                },
                inner,
            ),
            Recognizer::InlineCode => (MarkupKind::InlineCode, inner),
            Recognizer::Strikethrough => (MarkupKind::Strikethrough, inner),
            Recognizer::Bold => (MarkupKind::Bold, inner),
            Recognizer::Italic => (MarkupKind::Italic, inner),
        };
        Some(Candidate {
            start: window.start() + whole.start(),
            end: window.start() + whole.end(),
            kind,
            display_text: display_text.to_string(),
        })
    }

    fn regex(self) -> &'static Regex {
        match self {
            Recognizer::Heading => {
                static RE: OnceLock<Regex> = OnceLock::new();
                compiled(&RE, r"(?m)^(#{1,6})[\s&&[^\r\n]]+([^\r\n]*)")
            }
            Recognizer::Link => {
                static RE: OnceLock<Regex> = OnceLock::new();
                compiled(&RE, r"\[([^\]\r\n]+)\]\(([^)\r\n]+)\)")
            }
            Recognizer::InlineCode => {
                static RE: OnceLock<Regex> = OnceLock::new();
                compiled(&RE, r"`([^`\r\n]+)`")
            }
            Recognizer::Strikethrough => {
                static RE: OnceLock<Regex> = OnceLock::new();
                compiled(&RE, r"~~(.+?)~~")
            }
            Recognizer::Bold => {
                static RE: OnceLock<Regex> = OnceLock::new();
                compiled(&RE, r"\*\*(.+?)\*\*")
            }
            Recognizer::Italic => {
                static RE: OnceLock<Regex> = OnceLock::new();
                compiled(&RE, r"[*_]([^*_\r\n]+)[*_]")
            }
        }
    }
}

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("recognizer patterns are valid"))
}

/// Runs every recognizer in `recognizers` over `window` and concatenates the candidates.
///
/// The result is unordered across recognizers.
pub fn scan_window(window: &TextWindow, recognizers: &[Recognizer]) -> Vec<Candidate> {
    let mut out = Vec::new();
    for recognizer in recognizers {
        let before = out.len();
        recognizer.scan_into(window, &mut out);
        tracing::trace!(
            recognizer = recognizer.name(),
            candidates = out.len() - before,
            "matcher.scan"
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(recognizer: Recognizer, text: &str) -> Vec<(usize, usize, String)> {
        recognizer
            .scan(&TextWindow::whole(text))
            .into_iter()
            .map(|c| (c.start, c.end, c.display_text))
            .collect()
    }

    #[test]
    fn all_patterns_compile() {
        for r in Recognizer::ALL {
            let _ = r.regex();
        }
    }

    #[test]
    fn heading_requires_marker_whitespace_and_line_start() {
        let c = Recognizer::Heading.scan(&TextWindow::whole("## Title\ntext # no\n#nospace"));
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].kind, MarkupKind::Heading { level: 2 });
        assert_eq!((c[0].start, c[0].end), (0, 8));
        assert_eq!(c[0].display_text, "Title");
    }

    #[test]
    fn heading_levels_stop_at_six() {
        let c = Recognizer::Heading.scan(&TextWindow::whole("###### six\n####### seven"));
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].kind, MarkupKind::Heading { level: 6 });
    }

    #[test]
    fn heading_does_not_borrow_the_next_line() {
        assert!(Recognizer::Heading.scan(&TextWindow::whole("#\nnext")).is_empty());
        let c = Recognizer::Heading.scan(&TextWindow::whole("# \nnext"));
        assert_eq!(c.len(), 1);
        assert_eq!((c[0].start, c[0].end), (0, 2));
        assert_eq!(c[0].display_text, "");
    }

    #[test]
    fn headings_match_once_per_line() {
        let c = Recognizer::Heading.scan(&TextWindow::whole("# a\n\n### b # c"));
        let levels: Vec<_> = c.iter().map(|c| c.kind.clone()).collect();
        assert_eq!(
            levels,
            vec![
                MarkupKind::Heading { level: 1 },
                MarkupKind::Heading { level: 3 }
            ]
        );
        assert_eq!(c[1].display_text, "b # c");
    }

    #[test]
    fn bold_is_non_greedy_and_non_empty() {
        assert_eq!(
            spans(Recognizer::Bold, "**a** and **b**"),
            vec![
                (0, 5, "a".to_string()),
                (3, 12, " and ".to_string()),
                (10, 15, "b".to_string()),
            ]
        );
        assert!(spans(Recognizer::Bold, "****").is_empty());
        assert!(spans(Recognizer::Bold, "**").is_empty());
        assert!(spans(Recognizer::Bold, "**a\nb**").is_empty());
    }

    #[test]
    fn italic_reports_every_start() {
        assert_eq!(
            spans(Recognizer::Italic, "**w** *i*"),
            vec![
                (1, 4, "w".to_string()),
                (4, 7, " ".to_string()),
                (6, 9, "i".to_string()),
            ]
        );
        assert_eq!(spans(Recognizer::Italic, "_u_"), vec![(0, 3, "u".to_string())]);
        assert_eq!(spans(Recognizer::Italic, "*mixed_"), vec![(0, 7, "mixed".to_string())]);
    }

    #[test]
    fn inline_code_and_strike() {
        assert_eq!(
            spans(Recognizer::InlineCode, "a `x*y` b"),
            vec![(2, 7, "x*y".to_string())]
        );
        assert!(spans(Recognizer::InlineCode, "``").is_empty());
        assert_eq!(
            spans(Recognizer::Strikethrough, "~~old~~ new"),
            vec![(0, 7, "old".to_string())]
        );
    }

    #[test]
    fn link_keeps_url_as_metadata() {
        let c = Recognizer::Link.scan(&TextWindow::whole("see [docs](https://x.io)!"));
        assert_eq!(c.len(), 1);
        assert_eq!((c[0].start, c[0].end), (4, 24));
        assert_eq!(c[0].display_text, "docs");
        assert_eq!(c[0].kind.url(), Some("https://x.io"));
        assert!(Recognizer::Link.scan(&TextWindow::whole("[](x) [a]()")).is_empty());
    }

    #[test]
    fn offsets_are_absolute_and_utf8() {
        let w = TextWindow::at(100, "é **b**");
        let c = Recognizer::Bold.scan(&w);
        assert_eq!(c.len(), 1);
        assert_eq!((c[0].start, c[0].end), (103, 108));
        assert_eq!(w.slice(c[0].start, c[0].end), Some("**b**"));
    }

    #[test]
    fn scan_window_runs_only_enabled_recognizers() {
        let w = TextWindow::whole("**b** `c`");
        let all = scan_window(&w, &Recognizer::ALL);
        assert!(all.iter().any(|c| c.kind == MarkupKind::Bold));
        assert!(all.iter().any(|c| c.kind == MarkupKind::InlineCode));
        let only_code = scan_window(&w, &[Recognizer::InlineCode]);
        assert_eq!(only_code.len(), 1);
    }
}
