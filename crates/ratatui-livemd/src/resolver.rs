//! Overlap resolution for candidates coming from independent recognizers.

use std::cmp::Reverse;

use crate::decoration::Candidate;
use crate::decoration::DecorationSet;
use crate::decoration::Replacement;
use crate::error::DecorationError;
use crate::window::TextWindow;

/// Turns an unordered bag of candidates into a sorted, non-overlapping [`DecorationSet`].
///
/// Candidates are ordered by start offset, then longer span first, then
/// [`crate::decoration::MarkupKind::priority`]. A left-to-right sweep accepts a candidate only
/// if it starts at or after the end of the previously accepted one, so the earliest start wins
/// and ties go to the longer span, then to the higher-priority kind. Adjacent spans are both kept.
///
/// Any candidate outside `window` fails the whole resolution; zero-length candidates are dropped.
pub fn resolve(
    window: &TextWindow,
    mut candidates: Vec<Candidate>,
) -> Result<DecorationSet, DecorationError> {
    if let Some(bad) = candidates
        .iter()
        .find(|c| !window.contains_span(c.start, c.end))
    {
        return Err(DecorationError::OutOfBoundsCandidate {
            kind: bad.kind.clone(),
            start: bad.start,
            end: bad.end,
            window_start: window.start(),
            window_end: window.end(),
        });
    }

    candidates.retain(|c| !c.is_empty());
    candidates.sort_by_key(|c| (c.start, Reverse(c.len()), c.kind.priority()));

    let mut cursor = window.start();
    let mut accepted = Vec::new();
    for candidate in candidates {
        if candidate.start < cursor {
            continue;
        }
        cursor = candidate.end;
        accepted.push(Replacement::from(candidate));
    }
    Ok(DecorationSet::new(accepted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoration::MarkupKind;

    fn cand(start: usize, end: usize, kind: MarkupKind) -> Candidate {
        Candidate {
            start,
            end,
            kind,
            display_text: String::new(),
        }
    }

    fn ranges(set: &DecorationSet) -> Vec<(usize, usize)> {
        set.iter().map(|r| (r.start, r.end)).collect()
    }

    #[test]
    fn earlier_start_wins_over_later_overlap() {
        let w = TextWindow::whole("0123456789");
        let set = resolve(
            &w,
            vec![
                cand(2, 6, MarkupKind::Italic),
                cand(0, 4, MarkupKind::Bold),
                cand(4, 8, MarkupKind::InlineCode),
            ],
        )
        .unwrap();
        assert_eq!(ranges(&set), vec![(0, 4), (4, 8)]);
    }

    #[test]
    fn same_start_prefers_longer_then_priority() {
        let w = TextWindow::whole("0123456789");
        let set = resolve(
            &w,
            vec![
                cand(1, 3, MarkupKind::Heading { level: 1 }),
                cand(1, 5, MarkupKind::Italic),
            ],
        )
        .unwrap();
        assert_eq!(set.replacements()[0].kind, MarkupKind::Italic);

        let set = resolve(
            &w,
            vec![
                cand(1, 5, MarkupKind::Italic),
                cand(1, 5, MarkupKind::Strikethrough),
                cand(1, 5, MarkupKind::Bold),
            ],
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.replacements()[0].kind, MarkupKind::Strikethrough);
    }

    #[test]
    fn zero_length_candidates_are_dropped() {
        let w = TextWindow::whole("abc");
        let set = resolve(&w, vec![cand(1, 1, MarkupKind::Bold)]).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn out_of_window_candidate_fails_the_refresh() {
        let w = TextWindow::at(10, "abcdef");
        let err = resolve(
            &w,
            vec![cand(10, 12, MarkupKind::Bold), cand(14, 17, MarkupKind::Italic)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DecorationError::OutOfBoundsCandidate {
                kind: MarkupKind::Italic,
                start: 14,
                end: 17,
                window_start: 10,
                window_end: 16,
            }
        );
        assert!(resolve(&w, vec![cand(8, 11, MarkupKind::Bold)]).is_err());
        assert!(resolve(&w, vec![cand(12, 11, MarkupKind::Bold)]).is_err());
    }

    #[test]
    fn sweep_starts_at_window_start() {
        let w = TextWindow::at(5, "abcdef");
        let set = resolve(&w, vec![cand(5, 11, MarkupKind::Bold)]).unwrap();
        assert_eq!(ranges(&set), vec![(5, 11)]);
    }
}
