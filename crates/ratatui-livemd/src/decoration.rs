//! Data model shared by the matcher, resolver, renderer and hosts.

use std::ops::Range;

use crate::widget::Widget;

/// The markup a span was recognized as.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkupKind {
    Heading { level: u8 },
    Bold,
    Italic,
    InlineCode,
    Strikethrough,
    /// `url` is only used as the activation target of the rendered label, never shown as text.
    Link { url: String },
}

impl MarkupKind {
    /// Tie-break rank among candidates with the same start and length; lower wins.
    pub fn priority(&self) -> u8 {
        match self {
            MarkupKind::Heading { .. } => 0,
            MarkupKind::Link { .. } => 1,
            MarkupKind::InlineCode => 2,
            MarkupKind::Strikethrough => 3,
            MarkupKind::Bold => 4,
            MarkupKind::Italic => 5,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            MarkupKind::Link { url } => Some(url),
            _ => None,
        }
    }
}

/// An unresolved match, before overlap adjudication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub start: usize,
    pub end: usize,
    pub kind: MarkupKind,
    pub display_text: String,
}

impl Candidate {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A candidate that survived resolution and will be rendered as a stand-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replacement {
    pub start: usize,
    pub end: usize,
    pub kind: MarkupKind,
    pub display_text: String,
}

impl Replacement {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Absolute range of the raw source that shows up as `display_text`.
    ///
    /// Headings run to the end of the span; every other kind opens with a fixed-width delimiter.
    pub fn label_range(&self) -> Range<usize> {
        let len = self.display_text.len();
        let start = match self.kind {
            MarkupKind::Heading { .. } => self.end.saturating_sub(len),
            MarkupKind::Link { .. } | MarkupKind::InlineCode | MarkupKind::Italic => self.start + 1,
            MarkupKind::Bold | MarkupKind::Strikethrough => self.start + 2,
        };
        let start = start.clamp(self.start, self.end);
        start..(start + len).min(self.end)
    }
}

impl From<Candidate> for Replacement {
    fn from(c: Candidate) -> Self {
        Self {
            start: c.start,
            end: c.end,
            kind: c.kind,
            display_text: c.display_text,
        }
    }
}

/// Sorted, pairwise non-overlapping replacements for one refresh.
///
/// Only the resolver builds these, which is what guarantees the ordering invariant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecorationSet {
    generation: u64,
    replacements: Vec<Replacement>,
}

impl DecorationSet {
    pub(crate) fn new(replacements: Vec<Replacement>) -> Self {
        Self {
            generation: 0,
            replacements,
        }
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Refresh number that produced this set; zero for sets built outside a controller.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn replacements(&self) -> &[Replacement] {
        &self.replacements
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Replacement> {
        self.replacements.iter()
    }

    /// Replacements intersecting the absolute byte range `range`.
    pub fn overlapping(&self, range: Range<usize>) -> &[Replacement] {
        let lo = self.replacements.partition_point(|r| r.end <= range.start);
        let hi = self.replacements.partition_point(|r| r.start < range.end);
        &self.replacements[lo..hi.max(lo)]
    }

    /// The replacement covering `offset`, if any.
    pub fn at(&self, offset: usize) -> Option<&Replacement> {
        let idx = self.replacements.partition_point(|r| r.end <= offset);
        self.replacements.get(idx).filter(|r| r.contains(offset))
    }
}

/// What a host receives: a decoration set plus the stand-in for each of its replacements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublishedDecorations {
    set: DecorationSet,
    widgets: Vec<Widget>,
}

impl PublishedDecorations {
    pub(crate) fn new(set: DecorationSet, widgets: Vec<Widget>) -> Self {
        debug_assert_eq!(set.len(), widgets.len());
        Self { set, widgets }
    }

    pub fn set(&self) -> &DecorationSet {
        &self.set
    }

    pub fn generation(&self) -> u64 {
        self.set.generation()
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Replacement, &Widget)> {
        self.set.iter().zip(self.widgets.iter())
    }

    /// Decorations intersecting the absolute byte range `range`, in order.
    pub fn overlapping(
        &self,
        range: Range<usize>,
    ) -> impl Iterator<Item = (&Replacement, &Widget)> {
        let lo = self
            .set
            .replacements
            .partition_point(|r| r.end <= range.start);
        let hi = self
            .set
            .replacements
            .partition_point(|r| r.start < range.end)
            .max(lo);
        self.set.replacements[lo..hi]
            .iter()
            .zip(self.widgets[lo..hi].iter())
    }

    /// The decoration covering `offset`, if any.
    pub fn at(&self, offset: usize) -> Option<(&Replacement, &Widget)> {
        let idx = self.set.replacements.partition_point(|r| r.end <= offset);
        let r = self.set.replacements.get(idx)?;
        if !r.contains(offset) {
            return None;
        }
        self.widgets.get(idx).map(|w| (r, w))
    }
}
