//! The refresh pipeline and the controller hosts notify on change.

use ratatui_livemd_core::theme::Theme;

use crate::decoration::Candidate;
use crate::decoration::DecorationSet;
use crate::decoration::PublishedDecorations;
use crate::error::DecorationError;
use crate::matcher;
use crate::matcher::Recognizer;
use crate::options::DecorationOptions;
use crate::resolver;
use crate::widget::WidgetRenderer;
use crate::window::TextWindow;

/// The editing surface a [`RefreshController`] decorates.
///
/// The host owns the document. The controller only reads the visible window and hands back a
/// complete replacement for whatever it published last.
pub trait HostSurface {
    fn visible_window(&self) -> TextWindow;
    fn publish(&mut self, decorations: PublishedDecorations);
}

/// Matcher, resolver and renderer bundled as a pure function of a window.
#[derive(Clone, Debug)]
pub struct Decorator {
    recognizers: Vec<Recognizer>,
    renderer: WidgetRenderer,
}

impl Default for Decorator {
    fn default() -> Self {
        Self::new(&DecorationOptions::default(), Theme::default())
    }
}

impl Decorator {
    pub fn new(options: &DecorationOptions, theme: Theme) -> Self {
        Self {
            recognizers: options.recognizers.clone(),
            renderer: WidgetRenderer::new(theme).with_base_url(options.base_url.clone()),
        }
    }

    pub fn recognizers(&self) -> &[Recognizer] {
        &self.recognizers
    }

    pub fn renderer(&self) -> &WidgetRenderer {
        &self.renderer
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.renderer.set_theme(theme);
    }

    pub fn scan(&self, window: &TextWindow) -> Vec<Candidate> {
        matcher::scan_window(window, &self.recognizers)
    }

    /// Scan and resolve, without rendering.
    pub fn resolve(&self, window: &TextWindow) -> Result<DecorationSet, DecorationError> {
        resolver::resolve(window, self.scan(window))
    }

    pub fn decorate(&self, window: &TextWindow) -> Result<PublishedDecorations, DecorationError> {
        self.decorate_candidates(window, self.scan(window), 0)
    }

    fn decorate_candidates(
        &self,
        window: &TextWindow,
        candidates: Vec<Candidate>,
        generation: u64,
    ) -> Result<PublishedDecorations, DecorationError> {
        let set = resolver::resolve(window, candidates)?.with_generation(generation);
        let widgets = self.renderer.render_set(&set, window);
        Ok(PublishedDecorations::new(set, widgets))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RefreshTrigger {
    DocumentChanged,
    ViewportChanged,
}

/// Summary of one successful refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub generation: u64,
    pub trigger: RefreshTrigger,
    pub replacements: usize,
    /// Replacements that were published as raw text because they could not be rendered.
    pub fallbacks: usize,
}

/// Recomputes decorations whenever the host reports a document or viewport change.
///
/// Every refresh is a full rebuild of the visible window. A refresh that fails publishes
/// nothing, so the host keeps showing the previous generation.
#[derive(Clone, Debug, Default)]
pub struct RefreshController {
    decorator: Decorator,
    generation: u64,
    refreshes: u64,
    failures: u64,
}

impl RefreshController {
    pub fn new(options: &DecorationOptions, theme: Theme) -> Self {
        Self {
            decorator: Decorator::new(options, theme),
            ..Self::default()
        }
    }

    pub fn decorator(&self) -> &Decorator {
        &self.decorator
    }

    pub fn decorator_mut(&mut self) -> &mut Decorator {
        &mut self.decorator
    }

    /// Generation of the most recent publication; zero before the first one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Refreshes attempted, successful or not.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    pub fn failure_count(&self) -> u64 {
        self.failures
    }

    pub fn on_document_changed<H: HostSurface + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<RefreshOutcome, DecorationError> {
        self.refresh(host, RefreshTrigger::DocumentChanged)
    }

    pub fn on_viewport_changed<H: HostSurface + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<RefreshOutcome, DecorationError> {
        self.refresh(host, RefreshTrigger::ViewportChanged)
    }

    fn refresh<H: HostSurface + ?Sized>(
        &mut self,
        host: &mut H,
        trigger: RefreshTrigger,
    ) -> Result<RefreshOutcome, DecorationError> {
        let window = host.visible_window();
        let candidates = self.decorator.scan(&window);
        self.publish_candidates(host, trigger, &window, candidates)
    }

    fn publish_candidates<H: HostSurface + ?Sized>(
        &mut self,
        host: &mut H,
        trigger: RefreshTrigger,
        window: &TextWindow,
        candidates: Vec<Candidate>,
    ) -> Result<RefreshOutcome, DecorationError> {
        self.refreshes += 1;
        let candidate_count = candidates.len();
        let published =
            match self
                .decorator
                .decorate_candidates(window, candidates, self.generation + 1)
            {
                Ok(published) => published,
                Err(err) => {
                    self.failures += 1;
                    tracing::warn!(
                        ?trigger,
                        window_start = window.start(),
                        window_end = window.end(),
                        error = %err,
                        "refresh.rejected"
                    );
                    return Err(err);
                }
            };

        self.generation = published.generation();
        let outcome = RefreshOutcome {
            generation: self.generation,
            trigger,
            replacements: published.len(),
            fallbacks: published.widgets().iter().filter(|w| w.is_fallback()).count(),
        };
        tracing::trace!(
            generation = outcome.generation,
            ?trigger,
            window_start = window.start(),
            window_end = window.end(),
            candidates = candidate_count,
            replacements = outcome.replacements,
            fallbacks = outcome.fallbacks,
            "refresh.published"
        );
        host.publish(published);
        Ok(outcome)
    }
}
