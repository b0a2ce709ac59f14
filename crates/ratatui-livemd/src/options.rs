use crate::matcher::Recognizer;

/// How a host paints a published replacement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DecorationMode {
    /// The stand-in label is painted in place of the raw span; delimiters are hidden.
    #[default]
    Replace,
    /// The raw span stays as typed, delimiters included, and is painted with the class style.
    Mark,
}

/// Configuration for the decoration pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecorationOptions {
    /// Recognizers to run; order does not matter, priority is fixed per kind.
    pub recognizers: Vec<Recognizer>,
    /// Base for relative link targets.
    pub base_url: Option<String>,
    pub mode: DecorationMode,
}

impl Default for DecorationOptions {
    fn default() -> Self {
        Self {
            recognizers: Recognizer::ALL.to_vec(),
            base_url: None,
            mode: DecorationMode::default(),
        }
    }
}

impl DecorationOptions {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_recognizers(mut self, recognizers: impl IntoIterator<Item = Recognizer>) -> Self {
        self.recognizers = recognizers.into_iter().collect();
        self.recognizers.sort();
        self.recognizers.dedup();
        self
    }

    pub fn with_mode(mut self, mode: DecorationMode) -> Self {
        self.mode = mode;
        self
    }
}
