//! Layout reconstruction options.

/// Options for reconstructing a document.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// What to reconstruct
    pub mode: LayoutMode,

    /// Whether to extract embedded raster images
    pub extract_images: bool,

    /// Whether to run font-size heading detection
    pub smart_headings: bool,

    /// Whether to bind annotations to paragraphs as comments
    pub extract_comments: bool,

    /// Error handling mode for unreadable pages
    pub error_mode: ErrorMode,

    /// Whether to process pages in parallel
    pub parallel: bool,

    /// Whether to normalize paragraph text (NFC, ligatures, hyphenation)
    pub normalize_text: bool,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.extract_images = extract;
        self
    }

    /// Enable or disable heading detection.
    pub fn with_smart_headings(mut self, enabled: bool) -> Self {
        self.smart_headings = enabled;
        self
    }

    /// Enable or disable comment extraction.
    pub fn with_comments(mut self, extract: bool) -> Self {
        self.extract_comments = extract;
        self
    }

    /// Set the layout mode.
    pub fn with_mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }

    /// Reconstruct images only, without text.
    pub fn images_only(mut self) -> Self {
        self.mode = LayoutMode::ImagesOnly;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip unreadable pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable text normalization.
    pub fn with_text_normalization(mut self, enabled: bool) -> Self {
        self.normalize_text = enabled;
        self
    }

    /// Whether text runs are analyzed at all.
    pub fn extracts_text(&self) -> bool {
        self.mode == LayoutMode::Reflow
    }

    /// Whether the document-wide font histogram is needed.
    pub fn needs_font_statistics(&self) -> bool {
        self.extracts_text() && self.smart_headings
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Reflow,
            extract_images: true,
            smart_headings: true,
            extract_comments: false,
            error_mode: ErrorMode::Strict,
            parallel: true,
            normalize_text: true,
        }
    }
}

/// What the engine reconstructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Full reconstruction: text structure and images
    #[default]
    Reflow,
    /// Images only; glyph runs and annotations are ignored
    ImagesOnly,
}

/// Error handling mode for page-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first unreadable page
    #[default]
    Strict,
    /// Skip unreadable pages and continue
    Lenient,
}
