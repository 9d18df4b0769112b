//! Lightbox state
//!
//! The overlay fades/zooms in shortly after it is shown and is hidden a
//! fixed time after the zoom-out starts. Each transition gets a generation
//! number; a timer that fires for an older generation is ignored, so a
//! quick close-then-open never hides the fresh image.

/// Delay between showing the overlay and zooming the image in
pub const OPEN_DELAY_MS: u32 = 10;
/// Delay between starting the zoom-out and hiding the overlay
pub const CLOSE_DELAY_MS: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LightboxPhase {
    #[default]
    Hidden,
    Opening(String),
    Open(String),
    Closing(String),
}

/// A timer the page must run, then report back via `settle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightboxStep {
    pub generation: u64,
    pub delay_ms: u32,
}

/// What a settled timer asks the page to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    ZoomIn,
    Hide,
}

#[derive(Debug, Default)]
pub struct Lightbox {
    phase: LightboxPhase,
    generation: u64,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &LightboxPhase {
        &self.phase
    }

    /// Show an image (replacing whatever was shown)
    pub fn open(&mut self, src: impl Into<String>) -> LightboxStep {
        self.phase = LightboxPhase::Opening(src.into());
        self.next_step(OPEN_DELAY_MS)
    }

    /// Start closing; `None` when nothing is shown or already closing
    pub fn close(&mut self) -> Option<LightboxStep> {
        match std::mem::take(&mut self.phase) {
            LightboxPhase::Opening(src) | LightboxPhase::Open(src) => {
                self.phase = LightboxPhase::Closing(src);
                Some(self.next_step(CLOSE_DELAY_MS))
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// A timer fired; returns what the page should do, if anything
    pub fn settle(&mut self, generation: u64) -> Option<Settled> {
        if generation != self.generation {
            return None;
        }
        match std::mem::take(&mut self.phase) {
            LightboxPhase::Opening(src) => {
                self.phase = LightboxPhase::Open(src);
                Some(Settled::ZoomIn)
            }
            LightboxPhase::Closing(_) => Some(Settled::Hide),
            other => {
                self.phase = other;
                None
            }
        }
    }

    fn next_step(&mut self, delay_ms: u32) -> LightboxStep {
        self.generation += 1;
        LightboxStep {
            generation: self.generation,
            delay_ms,
        }
    }
}
