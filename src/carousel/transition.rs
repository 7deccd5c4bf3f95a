use crate::animation::ease::Ease;
use crate::carousel::TransitionMode;
use crate::carousel::physical::PhysicalSlide;

/// Slide transition strategy, dispatched by exhaustive match.
#[derive(Debug)]
pub(crate) enum Transition {
    /// Class/attribute updates only.
    Classes(ClassSlide),
    /// Physical translation of the slide strip.
    Physical(PhysicalSlide),
}

impl Transition {
    pub(crate) fn from_mode(mode: TransitionMode, duration_ms: f64, ease: Ease) -> Self {
        match mode {
            TransitionMode::Classes => Self::Classes(ClassSlide::new()),
            TransitionMode::Physical => Self::Physical(PhysicalSlide::new(duration_ms, ease)),
        }
    }
}

/// The geometry-free strategy: the active index is whatever was last
/// requested, effective immediately; only class and attribute state changes.
#[derive(Debug, Default)]
pub(crate) struct ClassSlide {
    index: usize,
}

impl ClassSlide {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}
