use std::collections::BTreeMap;

use kurbo::Vec2;

use crate::foundation::core::ElementId;
use crate::host::Host;
use crate::transform::matrix::TransformMatrix;

#[derive(Clone, Copy, Debug)]
struct MatrixPair {
    clean: TransformMatrix,
    altered: TransformMatrix,
}

/// Batches transform mutations so each element's attribute is written at most
/// once per frame.
///
/// Per element the coordinator tracks `clean`, the matrix as observed at
/// frame start (captured lazily on the first read), and `altered`, the matrix
/// scheduled for this frame. `altered` starts equal to `clean` and accumulates
/// translations from any number of independent callers; their effects compose
/// additively. Both snapshots are discarded in the post-write phase: the cache
/// is strictly frame-scoped and a value read in one frame must be re-queried
/// in the next.
#[derive(Debug, Default)]
pub(crate) struct TransformCoordinator {
    pairs: BTreeMap<ElementId, MatrixPair>,
}

impl TransformCoordinator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The element's transform as observed at frame start; immutable for the
    /// rest of the frame.
    pub(crate) fn clean<H: Host>(&mut self, host: &H, el: ElementId) -> TransformMatrix {
        self.pair(host, el).clean
    }

    /// The matrix that will be written this frame; defaults to clean.
    pub(crate) fn altered<H: Host>(&mut self, host: &H, el: ElementId) -> TransformMatrix {
        self.pair(host, el).altered
    }

    /// Schedule an additional translation for this frame.
    pub(crate) fn translate<H: Host>(&mut self, host: &H, el: ElementId, delta: Vec2) {
        let pair = self.pair(host, el);
        pair.altered = pair.altered.translated(delta);
    }

    /// How far the element has already been moved this frame, without
    /// re-reading host state. Zero for untouched elements.
    pub(crate) fn pending_translation(&self, el: ElementId) -> Vec2 {
        match self.pairs.get(&el) {
            Some(pair) => pair.altered.translation() - pair.clean.translation(),
            None => Vec2::ZERO,
        }
    }

    /// Write phase: set the transform attribute of every element whose
    /// altered matrix differs from its clean snapshot. Exactly one write per
    /// element, in element-id order.
    pub(crate) fn flush<H: Host>(&mut self, host: &mut H) {
        for (el, pair) in &self.pairs {
            if pair.altered != pair.clean {
                host.set_transform_attr(*el, &pair.altered.to_attr());
            }
        }
    }

    /// Post-write phase: drop all frame-scoped state.
    pub(crate) fn clear(&mut self) {
        self.pairs.clear();
    }

    fn pair<H: Host>(&mut self, host: &H, el: ElementId) -> &mut MatrixPair {
        self.pairs.entry(el).or_insert_with(|| {
            let clean = TransformMatrix::from_attr(host.transform_attr(el).as_deref());
            MatrixPair {
                clean,
                altered: clean,
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/coordinator.rs"]
mod tests;
