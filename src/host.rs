use std::collections::{BTreeMap, BTreeSet};

use kurbo::Rect;

use crate::foundation::core::ElementId;
use crate::transform::matrix::TransformMatrix;

/// Environment access used by the engine.
///
/// Geometry follows the DOM contract: [`Host::bounds`] reports the visible
/// box *including* transforms already written, while [`Host::offset_width`]
/// is the layout width and ignores transforms. The engine calls the mutating
/// methods only during the write phase of a tick.
pub trait Host {
    /// Current transform attribute of `el`, `None` when unset.
    fn transform_attr(&self, el: ElementId) -> Option<String>;

    /// Write the transform attribute of `el`.
    fn set_transform_attr(&mut self, el: ElementId, value: &str);

    /// Visible bounding box of `el`.
    fn bounds(&self, el: ElementId) -> Rect;

    /// Layout width of `el`.
    fn offset_width(&self, el: ElementId) -> f64;

    /// Add a class to `el`'s class list.
    fn add_class(&mut self, el: ElementId, class: &str);

    /// Remove a class from `el`'s class list.
    fn remove_class(&mut self, el: ElementId, class: &str);

    /// Set a plain attribute on `el`.
    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str);
}

#[derive(Clone, Debug)]
struct MemoryElement {
    base: Rect,
    transform: Option<String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
}

/// In-memory [`Host`] for tests and embedder bring-up.
///
/// Elements are axis-aligned boxes; [`Host::bounds`] translates the base box
/// by the parsed transform attribute, mirroring how a browser reports
/// `getBoundingClientRect` once a transform has been applied. Every transform
/// write is appended to [`MemoryHost::write_log`], which is what the
/// write-coalescing assertions in the test suite are built on.
#[derive(Debug, Default)]
pub struct MemoryHost {
    elements: BTreeMap<ElementId, MemoryElement>,
    write_log: Vec<(ElementId, String)>,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element with its untransformed box.
    pub fn insert(&mut self, el: ElementId, base: Rect) {
        self.elements.insert(
            el,
            MemoryElement {
                base,
                transform: None,
                classes: BTreeSet::new(),
                attributes: BTreeMap::new(),
            },
        );
    }

    /// Move an element's untransformed box, as a layout change would.
    pub fn set_base(&mut self, el: ElementId, base: Rect) {
        if let Some(elem) = self.elements.get_mut(&el) {
            elem.base = base;
        }
    }

    /// Transform writes performed so far, in order.
    pub fn write_log(&self) -> &[(ElementId, String)] {
        &self.write_log
    }

    /// Number of transform writes performed on `el` so far.
    pub fn write_count(&self, el: ElementId) -> usize {
        self.write_log.iter().filter(|(id, _)| *id == el).count()
    }

    /// Forget the write log, keeping element state.
    pub fn clear_write_log(&mut self) {
        self.write_log.clear();
    }

    /// Whether `el` currently carries `class`.
    pub fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.elements
            .get(&el)
            .is_some_and(|e| e.classes.contains(class))
    }

    /// Attribute value on `el`, if set.
    pub fn attribute(&self, el: ElementId, name: &str) -> Option<&str> {
        self.elements
            .get(&el)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    /// Visible center x of `el`, convenience for assertions.
    pub fn center_x(&self, el: ElementId) -> f64 {
        self.bounds(el).center().x
    }
}

impl Host for MemoryHost {
    fn transform_attr(&self, el: ElementId) -> Option<String> {
        self.elements.get(&el).and_then(|e| e.transform.clone())
    }

    fn set_transform_attr(&mut self, el: ElementId, value: &str) {
        if let Some(elem) = self.elements.get_mut(&el) {
            elem.transform = Some(value.to_owned());
        }
        self.write_log.push((el, value.to_owned()));
    }

    fn bounds(&self, el: ElementId) -> Rect {
        let Some(elem) = self.elements.get(&el) else {
            return Rect::ZERO;
        };
        let t = TransformMatrix::from_attr(elem.transform.as_deref()).translation();
        elem.base + t
    }

    fn offset_width(&self, el: ElementId) -> f64 {
        self.elements.get(&el).map_or(0.0, |e| e.base.width())
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        if let Some(elem) = self.elements.get_mut(&el) {
            elem.classes.insert(class.to_owned());
        }
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        if let Some(elem) = self.elements.get_mut(&el) {
            elem.classes.remove(class);
        }
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        if let Some(elem) = self.elements.get_mut(&el) {
            elem.attributes.insert(name.to_owned(), value.to_owned());
        }
    }
}
