//! Shows exactly one of a fixed set of sections.

use web_sys::Element;

use crate::dom_utils;

/// Index bookkeeping, kept apart from the DOM so it can be unit tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionCursor {
    len: usize,
    current: usize,
}

impl SectionCursor {
    pub fn new(len: usize) -> Self {
        Self { len, current: 0 }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Jump to `index`.  Out-of-range indices are rejected.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.current = index;
        true
    }

    pub fn cycle(&mut self, places: usize) {
        if self.len == 0 {
            return;
        }
        self.current = (self.current + places % self.len) % self.len;
    }

    pub fn is_visible(&self, index: usize) -> bool {
        index == self.current
    }
}

pub struct VisibilityController {
    sections: Vec<Element>,
    cursor: SectionCursor,
}

impl VisibilityController {
    /// Takes ownership of the sections and immediately shows the first one.
    pub fn new(sections: Vec<Element>) -> Self {
        let controller = Self {
            cursor: SectionCursor::new(sections.len()),
            sections,
        };
        controller.apply();
        controller
    }

    pub fn current(&self) -> usize {
        self.cursor.current()
    }

    pub fn select(&mut self, index: usize) -> bool {
        let changed = self.cursor.select(index);
        if changed {
            self.apply();
        }
        changed
    }

    pub fn cycle(&mut self, places: usize) {
        self.cursor.cycle(places);
        self.apply();
    }

    fn apply(&self) {
        for (index, section) in self.sections.iter().enumerate() {
            if self.cursor.is_visible(index) {
                dom_utils::show(section);
            } else {
                dom_utils::hide(section);
            }
        }
    }
}
