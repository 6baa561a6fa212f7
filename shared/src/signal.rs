use std::{cell::Cell, rc::Rc};

/// A single-value, latest-wins cell shared between one writer and one reader.
/// Publishing overwrites; reading never consumes. Nothing is queued.
#[derive(Debug)]
pub struct Slot<T: Copy> {
    value: Rc<Cell<Option<T>>>,
}

impl<T: Copy> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Slot {
            value: self.value.clone(),
        }
    }
}

impl<T: Copy> Default for Slot<T> {
    fn default() -> Self {
        Slot::new()
    }
}

impl<T: Copy> Slot<T> {
    pub fn new() -> Slot<T> {
        Slot {
            value: Rc::new(Cell::new(None)),
        }
    }

    pub fn publish(&self, value: T) {
        self.value.set(Some(value));
    }

    pub fn clear(&self) {
        self.value.set(None);
    }

    pub fn latest(&self) -> Option<T> {
        self.value.get()
    }
}

/// Last known pointer location in surface coordinates.
pub type PointerSlot = Slot<(f64, f64)>;
