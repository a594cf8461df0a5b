//! Registry of live output surfaces.

use std::sync::Arc;

use crate::platform::Window;

/// Identity set of window handles.
///
/// Membership is decided by pointer identity, never by value, so two
/// distinct windows with the same title are both accepted.
#[derive(Default)]
pub struct WindowRegistry {
    windows: Vec<Arc<dyn Window>>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, window: &Arc<dyn Window>) -> bool {
        self.windows.iter().any(|w| same_window(w, window))
    }

    /// Add a window. Returns false if it is already registered.
    pub fn insert(&mut self, window: Arc<dyn Window>) -> bool {
        if self.contains(&window) {
            return false;
        }
        self.windows.push(window);
        true
    }

    /// Remove a window. Returns false if it was never registered.
    pub fn remove(&mut self, window: &Arc<dyn Window>) -> bool {
        match self.windows.iter().position(|w| same_window(w, window)) {
            Some(pos) => {
                self.windows.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Take every remaining window out of the registry.
    pub fn drain(&mut self) -> impl Iterator<Item = Arc<dyn Window>> + '_ {
        self.windows.drain(..)
    }
}

impl std::fmt::Debug for WindowRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.windows.iter().map(|w| w.title().to_string()))
            .finish()
    }
}

// Compare data pointers only; vtable pointers for the same type may differ
// across codegen units.
fn same_window(a: &Arc<dyn Window>, b: &Arc<dyn Window>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
