//! In-process document root holding a set of markers.

use std::collections::BTreeSet;
use std::sync::Mutex;

use tracing::debug;

use crate::ports::DocumentRoot;

#[derive(Debug, Default)]
pub struct MarkerDocument {
    markers: Mutex<BTreeSet<String>>,
}

impl MarkerDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers currently present, sorted.
    pub fn markers(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
        // A poisoned set is still a valid set of markers
        self.markers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DocumentRoot for MarkerDocument {
    fn set_marker(&self, marker: &str, present: bool) {
        let mut markers = self.lock();
        let changed = if present {
            markers.insert(marker.to_string())
        } else {
            markers.remove(marker)
        };
        if changed {
            debug!(marker, present, "document marker changed");
        }
    }

    fn has_marker(&self, marker: &str) -> bool {
        self.lock().contains(marker)
    }
}
