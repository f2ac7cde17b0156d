//! The shared bundle handed out by the registry.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{RwLock, RwLockReadGuard};

use crate::codepoint_map::CodepointMap;
use crate::collection::{Collection, FaceIndex};
use crate::discovery::Discover;
use crate::error::FontError;
use crate::face::Face;
use crate::metrics::Metrics;
use crate::style::StyleStatus;

static NEXT_GRID_ID: AtomicU64 = AtomicU64::new(1);

/// A face collection plus everything needed to resolve codepoints against
/// it. One exists per distinct [`Key`](crate::Key) at a time.
pub struct Grid {
    id: u64,
    collection: RwLock<Collection>,
    metrics: Metrics,
    styles: StyleStatus,
    codepoint_map: CodepointMap,
    discovery: Option<Arc<dyn Discover>>,
}

impl Grid {
    pub fn new(
        collection: Collection,
        styles: StyleStatus,
        codepoint_map: CodepointMap,
        discovery: Option<Arc<dyn Discover>>,
    ) -> Self {
        let id = NEXT_GRID_ID.fetch_add(1, Ordering::Relaxed);
        log::debug!("Created grid {} with {} faces", id, collection.len());
        Self {
            id,
            metrics: collection.metrics(),
            collection: RwLock::new(collection),
            styles,
            codepoint_map,
            discovery,
        }
    }

    /// Process-unique identity. A rebuilt grid never reuses an id.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn styles(&self) -> StyleStatus {
        self.styles
    }

    pub fn codepoint_map(&self) -> &CodepointMap {
        &self.codepoint_map
    }

    /// The discovery handle used to build this grid, for codepoint
    /// fallback lookups.
    pub fn discovery(&self) -> Option<&Arc<dyn Discover>> {
        self.discovery.as_ref()
    }

    pub fn collection(&self) -> RwLockReadGuard<'_, Collection> {
        self.collection.read()
    }

    /// Resolve the face at `index`, loading it if it is still deferred.
    pub fn load_face(&self, index: FaceIndex) -> Result<Arc<Face>, FontError> {
        self.collection.write().load_face(index)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.id)
            .field("metrics", &self.metrics)
            .field("styles", &self.styles)
            .field("codepoint_map", &self.codepoint_map)
            .field("discovery", &self.discovery.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for Grid {
    fn drop(&mut self) {
        log::debug!("Destroyed grid {}", self.id);
    }
}
