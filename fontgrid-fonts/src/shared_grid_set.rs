//! Process-wide registry of reference-counted grids.
//!
//! Surfaces with identical font configuration share one [`Grid`]. The first
//! [`SharedGridSet::acquire`] for a key builds it; every later acquire bumps
//! a count; the matching [`SharedGridSet::release`] calls drop the count and
//! the last one removes the grid.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::collection;
use crate::derived_config::DerivedConfig;
use crate::discovery::{Discover, FontdbDiscovery};
use crate::error::FontError;
use crate::face::DesiredSize;
use crate::grid::Grid;
use crate::key::Key;
use crate::library::Library;

type DiscoveryFactory = Box<dyn Fn() -> Option<Arc<dyn Discover>> + Send + Sync>;

struct ReffedGrid {
    grid: Arc<Grid>,
    /// Always at least 1 while the entry is in the map.
    ref_count: usize,
}

/// Thread-safe `Key -> Grid` registry.
///
/// Every operation holds the registry lock for its whole duration. On a
/// miss that includes building the grid, so concurrent acquires of a new
/// configuration serialize and never produce two grids for one key.
pub struct SharedGridSet {
    library: Library,
    discovery: OnceLock<Option<Arc<dyn Discover>>>,
    discovery_factory: DiscoveryFactory,
    map: Mutex<HashMap<Key, ReffedGrid>>,
}

impl SharedGridSet {
    /// A registry that discovers system fonts through fontdb.
    pub fn new(library: Library) -> Self {
        Self::with_discovery(library, || {
            Some(Arc::new(FontdbDiscovery::system()) as Arc<dyn Discover>)
        })
    }

    /// A registry whose discovery handle is created by `factory` on first
    /// use. The factory runs at most once; `None` means no discovery.
    pub fn with_discovery<F>(library: Library, factory: F) -> Self
    where
        F: Fn() -> Option<Arc<dyn Discover>> + Send + Sync + 'static,
    {
        Self {
            library,
            discovery: OnceLock::new(),
            discovery_factory: Box::new(factory),
            map: Mutex::new(HashMap::new()),
        }
    }

    /// A registry that only ever uses the built-in faces.
    pub fn without_discovery(library: Library) -> Self {
        Self::with_discovery(library, || None)
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// The shared discovery handle, created on first call.
    pub fn discovery(&self) -> Option<&Arc<dyn Discover>> {
        self.discovery
            .get_or_init(|| {
                let discovery = (self.discovery_factory)();
                if discovery.is_none() {
                    log::info!("No font discovery available");
                }
                discovery
            })
            .as_ref()
    }

    /// Get the grid for `config` at `size`, building it if no surface holds
    /// one yet. Each successful call must be paired with one
    /// [`release`](Self::release) of the returned key.
    pub fn acquire(
        &self,
        config: &DerivedConfig,
        size: DesiredSize,
    ) -> Result<(Key, Arc<Grid>), FontError> {
        let key = Key::new(config, size);
        let mut map = self.map.lock();

        match map.entry(key) {
            Entry::Occupied(mut occupied) => {
                occupied.get_mut().ref_count += 1;
                let reffed = occupied.get();
                log::debug!(
                    "Reusing grid {} for key {:016x} (refs: {})",
                    reffed.grid.id(),
                    occupied.key().hash_value(),
                    reffed.ref_count
                );
                Ok((occupied.key().clone(), Arc::clone(&reffed.grid)))
            }
            Entry::Vacant(vacant) => {
                let key = vacant.key();
                log::info!(
                    "Building grid for key {:016x} ({} descriptors, {:.1}pt)",
                    key.hash_value(),
                    key.descriptors().len(),
                    key.size().points
                );

                // Nothing is inserted until the build succeeds.
                let discovery = self.discovery();
                let collection =
                    collection::assemble(key, &self.library, discovery.map(|d| &**d))
                        .inspect_err(|e| {
                            log::error!("Grid build failed for key {:016x}: {}", key.hash_value(), e)
                        })?;
                let grid = Arc::new(Grid::new(
                    collection,
                    key.styles(),
                    key.codepoint_map().clone(),
                    discovery.cloned(),
                ));

                let key = key.clone();
                vacant.insert(ReffedGrid {
                    grid: Arc::clone(&grid),
                    ref_count: 1,
                });
                log::info!("Created grid {} for key {:016x}", grid.id(), key.hash_value());
                Ok((key, grid))
            }
        }
    }

    /// Drop one reference to `key`'s grid, removing it at zero.
    ///
    /// Releasing a key that is no longer registered is a no-op.
    pub fn release(&self, key: &Key) {
        let mut map = self.map.lock();
        let Some(reffed) = map.get_mut(key) else {
            log::debug!("Release of unregistered key {:016x}", key.hash_value());
            return;
        };

        assert!(reffed.ref_count >= 1, "grid reference count underflow");
        reffed.ref_count -= 1;
        if reffed.ref_count > 0 {
            log::debug!(
                "Released grid {} (refs: {})",
                reffed.grid.id(),
                reffed.ref_count
            );
            return;
        }

        if let Some(reffed) = map.remove(key) {
            log::info!(
                "Removed grid {} for key {:016x}",
                reffed.grid.id(),
                key.hash_value()
            );
        }
    }

    /// Number of registered grids.
    pub fn count(&self) -> usize {
        self.map.lock().len()
    }

    /// Current reference count for `key`, if registered.
    pub fn ref_count(&self, key: &Key) -> Option<usize> {
        self.map.lock().get(key).map(|reffed| reffed.ref_count)
    }
}

impl fmt::Debug for SharedGridSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedGridSet")
            .field("library", &self.library)
            .field("grids", &self.count())
            .finish_non_exhaustive()
    }
}

impl Drop for SharedGridSet {
    fn drop(&mut self) {
        let map = self.map.get_mut();
        if !map.is_empty() {
            log::info!("Releasing {} grids still registered at shutdown", map.len());
        }
        map.clear();
    }
}
