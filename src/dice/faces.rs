use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};


/// Memoized face lists for numeric dice, keyed by die size.
///
/// Entries are only ever added, never changed, so a cache can be shared by
/// any number of rollers across threads. [`FaceCache::shared()`] returns the
/// process-wide instance; tests and embedders may create their own.
#[derive(Debug, Default)]
pub struct FaceCache {
    faces: RwLock<HashMap<u16, Arc<[u32]>>>,
}

impl FaceCache {
    /// An empty cache, private to its owner.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used when a roller is not given one.
    pub fn shared() -> Arc<FaceCache> {
        static SHARED: OnceLock<Arc<FaceCache>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(FaceCache::new())))
    }

    /// Returns the faces `1..=sides`, generating them on first use.
    pub fn numeric(&self, sides: u16) -> Arc<[u32]> {
        let cached = self.faces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&sides)
            .cloned();

        if let Some(faces) = cached {
            return faces;
        }

        let mut faces = self.faces.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(faces.entry(sides).or_insert_with(|| {
            tracing::trace!("Generating faces for d{}", sides);
            generate_faces(sides)
        }))
    }

    /// Number of die sizes cached so far.
    pub fn len(&self) -> usize {
        self.faces.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no die size has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn generate_faces(sides: u16) -> Arc<[u32]> {
    (1..=u32::from(sides)).collect()
}
