mod faces;
mod random;

pub use faces::FaceCache;
pub use random::{RandomSource, RngSource};

use std::sync::Arc;
use crate::roll::Sides;


/// A die ready to be rolled.
///
/// Numeric dice roll their face values `1..=N`. Custom dice roll the 1-based
/// position of the face drawn, which [`crate::RollResult::labels()`] maps back
/// to the face characters.
#[derive(Debug, Clone)]
pub(crate) struct Die {
    faces: Arc<[u32]>,
}

impl Die {
    pub fn new(sides: &Sides, cache: &FaceCache) -> Self {
        let faces = match sides {
            Sides::Numeric(n) => cache.numeric(*n),
            Sides::Custom(labels) => (1..=labels.len() as u32).collect(),
        };

        Self { faces }
    }

    /// Draws one value, consuming exactly one index from `source`.
    pub fn roll<R: RandomSource>(&self, source: &mut R) -> u32 {
        let index = source.next_index(self.face_count()) as usize;
        let value = self.faces[index % self.faces.len()];
        tracing::trace!("Rolled {} (index {})", value, index);
        value
    }

    pub fn face_count(&self) -> u32 {
        self.faces.len() as u32
    }

    pub fn max_face(&self) -> u32 {
        self.faces.last().copied().unwrap_or(0)
    }

    pub fn faces(&self) -> &[u32] {
        &self.faces
    }
}


#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use super::*;


    proptest! {
        #[test]
        fn test_numeric_die_rolls_in_range(sides in 1..=100u16) {
            let die = Die::new(&Sides::Numeric(sides), &FaceCache::new());
            let mut source = RngSource::thread();

            for _ in 0..20 {
                let value = die.roll(&mut source);
                prop_assert!(value >= 1 && value <= sides as u32);
            }
            prop_assert_eq!(die.max_face(), sides as u32);
        }

        #[test]
        fn test_die_maps_index_to_face(sides in 1..=100u16, index in 0..100u32) {
            let die = Die::new(&Sides::Numeric(sides), &FaceCache::new());
            let mut source = move |_: u32| index;

            prop_assert_eq!(die.roll(&mut source), index % sides as u32 + 1);
        }
    }

    #[test]
    fn test_custom_die_rolls_positions() {
        let die = Die::new(&Sides::custom("abc"), &FaceCache::new());
        let mut source = |_: u32| 2u32;

        assert_eq!(die.face_count(), 3);
        assert_eq!(die.roll(&mut source), 3);
        assert_eq!(die.faces(), &[1, 2, 3]);
    }
}
