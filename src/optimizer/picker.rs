//! Injectable random-choice strategy.
//!
//! Every randomized transform picks from a fixed option list through
//! this trait, so production code draws uniformly while tests can force
//! a deterministic sequence without touching the pipeline itself.

use rand::Rng;
use std::sync::Mutex;

/// Source of index choices for randomized transforms.
pub trait Picker: Send + Sync {
    /// Pick an index in `0..len`. `len` is always at least 1.
    fn pick_index(&self, len: usize) -> usize;
}

/// Uniform-random picker used in production.
pub struct UniformPicker;

impl Picker for UniformPicker {
    fn pick_index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Deterministic picker for tests: replays a fixed sequence of indices,
/// clamped to the option list length, and repeats the last entry when
/// the sequence runs out.
pub struct SequencePicker {
    sequence: Vec<usize>,
    cursor: Mutex<usize>,
}

impl SequencePicker {
    pub fn new(sequence: Vec<usize>) -> Self {
        Self {
            sequence,
            cursor: Mutex::new(0),
        }
    }

    /// Picker that always chooses the first option.
    pub fn zeros() -> Self {
        Self::new(vec![0])
    }
}

impl Picker for SequencePicker {
    fn pick_index(&self, len: usize) -> usize {
        let mut cursor = self.cursor.lock().unwrap();
        let idx = *self
            .sequence
            .get(*cursor)
            .or_else(|| self.sequence.last())
            .unwrap_or(&0);
        *cursor += 1;
        idx.min(len.saturating_sub(1))
    }
}
