//! Ordered checkpoint sequence with tail insertion and predecessor lookup
//!
//! The sequence is strictly increasing by time. Only the most recent record
//! may be overwritten; earlier history is immutable. Lookups treat the
//! history as a step function over time.

use tidemark_types::{Checkpoint, Value, Word};

use super::HistoryError;
use crate::bounds::{check_time, check_value};

/// Checkpoint history owned by a single store instance.
///
/// Created empty and mutated one record at a time through [`History::add`].
/// The store is a plain synchronous value with no internal locking; when
/// shared across threads it needs external synchronization. Since only the
/// tail record ever changes, "single writer, many readers" is the natural
/// discipline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    checkpoints: Vec<Checkpoint>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` at `time`, extending or overwriting the tail.
    ///
    /// Inserting at the latest recorded time replaces that record's value in
    /// place without growing the sequence. Inserting at an earlier time is
    /// rejected. A rejected call leaves the sequence untouched.
    pub fn add(&mut self, value: Word, time: u128) -> Result<(), HistoryError> {
        let value = check_value(value)?;
        let time = check_time(time)?;

        match self.checkpoints.last().map(|c| c.time) {
            Some(last) if time < last => Err(HistoryError::NonMonotonicInsertion { time, last }),
            Some(last) if time == last => {
                tracing::debug!(time, "overwriting checkpoint value at tail");
                if let Some(tail) = self.checkpoints.last_mut() {
                    tail.value = value;
                }
                Ok(())
            }
            _ => {
                self.checkpoints.push(Checkpoint { time, value });
                Ok(())
            }
        }
    }

    /// Value in effect at `time`.
    ///
    /// The history behaves as a step function: constant between checkpoints,
    /// taking the value of the checkpoint at or immediately before the query
    /// point, [`Value::ZERO`] before the first checkpoint, and the latest
    /// value at or past the last checkpoint.
    pub fn get(&self, time: u128) -> Result<Value, HistoryError> {
        let time = check_time(time)?;
        Ok(self.value_at(time))
    }

    fn value_at(&self, time: u64) -> Value {
        let Some(last) = self.checkpoints.last() else {
            return Value::ZERO;
        };
        // Fast path for querying at or past the tail
        if time >= last.time {
            return last.value;
        }
        // Rightmost record whose time is <= the queried time
        let idx = self.checkpoints.partition_point(|c| c.time <= time);
        if idx == 0 {
            Value::ZERO
        } else {
            self.checkpoints[idx - 1].value
        }
    }

    /// Time of the most recent checkpoint, or 0 if none exist.
    pub fn last_updated(&self) -> u64 {
        self.checkpoints.last().map_or(0, |c| c.time)
    }

    /// Number of stored checkpoints (distinct times retained after
    /// overwrite collapsing).
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Read-only view of the stored sequence, oldest first.
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Adopt records already known to satisfy the strict-ordering invariant.
    pub(crate) fn from_checkpoints_unchecked(checkpoints: Vec<Checkpoint>) -> Self {
        History { checkpoints }
    }
}
