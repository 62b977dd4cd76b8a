//! Fixed-width packed checkpoint codec
//!
//! Each record packs into a single 32-byte unit: an 8-byte big-endian time
//! followed by a 24-byte big-endian value. Records are stored contiguously
//! in insertion order, interoperating bit-for-bit with reference
//! implementations that persist one 256-bit cell per checkpoint.

use thiserror::Error;
use tidemark_types::{Checkpoint, Value};

use crate::history::History;

/// Packed size of one checkpoint record.
pub const CHECKPOINT_BYTES: usize = 32;

/// Errors while decoding a packed checkpoint stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("packed length {len} is not a whole number of 32-byte records")]
    TruncatedRecord { len: usize },

    #[error("record {index} breaks strict time ordering (time {time} after {prev})")]
    OutOfOrder { index: usize, prev: u64, time: u64 },
}

/// Pack a checkpoint into its 32-byte wire image.
pub fn encode_checkpoint(checkpoint: &Checkpoint) -> [u8; CHECKPOINT_BYTES] {
    let mut out = [0u8; CHECKPOINT_BYTES];
    out[..8].copy_from_slice(&checkpoint.time.to_be_bytes());
    out[8..].copy_from_slice(&checkpoint.value.to_be_bytes());
    out
}

/// Unpack a single checkpoint from exactly one 32-byte wire image.
pub fn decode_checkpoint(bytes: &[u8]) -> Result<Checkpoint, WireError> {
    if bytes.len() != CHECKPOINT_BYTES {
        return Err(WireError::TruncatedRecord { len: bytes.len() });
    }
    let mut time = [0u8; 8];
    time.copy_from_slice(&bytes[..8]);
    let mut value = [0u8; 24];
    value.copy_from_slice(&bytes[8..]);
    Ok(Checkpoint {
        time: u64::from_be_bytes(time),
        value: Value::from_be_bytes(value),
    })
}

/// Pack an entire history, record by record, in insertion order.
pub fn encode_history(history: &History) -> Vec<u8> {
    let mut out = Vec::with_capacity(history.len() * CHECKPOINT_BYTES);
    for checkpoint in history.checkpoints() {
        out.extend_from_slice(&encode_checkpoint(checkpoint));
    }
    out
}

/// Rebuild a history from a packed stream.
///
/// The stream must be a whole number of records with strictly increasing
/// times; anything else is rejected so a decoded history always satisfies
/// the store's ordering invariant.
pub fn decode_history(bytes: &[u8]) -> Result<History, WireError> {
    if bytes.len() % CHECKPOINT_BYTES != 0 {
        return Err(WireError::TruncatedRecord { len: bytes.len() });
    }

    let mut checkpoints = Vec::with_capacity(bytes.len() / CHECKPOINT_BYTES);
    let mut prev: Option<u64> = None;
    for (index, chunk) in bytes.chunks_exact(CHECKPOINT_BYTES).enumerate() {
        let checkpoint = decode_checkpoint(chunk)?;
        if let Some(prev_time) = prev {
            if checkpoint.time <= prev_time {
                return Err(WireError::OutOfOrder {
                    index,
                    prev: prev_time,
                    time: checkpoint.time,
                });
            }
        }
        prev = Some(checkpoint.time);
        checkpoints.push(checkpoint);
    }

    Ok(History::from_checkpoints_unchecked(checkpoints))
}

#[cfg(test)]
mod tests {
    use tidemark_types::Word;

    use super::*;

    fn history(pairs: &[(u64, u64)]) -> History {
        let mut history = History::new();
        for &(t, v) in pairs {
            history
                .add(Word::from(v), u128::from(t))
                .unwrap_or_else(|e| panic!("add({v}, {t}) rejected: {e}"));
        }
        history
    }

    #[test]
    fn checkpoint_packs_time_then_value_big_endian() {
        let image = encode_checkpoint(&Checkpoint {
            time: 0x0102_0304_0506_0708,
            value: Value::from_limbs(0x11, 0x22),
        });

        assert_eq!(&image[..8], &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
        assert_eq!(image[15], 0x11, "value high limb sits after the time field");
        assert_eq!(image[31], 0x22, "value low limb fills the trailing bytes");
        assert!(image[8..15].iter().all(|&b| b == 0));
        assert!(image[16..31].iter().all(|&b| b == 0));
    }

    #[test]
    fn history_round_trips_through_the_packed_stream() {
        let original = history(&[(1, 2), (3, 5), (5, 3)]);
        let bytes = encode_history(&original);
        assert_eq!(bytes.len(), 3 * CHECKPOINT_BYTES);

        let decoded = decode_history(&bytes).expect("valid stream");
        assert_eq!(decoded.checkpoints(), original.checkpoints());
    }

    #[test]
    fn empty_stream_decodes_to_an_empty_history() {
        let decoded = decode_history(&[]).expect("empty stream is valid");
        assert!(decoded.is_empty());
    }

    #[test]
    fn rejects_a_partial_record() {
        let err = decode_history(&[0u8; 33]);
        assert_eq!(err, Err(WireError::TruncatedRecord { len: 33 }));
        assert_eq!(
            decode_checkpoint(&[0u8; 8]),
            Err(WireError::TruncatedRecord { len: 8 })
        );
    }

    #[test]
    fn rejects_records_out_of_order() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&encode_checkpoint(&Checkpoint {
            time: 5,
            value: Value::from(1u64),
        }));
        bytes.extend_from_slice(&encode_checkpoint(&Checkpoint {
            time: 3,
            value: Value::from(2u64),
        }));

        assert_eq!(
            decode_history(&bytes),
            Err(WireError::OutOfOrder {
                index: 1,
                prev: 5,
                time: 3
            })
        );
    }

    #[test]
    fn rejects_duplicate_times() {
        let record = encode_checkpoint(&Checkpoint {
            time: 7,
            value: Value::from(1u64),
        });
        let bytes: Vec<u8> = [record, record].concat();

        assert_eq!(
            decode_history(&bytes),
            Err(WireError::OutOfOrder {
                index: 1,
                prev: 7,
                time: 7
            })
        );
    }
}
