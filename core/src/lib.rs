pub mod bounds;
pub mod history;
pub mod wire;

// Re-exports for convenience
pub use bounds::{BoundsError, check_time, check_value};
pub use history::{History, HistoryError};
pub use tidemark_types::{Checkpoint, Value, Word};
pub use wire::{
    CHECKPOINT_BYTES, WireError, decode_checkpoint, decode_history, encode_checkpoint,
    encode_history,
};
