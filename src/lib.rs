//! # LZW with 16-bit codes
//!
//! This crate provides an adaptive-dictionary (LZW) encoder and decoder over
//! arbitrary byte sequences. Both sides start from the 256 single-byte
//! entries and grow their dictionaries in lockstep from the data itself, so
//! no dictionary is ever transmitted. Codes are capped at 16 bits: once the
//! dictionary holds 65536 entries it freezes and coding continues against
//! the frozen entry set.
//!
//! The code sequence is abstract; the [`serial`] module converts it to and
//! from the two external representations, a fixed-width big-endian binary
//! stream and a comma-delimited decimal text form.
//!
//! Exemplary use of the codec:
//!
//! ```
//! let data = b"TOBEORNOTTOBEORTOBEORNOT";
//! let codes = lzw16::encode(data);
//! assert_eq!(codes[9..], [256, 258, 260, 265, 259, 261, 263]);
//!
//! let restored = lzw16::decode(&codes)?;
//! assert_eq!(restored, data);
//! # Ok::<(), lzw16::Error>(())
//! ```

/// The number of entries a dictionary can hold.
///
/// Chosen so that every assignable code fits a 16-bit serialized word
/// exactly.
pub const MAX_ENTRIES: usize = 1 << 16;

/// Alias for a LZW code point.
pub type Code = u16;

pub mod decode;
pub mod dict;
pub mod encode;
mod error;
pub mod serial;

pub use decode::decode;
pub use dict::Dictionary;
pub use encode::encode;
pub use error::{CorruptKind, Error, Result};
