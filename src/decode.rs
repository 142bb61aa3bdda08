//! A module for all decoding needs.
use crate::dict::Dictionary;
use crate::error::{CorruptKind, Error};
use crate::Code;

/// An incremental decoder from codes back to bytes.
///
/// The decoder rebuilds the encoder's dictionary entry by entry from the
/// code stream alone, staying exactly one insertion behind it. Feed codes
/// with [`push`](Self::push); [`decode`] wraps it for whole sequences.
pub struct Decoder {
    dict: Dictionary,
    /// The previously consumed code.
    prev: Option<Code>,
    /// The bytes of the previously decoded entry.
    last: Vec<u8>,
    scratch: Vec<u8>,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder {
            dict: Dictionary::new(),
            prev: None,
            last: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Consume `codes`, appending the reconstructed bytes to `out`.
    ///
    /// On error `out` is restored to its length at entry and the decoder
    /// must be discarded; nothing partial is ever committed.
    pub fn push(&mut self, codes: &[Code], out: &mut Vec<u8>) -> Result<(), Error> {
        let mark = out.len();
        for &code in codes {
            if let Err(err) = self.step(code, out) {
                out.truncate(mark);
                return Err(err);
            }
        }
        Ok(())
    }

    fn step(&mut self, code: Code, out: &mut Vec<u8>) -> Result<(), Error> {
        let size = self.dict.len();
        if usize::from(code) < size {
            let depth = self.dict.depth(code);
            self.scratch.resize(depth, 0);
            let first = self.dict.reconstruct(code, &mut self.scratch);
            if let Some(prev) = self.prev {
                self.dict.derive(prev, first);
            }
        } else if usize::from(code) == size && self.prev.is_some() {
            // Deferred entry: the encoder used a code immediately after
            // creating it, so its entry is the previous one extended by its
            // own first byte. Materialize it before use.
            let first = self.last[0];
            self.scratch.clear();
            self.scratch.extend_from_slice(&self.last);
            self.scratch.push(first);
            if let Some(prev) = self.prev {
                self.dict.derive(prev, first);
            }
        } else {
            return Err(CorruptKind::UnknownCode { code, size }.into());
        }

        out.extend_from_slice(&self.scratch);
        std::mem::swap(&mut self.last, &mut self.scratch);
        self.prev = Some(code);
        Ok(())
    }

    /// The table rebuilt so far.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new()
    }
}

/// Decode a whole code sequence into a fresh byte buffer.
///
/// Fails with [`Error::CorruptData`] on the first code that is neither an
/// assigned entry nor the deferred next code; no output is returned in that
/// case. Empty input yields empty bytes.
pub fn decode(codes: &[Code]) -> Result<Vec<u8>, Error> {
    let mut decoder = Decoder::new();
    let mut out = Vec::with_capacity(codes.len() * 2);
    decoder.push(codes, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{decode, Decoder};
    use crate::{CorruptKind, Error};

    #[test]
    fn empty_input_yields_no_bytes() {
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn deferred_entry_is_previous_plus_its_first_byte() {
        assert_eq!(decode(&[65, 256]).unwrap(), b"AAA");
        assert_eq!(decode(&[65, 66, 257]).unwrap(), b"ABBB");
    }

    #[test]
    fn first_code_must_be_a_root() {
        assert_eq!(
            decode(&[256]),
            Err(Error::CorruptData(CorruptKind::UnknownCode {
                code: 256,
                size: 256,
            }))
        );
    }

    #[test]
    fn code_past_the_next_assignment_is_rejected() {
        // After one code no entry has been derived yet, so size is 256 and
        // 300 matches neither an entry nor the deferred case.
        assert_eq!(
            decode(&[65, 300]),
            Err(Error::CorruptData(CorruptKind::UnknownCode {
                code: 300,
                size: 256,
            }))
        );
        // 258 skips past the single entry 257 would create.
        assert_eq!(
            decode(&[65, 66, 258]),
            Err(Error::CorruptData(CorruptKind::UnknownCode {
                code: 258,
                size: 257,
            }))
        );
    }

    #[test]
    fn failed_push_leaves_no_partial_output() {
        let mut decoder = Decoder::new();
        let mut out = Vec::new();
        assert!(decoder.push(&[65, 66, 300], &mut out).is_err());
        assert!(out.is_empty());
    }
}
