//! A module for all encoding needs.
use crate::dict::Dictionary;
use crate::Code;

/// An incremental encoder from bytes to codes.
///
/// The encoder owns a private [`Dictionary`] created for its lifetime. Feed
/// input with [`push`](Self::push) and emit the trailing match with
/// [`finish`](Self::finish); [`encode`] wraps both for whole buffers.
pub struct Encoder {
    dict: Dictionary,
    /// The code of the working prefix read so far.
    current: Option<Code>,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder {
            dict: Dictionary::new(),
            current: None,
        }
    }

    /// Consume `inp`, appending every completed code to `out`.
    ///
    /// Greedy longest-match: the working prefix is extended while the
    /// dictionary still knows the extension, and on the first mismatch the
    /// prefix code is emitted, the extension recorded, and matching restarts
    /// at the mismatching byte.
    pub fn push(&mut self, inp: &[u8], out: &mut Vec<Code>) {
        for &byte in inp {
            let current = match self.current {
                // An empty prefix extends to the root entry for the byte,
                // which exists from initialization.
                None => {
                    self.current = Some(Code::from(byte));
                    continue;
                }
                Some(code) => code,
            };

            match self.dict.extend(Some(current), byte) {
                Some(longer) => self.current = Some(longer),
                None => {
                    out.push(current);
                    self.dict.derive(current, byte);
                    self.current = Some(Code::from(byte));
                }
            }
        }
    }

    /// Emit the code for the pending prefix, if any, ending the stream.
    pub fn finish(mut self, out: &mut Vec<Code>) {
        if let Some(code) = self.current.take() {
            out.push(code);
        }
    }

    /// The table built so far.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder::new()
    }
}

/// Encode a whole buffer into a fresh code sequence.
///
/// Total over all byte inputs; empty input yields an empty sequence.
pub fn encode(data: &[u8]) -> Vec<Code> {
    let mut encoder = Encoder::new();
    let mut out = Vec::with_capacity(data.len() / 2 + 1);
    encoder.push(data, &mut out);
    encoder.finish(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::{encode, Encoder};

    #[test]
    fn empty_input_yields_no_codes() {
        assert!(encode(&[]).is_empty());
    }

    #[test]
    fn single_bytes_are_their_own_codes() {
        assert_eq!(encode(&[0]), [0]);
        assert_eq!(encode(&[255]), [255]);
        assert_eq!(encode(b"AB"), [65, 66]);
    }

    #[test]
    fn immediate_reuse_of_a_new_entry() {
        // "AAA": emit A, record AA, then match AA and emit its fresh code.
        assert_eq!(encode(b"AAA"), [65, 256]);
    }

    #[test]
    fn split_pushes_match_the_one_shot_form() {
        let data = b"TOBEORNOTTOBEORTOBEORNOT";
        let mut encoder = Encoder::new();
        let mut codes = Vec::new();
        for chunk in data.chunks(5) {
            encoder.push(chunk, &mut codes);
        }
        encoder.finish(&mut codes);
        assert_eq!(codes, encode(data));
    }
}
