//! The adaptive table shared by the encoding and decoding algorithms.
use crate::{Code, Error, MAX_ENTRIES};

/// A bidirectional table between byte sequences and codes.
///
/// A fresh table holds the 256 single-byte entries, each assigned its byte
/// value as code. New entries are appended with strictly increasing codes
/// starting at 256, in the order the coding loop discovers them; no entry is
/// ever removed or rewritten. At [`MAX_ENTRIES`] the table freezes and
/// further derivations are no-ops.
///
/// One instance is created per encode and per decode call. Entries are kept
/// as links to their one-shorter prefix, so an entry of any length costs a
/// few bytes and lookups by code walk the link chain back to front.
pub struct Dictionary {
    links: Vec<Link>,
    depths: Vec<u16>,
    keys: Vec<PackedKey>,
    few: Vec<Few>,
    many: Vec<Many>,
}

/// An entry, represented as its final byte and the code of its prefix.
#[derive(Clone, Copy)]
struct Link {
    prefix: Code,
    byte: u8,
}

/// The successor set of one code.
/// To avoid using too much memory, codes with few successors are kept in an
/// optimized form that does a linear search instead of indexing by byte.
#[derive(Clone, Copy)]
enum Key {
    NoSuccessor,
    Few(u32),
    Many(u32),
}

#[derive(Clone, Copy)]
struct PackedKey(u32);

const KEY_TAG: u32 = 0xc000_0000;
const KEY_NONE: u32 = 0xc000_0000;
const KEY_FEW: u32 = 0x8000_0000;

const FEW: usize = 16;

#[derive(Clone, Copy)]
struct Few {
    codes: [Code; FEW],
    bytes: [u8; FEW],
    count: u8,
}

/// Dense successor map. All 65536 code values are assignable, so the
/// missing-successor mark has to live outside the code range.
#[derive(Clone, Copy)]
struct Many {
    next: [u32; 256],
}

const NO_SUCCESSOR: u32 = u32::MAX;

impl Dictionary {
    /// A table holding exactly the 256 single-byte entries.
    pub fn new() -> Self {
        let mut links = Vec::with_capacity(MAX_ENTRIES);
        let mut depths = Vec::with_capacity(MAX_ENTRIES);
        let mut keys = Vec::with_capacity(MAX_ENTRIES);
        for byte in 0..=255u8 {
            links.push(Link { prefix: 0, byte });
            depths.push(1);
            keys.push(Key::NoSuccessor.into());
        }
        Dictionary {
            links,
            depths,
            keys,
            few: Vec::new(),
            many: Vec::new(),
        }
    }

    /// The number of entries, including the 256 roots.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the table has frozen at [`MAX_ENTRIES`].
    pub fn is_full(&self) -> bool {
        self.links.len() == MAX_ENTRIES
    }

    /// Exact-match lookup of the sequence of `prefix` extended by `byte`.
    ///
    /// `None` as prefix stands for the empty sequence, whose extensions are
    /// the roots and always resolve.
    pub fn extend(&self, prefix: Option<Code>, byte: u8) -> Option<Code> {
        let prefix = match prefix {
            None => return Some(Code::from(byte)),
            Some(code) => code,
        };
        match Key::from(self.keys[usize::from(prefix)]) {
            Key::NoSuccessor => None,
            Key::Few(idx) => {
                let few = &self.few[idx as usize];
                few.bytes
                    .iter()
                    .zip(few.codes.iter())
                    .take(usize::from(few.count))
                    .find_map(|(&b, &code)| if b == byte { Some(code) } else { None })
            }
            Key::Many(idx) => {
                let next = self.many[idx as usize].next[usize::from(byte)];
                if next == NO_SUCCESSOR {
                    None
                } else {
                    Some(next as Code)
                }
            }
        }
    }

    /// Append the entry formed by `prefix` extended by `byte`, assigning the
    /// next code. Returns `None` once the table is frozen.
    ///
    /// The pair must not already have an entry; the coding loops only derive
    /// after a failed [`extend`](Self::extend).
    pub fn derive(&mut self, prefix: Code, byte: u8) -> Option<Code> {
        if self.is_full() {
            return None;
        }

        let next = self.links.len() as Code;
        match Key::from(self.keys[usize::from(prefix)]) {
            Key::NoSuccessor => {
                let key = Key::Few(self.few.len() as u32);
                let mut few = Few::default();
                few.codes[0] = next;
                few.bytes[0] = byte;
                few.count = 1;
                self.few.push(few);
                self.keys[usize::from(prefix)] = key.into();
            }
            Key::Few(idx) if usize::from(self.few[idx as usize].count) < FEW => {
                let few = &mut self.few[idx as usize];
                let at = usize::from(few.count);
                few.bytes[at] = byte;
                few.codes[at] = next;
                few.count += 1;
            }
            Key::Few(idx) => {
                let key = Key::Many(self.many.len() as u32);
                let few = self.few[idx as usize];
                let mut many = Many {
                    next: [NO_SUCCESSOR; 256],
                };
                for (&b, &code) in few.bytes.iter().zip(few.codes.iter()) {
                    many.next[usize::from(b)] = u32::from(code);
                }
                many.next[usize::from(byte)] = u32::from(next);
                self.many.push(many);
                self.keys[usize::from(prefix)] = key.into();
            }
            Key::Many(idx) => {
                self.many[idx as usize].next[usize::from(byte)] = u32::from(next);
            }
        }

        let depth = self.depths[usize::from(prefix)] + 1;
        self.links.push(Link { prefix, byte });
        self.depths.push(depth);
        self.keys.push(Key::NoSuccessor.into());
        Some(next)
    }

    /// The code of an exact sequence, if it has an entry.
    pub fn code_of(&self, sequence: &[u8]) -> Option<Code> {
        let mut current = None;
        for &byte in sequence {
            current = Some(self.extend(current, byte)?);
        }
        current
    }

    /// The bytes of an assigned code.
    pub fn sequence_of(&self, code: Code) -> Option<Vec<u8>> {
        if usize::from(code) >= self.len() {
            return None;
        }
        let mut out = vec![0; self.depth(code)];
        self.reconstruct(code, &mut out);
        Some(out)
    }

    /// Insert a whole sequence, assigning the next free code.
    ///
    /// Returns the existing code if the sequence already has one, and
    /// `Ok(None)` when the table is frozen. All proper prefixes of the
    /// sequence must already be present; a gap in that chain means the
    /// caller broke the growth discipline and is reported as
    /// [`Error::InternalInconsistency`].
    pub fn insert(&mut self, sequence: &[u8]) -> Result<Option<Code>, Error> {
        let (&last, prefix) = match sequence.split_last() {
            Some(split) => split,
            None => {
                return Err(Error::InternalInconsistency(
                    "empty sequences have no dictionary entry",
                ))
            }
        };

        let mut current = None;
        for &byte in prefix {
            current = match self.extend(current, byte) {
                Some(code) => Some(code),
                None => {
                    return Err(Error::InternalInconsistency(
                        "sequence prefix missing from the table",
                    ))
                }
            };
        }

        match current {
            None => Ok(Some(Code::from(last))),
            Some(prefix) => match self.extend(Some(prefix), last) {
                Some(code) => Ok(Some(code)),
                None => Ok(self.derive(prefix, last)),
            },
        }
    }

    /// Entry length in bytes. The code must be assigned.
    pub(crate) fn depth(&self, code: Code) -> usize {
        usize::from(self.depths[usize::from(code)])
    }

    /// Fill `out` with the bytes of `code`, walking the link chain back to
    /// front, and return the first byte. `out` must have the entry's exact
    /// length.
    pub(crate) fn reconstruct(&self, code: Code, out: &mut [u8]) -> u8 {
        let mut code = code;
        for slot in out.iter_mut().rev() {
            let link = self.links[usize::from(code)];
            *slot = link.byte;
            code = link.prefix;
        }
        out[0]
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Dictionary::new()
    }
}

impl Default for Few {
    fn default() -> Self {
        Few {
            codes: [0; FEW],
            bytes: [0; FEW],
            count: 0,
        }
    }
}

impl From<PackedKey> for Key {
    fn from(PackedKey(key): PackedKey) -> Self {
        match key & KEY_TAG {
            KEY_NONE => Key::NoSuccessor,
            KEY_FEW => Key::Few(key & !KEY_TAG),
            _ => Key::Many(key),
        }
    }
}

impl From<Key> for PackedKey {
    fn from(key: Key) -> Self {
        PackedKey(match key {
            Key::NoSuccessor => KEY_NONE,
            Key::Few(idx) => KEY_FEW | idx,
            Key::Many(idx) => idx,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Dictionary, FEW};
    use crate::{Error, MAX_ENTRIES};

    #[test]
    fn roots_are_byte_values() {
        let dict = Dictionary::new();
        assert_eq!(dict.len(), 256);
        for byte in 0..=255u8 {
            assert_eq!(dict.code_of(&[byte]), Some(u16::from(byte)));
            assert_eq!(dict.sequence_of(u16::from(byte)), Some(vec![byte]));
        }
    }

    #[test]
    fn derivations_count_up_from_256() {
        let mut dict = Dictionary::new();
        assert_eq!(dict.derive(b'a'.into(), b'b'), Some(256));
        assert_eq!(dict.derive(256, b'c'), Some(257));
        assert_eq!(dict.code_of(b"ab"), Some(256));
        assert_eq!(dict.code_of(b"abc"), Some(257));
        assert_eq!(dict.sequence_of(257), Some(b"abc".to_vec()));
        assert_eq!(dict.code_of(b"bc"), None);
        assert_eq!(dict.sequence_of(258), None);
    }

    #[test]
    fn insert_follows_the_prefix_chain() {
        let mut dict = Dictionary::new();
        assert_eq!(dict.insert(b"a").unwrap(), Some(u16::from(b'a')));
        assert_eq!(dict.insert(b"ab").unwrap(), Some(256));
        assert_eq!(dict.insert(b"ab").unwrap(), Some(256));
        assert_eq!(dict.insert(b"abc").unwrap(), Some(257));

        match dict.insert(b"xyz") {
            Err(Error::InternalInconsistency(_)) => {}
            other => panic!("missing prefix accepted: {:?}", other),
        }
        match dict.insert(b"") {
            Err(Error::InternalInconsistency(_)) => {}
            other => panic!("empty sequence accepted: {:?}", other),
        }
    }

    #[test]
    fn successor_index_survives_promotion() {
        // Push one code past the linear-search node size.
        let mut dict = Dictionary::new();
        let prefix = u16::from(b'p');
        for byte in 0..(FEW as u8 + 4) {
            let code = dict.derive(prefix, byte).unwrap();
            assert_eq!(dict.extend(Some(prefix), byte), Some(code));
        }
        for byte in 0..(FEW as u8 + 4) {
            assert_eq!(dict.code_of(&[b'p', byte]), Some(256 + u16::from(byte)));
        }
        assert_eq!(dict.extend(Some(prefix), 0xff), None);
    }

    #[test]
    fn freezes_at_capacity() {
        let mut dict = Dictionary::new();
        let mut code = 0;
        while let Some(next) = dict.derive(code, 0) {
            code = next;
        }
        assert!(dict.is_full());
        assert_eq!(dict.len(), MAX_ENTRIES);
        assert_eq!(dict.derive(0, 1), None);
        assert_eq!(dict.insert(&[0, 1]).unwrap(), None);

        // The longest chain is all zeros, one byte per derivation plus the root.
        let longest = dict.sequence_of(code).unwrap();
        assert_eq!(longest.len(), MAX_ENTRIES - 256 + 1);
        assert!(longest.iter().all(|&b| b == 0));
    }
}
