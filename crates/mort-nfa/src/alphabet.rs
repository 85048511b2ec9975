use std::fmt::Debug;

use bit_set::BitSet;

pub const ALPHABET_SIZE: usize = 256;

pub const ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_";
pub const ALNUM: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";
pub const NONZERO: &[u8] = b"123456789";
pub const DIGIT: &[u8] = b"0123456789";
pub const HEX_DIGIT: &[u8] = b"0123456789abcdefABCDEF";
pub const OCTAL_DIGIT: &[u8] = b"01234567";

// bytes that may continue an identifier; everything else (and either edge of the input) is a
// non-word position for \b
pub fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Set of raw bytes accepted by a single consuming transition.
///
/// An empty class is legal and never accepts anything, which is how `never()` is built.
#[derive(Clone)]
pub struct ByteClass {
    members: BitSet,
}

impl ByteClass {
    pub fn empty() -> ByteClass {
        ByteClass {
            members: BitSet::with_capacity(ALPHABET_SIZE),
        }
    }

    pub fn of(bytes: &[u8]) -> ByteClass {
        let mut class = Self::empty();
        for b in bytes {
            class.members.insert(*b as usize);
        }
        class
    }

    // "any byte except these"
    pub fn any_but(excluded: &[u8]) -> ByteClass {
        let all_bytes: BitSet = (0..ALPHABET_SIZE).collect();
        let mut class = Self::of(excluded);
        class.members.symmetric_difference_with(&all_bytes);
        class
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.members.contains(byte as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.members.iter().map(|x| x as u8)
    }

    // compact label for graph names, runs of 3+ consecutive bytes collapse to a-z
    pub(crate) fn label(&self) -> String {
        let bytes: Vec<u8> = self.bytes().collect();
        if bytes.len() > 128 {
            let excluded: Vec<u8> = (0..=255u8).filter(|b| !self.contains(*b)).collect();
            return format!("^{}", render_runs(&excluded));
        }
        render_runs(&bytes)
    }
}

fn render_runs(bytes: &[u8]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < bytes.len() {
        let mut j = i;
        while j + 1 < bytes.len() && bytes[j + 1] == bytes[j] + 1 {
            j += 1;
        }
        out.push_str(&bytes[i].escape_ascii().to_string());
        if j - i >= 2 {
            out.push('-');
            out.push_str(&bytes[j].escape_ascii().to_string());
        } else if j > i {
            out.push_str(&bytes[j].escape_ascii().to_string());
        }
        i = j + 1;
    }
    out
}

impl Debug for ByteClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.label())
    }
}

impl From<&[u8]> for ByteClass {
    fn from(bytes: &[u8]) -> Self {
        ByteClass::of(bytes)
    }
}

impl<const N: usize> From<&[u8; N]> for ByteClass {
    fn from(bytes: &[u8; N]) -> Self {
        ByteClass::of(bytes)
    }
}
