//! Marker syntax.
//!
//! A zone marker is the CSI sequence `ESC [ <n> Z`. Renderers that measure
//! width skip CSI sequences, so wrapping text in markers never changes layout.
//! The same sequence opens and closes a zone.
//!
//! Marker numbers start above 1000 so they never collide with a real
//! `CSI n Z` (cursor backward tabulation) emitted by a styling library.

use std::sync::atomic::{AtomicU64, Ordering};

pub(crate) const ESC: u8 = 0x1b;
const BRACKET: u8 = b'[';
const TERMINATOR: u8 = b'Z';

const MARKER_SEED: u64 = 1000;

// Process-wide, so markers stay unique across managers.
static MARKER_COUNTER: AtomicU64 = AtomicU64::new(MARKER_SEED);
static PREFIX_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Allocate the next marker number.
pub(crate) fn next_number() -> u64 {
    MARKER_COUNTER.fetch_add(1, Ordering::Relaxed) + 1
}

/// Render a marker number as its control sequence.
pub(crate) fn encode(number: u64) -> String {
    format!("\x1b[{number}Z")
}

/// Generate an id prefix (`zone_<n>__`). Every call returns a new one, so
/// components that compose ids from it never overlap.
pub fn new_prefix() -> String {
    let n = PREFIX_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
    format!("zone_{n}__")
}

/// Parse a marker at `pos`, which should point at an ESC byte.
///
/// Returns the marker number and the length of the sequence in bytes, or
/// `None` when the bytes are anything other than a well-formed marker: no
/// bracket, no digits, a leading zero, a non-digit before `Z`, a missing `Z`,
/// or a number too large for `u64`.
pub(crate) fn parse(bytes: &[u8], pos: usize) -> Option<(u64, usize)> {
    let rest = bytes.get(pos..)?;
    if rest.first() != Some(&ESC) || rest.get(1) != Some(&BRACKET) {
        return None;
    }

    // Our markers never start with 0; accepting one would let two byte
    // strings map to the same id.
    if rest.get(2) == Some(&b'0') {
        return None;
    }

    let mut number: u64 = 0;
    let mut i = 2;
    while let Some(&b) = rest.get(i) {
        match b {
            b'0'..=b'9' => {
                number = number.checked_mul(10)?.checked_add(u64::from(b - b'0'))?;
                i += 1;
            }
            TERMINATOR if i > 2 => return Some((number, i + 1)),
            _ => return None,
        }
    }

    None
}
