//! Display width of rendered terminal bytes.
//!
//! Escape sequences are zero width, so styled text measures the same as
//! plain text. Bytes that are not valid UTF-8 are skipped as zero width.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::marker::ESC;

/// Width in terminal cells of `bytes`, which must not span a newline.
pub fn display_width(bytes: &[u8]) -> usize {
    let len = bytes.len();
    let mut width = 0;
    let mut i = 0;

    while i < len {
        if bytes[i] == ESC {
            i = skip_escape_sequence(bytes, i);
            continue;
        }
        // ESC is ASCII, so splitting on it never cuts a UTF-8 sequence.
        let start = i;
        while i < len && bytes[i] != ESC {
            i += 1;
        }
        width += text_width(&bytes[start..i]);
    }

    width
}

fn text_width(bytes: &[u8]) -> usize {
    if bytes.is_ascii() {
        return bytes.iter().filter(|&&b| (0x20..0x7f).contains(&b)).count();
    }

    bytes
        .utf8_chunks()
        .map(|chunk| chunk.valid().graphemes(true).map(grapheme_width).sum::<usize>())
        .sum()
}

/// Width of one grapheme cluster: emoji sequences take two cells, anything
/// else takes the width of its base character.
fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    if (0x1F1E6..=0x1F1FF).contains(&(first as u32)) && grapheme.len() > first.len_utf8() {
        return 2; // regional indicator pair (flag)
    }

    for c in chars {
        match c as u32 {
            0x200D | 0xFE0F | 0x20E3 | 0x1F3FB..=0x1F3FF => return 2,
            _ => {}
        }
    }

    first.width().unwrap_or(0)
}

/// Returns the index just past the escape sequence starting at `pos`.
/// Unterminated sequences run to the end of the input.
fn skip_escape_sequence(bytes: &[u8], pos: usize) -> usize {
    let next = pos + 1;
    match bytes.get(next) {
        None => bytes.len(),
        Some(b'[') => skip_csi(bytes, next + 1),
        Some(b']' | b'P' | b'^' | b'_') => skip_string_terminated(bytes, next + 1),
        Some(0x20..=0x2f) => skip_nf(bytes, next),
        Some(_) => next + 1,
    }
}

/// `ESC <intermediates> <final>`, e.g. the charset designator `ESC ( B`.
fn skip_nf(bytes: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while let Some(&b) = bytes.get(i) {
        match b {
            0x20..=0x2f => i += 1,
            0x30..=0x7e => return i + 1,
            _ => return i,
        }
    }
    bytes.len()
}

fn skip_csi(bytes: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while let Some(&b) = bytes.get(i) {
        if (0x40..=0x7e).contains(&b) {
            return i + 1;
        }
        if !(0x20..=0x7e).contains(&b) {
            return i; // not CSI after all; measure the rest as text
        }
        i += 1;
    }
    bytes.len()
}

fn skip_string_terminated(bytes: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while let Some(&b) = bytes.get(i) {
        match b {
            0x07 => return i + 1,
            ESC if bytes.get(i + 1) == Some(&b'\\') => return i + 2,
            _ => i += 1,
        }
    }
    bytes.len()
}
