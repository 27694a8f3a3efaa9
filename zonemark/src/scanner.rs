//! Single-pass frame scanner.
//!
//! Walks the composed frame once, copying everything except known markers
//! into the output. Line and column bookkeeping is done against the output,
//! so positions describe the frame as it will actually be drawn.
//!
//! Anything that is not a well-formed marker allocated by this manager
//! (truncated sequences, stray ESC bytes, real `CSI n Z` codes) is copied
//! through untouched.

use std::sync::Arc;

use crate::marker::{self, ESC};
use crate::registry::Registry;
use crate::width::display_width;
use crate::zone::{Position, Zone};

/// A zone whose opening marker has been seen but not its closing one.
#[derive(Debug)]
struct OpenZone {
    number: u64,
    id: Arc<str>,
    start: Position,
}

/// Summary of one pass, for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScanStats {
    pub markers: usize,
    pub zones: usize,
    pub unclosed: usize,
}

pub(crate) struct Scanner<'a> {
    registry: &'a Registry,
    iteration: u64,
    out: Vec<u8>,
    /// Newlines copied so far.
    line: usize,
    /// Offset into `out` where the current line begins.
    line_start: usize,
    /// Width of `out[line_start..measured_upto]`, reused by later markers on
    /// the same line.
    measured_upto: usize,
    measured_width: usize,
    open: Vec<OpenZone>,
    stats: ScanStats,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(registry: &'a Registry, iteration: u64) -> Self {
        Self {
            registry,
            iteration,
            out: Vec::new(),
            line: 0,
            line_start: 0,
            measured_upto: 0,
            measured_width: 0,
            open: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    /// Scan `input`, handing every completed zone to `emit`. Returns the
    /// input with all known markers removed.
    pub(crate) fn run(mut self, input: &[u8], mut emit: impl FnMut(Zone)) -> (Vec<u8>, ScanStats) {
        self.out.reserve_exact(input.len());
        let len = input.len();
        let mut pos = 0;

        while pos < len {
            let next = input[pos..]
                .iter()
                .position(|&b| b == ESC)
                .map_or(len, |n| pos + n);
            self.copy(&input[pos..next]);
            pos = next;
            if pos == len {
                break;
            }

            match marker::parse(input, pos) {
                Some((number, seq_len)) => {
                    if !self.on_marker(number, &mut emit) {
                        // Well formed, but not ours.
                        self.copy(&input[pos..pos + seq_len]);
                    }
                    pos += seq_len;
                }
                None => {
                    self.out.push(ESC);
                    pos += 1;
                }
            }
        }

        self.stats.unclosed = self.open.len();
        (self.out, self.stats)
    }

    fn copy(&mut self, chunk: &[u8]) {
        if let Some(last) = chunk.iter().rposition(|&b| b == b'\n') {
            self.line += chunk.iter().filter(|&&b| b == b'\n').count();
            self.line_start = self.out.len() + last + 1;
            self.measured_upto = self.line_start;
            self.measured_width = 0;
        }
        self.out.extend_from_slice(chunk);
    }

    /// Handle marker `number` at the current output offset. Returns false
    /// when the registry does not know it, leaving it to the caller to copy.
    fn on_marker(&mut self, number: u64, emit: &mut impl FnMut(Zone)) -> bool {
        let column = self.column();

        // Second sighting closes the zone.
        if let Some(idx) = self.open.iter().rposition(|z| z.number == number) {
            let open = self.open.swap_remove(idx);
            self.stats.markers += 1;
            if open.start.row == self.line && column <= open.start.column {
                // Nothing visible between the markers.
                return true;
            }
            let end = Position::new(column.saturating_sub(1), self.line);
            self.stats.zones += 1;
            emit(Zone::with_iteration(
                open.id.as_ref(),
                self.iteration,
                open.start,
                end,
            ));
            return true;
        }

        let Some(id) = self.registry.resolve(number) else {
            return false;
        };
        self.stats.markers += 1;
        self.open.push(OpenZone {
            number,
            id,
            start: Position::new(column, self.line),
        });
        true
    }

    /// Display width from the start of the current line to the end of `out`.
    fn column(&mut self) -> usize {
        self.measured_width += display_width(&self.out[self.measured_upto..]);
        self.measured_upto = self.out.len();
        self.measured_width
    }
}
