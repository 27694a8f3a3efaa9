use serde::{Deserialize, Serialize};

use crate::event::PointerEvent;

/// A 0-based (column, row) cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub column: usize,
    pub row: usize,
}

impl Position {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

/// Where a marked region landed in the last scanned frame.
///
/// `Zone::default()` is the empty zone returned for ids that have not been
/// seen (yet). Check [`Zone::is_zero`] before trusting the coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    id: String,
    iteration: u64,
    start: Option<Position>,
    end: Option<Position>,
}

impl Zone {
    pub fn new(id: impl Into<String>, start: Position, end: Position) -> Self {
        Self::with_iteration(id, 0, start, end)
    }

    pub(crate) fn with_iteration(
        id: impl Into<String>,
        iteration: u64,
        start: Position,
        end: Position,
    ) -> Self {
        Self {
            id: id.into(),
            iteration,
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Scan pass that produced this zone.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// First cell of the zone.
    pub fn start(&self) -> Option<Position> {
        self.start
    }

    /// Last occupied cell of the zone.
    pub fn end(&self) -> Option<Position> {
        self.end
    }

    /// True for the empty zone, or when either side is missing.
    pub fn is_zero(&self) -> bool {
        self.id.is_empty() || self.start.is_none() || self.end.is_none()
    }

    fn bounds(&self) -> Option<(Position, Position)> {
        if self.is_zero() {
            return None;
        }
        let (start, end) = (self.start?, self.end?);
        if start.column > end.column || start.row > end.row {
            return None;
        }
        Some((start, end))
    }

    /// Whether `event` falls inside the zone.
    ///
    /// The zone is treated as the rectangle from `start` to `end`, with the
    /// end cell included. Zones whose end lies left of or above their start
    /// never match.
    pub fn in_bounds(&self, event: &PointerEvent) -> bool {
        let Some((start, end)) = self.bounds() else {
            return false;
        };
        let (column, row) = (usize::from(event.column), usize::from(event.row));

        if column < start.column || row < start.row {
            return false;
        }
        if column > end.column || row > end.row {
            return false;
        }
        true
    }

    /// Offset of `event` from the zone's start, or `(-1, -1)` when the zone
    /// is empty.
    pub fn offset(&self, event: &PointerEvent) -> (isize, isize) {
        match self.start {
            Some(start) if !self.is_zero() => (
                event.column as isize - start.column as isize,
                event.row as isize - start.row as isize,
            ),
            _ => (-1, -1),
        }
    }

    /// Alias for [`Zone::offset`].
    pub fn pos(&self, event: &PointerEvent) -> (isize, isize) {
        self.offset(event)
    }
}
