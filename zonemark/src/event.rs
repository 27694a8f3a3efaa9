//! Pointer events as the bounds predicate sees them.

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    Press,
    Release,
    Motion,
    Drag,
    Wheel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    WheelUp,
    WheelDown,
    WheelLeft,
    WheelRight,
}

/// A pointer event in 0-based terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerEvent {
    pub column: u16,
    pub row: u16,
    pub action: PointerAction,
    pub button: Option<PointerButton>,
}

impl PointerEvent {
    pub fn new(column: u16, row: u16, action: PointerAction) -> Self {
        Self {
            column,
            row,
            action,
            button: None,
        }
    }

    /// A bare motion event at (column, row).
    pub fn at(column: u16, row: u16) -> Self {
        Self::new(column, row, PointerAction::Motion)
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = Some(button);
        self
    }
}

#[cfg(feature = "crossterm")]
mod crossterm_impl {
    use super::{PointerAction, PointerButton, PointerEvent};
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

    impl From<MouseButton> for PointerButton {
        fn from(button: MouseButton) -> Self {
            match button {
                MouseButton::Left => PointerButton::Left,
                MouseButton::Right => PointerButton::Right,
                MouseButton::Middle => PointerButton::Middle,
            }
        }
    }

    impl From<MouseEvent> for PointerEvent {
        fn from(ev: MouseEvent) -> Self {
            let (action, button) = match ev.kind {
                MouseEventKind::Down(b) => (PointerAction::Press, Some(b.into())),
                MouseEventKind::Up(b) => (PointerAction::Release, Some(b.into())),
                MouseEventKind::Drag(b) => (PointerAction::Drag, Some(b.into())),
                MouseEventKind::Moved => (PointerAction::Motion, None),
                MouseEventKind::ScrollUp => (PointerAction::Wheel, Some(PointerButton::WheelUp)),
                MouseEventKind::ScrollDown => {
                    (PointerAction::Wheel, Some(PointerButton::WheelDown))
                }
                MouseEventKind::ScrollLeft => {
                    (PointerAction::Wheel, Some(PointerButton::WheelLeft))
                }
                MouseEventKind::ScrollRight => {
                    (PointerAction::Wheel, Some(PointerButton::WheelRight))
                }
            };

            PointerEvent {
                column: ev.column,
                row: ev.row,
                action,
                button,
            }
        }
    }
}
