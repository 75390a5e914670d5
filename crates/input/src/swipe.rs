//! Mouse drags as swipes.
//!
//! A press followed by a release of the left button is one swipe. The axis
//! with the larger displacement picks the direction; a tie counts as
//! vertical. Terminal rows are about twice as tall as columns, so row
//! distances are doubled before comparing.

use crate::types::Direction;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Column-to-row aspect used to compare drag distances
pub const ROW_ASPECT: i32 = 2;

/// Direction of a swipe by displacement, or `None` for no displacement.
///
/// `dx` grows to the right and `dy` grows downward.
pub fn swipe_direction(dx: i32, dy: i32) -> Option<Direction> {
    if dx == 0 && dy == 0 {
        return None;
    }
    if dx.abs() > dy.abs() {
        Some(if dx > 0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0 { Direction::Down } else { Direction::Up })
    }
}

/// Tracks one left-button drag at a time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    /// Feed a mouse event; returns a direction when a drag completes.
    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<Direction> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start = Some((event.column, event.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (x0, y0) = self.start.take()?;
                let dx = i32::from(event.column) - i32::from(x0);
                let dy = (i32::from(event.row) - i32::from(y0)) * ROW_ASPECT;
                swipe_direction(dx, dy)
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.start = None;
    }
}
