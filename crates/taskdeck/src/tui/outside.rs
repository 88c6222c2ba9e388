//! Detects mouse presses that land outside a tracked region.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// Tracks the screen area of an open overlay.
///
/// While an area is tracked, a left-button press outside it reports as an
/// outside click. Nothing is reported when no area is tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct ClickOutside {
    area: Option<Rect>,
}

impl ClickOutside {
    pub(super) const fn track(&mut self, area: Rect) {
        self.area = Some(area);
    }

    pub(super) const fn release(&mut self) {
        self.area = None;
    }

    pub(super) const fn area(&self) -> Option<Rect> {
        self.area
    }

    /// Whether `event` is a left-button press outside the tracked area.
    pub(super) fn is_outside(&self, event: &MouseEvent) -> bool {
        let Some(area) = self.area else {
            return false;
        };
        matches!(event.kind, MouseEventKind::Down(MouseButton::Left))
            && !area.contains(Position::new(event.column, event.row))
    }
}
