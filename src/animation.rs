// Slide animation module
// Interpolates page slot geometry during a transition

use crate::carousel::Direction;
use crate::layout::{BannerLayout, Rect};
use std::time::{Duration, Instant};

/// Time for the center page to slide in
pub const CENTER_DURATION: Duration = Duration::from_millis(250);

/// Time for the side pages to slide out from behind the center
pub const SIDE_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Left,
    Center,
    Right,
}

/// Slot rectangles for one frame, plus bottom-to-top paint order
#[derive(Debug, Clone, PartialEq)]
pub struct SlotFrame {
    pub left: Rect,
    pub center: Rect,
    pub right: Rect,
    pub order: [Slot; 3],
}

impl SlotFrame {
    /// Resting geometry with no transition running
    pub fn docked(layout: &BannerLayout) -> Self {
        Self {
            left: layout.left,
            center: layout.center,
            right: layout.right,
            order: [Slot::Left, Slot::Right, Slot::Center],
        }
    }

    pub fn rect(&self, slot: Slot) -> Rect {
        match slot {
            Slot::Left => self.left,
            Slot::Center => self.center,
            Slot::Right => self.right,
        }
    }
}

/// A running slide transition
#[derive(Debug, Clone, Copy)]
pub struct SlideAnimation {
    direction: Direction,
    started: Instant,
}

impl SlideAnimation {
    pub fn new(direction: Direction, started: Instant) -> Self {
        Self { direction, started }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= CENTER_DURATION
    }

    pub fn frame(&self, layout: &BannerLayout, now: Instant) -> SlotFrame {
        let elapsed = now.saturating_duration_since(self.started);
        let center_t = progress(elapsed, CENTER_DURATION);
        let side_t = progress(elapsed, SIDE_DURATION);

        let tucked = layout.tucked();
        let center_from = match self.direction {
            Direction::Next => layout.right,
            Direction::Previous => layout.left,
            Direction::Stay => layout.center,
        };

        // The page leaving the center ends up on top of the other side page
        let order = match self.direction {
            Direction::Next => [Slot::Right, Slot::Left, Slot::Center],
            Direction::Previous | Direction::Stay => [Slot::Left, Slot::Right, Slot::Center],
        };

        SlotFrame {
            left: tucked.lerp(&layout.left, side_t),
            center: center_from.lerp(&layout.center, center_t),
            right: tucked.lerp(&layout.right, side_t),
            order,
        }
    }
}

fn progress(elapsed: Duration, total: Duration) -> f32 {
    (elapsed.as_secs_f32() / total.as_secs_f32()).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::preferred_size;

    fn layout() -> BannerLayout {
        let (width, height) = preferred_size();
        BannerLayout::new(width, height, 3)
    }

    #[test]
    fn next_slides_center_in_from_the_right() {
        let layout = layout();
        let t0 = Instant::now();
        let animation = SlideAnimation::new(Direction::Next, t0);

        let first = animation.frame(&layout, t0);
        assert_eq!(first.center, layout.right);
        assert_eq!(first.left, layout.tucked());
        assert_eq!(first.right, layout.tucked());
        assert_eq!(first.order, [Slot::Right, Slot::Left, Slot::Center]);
    }

    #[test]
    fn previous_slides_center_in_from_the_left() {
        let layout = layout();
        let t0 = Instant::now();
        let frame = SlideAnimation::new(Direction::Previous, t0).frame(&layout, t0);
        assert_eq!(frame.center, layout.left);
        assert_eq!(frame.order[2], Slot::Center);
    }

    #[test]
    fn sides_dock_before_center() {
        let layout = layout();
        let t0 = Instant::now();
        let animation = SlideAnimation::new(Direction::Next, t0);

        let frame = animation.frame(&layout, t0 + SIDE_DURATION);
        assert_eq!(frame.left, layout.left);
        assert_eq!(frame.right, layout.right);
        assert_ne!(frame.center, layout.center);
        assert!(!animation.is_finished(t0 + SIDE_DURATION));

        let end = t0 + CENTER_DURATION;
        assert_eq!(animation.frame(&layout, end), SlotFrame {
            order: [Slot::Right, Slot::Left, Slot::Center],
            ..SlotFrame::docked(&layout)
        });
        assert!(animation.is_finished(end));
    }

    #[test]
    fn stay_keeps_center_docked() {
        let layout = layout();
        let t0 = Instant::now();
        let frame = SlideAnimation::new(Direction::Stay, t0).frame(&layout, t0 + Duration::from_millis(50));
        assert_eq!(frame.center, layout.center);
    }

    #[test]
    fn halfway_center_is_between_slots() {
        let layout = layout();
        let t0 = Instant::now();
        let frame = SlideAnimation::new(Direction::Next, t0).frame(&layout, t0 + CENTER_DURATION / 2);
        assert!(frame.center.x > layout.center.x && frame.center.x < layout.right.x);
    }
}
