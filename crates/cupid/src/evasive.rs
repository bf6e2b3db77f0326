use crate::geometry::{Offset, Point, Rect};
use crate::motion::OffsetSpring;
use std::time::Duration;

pub const REACTION_RADIUS: f64 = 120.0; // pointer distance that makes the button flee
pub const STEP_X: f64 = 100.0;
pub const STEP_Y: f64 = 60.0;
pub const MAX_OFFSET_X: f64 = 200.0;
pub const MAX_OFFSET_Y: f64 = 150.0;
pub const CLICK_TOLERANCE: f64 = 3.0; // max distance from center for a click to count

/// Next button offset after the pointer moved to `pointer`.
///
/// Steps are fixed-size and always point away from the pointer; the result is
/// clamped to the `MAX_OFFSET_*` envelope on each axis independently.
pub fn repel(pointer: Point, center: Point, offset: Offset) -> Offset {
    if pointer.distance_to(center) >= REACTION_RADIUS {
        return offset;
    }

    let step_x = if pointer.x > center.x { -STEP_X } else { STEP_X };
    let step_y = if pointer.y > center.y { -STEP_Y } else { STEP_Y };

    Offset::new(
        (offset.x + step_x).clamp(-MAX_OFFSET_X, MAX_OFFSET_X),
        (offset.y + step_y).clamp(-MAX_OFFSET_Y, MAX_OFFSET_Y),
    )
}

pub fn accepts_click(pointer: Point, center: Point) -> bool {
    pointer.distance_to(center) <= CLICK_TOLERANCE
}

/// The "No" button.
///
/// `offset` is where the button wants to be; the rendered position follows it
/// through a spring, and all hit tests use the rendered position.
#[derive(Debug, Clone, Default)]
pub struct EvasiveButton {
    home: Option<Rect>,
    offset: Offset,
    motion: OffsetSpring,
}

impl EvasiveButton {
    /// Place the undisplaced button. Until this is called the button ignores input.
    pub fn set_home(&mut self, rect: Rect) {
        self.home = Some(rect);
    }

    pub fn detach(&mut self) {
        self.home = None;
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn rendered_offset(&self) -> Offset {
        self.motion.value()
    }

    /// Current on-screen rectangle.
    pub fn rect(&self) -> Option<Rect> {
        self.home.map(|r| r.translate(self.rendered_offset()))
    }

    pub fn center(&self) -> Option<Point> {
        self.rect().map(|r| r.center())
    }

    /// Returns `true` if the target offset changed.
    pub fn on_pointer_move(&mut self, pointer: Point) -> bool {
        let Some(rect) = self.rect() else {
            return false;
        };
        if !rect.contains(pointer) {
            return false;
        }

        let next = repel(pointer, rect.center(), self.offset);
        let changed = next != self.offset;
        self.offset = next;
        self.motion.set_target(next);
        changed
    }

    pub fn accepts_click(&self, pointer: Point) -> bool {
        self.center()
            .is_some_and(|center| accepts_click(pointer, center))
    }

    pub fn reset(&mut self) {
        self.offset = Offset::ZERO;
        self.motion.snap(Offset::ZERO);
    }

    pub fn step(&mut self, dt: Duration) {
        self.motion.step(dt);
    }
}
