//! Per-device touch point tracking and frame batching.
//!
//! Touch hardware reports individual point transitions (down, motion, up)
//! while the touch protocol groups them into frames. A [`TouchTracker`]
//! accumulates the transitions of one device and hands out one coherent
//! snapshot per frame.
//!
//! Point life-cycle inside a frame:
//!
//! - A point goes down as `Pressed` and stays `Pressed` until the next frame
//!   even if it moves in between.
//! - Motion turns a steady point into `Updated`, or `Stationary` when the
//!   position did not change. `Released` points are never resurrected.
//! - After a frame is taken, `Released` points are dropped and `Pressed` /
//!   `Updated` points decay to `Stationary`.
//!
//! The tracker itself never emits anything. It tells the seat when a frame
//! has to be forced (an identifier is reused before its release was
//! flushed, or every point is lifted) and the seat delivers the frame.

use tracing::{debug, trace, warn};

use crate::logging::TOUCH_EVENTS_TARGET;
use crate::types::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPointState {
    Pressed,
    Updated,
    Stationary,
    Released,
}

/// One live touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Device-scoped identifier, reusable once the point has been flushed.
    pub id: i32,
    /// Position as last reported by the device.
    pub position: Point,
    /// Contact area, centered on `position`.
    pub area: Rect,
    pub state: TouchPointState,
}

impl TouchPoint {
    pub fn position(&self) -> Point {
        self.position
    }
}

/// Snapshot of every point of a device at a frame boundary, in the order
/// the points went down.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchFrame {
    pub points: Vec<TouchPoint>,
}

impl TouchFrame {
    pub fn point(&self, id: i32) -> Option<&TouchPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn all(&self, state: TouchPointState) -> bool {
        self.points.iter().all(|p| p.state == state)
    }
}

#[derive(Debug, Clone)]
pub struct TouchTracker {
    points: Vec<TouchPoint>,
    contact_size: f64,
}

impl TouchTracker {
    pub fn new(contact_size: f64) -> Self {
        Self {
            points: Vec::new(),
            contact_size,
        }
    }

    pub fn points(&self) -> &[TouchPoint] {
        &self.points
    }

    pub fn point(&self, id: i32) -> Option<&TouchPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    fn point_mut(&mut self, id: i32) -> Option<&mut TouchPoint> {
        self.points.iter_mut().find(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether a down for `id` must be preceded by a frame: the identifier
    /// is still held by a released point that no frame has reported yet.
    pub fn needs_flush_before_down(&self, id: i32) -> bool {
        matches!(self.point(id), Some(p) if p.state == TouchPointState::Released)
    }

    /// Appends a new `Pressed` point for `id` at `position`.
    ///
    /// Call [`needs_flush_before_down`](Self::needs_flush_before_down) and
    /// flush first; an identifier that is still occupied here replaces the
    /// old point.
    pub fn down(&mut self, id: i32, position: Point) {
        if let Some(index) = self.points.iter().position(|p| p.id == id) {
            warn!(
                "TouchTracker: Inconsistent touch state, got 'Down' but touch id {} is not released ({:?}).",
                id, self.points[index].state
            );
            self.points.remove(index);
        }

        self.points.push(TouchPoint {
            id,
            position,
            area: Rect::square_centered_at(position, self.contact_size),
            state: TouchPointState::Pressed,
        });
        trace!(target: TOUCH_EVENTS_TARGET, "Touch down, touch id: {}, at position {:?}", id, position);
    }

    /// Records a move of `id` to `position`. Returns `false` for an unknown
    /// point.
    pub fn motion(&mut self, id: i32, position: Point) -> bool {
        let Some(point) = self.point_mut(id) else {
            warn!("TouchTracker: Inconsistent touch state, got 'Motion' without 'Down' (touch id {}).", id);
            return false;
        };

        let new_state = if point.position == position {
            TouchPointState::Stationary
        } else {
            point.position = position;
            point.area.move_center(position);
            TouchPointState::Updated
        };
        // A point pressed in this frame reports Pressed until the frame ends.
        if !matches!(point.state, TouchPointState::Pressed | TouchPointState::Released) {
            point.state = new_state;
        }
        trace!(
            target: TOUCH_EVENTS_TARGET,
            "Touch move, touch id: {}, to position: {:?}, state of the point: {:?}",
            id, position, point.state
        );
        true
    }

    /// Marks `id` released. Returns `true` when every point of the device is
    /// now released, in which case a frame has to be forced.
    pub fn up(&mut self, id: i32) -> bool {
        let Some(point) = self.point_mut(id) else {
            warn!("TouchTracker: Inconsistent touch state, got 'Up' without 'Down' (touch id {}).", id);
            return false;
        };
        point.state = TouchPointState::Released;
        let position = point.position;

        let all_released = self
            .points
            .iter()
            .all(|p| p.state == TouchPointState::Released);
        trace!(
            target: TOUCH_EVENTS_TARGET,
            "Touch up, touch id: {}, at position: {:?}, all points released: {}",
            id, position, all_released
        );
        if !all_released {
            debug!(target: TOUCH_EVENTS_TARGET, "Waiting for all points to be released.");
        }
        all_released
    }

    /// Takes the frame snapshot and advances the points past the frame
    /// boundary. Returns `None` when there is nothing to report.
    pub fn frame(&mut self) -> Option<TouchFrame> {
        if self.points.is_empty() {
            return None;
        }

        let frame = TouchFrame {
            points: self.points.clone(),
        };
        self.points.retain(|p| p.state != TouchPointState::Released);
        for point in &mut self.points {
            if matches!(point.state, TouchPointState::Pressed | TouchPointState::Updated) {
                point.state = TouchPointState::Stationary;
            }
        }
        trace!(target: TOUCH_EVENTS_TARGET, "Touch frame, handled state: {:?}", frame.points);
        Some(frame)
    }
}
