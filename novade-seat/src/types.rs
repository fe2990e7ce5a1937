//! Identifiers and geometry shared across the seat modules.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use std::sync::atomic::{AtomicU64, Ordering};

macro_rules! unique_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new, process-unique identifier.
            pub fn new_unique() -> Self {
                static NEXT_ID: AtomicU64 = AtomicU64::new(1);
                $name(NEXT_ID.fetch_add(1, Ordering::Relaxed))
            }

            /// Wraps an identifier handed out by an external system.
            pub const fn from_raw(raw: u64) -> Self {
                $name(raw)
            }

            pub const fn as_raw(self) -> u64 {
                self.0
            }
        }
    };
}

unique_id!(
    /// Identity of a seat (e.g. the one named "seat0").
    SeatId
);
unique_id!(
    /// Identity of a physical or virtual input device.
    DeviceId
);
unique_id!(
    /// Identity of a protocol surface (`wl_surface`).
    SurfaceId
);
unique_id!(
    /// Identity of a connected protocol client.
    ClientId
);
unique_id!(
    /// Identity of a local UI window owned by the compositor.
    WindowId
);
unique_id!(
    /// Identity of the local UI object (shell item) wrapping a surface.
    UiObjectId
);

/// A protocol surface together with the client that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceRef {
    pub id: SurfaceId,
    pub client: ClientId,
}

impl SurfaceRef {
    pub const fn new(id: SurfaceId, client: ClientId) -> Self {
        Self { id, client }
    }
}

/// A 2D point in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub const ZERO: Point = Point::new(0.0, 0.0);
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// An axis-aligned rectangle in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    /// A `size` x `size` square whose center is `center`.
    pub fn square_centered_at(center: Point, size: f64) -> Self {
        let mut rect = Rect::new(0.0, 0.0, size, size);
        rect.move_center(center);
        rect
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Moves the rectangle without resizing it so that its center is `center`.
    pub fn move_center(&mut self, center: Point) {
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids_differ() {
        let a = DeviceId::new_unique();
        let b = DeviceId::new_unique();
        assert_ne!(a, b);
        assert_eq!(DeviceId::from_raw(a.as_raw()), a);
    }

    #[test]
    fn test_square_centered_at() {
        let rect = Rect::square_centered_at(Point::new(10.0, 20.0), 8.0);
        assert_eq!(rect, Rect::new(6.0, 16.0, 8.0, 8.0));
        assert_eq!(rect.center(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_move_center_keeps_size() {
        let mut rect = Rect::new(0.0, 0.0, 8.0, 8.0);
        rect.move_center(Point::new(-3.5, 2.25));
        assert_eq!(rect.width, 8.0);
        assert_eq!(rect.height, 8.0);
        assert_eq!(rect.center(), Point::new(-3.5, 2.25));
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(29.999, 29.999)));
        assert!(!rect.contains(Point::new(30.0, 10.0)));
        assert!(!rect.contains(Point::new(10.0, 30.0)));
    }

    #[test]
    fn test_point_arithmetic() {
        let p = Point::new(5.0, 7.0) - Point::new(1.0, 2.0);
        assert_eq!(p, Point::new(4.0, 5.0));
        assert_eq!(p + Point::ZERO, p);
    }
}
