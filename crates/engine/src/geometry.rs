use serde::{Deserialize, Serialize};

/// Map-space coordinate. `y` grows downward, matching screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn distance_squared(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl core::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Self) -> Self::Output {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// Containment is half-open: the left and top edges are inside, the right and
/// bottom edges are not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2 {
            x: self.x + self.width * 0.5,
            y: self.y + self.height * 0.5,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        point.x >= self.x && point.y >= self.y && point.x < self.right() && point.y < self.bottom()
    }

    /// Closed-interval containment, used for the corridor bounds.
    pub fn contains_inclusive(&self, point: Vec2) -> bool {
        point.x >= self.x && point.y >= self.y && point.x <= self.right() && point.y <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    /// Circle inscribed in the square `(x, y, diameter, diameter)`.
    pub fn inscribed(x: f32, y: f32, diameter: f32) -> Self {
        let radius = diameter * 0.5;
        Self {
            center: Vec2::new(x + radius, y + radius),
            radius,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance_squared(point) < self.radius * self.radius
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }
}
