use crate::geometry::Vec2;

use super::SpatialLayout;

/// Resolves a requested displacement one axis at a time so a diagonal move
/// into a wall keeps sliding along it.
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver<'a> {
    layout: &'a SpatialLayout,
}

impl<'a> CollisionResolver<'a> {
    pub fn new(layout: &'a SpatialLayout) -> Self {
        Self { layout }
    }

    /// Returns the corrected position. Each accepted axis lands on a walkable
    /// point; a rejected axis keeps its current coordinate.
    pub fn try_move(&self, current: Vec2, velocity: Vec2) -> Vec2 {
        if velocity.is_zero() {
            return current;
        }

        let mut resolved = current;
        if velocity.x != 0.0 {
            let candidate = Vec2::new(current.x + velocity.x, current.y);
            if self.layout.is_walkable(candidate) {
                resolved.x = candidate.x;
            }
        }

        // Y is tested against the already-resolved X.
        if velocity.y != 0.0 {
            let candidate = Vec2::new(resolved.x, current.y + velocity.y);
            if self.layout.is_walkable(candidate) {
                resolved.y = candidate.y;
            }
        }

        resolved
    }
}
