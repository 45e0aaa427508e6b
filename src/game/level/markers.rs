// Map markers: stairs and portals

use glam::Vec2;

use crate::core::math::Rect;

/// A slope quad, points in world coordinates from the top-left clockwise
#[derive(Debug, Clone, PartialEq)]
pub struct Stair {
    pub points: [Vec2; 4],
    bounds: Rect,
    angle: f32,
}

impl Stair {
    /// Create a stair; bounds and angle are filled in by [`Stair::precalc`]
    pub fn new(points: [Vec2; 4]) -> Self {
        Self {
            points,
            bounds: Rect::default(),
            angle: 0.0,
        }
    }

    /// Cache the bounding box and the top-edge angle
    pub fn precalc(&mut self) {
        self.bounds = Rect::bounding(&self.points);
        self.angle = top_edge_angle(&self.points);
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Angle of the top edge in degrees, counter-clockwise with y up
    pub fn angle(&self) -> f32 {
        self.angle
    }
}

/// Angle of the edge joining the two highest points (smallest screen y).
///
/// Ties on y are broken by x. The edge is measured left to right with the
/// y axis pointing up, so a slope rising to the right is positive.
///
/// This is the visual top edge. Stair data authored against the older
/// convention, which flips y before sorting and so measures the bottom
/// edge, gets a different angle whenever top and bottom are not parallel.
fn top_edge_angle(points: &[Vec2; 4]) -> f32 {
    let mut sorted = *points;
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let (left, right) = if sorted[0].x < sorted[1].x {
        (sorted[0], sorted[1])
    } else {
        (sorted[1], sorted[0])
    };

    let dx = right.x - left.x;
    let dy = left.y - right.y;
    dy.atan2(dx).to_degrees()
}

/// Trigger area leading to a spawn point on another map
#[derive(Debug, Clone, PartialEq)]
pub struct Portal {
    pub map: String,
    pub spawn: String,
    pub rect: Rect,
}

impl Portal {
    /// Build a portal from a `map.spawn` name
    pub fn from_name(name: &str, rect: Rect) -> Option<Self> {
        let (map, spawn) = name.split_once('.')?;
        let (map, spawn) = (map.trim(), spawn.trim());
        if map.is_empty() || spawn.is_empty() {
            return None;
        }
        Some(Self {
            map: map.to_string(),
            spawn: spawn.to_string(),
            rect,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_precalc_bounds_and_rising_angle() {
        let mut stair = Stair::new([
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 20.0),
            Vec2::new(0.0, 20.0),
        ]);
        stair.precalc();
        assert_eq!(stair.bounds(), Rect::new(0.0, 0.0, 10.0, 20.0));
        assert_relative_eq!(stair.angle(), 45.0, epsilon = 1e-4);
    }

    #[test]
    fn test_falling_and_flat_angles() {
        let falling = [
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 20.0),
            Vec2::new(20.0, 40.0),
            Vec2::new(0.0, 40.0),
        ];
        // top two points are (0, 0) and (20, 20)
        assert_relative_eq!(top_edge_angle(&falling), -45.0, epsilon = 1e-4);

        let flat = [
            Vec2::new(0.0, 0.0),
            Vec2::new(30.0, 0.0),
            Vec2::new(30.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert_relative_eq!(top_edge_angle(&flat), 0.0);
    }

    #[test]
    fn test_uses_top_edge_of_uneven_quad() {
        // flat top, bottom sloping down to the right
        let quad = [
            Vec2::new(0.0, 0.0),
            Vec2::new(20.0, 0.0),
            Vec2::new(20.0, 40.0),
            Vec2::new(0.0, 20.0),
        ];
        assert_relative_eq!(top_edge_angle(&quad), 0.0);
    }

    #[test]
    fn test_precalc_is_idempotent() {
        let mut stair = Stair::new([Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y]);
        stair.precalc();
        let first = stair.clone();
        stair.precalc();
        assert_eq!(stair, first);
    }

    #[test]
    fn test_portal_names() {
        let rect = Rect::new(0.0, 0.0, 16.0, 16.0);
        let portal = Portal::from_name("cave . entrance", rect).unwrap();
        assert_eq!(portal.map, "cave");
        assert_eq!(portal.spawn, "entrance");

        assert!(Portal::from_name("cave", rect).is_none());
        assert!(Portal::from_name(".entrance", rect).is_none());
    }
}
