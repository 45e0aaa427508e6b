// Axis-separated collision against static rectangles

use crate::core::math::Rect;

/// One of the four movement directions on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    North,
    East,
    South,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::North,
        Direction::East,
        Direction::South,
    ];

    /// Whether the direction moves along the x axis
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Self::West | Self::East)
    }
}

/// Distance the mover may travel this tick before touching an obstacle.
///
/// The candidate distance is `speed * dt`. Obstacles are checked in the
/// order given and only the first one whose near edge the advanced
/// leading edge would reach (while the perpendicular spans overlap) is
/// honoured: the travel is cut to the gap in front of it minus one pixel
/// of clearance. Obstacles later in the list are ignored even if they
/// would block sooner, so sliding into a corner formed by two colliders
/// depends on collider order.
///
/// The result is never negative and never exceeds the candidate.
pub fn permitted_travel(
    direction: Direction,
    dt: f32,
    speed: f32,
    mover: Rect,
    obstacles: &[Rect],
) -> f32 {
    let pixels = speed * dt;

    for other in obstacles {
        let gap = match direction {
            Direction::North => {
                let lead = mover.top - pixels;
                (lead <= other.bottom && lead >= other.top && spans_x(&mover, other))
                    .then_some(mover.top - other.bottom)
            }
            Direction::South => {
                let lead = mover.bottom + pixels;
                (lead >= other.top && lead <= other.bottom && spans_x(&mover, other))
                    .then_some(other.top - mover.bottom)
            }
            Direction::East => {
                let lead = mover.right + pixels;
                (lead >= other.left && lead <= other.right && spans_y(&mover, other))
                    .then_some(other.left - mover.right)
            }
            Direction::West => {
                let lead = mover.left - pixels;
                (lead <= other.right && lead >= other.left && spans_y(&mover, other))
                    .then_some(mover.left - other.right)
            }
        };

        if let Some(gap) = gap {
            return (gap - 1.0).max(0.0);
        }
    }

    pixels
}

/// Horizontal spans overlap; edges that only touch do not count
fn spans_x(a: &Rect, b: &Rect) -> bool {
    a.right > b.left && a.left < b.right
}

/// Vertical spans overlap; edges that only touch do not count
fn spans_y(a: &Rect, b: &Rect) -> bool {
    a.bottom > b.top && a.top < b.bottom
}

/// Broad-phase overlap: true when any corner of `mine` lies strictly
/// inside `other`.
///
/// This is a corner-containment test, so a smaller `other` sitting fully
/// inside `mine` is not reported.
pub fn corners_overlap(mine: Rect, other: Rect) -> bool {
    mine.corners()
        .iter()
        .any(|corner| other.strictly_contains(*corner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const DT: f32 = 0.5;
    const SPEED: f32 = 20.0; // 10 pixels per tick

    fn mover() -> Rect {
        Rect::new(100.0, 100.0, 120.0, 120.0)
    }

    #[test]
    fn test_no_obstacles_returns_full_distance() {
        for direction in Direction::ALL {
            assert_abs_diff_eq!(permitted_travel(direction, DT, SPEED, mover(), &[]), 10.0);
        }
        assert_eq!(permitted_travel(Direction::East, 0.0, SPEED, mover(), &[]), 0.0);
    }

    #[test]
    fn test_blocked_east_keeps_one_pixel_clearance() {
        let wall = Rect::new(125.0, 90.0, 140.0, 130.0);
        let pixels = permitted_travel(Direction::East, DT, SPEED, mover(), &[wall]);
        assert_abs_diff_eq!(pixels, 4.0);
    }

    #[test]
    fn test_blocked_west_mirrors_east() {
        let wall = Rect::new(80.0, 90.0, 95.0, 130.0);
        let pixels = permitted_travel(Direction::West, DT, SPEED, mover(), &[wall]);
        assert_abs_diff_eq!(pixels, 4.0);
    }

    #[test]
    fn test_blocked_north_and_south() {
        let ceiling = Rect::new(90.0, 80.0, 130.0, 97.0);
        let floor = Rect::new(90.0, 126.0, 130.0, 140.0);
        assert_abs_diff_eq!(
            permitted_travel(Direction::North, DT, SPEED, mover(), &[ceiling]),
            2.0
        );
        assert_abs_diff_eq!(
            permitted_travel(Direction::South, DT, SPEED, mover(), &[floor]),
            5.0
        );
    }

    #[test]
    fn test_flush_against_wall_yields_zero() {
        let wall = Rect::new(120.0, 90.0, 140.0, 130.0);
        assert_eq!(permitted_travel(Direction::East, DT, SPEED, mover(), &[wall]), 0.0);

        let close = Rect::new(120.5, 90.0, 140.0, 130.0);
        assert_eq!(permitted_travel(Direction::East, DT, SPEED, mover(), &[close]), 0.0);
    }

    #[test]
    fn test_grazing_perpendicular_edge_passes() {
        // Wall directly to the east but only touching the mover's bottom edge
        let wall = Rect::new(125.0, 120.0, 140.0, 150.0);
        assert_abs_diff_eq!(
            permitted_travel(Direction::East, DT, SPEED, mover(), &[wall]),
            10.0
        );
    }

    #[test]
    fn test_out_of_reach_obstacle_does_not_block() {
        let wall = Rect::new(131.0, 90.0, 140.0, 130.0);
        assert_abs_diff_eq!(
            permitted_travel(Direction::East, DT, SPEED, mover(), &[wall]),
            10.0
        );
    }

    #[test]
    fn test_only_first_blocking_obstacle_is_honoured() {
        let far = Rect::new(128.0, 90.0, 140.0, 130.0);
        let near = Rect::new(123.0, 90.0, 135.0, 130.0);

        // far first: it wins even though near would stop the mover sooner
        let pixels = permitted_travel(Direction::East, DT, SPEED, mover(), &[far, near]);
        assert_abs_diff_eq!(pixels, 7.0);

        let pixels = permitted_travel(Direction::East, DT, SPEED, mover(), &[near, far]);
        assert_abs_diff_eq!(pixels, 2.0);
    }

    #[test]
    fn test_result_within_bounds_for_many_layouts() {
        let mut walls = Vec::new();
        for i in 0..12 {
            let step = i as f32 * 4.0;
            walls.push(Rect::new(80.0 + step, 80.0 + step, 96.0 + step, 96.0 + step));
        }
        for direction in Direction::ALL {
            for wall in &walls {
                let pixels = permitted_travel(direction, DT, SPEED, mover(), &[*wall]);
                assert!(pixels >= 0.0 && pixels <= SPEED * DT, "{direction:?} {pixels}");
            }
            let pixels = permitted_travel(direction, DT, SPEED, mover(), &walls);
            assert!(pixels >= 0.0 && pixels <= SPEED * DT);
        }
    }

    #[test]
    fn test_corners_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(corners_overlap(a, Rect::new(5.0, 5.0, 20.0, 20.0)));
        assert!(!corners_overlap(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
        // fully contained smaller rect has no corner of `a` inside it
        assert!(!corners_overlap(a, Rect::new(2.0, 2.0, 4.0, 4.0)));
    }

    #[test]
    fn test_direction_axis() {
        assert!(Direction::West.is_horizontal());
        assert!(!Direction::South.is_horizontal());
    }
}
