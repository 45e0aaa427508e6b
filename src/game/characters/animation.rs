// Actor animation tables

use serde::Deserialize;

use crate::engine::physics::Direction;

/// Which table of an [`AnimationSet`] is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Idle,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
}

impl Track {
    /// Track played while moving in `direction`
    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::MoveUp,
            Direction::South => Self::MoveDown,
            Direction::West => Self::MoveLeft,
            Direction::East => Self::MoveRight,
        }
    }
}

/// Frame tables for one actor plus the interval between frames
///
/// Tables hold atlas cell indices. All tables share one interval.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "AnimationSpec")]
pub struct AnimationSet {
    pub idle: Vec<u32>,
    pub move_up: Vec<u32>,
    pub move_down: Vec<u32>,
    pub move_left: Vec<u32>,
    pub move_right: Vec<u32>,
    /// Seconds between frame advances
    pub interval: f32,
}

impl AnimationSet {
    /// Build a set whose interval is given in hundredths of a second
    pub fn from_centiseconds(speed: f32) -> Self {
        Self {
            interval: speed / 100.0,
            ..Self::default()
        }
    }

    pub fn with_idle(mut self, frames: Vec<u32>) -> Self {
        self.idle = frames;
        self
    }

    /// Set the four movement tables
    pub fn with_moves(
        mut self,
        up: Vec<u32>,
        down: Vec<u32>,
        left: Vec<u32>,
        right: Vec<u32>,
    ) -> Self {
        self.move_up = up;
        self.move_down = down;
        self.move_left = left;
        self.move_right = right;
        self
    }

    pub fn table(&self, track: Track) -> &[u32] {
        match track {
            Track::Idle => &self.idle,
            Track::MoveUp => &self.move_up,
            Track::MoveDown => &self.move_down,
            Track::MoveLeft => &self.move_left,
            Track::MoveRight => &self.move_right,
        }
    }

    /// First idle frame, if there is one
    pub fn rest_frame(&self) -> Option<u32> {
        self.idle.first().copied()
    }
}

/// Animation definition as written in configuration (`speed` in
/// hundredths of a second)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AnimationSpec {
    speed: f32,
    idle: Vec<u32>,
    move_up: Vec<u32>,
    move_down: Vec<u32>,
    move_left: Vec<u32>,
    move_right: Vec<u32>,
}

impl From<AnimationSpec> for AnimationSet {
    fn from(spec: AnimationSpec) -> Self {
        AnimationSet::from_centiseconds(spec.speed)
            .with_idle(spec.idle)
            .with_moves(spec.move_up, spec.move_down, spec.move_left, spec.move_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_centiseconds_to_seconds() {
        let set = AnimationSet::from_centiseconds(25.0);
        assert_relative_eq!(set.interval, 0.25);
    }

    #[test]
    fn test_track_tables() {
        let set = AnimationSet::from_centiseconds(10.0)
            .with_idle(vec![0])
            .with_moves(vec![1, 2], vec![3, 4], vec![5, 6], vec![7, 8]);
        assert_eq!(set.table(Track::for_direction(Direction::North)), &[1, 2]);
        assert_eq!(set.table(Track::for_direction(Direction::West)), &[5, 6]);
        assert_eq!(set.table(Track::Idle), &[0]);
        assert_eq!(set.rest_frame(), Some(0));
    }

    #[test]
    fn test_deserialize_from_definition() {
        let set: AnimationSet = ron::from_str(
            "(speed: 20.0, idle: [0, 1], move_up: [9, 10, 11], move_right: [6, 7, 8])",
        )
        .unwrap();
        assert_relative_eq!(set.interval, 0.2);
        assert_eq!(set.idle, vec![0, 1]);
        assert_eq!(set.move_up, vec![9, 10, 11]);
        assert!(set.move_down.is_empty());
    }

    #[test]
    fn test_empty_set_has_no_rest_frame() {
        assert_eq!(AnimationSet::default().rest_frame(), None);
    }
}
