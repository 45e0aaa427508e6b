// MOB action state machine

use log::trace;

use super::character::Actor;
use crate::config::WanderConfig;
use crate::core::math::Rect;
use crate::core::random::RandomSource;
use crate::engine::physics::Direction;
use crate::engine::renderer::View;

/// What a MOB is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    /// Standing still until told otherwise
    #[default]
    Idle,
    /// Walking in a random direction, re-rolled when the time is up
    Wander,
}

/// Outcome of the five-way direction roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    West,
    North,
    East,
    South,
    /// Stand on the first idle frame for this leg
    Stand,
}

impl Heading {
    /// Map a roll in `0..=4` to a heading (`0` = west, clockwise, `4` = stand)
    pub fn from_roll(roll: i32) -> Self {
        match roll {
            0 => Self::West,
            1 => Self::North,
            2 => Self::East,
            3 => Self::South,
            _ => Self::Stand,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::West => Some(Direction::West),
            Self::North => Some(Direction::North),
            Self::East => Some(Direction::East),
            Self::South => Some(Direction::South),
            Self::Stand => None,
        }
    }
}

/// AI policy state: current action, heading and time left on this leg
#[derive(Debug, Clone)]
pub struct WanderBrain {
    action: Action,
    heading: Heading,
    remaining: f32,
    config: WanderConfig,
}

impl WanderBrain {
    pub fn new(config: WanderConfig) -> Self {
        Self {
            action: Action::Idle,
            heading: Heading::South,
            remaining: 0.0,
            config,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Seconds left before the next re-roll
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn config(&self) -> &WanderConfig {
        &self.config
    }

    fn idle(&mut self) {
        self.action = Action::Idle;
        self.heading = Heading::South;
        self.remaining = 0.0;
    }

    /// Pick a new duration, then a new heading
    fn reroll(&mut self, rng: &mut dyn RandomSource) {
        self.action = Action::Wander;
        let (min, max) = (self.config.min_duration_secs, self.config.max_duration_secs);
        self.remaining = rng.range_inclusive(min, max) as f32;
        self.heading = Heading::from_roll(rng.range_inclusive(0, 4));
    }
}

/// Mobile object: an actor that wanders on its own
#[derive(Debug, Clone)]
pub struct Mob {
    pub actor: Actor,
    brain: WanderBrain,
}

impl Mob {
    /// Wrap an actor; the MOB starts idle
    pub fn new(actor: Actor, config: WanderConfig) -> Self {
        Self {
            actor,
            brain: WanderBrain::new(config),
        }
    }

    pub fn brain(&self) -> &WanderBrain {
        &self.brain
    }

    pub fn action(&self) -> Action {
        self.brain.action
    }

    pub fn heading(&self) -> Heading {
        self.brain.heading
    }

    /// Stop and stand on the first idle frame
    pub fn idle(&mut self) {
        self.brain.idle();
        self.actor.idle();
    }

    /// Start (or restart) wandering with a fresh heading and duration
    pub fn wander(&mut self, rng: &mut dyn RandomSource) {
        self.brain.reroll(rng);
        trace!(
            "mob wanders {:?} for {}s",
            self.brain.heading,
            self.brain.remaining
        );
    }

    /// Advance the state machine by `dt`.
    ///
    /// While time is left on the current leg the MOB keeps walking its
    /// heading; when permitted travel drops below the blocked threshold it
    /// re-rolls straight away but still finishes this tick's animation
    /// and (zero-length) move. Once the leg runs out a wandering MOB
    /// re-rolls; an idle one stays put.
    pub fn update(
        &mut self,
        dt: f32,
        colliders: &[Rect],
        view: &View,
        rng: &mut dyn RandomSource,
    ) {
        if self.brain.remaining <= 0.0 {
            if self.brain.action == Action::Wander {
                self.wander(rng);
            }
            return;
        }

        self.brain.remaining -= dt;
        if self.brain.action != Action::Wander {
            return;
        }

        let Some(direction) = self.brain.heading.direction() else {
            self.actor.idle();
            return;
        };

        let pixels = self.actor.collide(direction, dt, colliders, view);
        if pixels < self.brain.config.blocked_epsilon {
            trace!("mob blocked heading {:?}", direction);
            self.wander(rng);
        }
        self.actor.animate(direction, dt);
        self.actor.move_toward(direction, pixels.round());
    }
}
