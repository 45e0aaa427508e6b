// Actor: a sprite that collides, animates and moves

use glam::Vec2;

use super::animation::{AnimationSet, Track};
use super::sprite::Sprite;
use super::stats::ActorStats;
use crate::core::math::Rect;
use crate::core::timer::FrameTimer;
use crate::engine::physics::{self, corners_overlap, ColliderBox, Direction};
use crate::engine::renderer::{DrawTarget, View};

/// Vertical part of the movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Vertical {
    #[default]
    None,
    North,
    South,
}

/// Horizontal part of the movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizontal {
    #[default]
    None,
    West,
    East,
}

/// A sprite with stats, a hit-box and directional animation.
///
/// Each tick a mover calls the three steps for one direction together:
/// [`collide`](Self::collide) for the permitted distance,
/// [`animate`](Self::animate) to pick the frame and
/// [`move_toward`](Self::move_toward) to apply the (rounded) distance.
/// Horizontal and vertical moves keep separate frame timers so a
/// diagonal walk animates both axes without one resetting the other.
#[derive(Debug, Clone)]
pub struct Actor {
    pub sprite: Sprite,
    stats: ActorStats,
    collider: ColliderBox,
    animation: AnimationSet,

    vertical: Vertical,
    horizontal: Horizontal,

    timer_h: FrameTimer,
    timer_v: FrameTimer,
    timer_idle: FrameTimer,
}

impl Actor {
    /// Create an actor whose collider covers the whole footprint
    pub fn new(sprite: Sprite, stats: ActorStats, animation: AnimationSet) -> Self {
        let collider = ColliderBox::full(sprite.scaled_size());
        let interval = animation.interval;
        Self {
            sprite,
            stats,
            collider,
            animation,
            vertical: Vertical::None,
            horizontal: Horizontal::None,
            timer_h: FrameTimer::new(interval),
            timer_v: FrameTimer::new(interval),
            timer_idle: FrameTimer::new(interval),
        }
    }

    /// Replace the default hit-box (screen pixels, already scaled)
    pub fn with_collider(mut self, collider: ColliderBox) -> Self {
        self.collider = collider;
        self
    }

    pub fn stats(&self) -> &ActorStats {
        &self.stats
    }

    pub fn collider(&self) -> &ColliderBox {
        &self.collider
    }

    pub fn animation(&self) -> &AnimationSet {
        &self.animation
    }

    pub fn position(&self) -> Vec2 {
        self.sprite.position
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.sprite.set_position(x, y);
    }

    /// Frame selected for the next draw
    pub fn current_frame(&self) -> u32 {
        self.sprite.cell()
    }

    pub fn vertical(&self) -> Vertical {
        self.vertical
    }

    pub fn horizontal(&self) -> Horizontal {
        self.horizontal
    }

    /// Hit-box in screen space
    pub fn collider_rect(&self, view: &View) -> Rect {
        physics::collider_rect(
            self.sprite.position,
            self.sprite.half_extents(),
            &self.collider,
            view.origin(),
        )
    }

    /// Pixels this actor may travel in `direction` during `dt`
    pub fn collide(&self, direction: Direction, dt: f32, colliders: &[Rect], view: &View) -> f32 {
        physics::permitted_travel(
            direction,
            dt,
            self.stats.speed,
            self.collider_rect(view),
            colliders,
        )
    }

    /// Advance the timer of the axis `direction` belongs to and select
    /// the frame from its table
    pub fn animate(&mut self, direction: Direction, dt: f32) {
        let timer = if direction.is_horizontal() {
            &mut self.timer_h
        } else {
            &mut self.timer_v
        };
        let table = self.animation.table(Track::for_direction(direction));
        let index = timer.advance(dt, table.len());
        if let Some(frame) = table.get(index).copied() {
            self.sprite.set_cell(frame);
        }
    }

    pub fn animate_up(&mut self, dt: f32) {
        self.animate(Direction::North, dt);
    }

    pub fn animate_down(&mut self, dt: f32) {
        self.animate(Direction::South, dt);
    }

    pub fn animate_left(&mut self, dt: f32) {
        self.animate(Direction::West, dt);
    }

    pub fn animate_right(&mut self, dt: f32) {
        self.animate(Direction::East, dt);
    }

    /// Record the direction and shift the position by `pixels`
    pub fn move_toward(&mut self, direction: Direction, pixels: f32) {
        let position = &mut self.sprite.position;
        match direction {
            Direction::North => {
                self.vertical = Vertical::North;
                position.y -= pixels;
            }
            Direction::South => {
                self.vertical = Vertical::South;
                position.y += pixels;
            }
            Direction::West => {
                self.horizontal = Horizontal::West;
                position.x -= pixels;
            }
            Direction::East => {
                self.horizontal = Horizontal::East;
                position.x += pixels;
            }
        }
    }

    pub fn move_up(&mut self, pixels: f32) {
        self.move_toward(Direction::North, pixels);
    }

    pub fn move_down(&mut self, pixels: f32) {
        self.move_toward(Direction::South, pixels);
    }

    pub fn move_left(&mut self, pixels: f32) {
        self.move_toward(Direction::West, pixels);
    }

    pub fn move_right(&mut self, pixels: f32) {
        self.move_toward(Direction::East, pixels);
    }

    /// Stand still on the first idle frame. No timer advances.
    pub fn idle(&mut self) {
        self.vertical = Vertical::None;
        self.horizontal = Horizontal::None;
        if let Some(frame) = self.animation.rest_frame() {
            self.sprite.set_cell(frame);
        }
    }

    /// Stand still while cycling through the idle table
    pub fn animate_idle(&mut self, dt: f32) {
        self.vertical = Vertical::None;
        self.horizontal = Horizontal::None;
        let table = self.animation.table(Track::Idle);
        let index = self.timer_idle.advance(dt, table.len());
        if let Some(frame) = table.get(index).copied() {
            self.sprite.set_cell(frame);
        }
    }

    /// Run the collide, animate and move steps for one direction,
    /// returning the permitted (unrounded) distance
    pub fn travel(
        &mut self,
        direction: Direction,
        dt: f32,
        colliders: &[Rect],
        view: &View,
    ) -> f32 {
        let pixels = self.collide(direction, dt, colliders, view);
        self.animate(direction, dt);
        self.move_toward(direction, pixels.round());
        pixels
    }

    /// Steer along `heading`; only the signs of its components matter.
    ///
    /// The horizontal axis is resolved first, then the vertical one against
    /// the updated position. A zero heading idles.
    pub fn step(&mut self, dt: f32, heading: Vec2, colliders: &[Rect], view: &View) {
        let horizontal = match heading.x {
            x if x < 0.0 => Some(Direction::West),
            x if x > 0.0 => Some(Direction::East),
            _ => None,
        };
        let vertical = match heading.y {
            y if y < 0.0 => Some(Direction::North),
            y if y > 0.0 => Some(Direction::South),
            _ => None,
        };

        if horizontal.is_none() && vertical.is_none() {
            self.idle();
            return;
        }

        match horizontal {
            Some(direction) => {
                self.travel(direction, dt, colliders, view);
            }
            None => self.horizontal = Horizontal::None,
        }
        match vertical {
            Some(direction) => {
                self.travel(direction, dt, colliders, view);
            }
            None => self.vertical = Vertical::None,
        }
    }

    /// Broad-phase overlap with another actor.
    ///
    /// Both boxes are placed around the viewport centre; `scroll` shifts the
    /// other actor and its collider size is multiplied by its sprite scale.
    /// True when a corner of this actor's box lies strictly inside the
    /// other's.
    pub fn overlaps(&self, other: &Actor, scroll: Vec2, view: &View) -> bool {
        let center = view.center();
        let mine = physics::collider_rect(
            self.sprite.position,
            self.sprite.half_extents(),
            &self.collider,
            center,
        );

        let top_left = other.sprite.position + center - other.sprite.half_extents()
            + other.collider.offset()
            + scroll;
        let theirs = Rect::from_origin_size(top_left, other.collider.size() * other.sprite.scale());

        corners_overlap(mine, theirs)
    }

    pub fn render(&self, view: &View, target: &mut dyn DrawTarget) {
        self.sprite.render(view, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::SpriteAtlas;
    use approx::assert_abs_diff_eq;

    /// 32x32 actor at the world origin, speed 20 px/s, 0.5s frames
    fn actor() -> Actor {
        let sprite = Sprite::new(SpriteAtlas::with_cell("hero", 128, 128, 32), Vec2::ZERO);
        let animation = AnimationSet::from_centiseconds(50.0)
            .with_idle(vec![0, 1])
            .with_moves(vec![2, 3], vec![4, 5], vec![6, 7], vec![8, 9, 10]);
        Actor::new(sprite, ActorStats::with_speed(20.0), animation)
    }

    fn view() -> View {
        View::new(200.0, 200.0)
    }

    #[test]
    fn test_collider_rect_uses_view_origin() {
        let mut actor = actor().with_collider(ColliderBox::new(4.0, 16.0, 24.0, 16.0));
        let mut view = view();
        view.offset = Vec2::new(10.0, 0.0);
        actor.set_position(5.0, 5.0);

        let rect = actor.collider_rect(&view);
        assert_eq!(rect, Rect::new(103.0, 105.0, 127.0, 121.0));
    }

    #[test]
    fn test_collide_without_obstacles() {
        let actor = actor();
        for direction in Direction::ALL {
            assert_abs_diff_eq!(actor.collide(direction, 0.5, &[], &view()), 10.0);
        }
    }

    #[test]
    fn test_collide_against_wall() {
        let actor = actor();
        // footprint spans 84..116 on screen; wall 3px to the right
        let wall = Rect::new(119.0, 0.0, 140.0, 200.0);
        assert_abs_diff_eq!(actor.collide(Direction::East, 0.5, &[wall], &view()), 2.0);
    }

    #[test]
    fn test_move_sets_direction_flags() {
        let mut actor = actor();
        actor.move_left(3.0);
        assert_eq!(actor.horizontal(), Horizontal::West);
        assert_eq!(actor.position(), Vec2::new(-3.0, 0.0));

        actor.move_right(5.0);
        assert_eq!(actor.horizontal(), Horizontal::East);

        actor.move_up(2.0);
        assert_eq!(actor.vertical(), Vertical::North);
        actor.move_down(6.0);
        assert_eq!(actor.vertical(), Vertical::South);
        assert_eq!(actor.position(), Vec2::new(2.0, 4.0));
    }

    #[test]
    fn test_axis_timers_are_independent() {
        let mut actor = actor();

        actor.animate_right(0.5);
        assert_eq!(actor.current_frame(), 9);
        actor.animate_right(0.5);
        assert_eq!(actor.current_frame(), 10);

        // vertical timer untouched by the horizontal moves
        actor.animate_down(0.25);
        assert_eq!(actor.current_frame(), 4);

        // left shares the horizontal timer (index 2 wraps on a 2-frame table)
        actor.animate_left(0.1);
        assert_eq!(actor.current_frame(), 6);
    }

    #[test]
    fn test_idle_resets_state() {
        let mut actor = actor();
        actor.move_left(1.0);
        actor.move_up(1.0);
        actor.animate_up(0.5);

        actor.idle();
        assert_eq!(actor.current_frame(), 0);
        assert_eq!(actor.vertical(), Vertical::None);
        assert_eq!(actor.horizontal(), Horizontal::None);
    }

    #[test]
    fn test_animate_idle_cycles_idle_table() {
        let mut actor = actor();
        actor.move_right(1.0);
        actor.animate_idle(0.5);
        assert_eq!(actor.current_frame(), 1);
        assert_eq!(actor.horizontal(), Horizontal::None);
        actor.animate_idle(0.5);
        assert_eq!(actor.current_frame(), 0);
    }

    #[test]
    fn test_empty_table_keeps_frame() {
        let sprite = Sprite::new(SpriteAtlas::with_cell("blob", 32, 32, 32), Vec2::ZERO);
        let mut actor = Actor::new(sprite, ActorStats::default(), AnimationSet::default());
        actor.sprite.set_cell(3);

        actor.animate_up(1.0);
        actor.idle();
        actor.animate_idle(1.0);
        assert_eq!(actor.current_frame(), 3);
    }

    #[test]
    fn test_step_moves_both_axes() {
        let mut actor = actor();
        actor.step(0.5, Vec2::new(1.0, -1.0), &[], &view());
        assert_eq!(actor.position(), Vec2::new(10.0, -10.0));
        assert_eq!(actor.horizontal(), Horizontal::East);
        assert_eq!(actor.vertical(), Vertical::North);

        actor.step(0.5, Vec2::new(-1.0, 0.0), &[], &view());
        assert_eq!(actor.horizontal(), Horizontal::West);
        assert_eq!(actor.vertical(), Vertical::None);

        actor.step(0.5, Vec2::ZERO, &[], &view());
        assert_eq!(actor.current_frame(), 0);
        assert_eq!(actor.horizontal(), Horizontal::None);
    }

    #[test]
    fn test_travel_rounds_applied_distance() {
        let mut actor = actor();
        let pixels = actor.travel(Direction::South, 0.13, &[], &view());
        assert_abs_diff_eq!(pixels, 2.6, epsilon = 1e-5);
        assert_eq!(actor.position().y, 3.0);
    }

    #[test]
    fn test_overlaps_by_corner() {
        let a = actor();
        let mut b = actor();
        b.set_position(16.0, 16.0);
        let view = view();

        assert!(a.overlaps(&b, Vec2::ZERO, &view));
        // scrolled away, no corner inside
        assert!(!a.overlaps(&b, Vec2::new(100.0, 0.0), &view));
        // identical boxes share edges only
        assert!(!a.overlaps(&actor(), Vec2::ZERO, &view));
    }

    #[test]
    fn test_overlaps_scales_other_size_only() {
        let a = actor();
        // 64x64 footprint, 10x10 hit-box 8px into it
        let big = |x: f32, y: f32| {
            let atlas = SpriteAtlas::with_cell("ogre", 32, 32, 32).scaled(2.0);
            let sprite = Sprite::new(atlas, Vec2::new(x, y));
            Actor::new(sprite, ActorStats::default(), AnimationSet::default())
                .with_collider(ColliderBox::new(8.0, 8.0, 10.0, 10.0))
        };
        let view = view();

        // a spans 84..116; b's box starts at 100 and is 20px wide once scaled,
        // so a's corner (116, 116) is inside only thanks to the scale
        let b = big(24.0, 24.0);
        assert!(a.overlaps(&b, Vec2::ZERO, &view));

        // the offset is not scaled: box starts at 110, not 118
        let b = big(34.0, 34.0);
        assert!(a.overlaps(&b, Vec2::ZERO, &view));

        // only the other actor is scaled: b's own box stays 10x10 at 100..110,
        // so a shifted to 115..147 catches no corner (a 20px box would reach 120)
        let b = big(24.0, 24.0);
        assert!(!b.overlaps(&a, Vec2::new(31.0, 31.0), &view));
    }
}
