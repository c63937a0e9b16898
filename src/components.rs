use crate::enums::{AnimationType, Facing};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Position component - world coordinates, +y is up
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Velocity component - pixels per second
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Collider component - axis-aligned bounding box centered on the
/// entity's position
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    pub width: f32,
    pub height: f32,
}

impl Collider {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in world coordinates, min-corner based.
/// Used for static level zones (platforms, ladders, hazards).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Overlap test against a centered collider at `position`
    pub fn overlaps_collider(&self, position: &Position, collider: &Collider) -> bool {
        let half_w = collider.width / 2.0;
        let half_h = collider.height / 2.0;
        position.x + half_w > self.left()
            && position.x - half_w < self.right()
            && position.y + half_h > self.bottom()
            && position.y - half_h < self.top()
    }
}

/// Player marker component
#[derive(Component)]
pub struct Player;

/// Player intent component - held keys plus the jump debounce latch.
///
/// `jump_consumed` is set when a jump fires and cleared only when the
/// jump key is released, so holding the key yields at most one jump.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct PlayerIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub jump_consumed: bool,
}

/// Grounded state - tracks ground contact
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct GroundedState {
    pub is_grounded: bool,
}

/// Ladder state - tracks ladder overlap, re-derived every physics tick
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct LadderState {
    pub on_ladder: bool,
}

/// Animation state - current animation, facing, and the shared frame
/// counter that drives both the walk and climb cycles
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    pub current: AnimationType,
    pub facing: Facing,
    pub frame: usize,
}

impl AnimationState {
    /// Advance the frame counter, wrapping to 0 once it exceeds 5.
    /// The cycle length is fixed at 6 frames; the counter wraps, it
    /// never clamps.
    pub fn advance_frame(&mut self) {
        self.frame += 1;
        if self.frame > 5 {
            self.frame = 0;
        }
    }

    /// Climb texture index: two climb textures share the 6-frame
    /// counter via integer division, giving a 4/2 frame split.
    pub fn climb_texture_index(&self) -> usize {
        self.frame / 4
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            current: AnimationType::Idle,
            facing: Facing::Right,
            frame: 0,
        }
    }
}

/// Solid level geometry - platforms the player collides with
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct SolidGeometry {
    pub bounds: Bounds,
}

/// Ladder zone - overlap enables climbing
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct LadderZone {
    pub bounds: Bounds,
}

/// Hazard zone - overlap costs a life and resets the player
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct HazardZone {
    pub bounds: Bounds,
}

/// Coin marker - collectible, despawned on pickup
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Coin;

/// Moving platform - patrols between min and max, reversing at the bounds.
/// The entity also carries SolidGeometry, which physics keeps in sync.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MovingPlatform {
    pub velocity: Vec2,
    pub min: Vec2,
    pub max: Vec2,
}

/// Animated background decoration - cycles through preloaded frame textures
#[derive(Component, Clone, Debug, PartialEq)]
pub struct AnimatedDecor {
    pub frame: usize,
    pub frames: Vec<Handle<Image>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(64.0, 225.0);
        assert_eq!(pos.x, 64.0);
        assert_eq!(pos.y, 225.0);
    }

    #[test]
    fn test_velocity_default() {
        let vel = Velocity::default();
        assert_eq!(vel.x, 0.0);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn test_collider_creation() {
        let collider = Collider::new(32.0, 64.0);
        assert_eq!(collider.width, 32.0);
        assert_eq!(collider.height, 64.0);
    }

    #[test]
    fn test_bounds_edges() {
        let bounds = Bounds::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(bounds.left(), 10.0);
        assert_eq!(bounds.right(), 110.0);
        assert_eq!(bounds.bottom(), 20.0);
        assert_eq!(bounds.top(), 70.0);
    }

    #[test]
    fn test_bounds_overlaps_collider() {
        let bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
        let collider = Collider::new(32.0, 64.0);

        assert!(bounds.overlaps_collider(&Position::new(50.0, 50.0), &collider));
        assert!(!bounds.overlaps_collider(&Position::new(200.0, 50.0), &collider));
        // Touching edges do not overlap
        assert!(!bounds.overlaps_collider(&Position::new(116.0, 50.0), &collider));
    }

    #[test]
    fn test_animation_state_default() {
        let anim = AnimationState::default();
        assert_eq!(anim.current, AnimationType::Idle);
        assert_eq!(anim.facing, Facing::Right);
        assert_eq!(anim.frame, 0);
    }

    #[test]
    fn test_frame_counter_wraps_to_zero() {
        let mut anim = AnimationState {
            frame: 5,
            ..Default::default()
        };
        anim.advance_frame();
        assert_eq!(anim.frame, 0, "Counter must wrap to exactly 0, not clamp");
    }

    #[test]
    fn test_frame_counter_never_exceeds_five() {
        let mut anim = AnimationState::default();
        for _ in 0..100 {
            anim.advance_frame();
            assert!(anim.frame <= 5);
        }
    }

    #[test]
    fn test_climb_texture_index_split() {
        let mut anim = AnimationState::default();
        for frame in 0..=5 {
            anim.frame = frame;
            let expected = if frame < 4 { 0 } else { 1 };
            assert_eq!(anim.climb_texture_index(), expected);
        }
    }

    #[test]
    fn test_player_intent_default() {
        let intent = PlayerIntent::default();
        assert!(!intent.up);
        assert!(!intent.down);
        assert!(!intent.left);
        assert!(!intent.right);
        assert!(!intent.jump_consumed);
    }
}
