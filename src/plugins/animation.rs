use crate::components::{
    AnimatedDecor, AnimationState, LadderState, Player, Position, Velocity,
};
use crate::enums::{AnimationType, Facing};
use crate::plugins::level::PlayerSprites;
use bevy::prelude::*;

/// Minimum vertical speed before the climb cycle advances a frame.
/// Gripping a ladder without moving shows a frozen climb frame.
pub const CLIMB_FRAME_THRESHOLD: f32 = 1.0;

/// Seconds between frames for animated background decorations
const DECOR_FRAME_SECONDS: f32 = 0.1;

/// Plugin for the animation state machine
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                update_player_animation_system,
                apply_player_texture_system,
                update_sprite_position_system,
                apply_facing_system,
                animate_decor_system,
            )
                .chain(),
        );
    }
}

/// One frame's worth of motion, sampled after physics has run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSample {
    pub change_x: f32,
    pub change_y: f32,
    pub on_ladder: bool,
}

/// Resolve the animation state for one frame.
///
/// Evaluated in strict priority order, first match wins:
/// facing flip, climbing, jumping, falling, idle, walking. Climbing
/// takes precedence over the airborne and grounded states. Facing is
/// sticky under zero horizontal velocity.
pub fn resolve_animation(state: &mut AnimationState, motion: MotionSample) {
    if motion.change_x < 0.0 && state.facing == Facing::Right {
        state.facing = Facing::Left;
    } else if motion.change_x > 0.0 && state.facing == Facing::Left {
        state.facing = Facing::Right;
    }

    if motion.on_ladder {
        if motion.change_y.abs() > CLIMB_FRAME_THRESHOLD {
            state.advance_frame();
        }
        state.current = AnimationType::Climbing;
        return;
    }

    if motion.change_y > 0.0 {
        state.current = AnimationType::Jumping;
        return;
    }

    if motion.change_y < 0.0 {
        state.current = AnimationType::Falling;
        return;
    }

    if motion.change_x == 0.0 {
        state.current = AnimationType::Idle;
        return;
    }

    state.advance_frame();
    state.current = AnimationType::Walking;
}

/// Pick the texture for the resolved state. Walking indexes the
/// six-frame walk cycle directly; climbing maps the same counter onto
/// two textures.
pub fn texture_for(sprites: &PlayerSprites, state: &AnimationState) -> Handle<Image> {
    match state.current {
        AnimationType::Idle => sprites.idle.clone(),
        AnimationType::Jumping => sprites.jump.clone(),
        AnimationType::Falling => sprites.fall.clone(),
        AnimationType::Walking => sprites.walk[state.frame].clone(),
        AnimationType::Climbing => sprites.climb[state.climb_texture_index()].clone(),
    }
}

/// Run the resolver against this frame's velocity and ladder contact
fn update_player_animation_system(
    mut query: Query<(&Velocity, &LadderState, &mut AnimationState), With<Player>>,
) {
    for (velocity, ladder, mut anim_state) in query.iter_mut() {
        let motion = MotionSample {
            change_x: velocity.x,
            change_y: velocity.y,
            on_ladder: ladder.on_ladder,
        };
        resolve_animation(&mut anim_state, motion);
    }
}

/// Swap the player's texture to match the resolved animation state
fn apply_player_texture_system(
    sprites: Option<Res<PlayerSprites>>,
    mut query: Query<(&AnimationState, &mut Handle<Image>), With<Player>>,
) {
    let Some(sprites) = sprites else {
        return;
    };

    for (anim_state, mut texture) in query.iter_mut() {
        *texture = texture_for(&sprites, anim_state);
    }
}

/// Update sprite position to match entity position
fn update_sprite_position_system(mut query: Query<(&Position, &mut Transform), With<Player>>) {
    for (position, mut transform) in query.iter_mut() {
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}

/// Mirror the sprite for the resolved facing direction
fn apply_facing_system(mut query: Query<(&AnimationState, &mut Transform), With<Player>>) {
    for (anim_state, mut transform) in query.iter_mut() {
        match anim_state.facing {
            Facing::Right => transform.scale.x = transform.scale.x.abs(),
            Facing::Left => transform.scale.x = -transform.scale.x.abs(),
        }
    }
}

/// Advance animated background decorations on a shared cadence
fn animate_decor_system(
    time: Res<Time>,
    mut accumulator: Local<f32>,
    mut query: Query<(&mut AnimatedDecor, &mut Handle<Image>)>,
) {
    *accumulator += time.delta_seconds();
    if *accumulator < DECOR_FRAME_SECONDS {
        return;
    }
    *accumulator -= DECOR_FRAME_SECONDS;

    for (mut decor, mut texture) in query.iter_mut() {
        if decor.frames.is_empty() {
            continue;
        }
        decor.frame = (decor.frame + 1) % decor.frames.len();
        *texture = decor.frames[decor.frame].clone();
    }
}
