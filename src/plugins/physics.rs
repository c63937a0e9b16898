use crate::components::{
    Bounds, Collider, GroundedState, LadderState, LadderZone, MovingPlatform, Player, Position,
    SolidGeometry, Velocity,
};
use bevy::prelude::*;

/// Physics constants
pub const GRAVITY: f32 = 3600.0; // pixels per second squared, pulls -y
pub const JUMP_TOLERANCE: f32 = 4.0; // vertical slack for the can-jump probe
const FIXED_TIMESTEP: f32 = 1.0 / 60.0; // 60 FPS fixed timestep

/// Plugin for gravity, movement integration, and collision resolution
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_seconds(FIXED_TIMESTEP as f64));
        app.add_systems(
            FixedUpdate,
            (
                move_platforms,
                apply_gravity,
                integrate_and_collide,
                update_contact_flags,
            )
                .chain()
                .run_if(crate::plugins::session::session_is_running),
        );
    }
}

/// May the player jump? True when the feet rest on a solid top edge,
/// within a small vertical tolerance.
pub fn can_jump(
    position: &Position,
    collider: &Collider,
    solids: &[Bounds],
    tolerance: f32,
) -> bool {
    let half_w = collider.width / 2.0;
    let feet = position.y - collider.height / 2.0;

    solids.iter().any(|solid| {
        let horizontal_overlap = position.x + half_w > solid.left() && position.x - half_w < solid.right();
        horizontal_overlap && (feet - solid.top()).abs() <= tolerance
    })
}

/// Is the player's bounding box overlapping any ladder zone?
pub fn is_on_ladder(position: &Position, collider: &Collider, ladders: &[Bounds]) -> bool {
    ladders
        .iter()
        .any(|ladder| ladder.overlaps_collider(position, collider))
}

/// Patrol moving platforms between their bounds, reversing each axis at
/// the limits
fn move_platforms(
    time: Res<Time<Fixed>>,
    mut query: Query<(&mut MovingPlatform, &mut SolidGeometry)>,
) {
    let delta_time = time.delta_seconds();

    for (mut platform, mut solid) in query.iter_mut() {
        let mut x = solid.bounds.x + platform.velocity.x * delta_time;
        let mut y = solid.bounds.y + platform.velocity.y * delta_time;

        if x <= platform.min.x {
            x = platform.min.x;
            platform.velocity.x = platform.velocity.x.abs();
        } else if x >= platform.max.x {
            x = platform.max.x;
            platform.velocity.x = -platform.velocity.x.abs();
        }

        if y <= platform.min.y {
            y = platform.min.y;
            platform.velocity.y = platform.velocity.y.abs();
        } else if y >= platform.max.y {
            y = platform.max.y;
            platform.velocity.y = -platform.velocity.y.abs();
        }

        solid.bounds.x = x;
        solid.bounds.y = y;
    }
}

/// Apply gravity to airborne entities. Ladder contact suspends gravity;
/// vertical speed on a ladder comes from input alone.
fn apply_gravity(
    time: Res<Time<Fixed>>,
    mut query: Query<(&mut Velocity, &GroundedState, &LadderState)>,
) {
    let delta_time = time.delta_seconds();

    for (mut velocity, grounded, ladder) in query.iter_mut() {
        if !grounded.is_grounded && !ladder.on_ladder {
            velocity.y -= GRAVITY * delta_time;
        }
    }
}

/// Push an overlapping collider out of a solid along the smaller
/// penetration axis. Covers overlaps the velocity-directed passes miss,
/// like a moving platform sliding into a resting player. A vertical
/// push also cancels any velocity driving back into the solid.
pub fn push_out_overlap(
    position: &mut Position,
    velocity: &mut Velocity,
    collider: &Collider,
    solid: &Bounds,
) {
    if !solid.overlaps_collider(position, collider) {
        return;
    }

    let half_w = collider.width / 2.0;
    let half_h = collider.height / 2.0;

    let push_left = position.x + half_w - solid.left();
    let push_right = solid.right() - (position.x - half_w);
    let push_down = position.y + half_h - solid.bottom();
    let push_up = solid.top() - (position.y - half_h);

    let min_horizontal = push_left.min(push_right);
    let min_vertical = push_up.min(push_down);

    if min_vertical <= min_horizontal {
        if push_up <= push_down {
            position.y = solid.top() + half_h;
            velocity.y = velocity.y.max(0.0);
        } else {
            position.y = solid.bottom() - half_h;
            velocity.y = velocity.y.min(0.0);
        }
    } else if push_left <= push_right {
        position.x = solid.left() - half_w;
    } else {
        position.x = solid.right() + half_w;
    }
}

/// Integrate velocity and resolve collisions one axis at a time.
/// Landing on a solid from above snaps the feet to its top edge and
/// zeroes vertical velocity.
fn integrate_and_collide(
    time: Res<Time<Fixed>>,
    mut players: Query<(&mut Position, &mut Velocity, &Collider), With<Player>>,
    solids: Query<&SolidGeometry>,
) {
    let delta_time = time.delta_seconds();
    let solid_bounds: Vec<Bounds> = solids.iter().map(|s| s.bounds).collect();

    for (mut position, mut velocity, collider) in players.iter_mut() {
        let half_w = collider.width / 2.0;
        let half_h = collider.height / 2.0;

        // Horizontal pass
        position.x += velocity.x * delta_time;
        for solid in &solid_bounds {
            if solid.overlaps_collider(&position, collider) {
                if velocity.x > 0.0 {
                    position.x = solid.left() - half_w;
                } else if velocity.x < 0.0 {
                    position.x = solid.right() + half_w;
                }
            }
        }

        // Vertical pass
        position.y += velocity.y * delta_time;
        for solid in &solid_bounds {
            if solid.overlaps_collider(&position, collider) {
                if velocity.y < 0.0 {
                    position.y = solid.top() + half_h;
                    velocity.y = 0.0;
                } else if velocity.y > 0.0 {
                    position.y = solid.bottom() - half_h;
                    velocity.y = 0.0;
                }
            }
        }

        // Residual pass: platforms that moved this tick can overlap a
        // player with zero velocity, which the directed passes skip
        for solid in &solid_bounds {
            push_out_overlap(&mut position, &mut velocity, collider, solid);
        }
    }
}

/// Re-derive grounded and ladder contact after movement has settled
fn update_contact_flags(
    mut players: Query<(&Position, &Collider, &mut GroundedState, &mut LadderState), With<Player>>,
    solids: Query<&SolidGeometry>,
    ladders: Query<&LadderZone>,
) {
    let solid_bounds: Vec<Bounds> = solids.iter().map(|s| s.bounds).collect();
    let ladder_bounds: Vec<Bounds> = ladders.iter().map(|l| l.bounds).collect();

    for (position, collider, mut grounded, mut ladder) in players.iter_mut() {
        grounded.is_grounded = can_jump(position, collider, &solid_bounds, JUMP_TOLERANCE);
        ladder.on_ladder = is_on_ladder(position, collider, &ladder_bounds);
    }
}
