use crate::components::{GroundedState, LadderState, Player, PlayerIntent, Velocity};
use crate::enums::GamePhase;
use crate::plugins::session::GameSession;
use bevy::prelude::*;

/// Movement constants, in pixels per second
pub const MOVE_SPEED: f32 = 300.0;
pub const CLIMB_SPEED: f32 = 300.0;
pub const JUMP_SPEED: f32 = 1200.0;

/// Event fired when a jump is triggered (consumed by the audio plugin)
#[derive(Event)]
pub struct PlayerJumped;

/// Plugin for keyboard capture and input-to-velocity resolution
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerJumped>().add_systems(
            Update,
            (capture_input_system, apply_intent_system).chain(),
        );
    }
}

/// Physics-derived context the resolution depends on
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputContext {
    pub on_ladder: bool,
    pub can_jump: bool,
}

/// Outcome of one resolution pass. `velocity_y` is `None` when gravity
/// keeps control of the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedMotion {
    pub velocity_x: f32,
    pub velocity_y: Option<f32>,
    pub jumped: bool,
}

/// Translate held keys into a desired velocity.
///
/// Vertical rules: on a ladder, Up/Down climb at climb speed and
/// neither-or-both held forces zero (the grip). Off a ladder, Up jumps
/// only when the physics layer allows it and the `jump_consumed` latch
/// is clear; the latch stays set until Up is released, so a held key
/// cannot re-jump. Ladder context wins when both ladder and jump are
/// available. Horizontal rules: opposing or absent keys resolve to
/// zero, never an error.
pub fn resolve_velocity(intent: &mut PlayerIntent, ctx: InputContext) -> ResolvedMotion {
    let velocity_x = if intent.right && !intent.left {
        MOVE_SPEED
    } else if intent.left && !intent.right {
        -MOVE_SPEED
    } else {
        0.0
    };

    let mut velocity_y = None;
    let mut jumped = false;

    if intent.up && !intent.down {
        if ctx.on_ladder {
            velocity_y = Some(CLIMB_SPEED);
        } else if ctx.can_jump && !intent.jump_consumed {
            velocity_y = Some(JUMP_SPEED);
            intent.jump_consumed = true;
            jumped = true;
        }
    } else if intent.down && !intent.up && ctx.on_ladder {
        velocity_y = Some(-CLIMB_SPEED);
    }

    if ctx.on_ladder && velocity_y.is_none() {
        // Gripping the ladder: no free-fall
        velocity_y = Some(0.0);
    }

    ResolvedMotion {
        velocity_x,
        velocity_y,
        jumped,
    }
}

/// Read held keys (arrows plus WASD aliases) into PlayerIntent.
/// The jump latch clears only once no jump key is held, so releasing
/// one alias while the other stays down cannot re-arm it.
fn capture_input_system(
    keyboard: Res<Input<KeyCode>>,
    mut query: Query<&mut PlayerIntent, With<Player>>,
) {
    for mut intent in query.iter_mut() {
        intent.up = keyboard.pressed(KeyCode::Up) || keyboard.pressed(KeyCode::W);
        intent.down = keyboard.pressed(KeyCode::Down) || keyboard.pressed(KeyCode::S);
        intent.left = keyboard.pressed(KeyCode::Left) || keyboard.pressed(KeyCode::A);
        intent.right = keyboard.pressed(KeyCode::Right) || keyboard.pressed(KeyCode::D);

        if !intent.up {
            intent.jump_consumed = false;
        }
    }
}

/// Apply the resolved velocity to the player while the game is running
fn apply_intent_system(
    session: Res<GameSession>,
    mut query: Query<(&mut PlayerIntent, &mut Velocity, &GroundedState, &LadderState), With<Player>>,
    mut jump_events: EventWriter<PlayerJumped>,
) {
    if session.phase != GamePhase::Running {
        return;
    }

    for (mut intent, mut velocity, grounded, ladder) in query.iter_mut() {
        let ctx = InputContext {
            on_ladder: ladder.on_ladder,
            can_jump: grounded.is_grounded,
        };
        let resolved = resolve_velocity(&mut intent, ctx);

        velocity.x = resolved.velocity_x;
        if let Some(vy) = resolved.velocity_y {
            velocity.y = vy;
        }

        if resolved.jumped {
            jump_events.send(PlayerJumped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airborne() -> InputContext {
        InputContext {
            on_ladder: false,
            can_jump: false,
        }
    }

    fn grounded() -> InputContext {
        InputContext {
            on_ladder: false,
            can_jump: true,
        }
    }

    fn on_ladder() -> InputContext {
        InputContext {
            on_ladder: true,
            can_jump: false,
        }
    }

    #[test]
    fn test_horizontal_right() {
        let mut intent = PlayerIntent {
            right: true,
            ..Default::default()
        };
        let resolved = resolve_velocity(&mut intent, grounded());
        assert_eq!(resolved.velocity_x, MOVE_SPEED);
    }

    #[test]
    fn test_horizontal_left() {
        let mut intent = PlayerIntent {
            left: true,
            ..Default::default()
        };
        let resolved = resolve_velocity(&mut intent, grounded());
        assert_eq!(resolved.velocity_x, -MOVE_SPEED);
    }

    #[test]
    fn test_horizontal_both_keys_cancel() {
        let mut intent = PlayerIntent {
            left: true,
            right: true,
            ..Default::default()
        };
        let resolved = resolve_velocity(&mut intent, grounded());
        assert_eq!(resolved.velocity_x, 0.0);
    }

    #[test]
    fn test_horizontal_no_keys() {
        let mut intent = PlayerIntent::default();
        let resolved = resolve_velocity(&mut intent, grounded());
        assert_eq!(resolved.velocity_x, 0.0);
    }

    #[test]
    fn test_jump_when_grounded() {
        let mut intent = PlayerIntent {
            up: true,
            ..Default::default()
        };
        let resolved = resolve_velocity(&mut intent, grounded());
        assert_eq!(resolved.velocity_y, Some(JUMP_SPEED));
        assert!(resolved.jumped);
        assert!(intent.jump_consumed);
    }

    #[test]
    fn test_no_jump_when_airborne() {
        let mut intent = PlayerIntent {
            up: true,
            ..Default::default()
        };
        let resolved = resolve_velocity(&mut intent, airborne());
        assert_eq!(resolved.velocity_y, None);
        assert!(!resolved.jumped);
    }

    #[test]
    fn test_held_up_jumps_at_most_once() {
        let mut intent = PlayerIntent {
            up: true,
            ..Default::default()
        };

        let first = resolve_velocity(&mut intent, grounded());
        assert!(first.jumped);

        // Up stays held across later frames, even back on the ground
        for _ in 0..10 {
            let again = resolve_velocity(&mut intent, grounded());
            assert!(!again.jumped, "Latch must block re-jump while Up is held");
            assert_eq!(again.velocity_y, None);
        }
    }

    #[test]
    fn test_jump_latch_clears_on_release() {
        let mut intent = PlayerIntent {
            up: true,
            ..Default::default()
        };
        assert!(resolve_velocity(&mut intent, grounded()).jumped);

        // Release and re-press
        intent.up = false;
        intent.jump_consumed = false;
        intent.up = true;
        assert!(resolve_velocity(&mut intent, grounded()).jumped);
    }

    #[test]
    fn test_alias_release_does_not_rearm_latch() {
        // Up and W both held through a jump; tapping W off while Up
        // stays down must not permit a second jump.
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(PlayerPlugin);
        app.insert_resource(GameSession {
            phase: GamePhase::Running,
            ..Default::default()
        });
        app.init_resource::<Input<KeyCode>>();

        let player = app
            .world
            .spawn((
                Player,
                PlayerIntent::default(),
                Velocity::default(),
                GroundedState { is_grounded: true },
                LadderState::default(),
            ))
            .id();

        {
            let mut keyboard = app.world.resource_mut::<Input<KeyCode>>();
            keyboard.press(KeyCode::Up);
            keyboard.press(KeyCode::W);
        }
        app.update();
        assert_eq!(app.world.get::<Velocity>(player).unwrap().y, JUMP_SPEED);

        // Back on the ground, still holding Up, W released
        app.world.get_mut::<Velocity>(player).unwrap().y = 0.0;
        app.world.resource_mut::<Input<KeyCode>>().release(KeyCode::W);
        app.update();
        assert_eq!(
            app.world.get::<Velocity>(player).unwrap().y,
            0.0,
            "No second jump while Up stays held"
        );
        assert!(app.world.get::<PlayerIntent>(player).unwrap().jump_consumed);

        // A full release re-arms the latch; re-pressing jumps again
        app.world.resource_mut::<Input<KeyCode>>().release(KeyCode::Up);
        app.update();
        assert!(!app.world.get::<PlayerIntent>(player).unwrap().jump_consumed);

        app.world.resource_mut::<Input<KeyCode>>().press(KeyCode::Up);
        app.update();
        assert_eq!(app.world.get::<Velocity>(player).unwrap().y, JUMP_SPEED);
    }

    #[test]
    fn test_ladder_climb_up() {
        let mut intent = PlayerIntent {
            up: true,
            ..Default::default()
        };
        let resolved = resolve_velocity(&mut intent, on_ladder());
        assert_eq!(resolved.velocity_y, Some(CLIMB_SPEED));
        assert!(!resolved.jumped);
    }

    #[test]
    fn test_ladder_climb_down() {
        let mut intent = PlayerIntent {
            down: true,
            ..Default::default()
        };
        let resolved = resolve_velocity(&mut intent, on_ladder());
        assert_eq!(resolved.velocity_y, Some(-CLIMB_SPEED));
    }

    #[test]
    fn test_ladder_grip_forces_zero() {
        // Neither key held
        let mut intent = PlayerIntent::default();
        let resolved = resolve_velocity(&mut intent, on_ladder());
        assert_eq!(resolved.velocity_y, Some(0.0));

        // Both keys held
        let mut intent = PlayerIntent {
            up: true,
            down: true,
            ..Default::default()
        };
        let resolved = resolve_velocity(&mut intent, on_ladder());
        assert_eq!(resolved.velocity_y, Some(0.0));
    }

    #[test]
    fn test_ladder_overrides_jump() {
        // Standing at a ladder's base: both ladder and jump available.
        // Ladder context wins, no jump fires.
        let mut intent = PlayerIntent {
            up: true,
            ..Default::default()
        };
        let ctx = InputContext {
            on_ladder: true,
            can_jump: true,
        };
        let resolved = resolve_velocity(&mut intent, ctx);
        assert_eq!(resolved.velocity_y, Some(CLIMB_SPEED));
        assert!(!resolved.jumped);
        assert!(!intent.jump_consumed);
    }

    #[test]
    fn test_climb_while_moving_horizontally() {
        let mut intent = PlayerIntent {
            up: true,
            right: true,
            ..Default::default()
        };
        let resolved = resolve_velocity(&mut intent, on_ladder());
        assert_eq!(resolved.velocity_x, MOVE_SPEED);
        assert_eq!(resolved.velocity_y, Some(CLIMB_SPEED));
    }
}
