use crate::components::{Collider, HazardZone, Player, Position, Velocity};
use crate::enums::GamePhase;
use crate::plugins::level::{CurrentLevel, PendingTransition};
use bevy::app::AppExit;
use bevy::prelude::*;

/// Session constants
pub const STARTING_LIVES: u32 = 3;
pub const FINAL_LEVEL: u32 = 3;
pub const FALL_DEATH_Y: f32 = -100.0;
pub const TERMINAL_HOLD_SECONDS: f32 = 3.0;

/// Event fired on any death (fall or hazard), consumed by the audio plugin
#[derive(Event)]
pub struct PlayerDied;

/// Game session resource - the per-process state: current level, lives,
/// timer, score, and the phase state machine
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct GameSession {
    pub level: u32,
    pub lives: u32,
    pub timer_seconds: u32,
    pub score: u32,
    pub phase: GamePhase,
    pub elapsed: f32,
    pub terminal_hold: f32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            level: 1,
            lives: STARTING_LIVES,
            timer_seconds: 0,
            score: 0,
            phase: GamePhase::Intro,
            elapsed: 0.0,
            terminal_hold: 0.0,
        }
    }
}

impl GameSession {
    /// Lose exactly one life. Lives never go negative; hitting zero
    /// transitions to GameOver.
    pub fn lose_life(&mut self) {
        if self.lives > 0 {
            self.lives -= 1;
        }
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
        }
    }
}

/// Run condition: gameplay systems only run in the Running phase
pub fn session_is_running(session: Option<Res<GameSession>>) -> bool {
    session.map_or(false, |s| s.phase == GamePhase::Running)
}

/// Outcome of the end-of-map check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelOutcome {
    None,
    Advance(u32),
    Congratulations,
}

/// Reaching the right boundary completes the level: the final level
/// ends the game, any earlier level advances to the next one.
pub fn check_level_complete(level: u32, player_x: f32, end_of_map: f32) -> LevelOutcome {
    if player_x < end_of_map {
        return LevelOutcome::None;
    }
    if level >= FINAL_LEVEL {
        LevelOutcome::Congratulations
    } else {
        LevelOutcome::Advance(level + 1)
    }
}

/// Plugin for the session state machine: intro, timer, deaths, lives,
/// level progression, and the terminal screens
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameSession>()
            .add_event::<PlayerDied>()
            .add_systems(
                Update,
                (
                    intro_advance_system,
                    tick_timer_system,
                    fall_death_system,
                    hazard_death_system,
                    level_complete_system,
                    terminal_hold_system,
                )
                    .chain(),
            );
    }
}

/// Space leaves the intro screen and starts play
fn intro_advance_system(keyboard: Res<Input<KeyCode>>, mut session: ResMut<GameSession>) {
    if session.phase == GamePhase::Intro && keyboard.just_pressed(KeyCode::Space) {
        session.phase = GamePhase::Running;
        info!("Game started");
    }
}

/// Accumulate frame deltas into the integer second timer
fn tick_timer_system(time: Res<Time>, mut session: ResMut<GameSession>) {
    if session.phase != GamePhase::Running {
        return;
    }

    session.elapsed += time.delta_seconds();
    while session.elapsed >= 1.0 {
        session.elapsed -= 1.0;
        session.timer_seconds += 1;
        info!("Time: {}s", session.timer_seconds);
    }
}

fn respawn_player(position: &mut Position, velocity: &mut Velocity, level: &CurrentLevel) {
    position.x = level.data.spawn_point.x;
    position.y = level.data.spawn_point.y;
    velocity.x = 0.0;
    velocity.y = 0.0;
}

/// Falling below the kill plane costs a life and resets to the level start
fn fall_death_system(
    mut session: ResMut<GameSession>,
    level: Option<Res<CurrentLevel>>,
    mut query: Query<(&mut Position, &mut Velocity), With<Player>>,
    mut death_events: EventWriter<PlayerDied>,
) {
    if session.phase != GamePhase::Running {
        return;
    }
    let Some(level) = level else {
        return;
    };

    for (mut position, mut velocity) in query.iter_mut() {
        if position.y < FALL_DEATH_Y {
            respawn_player(&mut position, &mut velocity, &level);
            session.lose_life();
            death_events.send(PlayerDied);
            info!("Fell off the map, lives left: {}", session.lives);
        }
    }
}

/// Touching a hazard zone costs a life and resets to the level start
fn hazard_death_system(
    mut session: ResMut<GameSession>,
    level: Option<Res<CurrentLevel>>,
    mut query: Query<(&mut Position, &mut Velocity, &Collider), With<Player>>,
    hazards: Query<&HazardZone>,
    mut death_events: EventWriter<PlayerDied>,
) {
    if session.phase != GamePhase::Running {
        return;
    }
    let Some(level) = level else {
        return;
    };

    for (mut position, mut velocity, collider) in query.iter_mut() {
        let touched = hazards
            .iter()
            .any(|hazard| hazard.bounds.overlaps_collider(&position, collider));

        if touched {
            velocity.x = 0.0;
            velocity.y = 0.0;
            respawn_player(&mut position, &mut velocity, &level);
            session.lose_life();
            death_events.send(PlayerDied);
            info!("Touched a hazard, lives left: {}", session.lives);
        }
    }
}

/// Check the map's right boundary and advance or finish the game
fn level_complete_system(
    mut commands: Commands,
    mut session: ResMut<GameSession>,
    level: Option<Res<CurrentLevel>>,
    pending: Option<Res<PendingTransition>>,
    query: Query<&Position, With<Player>>,
) {
    if session.phase != GamePhase::Running || pending.is_some() {
        return;
    }
    let Some(level) = level else {
        return;
    };

    for position in query.iter() {
        match check_level_complete(session.level, position.x, level.data.end_of_map()) {
            LevelOutcome::None => {}
            LevelOutcome::Advance(next) => {
                session.level = next;
                commands.insert_resource(PendingTransition { level: next });
                info!("Level complete, advancing to level {}", next);
            }
            LevelOutcome::Congratulations => {
                session.phase = GamePhase::Congratulations;
                info!("Final level complete");
            }
        }
    }
}

/// Hold a terminal screen for a fixed delay, then exit the process
fn terminal_hold_system(
    time: Res<Time>,
    mut session: ResMut<GameSession>,
    mut exit_events: EventWriter<AppExit>,
) {
    if !session.phase.is_terminal() {
        return;
    }

    session.terminal_hold += time.delta_seconds();
    if session.terminal_hold >= TERMINAL_HOLD_SECONDS {
        exit_events.send(AppExit);
    }
}
