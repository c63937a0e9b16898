use crate::components::{
    AnimatedDecor, AnimationState, Bounds, Coin, Collider, GroundedState, HazardZone, LadderState,
    LadderZone, MovingPlatform, Player, PlayerIntent, Position, SolidGeometry, Velocity,
};
use crate::level::LevelData;
use bevy::prelude::*;
use std::fs;
use std::path::Path;

/// Player collider dimensions, in world pixels
pub const PLAYER_WIDTH: f32 = 32.0;
pub const PLAYER_HEIGHT: f32 = 60.0;

/// Resource tracking the level currently in play
#[derive(Resource, Clone, Debug)]
pub struct CurrentLevel {
    pub number: u32,
    pub data: LevelData,
}

/// Resource requesting a level change, processed next frame
#[derive(Resource, Clone, Copy, Debug)]
pub struct PendingTransition {
    pub level: u32,
}

/// Marker for entities owned by the current level, despawned wholesale
/// on transition
#[derive(Component)]
pub struct LevelEntity;

/// Texture handles for every player animation state. Left-facing
/// rendering mirrors these via a negative x-scale.
#[derive(Resource, Clone, Debug)]
pub struct PlayerSprites {
    pub idle: Handle<Image>,
    pub jump: Handle<Image>,
    pub fall: Handle<Image>,
    pub walk: Vec<Handle<Image>>,
    pub climb: [Handle<Image>; 2],
}

/// Plugin for level loading, entity spawning, and level transitions
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_game)
            .add_systems(Update, process_pending_transition);
    }
}

/// Path of a level file by number
pub fn level_path(level: u32) -> String {
    format!("levels/level_{:02}.json", level)
}

/// Load level data from a JSON file
pub fn load_level_from_file(path: &str) -> Result<LevelData, LevelLoadError> {
    if !Path::new(path).exists() {
        return Err(LevelLoadError::FileNotFound(path.to_string()));
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| LevelLoadError::IoError(path.to_string(), e.to_string()))?;

    let level_data: LevelData = serde_json::from_str(&contents)
        .map_err(|e| LevelLoadError::ParseError(path.to_string(), e.to_string()))?;

    validate_level_data(&level_data)?;

    Ok(level_data)
}

/// A level that cannot be located or decoded is fatal: abort with a
/// message naming it. There is no partial-level-load recovery.
pub fn load_level_or_abort(level: u32) -> LevelData {
    let path = level_path(level);
    match load_level_from_file(&path) {
        Ok(data) => data,
        Err(e) => {
            error!("Cannot load level {}: {}", level, e);
            panic!("cannot load level {} ({}): {}", level, path, e);
        }
    }
}

/// Validate level data for required fields and valid values
fn validate_level_data(level: &LevelData) -> Result<(), LevelLoadError> {
    if level.id.is_empty() {
        return Err(LevelLoadError::ValidationError(
            "Level ID cannot be empty".to_string(),
        ));
    }

    if level.width <= 0.0 || level.height <= 0.0 {
        return Err(LevelLoadError::ValidationError(
            "Level dimensions must be positive".to_string(),
        ));
    }

    let layers = [
        ("platforms", &level.platforms),
        ("ladders", &level.ladders),
        ("dont_touch", &level.hazards),
    ];
    for (name, rects) in layers {
        for (i, rect) in rects.iter().enumerate() {
            if rect.width <= 0.0 || rect.height <= 0.0 {
                return Err(LevelLoadError::ValidationError(format!(
                    "{} rect {} has invalid dimensions",
                    name, i
                )));
            }
        }
    }

    for (i, platform) in level.moving_platforms.iter().enumerate() {
        if platform.min_x > platform.max_x || platform.min_y > platform.max_y {
            return Err(LevelLoadError::ValidationError(format!(
                "moving platform {} has an inverted patrol range",
                i
            )));
        }
    }

    Ok(())
}

/// Spawn every entity a level owns: solid geometry, ladders, hazards,
/// coins, moving platforms, and decorations
pub fn spawn_level_entities(commands: &mut Commands, asset_server: &AssetServer, level: &LevelData) {
    for platform in &level.platforms {
        commands.spawn((SolidGeometry { bounds: *platform }, LevelEntity));
    }

    for ladder in &level.ladders {
        commands.spawn((LadderZone { bounds: *ladder }, LevelEntity));
    }

    for hazard in &level.hazards {
        commands.spawn((HazardZone { bounds: *hazard }, LevelEntity));
    }

    for coin in &level.coins {
        commands.spawn((
            Coin,
            Position::new(coin.x, coin.y),
            SpriteBundle {
                texture: asset_server.load("sprites/coin.png"),
                transform: Transform::from_xyz(coin.x, coin.y, 0.5),
                ..Default::default()
            },
            LevelEntity,
        ));
    }

    for platform in &level.moving_platforms {
        commands.spawn((
            SolidGeometry {
                bounds: Bounds::new(platform.x, platform.y, platform.width, platform.height),
            },
            MovingPlatform {
                velocity: Vec2::new(platform.velocity_x, platform.velocity_y),
                min: Vec2::new(platform.min_x, platform.min_y),
                max: Vec2::new(platform.max_x, platform.max_y),
            },
            LevelEntity,
        ));
    }

    for (decor, z) in level
        .background
        .iter()
        .map(|d| (d, -1.0))
        .chain(level.foreground.iter().map(|d| (d, 1.0)))
    {
        let mut entity = commands.spawn((
            SpriteBundle {
                texture: asset_server.load(decor.sprite.clone()),
                transform: Transform::from_xyz(decor.x, decor.y, z),
                ..Default::default()
            },
            LevelEntity,
        ));
        if decor.frame_count > 1 {
            // Frame textures live next to the base sprite: name_0.png, name_1.png, ...
            let stem = decor.sprite.trim_end_matches(".png");
            let frames = (0..decor.frame_count)
                .map(|i| asset_server.load(format!("{}_{}.png", stem, i)))
                .collect();
            entity.insert(AnimatedDecor { frame: 0, frames });
        }
    }
}

fn load_player_sprites(asset_server: &AssetServer) -> PlayerSprites {
    PlayerSprites {
        idle: asset_server.load("sprites/player_idle.png"),
        jump: asset_server.load("sprites/player_jump.png"),
        fall: asset_server.load("sprites/player_fall.png"),
        walk: (0..6)
            .map(|i| asset_server.load(format!("sprites/player_walk_{}.png", i)))
            .collect(),
        climb: [
            asset_server.load("sprites/player_climb_0.png"),
            asset_server.load("sprites/player_climb_1.png"),
        ],
    }
}

/// Load level 1 and spawn the world at startup
fn setup_game(mut commands: Commands, asset_server: Res<AssetServer>) {
    let sprites = load_player_sprites(&asset_server);
    let level = load_level_or_abort(1);

    spawn_level_entities(&mut commands, &asset_server, &level);

    let spawn = level.spawn_point;
    commands.spawn((
        Player,
        Position::new(spawn.x, spawn.y),
        Velocity::default(),
        Collider::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        PlayerIntent::default(),
        GroundedState::default(),
        LadderState::default(),
        AnimationState::default(),
        SpriteBundle {
            texture: sprites.idle.clone(),
            transform: Transform::from_xyz(spawn.x, spawn.y, 1.0),
            ..Default::default()
        },
    ));

    commands.insert_resource(sprites);
    commands.insert_resource(CurrentLevel {
        number: 1,
        data: level,
    });

    info!("Loaded level 1");
}

/// Tear down the old level and bring up the next one. The previous
/// level's entities are fully despawned before the new map spawns; the
/// player is reset to the new level's start with fresh state.
#[allow(clippy::type_complexity)]
fn process_pending_transition(
    mut commands: Commands,
    pending: Option<Res<PendingTransition>>,
    asset_server: Res<AssetServer>,
    level_entities: Query<Entity, With<LevelEntity>>,
    mut player_query: Query<
        (
            &mut Position,
            &mut Velocity,
            &mut PlayerIntent,
            &mut GroundedState,
            &mut LadderState,
            &mut AnimationState,
        ),
        With<Player>,
    >,
) {
    let Some(pending) = pending else {
        return;
    };

    for entity in level_entities.iter() {
        commands.entity(entity).despawn();
    }

    let level = load_level_or_abort(pending.level);

    for (mut position, mut velocity, mut intent, mut grounded, mut ladder, mut anim) in
        player_query.iter_mut()
    {
        position.x = level.spawn_point.x;
        position.y = level.spawn_point.y;
        *velocity = Velocity::default();
        *intent = PlayerIntent::default();
        *grounded = GroundedState::default();
        *ladder = LadderState::default();
        *anim = AnimationState::default();
    }

    spawn_level_entities(&mut commands, &asset_server, &level);
    commands.insert_resource(CurrentLevel {
        number: pending.level,
        data: level,
    });
    commands.remove_resource::<PendingTransition>();

    info!("Loaded level {}", pending.level);
}

/// Level loading errors
#[derive(Debug, Clone, PartialEq)]
pub enum LevelLoadError {
    FileNotFound(String),
    IoError(String, String),
    ParseError(String, String),
    ValidationError(String),
}

impl std::fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelLoadError::FileNotFound(path) => write!(f, "Level file not found: {}", path),
            LevelLoadError::IoError(path, err) => {
                write!(f, "IO error reading level file {}: {}", path, err)
            }
            LevelLoadError::ParseError(path, err) => {
                write!(f, "Failed to parse level file {}: {}", path, err)
            }
            LevelLoadError::ValidationError(msg) => write!(f, "Level validation error: {}", msg),
        }
    }
}

impl std::error::Error for LevelLoadError {}
