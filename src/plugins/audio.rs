use crate::plugins::collect::CoinCollected;
use crate::plugins::player::PlayerJumped;
use crate::plugins::session::PlayerDied;
use bevy::prelude::*;

/// Sound effect handles, loaded once at startup
#[derive(Resource, Clone, Debug)]
pub struct GameSounds {
    pub jump: Handle<AudioSource>,
    pub coin: Handle<AudioSource>,
    pub death: Handle<AudioSource>,
}

/// Plugin for one-shot sound effects. Sounds are feedback only: a
/// missing asset logs a warning from the asset server and plays nothing.
pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_sounds)
            .add_systems(Update, play_sounds_system);
    }
}

fn load_sounds(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(GameSounds {
        jump: asset_server.load("sounds/jump.ogg"),
        coin: asset_server.load("sounds/coin.ogg"),
        death: asset_server.load("sounds/death.ogg"),
    });
}

/// Spawn a one-shot playback entity per gameplay event
fn play_sounds_system(
    mut commands: Commands,
    sounds: Option<Res<GameSounds>>,
    mut jumps: EventReader<PlayerJumped>,
    mut coins: EventReader<CoinCollected>,
    mut deaths: EventReader<PlayerDied>,
) {
    let Some(sounds) = sounds else {
        return;
    };

    for _ in jumps.read() {
        commands.spawn(AudioBundle {
            source: sounds.jump.clone(),
            settings: PlaybackSettings::DESPAWN,
        });
    }

    for _ in coins.read() {
        commands.spawn(AudioBundle {
            source: sounds.coin.clone(),
            settings: PlaybackSettings::DESPAWN,
        });
    }

    for _ in deaths.read() {
        commands.spawn(AudioBundle {
            source: sounds.death.clone(),
            settings: PlaybackSettings::DESPAWN,
        });
    }
}
