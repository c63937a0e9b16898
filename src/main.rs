use bevy::prelude::*;
use skyladder::plugins::{
    AnimationPlugin, CameraPlugin, CollectPlugin, GameAudioPlugin, LevelPlugin, PhysicsPlugin,
    PlayerPlugin, SessionPlugin,
};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(SessionPlugin)
        .add_plugins(LevelPlugin)
        .add_plugins(PlayerPlugin)
        .add_plugins(PhysicsPlugin)
        .add_plugins(CollectPlugin)
        .add_plugins(AnimationPlugin)
        .add_plugins(CameraPlugin)
        .add_plugins(GameAudioPlugin)
        .run();
}
