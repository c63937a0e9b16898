pub mod animation;
pub mod audio;
pub mod camera;
pub mod collect;
pub mod level;
pub mod physics;
pub mod player;
pub mod session;

pub use animation::AnimationPlugin;
pub use audio::GameAudioPlugin;
pub use camera::CameraPlugin;
pub use collect::CollectPlugin;
pub use level::LevelPlugin;
pub use physics::PhysicsPlugin;
pub use player::PlayerPlugin;
pub use session::SessionPlugin;
