use crate::components::Bounds;
use serde::{Deserialize, Serialize};

/// Level data structure matching the JSON level format.
///
/// Each layer mirrors a named layer from the source tile maps:
/// Platforms, Ladders, Dont Touch (hazards), Coins, Moving Platforms,
/// Background, Foreground.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub id: String,
    pub width: f32,
    pub height: f32,
    pub spawn_point: SpawnPoint,
    #[serde(default)]
    pub platforms: Vec<Bounds>,
    #[serde(default)]
    pub ladders: Vec<Bounds>,
    #[serde(default, rename = "dont_touch")]
    pub hazards: Vec<Bounds>,
    #[serde(default)]
    pub coins: Vec<CoinData>,
    #[serde(default)]
    pub moving_platforms: Vec<MovingPlatformData>,
    #[serde(default)]
    pub background: Vec<DecorData>,
    #[serde(default)]
    pub foreground: Vec<DecorData>,
}

impl LevelData {
    /// Right boundary of the map. Reaching it completes the level.
    pub fn end_of_map(&self) -> f32 {
        self.width
    }
}

/// Player start coordinates for a level
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

/// Coin placement
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoinData {
    pub x: f32,
    pub y: f32,
}

/// Moving platform placement and patrol path
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatformData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

/// Background/foreground decoration placement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecorData {
    pub x: f32,
    pub y: f32,
    pub sprite: String,
    #[serde(default)]
    pub frame_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_data_round_trip() {
        let level = LevelData {
            id: "level_01".to_string(),
            width: 4000.0,
            height: 1300.0,
            spawn_point: SpawnPoint { x: 64.0, y: 225.0 },
            platforms: vec![
                Bounds::new(0.0, 0.0, 4000.0, 64.0),
                Bounds::new(500.0, 64.0, 128.0, 32.0),
            ],
            ladders: vec![Bounds::new(800.0, 64.0, 36.0, 200.0)],
            hazards: vec![Bounds::new(1200.0, 64.0, 72.0, 36.0)],
            coins: vec![CoinData { x: 600.0, y: 160.0 }],
            moving_platforms: vec![],
            background: vec![],
            foreground: vec![],
        };

        let json = serde_json::to_string_pretty(&level).unwrap();
        let deserialized: LevelData = serde_json::from_str(&json).unwrap();
        assert_eq!(level, deserialized);
    }

    #[test]
    fn test_minimal_level_data() {
        // Layer lists default to empty when absent
        let json = r#"{
            "id": "minimal",
            "width": 800.0,
            "height": 600.0,
            "spawn_point": {"x": 64.0, "y": 225.0}
        }"#;

        let level: LevelData = serde_json::from_str(json).unwrap();
        assert_eq!(level.id, "minimal");
        assert!(level.platforms.is_empty());
        assert!(level.ladders.is_empty());
        assert!(level.hazards.is_empty());
        assert!(level.coins.is_empty());
        assert!(level.moving_platforms.is_empty());
    }

    #[test]
    fn test_hazard_layer_field_name() {
        // The hazard layer keeps its tile-map name in the JSON
        let json = r#"{
            "id": "hazards",
            "width": 800.0,
            "height": 600.0,
            "spawn_point": {"x": 64.0, "y": 225.0},
            "dont_touch": [{"x": 100.0, "y": 0.0, "width": 72.0, "height": 36.0}]
        }"#;

        let level: LevelData = serde_json::from_str(json).unwrap();
        assert_eq!(level.hazards.len(), 1);
        assert_eq!(level.hazards[0].x, 100.0);
    }

    #[test]
    fn test_end_of_map_is_width() {
        let json = r#"{
            "id": "end",
            "width": 2500.0,
            "height": 600.0,
            "spawn_point": {"x": 64.0, "y": 225.0}
        }"#;

        let level: LevelData = serde_json::from_str(json).unwrap();
        assert_eq!(level.end_of_map(), 2500.0);
    }

    #[test]
    fn test_moving_platform_data() {
        let json = r#"{
            "x": 300.0,
            "y": 200.0,
            "width": 128.0,
            "height": 32.0,
            "velocity_x": 60.0,
            "velocity_y": 0.0,
            "min_x": 300.0,
            "max_x": 700.0,
            "min_y": 200.0,
            "max_y": 200.0
        }"#;

        let platform: MovingPlatformData = serde_json::from_str(json).unwrap();
        assert_eq!(platform.velocity_x, 60.0);
        assert_eq!(platform.max_x, 700.0);
    }
}
