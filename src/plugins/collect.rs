use crate::components::{Coin, Collider, Player, Position};
use crate::enums::GamePhase;
use crate::plugins::session::GameSession;
use bevy::prelude::*;

/// Coin pickup hitbox, matching the coin sprite size
const COIN_SIZE: f32 = 36.0;

/// Event fired when a coin is picked up (consumed by the audio plugin)
#[derive(Event)]
pub struct CoinCollected;

/// Plugin for coin collection
pub struct CollectPlugin;

impl Plugin for CollectPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CoinCollected>()
            .add_systems(Update, collect_coins_system);
    }
}

/// Despawn coins the player overlaps and bump the score
fn collect_coins_system(
    mut commands: Commands,
    mut session: ResMut<GameSession>,
    player_query: Query<(&Position, &Collider), With<Player>>,
    coin_query: Query<(Entity, &Position), With<Coin>>,
    mut collect_events: EventWriter<CoinCollected>,
) {
    if session.phase != GamePhase::Running {
        return;
    }

    for (player_pos, player_collider) in player_query.iter() {
        let half_w = player_collider.width / 2.0;
        let half_h = player_collider.height / 2.0;

        for (coin_entity, coin_pos) in coin_query.iter() {
            let coin_left = coin_pos.x - COIN_SIZE / 2.0;
            let coin_right = coin_pos.x + COIN_SIZE / 2.0;
            let coin_bottom = coin_pos.y - COIN_SIZE / 2.0;
            let coin_top = coin_pos.y + COIN_SIZE / 2.0;

            if player_pos.x + half_w > coin_left
                && player_pos.x - half_w < coin_right
                && player_pos.y + half_h > coin_bottom
                && player_pos.y - half_h < coin_top
            {
                commands.entity(coin_entity).despawn();
                session.score += 1;
                collect_events.send(CoinCollected);
                info!("Coin collected, score: {}", session.score);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::GamePhase;

    fn running_session() -> GameSession {
        GameSession {
            phase: GamePhase::Running,
            ..Default::default()
        }
    }

    #[test]
    fn test_coin_collection_bumps_score() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(CollectPlugin);
        app.insert_resource(running_session());

        app.world.spawn((
            Player,
            Position::new(100.0, 100.0),
            Collider::new(32.0, 60.0),
        ));
        app.world.spawn((Coin, Position::new(100.0, 100.0)));

        app.update();

        let session = app.world.resource::<GameSession>();
        assert_eq!(session.score, 1);
    }

    #[test]
    fn test_coin_despawns_after_collection() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(CollectPlugin);
        app.insert_resource(running_session());

        app.world.spawn((
            Player,
            Position::new(100.0, 100.0),
            Collider::new(32.0, 60.0),
        ));
        app.world.spawn((Coin, Position::new(100.0, 100.0)));

        app.update();
        app.update();

        let mut coin_query = app.world.query_filtered::<Entity, With<Coin>>();
        assert_eq!(coin_query.iter(&app.world).count(), 0);

        // Score stays at one: the coin is gone
        let session = app.world.resource::<GameSession>();
        assert_eq!(session.score, 1);
    }

    #[test]
    fn test_distant_coin_not_collected() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(CollectPlugin);
        app.insert_resource(running_session());

        app.world.spawn((
            Player,
            Position::new(100.0, 100.0),
            Collider::new(32.0, 60.0),
        ));
        app.world.spawn((Coin, Position::new(500.0, 100.0)));

        app.update();

        let session = app.world.resource::<GameSession>();
        assert_eq!(session.score, 0);

        let mut coin_query = app.world.query_filtered::<Entity, With<Coin>>();
        assert_eq!(coin_query.iter(&app.world).count(), 1);
    }

    #[test]
    fn test_no_collection_outside_running_phase() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(CollectPlugin);
        app.insert_resource(GameSession::default()); // Intro phase

        app.world.spawn((
            Player,
            Position::new(100.0, 100.0),
            Collider::new(32.0, 60.0),
        ));
        app.world.spawn((Coin, Position::new(100.0, 100.0)));

        app.update();

        let session = app.world.resource::<GameSession>();
        assert_eq!(session.score, 0);
    }
}
