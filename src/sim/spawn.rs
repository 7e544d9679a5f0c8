//! Enemy and item spawner
//!
//! Runs on the stage frame counter: enemies on a cadence that tightens with
//! difficulty, items on a fixed cadence. Everything appears just past the
//! right edge of the viewport.

use glam::Vec2;
use rand::Rng;

use super::entity::{Enemy, Item, ItemKind};
use super::state::GameState;
use crate::consts::{GROUND_Y, SPAWN_AHEAD};

pub fn run_spawner(state: &mut GameState) {
    let spawn_x = state.camera_x + SPAWN_AHEAD;
    let enemy_every = state.tuning.enemy_spawn_ticks(state.difficulty()) as u64;
    let item_every = state.tuning.item_spawn_ticks as u64;

    if state.frame % enemy_every == 0 {
        spawn_enemy(state, spawn_x);
    }
    if state.frame % item_every == 0 {
        spawn_item(state, spawn_x);
    }
}

fn spawn_enemy(state: &mut GameState, x: f32) {
    let id = state.next_entity_id();
    let enemy = if state.rng.random_bool(0.5) {
        let y = 200.0 + state.rng.random::<f32>() * 200.0;
        Enemy::flyer(id, x, y, &state.tuning)
    } else {
        Enemy::walker(id, x, &state.tuning)
    };
    log::debug!("Spawned {:?} #{} at x={}", enemy.kind.tag(), id, x);
    state.enemies.push(enemy);
}

fn spawn_item(state: &mut GameState, x: f32) {
    let id = state.next_entity_id();
    let kind = ItemKind::ALL[state.rng.random_range(0..ItemKind::ALL.len())];
    let y = if state.rng.random_bool(0.4) {
        GROUND_Y - 150.0
    } else {
        GROUND_Y - 30.0
    };
    state.items.push(Item {
        id,
        kind,
        pos: Vec2::new(x, y),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stage::Stage;

    #[test]
    fn test_spawns_on_first_frame() {
        let mut state = GameState::new(11);
        run_spawner(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.enemies[0].pos.x, SPAWN_AHEAD);
    }

    #[test]
    fn test_harder_stages_spawn_more_enemies() {
        let count = |stage: Stage| {
            let mut state = GameState::new(3);
            state.load_stage(stage);
            for frame in 0..1800 {
                state.frame = frame;
                run_spawner(&mut state);
            }
            state.enemies.len()
        };
        // 1800 ticks: every 180 on stage 1, every 90 on stage 5
        assert_eq!(count(Stage::FIRST), 10);
        assert_eq!(count(Stage::LAST), 20);
    }

    #[test]
    fn test_items_spawn_at_one_of_two_heights() {
        let mut state = GameState::new(8);
        for frame in 0..2400 {
            state.frame = frame;
            run_spawner(&mut state);
        }
        assert_eq!(state.items.len(), 20);
        for item in &state.items {
            assert!(item.pos.y == GROUND_Y - 150.0 || item.pos.y == GROUND_Y - 30.0);
        }
    }
}
