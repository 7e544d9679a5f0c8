//! Game mode state machine
//!
//! ```text
//! Start --confirm (assets ready)--> Playing
//! Playing --fell out / life 0--> GameOver --retry--> Playing (full reset)
//! Playing --goal, stage < 5--> StageClear --confirm--> Playing (next stage)
//! Playing --goal, stage 5--> GameClear --confirm--> Start (full reset)
//! ```
//!
//! Any other request is ignored.

use super::event::GameEvent;
use super::input::{Intent, TickInput};
use super::state::{GameMode, GameState};

fn set_mode(state: &mut GameState, to: GameMode, events: &mut Vec<GameEvent>) {
    let from = state.mode;
    if from == to {
        return;
    }
    log::info!("Mode {:?} -> {:?} (stage {}, score {})", from, to, state.stage.index(), state.score);
    state.mode = to;
    events.push(GameEvent::ModeChanged { from, to });
}

/// Evaluate input-driven transitions for the current mode.
///
/// Returns true if the mode changed.
pub fn apply_input_transitions(
    state: &mut GameState,
    input: &TickInput,
    events: &mut Vec<GameEvent>,
) -> bool {
    let confirm = input.was_pressed(Intent::Confirm);
    let retry = input.was_pressed(Intent::Retry);

    match state.mode {
        GameMode::Start if confirm && input.assets_ready => {
            set_mode(state, GameMode::Playing, events);
            events.push(GameEvent::StartMusic);
            true
        }
        GameMode::StageClear if confirm => {
            let Some(next) = state.stage.next() else {
                return false;
            };
            state.load_stage(next);
            set_mode(state, GameMode::Playing, events);
            events.push(GameEvent::StartMusic);
            true
        }
        GameMode::GameOver if retry => {
            state.reset_session();
            set_mode(state, GameMode::Playing, events);
            events.push(GameEvent::StartMusic);
            true
        }
        GameMode::GameClear if confirm => {
            state.reset_session();
            set_mode(state, GameMode::Start, events);
            true
        }
        _ => false,
    }
}

/// End the run (fell out or out of life)
pub fn end_run(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.mode != GameMode::Playing {
        return;
    }
    set_mode(state, GameMode::GameOver, events);
    events.push(GameEvent::StopMusic);
    events.push(GameEvent::GameOver);
}

/// Goal reached: clear the stage, or the whole game on the last stage
pub fn reach_goal(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.mode != GameMode::Playing {
        return;
    }
    events.push(GameEvent::StopMusic);
    if state.stage.is_last() {
        set_mode(state, GameMode::GameClear, events);
        events.push(GameEvent::GameCleared);
    } else {
        set_mode(state, GameMode::StageClear, events);
        events.push(GameEvent::StageCleared {
            stage: state.stage.index(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stage::Stage;

    fn confirm(ready: bool) -> TickInput {
        TickInput {
            assets_ready: ready,
            ..Default::default()
        }
        .press(Intent::Confirm)
    }

    #[test]
    fn test_start_requires_assets() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        assert!(!apply_input_transitions(&mut state, &confirm(false), &mut events));
        assert_eq!(state.mode, GameMode::Start);

        assert!(apply_input_transitions(&mut state, &confirm(true), &mut events));
        assert_eq!(state.mode, GameMode::Playing);
        assert!(events.contains(&GameEvent::StartMusic));
    }

    #[test]
    fn test_stage_clear_keeps_score_and_life() {
        let mut state = GameState::new(2);
        state.mode = GameMode::Playing;
        state.score = 1300;
        state.player.life = 2;
        state.camera_x = 1800.0;
        state.frame = 999;
        let mut events = Vec::new();

        reach_goal(&mut state, &mut events);
        assert_eq!(state.mode, GameMode::StageClear);

        assert!(apply_input_transitions(&mut state, &confirm(true), &mut events));
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.stage.index(), 2);
        assert_eq!(state.score, 1300);
        assert_eq!(state.player.life, 2);
        assert_eq!(state.camera_x, 0.0);
        assert_eq!(state.frame, 0);
        assert_eq!(state.goal.rect.x, 4000.0);
    }

    #[test]
    fn test_stage_advance_keeps_energy_and_god_mode_and_clears_lists() {
        use crate::sim::entity::{Beam, Enemy, Facing, Item, ItemKind};
        use glam::Vec2;

        let mut state = GameState::new(6);
        state.mode = GameMode::Playing;
        state.energy.set_current(37.5);
        state.player.god_mode = true;
        state.beam_cooldown = 12;
        let tuning = state.tuning.clone();
        state.enemies.push(Enemy::flyer(1, 900.0, 300.0, &tuning));
        state.items.push(Item {
            id: 2,
            kind: ItemKind::Yogurt,
            pos: Vec2::new(950.0, 400.0),
        });
        state.beams.push(Beam {
            id: 3,
            pos: Vec2::new(500.0, 480.0),
            facing: Facing::Right,
            age_ticks: 4,
        });
        let mut events = Vec::new();

        reach_goal(&mut state, &mut events);
        assert!(apply_input_transitions(&mut state, &confirm(true), &mut events));
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.energy.current(), 37.5);
        assert!(state.player.god_mode);
        assert!(state.enemies.is_empty());
        assert!(state.items.is_empty());
        assert!(state.beams.is_empty());
        assert_eq!(state.beam_cooldown, 0);
        assert!(!state.melee.is_active());
    }

    #[test]
    fn test_retry_resets_everything() {
        let mut state = GameState::new(3);
        state.mode = GameMode::Playing;
        state.load_stage(Stage::new(3).unwrap());
        state.score = 2500;
        state.player.life = 1;
        state.player.god_mode = true;
        let mut events = Vec::new();
        end_run(&mut state, &mut events);
        assert_eq!(state.mode, GameMode::GameOver);

        // Confirm is not a legal trigger from GameOver
        assert!(!apply_input_transitions(&mut state, &confirm(true), &mut events));
        assert_eq!(state.mode, GameMode::GameOver);

        let retry = TickInput::default().press(Intent::Retry);
        assert!(apply_input_transitions(&mut state, &retry, &mut events));
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.life, 3);
        assert!(!state.player.god_mode);
        assert_eq!(state.stage, Stage::FIRST);
    }

    #[test]
    fn test_goal_on_last_stage_clears_game() {
        let mut state = GameState::new(4);
        state.mode = GameMode::Playing;
        state.load_stage(Stage::LAST);
        state.score = 9000;
        let mut events = Vec::new();
        reach_goal(&mut state, &mut events);
        assert_eq!(state.mode, GameMode::GameClear);
        assert!(events.contains(&GameEvent::GameCleared));

        assert!(apply_input_transitions(&mut state, &confirm(true), &mut events));
        assert_eq!(state.mode, GameMode::Start);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_illegal_requests_are_ignored() {
        let mut state = GameState::new(5);
        let mut events = Vec::new();
        let retry = TickInput::default().press(Intent::Retry);
        assert!(!apply_input_transitions(&mut state, &retry, &mut events));
        assert_eq!(state.mode, GameMode::Start);

        state.mode = GameMode::Playing;
        assert!(!apply_input_transitions(&mut state, &confirm(true), &mut events));
        assert_eq!(state.mode, GameMode::Playing);
        assert!(events.is_empty());
    }
}
