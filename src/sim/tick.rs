//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Order per tick:
//! toggles and mode transitions first (in every mode), then, only while
//! playing: timers, movement intents, X then Y integration with platform
//! resolution, fall-out check, camera, melee, beam firing, beam flight,
//! spawning, enemy/item motion, combat, pickups and the goal.

use glam::Vec2;

use super::collision;
use super::entity::{Beam, Facing};
use super::event::{GameEvent, KillSource};
use super::geometry::overlaps;
use super::input::{Intent, TickInput};
use super::mode;
use super::spawn;
use super::state::{GameMode, GameState};
use crate::consts::*;

/// Horizontal speeds below this snap to rest under friction
const REST_SPEED: f32 = 0.05;

/// Advance the game state by one fixed timestep and return effect requests
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.held = input.held;

    apply_toggles(state, input, &mut events);
    let transitioned = mode::apply_input_transitions(state, input, &mut events);

    // Physics and combat only run on ticks that begin in play
    if transitioned || state.mode != GameMode::Playing {
        return events;
    }

    update_timers(state);
    apply_movement(state, input, &mut events);
    integrate_player(state);

    if state.player.pos.y > VIEWPORT_HEIGHT {
        events.push(GameEvent::FellOut);
        mode::end_run(state, &mut events);
        return events;
    }

    follow_camera(state);
    update_melee(state, input, &mut events);
    update_beam_fire(state, input, &mut events);
    advance_beams(state, &mut events);

    spawn::run_spawner(state);
    state.frame += 1;

    advance_enemies_and_items(state);
    resolve_melee_hits(state, &mut events);
    if resolve_contact_damage(state, &mut events) {
        return events;
    }
    collect_items(state, &mut events);

    if overlaps(&state.player.rect(), &state.goal.rect) {
        mode::reach_goal(state, &mut events);
    }

    events
}

/// Mute, god-mode toggle and the hidden unlocks (evaluated in every mode)
fn apply_toggles(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let mut toggle_god = false;

    for &intent in &input.pressed {
        if state.cheat.press(intent) {
            log::info!("Unlock sequence entered");
            toggle_god = !toggle_god;
        }
        match intent {
            Intent::ToggleMute => {
                state.muted = !state.muted;
                events.push(GameEvent::MuteToggled { muted: state.muted });
                events.push(if state.muted {
                    GameEvent::StopMusic
                } else {
                    GameEvent::StartMusic
                });
            }
            Intent::ToggleGodMode => toggle_god = !toggle_god,
            _ => {}
        }
    }

    if matches!(state.mode, GameMode::Playing | GameMode::GameOver) {
        for &pos in &input.taps {
            if state.corner_taps.tap(pos) {
                log::info!("Corner tap gesture completed");
                toggle_god = !toggle_god;
            }
        }
    }

    if toggle_god {
        state.player.god_mode = !state.player.god_mode;
        log::info!("God mode {}", if state.player.god_mode { "ON" } else { "OFF" });
        events.push(GameEvent::GodModeToggled {
            enabled: state.player.god_mode,
        });
    }
}

/// Step 1: count down timed flags
fn update_timers(state: &mut GameState) {
    state.melee.tick_timers();
    state.player.update_blink(state.frame);
    state.cheat.tick();
    state.corner_taps.tick();
}

/// Step 2: horizontal intent, jump, gravity
fn apply_movement(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let tuning = &state.tuning;
    let player = &mut state.player;

    if input.is_held(Intent::MoveLeft) {
        player.vel.x = -tuning.player_speed;
        player.facing = Facing::Left;
    } else if input.is_held(Intent::MoveRight) {
        player.vel.x = tuning.player_speed;
        player.facing = Facing::Right;
    } else if player.grounded {
        player.vel.x *= tuning.friction;
        if player.vel.x.abs() < REST_SPEED {
            player.vel.x = 0.0;
        }
    }

    if input.was_pressed(Intent::Jump) && player.grounded {
        player.vel.y = -tuning.jump_power;
        player.grounded = false;
        events.push(GameEvent::Jumped);
    }

    if !player.grounded {
        player.vel.y += tuning.gravity;
    }
}

/// Steps 3-4: move on X and resolve, then on Y and resolve
fn integrate_player(state: &mut GameState) {
    let player = &mut state.player;
    let mut body = player.rect();

    collision::move_x(&mut body, &mut player.vel.x, &state.platforms);
    let contact = collision::move_y(&mut body, &mut player.vel.y, &state.platforms);

    player.pos = Vec2::new(body.x, body.y);
    player.grounded = contact.grounded();
}

/// Step 6: scroll right when the player passes the offset, never left
fn follow_camera(state: &mut GameState) {
    let target = state.player.pos.x - CAMERA_OFFSET;
    if target > state.camera_x {
        state.camera_x = target;
    }
    state.camera_x = state.camera_x.max(0.0);
}

/// Step 7: start a melee strike
fn update_melee(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if input.was_pressed(Intent::Melee) && state.melee.can_trigger() {
        let aim_up = input.is_held(Intent::Up);
        state.melee.trigger(&state.player, aim_up, &state.tuning);
        events.push(GameEvent::MeleeStarted {
            orientation: state.melee.orientation,
        });
    }
}

/// Step 8: held beam fires on a cadence while energy (or god-mode) allows
fn update_beam_fire(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let cost = state.tuning.beam_cost;
    state.firing = input.is_held(Intent::Beam) && state.beam_unlocked();

    if !state.firing {
        state.beam_cooldown = 0;
        state.energy.regen(state.tuning.beam_regen_per_tick());
        return;
    }

    if state.beam_cooldown > 0 {
        state.beam_cooldown -= 1;
    }
    if state.beam_cooldown > 0 {
        return;
    }

    let paid = state.player.god_mode || state.energy.try_spend(cost);
    if !paid {
        return;
    }

    let body = state.player.rect();
    let x = match state.player.facing {
        Facing::Right => body.right() - 20.0,
        Facing::Left => body.x - 20.0,
    };
    let y = if input.is_held(Intent::Up) {
        body.y + body.h / 3.0 - 8.0
    } else if input.is_held(Intent::Down) {
        body.bottom() - 10.0
    } else {
        body.y + body.h * 0.65 - 8.0
    };

    let id = state.next_entity_id();
    state.beams.push(Beam {
        id,
        pos: Vec2::new(x, y),
        facing: state.player.facing,
        age_ticks: 0,
    });
    state.beam_cooldown = state.tuning.beam_interval_ticks;
    events.push(GameEvent::BeamFired { x, y });
}

/// Step 9: fly beams, drop expired ones, first enemy hit consumes both
fn advance_beams(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let camera_x = state.camera_x;
    let tuning = &state.tuning;
    state.beams.retain_mut(|b| b.advance(camera_x, tuning));

    let beams = std::mem::take(&mut state.beams);
    let mut surviving = Vec::with_capacity(beams.len());
    for beam in beams {
        let rect = beam.rect();
        match state.enemies.iter().position(|e| overlaps(&rect, &e.rect())) {
            Some(j) => {
                let enemy = state.enemies.remove(j);
                state.score += state.tuning.score_beam_kill;
                log::debug!("Beam #{} destroyed enemy #{}", beam.id, enemy.id);
                events.push(GameEvent::EnemyKilled {
                    tag: enemy.kind.tag(),
                    by: KillSource::Beam,
                    x: enemy.pos.x,
                    y: enemy.pos.y,
                });
            }
            None => surviving.push(beam),
        }
    }
    state.beams = surviving;
}

/// Step 11: patrol enemies, cull anything left behind the camera
fn advance_enemies_and_items(state: &mut GameState) {
    for enemy in &mut state.enemies {
        enemy.update(&mut state.rng, &state.tuning);
    }
    let camera_x = state.camera_x;
    state.enemies.retain(|e| e.in_range(camera_x));
    state.items.retain(|i| i.in_range(camera_x));
}

/// Step 12a: every enemy touching a live melee hitbox dies
fn resolve_melee_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.melee.is_active() {
        return;
    }
    let hitbox = state.melee.rect;
    let reward = state.tuning.score_melee_kill;

    let mut kills = Vec::new();
    state.enemies.retain(|e| {
        if overlaps(&hitbox, &e.rect()) {
            kills.push((e.kind.tag(), e.pos));
            false
        } else {
            true
        }
    });

    for (tag, pos) in kills {
        state.score += reward;
        events.push(GameEvent::EnemyKilled {
            tag,
            by: KillSource::Melee,
            x: pos.x,
            y: pos.y,
        });
    }
}

/// Step 12b: unguarded contact costs one life. Returns true if the run ended.
fn resolve_contact_damage(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let player = &state.player;
    if state.melee.is_active() || player.is_invincible() || player.god_mode {
        return false;
    }

    let body = player.rect();
    let Some(j) = state.enemies.iter().position(|e| overlaps(&body, &e.rect())) else {
        return false;
    };
    state.enemies.remove(j);

    let player = &mut state.player;
    player.life = player.life.saturating_sub(1);
    events.push(GameEvent::PlayerDamaged {
        life_left: player.life,
    });

    if player.life == 0 {
        mode::end_run(state, events);
        return true;
    }
    player.invincible_ticks = state.tuning.invincibility_ticks;
    false
}

/// Step 13: pick up touched items
fn collect_items(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let body = state.player.rect();
    let mut collected = Vec::new();
    state.items.retain(|item| {
        if overlaps(&body, &item.rect()) {
            collected.push((item.kind, item.pos));
            false
        } else {
            true
        }
    });

    for (kind, pos) in collected {
        state.score += state.tuning.score_item;
        events.push(GameEvent::ItemCollected {
            kind,
            x: pos.x,
            y: pos.y,
        });
    }
}
