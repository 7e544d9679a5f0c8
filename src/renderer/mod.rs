//! Render adapter
//!
//! Turns a [`Snapshot`] into a flat list of screen-space draw commands. The
//! host backend (canvas, GPU, terminal) only has to blit sprites, fill
//! rectangles and draw the text for an overlay. Missing sprites are replaced
//! here by solid fills, so the backend never needs to know about fallbacks.

pub mod assets;
pub mod shapes;
pub mod snapshot;
pub mod vertex;

pub use assets::{AssetId, AssetStatus, AssetTracker};
pub use snapshot::Snapshot;
pub use vertex::Vertex;

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::settings::Settings;
use crate::sim::{EnemyTag, Facing, GameMode, MeleeOrientation, PlatformKind, Rect};
use vertex::colors;

/// Height of the grass strip on fallback ground
const GRASS_HEIGHT: f32 = 10.0;
/// Alpha of the hidden blink phase under reduced motion
const BLINK_ALPHA: f32 = 0.4;

/// HUD layout
const LIFE_PIP: Rect = Rect::new(10.0, 75.0, 20.0, 20.0);
const LIFE_PIP_STRIDE: f32 = 30.0;
const ENERGY_BAR: Rect = Rect::new(10.0, 110.0, 150.0, 15.0);

/// One screen-space draw operation, back to front
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        asset: AssetId,
        dest: Rect,
        flip_x: bool,
        alpha: f32,
    },
    Fill {
        rect: Rect,
        color: [f32; 4],
    },
    /// Dim the screen and show the text for a non-playing mode
    Overlay(GameMode),
}

/// Draw list for one presented frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Tessellate all solid fills (sprites are left to the backend)
    pub fn fill_vertices(&self) -> Vec<Vertex> {
        let mut vertices = Vec::new();
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Fill { rect, color } => {
                    vertices.extend_from_slice(&shapes::quad(rect, *color));
                }
                DrawCommand::Overlay(_) => {
                    let screen = Rect::new(0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
                    vertices.extend_from_slice(&shapes::quad(&screen, colors::OVERLAY));
                }
                DrawCommand::Sprite { .. } => {}
            }
        }
        vertices
    }

    pub fn sprite_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
            .count()
    }
}

/// Fallback colors, honoring the high contrast preference
struct Palette {
    ground: [f32; 4],
    grass: [f32; 4],
    player: [f32; 4],
    crow: [f32; 4],
    cat: [f32; 4],
    item: [f32; 4],
}

impl Palette {
    fn new(high_contrast: bool) -> Self {
        if high_contrast {
            use colors::high_contrast as hc;
            Self {
                ground: hc::GROUND,
                grass: hc::GRASS,
                player: hc::PLAYER,
                crow: hc::CROW,
                cat: hc::CAT,
                item: hc::ITEM,
            }
        } else {
            Self {
                ground: colors::GROUND,
                grass: colors::GRASS,
                player: colors::PLAYER,
                crow: colors::CROW,
                cat: colors::CAT,
                item: colors::ITEM,
            }
        }
    }
}

struct FrameBuilder<'a> {
    assets: &'a AssetTracker,
    camera_x: f32,
    commands: Vec<DrawCommand>,
}

impl FrameBuilder<'_> {
    /// World rect to screen rect, or None if entirely off screen
    fn to_screen(&self, world: &Rect) -> Option<Rect> {
        let rect = world.offset_x(-self.camera_x);
        let visible = rect.right() > 0.0 && rect.x < VIEWPORT_WIDTH;
        visible.then_some(rect)
    }

    fn fill(&mut self, rect: Rect, color: [f32; 4]) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }

    /// Sprite if loaded, flat rectangle otherwise
    fn sprite_or_fill(&mut self, asset: AssetId, world: &Rect, flip_x: bool, alpha: f32, fallback: [f32; 4]) {
        let Some(dest) = self.to_screen(world) else {
            return;
        };
        if self.assets.is_available(asset) {
            self.commands.push(DrawCommand::Sprite {
                asset,
                dest,
                flip_x,
                alpha,
            });
        } else {
            let mut color = fallback;
            color[3] *= alpha;
            self.fill(dest, color);
        }
    }
}

/// Build the draw list for a snapshot
pub fn build_frame(snap: &Snapshot, assets: &AssetTracker, settings: &Settings) -> Frame {
    let palette = Palette::new(settings.high_contrast);
    let mut b = FrameBuilder {
        assets,
        camera_x: snap.camera_x,
        commands: Vec::new(),
    };

    b.fill(
        Rect::new(0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
        colors::SKY,
    );

    // === World ===
    for platform in &snap.platforms {
        let Some(dest) = b.to_screen(&platform.rect) else {
            continue;
        };
        if assets.is_available(AssetId::Ground) {
            b.commands.push(DrawCommand::Sprite {
                asset: AssetId::Ground,
                dest,
                flip_x: false,
                alpha: 1.0,
            });
        } else {
            b.fill(dest, palette.ground);
            if platform.kind != PlatformKind::Obstacle {
                b.fill(Rect::new(dest.x, dest.y, dest.w, GRASS_HEIGHT.min(dest.h)), palette.grass);
            }
        }
    }

    b.sprite_or_fill(AssetId::Goal, &snap.goal, false, 1.0, colors::GOAL);

    // Beams behind enemies
    for beam in &snap.beams {
        if let Some(dest) = b.to_screen(&beam.rect) {
            b.fill(dest, colors::BEAM);
        }
    }

    for enemy in &snap.enemies {
        let fallback = match enemy.tag {
            EnemyTag::Flyer => palette.crow,
            EnemyTag::Walker => palette.cat,
        };
        b.sprite_or_fill(AssetId::for_enemy(enemy.tag), &enemy.rect, enemy.dir > 0.0, 1.0, fallback);
    }

    for item in &snap.items {
        b.sprite_or_fill(AssetId::for_item(item.kind), &item.rect, false, 1.0, palette.item);
    }

    let player = &snap.player;
    let alpha = match (player.visible, settings.reduced_motion) {
        (true, _) => Some(1.0),
        (false, true) => Some(BLINK_ALPHA),
        (false, false) => None,
    };
    if let Some(alpha) = alpha {
        let asset = if player.attacking {
            AssetId::PlayerAttack
        } else {
            AssetId::PlayerNormal
        };
        let flip = player.facing == Facing::Left;
        b.sprite_or_fill(asset, &player.rect, flip, alpha, palette.player);
    }

    if snap.melee.active {
        if let Some(dest) = b.to_screen(&snap.melee.rect) {
            b.fill(dest, colors::MELEE);
            if snap.melee.orientation == MeleeOrientation::Up {
                b.fill(dest, colors::MELEE_UP);
            }
        }
    }

    if settings.show_hitboxes {
        let boxes: Vec<Rect> = std::iter::once(player.rect)
            .chain(snap.enemies.iter().map(|e| e.rect))
            .chain(snap.items.iter().map(|i| i.rect))
            .collect();
        for world in &boxes {
            if let Some(dest) = b.to_screen(world) {
                b.fill(dest, colors::HITBOX);
            }
        }
    }

    // === HUD ===
    if snap.mode == GameMode::Playing {
        for i in 0..snap.max_life {
            let pip = LIFE_PIP.offset_x(i as f32 * LIFE_PIP_STRIDE);
            let color = if i < snap.life {
                colors::LIFE_FULL
            } else {
                colors::LIFE_EMPTY
            };
            b.fill(pip, color);
        }

        if snap.beam_unlocked {
            b.fill(ENERGY_BAR, colors::ENERGY_BG);
            let filled = Rect::new(
                ENERGY_BAR.x,
                ENERGY_BAR.y,
                ENERGY_BAR.w * snap.energy_fraction.clamp(0.0, 1.0),
                ENERGY_BAR.h,
            );
            if filled.w > 0.0 {
                let color = if snap.god_mode {
                    colors::ENERGY_GOD
                } else {
                    colors::ENERGY
                };
                b.fill(filled, color);
            }
        }
    } else {
        b.commands.push(DrawCommand::Overlay(snap.mode));
    }

    Frame {
        commands: b.commands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, Intent, TickInput, tick};

    fn playing_snapshot(seed: u64) -> (GameState, Snapshot) {
        let mut state = GameState::new(seed);
        tick(&mut state, &TickInput::holding([]).press(Intent::Confirm));
        tick(&mut state, &TickInput::holding([]));
        let snap = Snapshot::capture(&state);
        (state, snap)
    }

    fn all_failed() -> AssetTracker {
        let mut tracker = AssetTracker::new();
        for id in AssetId::ALL {
            tracker.mark_failed(id);
        }
        tracker
    }

    fn all_loaded() -> AssetTracker {
        let mut tracker = AssetTracker::new();
        for id in AssetId::ALL {
            tracker.mark_loaded(id);
        }
        tracker
    }

    #[test]
    fn test_failed_assets_fall_back_to_fills() {
        let (_, snap) = playing_snapshot(1);
        let frame = build_frame(&snap, &all_failed(), &Settings::default());
        assert_eq!(frame.sprite_count(), 0);
        assert!(frame.commands.contains(&DrawCommand::Fill {
            rect: snap.player.rect.offset_x(-snap.camera_x),
            color: colors::PLAYER,
        }));
    }

    #[test]
    fn test_loaded_player_is_a_sprite() {
        let (_, snap) = playing_snapshot(2);
        let frame = build_frame(&snap, &all_loaded(), &Settings::default());
        assert!(frame.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Sprite {
                asset: AssetId::PlayerNormal,
                ..
            }
        )));
    }

    #[test]
    fn test_offscreen_platforms_are_culled() {
        let (_, snap) = playing_snapshot(3);
        let frame = build_frame(&snap, &all_loaded(), &Settings::default());
        let ground_sprites = frame
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { asset: AssetId::Ground, .. }))
            .count();
        let on_screen = snap
            .platforms
            .iter()
            .filter(|p| p.rect.x < VIEWPORT_WIDTH && p.rect.right() > 0.0)
            .count();
        assert!(ground_sprites < snap.platforms.len());
        assert_eq!(ground_sprites, on_screen);
    }

    #[test]
    fn test_hud_life_pips_and_locked_energy_bar() {
        let (_, mut snap) = playing_snapshot(4);
        snap.life = 2;
        let frame = build_frame(&snap, &all_loaded(), &Settings::default());
        let full = frame
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { color, .. } if *color == colors::LIFE_FULL))
            .count();
        let empty = frame
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { color, .. } if *color == colors::LIFE_EMPTY))
            .count();
        assert_eq!((full, empty), (2, 1));
        assert!(!frame.commands.contains(&DrawCommand::Fill {
            rect: ENERGY_BAR,
            color: colors::ENERGY_BG,
        }));
    }

    #[test]
    fn test_title_screen_gets_overlay() {
        let state = GameState::new(5);
        let snap = Snapshot::capture(&state);
        let frame = build_frame(&snap, &all_loaded(), &Settings::default());
        assert_eq!(frame.commands.last(), Some(&DrawCommand::Overlay(GameMode::Start)));
        // Sky, any fills and the overlay all tessellate
        assert!(frame.fill_vertices().len() >= 12);
    }

    #[test]
    fn test_hidden_blink_phase() {
        let (_, mut snap) = playing_snapshot(6);
        snap.player.visible = false;
        let tracker = all_loaded();

        let frame = build_frame(&snap, &tracker, &Settings::default());
        assert!(!frame.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Sprite {
                asset: AssetId::PlayerNormal,
                ..
            }
        )));

        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let frame = build_frame(&snap, &tracker, &settings);
        assert!(frame.commands.iter().any(|c| matches!(
            c,
            DrawCommand::Sprite {
                asset: AssetId::PlayerNormal,
                alpha,
                ..
            } if *alpha == BLINK_ALPHA
        )));
    }
}
