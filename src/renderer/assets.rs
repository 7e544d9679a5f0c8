//! Asset manifest and load tracking
//!
//! Loading itself belongs to the host (browser, desktop, headless). The
//! tracker only records per-asset outcomes. A failed asset is "settled": the
//! game still starts and that asset draws as a flat rectangle.

use crate::sim::{EnemyTag, ItemKind};

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    PlayerNormal,
    PlayerAttack,
    EnemyCrow,
    EnemyCat,
    ItemEgg,
    ItemYogurt,
    ItemChicken,
    Ground,
    Goal,
}

impl AssetId {
    pub const ALL: [AssetId; 9] = [
        AssetId::PlayerNormal,
        AssetId::PlayerAttack,
        AssetId::EnemyCrow,
        AssetId::EnemyCat,
        AssetId::ItemEgg,
        AssetId::ItemYogurt,
        AssetId::ItemChicken,
        AssetId::Ground,
        AssetId::Goal,
    ];

    pub fn path(self) -> &'static str {
        match self {
            AssetId::PlayerNormal => "assets/player_normal.png",
            AssetId::PlayerAttack => "assets/player_attack.png",
            AssetId::EnemyCrow => "assets/enemy_crow.png",
            AssetId::EnemyCat => "assets/enemy_cat.png",
            AssetId::ItemEgg => "assets/item_egg.png",
            AssetId::ItemYogurt => "assets/item_yogurt.png",
            AssetId::ItemChicken => "assets/item_chicken.png",
            AssetId::Ground => "assets/ground.png",
            AssetId::Goal => "assets/goal.png",
        }
    }

    pub fn for_enemy(tag: EnemyTag) -> Self {
        match tag {
            EnemyTag::Flyer => AssetId::EnemyCrow,
            EnemyTag::Walker => AssetId::EnemyCat,
        }
    }

    pub fn for_item(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Egg => AssetId::ItemEgg,
            ItemKind::Yogurt => AssetId::ItemYogurt,
            ItemKind::Chicken => AssetId::ItemChicken,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Per-asset load outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetStatus {
    #[default]
    Pending,
    Loaded,
    Failed,
}

/// Load status for the whole manifest
#[derive(Debug, Clone, Default)]
pub struct AssetTracker {
    status: [AssetStatus; AssetId::ALL.len()],
}

impl AssetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, id: AssetId) -> AssetStatus {
        self.status[id.index()]
    }

    pub fn mark_loaded(&mut self, id: AssetId) {
        log::debug!("Asset loaded: {}", id.path());
        self.status[id.index()] = AssetStatus::Loaded;
    }

    pub fn mark_failed(&mut self, id: AssetId) {
        log::warn!("Failed to load {} - drawing fallback shape", id.path());
        self.status[id.index()] = AssetStatus::Failed;
    }

    /// Every asset has either loaded or failed
    pub fn is_ready(&self) -> bool {
        self.status.iter().all(|s| *s != AssetStatus::Pending)
    }

    /// Fraction of settled assets (0.0 - 1.0), for a loading bar
    pub fn progress(&self) -> f32 {
        let settled = self
            .status
            .iter()
            .filter(|s| **s != AssetStatus::Pending)
            .count();
        settled as f32 / self.status.len() as f32
    }

    /// The sprite can be drawn
    pub fn is_available(&self, id: AssetId) -> bool {
        self.status(id) == AssetStatus::Loaded
    }
}
