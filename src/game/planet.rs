//! Planet types and the size / special-type tables.

use serde::{Deserialize, Serialize};

use crate::game::PlayerId;

/// Identifier of a planet, unique within a level.
pub type PlanetId = u16;

/// Physical size class of a planet. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanetSize {
    /// 30 soldiers, +1/tick.
    Tiny,
    /// 60 soldiers, +2/tick.
    Small,
    /// 100 soldiers, +3/tick.
    Medium,
    /// 150 soldiers, +4/tick.
    Large,
    /// 220 soldiers, +5/tick.
    Huge,
}

impl PlanetSize {
    /// Every size, smallest first.
    pub const ALL: [PlanetSize; 5] = [
        PlanetSize::Tiny,
        PlanetSize::Small,
        PlanetSize::Medium,
        PlanetSize::Large,
        PlanetSize::Huge,
    ];

    /// Garrison capacity before special-type modifiers.
    #[must_use]
    pub const fn base_capacity(self) -> u32 {
        match self {
            PlanetSize::Tiny => 30,
            PlanetSize::Small => 60,
            PlanetSize::Medium => 100,
            PlanetSize::Large => 150,
            PlanetSize::Huge => 220,
        }
    }

    /// Soldiers produced per tick before special-type modifiers.
    #[must_use]
    pub const fn production_rate(self) -> u32 {
        match self {
            PlanetSize::Tiny => 1,
            PlanetSize::Small => 2,
            PlanetSize::Medium => 3,
            PlanetSize::Large => 4,
            PlanetSize::Huge => 5,
        }
    }

    /// Rendering radius hint.
    #[must_use]
    pub const fn radius(self) -> u32 {
        match self {
            PlanetSize::Tiny => 15,
            PlanetSize::Small => 20,
            PlanetSize::Medium => 30,
            PlanetSize::Large => 40,
            PlanetSize::Huge => 50,
        }
    }
}

/// Modifier bundle carried by some neutral planets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialType {
    /// No modifiers.
    #[default]
    Normal,
    /// Double production.
    Energy,
    /// +50% defense, +30% capacity.
    Fortress,
    /// +1 production to each same-owner neighbor.
    Factory,
    /// Double capacity, half production.
    Rare,
}

impl SpecialType {
    /// Special types that can appear on a board, in unlock order.
    pub const SPECIALS: [SpecialType; 4] = [
        SpecialType::Energy,
        SpecialType::Fortress,
        SpecialType::Factory,
        SpecialType::Rare,
    ];

    /// Multiplier applied to the size's base production.
    #[must_use]
    pub const fn production_multiplier(self) -> f64 {
        match self {
            SpecialType::Energy => 2.0,
            SpecialType::Rare => 0.5,
            SpecialType::Normal | SpecialType::Fortress | SpecialType::Factory => 1.0,
        }
    }

    /// Fractional defense bonus applied when the planet is attacked.
    #[must_use]
    pub const fn defense_bonus(self) -> f64 {
        match self {
            SpecialType::Fortress => 0.5,
            _ => 0.0,
        }
    }

    /// Capacity multiplier in percent (integer so capacities floor exactly).
    #[must_use]
    pub const fn capacity_percent(self) -> u32 {
        match self {
            SpecialType::Fortress => 130,
            SpecialType::Rare => 200,
            SpecialType::Normal | SpecialType::Energy | SpecialType::Factory => 100,
        }
    }

    /// Flat production this planet grants to each same-owner neighbor.
    #[must_use]
    pub const fn neighbor_bonus(self) -> u32 {
        match self {
            SpecialType::Factory => 1,
            _ => 0,
        }
    }

    /// First level on which this type may be generated.
    #[must_use]
    pub const fn unlock_level(self) -> u32 {
        match self {
            SpecialType::Normal => 1,
            SpecialType::Energy => 6,
            SpecialType::Fortress => 8,
            SpecialType::Factory => 12,
            SpecialType::Rare => 16,
        }
    }
}

/// A planet on the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    /// Unique identifier within the level.
    pub id: PlanetId,
    /// Horizontal board position.
    pub x: f64,
    /// Vertical board position.
    pub y: f64,
    /// Size class.
    pub size: PlanetSize,
    /// Owning player id (None = neutral). Resolve through the player table.
    pub owner: Option<PlayerId>,
    /// Current garrison, always within `0..=max_soldiers`.
    pub soldier_count: u32,
    /// Garrison capacity.
    pub max_soldiers: u32,
    /// Base production per tick.
    pub production_rate: u32,
    /// Game-clock time of the last credited production, in milliseconds.
    pub last_production_ms: u64,
    /// Special modifier bundle.
    pub special_type: SpecialType,
    /// Defense bonus snapshot taken at creation.
    pub special_bonus: f64,
}

impl Planet {
    /// Create an empty planet with capacity and production derived from its size and type.
    #[must_use]
    pub fn new(
        id: PlanetId,
        position: (f64, f64),
        size: PlanetSize,
        owner: Option<PlayerId>,
        special_type: SpecialType,
        now_ms: u64,
    ) -> Self {
        Self {
            id,
            x: position.0,
            y: position.1,
            size,
            owner,
            soldier_count: 0,
            max_soldiers: size.base_capacity() * special_type.capacity_percent() / 100,
            production_rate: size.production_rate(),
            last_production_ms: now_ms,
            special_type,
            special_bonus: special_type.defense_bonus(),
        }
    }

    /// Builder-style garrison setter, clamped to capacity.
    #[must_use]
    pub fn with_soldiers(mut self, soldiers: u32) -> Self {
        self.set_soldiers(soldiers);
        self
    }

    /// Set the garrison, clamped to capacity.
    pub fn set_soldiers(&mut self, soldiers: u32) {
        self.soldier_count = soldiers.min(self.max_soldiers);
    }

    /// Check whether the planet has no owner.
    #[must_use]
    pub const fn is_neutral(&self) -> bool {
        self.owner.is_none()
    }

    /// Check whether `player` owns this planet.
    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Euclidean distance between planet centers.
    #[must_use]
    pub fn distance_to(&self, other: &Planet) -> f64 {
        self.distance_to_point(other.x, other.y)
    }

    /// Euclidean distance from this planet's center to a point.
    #[must_use]
    pub fn distance_to_point(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}
