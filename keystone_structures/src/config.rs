// Data-driven generation configuration.
//
// Everything tunable about a structure run lives in `GenerationConfig`,
// loaded from JSON: the piece budget, the dequeue order of the growth queue,
// how deep support pillars may reach, the ranges randomized footprints are
// drawn from, and one weighted successor table per branching piece kind.
// Recipes never hard-code these; they read them from the compiled
// `PieceCatalog`.
//
// Named preset constructors (`GenerationConfig::stronghold()`,
// `::nether_fortress()`) produce the two structure families by supplying
// different table sets over the same parameter layout. `Default` carries
// both families, so either root kind can be grown from it.
//
// A config is plain data and may be malformed; `PieceCatalog::from_config()`
// is where it is validated.
//
// See also: `catalog.rs` for validation and compilation, `weighted.rs` for
// `WeightEntry` and selection, `generator.rs` for `DequeueOrder`.
//
// **Critical constraint: determinism.** Config values feed directly into
// piece parameters and successor selection. Two runs agree only if their
// configs are identical; `tables` is a `BTreeMap` so serialization order is
// stable.

use crate::error::ConfigError;
use crate::generator::DequeueOrder;
use crate::piece::PieceKind;
use crate::weighted::WeightEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Longest randomized footprint dimension a config may request.
pub const MAX_FOOTPRINT_LENGTH: u32 = 64;

// ---------------------------------------------------------------------------
// Footprint ranges
// ---------------------------------------------------------------------------

/// Inclusive range a randomized footprint dimension is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRange {
    pub min: u32,
    pub max: u32,
}

impl LengthRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Check `floor <= min <= max <= MAX_FOOTPRINT_LENGTH`.
    pub fn validate(&self, kind: PieceKind, floor: u32) -> Result<(), ConfigError> {
        let reason = if self.min < floor {
            format!("minimum {} is below {floor}", self.min)
        } else if self.min > self.max {
            format!("minimum {} exceeds maximum {}", self.min, self.max)
        } else if self.max > MAX_FOOTPRINT_LENGTH {
            format!("maximum {} exceeds {MAX_FOOTPRINT_LENGTH}", self.max)
        } else {
            return Ok(());
        };
        Err(ConfigError::MalformedFootprint { kind, reason })
    }
}

/// Ranges for every randomized footprint dimension.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootprintParams {
    /// Blocks of run of a stronghold corridor.
    pub stronghold_corridor_length: LengthRange,
    /// Blocks a stronghold staircase descends.
    pub stronghold_staircase_depth: LengthRange,
    /// Blocks of run of a fortress bridge. At least 4, so both end arches
    /// fit.
    pub fortress_bridge_length: LengthRange,
}

impl Default for FootprintParams {
    fn default() -> Self {
        Self {
            stronghold_corridor_length: LengthRange::new(4, 8),
            stronghold_staircase_depth: LengthRange::new(2, 4),
            fortress_bridge_length: LengthRange::new(6, 10),
        }
    }
}

impl FootprintParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.stronghold_corridor_length
            .validate(PieceKind::StrongholdCorridor, 1)?;
        self.stronghold_staircase_depth
            .validate(PieceKind::StrongholdStaircase, 1)?;
        self.fortress_bridge_length.validate(PieceKind::FortressBridge, 4)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GenerationConfig
// ---------------------------------------------------------------------------

/// All tunable parameters of a structure run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Maximum pieces placed per run, unless a request overrides it.
    pub piece_budget: usize,
    pub dequeue_order: DequeueOrder,
    /// Maximum blocks a support pillar extends downward.
    pub fill_downward_limit: u32,
    pub footprints: FootprintParams,
    /// Successor table per branching kind, entries in selection order.
    pub tables: BTreeMap<PieceKind, Vec<WeightEntry>>,
}

fn entries(weights: &[(PieceKind, u32)]) -> Vec<WeightEntry> {
    weights
        .iter()
        .map(|&(kind, weight)| WeightEntry::new(kind, weight))
        .collect()
}

impl GenerationConfig {
    /// Stronghold tables only.
    pub fn stronghold() -> Self {
        use PieceKind::*;
        let mut tables = BTreeMap::new();
        tables.insert(
            StrongholdCorridor,
            entries(&[
                (StrongholdIntersection, 2),
                (StrongholdRoom, 1),
                (StrongholdTurn, 2),
                (StrongholdStaircase, 2),
            ]),
        );
        // Junctions mostly lead back into corridors.
        let from_junction = entries(&[
            (StrongholdCorridor, 4),
            (StrongholdIntersection, 1),
            (StrongholdRoom, 1),
            (StrongholdTurn, 1),
            (StrongholdStaircase, 2),
        ]);
        for kind in [StrongholdTurn, StrongholdIntersection, StrongholdStaircase] {
            tables.insert(kind, from_junction.clone());
        }
        Self {
            tables,
            ..Self::empty()
        }
    }

    /// Nether fortress tables only.
    pub fn nether_fortress() -> Self {
        use PieceKind::*;
        let mut tables = BTreeMap::new();
        tables.insert(
            FortressBridgeIntersection,
            entries(&[(FortressRoom, 3), (FortressBridge, 8), (FortressIntersection, 4)]),
        );
        tables.insert(
            FortressBridge,
            entries(&[
                (FortressBridge, 4),
                (FortressBridgeIntersection, 3),
                (FortressRoom, 1),
            ]),
        );
        tables.insert(
            FortressTurn,
            entries(&[(FortressRoom, 3), (FortressIntersection, 6), (FortressCorridor, 10)]),
        );
        let from_hall = entries(&[
            (FortressCorridor, 10),
            (FortressIntersection, 6),
            (FortressTurn, 4),
            (FortressRoom, 3),
        ]);
        for kind in [FortressCorridor, FortressIntersection] {
            tables.insert(kind, from_hall.clone());
        }
        Self {
            tables,
            ..Self::empty()
        }
    }

    /// Default scalar parameters with no tables.
    fn empty() -> Self {
        Self {
            piece_budget: 64,
            dequeue_order: DequeueOrder::BreadthFirst,
            fill_downward_limit: 50,
            footprints: FootprintParams::default(),
            tables: BTreeMap::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let mut config = Self::stronghold();
        config.tables.extend(Self::nether_fortress().tables);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = GenerationConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored: GenerationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
        // Keys serialize by name.
        assert!(json.contains("\"FortressBridgeIntersection\""));
    }

    #[test]
    fn default_covers_both_families() {
        let config = GenerationConfig::default();
        for kind in PieceKind::ALL.into_iter().filter(|k| k.branches()) {
            assert!(config.tables.contains_key(&kind), "{kind:?}");
        }
        assert_eq!(config.piece_budget, 64);
        assert_eq!(config.dequeue_order, DequeueOrder::BreadthFirst);
        assert_eq!(config.fill_downward_limit, 50);
    }

    #[test]
    fn presets_do_not_mix_families() {
        let stronghold = GenerationConfig::stronghold();
        assert!(!stronghold.tables.contains_key(&PieceKind::FortressBridge));
        let fortress = GenerationConfig::nether_fortress();
        assert!(!fortress.tables.contains_key(&PieceKind::StrongholdCorridor));
    }

    #[test]
    fn config_loads_partial_json() {
        let json = r#"{
            "piece_budget": 12,
            "dequeue_order": "DepthFirst",
            "footprints": {
                "stronghold_corridor_length": { "min": 5, "max": 5 }
            },
            "tables": {
                "FortressBridgeIntersection": [
                    { "kind": "FortressRoom", "weight": 1 },
                    { "kind": "FortressCorridor", "weight": 3 }
                ]
            }
        }"#;
        let config = GenerationConfig::from_json(json).unwrap();
        assert_eq!(config.piece_budget, 12);
        assert_eq!(config.dequeue_order, DequeueOrder::DepthFirst);
        assert_eq!(config.fill_downward_limit, 50);
        assert_eq!(config.footprints.stronghold_corridor_length, LengthRange::new(5, 5));
        // Unspecified ranges keep their defaults.
        assert_eq!(
            config.footprints.fortress_bridge_length,
            FootprintParams::default().fortress_bridge_length
        );
        let table = &config.tables[&PieceKind::FortressBridgeIntersection];
        assert_eq!(table[1], WeightEntry::new(PieceKind::FortressCorridor, 3));
    }

    #[test]
    fn unknown_piece_kind_fails_to_parse() {
        let json = r#"{ "tables": { "WitchHut": [] } }"#;
        assert!(GenerationConfig::from_json(json).is_err());
    }

    #[test]
    fn length_range_validation() {
        let kind = PieceKind::FortressBridge;
        assert_eq!(LengthRange::new(4, 10).validate(kind, 4), Ok(()));
        assert!(matches!(
            LengthRange::new(3, 10).validate(kind, 4),
            Err(ConfigError::MalformedFootprint { .. })
        ));
        assert!(LengthRange::new(9, 8).validate(kind, 1).is_err());
        assert!(LengthRange::new(1, MAX_FOOTPRINT_LENGTH + 1).validate(kind, 1).is_err());
        assert!(FootprintParams::default().validate().is_ok());
    }
}
