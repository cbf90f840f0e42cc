// Validated, compiled generation configuration.
//
// `PieceCatalog::from_config()` is the single fail-fast point for
// configuration errors. It turns every weighted table into a
// `WeightedPieceTable` (rejecting empty tables, zero weights, and overflowing
// totals), checks footprint ranges, rejects a zero piece budget, and checks
// table coverage:
//
// - every branching kind the config mentions (as a table owner or as an
//   entry someone can select) must have a table of its own, and
// - terminal kinds (rooms) must not have one.
//
// A kind the config never mentions is not required to have a table; the
// stronghold preset alone is a valid catalog. Growing a root kind that has no
// table is caught when the generator is seeded.
//
// The catalog is immutable and shared by reference with every generator that
// uses it (it is `Sync`, so the batch planner shares one across threads).

use crate::config::{FootprintParams, GenerationConfig};
use crate::error::ConfigError;
use crate::generator::DequeueOrder;
use crate::piece::PieceKind;
use crate::weighted::{WeightEntry, WeightedPieceTable};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceCatalog {
    tables: BTreeMap<PieceKind, WeightedPieceTable>,
    footprints: FootprintParams,
    fill_downward_limit: u32,
    dequeue_order: DequeueOrder,
    piece_budget: usize,
}

impl PieceCatalog {
    pub fn from_config(config: &GenerationConfig) -> Result<Self, ConfigError> {
        if config.piece_budget == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        config.footprints.validate()?;

        let mut tables = BTreeMap::new();
        for (&owner, entries) in &config.tables {
            if !owner.branches() {
                return Err(ConfigError::TableForTerminal { kind: owner });
            }
            tables.insert(owner, WeightedPieceTable::new(owner, entries.clone())?);
        }

        let mentioned: BTreeSet<PieceKind> = config
            .tables
            .iter()
            .flat_map(|(&owner, entries)| {
                std::iter::once(owner).chain(entries.iter().map(|e| e.kind))
            })
            .collect();
        if let Some(&kind) = mentioned
            .iter()
            .find(|kind| kind.branches() && !tables.contains_key(kind))
        {
            return Err(ConfigError::MissingTable { kind });
        }

        Ok(Self {
            tables,
            footprints: config.footprints.clone(),
            fill_downward_limit: config.fill_downward_limit,
            dequeue_order: config.dequeue_order,
            piece_budget: config.piece_budget,
        })
    }

    /// Replace (or add) the table of one branching kind.
    pub fn with_table(
        mut self,
        owner: PieceKind,
        entries: Vec<WeightEntry>,
    ) -> Result<Self, ConfigError> {
        if !owner.branches() {
            return Err(ConfigError::TableForTerminal { kind: owner });
        }
        let table = WeightedPieceTable::new(owner, entries)?;
        if let Some(entry) = table
            .entries()
            .iter()
            .find(|e| e.kind.branches() && e.kind != owner && !self.tables.contains_key(&e.kind))
        {
            return Err(ConfigError::MissingTable { kind: entry.kind });
        }
        self.tables.insert(owner, table);
        Ok(self)
    }

    pub fn table(&self, kind: PieceKind) -> Result<&WeightedPieceTable, ConfigError> {
        self.tables
            .get(&kind)
            .ok_or(ConfigError::MissingTable { kind })
    }

    pub fn footprints(&self) -> &FootprintParams {
        &self.footprints
    }

    pub fn fill_downward_limit(&self) -> u32 {
        self.fill_downward_limit
    }

    pub fn dequeue_order(&self) -> DequeueOrder {
        self.dequeue_order
    }

    pub fn piece_budget(&self) -> usize {
        self.piece_budget
    }
}
