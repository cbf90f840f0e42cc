// Weighted next-piece selection.
//
// A `WeightedPieceTable` is an ordered list of `(kind, weight)` entries owned
// by one branching piece kind. Selection draws a uniform `r` in
// `[0, total_weight)` and walks the entries accumulating weight, returning
// the first entry whose running total exceeds `r`. Each kind is therefore
// chosen with probability `weight / total_weight`, and a fixed draw always
// selects the same entry, which is what lets tests force an outcome with
// `ScriptedRandom`.
//
// Tables are validated once, when a `GenerationConfig` is compiled into a
// `PieceCatalog` (see `catalog.rs`): no empty tables, no zero weights, and
// the total must fit in a `u32` draw. Selection itself never fails.
//
// `WeightedBranching` is the capability a branching piece opts into: given
// its own transform and a local exit anchor, draw a successor kind from the
// piece's table, build that successor at the composed transform, and
// randomize it.

use crate::catalog::PieceCatalog;
use crate::error::ConfigError;
use crate::piece::{Anchor, Piece, PieceKind, PieceShape};
use crate::transform::Transform;
use keystone_prng::RandomSource;
use serde::{Deserialize, Serialize};

/// One weighted choice in a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub kind: PieceKind,
    pub weight: u32,
}

impl WeightEntry {
    pub const fn new(kind: PieceKind, weight: u32) -> Self {
        Self { kind, weight }
    }
}

/// Validated cumulative-weight table for one branching piece kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedPieceTable {
    owner: PieceKind,
    entries: Vec<WeightEntry>,
    total: u32,
}

impl WeightedPieceTable {
    pub fn new(owner: PieceKind, entries: Vec<WeightEntry>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyTable { owner });
        }
        let mut total: u32 = 0;
        for entry in &entries {
            if entry.weight == 0 {
                return Err(ConfigError::ZeroWeight {
                    owner,
                    entry: entry.kind,
                });
            }
            total = total
                .checked_add(entry.weight)
                .ok_or(ConfigError::WeightOverflow { owner })?;
        }
        Ok(Self {
            owner,
            entries,
            total,
        })
    }

    pub fn builder(owner: PieceKind) -> TableBuilder {
        TableBuilder {
            owner,
            entries: Vec::new(),
        }
    }

    pub fn owner(&self) -> PieceKind {
        self.owner
    }

    pub fn entries(&self) -> &[WeightEntry] {
        &self.entries
    }

    pub fn total_weight(&self) -> u32 {
        self.total
    }

    /// The entry selected by a draw `r` in `[0, total_weight)`.
    ///
    /// Draws at or beyond the total are clamped onto the last entry.
    pub fn select_with_draw(&self, r: u32) -> PieceKind {
        let mut cumulative = 0;
        for entry in &self.entries {
            cumulative += entry.weight;
            if cumulative > r {
                return entry.kind;
            }
        }
        // Validated tables are never empty, so the owner is unreachable here.
        self.entries.last().map_or(self.owner, |entry| entry.kind)
    }

    /// Draw one kind. Consumes exactly one `next_int` from `rng`.
    pub fn select<R: RandomSource + ?Sized>(&self, rng: &mut R) -> PieceKind {
        self.select_with_draw(rng.next_int(self.total))
    }
}

/// Appends entries in order, validating on `build()`.
#[derive(Clone, Debug)]
pub struct TableBuilder {
    owner: PieceKind,
    entries: Vec<WeightEntry>,
}

impl TableBuilder {
    pub fn add(mut self, kind: PieceKind, weight: u32) -> Self {
        self.entries.push(WeightEntry::new(kind, weight));
        self
    }

    pub fn build(self) -> Result<WeightedPieceTable, ConfigError> {
        WeightedPieceTable::new(self.owner, self.entries)
    }
}

// ---------------------------------------------------------------------------
// Weighted branching
// ---------------------------------------------------------------------------

/// A piece whose successors are drawn from its own table in the catalog.
pub trait WeightedBranching: PieceShape {
    /// Draw a successor kind and build it at `anchor` relative to `parent`.
    ///
    /// The selection draw happens before the successor's own `randomize()`
    /// draws, so sibling order fixes the draw order.
    fn branch<R: RandomSource + ?Sized>(
        &self,
        parent: &Transform,
        anchor: Anchor,
        catalog: &PieceCatalog,
        rng: &mut R,
    ) -> Result<Piece, ConfigError> {
        let kind = catalog.table(self.kind())?.select(rng);
        Ok(Piece::spawn(kind, parent, anchor, catalog, rng))
    }
}
