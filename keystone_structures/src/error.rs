// Error taxonomy for structure generation.
//
// Three tiers:
// - `WorldError`: the block collaborator could not serve a read or write
//   (e.g. the block lies in an unloaded region). Fatal to the run that hit it.
// - `ConfigError`: a malformed weighted table or footprint. Raised while
//   compiling a `GenerationConfig` into a `PieceCatalog`, before any
//   generation begins.
// - `GenerationError`: what the growth loop surfaces to its caller, wrapping
//   the two above plus misuse of the generator's lifecycle.
//
// A pruned branch (a candidate whose placement check fails) is not an error
// and never appears here; see `generator.rs`.

use crate::piece::PieceKind;
use crate::types::BlockCoord;
use thiserror::Error;

/// Failure reported by a `BlockWorld` collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("block {coord} lies outside the loaded region")]
    Unloaded { coord: BlockCoord },
}

/// A configuration that cannot be compiled into a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("weighted table for {owner:?} has no entries")]
    EmptyTable { owner: PieceKind },

    #[error("weighted table for {owner:?} gives {entry:?} a zero weight")]
    ZeroWeight { owner: PieceKind, entry: PieceKind },

    #[error("weighted table for {owner:?} overflows the total weight")]
    WeightOverflow { owner: PieceKind },

    #[error("branching piece {kind:?} has no weighted table")]
    MissingTable { kind: PieceKind },

    #[error("{kind:?} never branches but was given a weighted table")]
    TableForTerminal { kind: PieceKind },

    #[error("malformed footprint for {kind:?}: {reason}")]
    MalformedFootprint { kind: PieceKind, reason: String },

    #[error("piece budget must be at least 1")]
    ZeroBudget,
}

/// Anything that stops a generation run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("world access failed while handling {kind:?}")]
    World {
        kind: PieceKind,
        #[source]
        source: WorldError,
    },

    #[error("generator has not been seeded with a root piece")]
    NotSeeded,

    #[error("generator was already seeded")]
    AlreadySeeded,
}
