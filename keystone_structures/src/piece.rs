// The piece contract and the closed set of piece shapes.
//
// A piece is one placeable unit of a structure. Every concrete shape in
// `pieces/` implements `PieceShape`:
//
// - `randomize()` fixes the shape's randomized parameters (lengths, turn
//   sides, decoration seeds) from the run's random source. No world access.
// - `footprint()` is the local-space extent; `Piece::bounding_box()` maps it
//   through the piece's transform.
// - `terrain_allows()` is the shape's read-only terrain precondition (e.g.
//   "no liquid nearby"). Overlap with already-placed pieces is checked by
//   `Piece::check_placement()`, not by the shape.
// - `place()` performs every block write for the piece. It draws no
//   randomness from the run: anything decorative derives from a seed fixed in
//   `randomize()`.
// - `next_pieces()` builds the successor candidates, each already positioned
//   via `Transform::compose()` and randomized.
//
// `Shape` is the closed sum of all concrete shapes; `Piece` pairs a shape
// with its transform. The generator only ever handles `Piece`s and dispatches
// through `Shape` with a plain `match`, so adding a shape means adding a
// variant here and a match arm in `dispatch!`.
//
// See also: `weighted.rs` for table-driven successor selection,
// `generator.rs` for the growth loop that calls these in order,
// `pieces/stronghold.rs` and `pieces/fortress.rs` for the recipes.

use crate::bounds::{BoundingBox, PlacedBoxes};
use crate::catalog::PieceCatalog;
use crate::cuboid::Cuboid;
use crate::error::{ConfigError, WorldError};
use crate::pieces::fortress::{
    FortressBridge, FortressBridgeIntersection, FortressCorridor, FortressIntersection,
    FortressRoom, FortressTurn,
};
use crate::pieces::stronghold::{
    StrongholdCorridor, StrongholdIntersection, StrongholdPortalRoom, StrongholdRoom,
    StrongholdStaircase, StrongholdTurn,
};
use crate::transform::{Transform, Yaw};
use crate::types::BlockCoord;
use crate::world::BlockWorld;
use keystone_prng::RandomSource;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Successor candidates produced by one piece. No shape yields more than
/// three.
pub type Successors = SmallVec<[Piece; 3]>;

// ---------------------------------------------------------------------------
// Piece kinds
// ---------------------------------------------------------------------------

/// Tag for every concrete piece shape.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PieceKind {
    StrongholdCorridor,
    StrongholdTurn,
    StrongholdIntersection,
    StrongholdStaircase,
    StrongholdRoom,
    StrongholdPortalRoom,
    FortressBridgeIntersection,
    FortressBridge,
    FortressTurn,
    FortressCorridor,
    FortressIntersection,
    FortressRoom,
}

impl PieceKind {
    pub const ALL: [PieceKind; 12] = [
        PieceKind::StrongholdCorridor,
        PieceKind::StrongholdTurn,
        PieceKind::StrongholdIntersection,
        PieceKind::StrongholdStaircase,
        PieceKind::StrongholdRoom,
        PieceKind::StrongholdPortalRoom,
        PieceKind::FortressBridgeIntersection,
        PieceKind::FortressBridge,
        PieceKind::FortressTurn,
        PieceKind::FortressCorridor,
        PieceKind::FortressIntersection,
        PieceKind::FortressRoom,
    ];

    /// Whether this kind selects successors from a weighted table.
    pub fn branches(self) -> bool {
        !matches!(
            self,
            PieceKind::StrongholdRoom | PieceKind::StrongholdPortalRoom | PieceKind::FortressRoom
        )
    }
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// Behavior shared by every concrete piece shape.
pub trait PieceShape {
    fn kind(&self) -> PieceKind;

    /// Fix randomized parameters. Must draw the same number of values for
    /// the same source state.
    fn randomize<R: RandomSource + ?Sized>(&mut self, catalog: &PieceCatalog, rng: &mut R);

    /// Local-space extent, corners inclusive.
    fn footprint(&self) -> Cuboid;

    /// Terrain precondition, read-only. Most shapes accept any terrain.
    fn terrain_allows<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &W,
    ) -> Result<bool, WorldError> {
        let _ = (transform, world);
        Ok(true)
    }

    fn place<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &mut W,
        catalog: &PieceCatalog,
    ) -> Result<(), WorldError>;

    fn next_pieces<R: RandomSource + ?Sized>(
        &self,
        transform: &Transform,
        catalog: &PieceCatalog,
        rng: &mut R,
    ) -> Result<Successors, ConfigError>;
}

/// Where a successor attaches: a local offset in the parent's space and a
/// yaw relative to the parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub offset: BlockCoord,
    pub turn: Yaw,
}

impl Anchor {
    pub const fn new(x: i32, y: i32, z: i32, turn: Yaw) -> Self {
        Self {
            offset: BlockCoord::new(x, y, z),
            turn,
        }
    }

    /// Straight ahead, no turn.
    pub const fn ahead(x: i32, y: i32, z: i32) -> Self {
        Self::new(x, y, z, Yaw::Deg0)
    }
}

// ---------------------------------------------------------------------------
// Closed shape set
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    StrongholdCorridor(StrongholdCorridor),
    StrongholdTurn(StrongholdTurn),
    StrongholdIntersection(StrongholdIntersection),
    StrongholdStaircase(StrongholdStaircase),
    StrongholdRoom(StrongholdRoom),
    StrongholdPortalRoom(StrongholdPortalRoom),
    FortressBridgeIntersection(FortressBridgeIntersection),
    FortressBridge(FortressBridge),
    FortressTurn(FortressTurn),
    FortressCorridor(FortressCorridor),
    FortressIntersection(FortressIntersection),
    FortressRoom(FortressRoom),
}

macro_rules! dispatch {
    ($shape:expr, $inner:ident => $body:expr) => {
        match $shape {
            Shape::StrongholdCorridor($inner) => $body,
            Shape::StrongholdTurn($inner) => $body,
            Shape::StrongholdIntersection($inner) => $body,
            Shape::StrongholdStaircase($inner) => $body,
            Shape::StrongholdRoom($inner) => $body,
            Shape::StrongholdPortalRoom($inner) => $body,
            Shape::FortressBridgeIntersection($inner) => $body,
            Shape::FortressBridge($inner) => $body,
            Shape::FortressTurn($inner) => $body,
            Shape::FortressCorridor($inner) => $body,
            Shape::FortressIntersection($inner) => $body,
            Shape::FortressRoom($inner) => $body,
        }
    };
}

impl Shape {
    /// A shape of `kind` with unrandomized default parameters.
    pub fn of_kind(kind: PieceKind) -> Self {
        match kind {
            PieceKind::StrongholdCorridor => Shape::StrongholdCorridor(Default::default()),
            PieceKind::StrongholdTurn => Shape::StrongholdTurn(Default::default()),
            PieceKind::StrongholdIntersection => Shape::StrongholdIntersection(Default::default()),
            PieceKind::StrongholdStaircase => Shape::StrongholdStaircase(Default::default()),
            PieceKind::StrongholdRoom => Shape::StrongholdRoom(Default::default()),
            PieceKind::StrongholdPortalRoom => Shape::StrongholdPortalRoom(Default::default()),
            PieceKind::FortressBridgeIntersection => {
                Shape::FortressBridgeIntersection(Default::default())
            }
            PieceKind::FortressBridge => Shape::FortressBridge(Default::default()),
            PieceKind::FortressTurn => Shape::FortressTurn(Default::default()),
            PieceKind::FortressCorridor => Shape::FortressCorridor(Default::default()),
            PieceKind::FortressIntersection => Shape::FortressIntersection(Default::default()),
            PieceKind::FortressRoom => Shape::FortressRoom(Default::default()),
        }
    }
}

impl PieceShape for Shape {
    fn kind(&self) -> PieceKind {
        dispatch!(self, s => s.kind())
    }

    fn randomize<R: RandomSource + ?Sized>(&mut self, catalog: &PieceCatalog, rng: &mut R) {
        dispatch!(self, s => s.randomize(catalog, rng))
    }

    fn footprint(&self) -> Cuboid {
        dispatch!(self, s => s.footprint())
    }

    fn terrain_allows<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &W,
    ) -> Result<bool, WorldError> {
        dispatch!(self, s => s.terrain_allows(transform, world))
    }

    fn place<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &mut W,
        catalog: &PieceCatalog,
    ) -> Result<(), WorldError> {
        dispatch!(self, s => s.place(transform, world, catalog))
    }

    fn next_pieces<R: RandomSource + ?Sized>(
        &self,
        transform: &Transform,
        catalog: &PieceCatalog,
        rng: &mut R,
    ) -> Result<Successors, ConfigError> {
        dispatch!(self, s => s.next_pieces(transform, catalog, rng))
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// Outcome of validating a candidate before placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementCheck {
    Clear,
    /// The candidate's box intersects an already-placed box.
    Overlaps,
    /// The shape's terrain precondition failed.
    TerrainRejected,
}

/// A shape at a position and rotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub transform: Transform,
    pub shape: Shape,
}

impl Piece {
    /// An unrandomized piece at the identity transform.
    pub fn of_kind(kind: PieceKind) -> Self {
        Self {
            transform: Transform::IDENTITY,
            shape: Shape::of_kind(kind),
        }
    }

    /// The first piece of a structure. A stronghold that starts with a
    /// corridor also grows its portal room behind it.
    pub fn root(kind: PieceKind) -> Self {
        let mut piece = Self::of_kind(kind);
        if let Shape::StrongholdCorridor(corridor) = &mut piece.shape {
            corridor.start_of_stronghold = true;
        }
        piece
    }

    /// Build a randomized successor of `kind` at `anchor` relative to
    /// `parent`.
    pub fn spawn<R: RandomSource + ?Sized>(
        kind: PieceKind,
        parent: &Transform,
        anchor: Anchor,
        catalog: &PieceCatalog,
        rng: &mut R,
    ) -> Self {
        let mut piece = Self::of_kind(kind);
        piece.transform = parent.compose(anchor.offset, anchor.turn);
        piece.randomize(catalog, rng);
        piece
    }

    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }

    pub fn set_position(&mut self, position: BlockCoord) {
        self.transform.position = position;
    }

    pub fn set_rotation(&mut self, rotation: Yaw) {
        self.transform.rotation = rotation;
    }

    pub fn randomize<R: RandomSource + ?Sized>(&mut self, catalog: &PieceCatalog, rng: &mut R) {
        self.shape.randomize(catalog, rng);
    }

    /// World-space extent.
    pub fn bounding_box(&self) -> BoundingBox {
        let footprint = self.shape.footprint();
        self.transform.bounding_box(footprint.a, footprint.b)
    }

    /// Read-only validation against the placed set and the terrain. Overlap
    /// is checked first, so a rejected overlap never reads the world.
    pub fn check_placement<W: BlockWorld + ?Sized>(
        &self,
        placed: &PlacedBoxes,
        world: &W,
    ) -> Result<PlacementCheck, WorldError> {
        if placed.intersects_any(&self.bounding_box()) {
            return Ok(PlacementCheck::Overlaps);
        }
        if !self.shape.terrain_allows(&self.transform, world)? {
            return Ok(PlacementCheck::TerrainRejected);
        }
        Ok(PlacementCheck::Clear)
    }

    pub fn can_place<W: BlockWorld + ?Sized>(
        &self,
        placed: &PlacedBoxes,
        world: &W,
    ) -> Result<bool, WorldError> {
        Ok(self.check_placement(placed, world)? == PlacementCheck::Clear)
    }

    pub fn place<W: BlockWorld + ?Sized>(
        &self,
        world: &mut W,
        catalog: &PieceCatalog,
    ) -> Result<(), WorldError> {
        self.shape.place(&self.transform, world, catalog)
    }

    pub fn next_pieces<R: RandomSource + ?Sized>(
        &self,
        catalog: &PieceCatalog,
        rng: &mut R,
    ) -> Result<Successors, ConfigError> {
        self.shape.next_pieces(&self.transform, catalog, rng)
    }
}
