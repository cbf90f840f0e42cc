// keystone_structures: piece-based procedural structure generation.
//
// This crate grows branching architectural structures (strongholds, nether
// fortresses, bridges) inside a voxel world: a seed piece is placed, asks for
// its successors, and each successor is validated against everything placed
// so far before it writes any blocks. It has no terrain, persistence, or
// rendering dependencies; the world is reached only through the `BlockWorld`
// trait.
//
// Module overview:
// - `types.rs`:     BlockCoord, Material, Block, Facing.
// - `error.rs`:     WorldError / ConfigError / GenerationError.
// - `world.rs`:     BlockWorld trait + SparseWorld and DenseWorld collaborators.
// - `staging.rs`:   StagedWorld: write-recording overlay over a shared base.
// - `transform.rs`: Yaw + Transform (local-to-world rotation and translation).
// - `bounds.rs`:    BoundingBox + PlacedBoxes (the shared collision set).
// - `cuboid.rs`:    Cuboid, MaterialPicker, CuboidFiller, liquid queries.
// - `weighted.rs`:  WeightedPieceTable + WeightedBranching successor selection.
// - `piece.rs`:     PieceKind, the PieceShape contract, Shape sum type, Piece.
// - `pieces/`:      Concrete stronghold and fortress piece recipes.
// - `config.rs`:    GenerationConfig: budgets, footprints, tables (JSON).
// - `catalog.rs`:   PieceCatalog: validated, compiled configuration.
// - `generator.rs`: StructureGenerator growth loop + `generate()` entry point.
// - `batch.rs`:     Parallel planning of independent structures (rayon).
// - `prng`:         Re-exported from `keystone_prng`.
//
// **Critical constraint: determinism.** A generation run is a pure function of
// `(catalog, request, world contents)`. All randomness comes from the run's
// own seeded source, passed explicitly into `randomize()` and
// `next_pieces()`. Collections that affect output order are `Vec`,
// `VecDeque`, or `BTreeMap`; hash maps are used only for point lookups.

pub mod batch;
pub mod bounds;
pub mod catalog;
pub mod config;
pub mod cuboid;
pub mod error;
pub mod generator;
pub mod piece;
pub mod pieces;
pub use keystone_prng as prng;
pub mod staging;
pub mod transform;
pub mod types;
pub mod weighted;
pub mod world;
