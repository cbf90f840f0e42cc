// Block-storage collaborators.
//
// `BlockWorld` is the only way generation touches the world: read a block,
// write a block. Everything else (terrain noise, chunk persistence, lighting)
// lives on the other side of this trait. Writes are fire-and-forget from the
// generator's point of view; the only outcome it consults is `Err`, which
// aborts the current run (see `generator.rs`).
//
// Two reference implementations:
// - `SparseWorld`: unbounded, hash-backed. Cells never written read as a
//   background material, optionally with a solid floor below a given height.
//   This is what tests and benches grow structures into.
// - `DenseWorld`: a flat array covering one loaded region. Any access outside
//   the region is `WorldError::Unloaded`, which is how an unloaded chunk looks
//   to the core.
//
// See also: `staging.rs` for the write-recording overlay used by parallel
// planning, `cuboid.rs` for the local-space writers built on this trait.

use crate::error::WorldError;
use crate::types::{Block, BlockCoord, Material};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Read/write access to blocks in world coordinates.
pub trait BlockWorld {
    fn block(&self, coord: BlockCoord) -> Result<Block, WorldError>;

    fn set_block(&mut self, coord: BlockCoord, block: Block) -> Result<(), WorldError>;

    fn block_material(&self, coord: BlockCoord) -> Result<Material, WorldError> {
        Ok(self.block(coord)?.material)
    }

    fn set_block_material(
        &mut self,
        coord: BlockCoord,
        material: Material,
        data: u16,
    ) -> Result<(), WorldError> {
        self.set_block(coord, Block::with_data(material, data))
    }
}

impl<W: BlockWorld + ?Sized> BlockWorld for &mut W {
    fn block(&self, coord: BlockCoord) -> Result<Block, WorldError> {
        (**self).block(coord)
    }

    fn set_block(&mut self, coord: BlockCoord, block: Block) -> Result<(), WorldError> {
        (**self).set_block(coord, block)
    }
}

// ---------------------------------------------------------------------------
// SparseWorld
// ---------------------------------------------------------------------------

/// Unbounded world storing only explicitly written blocks.
#[derive(Clone, Debug, Default)]
pub struct SparseWorld {
    blocks: FxHashMap<BlockCoord, Block>,
    background: Material,
    /// Cells at or below this height read as the floor material.
    floor: Option<(i32, Material)>,
    writes: usize,
}

impl SparseWorld {
    /// A world that reads as `background` everywhere.
    pub fn new(background: Material) -> Self {
        Self {
            background,
            ..Self::default()
        }
    }

    /// A world with `floor_material` at and below `floor_y`, and `background`
    /// above it.
    pub fn with_floor(floor_y: i32, floor_material: Material, background: Material) -> Self {
        Self {
            background,
            floor: Some((floor_y, floor_material)),
            ..Self::default()
        }
    }

    /// Number of `set_block` calls served, including overwrites.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Number of distinct cells holding an explicit block.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All explicitly written cells, in coordinate order.
    pub fn snapshot(&self) -> BTreeMap<BlockCoord, Block> {
        self.blocks.iter().map(|(c, b)| (*c, *b)).collect()
    }

    fn implicit(&self, coord: BlockCoord) -> Block {
        match self.floor {
            Some((floor_y, material)) if coord.y <= floor_y => Block::new(material),
            _ => Block::new(self.background),
        }
    }
}

impl BlockWorld for SparseWorld {
    fn block(&self, coord: BlockCoord) -> Result<Block, WorldError> {
        Ok(self
            .blocks
            .get(&coord)
            .copied()
            .unwrap_or_else(|| self.implicit(coord)))
    }

    fn set_block(&mut self, coord: BlockCoord, block: Block) -> Result<(), WorldError> {
        self.blocks.insert(coord, block);
        self.writes += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// DenseWorld
// ---------------------------------------------------------------------------

/// Dense 3D block grid covering one loaded region.
///
/// Flat storage indexed by `x + z * size_x + y * size_x * size_z`, relative
/// to `origin` (the region's minimum corner).
#[derive(Clone, Debug, Default)]
pub struct DenseWorld {
    blocks: Vec<Block>,
    pub origin: BlockCoord,
    pub size_x: u32,
    pub size_y: u32,
    pub size_z: u32,
}

impl DenseWorld {
    /// Create a region filled with `fill`.
    pub fn new(origin: BlockCoord, size: (u32, u32, u32), fill: Material) -> Self {
        let (size_x, size_y, size_z) = size;
        let total = (size_x as usize) * (size_y as usize) * (size_z as usize);
        Self {
            blocks: vec![Block::new(fill); total],
            origin,
            size_x,
            size_y,
            size_z,
        }
    }

    /// Check whether a coordinate is inside the loaded region.
    pub fn in_bounds(&self, coord: BlockCoord) -> bool {
        self.relative(coord).is_some()
    }

    /// Offset of `coord` from the origin along each axis, if loaded. Computed
    /// in `i64` so regions near the `i32` limits cannot overflow.
    fn relative(&self, coord: BlockCoord) -> Option<(usize, usize, usize)> {
        let axis = |c: i32, o: i32, size: u32| {
            let rel = i64::from(c) - i64::from(o);
            (0..i64::from(size)).contains(&rel).then_some(rel as usize)
        };
        Some((
            axis(coord.x, self.origin.x, self.size_x)?,
            axis(coord.y, self.origin.y, self.size_y)?,
            axis(coord.z, self.origin.z, self.size_z)?,
        ))
    }

    /// Fill every cell whose height is in `ys` with `material`.
    pub fn fill_layers(&mut self, ys: std::ops::RangeInclusive<i32>, material: Material) {
        for y in ys {
            for z in 0..self.size_z as i32 {
                for x in 0..self.size_x as i32 {
                    let coord = BlockCoord {
                        y,
                        ..self.origin.offset(x, 0, z)
                    };
                    if let Some(i) = self.index(coord) {
                        self.blocks[i] = Block::new(material);
                    }
                }
            }
        }
    }

    fn index(&self, coord: BlockCoord) -> Option<usize> {
        let (x, y, z) = self.relative(coord)?;
        let sx = self.size_x as usize;
        let sz = self.size_z as usize;
        Some(x + z * sx + y * sx * sz)
    }
}

impl BlockWorld for DenseWorld {
    fn block(&self, coord: BlockCoord) -> Result<Block, WorldError> {
        self.index(coord)
            .map(|i| self.blocks[i])
            .ok_or(WorldError::Unloaded { coord })
    }

    fn set_block(&mut self, coord: BlockCoord, block: Block) -> Result<(), WorldError> {
        let i = self.index(coord).ok_or(WorldError::Unloaded { coord })?;
        self.blocks[i] = block;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_reads_background_until_written() {
        let mut world = SparseWorld::new(Material::Air);
        let coord = BlockCoord::new(3, -5, 2);
        assert_eq!(world.block_material(coord), Ok(Material::Air));
        world.set_block(coord, Block::new(Material::NetherBrick)).unwrap();
        assert_eq!(world.block_material(coord), Ok(Material::NetherBrick));
        assert_eq!(world.write_count(), 1);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn sparse_floor_reads_below_threshold() {
        let world = SparseWorld::with_floor(10, Material::Stone, Material::Air);
        assert_eq!(world.block_material(BlockCoord::new(0, 10, 0)), Ok(Material::Stone));
        assert_eq!(world.block_material(BlockCoord::new(0, -90, 0)), Ok(Material::Stone));
        assert_eq!(world.block_material(BlockCoord::new(0, 11, 0)), Ok(Material::Air));
    }

    #[test]
    fn sparse_overwrite_counts_every_write() {
        let mut world = SparseWorld::default();
        let coord = BlockCoord::ORIGIN;
        world.set_block_material(coord, Material::Stone, 0).unwrap();
        world.set_block_material(coord, Material::Dirt, 0).unwrap();
        assert_eq!(world.write_count(), 2);
        assert_eq!(world.len(), 1);
        assert_eq!(world.snapshot()[&coord], Block::new(Material::Dirt));
    }

    #[test]
    fn dense_set_and_get() {
        let mut world = DenseWorld::new(BlockCoord::new(-4, -4, -4), (8, 8, 8), Material::Air);
        let coord = BlockCoord::new(-1, 2, 3);
        world.set_block(coord, Block::new(Material::StoneBrick)).unwrap();
        assert_eq!(world.block_material(coord), Ok(Material::StoneBrick));
        // Neighbors are untouched.
        assert_eq!(world.block_material(coord.offset(1, 0, 0)), Ok(Material::Air));
        assert_eq!(world.block_material(coord.below()), Ok(Material::Air));
    }

    #[test]
    fn dense_out_of_region_is_unloaded() {
        let mut world = DenseWorld::new(BlockCoord::ORIGIN, (4, 4, 4), Material::Air);
        let outside = BlockCoord::new(4, 0, 0);
        assert_eq!(
            world.block(outside),
            Err(WorldError::Unloaded { coord: outside })
        );
        assert_eq!(
            world.set_block(BlockCoord::new(0, -1, 0), Block::AIR),
            Err(WorldError::Unloaded {
                coord: BlockCoord::new(0, -1, 0)
            })
        );
    }

    #[test]
    fn dense_indexing_is_correct() {
        // x + z * size_x + y * size_x * size_z, relative to origin.
        let mut world = DenseWorld::new(BlockCoord::new(10, 0, 10), (10, 8, 6), Material::Air);
        let coord = BlockCoord::new(15, 3, 14);
        world.set_block(coord, Block::new(Material::Gravel)).unwrap();
        assert_eq!(world.block_material(coord), Ok(Material::Gravel));
        assert_eq!(world.block_material(BlockCoord::new(14, 3, 14)), Ok(Material::Air));
        assert_eq!(world.block_material(BlockCoord::new(15, 2, 14)), Ok(Material::Air));
        assert_eq!(world.block_material(BlockCoord::new(15, 3, 13)), Ok(Material::Air));
    }

    #[test]
    fn dense_fill_layers() {
        let mut world = DenseWorld::new(BlockCoord::new(0, -2, 0), (3, 5, 3), Material::Air);
        world.fill_layers(-2..=0, Material::Netherrack);
        assert_eq!(world.block_material(BlockCoord::new(2, -2, 2)), Ok(Material::Netherrack));
        assert_eq!(world.block_material(BlockCoord::new(1, 0, 1)), Ok(Material::Netherrack));
        assert_eq!(world.block_material(BlockCoord::new(1, 1, 1)), Ok(Material::Air));
    }

    #[test]
    fn default_dense_world_is_fully_unloaded() {
        let world = DenseWorld::default();
        assert!(world.block(BlockCoord::ORIGIN).is_err());
    }

    #[test]
    fn dense_bounds_hold_at_the_coordinate_limits() {
        let origin = BlockCoord::new(i32::MAX - 1, 0, i32::MIN);
        let world = DenseWorld::new(origin, (2, 1, 2), Material::Air);
        assert!(world.in_bounds(BlockCoord::new(i32::MAX, 0, i32::MIN + 1)));
        assert!(!world.in_bounds(BlockCoord::new(i32::MIN, 0, i32::MIN)));
        assert!(!world.in_bounds(BlockCoord::new(i32::MAX, 0, i32::MAX)));
        assert_eq!(
            world.block(BlockCoord::new(0, 0, 0)),
            Err(WorldError::Unloaded { coord: BlockCoord::ORIGIN })
        );
    }
}
