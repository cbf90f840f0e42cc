// Local-space block writers: cuboid fills, downward pillars, liquid queries.
//
// A `Cuboid` is a pair of raw local corners. It is a plain value: `offset()`
// returns a new cuboid, so chains of adjacent walls/floors/arches read as a
// sequence of values rather than mutations of hidden builder state:
//
//   let floor = filler.fill(Cuboid::new(0, 0, 0, 4, 1, 18))?;
//   filler.offset_and_fill(floor, -7, 0, 7, 7, 0, -7)?;
//
// Corners are kept exactly as given (offsets may cross them over); they are
// normalized only when cells are enumerated.
//
// A `MaterialPicker` decides what each cell of a fill receives, given whether
// the cell lies on the cuboid's shell (any boundary layer on any axis) or in
// its interior. `CuboidFiller` binds a piece's `Transform` to a world and
// routes every local write through `Transform::to_world`, rotating the facing
// of directional blocks (and the supporting face of wall-hung attachables) by
// the piece's yaw.
//
// Beyond cuboids the filler writes doors (both halves, turned with the
// piece), attachables (which seek a solid neighbor, below first), blocks
// placed only by chance, and self-contained `GeneratedObject`s. Chance writers
// take the piece's decoration stream explicitly; nothing in `place()` ever
// draws from the growth stream.
//
// See also: `pieces/` for the recipes that drive these writers,
// `transform.rs` for the coordinate mapping.

use crate::error::WorldError;
use crate::transform::Transform;
use crate::types::{Attachment, Block, BlockCoord, DOOR_UPPER_HALF, Facing, Material};
use crate::world::BlockWorld;
use keystone_prng::{RandomSource, StructureRng};

// ---------------------------------------------------------------------------
// Cuboid
// ---------------------------------------------------------------------------

/// Two local-space corners of an inclusive box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cuboid {
    pub a: BlockCoord,
    pub b: BlockCoord,
}

impl Cuboid {
    pub const fn new(x0: i32, y0: i32, z0: i32, x1: i32, y1: i32, z1: i32) -> Self {
        Self {
            a: BlockCoord::new(x0, y0, z0),
            b: BlockCoord::new(x1, y1, z1),
        }
    }

    /// Move each corner independently.
    pub const fn offset(self, dx0: i32, dy0: i32, dz0: i32, dx1: i32, dy1: i32, dz1: i32) -> Self {
        Self {
            a: self.a.offset(dx0, dy0, dz0),
            b: self.b.offset(dx1, dy1, dz1),
        }
    }

    /// Grow by `n` blocks on every side.
    pub fn expanded(self, n: i32) -> Self {
        let (lo, hi) = (self.lower(), self.upper());
        Self {
            a: lo.offset(-n, -n, -n),
            b: hi.offset(n, n, n),
        }
    }

    pub fn lower(&self) -> BlockCoord {
        self.a.min(self.b)
    }

    pub fn upper(&self) -> BlockCoord {
        self.a.max(self.b)
    }

    /// Every cell, layer by layer from the bottom, in a fixed order.
    pub fn cells(self) -> impl Iterator<Item = BlockCoord> {
        let (lo, hi) = (self.lower(), self.upper());
        (lo.y..=hi.y).flat_map(move |y| {
            (lo.z..=hi.z).flat_map(move |z| (lo.x..=hi.x).map(move |x| BlockCoord::new(x, y, z)))
        })
    }

    /// Whether `cell` lies on the boundary layer of any axis.
    pub fn is_shell(&self, cell: BlockCoord) -> bool {
        let (lo, hi) = (self.lower(), self.upper());
        cell.x == lo.x
            || cell.x == hi.x
            || cell.y == lo.y
            || cell.y == hi.y
            || cell.z == lo.z
            || cell.z == hi.z
    }
}

// ---------------------------------------------------------------------------
// Material pickers
// ---------------------------------------------------------------------------

/// Chooses the block for each cell of a cuboid fill.
pub trait MaterialPicker {
    fn pick(&mut self, outer: bool) -> Block;
}

/// Fixed outer (shell) and inner (interior) blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimpleMaterialPicker {
    outer: Block,
    inner: Block,
}

impl SimpleMaterialPicker {
    pub fn new(outer: Material, inner: Material) -> Self {
        Self {
            outer: outer.into(),
            inner: inner.into(),
        }
    }

    pub fn set_outer_inner(&mut self, outer: Material, inner: Material) {
        self.outer = outer.into();
        self.inner = inner.into();
    }
}

impl MaterialPicker for SimpleMaterialPicker {
    fn pick(&mut self, outer: bool) -> Block {
        if outer { self.outer } else { self.inner }
    }
}

/// Weathered stone bricks: plain, mossy, or cracked at random.
///
/// Draws from its own decoration stream, never from the growth stream.
#[derive(Clone, Debug)]
pub struct StoneBrickPicker {
    rng: StructureRng,
    hollow: bool,
}

impl StoneBrickPicker {
    const MOSSY_CHANCE: f32 = 0.2;
    const CRACKED_CHANCE: f32 = 0.1;

    /// Brick shell, air interior.
    pub fn new(decoration_seed: u64) -> Self {
        Self::from_rng(StructureRng::new(decoration_seed))
    }

    /// Brick shell, air interior, drawing from an existing stream.
    pub fn from_rng(rng: StructureRng) -> Self {
        Self { rng, hollow: true }
    }

    /// Bricks throughout.
    pub fn solid(decoration_seed: u64) -> Self {
        Self {
            hollow: false,
            ..Self::new(decoration_seed)
        }
    }
}

impl MaterialPicker for StoneBrickPicker {
    fn pick(&mut self, outer: bool) -> Block {
        if !outer && self.hollow {
            return Block::AIR;
        }
        let roll = self.rng.next_f32();
        if roll < Self::MOSSY_CHANCE {
            Block::new(Material::MossyStoneBrick)
        } else if roll < Self::MOSSY_CHANCE + Self::CRACKED_CHANCE {
            Block::new(Material::CrackedStoneBrick)
        } else {
            Block::new(Material::StoneBrick)
        }
    }
}

// ---------------------------------------------------------------------------
// Filler
// ---------------------------------------------------------------------------

/// Writes local-space cuboids, single blocks, and pillars for one piece.
pub struct CuboidFiller<'a, W: BlockWorld + ?Sized> {
    transform: &'a Transform,
    world: &'a mut W,
    picker: SimpleMaterialPicker,
}

impl<'a, W: BlockWorld + ?Sized> CuboidFiller<'a, W> {
    pub fn new(transform: &'a Transform, world: &'a mut W) -> Self {
        Self {
            transform,
            world,
            picker: SimpleMaterialPicker::default(),
        }
    }

    pub fn transform(&self) -> &Transform {
        self.transform
    }

    /// Configure the shell and interior materials used by `fill()`.
    pub fn set_outer_inner(&mut self, outer: Material, inner: Material) -> &mut Self {
        self.picker.set_outer_inner(outer, inner);
        self
    }

    /// Fill with one material throughout.
    pub fn set_material(&mut self, material: Material) -> &mut Self {
        self.set_outer_inner(material, material)
    }

    /// Fill every cell of `cuboid` from the configured picker. Returns the
    /// cuboid so the next call can offset from it.
    pub fn fill(&mut self, cuboid: Cuboid) -> Result<Cuboid, WorldError> {
        let mut picker = self.picker;
        self.fill_with(cuboid, &mut picker)
    }

    /// Fill every cell of `cuboid` from `picker`.
    pub fn fill_with<P: MaterialPicker + ?Sized>(
        &mut self,
        cuboid: Cuboid,
        picker: &mut P,
    ) -> Result<Cuboid, WorldError> {
        for cell in cuboid.cells() {
            let block = picker.pick(cuboid.is_shell(cell));
            self.set_block(cell, block)?;
        }
        Ok(cuboid)
    }

    /// Offset the previous cuboid's corners and fill the result.
    #[allow(clippy::too_many_arguments)]
    pub fn offset_and_fill(
        &mut self,
        previous: Cuboid,
        dx0: i32,
        dy0: i32,
        dz0: i32,
        dx1: i32,
        dy1: i32,
        dz1: i32,
    ) -> Result<Cuboid, WorldError> {
        self.fill(previous.offset(dx0, dy0, dz0, dx1, dy1, dz1))
    }

    /// Write one block at a local cell. Directional blocks and wall-hung
    /// attachables are turned with the piece.
    pub fn set_block(&mut self, local: BlockCoord, block: Block) -> Result<(), WorldError> {
        let block = self.turned(block);
        self.world.set_block(self.transform.to_world(local), block)
    }

    fn turned(&self, block: Block) -> Block {
        let material = block.material;
        if material.is_directional() {
            let facing = self.transform.facing(Facing::from_data(block.data));
            Block::with_data(material, (block.data & !0b11) | facing.to_data())
        } else if material.is_attachable() {
            let attachment = Attachment::from_data(block.data).rotated(self.transform.rotation);
            Block::with_data(material, attachment.to_data())
        } else {
            block
        }
    }

    /// Write `block` with probability `chance`, drawing exactly one
    /// `next_f32` from `rng`. Returns whether the block was written.
    pub fn set_block_chance<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        chance: f32,
        local: BlockCoord,
        block: Block,
    ) -> Result<bool, WorldError> {
        if rng.next_f32() >= chance {
            return Ok(false);
        }
        self.set_block(local, block)?;
        Ok(true)
    }

    /// Hang an attachable `material` at a local cell from the first solid
    /// neighbor, trying the block below and then the four sides in `Facing`
    /// order. Writes nothing and returns false when no neighbor can hold it.
    pub fn attach_block(
        &mut self,
        local: BlockCoord,
        material: Material,
    ) -> Result<bool, WorldError> {
        let mut support = None;
        if self.block(local.below())?.material.is_solid() {
            support = Some(Attachment::Ground);
        } else {
            for facing in Facing::ALL {
                let (dx, dz) = facing.to_xz();
                if self.block(local.offset(dx, 0, dz))?.material.is_solid() {
                    support = Some(Attachment::Wall(facing));
                    break;
                }
            }
        }
        match support {
            Some(attachment) => {
                self.set_block(local, Block::with_data(material, attachment.to_data()))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// `attach_block()` with probability `chance`; one `next_f32` per call.
    pub fn attach_block_chance<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        chance: f32,
        local: BlockCoord,
        material: Material,
    ) -> Result<bool, WorldError> {
        if rng.next_f32() >= chance {
            return Ok(false);
        }
        self.attach_block(local, material)
    }

    /// Both halves of a door standing at `local`, facing `facing` in local
    /// space.
    pub fn place_door(
        &mut self,
        local: BlockCoord,
        material: Material,
        facing: Facing,
    ) -> Result<(), WorldError> {
        let lower = Block::facing(material, facing);
        self.set_block(local, lower)?;
        let upper = Block::with_data(material, lower.data | DOOR_UPPER_HALF);
        self.set_block(local.offset(0, 1, 0), upper)
    }

    /// Hand `object` the world position of a local cell, if it accepts it.
    /// Returns whether it was placed.
    pub fn place_object<O: GeneratedObject>(
        &mut self,
        local: BlockCoord,
        object: &O,
    ) -> Result<bool, WorldError> {
        let origin = self.transform.to_world(local);
        if !object.can_place_object(&*self.world, origin)? {
            return Ok(false);
        }
        object.place_object(&mut *self.world, origin)?;
        Ok(true)
    }

    pub fn block(&self, local: BlockCoord) -> Result<Block, WorldError> {
        self.world.block(self.transform.to_world(local))
    }

    /// Starting at `local`, replace air or liquid with `block` straight down,
    /// stopping at the first solid block or after `limit` writes. Returns the
    /// number of writes.
    pub fn fill_downward(
        &mut self,
        local: BlockCoord,
        limit: u32,
        block: Block,
    ) -> Result<u32, WorldError> {
        let mut cursor = self.transform.to_world(local);
        let mut written = 0;
        while written < limit && !self.world.block_material(cursor)?.is_solid() {
            self.world.set_block(cursor, block)?;
            written += 1;
            cursor = cursor.below();
        }
        Ok(written)
    }
}

/// A self-contained feature placed at a single world position, in world
/// orientation.
pub trait GeneratedObject {
    fn can_place_object<W: BlockWorld + ?Sized>(
        &self,
        world: &W,
        origin: BlockCoord,
    ) -> Result<bool, WorldError>;

    fn place_object<W: BlockWorld + ?Sized>(
        &self,
        world: &mut W,
        origin: BlockCoord,
    ) -> Result<(), WorldError>;
}

/// Whether any cell of the local `cuboid` currently holds a liquid.
pub fn intersects_liquids<W: BlockWorld + ?Sized>(
    transform: &Transform,
    world: &W,
    cuboid: Cuboid,
) -> Result<bool, WorldError> {
    for cell in cuboid.cells() {
        if world.block_material(transform.to_world(cell))?.is_liquid() {
            return Ok(true);
        }
    }
    Ok(false)
}
