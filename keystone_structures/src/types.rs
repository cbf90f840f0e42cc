// Core types shared across structure generation.
//
// Defines block coordinates (`BlockCoord`), block materials and their
// classification queries (`Material`), the written unit (`Block`: material +
// data word), horizontal facings for directional blocks (`Facing`), and the
// supporting face of attachable blocks (`Attachment`).
//
// Data word layout, by material class:
// - directional (stairs, portal frames, doors): bits 0-1 hold a `Facing`;
//   doors set `DOOR_UPPER_HALF` on their top block.
// - attachable (torches): `Attachment::to_data()`; bits 0-1 hold the facing
//   toward the supporting wall unless `Attachment::GROUND_BIT` is set.
//
// Coordinates are `i32` and every coordinate operation saturates at the
// `i32` limits instead of overflowing.
//
// The same `BlockCoord` type is used for both piece-local offsets and world
// positions; which space a value lives in is always clear from the API it
// passes through (`Transform::to_world` is the only bridge).

use crate::transform::Yaw;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// An integer lattice position, in blocks.
///
/// The coordinate system uses right-handed conventions:
/// - X: east  (positive) / west  (negative)
/// - Y: up    (positive) / down  (negative)
/// - Z: south (positive) / north (negative)
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BlockCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockCoord {
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Saturates at the `i32` limits.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.z.saturating_add(dz),
        )
    }

    /// The block directly below.
    pub const fn below(self) -> Self {
        self.offset(0, -1, 0)
    }

    /// Componentwise minimum.
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Componentwise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

impl Add for BlockCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.offset(rhs.x, rhs.y, rhs.z)
    }
}

impl Sub for BlockCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.x.saturating_sub(rhs.x),
            self.y.saturating_sub(rhs.y),
            self.z.saturating_sub(rhs.z),
        )
    }
}

impl fmt::Display for BlockCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

/// The material of a single block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    #[default]
    Air,
    Stone,
    Dirt,
    Gravel,
    Netherrack,
    SoulSand,
    StoneBrick,
    MossyStoneBrick,
    CrackedStoneBrick,
    StoneBrickStairs,
    IronBars,
    EndPortalFrame,
    NetherBrick,
    NetherBrickFence,
    NetherBrickStairs,
    NetherWart,
    Torch,
    WoodenDoor,
    Water,
    Lava,
}

impl Material {
    /// Empty space a structure may freely overwrite or fill downward through.
    pub fn is_air_equivalent(self) -> bool {
        matches!(self, Material::Air)
    }

    pub fn is_liquid(self) -> bool {
        matches!(self, Material::Water | Material::Lava)
    }

    /// Neither air, liquid, nor attachable: something a pillar can rest on
    /// and a torch can hang from.
    pub fn is_solid(self) -> bool {
        !self.is_air_equivalent() && !self.is_liquid() && !self.is_attachable()
    }

    /// Directional materials store a `Facing` in the low bits of their data
    /// word, which is rotated along with the piece that writes them.
    pub fn is_directional(self) -> bool {
        matches!(
            self,
            Material::StoneBrickStairs
                | Material::NetherBrickStairs
                | Material::EndPortalFrame
                | Material::WoodenDoor
        )
    }

    /// Blocks that must hang from a solid neighbor; see `Attachment`.
    pub fn is_attachable(self) -> bool {
        matches!(self, Material::Torch)
    }
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

/// One block write: a material plus its data word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub material: Material,
    pub data: u16,
}

impl Block {
    pub const AIR: Self = Self::new(Material::Air);

    pub const fn new(material: Material) -> Self {
        Self { material, data: 0 }
    }

    pub const fn with_data(material: Material, data: u16) -> Self {
        Self { material, data }
    }

    /// A directional block facing `facing` (in whatever space the caller is
    /// working in).
    pub const fn facing(material: Material, facing: Facing) -> Self {
        Self::with_data(material, facing.to_data())
    }
}

impl From<Material> for Block {
    fn from(material: Material) -> Self {
        Self::new(material)
    }
}

// ---------------------------------------------------------------------------
// Facing
// ---------------------------------------------------------------------------

/// Horizontal facing of a directional block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// Unit step in the XZ plane.
    pub const fn to_xz(self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::East => (1, 0),
            Facing::South => (0, 1),
            Facing::West => (-1, 0),
        }
    }

    pub fn from_xz(x: i32, z: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.to_xz() == (x, z))
    }

    /// Low two bits of the data word.
    pub const fn to_data(self) -> u16 {
        match self {
            Facing::North => 0,
            Facing::East => 1,
            Facing::South => 2,
            Facing::West => 3,
        }
    }

    /// Decode the low two bits; higher bits are ignored.
    pub const fn from_data(data: u16) -> Self {
        match data & 0b11 {
            0 => Facing::North,
            1 => Facing::East,
            2 => Facing::South,
            _ => Facing::West,
        }
    }

    /// The facing after rotating by `yaw` around the world Y axis.
    pub fn rotated(self, yaw: Yaw) -> Self {
        let (x, z) = self.to_xz();
        let (rx, rz) = yaw.rotate_xz(x, z);
        // Quarter turns map unit steps onto unit steps.
        Self::from_xz(rx, rz).unwrap_or(self)
    }
}

/// Set on the upper block of a door.
pub const DOOR_UPPER_HALF: u16 = 0b1000;

// ---------------------------------------------------------------------------
// Attachment
// ---------------------------------------------------------------------------

/// The neighbor an attachable block is supported by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attachment {
    /// Standing on the block below.
    Ground,
    /// Hanging from the side neighbor in this direction.
    Wall(Facing),
}

impl Attachment {
    pub const GROUND_BIT: u16 = 0b100;

    pub const fn to_data(self) -> u16 {
        match self {
            Attachment::Ground => Self::GROUND_BIT,
            Attachment::Wall(facing) => facing.to_data(),
        }
    }

    pub const fn from_data(data: u16) -> Self {
        if data & Self::GROUND_BIT != 0 {
            Attachment::Ground
        } else {
            Attachment::Wall(Facing::from_data(data))
        }
    }

    /// Ground attachment is unchanged by a yaw; wall attachment turns.
    pub fn rotated(self, yaw: Yaw) -> Self {
        match self {
            Attachment::Ground => Attachment::Ground,
            Attachment::Wall(facing) => Attachment::Wall(facing.rotated(yaw)),
        }
    }
}
