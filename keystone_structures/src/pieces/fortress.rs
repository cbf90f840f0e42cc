// Nether fortress pieces: nether-brick bridges and halls on pillars.
//
// Fortress pieces accept any terrain; they hang in open air over lava and
// anchor themselves with pillars that `fill_downward` from under their floor
// until they reach solid ground (or the catalog's pillar limit). Corridor-type
// pieces share a 5x7x5 profile (floor y = 0..1, walk space y = 2..5, roof
// y = 6); bridges are 5 wide with a deck at y = 0..1.
//
// Exits (local anchor, turn relative to the piece):
// - BridgeIntersection: ahead (0, 0, 19), right (-8, 0, 7) -90,
//                       left (12, 0, 11) +90.
// - Bridge:             ahead (0, 0, length).
// - Turn:               left (5, 0, 4) +90, or right (-1, 0, 0) -90.
// - Corridor:           ahead (0, 0, 5).
// - Intersection:       ahead (0, 0, 5), right (-1, 0, 0) -90,
//                       left (5, 0, 4) +90.
// - Room:               none.
//
// The room's soul-sand bed is planted with a `NetherWartPatch`, a
// `GeneratedObject` placed in world orientation.

use crate::catalog::PieceCatalog;
use crate::cuboid::{Cuboid, CuboidFiller, GeneratedObject};
use crate::error::{ConfigError, WorldError};
use crate::piece::{Anchor, PieceKind, PieceShape, Successors};
use crate::transform::{Transform, Yaw};
use crate::types::{Block, BlockCoord, Facing, Material};
use crate::weighted::WeightedBranching;
use crate::world::BlockWorld;
use keystone_prng::RandomSource;
use serde::{Deserialize, Serialize};

const BRICK: Material = Material::NetherBrick;
const FENCE: Material = Material::NetherBrickFence;

/// Pillar under every floor column in `xs` x `zs`, starting at `top_y`.
fn pillars<W: BlockWorld + ?Sized>(
    filler: &mut CuboidFiller<'_, W>,
    xs: impl Iterator<Item = i32>,
    zs: impl Iterator<Item = i32> + Clone,
    top_y: i32,
    limit: u32,
) -> Result<(), WorldError> {
    for x in xs {
        for z in zs.clone() {
            filler.fill_downward(BlockCoord::new(x, top_y, z), limit, Block::new(BRICK))?;
        }
    }
    Ok(())
}

/// The shared hall profile: floor, cleared walk space, roof.
fn hall_shell<W: BlockWorld + ?Sized>(filler: &mut CuboidFiller<'_, W>) -> Result<(), WorldError> {
    filler.set_material(BRICK);
    let floor = filler.fill(Cuboid::new(0, 0, 0, 4, 1, 4))?;
    filler.set_material(Material::Air);
    filler.offset_and_fill(floor, 0, 2, 0, 0, 4, 0)?;
    filler.set_material(BRICK);
    filler.fill(Cuboid::new(0, 6, 0, 4, 6, 4))?;
    Ok(())
}

/// Nether wart on every soul-sand cell of a square around the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetherWartPatch {
    pub radius: i32,
}

impl GeneratedObject for NetherWartPatch {
    fn can_place_object<W: BlockWorld + ?Sized>(
        &self,
        world: &W,
        origin: BlockCoord,
    ) -> Result<bool, WorldError> {
        Ok(world.block_material(origin.below())? == Material::SoulSand)
    }

    fn place_object<W: BlockWorld + ?Sized>(
        &self,
        world: &mut W,
        origin: BlockCoord,
    ) -> Result<(), WorldError> {
        let r = self.radius;
        for dz in -r..=r {
            for dx in -r..=r {
                let cell = origin.offset(dx, 0, dz);
                if world.block_material(cell.below())? == Material::SoulSand
                    && world.block_material(cell)?.is_air_equivalent()
                {
                    world.set_block(cell, Block::new(Material::NetherWart))?;
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Bridge intersection
// ---------------------------------------------------------------------------

/// Two crossing bridges on arched pillars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortressBridgeIntersection;

impl PieceShape for FortressBridgeIntersection {
    fn kind(&self) -> PieceKind {
        PieceKind::FortressBridgeIntersection
    }

    fn randomize<R: RandomSource + ?Sized>(&mut self, _catalog: &PieceCatalog, _rng: &mut R) {}

    fn footprint(&self) -> Cuboid {
        Cuboid::new(-7, -3, 0, 11, 4, 18)
    }

    fn place<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &mut W,
        catalog: &PieceCatalog,
    ) -> Result<(), WorldError> {
        let mut filler = CuboidFiller::new(transform, world);

        // Decks of both bridges.
        filler.set_material(BRICK);
        let deck = filler.fill(Cuboid::new(0, 0, 0, 4, 1, 18))?;
        filler.offset_and_fill(deck, -7, 0, 7, 7, 0, -7)?;

        // Clear the space above them.
        filler.set_material(Material::Air);
        let clear = filler.fill(Cuboid::new(1, 2, 0, 3, 4, 18))?;
        filler.offset_and_fill(clear, -8, 0, 8, 8, 0, -8)?;

        // Low side walls, walked around the crossing.
        filler.set_material(BRICK);
        let mut wall = filler.fill(Cuboid::new(0, 2, 0, 0, 2, 7))?;
        for offset in [
            [0, 0, 11, 0, 0, 11],
            [4, 0, -11, 4, 0, -11],
            [0, 0, 11, 0, 0, 11],
            [-11, 0, -4, -4, 0, -11],
            [11, 0, 0, 11, 0, 0],
            [-11, 0, 4, -11, 0, 4],
            [11, 0, 0, 11, 0, 0],
        ] {
            let [dx0, dy0, dz0, dx1, dy1, dz1] = offset;
            wall = filler.offset_and_fill(wall, dx0, dy0, dz0, dx1, dy1, dz1)?;
        }

        // Arches under the first bridge, then its pillars.
        let arch = filler.fill(Cuboid::new(0, -1, 0, 4, -1, 5))?;
        filler.offset_and_fill(arch, 0, 0, 13, 0, 0, 13)?;
        let arch = filler.fill(Cuboid::new(0, -3, 0, 4, -2, 3))?;
        filler.offset_and_fill(arch, 0, 0, 15, 0, 0, 15)?;
        let limit = catalog.fill_downward_limit();
        pillars(&mut filler, 0..=4, (0..=2).chain(16..=18), -4, limit)?;

        // Same for the second bridge.
        let arch = filler.fill(Cuboid::new(-7, -1, 7, -2, -1, 11))?;
        filler.offset_and_fill(arch, 13, 0, 0, 13, 0, 0)?;
        let arch = filler.fill(Cuboid::new(-7, -3, 7, -4, -2, 11))?;
        filler.offset_and_fill(arch, 15, 0, 0, 15, 0, 0)?;
        pillars(&mut filler, (-7..=-5).chain(9..=11), 7..=11, -4, limit)?;
        Ok(())
    }

    fn next_pieces<R: RandomSource + ?Sized>(
        &self,
        transform: &Transform,
        catalog: &PieceCatalog,
        rng: &mut R,
    ) -> Result<Successors, ConfigError> {
        let mut next = Successors::new();
        for anchor in [
            Anchor::ahead(0, 0, 19),
            Anchor::new(-8, 0, 7, Yaw::Deg270),
            Anchor::new(12, 0, 11, Yaw::Deg90),
        ] {
            next.push(self.branch(transform, anchor, catalog, rng)?);
        }
        Ok(next)
    }
}

impl WeightedBranching for FortressBridgeIntersection {}

// ---------------------------------------------------------------------------
// Bridge
// ---------------------------------------------------------------------------

/// Straight fenced bridge with pillars under both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortressBridge {
    pub length: u32,
}

impl Default for FortressBridge {
    fn default() -> Self {
        Self { length: 8 }
    }
}

impl PieceShape for FortressBridge {
    fn kind(&self) -> PieceKind {
        PieceKind::FortressBridge
    }

    fn randomize<R: RandomSource + ?Sized>(&mut self, catalog: &PieceCatalog, rng: &mut R) {
        let range = catalog.footprints().fortress_bridge_length;
        self.length = rng.next_int_inclusive(range.min, range.max);
    }

    fn footprint(&self) -> Cuboid {
        Cuboid::new(0, -3, 0, 4, 4, self.length as i32 - 1)
    }

    fn place<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &mut W,
        catalog: &PieceCatalog,
    ) -> Result<(), WorldError> {
        let last = self.length as i32 - 1;
        let mut filler = CuboidFiller::new(transform, world);

        filler.set_material(BRICK);
        filler.fill(Cuboid::new(0, 0, 0, 4, 1, last))?;
        let rail = filler.fill(Cuboid::new(0, 2, 0, 0, 2, last))?;
        filler.offset_and_fill(rail, 4, 0, 0, 4, 0, 0)?;
        filler.set_material(Material::Air);
        filler.fill(Cuboid::new(1, 2, 0, 3, 4, last))?;

        filler.set_material(FENCE);
        for z in (0..=last).step_by(2) {
            let post = filler.fill(Cuboid::new(0, 3, z, 0, 3, z))?;
            filler.offset_and_fill(post, 4, 0, 0, 4, 0, 0)?;
        }

        // Arches under both ends.
        filler.set_material(BRICK);
        let arch = filler.fill(Cuboid::new(0, -1, 0, 4, -1, 2))?;
        filler.offset_and_fill(arch, 0, 0, last - 2, 0, 0, last - 2)?;
        let arch = filler.fill(Cuboid::new(0, -3, 0, 4, -2, 1))?;
        filler.offset_and_fill(arch, 0, 0, last - 1, 0, 0, last - 1)?;
        let limit = catalog.fill_downward_limit();
        pillars(&mut filler, 0..=4, [0, 1, last - 1, last].into_iter(), -4, limit)?;
        Ok(())
    }

    fn next_pieces<R: RandomSource + ?Sized>(
        &self,
        transform: &Transform,
        catalog: &PieceCatalog,
        rng: &mut R,
    ) -> Result<Successors, ConfigError> {
        let anchor = Anchor::ahead(0, 0, self.length as i32);
        Ok(Successors::from_iter([self.branch(transform, anchor, catalog, rng)?]))
    }
}

impl WeightedBranching for FortressBridge {}

// ---------------------------------------------------------------------------
// Turn
// ---------------------------------------------------------------------------

/// Hall cell that exits to one side, windows in its two walls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortressTurn {
    pub left: bool,
}

impl PieceShape for FortressTurn {
    fn kind(&self) -> PieceKind {
        PieceKind::FortressTurn
    }

    fn randomize<R: RandomSource + ?Sized>(&mut self, _catalog: &PieceCatalog, rng: &mut R) {
        self.left = rng.next_bool();
    }

    fn footprint(&self) -> Cuboid {
        Cuboid::new(0, 0, 0, 4, 6, 4)
    }

    fn place<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &mut W,
        catalog: &PieceCatalog,
    ) -> Result<(), WorldError> {
        let mut filler = CuboidFiller::new(transform, world);
        hall_shell(&mut filler)?;

        // Closed side wall, opposite the exit.
        let wall_x = if self.left { 0 } else { 4 };
        filler.set_material(BRICK);
        filler.fill(Cuboid::new(wall_x, 2, 0, wall_x, 5, 4))?;
        filler.set_material(FENCE);
        let window = filler.fill(Cuboid::new(wall_x, 3, 1, wall_x, 4, 1))?;
        filler.offset_and_fill(window, 0, 0, 2, 0, 0, 2)?;

        // Back wall, leaving the exit side open.
        filler.set_material(BRICK);
        if self.left {
            let post = filler.fill(Cuboid::new(4, 2, 0, 4, 5, 0))?;
            filler.offset_and_fill(post, -3, 0, 4, 0, 0, 4)?;
        } else {
            let post = filler.fill(Cuboid::new(0, 2, 0, 0, 5, 0))?;
            filler.offset_and_fill(post, 0, 0, 4, 3, 0, 4)?;
        }
        filler.set_material(FENCE);
        let window = filler.fill(Cuboid::new(1, 3, 4, 1, 4, 4))?;
        filler.offset_and_fill(window, 2, 0, 0, 2, 0, 0)?;

        pillars(&mut filler, 0..=4, 0..=4, -1, catalog.fill_downward_limit())
    }

    fn next_pieces<R: RandomSource + ?Sized>(
        &self,
        transform: &Transform,
        catalog: &PieceCatalog,
        rng: &mut R,
    ) -> Result<Successors, ConfigError> {
        let anchor = if self.left {
            Anchor::new(5, 0, 4, Yaw::Deg90)
        } else {
            Anchor::new(-1, 0, 0, Yaw::Deg270)
        };
        Ok(Successors::from_iter([self.branch(transform, anchor, catalog, rng)?]))
    }
}

impl WeightedBranching for FortressTurn {}

// ---------------------------------------------------------------------------
// Corridor
// ---------------------------------------------------------------------------

/// Straight hall cell with windowed walls on both sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortressCorridor;

impl PieceShape for FortressCorridor {
    fn kind(&self) -> PieceKind {
        PieceKind::FortressCorridor
    }

    fn randomize<R: RandomSource + ?Sized>(&mut self, _catalog: &PieceCatalog, _rng: &mut R) {}

    fn footprint(&self) -> Cuboid {
        Cuboid::new(0, 0, 0, 4, 6, 4)
    }

    fn place<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &mut W,
        catalog: &PieceCatalog,
    ) -> Result<(), WorldError> {
        let mut filler = CuboidFiller::new(transform, world);
        hall_shell(&mut filler)?;

        filler.set_material(BRICK);
        let wall = filler.fill(Cuboid::new(0, 2, 0, 0, 5, 4))?;
        filler.offset_and_fill(wall, 4, 0, 0, 4, 0, 0)?;
        filler.set_material(FENCE);
        for x in [0, 4] {
            let window = filler.fill(Cuboid::new(x, 3, 1, x, 4, 1))?;
            filler.offset_and_fill(window, 0, 0, 2, 0, 0, 2)?;
        }

        pillars(&mut filler, 0..=4, 0..=4, -1, catalog.fill_downward_limit())
    }

    fn next_pieces<R: RandomSource + ?Sized>(
        &self,
        transform: &Transform,
        catalog: &PieceCatalog,
        rng: &mut R,
    ) -> Result<Successors, ConfigError> {
        let ahead = self.branch(transform, Anchor::ahead(0, 0, 5), catalog, rng)?;
        Ok(Successors::from_iter([ahead]))
    }
}

impl WeightedBranching for FortressCorridor {}

// ---------------------------------------------------------------------------
// Intersection
// ---------------------------------------------------------------------------

/// Hall cell open on all four sides, roof held by corner posts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortressIntersection;

impl PieceShape for FortressIntersection {
    fn kind(&self) -> PieceKind {
        PieceKind::FortressIntersection
    }

    fn randomize<R: RandomSource + ?Sized>(&mut self, _catalog: &PieceCatalog, _rng: &mut R) {}

    fn footprint(&self) -> Cuboid {
        Cuboid::new(0, 0, 0, 4, 6, 4)
    }

    fn place<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &mut W,
        catalog: &PieceCatalog,
    ) -> Result<(), WorldError> {
        let mut filler = CuboidFiller::new(transform, world);
        hall_shell(&mut filler)?;

        filler.set_material(BRICK);
        let post = filler.fill(Cuboid::new(0, 2, 0, 0, 5, 0))?;
        let post = filler.offset_and_fill(post, 4, 0, 0, 4, 0, 0)?;
        let post = filler.offset_and_fill(post, 0, 0, 4, 0, 0, 4)?;
        filler.offset_and_fill(post, -4, 0, 0, -4, 0, 0)?;

        pillars(&mut filler, 0..=4, 0..=4, -1, catalog.fill_downward_limit())
    }

    fn next_pieces<R: RandomSource + ?Sized>(
        &self,
        transform: &Transform,
        catalog: &PieceCatalog,
        rng: &mut R,
    ) -> Result<Successors, ConfigError> {
        let mut next = Successors::new();
        for anchor in [
            Anchor::ahead(0, 0, 5),
            Anchor::new(-1, 0, 0, Yaw::Deg270),
            Anchor::new(5, 0, 4, Yaw::Deg90),
        ] {
            next.push(self.branch(transform, anchor, catalog, rng)?);
        }
        Ok(next)
    }
}

impl WeightedBranching for FortressIntersection {}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// Terminal walled hall with a soul-sand bed and a bench of stairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortressRoom;

impl PieceShape for FortressRoom {
    fn kind(&self) -> PieceKind {
        PieceKind::FortressRoom
    }

    fn randomize<R: RandomSource + ?Sized>(&mut self, _catalog: &PieceCatalog, _rng: &mut R) {}

    fn footprint(&self) -> Cuboid {
        Cuboid::new(-2, 0, 0, 6, 6, 8)
    }

    fn place<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &mut W,
        catalog: &PieceCatalog,
    ) -> Result<(), WorldError> {
        let mut filler = CuboidFiller::new(transform, world);
        filler.set_material(BRICK);
        filler.fill(Cuboid::new(-2, 0, 0, 6, 0, 8))?;
        filler.set_outer_inner(BRICK, Material::Air);
        filler.fill(Cuboid::new(-2, 1, 0, 6, 6, 8))?;

        filler.set_material(Material::Air);
        filler.fill(Cuboid::new(1, 2, 0, 3, 4, 0))?;
        filler.set_material(Material::SoulSand);
        filler.fill(Cuboid::new(0, 1, 3, 4, 1, 5))?;
        filler.place_object(BlockCoord::new(2, 2, 4), &NetherWartPatch { radius: 1 })?;
        let bench = Block::facing(Material::NetherBrickStairs, Facing::North);
        for x in -1..=5 {
            filler.set_block(BlockCoord::new(x, 2, 7), bench)?;
        }

        let limit = catalog.fill_downward_limit();
        pillars(&mut filler, [-2, 6].into_iter(), [0, 8].into_iter(), -1, limit)
    }

    fn next_pieces<R: RandomSource + ?Sized>(
        &self,
        _transform: &Transform,
        _catalog: &PieceCatalog,
        _rng: &mut R,
    ) -> Result<Successors, ConfigError> {
        Ok(Successors::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::world::SparseWorld;
    use keystone_prng::ScriptedRandom;

    fn catalog() -> PieceCatalog {
        PieceCatalog::from_config(&GenerationConfig::nether_fortress()).unwrap()
    }

    #[test]
    fn bridge_intersection_exits_match_crossing() {
        let catalog = catalog();
        let next = FortressBridgeIntersection
            .next_pieces(&Transform::IDENTITY, &catalog, &mut ScriptedRandom::default())
            .unwrap();
        let placements: Vec<_> = next
            .iter()
            .map(|p| (p.transform.position, p.transform.rotation))
            .collect();
        assert_eq!(
            placements,
            vec![
                (BlockCoord::new(0, 0, 19), Yaw::Deg0),
                (BlockCoord::new(-8, 0, 7), Yaw::Deg270),
                (BlockCoord::new(12, 0, 11), Yaw::Deg90),
            ]
        );
    }

    #[test]
    fn bridge_intersection_pillars_reach_ground() {
        let catalog = catalog();
        let mut world = SparseWorld::with_floor(-10, Material::Netherrack, Material::Lava);
        FortressBridgeIntersection
            .place(&Transform::IDENTITY, &mut world, &catalog)
            .unwrap();
        // Deck, cleared headroom, and a pillar resting on the netherrack.
        assert_eq!(world.block_material(BlockCoord::new(2, 1, 9)), Ok(BRICK));
        assert_eq!(world.block_material(BlockCoord::new(2, 3, 9)), Ok(Material::Air));
        for y in -9..=-4 {
            assert_eq!(world.block_material(BlockCoord::new(2, y, 0)), Ok(BRICK), "y = {y}");
        }
        assert_eq!(
            world.block_material(BlockCoord::new(2, -10, 0)),
            Ok(Material::Netherrack)
        );
        // Second bridge pillars sit on both sides of the crossing.
        assert_eq!(world.block_material(BlockCoord::new(-6, -9, 9)), Ok(BRICK));
        assert_eq!(world.block_material(BlockCoord::new(10, -9, 9)), Ok(BRICK));
    }

    #[test]
    fn pillar_depth_is_capped_by_catalog_limit() {
        let config = GenerationConfig {
            fill_downward_limit: 3,
            ..GenerationConfig::nether_fortress()
        };
        let catalog = PieceCatalog::from_config(&config).unwrap();
        let mut world = SparseWorld::new(Material::Lava);
        FortressCorridor
            .place(&Transform::IDENTITY, &mut world, &catalog)
            .unwrap();
        assert_eq!(world.block_material(BlockCoord::new(0, -3, 0)), Ok(BRICK));
        assert_eq!(world.block_material(BlockCoord::new(0, -4, 0)), Ok(Material::Lava));
    }

    #[test]
    fn turn_leaves_exit_side_open() {
        let catalog = catalog();
        for left in [true, false] {
            let mut world = SparseWorld::with_floor(-1, Material::Netherrack, Material::Air);
            FortressTurn { left }
                .place(&Transform::IDENTITY, &mut world, &catalog)
                .unwrap();
            let (open_x, wall_x) = if left { (4, 0) } else { (0, 4) };
            assert_eq!(world.block_material(BlockCoord::new(open_x, 2, 2)), Ok(Material::Air));
            assert_eq!(world.block_material(BlockCoord::new(wall_x, 2, 2)), Ok(BRICK));
            assert_eq!(world.block_material(BlockCoord::new(wall_x, 3, 1)), Ok(FENCE));
        }
    }

    #[test]
    fn bridge_length_drawn_from_catalog_range() {
        let catalog = catalog();
        let range = catalog.footprints().fortress_bridge_length;
        let mut bridge = FortressBridge::default();
        bridge.randomize(&catalog, &mut ScriptedRandom::new([0]));
        assert_eq!(bridge.length, range.min);
        let next = bridge
            .next_pieces(&Transform::IDENTITY, &catalog, &mut ScriptedRandom::default())
            .unwrap();
        assert_eq!(next[0].transform.position, BlockCoord::new(0, 0, range.min as i32));
    }

    #[test]
    fn room_bench_faces_entrance_when_rotated() {
        let catalog = catalog();
        let mut world = SparseWorld::with_floor(-1, Material::Netherrack, Material::Air);
        let t = Transform::new(BlockCoord::ORIGIN, Yaw::Deg90);
        FortressRoom.place(&t, &mut world, &catalog).unwrap();
        // Local (2, 2, 7) maps to world (7, 2, -2); local north is world west.
        let bench = world.block(BlockCoord::new(7, 2, -2)).unwrap();
        assert_eq!(bench.material, Material::NetherBrickStairs);
        assert_eq!(Facing::from_data(bench.data), Facing::West);
    }

    #[test]
    fn room_wart_patch_covers_the_soul_sand_center() {
        let catalog = catalog();
        let mut world = SparseWorld::with_floor(-1, Material::Netherrack, Material::Air);
        let t = Transform::new(BlockCoord::new(30, 0, 0), Yaw::Deg270);
        FortressRoom.place(&t, &mut world, &catalog).unwrap();
        let center = t.to_world(BlockCoord::new(2, 2, 4));
        for dz in -1..=1 {
            for dx in -1..=1 {
                let cell = center.offset(dx, 0, dz);
                assert_eq!(world.block_material(cell), Ok(Material::NetherWart), "{cell}");
                assert_eq!(world.block_material(cell.below()), Ok(Material::SoulSand));
            }
        }
        // Outside the patch the bed stays bare.
        assert_eq!(
            world.block_material(t.to_world(BlockCoord::new(0, 2, 4))),
            Ok(Material::Air)
        );
    }

    #[test]
    fn wart_patch_refuses_bare_ground() {
        let world = SparseWorld::with_floor(0, Material::Netherrack, Material::Air);
        let patch = NetherWartPatch { radius: 2 };
        assert_eq!(patch.can_place_object(&world, BlockCoord::new(0, 1, 0)), Ok(false));
    }
}
