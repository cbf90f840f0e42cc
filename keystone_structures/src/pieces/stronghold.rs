// Stronghold pieces: stone-brick tunnels carved through solid ground.
//
// Every stronghold piece is a 5x5 bore profile (walls at local x = 0 and 4,
// floor y = 0, ceiling y = 4) so that any exit lines up with any successor's
// entrance. Walls are laid with `StoneBrickPicker`, seeded from the piece's
// `decoration_seed`, so mossy and cracked bricks vary per piece but never
// consume the run's random stream during `place()`. Pieces with fixtures
// (loose gravel, torches) fork a second stream off the seeded one, so a
// fixture roll never shifts the brick pattern.
//
// Strongholds refuse to open into water or lava: `terrain_allows()` rejects
// a candidate whose footprint, grown by one block on every side, touches any
// liquid.
//
// Exits (local anchor, turn relative to the piece):
// - Corridor:     ahead (0, 0, length); start-of-stronghold adds the portal
//                 room behind at (4, 0, -1) turned 180.
// - Turn:         left (5, 0, 4) +90, or right (-1, 0, 0) -90.
// - Intersection: ahead (0, 0, 7), right (-1, 0, 1) -90, left (5, 0, 5) +90.
// - Staircase:    ahead and down (0, -steps, steps + 2).
// - Room, PortalRoom: none.

use crate::catalog::PieceCatalog;
use crate::cuboid::{Cuboid, CuboidFiller, StoneBrickPicker, intersects_liquids};
use crate::error::{ConfigError, WorldError};
use crate::piece::{Anchor, Piece, PieceKind, PieceShape, Successors};
use crate::transform::{Transform, Yaw};
use crate::types::{Block, BlockCoord, Facing, Material};
use crate::weighted::WeightedBranching;
use crate::world::BlockWorld;
use keystone_prng::{RandomSource, StructureRng};
use serde::{Deserialize, Serialize};

const LOOSE_GRAVEL_CHANCE: f32 = 0.1;
const TORCH_CHANCE: f32 = 0.5;

fn dry_surroundings<W: BlockWorld + ?Sized>(
    footprint: Cuboid,
    transform: &Transform,
    world: &W,
) -> Result<bool, WorldError> {
    Ok(!intersects_liquids(transform, world, footprint.expanded(1))?)
}

/// Carve the entrance doorway at z = 0.
fn carve_entrance<W: BlockWorld + ?Sized>(
    filler: &mut CuboidFiller<'_, W>,
) -> Result<Cuboid, WorldError> {
    filler.set_material(Material::Air);
    filler.fill(Cuboid::new(1, 1, 0, 3, 3, 0))
}

// ---------------------------------------------------------------------------
// Corridor
// ---------------------------------------------------------------------------

/// Straight tube, open at both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrongholdCorridor {
    pub length: u32,
    /// Set on the first corridor of a stronghold; it also spawns the portal
    /// room.
    pub start_of_stronghold: bool,
    pub decoration_seed: u64,
}

impl Default for StrongholdCorridor {
    fn default() -> Self {
        Self {
            length: 4,
            start_of_stronghold: false,
            decoration_seed: 0,
        }
    }
}

impl PieceShape for StrongholdCorridor {
    fn kind(&self) -> PieceKind {
        PieceKind::StrongholdCorridor
    }

    fn randomize<R: RandomSource + ?Sized>(&mut self, catalog: &PieceCatalog, rng: &mut R) {
        let range = catalog.footprints().stronghold_corridor_length;
        self.length = rng.next_int_inclusive(range.min, range.max);
        self.decoration_seed = rng.next_u64();
    }

    fn footprint(&self) -> Cuboid {
        Cuboid::new(0, 0, 0, 4, 4, self.length as i32 - 1)
    }

    fn terrain_allows<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &W,
    ) -> Result<bool, WorldError> {
        dry_surroundings(self.footprint(), transform, world)
    }

    fn place<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &mut W,
        _catalog: &PieceCatalog,
    ) -> Result<(), WorldError> {
        let mut decor = StructureRng::new(self.decoration_seed);
        let mut fixtures = decor.fork();
        let mut filler = CuboidFiller::new(transform, world);
        let tube = filler.fill_with(self.footprint(), &mut StoneBrickPicker::from_rng(decor))?;
        // Bore straight through, ends included.
        filler.set_material(Material::Air);
        filler.offset_and_fill(tube, 1, 1, 0, -1, -1, 0)?;
        let gravel = Block::new(Material::Gravel);
        for z in 0..self.length as i32 {
            let cell = BlockCoord::new(2, 0, z);
            filler.set_block_chance(&mut fixtures, LOOSE_GRAVEL_CHANCE, cell, gravel)?;
        }
        Ok(())
    }

    fn next_pieces<R: RandomSource + ?Sized>(
        &self,
        transform: &Transform,
        catalog: &PieceCatalog,
        rng: &mut R,
    ) -> Result<Successors, ConfigError> {
        let mut next = Successors::new();
        if self.start_of_stronghold {
            next.push(Piece::spawn(
                PieceKind::StrongholdPortalRoom,
                transform,
                Anchor::new(4, 0, -1, Yaw::Deg180),
                catalog,
                rng,
            ));
        }
        next.push(self.branch(transform, Anchor::ahead(0, 0, self.length as i32), catalog, rng)?);
        Ok(next)
    }
}

impl WeightedBranching for StrongholdCorridor {}

// ---------------------------------------------------------------------------
// Turn
// ---------------------------------------------------------------------------

/// A 5x5x5 cell that exits to one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrongholdTurn {
    pub left: bool,
    pub decoration_seed: u64,
}

impl PieceShape for StrongholdTurn {
    fn kind(&self) -> PieceKind {
        PieceKind::StrongholdTurn
    }

    fn randomize<R: RandomSource + ?Sized>(&mut self, _catalog: &PieceCatalog, rng: &mut R) {
        self.left = rng.next_bool();
        self.decoration_seed = rng.next_u64();
    }

    fn footprint(&self) -> Cuboid {
        Cuboid::new(0, 0, 0, 4, 4, 4)
    }

    fn terrain_allows<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &W,
    ) -> Result<bool, WorldError> {
        dry_surroundings(self.footprint(), transform, world)
    }

    fn place<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &mut W,
        _catalog: &PieceCatalog,
    ) -> Result<(), WorldError> {
        let mut filler = CuboidFiller::new(transform, world);
        filler.fill_with(self.footprint(), &mut StoneBrickPicker::new(self.decoration_seed))?;
        carve_entrance(&mut filler)?;
        let side_x = if self.left { 4 } else { 0 };
        filler.fill(Cuboid::new(side_x, 1, 1, side_x, 3, 3))?;
        Ok(())
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

impl WeightedBranching for StrongholdTurn {}

// ---------------------------------------------------------------------------
// Intersection
// ---------------------------------------------------------------------------

/// A 5x5x7 cell with exits ahead, right, and left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrongholdIntersection {
    pub decoration_seed: u64,
}

impl PieceShape for StrongholdIntersection {
    fn kind(&self) -> PieceKind {
        PieceKind::StrongholdIntersection
    }

    fn randomize<R: RandomSource + ?Sized>(&mut self, _catalog: &PieceCatalog, rng: &mut R) {
        self.decoration_seed = rng.next_u64();
    }

    fn footprint(&self) -> Cuboid {
        Cuboid::new(0, 0, 0, 4, 4, 6)
    }

    fn terrain_allows<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &W,
    ) -> Result<bool, WorldError> {
        dry_surroundings(self.footprint(), transform, world)
    }

    fn place<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &mut W,
        _catalog: &PieceCatalog,
    ) -> Result<(), WorldError> {
        let mut filler = CuboidFiller::new(transform, world);
        filler.fill_with(self.footprint(), &mut StoneBrickPicker::new(self.decoration_seed))?;
        let door = carve_entrance(&mut filler)?;
        filler.offset_and_fill(door, 0, 0, 6, 0, 0, 6)?;
        let side = filler.fill(Cuboid::new(0, 1, 2, 0, 3, 4))?;
        filler.offset_and_fill(side, 4, 0, 0, 4, 0, 0)?;
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
            Anchor::ahead(0, 0, 7),
            Anchor::new(-1, 0, 1, Yaw::Deg270),
            Anchor::new(5, 0, 5, Yaw::Deg90),
        ] {
            next.push(self.branch(transform, anchor, catalog, rng)?);
        }
        Ok(next)
    }
}

impl WeightedBranching for StrongholdIntersection {}

// ---------------------------------------------------------------------------
// Staircase
// ---------------------------------------------------------------------------

/// Descends `steps` blocks over `steps + 2` blocks of run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrongholdStaircase {
    pub steps: u32,
    pub decoration_seed: u64,
}

impl Default for StrongholdStaircase {
    fn default() -> Self {
        Self {
            steps: 3,
            decoration_seed: 0,
        }
    }
}

impl PieceShape for StrongholdStaircase {
    fn kind(&self) -> PieceKind {
        PieceKind::StrongholdStaircase
    }

    fn randomize<R: RandomSource + ?Sized>(&mut self, catalog: &PieceCatalog, rng: &mut R) {
        let range = catalog.footprints().stronghold_staircase_depth;
        self.steps = rng.next_int_inclusive(range.min, range.max);
        self.decoration_seed = rng.next_u64();
    }

    fn footprint(&self) -> Cuboid {
        let steps = self.steps as i32;
        Cuboid::new(0, -steps, 0, 4, 4, steps + 1)
    }

    fn terrain_allows<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &W,
    ) -> Result<bool, WorldError> {
        dry_surroundings(self.footprint(), transform, world)
    }

    fn place<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &mut W,
        _catalog: &PieceCatalog,
    ) -> Result<(), WorldError> {
        let steps = self.steps as i32;
        let mut filler = CuboidFiller::new(transform, world);
        filler.fill_with(self.footprint(), &mut StoneBrickPicker::solid(self.decoration_seed))?;

        filler.set_material(Material::Air);
        for z in 0..=steps + 1 {
            let floor = -z.min(steps);
            filler.fill(Cuboid::new(1, floor + 1, z, 3, 3, z))?;
        }
        // Treads face back up toward the entrance.
        let tread = Block::facing(Material::StoneBrickStairs, Facing::North);
        for z in 1..=steps {
            for x in 1..=3 {
                filler.set_block(BlockCoord::new(x, -z, z), tread)?;
            }
        }
        Ok(())
    }

    fn next_pieces<R: RandomSource + ?Sized>(
        &self,
        transform: &Transform,
        catalog: &PieceCatalog,
        rng: &mut R,
    ) -> Result<Successors, ConfigError> {
        let steps = self.steps as i32;
        let anchor = Anchor::ahead(0, -steps, steps + 2);
        Ok(Successors::from_iter([self.branch(transform, anchor, catalog, rng)?]))
    }
}

impl WeightedBranching for StrongholdStaircase {}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// Terminal hall behind a door, with a central pillar, barred windows, and
/// torches on the side walls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrongholdRoom {
    pub decoration_seed: u64,
}

/// Against the side walls, clear of the windows.
const ROOM_TORCHES: [(i32, i32); 4] = [(-2, 2), (6, 2), (-2, 8), (6, 8)];

impl PieceShape for StrongholdRoom {
    fn kind(&self) -> PieceKind {
        PieceKind::StrongholdRoom
    }

    fn randomize<R: RandomSource + ?Sized>(&mut self, _catalog: &PieceCatalog, rng: &mut R) {
        self.decoration_seed = rng.next_u64();
    }

    fn footprint(&self) -> Cuboid {
        Cuboid::new(-3, 0, 0, 7, 6, 10)
    }

    fn terrain_allows<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &W,
    ) -> Result<bool, WorldError> {
        dry_surroundings(self.footprint(), transform, world)
    }

    fn place<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &mut W,
        _catalog: &PieceCatalog,
    ) -> Result<(), WorldError> {
        let mut decor = StructureRng::new(self.decoration_seed);
        let mut fixtures = decor.fork();
        let mut filler = CuboidFiller::new(transform, world);
        filler.fill_with(self.footprint(), &mut StoneBrickPicker::from_rng(decor))?;
        filler.place_door(BlockCoord::new(2, 1, 0), Material::WoodenDoor, Facing::North)?;
        filler.set_material(Material::StoneBrick);
        filler.fill(Cuboid::new(2, 1, 5, 2, 5, 5))?;
        filler.set_material(Material::IronBars);
        let bars = filler.fill(Cuboid::new(-3, 2, 4, -3, 3, 6))?;
        filler.offset_and_fill(bars, 10, 0, 0, 10, 0, 0)?;
        for (x, z) in ROOM_TORCHES {
            let cell = BlockCoord::new(x, 3, z);
            filler.attach_block_chance(&mut fixtures, TORCH_CHANCE, cell, Material::Torch)?;
        }
        Ok(())
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

/// Terminal chamber with the portal frame ring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrongholdPortalRoom {
    pub decoration_seed: u64,
}

impl PieceShape for StrongholdPortalRoom {
    fn kind(&self) -> PieceKind {
        PieceKind::StrongholdPortalRoom
    }

    fn randomize<R: RandomSource + ?Sized>(&mut self, _catalog: &PieceCatalog, rng: &mut R) {
        self.decoration_seed = rng.next_u64();
    }

    fn footprint(&self) -> Cuboid {
        Cuboid::new(-3, 0, 0, 7, 7, 15)
    }

    fn terrain_allows<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &W,
    ) -> Result<bool, WorldError> {
        dry_surroundings(self.footprint(), transform, world)
    }

    fn place<W: BlockWorld + ?Sized>(
        &self,
        transform: &Transform,
        world: &mut W,
        _catalog: &PieceCatalog,
    ) -> Result<(), WorldError> {
        let mut filler = CuboidFiller::new(transform, world);
        filler.fill_with(self.footprint(), &mut StoneBrickPicker::new(self.decoration_seed))?;
        carve_entrance(&mut filler)?;

        // Dais with a lava pool, reached by a flight of stairs.
        filler.set_material(Material::StoneBrick);
        filler.fill(Cuboid::new(-1, 1, 7, 5, 1, 13))?;
        filler.set_material(Material::Lava);
        filler.fill(Cuboid::new(1, 1, 9, 3, 1, 11))?;
        let stair = Block::facing(Material::StoneBrickStairs, Facing::North);
        for x in 1..=3 {
            filler.set_block(BlockCoord::new(x, 1, 6), stair)?;
        }

        // Frame ring around the pool, every frame facing inward.
        let frame = |facing| Block::facing(Material::EndPortalFrame, facing);
        for i in 1..=3 {
            filler.set_block(BlockCoord::new(i, 2, 8), frame(Facing::South))?;
            filler.set_block(BlockCoord::new(i, 2, 12), frame(Facing::North))?;
            filler.set_block(BlockCoord::new(0, 2, 8 + i), frame(Facing::East))?;
            filler.set_block(BlockCoord::new(4, 2, 8 + i), frame(Facing::West))?;
        }
        Ok(())
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
    use crate::types::{Attachment, DOOR_UPPER_HALF};
    use crate::world::SparseWorld;
    use keystone_prng::ScriptedRandom;

    fn catalog() -> PieceCatalog {
        PieceCatalog::from_config(&GenerationConfig::stronghold()).unwrap()
    }

    #[test]
    fn corridor_length_draw_spans_four_to_eight() {
        let catalog = catalog();
        let mut corridor = StrongholdCorridor::default();
        corridor.randomize(&catalog, &mut ScriptedRandom::new([0]));
        assert_eq!(corridor.length, 4);
        corridor.randomize(&catalog, &mut ScriptedRandom::new([4]));
        assert_eq!(corridor.length, 8);
        assert_eq!(corridor.footprint(), Cuboid::new(0, 0, 0, 4, 4, 7));
    }

    #[test]
    fn corridor_is_a_tube_open_at_both_ends() {
        let catalog = catalog();
        let mut world = SparseWorld::new(Material::Stone);
        let corridor = StrongholdCorridor::default();
        corridor.place(&Transform::IDENTITY, &mut world, &catalog).unwrap();
        for z in 0..4 {
            assert_eq!(world.block_material(BlockCoord::new(2, 2, z)), Ok(Material::Air));
            assert!(world.block_material(BlockCoord::new(0, 2, z)).unwrap().is_solid());
            assert!(world.block_material(BlockCoord::new(2, 0, z)).unwrap().is_solid());
        }
    }

    #[test]
    fn start_corridor_spawns_portal_room_behind() {
        let catalog = catalog();
        let corridor = StrongholdCorridor {
            start_of_stronghold: true,
            ..Default::default()
        };
        let next = corridor
            .next_pieces(&Transform::IDENTITY, &catalog, &mut ScriptedRandom::default())
            .unwrap();
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].kind(), PieceKind::StrongholdPortalRoom);
        assert_eq!(next[0].transform.position, BlockCoord::new(4, 0, -1));
        assert_eq!(next[0].transform.rotation, Yaw::Deg180);
        assert_eq!(next[1].transform.position, BlockCoord::new(0, 0, 4));
    }

    #[test]
    fn liquid_next_to_footprint_rejects_placement() {
        let mut world = SparseWorld::new(Material::Stone);
        let corridor = StrongholdCorridor::default();
        assert_eq!(corridor.terrain_allows(&Transform::IDENTITY, &world), Ok(true));
        // One block beyond the far end.
        world.set_block(BlockCoord::new(2, 2, 4), Block::new(Material::Water)).unwrap();
        assert_eq!(corridor.terrain_allows(&Transform::IDENTITY, &world), Ok(false));
    }

    #[test]
    fn turn_side_follows_coin_flip() {
        let catalog = catalog();
        let mut turn = StrongholdTurn::default();
        turn.randomize(&catalog, &mut ScriptedRandom::new([1]));
        assert!(turn.left);
        let next = turn
            .next_pieces(&Transform::IDENTITY, &catalog, &mut ScriptedRandom::default())
            .unwrap();
        assert_eq!(next[0].transform.position, BlockCoord::new(5, 0, 4));
        assert_eq!(next[0].transform.rotation, Yaw::Deg90);

        turn.randomize(&catalog, &mut ScriptedRandom::new([0]));
        assert!(!turn.left);
    }

    #[test]
    fn staircase_descends_to_its_exit() {
        let catalog = catalog();
        let mut world = SparseWorld::new(Material::Stone);
        let stairs = StrongholdStaircase {
            steps: 3,
            decoration_seed: 5,
        };
        stairs.place(&Transform::IDENTITY, &mut world, &catalog).unwrap();
        // Entrance bore at the top, exit bore at the bottom.
        assert_eq!(world.block_material(BlockCoord::new(2, 1, 0)), Ok(Material::Air));
        assert_eq!(world.block_material(BlockCoord::new(2, -2, 4)), Ok(Material::Air));
        let tread = world.block(BlockCoord::new(2, -2, 2)).unwrap();
        assert_eq!(tread.material, Material::StoneBrickStairs);
        assert_eq!(Facing::from_data(tread.data), Facing::North);

        let next = stairs
            .next_pieces(&Transform::IDENTITY, &catalog, &mut ScriptedRandom::default())
            .unwrap();
        assert_eq!(next[0].transform.position, BlockCoord::new(0, -3, 5));
    }

    #[test]
    fn portal_frames_face_inward_after_rotation() {
        let catalog = catalog();
        let mut world = SparseWorld::new(Material::Stone);
        let t = Transform::new(BlockCoord::ORIGIN, Yaw::Deg180);
        StrongholdPortalRoom::default().place(&t, &mut world, &catalog).unwrap();
        // Local (2, 2, 8) faces local south; under 180 degrees that is world
        // (-2, 2, -8) facing north.
        let frame = world.block(BlockCoord::new(-2, 2, -8)).unwrap();
        assert_eq!(frame.material, Material::EndPortalFrame);
        assert_eq!(Facing::from_data(frame.data), Facing::North);
    }

    #[test]
    fn room_door_faces_out_through_the_entrance() {
        let catalog = catalog();
        for yaw in Yaw::ALL {
            let mut world = SparseWorld::new(Material::Stone);
            let t = Transform::new(BlockCoord::new(20, 8, -20), yaw);
            StrongholdRoom::default().place(&t, &mut world, &catalog).unwrap();
            let bottom = world.block(t.to_world(BlockCoord::new(2, 1, 0))).unwrap();
            let top = world.block(t.to_world(BlockCoord::new(2, 2, 0))).unwrap();
            assert_eq!(bottom.material, Material::WoodenDoor);
            assert_eq!(Facing::from_data(bottom.data), Facing::North.rotated(yaw));
            assert_eq!(top.data & DOOR_UPPER_HALF, DOOR_UPPER_HALF);
            assert_eq!(Facing::from_data(top.data), Facing::North.rotated(yaw));
        }
    }

    #[test]
    fn room_torches_repeat_per_seed_and_hang_from_walls() {
        let catalog = catalog();
        let t = Transform::new(BlockCoord::ORIGIN, Yaw::Deg90);
        let build = |seed| {
            let mut world = SparseWorld::new(Material::Stone);
            StrongholdRoom {
                decoration_seed: seed,
            }
            .place(&t, &mut world, &catalog)
            .unwrap();
            world
        };

        let mut torches = 0;
        for seed in 0..8 {
            let world = build(seed);
            assert_eq!(world.snapshot(), build(seed).snapshot());
            for (x, z) in ROOM_TORCHES {
                let at = t.to_world(BlockCoord::new(x, 3, z));
                let block = world.block(at).unwrap();
                if block.material != Material::Torch {
                    assert_eq!(block, Block::AIR);
                    continue;
                }
                torches += 1;
                let Attachment::Wall(facing) = Attachment::from_data(block.data) else {
                    panic!("seed {seed}: torch at {at} stands on the floor");
                };
                let (dx, dz) = facing.to_xz();
                assert!(world.block_material(at.offset(dx, 0, dz)).unwrap().is_solid());
            }
        }
        assert!(torches > 0 && torches < 32, "{torches} torches");
    }

    #[test]
    fn corridor_gravel_repeats_per_seed() {
        let catalog = catalog();
        let corridor = |seed| StrongholdCorridor {
            length: 8,
            start_of_stronghold: false,
            decoration_seed: seed,
        };
        let floor = |seed| {
            let mut world = SparseWorld::new(Material::Air);
            corridor(seed).place(&Transform::IDENTITY, &mut world, &catalog).unwrap();
            (0..8)
                .map(|z| world.block_material(BlockCoord::new(2, 0, z)).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(floor(21), floor(21));
        let gravel = (0..32)
            .flat_map(floor)
            .filter(|m| *m == Material::Gravel)
            .count();
        assert!(gravel > 0, "no loose gravel in 32 corridors");
    }
}
