// Concrete piece recipes.
//
// - `stronghold.rs`: brick tunnels that avoid liquids and carry a portal room.
// - `fortress.rs`:   nether-brick bridges and halls on downward pillars.
//
// Every exit anchor lies just outside its piece's footprint along the exit
// direction, so a successor never overlaps the parent that spawned it; the
// tests below check that for every branching kind and many random draws.

pub mod fortress;
pub mod stronghold;

#[cfg(test)]
mod tests {
    use crate::catalog::PieceCatalog;
    use crate::config::GenerationConfig;
    use crate::piece::{Piece, PieceKind};
    use crate::transform::{Transform, Yaw};
    use crate::types::BlockCoord;
    use keystone_prng::{RandomSource, StructureRng};

    #[test]
    fn successors_never_overlap_their_parent() {
        let catalog = PieceCatalog::from_config(&GenerationConfig::default()).unwrap();
        let mut rng = StructureRng::new(0xfeed);
        for kind in PieceKind::ALL.into_iter().filter(|k| k.branches()) {
            for _ in 0..200 {
                let mut parent = Piece::root(kind);
                parent.transform = Transform::new(
                    BlockCoord::new(rng.next_int(64) as i32 - 32, 40, rng.next_int(64) as i32 - 32),
                    Yaw::from_quarter_turns(rng.next_int(4) as i32),
                );
                parent.randomize(&catalog, &mut rng);
                let parent_box = parent.bounding_box();
                for child in parent.next_pieces(&catalog, &mut rng).unwrap() {
                    assert!(
                        !child.bounding_box().intersects(&parent_box),
                        "{kind:?} -> {:?} at {:?}",
                        child.kind(),
                        child.transform
                    );
                }
            }
        }
    }

    #[test]
    fn successor_rotation_accumulates_from_parent() {
        let catalog = PieceCatalog::from_config(&GenerationConfig::default()).unwrap();
        let mut rng = StructureRng::new(3);
        let mut parent = Piece::of_kind(PieceKind::FortressIntersection);
        parent.set_rotation(Yaw::Deg90);
        let turns: Vec<_> = parent
            .next_pieces(&catalog, &mut rng)
            .unwrap()
            .iter()
            .map(|child| child.transform.rotation)
            .collect();
        assert_eq!(turns, vec![Yaw::Deg90, Yaw::Deg0, Yaw::Deg180]);
    }
}
