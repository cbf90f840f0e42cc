// Local-to-world placement of a piece.
//
// Every piece is authored in its own integer local space: X across the piece,
// Y up, Z forward (the direction growth continues in). A `Transform` maps
// that space into the world by rotating about a pivot and translating:
//
//   world = round(rotate(local - pivot) + pivot + position)
//
// Rotation is restricted to the four quarter-turn yaws (`Yaw`). The rotation
// itself is carried out with a `cgmath` quaternion, and composition of a
// child's rotation is quaternion left-multiplication (`delta * parent`), so
// nested turns accumulate around the world Y axis. Products are snapped back
// to the nearest `Yaw`; pitch and roll are never modeled.
//
// See also: `piece.rs` for how a piece derives successor transforms with
// `compose()`, `bounds.rs` for the world-space boxes built from transformed
// corners, `cuboid.rs` for the block writers that route through `to_world()`.

use crate::bounds::BoundingBox;
use crate::types::{BlockCoord, Facing};
use cgmath::{Deg, Quaternion, Rotation, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// Quarter-turn rotations leave ~1e-16 residue on exact halves; the slack
/// keeps them rounding up.
const ROUNDING_SLACK: f64 = 1e-9;

/// One of the four axis-aligned yaw rotations around +Y.
///
/// Positive angles follow the right-hand rule: `Deg90` carries +X onto -Z.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Yaw {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Yaw {
    pub const ALL: [Yaw; 4] = [Yaw::Deg0, Yaw::Deg90, Yaw::Deg180, Yaw::Deg270];

    /// Number of positive quarter turns, 0..=3.
    pub const fn quarter_turns(self) -> i32 {
        match self {
            Yaw::Deg0 => 0,
            Yaw::Deg90 => 1,
            Yaw::Deg180 => 2,
            Yaw::Deg270 => 3,
        }
    }

    /// Any number of quarter turns, negative included.
    pub const fn from_quarter_turns(turns: i32) -> Self {
        match turns.rem_euclid(4) {
            0 => Yaw::Deg0,
            1 => Yaw::Deg90,
            2 => Yaw::Deg180,
            _ => Yaw::Deg270,
        }
    }

    pub fn degrees(self) -> f64 {
        90.0 * self.quarter_turns() as f64
    }

    pub fn quaternion(self) -> Quaternion<f64> {
        Quaternion::from_angle_y(Deg(self.degrees()))
    }

    /// Snap a pure-yaw quaternion to the nearest quarter turn.
    pub fn from_quaternion(q: Quaternion<f64>) -> Self {
        let half_angle = q.v.y.atan2(q.s);
        let turns = (2.0 * half_angle).to_degrees() / 90.0;
        Self::from_quarter_turns(turns.round() as i32)
    }

    /// The rotation `delta` applied after `self`: `delta * self`.
    pub fn then(self, delta: Yaw) -> Self {
        Self::from_quaternion(delta.quaternion() * self.quaternion())
    }

    /// Exact integer rotation of an XZ vector.
    pub const fn rotate_xz(self, x: i32, z: i32) -> (i32, i32) {
        match self {
            Yaw::Deg0 => (x, z),
            Yaw::Deg90 => (z, -x),
            Yaw::Deg180 => (-x, -z),
            Yaw::Deg270 => (-z, x),
        }
    }
}

/// Position, rotation, and rotation pivot of one piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// World position of the local origin (before pivot effects).
    pub position: BlockCoord,
    pub rotation: Yaw,
    /// Local-space point the rotation turns around.
    pub pivot: [f64; 3],
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: BlockCoord::ORIGIN,
        rotation: Yaw::Deg0,
        pivot: [0.0; 3],
    };

    pub const fn new(position: BlockCoord, rotation: Yaw) -> Self {
        Self {
            position,
            rotation,
            pivot: [0.0; 3],
        }
    }

    pub const fn with_pivot(mut self, pivot: [f64; 3]) -> Self {
        self.pivot = pivot;
        self
    }

    /// Rotate a local point about the pivot, without translating it.
    pub fn rotate(&self, local: BlockCoord) -> Vector3<f64> {
        let pivot = Vector3::from(self.pivot);
        let offset = Vector3::new(local.x as f64, local.y as f64, local.z as f64) - pivot;
        self.rotation.quaternion().rotate_vector(offset) + pivot
    }

    /// Map a local cell to the nearest world lattice point. Results past the
    /// `i32` limits saturate.
    pub fn to_world(&self, local: BlockCoord) -> BlockCoord {
        let v = self.rotate(local);
        BlockCoord::new(
            round_half_up(v.x).saturating_add(self.position.x),
            round_half_up(v.y).saturating_add(self.position.y),
            round_half_up(v.z).saturating_add(self.position.z),
        )
    }

    /// The transform of a successor anchored at `offset` in this piece's
    /// local space and turned by `delta` relative to this piece.
    ///
    /// The successor starts with a zero pivot of its own.
    pub fn compose(&self, offset: BlockCoord, delta: Yaw) -> Transform {
        Transform::new(self.to_world(offset), self.rotation.then(delta))
    }

    /// The world-space box spanned by two local corners.
    pub fn bounding_box(&self, a: BlockCoord, b: BlockCoord) -> BoundingBox {
        BoundingBox::new(self.to_world(a), self.to_world(b))
    }

    /// A local facing expressed in world space.
    pub fn facing(&self, local: Facing) -> Facing {
        local.rotated(self.rotation)
    }
}

/// Float-to-int `as` casts saturate, so huge values clamp to the `i32` range.
fn round_half_up(v: f64) -> i32 {
    (v + 0.5 + ROUNDING_SLACK).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_maps_local_onto_world() {
        let t = Transform::IDENTITY;
        for local in [
            BlockCoord::new(0, 0, 0),
            BlockCoord::new(4, 4, 3),
            BlockCoord::new(-7, -3, 18),
        ] {
            assert_eq!(t.to_world(local), local);
        }
    }

    #[test]
    fn translation_only() {
        let t = Transform::new(BlockCoord::new(10, 64, -5), Yaw::Deg0);
        assert_eq!(t.to_world(BlockCoord::new(1, 2, 3)), BlockCoord::new(11, 66, -2));
    }

    #[test]
    fn quaternion_rotation_matches_exact_integer_rotation() {
        for yaw in Yaw::ALL {
            let t = Transform::new(BlockCoord::ORIGIN, yaw);
            for (x, z) in [(1, 0), (0, 1), (5, -3), (-7, 18), (12, 11)] {
                let (rx, rz) = yaw.rotate_xz(x, z);
                assert_eq!(
                    t.to_world(BlockCoord::new(x, 2, z)),
                    BlockCoord::new(rx, 2, rz),
                    "{yaw:?} on ({x}, {z})"
                );
            }
        }
    }

    #[test]
    fn positive_quarter_turn_carries_x_onto_negative_z() {
        let t = Transform::new(BlockCoord::ORIGIN, Yaw::Deg90);
        assert_eq!(t.to_world(BlockCoord::new(1, 0, 0)), BlockCoord::new(0, 0, -1));
        assert_eq!(t.to_world(BlockCoord::new(0, 0, 1)), BlockCoord::new(1, 0, 0));
    }

    #[test]
    fn rotation_about_pivot_keeps_pivot_fixed() {
        let t = Transform::new(BlockCoord::ORIGIN, Yaw::Deg180).with_pivot([2.0, 0.0, 2.0]);
        assert_eq!(t.to_world(BlockCoord::new(2, 0, 2)), BlockCoord::new(2, 0, 2));
        assert_eq!(t.to_world(BlockCoord::new(0, 0, 0)), BlockCoord::new(4, 0, 4));
    }

    #[test]
    fn half_pivot_rounds_up() {
        // 180 degrees about x = 0.25 carries x = 0 onto x = 0.5.
        let t = Transform::new(BlockCoord::ORIGIN, Yaw::Deg180).with_pivot([0.25, 0.0, 0.0]);
        assert_eq!(t.to_world(BlockCoord::new(0, 0, 0)).x, 1);
    }

    #[test]
    fn quaternion_snapping_roundtrips() {
        for yaw in Yaw::ALL {
            assert_eq!(Yaw::from_quaternion(yaw.quaternion()), yaw);
            // The negated quaternion is the same rotation.
            let q = yaw.quaternion();
            assert_eq!(Yaw::from_quaternion(-q), yaw);
        }
    }

    #[test]
    fn composition_accumulates_quarter_turns() {
        for a in Yaw::ALL {
            for b in Yaw::ALL {
                assert_eq!(
                    a.then(b),
                    Yaw::from_quarter_turns(a.quarter_turns() + b.quarter_turns())
                );
            }
        }
        assert_eq!(Yaw::Deg90.then(Yaw::Deg270), Yaw::Deg0);
    }

    #[test]
    fn compose_positions_child_through_parent() {
        let parent = Transform::new(BlockCoord::new(100, 40, 100), Yaw::Deg90);
        let child = parent.compose(BlockCoord::new(0, 0, 5), Yaw::Deg270);
        // Local +Z under Deg90 points along world +X.
        assert_eq!(child.position, BlockCoord::new(105, 40, 100));
        assert_eq!(child.rotation, Yaw::Deg0);
        assert_eq!(child.pivot, [0.0; 3]);
    }

    #[test]
    fn bounding_box_normalizes_rotated_corners() {
        let t = Transform::new(BlockCoord::ORIGIN, Yaw::Deg180);
        let bb = t.bounding_box(BlockCoord::new(0, 0, 0), BlockCoord::new(4, 4, 3));
        assert_eq!(bb.min(), BlockCoord::new(-4, 0, -3));
        assert_eq!(bb.max(), BlockCoord::new(0, 4, 0));
    }

    #[test]
    fn facing_follows_rotation() {
        let t = Transform::new(BlockCoord::ORIGIN, Yaw::Deg270);
        // Deg270 carries -Z onto +X.
        assert_eq!(t.facing(Facing::North), Facing::East);
    }

    #[test]
    fn far_translation_saturates_instead_of_overflowing() {
        let t = Transform::new(BlockCoord::new(i32::MAX - 2, 0, i32::MIN + 2), Yaw::Deg0);
        assert_eq!(
            t.to_world(BlockCoord::new(5, 0, -5)),
            BlockCoord::new(i32::MAX, 0, i32::MIN)
        );
        let turned = Transform::new(BlockCoord::new(i32::MAX, 0, 0), Yaw::Deg90);
        // Local +Z under Deg90 is world +X.
        assert_eq!(turned.to_world(BlockCoord::new(0, 0, 1)).x, i32::MAX);
    }
}
