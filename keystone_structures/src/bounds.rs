// Axis-aligned bounding boxes and the shared "already placed" set.
//
// Every corner a piece reports goes through `Transform::to_world`, which
// rounds onto the block lattice, so boxes are stored as integer corners.
// Both corners are inclusive: a box from (0,0,0) to (4,4,3) covers 5x5x4
// blocks, and two boxes that share a face layer intersect.
//
// `PlacedBoxes` is owned by exactly one `StructureGenerator` for the lifetime
// of one run. Pieces never see it mutably; the generator inserts a box only
// after the piece's `place()` has fully succeeded.

use crate::types::BlockCoord;
use serde::{Deserialize, Serialize};

/// Inclusive axis-aligned box with `min <= max` on every axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    min: BlockCoord,
    max: BlockCoord,
}

impl BoundingBox {
    /// Build from two arbitrary opposite corners.
    pub fn new(a: BlockCoord, b: BlockCoord) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> BlockCoord {
        self.min
    }

    pub fn max(&self) -> BlockCoord {
        self.max
    }

    /// Separating-axis test: the boxes intersect unless one lies strictly
    /// beyond the other along some axis.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        let separated = other.max.x < self.min.x
            || other.max.y < self.min.y
            || other.max.z < self.min.z
            || other.min.x > self.max.x
            || other.min.y > self.max.y
            || other.min.z > self.max.z;
        !separated
    }
}

/// Boxes of every piece placed so far in one generation run, in placement
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedBoxes {
    boxes: Vec<BoundingBox>,
}

impl PlacedBoxes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bb: BoundingBox) {
        self.boxes.push(bb);
    }

    /// The first placed box `bb` collides with, if any.
    pub fn first_intersecting(&self, bb: &BoundingBox) -> Option<&BoundingBox> {
        self.boxes.iter().find(|placed| placed.intersects(bb))
    }

    pub fn intersects_any(&self, bb: &BoundingBox) -> bool {
        self.first_intersecting(bb).is_some()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundingBox> {
        self.boxes.iter()
    }
}
