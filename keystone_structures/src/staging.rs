// Write-staging overlay over a shared, read-only world.
//
// A `StagedWorld` answers reads from its own staged writes first and falls
// through to the base world otherwise. Writes never reach the base; they are
// kept in an ordered log that can be replayed later with `commit()`.
//
// This is what lets independent structures be planned in parallel (see
// `batch.rs`): every planner borrows the same base immutably and owns its
// own overlay. A write is checked against the base before it is staged, so a
// write into an unloaded region fails at planning time exactly as it would
// against the real world.

use crate::error::WorldError;
use crate::types::{Block, BlockCoord};
use crate::world::BlockWorld;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One recorded write, in the order it was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockWrite {
    pub coord: BlockCoord,
    pub block: Block,
}

/// Overlay that stages writes on top of `base`.
pub struct StagedWorld<'a, W: BlockWorld + ?Sized> {
    base: &'a W,
    staged: FxHashMap<BlockCoord, Block>,
    log: Vec<BlockWrite>,
}

impl<'a, W: BlockWorld + ?Sized> StagedWorld<'a, W> {
    pub fn new(base: &'a W) -> Self {
        Self {
            base,
            staged: FxHashMap::default(),
            log: Vec::new(),
        }
    }

    /// Every staged write so far, in issue order.
    pub fn writes(&self) -> &[BlockWrite] {
        &self.log
    }

    pub fn into_writes(self) -> Vec<BlockWrite> {
        self.log
    }

    /// Replay the staged writes onto `target`, in issue order.
    pub fn commit<T: BlockWorld + ?Sized>(self, target: &mut T) -> Result<usize, WorldError> {
        replay(&self.log, target)
    }
}

impl<W: BlockWorld + ?Sized> BlockWorld for StagedWorld<'_, W> {
    fn block(&self, coord: BlockCoord) -> Result<Block, WorldError> {
        match self.staged.get(&coord) {
            Some(block) => Ok(*block),
            None => self.base.block(coord),
        }
    }

    fn set_block(&mut self, coord: BlockCoord, block: Block) -> Result<(), WorldError> {
        if !self.staged.contains_key(&coord) {
            self.base.block(coord)?;
        }
        self.staged.insert(coord, block);
        self.log.push(BlockWrite { coord, block });
        Ok(())
    }
}

/// Apply `writes` to `target` in order. Returns how many were applied.
pub fn replay<T: BlockWorld + ?Sized>(
    writes: &[BlockWrite],
    target: &mut T,
) -> Result<usize, WorldError> {
    for write in writes {
        target.set_block(write.coord, write.block)?;
    }
    Ok(writes.len())
}
