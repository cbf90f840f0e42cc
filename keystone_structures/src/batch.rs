// Parallel planning of independent structures.
//
// Structures requested together (e.g. every feature trigger in one region)
// are grown in parallel on rayon's pool. Each request gets its own
// `StructureGenerator`, its own seeded random source, its own placed-box set,
// and its own `StagedWorld` overlay over the shared base. The base is only
// ever read during planning, so nothing mutable is shared between workers
// and two nearby structures cannot see each other's writes or boxes.
//
// `commit_batch()` then replays the staged writes onto the mutable world one
// structure at a time, in request order. Where two structures overlap, the
// later request's writes land last.
//
// `BatchPolicy` decides what a failed structure (a `WorldError` during its
// run) does to the batch:
// - `AbortAll`: the batch fails with the lowest-index error; nothing is
//   planned, so nothing can be committed.
// - `SkipFailed`: the failed structure is dropped, staged writes and all,
//   and recorded in `BatchPlan::skipped`. The others are unaffected.
//
// **Critical constraint: determinism.** Results are collected in request
// order regardless of which worker finished first, and each run depends only
// on its own request and the base, so a plan is identical to the plan built
// sequentially.

use crate::catalog::PieceCatalog;
use crate::error::{GenerationError, WorldError};
use crate::generator::{GenerationReport, StructureRequest, generate};
use crate::staging::{BlockWrite, StagedWorld, replay};
use crate::world::BlockWorld;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchPolicy {
    #[default]
    AbortAll,
    SkipFailed,
}

/// A structure that planned successfully, with its staged writes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedStructure {
    /// Position in the request slice.
    pub index: usize,
    pub report: GenerationReport,
    pub writes: Vec<BlockWrite>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedStructure {
    pub index: usize,
    pub error: GenerationError,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchPlan {
    /// In request order.
    pub planned: Vec<PlannedStructure>,
    /// In request order. Always empty under `BatchPolicy::AbortAll`.
    pub skipped: Vec<SkippedStructure>,
}

impl BatchPlan {
    pub fn write_count(&self) -> usize {
        self.planned.iter().map(|p| p.writes.len()).sum()
    }
}

/// Grow every request against its own overlay of `base`, in parallel.
pub fn plan_batch<W: BlockWorld + Sync + ?Sized>(
    base: &W,
    catalog: &PieceCatalog,
    requests: &[StructureRequest],
    policy: BatchPolicy,
) -> Result<BatchPlan, GenerationError> {
    let results: Vec<_> = requests
        .par_iter()
        .enumerate()
        .map(|(index, request)| -> Result<PlannedStructure, GenerationError> {
            let mut staged = StagedWorld::new(base);
            let report = generate(&mut staged, catalog, request)?;
            Ok(PlannedStructure {
                index,
                report,
                writes: staged.into_writes(),
            })
        })
        .collect();

    let mut plan = BatchPlan::default();
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(planned) => plan.planned.push(planned),
            Err(error) => match policy {
                BatchPolicy::AbortAll => {
                    log::warn!("batch aborted: structure {index} failed: {error}");
                    return Err(error);
                }
                BatchPolicy::SkipFailed => {
                    log::warn!("skipping structure {index}: {error}");
                    plan.skipped.push(SkippedStructure { index, error });
                }
            },
        }
    }
    log::debug!(
        "planned {} structures ({} skipped, {} writes)",
        plan.planned.len(),
        plan.skipped.len(),
        plan.write_count()
    );
    Ok(plan)
}

/// Replay every planned structure onto `world`, in request order. Returns the
/// number of writes applied.
pub fn commit_batch<W: BlockWorld + ?Sized>(
    world: &mut W,
    plan: &BatchPlan,
) -> Result<usize, WorldError> {
    let mut applied = 0;
    for planned in &plan.planned {
        applied += replay(&planned.writes, world)?;
    }
    Ok(applied)
}
