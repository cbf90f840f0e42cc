// Structure growth loop.
//
// `StructureGenerator` grows one structure from one root piece. It owns the
// run's random source, the pending queue, the piece counter, and the
// `PlacedBoxes` collision set; nothing else ever sees them mutably. The world
// is borrowed per `step()`, so one generator can be driven against a real
// world or a `StagedWorld` overlay alike.
//
// ## Lifecycle
//
//   Unseeded --seed()--> Seeded --step()--> Growing --...--> Drained
//
// `step()` handles exactly one dequeued candidate:
//
//   1. Pop the next candidate (front of the queue for `BreadthFirst`, back
//      for `DepthFirst`).
//   2. `check_placement()`: overlap with placed boxes first, then the shape's
//      terrain precondition. A failed check prunes the candidate and its
//      whole would-be subtree. Pruning is silent and not an error.
//   3. `place()` the piece, then record its box and bump the counter. The box
//      is recorded only after every write succeeded.
//   4. If the counter is still below the budget, ask for successors and
//      enqueue all of them before the next dequeue.
//
// The run drains when the queue is empty or the counter reaches the budget.
// Candidates still queued at that point are discarded unvisited.
//
// Siblings are enqueued together and do not see each other's boxes until one
// of them is actually placed, so two siblings may overlap as candidates; the
// one dequeued first wins and the other is pruned at its own check.
//
// ## Failures
//
// A `WorldError` from a placement check or from `place()` aborts the whole
// run: the generator drains immediately and the error is returned. The
// half-written piece's box is never recorded. Skipping a failed structure is
// a policy of the batch layer (`batch.rs`), not of this loop.
//
// See also: `piece.rs` for the per-piece contract, `catalog.rs` for the
// validated tables and budgets, `batch.rs` for parallel planning.
//
// **Critical constraint: determinism.** The only randomness is the generator's
// own source, consumed in a fixed order: root randomize, then for each placed
// piece, its successor selections and their randomizes. Block writes draw
// nothing from it.

use crate::bounds::{BoundingBox, PlacedBoxes};
use crate::catalog::PieceCatalog;
use crate::error::{ConfigError, GenerationError};
use crate::piece::{Piece, PieceKind, PlacementCheck};
use crate::transform::{Transform, Yaw};
use crate::types::BlockCoord;
use crate::world::BlockWorld;
use keystone_prng::{RandomSource, StructureRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Which end of the pending queue the next candidate comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DequeueOrder {
    /// Insertion order. Successors of one piece are visited before any of
    /// their own successors.
    #[default]
    BreadthFirst,
    /// Most recently enqueued first. A piece's first exit is followed all
    /// the way down before its siblings are visited.
    DepthFirst,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationState {
    Unseeded,
    Seeded,
    Growing,
    Drained,
}

/// One placed piece, as recorded in the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub kind: PieceKind,
    pub bounds: BoundingBox,
}

/// Summary of a run so far (or of a drained run).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Placed pieces in placement order.
    pub placed: Vec<PlacedPiece>,
    /// Candidates rejected by a placement check.
    pub pruned: usize,
    /// Candidates left in the queue when the budget ran out.
    pub discarded: usize,
    pub budget_exhausted: bool,
}

impl GenerationReport {
    pub fn placed_boxes(&self) -> Vec<BoundingBox> {
        self.placed.iter().map(|p| p.bounds).collect()
    }

    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }
}

/// What one `step()` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Placed(PlacedPiece),
    Pruned { kind: PieceKind, check: PlacementCheck },
    /// Nothing left to do; further steps are no-ops.
    Drained,
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

pub struct StructureGenerator<'c, R: RandomSource> {
    catalog: &'c PieceCatalog,
    rng: R,
    budget: usize,
    order: DequeueOrder,
    state: GenerationState,
    pending: VecDeque<Piece>,
    placed_boxes: PlacedBoxes,
    report: GenerationReport,
}

impl<'c, R: RandomSource> StructureGenerator<'c, R> {
    /// A generator using the catalog's budget and dequeue order.
    pub fn new(catalog: &'c PieceCatalog, rng: R) -> Self {
        Self {
            catalog,
            rng,
            budget: catalog.piece_budget(),
            order: catalog.dequeue_order(),
            state: GenerationState::Unseeded,
            pending: VecDeque::new(),
            placed_boxes: PlacedBoxes::new(),
            report: GenerationReport::default(),
        }
    }

    pub fn with_budget(mut self, budget: usize) -> Result<Self, ConfigError> {
        if budget == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        self.budget = budget;
        Ok(self)
    }

    pub fn with_order(mut self, order: DequeueOrder) -> Self {
        self.order = order;
        self
    }

    /// Create, randomize, and enqueue the root piece.
    pub fn seed(&mut self, kind: PieceKind, transform: Transform) -> Result<(), GenerationError> {
        let mut root = Piece::root(kind);
        root.transform = transform;
        self.ensure_growable(kind)?;
        root.randomize(self.catalog, &mut self.rng);
        self.seed_piece(root)
    }

    /// Enqueue a caller-prepared root piece as is, without randomizing it.
    pub fn seed_piece(&mut self, root: Piece) -> Result<(), GenerationError> {
        self.ensure_growable(root.kind())?;
        log::debug!(
            "seeding {:?} at {} facing {:?}",
            root.kind(),
            root.transform.position,
            root.transform.rotation
        );
        self.pending.push_back(root);
        self.state = GenerationState::Seeded;
        Ok(())
    }

    fn ensure_growable(&self, kind: PieceKind) -> Result<(), GenerationError> {
        if self.state != GenerationState::Unseeded {
            return Err(GenerationError::AlreadySeeded);
        }
        if kind.branches() {
            self.catalog.table(kind)?;
        }
        Ok(())
    }

    /// Handle one candidate from the queue.
    pub fn step<W: BlockWorld + ?Sized>(
        &mut self,
        world: &mut W,
    ) -> Result<StepOutcome, GenerationError> {
        match self.state {
            GenerationState::Unseeded => return Err(GenerationError::NotSeeded),
            GenerationState::Drained => return Ok(StepOutcome::Drained),
            GenerationState::Seeded | GenerationState::Growing => {}
        }
        let Some(piece) = self.dequeue() else {
            self.drain();
            return Ok(StepOutcome::Drained);
        };
        self.state = GenerationState::Growing;
        let kind = piece.kind();

        let check = piece
            .check_placement(&self.placed_boxes, &*world)
            .map_err(|source| self.abort(kind, source))?;
        if check != PlacementCheck::Clear {
            log::debug!("pruned {kind:?} at {}: {check:?}", piece.transform.position);
            self.report.pruned += 1;
            self.drain_if_done();
            return Ok(StepOutcome::Pruned { kind, check });
        }

        piece
            .place(&mut *world, self.catalog)
            .map_err(|source| self.abort(kind, source))?;
        let placed = PlacedPiece {
            kind,
            bounds: piece.bounding_box(),
        };
        self.placed_boxes.insert(placed.bounds);
        self.report.placed.push(placed);
        log::trace!(
            "placed {kind:?} #{} spanning {}..{}",
            self.report.placed.len(),
            placed.bounds.min(),
            placed.bounds.max()
        );

        if self.report.placed.len() < self.budget {
            match piece.next_pieces(self.catalog, &mut self.rng) {
                Ok(successors) => self.enqueue(successors.into_iter()),
                Err(err) => {
                    self.drain();
                    return Err(err.into());
                }
            }
        }
        self.drain_if_done();
        Ok(StepOutcome::Placed(placed))
    }

    /// Step until drained.
    pub fn run<W: BlockWorld + ?Sized>(
        mut self,
        world: &mut W,
    ) -> Result<GenerationReport, GenerationError> {
        while self.step(world)? != StepOutcome::Drained {}
        Ok(self.report)
    }

    fn dequeue(&mut self) -> Option<Piece> {
        match self.order {
            DequeueOrder::BreadthFirst => self.pending.pop_front(),
            DequeueOrder::DepthFirst => self.pending.pop_back(),
        }
    }

    fn enqueue(&mut self, successors: impl DoubleEndedIterator<Item = Piece>) {
        match self.order {
            DequeueOrder::BreadthFirst => self.pending.extend(successors),
            // Reversed so the first exit is popped first.
            DequeueOrder::DepthFirst => self.pending.extend(successors.rev()),
        }
    }

    fn drain_if_done(&mut self) {
        if self.pending.is_empty() || self.report.placed.len() >= self.budget {
            self.drain();
        }
    }

    fn drain(&mut self) {
        if self.state == GenerationState::Drained {
            return;
        }
        self.report.budget_exhausted = self.report.placed.len() >= self.budget;
        self.report.discarded = self.pending.len();
        self.pending.clear();
        self.state = GenerationState::Drained;
        log::info!(
            "structure drained: {} placed, {} pruned, {} discarded, budget {}",
            self.report.placed.len(),
            self.report.pruned,
            self.report.discarded,
            if self.report.budget_exhausted { "exhausted" } else { "not reached" }
        );
    }

    fn abort(&mut self, kind: PieceKind, source: crate::error::WorldError) -> GenerationError {
        log::warn!("aborting structure at {kind:?}: {source}");
        self.drain();
        GenerationError::World { kind, source }
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn placed_boxes(&self) -> &PlacedBoxes {
        &self.placed_boxes
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    pub fn into_report(self) -> GenerationReport {
        self.report
    }
}

// ---------------------------------------------------------------------------
// One-shot entry point
// ---------------------------------------------------------------------------

/// Everything needed to grow one structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRequest {
    pub root: PieceKind,
    pub position: BlockCoord,
    pub rotation: Yaw,
    pub seed: u64,
    /// Overrides the catalog's budget when set.
    pub piece_budget: Option<usize>,
}

impl StructureRequest {
    pub fn new(root: PieceKind, position: BlockCoord, seed: u64) -> Self {
        Self {
            root,
            position,
            rotation: Yaw::Deg0,
            seed,
            piece_budget: None,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }
}

/// Grow one structure into `world` and return its report.
pub fn generate<W: BlockWorld + ?Sized>(
    world: &mut W,
    catalog: &PieceCatalog,
    request: &StructureRequest,
) -> Result<GenerationReport, GenerationError> {
    let mut generator = StructureGenerator::new(catalog, StructureRng::new(request.seed));
    if let Some(budget) = request.piece_budget {
        generator = generator.with_budget(budget)?;
    }
    generator.seed(request.root, request.transform())?;
    generator.run(world)
}
