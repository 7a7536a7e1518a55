//! Parallel chunk rebuilds over pooled terrain contexts.
#![forbid(unsafe_code)]

mod context_pool;

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use hashbrown::HashMap;
use indigo_geom::BlockPos;
use indigo_render::{
    Block, BlockColors, BlockModel, BlockView, ChunkMesh, RenderCrash, RendererConfig, TerrainRenderContext,
};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use thiserror::Error;

pub use context_pool::{PooledTerrainContext, TerrainContextPool};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to start rebuild workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Resolves the model drawn for a block.
pub trait ModelLookup: Send + Sync {
    fn model(&self, block: Block) -> Option<&dyn BlockModel>;
}

/// Models keyed by block id; every state of a block shares its model.
#[derive(Default)]
pub struct ModelTable {
    models: HashMap<u16, Arc<dyn BlockModel>>,
}

impl ModelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u16, model: Arc<dyn BlockModel>) -> Option<Arc<dyn BlockModel>> {
        self.models.insert(id, model)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ModelLookup for ModelTable {
    fn model(&self, block: Block) -> Option<&dyn BlockModel> {
        self.models.get(&block.id).map(|m| m.as_ref())
    }
}

/// A box of blocks to rebuild: `size` blocks along each axis from `origin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RebuildJob {
    pub origin: BlockPos,
    pub size: [i32; 3],
}

impl RebuildJob {
    pub fn cube(origin: BlockPos, size: i32) -> Self {
        Self {
            origin,
            size: [size; 3],
        }
    }
}

pub struct RebuildOutput {
    pub origin: BlockPos,
    pub mesh: ChunkMesh,
    /// Non-air blocks that had a model.
    pub blocks: usize,
    pub t_total_ms: u32,
}

/// Rebuilds one chunk with `ctx`, which must not be bound to another rebuild.
///
/// Air and blocks without a model are skipped. The first crash aborts the
/// chunk and leaves `ctx` unbound.
pub fn rebuild_chunk(
    ctx: &mut TerrainRenderContext,
    view: &Arc<dyn BlockView>,
    models: &dyn ModelLookup,
    job: &RebuildJob,
) -> Result<RebuildOutput, RenderCrash> {
    let t0 = Instant::now();
    ctx.prepare(view.clone(), job.origin);
    let mut blocks = 0;
    let [sx, sy, sz] = job.size;
    for y in 0..sy {
        for z in 0..sz {
            for x in 0..sx {
                let pos = job.origin.add(x, y, z);
                let block = view.block_at(pos);
                if block.is_air() {
                    continue;
                }
                let Some(model) = models.model(block) else {
                    log::trace!("no model for {block:?} at {pos:?}");
                    continue;
                };
                if let Err(crash) = ctx.tessellate_block(model, block, pos) {
                    let _ = ctx.release();
                    return Err(crash);
                }
                blocks += 1;
            }
        }
    }
    let mesh = ctx.release();
    Ok(RebuildOutput {
        origin: job.origin,
        mesh,
        blocks,
        t_total_ms: t0.elapsed().as_millis() as u32,
    })
}

/// Rebuilds chunks in parallel on a dedicated worker pool.
pub struct ChunkRebuilder {
    pool: ThreadPool,
    contexts: Arc<TerrainContextPool>,
    view: Arc<dyn BlockView>,
    models: Arc<dyn ModelLookup>,
    workers: usize,
}

impl ChunkRebuilder {
    pub fn new(
        config: &RendererConfig,
        view: Arc<dyn BlockView>,
        models: Arc<dyn ModelLookup>,
        colors: Arc<dyn BlockColors>,
    ) -> Result<Self, RuntimeError> {
        let workers = match config.worker_threads {
            0 => thread::available_parallelism().map(|n| n.get()).unwrap_or(8),
            n => n,
        };
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("indigo-rebuild-{i}"))
            .build()?;
        let contexts = TerrainContextPool::with_capacity_from_workers(workers, config.clone(), colors);
        log::info!("chunk rebuilder started with {workers} workers");
        Ok(Self {
            pool,
            contexts,
            view,
            models,
            workers,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn contexts(&self) -> &TerrainContextPool {
        &self.contexts
    }

    /// Rebuilds every job; results come back in job order. A crashed chunk
    /// is logged and reported without affecting the others.
    pub fn rebuild(&self, jobs: &[RebuildJob]) -> Vec<Result<RebuildOutput, RenderCrash>> {
        let t0 = Instant::now();
        let results: Vec<_> = self
            .pool
            .install(|| jobs.par_iter().map(|job| self.rebuild_one(job)).collect());
        let quads: usize = results
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|out| out.mesh.quad_count())
            .sum();
        log::info!(
            target: "perf",
            "rebuilt {} chunks ({} quads) in {} ms",
            jobs.len(),
            quads,
            t0.elapsed().as_millis()
        );
        results
    }

    fn rebuild_one(&self, job: &RebuildJob) -> Result<RebuildOutput, RenderCrash> {
        let mut ctx = self.contexts.acquire();
        match rebuild_chunk(&mut ctx, &self.view, self.models.as_ref(), job) {
            Ok(out) => {
                log::debug!(
                    target: "perf",
                    "chunk {:?}: {} blocks, {} quads, {} ms",
                    job.origin,
                    out.blocks,
                    out.mesh.quad_count(),
                    out.t_total_ms
                );
                Ok(out)
            }
            Err(crash) => {
                log::error!("rebuild of chunk at {:?} aborted: {crash}", job.origin);
                Err(crash)
            }
        }
    }
}
