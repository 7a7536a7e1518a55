use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use indigo_render::{BlockColors, RendererConfig, TerrainRenderContext};

struct Slot {
    id: usize,
    ctx: TerrainRenderContext,
}

/// Lock-free pool of terrain contexts shared by rebuild workers.
///
/// Contexts are created on demand up to `max_contexts`; past that,
/// `acquire` blocks until a holder drops its guard.
pub struct TerrainContextPool {
    available_tx: Sender<Slot>,
    available_rx: Receiver<Slot>,
    allocated: AtomicUsize,
    max_contexts: usize,
    config: RendererConfig,
    colors: Arc<dyn BlockColors>,
}

impl TerrainContextPool {
    pub fn new(max_contexts: usize, config: RendererConfig, colors: Arc<dyn BlockColors>) -> Self {
        let max_contexts = max_contexts.max(1);
        let (tx, rx) = bounded(max_contexts);
        Self {
            available_tx: tx,
            available_rx: rx,
            allocated: AtomicUsize::new(0),
            max_contexts,
            config,
            colors,
        }
    }

    /// Two contexts per worker.
    pub fn with_capacity_from_workers(
        worker_count: usize,
        config: RendererConfig,
        colors: Arc<dyn BlockColors>,
    ) -> Arc<Self> {
        Arc::new(Self::new(worker_count.max(1) * 2, config, colors))
    }

    pub fn acquire(&self) -> PooledTerrainContext<'_> {
        if let Ok(slot) = self.available_rx.try_recv() {
            return self.guard(slot);
        }

        loop {
            let current = self.allocated.load(Ordering::Acquire);
            if current < self.max_contexts {
                let prev = self.allocated.fetch_add(1, Ordering::AcqRel);
                if prev < self.max_contexts {
                    log::debug!("allocating terrain context {prev}");
                    let ctx = TerrainRenderContext::new(&self.config, self.colors.clone());
                    return self.guard(Slot { id: prev, ctx });
                }
                self.allocated.fetch_sub(1, Ordering::AcqRel);
            }

            // Both channel ends live in `self`, so recv only fails if it is being torn down.
            if let Ok(slot) = self.available_rx.recv() {
                return self.guard(slot);
            }
        }
    }

    /// Contexts created so far.
    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::Acquire).min(self.max_contexts)
    }

    pub fn max_contexts(&self) -> usize {
        self.max_contexts
    }

    fn guard(&self, slot: Slot) -> PooledTerrainContext<'_> {
        PooledTerrainContext {
            slot: Some(slot),
            pool: self,
        }
    }

    fn release(&self, mut slot: Slot) {
        // Drop any world still bound by an aborted rebuild.
        let _ = slot.ctx.release();
        let _ = self.available_tx.send(slot);
    }
}

/// Exclusive use of one pooled context; returned to the pool on drop.
pub struct PooledTerrainContext<'pool> {
    slot: Option<Slot>,
    pool: &'pool TerrainContextPool,
}

impl PooledTerrainContext<'_> {
    /// Stable identity of the underlying context within its pool.
    pub fn id(&self) -> usize {
        self.slot.as_ref().map_or(usize::MAX, |s| s.id)
    }
}

impl Deref for PooledTerrainContext<'_> {
    type Target = TerrainRenderContext;

    fn deref(&self) -> &Self::Target {
        &self.slot.as_ref().expect("terrain context already released").ctx
    }
}

impl DerefMut for PooledTerrainContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.slot.as_mut().expect("terrain context already released").ctx
    }
}

impl Drop for PooledTerrainContext<'_> {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            self.pool.release(slot);
        }
    }
}
