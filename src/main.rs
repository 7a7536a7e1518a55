mod config;
mod models;
mod world;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use indigo_geom::{BlockPos, Pose};
use indigo_lighting::AoMode;
use indigo_quad::{MaterialError, MaterialRegistry, RenderLayer};
use indigo_render::{
    BlockView, ConfigError, DEFAULT_OVERLAY, ItemDisplay, ItemRenderContext, ItemRenderParams, ItemSinkKey,
    ItemSinks, ItemStack, MeshBuild, NoTint, VertexSink,
};
use indigo_runtime::{ChunkRebuilder, RebuildJob, RuntimeError};
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{GrassTint, build_models, model_table};
use crate::world::NoiseWorld;
use crate::world::blocks::WATER;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Materials(#[from] MaterialError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AoModeArg {
    Emulate,
    Hybrid,
    Enhanced,
}

impl From<AoModeArg> for AoMode {
    fn from(arg: AoModeArg) -> Self {
        match arg {
            AoModeArg::Emulate => AoMode::Emulate,
            AoModeArg::Hybrid => AoMode::Hybrid,
            AoModeArg::Enhanced => AoMode::Enhanced,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "indigo", version, about = "Tessellate a generated world into per-layer meshes")]
struct Args {
    /// Renderer and world settings
    #[arg(long, default_value = "indigo.toml")]
    config: PathBuf,

    /// Named material definitions
    #[arg(long, default_value = "assets/materials.toml")]
    materials: PathBuf,

    #[arg(long)]
    seed: Option<i32>,

    /// Chunks along x and z
    #[arg(long)]
    chunks: Option<i32>,

    #[arg(long)]
    workers: Option<usize>,

    #[arg(long, value_enum)]
    ao_mode: Option<AoModeArg>,

    /// Flat lighting only
    #[arg(long)]
    no_ao: bool,
}

fn load_config(args: &Args) -> Result<AppConfig, AppError> {
    let mut cfg = if args.config.exists() {
        AppConfig::from_path(&args.config)?
    } else {
        log::warn!("{} not found; using defaults", args.config.display());
        AppConfig::default()
    };
    if let Some(seed) = args.seed {
        cfg.world.seed = seed;
    }
    if let Some(n) = args.chunks {
        cfg.world.chunks_x = n;
        cfg.world.chunks_z = n;
    }
    if let Some(w) = args.workers {
        cfg.renderer.worker_threads = w;
    }
    if let Some(mode) = args.ao_mode {
        cfg.renderer.lighting.ao_mode = mode.into();
    }
    if args.no_ao {
        cfg.renderer.ambient_occlusion = false;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn load_materials(path: &Path) -> Result<MaterialRegistry, AppError> {
    if path.exists() {
        let registry = MaterialRegistry::from_path(path)?;
        log::info!("loaded {} materials from {}", registry.len(), path.display());
        Ok(registry)
    } else {
        log::warn!("{} not found; only the standard material is available", path.display());
        Ok(MaterialRegistry::new())
    }
}

/// Collects GUI item output, one buffer per routing key.
#[derive(Default)]
struct ItemPreview {
    buffers: Vec<(ItemSinkKey, MeshBuild)>,
}

impl ItemSinks for ItemPreview {
    fn open(&mut self, key: ItemSinkKey) -> usize {
        self.buffers.push((key, MeshBuild::default()));
        self.buffers.len() - 1
    }

    fn sink(&mut self, slot: usize) -> &mut dyn VertexSink {
        &mut self.buffers[slot].1
    }
}

fn run() -> Result<(), AppError> {
    let args = Args::parse();
    let cfg = load_config(&args)?;
    let materials = load_materials(&args.materials)?;

    let t0 = Instant::now();
    let world = NoiseWorld::generate(&cfg.world);
    log::info!(
        target: "perf",
        "generated {}x{}x{} world in {} ms",
        cfg.world.size_x(),
        cfg.world.height,
        cfg.world.size_z(),
        t0.elapsed().as_millis()
    );

    let models = build_models(&materials);
    let view: Arc<dyn BlockView> = Arc::new(world);
    let rebuilder = ChunkRebuilder::new(
        &cfg.renderer,
        view,
        Arc::new(model_table(&models)),
        Arc::new(GrassTint {
            height: cfg.world.height,
        }),
    )?;

    let size = cfg.world.chunk_size;
    let mut jobs = Vec::new();
    for cy in 0..(cfg.world.height + size - 1) / size {
        for cz in 0..cfg.world.chunks_z {
            for cx in 0..cfg.world.chunks_x {
                jobs.push(RebuildJob::cube(BlockPos::new(cx * size, cy * size, cz * size), size));
            }
        }
    }

    let results = rebuilder.rebuild(&jobs);
    let mut quads = [0usize; 4];
    let mut blocks = 0;
    let mut crashes = 0;
    for result in &results {
        match result {
            Ok(out) => {
                blocks += out.blocks;
                for (layer, build) in out.mesh.layers() {
                    quads[layer.index()] += build.quad_count();
                }
            }
            Err(_) => crashes += 1,
        }
    }
    for layer in RenderLayer::ALL {
        log::info!("{layer:?}: {} quads", quads[layer.index()]);
    }
    log::info!(
        "{} chunks, {blocks} blocks, {} quads, {crashes} failed",
        jobs.len(),
        quads.iter().sum::<usize>()
    );

    let mut items = ItemRenderContext::new();
    for (block, model) in &models {
        let stack = ItemStack {
            block_layer: Some(if *block == WATER {
                RenderLayer::Translucent
            } else {
                RenderLayer::Solid
            }),
            ..ItemStack::new(block.id as u32)
        };
        let mut preview = ItemPreview::default();
        let params = ItemRenderParams {
            display: ItemDisplay::Gui,
            pose: Pose::IDENTITY,
            light: indigo_quad::light::FULL_BRIGHTNESS,
            overlay: DEFAULT_OVERLAY,
        };
        items.render(model.as_ref(), &stack, &NoTint, &params, &mut preview);
        for (key, build) in &preview.buffers {
            log::debug!("item {}: {:?} -> {} quads", block.id, key, build.quad_count());
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
