use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use evergreen_core::{
    FeedEvent, FrameClock, GestureFeed, ImageRef, InstanceData, Mode, Scene, SceneConfig,
    DEFAULT_DECOR_COUNT, DEFAULT_DUST_COUNT, DEFAULT_SEED,
};

mod sim;

// Detector events handled per tick; the rest wait for the next frame.
const MAX_FEED_EVENTS_PER_TICK: usize = 4;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DetectorKind {
    /// Scripted synthetic hand poses
    Sim,
    /// No gesture input; manual override only
    None,
    /// Simulate a refused camera permission
    Denied,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StartMode {
    Tree,
    Scatter,
    Focus,
}

impl From<StartMode> for Mode {
    fn from(m: StartMode) -> Self {
        match m {
            StartMode::Tree => Mode::Tree,
            StartMode::Scatter => Mode::Scatter,
            StartMode::Focus => Mode::Focus,
        }
    }
}

/// Headless driver for the evergreen particle scene
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of ornament particles
    #[arg(long, default_value_t = DEFAULT_DECOR_COUNT)]
    decor: usize,
    /// Number of dust particles
    #[arg(long, default_value_t = DEFAULT_DUST_COUNT)]
    dust: usize,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Target tick rate
    #[arg(long, default_value_t = 60.0)]
    fps: f32,
    /// Stop after this many ticks (0 runs until interrupted)
    #[arg(long, default_value_t = 0)]
    frames: u64,
    /// Starting mode (manual override)
    #[arg(long, value_enum, default_value_t = StartMode::Tree)]
    mode: StartMode,
    /// Add a photo by name; the last one added is framed
    #[arg(long = "photo")]
    photos: Vec<String>,
    #[arg(long, value_enum, default_value_t = DetectorKind::Sim)]
    detector: DetectorKind,
    /// Log a status line every N ticks
    #[arg(long, default_value_t = 120)]
    status_every: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    anyhow::ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "--fps must be positive, got {}",
        args.fps
    );

    let mut scene = Scene::new(SceneConfig {
        decor_count: args.decor,
        dust_count: args.dust,
        seed: args.seed,
        initial_mode: args.mode.into(),
        ..SceneConfig::default()
    });
    for name in &args.photos {
        scene.add_photo(ImageRef::new(name.as_str()));
    }

    let mut feed = match args.detector {
        DetectorKind::Sim => Some(GestureFeed::spawn(sim::webcam(30.0))),
        DetectorKind::Denied => Some(GestureFeed::spawn(sim::denied())),
        DetectorKind::None => {
            log::info!("[gesture] no detector; manual override only");
            None
        }
    };

    let frame_budget = Duration::from_secs_f32(1.0 / args.fps);
    let mut clock = FrameClock::new();
    let mut instances: Vec<InstanceData> = Vec::with_capacity(scene.registry().len());

    loop {
        let frame_start = Instant::now();

        if let Some(f) = feed.as_mut() {
            for event in std::iter::from_fn(|| f.try_next()).take(MAX_FEED_EVENTS_PER_TICK) {
                match event {
                    FeedEvent::Frame(hand) => {
                        scene.apply_hand_frame(hand.as_ref());
                    }
                    FeedEvent::Unavailable(e) => {
                        log::warn!("[gesture] input disabled ({e}); manual override only");
                    }
                }
            }
        }
        if feed.as_ref().is_some_and(|f| !f.is_available()) {
            feed = None;
        }

        scene.tick(clock.lap());
        scene.write_instances(&mut instances);

        if args.status_every > 0 && scene.ticks() % args.status_every == 0 {
            log_status(&scene, &instances);
        }
        if args.frames > 0 && scene.ticks() >= args.frames {
            break;
        }

        if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    drop(feed);
    log_status(&scene, &instances);
    let first = instances.first().context("scene has no particles")?;
    log::info!(
        "[scene] done after {} ticks ({:.1}s); first instance at ({:.2},{:.2},{:.2})",
        scene.ticks(),
        scene.elapsed_secs(),
        first.pos[0],
        first.pos[1],
        first.pos[2]
    );
    Ok(())
}

fn log_status(scene: &Scene, instances: &[InstanceData]) {
    let rotation = scene.context().rotation();
    let focus = scene
        .focus()
        .and_then(|id| scene.registry().image(id).map(|img| format!("{id} {}", img.as_str())))
        .unwrap_or_else(|| "-".to_string());
    log::info!(
        "[scene] t={:.1}s mode={} focus={} instances={} mean_gap={:.3} yaw={:.2} pitch={:.2}",
        scene.elapsed_secs(),
        scene.mode(),
        focus,
        instances.len(),
        scene.mean_distance_to_target(),
        rotation.yaw,
        rotation.pitch
    );
}
