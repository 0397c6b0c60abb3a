use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollweave::{
    EngineConfig, FrameHost as _, HostEvent, ManualHost, SegmentLayout, Teardown as _,
    VideoLoopConfig, VideoLoopController,
    sim::{SimOptions, Simulation, TextureSource},
    video::buffer::{BufferSlot, SimClock, SimulatedVideo, VideoBufferEvent},
};

#[derive(Parser, Debug)]
#[command(name = "scrollweave", version)]
struct Cli {
    /// Log state transitions to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scroll a page headlessly and write a JSON frame trace.
    Simulate(SimulateArgs),
    /// Print the per-item target opacity table.
    Windows(WindowsArgs),
    /// Simulate the background video loop and report crossfade start times.
    VideoLoop(VideoLoopArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Page configuration JSON.
    #[arg(long)]
    config: PathBuf,

    #[arg(long, default_value_t = 12.0)]
    seconds: f64,

    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Wheel input in CSS pixels per second.
    #[arg(long, default_value_t = 900.0)]
    scroll_speed: f64,

    #[arg(long)]
    reduced_motion: bool,

    /// Simulate an environment without a GPU surface.
    #[arg(long)]
    no_webgl: bool,

    /// Decode textures from the asset root instead of synthesizing them.
    #[arg(long)]
    real_textures: bool,

    /// Output trace path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct WindowsArgs {
    #[arg(long)]
    count: usize,

    #[arg(long, default_value_t = SegmentLayout::DEFAULT_OVERLAP)]
    overlap: f64,

    #[arg(long, default_value_t = 21)]
    samples: usize,
}

#[derive(Parser, Debug)]
struct VideoLoopArgs {
    /// Clip length in seconds.
    #[arg(long, default_value_t = 8.0)]
    duration: f64,

    #[arg(long, default_value_t = 80.0)]
    seconds: f64,

    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    #[arg(long, default_value_t = 900.0)]
    crossfade_ms: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Windows(args) => cmd_windows(args),
        Command::VideoLoop(args) => cmd_video_loop(args),
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = EngineConfig::from_path(&args.config)?;
    let textures = if args.real_textures {
        TextureSource::Directory(config.asset_root())
    } else {
        TextureSource::Synthetic
    };
    let opts = SimOptions {
        seconds: args.seconds,
        fps: args.fps,
        scroll_speed: args.scroll_speed,
        reduced_motion: args.reduced_motion,
        gpu: !args.no_webgl,
        textures,
        ..SimOptions::default()
    };
    let mut sim = Simulation::new(&config, opts)?;
    let trace = sim.run();
    sim.teardown();

    let json = serde_json::to_vec_pretty(&trace).context("serialize frame trace")?;
    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, &json)
                .with_context(|| format!("write trace '{}'", out.display()))?;
            eprintln!(
                "wrote {} ({} frames, mode {:?})",
                out.display(),
                trace.frames.len(),
                trace.mode
            );
        }
        None => std::io::stdout()
            .write_all(&json)
            .context("write trace to stdout")?,
    }
    Ok(())
}

fn cmd_windows(args: WindowsArgs) -> anyhow::Result<()> {
    if args.samples < 2 {
        anyhow::bail!("--samples must be at least 2");
    }
    let layout = SegmentLayout::new(args.count, args.overlap)?;
    let mut out = std::io::stdout().lock();
    write!(out, "{:>6}", "p")?;
    for i in 0..layout.count() {
        write!(out, " {:>6}", format!("#{i}"))?;
    }
    writeln!(out)?;
    for s in 0..args.samples {
        let p = s as f64 / (args.samples - 1) as f64;
        write!(out, "{p:>6.3}")?;
        for o in layout.target_opacities(p) {
            write!(out, " {o:>6.3}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn cmd_video_loop(args: VideoLoopArgs) -> anyhow::Result<()> {
    if !(args.fps > 0.0 && args.duration > 0.0 && args.seconds >= 0.0) {
        anyhow::bail!("--fps, --duration and --seconds must be positive");
    }
    let clock = SimClock::new();
    let config = VideoLoopConfig {
        source: Some("loop".to_owned()),
        crossfade_ms: args.crossfade_ms,
        ..VideoLoopConfig::default()
    };
    let mut host = ManualHost::new();
    let mut video = VideoLoopController::new(
        config,
        Box::new(SimulatedVideo::new(clock.clone(), Some(args.duration))),
        Box::new(SimulatedVideo::new(clock.clone(), Some(args.duration))),
    );
    video.on_buffer_event(VideoBufferEvent::Loaded(BufferSlot::A), &mut host);
    video.start(&mut host);

    let ticks = (args.seconds * args.fps).round() as u64;
    for tick in 0..=ticks {
        let now_ms = tick as f64 * 1000.0 / args.fps;
        clock.set(now_ms);
        for event in host.advance_to(now_ms) {
            match event {
                HostEvent::Frame { handle, now_ms } => {
                    video.on_frame(handle, now_ms, &mut host);
                }
                HostEvent::Timer { handle, now_ms } => {
                    video.on_timer(handle, now_ms);
                }
            }
        }
    }
    video.teardown(&mut host);

    let starts: Vec<f64> = video
        .crossfade_starts()
        .iter()
        .map(|ms| ms / 1000.0)
        .collect();
    let report = serde_json::json!({
        "duration_s": args.duration,
        "simulated_s": args.seconds,
        "crossfades": starts.len(),
        "starts_s": starts,
        "host_now_ms": host.now_ms(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize loop report")?
    );
    Ok(())
}
