use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollyte", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a scene at one progress value and print it as JSON.
    Sample(SampleArgs),
    /// Evaluate a scene at evenly spaced progress values, one JSON line each.
    Sweep(SweepArgs),
    /// Simulate a spring and print its trajectory, one JSON line per frame.
    Spring(SpringArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Progress in `[0, 1]`.
    #[arg(long)]
    progress: f64,

    /// Only move this container; every other container stays at 0.
    #[arg(long)]
    container: Option<String>,

    /// Pretty-print the output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of intervals; `steps + 1` samples are printed.
    #[arg(long, default_value_t = 10)]
    steps: u32,
}

#[derive(Parser, Debug)]
struct SpringArgs {
    /// Preset supplying stiffness and damping unless overridden.
    #[arg(long, value_enum, default_value_t = Preset::Carousel)]
    preset: Preset,

    #[arg(long)]
    stiffness: Option<f64>,

    #[arg(long)]
    damping: Option<f64>,

    #[arg(long, default_value_t = 1.0)]
    mass: f64,

    /// Starting value.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    #[arg(long)]
    target: f64,

    #[arg(long, default_value_t = 60)]
    frames: u32,

    #[arg(long, default_value_t = 60.0)]
    fps: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    Carousel,
    Cursor,
    RadialReveal,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Spring(args) => cmd_spring(args),
    }
}

fn load_scene(path: &Path) -> anyhow::Result<scrollyte::Scene> {
    let scene = scrollyte::Scene::from_path(path)?;
    scene
        .validate()
        .with_context(|| format!("validate scene '{}'", path.display()))?;
    Ok(scene)
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let progress = match &args.container {
        Some(id) => scrollyte::ProgressMap::uniform(0.0).with(id.clone(), args.progress),
        None => scrollyte::ProgressMap::uniform(args.progress),
    };
    let out = scrollyte::Evaluator::eval(&scene, &progress)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&out)
    } else {
        serde_json::to_string(&out)
    }
    .context("serialize evaluated scene")?;
    println!("{json}");
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.steps > 0, "--steps must be > 0");
    let scene = load_scene(&args.in_path)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for i in 0..=args.steps {
        let p = f64::from(i) / f64::from(args.steps);
        let evaluated = scrollyte::Evaluator::eval(&scene, &scrollyte::ProgressMap::uniform(p))?;
        let line = serde_json::json!({ "progress": p, "scene": evaluated });
        writeln!(out, "{line}").context("write sweep line")?;
    }
    Ok(())
}

fn cmd_spring(args: SpringArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "--fps must be finite and > 0"
    );
    let preset = match args.preset {
        Preset::Carousel => scrollyte::SpringConfig::carousel(),
        Preset::Cursor => scrollyte::SpringConfig::cursor(),
        Preset::RadialReveal => scrollyte::SpringConfig::radial_reveal(),
    };
    let config = scrollyte::SpringConfig {
        stiffness: args.stiffness.unwrap_or(preset.stiffness),
        damping: args.damping.unwrap_or(preset.damping),
        mass: args.mass,
    };
    let mut spring = scrollyte::Spring::new(args.from, config).context("build spring")?;
    spring.set_target(args.target);

    let dt = 1.0 / args.fps;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for frame in 1..=args.frames {
        spring.tick(dt);
        let line = serde_json::json!({
            "frame": frame,
            "t": f64::from(frame) * dt,
            "value": spring.value(),
            "velocity": spring.velocity(),
        });
        writeln!(out, "{line}").context("write spring line")?;
    }
    tracing::debug!(
        settled = spring.is_settled(scrollyte::SETTLE_EPSILON),
        "spring simulation finished"
    );
    Ok(())
}
