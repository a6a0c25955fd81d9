use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use scenepick_geometry::pos2;
use scenepick_gizmo::{HitProxy, InputEvent};
use scenepick_picking::{MAX_INDEX, PickTarget, SoftwareTarget, encode};
use scenepick_scene::{Placeable, Scene, SceneDescription};
use scenepick_view::{SessionConfig, ViewportSession};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "scenepick")]
#[command(about = "Headless picking and gizmo manipulation driver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replays scripted input against a scene, one event per frame.
    Replay(ReplayArgs),
    /// Renders one frame and reports what lies under a pixel.
    Pick(PickArgs),
    /// Prints the identity color of a pick index.
    Encode(EncodeArgs),
}

#[derive(Args)]
struct TargetArgs {
    #[arg(long)]
    scene: PathBuf,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Use the wgpu pick target instead of the software rasterizer.
    #[arg(long)]
    gpu: bool,
}

#[derive(Args)]
struct ReplayArgs {
    #[command(flatten)]
    target: TargetArgs,
    #[arg(long)]
    script: PathBuf,
    /// Writes the edited scene back out as JSON.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct PickArgs {
    #[command(flatten)]
    target: TargetArgs,
    #[arg(long)]
    x: f32,
    #[arg(long)]
    y: f32,
}

#[derive(Args)]
struct EncodeArgs {
    #[arg(long)]
    index: u32,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Replay(args) => replay(args),
        Command::Pick(args) => pick(args),
        Command::Encode(args) => encode_index(args),
    }
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    match path {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(SessionConfig::default()),
    }
}

fn load_scene(path: &Path) -> Result<Scene> {
    let description = SceneDescription::load(path)
        .with_context(|| format!("failed to read scene {}", path.display()))?;
    let scene = description.build().context("invalid scene description")?;
    info!(path = %path.display(), objects = scene.len(), "scene loaded");
    Ok(scene)
}

fn replay(args: ReplayArgs) -> Result<()> {
    let config = load_config(args.target.config.as_deref())?;
    let mut scene = load_scene(&args.target.scene)?;
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let events: Vec<InputEvent> =
        serde_json::from_str(&text).context("script is not a list of input events")?;

    let mut session = open_session(&config, args.target.gpu)?;
    run_script(&mut session, &mut scene, &events)?;

    for (id, object) in scene.iter() {
        info!(
            %id,
            name = %object.name,
            origin = ?object.origin(),
            scale = object.scale(),
            "final transform"
        );
    }
    if let Some(out) = args.out {
        let json = SceneDescription::capture(&scene).to_json()?;
        std::fs::write(&out, json).with_context(|| format!("failed to write {}", out.display()))?;
        info!(path = %out.display(), "edited scene written");
    }
    Ok(())
}

fn run_script(session: &mut Session, scene: &mut Scene, events: &[InputEvent]) -> Result<()> {
    // Input is resolved against the previous frame's readback.
    session.tick(scene).context("initial frame failed")?;
    let mut changed = 0;
    for event in events {
        session.push_event(*event);
        changed += session
            .tick(scene)
            .with_context(|| format!("frame {} failed", session.frame()))?;
        debug!(frame = session.frame(), ?event, "event replayed");
    }
    info!(events = events.len(), changed, frames = session.frame(), "replay complete");
    Ok(())
}

fn pick(args: PickArgs) -> Result<()> {
    let config = load_config(args.target.config.as_deref())?;
    let mut scene = load_scene(&args.target.scene)?;
    let pos = pos2(args.x, args.y);

    let mut session = open_session(&config, args.target.gpu)?;
    session.tick(&mut scene).context("frame failed")?;
    let hit = session.pick(pos);
    match hit {
        Some(HitProxy::Object(id)) => {
            let name = scene.get(id).map(|object| object.name.as_str()).unwrap_or("?");
            info!(x = args.x, y = args.y, %id, name, "object hit");
            println!("object {id} ({name})");
        }
        Some(HitProxy::Axis(axis)) => {
            info!(x = args.x, y = args.y, ?axis, "gizmo handle hit");
            println!("gizmo {axis:?}");
        }
        None => {
            info!(x = args.x, y = args.y, "nothing hit");
            println!("nothing");
        }
    }
    Ok(())
}

type Session = ViewportSession<Box<dyn PickTarget>>;

fn open_session(config: &SessionConfig, gpu: bool) -> Result<Session> {
    let (width, height) = (config.viewport.width, config.viewport.height);
    let target: Box<dyn PickTarget> = if gpu {
        gpu_target(width, height)?
    } else {
        Box::new(SoftwareTarget::new(width, height).context("failed to create pick target")?)
    };
    let session = ViewportSession::new(config, target).context("invalid session config")?;
    info!(width, height, gpu, "viewport session ready");
    Ok(session)
}

#[cfg(feature = "gpu")]
fn gpu_target(width: u32, height: u32) -> Result<Box<dyn PickTarget>> {
    let target = scenepick_picking::WgpuTarget::headless(width, height)
        .context("failed to create wgpu pick target")?;
    Ok(Box::new(target))
}

#[cfg(not(feature = "gpu"))]
fn gpu_target(_width: u32, _height: u32) -> Result<Box<dyn PickTarget>> {
    bail!("--gpu requires building with the `gpu` feature");
}

fn encode_index(args: EncodeArgs) -> Result<()> {
    if args.index > MAX_INDEX {
        bail!("index {} exceeds the 24-bit limit {}", args.index, MAX_INDEX);
    }
    let [r, g, b, a] = encode(args.index);
    println!("{} -> rgba({r}, {g}, {b}, {a}) #{r:02X}{g:02X}{b:02X}", args.index);
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
