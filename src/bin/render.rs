use std::path::PathBuf;
use std::process::exit;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result as AResult};

use anemone::{AnimationKind, AnimationRenderer};

const USAGE: &str = "\
Usage: render --root <game data dir> --kind <animation kind> --id <id> [options]

Options:
    --frame <n>   Render frame n instead of sizing across all frames
    --video       Render every frame into a VP9 WebM (needs ffmpeg)
    --out <file>  Output path (defaults to <id>.png or <id>.webm)
    -h, --help    Show this help
";

struct Args {
    root: PathBuf,
    kind: AnimationKind,
    id: String,
    frame: Option<usize>,
    video: bool,
    out: Option<PathBuf>,
}

fn parse_args() -> AResult<Args> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", USAGE);
        exit(0);
    }

    let kind: String = args.value_from_str("--kind")?;
    let kind = AnimationKind::from_str(&kind.to_lowercase())
        .map_err(|_| anyhow!("{} is not an animation kind", kind))?;

    Ok(Args {
        root: args.value_from_str("--root")?,
        kind,
        id: args.value_from_str("--id")?,
        frame: args.opt_value_from_str("--frame")?,
        video: args.contains("--video"),
        out: args.opt_value_from_str("--out")?,
    })
}

fn main() -> AResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = parse_args()?;

    let renderer = AnimationRenderer::load(&args.root, args.kind, &args.id)
        .with_context(|| format!("Can\u{2019}t load {}/{}", args.kind, args.id))?;
    let handle = renderer.find_static_sprite()?;

    let (bytes, default_name) = if args.video {
        (renderer.render_video(handle)?, format!("{}.webm", args.id))
    } else {
        (
            renderer.render_still(handle, args.frame)?,
            format!("{}.png", args.id),
        )
    };

    let out = args.out.unwrap_or_else(|| PathBuf::from(default_name));
    std::fs::write(&out, bytes).with_context(|| format!("Can\u{2019}t write {}", out.display()))?;
    println!("Wrote {}", out.display());

    Ok(())
}
