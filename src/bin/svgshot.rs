use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

use svgshot::{
    ExportFormat, Exporter, NormalizedSvg, RenderRequest, ResvgHost, format_capture_label,
};

/// Longest error message printed on one status line.
const STATUS_MAX_CHARS: usize = 60;

#[derive(Parser, Debug)]
#[command(name = "svgshot", version)]
struct Cli {
    /// Log debug details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate an SVG and report whether it is animated.
    Check(InputArgs),
    /// Print the estimated animation duration in milliseconds.
    Duration(InputArgs),
    /// Normalize an SVG and export it as svg, png, webp or gif.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input SVG file, or `-` for stdin.
    input: PathBuf,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Input SVG file, or `-` for stdin.
    input: PathBuf,

    /// Output path. Defaults to `icon.svg` or `icon-{w}x{h}.{ext}`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// JSON file holding a full render request; flags below override its fields.
    #[arg(long)]
    request: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Output width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Keep the background transparent (png, webp).
    #[arg(long)]
    transparent: bool,

    /// Crop to the inscribed circle.
    #[arg(long)]
    circle: bool,

    /// Capture rate for gif exports.
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Svg,
    Png,
    Webp,
    Gif,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Svg => Self::Svg,
            FormatArg::Png => Self::Png,
            FormatArg::Webp => Self::Webp,
            FormatArg::Gif => Self::Gif,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Duration(args) => cmd_duration(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn cmd_check(args: InputArgs) -> anyhow::Result<()> {
    let doc = load(&args.input)?;
    println!("valid svg");
    println!("animated: {}", if doc.is_animated() { "yes" } else { "no" });
    println!("duration: {} ms", doc.duration_ms());
    Ok(())
}

fn cmd_duration(args: InputArgs) -> anyhow::Result<()> {
    let raw = read_input(&args.input)?;
    println!("{}", svgshot::estimate_duration_ms(&raw));
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let req = build_request(&args)?;
    let doc = load(&args.input)?;

    if req.format == ExportFormat::Gif {
        eprintln!("{}", format_capture_label(doc.duration_ms()));
    }

    let exporter = Exporter::new(ResvgHost::new());
    let blob = exporter
        .export(&doc, &req)
        .map_err(|e| anyhow::anyhow!("export failed: {}", e.short_message(STATUS_MAX_CHARS)))?;

    let out = args.out.unwrap_or_else(|| PathBuf::from(req.file_name()));
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, &blob.bytes)
        .with_context(|| format!("write {} '{}'", blob.mime, out.display()))?;

    eprintln!(
        "wrote {} ({})",
        out.display(),
        req.describe(doc.is_animated())
    );
    Ok(())
}

fn build_request(args: &ExportArgs) -> anyhow::Result<RenderRequest> {
    let mut req = match &args.request {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read request '{}'", path.display()))?;
            serde_json::from_str::<RenderRequest>(&text)
                .with_context(|| format!("parse request '{}'", path.display()))?
        }
        None => RenderRequest::default(),
    };

    if let Some(f) = args.format {
        req.format = f.into();
    }
    if let Some(w) = args.width {
        req.width = w;
    }
    if let Some(h) = args.height {
        req.height = h;
    }
    if let Some(fps) = args.fps {
        req.fps = fps;
    }
    req.transparent_background |= args.transparent;
    req.circular_crop |= args.circle;
    Ok(req)
}

fn load(input: &Path) -> anyhow::Result<NormalizedSvg> {
    let raw = read_input(input)?;
    svgshot::normalize(&raw)
        .map_err(|e| anyhow::anyhow!("invalid svg: {}", e.short_message(STATUS_MAX_CHARS)))
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read svg from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("read svg '{}'", input.display()))
}
