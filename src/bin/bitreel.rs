use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

use bitreel::{
    Codec, CodecConfig, ExtractOpts, FfmpegSink, FfmpegSinkOpts, Fps, Framing, FrameSink,
    PipelineOpts, PngDirSink, PngDirSinkOpts, PngDirSource, VideoCodec,
};

#[derive(Parser, Debug)]
#[command(name = "bitreel", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a file into a video (requires `ffmpeg` on PATH) or a directory of PNG frames.
    Encode(EncodeArgs),
    /// Decode a video or a directory of PNG frames back into a file.
    Decode(DecodeArgs),
    /// Print the grid capacity and the number of frames a file needs.
    Info(InfoArgs),
}

#[derive(Args, Debug)]
struct CodecArgs {
    /// JSON codec config; the flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Frame height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Cell edge length in pixels.
    #[arg(long)]
    block_size: Option<u32>,

    /// Per-channel classification threshold (1..=254).
    #[arg(long)]
    tolerance: Option<u8>,

    /// Reject colors that match no palette entry instead of reading them as black.
    #[arg(long)]
    strict: bool,

    /// Do not embed the payload length (trailing filler decodes as zero bytes).
    #[arg(long)]
    raw: bool,
}

impl CodecArgs {
    fn resolve(&self) -> anyhow::Result<CodecConfig> {
        let mut cfg = match &self.config {
            Some(path) => CodecConfig::from_json_path(path)?,
            None => CodecConfig::default(),
        };
        if let Some(w) = self.width {
            cfg.geometry.width = w;
        }
        if let Some(h) = self.height {
            cfg.geometry.height = h;
        }
        if let Some(b) = self.block_size {
            cfg.geometry.block_size = b;
        }
        if let Some(t) = self.tolerance {
            cfg.tolerance = t;
        }
        if self.strict {
            cfg.strict = true;
        }
        if self.raw {
            cfg.framing = Framing::Raw;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
struct PipelineArgs {
    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames rasterized per batch.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

impl PipelineArgs {
    fn opts(&self) -> PipelineOpts {
        PipelineOpts {
            parallel: self.parallel,
            threads: self.threads,
            chunk_size: self.chunk_size,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CodecChoice {
    /// Lossless RGB H.264.
    Lossless,
    /// Regular H.264 with yuv420p (lossy).
    Yuv420,
}

impl From<CodecChoice> for VideoCodec {
    fn from(c: CodecChoice) -> Self {
        match c {
            CodecChoice::Lossless => VideoCodec::LosslessRgb,
            CodecChoice::Yuv420 => VideoCodec::H264Yuv420,
        }
    }
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// File to encode.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output video path, or output directory with `--frames-only`.
    #[arg(long)]
    out: PathBuf,

    /// Write PNG frames into `--out` instead of muxing a video.
    #[arg(long)]
    frames_only: bool,

    /// Video frame rate.
    #[arg(long, default_value_t = 5)]
    fps: u32,

    /// Video codec.
    #[arg(long, value_enum, default_value_t = CodecChoice::Lossless)]
    video_codec: CodecChoice,

    /// Fail instead of overwriting an existing video.
    #[arg(long)]
    no_overwrite: bool,

    #[command(flatten)]
    codec: CodecArgs,

    #[command(flatten)]
    pipeline: PipelineArgs,
}

#[derive(Parser, Debug)]
struct DecodeArgs {
    /// Video file, or a directory of `<prefix>_<index>.png` frames.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output file for the recovered bytes.
    #[arg(long)]
    out: PathBuf,

    /// Resample the video at this rate before decoding (must match the encode rate).
    #[arg(long)]
    sample_fps: Option<u32>,

    /// Keep extracted frames in this directory instead of a temporary one.
    #[arg(long)]
    keep_frames: Option<PathBuf>,

    #[command(flatten)]
    codec: CodecArgs,

    #[command(flatten)]
    pipeline: PipelineArgs,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// File to size up.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Video frame rate used for the duration estimate.
    #[arg(long, default_value_t = 5)]
    fps: u32,

    #[command(flatten)]
    codec: CodecArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Encode(args) => cmd_encode(args),
        Command::Decode(args) => cmd_decode(args),
        Command::Info(args) => cmd_info(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_payload(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read input '{}'", path.display()))
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let cfg = args.codec.resolve()?;
    let codec = Codec::new(cfg, args.pipeline.opts())?;
    let payload = read_payload(&args.in_path)?;

    let mut sink: Box<dyn FrameSink> = if args.frames_only {
        Box::new(PngDirSink::new(PngDirSinkOpts::new(&args.out)))
    } else {
        Box::new(FfmpegSink::new(FfmpegSinkOpts {
            out_path: args.out.clone(),
            overwrite: !args.no_overwrite,
            fps: Fps::new(args.fps, 1)?,
            codec: args.video_codec.into(),
        }))
    };
    let stats = codec.encode_to_sink(&payload, sink.as_mut())?;

    eprintln!(
        "wrote {} ({} bytes in {} frames)",
        args.out.display(),
        stats.payload_bytes,
        stats.frames
    );
    Ok(())
}

fn cmd_decode(args: DecodeArgs) -> anyhow::Result<()> {
    let cfg = args.codec.resolve()?;
    let codec = Codec::new(cfg, args.pipeline.opts())?;

    let payload = if args.in_path.is_dir() {
        let source = PngDirSource::open(&args.in_path)?;
        codec.decode_source(&source)?
    } else {
        let opts = ExtractOpts {
            sample_fps: args.sample_fps.map(|n| Fps::new(n, 1)).transpose()?,
            out_dir: args.keep_frames.clone(),
        };
        let frames = bitreel::extract_frames(&args.in_path, &opts)?;
        codec.decode_source(&frames)?
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &payload)
        .with_context(|| format!("write output '{}'", args.out.display()))?;

    eprintln!("wrote {} ({} bytes)", args.out.display(), payload.len());
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let cfg = args.codec.resolve()?;
    let codec = Codec::new(cfg, PipelineOpts::default())?;
    let len = std::fs::metadata(&args.in_path)
        .with_context(|| format!("stat input '{}'", args.in_path.display()))?
        .len() as usize;
    let frames = codec.frame_count(len)?;
    let fps = Fps::new(args.fps, 1)?;
    let g = cfg.geometry;

    println!("geometry: {}x{} px, {} px cells", g.width, g.height, g.block_size);
    println!(
        "grid: {}x{} cells, {} bits per frame",
        g.columns(),
        g.rows(),
        g.capacity_bits()
    );
    println!("framing: {:?}", cfg.framing);
    println!("payload: {len} bytes");
    println!(
        "frames: {frames} ({:.1}s at {} fps)",
        fps.frames_to_secs(frames as u64),
        args.fps
    );
    Ok(())
}
