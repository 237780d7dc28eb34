use anyhow::Context;
use clap::{Parser, Subcommand};
use image_function::config::{Config, DisplayBackend};
use image_function::lessons::{self, ChannelRequest};
use image_function::logging::init_logging;
use image_function::visualization::{open_viewer, print_image_info, print_pixel};
use image_function::{ConversionMode, Rect};
use std::ops::Range;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "imgfn.toml";

#[derive(Parser)]
#[command(name = "imgfn")]
#[command(about = "Image as a function: read, write, display, index, crop, paste and color-convert images")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (TOML or JSON); defaults to ./imgfn.toml when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write each window as a PNG into this directory instead of opening it
    #[arg(long, global = true, value_name = "DIR")]
    headless: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read an image as color, grayscale and unchanged; show and write each
    ReadWrite {
        /// Input image
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory for color.jpg, gray_scale.jpg and alpha.jpg
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Print the B, G, R samples of one pixel and show one channel plane
    Channels {
        /// Input image
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Row of the sampled pixel
        #[arg(long)]
        row: Option<usize>,

        /// Column of the sampled pixel
        #[arg(long)]
        col: Option<usize>,

        /// Channel plane to show (0 = blue, 1 = green, 2 = red)
        #[arg(long)]
        channel: Option<usize>,

        /// Row range of the shown plane, e.g. 100..200
        #[arg(long, value_parser = parse_range)]
        rows: Option<Range<usize>>,

        /// Column range of the shown plane, e.g. 200..300
        #[arg(long, value_parser = parse_range)]
        cols: Option<Range<usize>>,
    },

    /// Convert color, crop a region and paste it elsewhere
    Roi {
        /// Input image
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Crop rectangle: row_start,row_end,col_start,col_end
        #[arg(long)]
        crop: Option<Rect>,

        /// Paste rectangle: row_start,row_end,col_start,col_end
        #[arg(long)]
        paste: Option<Rect>,

        /// Color conversion (BGR2RGB, BGR2GRAY, BGR2HSV, ...)
        #[arg(short, long)]
        mode: Option<ConversionMode>,
    },

    /// Convert an image file to another color representation
    Convert {
        /// Input image
        #[arg(short, long)]
        input: PathBuf,

        /// Color conversion (BGR2RGB, RGB2BGR, BGR2GRAY, GRAY2BGR, BGR2HSV, HSV2BGR)
        #[arg(short, long)]
        mode: ConversionMode,

        /// Output image; the extension selects the format
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, ignored) = load_config(cli.config.as_deref(), Path::new(DEFAULT_CONFIG_FILE))?;
    config.logging = config.logging.clone().with_verbosity(cli.verbose);
    let _log_guard = init_logging(&config.logging)?;

    if let Some(reason) = ignored {
        tracing::warn!("{}; using default configuration", reason);
        if !config.logging.console_output {
            eprintln!("warning: {}; using default configuration", reason);
        }
    }

    if let Some(dir) = cli.headless {
        config.display.backend = DisplayBackend::Snapshot;
        config.display.snapshot_dir = dir;
    }

    match cli.command {
        Commands::ReadWrite { input, output_dir } => {
            let input = input.unwrap_or(config.lessons.input.clone());
            let output_dir = output_dir.unwrap_or(config.lessons.output_dir.clone());
            handle_read_write(&config, &input, &output_dir)?;
        }
        Commands::Channels { input, row, col, channel, rows, cols } => {
            let input = input.unwrap_or(config.lessons.input.clone());
            let request = ChannelRequest {
                row: row.unwrap_or(config.lessons.sample_row),
                col: col.unwrap_or(config.lessons.sample_col),
                channel: channel.unwrap_or(config.lessons.channel),
                rows,
                cols,
            };
            handle_channels(&config, &input, &request)?;
        }
        Commands::Roi { input, crop, paste, mode } => {
            let input = input.unwrap_or(config.lessons.input.clone());
            let crop = crop.unwrap_or(config.lessons.crop.clone());
            let paste = paste.unwrap_or(config.lessons.paste.clone());
            let mode = mode.unwrap_or(config.lessons.conversion);
            handle_roi(&config, &input, &crop, &paste, mode)?;
        }
        Commands::Convert { input, mode, output } => {
            let converted = lessons::convert_file(&input, mode, &output)?;
            print_image_info(mode.name(), &converted);
            println!("Saved to {}", output.display());
        }
    }

    Ok(())
}

/// An explicit `--config` must load and validate. The implicit default file
/// falls back to defaults; the reason is returned so it can be logged once
/// logging is up.
fn load_config(explicit: Option<&Path>, implicit: &Path) -> anyhow::Result<(Config, Option<String>)> {
    if let Some(path) = explicit {
        let config = Config::load_validated(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        return Ok((config, None));
    }

    if !implicit.exists() {
        return Ok((Config::default(), None));
    }

    match Config::load_validated(implicit) {
        Ok(config) => Ok((config, None)),
        Err(e) => Ok((
            Config::default(),
            Some(format!("ignoring {}: {:#}", implicit.display(), e)),
        )),
    }
}

fn handle_read_write(config: &Config, input: &Path, output_dir: &Path) -> anyhow::Result<()> {
    let mut viewer = open_viewer(&config.display)?;
    println!("Reading {} with {} viewer...", input.display(), viewer.name());

    let outputs = lessons::read_write(
        input,
        output_dir,
        viewer.as_mut(),
        config.display.wait_delay_ms,
    )?;

    println!("Wrote:");
    for path in [&outputs.color, &outputs.gray, &outputs.alpha] {
        println!("  {}", path.display());
    }
    Ok(())
}

fn handle_channels(config: &Config, input: &Path, request: &ChannelRequest) -> anyhow::Result<()> {
    let mut viewer = open_viewer(&config.display)?;
    let report = lessons::extract_channels(
        input,
        request,
        viewer.as_mut(),
        config.display.wait_delay_ms,
    )?;

    print_pixel(request.row, request.col, &["B", "G", "R"], &report.samples);
    print_image_info(&format!("Channel {} plane", request.channel), &report.plane);
    Ok(())
}

fn handle_roi(
    config: &Config,
    input: &Path,
    crop: &Rect,
    paste: &Rect,
    mode: ConversionMode,
) -> anyhow::Result<()> {
    let mut viewer = open_viewer(&config.display)?;
    let outcome = lessons::roi_and_color(
        input,
        crop,
        paste,
        mode,
        viewer.as_mut(),
        config.display.wait_delay_ms,
    )?;

    print_image_info(mode.name(), &outcome.converted);
    print_image_info(&format!("ROI {}", crop), &outcome.roi);
    print_image_info(&format!("Pasted at {}", paste), &outcome.pasted);
    Ok(())
}

/// Parses `start..end` or `start:end`
fn parse_range(s: &str) -> Result<Range<usize>, String> {
    let (start, end) = s
        .split_once("..")
        .or_else(|| s.split_once(':'))
        .ok_or_else(|| format!("expected start..end, got '{}'", s))?;
    let start = start.trim().parse::<usize>().map_err(|e| e.to_string())?;
    let end = end.trim().parse::<usize>().map_err(|e| e.to_string())?;
    Ok(start..end)
}
