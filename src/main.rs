use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;
use stencil_blur::config::{load_config, BlurToolConfig};
use stencil_blur::diagnostics::{BlurReport, GridSummary, TimingBreakdown};
use stencil_blur::image::io::{save_preview_png, write_json_file};
use stencil_blur::pgm::{decode_file, encode_file, Quantization};
use stencil_blur::BlurEngine;

#[derive(Parser, Debug)]
#[command(name = "stencil-blur")]
#[command(about = "Smooth a grayscale PGM with repeated 3x3 Gaussian passes")]
#[command(version)]
struct Cli {
    /// Input PGM (P5) image [default: in.pgm].
    input: Option<PathBuf>,

    /// Number of filter passes [default: 1000].
    passes: Option<usize>,

    /// Output PGM path [default: out.pgm].
    output: Option<PathBuf>,

    /// JSON config file; positional arguments and flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maxval of the written PGM (256..=65535 gives 16-bit samples).
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    max_value: Option<u16>,

    /// Truncate instead of rounding when quantizing output samples.
    #[arg(long)]
    truncate: bool,

    /// Also write an 8-bit PNG preview of the result.
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Write a JSON report with grid statistics and stage timings.
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Cli {
    fn resolve(self) -> Result<BlurToolConfig, String> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => BlurToolConfig::default(),
        };
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(passes) = self.passes {
            config.passes = passes;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(max_value) = self.max_value {
            config.output_max_value = max_value;
        }
        if self.truncate {
            config.quantization = Quantization::Truncate;
        }
        if self.preview.is_some() {
            config.preview_png = self.preview;
        }
        if self.report.is_some() {
            config.report_json = self.report;
        }
        Ok(config)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = cli.resolve()?;
    debug!("resolved config: {config:?}");
    let mut timings = TimingBreakdown::default();

    let start = Instant::now();
    let decoded = decode_file(&config.input).map_err(|e| format!("Failed to read pgm image: {e}"))?;
    timings.push("decode", elapsed_ms(start));
    let input = decoded.grid;
    info!(
        "Loaded {} ({}x{}, maxval {})",
        config.input.display(),
        input.width(),
        input.height(),
        decoded.max_value
    );

    let before = GridSummary::of(&input);
    println!("Apply Gaussian filter {} times.", config.passes);
    let start = Instant::now();
    let output = BlurEngine::new().run_owned(input, config.passes);
    let blur_secs = start.elapsed().as_secs_f64();
    timings.push("blur", blur_secs * 1000.0);
    println!("Finished. Time: {blur_secs:.6} seconds.");

    let start = Instant::now();
    encode_file(&output, &config.output, config.encode_options())
        .map_err(|e| format!("Failed to write pgm image: {e}"))?;
    timings.push("encode", elapsed_ms(start));
    println!("Saved blurred image to {}", config.output.display());

    if let Some(path) = &config.preview_png {
        save_preview_png(&output, path)?;
        info!("Saved preview to {}", path.display());
    }

    if let Some(path) = &config.report_json {
        let report = BlurReport {
            input: config.input.clone(),
            output: config.output.clone(),
            passes: config.passes,
            input_max_value: decoded.max_value,
            output_max_value: config.output_max_value,
            before,
            after: GridSummary::of(&output),
            timings,
        };
        write_json_file(path, &report)?;
        info!("Saved report to {}", path.display());
    }

    Ok(())
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
