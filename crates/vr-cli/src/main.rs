//! VocalRange command line
//!
//! Usage:
//!   vocalrange analyze take.wav          - Track the sung range of a recording
//!   vocalrange tone 60 --out c4.wav      - Render a preview tone
//!   vocalrange config --out vr.json      - Write the default configuration

mod console;
mod wav;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use vr_core::{SampleRate, VocalRangeConfig, midi_to_name};
use vr_pitch::TonePreview;
use vr_session::{KeyboardLayout, SessionDriver, SessionTracker};

use crate::console::ConsoleSink;
use crate::wav::WavFrameSource;

#[derive(Parser)]
#[command(name = "vocalrange", version, about = "Vocal range tracker")]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Track pitch through a WAV recording and report the sung range
    Analyze {
        /// Input WAV file
        input: PathBuf,
        /// Lower edge of the vocal band (Hz)
        #[arg(long)]
        min_freq: Option<f64>,
        /// Upper edge of the vocal band (Hz)
        #[arg(long)]
        max_freq: Option<f64>,
        /// Show the range lock on the keyboard
        #[arg(short, long)]
        lock: bool,
        /// Print unvoiced and rejected frames too
        #[arg(short, long)]
        verbose: bool,
        /// Print the final report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a preview tone to a WAV file
    Tone {
        /// MIDI note number (60 = C4)
        midi: i32,
        /// Output WAV file
        #[arg(short, long)]
        out: PathBuf,
        /// Output sample rate
        #[arg(long, default_value_t = SampleRate::default().as_u32())]
        sample_rate: u32,
        /// Refuse notes outside the range sung in this recording
        #[arg(long)]
        within: Option<PathBuf>,
    },
    /// Write the effective configuration to a file
    Config {
        /// Output JSON file
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            input,
            min_freq,
            max_freq,
            lock,
            verbose,
            json,
        } => {
            let mut config = config;
            if let Some(min) = min_freq {
                config.min_freq = min;
            }
            if let Some(max) = max_freq {
                config.max_freq = max;
            }
            config.lock_enabled |= lock;
            analyze(&input, &config, verbose, json)
        }
        Commands::Tone {
            midi,
            out,
            sample_rate,
            within,
        } => render_tone(midi, &out, sample_rate, within.as_deref(), &config),
        Commands::Config { out } => {
            config
                .save_to(&out)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Wrote {}", out.display());
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<VocalRangeConfig> {
    let config = match path {
        Some(path) => VocalRangeConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => VocalRangeConfig::default(),
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Run a recording through a full session; the tracker is returned for reuse
fn track(input: &Path, config: &VocalRangeConfig, sink: ConsoleSink) -> Result<SessionTracker> {
    let source = WavFrameSource::new(input, config.frame_size);
    let mut driver = SessionDriver::from_config(source, sink, config)?;
    driver
        .start()
        .with_context(|| format!("Cannot read {}", input.display()))?;

    let frames = driver.run();
    log::info!("Processed {} frames from {}", frames, input.display());

    let (_, _, tracker) = driver.into_parts();
    Ok(tracker)
}

fn analyze(input: &Path, config: &VocalRangeConfig, verbose: bool, json: bool) -> Result<()> {
    let tracker = track(input, config, ConsoleSink::new(verbose))?;
    let summary = tracker.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("Range:   {}", summary.text);
    if summary.has_data() {
        println!(
            "         {} - {}",
            summary.low_freq_label(),
            summary.high_freq_label()
        );
    }

    let history: Vec<String> = tracker.history().iter().map(|n| n.to_string()).collect();
    println!("Recent:  {}", history.join(" "));

    if let Some(best) = tracker.voice_matches().first() {
        println!(
            "Voice:   {} ({:.0}% of band covered)",
            best.voice.name(),
            best.coverage * 100.0
        );
    }

    if let Some(interval) = tracker.lock_interval() {
        if interval.is_empty() {
            println!("Lock:    no whole note inside the sung range");
        } else {
            println!(
                "Lock:    {} - {}",
                midi_to_name(*interval.notes().start()),
                midi_to_name(*interval.notes().end())
            );
        }
        println!("Keys:    {}", keyboard_strip(&tracker));
    }

    Ok(())
}

/// One character per key: `#` playable, `.` locked, `*` last sung
fn keyboard_strip(tracker: &SessionTracker) -> String {
    KeyboardLayout::default()
        .key_states(tracker)
        .iter()
        .map(|key| match (key.active, key.locked) {
            (true, _) => '*',
            (false, true) => '.',
            (false, false) => '#',
        })
        .collect()
}

fn render_tone(
    midi: i32,
    out: &Path,
    sample_rate: u32,
    within: Option<&Path>,
    config: &VocalRangeConfig,
) -> Result<()> {
    if sample_rate == 0 {
        bail!("Sample rate must be non-zero");
    }

    let preview = TonePreview::new(sample_rate);
    let samples = match within {
        Some(recording) => {
            let mut config = config.clone();
            config.lock_enabled = true;
            let tracker = track(recording, &config, ConsoleSink::new(false))?;
            match tracker.preview_tone(midi, &preview) {
                Some(samples) => samples,
                None => bail!(
                    "{} is outside the locked range ({})",
                    midi_to_name(midi),
                    tracker.summary().text
                ),
            }
        }
        None => preview.render(midi as f64),
    };

    wav::write_mono(out, &samples, sample_rate)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    println!(
        "Wrote {} ({}, {} samples @ {} Hz)",
        out.display(),
        midi_to_name(midi),
        samples.len(),
        sample_rate
    );
    Ok(())
}
