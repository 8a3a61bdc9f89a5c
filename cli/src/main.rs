mod wav;

use beepcode_core::bits::{bits_to_bytes, bytes_to_bits, format_bit_string, parse_bit_string, trailing_bits};
use beepcode_core::{
    Classification, CodecParams, Demodulator, Modulator, Observer, DEFAULT_AMPLITUDE,
    DEFAULT_AMPLITUDE_THRESHOLD, DEFAULT_FREQ_ONE, DEFAULT_FREQ_ZERO, DEFAULT_SAMPLE_RATE,
    DEFAULT_SILENCE_DURATION, DEFAULT_TONE_DURATION,
};
use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};

/// Report modulation progress every this many bits
const BIT_PROGRESS_INTERVAL: usize = 100;
/// Report demodulation progress every this many cycles
const CYCLE_PROGRESS_INTERVAL: usize = 50;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no binary digits ('0' or '1') found in {}", .0.display())]
    NoBinaryDigits(PathBuf),
}

#[derive(Parser)]
#[command(name = "beepcode")]
#[command(about = "Encode text as beep/boop FSK audio and decode it back")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a text file to WAV audio
    Encode {
        /// Input text file (UTF-8)
        #[arg(value_name = "INPUT.TXT")]
        input: PathBuf,

        /// Output WAV file
        #[arg(value_name = "OUTPUT.WAV")]
        output: PathBuf,

        /// Also save the bit string (default path: <OUTPUT>.bin.txt)
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        save_bits: Option<Option<PathBuf>>,

        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Decode a WAV file back to text
    Decode {
        /// Input WAV file
        #[arg(value_name = "INPUT.WAV")]
        input: PathBuf,

        /// Optional file to save the decoded output
        #[arg(value_name = "OUTPUT.TXT")]
        output: Option<PathBuf>,

        /// Output the decoded bit string instead of text
        #[arg(long)]
        bits_only: bool,

        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Convert a text file to its bit string (8 digits per byte, space separated)
    TextToBits {
        #[arg(value_name = "INPUT.TXT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT.TXT")]
        output: PathBuf,
    },

    /// Encode a bit string file to WAV audio (characters other than 0/1 are ignored)
    BitsToAudio {
        #[arg(value_name = "INPUT.TXT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT.WAV")]
        output: PathBuf,

        #[command(flatten)]
        codec: CodecArgs,
    },
}

/// Codec parameters; encoder and decoder must use the same values
#[derive(Args, Debug, Clone)]
struct CodecArgs {
    /// Sample rate in Hz
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Tone frequency for 0 bits in Hz
    #[arg(long, default_value_t = DEFAULT_FREQ_ZERO)]
    freq_zero: f32,

    /// Tone frequency for 1 bits in Hz
    #[arg(long, default_value_t = DEFAULT_FREQ_ONE)]
    freq_one: f32,

    /// Duration of each tone in seconds
    #[arg(long, default_value_t = DEFAULT_TONE_DURATION)]
    tone_duration: f32,

    /// Silence between tones in seconds
    #[arg(long, default_value_t = DEFAULT_SILENCE_DURATION)]
    silence_duration: f32,

    /// Tone amplitude (0, 1]
    #[arg(long, default_value_t = DEFAULT_AMPLITUDE)]
    amplitude: f32,

    /// Peak level below which a segment is treated as silence
    #[arg(long, default_value_t = DEFAULT_AMPLITUDE_THRESHOLD)]
    amplitude_threshold: f32,

    /// Decision boundary in Hz (default: midpoint of the two tones)
    #[arg(long)]
    frequency_threshold: Option<f32>,
}

impl CodecArgs {
    fn to_params(&self) -> CodecParams {
        let params = CodecParams {
            sample_rate: self.sample_rate,
            tone_duration: self.tone_duration,
            silence_duration: self.silence_duration,
            amplitude: self.amplitude,
            amplitude_threshold: self.amplitude_threshold,
            ..CodecParams::default()
        }
        .with_frequencies(self.freq_zero, self.freq_one);

        match self.frequency_threshold {
            Some(frequency_threshold) => CodecParams {
                frequency_threshold,
                ..params
            },
            None => params,
        }
    }
}

/// Logs progress at fixed intervals
struct LogProgress;

impl Observer for LogProgress {
    fn on_bit_modulated(&mut self, done: usize, total: usize) {
        if done % BIT_PROGRESS_INTERVAL == 0 || done == total {
            log::info!("Generating: {}/{} bits", done, total);
        }
    }

    fn on_cycle_analyzed(&mut self, index: usize, classification: &Classification) {
        if let Classification::Ambiguous(f) = classification {
            log::debug!("Cycle {}: ambiguous frequency {:.1} Hz, skipped", index, f);
        }
        if (index + 1) % CYCLE_PROGRESS_INTERVAL == 0 {
            log::info!("Decoding: analyzed {} cycles", index + 1);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            save_bits,
            codec,
        } => encode_command(&input, &output, save_bits, &codec.to_params())?,
        Commands::Decode {
            input,
            output,
            bits_only,
            codec,
        } => decode_command(&input, output.as_deref(), bits_only, &codec.to_params())?,
        Commands::TextToBits { input, output } => text_to_bits_command(&input, &output)?,
        Commands::BitsToAudio {
            input,
            output,
            codec,
        } => bits_to_audio_command(&input, &output, &codec.to_params())?,
    }

    Ok(())
}

fn encode_command(
    input_path: &Path,
    output_path: &Path,
    save_bits: Option<Option<PathBuf>>,
    params: &CodecParams,
) -> Result<(), Box<dyn Error>> {
    let text = std::fs::read_to_string(input_path)?;
    println!("Read {} bytes from {}", text.len(), input_path.display());
    if text.trim().is_empty() {
        log::warn!("Input file {} is empty or whitespace only", input_path.display());
    }

    let bits = bytes_to_bits(text.as_bytes());

    if let Some(bits_path) = save_bits {
        let bits_path = bits_path.unwrap_or_else(|| output_path.with_extension("bin.txt"));
        write_text(&bits_path, &format_bit_string(&bits, true))?;
        println!("Wrote bit string to {}", bits_path.display());
    }

    modulate_to_wav(&bits, output_path, params)
}

fn text_to_bits_command(input_path: &Path, output_path: &Path) -> Result<(), Box<dyn Error>> {
    let text = std::fs::read_to_string(input_path)?;
    if text.is_empty() {
        log::warn!("Input file {} is empty", input_path.display());
    }

    let bits = bytes_to_bits(text.as_bytes());
    write_text(output_path, &format_bit_string(&bits, true))?;
    println!(
        "Converted {} bytes to {} bits in {}",
        text.len(),
        bits.len(),
        output_path.display()
    );
    Ok(())
}

fn bits_to_audio_command(
    input_path: &Path,
    output_path: &Path,
    params: &CodecParams,
) -> Result<(), Box<dyn Error>> {
    let bits = parse_bit_string(&std::fs::read_to_string(input_path)?);
    if bits.is_empty() {
        return Err(CliError::NoBinaryDigits(input_path.to_path_buf()).into());
    }
    println!("Read {} bits from {}", bits.len(), input_path.display());

    modulate_to_wav(&bits, output_path, params)
}

fn modulate_to_wav(bits: &[bool], output_path: &Path, params: &CodecParams) -> Result<(), Box<dyn Error>> {
    let modulator = Modulator::new(params.clone())?;
    log::info!(
        "Tones: 0 = {} Hz, 1 = {} Hz at {} Hz",
        modulator.params().freq_zero,
        modulator.params().freq_one,
        modulator.params().sample_rate
    );
    let buffer = modulator.modulate_with_observer(bits, &mut LogProgress);
    println!(
        "Encoded {} bits to {} audio samples ({:.2}s)",
        bits.len(),
        buffer.len(),
        buffer.duration_secs()
    );

    wav::write_wav(output_path, &buffer)?;
    println!("Wrote {}", output_path.display());
    Ok(())
}

fn decode_command(
    input_path: &Path,
    output_path: Option<&Path>,
    bits_only: bool,
    params: &CodecParams,
) -> Result<(), Box<dyn Error>> {
    let buffer = wav::read_wav(input_path)?;
    log::info!("Audio length: {:.2}s", buffer.duration_secs());

    let mut demodulator = Demodulator::new(params.clone())?;
    log::info!(
        "Decision threshold {} Hz, silence below {}",
        demodulator.params().frequency_threshold,
        demodulator.params().amplitude_threshold
    );
    let report = demodulator.demodulate_with_observer(&buffer, &mut LogProgress)?;
    println!(
        "Analyzed {} cycles, decoded {} bits, skipped {} uncertain or silent cycles",
        report.cycles,
        report.bits.len(),
        report.dropped()
    );

    let result = if bits_only {
        format_bit_string(&report.bits, true)
    } else if report.is_empty() {
        log::warn!("No bits decoded; producing empty text");
        String::new()
    } else {
        if trailing_bits(report.bits.len()) != 0 {
            log::warn!("Some cycles were lost; the decoded text may be misaligned");
        }
        String::from_utf8_lossy(&bits_to_bytes(&report.bits)).into_owned()
    };

    println!("{} START {}", "=".repeat(20), "=".repeat(20));
    println!("{}", result);
    println!("{} END {}", "=".repeat(21), "=".repeat(21));

    if let Some(path) = output_path {
        write_text(path, &result)?;
        println!("Saved decoded output to {}", path.display());
    }

    Ok(())
}

fn write_text(path: &Path, content: &str) -> Result<(), Box<dyn Error>> {
    ensure_parent_dir(path)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Create the parent directory of `path` if it does not exist yet
fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            log::info!("Creating output directory {}", dir.display());
            std::fs::create_dir_all(dir)
        }
        _ => Ok(()),
    }
}
