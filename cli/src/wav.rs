use beepcode_core::{normalize, RawSamples, SampleBuffer, SampleFormat};
use hound::WavSpec;
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// Write a buffer as mono 16-bit PCM
pub fn write_wav(path: &Path, buffer: &SampleBuffer) -> Result<(), Box<dyn Error>> {
    crate::ensure_parent_dir(path)?;

    let spec = WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let file = File::create(path)?;
    let mut writer = hound::WavWriter::new(file, spec)?;

    // Convert f32 samples to i16 range [-32767, 32767]
    for &sample in &buffer.samples {
        let clamped = sample.clamp(-1.0, 1.0);
        writer.write_sample((clamped * 32767.0) as i16)?;
    }
    writer.finalize()?;

    Ok(())
}

/// Read a WAV file into a normalized mono buffer (first channel only)
pub fn read_wav(path: &Path) -> Result<SampleBuffer, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut reader = hound::WavReader::new(file)?;

    let spec = reader.spec();
    log::info!(
        "Read WAV: {} Hz, {} channels, {} bits {:?}",
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
        spec.sample_format
    );

    let (raw, format) = match spec.sample_format {
        hound::SampleFormat::Int => {
            let samples: Result<Vec<i32>, _> = reader.samples::<i32>().collect();
            (
                RawSamples::Int(samples?),
                SampleFormat::Int {
                    bits: spec.bits_per_sample,
                },
            )
        }
        hound::SampleFormat::Float => {
            let samples: Result<Vec<f32>, _> = reader.samples::<f32>().collect();
            (
                RawSamples::Float(samples?),
                SampleFormat::Float {
                    bits: spec.bits_per_sample,
                },
            )
        }
    };

    let samples = normalize(&raw, format, spec.channels)?;
    log::info!("Extracted {} samples", samples.len());

    Ok(SampleBuffer::new(spec.sample_rate, samples))
}
