//! Conversion of native container samples into normalized `f32` mono audio

use crate::error::{CodecError, Result};

/// Native sample encoding of a decoded container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// Signed integer PCM (8, 16, 24 or 32 bits)
    Int { bits: u16 },
    /// Unsigned integer PCM (8 bits)
    UInt { bits: u16 },
    /// IEEE float (32 or 64 bits)
    Float { bits: u16 },
}

impl SampleFormat {
    /// Inclusive (min, max) representable by an integer format
    fn int_range(self) -> Result<(i64, i64)> {
        match self {
            SampleFormat::Int { bits } if matches!(bits, 8 | 16 | 24 | 32) => {
                let max = (1i64 << (bits - 1)) - 1;
                Ok((-max - 1, max))
            }
            SampleFormat::UInt { bits: 8 } => Ok((0, u8::MAX as i64)),
            other => Err(CodecError::UnsupportedFormat(format!("{:?}", other))),
        }
    }
}

/// Interleaved samples as read from a container
#[derive(Debug, Clone, PartialEq)]
pub enum RawSamples {
    /// Any integer format, widened to `i32`
    Int(Vec<i32>),
    /// Any float format, narrowed to `f32`
    Float(Vec<f32>),
}

impl RawSamples {
    pub fn len(&self) -> usize {
        match self {
            RawSamples::Int(samples) => samples.len(),
            RawSamples::Float(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalize raw container samples to mono `f32` in [-1, 1]
///
/// Integer formats are divided by the larger magnitude of the format's min and
/// max, so zero stays zero. Float formats pass through unchanged. Only channel
/// 0 of interleaved multi-channel input is kept.
pub fn normalize(raw: &RawSamples, format: SampleFormat, channels: u16) -> Result<Vec<f32>> {
    if channels == 0 {
        return Err(CodecError::UnsupportedFormat("zero channels".to_string()));
    }
    if channels > 1 {
        log::info!("{} channels detected, using channel 0 only", channels);
    }
    let stride = channels as usize;

    match (raw, format) {
        (RawSamples::Int(samples), SampleFormat::Int { .. } | SampleFormat::UInt { .. }) => {
            let (min, max) = format.int_range()?;
            if max == min {
                return Ok(vec![0.0; samples.len().div_ceil(stride)]);
            }
            let scale = max.abs().max(min.abs()) as f64;
            Ok(samples
                .iter()
                .step_by(stride)
                .map(|&s| (s as f64 / scale) as f32)
                .collect())
        }
        (RawSamples::Float(samples), SampleFormat::Float { bits: 32 | 64 }) => {
            log::debug!("Float samples detected, assuming already normalized");
            Ok(samples.iter().step_by(stride).copied().collect())
        }
        (RawSamples::Int(_), SampleFormat::Float { .. })
        | (RawSamples::Float(_), SampleFormat::Int { .. } | SampleFormat::UInt { .. }) => {
            Err(CodecError::UnsupportedFormat(format!(
                "{:?} does not match the sample data type",
                format
            )))
        }
        (_, format) => Err(CodecError::UnsupportedFormat(format!("{:?}", format))),
    }
}
