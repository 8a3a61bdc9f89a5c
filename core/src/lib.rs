//! Binary FSK audio codec
//!
//! Encodes bit sequences as a train of two fixed-frequency tones separated by
//! silence, and decodes such a train back into bits by estimating the dominant
//! frequency of each fixed-stride segment.

pub mod bits;
pub mod buffer;
pub mod config;
pub mod demodulator;
pub mod error;
pub mod modulator;
pub mod normalize;
pub mod observer;
pub mod spectrum;
pub mod tone;

pub use buffer::SampleBuffer;
pub use config::CodecParams;
pub use demodulator::{classify, Classification, DecodeReport, Demodulator};
pub use error::{CodecError, Result};
pub use modulator::Modulator;
pub use normalize::{normalize, RawSamples, SampleFormat};
pub use observer::{NoopObserver, Observer};
pub use spectrum::{dominant_frequency, FrequencyEstimate, FrequencyEstimator};

// Default codec configuration
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_FREQ_ZERO: f32 = 440.0; // Hz
pub const DEFAULT_FREQ_ONE: f32 = 880.0; // Hz
pub const DEFAULT_TONE_DURATION: f32 = 0.1; // seconds
pub const DEFAULT_SILENCE_DURATION: f32 = 0.05; // seconds
pub const DEFAULT_AMPLITUDE: f32 = 0.6;

// Decoding configuration
pub const DEFAULT_AMPLITUDE_THRESHOLD: f32 = 0.1;

/// Modulate `bits` with a one-off [`Modulator`] built from `params`.
pub fn modulate(bits: &[bool], params: &CodecParams) -> Result<SampleBuffer> {
    Ok(Modulator::new(params.clone())?.modulate(bits))
}

/// Demodulate `buffer` with a one-off [`Demodulator`] built from `params`.
pub fn demodulate(buffer: &SampleBuffer, params: &CodecParams) -> Result<DecodeReport> {
    Demodulator::new(params.clone())?.demodulate(buffer)
}
