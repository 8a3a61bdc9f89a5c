use crate::buffer::SampleBuffer;
use crate::config::CodecParams;
use crate::error::Result;
use crate::observer::{NoopObserver, Observer};
use crate::tone::{generate_silence, generate_tone};

/// Binary FSK modulator
///
/// Each bit becomes one tone at `freq_zero` or `freq_one`, and consecutive
/// tones are separated by a fixed silence gap. Nothing precedes the first tone
/// or follows the last one.
///
/// Both tones and the silence gap are synthesized once at construction and
/// copied for every bit, so the output is a pure function of the bits.
pub struct Modulator {
    params: CodecParams,
    tone_zero: Vec<f32>,
    tone_one: Vec<f32>,
    silence: Vec<f32>,
}

impl Modulator {
    pub fn new(params: CodecParams) -> Result<Self> {
        params.validate()?;

        let tone_zero = generate_tone(
            params.freq_zero,
            params.tone_duration,
            params.sample_rate,
            params.amplitude,
        );
        let tone_one = generate_tone(
            params.freq_one,
            params.tone_duration,
            params.sample_rate,
            params.amplitude,
        );
        let silence = generate_silence(params.silence_duration, params.sample_rate);

        Ok(Self {
            params,
            tone_zero,
            tone_one,
            silence,
        })
    }

    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    /// Number of samples `modulate` produces for `num_bits` bits
    pub fn output_len(&self, num_bits: usize) -> usize {
        match num_bits {
            0 => 0,
            n => n * self.tone_zero.len() + (n - 1) * self.silence.len(),
        }
    }

    /// Modulate a bit sequence into a contiguous sample buffer
    ///
    /// An empty bit sequence yields an empty buffer.
    pub fn modulate(&self, bits: &[bool]) -> SampleBuffer {
        self.modulate_with_observer(bits, &mut NoopObserver)
    }

    pub fn modulate_with_observer(&self, bits: &[bool], observer: &mut dyn Observer) -> SampleBuffer {
        let total = bits.len();
        let mut samples = Vec::with_capacity(self.output_len(total));

        for (i, &bit) in bits.iter().enumerate() {
            let tone = if bit { &self.tone_one } else { &self.tone_zero };
            samples.extend_from_slice(tone);

            if !self.silence.is_empty() && i + 1 < total {
                samples.extend_from_slice(&self.silence);
            }

            observer.on_bit_modulated(i + 1, total);
        }

        log::debug!(
            "Modulated {} bits into {} samples ({:.2}s)",
            total,
            samples.len(),
            samples.len() as f64 / self.params.sample_rate as f64
        );

        SampleBuffer::new(self.params.sample_rate, samples)
    }
}
