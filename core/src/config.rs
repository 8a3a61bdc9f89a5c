use crate::error::{CodecError, Result};
use crate::{
    DEFAULT_AMPLITUDE, DEFAULT_AMPLITUDE_THRESHOLD, DEFAULT_FREQ_ONE, DEFAULT_FREQ_ZERO,
    DEFAULT_SAMPLE_RATE, DEFAULT_SILENCE_DURATION, DEFAULT_TONE_DURATION,
};

/// Number of samples covering `duration` seconds at `sample_rate`, rounded to nearest.
///
/// Negative or non-finite durations map to zero samples.
pub fn duration_to_samples(duration: f32, sample_rate: u32) -> usize {
    let samples = (duration as f64 * sample_rate as f64).round();
    if samples.is_finite() && samples > 0.0 {
        samples as usize
    } else {
        0
    }
}

/// Timing and frequency contract shared by the modulator and the demodulator.
///
/// Encode-time and decode-time parameters must be identical; nothing in the
/// audio itself records them.
#[derive(Debug, Clone, PartialEq)]
pub struct CodecParams {
    /// Samples per second
    pub sample_rate: u32,
    /// Tone frequency for a 0 bit (Hz)
    pub freq_zero: f32,
    /// Tone frequency for a 1 bit (Hz)
    pub freq_one: f32,
    /// Length of each tone in seconds
    pub tone_duration: f32,
    /// Length of the gap between tones in seconds (may be zero)
    pub silence_duration: f32,
    /// Synthesis gain, in (0, 1]
    pub amplitude: f32,
    /// Peak level below which a segment counts as silence
    pub amplitude_threshold: f32,
    /// Frequency boundary between the 0 and 1 classes
    pub frequency_threshold: f32,
}

impl Default for CodecParams {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            freq_zero: DEFAULT_FREQ_ZERO,
            freq_one: DEFAULT_FREQ_ONE,
            tone_duration: DEFAULT_TONE_DURATION,
            silence_duration: DEFAULT_SILENCE_DURATION,
            amplitude: DEFAULT_AMPLITUDE,
            amplitude_threshold: DEFAULT_AMPLITUDE_THRESHOLD,
            frequency_threshold: (DEFAULT_FREQ_ZERO + DEFAULT_FREQ_ONE) / 2.0,
        }
    }
}

impl CodecParams {
    /// Replace both tone frequencies and reset the decision threshold to their midpoint.
    pub fn with_frequencies(mut self, freq_zero: f32, freq_one: f32) -> Self {
        self.freq_zero = freq_zero;
        self.freq_one = freq_one;
        self.frequency_threshold = (freq_zero + freq_one) / 2.0;
        self
    }

    pub fn tone_samples(&self) -> usize {
        duration_to_samples(self.tone_duration, self.sample_rate)
    }

    pub fn silence_samples(&self) -> usize {
        duration_to_samples(self.silence_duration, self.sample_rate)
    }

    /// Decode stride: one tone plus the silence that follows it
    pub fn cycle_samples(&self) -> usize {
        self.tone_samples() + self.silence_samples()
    }

    /// Width of one FFT bin over a tone-length segment (Hz)
    pub fn resolution_hz(&self) -> f32 {
        match self.tone_samples() {
            0 => f32::INFINITY,
            n => self.sample_rate as f32 / n as f32,
        }
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(invalid("sample rate must be positive"));
        }

        if !self.tone_duration.is_finite() || self.tone_duration <= 0.0 {
            return Err(invalid(format!(
                "tone duration must be positive, got {}",
                self.tone_duration
            )));
        }
        if self.tone_samples() == 0 {
            return Err(invalid(format!(
                "tone duration {}s is shorter than one sample at {} Hz",
                self.tone_duration, self.sample_rate
            )));
        }

        if !self.silence_duration.is_finite() || self.silence_duration < 0.0 {
            return Err(invalid(format!(
                "silence duration must be zero or positive, got {}",
                self.silence_duration
            )));
        }

        let nyquist = self.sample_rate as f32 / 2.0;
        for (name, freq) in [("zero", self.freq_zero), ("one", self.freq_one)] {
            if !freq.is_finite() || freq <= 0.0 {
                return Err(invalid(format!(
                    "frequency for {} must be positive, got {}",
                    name, freq
                )));
            }
            if freq >= nyquist {
                return Err(invalid(format!(
                    "frequency for {} ({} Hz) must be below Nyquist ({} Hz)",
                    name, freq, nyquist
                )));
            }
        }

        if self.freq_zero == self.freq_one {
            return Err(invalid("frequencies for zero and one must differ"));
        }
        if self.freq_zero > self.freq_one {
            return Err(invalid(format!(
                "frequency for zero ({} Hz) must be below frequency for one ({} Hz)",
                self.freq_zero, self.freq_one
            )));
        }

        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(invalid(format!(
                "amplitude must be in (0, 1], got {}",
                self.amplitude
            )));
        }

        if !self.amplitude_threshold.is_finite() || self.amplitude_threshold < 0.0 {
            return Err(invalid(format!(
                "amplitude threshold must be zero or positive, got {}",
                self.amplitude_threshold
            )));
        }

        if !self.frequency_threshold.is_finite() {
            return Err(invalid("frequency threshold must be finite"));
        }

        let resolution = self.resolution_hz();
        if self.freq_one - self.freq_zero < 2.0 * resolution {
            log::warn!(
                "tone separation {:.1} Hz spans fewer than two {:.1} Hz bins; decoding may be unreliable",
                self.freq_one - self.freq_zero,
                resolution
            );
        }

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> CodecError {
    CodecError::InvalidConfig(msg.into())
}
