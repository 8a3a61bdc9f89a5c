use crate::buffer::SampleBuffer;
use crate::config::CodecParams;
use crate::error::{CodecError, Result};
use crate::observer::{NoopObserver, Observer};
use crate::spectrum::{FrequencyEstimate, FrequencyEstimator};

/// Decision for one tone window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    Bit(bool),
    /// Window peak below the amplitude threshold
    Silence,
    /// Frequency not clearly on either side of the decision boundary
    Ambiguous(f32),
    /// No usable spectral estimate
    Indeterminate,
}

/// Map a frequency estimate to a bit
///
/// A bit is emitted only when the frequency is strictly closer to one tone
/// and lies strictly on that tone's side of `frequency_threshold`.
pub fn classify(estimate: FrequencyEstimate, params: &CodecParams) -> Classification {
    let f = match estimate {
        FrequencyEstimate::Frequency(f) => f,
        FrequencyEstimate::Silence => return Classification::Silence,
        FrequencyEstimate::Indeterminate => return Classification::Indeterminate,
    };

    let dist_to_zero = (f - params.freq_zero).abs();
    let dist_to_one = (f - params.freq_one).abs();

    if dist_to_zero < dist_to_one && f < params.frequency_threshold {
        Classification::Bit(false)
    } else if dist_to_one < dist_to_zero && f > params.frequency_threshold {
        Classification::Bit(true)
    } else {
        Classification::Ambiguous(f)
    }
}

/// Result of a demodulation run
///
/// Dropped cycles leave no placeholder in `bits`, so `bits.len()` is
/// `cycles - dropped()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeReport {
    pub bits: Vec<bool>,
    /// Tone windows analyzed
    pub cycles: usize,
    pub silent: usize,
    pub ambiguous: usize,
    pub indeterminate: usize,
}

impl DecodeReport {
    /// Cycles that produced no bit
    pub fn dropped(&self) -> usize {
        self.silent + self.ambiguous + self.indeterminate
    }

    /// Nothing was decoded
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Cycles were analyzed but none yielded a bit
    pub fn is_degenerate(&self) -> bool {
        self.bits.is_empty() && self.cycles > 0
    }
}

/// Fixed-stride binary FSK demodulator
///
/// Windows of `tone_samples` are taken every `cycle_samples`, starting at
/// sample 0. The silence length is never measured: if the audio's gaps differ
/// from `silence_duration`, the windows drift out of alignment.
pub struct Demodulator {
    params: CodecParams,
    estimator: FrequencyEstimator,
}

impl Demodulator {
    pub fn new(params: CodecParams) -> Result<Self> {
        params.validate()?;
        let estimator = FrequencyEstimator::new(params.sample_rate, params.amplitude_threshold);
        Ok(Self { params, estimator })
    }

    pub fn params(&self) -> &CodecParams {
        &self.params
    }

    /// Decode a normalized buffer into bits
    ///
    /// Fails only on a sample rate mismatch. Silent and ambiguous cycles are
    /// counted in the report and skipped; a trailing window shorter than one
    /// tone is ignored.
    pub fn demodulate(&mut self, buffer: &SampleBuffer) -> Result<DecodeReport> {
        self.demodulate_with_observer(buffer, &mut NoopObserver)
    }

    pub fn demodulate_with_observer(
        &mut self,
        buffer: &SampleBuffer,
        observer: &mut dyn Observer,
    ) -> Result<DecodeReport> {
        if buffer.sample_rate != self.params.sample_rate {
            return Err(CodecError::SampleRateMismatch {
                expected: self.params.sample_rate,
                actual: buffer.sample_rate,
            });
        }

        let tone_samples = self.params.tone_samples();
        let cycle_samples = self.params.cycle_samples();
        let samples = &buffer.samples;

        log::debug!(
            "Demodulating {:.2}s of audio: tone={} silence={} cycle={} samples",
            buffer.duration_secs(),
            tone_samples,
            self.params.silence_samples(),
            cycle_samples
        );

        let mut report = DecodeReport::default();
        let mut pos = 0;

        while pos + tone_samples <= samples.len() {
            let window = &samples[pos..pos + tone_samples];
            let classification = classify(self.estimator.estimate(window), &self.params);

            match classification {
                Classification::Bit(bit) => report.bits.push(bit),
                Classification::Silence => report.silent += 1,
                Classification::Ambiguous(f) => {
                    log::trace!("Cycle {}: ambiguous frequency {:.1} Hz", report.cycles, f);
                    report.ambiguous += 1;
                }
                Classification::Indeterminate => report.indeterminate += 1,
            }

            observer.on_cycle_analyzed(report.cycles, &classification);
            report.cycles += 1;
            pos += cycle_samples;
        }

        log::debug!(
            "Analyzed {} cycles, decoded {} bits, dropped {} ({} silent, {} ambiguous, {} indeterminate)",
            report.cycles,
            report.bits.len(),
            report.dropped(),
            report.silent,
            report.ambiguous,
            report.indeterminate
        );

        if report.is_degenerate() {
            log::warn!(
                "Analyzed {} cycles but decoded no bits; check audio level and amplitude threshold",
                report.cycles
            );
        }

        Ok(report)
    }
}
