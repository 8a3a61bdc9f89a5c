//! Dominant-frequency estimation for a single tone segment
//!
//! The estimate is the center frequency of the strongest positive-frequency
//! FFT bin, so its resolution is `sample_rate / segment.len()` Hz. Tone
//! frequencies must sit several bins apart for a reliable decision.

use realfft::RealFftPlanner;

/// Outcome of analyzing one segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrequencyEstimate {
    /// Frequency of the strongest bin (Hz)
    Frequency(f32),
    /// Peak amplitude below the silence threshold
    Silence,
    /// Too few samples or a numerical failure
    Indeterminate,
}

/// FFT-based dominant frequency estimator
///
/// Holds an FFT planner so repeated segments of the same length reuse one plan.
pub struct FrequencyEstimator {
    sample_rate: u32,
    amplitude_threshold: f32,
    planner: RealFftPlanner<f32>,
}

impl FrequencyEstimator {
    pub fn new(sample_rate: u32, amplitude_threshold: f32) -> Self {
        Self {
            sample_rate,
            amplitude_threshold,
            planner: RealFftPlanner::new(),
        }
    }

    pub fn estimate(&mut self, segment: &[f32]) -> FrequencyEstimate {
        let peak = segment.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
        if peak < self.amplitude_threshold {
            return FrequencyEstimate::Silence;
        }

        let n = segment.len();
        if n < 2 {
            return FrequencyEstimate::Indeterminate;
        }

        let r2c = self.planner.plan_fft_forward(n);
        let mut input = segment.to_vec();
        let mut spectrum = r2c.make_output_vec();
        if let Err(e) = r2c.process(&mut input, &mut spectrum) {
            log::debug!("FFT failed on {}-sample segment: {:?}", n, e);
            return FrequencyEstimate::Indeterminate;
        }

        // Positive frequencies only, skipping DC and the Nyquist bin
        let mut best: Option<(usize, f32)> = None;
        for (k, value) in spectrum.iter().enumerate().take(n / 2).skip(1) {
            let magnitude = value.norm();
            if !magnitude.is_finite() {
                log::debug!("Non-finite magnitude at bin {}", k);
                return FrequencyEstimate::Indeterminate;
            }
            if best.map_or(true, |(_, m)| magnitude > m) {
                best = Some((k, magnitude));
            }
        }

        // Anything at or below FFT rounding noise means no tone outside DC
        let noise_floor = f32::EPSILON * n as f32 * peak;
        match best {
            Some((k, magnitude)) if magnitude > noise_floor => {
                FrequencyEstimate::Frequency((k as f64 * self.sample_rate as f64 / n as f64) as f32)
            }
            Some((k, magnitude)) => {
                log::debug!(
                    "Flat spectrum: strongest bin {} at {:e} is within rounding noise",
                    k,
                    magnitude
                );
                FrequencyEstimate::Indeterminate
            }
            None => FrequencyEstimate::Indeterminate,
        }
    }
}

/// One-shot estimate with a fresh planner
pub fn dominant_frequency(segment: &[f32], sample_rate: u32, amplitude_threshold: f32) -> FrequencyEstimate {
    FrequencyEstimator::new(sample_rate, amplitude_threshold).estimate(segment)
}
