use crate::config::duration_to_samples;
use std::f32::consts::PI;

/// Generate `amplitude * sin(2π·frequency·t)` sampled at `t = i / sample_rate`
///
/// Produces `round(duration * sample_rate)` samples, starting at phase zero.
pub fn generate_tone(frequency: f32, duration: f32, sample_rate: u32, amplitude: f32) -> Vec<f32> {
    let num_samples = duration_to_samples(duration, sample_rate);
    let angular_freq = 2.0 * PI * frequency / sample_rate as f32;

    (0..num_samples)
        .map(|i| amplitude * (angular_freq * i as f32).sin())
        .collect()
}

/// Generate `round(duration * sample_rate)` zero samples
pub fn generate_silence(duration: f32, sample_rate: u32) -> Vec<f32> {
    vec![0.0; duration_to_samples(duration, sample_rate)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_length() {
        assert_eq!(generate_tone(440.0, 0.1, 44100, 0.6).len(), 4410);
        assert_eq!(generate_tone(440.0, 0.05, 8000, 0.6).len(), 400);
    }

    #[test]
    fn test_tone_starts_at_zero_phase() {
        let tone = generate_tone(440.0, 0.1, 44100, 0.6);
        assert_eq!(tone[0], 0.0);
    }

    #[test]
    fn test_tone_peak_matches_amplitude() {
        let tone = generate_tone(440.0, 0.1, 44100, 0.6);
        let peak = tone.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
        assert!(peak <= 0.6 + 1e-6);
        assert!(peak > 0.59, "peak={}", peak);
    }

    #[test]
    fn test_tone_quarter_period() {
        // 1 kHz at 8 kHz: sample 2 sits a quarter period in
        let tone = generate_tone(1000.0, 0.01, 8000, 1.0);
        assert!((tone[2] - 1.0).abs() < 1e-5);
        assert!((tone[6] + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_non_positive_duration_is_empty() {
        assert!(generate_tone(440.0, 0.0, 44100, 0.6).is_empty());
        assert!(generate_tone(440.0, -1.0, 44100, 0.6).is_empty());
    }

    #[test]
    fn test_silence() {
        let silence = generate_silence(0.05, 44100);
        assert_eq!(silence.len(), 2205);
        assert!(silence.iter().all(|&s| s == 0.0));
        assert!(generate_silence(0.0, 44100).is_empty());
    }
}
