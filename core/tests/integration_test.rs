use beepcode_core::bits::{bits_to_bytes, bytes_to_bits};
use beepcode_core::{
    demodulate, modulate, normalize, CodecError, CodecParams, Demodulator, Modulator,
    RawSamples, SampleBuffer, SampleFormat,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Short tones keep the tests fast while staying bin-aligned: 400 samples at
/// 8 kHz gives 20 Hz bins, and both tones sit exactly on a bin.
fn fast_params() -> CodecParams {
    CodecParams {
        sample_rate: 8000,
        tone_duration: 0.05,
        silence_duration: 0.02,
        ..CodecParams::default()
    }
    .with_frequencies(1000.0, 2000.0)
}

#[test]
fn test_concrete_scenario() {
    init_logger();
    let params = CodecParams::default();
    let bits = [false, true];

    let buffer = modulate(&bits, &params).expect("Failed to modulate");
    assert_eq!(buffer.len(), 4410 + 2205 + 4410);
    assert_eq!(buffer.sample_rate, 44100);

    let report = demodulate(&buffer, &params).expect("Failed to demodulate");
    assert_eq!(report.bits, bits);
    assert_eq!(report.cycles, 2);
    assert_eq!(report.dropped(), 0);
}

#[test]
fn test_text_round_trip() {
    init_logger();
    let params = CodecParams::default();
    let original = "Hello, 世界!";

    let bits = bytes_to_bits(original.as_bytes());
    let buffer = modulate(&bits, &params).expect("Failed to modulate");
    let report = demodulate(&buffer, &params).expect("Failed to demodulate");

    assert_eq!(report.bits, bits);
    assert_eq!(report.dropped(), 0);
    let decoded = String::from_utf8(bits_to_bytes(&report.bits)).expect("Invalid UTF-8");
    assert_eq!(decoded, original);
}

#[test]
fn test_binary_round_trip() {
    let params = fast_params();
    let data: Vec<u8> = vec![0, 1, 2, 255, 128, 64, 32, 16, 8, 4, 2, 1, 0, 0xAA, 0x55];

    let modulator = Modulator::new(params.clone()).unwrap();
    let mut demodulator = Demodulator::new(params).unwrap();

    let bits = bytes_to_bits(&data);
    let report = demodulator.demodulate(&modulator.modulate(&bits)).unwrap();
    assert_eq!(bits_to_bytes(&report.bits), data);
}

#[test]
fn test_round_trip_without_silence() {
    let params = CodecParams {
        silence_duration: 0.0,
        ..fast_params()
    };
    let bits = bytes_to_bits(b"no gaps");

    let buffer = modulate(&bits, &params).unwrap();
    assert_eq!(buffer.len(), bits.len() * params.tone_samples());

    let report = demodulate(&buffer, &params).unwrap();
    assert_eq!(report.bits, bits);
}

#[test]
fn test_empty_input() {
    let params = CodecParams::default();

    let buffer = modulate(&[], &params).unwrap();
    assert!(buffer.is_empty());

    let report = demodulate(&buffer, &params).unwrap();
    assert!(report.is_empty());
    assert!(!report.is_degenerate());
    assert_eq!(report.cycles, 0);
}

#[test]
fn test_modulate_deterministic() {
    let params = CodecParams::default();
    let bits = bytes_to_bits(b"Deterministic test");

    let samples1 = modulate(&bits, &params).unwrap();
    let samples2 = modulate(&bits, &params).unwrap();
    assert_eq!(samples1.len(), samples2.len());
    for (i, (s1, s2)) in samples1.samples.iter().zip(samples2.samples.iter()).enumerate() {
        assert_eq!(s1.to_bits(), s2.to_bits(), "Mismatch at sample {}", i);
    }
}

#[test]
fn test_rate_mismatch() {
    let params = CodecParams::default();
    let buffer = modulate(&[true, false], &params).unwrap();

    for rate in [8000, 22050, 48000] {
        let relabeled = SampleBuffer::new(rate, buffer.samples.clone());
        let result = demodulate(&relabeled, &params);
        assert!(
            matches!(result, Err(CodecError::SampleRateMismatch { expected: 44100, actual }) if actual == rate),
            "rate {} not rejected",
            rate
        );
    }
}

#[test]
fn test_invalid_config_rejected() {
    let params = CodecParams::default().with_frequencies(500.0, 500.0);
    assert!(matches!(modulate(&[true], &params), Err(CodecError::InvalidConfig(_))));
    assert!(matches!(
        demodulate(&SampleBuffer::empty(44100), &params),
        Err(CodecError::InvalidConfig(_))
    ));
}

#[test]
fn test_partial_trailing_data() {
    let params = CodecParams::default();
    let buffer = SampleBuffer::new(44100, vec![0.5; params.tone_samples() - 1]);
    let report = demodulate(&buffer, &params).unwrap();
    assert!(report.bits.is_empty());
    assert_eq!(report.cycles, 0);
}

#[test]
fn test_trailing_partial_cycle_ignored() {
    let params = fast_params();
    let bits = [true, false, true];
    let mut buffer = modulate(&bits, &params).unwrap();

    // Half a tone of garbage after the last full window
    buffer.samples.extend(std::iter::repeat(0.9).take(params.tone_samples() / 2));
    let report = demodulate(&buffer, &params).unwrap();
    assert_eq!(report.bits, bits);
    assert_eq!(report.cycles, 3);
}

#[test]
fn test_quiet_cycle_dropped_not_misclassified() {
    let params = fast_params();
    let bits = [false, true, true, false];
    let mut buffer = modulate(&bits, &params).unwrap();

    // Replace the second tone with low-level noise under the silence threshold
    let cycle = params.cycle_samples();
    let tone = params.tone_samples();
    let mut rng = StdRng::seed_from_u64(7);
    let noise = Normal::new(0.0f32, 0.01).unwrap();
    for s in &mut buffer.samples[cycle..cycle + tone] {
        *s = noise.sample(&mut rng).clamp(-0.05, 0.05);
    }

    let report = demodulate(&buffer, &params).unwrap();
    assert_eq!(report.bits, vec![false, true, false]);
    assert_eq!(report.silent, 1);
    assert_eq!(report.dropped(), 1);
}

#[test]
fn test_round_trip_with_noise() {
    init_logger();
    let params = fast_params();
    let bits = bytes_to_bits(b"noisy channel");
    let mut buffer = modulate(&bits, &params).unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(0.0f32, 0.1).unwrap();
    for s in buffer.samples.iter_mut() {
        *s += noise.sample(&mut rng);
    }

    let report = demodulate(&buffer, &params).unwrap();
    assert_eq!(report.bits, bits);
}

#[test]
fn test_round_trip_with_gain_change() {
    let params = fast_params();
    let bits = bytes_to_bits(b"gain");
    let mut buffer = modulate(&bits, &params).unwrap();
    for s in buffer.samples.iter_mut() {
        *s *= 0.3;
    }

    let report = demodulate(&buffer, &params).unwrap();
    assert_eq!(report.bits, bits);
}

#[test]
fn test_round_trip_through_int16_pcm() {
    let params = CodecParams::default();
    let bits = bytes_to_bits(b"pcm");
    let buffer = modulate(&bits, &params).unwrap();

    // Quantize the way a 16-bit WAV writer would
    let pcm: Vec<i32> = buffer
        .samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16 as i32)
        .collect();
    let normalized = normalize(&RawSamples::Int(pcm), SampleFormat::Int { bits: 16 }, 1).unwrap();

    let report = demodulate(&SampleBuffer::new(params.sample_rate, normalized), &params).unwrap();
    assert_eq!(report.bits, bits);
}

#[test]
fn test_uint8_blanked_cycle_dropped() {
    let params = fast_params();
    let bits = [false, true, true];
    let buffer = modulate(&bits, &params).unwrap();

    // Unsigned 8-bit PCM sits at 128 when idle
    let mut pcm: Vec<i32> = buffer
        .samples
        .iter()
        .map(|&s| 128 + (s.clamp(-1.0, 1.0) * 127.0).round() as i32)
        .collect();
    let cycle = params.cycle_samples();
    for s in &mut pcm[cycle..cycle + params.tone_samples()] {
        *s = 128;
    }

    let normalized = normalize(&RawSamples::Int(pcm), SampleFormat::UInt { bits: 8 }, 1).unwrap();
    let report = demodulate(&SampleBuffer::new(params.sample_rate, normalized), &params).unwrap();
    assert_eq!(report.bits, vec![false, true]);
    assert_eq!(report.cycles, 3);
    assert_eq!(report.indeterminate, 1);
    assert_eq!(report.dropped(), 1);
}

#[test]
fn test_round_trip_first_channel_of_stereo() {
    let params = fast_params();
    let bits = bytes_to_bits(b"L");
    let left = modulate(&bits, &params).unwrap();

    // Right channel carries the inverted payload and must be ignored
    let inverted: Vec<bool> = bits.iter().map(|b| !b).collect();
    let right = modulate(&inverted, &params).unwrap();

    let interleaved: Vec<f32> = left
        .samples
        .iter()
        .zip(right.samples.iter())
        .flat_map(|(&l, &r)| [l, r])
        .collect();
    let mono = normalize(
        &RawSamples::Float(interleaved),
        SampleFormat::Float { bits: 32 },
        2,
    )
    .unwrap();

    let report = demodulate(&SampleBuffer::new(params.sample_rate, mono), &params).unwrap();
    assert_eq!(report.bits, bits);
}

#[test]
fn test_silence_drift_misaligns() {
    // Fixed-stride framing: audio written with longer gaps than configured
    // is not re-synchronized and loses bits
    let encode_params = CodecParams {
        silence_duration: 0.05,
        ..fast_params()
    };
    let decode_params = fast_params();
    let bits = bytes_to_bits(b"drift");

    let buffer = modulate(&bits, &encode_params).unwrap();
    let report = demodulate(&buffer, &decode_params).unwrap();
    assert_ne!(report.bits, bits);
}
