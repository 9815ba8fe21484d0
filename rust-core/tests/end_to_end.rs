use octave_spectrum::spectrum::fft::{forward_fft, inverse_fft};
use octave_spectrum::tonal::{chroma, freq_to_tone};
use octave_spectrum::{
    AnalyzerConfig, InterpolationMode, MultiBandAnalyzer, SampleBuffer, SingleBandAnalyzer,
    SpectrumQuery,
};
use std::f64::consts::PI;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sine(freq_hz: f64, sample_rate: f64, len: usize) -> SampleBuffer {
    let samples: Vec<f64> = (0..len)
        .map(|n| (2.0 * PI * freq_hz * n as f64 / sample_rate).sin())
        .collect();
    SampleBuffer::new(samples, sample_rate).unwrap()
}

#[test]
fn single_band_finds_440() {
    init_logging();
    let analyzer = SingleBandAnalyzer::new(sine(440.0, 44100.0, 1024));
    let result = analyzer.analyse_at(0.0, 1024).unwrap();

    let peak = result.peak(400.0, 500.0);
    assert!(peak.value > 0.0);
    assert!((peak.frequency - 440.0).abs() <= result.frequency_resolution());
}

#[test]
fn composite_routes_6000_hz_to_band_1() {
    init_logging();
    let analyzer = MultiBandAnalyzer::new(sine(440.0, 44100.0, 8192), 3).unwrap();
    let result = analyzer.analyse_at(80.0, 256).unwrap();

    assert_eq!(result.band_for(6000.0), 1);
    assert_eq!(
        result.value(6000.0, InterpolationMode::Linear),
        result.bands()[1].value(6000.0, InterpolationMode::Linear)
    );
}

#[test]
fn default_config_pipeline() {
    init_logging();
    let config = AnalyzerConfig::default();
    let analyzer = MultiBandAnalyzer::from_config(sine(880.0, 48000.0, 96_000), &config).unwrap();
    let result = analyzer.analyse_with(1000.0, &config).unwrap();

    assert_eq!(result.band_count(), 8);

    // A5 should dominate the A pitch class
    let classes = chroma(&result);
    assert!((freq_to_tone(880.0) - 60.0).abs() < 1e-9);
    let a = classes[0];
    assert!(classes.iter().skip(1).all(|&v| v < a));

    let value = result.value(880.0, config.mode);
    assert!(value > 0.0);
}

#[test]
fn inverse_round_trip_on_frame() {
    let buffer = sine(1000.0, 44100.0, 4096);
    let frame = buffer.frame_at(2048, 512);
    let (re, im) = forward_fft(&frame, None).unwrap();
    let (back, _) = inverse_fft(&re, &im).unwrap();

    for (a, b) in frame.iter().zip(&back) {
        assert!((a - b).abs() < 1e-9);
    }
}
