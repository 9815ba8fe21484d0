//! Pitch-class helpers over analysis results
//!
//! Tones are counted in equal-tempered semitones from A0 (27.5 Hz), so a
//! piano keyboard spans tones `0..88`.

use crate::spectrum::SpectrumQuery;

/// Frequency of A0 in Hz
pub const A0_HZ: f64 = 27.5;

/// Keys on a standard piano, A0 through C8
pub const PIANO_KEYS: usize = 88;

const TONE_NAMES: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// Fractional tone index of `freq` (A0 = 0)
pub fn freq_to_tone(freq: f64) -> f64 {
    (freq / A0_HZ).log2() * 12.0
}

/// Equal-tempered frequency of tone `tone`
pub fn tone_to_freq(tone: f64) -> f64 {
    A0_HZ * 2f64.powf(tone / 12.0)
}

/// Note name with octave number, e.g. `A0`, `C1`, `A4`
pub fn tone_name(tone: f64) -> String {
    let tone = tone.round() as i64;
    let octave = (tone + 9).div_euclid(12);
    let name = TONE_NAMES[tone.rem_euclid(12) as usize];
    format!("{}{}", name, octave)
}

/// Per pitch class sum of range peaks over the piano keyboard
///
/// Each key contributes the peak in the half-semitone window around it.
/// Empty windows contribute nothing.
///
/// # Returns
/// 12 values indexed from A (0) to G# (11)
pub fn chroma<Q: SpectrumQuery + ?Sized>(result: &Q) -> [f64; 12] {
    let mut classes = [0.0; 12];
    for tone in 0..PIANO_KEYS {
        let t = tone as f64;
        let peak = result.peak(tone_to_freq(t - 0.5), tone_to_freq(t + 0.5));
        if peak.is_found() {
            classes[tone % 12] += peak.value;
        }
    }
    classes
}

/// Pitch-class movement between two chroma vectors
///
/// `m[i][j]` is the energy lost by class `i` times the energy gained by
/// class `j`.
pub fn transition(before: &[f64; 12], after: &[f64; 12]) -> [[f64; 12]; 12] {
    let mut gain = [0.0; 12];
    let mut loss = [0.0; 12];
    for i in 0..12 {
        gain[i] = (after[i] - before[i]).max(0.0);
        loss[i] = (before[i] - after[i]).max(0.0);
    }

    let mut matrix = [[0.0; 12]; 12];
    for (i, row) in matrix.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = loss[i] * gain[j];
        }
    }
    matrix
}
