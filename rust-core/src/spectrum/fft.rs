//! FFT primitives over parallel real/imaginary slices
//!
//! Stateless: every function takes its input by reference and returns
//! freshly allocated output. The transform is an iterative radix-2
//! Cooley-Tukey with an in-place butterfly on private copies.

use crate::error::{Result, SpectrumError};
use num_complex::Complex;
use std::f64::consts::PI;

/// Subtract the arithmetic mean from every sample
pub fn remove_dc(samples: &[f64]) -> Result<Vec<f64>> {
    if samples.is_empty() {
        return Err(SpectrumError::EmptyInput);
    }
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    Ok(samples.iter().map(|&x| x - mean).collect())
}

/// AC RMS level: sqrt(E[x²] - E[x]²)
pub fn ac_volume(samples: &[f64]) -> Result<f64> {
    if samples.is_empty() {
        return Err(SpectrumError::EmptyInput);
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let mean_sq = samples.iter().map(|&x| x * x).sum::<f64>() / n;

    Ok((mean_sq - mean * mean).max(0.0).sqrt())
}

/// Apply a periodic Hann window: x[i] * 0.5 * (1 - cos(2πi/N))
pub fn hann_window(samples: &[f64]) -> Vec<f64> {
    let n = samples.len() as f64;
    samples
        .iter()
        .enumerate()
        .map(|(i, &x)| x * 0.5 * (1.0 - (2.0 * PI * i as f64 / n).cos()))
        .collect()
}

fn check_lengths(re: &[f64], im: &[f64]) -> Result<()> {
    if re.len() != im.len() {
        return Err(SpectrumError::LengthMismatch {
            re: re.len(),
            im: im.len(),
        });
    }
    if !re.len().is_power_of_two() {
        return Err(SpectrumError::InvalidLength { len: re.len() });
    }
    Ok(())
}

/// Forward FFT (unnormalized)
///
/// Uses the kernel `exp(+2πi·jk/N)`. Magnitudes of real input are the same
/// under either sign convention, and `inverse_fft` undoes it exactly.
///
/// # Arguments
/// * `re` - Real part
/// * `im` - Imaginary part, or `None` for a purely real input
///
/// # Returns
/// `(re, im)` of the spectrum, same length as the input
pub fn forward_fft(re: &[f64], im: Option<&[f64]>) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut re = re.to_vec();
    let mut im = match im {
        Some(im) => im.to_vec(),
        None => vec![0.0; re.len()],
    };
    check_lengths(&re, &im)?;

    let n = re.len();

    // Bit-reversal permutation; `i` tracks the reversed counter of `j`
    let mut i = 0usize;
    for j in 1..n.saturating_sub(1) {
        let mut k = n >> 1;
        loop {
            i ^= k;
            if k <= i {
                break;
            }
            k >>= 1;
        }
        if j < i {
            re.swap(i, j);
            im.swap(i, j);
        }
    }

    // Butterfly stages, twiddles indexed by the bit-reversed block counter
    let mut mh = 1usize;
    while (mh << 1) <= n {
        let m = mh << 1;
        let mut irev = 0usize;
        let mut start = 0usize;
        while start < n {
            let angle = 2.0 * PI * irev as f64 / n as f64;
            let (wr, wi) = (angle.cos(), angle.sin());

            let mut k = n >> 2;
            while k > 0 {
                irev ^= k;
                if k <= irev {
                    break;
                }
                k >>= 1;
            }

            for j in start..start + mh {
                let k = j + mh;
                let xr = re[j] - re[k];
                let xi = im[j] - im[k];
                re[j] += re[k];
                im[j] += im[k];
                re[k] = wr * xr - wi * xi;
                im[k] = wr * xi + wi * xr;
            }
            start += m;
        }
        mh = m;
    }

    Ok((re, im))
}

/// Inverse FFT via the conjugate trick
///
/// Negates `im`, runs the forward transform, then scales the real part by
/// `1/N` and the imaginary part by `-1/N`.
pub fn inverse_fft(re: &[f64], im: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    let conj: Vec<f64> = im.iter().map(|&x| -x).collect();
    let (out_re, out_im) = forward_fft(re, Some(conj.as_slice()))?;
    let n = out_re.len() as f64;

    Ok((
        out_re.into_iter().map(|x| x / n).collect(),
        out_im.into_iter().map(|x| -x / n).collect(),
    ))
}

/// Elementwise |X[k]|
pub fn magnitudes(re: &[f64], im: &[f64]) -> Result<Vec<f64>> {
    if re.len() != im.len() {
        return Err(SpectrumError::LengthMismatch {
            re: re.len(),
            im: im.len(),
        });
    }
    Ok(re
        .iter()
        .zip(im)
        .map(|(&r, &i)| (r * r + i * i).sqrt())
        .collect())
}

/// Frequency-domain convolution of `x` and `y`
///
/// The longer operand leads. Both are transformed at their own length and
/// multiplied over the shorter spectrum; the product keeps the leading
/// length, with any bins past the shorter spectrum left at zero. No
/// zero-padding is done, so the result is the circular convolution when
/// the lengths match.
pub fn convolve(
    x_re: &[f64],
    x_im: &[f64],
    y_re: &[f64],
    y_im: &[f64],
) -> Result<(Vec<f64>, Vec<f64>)> {
    let (x_re, x_im, y_re, y_im) = if x_re.len() < y_re.len() {
        (y_re, y_im, x_re, x_im)
    } else {
        (x_re, x_im, y_re, y_im)
    };

    let (xr, xi) = forward_fft(x_re, Some(x_im))?;
    let (yr, yi) = forward_fft(y_re, Some(y_im))?;

    let n = xr.len();
    let mut prod_re = vec![0.0; n];
    let mut prod_im = vec![0.0; n];
    for k in 0..n.min(yr.len()) {
        let p = Complex::new(xr[k], xi[k]) * Complex::new(yr[k], yi[k]);
        prod_re[k] = p.re;
        prod_im[k] = p.im;
    }

    inverse_fft(&prod_re, &prod_im)
}
