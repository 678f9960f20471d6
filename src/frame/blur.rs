//! Separable Gaussian blur in 16.16 fixed point.
//!
//! Borders replicate the edge pixel.

use crate::error::{Result, TransitionError};
use crate::frame::Frame;

/// Blur every channel of `frame` with a `(2 * radius + 1)` tap kernel
pub fn gaussian_blur(frame: &Frame, radius: u32, sigma: f32) -> Result<Frame> {
    if radius == 0 {
        return Ok(frame.clone());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let shape = frame.shape();
    let mut tmp = vec![0u8; shape.byte_len()];
    let mut out = vec![0u8; shape.byte_len()];

    let dims = Dims {
        width: shape.width as i64,
        height: shape.height as i64,
        channels: shape.channels as usize,
    };
    horizontal_pass(frame.as_bytes(), &mut tmp, dims, &kernel);
    vertical_pass(&tmp, &mut out, dims, &kernel);
    Ok(Frame::from_parts(shape, out))
}

#[derive(Clone, Copy)]
struct Dims {
    width: i64,
    height: i64,
    channels: usize,
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> Result<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(TransitionError::invalid(format!("blur sigma must be > 0, got {sigma}")).into());
    }

    let r = radius as i64;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();

    // Push the rounding error into the center tap so the kernel sums to 1.0
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], dims: Dims, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let c = dims.channels;
    let mut acc = vec![0u64; c];
    for y in 0..dims.height {
        for x in 0..dims.width {
            acc.fill(0);
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i64 - radius).clamp(0, dims.width - 1);
                let idx = ((y * dims.width + sx) as usize) * c;
                for (a, &v) in acc.iter_mut().zip(&src[idx..idx + c]) {
                    *a += u64::from(kw) * u64::from(v);
                }
            }
            let out = ((y * dims.width + x) as usize) * c;
            for (d, &a) in dst[out..out + c].iter_mut().zip(&acc) {
                *d = q16_to_u8(a);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], dims: Dims, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let c = dims.channels;
    let mut acc = vec![0u64; c];
    for y in 0..dims.height {
        for x in 0..dims.width {
            acc.fill(0);
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i64 - radius).clamp(0, dims.height - 1);
                let idx = ((sy * dims.width + x) as usize) * c;
                for (a, &v) in acc.iter_mut().zip(&src[idx..idx + c]) {
                    *a += u64::from(kw) * u64::from(v);
                }
            }
            let out = ((y * dims.width + x) as usize) * c;
            for (d, &a) in dst[out..out + c].iter_mut().zip(&acc) {
                *d = q16_to_u8(a);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}
