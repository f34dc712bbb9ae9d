//! Sinusoidal positional encoding.
//!
//! PE(pos, 2i)   = sin(pos / 10000^(2i / d_model))
//! PE(pos, 2i+1) = cos(pos / 10000^(2i / d_model))

/// Base of the wavelength progression.
pub const WAVELENGTH_BASE: f64 = 10000.0;

/// Model width used by the chart.
pub const CHART_D_MODEL: usize = 512;
/// Dimensions plotted by the chart, from high to low frequency.
pub const CHART_DIMENSIONS: [usize; 3] = [0, 4, 32];
/// Last position plotted by the chart.
pub const CHART_MAX_POSITION: usize = 100;

/// Encoding of `position` along dimension `dim` of a `d_model`-wide embedding.
///
/// Even dimensions use sine, odd dimensions use cosine of the same angle as
/// their even neighbour.
pub fn encoding(position: usize, dim: usize, d_model: usize) -> f64 {
    let angle = position as f64 / frequency_divisor(dim - dim % 2, d_model);
    if dim % 2 == 0 {
        angle.sin()
    } else {
        angle.cos()
    }
}

/// Full encoding vector for one position. Empty when `d_model` is 0.
pub fn encoding_row(position: usize, d_model: usize) -> Vec<f64> {
    (0..d_model).map(|d| encoding(position, d, d_model)).collect()
}

/// `sin(pos / 10000^(exponent / d_model))` for every position in `positions`.
///
/// This is the chart series: `exponent` is used as given rather than rounded
/// down to an even dimension, so `exponent = 4` reproduces the "dim 4" line.
pub fn sine_curve(exponent: usize, d_model: usize, positions: std::ops::RangeInclusive<usize>) -> Vec<f64> {
    let divisor = frequency_divisor(exponent, d_model);
    positions.map(|p| (p as f64 / divisor).sin()).collect()
}

/// One series per chart dimension over positions `0..=CHART_MAX_POSITION`.
pub fn chart_series() -> Vec<(usize, Vec<f64>)> {
    CHART_DIMENSIONS
        .iter()
        .map(|&dim| (dim, sine_curve(dim, CHART_D_MODEL, 0..=CHART_MAX_POSITION)))
        .collect()
}

fn frequency_divisor(exponent: usize, d_model: usize) -> f64 {
    if d_model == 0 {
        return 1.0;
    }
    WAVELENGTH_BASE.powf(exponent as f64 / d_model as f64)
}
