use crate::decompose::{decompose_with, DecomposeParams, MultiplierShiftPair};
use crate::error::{QuantError, Result};
use crate::output_stage::OutputStageConfig;
use crate::tensor::{UniformQuantization, WeightQuantization};
use log::debug;
use rayon::prelude::*;

fn check_scale(what: &'static str, scale: f32) -> Result<()> {
    if scale.is_finite() && scale > 0.0 { Ok(()) } else { Err(QuantError::InvalidScale { what, scale }) }
}

fn validate(
    input: &UniformQuantization,
    weights: &WeightQuantization,
    output: &UniformQuantization,
    n: usize,
) -> Result<()> {
    if let WeightQuantization::PerChannel(scales) = weights {
        if scales.len() != n {
            return Err(QuantError::InvalidChannelCount { expected: n, actual: scales.len() });
        }
    }
    check_scale("input", input.scale)?;
    check_scale("output", output.scale)?;
    match weights {
        WeightQuantization::PerTensor(s) => check_scale("weight", *s),
        WeightQuantization::PerChannel(scales) => scales.iter().try_for_each(|&s| check_scale("weight", s)),
    }
}

/// `input.scale * weight_scale(c) / output.scale`, evaluated in f64.
/// `None` when `c` has no per-channel weight scale.
#[inline]
pub fn effective_multiplier(
    input: &UniformQuantization,
    weights: &WeightQuantization,
    output: &UniformQuantization,
    c: usize,
) -> Option<f64> {
    weights.scale(c).map(|w| input.scale as f64 * w as f64 / output.scale as f64)
}

pub fn per_channel_decompose(
    input: &UniformQuantization,
    weights: &WeightQuantization,
    output: &UniformQuantization,
    n: usize,
) -> Result<OutputStageConfig> {
    per_channel_decompose_with(input, weights, output, n, &DecomposeParams::default())
}

pub fn per_channel_decompose_with(
    input: &UniformQuantization,
    weights: &WeightQuantization,
    output: &UniformQuantization,
    n: usize,
    params: &DecomposeParams,
) -> Result<OutputStageConfig> {
    validate(input, weights, output, n)?;
    let channel = |c: usize| -> Result<MultiplierShiftPair> {
        let m = effective_multiplier(input, weights, output, c)
            .ok_or(QuantError::InvalidChannelCount { expected: n, actual: weights.scale_count() })?;
        decompose_with(m, params.rounding)
    };
    let pairs = match weights {
        // One decomposition broadcast to every channel.
        WeightQuantization::PerTensor(_) => {
            let pair = if n > 0 { channel(0)? } else { MultiplierShiftPair::ZERO };
            vec![pair; n]
        }
        WeightQuantization::PerChannel(_) if n >= params.parallel_threshold => {
            (0..n).into_par_iter().map(&channel).collect::<Result<Vec<_>>>()?
        }
        WeightQuantization::PerChannel(_) => (0..n).map(&channel).collect::<Result<Vec<_>>>()?,
    };
    debug!("decomposed {} channel multipliers (per-channel weights: {})", n, weights.is_per_channel());
    Ok(OutputStageConfig::new(pairs, output.zero_point))
}
