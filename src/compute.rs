use crate::decompose::DecomposeParams;
use crate::error::{QuantError, Result};
use crate::output_stage::OutputStageConfig;
use crate::per_channel::per_channel_decompose_with;
use crate::range::quantized_range;
use crate::tensor::TensorInfo;

/// Fills `multipliers_out[..n]` and `shifts_out[..n]`, one slot per output
/// channel, where `n` is the size of `weights` along `channel_axis`.
/// Slots past `n` are left as they were.
pub fn fill_channel_multipliers_and_shifts(
    input: &TensorInfo,
    weights: &TensorInfo,
    output: &TensorInfo,
    channel_axis: usize,
    multipliers_out: &mut [i32],
    shifts_out: &mut [i32],
) -> Result<()> {
    fill_channel_multipliers_and_shifts_with(
        input, weights, output, channel_axis, multipliers_out, shifts_out, &DecomposeParams::default(),
    )
}

pub fn fill_channel_multipliers_and_shifts_with(
    input: &TensorInfo,
    weights: &TensorInfo,
    output: &TensorInfo,
    channel_axis: usize,
    multipliers_out: &mut [i32],
    shifts_out: &mut [i32],
    params: &DecomposeParams,
) -> Result<()> {
    let n = weights.dimension(channel_axis)?;
    let available = multipliers_out.len().min(shifts_out.len());
    if available < n {
        return Err(QuantError::BufferTooSmall { needed: n, available });
    }
    let stage = stage_for(input, weights, output, n, params)?;
    for ((pair, m), s) in stage.pairs.iter().zip(multipliers_out.iter_mut()).zip(shifts_out.iter_mut()) {
        *m = pair.multiplier;
        *s = pair.shift;
    }
    Ok(())
}

/// Complete output stage for a layer: per-channel pairs, the output zero
/// point and clamp bounds of the output data type.
pub fn output_stage(
    input: &TensorInfo,
    weights: &TensorInfo,
    output: &TensorInfo,
    channel_axis: usize,
    params: &DecomposeParams,
) -> Result<OutputStageConfig> {
    let n = weights.dimension(channel_axis)?;
    let range = quantized_range(output.data_type)?;
    Ok(stage_for(input, weights, output, n, params)?.with_range(range))
}

fn stage_for(
    input: &TensorInfo,
    weights: &TensorInfo,
    output: &TensorInfo,
    n: usize,
    params: &DecomposeParams,
) -> Result<OutputStageConfig> {
    let iq = input.quantization.uniform("input")?;
    let oq = output.quantization.uniform("output")?;
    per_channel_decompose_with(&iq, &weights.quantization.weights(), &oq, n, params)
}
