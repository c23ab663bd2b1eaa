// Fixed-point requantization parameters for integer-only inference
pub mod error;
pub mod range;
pub mod decompose;
pub mod tensor;
pub mod kernel;
pub mod output_stage;
pub mod per_channel;
pub mod compute;

pub use compute::{fill_channel_multipliers_and_shifts, fill_channel_multipliers_and_shifts_with, output_stage};
pub use decompose::{
    decompose, decompose_sub_unity, decompose_super_unity, decompose_with, DecomposeParams, MultiplierShiftPair,
    Rounding,
};
pub use error::{QuantError, Result};
pub use output_stage::OutputStageConfig;
pub use per_channel::{per_channel_decompose, per_channel_decompose_with};
pub use range::{quantized_range, DataType, QuantizedRange};
pub use tensor::{QuantizationInfo, TensorInfo, UniformQuantization, WeightQuantization};
