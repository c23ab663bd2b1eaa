use crate::error::{QuantError, Result};
use crate::range::DataType;
use serde::{Deserialize, Serialize};

/// Per-tensor affine quantization: `real = scale * (q - zero_point)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UniformQuantization {
    pub scale: f32,
    pub zero_point: i32,
}

impl UniformQuantization {
    pub fn new(scale: f32, zero_point: i32) -> Self { Self { scale, zero_point } }
}

/// Weight scales, either shared by every output channel or one per channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WeightQuantization {
    PerTensor(f32),
    PerChannel(Vec<f32>),
}

impl WeightQuantization {
    /// Scale applying to output channel `c`. Per-tensor scales are broadcast;
    /// `None` past the end of a per-channel set.
    #[inline]
    pub fn scale(&self, c: usize) -> Option<f32> {
        match self {
            WeightQuantization::PerTensor(s) => Some(*s),
            WeightQuantization::PerChannel(scales) => scales.get(c).copied(),
        }
    }

    pub fn scale_count(&self) -> usize {
        match self {
            WeightQuantization::PerTensor(_) => 1,
            WeightQuantization::PerChannel(scales) => scales.len(),
        }
    }

    pub fn is_per_channel(&self) -> bool { matches!(self, WeightQuantization::PerChannel(_)) }
}

/// Quantization metadata attached to a tensor descriptor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum QuantizationInfo {
    PerTensor(UniformQuantization),
    PerChannel { scales: Vec<f32> },
}

impl QuantizationInfo {
    pub fn per_tensor(scale: f32, zero_point: i32) -> Self {
        QuantizationInfo::PerTensor(UniformQuantization::new(scale, zero_point))
    }

    pub fn per_channel(scales: Vec<f32>) -> Self { QuantizationInfo::PerChannel { scales } }

    /// Uniform view of the parameters. A per-channel set with a single scale
    /// is accepted as uniform with a zero offset.
    pub fn uniform(&self, what: &'static str) -> Result<UniformQuantization> {
        match self {
            QuantizationInfo::PerTensor(u) => Ok(*u),
            QuantizationInfo::PerChannel { scales } if scales.len() == 1 => Ok(UniformQuantization::new(scales[0], 0)),
            QuantizationInfo::PerChannel { .. } => Err(QuantError::NonUniformQuantization(what)),
        }
    }

    pub fn weights(&self) -> WeightQuantization {
        match self {
            QuantizationInfo::PerTensor(u) => WeightQuantization::PerTensor(u.scale),
            QuantizationInfo::PerChannel { scales } => WeightQuantization::PerChannel(scales.clone()),
        }
    }
}

/// Shape, element type and quantization of a tensor. Holds no data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TensorInfo {
    pub shape: Vec<usize>,
    pub data_type: DataType,
    pub quantization: QuantizationInfo,
}

impl TensorInfo {
    pub fn new(shape: Vec<usize>, data_type: DataType, quantization: QuantizationInfo) -> Self {
        Self { shape, data_type, quantization }
    }

    pub fn rank(&self) -> usize { self.shape.len() }

    pub fn dimension(&self, axis: usize) -> Result<usize> {
        self.shape.get(axis).copied().ok_or(QuantError::InvalidAxis { axis, rank: self.rank() })
    }
}
