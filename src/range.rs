use crate::error::{QuantError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Element types a tensor descriptor may carry. Only the quantized ones have a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    QAsymm8,
    QAsymm8Signed,
    QSymm8,
    QSymm8PerChannel,
    QAsymm16,
    QSymm16,
    S32,
    F16,
    F32,
}

/// Inclusive integer bounds of a quantized type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantizedRange {
    pub min: i32,
    pub max: i32,
}

impl QuantizedRange {
    pub const UNBOUNDED: QuantizedRange = QuantizedRange { min: i32::MIN, max: i32::MAX };

    pub fn new(min: i32, max: i32) -> Self { Self { min, max } }

    #[inline]
    pub fn clamp(&self, v: i32) -> i32 { v.clamp(self.min, self.max) }
}

pub fn quantized_range(data_type: DataType) -> Result<QuantizedRange> {
    let (min, max) = match data_type {
        DataType::QAsymm8 => (u8::MIN as i32, u8::MAX as i32),
        DataType::QAsymm8Signed | DataType::QSymm8 | DataType::QSymm8PerChannel => (i8::MIN as i32, i8::MAX as i32),
        DataType::QAsymm16 => (u16::MIN as i32, u16::MAX as i32),
        DataType::QSymm16 => (i16::MIN as i32, i16::MAX as i32),
        DataType::S32 => (i32::MIN, i32::MAX),
        DataType::F16 | DataType::F32 => return Err(QuantError::UnsupportedType(data_type)),
    };
    Ok(QuantizedRange { min, max })
}

impl DataType {
    pub fn is_quantized(self) -> bool { !matches!(self, DataType::F16 | DataType::F32) }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "u8" | "qasymm8" => Ok(DataType::QAsymm8),
            "i8" | "qasymm8_signed" => Ok(DataType::QAsymm8Signed),
            "qsymm8" => Ok(DataType::QSymm8),
            "qsymm8_per_channel" => Ok(DataType::QSymm8PerChannel),
            "u16" | "qasymm16" => Ok(DataType::QAsymm16),
            "i16" | "qsymm16" => Ok(DataType::QSymm16),
            "i32" | "s32" => Ok(DataType::S32),
            "f16" => Ok(DataType::F16),
            "f32" => Ok(DataType::F32),
            _ => Err(format!("unknown data type '{}'", s)),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataType::QAsymm8 => "qasymm8",
            DataType::QAsymm8Signed => "qasymm8_signed",
            DataType::QSymm8 => "qsymm8",
            DataType::QSymm8PerChannel => "qsymm8_per_channel",
            DataType::QAsymm16 => "qasymm16",
            DataType::QSymm16 => "qsymm16",
            DataType::S32 => "s32",
            DataType::F16 => "f16",
            DataType::F32 => "f32",
        };
        f.write_str(s)
    }
}
