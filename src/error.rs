use crate::range::DataType;
use thiserror::Error;

/// Errors reported by the decomposition engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantError {
    #[error("Invalid multiplier: {0} (must be finite and non-negative)")]
    InvalidMultiplier(f64),

    #[error("Unsupported data type for quantized range: {0:?}")]
    UnsupportedType(DataType),

    #[error("Invalid channel count: expected {expected} weight scales, got {actual}")]
    InvalidChannelCount { expected: usize, actual: usize },

    #[error("Invalid {what} scale: {scale} (must be finite and positive)")]
    InvalidScale { what: &'static str, scale: f32 },

    #[error("Buffer too small: need {needed} slots, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Channel axis {axis} out of range for rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    #[error("{0} tensor must be quantized per-tensor")]
    NonUniformQuantization(&'static str),
}

pub type Result<T> = std::result::Result<T, QuantError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_offending_value() {
        let err = QuantError::InvalidMultiplier(-2.5);
        assert!(format!("{}", err).contains("-2.5"));

        let err = QuantError::InvalidChannelCount { expected: 4, actual: 3 };
        let msg = format!("{}", err);
        assert!(msg.contains("expected 4") && msg.contains("got 3"));

        let err = QuantError::InvalidScale { what: "weight", scale: 0.0 };
        assert!(format!("{}", err).contains("weight scale"));

        let err = QuantError::BufferTooSmall { needed: 8, available: 2 };
        assert!(format!("{}", err).contains("need 8"));

        let err = QuantError::UnsupportedType(DataType::F32);
        assert!(format!("{}", err).contains("F32"));
    }
}
