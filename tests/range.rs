use pretty_assertions::assert_eq;
use requant::{quantized_range, DataType, QuantError, QuantizedRange};

#[test]
fn eight_bit_ranges() {
    assert_eq!(quantized_range(DataType::QAsymm8).unwrap(), QuantizedRange::new(0, 255));
    assert_eq!(quantized_range(DataType::QAsymm8Signed).unwrap(), QuantizedRange::new(-128, 127));
    assert_eq!(quantized_range(DataType::QSymm8).unwrap(), QuantizedRange::new(-128, 127));
    assert_eq!(quantized_range(DataType::QSymm8PerChannel).unwrap(), QuantizedRange::new(-128, 127));
}

#[test]
fn wide_ranges() {
    assert_eq!(quantized_range(DataType::QAsymm16).unwrap(), QuantizedRange::new(0, 65535));
    assert_eq!(quantized_range(DataType::QSymm16).unwrap(), QuantizedRange::new(-32768, 32767));
    assert_eq!(quantized_range(DataType::S32).unwrap(), QuantizedRange::UNBOUNDED);
}

#[test]
fn float_types_have_no_range() {
    for dt in [DataType::F16, DataType::F32] {
        assert_eq!(quantized_range(dt).unwrap_err(), QuantError::UnsupportedType(dt));
        assert!(!dt.is_quantized());
    }
}

#[test]
fn short_tags_parse() {
    assert_eq!("u8".parse::<DataType>().unwrap(), DataType::QAsymm8);
    assert_eq!("I8".parse::<DataType>().unwrap(), DataType::QAsymm8Signed);
    assert_eq!("i16".parse::<DataType>().unwrap(), DataType::QSymm16);
    let r = quantized_range("u8".parse().unwrap()).unwrap();
    assert_eq!((r.clamp(300), r.clamp(-4), r.clamp(17)), (255, 0, 17));
}
