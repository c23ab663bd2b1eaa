use anyhow::{bail, Context, Result};
use clap::Parser;
use requant::{output_stage, DataType, DecomposeParams, QuantizationInfo, Rounding, TensorInfo};

#[derive(Parser, Debug)]
#[command(name = "requant-channels", version, about = "Build a per-channel output stage and print it as JSON")]
struct Args {
    /// Input tensor scale
    #[arg(long)]
    input_scale: f32,

    /// Weight scales: one value for per-tensor, otherwise one per output channel
    #[arg(long, value_delimiter = ',', required = true)]
    weight_scales: Vec<f32>,

    /// Output channel count (defaults to the number of weight scales)
    #[arg(long)]
    channels: Option<usize>,

    /// Output tensor scale
    #[arg(long)]
    output_scale: f32,

    /// Output tensor zero point
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    output_zero_point: i32,

    /// Output data type (u8, i8, u16, i16, s32, ...)
    #[arg(long, default_value = "u8")]
    output_type: DataType,

    /// Tie-break for the mantissa rounding
    #[arg(long, value_enum, default_value = "away")]
    rounding: Rounding,

    /// Channel count at which the work moves onto the thread pool
    #[arg(long, default_value_t = 1024)]
    parallel_threshold: usize,

    /// Worker threads (0 = rayon default)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let a = Args::parse();

    let per_channel = a.weight_scales.len() > 1;
    let n = a.channels.unwrap_or(a.weight_scales.len());
    if n == 0 { bail!("channel count must be at least 1"); }

    let weights_q = if per_channel {
        QuantizationInfo::per_channel(a.weight_scales.clone())
    } else {
        QuantizationInfo::per_tensor(a.weight_scales[0], 0)
    };
    let weights_type = if per_channel { DataType::QSymm8PerChannel } else { DataType::QSymm8 };
    // Weights laid out [out_channels, ...]; only axis 0 matters here.
    let input = TensorInfo::new(vec![1], DataType::QAsymm8, QuantizationInfo::per_tensor(a.input_scale, 0));
    let weights = TensorInfo::new(vec![n, 1], weights_type, weights_q);
    let output = TensorInfo::new(vec![n], a.output_type, QuantizationInfo::per_tensor(a.output_scale, a.output_zero_point));

    let params = DecomposeParams {
        rounding: a.rounding,
        parallel_threshold: a.parallel_threshold,
    };
    let build = || output_stage(&input, &weights, &output, 0, &params);
    let stage = if a.threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(a.threads).build().context("build thread pool")?;
        pool.install(build)
    } else {
        build()
    }
    .context("compute output stage")?;

    let json = if a.pretty { serde_json::to_string_pretty(&stage)? } else { serde_json::to_string(&stage)? };
    println!("{}", json);
    Ok(())
}
