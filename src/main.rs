use anyhow::{Context, Result};
use clap::Parser;
use requant::{decompose_with, Rounding};

#[derive(Parser, Debug)]
#[command(name = "requant", version, about = "Decompose real multipliers into Q0.31 multiplier/shift pairs")]
struct Args {
    /// Real multipliers to decompose
    #[arg(required = true, allow_negative_numbers = true)]
    multipliers: Vec<f64>,

    /// Tie-break for the mantissa rounding
    #[arg(long, value_enum, default_value = "away")]
    rounding: Rounding,

    /// Print JSON lines instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !args.json {
        println!("{:>16} {:>12} {:>6} {:>24} {:>12}", "multiplier", "q", "shift", "reconstructed", "rel_err");
    }
    for &m in &args.multipliers {
        let pair = decompose_with(m, args.rounding).with_context(|| format!("decompose {}", m))?;
        let back = pair.to_f64();
        let rel_err = if m == 0.0 { 0.0 } else { ((back - m) / m).abs() };
        if args.json {
            let obj = serde_json::json!({
                "multiplier": m,
                "quantized_multiplier": pair.multiplier,
                "shift": pair.shift,
                "reconstructed": back,
                "rel_err": rel_err,
            });
            println!("{}", serde_json::to_string(&obj)?);
        } else {
            println!("{:>16e} {:>12} {:>6} {:>24e} {:>12.3e}", m, pair.multiplier, pair.shift, back, rel_err);
        }
    }
    Ok(())
}
