use clap::Parser;
use packedserial_core::{Codec, OverflowPolicy, Schema};
use packedserial_tools::{parse_values, to_hex};

#[derive(Parser, Debug)]
#[command(name = "packedserial-pack")]
struct Args {
    /// Comma-separated type tags, e.g. "uint8,string,uint16".
    #[arg(long)]
    schema: Schema,
    /// Truncate out-of-range integers instead of failing.
    #[arg(long)]
    wrap: bool,
    /// Print the COBS frame (with delimiter) instead of the bare packet.
    #[arg(long)]
    framed: bool,
    /// One value per schema field.
    values: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let overflow = if args.wrap {
        OverflowPolicy::Wrap
    } else {
        OverflowPolicy::Reject
    };
    let codec = Codec::new(args.schema.clone()).with_overflow(overflow);
    let values = parse_values(&args.schema, &args.values)?;

    match codec.encode(&values) {
        Ok(bytes) if args.framed => {
            println!("{}", to_hex(&packedserial_link::encode_frame(&bytes)))
        }
        Ok(bytes) => println!("{}", to_hex(&bytes)),
        Err(e) => {
            eprintln!("pack failed: {e}");
            std::process::exit(1);
        }
    }
    Ok(())
}
