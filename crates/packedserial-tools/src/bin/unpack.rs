use clap::Parser;
use packedserial_core::{Codec, Schema};
use packedserial_tools::{parse_hex, render_values};

#[derive(Parser, Debug)]
#[command(name = "packedserial-unpack")]
struct Args {
    #[arg(long)]
    schema: Schema,
    /// Input is a COBS frame rather than a bare packet.
    #[arg(long)]
    framed: bool,
    /// Fail if bytes remain after the last field.
    #[arg(long)]
    exact: bool,
    #[arg(long)]
    json: bool,
    /// Packet bytes as hex, e.g. "03 61 62 63 02 64 65".
    hex: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let mut bytes = parse_hex(&args.hex.join(" "))?;
    if args.framed {
        if bytes.last() == Some(&packedserial_link::DELIMITER) {
            bytes.pop();
        }
        bytes = packedserial_link::decode_frame(&bytes)?;
    }

    let codec = Codec::new(args.schema);
    let result = if args.exact {
        codec.decode_exact(&bytes)
    } else {
        codec.decode(&bytes)
    };
    match result {
        Ok(values) => println!("{}", render_values(&values, args.json)),
        Err(e) => {
            eprintln!("unpack failed: {e}");
            std::process::exit(1);
        }
    }
    Ok(())
}
