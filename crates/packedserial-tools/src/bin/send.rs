use clap::Parser;
use packedserial_core::{Codec, Schema};
use packedserial_link::TypedLink;
use packedserial_tools::{parse_values, PortArgs};

#[derive(Parser, Debug)]
#[command(name = "packedserial-send")]
struct Args {
    #[command(flatten)]
    port: PortArgs,
    #[arg(long)]
    schema: Schema,
    /// One value per schema field.
    values: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let values = parse_values(&args.schema, &args.values)?;
    let link = args.port.config(&args.schema).open()?;
    let mut link = TypedLink::new(link, Codec::new(args.schema));

    if let Err(e) = link.send_values(&values).await {
        eprintln!("send failed: {e}");
        std::process::exit(1);
    }
    println!("packet sent");
    Ok(())
}
