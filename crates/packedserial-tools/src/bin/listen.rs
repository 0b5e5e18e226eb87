use clap::Parser;
use packedserial_core::{Codec, Schema};
use packedserial_link::{LinkError, TypedLink};
use packedserial_tools::{render_values, PortArgs};

#[derive(Parser, Debug)]
#[command(name = "packedserial-listen")]
struct Args {
    #[command(flatten)]
    port: PortArgs,
    #[arg(long)]
    schema: Schema,
    #[arg(long)]
    json: bool,
    /// Stop after this many packets.
    #[arg(long)]
    count: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let link = args.port.config(&args.schema).open()?;
    let mut link = TypedLink::new(link, Codec::new(args.schema.clone()));

    println!(
        "Listening on {} at {} baud for [{}] (Ctrl+C to stop)...",
        args.port.port, args.port.baud, args.schema
    );
    let mut received = 0usize;
    while args.count.map_or(true, |limit| received < limit) {
        match link.recv_values().await {
            Ok(values) => {
                received += 1;
                println!("{}", render_values(&values, args.json));
            }
            Err(LinkError::Closed) => break,
            Err(e @ (LinkError::Frame(_) | LinkError::Decode(_))) => {
                log::warn!("skipping packet: {e}");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
