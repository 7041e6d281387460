use clap::Parser;
use velmag::cli::{run, Args};

pub type BinResult<T, E = Box<dyn std::error::Error + Send + Sync>> = Result<T, E>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("velmag=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = bin_main() {
        eprintln!("error: {e}");
        if let Some(e) = e.source() {
            eprintln!("error: {e}");
        }
        std::process::exit(1);
    }
}

fn bin_main() -> BinResult<()> {
    let args = Args::parse();
    run(&args)?;
    Ok(())
}
