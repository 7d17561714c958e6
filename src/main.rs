//! urlspan CLI - print the links found in a text
//!
//! Usage: `urlspan <tlds.json> [FILE|-]`
//!
//! Each link is printed as `start<TAB>len<TAB>text`, with UTF-8 byte offsets.
//! Set `RUST_LOG=debug` to see dictionary construction.

use std::io::{self, BufWriter, Read, Write};
use tracing_subscriber::EnvFilter;
use urlspan::{Extractor, TldLists};

fn main() -> urlspan::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(tld_path) = args.get(1) else {
        eprintln!("usage: urlspan <tlds.json> [FILE|-]");
        std::process::exit(2);
    };

    let lists = TldLists::from_path(tld_path)?;
    let extractor = Extractor::new(&lists)?;

    let input = match args.get(2) {
        Some(path) if path != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let spans = extractor.extract(&input);
    tracing::debug!(links = spans.len(), bytes = input.len(), "scanned input");

    let mut out = BufWriter::new(io::stdout().lock());
    for span in &spans {
        writeln!(out, "{}\t{}\t{}", span.start, span.len, span.slice(&input))?;
    }
    out.flush()?;

    Ok(())
}
