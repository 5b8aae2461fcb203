use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod build;

use build::Builder;

/// Render a directory of `.rst` documents into a static HTML site.
///
/// Source documents carry a JSON metadata header terminated by a `---` line;
/// the metadata's `layout` key names a template in the input directory's
/// `layout/` subdirectory.
#[derive(Parser)]
#[command(name = "rstatic", version, about)]
struct Args {
    /// Directory containing the .rst source documents and a layout/ subdirectory
    input_dir: PathBuf,

    /// Directory the rendered .html files are written to (created if missing)
    output_dir: PathBuf,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    // RUST_LOG overrides; default to info so page traces are visible
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = Builder::new(args.input_dir, args.output_dir).build()?;

    println!(
        "Rendered {} page(s) to {} ({} skipped)",
        result.pages,
        result.output_dir.display(),
        result.skipped
    );

    Ok(())
}
