//! Encode command implementation

use crate::cli::EncodeArgs;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::output::format_cypher;
use tracing::info;

/// Run the encode command
pub fn run(args: EncodeArgs) -> Result<()> {
    let config = Config::load()?;
    let directions = args.directions.resolve(&config.query)?;
    let mode = args.mode(&config.query);
    let display = args.offsets.resolve(&config.display);

    let service = args.corpus.open(&config, directions)?;
    service.set_selector(args.selector(&config.query));

    let response = service.encode(&args.phrase(), directions, mode)?;
    info!(
        phrase = %response.phrase,
        mode = %mode,
        runs = response.runs.len(),
        elapsed_ms = response.elapsed_ms,
        "Generated cypher"
    );

    print!(
        "{}",
        format_cypher(&response, service.grid(), &display, args.format)
    );
    Ok(())
}
