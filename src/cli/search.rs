//! Search command implementation

use crate::cli::SearchArgs;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::output::format_search;
use crate::search::normalize_query;
use tracing::info;

/// Run the search command
pub fn run(args: SearchArgs) -> Result<()> {
    let config = Config::load()?;
    let directions = args.directions.resolve(&config.query)?;
    let display = args.offsets.resolve(&config.display);

    let service = args.corpus.open(&config, directions)?;

    let term = normalize_query(&args.term);
    let hit = service.search(&term, directions)?;
    info!(
        term = %term,
        matched = hit.matched,
        candidates = hit.candidates.len(),
        "Searched term"
    );

    print!(
        "{}",
        format_search(&term, &hit, service.grid(), &display, args.format)
    );
    Ok(())
}
