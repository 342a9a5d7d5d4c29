//! Stats command implementation

use crate::cli::StatsArgs;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::output::format_stats;

/// Run the stats command
pub fn run(args: StatsArgs) -> Result<()> {
    let config = Config::load()?;
    let directions = args.directions.resolve(&config.query)?;
    let service = args.corpus.open(&config, directions)?;

    print!(
        "{}",
        format_stats(service.grid(), &service.stats(), args.json)
    );
    Ok(())
}
