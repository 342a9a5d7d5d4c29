//! CLI command definitions and handlers

pub mod encode;
pub mod search;
pub mod stats;

use crate::core::config::{Config, DisplayConfig, QueryConfig};
use crate::core::error::{Error, Result};
use crate::cypher::CypherService;
use crate::index::{Direction, RandomSelector, SeededSelector, Selector};
use crate::search::Mode;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const LONG_ABOUT: &str = r#"
Encode a phrase as a list of positions in a paginated letter grid.

Every row, column, and diagonal of the corpus is indexed, so a phrase can be
spelled out as a sequence of runs: each run names a start cell (page, row,
column), a length, and the direction it is read in.

QUICK START:
    gridcypher encode -f book.txt "meet at dawn"
    gridcypher encode -f book.txt --all --ltr "meet at dawn"
    gridcypher search -f book.txt dawn
    gridcypher stats  -f book.txt --all

CORPUS FORMAT:
    Pages are separated by a blank line, rows by a newline. Every cell must
    be an ASCII letter in the directions being indexed.

CONFIG:
    $GRIDCYPHER_HOME/config.toml (or the platform config dir) sets defaults
    for the corpus path, directions, mode, selection, and display offsets.
    Set GRIDCYPHER_LOG=debug for timing logs on stderr.
"#;

/// Encode phrases as grid coordinates
#[derive(Parser, Debug)]
#[command(name = "gridcypher")]
#[command(author, version)]
#[command(about = "Encode phrases as positions in a letter grid")]
#[command(long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode a phrase as a sequence of grid runs
    #[command(visible_alias = "e")]
    Encode(EncodeArgs),

    /// Show the longest indexed prefix of a term and every place it occurs
    #[command(visible_alias = "s")]
    Search(SearchArgs),

    /// Show corpus and index statistics
    Stats(StatsArgs),
}

/// Corpus selection shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct CorpusArgs {
    /// Corpus file (default: [corpus] path from config)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Direction flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct DirectionArgs {
    /// Read rows left to right
    #[arg(short = 'r', long)]
    pub right: bool,

    /// Read rows right to left
    #[arg(short = 'l', long)]
    pub left: bool,

    /// Read columns bottom to top
    #[arg(short = 'u', long)]
    pub up: bool,

    /// Read columns top to bottom
    #[arg(short = 'd', long)]
    pub down: bool,

    /// Read all four diagonals
    #[arg(long)]
    pub diagonal: bool,

    /// Read in every direction
    #[arg(long)]
    pub all: bool,

    /// Direction list, e.g. "right|left-down" (combined with the flags)
    #[arg(long, value_name = "SET")]
    pub directions: Option<String>,
}

/// Display offsets added to zero-based positions
#[derive(Args, Debug, Clone, Default)]
pub struct OffsetArgs {
    /// Added to page numbers (default 1)
    #[arg(long, visible_alias = "po", value_name = "N", allow_negative_numbers = true)]
    pub page_offset: Option<i64>,

    /// Added to row numbers (default 1)
    #[arg(long, visible_alias = "ro", value_name = "N", allow_negative_numbers = true)]
    pub row_offset: Option<i64>,

    /// Added to column numbers (default 1)
    #[arg(long, visible_alias = "co", value_name = "N", allow_negative_numbers = true)]
    pub col_offset: Option<i64>,
}

/// Arguments for the encode command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    gridcypher encode -f book.txt \"attack at dawn\"      Longest runs, rows only
    gridcypher encode -f book.txt -rd --ltr \"dawn\"      Greedy, rows and columns
    gridcypher encode -f book.txt --all --seed 7 \"hi\"   Reproducible random picks
    gridcypher encode -f book.txt --format json \"hi\"    JSON output

OUTPUT:
    compact   page row col len for each run, space separated (default)
    table     one run per line with its direction and letters
    json      full result record")]
pub struct EncodeArgs {
    /// Phrase to encode; non-letters are ignored
    #[arg(required = true, num_args = 1..)]
    pub phrase: Vec<String>,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[command(flatten)]
    pub directions: DirectionArgs,

    #[command(flatten)]
    pub offsets: OffsetArgs,

    /// Greedy left-to-right reconstruction
    #[arg(long, conflicts_with = "mode")]
    pub ltr: bool,

    /// Reconstruction mode (default: [query] mode from config)
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Pick uniformly among equally long candidates
    #[arg(long, conflicts_with = "seed")]
    pub random: bool,

    /// Pick randomly with a fixed seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
    pub format: OutputFormat,
}

/// Arguments for the search command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    gridcypher search -f book.txt dawn           Rows only
    gridcypher search -f book.txt --all dawn     Every direction
    gridcypher search -f book.txt dawn --format json")]
pub struct SearchArgs {
    /// Term to look up
    pub term: String,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[command(flatten)]
    pub directions: DirectionArgs,

    #[command(flatten)]
    pub offsets: OffsetArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Arguments for the stats command
#[derive(Parser, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    #[command(flatten)]
    pub directions: DirectionArgs,

    /// JSON output
    #[arg(long)]
    pub json: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Compact,
    Table,
    Json,
}

impl CorpusArgs {
    /// Corpus path from the flag, falling back to config
    pub fn resolve(&self, config: &Config) -> Result<PathBuf> {
        self.file
            .clone()
            .or_else(|| config.corpus.path.clone())
            .ok_or_else(|| Error::ConfigError {
                message: "No corpus file: pass --file or set [corpus] path".to_string(),
            })
    }

    /// Load the corpus and index it for `directions`
    pub fn open(&self, config: &Config, directions: Direction) -> Result<CypherService> {
        let path = self.resolve(config)?;
        info!(corpus = %path.display(), directions = %directions, "Opening corpus");
        CypherService::open(&path, directions)
    }
}

impl DirectionArgs {
    /// Union of the given flags; the configured set when none are given
    pub fn resolve(&self, config: &QueryConfig) -> Result<Direction> {
        if self.all {
            return Ok(Direction::all());
        }

        let mut set = Direction::empty();
        let flags = [
            (self.right, Direction::RIGHT),
            (self.left, Direction::LEFT),
            (self.up, Direction::UP),
            (self.down, Direction::DOWN),
            (self.diagonal, Direction::DIAGONAL),
        ];
        for (on, dir) in flags {
            if on {
                set |= dir;
            }
        }
        if let Some(list) = &self.directions {
            set |= list.parse::<Direction>()?;
        }

        if set.is_empty() {
            config.direction_set()
        } else {
            Ok(set)
        }
    }
}

impl OffsetArgs {
    /// Flags override the configured offsets one by one
    pub fn resolve(&self, config: &DisplayConfig) -> DisplayConfig {
        DisplayConfig {
            page_offset: self.page_offset.unwrap_or(config.page_offset),
            row_offset: self.row_offset.unwrap_or(config.row_offset),
            col_offset: self.col_offset.unwrap_or(config.col_offset),
        }
    }
}

impl EncodeArgs {
    pub fn phrase(&self) -> String {
        self.phrase.join(" ")
    }

    pub fn mode(&self, config: &QueryConfig) -> Mode {
        if self.ltr {
            Mode::Ltr
        } else {
            self.mode.unwrap_or(config.mode)
        }
    }

    pub fn selector(&self, config: &QueryConfig) -> Arc<dyn Selector> {
        if self.random {
            Arc::new(RandomSelector)
        } else if let Some(seed) = self.seed {
            Arc::new(SeededSelector::new(seed))
        } else {
            config.selector()
        }
    }
}
