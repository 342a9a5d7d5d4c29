pub mod construct;
pub mod lookup;
pub mod query;
pub mod results;

pub use construct::LongestMatch;
pub use lookup::SearchHit;
pub use query::{normalize_query, CypherQuery, Mode};
pub use results::CypherResponse;
