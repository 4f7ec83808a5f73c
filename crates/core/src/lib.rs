pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod location;
pub mod parse;
pub mod results;
pub mod scrape;

pub use config::{DEFAULT_ALL_DAYS_SUFFIX, DEFAULT_BASE_URL, ScrapeConfig, ScrapeConfigBuilder};
pub use error::{LowtideError, Result};
#[doc(hidden)]
pub use extract::{RowKind, TideRow, find_tide_table, table_rows};
pub use extract::{ColumnLayout, DEFAULT_TABLE_SELECTOR, ExtractConfig, extract_daylight_low_tides, extract_from_html};
#[cfg(feature = "fetch")]
pub use fetch::HttpSource;
pub use fetch::{FetchConfig, PageSource, location_url, parse_locations, read_locations};
pub use location::{NormalizedLocation, normalize};
pub use parse::Document;
pub use results::{
    LOW_TIDES_KEY, LocationFailure, LocationResult, LowTides, OrderedMap, ResultSet, ScrapeReport, to_json_pretty,
};
#[cfg(feature = "fetch")]
pub use scrape::scrape_low_tides;
pub use scrape::TideScraper;
