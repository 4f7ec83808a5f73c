//! Location name normalization.
//!
//! Turns a human-readable `"<beach>, <city>"` label into the hyphenated path
//! segments the tide site uses in its URLs.
//!
//! # Example
//!
//! ```rust
//! use lowtide_core::normalize;
//!
//! let location = normalize("Main Beach, Anytown").unwrap();
//! assert_eq!(location.primary, "Main-Beach-Anytown");
//! assert_eq!(location.fallback, "Main-Beach");
//! ```

use crate::{LowtideError, Result};

/// Separator between the beach and the city in an input line.
pub const LOCATION_SEPARATOR: &str = ", ";

/// The two URL path candidates derived from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLocation {
    /// `"<beach> <city>"` with spaces replaced by hyphens. Also the result key.
    pub primary: String,
    /// `<beach>` alone with spaces replaced by hyphens.
    pub fallback: String,
}

/// Splits `raw` on `", "` into exactly a beach and a city and hyphenates both
/// candidates.
///
/// Case is preserved. A line without the separator, or with more than one,
/// is rejected with [`LowtideError::InputFormat`].
pub fn normalize(raw: &str) -> Result<NormalizedLocation> {
    let mut parts = raw.split(LOCATION_SEPARATOR);
    let (Some(beach), Some(city), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(LowtideError::InputFormat { input: raw.to_string() });
    };

    Ok(NormalizedLocation {
        primary: hyphenate(&format!("{} {}", beach, city)),
        fallback: hyphenate(beach),
    })
}

fn hyphenate(s: &str) -> String {
    s.replace(' ', "-")
}
