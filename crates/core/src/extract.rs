//! Daylight low-tide extraction from a tide table.
//!
//! The tide table lists one event per row. Cells are read right to left:
//! the rightmost cell names the event (`Sunrise`, `Sunset`, `Low Tide`, ...)
//! and the others hold its height and time at fixed offsets described by
//! [`ColumnLayout`].
//!
//! Extraction is a single pass with two states. Rows are ignored until a
//! `Sunrise` row is seen; from then until the next `Sunset` row every
//! `Low Tide` row is recorded. Each `Sunrise` starts a new day, and
//! [`ExtractConfig::max_days`] can stop the scan at the end of a given day.

use serde::Deserialize;

use crate::parse::{Document, Element};
use crate::results::LowTides;
use crate::{LowtideError, Result};

/// CSS equivalent of `//*[@id="main"]/section/table`.
pub const DEFAULT_TABLE_SELECTOR: &str = "#main > section > table";

const SUNRISE_LABEL: &str = "Sunrise";
const SUNSET_LABEL: &str = "Sunset";
const LOW_TIDE_LABEL: &str = "Low Tide";

/// Positions of the cells this extractor reads, counted from the last cell
/// of a row backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    /// Cell naming the event.
    pub label: usize,
    /// Cell holding the parenthesized height of a Low Tide row.
    pub height: usize,
    /// Cell holding the time of a Low Tide row.
    pub time: usize,
}

impl ColumnLayout {
    /// Number of cells a Low Tide row needs.
    pub fn required_cells(&self) -> usize {
        self.label.max(self.height).max(self.time) + 1
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self { label: 0, height: 1, time: 4 }
    }
}

/// Configuration for locating and reading the tide table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// CSS selector of the tide table. The first match is used.
    pub table_selector: String,
    /// Cell positions within a row
    pub layout: ColumnLayout,
    /// Stop after the Sunset of this many days. `None` reads the whole table.
    pub max_days: Option<u32>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { table_selector: DEFAULT_TABLE_SELECTOR.to_string(), layout: ColumnLayout::default(), max_days: None }
    }
}

/// Kind of event a table row describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Sunrise,
    Sunset,
    LowTide,
    Other,
}

impl RowKind {
    /// Classifies a row by its exact label text.
    pub fn from_label(label: &str) -> Self {
        match label {
            SUNRISE_LABEL => RowKind::Sunrise,
            SUNSET_LABEL => RowKind::Sunset,
            LOW_TIDE_LABEL => RowKind::LowTide,
            _ => RowKind::Other,
        }
    }
}

/// One row of the table, cells already reversed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TideRow {
    cells: Vec<String>,
}

impl TideRow {
    /// Builds a row from cell texts in document order.
    pub fn from_document_order<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        cells.reverse();
        Self { cells }
    }

    fn from_element(row: &Element<'_>) -> Result<Self> {
        Ok(Self::from_document_order(row.select("td")?.iter().map(Element::text)))
    }

    /// Rows without cells (header rows made of `th`) count as [`RowKind::Other`].
    pub fn kind(&self, layout: &ColumnLayout) -> RowKind {
        self.cells
            .get(layout.label)
            .map_or(RowKind::Other, |label| RowKind::from_label(label))
    }

    /// Time and height of a Low Tide row.
    ///
    /// The height keeps its text minus the literal parentheses; the time is trimmed.
    fn reading(&self, index: usize, layout: &ColumnLayout) -> Result<(String, String)> {
        let (Some(height), Some(time)) = (self.cells.get(layout.height), self.cells.get(layout.time)) else {
            return Err(LowtideError::DocumentStructure {
                row: index,
                cells: self.cells.len(),
                required: layout.required_cells(),
            });
        };

        Ok((time.trim().to_string(), height.replace(['(', ')'], "")))
    }
}

/// Reads the daylight low tides from already split rows.
///
/// Rows before the first Sunrise, and between a Sunset and the next Sunrise,
/// never produce readings. A repeated time overwrites the earlier height.
///
/// # Errors
///
/// Returns [`LowtideError::DocumentStructure`] for a daylight Low Tide row
/// that is too short for the layout. Short rows outside daylight are not
/// inspected.
pub fn extract_daylight_low_tides(rows: &[TideRow], layout: &ColumnLayout, max_days: Option<u32>) -> Result<LowTides> {
    let mut low_tides = LowTides::new();
    let mut daylight = false;
    let mut days = 0u32;

    for (index, row) in rows.iter().enumerate() {
        let kind = row.kind(layout);

        if kind == RowKind::Sunrise {
            daylight = true;
            days += 1;
            continue;
        }

        if !daylight {
            continue;
        }

        match kind {
            RowKind::Sunset => {
                daylight = false;
                if max_days.is_some_and(|max| days >= max) {
                    break;
                }
            }
            RowKind::LowTide => {
                let (time, height) = row.reading(index, layout)?;
                low_tides.insert(time, height);
            }
            RowKind::Sunrise | RowKind::Other => {}
        }
    }

    Ok(low_tides)
}

/// Splits a table element into rows, in document order.
pub fn table_rows(table: &Element<'_>) -> Result<Vec<TideRow>> {
    table.select("tr")?.iter().map(TideRow::from_element).collect()
}

/// Finds the tide table within a document.
pub fn find_tide_table<'a>(doc: &'a Document, config: &ExtractConfig) -> Result<Option<Element<'a>>> {
    doc.select_first(&config.table_selector)
}

/// Parses a page and extracts its daylight low tides.
///
/// Returns `Ok(None)` when the page has no tide table.
///
/// # Example
///
/// ```rust
/// use lowtide_core::{ExtractConfig, extract_from_html};
///
/// let html = r#"<div id="main"><section><table>
///     <tr><td>6:58 AM</td><td>Sunrise</td></tr>
///     <tr><td>Sat 12</td><td>9:15 AM</td><td></td><td></td><td>(0.4 ft)</td><td>Low Tide</td></tr>
///     <tr><td>7:41 PM</td><td>Sunset</td></tr>
/// </table></section></div>"#;
///
/// let low_tides = extract_from_html(html, &ExtractConfig::default()).unwrap().unwrap();
/// assert_eq!(low_tides.get("9:15 AM"), Some(&"0.4 ft".to_string()));
/// ```
pub fn extract_from_html(html: &str, config: &ExtractConfig) -> Result<Option<LowTides>> {
    let doc = Document::parse(html);
    let Some(table) = find_tide_table(&doc, config)? else {
        return Ok(None);
    };

    let rows = table_rows(&table)?;
    let low_tides = extract_daylight_low_tides(&rows, &config.layout, config.max_days)?;
    tracing::debug!(rows = rows.len(), low_tides = low_tides.len(), "extracted tide table");

    Ok(Some(low_tides))
}
