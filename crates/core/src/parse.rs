//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! a tide page and navigating it using CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use lowtide_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <div id="main"><section><table><tr><td>Sunrise</td></tr></table></section></div>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! let table = doc.select_first("#main > section > table").unwrap();
//! assert!(table.is_some());
//! ```

use scraper::{Html, Selector};

use crate::{LowtideError, Result};

/// Represents a parsed HTML document.
///
/// Parsing is lenient: any byte soup yields a document, possibly without the
/// elements a caller is looking for.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`LowtideError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lowtide_core::parse::Document;
    ///
    /// let html = r#"<table><tr><td>a</td><td>b</td></tr></table>"#;
    /// let doc = Document::parse(html);
    /// let cells = doc.select("td").unwrap();
    /// assert_eq!(cells.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a CSS selector, if any.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use lowtide_core::parse::Document;
///
/// let html = r#"<table><tr><td>Low Tide</td></tr></table>"#;
/// let doc = Document::parse(html);
/// let cell = &doc.select("td").unwrap()[0];
///
/// assert_eq!(cell.text(), "Low Tide");
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all descendant text nodes, untrimmed.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`LowtideError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| LowtideError::HtmlParseError(format!("Invalid selector: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <title>Main Beach Tide Times</title>
        </head>
        <body>
            <div id="main">
                <section>
                    <table class="tide-table">
                        <tr><td>7:02 AM</td><td>Sunrise</td></tr>
                        <tr><td> <b>9:15 AM</b> </td><td>Low Tide</td></tr>
                    </table>
                </section>
            </div>
        </body>
        </html>
    "#;

    #[test]
    fn test_select_first() {
        let doc = Document::parse(SAMPLE_HTML);
        let table = doc.select_first("#main > section > table").unwrap().unwrap();

        assert_eq!(table.select("tr").unwrap().len(), 2);
    }

    #[test]
    fn test_parse_is_lenient() {
        let doc = Document::parse("<td>Sunrise<tr><<p>");
        assert!(doc.select_first("#main > section > table").unwrap().is_none());
    }

    #[test]
    fn test_select_first_missing() {
        let doc = Document::parse("<html><body><p>Not found</p></body></html>");
        assert!(doc.select_first("#main > section > table").unwrap().is_none());
    }

    #[test]
    fn test_nested_text_is_concatenated() {
        let doc = Document::parse(SAMPLE_HTML);
        let rows = doc.select("tr").unwrap();
        let cells = rows[1].select("td").unwrap();

        assert_eq!(cells[0].text(), " 9:15 AM ");
        assert_eq!(cells[1].text(), "Low Tide");
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML);
        let result = doc.select("[[invalid");

        assert!(matches!(result, Err(LowtideError::HtmlParseError(_))));
    }
}
