//! HTML-to-searchable-text normalization.
//!
//! Generic text extraction runs adjacent table cells and definition-list
//! terms together, which makes line-oriented matching unreliable. This crate
//! flattens those structures into explicit tab-separated records first, then
//! extracts the text of everything else:
//!
//! 1. Every `<tr>` becomes one line: each `<td>` text followed by a tab.
//! 2. Every `<dl>` pairs its `<dt>`/`<dd>` elements by position
//!    (`term\tdescription`, no separator between pairs, extras dropped).
//! 3. The remaining tree is flattened with `script`, `style`, `table` and
//!    `dl` subtrees skipped.
//! 4. The result is `remaining + "\n" + tables + "\n" + definitions`.

use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, instrument};

/// Elements whose text never reaches the remaining-text block.
const SKIPPED_TAGS: [&str; 4] = ["script", "style", "table", "dl"];

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A document flattened into plain text, ready for line-by-line matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDocument {
    text: String,
}

impl NormalizedDocument {
    /// The full normalized text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines in document order, untrimmed. Only `\n` and `\r\n` end a line.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.text.lines()
    }
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Flatten an HTML document into searchable text.
///
/// Parsing is best-effort: malformed markup yields whatever structure
/// html5ever recovers, never an error.
#[instrument(skip_all, fields(html_len = html.len()))]
pub fn normalize(html: &str) -> NormalizedDocument {
    let doc = Html::parse_document(html);

    let table_text = table_text(&doc);
    let definition_text = definition_text(&doc);

    let mut remaining = String::new();
    collect_text(doc.root_element(), &mut remaining);

    debug!(
        remaining_len = remaining.len(),
        table_len = table_text.len(),
        definition_len = definition_text.len(),
        "document normalized"
    );

    NormalizedDocument {
        text: format!("{remaining}\n{table_text}\n{definition_text}"),
    }
}

// ---------------------------------------------------------------------------
// Structure flattening
// ---------------------------------------------------------------------------

/// One line per table row, every `<td>` followed by a tab.
fn table_text(doc: &Html) -> String {
    let table_sel = Selector::parse("table").expect("valid selector");
    let tr_sel = Selector::parse("tr").expect("valid selector");
    let td_sel = Selector::parse("td").expect("valid selector");

    let mut text = String::new();

    for table in doc.select(&table_sel) {
        for tr in table.select(&tr_sel) {
            for td in tr.select(&td_sel) {
                text.extend(td.text());
                text.push('\t');
            }
            text.push('\n');
        }
    }

    text
}

/// `term\tdescription` for each positional `<dt>`/`<dd>` pair, unseparated.
fn definition_text(doc: &Html) -> String {
    let dl_sel = Selector::parse("dl").expect("valid selector");
    let dt_sel = Selector::parse("dt").expect("valid selector");
    let dd_sel = Selector::parse("dd").expect("valid selector");

    let mut text = String::new();

    for dl in doc.select(&dl_sel) {
        let terms: Vec<String> = dl.select(&dt_sel).map(element_text).collect();
        let descriptions: Vec<String> = dl.select(&dd_sel).map(element_text).collect();

        for (term, description) in terms.iter().zip(&descriptions) {
            text.push_str(term);
            text.push('\t');
            text.push_str(description);
        }
    }

    text
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Append the text under `el`, skipping [`SKIPPED_TAGS`] subtrees.
fn collect_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) if SKIPPED_TAGS.contains(&element.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
