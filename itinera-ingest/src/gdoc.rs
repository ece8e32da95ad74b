//! Google Docs import: flatten a `documents.get` JSON body into plain text.
//!
//! Only the parts that carry text are modelled:
//!   body.content[] -> paragraph.elements[].textRun.content
//!                  -> table.tableRows[].tableCells[].content[] (recursive)
//! Everything else (section breaks, styles, inline objects) is ignored.

use itinera_core::{ImportResponse, Result, TripError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::itinerary::parse_itinerary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedDocument {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    title: String,
    body: Option<Body>,
}

#[derive(Debug, Default, Deserialize)]
struct Body {
    #[serde(default)]
    content: Vec<StructuralElement>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuralElement {
    paragraph: Option<Paragraph>,
    table: Option<Table>,
}

#[derive(Debug, Default, Deserialize)]
struct Paragraph {
    #[serde(default)]
    elements: Vec<ParagraphElement>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParagraphElement {
    text_run: Option<TextRun>,
}

#[derive(Debug, Default, Deserialize)]
struct TextRun {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Table {
    #[serde(default)]
    table_rows: Vec<TableRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableRow {
    #[serde(default)]
    table_cells: Vec<TableCell>,
}

#[derive(Debug, Default, Deserialize)]
struct TableCell {
    #[serde(default)]
    content: Vec<StructuralElement>,
}

/// Parse a Google Docs JSON export into title + plain text.
pub fn extract_document(json: &str) -> Result<ImportedDocument> {
    let doc: Document = serde_json::from_str(json)
        .map_err(|e| TripError::InvalidDocument(format!("not a Google Docs document: {}", e)))?;
    let body = doc
        .body
        .ok_or_else(|| TripError::InvalidDocument("document has no body".to_string()))?;

    let mut text = String::new();
    collect_text(&body.content, &mut text);
    debug!(title = %doc.title, chars = text.len(), "extracted document text");

    Ok(ImportedDocument {
        title: doc.title,
        text,
    })
}

fn collect_text(elements: &[StructuralElement], out: &mut String) {
    for el in elements {
        if let Some(p) = &el.paragraph {
            for run in p.elements.iter().filter_map(|e| e.text_run.as_ref()) {
                out.push_str(&run.content);
            }
        }
        if let Some(t) = &el.table {
            for cell in t.table_rows.iter().flat_map(|r| r.table_cells.iter()) {
                collect_text(&cell.content, out);
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }
}

/// Import a document and parse its text, shaped like the import endpoint's
/// response body.
pub fn import_document(json: &str, destination: &str, total_days: u32) -> Result<ImportResponse> {
    let doc = extract_document(json)?;
    let itinerary = parse_itinerary(&doc.text, destination, total_days);
    Ok(ImportResponse::new(doc.title, doc.text, itinerary))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
      "title": "Tokyo Spring",
      "body": {
        "content": [
          { "sectionBreak": {} },
          { "paragraph": { "elements": [ { "textRun": { "content": "Day 1\n" } } ] } },
          { "paragraph": { "elements": [
              { "textRun": { "content": "- Shibuya " } },
              { "textRun": { "content": "Crossing walk\n" } }
          ] } },
          { "table": { "tableRows": [ { "tableCells": [
              { "content": [ { "paragraph": { "elements": [ { "textRun": { "content": "Day 2" } } ] } } ] },
              { "content": [ { "paragraph": { "elements": [ { "textRun": { "content": "- Tsukiji market breakfast\n" } } ] } } ] }
          ] } ] } }
        ]
      }
    }"#;

    #[test]
    fn test_extract_document_text() {
        let doc = extract_document(DOC).unwrap();
        assert_eq!(doc.title, "Tokyo Spring");
        assert_eq!(doc.text, "Day 1\n- Shibuya Crossing walk\nDay 2\n- Tsukiji market breakfast\n");
    }

    #[test]
    fn test_missing_body_is_error() {
        let err = extract_document(r#"{"title": "x"}"#).unwrap_err();
        assert!(matches!(err, TripError::InvalidDocument(_)));
        assert!(extract_document("not json").is_err());
    }

    #[test]
    fn test_import_document_parses() {
        let resp = import_document(DOC, "Tokyo", 2).unwrap();
        assert!(resp.success);
        assert_eq!(resp.document_title, "Tokyo Spring");
        assert_eq!(resp.itinerary.activities.len(), 2);
        assert_eq!(resp.itinerary.activities[1].day, 2);
    }
}
