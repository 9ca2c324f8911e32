//! Rich-text node tree matching the CMS field format.
//!
//! The CMS renders a JSON tree of `nodeType`-tagged objects. Only the node
//! kinds the report needs are modeled; every node carries the empty `data`
//! object the format requires.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
/// The (always empty) `data` object attached to every node.
pub struct NodeData {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Text decoration marker. The report never emits marks, but the wire
/// format requires the `marks` array on text nodes.
pub struct Mark {
    /// Mark kind, e.g. `"bold"`.
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "nodeType")]
/// A node inside a rich-text document.
pub enum Node {
    /// Level-four heading.
    #[serde(rename = "heading-4")]
    Heading4 {
        /// Required empty data object.
        data: NodeData,
        /// Child nodes, typically a single text run.
        content: Vec<Node>,
    },
    /// Table container.
    #[serde(rename = "table")]
    Table {
        /// Required empty data object.
        data: NodeData,
        /// Table rows.
        content: Vec<Node>,
    },
    /// Row inside a table.
    #[serde(rename = "table-row")]
    TableRow {
        /// Required empty data object.
        data: NodeData,
        /// Cells of the row.
        content: Vec<Node>,
    },
    /// Cell inside a table row.
    #[serde(rename = "table-cell")]
    TableCell {
        /// Required empty data object.
        data: NodeData,
        /// Cell content, a single paragraph.
        content: Vec<Node>,
    },
    /// Paragraph of text runs.
    #[serde(rename = "paragraph")]
    Paragraph {
        /// Required empty data object.
        data: NodeData,
        /// Text runs.
        content: Vec<Node>,
    },
    /// Leaf text run.
    #[serde(rename = "text")]
    Text {
        /// The literal text.
        value: String,
        /// Decoration marks, always empty for the report.
        marks: Vec<Mark>,
        /// Required empty data object.
        data: NodeData,
    },
}

impl Node {
    /// Leaf text run with no marks.
    #[must_use]
    pub fn text<S: Into<String>>(value: S) -> Self {
        Node::Text {
            value: value.into(),
            marks: Vec::new(),
            data: NodeData {},
        }
    }

    /// Paragraph wrapping a single text run.
    #[must_use]
    pub fn paragraph<S: Into<String>>(value: S) -> Self {
        Node::Paragraph {
            data: NodeData {},
            content: vec![Node::text(value)],
        }
    }

    /// Table cell holding a single paragraph of text.
    #[must_use]
    pub fn cell<S: Into<String>>(value: S) -> Self {
        Node::TableCell {
            data: NodeData {},
            content: vec![Node::paragraph(value)],
        }
    }

    /// Row built from the given cells.
    #[must_use]
    pub fn row(cells: Vec<Node>) -> Self {
        Node::TableRow {
            data: NodeData {},
            content: cells,
        }
    }

    /// Table built from the given rows.
    #[must_use]
    pub fn table(rows: Vec<Node>) -> Self {
        Node::Table {
            data: NodeData {},
            content: rows,
        }
    }

    /// Level-four heading wrapping a single text run.
    #[must_use]
    pub fn heading<S: Into<String>>(value: S) -> Self {
        Node::Heading4 {
            data: NodeData {},
            content: vec![Node::text(value)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Root of a rich-text tree, one per locale. Never mutated once built.
pub struct Document {
    #[serde(rename = "nodeType")]
    node_type: &'static str,
    data: NodeData,
    content: Vec<Node>,
}

impl Document {
    /// Root document wrapping the given top-level nodes.
    #[must_use]
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            node_type: "document",
            data: NodeData {},
            content,
        }
    }

    /// Top-level nodes of the document.
    #[must_use]
    pub fn content(&self) -> &[Node] {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Document, Node};

    #[test]
    fn text_node_serializes_with_empty_marks_and_data() {
        let value = serde_json::to_value(Node::text("Route A")).expect("serialize");
        assert_eq!(
            value,
            json!({
                "nodeType": "text",
                "value": "Route A",
                "marks": [],
                "data": {},
            })
        );
    }

    #[test]
    fn document_nests_table_cells_through_paragraphs() {
        let document = Document::new(vec![Node::table(vec![Node::row(vec![Node::cell("50.00")])])]);
        let value = serde_json::to_value(&document).expect("serialize");
        assert_eq!(
            value,
            json!({
                "nodeType": "document",
                "data": {},
                "content": [{
                    "nodeType": "table",
                    "data": {},
                    "content": [{
                        "nodeType": "table-row",
                        "data": {},
                        "content": [{
                            "nodeType": "table-cell",
                            "data": {},
                            "content": [{
                                "nodeType": "paragraph",
                                "data": {},
                                "content": [{
                                    "nodeType": "text",
                                    "value": "50.00",
                                    "marks": [],
                                    "data": {},
                                }],
                            }],
                        }],
                    }],
                }],
            })
        );
    }
}
