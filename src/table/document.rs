use std::collections::BTreeMap;

use log::info;
use roxmltree::{Node, ParsingOptions};

use crate::error::Error;
use crate::table::cell::{Cell, CellId, Segment};

// XML only knows its five predefined entities. The opcode tables pad their width/cycles text
// with &nbsp;, so it gets swapped for the equivalent character reference before parsing.
const HTML_ENTITIES: [(&str, &str); 1] = [("&nbsp;", "&#160;")];

/// A parsed (X)HTML document: the source markup, every table in it, and any text edits that
/// have been made to those tables since parsing.
pub struct Document {
    source: String,
    tables: Vec<Table>,
    // Keyed by the start of the replaced span.
    edits: BTreeMap<usize, Edit>,
}

struct Edit {
    end: usize,
    text: String,
}

impl Document {
    pub fn parse(markup: &str) -> Result<Document, Error> {
        let mut source = markup.to_string();
        for (entity, reference) in HTML_ENTITIES {
            source = source.replace(entity, reference);
        }

        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let tables: Vec<Table> = {
            let doc = roxmltree::Document::parse_with_options(&source, options)?;
            doc.descendants()
                .filter(|node| is_tag(node, "table"))
                .enumerate()
                .map(|(index, node)| Table::from_node(index + 1, node))
                .collect()
        };

        info!(target: "tables", "Parsed document with {} table(s).", tables.len());
        Ok(Document { source, tables, edits: BTreeMap::new() })
    }

    /// Looks up a table by its 1-based position among all tables in the document.
    pub fn table(&self, selector: usize) -> Result<&Table, Error> {
        selector.checked_sub(1)
            .and_then(|index| self.tables.get(index))
            .ok_or(Error::MissingTable { selector, table_count: self.tables.len() })
    }

    pub fn has_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Replaces the width/cycles text of a cell, both in the parsed table and in the markup
    /// that to_markup() will produce. Returns false if the cell doesn't exist or its
    /// width/cycles segment has no plain text to replace.
    pub(crate) fn set_info_text(&mut self, selector: usize, id: CellId, text: String) -> bool {
        let Some(segment) = selector.checked_sub(1)
            .and_then(|index| self.tables.get_mut(index))
            .and_then(|table| table.cell_mut(id))
            .and_then(Cell::info_mut)
        else {
            return false;
        };

        let Some(span) = segment.text_span() else {
            return false;
        };

        self.edits.insert(span.start, Edit { end: span.end, text: text.clone() });
        segment.set_text(text);
        true
    }

    /// Serializes the document back to markup, with every edit applied.
    pub fn to_markup(&self) -> String {
        let mut markup = String::with_capacity(self.source.len());
        let mut position = 0;
        for (&start, edit) in &self.edits {
            markup.push_str(&self.source[position..start]);
            markup.push_str(&escape(&edit.text));
            position = edit.end;
        }

        markup.push_str(&self.source[position..]);
        markup
    }
}

pub struct Table {
    selector: usize,
    rows: Vec<Row>,
}

impl Table {
    // Mirrors "tbody > tr:not(:first-child) > td:not(:first-child)": the first row of each
    // body holds the column headers and the first cell of each row holds the row header.
    fn from_node(selector: usize, node: Node) -> Table {
        let mut bodies: Vec<Node> = node.children()
            .filter(|child| is_tag(child, "tbody"))
            .collect();
        // Browsers wrap bare rows in an implicit tbody.
        if bodies.is_empty() {
            bodies.push(node);
        }

        let mut rows = Vec::new();
        for body in bodies {
            let data_rows = body.children()
                .filter(|child| is_tag(child, "tr"))
                .skip(1);
            for tr in data_rows {
                let row = rows.len();
                let cells = tr.children()
                    .filter(Node::is_element)
                    .skip(1)
                    .filter(|child| is_tag(child, "td"))
                    .enumerate()
                    .map(|(column, td)| Cell::new(CellId { row, column }, segments(td)))
                    .collect();
                rows.push(Row { cells });
            }
        }

        Table { selector, rows }
    }

    pub fn selector(&self) -> usize {
        self.selector
    }

    /// Every data cell in row-major order. A cell's position in this sequence is its opcode.
    pub fn data_cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }

    pub fn data_cell_count(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).sum()
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.rows.get(id.row)?.cells.get(id.column)
    }

    fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.rows.get_mut(id.row)?.cells.get_mut(id.column)
    }
}

pub struct Row {
    cells: Vec<Cell>,
}

// Comments and processing instructions are not segments, unlike a browser's childNodes.
fn segments(td: Node) -> Vec<Segment> {
    td.children()
        .filter_map(|child| {
            if child.is_text() {
                let text = child.text().unwrap_or_default().to_string();
                Some(Segment::plain(text, child.range()))
            } else if child.is_element() {
                Some(Segment::element(text_content(child), sole_text_span(child)))
            } else {
                None
            }
        })
        .collect()
}

fn text_content(node: Node) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|text| text.text())
        .collect()
}

// An element's text can only be rewritten in place if it is a single text node.
fn sole_text_span(node: Node) -> Option<std::ops::Range<usize>> {
    let mut children = node.children();
    match (children.next(), children.next()) {
        (Some(child), None) if child.is_text() => Some(child.range()),
        _ => None,
    }
}

fn is_tag(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
