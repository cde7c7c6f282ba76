use std::ops::Range;

use itertools::Itertools;

pub const LABEL_SEGMENT: usize = 0;
// Segment 1 is the <br> between the label and the width/cycles text.
pub const INFO_SEGMENT: usize = 2;

/// Row and column of a data cell, after the header row and header column are dropped.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CellId {
    pub row: usize,
    pub column: usize,
}

#[derive(Clone, Debug)]
pub struct Cell {
    id: CellId,
    segments: Vec<Segment>,
}

impl Cell {
    pub fn new(id: CellId, segments: Vec<Segment>) -> Cell {
        Cell { id, segments }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    // An undefined opcode's cell has no child elements at all, though it may still contain
    // whitespace or a lone &nbsp;.
    pub fn is_populated(&self) -> bool {
        self.segments.iter().any(Segment::is_element)
    }

    pub fn label(&self) -> Option<&str> {
        self.segments.get(LABEL_SEGMENT).map(Segment::text)
    }

    pub fn info(&self) -> Option<&Segment> {
        self.segments.get(INFO_SEGMENT)
    }

    /// Splits the width/cycles segment into exactly two tokens.
    pub fn info_tokens(&self) -> Option<(&str, &str)> {
        self.info()?.text().split_whitespace().collect_tuple()
    }

    pub(crate) fn info_mut(&mut self) -> Option<&mut Segment> {
        self.segments.get_mut(INFO_SEGMENT)
    }
}

/// One child node of a cell: its text content, plus where that text lives in the source
/// markup if it can be rewritten in place.
#[derive(Clone, Debug)]
pub struct Segment {
    is_element: bool,
    text: String,
    text_span: Option<Range<usize>>,
}

impl Segment {
    pub fn plain(text: String, span: Range<usize>) -> Segment {
        Segment { is_element: false, text, text_span: Some(span) }
    }

    pub fn element(text: String, text_span: Option<Range<usize>>) -> Segment {
        Segment { is_element: true, text, text_span }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_element(&self) -> bool {
        self.is_element
    }

    pub fn text_span(&self) -> Option<Range<usize>> {
        self.text_span.clone()
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(texts: &[&str]) -> Cell {
        let segments = texts.iter()
            .map(|&text| {
                if text == "<br>" {
                    Segment::element(String::new(), None)
                } else {
                    Segment::plain(text.to_string(), 0..text.len())
                }
            })
            .collect();
        Cell::new(CellId { row: 0, column: 0 }, segments)
    }

    #[test]
    fn populated_cell() {
        let cell = cell(&["JR NZ,r8", "<br>", "2\u{a0}\u{a0}12/8", "<br>", "- - - -"]);
        assert!(cell.is_populated());
        assert_eq!(cell.label(), Some("JR NZ,r8"));
        assert_eq!(cell.info_tokens(), Some(("2", "12/8")));
    }

    #[test]
    fn whitespace_only_cell_is_empty() {
        let cell = cell(&["\u{a0}"]);
        assert!(!cell.is_populated());
    }

    #[test]
    fn info_must_have_exactly_two_tokens() {
        assert_eq!(cell(&["NOP", "<br>", "1"]).info_tokens(), None);
        assert_eq!(cell(&["NOP", "<br>", "1  4  8"]).info_tokens(), None);
        assert_eq!(cell(&["NOP", "<br>"]).info_tokens(), None);
    }
}
