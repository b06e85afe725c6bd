//! Recognized text lines as delivered by the OCR service.

use serde::{Deserialize, Serialize};

/// One recognized line of text with its reading-order index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Position in reading order. Adjacency lookups use `index + 1`.
    pub index: usize,

    /// Recognized text, untouched.
    pub text: String,
}

impl Line {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Ordered, read-only view of the lines recognized on one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineSequence {
    lines: Vec<Line>,
}

impl LineSequence {
    /// Build a sequence from texts in reading order.
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| Line::new(index, text))
            .collect();
        Self { lines }
    }

    /// One line per line of `text`.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    /// Keep only `LINE` blocks of an OCR block dump, in their original order.
    pub fn from_blocks(blocks: &[OcrBlock]) -> Self {
        Self::new(
            blocks
                .iter()
                .filter(|block| block.is_line())
                .map(|block| block.text.clone().unwrap_or_default()),
        )
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// The line immediately after `line` in reading order.
    ///
    /// `line` must be borrowed from this sequence; any other line yields `None`.
    pub fn next_after(&self, line: &Line) -> Option<&Line> {
        let position = self.lines.iter().position(|l| std::ptr::eq(l, line))?;
        self.lines.get(position + 1)
    }

    pub fn last(&self) -> Option<&Line> {
        self.lines.last()
    }

    /// The line before the last one, if the sequence has at least two lines.
    pub fn second_to_last(&self) -> Option<&Line> {
        self.lines.len().checked_sub(2).and_then(|i| self.lines.get(i))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }
}

impl From<Vec<String>> for LineSequence {
    fn from(texts: Vec<String>) -> Self {
        Self::new(texts)
    }
}

impl<'a> IntoIterator for &'a LineSequence {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Raw block as emitted by the document-text-detection service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrBlock {
    /// Block kind (`PAGE`, `LINE`, `WORD`, ...).
    #[serde(rename = "BlockType")]
    pub block_type: String,

    /// Recognized text; absent on `PAGE` blocks.
    #[serde(rename = "Text", default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl OcrBlock {
    pub fn is_line(&self) -> bool {
        self.block_type == "LINE"
    }
}

/// Top-level document-text-detection response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrDocument {
    #[serde(rename = "Blocks")]
    pub blocks: Vec<OcrBlock>,
}

impl OcrDocument {
    pub fn lines(&self) -> LineSequence {
        LineSequence::from_blocks(&self.blocks)
    }
}
