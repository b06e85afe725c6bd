//! Keyword anchors whose value sits either on the same line or the next one.

use regex::Regex;

use crate::models::{Line, LineSequence};

/// Where an anchor's value is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The line is the bare label; the value is the following line.
    NextLine,
    /// Label and value share the line.
    Inline,
}

/// A case-sensitive keyword that announces a field value.
pub struct Anchor {
    label: &'static str,
    strip: &'static Regex,
}

impl Anchor {
    /// `strip` removes the label (and its separator) from an inline value.
    pub fn new(label: &'static str, strip: &'static Regex) -> Self {
        Self { label, strip }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// `None` when the line does not contain the label.
    pub fn placement(&self, text: &str) -> Option<Placement> {
        if !text.contains(self.label) {
            return None;
        }
        if text.trim() == self.label {
            Some(Placement::NextLine)
        } else {
            Some(Placement::Inline)
        }
    }

    /// Value announced by `line`, if it is an anchor and the value exists.
    pub fn value(&self, lines: &LineSequence, line: &Line) -> Option<String> {
        match self.placement(&line.text)? {
            Placement::NextLine => lines.next_after(line).map(|next| next.text.clone()),
            Placement::Inline => Some(self.strip.replace(&line.text, "").trim().to_string()),
        }
    }
}
