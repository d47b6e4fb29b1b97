//! Text extraction.

use super::{Node, NodeKind};

/// The flavours of character data a text extraction can include.
///
/// Text directly inside `<script>`, `<style>` and `<template>` is classified
/// separately so that the default extraction skips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    /// Ordinary character data.
    Text,
    /// Character data inside `<script>`.
    Script,
    /// Character data inside `<style>`.
    Stylesheet,
    /// Character data inside `<template>`.
    Template,
    /// A comment.
    Comment,
    /// A doctype declaration.
    Doctype,
    /// A processing instruction.
    ProcessingInstruction,
}

impl TextKind {
    /// The kinds included when the caller does not choose.
    pub const DEFAULT: &'static [Self] = &[Self::Text];

    /// Parses a kind from its label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "text" | "string" | "navigablestring" | "cdata" => Some(Self::Text),
            "script" => Some(Self::Script),
            "stylesheet" | "style" => Some(Self::Stylesheet),
            "template" | "templatestring" => Some(Self::Template),
            "comment" => Some(Self::Comment),
            "doctype" => Some(Self::Doctype),
            "processinginstruction" | "processing_instruction" => {
                Some(Self::ProcessingInstruction)
            }
            _ => None,
        }
    }
}

/// How [`Node::get_text`] joins the strings it collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOptions {
    /// Inserted between consecutive strings.
    pub separator: String,
    /// Trim each string and drop the ones left empty.
    pub strip: bool,
    /// Which kinds of strings to include.
    pub types: Vec<TextKind>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            separator: String::new(),
            strip: false,
            types: TextKind::DEFAULT.to_vec(),
        }
    }
}

impl Node {
    /// The kind of character data this node holds, if any.
    pub fn text_kind(&self) -> Option<TextKind> {
        match self.kind() {
            NodeKind::Text => Some(
                match self.parent().as_ref().and_then(Node::name) {
                    Some("script") => TextKind::Script,
                    Some("style") => TextKind::Stylesheet,
                    Some("template") => TextKind::Template,
                    _ => TextKind::Text,
                },
            ),
            NodeKind::Comment => Some(TextKind::Comment),
            NodeKind::Doctype => Some(TextKind::Doctype),
            NodeKind::ProcessingInstruction => Some(TextKind::ProcessingInstruction),
            NodeKind::Document | NodeKind::Fragment | NodeKind::Element => None,
        }
    }

    /// Every string of an allowed kind at or below this node.
    pub fn strings(&self, strip: bool, types: &[TextKind]) -> Vec<String> {
        let candidates: Vec<Self> = if self.text_kind().is_some() {
            vec![self.clone()]
        } else {
            self.descendants().collect()
        };

        candidates
            .iter()
            .filter(|candidate| {
                candidate
                    .text_kind()
                    .is_some_and(|kind| types.contains(&kind))
            })
            .filter_map(|candidate| {
                let text = candidate.text()?;
                if !strip {
                    return Some(text.to_owned());
                }
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            })
            .collect()
    }

    /// All ordinary strings, trimmed, with empty ones dropped.
    pub fn stripped_strings(&self) -> Vec<String> {
        self.strings(true, TextKind::DEFAULT)
    }

    /// The strings below this node joined with a separator.
    pub fn get_text(&self, options: &TextOptions) -> String {
        self.strings(options.strip, &options.types)
            .join(&options.separator)
    }
}
