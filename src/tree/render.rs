//! Serialization back to markup, flat or pretty-printed.

use ego_tree::NodeRef;

use super::Node;

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr", "basefont", "bgsound", "frame", "keygen",
];

/// Elements whose text is emitted without entity substitution.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose content is never re-indented.
const PREFORMATTED_ELEMENTS: &[&str] = &["pre", "textarea"];

/// How characters and void elements are written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Formatter {
    /// Escape `&`, `<` and `>` (and `"` in attributes); close void elements
    /// as `<br/>`.
    #[default]
    Minimal,
    /// Like [`Formatter::Minimal`], but void elements are written as `<br>`
    /// and empty attributes as bare names.
    ///
    /// Characters are escaped exactly as [`Formatter::Minimal`] escapes them.
    /// Named entities are never substituted, so `é` stays `é` and is not
    /// written as `&eacute;`.
    Html5,
    /// Write character data exactly as parsed.
    Verbatim,
}

impl Formatter {
    /// Parses a formatter from its label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "minimal" | "html" => Some(Self::Minimal),
            "html5" => Some(Self::Html5),
            "none" | "verbatim" => Some(Self::Verbatim),
            _ => None,
        }
    }

    fn write_text(self, text: &str, out: &mut String) {
        if self == Self::Verbatim {
            out.push_str(text);
            return;
        }
        for character in text.chars() {
            match character {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                other => out.push(other),
            }
        }
    }

    fn write_attribute_value(self, value: &str, out: &mut String) {
        if self == Self::Verbatim {
            out.push_str(value);
            return;
        }
        for character in value.chars() {
            match character {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                other => out.push(other),
            }
        }
    }

    const fn void_close(self) -> &'static str {
        match self {
            Self::Html5 => ">",
            Self::Minimal | Self::Verbatim => "/>",
        }
    }
}

/// Serialization settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Character and void-element handling.
    pub formatter: Formatter,
    /// Put every tag and string on its own indented line.
    pub pretty_print: bool,
    /// Depth of the outermost rendered node when pretty printing.
    pub indent_level: usize,
    /// Spaces per depth level when pretty printing.
    pub indent: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            formatter: Formatter::Minimal,
            pretty_print: false,
            indent_level: 0,
            indent: 1,
        }
    }
}

impl RenderOptions {
    /// Pretty-printing settings with the given formatter.
    pub fn pretty(formatter: Formatter) -> Self {
        Self {
            formatter,
            pretty_print: true,
            ..Self::default()
        }
    }
}

struct Renderer<'o> {
    options: &'o RenderOptions,
    out: String,
}

impl Renderer<'_> {
    fn indent(&mut self, depth: usize) {
        let width = depth * self.options.indent;
        self.out.extend(std::iter::repeat_n(' ', width));
    }

    fn line(&mut self, depth: usize, pretty: bool, content: &str) {
        if pretty {
            self.indent(depth);
        }
        self.out.push_str(content);
        if pretty {
            self.out.push('\n');
        }
    }

    fn node(&mut self, node: NodeRef<'_, scraper::Node>, depth: usize, pretty: bool) {
        match node.value() {
            scraper::Node::Document | scraper::Node::Fragment => {
                for child in node.children() {
                    self.node(child, depth, pretty);
                }
            }
            scraper::Node::Doctype(doctype) => {
                self.line(depth, pretty, &format!("<!DOCTYPE {}>", doctype.name()));
            }
            scraper::Node::Comment(comment) => {
                self.line(depth, pretty, &format!("<!--{}-->", &**comment));
            }
            scraper::Node::ProcessingInstruction(instruction) => {
                self.line(
                    depth,
                    pretty,
                    &format!("<?{} {}>", &*instruction.target, &*instruction.data),
                );
            }
            scraper::Node::Text(text) => self.text(node, text, depth, pretty),
            scraper::Node::Element(_) => self.element(node, depth, pretty),
        }
    }

    fn text(&mut self, node: NodeRef<'_, scraper::Node>, text: &str, depth: usize, pretty: bool) {
        let raw = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|parent| RAW_TEXT_ELEMENTS.contains(&parent.name()));
        let text = if pretty { text.trim() } else { text };
        if pretty && text.is_empty() {
            return;
        }

        if pretty {
            self.indent(depth);
        }
        if raw {
            self.out.push_str(text);
        } else {
            self.options.formatter.write_text(text, &mut self.out);
        }
        if pretty {
            self.out.push('\n');
        }
    }

    fn open_tag(&mut self, element: &scraper::node::Element, void: bool) {
        let formatter = self.options.formatter;
        self.out.push('<');
        self.out.push_str(element.name());
        for (name, value) in element.attrs() {
            self.out.push(' ');
            self.out.push_str(name);
            if formatter == Formatter::Html5 && value.is_empty() {
                continue;
            }
            self.out.push_str("=\"");
            formatter.write_attribute_value(value, &mut self.out);
            self.out.push('"');
        }
        self.out
            .push_str(if void { formatter.void_close() } else { ">" });
    }

    fn element(&mut self, node: NodeRef<'_, scraper::Node>, depth: usize, pretty: bool) {
        let Some(element) = node.value().as_element() else {
            return;
        };
        let name = element.name();
        let void = VOID_ELEMENTS.contains(&name) && !node.has_children();

        if pretty {
            self.indent(depth);
        }
        self.open_tag(element, void);
        if void {
            if pretty {
                self.out.push('\n');
            }
            return;
        }

        let preformatted = PREFORMATTED_ELEMENTS.contains(&name);
        if pretty && !preformatted {
            self.out.push('\n');
        }
        for child in node.children() {
            self.node(child, depth + 1, pretty && !preformatted);
        }
        if pretty && !preformatted {
            self.indent(depth);
        }
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
        if pretty {
            self.out.push('\n');
        }
    }
}

impl Node {
    /// This node and everything below it as markup.
    pub fn decode(&self, options: &RenderOptions) -> String {
        let mut renderer = Renderer {
            options,
            out: String::new(),
        };
        renderer.node(self.node_ref(), options.indent_level, options.pretty_print);
        renderer.out
    }

    /// Everything below this node as markup, without the node's own tags.
    pub fn decode_contents(&self, options: &RenderOptions) -> String {
        let mut renderer = Renderer {
            options,
            out: String::new(),
        };
        for child in self.node_ref().children() {
            renderer.node(child, options.indent_level, options.pretty_print);
        }
        renderer.out
    }

    /// The node pretty-printed, one tag or string per line.
    pub fn prettify(&self, formatter: Formatter) -> String {
        self.decode(&RenderOptions::pretty(formatter))
    }
}
