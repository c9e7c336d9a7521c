//! HTML serialization

use super::{Document, NodeId, NodeKind};

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

impl Document {
    /// Serialize `node` and its subtree. Released nodes serialize to `""`.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    /// Serialize the children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            self.write_node(*child, &mut out);
        }
        out
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        let Some(kind) = self.kind(node) else {
            return;
        };
        match kind {
            NodeKind::Document | NodeKind::Fragment => {
                for child in self.children(node) {
                    self.write_node(*child, out);
                }
            }
            NodeKind::Text(text) => escape_into(text, false, out),
            NodeKind::Element(element) => {
                out.push('<');
                out.push_str(element.tag_name());
                for (name, value) in element.attrs() {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(value, true, out);
                    out.push('"');
                }
                if element.is_disabled() && element.attr("disabled").is_none() {
                    out.push_str(" disabled");
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.tag_name()) {
                    return;
                }
                for child in self.children(node) {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(element.tag_name());
                out.push('>');
            }
        }
    }
}

fn escape_into(raw: &str, attribute: bool, out: &mut String) {
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
