//! Labeled element construction

use super::{Document, NodeId};

/// Recipe for a single element holding one text label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledElement<'a> {
    pub tag: &'a str,
    pub text: &'a str,
    pub class: Option<&'a str>,
}

impl Default for LabeledElement<'_> {
    fn default() -> Self {
        Self {
            tag: "p",
            text: "",
            class: None,
        }
    }
}

impl<'a> LabeledElement<'a> {
    #[must_use]
    pub fn new(tag: &'a str) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    /// A `<p>` with the given text.
    #[must_use]
    pub fn paragraph(text: &'a str) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: &'a str) -> Self {
        self.text = text;
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }
}

/// Create a detached element with its text and optional class applied.
///
/// An empty class is treated as no class.
pub fn build_labeled_element(doc: &mut Document, labeled: &LabeledElement<'_>) -> NodeId {
    let element = doc.create_element(labeled.tag);
    if !labeled.text.is_empty() {
        let text = doc.create_text(labeled.text);
        doc.adopt(element, text);
    }
    if let Some(class) = labeled.class.filter(|c| !c.is_empty())
        && let Ok(data) = doc.element_mut(element)
    {
        data.set_attr("class", class);
    }
    element
}
