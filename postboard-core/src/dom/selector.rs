//! Selector subset: tag, `#id`, `.class`, `[attr]`, `[attr=value]`,
//! joined by descendant (whitespace) or child (`>`) combinators.

use super::{Document, NodeId};
use crate::error::{DomError, DomResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrCondition {
    Exists(String),
    Equals(String, String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SelectorStep {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCondition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// A compound step and how it relates to the step before it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectorPart {
    step: SelectorStep,
    combinator: Option<Combinator>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selector {
    parts: Vec<SelectorPart>,
}

impl Selector {
    pub(crate) fn parse(selector: &str) -> DomResult<Self> {
        let unsupported = || DomError::UnsupportedSelector(selector.to_string());

        let mut parts: Vec<SelectorPart> = Vec::new();
        let mut pending = None;
        for token in tokenize_selector(selector)? {
            if token == ">" {
                if parts.is_empty() || pending.is_some() {
                    return Err(unsupported());
                }
                pending = Some(Combinator::Child);
                continue;
            }
            let step = parse_selector_step(&token).ok_or_else(unsupported)?;
            let combinator = if parts.is_empty() {
                None
            } else {
                Some(pending.take().unwrap_or(Combinator::Descendant))
            };
            parts.push(SelectorPart { step, combinator });
        }

        if parts.is_empty() || pending.is_some() {
            return Err(unsupported());
        }
        Ok(Self { parts })
    }

    /// Match the last step against `node`, then walk ancestors for the rest.
    pub(crate) fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.parts
            .len()
            .checked_sub(1)
            .is_some_and(|last| self.matches_part(doc, node, last))
    }

    /// Whether `node` matches part `index` with all earlier parts satisfied
    /// by its ancestors. Descendant steps try every matching ancestor, so a
    /// later `>` step can still succeed further up the tree.
    fn matches_part(&self, doc: &Document, node: NodeId, index: usize) -> bool {
        let Some(part) = self.parts.get(index) else {
            return false;
        };
        if !matches_step(doc, node, &part.step) {
            return false;
        }
        let Some(previous) = index.checked_sub(1) else {
            return true;
        };

        match part.combinator.unwrap_or(Combinator::Descendant) {
            Combinator::Child => doc
                .parent(node)
                .is_some_and(|parent| self.matches_part(doc, parent, previous)),
            Combinator::Descendant => {
                let mut cursor = doc.parent(node);
                while let Some(ancestor) = cursor {
                    if self.matches_part(doc, ancestor, previous) {
                        return true;
                    }
                    cursor = doc.parent(ancestor);
                }
                false
            }
        }
    }
}

fn matches_step(doc: &Document, node: NodeId, step: &SelectorStep) -> bool {
    let Some(element) = doc.element(node) else {
        return false;
    };
    if let Some(tag) = &step.tag
        && !element.tag_name().eq_ignore_ascii_case(tag)
    {
        return false;
    }
    if let Some(id) = &step.id
        && element.attr("id") != Some(id.as_str())
    {
        return false;
    }
    if !step.classes.iter().all(|class| element.has_class(class)) {
        return false;
    }
    step.attrs.iter().all(|condition| match condition {
        AttrCondition::Exists(name) => element.attr(name).is_some(),
        AttrCondition::Equals(name, value) => element.attr(name) == Some(value.as_str()),
    })
}

impl Document {
    /// First descendant of `scope` (document order) matching `selector`.
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .find(|node| selector.matches(self, *node)))
    }

    /// All descendants of `scope` matching `selector`, in document order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .filter(|node| selector.matches(self, *node))
            .collect())
    }
}

fn tokenize_selector(selector: &str) -> DomResult<Vec<String>> {
    let unsupported = || DomError::UnsupportedSelector(selector.to_string());

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    let mut quote: Option<char> = None;

    for ch in selector.chars() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            current.push(ch);
            continue;
        }
        match ch {
            '\'' | '"' if in_brackets => {
                quote = Some(ch);
                current.push(ch);
            }
            '[' => {
                if in_brackets {
                    return Err(unsupported());
                }
                in_brackets = true;
                current.push(ch);
            }
            ']' => {
                if !in_brackets {
                    return Err(unsupported());
                }
                in_brackets = false;
                current.push(ch);
            }
            '>' if !in_brackets => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(">".to_string());
            }
            ',' | '+' | '~' | '(' | ')' | ':' | '*' if !in_brackets => {
                return Err(unsupported());
            }
            ch if ch.is_whitespace() && !in_brackets => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if in_brackets || quote.is_some() {
        return Err(unsupported());
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

fn parse_selector_step(part: &str) -> Option<SelectorStep> {
    let bytes = part.as_bytes();
    let mut i = 0usize;
    let mut step = SelectorStep::default();

    while i < bytes.len() {
        match bytes[i] {
            b'#' => {
                let (id, next) = parse_selector_ident(part, i + 1)?;
                if step.id.replace(id).is_some() {
                    return None;
                }
                i = next;
            }
            b'.' => {
                let (class_name, next) = parse_selector_ident(part, i + 1)?;
                step.classes.push(class_name);
                i = next;
            }
            b'[' => {
                let (condition, next) = parse_selector_attr_condition(part, i)?;
                step.attrs.push(condition);
                i = next;
            }
            _ if i == 0 => {
                let (tag, next) = parse_selector_ident(part, i)?;
                step.tag = Some(tag.to_ascii_lowercase());
                i = next;
            }
            _ => return None,
        }
    }

    let empty =
        step.tag.is_none() && step.id.is_none() && step.classes.is_empty() && step.attrs.is_empty();
    (!empty).then_some(step)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn parse_selector_ident(part: &str, start: usize) -> Option<(String, usize)> {
    let len = part.as_bytes()[start..]
        .iter()
        .take_while(|b| is_ident_byte(**b))
        .count();
    (len > 0).then(|| (part[start..start + len].to_string(), start + len))
}

/// Parse `[name]` or `[name=value]` starting at the `[` at `start`.
fn parse_selector_attr_condition(part: &str, start: usize) -> Option<(AttrCondition, usize)> {
    let rest = part.get(start + 1..)?;
    let mut quote: Option<char> = None;
    let mut close = None;
    for (offset, ch) in rest.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '\'' || ch == '"' => quote = Some(ch),
            None if ch == ']' => {
                close = Some(offset);
                break;
            }
            None => {}
        }
    }
    let close = close?;
    let body = rest[..close].trim();

    let condition = match body.split_once('=') {
        None => AttrCondition::Exists(attr_name(body)?),
        Some((name, value)) => AttrCondition::Equals(attr_name(name.trim())?, unquote(value.trim())?),
    };
    Some((condition, start + 1 + close + 1))
}

fn attr_name(name: &str) -> Option<String> {
    (!name.is_empty() && name.bytes().all(is_ident_byte)).then(|| name.to_ascii_lowercase())
}

fn unquote(value: &str) -> Option<String> {
    for q in ['\'', '"'] {
        if let Some(inner) = value.strip_prefix(q) {
            return inner.strip_suffix(q).map(ToOwned::to_owned);
        }
    }
    let bare = !value.is_empty()
        && !value
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '"');
    bare.then(|| value.to_string())
}
