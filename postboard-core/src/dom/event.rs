//! Event listeners and dispatch

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{Document, NodeId};
use crate::error::DomResult;

/// Supported event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    Change,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Change => "change",
        }
    }
}

/// Event passed to listeners.
///
/// `target` is where the event was dispatched; `current_target` is the node
/// whose listener is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub event_type: EventType,
    pub target: NodeId,
    pub current_target: NodeId,
}

/// Handle returned by [`Document::add_event_listener`]; removal requires the same handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Event listener. Runs synchronously with exclusive access to the document.
pub type Listener = Arc<dyn Fn(&mut Document, &Event) + Send + Sync>;

struct Registration {
    id: ListenerId,
    event_type: EventType,
    listener: Listener,
}

#[derive(Default)]
pub(super) struct ListenerStore {
    next_id: u64,
    by_node: HashMap<NodeId, Vec<Registration>>,
}

impl fmt::Debug for ListenerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerStore")
            .field("nodes", &self.by_node.len())
            .field("registrations", &self.total())
            .finish()
    }
}

impl ListenerStore {
    fn add(&mut self, node: NodeId, event_type: EventType, listener: Listener) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.by_node.entry(node).or_default().push(Registration {
            id,
            event_type,
            listener,
        });
        id
    }

    fn remove(&mut self, node: NodeId, event_type: EventType, id: ListenerId) -> bool {
        let Some(registrations) = self.by_node.get_mut(&node) else {
            return false;
        };
        let before = registrations.len();
        registrations.retain(|r| !(r.id == id && r.event_type == event_type));
        let removed = registrations.len() != before;
        if registrations.is_empty() {
            self.by_node.remove(&node);
        }
        removed
    }

    fn count(&self, node: NodeId, event_type: EventType) -> usize {
        self.by_node.get(&node).map_or(0, |registrations| {
            registrations
                .iter()
                .filter(|r| r.event_type == event_type)
                .count()
        })
    }

    fn snapshot(&self, node: NodeId, event_type: EventType) -> Vec<Listener> {
        self.by_node
            .get(&node)
            .map(|registrations| {
                registrations
                    .iter()
                    .filter(|r| r.event_type == event_type)
                    .map(|r| Arc::clone(&r.listener))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(super) fn remove_node(&mut self, node: NodeId) {
        self.by_node.remove(&node);
    }

    fn total(&self) -> usize {
        self.by_node.values().map(Vec::len).sum()
    }
}

impl Document {
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: EventType,
        listener: Listener,
    ) -> DomResult<ListenerId> {
        self.node(node)?;
        Ok(self.listeners.add(node, event_type, listener))
    }

    /// Detach the registration identified by `id`. Returns `false` if it was not attached.
    pub fn remove_event_listener(
        &mut self,
        node: NodeId,
        event_type: EventType,
        id: ListenerId,
    ) -> bool {
        self.listeners.remove(node, event_type, id)
    }

    pub fn listener_count(&self, node: NodeId, event_type: EventType) -> usize {
        self.listeners.count(node, event_type)
    }

    /// Listeners registered anywhere in the document.
    pub fn total_listener_count(&self) -> usize {
        self.listeners.total()
    }

    /// Fire `event_type` at `target`, then bubble through its ancestors.
    ///
    /// The propagation path and each node's listener list are fixed before
    /// the listeners on that node run. Returns how many listeners ran.
    pub fn dispatch_event(&mut self, target: NodeId, event_type: EventType) -> DomResult<usize> {
        self.node(target)?;

        let mut path = vec![target];
        let mut cursor = self.parent(target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.parent(node);
        }

        let mut invoked = 0;
        for current_target in path {
            let event = Event {
                event_type,
                target,
                current_target,
            };
            for listener in self.listeners.snapshot(current_target, event_type) {
                listener(self, &event);
                invoked += 1;
            }
        }
        log::trace!(
            "Dispatched {} at {target}: {invoked} listener(s)",
            event_type.as_str()
        );
        Ok(invoked)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, Listener) {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let listener: Listener = Arc::new(move |_: &mut Document, _: &Event| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (hits, listener)
    }

    #[test]
    fn click_bubbles_to_ancestors() {
        let mut doc = Document::new();
        let main = doc.create_element("main");
        let button = doc.create_element("button");
        doc.append_child(doc.root(), main).unwrap();
        doc.append_child(main, button).unwrap();

        let (button_hits, on_button) = counter();
        let (main_hits, on_main) = counter();
        doc.add_event_listener(button, EventType::Click, on_button)
            .unwrap();
        doc.add_event_listener(main, EventType::Click, on_main).unwrap();

        assert_eq!(doc.dispatch_event(button, EventType::Click), Ok(2));
        assert_eq!(button_hits.load(Ordering::SeqCst), 1);
        assert_eq!(main_hits.load(Ordering::SeqCst), 1);

        // main only sees its own listener when targeted directly
        assert_eq!(doc.dispatch_event(main, EventType::Click), Ok(1));
        assert_eq!(doc.dispatch_event(button, EventType::Change), Ok(0));
    }

    #[test]
    fn removal_requires_the_attached_handle() {
        let mut doc = Document::new();
        let button = doc.create_element("button");
        let (_, listener) = counter();
        let first = doc
            .add_event_listener(button, EventType::Click, Arc::clone(&listener))
            .unwrap();
        let second = doc
            .add_event_listener(button, EventType::Click, listener)
            .unwrap();
        assert_ne!(first, second);
        assert_eq!(doc.listener_count(button, EventType::Click), 2);

        assert!(!doc.remove_event_listener(button, EventType::Change, first));
        assert!(doc.remove_event_listener(button, EventType::Click, first));
        assert!(!doc.remove_event_listener(button, EventType::Click, first));
        assert_eq!(doc.listener_count(button, EventType::Click), 1);
    }

    #[test]
    fn current_target_tracks_bubbling() {
        let mut doc = Document::new();
        let main = doc.create_element("main");
        let button = doc.create_element("button");
        doc.append_child(main, button).unwrap();

        let listener: Listener = Arc::new(|doc: &mut Document, event: &Event| {
            let mark = format!("{}", event.current_target);
            doc.set_attr(event.target, "data-last", &mark).unwrap();
        });
        doc.add_event_listener(main, EventType::Click, listener)
            .unwrap();
        doc.dispatch_event(button, EventType::Click).unwrap();
        assert_eq!(doc.attr(button, "data-last"), Some(main.to_string().as_str()));
    }

    #[test]
    fn released_nodes_drop_listeners() {
        let mut doc = Document::new();
        let button = doc.create_element("button");
        let (_, listener) = counter();
        doc.add_event_listener(button, EventType::Click, listener)
            .unwrap();
        assert_eq!(doc.total_listener_count(), 1);

        doc.release(button).unwrap();
        assert_eq!(doc.total_listener_count(), 0);
        assert!(doc.dispatch_event(button, EventType::Click).is_err());
    }
}
