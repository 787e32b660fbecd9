//! Graph events
//!
//! Every mutation reports what it did to the registered listeners,
//! synchronously and in the order the changes happen. Events borrow the
//! live records, so nothing is cloned for them.

use super::property::Attributes;
use std::fmt;

/// Which attribute verb produced an `*AttributesUpdated` event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeUpdate {
    Set,
    Remove,
    Replace,
    Merge,
    Update,
}

impl AttributeUpdate {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeUpdate::Set => "set",
            AttributeUpdate::Remove => "remove",
            AttributeUpdate::Replace => "replace",
            AttributeUpdate::Merge => "merge",
            AttributeUpdate::Update => "update",
        }
    }
}

/// Optional description of what a bulk attribute update touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateHints {
    /// Names of the attributes the updater changed
    pub attributes: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum GraphEvent<'a> {
    NodeAdded {
        key: &'a str,
        attributes: &'a Attributes,
    },
    EdgeAdded {
        key: &'a str,
        source: &'a str,
        target: &'a str,
        undirected: bool,
        attributes: &'a Attributes,
    },
    NodeDropped {
        key: &'a str,
        attributes: &'a Attributes,
    },
    EdgeDropped {
        key: &'a str,
        source: &'a str,
        target: &'a str,
        undirected: bool,
        attributes: &'a Attributes,
    },
    Cleared,
    EdgesCleared,
    GraphAttributesUpdated {
        kind: AttributeUpdate,
        name: Option<&'a str>,
        attributes: &'a Attributes,
    },
    NodeAttributesUpdated {
        key: &'a str,
        kind: AttributeUpdate,
        name: Option<&'a str>,
        attributes: &'a Attributes,
    },
    EdgeAttributesUpdated {
        key: &'a str,
        kind: AttributeUpdate,
        name: Option<&'a str>,
        attributes: &'a Attributes,
    },
    EachNodeAttributesUpdated {
        hints: Option<&'a UpdateHints>,
    },
    EachEdgeAttributesUpdated {
        hints: Option<&'a UpdateHints>,
    },
}

impl GraphEvent<'_> {
    /// Camel-case event name, as used by JavaScript-style emitters
    pub fn name(&self) -> &'static str {
        match self {
            GraphEvent::NodeAdded { .. } => "nodeAdded",
            GraphEvent::EdgeAdded { .. } => "edgeAdded",
            GraphEvent::NodeDropped { .. } => "nodeDropped",
            GraphEvent::EdgeDropped { .. } => "edgeDropped",
            GraphEvent::Cleared => "cleared",
            GraphEvent::EdgesCleared => "edgesCleared",
            GraphEvent::GraphAttributesUpdated { .. } => "attributesUpdated",
            GraphEvent::NodeAttributesUpdated { .. } => "nodeAttributesUpdated",
            GraphEvent::EdgeAttributesUpdated { .. } => "edgeAttributesUpdated",
            GraphEvent::EachNodeAttributesUpdated { .. } => "eachNodeAttributesUpdated",
            GraphEvent::EachEdgeAttributesUpdated { .. } => "eachEdgeAttributesUpdated",
        }
    }
}

/// Handle returned by [`crate::Graph::on`], used to unregister a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn FnMut(&GraphEvent<'_>) + Send>;

/// Registered listeners, called in registration order
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GraphEvent<'_>) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn emit(&mut self, event: GraphEvent<'_>) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
