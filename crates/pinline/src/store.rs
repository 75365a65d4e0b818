//! Boundary to the external node-data store.
//!
//! Symbols never mutate node parameters directly. Interactive controls (the
//! potentiometer wiper, the programmable ECU's rules editor) go through a
//! [`NodeDataStore`], which the host application implements. Nothing here is
//! called from the render path.

use indexmap::IndexMap;
use log::{debug, info};

use pinline_core::{identifier::Id, side::MirrorState};

/// A partial update to one node's stored state.
#[derive(Debug, Clone, PartialEq)]
pub enum StatePatch {
    /// New wiper position in `[0, 1]`.
    WiperPosition(f32),
    /// New mirror flags.
    Mirror(MirrorState),
}

/// Editing surfaces the store can be asked to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    /// Rule editor of a programmable ECU.
    Rules,
    /// Generic parameter sheet.
    Parameters,
}

impl EditorKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::Parameters => "parameters",
        }
    }
}

/// Update entry point owned by the host application.
pub trait NodeDataStore {
    /// Merges `patch` into the stored state of `node`.
    fn update_node_state(&mut self, node: Id, patch: StatePatch);

    /// Asks the host to open an editor for `node`. This is a discrete user
    /// action and must not block.
    fn request_editor(&mut self, node: Id, editor: EditorKind);
}

/// Reference store that keeps everything in memory.
///
/// Useful for tests and for hosts that do not persist node state.
///
/// ```
/// use pinline::store::{InMemoryStore, NodeDataStore, StatePatch};
/// use pinline_core::identifier::Id;
///
/// let node = Id::new("pot_1");
/// let mut store = InMemoryStore::new();
/// store.update_node_state(node, StatePatch::WiperPosition(0.25));
///
/// assert_eq!(store.wiper_position(node), Some(0.25));
/// assert_eq!(store.patches(node).len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    patches: IndexMap<Id, Vec<StatePatch>>,
    editor_requests: Vec<(Id, EditorKind)>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every patch applied to `node`, oldest first.
    pub fn patches(&self, node: Id) -> &[StatePatch] {
        self.patches.get(&node).map_or(&[], Vec::as_slice)
    }

    /// Latest wiper position stored for `node`.
    pub fn wiper_position(&self, node: Id) -> Option<f32> {
        self.patches(node).iter().rev().find_map(|patch| match patch {
            StatePatch::WiperPosition(position) => Some(*position),
            StatePatch::Mirror(_) => None,
        })
    }

    /// Latest mirror flags stored for `node`, identity if never set.
    pub fn mirror(&self, node: Id) -> MirrorState {
        self.patches(node)
            .iter()
            .rev()
            .find_map(|patch| match patch {
                StatePatch::Mirror(mirror) => Some(*mirror),
                StatePatch::WiperPosition(_) => None,
            })
            .unwrap_or_default()
    }

    pub fn editor_requests(&self) -> &[(Id, EditorKind)] {
        &self.editor_requests
    }
}

impl NodeDataStore for InMemoryStore {
    fn update_node_state(&mut self, node: Id, patch: StatePatch) {
        debug!(node:% = node, patch:? = patch; "Node state updated");
        self.patches.entry(node).or_default().push(patch);
    }

    fn request_editor(&mut self, node: Id, editor: EditorKind) {
        info!(node:% = node, editor = editor.name(); "Editor requested");
        self.editor_requests.push((node, editor));
    }
}
