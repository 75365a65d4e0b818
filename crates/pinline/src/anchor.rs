//! Terminal-geometry invalidation for the host diagram engine.
//!
//! The host caches wire endpoints per node. Whenever anything that decides
//! where a node's terminals are drawn changes, such as the mirror flags, a
//! pin's logical side, order or rotation, or the set of pin ids, the host must be told
//! to recompute that node's terminal geometry. The [`AnchorRegistry`]
//! remembers what each node looked like when last synced and queues one
//! notification per changed node, so a mirror toggle that moves twelve pins
//! still costs a single recompute.
//!
//! Notifications are at-least-once: flushing a node that did not strictly
//! need it is harmless, missing one leaves wires attached to stale points.

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use pinline_core::{
    identifier::Id,
    pin::{LogicalPin, PinDirection},
    side::{MirrorState, Side},
};

/// Receiver of geometry-invalidation notifications, implemented by the host.
pub trait GeometrySink {
    /// Asks the host to recompute every terminal anchor of `node`.
    fn recompute_terminal_geometry(&mut self, node: Id);
}

/// Collects notified node ids in order, mostly useful in tests and tooling.
impl GeometrySink for Vec<Id> {
    fn recompute_terminal_geometry(&mut self, node: Id) {
        self.push(node);
    }
}

/// Everything about a node that affects where its terminals are anchored.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TerminalSignature {
    mirror: MirrorState,
    pins: Vec<(Id, Side, usize, i32, PinDirection, Option<Id>)>,
}

impl TerminalSignature {
    fn new(mirror: MirrorState, pins: &[LogicalPin]) -> Self {
        Self {
            mirror,
            pins: pins
                .iter()
                .map(|pin| {
                    (
                        pin.id(),
                        pin.side(),
                        pin.order(),
                        pin.rotation(),
                        pin.direction(),
                        pin.junction(),
                    )
                })
                .collect(),
        }
    }
}

/// Tracks the last-synced terminal signature of each mounted node.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    synced: IndexMap<Id, TerminalSignature>,
    pending: IndexSet<Id>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the current pins of `node` and queues an invalidation if this
    /// is the first sync (mount) or anything geometry-relevant changed.
    ///
    /// Returns `true` if the node was queued.
    ///
    /// ```
    /// use pinline::anchor::AnchorRegistry;
    /// use pinline_core::identifier::Id;
    /// use pinline_core::pin::LogicalPin;
    /// use pinline_core::side::{MirrorState, Side};
    ///
    /// let node = Id::new("fuse_1");
    /// let pins = [LogicalPin::target("in", Side::Left), LogicalPin::source("out", Side::Right)];
    ///
    /// let mut registry = AnchorRegistry::new();
    /// assert!(registry.sync(node, MirrorState::default(), &pins));
    /// assert!(!registry.sync(node, MirrorState::default(), &pins));
    /// assert!(registry.sync(node, MirrorState::new(true, false), &pins));
    ///
    /// let mut notified: Vec<Id> = Vec::new();
    /// assert_eq!(registry.flush(&mut notified), 1);
    /// assert_eq!(notified, vec![node]);
    /// ```
    pub fn sync(&mut self, node: Id, mirror: MirrorState, pins: &[LogicalPin]) -> bool {
        let signature = TerminalSignature::new(mirror, pins);
        if self.synced.get(&node) == Some(&signature) {
            trace!(node:% = node; "Terminal geometry unchanged");
            return false;
        }

        debug!(
            node:% = node,
            pins = pins.len(),
            mounted = !self.synced.contains_key(&node);
            "Terminal geometry changed"
        );
        self.synced.insert(node, signature);
        self.pending.insert(node);
        true
    }

    /// Forgets `node`, e.g. when it is removed from the diagram.
    pub fn unmount(&mut self, node: Id) {
        self.synced.shift_remove(&node);
        self.pending.shift_remove(&node);
    }

    /// Whether `node` has been synced and not unmounted.
    pub fn is_mounted(&self, node: Id) -> bool {
        self.synced.contains_key(&node)
    }

    /// Nodes queued for notification, in the order they were first queued.
    pub fn pending(&self) -> impl Iterator<Item = Id> + '_ {
        self.pending.iter().copied()
    }

    /// Sends one notification per queued node and clears the queue.
    ///
    /// Returns the number of notifications sent.
    pub fn flush(&mut self, sink: &mut dyn GeometrySink) -> usize {
        let count = self.pending.len();
        for node in self.pending.drain(..) {
            sink.recompute_terminal_geometry(node);
        }
        if count > 0 {
            debug!(notifications = count; "Flushed terminal geometry invalidations");
        }
        count
    }
}
