//! Change notification with plug/unplug coalescing.
//!
//! Every graph owns an [`Observers`] channel.  Outside a plugged section each
//! change is delivered to every subscriber as it happens.  Between
//! [`Observers::plug`] and the matching [`Observers::unplug`] changes are
//! buffered instead, and the flush delivers each distinct change once; an
//! unqualified [`Change::All`] subsumes everything else buffered with it.

use std::{fmt::Debug, hash::Hash};

use indexmap::IndexSet;

use crate::tracing_support::trace;

/// A change reported to observers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Change<N, L> {
    /// A node was added or removed.
    Node(N),
    /// An edge was created, re-weighted or removed.
    Edge { from: N, to: N, label: L },
    /// Something changed; observers should re-read whatever they depend on.
    All,
}

/// Handle returned by [`Observers::register`], used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

type Callback<N, L> = Box<dyn FnMut(&Change<N, L>) + Send>;

pub struct Observers<N, L> {
    subscribers: Vec<(ObserverId, Callback<N, L>)>,
    next_id: u64,
    plug_depth: usize,
    pending: IndexSet<Change<N, L>>,
    pending_all: bool,
}

impl<N, L> Default for Observers<N, L> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
            plug_depth: 0,
            pending: IndexSet::new(),
            pending_all: false,
        }
    }
}

impl<N, L> Debug for Observers<N, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.subscribers.len())
            .field("plug_depth", &self.plug_depth)
            .field("pending", &self.pending.len())
            .field("pending_all", &self.pending_all)
            .finish()
    }
}

impl<N, L> Observers<N, L>
where
    N: Eq + Hash,
    L: Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber and returns the handle that removes it again.
    pub fn register<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&Change<N, L>) + Send + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscriber.  Returns false if `id` was not registered.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn is_plugged(&self) -> bool {
        self.plug_depth > 0
    }

    /// Starts buffering changes.  Calls nest; only the outermost
    /// [`Self::unplug`] flushes.
    pub fn plug(&mut self) {
        self.plug_depth += 1;
    }

    /// Ends a plugged section, delivering the coalesced buffer if this was
    /// the outermost one.  Unplugging an unplugged channel does nothing.
    pub fn unplug(&mut self) {
        match self.plug_depth {
            0 => return,
            1 => self.plug_depth = 0,
            _ => {
                self.plug_depth -= 1;
                return;
            }
        }
        let pending = std::mem::take(&mut self.pending);
        if std::mem::take(&mut self.pending_all) {
            trace!(subsumed = pending.len(), "flushing coalesced change");
            self.deliver(&Change::All);
        } else {
            trace!(count = pending.len(), "flushing buffered changes");
            for change in &pending {
                self.deliver(change);
            }
        }
    }

    /// Reports a change.  The event is only built when someone is listening.
    pub(crate) fn emit(&mut self, make: impl FnOnce() -> Change<N, L>) {
        if self.subscribers.is_empty() {
            return;
        }
        let change = make();
        if self.plug_depth == 0 {
            self.deliver(&change);
        } else if change == Change::All {
            self.pending_all = true;
            self.pending.clear();
        } else if !self.pending_all {
            self.pending.insert(change);
        }
    }

    fn deliver(&mut self, change: &Change<N, L>) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(change);
        }
    }
}
