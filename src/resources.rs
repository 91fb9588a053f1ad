use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    MeshBuffers,
    Material,
}

#[derive(Debug, Default)]
struct TrackerState {
    next_id: Cell<u64>,
    live: Cell<usize>,
    released: Cell<usize>,
}

/// Hands out native allocations for display meshes and materials and keeps
/// count of how many are still alive.
#[derive(Debug, Clone, Default)]
pub struct ResourceTracker {
    state: Rc<TrackerState>,
}

impl ResourceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&self, kind: ResourceKind, label: impl Into<String>) -> ResourceHandle {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state.live.set(self.state.live.get() + 1);

        let label = label.into();
        log::trace!("Allocated {:?} #{} ({})", kind, id, label);

        ResourceHandle {
            id,
            kind,
            label,
            state: Rc::clone(&self.state),
        }
    }

    /// Number of handles allocated and not yet dropped.
    pub fn live(&self) -> usize {
        self.state.live.get()
    }

    /// Number of handles freed so far.
    pub fn released(&self) -> usize {
        self.state.released.get()
    }
}

/// Exclusive owner of one native allocation. Dropping it frees the allocation.
pub struct ResourceHandle {
    id: u64,
    kind: ResourceKind,
    label: String,
    state: Rc<TrackerState>,
}

impl ResourceHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("label", &self.label)
            .finish()
    }
}

impl Drop for ResourceHandle {
    fn drop(&mut self) {
        self.state.live.set(self.state.live.get() - 1);
        self.state.released.set(self.state.released.get() + 1);
        log::trace!("Released {:?} #{} ({})", self.kind, self.id, self.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_handle_frees_allocation() {
        let tracker = ResourceTracker::new();
        let a = tracker.allocate(ResourceKind::MeshBuffers, "a");
        let b = tracker.allocate(ResourceKind::Material, "b");

        assert_eq!(tracker.live(), 2);
        assert_ne!(a.id(), b.id());

        drop(a);
        assert_eq!(tracker.live(), 1);
        assert_eq!(tracker.released(), 1);

        drop(b);
        assert_eq!(tracker.live(), 0);
        assert_eq!(tracker.released(), 2);
    }

    #[test]
    fn cloned_tracker_shares_counters() {
        let tracker = ResourceTracker::new();
        let other = tracker.clone();
        let handle = other.allocate(ResourceKind::Material, "shared");

        assert_eq!(tracker.live(), 1);
        assert_eq!(handle.label(), "shared");
        assert_eq!(handle.kind(), ResourceKind::Material);
    }
}
