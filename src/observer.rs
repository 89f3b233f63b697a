//! Lifecycle observation.

use crate::component::ComponentId;
use crate::lifecycle::Phase;
use core::fmt;
use parking_lot::Mutex;
use std::sync::Arc;

/// A phase transition, reported to observers right after it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    /// The component whose lifecycle advanced.
    pub component: ComponentId,
    /// The phase it advanced to.
    pub phase: Phase,
}

/// A shared handler notified after every lifecycle phase transition in a tree.
///
/// Cloning is cheap and shares the underlying handler. Handlers run synchronously on the
/// thread driving the lifecycle. Useful as a development diagnostic, and for recording the
/// hook sequence in tests.
pub struct LifecycleObserver(Arc<Mutex<dyn FnMut(PhaseChange) + Send>>);

impl Clone for LifecycleObserver {
    fn clone(&self) -> LifecycleObserver {
        LifecycleObserver(Arc::clone(&self.0))
    }
}

impl LifecycleObserver {
    /// Creates a new observer from a handler.
    pub fn new(handler: impl FnMut(PhaseChange) + Send + 'static) -> LifecycleObserver {
        LifecycleObserver(Arc::new(Mutex::new(handler)))
    }

    pub(crate) fn notify(&self, change: PhaseChange) {
        let mut handler = self.0.lock();
        (&mut *handler)(change);
    }
}

impl fmt::Debug for LifecycleObserver {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LifecycleObserver(..)")
    }
}

#[test]
fn test_observer_clones_share_handler() {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&changes);
    let observer = LifecycleObserver::new(move |change: PhaseChange| {
        recorded.lock().push(change);
    });
    let clone = observer.clone();

    let id = ComponentId::new();
    observer.notify(PhaseChange {
        component: id,
        phase: Phase::HierarchyBuilt,
    });
    clone.notify(PhaseChange {
        component: id,
        phase: Phase::Configured,
    });

    let changes = changes.lock();
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].phase, Phase::HierarchyBuilt);
    assert_eq!(changes[1].component, id);
}
