//! The component setup lifecycle.
//!
//! Mounting a component runs three hooks in a fixed order, synchronously, exactly once:
//! hierarchy, then constraints, then configuration. The phase type and the orchestrator
//! live here; the bookkeeping lives in [`crate::tree`].

use crate::component::ComponentId;
use crate::tree::{ComponentTree, ConstraintContext, HierarchyContext};
use log::trace;

/// A component's position in the setup lifecycle.
///
/// Strictly linear: `Uninitialized` to `HierarchyBuilt` to `ConstraintsInstalled` to
/// `Configured`, advanced one step at a time, never backwards, never skipping. A component
/// is usable once it reaches `Configured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Freshly mounted; no hook has run.
    Uninitialized,
    /// `build_hierarchy` has completed and all children are attached.
    HierarchyBuilt,
    /// `install_constraints` has completed.
    ConstraintsInstalled,
    /// `configure` has completed; the component is usable.
    Configured,
}

impl Phase {
    /// The phase that follows this one, if any.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Uninitialized => Some(Phase::HierarchyBuilt),
            Phase::HierarchyBuilt => Some(Phase::ConstraintsInstalled),
            Phase::ConstraintsInstalled => Some(Phase::Configured),
            Phase::Configured => None,
        }
    }

    /// True once the lifecycle has run to completion.
    pub fn is_configured(self) -> bool {
        self == Phase::Configured
    }
}

/// Tracks a single component's phase.
///
/// Created at `Uninitialized` when the component is mounted and advanced monotonically by
/// the orchestrator. There is no way back: a component that needs different contents later
/// exposes its own named operation for that, it does not re-run the lifecycle.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    phase: Phase,
}

impl Lifecycle {
    pub(crate) fn new() -> Lifecycle {
        Lifecycle {
            phase: Phase::Uninitialized,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advances to the next phase.
    ///
    /// # Panics
    /// - if `to` is not the immediate successor of the current phase
    pub(crate) fn advance(&mut self, to: Phase) {
        if self.phase.next() != Some(to) {
            panic!("illegal lifecycle transition {:?} -> {:?}", self.phase, to);
        }
        self.phase = to;
    }
}

/// Runs a mounted component's setup lifecycle.
///
/// Calls `build_hierarchy`, then `install_constraints`, then `configure`, in that order,
/// with no other work interleaved, advancing the phase and notifying the tree's observers
/// after each hook. Returns once all three have completed; by then the component's entire
/// subtree is `Configured`.
///
/// Mounting calls this exactly once per component, and nothing else invokes the hooks.
/// A failure inside a hook is a programmer error and propagates immediately; nothing here
/// catches it, since continuing with a partially built component would corrupt the tree's
/// invariants.
///
/// # Panics
/// - if no component with this id is mounted
/// - if the component's lifecycle has already run: repeated invocation would re-apply the
///   hierarchy and duplicate children and constraints, so it fails fast instead
pub fn run_lifecycle(tree: &mut ComponentTree, id: ComponentId) {
    let phase = tree.phase(id);
    if phase != Phase::Uninitialized {
        panic!("lifecycle already ran for component {:?} (phase {:?})", id, phase);
    }

    let mut component = tree.take_component(id);

    trace!("building hierarchy for {:?}", id);
    component.build_hierarchy(&mut HierarchyContext::new(tree, id));
    tree.advance(id, Phase::HierarchyBuilt);

    trace!("installing constraints for {:?}", id);
    component.install_constraints(&mut ConstraintContext::new(tree, id));
    tree.advance(id, Phase::ConstraintsInstalled);

    trace!("configuring {:?}", id);
    let mut appearance = tree.appearance(id).clone();
    component.configure(&mut appearance);
    tree.finish_configure(id, appearance);
    tree.advance(id, Phase::Configured);

    tree.put_component(id, component);
}

#[test]
fn test_phase_sequence() {
    let mut phase = Phase::Uninitialized;
    let mut seen = vec![phase];
    while let Some(next) = phase.next() {
        assert!(phase < next, "phases should advance in order");
        phase = next;
        seen.push(phase);
    }
    assert_eq!(
        seen,
        vec![
            Phase::Uninitialized,
            Phase::HierarchyBuilt,
            Phase::ConstraintsInstalled,
            Phase::Configured,
        ],
    );
    assert!(phase.is_configured());
}

#[test]
#[should_panic(expected = "illegal lifecycle transition")]
fn test_phase_may_not_skip() {
    let mut lifecycle = Lifecycle::new();
    lifecycle.advance(Phase::ConstraintsInstalled);
}

#[test]
#[should_panic(expected = "illegal lifecycle transition")]
fn test_phase_may_not_rewind() {
    let mut lifecycle = Lifecycle::new();
    lifecycle.advance(Phase::HierarchyBuilt);
    lifecycle.advance(Phase::ConstraintsInstalled);
    lifecycle.advance(Phase::Configured);
    lifecycle.advance(Phase::HierarchyBuilt);
}
