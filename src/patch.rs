use crate::appearance::Appearance;
use crate::component::ComponentId;
use crate::constraint::Constraint;

/// Patches describing setup work for the host toolkit.
///
/// The tree queues these in the exact order the lifecycle produced them: for any one
/// component, its `Attach` patches precede its `Constrain` patches, which precede its
/// `Configure` patch.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// Makes a component the root of the hierarchy.
    SetRoot(ComponentId),
    /// Attaches a subview to a superview. `(superview, subview)`
    Attach(ComponentId, ComponentId),
    /// Declares a constraint owned by a component.
    Constrain(ComponentId, Constraint),
    /// Applies a component's static appearance.
    Configure(ComponentId, Appearance),
    /// Removes a component.
    /// **Constraints referencing it do not survive it and are dropped implicitly.**
    Detach(ComponentId),
}
