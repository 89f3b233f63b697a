use crate::appearance::Appearance;
use crate::tree::{ConstraintContext, HierarchyContext};
use core::any::Any;
use core::fmt;
use uuid::Uuid;

/// A unique identifier for a mounted component.
///
/// (this is just a UUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u32, u16, u16, [u8; 8]);

impl ComponentId {
    pub(crate) fn new() -> ComponentId {
        let uuid = Uuid::new_v4();
        let (a, b, c, d) = uuid.as_fields();
        ComponentId(a, b, c, *d)
    }
}

/// Components are the building blocks of UI: composite view elements that own child elements
/// and must assemble themselves before first display.
///
/// Assembly happens in three hooks, driven in a fixed order exactly once per mounted
/// instance: `build_hierarchy`, then `install_constraints`, then `configure`. The sequence
/// runs synchronously inside the mount call (`ComponentTree::mount_root` or
/// `ComponentTree::attach`) and nothing re-triggers it afterwards; see
/// [`run_lifecycle`](crate::run_lifecycle).
///
/// All three hooks have default no-op implementations, so a component only overrides the
/// phases it actually uses. A component with no children at all is perfectly legal.
///
/// Implementors should be plain structs that store their properties plus the
/// [`ComponentId`]s of the children they attach. Constructors should do nothing but store
/// properties; all setup belongs in the hooks.
///
/// Hooks must not suspend or hand work to another thread. Anything asynchronous a component
/// needs (data loading, say) belongs in a separate, explicitly named method of the concrete
/// type, called after mounting via `ComponentTree::component_mut`.
pub trait Component: Any + fmt::Debug + Send {
    /// For downcasting.
    fn as_any(&self) -> &dyn Any;

    /// For downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Attaches all child components, via [`HierarchyContext::attach`].
    ///
    /// Runs first. Nothing is constrained yet, so this hook must not make decisions based
    /// on layout metrics; there are none. Each attached child runs its own full lifecycle
    /// before `attach` returns, so children settle in attachment order.
    ///
    /// The default implementation attaches nothing.
    fn build_hierarchy(&mut self, context: &mut HierarchyContext<'_>) {
        drop(context);
    }

    /// Declares spatial relationships between this component and its already-attached
    /// relatives, via [`ConstraintContext::install`].
    ///
    /// Runs once `build_hierarchy` has completed, never earlier. Every component a
    /// constraint references must already be attached: the component itself, one of its
    /// subviews, or one of its ancestors. Referencing anything else is a programmer error
    /// and fails immediately rather than producing a malformed layout later.
    ///
    /// The default implementation installs nothing.
    fn install_constraints(&mut self, context: &mut ConstraintContext<'_>) {
        drop(context);
    }

    /// Applies static, state-independent appearance settings: colors, default text,
    /// accessibility labels.
    ///
    /// Runs last. This hook can only edit the appearance record; adding children or
    /// constraints is not possible from here. The default implementation changes nothing,
    /// and an unchanged appearance produces no observable effect at all.
    fn configure(&mut self, appearance: &mut Appearance) {
        drop(appearance);
    }
}

#[test]
fn test_component_ids_are_unique() {
    let a = ComponentId::new();
    let b = ComponentId::new();
    assert_ne!(a, b);
}
