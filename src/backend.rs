//! Traits for backends.

use crate::appearance::Appearance;
use crate::component::ComponentId;
use crate::constraint::Constraint;

/// A backend implementation.
///
/// Backends are the surrounding UI toolkit's primitives for attaching children and
/// declaring constraints, abstracted to a common interface and treated as opaque. A
/// backend only ever sees setup work in lifecycle order: a view is created before it is
/// first referenced, a component's subviews are attached before its constraints arrive,
/// and its constraints arrive before its appearance is applied.
pub trait Backend {
    /// A reference to a view in the backend.
    type ViewRef;

    /// Error type.
    type Error;

    /// Creates a view for a component.
    fn create(&mut self, id: ComponentId) -> Result<Self::ViewRef, Self::Error>;

    /// Makes a view the root of the backend's hierarchy.
    fn set_root(&mut self, view: &mut Self::ViewRef) -> Result<(), Self::Error>;

    /// Attaches a child view to a parent view.
    fn attach(
        &mut self,
        superview: &mut Self::ViewRef,
        subview: &Self::ViewRef,
    ) -> Result<(), Self::Error>;

    /// Declares a spatial constraint on a view.
    fn constrain(
        &mut self,
        view: &mut Self::ViewRef,
        constraint: &Constraint,
    ) -> Result<(), Self::Error>;

    /// Applies static appearance settings to a view.
    fn apply(
        &mut self,
        view: &mut Self::ViewRef,
        appearance: &Appearance,
    ) -> Result<(), Self::Error>;

    /// Removes a view, dropping any constraints that reference it.
    fn remove(&mut self, view: Self::ViewRef) -> Result<(), Self::Error>;
}
