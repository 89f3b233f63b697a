//! View-component scaffolding.
//!
//! # Conceptual overview
//! Fledge is the setup layer of a component-based UI: it makes every composite view
//! element assemble itself in a fixed, deterministic order exactly once, before anything
//! gets to use it.
//!
//! ## Components
//! A component is a composite view element that owns child elements. Component types are
//! plain structs implementing [`Component`]; they store their properties and the ids of
//! the children they attach. Constructing one does nothing. All setup happens when the
//! component is mounted into a [`ComponentTree`], at which point its three lifecycle hooks
//! run, in order, exactly once:
//!
//! 1. `build_hierarchy` attaches child components. Each child runs its own full lifecycle
//!    at attach time, so a subtree settles bottom-up.
//! 2. `install_constraints` declares spatial relationships between the component and its
//!    already-attached relatives. Constraints can never reference anything that is not
//!    attached yet; getting this wrong is a programmer error and fails immediately.
//! 3. `configure` applies static appearance settings: colors, default text, accessibility
//!    labels.
//!
//! The whole sequence is synchronous and completes before the mount call returns. There is
//! no second run: a component that needs different contents later exposes its own named
//! operation for that, reached through [`ComponentTree::component_mut`].
//!
//! ## Phases
//! Each mounted component tracks its [`Phase`]: `Uninitialized`, `HierarchyBuilt`,
//! `ConstraintsInstalled`, `Configured`. Phases only ever advance, one step at a time.
//! [`LifecycleObserver`]s registered on the tree are notified after every transition.
//!
//! ## Constraints
//! A [`Constraint`](crate::Constraint) relates an anchor (component + edge) to another
//! anchor or to a constant. This crate only declares and validates them; solving layout is
//! the host toolkit's business.
//!
//! ## Patches and backends
//! The tree does not talk to the host toolkit directly. It queues [`Patch`]es (set root,
//! attach, constrain, configure, detach) in lifecycle order, and a [`Host`] replays them
//! against a [`backend::Backend`], the toolkit's opaque attach-a-child and
//! declare-a-constraint primitives.
//!
//! ## Errors
//! Everything that can go wrong inside the lifecycle is a programmer error: wrong hook
//! order, constraints on unattached components, running a lifecycle twice. These panic
//! immediately rather than limping on with a malformed hierarchy. Only backend failures,
//! which are environmental, surface as `Result`s.
//!
//! # Example
//! ```
//! use fledge::{Anchor, Appearance, Component, ComponentId, ComponentTree, Constraint, Edge};
//! use fledge::{ConstraintContext, HierarchyContext};
//! use std::any::Any;
//!
//! #[derive(Debug)]
//! struct Label {
//!     text: &'static str,
//! }
//!
//! impl Component for Label {
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//!     fn as_any_mut(&mut self) -> &mut dyn Any {
//!         self
//!     }
//!     fn configure(&mut self, appearance: &mut Appearance) {
//!         appearance.text = Some(self.text.to_string());
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct Card {
//!     title: Option<ComponentId>,
//! }
//!
//! impl Component for Card {
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//!     fn as_any_mut(&mut self) -> &mut dyn Any {
//!         self
//!     }
//!     fn build_hierarchy(&mut self, context: &mut HierarchyContext<'_>) {
//!         self.title = Some(context.attach(Box::new(Label { text: "hello" })));
//!     }
//!     fn install_constraints(&mut self, context: &mut ConstraintContext<'_>) {
//!         let title = self.title.expect("title is attached");
//!         context.install(
//!             Constraint::equal(
//!                 Anchor::new(title, Edge::Top),
//!                 Anchor::new(context.owner(), Edge::Top),
//!             )
//!             .offset(8.0),
//!         );
//!     }
//! }
//!
//! let mut tree = ComponentTree::new();
//! let card = tree.mount_root(Box::new(Card { title: None }));
//! let title = tree.subviews(card)[0];
//! assert_eq!(tree.appearance(title).text.as_deref(), Some("hello"));
//! assert_eq!(tree.constraints(card).len(), 1);
//! ```

pub mod backend;
pub mod color;

mod appearance;
mod component;
mod constraint;
mod host;
mod lifecycle;
mod observer;
mod patch;
mod tree;

pub use appearance::Appearance;
pub use component::{Component, ComponentId};
pub use constraint::{Anchor, Constraint, Edge, Relation};
pub use host::{Host, HostError};
pub use lifecycle::{run_lifecycle, Phase};
pub use observer::{LifecycleObserver, PhaseChange};
pub use patch::Patch;
pub use tree::{ComponentTree, ConstraintContext, HierarchyContext};
