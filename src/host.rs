use crate::backend::Backend;
use crate::component::ComponentId;
use crate::patch::Patch;
use crate::tree::ComponentTree;
use std::collections::HashMap;

/// Errors that may occur when applying patches to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostError<E> {
    /// A patch referenced a component the backend has no view for.
    NoSuchView(ComponentId),
    /// The backend failed to apply a patch.
    Backend(E),
}

/// Connects a component tree to a backend.
///
/// The tree records setup work as patches; `poll` drains them and replays each one against
/// the backend, creating backend views on first mention. Backend failures are
/// environmental rather than programmer errors, which is why this is the one place in the
/// crate that reports failure through results instead of failing fast.
pub struct Host<B: Backend> {
    pub tree: ComponentTree,
    backend: B,
    views: HashMap<ComponentId, B::ViewRef>,
}

impl<B: Backend> Host<B> {
    /// Creates a new Host.
    ///
    /// The tree starts out empty; mount components on `tree`, then call `poll` to let the
    /// backend catch up.
    pub fn new(backend: B) -> Host<B> {
        Host {
            tree: ComponentTree::new(),
            backend,
            views: HashMap::new(),
        }
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Applies all pending patches to the backend, in emission order.
    ///
    /// Stops at the first failure; the failing patch is lost, later ones stay queued.
    pub fn poll(&mut self) -> Result<(), HostError<B::Error>> {
        loop {
            let patch = match self.tree.patches().next() {
                Some(patch) => patch,
                None => break,
            };
            self.apply(patch)?;
        }
        Ok(())
    }

    fn apply(&mut self, patch: Patch) -> Result<(), HostError<B::Error>> {
        match patch {
            Patch::SetRoot(id) => {
                self.create_if_missing(id)?;
                let view = self.views.get_mut(&id).expect("view was just created");
                self.backend.set_root(view).map_err(HostError::Backend)
            }
            Patch::Attach(superview, subview) => {
                self.create_if_missing(superview)?;
                self.create_if_missing(subview)?;
                // take the superview's ref out so the subview's can be borrowed alongside
                let mut superview_ref = self
                    .views
                    .remove(&superview)
                    .expect("view was just created");
                let result = match self.views.get(&subview) {
                    Some(subview_ref) => self
                        .backend
                        .attach(&mut superview_ref, subview_ref)
                        .map_err(HostError::Backend),
                    None => Err(HostError::NoSuchView(subview)),
                };
                self.views.insert(superview, superview_ref);
                result
            }
            Patch::Constrain(owner, constraint) => {
                let view = self
                    .views
                    .get_mut(&owner)
                    .ok_or(HostError::NoSuchView(owner))?;
                self.backend
                    .constrain(view, &constraint)
                    .map_err(HostError::Backend)
            }
            Patch::Configure(id, appearance) => {
                let view = self
                    .views
                    .get_mut(&id)
                    .ok_or(HostError::NoSuchView(id))?;
                self.backend
                    .apply(view, &appearance)
                    .map_err(HostError::Backend)
            }
            Patch::Detach(id) => {
                let view = self.views.remove(&id).ok_or(HostError::NoSuchView(id))?;
                self.backend.remove(view).map_err(HostError::Backend)
            }
        }
    }

    fn create_if_missing(&mut self, id: ComponentId) -> Result<(), HostError<B::Error>> {
        if !self.views.contains_key(&id) {
            let view = self.backend.create(id).map_err(HostError::Backend)?;
            self.views.insert(id, view);
        }
        Ok(())
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
struct RecordingBackend {
    ops: Vec<&'static str>,
    fail_on_attach: bool,
}

#[cfg(test)]
impl Backend for RecordingBackend {
    type ViewRef = ComponentId;
    type Error = &'static str;

    fn create(&mut self, id: ComponentId) -> Result<ComponentId, &'static str> {
        self.ops.push("create");
        Ok(id)
    }
    fn set_root(&mut self, _view: &mut ComponentId) -> Result<(), &'static str> {
        self.ops.push("set_root");
        Ok(())
    }
    fn attach(
        &mut self,
        _superview: &mut ComponentId,
        _subview: &ComponentId,
    ) -> Result<(), &'static str> {
        if self.fail_on_attach {
            return Err("attach failed");
        }
        self.ops.push("attach");
        Ok(())
    }
    fn constrain(
        &mut self,
        _view: &mut ComponentId,
        _constraint: &crate::constraint::Constraint,
    ) -> Result<(), &'static str> {
        self.ops.push("constrain");
        Ok(())
    }
    fn apply(
        &mut self,
        _view: &mut ComponentId,
        _appearance: &crate::appearance::Appearance,
    ) -> Result<(), &'static str> {
        self.ops.push("apply");
        Ok(())
    }
    fn remove(&mut self, _view: ComponentId) -> Result<(), &'static str> {
        self.ops.push("remove");
        Ok(())
    }
}

#[cfg(test)]
#[derive(Debug)]
struct Dot;

#[cfg(test)]
impl crate::component::Component for Dot {
    fn as_any(&self) -> &dyn core::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn core::any::Any {
        self
    }
    fn configure(&mut self, appearance: &mut crate::appearance::Appearance) {
        appearance.hidden = true;
    }
}

#[cfg(test)]
#[derive(Debug)]
struct Pair {
    dot: Option<ComponentId>,
}

#[cfg(test)]
impl crate::component::Component for Pair {
    fn as_any(&self) -> &dyn core::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn core::any::Any {
        self
    }
    fn build_hierarchy(&mut self, context: &mut crate::tree::HierarchyContext<'_>) {
        self.dot = Some(context.attach(Box::new(Dot)));
    }
    fn install_constraints(&mut self, context: &mut crate::tree::ConstraintContext<'_>) {
        use crate::constraint::{Anchor, Constraint, Edge};
        let dot = self.dot.expect("dot should be attached");
        context.install(Constraint::fixed(Anchor::new(dot, Edge::Width), 4.));
    }
}

#[test]
fn test_host_applies_patches_in_order() {
    let mut host = Host::new(RecordingBackend::default());
    let root = host.tree.mount_root(Box::new(Pair { dot: None }));
    host.poll().expect("patches should apply cleanly");

    // SetRoot, Attach, the dot's Configure, then the root's Constrain
    assert_eq!(
        host.backend().ops,
        vec!["create", "set_root", "create", "attach", "apply", "constrain"],
    );

    host.tree.detach(root);
    host.poll().expect("detach patches should apply cleanly");
    let ops = &host.backend().ops;
    assert_eq!(&ops[ops.len() - 2..], ["remove", "remove"]);
    assert!(host.views.is_empty(), "backend refs should be dropped");
}

#[test]
fn test_host_propagates_backend_errors() {
    let mut host = Host::new(RecordingBackend {
        ops: Vec::new(),
        fail_on_attach: true,
    });
    host.tree.mount_root(Box::new(Pair { dot: None }));

    let err = host.poll().expect_err("attach failure should surface");
    assert_eq!(err, HostError::Backend("attach failed"));
}
