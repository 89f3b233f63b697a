use crate::appearance::Appearance;
use crate::component::{Component, ComponentId};
use crate::constraint::Constraint;
use crate::lifecycle::{run_lifecycle, Lifecycle, Phase};
use crate::observer::{LifecycleObserver, PhaseChange};
use crate::patch::Patch;
use log::debug;
use std::collections::HashMap;
use std::collections::VecDeque;

/// A node in the component tree.
#[derive(Debug)]
struct TreeNode {
    /// The component itself. Taken out while its hooks run so they can borrow the tree.
    component: Option<Box<dyn Component>>,
    /// Phase tracking for this component.
    lifecycle: Lifecycle,
    /// The immediate superview.
    superview: Option<ComponentId>,
    /// An ordered list of all subviews.
    subviews: Vec<ComponentId>,
    /// Constraints owned by this component, in installation order.
    constraints: Vec<Constraint>,
    /// Static appearance, as left behind by `configure`.
    appearance: Appearance,
}

impl TreeNode {
    fn new(component: Box<dyn Component>) -> TreeNode {
        TreeNode {
            component: Some(component),
            lifecycle: Lifecycle::new(),
            superview: None,
            subviews: Vec::new(),
            constraints: Vec::new(),
            appearance: Appearance::default(),
        }
    }
}

/// A tree of mounted components.
///
/// Mounting a component (`mount_root`, `attach`) runs its setup lifecycle synchronously,
/// exactly once, before the mount call returns. The resulting hierarchy, constraints and
/// appearance are retained here, and described to the host toolkit through the patch
/// queue.
///
/// The tree is exclusively owned by the thread operating on it; nothing in here suspends
/// or shares state across threads.
#[derive(Debug)]
pub struct ComponentTree {
    nodes: HashMap<ComponentId, TreeNode>,
    root: Option<ComponentId>,
    patches: VecDeque<Patch>,
    observers: Vec<LifecycleObserver>,
}

impl ComponentTree {
    pub fn new() -> ComponentTree {
        ComponentTree {
            nodes: HashMap::new(),
            root: None,
            patches: VecDeque::new(),
            observers: Vec::new(),
        }
    }

    /// Registers an observer for lifecycle phase transitions.
    pub fn observe(&mut self, observer: LifecycleObserver) {
        self.observers.push(observer);
    }

    /// Returns an iterator over available patches.
    ///
    /// Does not drain the queue immediately.
    /// Calling `next` will always remove a patch from the queue.
    pub fn patches(&mut self) -> impl Iterator<Item = Patch> + '_ {
        struct PatchIterator<'a>(&'a mut ComponentTree);
        impl<'a> Iterator for PatchIterator<'a> {
            type Item = Patch;
            fn next(&mut self) -> Option<Patch> {
                self.0.patches.pop_front()
            }
        }

        PatchIterator(self)
    }

    /// Mounts the root component and runs its lifecycle.
    ///
    /// # Panics
    /// - if a root component is already mounted
    pub fn mount_root(&mut self, component: Box<dyn Component>) -> ComponentId {
        if let Some(root) = self.root {
            panic!("root component {:?} is already mounted", root);
        }
        let id = ComponentId::new();
        debug!("mounting root component {:?}", id);
        self.nodes.insert(id, TreeNode::new(component));
        self.root = Some(id);
        self.patches.push_back(Patch::SetRoot(id));
        run_lifecycle(self, id);
        id
    }

    /// Attaches a component as the last subview of a superview and runs its lifecycle.
    ///
    /// The child is linked to its superview first and run after, so its constraints may
    /// reference its ancestors; a sibling attached later can not be referenced, because it
    /// does not exist yet. Components attached from a superview's `build_hierarchy` and
    /// components attached after setup behave identically.
    ///
    /// # Panics
    /// - if the superview does not exist
    pub fn attach(
        &mut self,
        superview: ComponentId,
        component: Box<dyn Component>,
    ) -> ComponentId {
        let id = ComponentId::new();
        self.nodes
            .get_mut(&superview)
            .expect("attaching to a nonexistent component")
            .subviews
            .push(id);

        let mut node = TreeNode::new(component);
        node.superview = Some(superview);
        self.nodes.insert(id, node);
        self.patches.push_back(Patch::Attach(superview, id));
        run_lifecycle(self, id);
        id
    }

    /// Detaches a component and all of its subviews.
    ///
    /// Constraints anywhere in the tree that reference a removed component do not survive
    /// it. The lifecycle of removed components is not reset (there is no reset); the
    /// component objects are dropped.
    ///
    /// # Panics
    /// - if the component does not exist
    pub fn detach(&mut self, id: ComponentId) {
        if !self.nodes.contains_key(&id) {
            panic!("detaching nonexistent component {:?}", id);
        }
        debug!("detaching component {:?}", id);
        if self.root == Some(id) {
            self.root = None;
        }
        if let Some(superview) = self.nodes[&id].superview {
            let subviews = &mut self.nodes.get_mut(&superview).unwrap().subviews;
            let pos = subviews
                .iter()
                .position(|i| *i == id)
                .expect("detached component is missing from its superview");
            subviews.remove(pos);
        }

        let mut removed = Vec::new();
        self.remove_node(id, &mut removed);

        // constraints referencing removed components do not survive them
        for node in self.nodes.values_mut() {
            node.constraints.retain(|constraint| {
                let (a, b) = constraint.targets();
                !removed.contains(&a) && b.map_or(true, |b| !removed.contains(&b))
            });
        }
    }

    /// Removes a node and its subviews. The node must exist.
    fn remove_node(&mut self, id: ComponentId, removed: &mut Vec<ComponentId>) {
        let node = self.nodes.remove(&id).expect("removing nonexistent component");
        self.patches.push_back(Patch::Detach(id));
        removed.push(id);
        for subview in node.subviews {
            self.remove_node(subview, removed);
        }
    }

    /// Installs a constraint owned by a component.
    ///
    /// Normally called through [`ConstraintContext`] from the owner's
    /// `install_constraints` hook; also available directly for constraints added after
    /// setup.
    ///
    /// # Panics
    /// - if the owner does not exist, or has not built its hierarchy yet
    /// - if the constraint references a component that is neither the owner, one of its
    ///   attached subviews, nor one of its attached ancestors
    pub fn install_constraint(&mut self, owner: ComponentId, constraint: Constraint) {
        let node = self
            .nodes
            .get(&owner)
            .expect("installing a constraint on a nonexistent component");
        if node.lifecycle.phase() < Phase::HierarchyBuilt {
            panic!(
                "component {:?} is installing constraints before its hierarchy is built",
                owner
            );
        }

        let (a, b) = constraint.targets();
        self.check_related(owner, a);
        if let Some(b) = b {
            self.check_related(owner, b);
        }

        self.nodes
            .get_mut(&owner)
            .unwrap()
            .constraints
            .push(constraint);
        self.patches.push_back(Patch::Constrain(owner, constraint));
    }

    /// A constraint owned by a component may reference the component itself, one of its
    /// attached subviews, or one of its attached ancestors. Never a sibling, never a
    /// stranger.
    fn check_related(&self, owner: ComponentId, target: ComponentId) {
        if target == owner {
            return;
        }
        if !self.nodes.contains_key(&target) {
            panic!(
                "constraint on {:?} references unattached component {:?}",
                owner, target
            );
        }
        if self.nodes[&owner].subviews.contains(&target) {
            return;
        }
        let mut ancestor = self.nodes[&owner].superview;
        while let Some(id) = ancestor {
            if id == target {
                return;
            }
            ancestor = self.nodes[&id].superview;
        }
        panic!(
            "constraint on {:?} references component {:?}, which is neither an attached subview nor an ancestor",
            owner, target
        );
    }

    /// Edits a component's appearance after setup.
    ///
    /// This is the re-configuration path: it does not re-run any lifecycle hook. A
    /// `Configure` patch is emitted only if the appearance actually changed.
    ///
    /// # Panics
    /// - if the component does not exist, or has not finished its lifecycle
    pub fn update_appearance(&mut self, id: ComponentId, edit: impl FnOnce(&mut Appearance)) {
        let node = self
            .nodes
            .get_mut(&id)
            .expect("updating appearance of a nonexistent component");
        if node.lifecycle.phase() != Phase::Configured {
            panic!(
                "component {:?} may not change appearance before it is configured",
                id
            );
        }
        let previous = node.appearance.clone();
        edit(&mut node.appearance);
        if node.appearance == previous {
            return;
        }
        let appearance = node.appearance.clone();
        self.patches.push_back(Patch::Configure(id, appearance));
    }

    /// The root component, if one is mounted.
    pub fn root(&self) -> Option<ComponentId> {
        self.root
    }

    /// True if a component with this id is mounted.
    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// A component's current lifecycle phase.
    ///
    /// # Panics
    /// - if the component does not exist
    pub fn phase(&self, id: ComponentId) -> Phase {
        self.node(id).lifecycle.phase()
    }

    /// A component's immediate superview.
    ///
    /// # Panics
    /// - if the component does not exist
    pub fn superview(&self, id: ComponentId) -> Option<ComponentId> {
        self.node(id).superview
    }

    /// A component's subviews, in attachment order.
    ///
    /// # Panics
    /// - if the component does not exist
    pub fn subviews(&self, id: ComponentId) -> &[ComponentId] {
        &self.node(id).subviews
    }

    /// The constraints a component owns, in installation order.
    ///
    /// # Panics
    /// - if the component does not exist
    pub fn constraints(&self, id: ComponentId) -> &[Constraint] {
        &self.node(id).constraints
    }

    /// A component's static appearance.
    ///
    /// # Panics
    /// - if the component does not exist
    pub fn appearance(&self, id: ComponentId) -> &Appearance {
        &self.node(id).appearance
    }

    /// Borrows a mounted component as its concrete type.
    ///
    /// Returns `None` if the component is of a different type, or while its own hooks are
    /// running.
    ///
    /// # Panics
    /// - if the component does not exist
    pub fn component<T: Component>(&self, id: ComponentId) -> Option<&T> {
        self.node(id).component.as_ref()?.as_any().downcast_ref()
    }

    /// Mutably borrows a mounted component as its concrete type.
    ///
    /// This is how embedders reach a component's own named operations after setup, e.g. to
    /// kick off data loading once `configure` has completed.
    ///
    /// # Panics
    /// - if the component does not exist
    pub fn component_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.node_mut(id)
            .component
            .as_mut()?
            .as_any_mut()
            .downcast_mut()
    }

    fn node(&self, id: ComponentId) -> &TreeNode {
        self.nodes.get(&id).expect("no such component")
    }

    fn node_mut(&mut self, id: ComponentId) -> &mut TreeNode {
        self.nodes.get_mut(&id).expect("no such component")
    }

    pub(crate) fn take_component(&mut self, id: ComponentId) -> Box<dyn Component> {
        self.node_mut(id)
            .component
            .take()
            .expect("component is already running its lifecycle")
    }

    pub(crate) fn put_component(&mut self, id: ComponentId, component: Box<dyn Component>) {
        let slot = &mut self.node_mut(id).component;
        debug_assert!(slot.is_none(), "component slot is occupied");
        *slot = Some(component);
    }

    pub(crate) fn advance(&mut self, id: ComponentId, to: Phase) {
        self.node_mut(id).lifecycle.advance(to);
        for observer in &self.observers {
            observer.notify(PhaseChange {
                component: id,
                phase: to,
            });
        }
    }

    pub(crate) fn finish_configure(&mut self, id: ComponentId, appearance: Appearance) {
        let node = self.node_mut(id);
        node.appearance = appearance;
        if node.appearance == Appearance::default() {
            // a default configure has no observable effect
            return;
        }
        let appearance = node.appearance.clone();
        self.patches.push_back(Patch::Configure(id, appearance));
    }
}

/// Capability handle passed to `Component::build_hierarchy`.
///
/// During the hierarchy phase a component may do exactly one kind of mutation: attach
/// children. Everything else is a later phase's business, which is why this handle exposes
/// nothing else.
#[derive(Debug)]
pub struct HierarchyContext<'a> {
    tree: &'a mut ComponentTree,
    owner: ComponentId,
}

impl<'a> HierarchyContext<'a> {
    pub(crate) fn new(tree: &'a mut ComponentTree, owner: ComponentId) -> HierarchyContext<'a> {
        HierarchyContext { tree, owner }
    }

    /// The component this context belongs to.
    pub fn owner(&self) -> ComponentId {
        self.owner
    }

    /// Attaches a child component and runs its whole lifecycle.
    ///
    /// Returns the child's id; the owner should store it if its constraints or later
    /// operations need to refer to the child.
    pub fn attach(&mut self, component: Box<dyn Component>) -> ComponentId {
        self.tree.attach(self.owner, component)
    }
}

/// Capability handle passed to `Component::install_constraints`.
#[derive(Debug)]
pub struct ConstraintContext<'a> {
    tree: &'a mut ComponentTree,
    owner: ComponentId,
}

impl<'a> ConstraintContext<'a> {
    pub(crate) fn new(tree: &'a mut ComponentTree, owner: ComponentId) -> ConstraintContext<'a> {
        ConstraintContext { tree, owner }
    }

    /// The component this context belongs to.
    pub fn owner(&self) -> ComponentId {
        self.owner
    }

    /// The owner's immediate superview.
    ///
    /// Already attached by the time this hook runs, so constraints may reference it.
    pub fn superview(&self) -> Option<ComponentId> {
        self.tree.superview(self.owner)
    }

    /// The owner's subviews, as attached by `build_hierarchy`.
    pub fn subviews(&self) -> &[ComponentId] {
        self.tree.subviews(self.owner)
    }

    /// Installs a constraint owned by this component.
    ///
    /// # Panics
    /// - if the constraint references a component that is neither the owner, one of its
    ///   attached subviews, nor one of its attached ancestors
    pub fn install(&mut self, constraint: Constraint) {
        self.tree.install_constraint(self.owner, constraint);
    }
}

#[test]
fn test_lifecycle_order_and_hierarchy() {
    use crate::color::Color;
    use crate::constraint::{Anchor, Edge};
    use core::any::Any;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Title;
    impl Component for Title {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn configure(&mut self, appearance: &mut Appearance) {
            appearance.text = Some("title".to_string());
        }
    }

    #[derive(Debug)]
    struct Icon;
    impl Component for Icon {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[derive(Debug)]
    struct Card {
        title: Option<ComponentId>,
        icon: Option<ComponentId>,
    }
    impl Component for Card {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn build_hierarchy(&mut self, context: &mut HierarchyContext<'_>) {
            self.title = Some(context.attach(Box::new(Title)));
            self.icon = Some(context.attach(Box::new(Icon)));
        }
        fn install_constraints(&mut self, context: &mut ConstraintContext<'_>) {
            let title = self.title.expect("title should be attached");
            let icon = self.icon.expect("icon should be attached");
            context.install(
                Constraint::equal(
                    Anchor::new(title, Edge::Top),
                    Anchor::new(context.owner(), Edge::Top),
                )
                .offset(8.),
            );
            context.install(Constraint::equal(
                Anchor::new(icon, Edge::Leading),
                Anchor::new(title, Edge::Trailing),
            ));
        }
        fn configure(&mut self, appearance: &mut Appearance) {
            appearance.background = Color {
                r: 1.,
                g: 1.,
                b: 1.,
                a: 1.,
            };
        }
    }

    let changes = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&changes);

    let mut tree = ComponentTree::new();
    tree.observe(LifecycleObserver::new(move |change| {
        recorded.lock().push(change);
    }));

    let card = tree.mount_root(Box::new(Card {
        title: None,
        icon: None,
    }));

    assert_eq!(tree.root(), Some(card));
    assert_eq!(tree.subviews(card).len(), 2, "card should have two subviews");
    let title = tree.subviews(card)[0];
    let icon = tree.subviews(card)[1];
    assert_eq!(tree.superview(title), Some(card));
    assert_eq!(tree.superview(icon), Some(card));
    assert!(tree.subviews(title).is_empty());

    // every component ran to completion, in order, exactly once
    for id in [card, title, icon].iter() {
        assert_eq!(tree.phase(*id), Phase::Configured);
        let phases: Vec<Phase> = changes
            .lock()
            .iter()
            .filter(|change| change.component == *id)
            .map(|change| change.phase)
            .collect();
        assert_eq!(
            phases,
            vec![
                Phase::HierarchyBuilt,
                Phase::ConstraintsInstalled,
                Phase::Configured,
            ],
            "hooks should run in order exactly once"
        );
    }

    // subviews settle during the parent's hierarchy phase, before the parent constrains
    let order: Vec<PhaseChange> = changes.lock().clone();
    let card_constrained = order
        .iter()
        .position(|c| c.component == card && c.phase == Phase::ConstraintsInstalled)
        .expect("card should install constraints");
    let icon_configured = order
        .iter()
        .position(|c| c.component == icon && c.phase == Phase::Configured)
        .expect("icon should be configured");
    assert!(
        icon_configured < card_constrained,
        "subviews should finish before the parent's constraint phase"
    );

    assert_eq!(tree.constraints(card).len(), 2);
    assert!(tree.constraints(icon).is_empty());
    assert_eq!(tree.appearance(title).text, Some("title".to_string()));

    // patches come out in phase order: attaches, then constraints, then configuration
    let patches: Vec<Patch> = tree.patches().collect();
    assert_eq!(patches[0], Patch::SetRoot(card));
    let attached = patches
        .iter()
        .position(|p| *p == Patch::Attach(card, title))
        .expect("title should be attached in a patch");
    let constrained = patches
        .iter()
        .position(|p| match p {
            Patch::Constrain(owner, _) => *owner == card,
            _ => false,
        })
        .expect("card constraints should be patched");
    let configured = patches
        .iter()
        .position(|p| match p {
            Patch::Configure(id, _) => *id == card,
            _ => false,
        })
        .expect("card appearance should be patched");
    assert!(
        attached < constrained && constrained < configured,
        "setup patches should be emitted in phase order"
    );
    assert!(
        patches.iter().all(|p| match p {
            Patch::Configure(id, _) => *id != icon,
            _ => true,
        }),
        "a default configure should emit no patch"
    );

    assert_eq!(tree.patches().count(), 0, "the queue should have drained");
}

#[test]
fn test_leaf_component_defaults() {
    use core::any::Any;

    #[derive(Debug)]
    struct Plain;
    impl Component for Plain {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    let mut tree = ComponentTree::new();
    let id = tree.mount_root(Box::new(Plain));

    assert_eq!(tree.phase(id), Phase::Configured);
    assert!(tree.subviews(id).is_empty(), "no children by default");
    assert!(tree.constraints(id).is_empty(), "no constraints by default");
    assert_eq!(
        *tree.appearance(id),
        Appearance::default(),
        "a default configure has no observable effect"
    );

    let patches: Vec<Patch> = tree.patches().collect();
    assert_eq!(patches, vec![Patch::SetRoot(id)]);
}

#[test]
#[should_panic(expected = "lifecycle already ran")]
fn test_repeated_lifecycle_fails() {
    use core::any::Any;

    #[derive(Debug)]
    struct Plain;
    impl Component for Plain {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    let mut tree = ComponentTree::new();
    let id = tree.mount_root(Box::new(Plain));
    run_lifecycle(&mut tree, id);
}

#[test]
#[should_panic(expected = "already mounted")]
fn test_second_root_fails() {
    use core::any::Any;

    #[derive(Debug)]
    struct Plain;
    impl Component for Plain {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    let mut tree = ComponentTree::new();
    tree.mount_root(Box::new(Plain));
    tree.mount_root(Box::new(Plain));
}

#[test]
#[should_panic(expected = "references unattached component")]
fn test_constraint_to_detached_component_fails() {
    use crate::constraint::{Anchor, Edge};
    use core::any::Any;

    #[derive(Debug)]
    struct Plain;
    impl Component for Plain {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    let mut tree = ComponentTree::new();
    let root = tree.mount_root(Box::new(Plain));
    let child = tree.attach(root, Box::new(Plain));
    tree.detach(child);

    tree.install_constraint(
        root,
        Constraint::equal(Anchor::new(root, Edge::Top), Anchor::new(child, Edge::Top)),
    );
}

#[test]
#[should_panic(expected = "neither an attached subview nor an ancestor")]
fn test_constraint_across_siblings_fails() {
    use crate::constraint::{Anchor, Edge};
    use core::any::Any;

    #[derive(Debug)]
    struct Plain;
    impl Component for Plain {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    let mut tree = ComponentTree::new();
    let root = tree.mount_root(Box::new(Plain));
    let a = tree.attach(root, Box::new(Plain));
    let b = tree.attach(root, Box::new(Plain));

    // b is a's sibling: a's constraints may not reach it
    tree.install_constraint(
        a,
        Constraint::equal(Anchor::new(a, Edge::Top), Anchor::new(b, Edge::Top)),
    );
}

#[test]
fn test_child_constraint_may_reference_ancestor() {
    use crate::constraint::{Anchor, Edge};
    use core::any::Any;

    #[derive(Debug)]
    struct Pinned;
    impl Component for Pinned {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn install_constraints(&mut self, context: &mut ConstraintContext<'_>) {
            let owner = context.owner();
            let superview = context
                .superview()
                .expect("a pinned component needs a superview");
            // the superview is mid-lifecycle here, but the attachment already exists
            context.install(Constraint::equal(
                Anchor::new(owner, Edge::Top),
                Anchor::new(superview, Edge::Top),
            ));
        }
    }

    #[derive(Debug)]
    struct Wrapper {
        inner: Option<ComponentId>,
    }
    impl Component for Wrapper {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn build_hierarchy(&mut self, context: &mut HierarchyContext<'_>) {
            self.inner = Some(context.attach(Box::new(Pinned)));
        }
    }

    let mut tree = ComponentTree::new();
    let root = tree.mount_root(Box::new(Wrapper { inner: None }));
    let inner = tree.subviews(root)[0];

    // ancestor references also work after setup
    tree.install_constraint(
        inner,
        Constraint::equal(
            Anchor::new(inner, Edge::CenterX),
            Anchor::new(root, Edge::CenterX),
        ),
    );
    assert_eq!(tree.constraints(inner).len(), 2);
}

#[test]
fn test_detach_prunes_subtree_and_constraints() {
    use crate::constraint::{Anchor, Edge};
    use core::any::Any;

    #[derive(Debug)]
    struct Plain;
    impl Component for Plain {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    let mut tree = ComponentTree::new();
    let root = tree.mount_root(Box::new(Plain));
    let kept = tree.attach(root, Box::new(Plain));
    let dropped = tree.attach(root, Box::new(Plain));
    let grandchild = tree.attach(dropped, Box::new(Plain));

    tree.install_constraint(
        root,
        Constraint::equal(Anchor::new(kept, Edge::Top), Anchor::new(root, Edge::Top)),
    );
    tree.install_constraint(
        root,
        Constraint::equal(Anchor::new(dropped, Edge::Top), Anchor::new(root, Edge::Top)),
    );
    let _: Vec<Patch> = tree.patches().collect();

    tree.detach(dropped);

    assert!(!tree.contains(dropped));
    assert!(!tree.contains(grandchild), "subviews go with their superview");
    assert!(tree.contains(kept));
    assert_eq!(tree.subviews(root), [kept]);
    assert_eq!(
        tree.constraints(root).len(),
        1,
        "constraints referencing removed components should be pruned"
    );

    let patches: Vec<Patch> = tree.patches().collect();
    assert_eq!(
        patches,
        vec![Patch::Detach(dropped), Patch::Detach(grandchild)]
    );
}

#[test]
fn test_update_appearance_after_setup() {
    use core::any::Any;

    #[derive(Debug)]
    struct Plain;
    impl Component for Plain {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    let mut tree = ComponentTree::new();
    let id = tree.mount_root(Box::new(Plain));
    let _: Vec<Patch> = tree.patches().collect();

    tree.update_appearance(id, |appearance| appearance.hidden = true);
    assert!(tree.appearance(id).hidden);
    let patches: Vec<Patch> = tree.patches().collect();
    assert_eq!(patches.len(), 1);
    match &patches[0] {
        Patch::Configure(patched, appearance) => {
            assert_eq!(*patched, id);
            assert!(appearance.hidden);
        }
        patch => panic!("expected a Configure patch, got {:?}", patch),
    }

    // an edit that changes nothing emits nothing
    tree.update_appearance(id, |appearance| appearance.hidden = true);
    assert_eq!(tree.patches().count(), 0);
}

#[test]
fn test_component_downcast_reaches_named_operations() {
    use core::any::Any;

    #[derive(Debug)]
    struct Counter {
        n: u32,
    }
    impl Counter {
        fn bump(&mut self) {
            self.n += 1;
        }
    }
    impl Component for Counter {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[derive(Debug)]
    struct Other;
    impl Component for Other {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    let mut tree = ComponentTree::new();
    let id = tree.mount_root(Box::new(Counter { n: 0 }));

    assert!(tree.component::<Other>(id).is_none());
    tree.component_mut::<Counter>(id)
        .expect("downcast should succeed")
        .bump();
    assert_eq!(tree.component::<Counter>(id).expect("downcast").n, 1);
}
