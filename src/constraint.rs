//! Declarative spatial constraints.
//!
//! Constraints only *declare* relationships between components that are already part of the
//! hierarchy; nothing in this crate solves them. They are stored on their owning component
//! and forwarded to the backend untouched.

use crate::component::ComponentId;
use cgmath::Vector2;

/// An edge or dimension of a component that a constraint can anchor to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Leading,
    Trailing,
    Top,
    Bottom,
    CenterX,
    CenterY,
    Width,
    Height,
}

/// One endpoint of a constraint: a component and one of its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub target: ComponentId,
    pub edge: Edge,
}

impl Anchor {
    /// Creates a new anchor.
    pub fn new(target: ComponentId, edge: Edge) -> Anchor {
        Anchor { target, edge }
    }
}

/// How the two sides of a constraint relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Equal,
    AtLeast,
    AtMost,
}

/// A spatial relationship between a component and an already-attached relative.
///
/// Reads as `anchor (relation) to + constant`, or `anchor (relation) constant` when `to` is
/// `None` (a pure dimension constraint like a fixed width).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub anchor: Anchor,
    pub to: Option<Anchor>,
    pub relation: Relation,
    pub constant: f64,
}

impl Constraint {
    /// An equality constraint between two anchors.
    pub fn equal(anchor: Anchor, to: Anchor) -> Constraint {
        Constraint {
            anchor,
            to: Some(to),
            relation: Relation::Equal,
            constant: 0.,
        }
    }

    /// A constant-only constraint, e.g. a fixed width.
    pub fn fixed(anchor: Anchor, constant: f64) -> Constraint {
        Constraint {
            anchor,
            to: None,
            relation: Relation::Equal,
            constant,
        }
    }

    /// Returns the same constraint with the given constant.
    pub fn offset(self, constant: f64) -> Constraint {
        Constraint { constant, ..self }
    }

    /// Returns the same constraint with the given relation.
    pub fn relation(self, relation: Relation) -> Constraint {
        Constraint { relation, ..self }
    }

    /// Fixes a component's size.
    pub fn size(target: ComponentId, size: Vector2<f64>) -> [Constraint; 2] {
        [
            Constraint::fixed(Anchor::new(target, Edge::Width), size.x),
            Constraint::fixed(Anchor::new(target, Edge::Height), size.y),
        ]
    }

    /// Centers a component in another, offset by the given vector.
    pub fn center(
        target: ComponentId,
        within: ComponentId,
        offset: Vector2<f64>,
    ) -> [Constraint; 2] {
        [
            Constraint::equal(
                Anchor::new(target, Edge::CenterX),
                Anchor::new(within, Edge::CenterX),
            )
            .offset(offset.x),
            Constraint::equal(
                Anchor::new(target, Edge::CenterY),
                Anchor::new(within, Edge::CenterY),
            )
            .offset(offset.y),
        ]
    }

    /// Pins all four edges of a component to another.
    pub fn fill(target: ComponentId, container: ComponentId) -> [Constraint; 4] {
        [
            Constraint::equal(
                Anchor::new(target, Edge::Leading),
                Anchor::new(container, Edge::Leading),
            ),
            Constraint::equal(
                Anchor::new(target, Edge::Trailing),
                Anchor::new(container, Edge::Trailing),
            ),
            Constraint::equal(
                Anchor::new(target, Edge::Top),
                Anchor::new(container, Edge::Top),
            ),
            Constraint::equal(
                Anchor::new(target, Edge::Bottom),
                Anchor::new(container, Edge::Bottom),
            ),
        ]
    }

    /// The components this constraint references.
    pub fn targets(&self) -> (ComponentId, Option<ComponentId>) {
        (self.anchor.target, self.to.map(|anchor| anchor.target))
    }
}

#[test]
fn test_constraint_helpers() {
    let a = ComponentId::new();
    let b = ComponentId::new();

    let [width, height] = Constraint::size(a, Vector2::new(24., 16.));
    assert_eq!(width.anchor, Anchor::new(a, Edge::Width));
    assert_eq!(width.to, None);
    assert_eq!(width.constant, 24.);
    assert_eq!(height.anchor.edge, Edge::Height);
    assert_eq!(height.constant, 16.);

    let [x, y] = Constraint::center(a, b, Vector2::new(0., -2.));
    assert_eq!(x.targets(), (a, Some(b)));
    assert_eq!(x.constant, 0.);
    assert_eq!(y.constant, -2.);

    for constraint in Constraint::fill(a, b).iter() {
        assert_eq!(constraint.targets(), (a, Some(b)));
        assert_eq!(constraint.relation, Relation::Equal);
        assert_eq!(constraint.constant, 0.);
    }

    let lower = Constraint::fixed(Anchor::new(a, Edge::Height), 44.).relation(Relation::AtLeast);
    assert_eq!(lower.relation, Relation::AtLeast);
    assert_eq!(lower.targets(), (a, None));
}
