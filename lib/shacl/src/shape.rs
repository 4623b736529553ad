use crate::{PropertyPath, ShapePath};
use ldquery_grammar::Term;
use ldquery_model::NamedNode;
use std::fmt::{Display, Formatter};

/// Decides how the paths of a shape are lowered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Selects the focus nodes of an endpoint. Sequence paths collapse into a single path
    /// expression, as endpoints never need the intermediate nodes.
    Endpoint,
    /// Describes the triples returned for a focus node. Every hop of a sequence path becomes its
    /// own triple so that it can be returned in the CONSTRUCT template.
    #[default]
    Profile,
    /// Like [ShapeKind::Profile], but every path ends in the node that is matched by a full-text
    /// search.
    Fts,
}

impl ShapeKind {
    /// The prefix of the node variables of the property shape at `index`.
    pub fn variable_prefix(self, index: usize) -> String {
        match self {
            ShapeKind::Endpoint => "path".to_owned(),
            ShapeKind::Profile | ShapeKind::Fts => format!("prof_{}", index + 1),
        }
    }
}

impl Display for ShapeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ShapeKind::Endpoint => "endpoint",
            ShapeKind::Profile => "profile",
            ShapeKind::Fts => "fts",
        })
    }
}

/// A constraint on a sibling property of the focus node, declared with `sh:filterShape`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FilterConstraint {
    pub path: PropertyPath,
    /// The allowed values. A single value is matched directly, several values with a VALUES block.
    pub values: Vec<Term>,
}

/// One constraint group of a node shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PropertyShape {
    /// The label of the shape node, used in error messages.
    pub id: String,
    /// Paths that must all match.
    pub and_paths: Vec<ShapePath>,
    /// Paths of which at least one must match (`sh:union`).
    pub union_paths: Vec<ShapePath>,
    /// Classes of the terminal node. More than one class is a disjunction.
    pub classes: Vec<NamedNode>,
    pub min_count: Option<u64>,
    pub max_count: Option<u64>,
    pub filters: Vec<FilterConstraint>,
}

impl PropertyShape {
    /// Creates a property shape with a single path.
    pub fn from_path(id: impl Into<String>, path: impl Into<ShapePath>) -> Self {
        Self {
            id: id.into(),
            and_paths: vec![path.into()],
            ..Self::default()
        }
    }

    /// A key that only depends on the content of the shape and not on its node label.
    pub(crate) fn content_key(&self) -> String {
        format!(
            "{:?}{:?}{:?}{:?}{:?}{:?}",
            self.and_paths,
            self.union_paths,
            self.classes,
            self.min_count,
            self.max_count,
            self.filters
        )
    }
}

/// A node shape: target classes and the property shapes that describe the focus node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeShape {
    pub id: String,
    pub target_classes: Vec<NamedNode>,
    pub property_shapes: Vec<PropertyShape>,
    /// Depth up to which chains of blank nodes hanging off the focus node are retrieved.
    pub bnode_depth: Option<u32>,
    /// The level of the endpoint in the endpoint hierarchy.
    pub hierarchy_level: Option<u32>,
}
