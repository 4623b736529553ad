use crate::{FilterConstraint, NodeShape, PropertyPath, PropertyShape, ShapePath};
use ldquery_grammar::Term;
use ldquery_model::vocab::{ont, rdf, sh, shext};
use ldquery_model::{Graph, NamedNode, NamedNodeRef, ShapeError, SubjectRef, TermRef};
use rustc_hash::FxHashSet;
use std::str::FromStr;
use tracing::debug;

/// Paths nested deeper than this are rejected. This also stops cyclic path definitions.
const MAX_PATH_DEPTH: usize = 32;

/// Reads node shapes and property shapes from a shape graph.
///
/// The reader is a recursive-descent parser over the shape vocabulary. It only looks at the
/// triples it needs and reports structural problems as [ShapeError]s.
#[derive(Clone, Copy, Debug)]
pub struct ShapeGraphReader<'a> {
    graph: &'a Graph,
}

impl<'a> ShapeGraphReader<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// Reads the node shape identified by `shape`.
    ///
    /// Property shapes are ordered by their content, so the variable numbering does not depend on
    /// the labels of blank nodes.
    pub fn node_shape(&self, shape: NamedNodeRef<'_>) -> Result<NodeShape, ShapeError> {
        let subject = SubjectRef::NamedNode(shape);
        if self.graph.triples_for_subject(subject).next().is_none() {
            return Err(ShapeError::NotFound(shape.to_string()));
        }

        let mut target_classes = self
            .objects(subject, sh::TARGET_CLASS)
            .map(|class| self.named_node(subject, sh::TARGET_CLASS, class))
            .collect::<Result<Vec<_>, _>>()?;
        target_classes.sort();

        let mut property_shapes = self
            .objects(subject, sh::PROPERTY)
            .map(|property| {
                let property = self.subject(subject, sh::PROPERTY, property)?;
                self.property_shape(property)
            })
            .collect::<Result<Vec<_>, _>>()?;
        property_shapes.sort_by_cached_key(PropertyShape::content_key);

        let node_shape = NodeShape {
            id: shape.to_string(),
            target_classes,
            property_shapes,
            bnode_depth: self.number(subject, shext::BNODE_DEPTH)?,
            hierarchy_level: self.number(subject, ont::HIERARCHY_LEVEL)?,
        };
        debug!(
            shape = %shape,
            property_shapes = node_shape.property_shapes.len(),
            "Read node shape"
        );
        Ok(node_shape)
    }

    /// Reads the property shape identified by `shape`.
    pub fn property_shape(&self, shape: SubjectRef<'a>) -> Result<PropertyShape, ShapeError> {
        let id = shape.to_string();
        let alias = self
            .graph
            .object_for_subject_predicate(shape, shext::PATH_ALIAS)
            .map(|alias| self.named_node(shape, shext::PATH_ALIAS, alias))
            .transpose()?;

        let mut and_paths = Vec::new();
        let mut union_paths = Vec::new();
        for path in self.objects(shape, sh::PATH) {
            if let Some(members) = self.union_members(path)? {
                union_paths.extend(members);
            } else {
                and_paths.push(ShapePath::new(self.path(path)?).with_alias(alias.clone()));
            }
        }
        if and_paths.is_empty() && union_paths.is_empty() {
            return Err(ShapeError::MissingPath { shape: id });
        }
        and_paths.sort_by_cached_key(|path| format!("{path:?}"));

        let mut filters = Vec::new();
        for filter_shape in self.objects(shape, sh::FILTER_SHAPE) {
            let filter_shape = self.subject(shape, sh::FILTER_SHAPE, filter_shape)?;
            for property in self.objects(filter_shape, sh::PROPERTY) {
                let property = self.subject(filter_shape, sh::PROPERTY, property)?;
                self.collect_filters(property, &mut filters)?;
            }
        }

        Ok(PropertyShape {
            classes: self.classes(shape)?,
            min_count: self.number(shape, sh::MIN_COUNT)?,
            max_count: self.number(shape, sh::MAX_COUNT)?,
            id,
            and_paths,
            union_paths,
            filters,
        })
    }

    /// Parses the property path starting at `node`.
    pub fn path(&self, node: TermRef<'a>) -> Result<PropertyPath, ShapeError> {
        self.path_at_depth(node, 0)
    }

    /// Reads the elements of the RDF list starting at `head`.
    pub fn list(&self, head: TermRef<'a>) -> Result<Vec<TermRef<'a>>, ShapeError> {
        let malformed = |message: &str| ShapeError::MalformedList {
            node: head.to_string(),
            message: message.to_owned(),
        };

        let mut elements = Vec::new();
        let mut visited = FxHashSet::default();
        let mut current = head;
        while current != TermRef::NamedNode(rdf::NIL) {
            if !visited.insert(current) {
                return Err(malformed("the list contains a cycle"));
            }
            let cell = as_subject(current).ok_or_else(|| malformed("a list cell is a literal"))?;
            let first = self
                .graph
                .object_for_subject_predicate(cell, rdf::FIRST)
                .ok_or_else(|| malformed("a list cell has no rdf:first"))?;
            elements.push(first);
            current = self
                .graph
                .object_for_subject_predicate(cell, rdf::REST)
                .ok_or_else(|| malformed("a list cell has no rdf:rest"))?;
        }
        Ok(elements)
    }

    fn path_at_depth(&self, node: TermRef<'a>, depth: usize) -> Result<PropertyPath, ShapeError> {
        let unsupported = |message: &str| ShapeError::UnsupportedPath {
            node: node.to_string(),
            message: message.to_owned(),
        };
        if depth > MAX_PATH_DEPTH {
            return Err(unsupported("the path is nested too deeply"));
        }

        let subject = match node {
            TermRef::NamedNode(iri) if iri == rdf::NIL => {
                return Err(unsupported("a sequence path must not be empty"))
            }
            TermRef::NamedNode(iri) => return Ok(PropertyPath::Direct(iri.into_owned())),
            TermRef::BlankNode(bnode) => SubjectRef::BlankNode(bnode),
            _ => return Err(unsupported("a path must be an IRI or a blank node")),
        };

        let nested = |predicate: NamedNodeRef<'_>| {
            self.graph
                .object_for_subject_predicate(subject, predicate)
                .map(|inner| self.path_at_depth(inner, depth + 1).map(Box::new))
                .transpose()
        };
        if let Some(inner) = nested(sh::INVERSE_PATH)? {
            return Ok(PropertyPath::Inverse(inner));
        }
        if let Some(inner) = nested(sh::ZERO_OR_MORE_PATH)? {
            return Ok(PropertyPath::ZeroOrMore(inner));
        }
        if let Some(inner) = nested(sh::ONE_OR_MORE_PATH)? {
            return Ok(PropertyPath::OneOrMore(inner));
        }
        if let Some(inner) = nested(sh::ZERO_OR_ONE_PATH)? {
            return Ok(PropertyPath::ZeroOrOne(inner));
        }
        if let Some(members) = self
            .graph
            .object_for_subject_predicate(subject, sh::ALTERNATIVE_PATH)
        {
            let members = self
                .list(members)?
                .into_iter()
                .map(|member| self.path_at_depth(member, depth + 1))
                .collect::<Result<Vec<_>, _>>()?;
            if members.is_empty() {
                return Err(unsupported("an alternative path must not be empty"));
            }
            return Ok(PropertyPath::Alternative(members));
        }
        if self
            .graph
            .object_for_subject_predicate(subject, rdf::FIRST)
            .is_some()
        {
            let mut elements = self
                .list(node)?
                .into_iter()
                .map(|element| self.path_at_depth(element, depth + 1))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(if elements.len() == 1 {
                elements.remove(0)
            } else {
                PropertyPath::Sequence(elements)
            });
        }
        if self
            .graph
            .object_for_subject_predicate(subject, sh::UNION)
            .is_some()
        {
            return Err(unsupported(
                "sh:union is only supported as the direct value of sh:path",
            ));
        }
        Err(unsupported("unknown path construct"))
    }

    /// Returns the members of a `[ sh:union ( ... ) ]` path node.
    ///
    /// A member is either a path or a node with its own `sh:path` and an optional
    /// `shext:pathAlias`.
    fn union_members(&self, node: TermRef<'a>) -> Result<Option<Vec<ShapePath>>, ShapeError> {
        let Some(subject) = as_subject(node) else {
            return Ok(None);
        };
        let Some(list) = self.graph.object_for_subject_predicate(subject, sh::UNION) else {
            return Ok(None);
        };

        let mut members = Vec::new();
        for member in self.list(list)? {
            let nested = as_subject(member).and_then(|member_subject| {
                self.graph
                    .object_for_subject_predicate(member_subject, sh::PATH)
                    .map(|path| (member_subject, path))
            });
            let shape_path = match nested {
                Some((member_subject, path)) => {
                    let alias = self
                        .graph
                        .object_for_subject_predicate(member_subject, shext::PATH_ALIAS)
                        .map(|alias| self.named_node(member_subject, shext::PATH_ALIAS, alias))
                        .transpose()?;
                    ShapePath::new(self.path(path)?).with_alias(alias)
                }
                None => ShapePath::new(self.path(member)?),
            };
            members.push(shape_path);
        }
        Ok(Some(members))
    }

    /// Reads `sh:class` or an `sh:or` list of `sh:class` constraints.
    fn classes(&self, shape: SubjectRef<'a>) -> Result<Vec<NamedNode>, ShapeError> {
        let ambiguous = |message: &str| ShapeError::Ambiguous {
            shape: shape.to_string(),
            message: message.to_owned(),
        };

        let direct = self
            .objects(shape, sh::CLASS)
            .map(|class| self.named_node(shape, sh::CLASS, class))
            .collect::<Result<Vec<_>, _>>()?;
        let or_list = self.graph.object_for_subject_predicate(shape, sh::OR);

        match (direct.len(), or_list) {
            (0, None) => Ok(Vec::new()),
            (1, None) => Ok(direct),
            (_, None) => Err(ambiguous(
                "several sh:class values; use sh:or to declare alternative classes",
            )),
            (0, Some(or_list)) => self
                .list(or_list)?
                .into_iter()
                .map(|member| {
                    let member = as_subject(member)
                        .ok_or_else(|| ambiguous("an sh:or member is a literal"))?;
                    let class = self
                        .graph
                        .object_for_subject_predicate(member, sh::CLASS)
                        .ok_or_else(|| ambiguous("only sh:class constraints are supported in sh:or"))?;
                    self.named_node(member, sh::CLASS, class)
                })
                .collect(),
            (_, Some(_)) => Err(ambiguous("sh:class and sh:or are both declared")),
        }
    }

    fn collect_filters(
        &self,
        property: SubjectRef<'a>,
        filters: &mut Vec<FilterConstraint>,
    ) -> Result<(), ShapeError> {
        let nested = self
            .objects(property, sh::PROPERTY)
            .map(|nested| self.subject(property, sh::PROPERTY, nested))
            .collect::<Result<Vec<_>, _>>()?;
        if nested.is_empty() {
            filters.push(self.filter_constraint(property)?);
        } else {
            for nested in nested {
                filters.push(self.filter_constraint(nested)?);
            }
        }
        Ok(())
    }

    fn filter_constraint(&self, property: SubjectRef<'a>) -> Result<FilterConstraint, ShapeError> {
        let path = self
            .graph
            .object_for_subject_predicate(property, sh::PATH)
            .ok_or_else(|| ShapeError::MissingPath {
                shape: property.to_string(),
            })?;
        let path = self.path(path)?;

        let mut values = self
            .objects(property, sh::HAS_VALUE)
            .map(|value| self.value_term(property, sh::HAS_VALUE, value))
            .collect::<Result<Vec<_>, _>>()?;
        values.sort_by_cached_key(ToString::to_string);
        if let Some(list) = self.graph.object_for_subject_predicate(property, sh::IN) {
            for value in self.list(list)? {
                values.push(self.value_term(property, sh::IN, value)?);
            }
        }
        if values.is_empty() {
            return Err(ShapeError::InvalidValue {
                shape: property.to_string(),
                predicate: sh::HAS_VALUE.to_string(),
                value: "a filter needs sh:hasValue or sh:in".to_owned(),
            });
        }
        Ok(FilterConstraint { path, values })
    }

    fn objects(
        &self,
        subject: SubjectRef<'a>,
        predicate: NamedNodeRef<'a>,
    ) -> impl Iterator<Item = TermRef<'a>> + 'a {
        self.graph.objects_for_subject_predicate(subject, predicate)
    }

    fn number<T: FromStr>(
        &self,
        subject: SubjectRef<'a>,
        predicate: NamedNodeRef<'_>,
    ) -> Result<Option<T>, ShapeError> {
        let Some(object) = self.graph.object_for_subject_predicate(subject, predicate) else {
            return Ok(None);
        };
        match object {
            TermRef::Literal(literal) => literal
                .value()
                .parse()
                .map(Some)
                .map_err(|_| invalid_value(subject, predicate, object)),
            _ => Err(invalid_value(subject, predicate, object)),
        }
    }

    fn named_node(
        &self,
        subject: SubjectRef<'_>,
        predicate: NamedNodeRef<'_>,
        object: TermRef<'_>,
    ) -> Result<NamedNode, ShapeError> {
        match object {
            TermRef::NamedNode(node) => Ok(node.into_owned()),
            _ => Err(invalid_value(subject, predicate, object)),
        }
    }

    fn subject(
        &self,
        subject: SubjectRef<'_>,
        predicate: NamedNodeRef<'_>,
        object: TermRef<'a>,
    ) -> Result<SubjectRef<'a>, ShapeError> {
        as_subject(object).ok_or_else(|| invalid_value(subject, predicate, object))
    }

    fn value_term(
        &self,
        subject: SubjectRef<'_>,
        predicate: NamedNodeRef<'_>,
        object: TermRef<'_>,
    ) -> Result<Term, ShapeError> {
        match object {
            TermRef::NamedNode(node) => Ok(Term::NamedNode(node.into_owned())),
            TermRef::Literal(literal) => Ok(Term::Literal(literal.into_owned())),
            _ => Err(invalid_value(subject, predicate, object)),
        }
    }
}

fn as_subject(term: TermRef<'_>) -> Option<SubjectRef<'_>> {
    match term {
        TermRef::NamedNode(node) => Some(SubjectRef::NamedNode(node)),
        TermRef::BlankNode(node) => Some(SubjectRef::BlankNode(node)),
        _ => None,
    }
}

fn invalid_value(
    subject: SubjectRef<'_>,
    predicate: NamedNodeRef<'_>,
    object: TermRef<'_>,
) -> ShapeError {
    ShapeError::InvalidValue {
        shape: subject.to_string(),
        predicate: predicate.to_string(),
        value: object.to_string(),
    }
}
