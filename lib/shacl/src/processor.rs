use crate::bnode::bnode_chain;
use crate::{FilterConstraint, NodeShape, PropertyPath, PropertyShape, ShapeKind, ShapePath};
use ldquery_grammar::{
    var, Expression, GraphPattern, GroupGraphPattern, InlineData, SimpleTriple, Term,
    TriplePattern,
};
use ldquery_model::vocab::{rdf, rdfs, shext};
use ldquery_model::{NamedNode, ShapeError, Variable};
use rustc_hash::FxHashMap;
use tracing::debug;

/// The name of the node that terminates every path of a full-text search shape.
pub const FTS_SEARCH_NODE: &str = "fts_search_node";

/// Allocates the node variables of one numbering scope.
///
/// Nodes are named `{prefix}_node_{n}` with `n` starting at one. Other variables of the scope are
/// numbered per family, e.g. `{prefix}_filter_{n}`. A scope never hands out the same number twice.
#[derive(Clone, Debug)]
pub struct NodeScope {
    prefix: String,
    next_node: usize,
    families: FxHashMap<&'static str, usize>,
}

impl NodeScope {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next_node: 1,
            families: FxHashMap::default(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Reserves `count` consecutive node numbers and returns the first one.
    fn allocate(&mut self, count: usize) -> usize {
        let first = self.next_node;
        self.next_node += count;
        first
    }

    /// Reserves the next number of a variable family.
    fn allocate_in(&mut self, family: &'static str) -> usize {
        let next = self.families.entry(family).or_insert(1);
        let number = *next;
        *next += 1;
        number
    }

    fn node_name(&self, number: usize) -> String {
        format!("{}_node_{number}", self.prefix)
    }

    fn numbered(&self, name: &str, number: usize) -> Variable {
        var(format!("{}_{name}_{number}", self.prefix))
    }
}

/// The output of lowering a shape.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShapeFragment {
    pub where_clause: GroupGraphPattern,
    pub construct: Vec<SimpleTriple>,
    /// The terminal node of the longest path of a property shape.
    pub terminal: Option<Term>,
}

impl ShapeFragment {
    /// Moves the content of `other` into this fragment. The terminal of `self` is kept.
    pub fn append(&mut self, other: ShapeFragment) {
        self.where_clause.append(other.where_clause);
        self.construct.extend(other.construct);
        if self.terminal.is_none() {
            self.terminal = other.terminal;
        }
    }
}

/// Lowers node shapes and property shapes into WHERE fragments and CONSTRUCT triples.
#[derive(Clone, Debug)]
pub struct ShapeProcessor {
    kind: ShapeKind,
    focus: Term,
    path_nodes: FxHashMap<String, Term>,
}

impl ShapeProcessor {
    pub fn new(kind: ShapeKind, focus: impl Into<Term>) -> Self {
        Self {
            kind,
            focus: focus.into(),
            path_nodes: FxHashMap::default(),
        }
    }

    /// Replaces the node variable `name` with a fixed term wherever it would be allocated.
    #[must_use]
    pub fn with_path_node(mut self, name: impl Into<String>, term: impl Into<Term>) -> Self {
        self.path_nodes.insert(name.into(), term.into());
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn focus(&self) -> &Term {
        &self.focus
    }

    /// Lowers a node shape: the target class triple, every property shape, and the blank node
    /// chain.
    pub fn lower_node_shape(&self, shape: &NodeShape) -> Result<ShapeFragment, ShapeError> {
        if self.kind == ShapeKind::Endpoint && shape.hierarchy_level.is_none() {
            return Err(ShapeError::MissingHierarchyLevel {
                shape: shape.id.clone(),
            });
        }

        let mut fragment = ShapeFragment::default();
        match shape.target_classes.as_slice() {
            [] => {
                return Err(ShapeError::MissingTargetClass {
                    shape: shape.id.clone(),
                })
            }
            [class] if class.as_ref() == rdfs::RESOURCE => {}
            [class] => {
                let triple = SimpleTriple::new(self.focus.clone(), rdf::TYPE, class.clone());
                fragment.where_clause.add_triple(triple.to_pattern());
                fragment.construct.push(triple);
            }
            classes => {
                let classes_var = var("focus_classes");
                let triple =
                    SimpleTriple::new(self.focus.clone(), rdf::TYPE, classes_var.clone());
                fragment.where_clause.add_triple(triple.to_pattern());
                fragment.where_clause.add_pattern(GraphPattern::values(
                    classes_var,
                    classes.iter().cloned().map(Term::from),
                ));
                fragment.construct.push(triple);
            }
        }

        let mut shared_scope = NodeScope::new(self.kind.variable_prefix(0));
        for (index, property_shape) in shape.property_shapes.iter().enumerate() {
            let lowered = match self.kind {
                ShapeKind::Endpoint => self.lower_property_shape(property_shape, &mut shared_scope),
                ShapeKind::Profile | ShapeKind::Fts => {
                    let mut scope = NodeScope::new(self.kind.variable_prefix(index));
                    self.lower_property_shape(property_shape, &mut scope)
                }
            }?;
            fragment.where_clause.append(lowered.where_clause);
            fragment.construct.extend(lowered.construct);
        }

        if let Some((pattern, construct)) =
            shape.bnode_depth.and_then(|depth| bnode_chain(&self.focus, depth))
        {
            fragment.where_clause.add_pattern(pattern);
            fragment.construct.extend(construct);
        }

        debug!(
            shape = %shape.id,
            kind = %self.kind,
            construct_triples = fragment.construct.len(),
            "Lowered node shape"
        );
        Ok(fragment)
    }

    /// Lowers a single property shape, allocating its nodes from `scope`.
    pub fn lower_property_shape(
        &self,
        shape: &PropertyShape,
        scope: &mut NodeScope,
    ) -> Result<ShapeFragment, ShapeError> {
        if shape.max_count == Some(0) {
            return self.lower_exclusion(shape, scope);
        }

        let mut fragment = ShapeFragment::default();

        let mut and_paths = shape.and_paths.iter().collect::<Vec<_>>();
        and_paths.sort_by_key(|path| std::cmp::Reverse(path.path.hop_count()));
        for path in and_paths {
            let (terminal, number) =
                self.lower_shape_path(path, scope, &mut fragment.where_clause, &mut fragment.construct);
            if fragment.terminal.is_none() {
                if let Some(terminal) = &terminal {
                    add_class_constraint(shape, terminal, number, scope, &mut fragment);
                }
                fragment.terminal = terminal;
            }
        }

        if !shape.union_paths.is_empty() {
            let mut branches = Vec::with_capacity(shape.union_paths.len());
            for path in &shape.union_paths {
                let mut branch = ShapeFragment::default();
                let (terminal, number) = self.lower_shape_path(
                    path,
                    scope,
                    &mut branch.where_clause,
                    &mut branch.construct,
                );
                if fragment.terminal.is_none() {
                    if let Some(terminal) = &terminal {
                        add_class_constraint(shape, terminal, number, scope, &mut branch);
                    }
                }
                branch.terminal = terminal;
                branches.push(branch);
            }
            if fragment.terminal.is_none() {
                fragment.terminal = self.join_terminals(scope, &mut branches);
            }
            let mut union = Vec::with_capacity(branches.len());
            for branch in branches {
                fragment.construct.extend(branch.construct);
                union.push(branch.where_clause);
            }
            fragment.where_clause.add_pattern(GraphPattern::Union(union));
        }

        for filter in &shape.filters {
            self.add_filter(filter, scope, &mut fragment);
        }

        if shape.min_count == Some(0) {
            let inner = std::mem::take(&mut fragment.where_clause);
            fragment
                .where_clause
                .add_pattern(GraphPattern::Optional(inner));
        }
        Ok(fragment)
    }

    /// Binds the terminals of the union branches to one node so that the union has a single
    /// terminal. Branches that already end in the same node need no binding.
    fn join_terminals(
        &self,
        scope: &mut NodeScope,
        branches: &mut [ShapeFragment],
    ) -> Option<Term> {
        let first = branches.first()?.terminal.clone()?;
        if branches
            .iter()
            .all(|branch| branch.terminal.as_ref() == Some(&first))
        {
            return Some(first);
        }
        let number = scope.allocate(1);
        let joined = self.node(scope, number, false);
        let joined_var = joined.as_variable()?.clone();
        for branch in &mut *branches {
            let binding = match &branch.terminal {
                Some(Term::Variable(terminal)) => {
                    GraphPattern::Bind(terminal.clone().into(), joined_var.clone())
                }
                Some(terminal) => GraphPattern::values(joined_var.clone(), [terminal.clone()]),
                None => continue,
            };
            branch.where_clause.add_pattern(binding);
        }
        Some(joined)
    }

    /// Lowers `sh:maxCount 0`: the focus node may have any predicate except the declared ones.
    fn lower_exclusion(
        &self,
        shape: &PropertyShape,
        scope: &mut NodeScope,
    ) -> Result<ShapeFragment, ShapeError> {
        let predicates = shape
            .and_paths
            .iter()
            .chain(&shape.union_paths)
            .map(|path| {
                path.path
                    .as_direct()
                    .cloned()
                    .map(Expression::from)
                    .ok_or_else(|| ShapeError::UnsupportedPath {
                        node: shape.id.clone(),
                        message: "sh:maxCount 0 is only supported for direct paths".to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let number = scope.allocate_in("preds");
        let predicate_var = scope.numbered("preds", number);
        let triple = SimpleTriple::new(
            self.focus.clone(),
            predicate_var.clone(),
            scope.numbered("excluded_pred_vals", number),
        );
        let mut fragment = ShapeFragment::default();
        fragment.where_clause.add_triple(triple.to_pattern());
        fragment.where_clause.add_pattern(GraphPattern::Filter(Expression::NotIn(
            Box::new(predicate_var.into()),
            predicates,
        )));
        fragment.construct.push(triple);
        Ok(fragment)
    }

    /// Lowers one path and returns its terminal node together with the terminal's number.
    fn lower_shape_path(
        &self,
        shape_path: &ShapePath,
        scope: &mut NodeScope,
        where_clause: &mut GroupGraphPattern,
        construct: &mut Vec<SimpleTriple>,
    ) -> (Option<Term>, usize) {
        let path = &shape_path.path;
        if path.as_direct().map(NamedNode::as_ref) == Some(shext::ALL_PREDICATE_VALUES) {
            let number = scope.allocate_in("preds");
            let triple = SimpleTriple::new(
                self.focus.clone(),
                scope.numbered("preds", number),
                scope.numbered("vals", number),
            );
            where_clause.add_triple(triple.to_pattern());
            construct.push(triple);
            return (None, 0);
        }

        let hops = path.hop_count();
        let first = scope.allocate(hops);
        let nodes = (0..hops)
            .map(|offset| self.node(scope, first + offset, offset + 1 == hops))
            .collect::<Vec<_>>();
        let terminal = nodes.last().cloned().unwrap_or_else(|| self.focus.clone());

        let mut path_construct = Vec::new();
        match path {
            PropertyPath::Sequence(elements) if self.kind != ShapeKind::Endpoint => {
                let mut subject = self.focus.clone();
                for (element, object) in elements.iter().zip(&nodes) {
                    self.lower_hop(element, &subject, object, where_clause, &mut path_construct);
                    subject = object.clone();
                }
            }
            PropertyPath::Alternative(members) => {
                where_clause.add_triple(TriplePattern::new(
                    self.focus.clone(),
                    path.to_path_expr(),
                    terminal.clone(),
                ));
                path_construct.extend(
                    members
                        .iter()
                        .filter_map(|member| simple_triple(member, &self.focus, &terminal)),
                );
            }
            _ => {
                let triple = TriplePattern::new(
                    self.focus.clone(),
                    path.to_path_expr(),
                    terminal.clone(),
                );
                let triple = orient(path, triple);
                path_construct.extend(triple.to_simple());
                where_clause.add_triple(triple);
            }
        }

        match &shape_path.alias {
            Some(alias) => construct.push(SimpleTriple::new(
                self.focus.clone(),
                alias.clone(),
                terminal.clone(),
            )),
            None => construct.extend(path_construct),
        }
        (Some(terminal), first + hops - 1)
    }

    /// Lowers one element of a sequence path between `subject` and `object`.
    fn lower_hop(
        &self,
        element: &PropertyPath,
        subject: &Term,
        object: &Term,
        where_clause: &mut GroupGraphPattern,
        construct: &mut Vec<SimpleTriple>,
    ) {
        match element {
            PropertyPath::Alternative(members) => {
                let branches = members
                    .iter()
                    .map(|member| {
                        let triple = orient(
                            member,
                            TriplePattern::new(subject.clone(), member.to_path_expr(), object.clone()),
                        );
                        GroupGraphPattern::from_triples([triple])
                    })
                    .collect();
                where_clause.add_pattern(GraphPattern::Union(branches));
                construct.extend(members.iter().filter_map(|member| {
                    simple_triple(member, subject, object)
                        .or_else(|| plain_predicate_triple(member, subject, object))
                }));
            }
            _ => {
                let triple = orient(
                    element,
                    TriplePattern::new(subject.clone(), element.to_path_expr(), object.clone()),
                );
                match triple.to_simple() {
                    Some(simple) => construct.push(simple),
                    None => construct.extend(plain_predicate_triple(element, subject, object)),
                }
                where_clause.add_triple(triple);
            }
        }
    }

    /// Adds a sibling constraint of the focus node to the fragment.
    fn add_filter(
        &self,
        filter: &FilterConstraint,
        scope: &mut NodeScope,
        fragment: &mut ShapeFragment,
    ) {
        let object = match filter.values.as_slice() {
            [value] => value.clone(),
            values => {
                let number = scope.allocate_in("filter");
                let filter_var = scope.numbered("filter", number);
                fragment.where_clause.add_pattern(GraphPattern::values(
                    filter_var.clone(),
                    values.iter().cloned(),
                ));
                filter_var.into()
            }
        };
        let triple = orient(
            &filter.path,
            TriplePattern::new(self.focus.clone(), filter.path.to_path_expr(), object),
        );
        fragment.construct.extend(triple.to_simple());
        fragment.where_clause.add_triple(triple);
    }

    fn node(&self, scope: &NodeScope, number: usize, is_last: bool) -> Term {
        if is_last && self.kind == ShapeKind::Fts {
            return Term::var(FTS_SEARCH_NODE);
        }
        let name = scope.node_name(number);
        match self.path_nodes.get(&name) {
            Some(term) => term.clone(),
            None => Term::var(name),
        }
    }
}

/// Constrains the class of the terminal node of a property shape.
fn add_class_constraint(
    shape: &PropertyShape,
    terminal: &Term,
    number: usize,
    scope: &NodeScope,
    fragment: &mut ShapeFragment,
) {
    match shape.classes.as_slice() {
        [] => {}
        [class] => {
            let triple = SimpleTriple::new(terminal.clone(), rdf::TYPE, class.clone());
            fragment.where_clause.add_triple(triple.to_pattern());
            fragment.construct.push(triple);
        }
        classes => {
            let classes_var = var(format!("{}_node_classes_{number}", scope.prefix));
            let triple = SimpleTriple::new(terminal.clone(), rdf::TYPE, classes_var.clone());
            fragment.where_clause.add_triple(triple.to_pattern());
            fragment.where_clause.add_pattern(GraphPattern::Values(InlineData::single(
                classes_var,
                classes.iter().cloned().map(Term::from),
            )));
            fragment.construct.push(triple);
        }
    }
}

/// Turns `subject ^p object` into `object p subject` for inverse direct paths.
fn orient(path: &PropertyPath, triple: TriplePattern) -> TriplePattern {
    match path.as_inverse_direct() {
        Some(predicate) => TriplePattern::new(triple.object, predicate.clone(), triple.subject),
        None => triple,
    }
}

/// The CONSTRUCT triple of a direct or inverse direct path.
fn simple_triple(path: &PropertyPath, subject: &Term, object: &Term) -> Option<SimpleTriple> {
    if let Some(predicate) = path.as_direct() {
        return Some(SimpleTriple::new(subject.clone(), predicate.clone(), object.clone()));
    }
    path.as_inverse_direct()
        .map(|predicate| SimpleTriple::new(object.clone(), predicate.clone(), subject.clone()))
}

/// The CONSTRUCT triple of a cardinality path over a direct predicate, using the plain predicate.
fn plain_predicate_triple(
    path: &PropertyPath,
    subject: &Term,
    object: &Term,
) -> Option<SimpleTriple> {
    match path {
        PropertyPath::ZeroOrMore(inner)
        | PropertyPath::OneOrMore(inner)
        | PropertyPath::ZeroOrOne(inner) => simple_triple(inner, subject, object),
        _ => None,
    }
}
