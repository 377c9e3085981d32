//! SELECT algebra decomposition
//!
//! The algebra of a SELECT query does not follow its surface syntax: clauses
//! become wrapper nodes stacked over the WHERE pattern. Built bottom-up, a
//! SELECT looks like
//!
//! ```text
//! Slice                      LIMIT / OFFSET
//!   Distinct | Reduced       modifier
//!     Project                projection
//!       OrderBy              ORDER BY
//!         Extend*            (expr AS ?v) in the projection
//!           Join(_, Values)  trailing VALUES
//!             Filter*        HAVING
//!               Group        GROUP BY + aggregates
//!                 Extend*    GROUP BY (expr AS ?v)
//!                   ...      WHERE pattern
//! ```
//!
//! [`AlgebraDecomposer`] peels these wrappers off top-down and records each
//! one in a [`DecomposedSelect`]. A HAVING condition is a plain `Filter` node;
//! it is told apart from a WHERE filter only by sitting directly above the
//! `Group` node.

use super::{SparqlError, SparqlResult};
use spargebra::algebra::{AggregateExpression, Expression, GraphPattern, OrderExpression};
use spargebra::term::{GroundTerm, Variable};
use std::collections::{BTreeSet, HashMap};

/// DISTINCT or REDUCED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryModifier {
    /// SELECT DISTINCT
    Distinct,
    /// SELECT REDUCED
    Reduced,
}

/// Clause slots of a decomposed SELECT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClauseKind {
    Projection,
    Modifier,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    Offset,
    Values,
}

/// One output column
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionElement {
    /// Output variable
    pub variable: Variable,
    /// Bound expression for `(expr AS ?v)` columns
    pub expression: Option<Expression>,
}

impl ProjectionElement {
    /// Output column name, without the leading `?`
    pub fn target_name(&self) -> &str {
        self.variable.as_str()
    }
}

/// Grouping node contents
#[derive(Debug, Clone, PartialEq)]
pub struct GroupClause {
    /// Grouping keys, in declaration order; empty when grouping is implied
    /// by aggregates alone
    pub variables: Vec<Variable>,
    /// `GROUP BY (expr AS ?v)` keys, in declaration order
    pub key_bindings: Vec<(Variable, Expression)>,
    /// Aggregates computed per group, bound to their result variables
    pub aggregates: Vec<(Variable, AggregateExpression)>,
}

impl GroupClause {
    /// True when there is no explicit GROUP BY key
    pub fn is_implicit(&self) -> bool {
        self.variables.is_empty()
    }

    /// Aggregate bound to `variable`
    pub fn aggregate(&self, variable: &Variable) -> Option<&AggregateExpression> {
        self.aggregates
            .iter()
            .find(|(v, _)| v == variable)
            .map(|(_, aggregate)| aggregate)
    }
}

/// Trailing `VALUES` block
#[derive(Debug, Clone, PartialEq)]
pub struct ValuesClause {
    pub variables: Vec<Variable>,
    /// One row per solution; `None` is `UNDEF`
    pub bindings: Vec<Vec<Option<GroundTerm>>>,
}

/// Clause-level view of a SELECT query
///
/// An independent snapshot: decomposition clones what it keeps and never
/// touches the source tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DecomposedSelect {
    projection: Vec<ProjectionElement>,
    pattern: GraphPattern,
    group_by: Option<GroupClause>,
    order_by: Option<Vec<OrderExpression>>,
    having: Option<Expression>,
    values: Option<ValuesClause>,
    limit: Option<usize>,
    offset: Option<usize>,
    modifier: Option<QueryModifier>,
}

impl DecomposedSelect {
    /// Output columns, in declaration order
    pub fn projection(&self) -> &[ProjectionElement] {
        &self.projection
    }

    /// The WHERE pattern
    pub fn pattern(&self) -> &GraphPattern {
        &self.pattern
    }

    /// Grouping node, explicit or implied by aggregates
    pub fn group_by(&self) -> Option<&GroupClause> {
        self.group_by.as_ref()
    }

    /// ORDER BY conditions, in declaration order
    pub fn order_by(&self) -> Option<&[OrderExpression]> {
        self.order_by.as_deref()
    }

    /// HAVING condition; only ever set together with a group
    pub fn having(&self) -> Option<&Expression> {
        self.having.as_ref()
    }

    /// Trailing VALUES block
    pub fn values(&self) -> Option<&ValuesClause> {
        self.values.as_ref()
    }

    /// LIMIT
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// OFFSET; `OFFSET 0` reads as none
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// DISTINCT or REDUCED
    pub fn modifier(&self) -> Option<QueryModifier> {
        self.modifier
    }

    /// Names of the projected variables, in declaration order
    pub fn projection_result_vars(&self) -> Vec<String> {
        self.projection
            .iter()
            .map(|element| element.target_name().to_string())
            .collect()
    }

    /// Aggregate computed for an aggregated projection column
    ///
    /// `(COUNT(?x) AS ?n)` is bound to a variable produced by the group's
    /// aggregate list; this follows that indirection.
    pub fn projection_aggregate(&self, element: &ProjectionElement) -> Option<&AggregateExpression> {
        match (&element.expression, &self.group_by) {
            (Some(Expression::Variable(v)), Some(group)) => group.aggregate(v),
            _ => None,
        }
    }

    /// Clause kinds present in the source query
    pub fn clauses(&self) -> BTreeSet<ClauseKind> {
        let mut clauses = BTreeSet::new();
        clauses.insert(ClauseKind::Projection);
        if self.modifier.is_some() {
            clauses.insert(ClauseKind::Modifier);
        }
        if self.group_by.as_ref().is_some_and(|g| !g.is_implicit()) {
            clauses.insert(ClauseKind::GroupBy);
        }
        if self.having.is_some() {
            clauses.insert(ClauseKind::Having);
        }
        if self.order_by.is_some() {
            clauses.insert(ClauseKind::OrderBy);
        }
        if self.limit.is_some() {
            clauses.insert(ClauseKind::Limit);
        }
        if self.offset.is_some() {
            clauses.insert(ClauseKind::Offset);
        }
        if self.values.is_some() {
            clauses.insert(ClauseKind::Values);
        }
        clauses
    }
}

/// Top-down SELECT decomposer
pub struct AlgebraDecomposer;

impl AlgebraDecomposer {
    /// Decompose the algebra tree of a SELECT query
    ///
    /// Wrappers are recognized at most once each and only in the order the
    /// algebra stacks them. The first node that does not fit is the WHERE
    /// pattern, so sub-selects and filters inside it are left alone.
    pub fn decompose(root: &GraphPattern) -> SparqlResult<DecomposedSelect> {
        let mut node = root;

        let mut limit = None;
        let mut offset = None;
        if let GraphPattern::Slice { inner, start, length } = node {
            offset = (*start > 0).then_some(*start);
            limit = *length;
            node = &**inner;
        }

        let mut modifier = None;
        match node {
            GraphPattern::Distinct { inner } => {
                modifier = Some(QueryModifier::Distinct);
                node = &**inner;
            }
            GraphPattern::Reduced { inner } => {
                modifier = Some(QueryModifier::Reduced);
                node = &**inner;
            }
            _ => {}
        }

        let GraphPattern::Project { inner, variables } = node else {
            return Err(SparqlError::NotAProjectionQuery(node_kind(node).to_string()));
        };
        node = &**inner;

        let mut order_by = None;
        if let GraphPattern::OrderBy { inner, expression } = node {
            order_by = Some(expression.clone());
            node = &**inner;
        }

        // Projection expressions bind projected variables right below the
        // projection (and ordering).
        let mut bound: HashMap<&Variable, &Expression> = HashMap::new();
        while let GraphPattern::Extend { inner, variable, expression } = node {
            if !variables.contains(variable) || bound.contains_key(variable) {
                break;
            }
            bound.insert(variable, expression);
            node = &**inner;
        }

        let mut values = None;
        if let GraphPattern::Join { left, right } = node {
            if let GraphPattern::Values { variables, bindings } = &**right {
                values = Some(ValuesClause {
                    variables: variables.clone(),
                    bindings: bindings.clone(),
                });
                node = &**left;
            }
        }

        let mut having = None;
        if let Some((condition, group_node)) = having_above_group(node) {
            having = Some(condition);
            node = group_node;
        }

        let mut group_by = None;
        if let GraphPattern::Group { inner, variables: keys, aggregates } = node {
            node = &**inner;

            let mut key_bindings = Vec::new();
            while let GraphPattern::Extend { inner, variable, expression } = node {
                if !keys.contains(variable) || key_bindings.iter().any(|(v, _)| v == variable) {
                    break;
                }
                key_bindings.push((variable.clone(), expression.clone()));
                node = &**inner;
            }
            // outermost binding is the last declared key
            key_bindings.reverse();

            group_by = Some(GroupClause {
                variables: keys.clone(),
                key_bindings,
                aggregates: aggregates.clone(),
            });
        }

        let projection = variables
            .iter()
            .map(|variable| ProjectionElement {
                variable: variable.clone(),
                expression: bound.get(variable).map(|e| (*e).clone()),
            })
            .collect();

        Ok(DecomposedSelect {
            projection,
            pattern: node.clone(),
            group_by,
            order_by,
            having,
            values,
            limit,
            offset,
            modifier,
        })
    }
}

/// Filter chain sitting directly on a `Group` node
///
/// Returns the combined condition and the group node. Conditions are joined
/// with `&&`, innermost first.
fn having_above_group(node: &GraphPattern) -> Option<(Expression, &GraphPattern)> {
    let mut conditions = Vec::new();
    let mut current = node;
    while let GraphPattern::Filter { expr, inner } = current {
        conditions.push(expr);
        current = &**inner;
    }
    if !matches!(current, GraphPattern::Group { .. }) {
        return None;
    }
    let condition = conditions
        .into_iter()
        .rev()
        .cloned()
        .reduce(|acc, next| Expression::And(Box::new(acc), Box::new(next)))?;
    Some((condition, current))
}

fn node_kind(node: &GraphPattern) -> &'static str {
    match node {
        GraphPattern::Bgp { .. } => "basic graph pattern",
        GraphPattern::Path { .. } => "property path",
        GraphPattern::Join { .. } => "join",
        GraphPattern::LeftJoin { .. } => "optional",
        GraphPattern::Filter { .. } => "filter",
        GraphPattern::Union { .. } => "union",
        GraphPattern::Extend { .. } => "bind",
        GraphPattern::Values { .. } => "values",
        GraphPattern::Group { .. } => "group",
        GraphPattern::OrderBy { .. } => "order by",
        GraphPattern::Slice { .. } => "slice",
        _ => "graph pattern",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spargebra::Query;

    fn decompose(text: &str) -> DecomposedSelect {
        match Query::parse(text, None).unwrap() {
            Query::Select { pattern, .. } => AlgebraDecomposer::decompose(&pattern).unwrap(),
            other => panic!("Expected SELECT, got {}", other),
        }
    }

    fn var(name: &str) -> Variable {
        Variable::new_unchecked(name)
    }

    #[test]
    fn test_plain_select() {
        let d = decompose("SELECT ?b ?a WHERE { ?a <http://example.org/p> ?b }");

        assert_eq!(d.projection_result_vars(), vec!["b", "a"]);
        assert!(d.projection().iter().all(|e| e.expression.is_none()));
        assert!(matches!(d.pattern(), GraphPattern::Bgp { .. }));
        assert_eq!(d.clauses(), BTreeSet::from([ClauseKind::Projection]));
    }

    #[test]
    fn test_modifier_order_limit_offset() {
        let d = decompose("SELECT DISTINCT ?s WHERE { ?s ?p ?o } ORDER BY DESC(?s) ?p LIMIT 10 OFFSET 5");

        assert_eq!(d.modifier(), Some(QueryModifier::Distinct));
        assert_eq!(d.limit(), Some(10));
        assert_eq!(d.offset(), Some(5));
        let order = d.order_by().unwrap();
        assert_eq!(order.len(), 2);
        assert!(matches!(order[0], OrderExpression::Desc(_)));
        assert!(matches!(order[1], OrderExpression::Asc(_)));
    }

    #[test]
    fn test_reduced() {
        let d = decompose("SELECT REDUCED ?s WHERE { ?s ?p ?o }");
        assert_eq!(d.modifier(), Some(QueryModifier::Reduced));
    }

    #[test]
    fn test_limit_without_offset() {
        let d = decompose("SELECT ?s WHERE { ?s ?p ?o } LIMIT 3");
        assert_eq!(d.limit(), Some(3));
        assert_eq!(d.offset(), None);
    }

    #[test]
    fn test_projection_expression() {
        let d = decompose("SELECT ?s (STR(?o) AS ?text) WHERE { ?s ?p ?o }");

        assert_eq!(d.projection_result_vars(), vec!["s", "text"]);
        assert!(d.projection()[0].expression.is_none());
        assert!(d.projection()[1].expression.is_some());
        assert!(matches!(d.pattern(), GraphPattern::Bgp { .. }));
    }

    #[test]
    fn test_group_having_and_aggregate_column() {
        let d = decompose(
            "SELECT ?s (COUNT(?o) AS ?n) WHERE { ?s ?p ?o } GROUP BY ?s HAVING (COUNT(?o) > 1)",
        );

        let group = d.group_by().unwrap();
        assert_eq!(group.variables, vec![var("s")]);
        assert!(!group.aggregates.is_empty());
        assert!(d.having().is_some());
        assert!(matches!(d.pattern(), GraphPattern::Bgp { .. }));

        let n = &d.projection()[1];
        assert_eq!(n.target_name(), "n");
        assert!(d.projection_aggregate(n).is_some());
        assert!(d.projection_aggregate(&d.projection()[0]).is_none());
        assert_eq!(
            d.clauses(),
            BTreeSet::from([ClauseKind::Projection, ClauseKind::GroupBy, ClauseKind::Having])
        );
    }

    #[test]
    fn test_group_key_expression() {
        let d = decompose("SELECT ?k WHERE { ?s ?p ?o } GROUP BY (STR(?o) AS ?k)");

        let group = d.group_by().unwrap();
        assert_eq!(group.key_bindings.len(), 1);
        assert_eq!(group.key_bindings[0].0, var("k"));
        assert!(matches!(d.pattern(), GraphPattern::Bgp { .. }));
    }

    #[test]
    fn test_trailing_values_above_having() {
        let d = decompose(
            "SELECT ?s (COUNT(?o) AS ?n) WHERE { ?s ?p ?o } GROUP BY ?s HAVING (COUNT(?o) > 1) \
             VALUES ?s { <http://example.org/a> UNDEF }",
        );

        let values = d.values().unwrap();
        assert_eq!(values.variables, vec![var("s")]);
        assert_eq!(values.bindings.len(), 2);
        assert!(values.bindings[1][0].is_none());

        assert!(d.group_by().is_some());
        assert!(d.having().is_some());
        assert!(d.projection_aggregate(&d.projection()[1]).is_some());
        assert!(matches!(d.pattern(), GraphPattern::Bgp { .. }));
        assert_eq!(
            d.clauses(),
            BTreeSet::from([
                ClauseKind::Projection,
                ClauseKind::GroupBy,
                ClauseKind::Having,
                ClauseKind::Values,
            ])
        );
    }

    #[test]
    fn test_where_filter_is_not_having() {
        let d = decompose("SELECT ?s WHERE { ?s ?p ?o FILTER(?o > 1) }");

        assert!(d.having().is_none());
        assert!(d.group_by().is_none());
        assert!(matches!(d.pattern(), GraphPattern::Filter { .. }));
    }

    #[test]
    fn test_filter_below_group_stays_in_pattern() {
        let d = decompose(
            "SELECT ?s (COUNT(?o) AS ?n) WHERE { ?s ?p ?o FILTER(?o > 1) } GROUP BY ?s",
        );

        assert!(d.group_by().is_some());
        assert!(d.having().is_none());
        assert!(matches!(d.pattern(), GraphPattern::Filter { .. }));
    }

    #[test]
    fn test_implicit_group() {
        let d = decompose("SELECT (COUNT(*) AS ?c) WHERE { ?s ?p ?o }");

        let group = d.group_by().unwrap();
        assert!(group.is_implicit());
        assert!(!d.clauses().contains(&ClauseKind::GroupBy));
    }

    #[test]
    fn test_subselect_is_part_of_pattern() {
        let d = decompose(
            "SELECT ?s WHERE { { SELECT DISTINCT ?s WHERE { ?s ?p ?o } LIMIT 2 } }",
        );

        assert!(d.modifier().is_none());
        assert!(d.limit().is_none());
        assert_eq!(d.projection_result_vars(), vec!["s"]);
    }

    #[test]
    fn test_not_a_projection() {
        let tree = GraphPattern::Bgp { patterns: vec![] };
        let err = AlgebraDecomposer::decompose(&tree).unwrap_err();
        assert!(matches!(err, SparqlError::NotAProjectionQuery(_)));

        let tree = GraphPattern::Distinct { inner: Box::new(GraphPattern::Bgp { patterns: vec![] }) };
        assert!(AlgebraDecomposer::decompose(&tree).is_err());
    }

    #[test]
    fn test_hand_built_filter_position() {
        let s = var("s");
        let condition = Expression::Bound(s.clone());
        let group = GraphPattern::Group {
            inner: Box::new(GraphPattern::Bgp { patterns: vec![] }),
            variables: vec![s.clone()],
            aggregates: vec![],
        };

        let above_group = GraphPattern::Project {
            inner: Box::new(GraphPattern::Filter {
                expr: condition.clone(),
                inner: Box::new(group.clone()),
            }),
            variables: vec![s.clone()],
        };
        let d = AlgebraDecomposer::decompose(&above_group).unwrap();
        assert_eq!(d.having(), Some(&condition));

        let no_group = GraphPattern::Project {
            inner: Box::new(GraphPattern::Filter {
                expr: condition.clone(),
                inner: Box::new(GraphPattern::Bgp { patterns: vec![] }),
            }),
            variables: vec![s.clone()],
        };
        let d = AlgebraDecomposer::decompose(&no_group).unwrap();
        assert!(d.having().is_none());
        assert!(matches!(d.pattern(), GraphPattern::Filter { .. }));

        let filters_on_group = GraphPattern::Project {
            inner: Box::new(GraphPattern::Filter {
                expr: condition.clone(),
                inner: Box::new(GraphPattern::Filter {
                    expr: Expression::Bound(var("t")),
                    inner: Box::new(group),
                }),
            }),
            variables: vec![s],
        };
        let d = AlgebraDecomposer::decompose(&filters_on_group).unwrap();
        assert!(matches!(d.having(), Some(Expression::And(_, _))));
    }

    #[test]
    fn test_source_tree_untouched() {
        let query = Query::parse("SELECT ?s WHERE { ?s ?p ?o } LIMIT 1", None).unwrap();
        let before = query.clone();
        if let Query::Select { pattern, .. } = &query {
            AlgebraDecomposer::decompose(pattern).unwrap();
        }
        assert_eq!(query, before);
    }
}
