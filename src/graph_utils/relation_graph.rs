use itertools::Itertools;
use petgraph::{graph::NodeIndex, unionfind::UnionFind, visit::EdgeRef, Graph, Undirected};

use super::DotFormat;
use crate::seating_problem::constraint::{Constraint, Relation};
use crate::SeatingProblem;

/// Undirected graph with one node per entity and one edge per constraint.
///
/// Node weights are 1-indexed entity ids, edge weights are the relations.
pub type RelationGraph = Graph<usize, Relation, Undirected>;

/// Builds the relation graph of `problem`.
pub fn relation_graph(problem: &SeatingProblem) -> RelationGraph {
    let mut graph = RelationGraph::with_capacity(problem.entity_count(), problem.constraints().len());
    for entity in 1..=problem.entity_count() {
        graph.add_node(entity);
    }
    for constraint in problem.constraints() {
        graph.add_edge(
            node(constraint.first),
            node(constraint.second),
            constraint.relation,
        );
    }
    graph
}

/// Returns the must-not-share constraints between entities that are forced into
/// one slot by a chain of must-share constraints.
///
/// Any such constraint makes the problem unsatisfiable. The converse does not hold,
/// since there may be too few slots to separate the entities.
pub fn conflicting_pairs(graph: &RelationGraph) -> Vec<Constraint> {
    let mut components = UnionFind::<usize>::new(graph.node_count());
    for edge in graph.edge_references() {
        if *edge.weight() == Relation::MustShare {
            components.union(edge.source().index(), edge.target().index());
        }
    }

    graph
        .edge_references()
        .filter(|edge| *edge.weight() == Relation::MustNotShare)
        .filter(|edge| components.equiv(edge.source().index(), edge.target().index()))
        .map(|edge| {
            Constraint::new(
                graph[edge.source()],
                graph[edge.target()],
                Relation::MustNotShare,
            )
        })
        .sorted()
        .dedup()
        .collect_vec()
}

impl DotFormat for SeatingProblem {
    fn get_dot(&self) -> String {
        relation_graph(self).get_dot()
    }
}

fn node(entity: usize) -> NodeIndex {
    NodeIndex::new(entity - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat_encoder::SatEncoder;
    use crate::sat_solver::{dpll::Dpll, SatResult};
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_relation_graph() -> Result<(), Box<dyn std::error::Error>> {
        let problem: SeatingProblem = "3 2\n1 2 F\n2 3 E\n".parse()?;
        let graph = relation_graph(&problem);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph[node(3)], 3);
        Ok(())
    }

    #[test]
    fn test_conflicting_pairs() -> Result<(), Box<dyn std::error::Error>> {
        let problem: SeatingProblem = "4 3\n1 2 F\n2 3 F\n3 1 E\n3 4 E\n".parse()?;
        let conflicts = conflicting_pairs(&relation_graph(&problem));
        assert_eq!(conflicts, vec![Constraint::new(3, 1, Relation::MustNotShare)]);

        let self_pair: SeatingProblem = "2 2\n2 2 E\n".parse()?;
        assert_eq!(
            conflicting_pairs(&relation_graph(&self_pair)),
            vec![Constraint::new(2, 2, Relation::MustNotShare)]
        );

        let fine: SeatingProblem = "3 2\n1 2 F\n2 3 E\n".parse()?;
        assert!(conflicting_pairs(&relation_graph(&fine)).is_empty());
        Ok(())
    }

    #[test]
    fn test_conflicts_imply_unsatisfiable() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut conflicting = 0;
        for _ in 0..200 {
            let problem = SeatingProblem::generate_random(5, 3, 6, &mut rng);
            if conflicting_pairs(&relation_graph(&problem)).is_empty() {
                continue;
            }
            conflicting += 1;
            let clauses = SatEncoder::new(&problem).encode();
            assert_eq!(Dpll::new().solve(&clauses), SatResult::Unsatisfiable, "{}", problem);
        }
        assert!(conflicting > 0);
    }

    #[test]
    fn test_dot_labels() -> Result<(), Box<dyn std::error::Error>> {
        let problem: SeatingProblem = "2 2\n1 2 E\n".parse()?;
        let dot = problem.get_dot();
        assert!(dot.starts_with("graph {"));
        assert!(dot.contains("\"E\""));
        assert!(dot.contains("\"2\""));
        Ok(())
    }
}
