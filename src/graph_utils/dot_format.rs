use petgraph::{dot::Dot, Graph, Undirected};
use std::fmt::Display;

/// Trait for things that can have a representation in .dot format.
pub trait DotFormat {
    fn get_dot(&self) -> String;
}

/// Nodes and edges are labeled with their weights.
impl<N, E> DotFormat for Graph<N, E, Undirected>
where
    N: Display,
    E: Display,
{
    fn get_dot(&self) -> String {
        format!("{}", Dot::new(self))
    }
}
