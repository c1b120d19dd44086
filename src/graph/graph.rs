use std::fmt::Display;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};

/// Simple undirected graph. Nodes keep their first-insertion order, which
/// every consumer (coloring tie-breaks, listings, exports) relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<N: Hash + Eq> {
    adj: IndexMap<N, IndexSet<usize>>,
    edges: usize,
}

impl<N: Hash + Eq> Default for Graph<N> {
    fn default() -> Self {
        Self {
            adj: IndexMap::new(),
            edges: 0,
        }
    }
}

impl<N: Clone + Hash + Eq + Display> Graph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node's position in iteration order.
    pub fn add_node(&mut self, node: N) -> usize {
        let entry = self.adj.entry(node);
        let index = entry.index();
        entry.or_default();
        index
    }

    /// Inserts missing endpoints and the undirected edge. Returns `false`
    /// when the edge was already present.
    pub fn add_edge(&mut self, u: N, v: N) -> Result<bool> {
        if u == v {
            return Err(Error::InvalidEdge {
                node: u.to_string(),
            });
        }
        let ui = self.add_node(u);
        let vi = self.add_node(v);
        Ok(self.link(ui, vi))
    }

    /// All-or-nothing: a self-loop anywhere in `edges` leaves the graph untouched.
    pub fn add_edges<I>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let edges = edges.into_iter().collect::<Vec<_>>();
        if let Some((u, _)) = edges.iter().find(|(u, v)| u == v) {
            return Err(Error::InvalidEdge {
                node: u.to_string(),
            });
        }
        for (u, v) in edges {
            self.add_edge(u, v)?;
        }
        Ok(())
    }

    fn link(&mut self, ui: usize, vi: usize) -> bool {
        let fresh = self.adj[ui].insert(vi);
        if fresh {
            self.adj[vi].insert(ui);
            self.edges += 1;
        }
        fresh
    }

    pub fn contains(&self, node: &N) -> bool {
        self.adj.contains_key(node)
    }

    pub fn has_edge(&self, u: &N, v: &N) -> bool {
        match (self.adj.get(u), self.adj.get_index_of(v)) {
            (Some(nbrs), Some(vi)) => nbrs.contains(&vi),
            _ => false,
        }
    }

    /// Neighbors in insertion order; empty for an unknown node.
    pub fn neighbors<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N> + 'a {
        self.adj
            .get(node)
            .into_iter()
            .flat_map(move |nbrs| nbrs.iter().filter_map(move |&i| self.node_at(i)))
    }

    pub fn degree(&self, node: &N) -> usize {
        self.adj.get(node).map_or(0, IndexSet::len)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.adj.keys()
    }

    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Each undirected edge once, lower-indexed endpoint first.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.adj.iter().enumerate().flat_map(move |(ui, (u, nbrs))| {
            nbrs.iter()
                .filter(move |&&vi| vi > ui)
                .filter_map(move |&vi| self.node_at(vi).map(|v| (u, v)))
        })
    }

    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.adj.get_index_of(node)
    }

    pub fn node_at(&self, index: usize) -> Option<&N> {
        self.adj.get_index(index).map(|(n, _)| n)
    }

    pub fn neighbor_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.adj
            .get_index(index)
            .into_iter()
            .flat_map(|(_, nbrs)| nbrs.iter().copied())
    }

    pub fn degree_at(&self, index: usize) -> usize {
        self.adj.get_index(index).map_or(0, |(_, nbrs)| nbrs.len())
    }
}
