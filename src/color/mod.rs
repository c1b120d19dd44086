pub mod backtrack;
pub mod dsatur;
pub mod sat_encode;

use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::hash::Hash;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Symbolic color. The first four have names; higher indices only appear
/// once a coloring has run past them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(pub u32);

impl Color {
    pub const GREEN: Color = Color(0);
    pub const RED: Color = Color(1);
    pub const BLUE: Color = Color(2);
    pub const GREY: Color = Color(3);
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::GREEN => write!(f, "green"),
            Color::RED => write!(f, "red"),
            Color::BLUE => write!(f, "blue"),
            Color::GREY => write!(f, "grey"),
            Color(n) => write!(f, "color{n}"),
        }
    }
}

/// Node to color, in the order nodes were colored.
pub type Coloring<N> = IndexMap<N, Color>;

/// Anything that can complete a partial coloring: the DSATUR heuristic,
/// or an exact search that may prove no coloring fits the palette.
pub trait ColoringOracle<N: Clone + Hash + Eq + Display> {
    /// `Ok(None)` means the oracle proved no proper completion of `seed`
    /// exists within `palette`. Heuristic oracles never return it.
    fn color(
        &mut self,
        graph: &Graph<N>,
        seed: &Coloring<N>,
        palette: &[Color],
    ) -> Result<Option<Coloring<N>>>;

    fn oracle_name(&self) -> &'static str;
}

/// Rejects seeds that name unknown nodes or give two adjacent nodes the
/// same color.
pub fn validate_seed<N>(graph: &Graph<N>, seed: &Coloring<N>) -> Result<()>
where
    N: Clone + Hash + Eq + Display,
{
    for (node, color) in seed {
        if !graph.contains(node) {
            return Err(Error::invalid_seed(format!("node {node} is not in the graph")));
        }
        if let Some(nb) = graph
            .neighbors(node)
            .find(|nb| seed.get(*nb) == Some(color))
        {
            return Err(Error::invalid_seed(format!(
                "adjacent nodes {node} and {nb} are both {color}"
            )));
        }
    }
    Ok(())
}

/// Every node colored and no edge monochromatic.
pub fn is_proper<N>(graph: &Graph<N>, coloring: &Coloring<N>) -> bool
where
    N: Clone + Hash + Eq + Display,
{
    graph.nodes().all(|n| coloring.contains_key(n))
        && graph
            .edges()
            .all(|(u, v)| coloring.get(u) != coloring.get(v))
}

pub fn colors_used<N: Hash + Eq>(coloring: &Coloring<N>) -> BTreeSet<Color> {
    coloring.values().copied().collect()
}

/// Three colors in first-fit order: green, red, blue.
pub fn three_palette() -> [Color; 3] {
    [Color::GREEN, Color::RED, Color::BLUE]
}
