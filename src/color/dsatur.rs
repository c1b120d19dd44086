use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::error::Result;
use crate::graph::Graph;

use super::{Color, Coloring, ColoringOracle, colors_used, validate_seed};

/// Selection priority: saturation, then degree, then earliest node.
type Key = (usize, usize, Reverse<usize>);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DsaturStats {
    pub seeded: usize,
    pub selections: usize,
    pub colors_used: usize,
}

/// DSATUR as a pluggable oracle; remembers the stats of its last run.
#[derive(Debug, Clone, Default)]
pub struct Dsatur {
    last: DsaturStats,
}

impl Dsatur {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> DsaturStats {
        self.last
    }
}

impl<N: Clone + Hash + Eq + Display> ColoringOracle<N> for Dsatur {
    fn color(
        &mut self,
        graph: &Graph<N>,
        seed: &Coloring<N>,
        palette: &[Color],
    ) -> Result<Option<Coloring<N>>> {
        let (coloring, stats) = dsatur_with_stats(graph, seed, palette)?;
        self.last = stats;
        Ok(Some(coloring))
    }

    fn oracle_name(&self) -> &'static str {
        "dsatur"
    }
}

pub fn dsatur<N>(graph: &Graph<N>, seed: &Coloring<N>, palette: &[Color]) -> Result<Coloring<N>>
where
    N: Clone + Hash + Eq + Display,
{
    dsatur_with_stats(graph, seed, palette).map(|(c, _)| c)
}

/// Completes `seed` greedily. Always succeeds on a valid seed: once
/// `palette` is exhausted, colors outside it are handed out in index order.
pub fn dsatur_with_stats<N>(
    graph: &Graph<N>,
    seed: &Coloring<N>,
    palette: &[Color],
) -> Result<(Coloring<N>, DsaturStats)>
where
    N: Clone + Hash + Eq + Display,
{
    validate_seed(graph, seed)?;

    let n = graph.node_count();
    let mut assigned = vec![None::<Color>; n];
    let mut saturation = vec![BTreeSet::<Color>::new(); n];
    let mut out = Coloring::with_capacity(n);

    for (node, &color) in seed {
        let Some(i) = graph.index_of(node) else {
            continue;
        };
        assigned[i] = Some(color);
        out.insert(node.clone(), color);
        for j in graph.neighbor_indices(i) {
            saturation[j].insert(color);
        }
    }

    let key = |i: usize, sat: &BTreeSet<Color>| -> Key {
        (sat.len(), graph.degree_at(i), Reverse(i))
    };

    let mut queue = BTreeSet::<Key>::new();
    for i in (0..n).filter(|&i| assigned[i].is_none()) {
        queue.insert(key(i, &saturation[i]));
    }

    if seed.is_empty() {
        if let Some(&(_, degree, Reverse(first))) = queue.last() {
            trace!(node = first, degree, "no seed, starting from max degree node");
        }
    }

    let mut selections = 0usize;
    while let Some((_, _, Reverse(i))) = queue.pop_last() {
        selections += 1;
        let color = first_fit(&saturation[i], palette);
        assigned[i] = Some(color);
        if let Some(node) = graph.node_at(i) {
            out.insert(node.clone(), color);
        }

        for j in graph.neighbor_indices(i) {
            if assigned[j].is_some() {
                continue;
            }
            let before = key(j, &saturation[j]);
            if saturation[j].insert(color) {
                queue.remove(&before);
                queue.insert(key(j, &saturation[j]));
            }
        }
    }

    let stats = DsaturStats {
        seeded: seed.len(),
        selections,
        colors_used: colors_used(&out).len(),
    };
    debug!(
        nodes = n,
        seeded = stats.seeded,
        selections = stats.selections,
        colors_used = stats.colors_used,
        "dsatur finished"
    );
    Ok((out, stats))
}

/// First palette color absent from `taken`; past the palette, the lowest
/// color index that is neither in the palette nor taken.
fn first_fit(taken: &BTreeSet<Color>, palette: &[Color]) -> Color {
    if let Some(&c) = palette.iter().find(|c| !taken.contains(*c)) {
        return c;
    }
    let mut k = 0u32;
    loop {
        let c = Color(k);
        if !palette.contains(&c) && !taken.contains(&c) {
            return c;
        }
        k += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_fit_follows_palette_order() {
        let palette = [Color::BLUE, Color::GREEN];
        let taken = BTreeSet::from([Color::BLUE]);
        assert_eq!(first_fit(&taken, &palette), Color::GREEN);
    }

    #[test]
    fn first_fit_skips_palette_when_overflowing() {
        let palette = [Color::GREEN, Color::RED, Color::BLUE];
        let taken = BTreeSet::from([Color::GREEN, Color::RED, Color::BLUE]);
        assert_eq!(first_fit(&taken, &palette), Color::GREY);

        let palette = [Color::GREY];
        let taken = BTreeSet::from([Color::GREY, Color::GREEN]);
        assert_eq!(first_fit(&taken, &palette), Color::RED);
    }
}
