use std::fmt::Display;
use std::hash::Hash;

use crate::color::Coloring;

use super::Graph;

/// Graphviz text for an external renderer. Uncolored nodes get no fill;
/// node placement is left to the layout engine.
pub fn to_dot<N>(graph: &Graph<N>, coloring: Option<&Coloring<N>>) -> String
where
    N: Clone + Hash + Eq + Display,
{
    let mut out = String::from("graph G {\n");
    for node in graph.nodes() {
        let label = esc_dot(&node.to_string());
        match coloring.and_then(|c| c.get(node)) {
            Some(color) => out.push_str(&format!(
                "  \"{label}\" [style=filled, fillcolor=\"{}\"];\n",
                dot_color(&color.to_string())
            )),
            None => out.push_str(&format!("  \"{label}\";\n")),
        }
    }
    for (u, v) in graph.edges() {
        out.push_str(&format!(
            "  \"{}\" -- \"{}\";\n",
            esc_dot(&u.to_string()),
            esc_dot(&v.to_string())
        ));
    }
    out.push_str("}\n");
    out
}

// overflow colors past grey have no graphviz name
fn dot_color(name: &str) -> &str {
    match name {
        "green" | "red" | "blue" | "grey" => name,
        _ => "black",
    }
}

fn esc_dot(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
