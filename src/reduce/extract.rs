use tracing::debug;

use crate::cnf::formula::Assignment;
use crate::color::{Color, Coloring};
use crate::error::{Error, Result};
use crate::graph::NodeId;

/// Which color means true, false and neutral. Any other color is overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRoles {
    pub true_color: Color,
    pub false_color: Color,
    pub neutral_color: Color,
}

impl Default for ColorRoles {
    fn default() -> Self {
        Self {
            true_color: Color::GREEN,
            false_color: Color::RED,
            neutral_color: Color::BLUE,
        }
    }
}

impl ColorRoles {
    /// Reads the roles off the reference triangle of a finished coloring.
    pub fn from_reference(coloring: &Coloring<NodeId>) -> Result<Self> {
        let get = |node: NodeId| {
            coloring
                .get(&node)
                .copied()
                .ok_or_else(|| Error::IncompleteColoring {
                    node: node.to_string(),
                })
        };
        Ok(Self {
            true_color: get(NodeId::TRUE)?,
            false_color: get(NodeId::FALSE)?,
            neutral_color: get(NodeId::NEUTRAL)?,
        })
    }

    /// First-fit order: true, false, neutral.
    pub fn palette(&self) -> [Color; 3] {
        [self.true_color, self.false_color, self.neutral_color]
    }

    /// Seed pinning T, F and N to their colors.
    pub fn reference_seed(&self) -> Coloring<NodeId> {
        let mut seed = Coloring::with_capacity(3);
        seed.insert(NodeId::TRUE, self.true_color);
        seed.insert(NodeId::FALSE, self.false_color);
        seed.insert(NodeId::NEUTRAL, self.neutral_color);
        seed
    }

    pub fn is_overflow(&self, color: Color) -> bool {
        !self.palette().contains(&color)
    }
}

/// Turns a coloring of a clause gadget graph back into a truth assignment.
#[derive(Debug, Clone, Copy)]
pub struct ModelExtractor {
    roles: ColorRoles,
}

impl ModelExtractor {
    pub fn new(roles: ColorRoles) -> Self {
        Self { roles }
    }

    /// A coloring that reached past three colors proves nothing about the
    /// formula and is reported as unsatisfiable. Otherwise variable `i` is
    /// true iff literal node `i` wears the true color.
    pub fn extract(&self, coloring: &Coloring<NodeId>, num_vars: u32) -> Result<Assignment> {
        if let Some((node, color)) = coloring.iter().find(|(_, c)| self.roles.is_overflow(**c)) {
            debug!(%node, %color, "coloring needs a fourth color");
            return Err(Error::unsat(format!(
                "node {node} needed a fourth color ({color})"
            )));
        }

        let mut values = Vec::with_capacity(num_vars as usize);
        for var in 1..=num_vars {
            let node = NodeId::Literal {
                var,
                positive: true,
            };
            let color = coloring
                .get(&node)
                .ok_or_else(|| Error::IncompleteColoring {
                    node: node.to_string(),
                })?;
            values.push(*color == self.roles.true_color);
        }
        Ok(Assignment::from_values(values))
    }
}

pub fn extract(
    coloring: &Coloring<NodeId>,
    roles: ColorRoles,
    num_vars: u32,
) -> Result<Assignment> {
    ModelExtractor::new(roles).extract(coloring, num_vars)
}
