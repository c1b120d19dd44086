use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Reference {
    True,
    False,
    Neutral,
}

/// Position of an auxiliary node inside one clause gadget `(x1 ∨ x2) ∨ x3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GadgetRole {
    /// Intermediate attached to `x1`.
    InX1,
    /// Intermediate attached to `x2`.
    InX2,
    /// Output of the first binary OR.
    Or12,
    /// Intermediate carrying `x1 ∨ x2` into the second OR.
    InOr12,
    /// Intermediate attached to `x3`.
    InX3,
    /// Output of the whole clause; pinned next to F and N.
    Or123,
}

impl GadgetRole {
    pub const ALL: [GadgetRole; 6] = [
        GadgetRole::InX1,
        GadgetRole::InX2,
        GadgetRole::Or12,
        GadgetRole::InOr12,
        GadgetRole::InX3,
        GadgetRole::Or123,
    ];

    fn tag(self) -> &'static str {
        match self {
            GadgetRole::InX1 => "i1",
            GadgetRole::InX2 => "i2",
            GadgetRole::Or12 => "or12",
            GadgetRole::InOr12 => "i12",
            GadgetRole::InX3 => "i3",
            GadgetRole::Or123 => "or123",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Reference(Reference),
    Literal { var: u32, positive: bool },
    Gadget { clause: usize, role: GadgetRole },
}

impl NodeId {
    pub const TRUE: NodeId = NodeId::Reference(Reference::True);
    pub const FALSE: NodeId = NodeId::Reference(Reference::False);
    pub const NEUTRAL: NodeId = NodeId::Reference(Reference::Neutral);

    /// Node for a signed DIMACS literal, `-3` being the negation of variable 3.
    pub fn literal(lit: i32) -> Self {
        NodeId::Literal {
            var: lit.unsigned_abs(),
            positive: lit > 0,
        }
    }

    pub fn gadget(clause: usize, role: GadgetRole) -> Self {
        NodeId::Gadget { clause, role }
    }

    pub fn negated(self) -> Option<Self> {
        match self {
            NodeId::Literal { var, positive } => Some(NodeId::Literal {
                var,
                positive: !positive,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Reference(Reference::True) => write!(f, "T"),
            NodeId::Reference(Reference::False) => write!(f, "F"),
            NodeId::Reference(Reference::Neutral) => write!(f, "N"),
            NodeId::Literal { var, positive: true } => write!(f, "{var}"),
            NodeId::Literal {
                var,
                positive: false,
            } => write!(f, "-{var}"),
            NodeId::Gadget { clause, role } => write!(f, "{}_{}", role.tag(), clause),
        }
    }
}
