use std::fmt;
use std::hash::{Hash, Hasher};

/// Kind of an abstract heap location, in merge-priority order
/// (lower kinds win when two nodes are collapsed into one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Parameter,
    Global,
    Inside,
    Load,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Parameter => "ParameterNode",
            NodeKind::Global => "GlobalNode",
            NodeKind::Inside => "InsideNode",
            NodeKind::Load => "LoadNode",
        }
    }
}

/// An abstract heap location in the points-to graph.
///
/// - `Inside` — an object allocated by the analyzed method. Mutating it is
///   always allowed.
/// - `Parameter` — the object bound to a formal parameter on entry; index 0
///   is the receiver for instance methods. A prestate node.
/// - `Load` — an unknown object read from a pre-existing heap slot. A
///   prestate node.
/// - `Global` — the singleton standing for the static-field namespace.
///
/// Two nodes are equal iff their identities (`id()`) are equal; labels are
/// display-only and never participate in equality or hashing.
#[derive(Debug, Clone)]
pub enum Node {
    Inside { index: u32, label: String },
    Parameter { index: u32, label: String },
    Load { index: u32, label: String },
    Global,
}

impl Node {
    pub fn inside(index: u32, label: impl Into<String>) -> Self {
        Node::Inside {
            index,
            label: label.into(),
        }
    }

    pub fn parameter(index: u32, label: impl Into<String>) -> Self {
        Node::Parameter {
            index,
            label: label.into(),
        }
    }

    pub fn load(index: u32, label: impl Into<String>) -> Self {
        Node::Load {
            index,
            label: label.into(),
        }
    }

    pub fn global() -> Self {
        Node::Global
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Inside { .. } => NodeKind::Inside,
            Node::Parameter { .. } => NodeKind::Parameter,
            Node::Load { .. } => NodeKind::Load,
            Node::Global => NodeKind::Global,
        }
    }

    /// Stable string identity: `I<i>`, `P<k>`, `L<j>`, or `GBL`.
    pub fn id(&self) -> String {
        match self {
            Node::Inside { index, .. } => format!("I{index}"),
            Node::Parameter { index, .. } => format!("P{index}"),
            Node::Load { index, .. } => format!("L{index}"),
            Node::Global => "GBL".to_string(),
        }
    }

    /// Human-readable description, empty for `Global`.
    pub fn label(&self) -> &str {
        match self {
            Node::Inside { label, .. }
            | Node::Parameter { label, .. }
            | Node::Load { label, .. } => label,
            Node::Global => "",
        }
    }

    pub fn param_index(&self) -> Option<u32> {
        match self {
            Node::Parameter { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn is_inside(&self) -> bool {
        matches!(self, Node::Inside { .. })
    }

    /// A node abstracts prestate memory when reading one of its fields may
    /// observe an object that existed before the call: parameters, loads
    /// from the prior heap, and the static namespace.
    pub fn is_prestate_reachable(&self) -> bool {
        matches!(
            self,
            Node::Parameter { .. } | Node::Load { .. } | Node::Global
        )
    }

    fn discriminant(&self) -> (NodeKind, u32) {
        let index = match self {
            Node::Inside { index, .. }
            | Node::Parameter { index, .. }
            | Node::Load { index, .. } => *index,
            Node::Global => 0,
        };
        (self.kind(), index)
    }
}

/// Nodes of a set in stable id order, for deterministic iteration.
pub fn sorted_by_id(nodes: &im::HashSet<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = nodes.iter().cloned().collect();
    out.sort_by_key(|n| n.id());
    out
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.discriminant() == other.discriminant()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.discriminant().hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
