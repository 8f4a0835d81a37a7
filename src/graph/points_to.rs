use im::{HashMap, HashSet};

use crate::graph::node::Node;
use crate::ir::{FieldRef, Local};

/// Tag distinguishing the two heap-edge families.
///
/// Inside edges record writes performed by the analyzed method; outside
/// edges record reads from the pre-existing heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Inside,
    Outside,
}

/// A target of a heap edge together with its edge kind. Inside and outside
/// edges share one store keyed by `(source, field)`, tagged per entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeTarget {
    pub target: Node,
    pub kind: EdgeKind,
}

/// A `(node, field)` pair written by the method. `field == None` stands
/// for an array-element write (no per-index precision).
pub type MutatedField = (Node, Option<FieldRef>);

/// The points-to graph `G = ⟨L, I, O, W, E, s⟩`:
///
/// - `L` — locals to the sets of nodes they may point to ([`Self::points_to`])
/// - `I`/`O` — inside and outside heap edges (shared store, tagged)
/// - `W` — mutated `(node, field)` pairs ([`Self::mutated_fields`])
/// - `E` — nodes whose address escaped to static storage ([`Self::escaped`])
/// - `s` — sticky flag set by any static-field write
///
/// Backed by `im` persistent collections, so cloning one graph per program
/// point is cheap and equality is structural over all six components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointsToGraph {
    var_points_to: HashMap<Local, HashSet<Node>>,
    edges: HashMap<Node, HashMap<FieldRef, HashSet<EdgeTarget>>>,
    mutated: HashSet<MutatedField>,
    escaped: HashSet<Node>,
    global_side_effect: bool,
}

impl PointsToGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Variable operations ---

    /// Nodes a local may point to; empty when the local is unbound.
    pub fn points_to(&self, v: &Local) -> HashSet<Node> {
        self.var_points_to.get(v).cloned().unwrap_or_default()
    }

    /// Strong update: `v` now points to exactly `targets`.
    pub fn strong_update(&mut self, v: &Local, targets: HashSet<Node>) {
        self.var_points_to.insert(v.clone(), targets);
    }

    pub fn var_map(&self) -> &HashMap<Local, HashSet<Node>> {
        &self.var_points_to
    }

    // --- Edge operations ---

    pub fn add_inside_edge(&mut self, source: Node, field: FieldRef, target: Node) {
        self.add_edge(source, field, target, EdgeKind::Inside);
    }

    pub fn add_outside_edge(&mut self, source: Node, field: FieldRef, target: Node) {
        self.add_edge(source, field, target, EdgeKind::Outside);
    }

    fn add_edge(&mut self, source: Node, field: FieldRef, target: Node, kind: EdgeKind) {
        self.edges
            .entry(source)
            .or_insert_with(HashMap::new)
            .entry(field)
            .or_insert_with(HashSet::new)
            .insert(EdgeTarget { target, kind });
    }

    /// Targets of `source --field-->` edges of the given kind.
    pub fn targets(&self, source: &Node, field: &FieldRef, kind: EdgeKind) -> HashSet<Node> {
        self.edge_targets(source, field)
            .into_iter()
            .filter(|et| et.kind == kind)
            .map(|et| et.target)
            .collect()
    }

    /// Targets of `source --field-->` edges of either kind.
    pub fn all_targets(&self, source: &Node, field: &FieldRef) -> HashSet<Node> {
        self.edge_targets(source, field)
            .into_iter()
            .map(|et| et.target)
            .collect()
    }

    fn edge_targets(&self, source: &Node, field: &FieldRef) -> Vec<EdgeTarget> {
        self.edges
            .get(source)
            .and_then(|fields| fields.get(field))
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All `(field, target, kind)` edges leaving `source`, across fields.
    pub fn edges_from(&self, source: &Node) -> Vec<(FieldRef, EdgeTarget)> {
        let Some(fields) = self.edges.get(source) else {
            return Vec::new();
        };
        fields
            .iter()
            .flat_map(|(f, set)| set.iter().map(move |et| (f.clone(), et.clone())))
            .collect()
    }

    /// Flat `(source, field, target)` triples of the given kind, for
    /// rendering and invariant checks.
    pub fn edge_triples(&self, kind: EdgeKind) -> Vec<(Node, FieldRef, Node)> {
        self.edges
            .iter()
            .flat_map(|(src, fields)| {
                fields.iter().flat_map(move |(f, set)| {
                    set.iter()
                        .filter(move |et| et.kind == kind)
                        .map(move |et| (src.clone(), f.clone(), et.target.clone()))
                })
            })
            .collect()
    }

    // --- Mutation tracking ---

    /// Record a write to `node.field`; `None` is an array-element write.
    pub fn record_mutation(&mut self, node: Node, field: Option<FieldRef>) {
        self.mutated.insert((node, field));
    }

    pub fn mutated_fields(&self) -> &HashSet<MutatedField> {
        &self.mutated
    }

    // --- Global escape ---

    pub fn mark_escaped(&mut self, node: Node) {
        self.escaped.insert(node);
    }

    pub fn escaped(&self) -> &HashSet<Node> {
        &self.escaped
    }

    // --- Global side effect ---

    /// Sticky: once set, joins and copies keep it set.
    pub fn set_global_side_effect(&mut self) {
        self.global_side_effect = true;
    }

    pub fn has_global_side_effect(&self) -> bool {
        self.global_side_effect
    }

    // --- Support set ---

    /// Every node appearing anywhere in the graph: in `L`, as an edge
    /// source or target, in `W`, or in `E`.
    pub fn all_nodes(&self) -> HashSet<Node> {
        let mut nodes = HashSet::new();
        for targets in self.var_points_to.values() {
            for n in targets {
                nodes.insert(n.clone());
            }
        }
        for (source, fields) in self.edges.iter() {
            nodes.insert(source.clone());
            for set in fields.values() {
                for et in set {
                    nodes.insert(et.target.clone());
                }
            }
        }
        for (node, _) in self.mutated.iter() {
            nodes.insert(node.clone());
        }
        for n in self.escaped.iter() {
            nodes.insert(n.clone());
        }
        nodes
    }

    // --- Join ---

    /// Least upper bound: pointwise union of `L`, `I`, `O`, `W`, `E`,
    /// OR of the sticky flag. Commutative, associative, idempotent.
    pub fn merge_with(&mut self, other: &PointsToGraph) {
        for (v, nodes) in other.var_points_to.iter() {
            let entry = self
                .var_points_to
                .entry(v.clone())
                .or_insert_with(HashSet::new);
            for n in nodes {
                entry.insert(n.clone());
            }
        }
        for (source, fields) in other.edges.iter() {
            let dest = self
                .edges
                .entry(source.clone())
                .or_insert_with(HashMap::new);
            for (field, set) in fields.iter() {
                let bucket = dest.entry(field.clone()).or_insert_with(HashSet::new);
                for et in set {
                    bucket.insert(et.clone());
                }
            }
        }
        for mf in other.mutated.iter() {
            self.mutated.insert(mf.clone());
        }
        for n in other.escaped.iter() {
            self.escaped.insert(n.clone());
        }
        self.global_side_effect |= other.global_side_effect;
    }

    // --- Node replacement (node merging only) ---

    /// Substitute `new` for `old` everywhere: `L`, edge sources, edge
    /// targets, `W`, and `E`.
    pub fn replace_node(&mut self, old: &Node, new: &Node) {
        let vars: Vec<Local> = self
            .var_points_to
            .iter()
            .filter(|(_, targets)| targets.contains(old))
            .map(|(v, _)| v.clone())
            .collect();
        for v in vars {
            if let Some(targets) = self.var_points_to.get_mut(&v) {
                targets.remove(old);
                targets.insert(new.clone());
            }
        }

        if let Some(old_edges) = self.edges.remove(old) {
            let dest = self.edges.entry(new.clone()).or_insert_with(HashMap::new);
            for (field, set) in old_edges.iter() {
                let bucket = dest.entry(field.clone()).or_insert_with(HashSet::new);
                for et in set {
                    bucket.insert(et.clone());
                }
            }
        }

        let sources: Vec<Node> = self.edges.keys().cloned().collect();
        for source in sources {
            let Some(fields) = self.edges.get_mut(&source) else {
                continue;
            };
            let field_names: Vec<FieldRef> = fields.keys().cloned().collect();
            for field in field_names {
                let Some(set) = fields.get_mut(&field) else {
                    continue;
                };
                let stale: Vec<EdgeTarget> = set
                    .iter()
                    .filter(|et| et.target == *old)
                    .cloned()
                    .collect();
                for et in stale {
                    set.remove(&et);
                    set.insert(EdgeTarget {
                        target: new.clone(),
                        kind: et.kind,
                    });
                }
            }
        }

        let stale_mutations: Vec<MutatedField> = self
            .mutated
            .iter()
            .filter(|(node, _)| node == old)
            .cloned()
            .collect();
        for (node, field) in stale_mutations {
            self.mutated.remove(&(node, field.clone()));
            self.mutated.insert((new.clone(), field));
        }

        if self.escaped.remove(old).is_some() {
            self.escaped.insert(new.clone());
        }
    }

    // --- Invariant validation ---

    /// Check the two structural invariants of the graph:
    /// an inside node never sources an outside edge, and an outside edge
    /// never leads to an inside node. Returns human-readable violations.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        let mut triples = self.edge_triples(EdgeKind::Outside);
        triples.sort_by(|a, b| {
            (a.0.id(), &a.1, a.2.id()).cmp(&(b.0.id(), &b.1, b.2.id()))
        });
        for (source, field, target) in triples {
            if source.is_inside() {
                violations.push(format!(
                    "inside node {} has outside edge --{}--> {}",
                    source.id(),
                    field,
                    target.id()
                ));
            }
            if target.is_inside() {
                violations.push(format!(
                    "outside edge {} --{}--> leads to inside node {}",
                    source.id(),
                    field,
                    target.id()
                ));
            }
        }
        violations
    }
}
