//! Abstract transfer functions: one IR statement to one graph update.
//!
//! Local assignments are strong updates; heap writes are weak (edges only
//! accumulate). Fresh Inside and Load nodes are indexed per site — an
//! allocation site is its statement, a load site is a statement plus the
//! base node — so fixpoint re-visits reuse the same node and outputs stay
//! deterministic under a deterministic statement order.

use std::collections::HashMap;

use im::HashSet;
use tracing::warn;

use crate::analysis::safe_methods::SafeMethodRegistry;
use crate::config::AnalysisConfig;
use crate::graph::node::sorted_by_id;
use crate::graph::{merger, EdgeKind, Node, PointsToGraph};
use crate::ir::{Call, FieldRef, IdentitySource, LValue, Local, RValue, Stmt};

pub struct TransferFunctions<'a> {
    config: &'a AnalysisConfig,
    registry: &'a SafeMethodRegistry,
    is_static: bool,
    param_labels: Vec<String>,
    inside_sites: HashMap<usize, u32>,
    load_sites: HashMap<(usize, Node), u32>,
    next_inside: u32,
    next_load: u32,
}

impl<'a> TransferFunctions<'a> {
    pub fn new(
        config: &'a AnalysisConfig,
        registry: &'a SafeMethodRegistry,
        is_static: bool,
        param_labels: Vec<String>,
    ) -> Self {
        Self {
            config,
            registry,
            is_static,
            param_labels,
            inside_sites: HashMap::new(),
            load_sites: HashMap::new(),
            next_inside: 0,
            next_load: 0,
        }
    }

    /// Apply the transfer for `stmt` in place. Statements outside the
    /// recognized shapes leave the graph unchanged.
    pub fn apply(&mut self, stmt_id: usize, stmt: &Stmt, graph: &mut PointsToGraph) {
        match stmt {
            Stmt::Identity { local, source } => self.identity(local, source, graph),
            Stmt::Assign { lhs, rhs } => self.assign(stmt_id, lhs, rhs, graph),
            Stmt::Invoke { call } => self.invoke(stmt_id, call, None, graph),
            Stmt::Return { .. } | Stmt::If { .. } | Stmt::Goto { .. } | Stmt::Nop => {}
        }
    }

    // --- Identity statements ---

    fn identity(&mut self, local: &Local, source: &IdentitySource, graph: &mut PointsToGraph) {
        if !local.is_reference() {
            return;
        }
        let node = match source {
            IdentitySource::This => self.parameter_node(0),
            IdentitySource::Parameter { index } => {
                // for instance methods, index 0 is the receiver
                let node_index = if self.is_static { *index } else { *index + 1 };
                self.parameter_node(node_index as u32)
            }
        };
        graph.strong_update(local, HashSet::unit(node));
    }

    fn parameter_node(&self, index: u32) -> Node {
        let label = self
            .param_labels
            .get(index as usize)
            .cloned()
            .unwrap_or_else(|| format!("param {index}"));
        Node::parameter(index, label)
    }

    // --- Assignments ---

    fn assign(&mut self, stmt_id: usize, lhs: &LValue, rhs: &RValue, graph: &mut PointsToGraph) {
        match lhs {
            LValue::InstanceField { base, field } => {
                self.field_store(base, field, rhs, graph);
            }
            LValue::StaticField { field } => {
                self.static_field_store(field, rhs, graph);
            }
            LValue::ArrayElement { base } => {
                self.array_store(base, graph);
            }
            LValue::Local(v) => match rhs {
                RValue::New { class } => {
                    let node = self.inside_node(stmt_id, format!("new {class}"));
                    graph.strong_update(v, HashSet::unit(node));
                }
                RValue::NewArray { .. } => {
                    let node = self.inside_node(stmt_id, "new array");
                    graph.strong_update(v, HashSet::unit(node));
                }
                RValue::Local(u) => {
                    if v.is_reference() {
                        graph.strong_update(v, graph.points_to(u));
                    }
                }
                RValue::Cast { operand, .. } => {
                    if v.is_reference() {
                        graph.strong_update(v, graph.points_to(operand));
                    }
                }
                RValue::InstanceField { base, field } => {
                    self.field_load(stmt_id, v, base, field, graph);
                }
                RValue::StaticField { field } => {
                    self.static_field_load(stmt_id, v, field, graph);
                }
                RValue::ArrayElement { base } => {
                    self.array_load(stmt_id, v, base, graph);
                }
                RValue::Invoke(call) => {
                    self.invoke(stmt_id, call, Some(v), graph);
                }
                RValue::Constant => {
                    // a reference local overwritten by a non-reference
                    // value points at nothing afterwards
                    if v.is_reference() {
                        graph.strong_update(v, HashSet::new());
                    }
                }
            },
        }
    }

    // --- Field loads ---

    /// `v := u.f` — collect inside and outside targets; for a prestate
    /// base without an outside edge on `f` yet, mint a Load node.
    fn field_load(
        &mut self,
        stmt_id: usize,
        v: &Local,
        base: &Local,
        field: &FieldRef,
        graph: &mut PointsToGraph,
    ) {
        if !v.is_reference() {
            return;
        }

        let mut result = HashSet::new();
        for n in sorted_by_id(&graph.points_to(base)) {
            for t in graph.targets(&n, field, EdgeKind::Inside) {
                result.insert(t);
            }
            let existing_outside = graph.targets(&n, field, EdgeKind::Outside);
            let had_outside = !existing_outside.is_empty();
            for t in existing_outside {
                result.insert(t);
            }

            if n.is_prestate_reachable() && !had_outside {
                let load =
                    self.load_node(stmt_id, &n, format!("load {} from {}", field.name, n.id()));
                graph.add_outside_edge(n.clone(), field.clone(), load.clone());
                result.insert(load);
            }
        }
        graph.strong_update(v, result);

        if self.config.merge {
            merger::enforce_uniqueness(graph);
        }
    }

    /// `v := C.f` — a field load with the `Global` node as the base.
    fn static_field_load(
        &mut self,
        stmt_id: usize,
        v: &Local,
        field: &FieldRef,
        graph: &mut PointsToGraph,
    ) {
        if !v.is_reference() {
            return;
        }

        let global = Node::global();
        let mut result = HashSet::new();
        for t in graph.targets(&global, field, EdgeKind::Inside) {
            result.insert(t);
        }
        let existing_outside = graph.targets(&global, field, EdgeKind::Outside);
        let had_outside = !existing_outside.is_empty();
        for t in existing_outside {
            result.insert(t);
        }
        if !had_outside {
            let load = self.load_node(stmt_id, &global, format!("load static {}", field.name));
            graph.add_outside_edge(global, field.clone(), load.clone());
            result.insert(load);
        }
        graph.strong_update(v, result);

        if self.config.merge {
            merger::enforce_uniqueness(graph);
        }
    }

    // --- Field stores ---

    /// `u.f := x` — weak update: add inside edges, record the mutation.
    fn field_store(&mut self, base: &Local, field: &FieldRef, rhs: &RValue, graph: &mut PointsToGraph) {
        let rhs_nodes = self.store_operand_nodes(rhs, graph);
        for n in sorted_by_id(&graph.points_to(base)) {
            for t in sorted_by_id(&rhs_nodes) {
                graph.add_inside_edge(n.clone(), field.clone(), t);
            }
            graph.record_mutation(n, Some(field.clone()));
        }
    }

    /// `C.f := x` — the stored value escapes and the write itself is an
    /// immediate global side effect.
    fn static_field_store(&mut self, field: &FieldRef, rhs: &RValue, graph: &mut PointsToGraph) {
        let rhs_nodes = self.store_operand_nodes(rhs, graph);
        for t in sorted_by_id(&rhs_nodes) {
            graph.add_inside_edge(Node::global(), field.clone(), t.clone());
            graph.mark_escaped(t);
        }
        graph.record_mutation(Node::global(), Some(field.clone()));
        graph.set_global_side_effect();
    }

    /// `u[_] := x` — the simplified array model records the mutation but
    /// adds no element edges.
    fn array_store(&mut self, base: &Local, graph: &mut PointsToGraph) {
        for n in sorted_by_id(&graph.points_to(base)) {
            graph.record_mutation(n, None);
        }
    }

    /// `v := u[_]` — collect every existing target of the base; for a
    /// prestate base, the element may also be prior heap.
    fn array_load(&mut self, stmt_id: usize, v: &Local, base: &Local, graph: &mut PointsToGraph) {
        if !v.is_reference() {
            return;
        }

        let mut result = HashSet::new();
        for n in sorted_by_id(&graph.points_to(base)) {
            if n.is_prestate_reachable() {
                let load = self.load_node(stmt_id, &n, format!("array element from {}", n.id()));
                result.insert(load);
            }
            for (_, et) in graph.edges_from(&n) {
                result.insert(et.target);
            }
        }
        graph.strong_update(v, result);
    }

    // --- Calls ---

    /// Safe callees have no effect beyond a fresh result object. Unknown
    /// callees may capture and mutate anything handed to them: every
    /// reference argument and the receiver escape, and the call may write
    /// static state.
    fn invoke(
        &mut self,
        stmt_id: usize,
        call: &Call,
        result: Option<&Local>,
        graph: &mut PointsToGraph,
    ) {
        if self.registry.is_safe(&call.method) {
            if let Some(v) = result {
                if v.is_reference() {
                    let fresh =
                        self.inside_node(stmt_id, format!("return from {}", call.method.name));
                    graph.strong_update(v, HashSet::unit(fresh));
                }
            }
            return;
        }

        for arg in &call.args {
            if let Some(l) = arg.as_local() {
                if l.is_reference() {
                    for n in graph.points_to(l) {
                        graph.mark_escaped(n);
                    }
                }
            }
        }
        if let Some(receiver) = &call.receiver {
            for n in graph.points_to(receiver) {
                graph.mark_escaped(n);
            }
        }

        graph.set_global_side_effect();

        if let Some(v) = result {
            if v.is_reference() {
                graph.strong_update(v, HashSet::unit(Node::global()));
            }
        }
    }

    // --- Operand resolution ---

    /// Nodes flowing into a heap store. A constant contributes nothing; a
    /// non-operand shape means the IR was not fully normalized, which is
    /// logged and treated as an unknown (empty) value — the mutation
    /// itself is still recorded by the caller.
    fn store_operand_nodes(&self, rhs: &RValue, graph: &PointsToGraph) -> HashSet<Node> {
        match rhs {
            RValue::Local(l) => graph.points_to(l),
            RValue::Constant => HashSet::new(),
            other => {
                warn!(
                    "store value `{}` is not in three-address form; treating as opaque",
                    other
                );
                HashSet::new()
            }
        }
    }

    // --- Fresh nodes (site-stable) ---

    fn inside_node(&mut self, stmt_id: usize, label: impl Into<String>) -> Node {
        let index = match self.inside_sites.get(&stmt_id) {
            Some(&i) => i,
            None => {
                let i = self.next_inside;
                self.next_inside += 1;
                self.inside_sites.insert(stmt_id, i);
                i
            }
        };
        Node::inside(index, label)
    }

    fn load_node(&mut self, stmt_id: usize, base: &Node, label: impl Into<String>) -> Node {
        let key = (stmt_id, base.clone());
        let index = match self.load_sites.get(&key) {
            Some(&i) => i,
            None => {
                let i = self.next_load;
                self.next_load += 1;
                self.load_sites.insert(key, i);
                i
            }
        };
        Node::load(index, label)
    }
}
