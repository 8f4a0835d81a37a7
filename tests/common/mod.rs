//! Shared helpers for building small IR programs in tests.

#![allow(dead_code)]

use puritymap::analysis::{checker, FlowAnalysis, MethodSummary, SafeMethodRegistry};
use puritymap::config::AnalysisConfig;
use puritymap::ir::{
    Call, Cfg, FieldRef, IdentitySource, IrType, LValue, Local, MethodDef, MethodRef, Operand,
    RValue, Stmt,
};

pub fn obj(name: &str, class: &str) -> Local {
    Local::new(name, IrType::Object(class.into()))
}

pub fn int(name: &str) -> Local {
    Local::new(name, IrType::Int)
}

pub fn float(name: &str) -> Local {
    Local::new(name, IrType::Float)
}

pub fn boolean(name: &str) -> Local {
    Local::new(name, IrType::Boolean)
}

pub fn int_array(name: &str) -> Local {
    Local::new(name, IrType::array_of(IrType::Int))
}

pub fn field(class: &str, name: &str) -> FieldRef {
    FieldRef::new(class, name)
}

pub fn this_identity(local: Local) -> Stmt {
    Stmt::Identity {
        local,
        source: IdentitySource::This,
    }
}

pub fn param_identity(local: Local, index: usize) -> Stmt {
    Stmt::Identity {
        local,
        source: IdentitySource::Parameter { index },
    }
}

pub fn assign(lhs: LValue, rhs: RValue) -> Stmt {
    Stmt::Assign { lhs, rhs }
}

pub fn call_stmt(class: &str, method: &str, receiver: Option<Local>, args: Vec<Operand>) -> Stmt {
    Stmt::Invoke {
        call: Call {
            method: MethodRef::new(class, method),
            receiver,
            args,
        },
    }
}

pub fn ret(value: Option<Operand>) -> Stmt {
    Stmt::Return { value }
}

pub fn static_method(
    class: &str,
    name: &str,
    params: Vec<IrType>,
    ret: IrType,
    stmts: Vec<Stmt>,
) -> MethodDef {
    MethodDef {
        class: class.into(),
        name: name.into(),
        params,
        ret,
        is_static: true,
        stmts,
    }
}

pub fn instance_method(
    class: &str,
    name: &str,
    params: Vec<IrType>,
    ret: IrType,
    stmts: Vec<Stmt>,
) -> MethodDef {
    MethodDef {
        class: class.into(),
        name: name.into(),
        params,
        ret,
        is_static: false,
        stmts,
    }
}

/// Run the full pipeline (CFG, fixpoint, checker) on one method.
pub fn analyze_with(
    method: &MethodDef,
    registry: &SafeMethodRegistry,
    merge: bool,
) -> MethodSummary {
    let cfg = Cfg::build(method.stmts.clone()).expect("well-formed body");
    let config = AnalysisConfig::new(false, merge, None, false);
    let analysis = FlowAnalysis::run(&cfg, method, &config, registry);
    checker::check(
        method.signature(),
        analysis.exit_graph(),
        method.is_constructor(),
    )
}

pub fn analyze(method: &MethodDef) -> MethodSummary {
    analyze_with(method, &SafeMethodRegistry::default(), false)
}

// --- Shared scenario corpus ---
//
// Small methods mirroring the classic purity examples; used by both the
// scenario assertions and the merge-equivalence/stability suites.

pub fn pure_add() -> MethodDef {
    static_method(
        "PureMethods",
        "add",
        vec![IrType::Int, IrType::Int],
        IrType::Int,
        vec![
            param_identity(int("a"), 0),
            param_identity(int("b"), 1),
            ret(Some(Operand::Local(int("a")))),
        ],
    )
}

pub fn impure_set_x() -> MethodDef {
    static_method(
        "ImpureMethods",
        "setX",
        vec![IrType::array_of(IrType::Int), IrType::Int],
        IrType::Void,
        vec![
            param_identity(int_array("arr"), 0),
            param_identity(int("v"), 1),
            assign(
                LValue::ArrayElement {
                    base: int_array("arr"),
                },
                RValue::Local(int("v")),
            ),
            ret(None),
        ],
    )
}

pub fn impure_static_inc() -> MethodDef {
    static_method(
        "Counter",
        "inc",
        Vec::new(),
        IrType::Void,
        vec![
            assign(
                LValue::Local(int("t")),
                RValue::StaticField {
                    field: field("Counter", "c"),
                },
            ),
            assign(
                LValue::StaticField {
                    field: field("Counter", "c"),
                },
                RValue::Local(int("t")),
            ),
            ret(None),
        ],
    )
}

pub fn pure_create_array() -> MethodDef {
    static_method(
        "PureMethods",
        "createArray",
        vec![IrType::Int],
        IrType::array_of(IrType::Int),
        vec![
            param_identity(int("n"), 0),
            assign(
                LValue::Local(int_array("a")),
                RValue::NewArray { elem: IrType::Int },
            ),
            assign(
                LValue::ArrayElement {
                    base: int_array("a"),
                },
                RValue::Constant,
            ),
            ret(Some(Operand::Local(int_array("a")))),
        ],
    )
}

pub fn point_constructor() -> MethodDef {
    instance_method(
        "Point",
        "<init>",
        vec![IrType::Float, IrType::Float],
        IrType::Void,
        vec![
            this_identity(obj("r0", "Point")),
            param_identity(float("a"), 0),
            param_identity(float("b"), 1),
            assign(
                LValue::InstanceField {
                    base: obj("r0", "Point"),
                    field: field("Point", "x"),
                },
                RValue::Local(float("a")),
            ),
            assign(
                LValue::InstanceField {
                    base: obj("r0", "Point"),
                    field: field("Point", "y"),
                },
                RValue::Local(float("b")),
            ),
            ret(None),
        ],
    )
}

pub fn point_flip() -> MethodDef {
    instance_method(
        "Point",
        "flip",
        Vec::new(),
        IrType::Void,
        vec![
            this_identity(obj("r0", "Point")),
            assign(
                LValue::Local(float("t")),
                RValue::InstanceField {
                    base: obj("r0", "Point"),
                    field: field("Point", "y"),
                },
            ),
            assign(
                LValue::InstanceField {
                    base: obj("r0", "Point"),
                    field: field("Point", "x"),
                },
                RValue::Local(float("t")),
            ),
            ret(None),
        ],
    )
}

pub fn wallet_add_funds() -> MethodDef {
    instance_method(
        "Wallet",
        "addFunds",
        vec![IrType::Int],
        IrType::Void,
        vec![
            this_identity(obj("r0", "Wallet")),
            param_identity(int("n"), 0),
            assign(
                LValue::Local(obj("acc", "BankAccount")),
                RValue::InstanceField {
                    base: obj("r0", "Wallet"),
                    field: field("Wallet", "account"),
                },
            ),
            assign(
                LValue::Local(int("b")),
                RValue::InstanceField {
                    base: obj("acc", "BankAccount"),
                    field: field("BankAccount", "balance"),
                },
            ),
            assign(
                LValue::InstanceField {
                    base: obj("acc", "BankAccount"),
                    field: field("BankAccount", "balance"),
                },
                RValue::Local(int("b")),
            ),
            ret(None),
        ],
    )
}

// --- The linked-list example (list of points, iterated by an unknown
// iterator). Exercises conservative unknown-call handling across a
// realistic object graph.

pub fn cell_constructor() -> MethodDef {
    // Cell(Object d, Cell n) { data = d; next = n; }
    let r0 = obj("r0", "Cell");
    instance_method(
        "Cell",
        "<init>",
        vec![
            IrType::Object("java.lang.Object".into()),
            IrType::Object("Cell".into()),
        ],
        IrType::Void,
        vec![
            this_identity(r0.clone()),
            param_identity(obj("d", "java.lang.Object"), 0),
            param_identity(obj("n", "Cell"), 1),
            call_stmt("java.lang.Object", "<init>", Some(r0.clone()), Vec::new()),
            assign(
                LValue::InstanceField {
                    base: r0.clone(),
                    field: field("Cell", "data"),
                },
                RValue::Local(obj("d", "java.lang.Object")),
            ),
            assign(
                LValue::InstanceField {
                    base: r0,
                    field: field("Cell", "next"),
                },
                RValue::Local(obj("n", "Cell")),
            ),
            ret(None),
        ],
    )
}

pub fn list_constructor() -> MethodDef {
    // List() { head = null; }
    let r0 = obj("r0", "List");
    instance_method(
        "List",
        "<init>",
        Vec::new(),
        IrType::Void,
        vec![
            this_identity(r0.clone()),
            call_stmt("java.lang.Object", "<init>", Some(r0.clone()), Vec::new()),
            assign(
                LValue::InstanceField {
                    base: r0,
                    field: field("List", "head"),
                },
                RValue::Constant,
            ),
            ret(None),
        ],
    )
}

pub fn list_itr_constructor() -> MethodDef {
    // ListItr(Cell head) { cell = head; }
    let r0 = obj("r0", "ListItr");
    instance_method(
        "ListItr",
        "<init>",
        vec![IrType::Object("Cell".into())],
        IrType::Void,
        vec![
            this_identity(r0.clone()),
            param_identity(obj("h", "Cell"), 0),
            call_stmt("java.lang.Object", "<init>", Some(r0.clone()), Vec::new()),
            assign(
                LValue::InstanceField {
                    base: r0,
                    field: field("ListItr", "cell"),
                },
                RValue::Local(obj("h", "Cell")),
            ),
            ret(None),
        ],
    )
}

pub fn list_itr_has_next() -> MethodDef {
    // boolean hasNext() { return cell != null; }
    let r0 = obj("r0", "ListItr");
    instance_method(
        "ListItr",
        "hasNext",
        Vec::new(),
        IrType::Boolean,
        vec![
            this_identity(r0.clone()),
            assign(
                LValue::Local(obj("c", "Cell")),
                RValue::InstanceField {
                    base: r0,
                    field: field("ListItr", "cell"),
                },
            ),
            ret(Some(Operand::Constant)),
        ],
    )
}

pub fn list_itr_next() -> MethodDef {
    // Object next() { Object result = cell.data; cell = cell.next; return result; }
    let r0 = obj("r0", "ListItr");
    let c = obj("c", "Cell");
    instance_method(
        "ListItr",
        "next",
        Vec::new(),
        IrType::Object("java.lang.Object".into()),
        vec![
            this_identity(r0.clone()),
            assign(
                LValue::Local(c.clone()),
                RValue::InstanceField {
                    base: r0.clone(),
                    field: field("ListItr", "cell"),
                },
            ),
            assign(
                LValue::Local(obj("result", "java.lang.Object")),
                RValue::InstanceField {
                    base: c.clone(),
                    field: field("Cell", "data"),
                },
            ),
            assign(
                LValue::Local(obj("t", "Cell")),
                RValue::InstanceField {
                    base: c,
                    field: field("Cell", "next"),
                },
            ),
            assign(
                LValue::InstanceField {
                    base: r0,
                    field: field("ListItr", "cell"),
                },
                RValue::Local(obj("t", "Cell")),
            ),
            ret(Some(Operand::Local(obj("result", "java.lang.Object")))),
        ],
    )
}

pub fn list_add() -> MethodDef {
    // void add(Object e) { head = new Cell(e, head); }
    // the Cell constructor is not whitelisted, so the call is unknown
    let r0 = obj("r0", "List");
    let c = obj("c", "Cell");
    instance_method(
        "List",
        "add",
        vec![IrType::Object("java.lang.Object".into())],
        IrType::Void,
        vec![
            this_identity(r0.clone()),
            param_identity(obj("e", "java.lang.Object"), 0),
            assign(
                LValue::Local(obj("h", "Cell")),
                RValue::InstanceField {
                    base: r0.clone(),
                    field: field("List", "head"),
                },
            ),
            assign(
                LValue::Local(c.clone()),
                RValue::New {
                    class: "Cell".into(),
                },
            ),
            call_stmt(
                "Cell",
                "<init>",
                Some(c.clone()),
                vec![
                    Operand::Local(obj("e", "java.lang.Object")),
                    Operand::Local(obj("h", "Cell")),
                ],
            ),
            assign(
                LValue::InstanceField {
                    base: r0,
                    field: field("List", "head"),
                },
                RValue::Local(c),
            ),
            ret(None),
        ],
    )
}

pub fn list_iterator() -> MethodDef {
    // PaperIterator iterator() { return new ListItr(head); }
    let r0 = obj("r0", "List");
    let it = obj("it", "ListItr");
    instance_method(
        "List",
        "iterator",
        Vec::new(),
        IrType::Object("PaperIterator".into()),
        vec![
            this_identity(r0.clone()),
            assign(
                LValue::Local(obj("h", "Cell")),
                RValue::InstanceField {
                    base: r0,
                    field: field("List", "head"),
                },
            ),
            assign(
                LValue::Local(it.clone()),
                RValue::New {
                    class: "ListItr".into(),
                },
            ),
            call_stmt(
                "ListItr",
                "<init>",
                Some(it.clone()),
                vec![Operand::Local(obj("h", "Cell"))],
            ),
            ret(Some(Operand::Local(it))),
        ],
    )
}

pub fn paper_sum_x() -> MethodDef {
    // static float sumX(List list) { ... iterate, sum p.x ... }
    let list = obj("list", "List");
    let it = obj("it", "PaperIterator");
    let o = obj("o", "java.lang.Object");
    let p = obj("p", "Point");
    static_method(
        "PaperMain",
        "sumX",
        vec![IrType::Object("List".into())],
        IrType::Float,
        vec![
            param_identity(list.clone(), 0),
            assign(
                LValue::Local(it.clone()),
                RValue::Invoke(Call {
                    method: MethodRef::new("List", "iterator"),
                    receiver: Some(list),
                    args: Vec::new(),
                }),
            ),
            assign(
                LValue::Local(boolean("b")),
                RValue::Invoke(Call {
                    method: MethodRef::new("PaperIterator", "hasNext"),
                    receiver: Some(it.clone()),
                    args: Vec::new(),
                }),
            ),
            Stmt::If { target: 8 },
            assign(
                LValue::Local(o.clone()),
                RValue::Invoke(Call {
                    method: MethodRef::new("PaperIterator", "next"),
                    receiver: Some(it),
                    args: Vec::new(),
                }),
            ),
            assign(
                LValue::Local(p.clone()),
                RValue::Cast {
                    ty: IrType::Object("Point".into()),
                    operand: o,
                },
            ),
            assign(
                LValue::Local(float("f")),
                RValue::InstanceField {
                    base: p,
                    field: field("Point", "x"),
                },
            ),
            Stmt::Goto { target: 2 },
            ret(Some(Operand::Constant)),
        ],
    )
}

pub fn paper_flip_all() -> MethodDef {
    // static void flipAll(List list) { ... iterate, p.flip() ... }
    let list = obj("list", "List");
    let it = obj("it", "PaperIterator");
    let o = obj("o", "java.lang.Object");
    let p = obj("p", "Point");
    static_method(
        "PaperMain",
        "flipAll",
        vec![IrType::Object("List".into())],
        IrType::Void,
        vec![
            param_identity(list.clone(), 0),
            assign(
                LValue::Local(it.clone()),
                RValue::Invoke(Call {
                    method: MethodRef::new("List", "iterator"),
                    receiver: Some(list),
                    args: Vec::new(),
                }),
            ),
            assign(
                LValue::Local(boolean("b")),
                RValue::Invoke(Call {
                    method: MethodRef::new("PaperIterator", "hasNext"),
                    receiver: Some(it.clone()),
                    args: Vec::new(),
                }),
            ),
            Stmt::If { target: 8 },
            assign(
                LValue::Local(o.clone()),
                RValue::Invoke(Call {
                    method: MethodRef::new("PaperIterator", "next"),
                    receiver: Some(it),
                    args: Vec::new(),
                }),
            ),
            assign(
                LValue::Local(p.clone()),
                RValue::Cast {
                    ty: IrType::Object("Point".into()),
                    operand: o,
                },
            ),
            call_stmt("Point", "flip", Some(p), Vec::new()),
            Stmt::Goto { target: 2 },
            ret(None),
        ],
    )
}

pub fn list_create() -> MethodDef {
    let l = obj("l", "java.util.ArrayList");
    static_method(
        "Factory",
        "create",
        Vec::new(),
        IrType::Object("java.util.ArrayList".into()),
        vec![
            assign(
                LValue::Local(l.clone()),
                RValue::New {
                    class: "java.util.ArrayList".into(),
                },
            ),
            call_stmt("java.util.ArrayList", "<init>", Some(l.clone()), Vec::new()),
            call_stmt(
                "java.util.ArrayList",
                "add",
                Some(l.clone()),
                vec![Operand::Constant],
            ),
            ret(Some(Operand::Local(l))),
        ],
    )
}

pub fn static_escape() -> MethodDef {
    static_method(
        "StaticFieldEscape",
        "createAndEscape",
        Vec::new(),
        IrType::Void,
        vec![
            assign(
                LValue::Local(obj("x", "Widget")),
                RValue::New {
                    class: "Widget".into(),
                },
            ),
            assign(
                LValue::StaticField {
                    field: field("StaticFieldEscape", "shared"),
                },
                RValue::Local(obj("x", "Widget")),
            ),
            ret(None),
        ],
    )
}

pub fn static_get_shared() -> MethodDef {
    static_method(
        "StaticFieldEscape",
        "getShared",
        Vec::new(),
        IrType::Object("Widget".into()),
        vec![
            assign(
                LValue::Local(obj("v", "Widget")),
                RValue::StaticField {
                    field: field("StaticFieldEscape", "shared"),
                },
            ),
            ret(Some(Operand::Local(obj("v", "Widget")))),
        ],
    )
}

pub fn pure_branchy_load() -> MethodDef {
    // loads p.f on both branch arms; the join sees two load nodes, which
    // node merging collapses into one
    let p = obj("p", "Holder");
    let v = obj("v", "Item");
    static_method(
        "Branchy",
        "pick",
        vec![IrType::Object("Holder".into())],
        IrType::Object("Item".into()),
        vec![
            param_identity(p.clone(), 0),
            Stmt::If { target: 4 },
            assign(
                LValue::Local(v.clone()),
                RValue::InstanceField {
                    base: p.clone(),
                    field: field("Holder", "f"),
                },
            ),
            Stmt::Goto { target: 5 },
            assign(
                LValue::Local(v.clone()),
                RValue::InstanceField {
                    base: p,
                    field: field("Holder", "f"),
                },
            ),
            ret(Some(Operand::Local(v))),
        ],
    )
}

/// The whole corpus with the registry each method should be analyzed
/// under.
pub fn corpus() -> Vec<(MethodDef, SafeMethodRegistry)> {
    let default = SafeMethodRegistry::default();
    let mut with_add = SafeMethodRegistry::default();
    with_add.allow_method("java.util.ArrayList", "add");

    vec![
        (pure_add(), default.clone()),
        (impure_set_x(), default.clone()),
        (impure_static_inc(), default.clone()),
        (pure_create_array(), default.clone()),
        (point_constructor(), default.clone()),
        (point_flip(), default.clone()),
        (wallet_add_funds(), default.clone()),
        (cell_constructor(), default.clone()),
        (list_constructor(), default.clone()),
        (list_itr_constructor(), default.clone()),
        (list_itr_has_next(), default.clone()),
        (list_itr_next(), default.clone()),
        (list_add(), default.clone()),
        (list_iterator(), default.clone()),
        (paper_sum_x(), default.clone()),
        (paper_flip_all(), default.clone()),
        (list_create(), with_add),
        (list_create(), default.clone()),
        (static_escape(), default.clone()),
        (static_get_shared(), default.clone()),
        (pure_branchy_load(), default),
    ]
}
