use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ir::types::{FieldRef, IrType, Local, MethodRef};

/// A value position in a three-address statement: a local or an opaque
/// non-reference constant (the analysis never needs constant values).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    Local(Local),
    Constant,
}

impl Operand {
    pub fn as_local(&self) -> Option<&Local> {
        match self {
            Operand::Local(l) => Some(l),
            Operand::Constant => None,
        }
    }
}

/// The source of an identity statement at method entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    This,
    Parameter { index: usize },
}

/// A method invocation, with the receiver split out for virtual and
/// interface dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub method: MethodRef,
    pub receiver: Option<Local>,
    pub args: Vec<Operand>,
}

/// Assignment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LValue {
    Local(Local),
    InstanceField { base: Local, field: FieldRef },
    StaticField { field: FieldRef },
    ArrayElement { base: Local },
}

/// Assignment source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RValue {
    Local(Local),
    Constant,
    New { class: String },
    NewArray { elem: IrType },
    Cast { ty: IrType, operand: Local },
    InstanceField { base: Local, field: FieldRef },
    StaticField { field: FieldRef },
    ArrayElement { base: Local },
    Invoke(Call),
}

/// One statement of the normalized three-address IR.
///
/// Branch targets are statement indices into the enclosing body; control
/// otherwise falls through to the next statement. `Return` ends a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    Identity { local: Local, source: IdentitySource },
    Assign { lhs: LValue, rhs: RValue },
    Invoke { call: Call },
    Return { value: Option<Operand> },
    If { target: usize },
    Goto { target: usize },
    Nop,
}

impl Stmt {
    /// Successor statement indices given this statement's own index and
    /// the body length.
    pub fn successors(&self, index: usize, len: usize) -> Vec<usize> {
        let fall_through = |v: &mut Vec<usize>| {
            if index + 1 < len {
                v.push(index + 1);
            }
        };
        let mut succs = Vec::new();
        match self {
            Stmt::Return { .. } => {}
            Stmt::Goto { target } => succs.push(*target),
            Stmt::If { target } => {
                fall_through(&mut succs);
                succs.push(*target);
            }
            _ => fall_through(&mut succs),
        }
        succs
    }

    /// Explicit branch target, if any (for target validation).
    pub fn branch_target(&self) -> Option<usize> {
        match self {
            Stmt::If { target } | Stmt::Goto { target } => Some(*target),
            _ => None,
        }
    }

    /// Statements worth a snapshot in a debug trace: entry identities,
    /// allocations, heap and static accesses, and calls.
    pub fn is_key_milestone(&self) -> bool {
        match self {
            Stmt::Identity { .. } | Stmt::Invoke { .. } => true,
            Stmt::Assign { lhs, rhs } => {
                matches!(
                    lhs,
                    LValue::InstanceField { .. }
                        | LValue::StaticField { .. }
                        | LValue::ArrayElement { .. }
                ) || matches!(
                    rhs,
                    RValue::New { .. }
                        | RValue::NewArray { .. }
                        | RValue::InstanceField { .. }
                        | RValue::StaticField { .. }
                        | RValue::ArrayElement { .. }
                        | RValue::Invoke(_)
                )
            }
            _ => false,
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(recv) = &self.receiver {
            write!(f, "{}.", recv.name)?;
        } else {
            write!(f, "{}.", self.method.class)?;
        }
        write!(f, "{}(", self.method.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match arg {
                Operand::Local(l) => write!(f, "{}", l.name)?,
                Operand::Constant => write!(f, "<const>")?,
            }
        }
        write!(f, ")")
    }
}

impl fmt::Display for LValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LValue::Local(l) => write!(f, "{}", l.name),
            LValue::InstanceField { base, field } => write!(f, "{}.{}", base.name, field.name),
            LValue::StaticField { field } => write!(f, "{}.{}", field.class, field.name),
            LValue::ArrayElement { base } => write!(f, "{}[_]", base.name),
        }
    }
}

impl fmt::Display for RValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RValue::Local(l) => write!(f, "{}", l.name),
            RValue::Constant => write!(f, "<const>"),
            RValue::New { class } => write!(f, "new {class}"),
            RValue::NewArray { elem } => write!(f, "new {elem}[]"),
            RValue::Cast { ty, operand } => write!(f, "({ty}) {}", operand.name),
            RValue::InstanceField { base, field } => write!(f, "{}.{}", base.name, field.name),
            RValue::StaticField { field } => write!(f, "{}.{}", field.class, field.name),
            RValue::ArrayElement { base } => write!(f, "{}[_]", base.name),
            RValue::Invoke(call) => write!(f, "{call}"),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Identity { local, source } => match source {
                IdentitySource::This => write!(f, "{} := @this", local.name),
                IdentitySource::Parameter { index } => {
                    write!(f, "{} := @parameter{index}", local.name)
                }
            },
            Stmt::Assign { lhs, rhs } => write!(f, "{lhs} = {rhs}"),
            Stmt::Invoke { call } => write!(f, "{call}"),
            Stmt::Return { value: Some(op) } => match op {
                Operand::Local(l) => write!(f, "return {}", l.name),
                Operand::Constant => write!(f, "return <const>"),
            },
            Stmt::Return { value: None } => write!(f, "return"),
            Stmt::If { target } => write!(f, "if ... goto {target}"),
            Stmt::Goto { target } => write!(f, "goto {target}"),
            Stmt::Nop => write!(f, "nop"),
        }
    }
}
