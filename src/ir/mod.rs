//! Normalized three-address intermediate representation.
//!
//! Programs arrive as class/method/statement descriptions (JSON artifacts
//! produced by an external bytecode front end); this module holds the data
//! model, the control-flow graph, and the loader.

pub mod cfg;
pub mod loader;
pub mod stmt;
pub mod types;

pub use cfg::Cfg;
pub use stmt::{Call, IdentitySource, LValue, Operand, RValue, Stmt};
pub use types::{FieldRef, IrType, Local, MethodRef};

use serde::{Deserialize, Serialize};

/// One concrete method: signature data plus the statement body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDef {
    pub class: String,
    pub name: String,
    #[serde(default)]
    pub params: Vec<IrType>,
    #[serde(default)]
    pub ret: IrType,
    #[serde(default)]
    pub is_static: bool,
    pub stmts: Vec<Stmt>,
}

impl MethodDef {
    pub fn is_constructor(&self) -> bool {
        self.name == "<init>"
    }

    /// Canonical display signature, e.g. `Point.flip()` or
    /// `PureMethods.add(int, int)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(|t| t.to_string()).collect();
        format!("{}.{}({})", self.class, self.name, params.join(", "))
    }

    /// Display labels for parameter nodes: the receiver gets `this`,
    /// formals get their simple type name.
    pub fn param_labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        if !self.is_static {
            labels.push("this".to_string());
        }
        labels.extend(self.params.iter().map(|t| t.simple_name()));
        labels
    }
}

/// A loaded class with its concrete methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    pub methods: Vec<MethodDef>,
}

/// A whole loaded program: the unit the driver iterates over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub classes: Vec<ClassDef>,
}

impl Program {
    /// Fold another program's classes into this one (multi-file loads).
    pub fn absorb(&mut self, other: Program) {
        self.classes.extend(other.classes);
    }

    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|c| c.methods.len()).sum()
    }
}
