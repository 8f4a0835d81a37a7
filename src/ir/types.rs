use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a local, parameter, field, or return value in the IR.
///
/// The engine only ever asks one question of a type — reference or not —
/// but the loader keeps the full shape so signatures render faithfully.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrType {
    Void,
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Object(String),
    Array(Box<IrType>),
}

impl IrType {
    /// Objects and arrays live on the heap; everything else is a value.
    pub fn is_reference(&self) -> bool {
        matches!(self, IrType::Object(_) | IrType::Array(_))
    }

    pub fn array_of(elem: IrType) -> Self {
        IrType::Array(Box::new(elem))
    }

    /// Unqualified display name, e.g. `Point` for `com.example.Point`
    /// and `int[]` for an int array.
    pub fn simple_name(&self) -> String {
        match self {
            IrType::Object(class) => class
                .rsplit('.')
                .next()
                .unwrap_or(class.as_str())
                .to_string(),
            IrType::Array(elem) => format!("{}[]", elem.simple_name()),
            other => other.to_string(),
        }
    }
}

impl Default for IrType {
    fn default() -> Self {
        IrType::Void
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Void => write!(f, "void"),
            IrType::Boolean => write!(f, "boolean"),
            IrType::Byte => write!(f, "byte"),
            IrType::Char => write!(f, "char"),
            IrType::Short => write!(f, "short"),
            IrType::Int => write!(f, "int"),
            IrType::Long => write!(f, "long"),
            IrType::Float => write!(f, "float"),
            IrType::Double => write!(f, "double"),
            IrType::Object(class) => write!(f, "{class}"),
            IrType::Array(elem) => write!(f, "{elem}[]"),
        }
    }
}

/// A typed local variable of the analyzed method body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Local {
    pub name: String,
    pub ty: IrType,
}

impl Local {
    pub fn new(name: impl Into<String>, ty: IrType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn is_reference(&self) -> bool {
        self.ty.is_reference()
    }
}

impl fmt::Display for Local {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A declared instance or static field. Static fields carry the declaring
/// class so distinct `C.f` slots stay distinct under the `Global` source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    pub class: String,
    pub name: String,
}

impl FieldRef {
    pub fn new(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Callee identity as the safe-method registry sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    pub class: String,
    pub name: String,
}

impl MethodRef {
    pub fn new(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
        }
    }

    /// Exact-lookup key, `<class>#<method>`.
    pub fn key(&self) -> String {
        format!("{}#{}", self.class, self.name)
    }

    pub fn is_constructor(&self) -> bool {
        self.name == "<init>"
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class, self.name)
    }
}
