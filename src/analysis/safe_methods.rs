//! Whitelist of callees known to have no side effects on prestate objects.
//!
//! Intra-procedural analysis cannot look inside callees, so any call not
//! covered here is treated conservatively as arbitrary mutation. The
//! default seed covers the JDK surface that trips up almost every input
//! program otherwise, constructors of common value and collection classes
//! in particular.

use std::collections::HashSet;

use crate::ir::MethodRef;

/// Immutable-after-construction registry of known-pure callees.
///
/// Lookup rule: constructors consult only the constructor whitelist;
/// other methods match a class prefix first, then the exact
/// `class#method` key.
#[derive(Debug, Clone)]
pub struct SafeMethodRegistry {
    constructor_classes: HashSet<String>,
    class_prefixes: HashSet<String>,
    method_signatures: HashSet<String>,
}

impl SafeMethodRegistry {
    /// An empty registry: every callee is unknown.
    pub fn empty() -> Self {
        Self {
            constructor_classes: HashSet::new(),
            class_prefixes: HashSet::new(),
            method_signatures: HashSet::new(),
        }
    }

    pub fn allow_constructor(&mut self, class: impl Into<String>) -> &mut Self {
        self.constructor_classes.insert(class.into());
        self
    }

    /// Every method of `class` (and dotted sub-prefixes of it) is pure.
    pub fn allow_class_prefix(&mut self, class: impl Into<String>) -> &mut Self {
        self.class_prefixes.insert(class.into());
        self
    }

    pub fn allow_method(&mut self, class: &str, method: &str) -> &mut Self {
        self.method_signatures.insert(format!("{class}#{method}"));
        self
    }

    pub fn is_safe(&self, method: &MethodRef) -> bool {
        if method.is_constructor() {
            return self.constructor_classes.contains(&method.class);
        }

        for prefix in &self.class_prefixes {
            if method.class == *prefix || method.class.starts_with(&format!("{prefix}.")) {
                return true;
            }
        }

        self.method_signatures.contains(&method.key())
    }

    pub fn is_safe_constructor(&self, class: &str) -> bool {
        self.constructor_classes.contains(class)
    }
}

impl Default for SafeMethodRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();

        // Constructors: without these, every `new` followed by `<init>`
        // would be flagged impure.
        for class in [
            "java.lang.Object",
            "java.lang.String",
            "java.lang.StringBuilder",
            "java.lang.StringBuffer",
            "java.lang.Integer",
            "java.lang.Long",
            "java.lang.Double",
            "java.lang.Float",
            "java.lang.Boolean",
            "java.lang.Byte",
            "java.lang.Short",
            "java.lang.Character",
            "java.lang.Number",
            "java.util.ArrayList",
            "java.util.LinkedList",
            "java.util.HashMap",
            "java.util.LinkedHashMap",
            "java.util.TreeMap",
            "java.util.HashSet",
            "java.util.LinkedHashSet",
            "java.util.TreeSet",
            "java.util.Vector",
            "java.util.Stack",
            "java.util.ArrayDeque",
            "java.util.PriorityQueue",
            "java.util.Hashtable",
            "java.util.Properties",
            "java.io.ByteArrayOutputStream",
            "java.io.StringWriter",
        ] {
            registry.allow_constructor(class);
        }

        // Classes whose entire method surface is pure.
        registry.allow_class_prefix("java.lang.Math");
        registry.allow_class_prefix("java.lang.StrictMath");
        registry.allow_class_prefix("java.lang.String");

        // Object basics.
        for method in ["hashCode", "equals", "toString", "getClass"] {
            registry.allow_method("java.lang.Object", method);
        }

        // Wrapper boxing and conversions.
        for class in [
            "java.lang.Integer",
            "java.lang.Long",
            "java.lang.Double",
            "java.lang.Float",
            "java.lang.Boolean",
            "java.lang.Byte",
            "java.lang.Short",
            "java.lang.Character",
        ] {
            registry.allow_method(class, "valueOf");
        }
        registry.allow_method("java.lang.Integer", "intValue");
        registry.allow_method("java.lang.Long", "longValue");
        registry.allow_method("java.lang.Double", "doubleValue");
        registry.allow_method("java.lang.Float", "floatValue");
        registry.allow_method("java.lang.Boolean", "booleanValue");
        registry.allow_method("java.lang.Byte", "byteValue");
        registry.allow_method("java.lang.Short", "shortValue");
        registry.allow_method("java.lang.Character", "charValue");
        for method in ["intValue", "longValue", "doubleValue", "floatValue"] {
            registry.allow_method("java.lang.Number", method);
        }

        // Collection queries.
        for method in ["size", "isEmpty", "contains", "iterator"] {
            registry.allow_method("java.util.Collection", method);
        }
        registry.allow_method("java.util.List", "get");
        registry.allow_method("java.util.List", "indexOf");
        for method in [
            "get",
            "containsKey",
            "containsValue",
            "size",
            "isEmpty",
            "keySet",
            "values",
            "entrySet",
        ] {
            registry.allow_method("java.util.Map", method);
        }

        // Array helpers.
        for method in ["copyOf", "sort", "toString", "asList"] {
            registry.allow_method("java.util.Arrays", method);
        }

        registry.allow_method("java.lang.System", "identityHashCode");

        registry
    }
}
