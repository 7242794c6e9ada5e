//! Runtime value types for the tutor-language interpreter.

use crate::parser::ast::Stmt;

/// Runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unit value (result of statements and value-less returns)
    Unit,
    /// Integer
    Int(i64),
    /// Boolean
    Bool(bool),
    /// Text string
    Str(String),
    /// List of values
    List(Vec<Value>),
    /// A defined function. The tutor language has no closures: bodies
    /// resolve names through the environment active at call time.
    Function {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
}

impl Value {
    /// Short type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "Unit",
            Value::Int(_) => "Int",
            Value::Bool(_) => "Bool",
            Value::Str(_) => "Str",
            Value::List(_) => "List",
            Value::Function { .. } => "Function",
        }
    }
}

/// Compare two values for equality
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Unit, Value::Unit) => true,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        }
        // Functions are never equal
        (Value::Function { .. }, Value::Function { .. }) => false,
        _ => false,
    }
}

/// Format a value for display
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Unit => "()".to_string(),
        Value::Int(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Str(s) => s.clone(),
        Value::List(items) => {
            let item_strs: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", item_strs.join(", "))
        }
        Value::Function { name, .. } => format!("<function {}>", name),
    }
}
