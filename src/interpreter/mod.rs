//! Interpreter for tutor-language programs
//!
//! A tree-walking evaluator over a scope-stack environment. Loading a
//! submission runs its top-level statements once; probe execution later
//! re-enters the same machinery against a cloned environment. All console
//! interaction is routed through the `Console` seam so callers decide
//! whether output reaches the real process streams or capture buffers.

pub mod builtins;
pub mod console;
pub mod environment;
pub mod error;
pub mod value;

pub use console::{CaptureConsole, Console, SystemConsole};
pub use environment::Environment;
pub use error::{check_arity, RuntimeError};
pub use value::{format_value, values_equal, Value};

use std::rc::Rc;

use crate::parser::ast::*;

/// Interpreter for tutor-language programs
pub struct Interpreter {
    /// Current environment (scope stack)
    pub env: Environment,
    console: Rc<dyn Console>,
}

impl Interpreter {
    /// Create a new interpreter with an empty environment
    pub fn new(console: Rc<dyn Console>) -> Self {
        Self {
            env: Environment::new(),
            console,
        }
    }

    /// Create an interpreter over an existing environment
    pub fn with_env(env: Environment, console: Rc<dyn Console>) -> Self {
        Self { env, console }
    }

    /// Replace the console, returning the previous one. The probe runner
    /// uses this to install capture buffers for exactly one call window.
    pub fn set_console(&mut self, console: Rc<dyn Console>) -> Rc<dyn Console> {
        std::mem::replace(&mut self.console, console)
    }

    /// Consume the interpreter, keeping its environment
    pub fn into_env(self) -> Environment {
        self.env
    }

    pub(crate) fn console(&self) -> &dyn Console {
        self.console.as_ref()
    }

    /// Execute a program's top-level statements in order
    pub fn run_program(&mut self, program: &Program) -> Result<(), RuntimeError> {
        for stmt in &program.body {
            match self.exec_stmt(stmt) {
                Ok(()) => {}
                Err(e) if e.is_return => return Err(RuntimeError::return_outside_function()),
                Err(e) if e.is_break || e.is_continue => {
                    return Err(RuntimeError::break_outside_loop())
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Execute a single statement
    pub fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        match stmt {
            Stmt::Fn(def) => {
                let params: Vec<String> = def.params.iter().map(|p| p.name.clone()).collect();
                self.env.define(
                    def.name.clone(),
                    Value::Function {
                        name: def.name.clone(),
                        params,
                        body: def.body.clone(),
                    },
                );
                Ok(())
            }
            Stmt::Let { name, value, .. } => {
                let val = self.eval_expr(value)?;
                self.env.define(name.clone(), val);
                Ok(())
            }
            Stmt::Assign {
                target,
                value,
                span,
                ..
            } => {
                let val = self.eval_expr(value)?;
                if !self.env.update(target, val) {
                    return Err(RuntimeError::undefined_variable(target).with_span(span.clone()));
                }
                Ok(())
            }
            Stmt::Expr { expr, .. } => {
                self.eval_expr(expr)?;
                Ok(())
            }
            Stmt::Return { value, .. } => {
                let val = if let Some(val_expr) = value {
                    self.eval_expr(val_expr)?
                } else {
                    Value::Unit
                };
                Err(RuntimeError::function_return(val))
            }
            Stmt::If {
                cond,
                then_body,
                else_body,
                ..
            } => {
                let condition = self.eval_expr(cond)?;
                match condition {
                    Value::Bool(true) => self.exec_body(then_body),
                    Value::Bool(false) => match else_body {
                        Some(body) => self.exec_body(body),
                        None => Ok(()),
                    },
                    other => Err(RuntimeError::type_mismatch("Bool", other.type_name())),
                }
            }
            Stmt::While { cond, body, .. } => {
                loop {
                    let condition = self.eval_expr(cond)?;
                    match condition {
                        Value::Bool(true) => match self.exec_body(body) {
                            Ok(()) => {}
                            Err(e) if e.is_break => break,
                            Err(e) if e.is_continue => continue,
                            Err(e) => return Err(e),
                        },
                        Value::Bool(false) => break,
                        other => {
                            return Err(RuntimeError::type_mismatch("Bool", other.type_name()))
                        }
                    }
                }
                Ok(())
            }
            Stmt::For {
                binding,
                iter,
                body,
                ..
            } => {
                let iter_val = self.eval_expr(iter)?;
                let items: Vec<Value> = match iter_val {
                    Value::List(items) => items,
                    Value::Str(s) => s.chars().map(|c| Value::Str(c.to_string())).collect(),
                    other => {
                        return Err(RuntimeError::type_mismatch(
                            "List or Str",
                            other.type_name(),
                        ))
                    }
                };

                'for_loop: for item in items {
                    self.env.push_scope();
                    self.env.define(binding.clone(), item);
                    for stmt in body {
                        match self.exec_stmt(stmt) {
                            Ok(()) => {}
                            Err(e) if e.is_break => {
                                self.env.pop_scope();
                                break 'for_loop;
                            }
                            Err(e) if e.is_continue => break,
                            Err(e) => {
                                self.env.pop_scope();
                                return Err(e);
                            }
                        }
                    }
                    self.env.pop_scope();
                }
                Ok(())
            }
            Stmt::Break { .. } => Err(RuntimeError::loop_break()),
            Stmt::Continue { .. } => Err(RuntimeError::loop_continue()),
        }
    }

    /// Execute statements in a fresh scope
    fn exec_body(&mut self, body: &[Stmt]) -> Result<(), RuntimeError> {
        self.env.push_scope();
        for stmt in body {
            if let Err(e) = self.exec_stmt(stmt) {
                self.env.pop_scope();
                return Err(e);
            }
        }
        self.env.pop_scope();
        Ok(())
    }

    /// Evaluate an expression
    pub fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            // Literals
            Expr::IntLit { value, .. } => Ok(Value::Int(*value)),
            Expr::BoolLit { value, .. } => Ok(Value::Bool(*value)),
            Expr::StrLit { value, .. } => Ok(Value::Str(value.clone())),
            Expr::ListLit { elements, .. } => {
                let mut values = Vec::new();
                for elem in elements {
                    values.push(self.eval_expr(elem)?);
                }
                Ok(Value::List(values))
            }

            // Identifiers
            Expr::Ident { name, span, .. } => self
                .env
                .lookup(name)
                .cloned()
                .ok_or_else(|| RuntimeError::undefined_variable(name).with_span(span.clone())),

            // Binary operations; and/or short-circuit
            Expr::Binary {
                op: op @ (BinaryOp::And | BinaryOp::Or),
                left,
                right,
                ..
            } => {
                let left_val = self.eval_expr(left)?;
                match (op, &left_val) {
                    (BinaryOp::And, Value::Bool(false)) => Ok(Value::Bool(false)),
                    (BinaryOp::Or, Value::Bool(true)) => Ok(Value::Bool(true)),
                    (_, Value::Bool(_)) => match self.eval_expr(right)? {
                        Value::Bool(b) => Ok(Value::Bool(b)),
                        other => Err(RuntimeError::type_mismatch("Bool", other.type_name())),
                    },
                    (_, other) => Err(RuntimeError::type_mismatch("Bool", other.type_name())),
                }
            }
            Expr::Binary {
                op, left, right, ..
            } => {
                let left_val = self.eval_expr(left)?;
                let right_val = self.eval_expr(right)?;
                self.eval_binary_op(*op, &left_val, &right_val)
            }

            // Unary operations
            Expr::Unary { op, expr, .. } => {
                let val = self.eval_expr(expr)?;
                match (op, val) {
                    (UnaryOp::Neg, Value::Int(n)) => Ok(Value::Int(-n)),
                    (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
                    (UnaryOp::Neg, other) => {
                        Err(RuntimeError::type_mismatch("Int", other.type_name()))
                    }
                    (UnaryOp::Not, other) => {
                        Err(RuntimeError::type_mismatch("Bool", other.type_name()))
                    }
                }
            }

            // Indexing, with negative indices counting from the end
            Expr::Index { target, index, .. } => {
                let target_val = self.eval_expr(target)?;
                let index_val = self.eval_expr(index)?;
                let idx = match index_val {
                    Value::Int(i) => i,
                    other => return Err(RuntimeError::type_mismatch("Int", other.type_name())),
                };
                match target_val {
                    Value::List(items) => {
                        let resolved = resolve_index(idx, items.len())?;
                        Ok(items[resolved].clone())
                    }
                    Value::Str(s) => {
                        let chars: Vec<char> = s.chars().collect();
                        let resolved = resolve_index(idx, chars.len())?;
                        Ok(Value::Str(chars[resolved].to_string()))
                    }
                    other => Err(RuntimeError::type_mismatch(
                        "List or Str",
                        other.type_name(),
                    )),
                }
            }

            // Function calls: user definitions shadow builtins
            Expr::Call { func, args, .. } => {
                let mut arg_vals = Vec::new();
                for arg in args {
                    arg_vals.push(self.eval_expr(arg)?);
                }

                if let Expr::Ident { name, .. } = func.as_ref() {
                    if let Some(callee) = self.env.lookup(name).cloned() {
                        return self.call_function(callee, arg_vals);
                    }
                    return match self.call_builtin(name, arg_vals) {
                        Some(result) => result,
                        None => Err(RuntimeError::unknown_function(name)),
                    };
                }

                let func_val = self.eval_expr(func)?;
                self.call_function(func_val, arg_vals)
            }
        }
    }

    /// Invoke a callable value with already-evaluated arguments
    pub fn call_function(&mut self, func: Value, args: Vec<Value>) -> Result<Value, RuntimeError> {
        match func {
            Value::Function { name, params, body } => {
                if params.len() != args.len() {
                    return Err(RuntimeError::arity_mismatch(&name, params.len(), args.len()));
                }

                // Run the body in a child scope of the caller's environment
                let mut call_env = self.env.clone();
                call_env.push_scope();
                for (param, arg) in params.iter().zip(args) {
                    call_env.define(param.clone(), arg);
                }

                let old_env = std::mem::replace(&mut self.env, call_env);
                let result = self.exec_fn_body(&body);
                self.env = old_env;

                match result {
                    Ok(()) => Ok(Value::Unit),
                    Err(e) if e.is_return => Ok(e.get_return_value().unwrap_or(Value::Unit)),
                    Err(e) if e.is_break || e.is_continue => {
                        Err(RuntimeError::break_outside_loop())
                    }
                    Err(e) => Err(e),
                }
            }
            other => Err(RuntimeError::not_callable(other.type_name())),
        }
    }

    fn exec_fn_body(&mut self, body: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in body {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    /// Evaluate a binary operation on evaluated operands
    fn eval_binary_op(
        &self,
        op: BinaryOp,
        left: &Value,
        right: &Value,
    ) -> Result<Value, RuntimeError> {
        match (op, left, right) {
            // Arithmetic
            (BinaryOp::Add, Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
            (BinaryOp::Add, Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
            (BinaryOp::Add, Value::List(a), Value::List(b)) => {
                let mut items = a.clone();
                items.extend(b.iter().cloned());
                Ok(Value::List(items))
            }
            (BinaryOp::Sub, Value::Int(a), Value::Int(b)) => Ok(Value::Int(a - b)),
            (BinaryOp::Mul, Value::Int(a), Value::Int(b)) => Ok(Value::Int(a * b)),
            (BinaryOp::Div, Value::Int(a), Value::Int(b)) => {
                if *b == 0 {
                    Err(RuntimeError::division_by_zero())
                } else {
                    Ok(Value::Int(a / b))
                }
            }
            (BinaryOp::Mod, Value::Int(a), Value::Int(b)) => {
                if *b == 0 {
                    Err(RuntimeError::division_by_zero())
                } else {
                    Ok(Value::Int(a % b))
                }
            }

            // Equality works across all value kinds
            (BinaryOp::Eq, a, b) => Ok(Value::Bool(values_equal(a, b))),
            (BinaryOp::Ne, a, b) => Ok(Value::Bool(!values_equal(a, b))),

            // Ordering
            (BinaryOp::Lt, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a < b)),
            (BinaryOp::Le, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a <= b)),
            (BinaryOp::Gt, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a > b)),
            (BinaryOp::Ge, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a >= b)),
            (BinaryOp::Lt, Value::Str(a), Value::Str(b)) => Ok(Value::Bool(a < b)),
            (BinaryOp::Le, Value::Str(a), Value::Str(b)) => Ok(Value::Bool(a <= b)),
            (BinaryOp::Gt, Value::Str(a), Value::Str(b)) => Ok(Value::Bool(a > b)),
            (BinaryOp::Ge, Value::Str(a), Value::Str(b)) => Ok(Value::Bool(a >= b)),

            // Logical operators are short-circuited in eval_expr; handle
            // them here too for completeness
            (BinaryOp::And, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
            (BinaryOp::Or, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),

            (_, a, b) => Err(RuntimeError::type_mismatch(
                a.type_name(),
                b.type_name(),
            )),
        }
    }
}

/// Resolve a possibly-negative index against a length
fn resolve_index(index: i64, len: usize) -> Result<usize, RuntimeError> {
    let resolved = if index < 0 {
        index + len as i64
    } else {
        index
    };
    if resolved < 0 || resolved as usize >= len {
        Err(RuntimeError::index_out_of_bounds(index, len))
    } else {
        Ok(resolved as usize)
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
