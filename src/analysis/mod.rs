//! Structural analysis of submission ASTs.
//!
//! One traversal of the program produces a `FactTable` that rules query
//! afterwards. Looking up a function that was never defined yields an
//! "absent" fact rather than `None`, so rule predicates read flat.

pub mod rules;

pub use rules::{AnalysisResult, Rule, RuleSet, RuleStatus};

use std::collections::HashMap;

use crate::parser::ast::{Expr, FnDef, Program, Stmt};

/// Facts recorded about one function definition
#[derive(Debug, Clone, Default)]
pub struct FunctionFact {
    /// Whether the submission defines this function at all
    pub defined: bool,
    /// Parameter names in declaration order
    pub params: Vec<String>,
    /// Whether the body contains a `return` statement (nested blocks
    /// count, nested function definitions do not)
    pub has_return: bool,
    /// Names this function calls
    pub calls: Vec<String>,
    /// Whether the body contains a while or for loop
    pub uses_loop: bool,
    /// Whether the function calls itself
    pub is_recursive: bool,
}

impl FunctionFact {
    /// Number of declared parameters
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Whether the body calls the given name
    pub fn calls(&self, name: &str) -> bool {
        self.calls.iter().any(|c| c == name)
    }
}

/// Extension seam: exercises can observe the same traversal that builds
/// the fact table. Default methods are no-ops; implement only the hooks
/// you need.
pub trait Collector {
    fn visit_fn(&mut self, _def: &FnDef) {}
    fn visit_stmt(&mut self, _stmt: &Stmt) {}
    fn visit_expr(&mut self, _expr: &Expr) {}
}

/// No-op collector for plain fact-table construction
struct NullCollector;

impl Collector for NullCollector {}

/// Structural facts about one submission
#[derive(Debug, Clone, Default)]
pub struct FactTable {
    functions: HashMap<String, FunctionFact>,
    top_level_vars: Vec<String>,
    absent: FunctionFact,
}

impl FactTable {
    /// Build the table from a parsed program
    pub fn from_program(program: &Program) -> Self {
        Self::from_program_with(program, &mut NullCollector)
    }

    /// Build the table, feeding every visited node to `collector` as well
    pub fn from_program_with(program: &Program, collector: &mut dyn Collector) -> Self {
        let mut table = FactTable::default();
        for stmt in &program.body {
            match stmt {
                Stmt::Fn(def) => {
                    collector.visit_stmt(stmt);
                    table.record_fn(def, collector);
                }
                Stmt::Let { name, value, .. } => {
                    collector.visit_stmt(stmt);
                    table.top_level_vars.push(name.clone());
                    walk_expr(value, collector);
                }
                other => walk_stmt_exprs(other, collector),
            }
        }
        table
    }

    /// Facts for a function name; absent names yield a default fact with
    /// `defined == false`
    pub fn function(&self, name: &str) -> &FunctionFact {
        self.functions.get(name).unwrap_or(&self.absent)
    }

    /// Whether a top-level `let` binds this name
    pub fn has_variable(&self, name: &str) -> bool {
        self.top_level_vars.iter().any(|v| v == name)
    }

    /// Names of all defined functions, sorted
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn record_fn(&mut self, def: &FnDef, collector: &mut dyn Collector) {
        collector.visit_fn(def);
        let mut fact = FunctionFact {
            defined: true,
            params: def.params.iter().map(|p| p.name.clone()).collect(),
            ..FunctionFact::default()
        };
        scan_body(&def.body, &mut fact, collector);
        fact.is_recursive = fact.calls(&def.name);

        // nested definitions get their own entries too
        for stmt in &def.body {
            if let Stmt::Fn(nested) = stmt {
                self.record_fn(nested, collector);
            }
        }

        self.functions.insert(def.name.clone(), fact);
    }
}

/// Scan a function body, recording returns, loops, and callees.
/// Nested `fn` definitions are skipped: their returns and calls belong
/// to the nested function's own fact.
fn scan_body(body: &[Stmt], fact: &mut FunctionFact, collector: &mut dyn Collector) {
    for stmt in body {
        collector.visit_stmt(stmt);
        match stmt {
            Stmt::Fn(_) => {}
            Stmt::Return { value, .. } => {
                fact.has_return = true;
                if let Some(expr) = value {
                    scan_expr(expr, fact, collector);
                }
            }
            Stmt::If {
                cond,
                then_body,
                else_body,
                ..
            } => {
                scan_expr(cond, fact, collector);
                scan_body(then_body, fact, collector);
                if let Some(else_body) = else_body {
                    scan_body(else_body, fact, collector);
                }
            }
            Stmt::While { cond, body, .. } => {
                fact.uses_loop = true;
                scan_expr(cond, fact, collector);
                scan_body(body, fact, collector);
            }
            Stmt::For { iter, body, .. } => {
                fact.uses_loop = true;
                scan_expr(iter, fact, collector);
                scan_body(body, fact, collector);
            }
            Stmt::Let { value, .. } | Stmt::Assign { value, .. } => {
                scan_expr(value, fact, collector);
            }
            Stmt::Expr { expr, .. } => scan_expr(expr, fact, collector),
            Stmt::Break { .. } | Stmt::Continue { .. } => {}
        }
    }
}

fn scan_expr(expr: &Expr, fact: &mut FunctionFact, collector: &mut dyn Collector) {
    collector.visit_expr(expr);
    match expr {
        Expr::Call { func, args, .. } => {
            if let Expr::Ident { name, .. } = func.as_ref() {
                fact.calls.push(name.clone());
            } else {
                scan_expr(func, fact, collector);
            }
            for arg in args {
                scan_expr(arg, fact, collector);
            }
        }
        Expr::Binary { left, right, .. } => {
            scan_expr(left, fact, collector);
            scan_expr(right, fact, collector);
        }
        Expr::Unary { expr, .. } => scan_expr(expr, fact, collector),
        Expr::Index { target, index, .. } => {
            scan_expr(target, fact, collector);
            scan_expr(index, fact, collector);
        }
        Expr::ListLit { elements, .. } => {
            for elem in elements {
                scan_expr(elem, fact, collector);
            }
        }
        Expr::IntLit { .. }
        | Expr::BoolLit { .. }
        | Expr::StrLit { .. }
        | Expr::Ident { .. } => {}
    }
}

/// Feed a non-definition top-level statement's expressions to a collector
fn walk_stmt_exprs(stmt: &Stmt, collector: &mut dyn Collector) {
    let mut scratch = FunctionFact::default();
    scan_body(std::slice::from_ref(stmt), &mut scratch, collector);
}

fn walk_expr(expr: &Expr, collector: &mut dyn Collector) {
    let mut scratch = FunctionFact::default();
    scan_expr(expr, &mut scratch, collector);
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
