//! Builtin functions available to every tutor-language program.
//!
//! Builtins are looked up only after the environment, so a submission that
//! defines its own `print` shadows the builtin rather than colliding with it.

use super::error::{check_arity, RuntimeError};
use super::value::{format_value, Value};
use super::Interpreter;

impl Interpreter {
    /// Try to dispatch a call to a builtin function.
    /// Returns Some(result) if `name` is a builtin, None otherwise.
    pub(crate) fn call_builtin(
        &mut self,
        name: &str,
        args: Vec<Value>,
    ) -> Option<Result<Value, RuntimeError>> {
        match name {
            "print" => Some(self.builtin_print(args, false)),
            "println" => Some(self.builtin_print(args, true)),
            "input" => Some(self.builtin_input(args)),
            "len" => Some(builtin_len(args)),
            "str" => Some(builtin_str(args)),
            "int" => Some(builtin_int(args)),
            "range" => Some(builtin_range(args)),
            "abs" => Some(builtin_abs(args)),
            "min" => Some(builtin_min_max(args, "min")),
            "max" => Some(builtin_min_max(args, "max")),
            "push" => Some(builtin_push(args)),
            _ => None,
        }
    }

    /// print(...) / println(...): space-joined arguments to stdout
    fn builtin_print(&mut self, args: Vec<Value>, newline: bool) -> Result<Value, RuntimeError> {
        let text = args
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(" ");
        self.console().write_out(&text);
        if newline {
            self.console().write_out("\n");
        }
        Ok(Value::Unit)
    }

    /// input() / input(prompt): one line from the console, or an error
    /// once input is exhausted
    fn builtin_input(&mut self, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let prompt = match args.as_slice() {
            [] => String::new(),
            [Value::Str(p)] => p.clone(),
            [other] => return Err(RuntimeError::type_mismatch("Str", other.type_name())),
            _ => return Err(RuntimeError::arity_mismatch("input", 1, args.len())),
        };
        match self.console().read_line(&prompt) {
            Some(line) => Ok(Value::Str(line)),
            None => Err(RuntimeError::end_of_input()),
        }
    }
}

/// len(x): length of a string (in characters) or list
fn builtin_len(args: Vec<Value>) -> Result<Value, RuntimeError> {
    check_arity("len", &args, 1)?;
    match &args[0] {
        Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
        Value::List(items) => Ok(Value::Int(items.len() as i64)),
        other => Err(RuntimeError::type_mismatch(
            "Str or List",
            other.type_name(),
        )),
    }
}

/// str(x): the display form of any value
fn builtin_str(args: Vec<Value>) -> Result<Value, RuntimeError> {
    check_arity("str", &args, 1)?;
    Ok(Value::Str(format_value(&args[0])))
}

/// int(x): parse a string, pass an int through, widen a bool
fn builtin_int(args: Vec<Value>) -> Result<Value, RuntimeError> {
    check_arity("int", &args, 1)?;
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(*n)),
        Value::Bool(b) => Ok(Value::Int(if *b { 1 } else { 0 })),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| {
                RuntimeError::type_mismatch("numeric Str", &format!("{:?}", s))
            }),
        other => Err(RuntimeError::type_mismatch(
            "Int, Bool, or Str",
            other.type_name(),
        )),
    }
}

/// range(stop) / range(start, stop): list of consecutive ints
fn builtin_range(args: Vec<Value>) -> Result<Value, RuntimeError> {
    let (start, stop) = match args.as_slice() {
        [Value::Int(stop)] => (0, *stop),
        [Value::Int(start), Value::Int(stop)] => (*start, *stop),
        [one] => return Err(RuntimeError::type_mismatch("Int", one.type_name())),
        [a, b] => {
            let bad = if matches!(a, Value::Int(_)) { b } else { a };
            return Err(RuntimeError::type_mismatch("Int", bad.type_name()));
        }
        _ => return Err(RuntimeError::arity_mismatch("range", 2, args.len())),
    };
    Ok(Value::List((start..stop).map(Value::Int).collect()))
}

/// abs(n)
fn builtin_abs(args: Vec<Value>) -> Result<Value, RuntimeError> {
    check_arity("abs", &args, 1)?;
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(n.abs())),
        other => Err(RuntimeError::type_mismatch("Int", other.type_name())),
    }
}

/// min(a, b) / max(a, b)
fn builtin_min_max(args: Vec<Value>, name: &str) -> Result<Value, RuntimeError> {
    check_arity(name, &args, 2)?;
    match (&args[0], &args[1]) {
        (Value::Int(a), Value::Int(b)) => {
            let result = if name == "min" {
                (*a).min(*b)
            } else {
                (*a).max(*b)
            };
            Ok(Value::Int(result))
        }
        (Value::Int(_), other) | (other, _) => {
            Err(RuntimeError::type_mismatch("Int", other.type_name()))
        }
    }
}

/// push(list, item): a new list with the item appended
fn builtin_push(mut args: Vec<Value>) -> Result<Value, RuntimeError> {
    check_arity("push", &args, 2)?;
    let item = args.remove(1);
    match args.remove(0) {
        Value::List(mut items) => {
            items.push(item);
            Ok(Value::List(items))
        }
        other => Err(RuntimeError::type_mismatch("List", other.type_name())),
    }
}
