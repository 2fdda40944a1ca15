//! [CEL](https://cel.dev) evaluation of vapguard assertions.
//!
//! Comprehension macros (`all`, `exists`, `exists_one`, `map`, `filter`) walk
//! map keys in sorted order, so an expression that meets both a `false` element
//! and an erroring one always settles the same way.

#![forbid(unsafe_code)]

use cel_interpreter::objects::{Key, Map};
use cel_interpreter::{Context, ExecutionError, IdedExpr, ResolveResult, Value as CelValue};
use cel_parser::Parser;
use cel_parser::ast::{CallExpr, EntryExpr, Expr, IdedEntryExpr};
use std::collections::HashMap;
use std::sync::Arc;
use vapguard_domain::{Binding, EvalError, EvalOutput, ExpressionEvaluator, Value};

/// Wraps every comprehension range. Not a valid CEL identifier, so user
/// expressions cannot call it.
const ORDERED_RANGE: &str = "@ordered_range";

/// Compiles each expression once with `cel-interpreter` and evaluates it per target.
#[derive(Clone, Copy, Debug, Default)]
pub struct CelEvaluator;

impl CelEvaluator {
    pub fn new() -> Self {
        Self
    }
}

/// A parsed expression with its comprehension ranges pinned to a stable order.
#[derive(Clone, Debug)]
pub struct CompiledExpression {
    root: IdedExpr,
}

impl ExpressionEvaluator for CelEvaluator {
    type Compiled = CompiledExpression;

    fn compile(&self, expression: &str) -> Result<CompiledExpression, EvalError> {
        let mut root = Parser::default()
            .parse(expression)
            .map_err(|e| EvalError::Compile(e.to_string()))?;
        order_ranges(&mut root);
        Ok(CompiledExpression { root })
    }

    fn evaluate(
        &self,
        compiled: &CompiledExpression,
        binding: &Binding<'_>,
    ) -> Result<EvalOutput, EvalError> {
        let mut context = Context::default();
        context.add_function(ORDERED_RANGE, ordered_range);
        context.add_variable_from_value(binding.name, to_cel(binding.value));

        match CelValue::resolve(&compiled.root, &context) {
            Ok(CelValue::Bool(b)) => Ok(EvalOutput::Bool(b)),
            Ok(other) => Ok(EvalOutput::NonBoolean(format!("{other:?}"))),
            Err(e) => Err(EvalError::Evaluate(e.to_string())),
        }
    }
}

/// Routes every comprehension range through [`ordered_range`].
fn order_ranges(node: &mut IdedExpr) {
    match &mut node.expr {
        Expr::Call(call) => {
            if let Some(target) = call.target.as_deref_mut() {
                order_ranges(target);
            }
            call.args.iter_mut().for_each(order_ranges);
        }
        Expr::Comprehension(comp) => {
            for child in [
                &mut comp.iter_range,
                &mut comp.accu_init,
                &mut comp.loop_cond,
                &mut comp.loop_step,
                &mut comp.result,
            ] {
                order_ranges(child);
            }
            let range = std::mem::take(comp.iter_range.as_mut());
            *comp.iter_range = IdedExpr {
                id: range.id,
                expr: Expr::Call(CallExpr {
                    func_name: ORDERED_RANGE.to_string(),
                    target: None,
                    args: vec![range],
                }),
            };
        }
        Expr::List(list) => list.elements.iter_mut().for_each(order_ranges),
        Expr::Map(map) => map.entries.iter_mut().for_each(order_entry),
        Expr::Struct(st) => st.entries.iter_mut().for_each(order_entry),
        Expr::Select(select) => order_ranges(&mut select.operand),
        Expr::Unspecified | Expr::Ident(_) | Expr::Literal(_) => {}
    }
}

fn order_entry(entry: &mut IdedEntryExpr) {
    match &mut entry.expr {
        EntryExpr::MapEntry(e) => {
            order_ranges(&mut e.key);
            order_ranges(&mut e.value);
        }
        EntryExpr::StructField(f) => order_ranges(&mut f.value),
    }
}

/// Maps iterate as their sorted key list; lists pass through unchanged.
fn ordered_range(range: CelValue) -> ResolveResult {
    match range {
        CelValue::Map(map) => {
            let mut keys: Vec<Key> = map.map.keys().cloned().collect();
            keys.sort();
            Ok(CelValue::List(Arc::new(
                keys.into_iter().map(CelValue::from).collect(),
            )))
        }
        list @ CelValue::List(_) => Ok(list),
        other => Err(ExecutionError::function_error(
            ORDERED_RANGE,
            format!("cannot iterate over {other:?}"),
        )),
    }
}

fn to_cel(value: &Value) -> CelValue {
    match value {
        Value::Null => CelValue::Null,
        Value::Bool(b) => CelValue::Bool(*b),
        Value::Int(i) => CelValue::Int(*i),
        Value::UInt(u) => CelValue::UInt(*u),
        Value::Float(f) => CelValue::Float(*f),
        Value::String(s) => CelValue::String(Arc::new(s.clone())),
        Value::List(items) => CelValue::List(Arc::new(items.iter().map(to_cel).collect())),
        Value::Map(fields) => {
            let map: HashMap<Key, CelValue> = fields
                .iter()
                .map(|(k, v)| (Key::String(Arc::new(k.clone())), to_cel(v)))
                .collect();
            CelValue::Map(Map::from(map))
        }
    }
}
