use super::*;

impl BinOp {
    pub fn apply(&self, a: bool, b: bool) -> bool {
        match self {
            BinOp::And => a && b,
            BinOp::Nand => !(a && b),
            BinOp::Or => a || b,
            BinOp::Nor => !(a || b),
            BinOp::Xor => a ^ b,
            BinOp::Xnor => !(a ^ b),
        }
    }
}

impl Gate<ComponentId> {
    /// The output this gate drives given the current `values`.
    /// Controlled components have no function and yield `None`.
    pub fn eval(&self, values: &[Value]) -> Option<Value> {
        match self {
            Gate::Controlled => None,
            Gate::Not(a) => Some(values[*a].toggle()),
            Gate::BinOp(op, a, b) => {
                let value = match (values[*a], values[*b]) {
                    (Value::Bit(a), Value::Bit(b)) => Value::Bit(op.apply(a, b)),
                    _ => Value::X,
                };
                Some(value)
            },
        }
    }
}

/// One settling pass, in declaration order, updating `values` in place.
/// Returns how many components changed.
pub(crate) fn pass(circuit: &Circuit, values: &mut [Value]) -> usize {
    let mut changed = 0;
    for (component_id, component) in circuit.components().iter().enumerate() {
        if let Some(value) = component.gate.eval(values) {
            if values[component_id] != value {
                values[component_id] = value;
                changed += 1;
            }
        }
    }
    changed
}
