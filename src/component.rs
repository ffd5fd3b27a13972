use super::*;

/// Index of a component in declaration order.
pub type ComponentId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BinOp {
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
}

impl BinOp {
    pub fn name(&self) -> &'static str {
        match self {
            BinOp::And => "and",
            BinOp::Nand => "nand",
            BinOp::Or => "or",
            BinOp::Nor => "nor",
            BinOp::Xor => "xor",
            BinOp::Xnor => "xnor",
        }
    }
}

/// The function a component computes, along with its inputs.
///
/// `R` is how inputs are referred to: by name straight out of the parser, and by
/// [`ComponentId`] once a [`Circuit`] has been built. Each variant carries exactly
/// as many inputs as its operator takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate<R> {
    /// A primary input. Only the testbench drives it.
    Controlled,
    Not(R),
    BinOp(BinOp, R, R),
}

impl<R> Gate<R> {
    pub fn is_controlled(&self) -> bool {
        matches!(self, Gate::Controlled)
    }

    pub fn operator(&self) -> &'static str {
        match self {
            Gate::Controlled => "controlled",
            Gate::Not(_a) => "not",
            Gate::BinOp(op, _a, _b) => op.name(),
        }
    }

    pub fn inputs(&self) -> Vec<&R> {
        match self {
            Gate::Controlled => vec![],
            Gate::Not(a) => vec![a],
            Gate::BinOp(_op, a, b) => vec![a, b],
        }
    }

    /// Rewrites every input reference, stopping at the first failure.
    pub fn try_map<S, E, F>(&self, mut f: F) -> Result<Gate<S>, E>
    where
        F: FnMut(&R) -> Result<S, E>,
    {
        Ok(match self {
            Gate::Controlled => Gate::Controlled,
            Gate::Not(a) => Gate::Not(f(a)?),
            Gate::BinOp(op, a, b) => {
                let a = f(a)?;
                let b = f(b)?;
                Gate::BinOp(*op, a, b)
            },
        })
    }
}

impl std::fmt::Display for Gate<String> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Gate::Controlled => write!(f, "controlled"),
            Gate::Not(a) => write!(f, "not({a})"),
            Gate::BinOp(op, a, b) => write!(f, "{}({a}, {b})", op.name()),
        }
    }
}

/// A single line of a netlist, as written.
#[derive(Debug, Clone)]
pub struct Decl {
    pub loc: Loc,
    pub name: String,
    pub gate: Gate<String>,
    pub init: Option<bool>,
}

impl HasLoc for Decl {
    fn loc(&self) -> Loc {
        self.loc.clone()
    }
}

impl std::fmt::Display for Decl {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} : {}", self.name, self.gate)?;
        if let Some(init) = self.init {
            write!(f, " = {}", if init { 1 } else { 0 })?;
        }
        Ok(())
    }
}

/// The declarations of a netlist in source order.
#[derive(Debug, Clone)]
pub struct Netlist(pub Vec<Decl>);

impl Netlist {
    pub fn decls(&self) -> &[Decl] {
        &self.0
    }
}

impl std::fmt::Display for Netlist {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for decl in &self.0 {
            writeln!(f, "{decl}")?;
        }
        Ok(())
    }
}

/// A declaration whose inputs have been resolved against a [`Circuit`].
#[derive(Debug, Clone)]
pub struct Component {
    pub loc: Loc,
    pub name: String,
    pub gate: Gate<ComponentId>,
    pub init: Option<bool>,
}

impl Component {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_controlled(&self) -> bool {
        self.gate.is_controlled()
    }

    pub fn initial_value(&self) -> Value {
        self.init.unwrap_or(false).into()
    }
}

impl HasLoc for Component {
    fn loc(&self) -> Loc {
        self.loc.clone()
    }
}
