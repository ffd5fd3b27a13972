//! A relaxation simulator for gate-level netlists.
//!
//! A netlist declares one component per line:
//!
//! ```text
//! clock     : controlled
//! E         : controlled
//! gated_clk : and(clock, E)
//! q         : nand(d_nand_a, q_) = 1
//! ```
//!
//! [`Circuit::build`] resolves the declarations into a component graph and
//! [`Sim`] evaluates it. Every step runs a fixed number of passes over the
//! components in declaration order, which is enough for cross-coupled gates
//! such as latches to settle.

use std::collections::BTreeMap;
use std::sync::Arc;
use log::*;

mod loc;
mod error;
mod component;
mod circuit;
mod parse;
mod testbench;
mod trace;
mod wavedump;
mod sim;
#[cfg(test)]
mod tests;

pub use loc::*;
pub use error::*;
pub use component::*;
pub use circuit::*;
pub use parse::*;
pub use testbench::*;
pub use trace::*;
pub use wavedump::*;
pub use sim::*;
