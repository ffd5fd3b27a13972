use super::*;

mod value;
mod eval;

pub use value::Value;

pub const DEFAULT_EVALS_PER_STEP: usize = 5;

/// Relaxation simulator.
///
/// Each call to [`Sim::eval`] sweeps the circuit once in declaration order. A
/// component reads whatever its inputs hold at that moment, which for inputs
/// declared later is the value from the previous pass. Running several passes per
/// step carries changes around feedback loops until latches settle.
pub struct Sim {
    circuit: Arc<Circuit>,
    values: Vec<Value>,
    evals_per_step: usize,
    time: usize,
}

impl Sim {
    pub fn new(circuit: Arc<Circuit>, evals_per_step: usize) -> Sim {
        let values = circuit.components().iter().map(|component| component.initial_value()).collect();
        Sim {
            circuit,
            values,
            evals_per_step,
            time: 0,
        }
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Current states, indexed by [`ComponentId`].
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn evals_per_step(&self) -> usize {
        self.evals_per_step
    }

    /// Number of steps taken since construction or the last reset.
    pub fn time(&self) -> usize {
        self.time
    }

    pub fn peek(&self, name: &str) -> Result<Value, CircuitError> {
        let component_id = self.circuit.resolve(name)?;
        Ok(self.values[component_id])
    }

    /// Drives a controlled component. No evaluation happens until the next pass.
    pub fn poke(&mut self, name: &str, value: Value) -> Result<(), CircuitError> {
        self.apply(&Stimulus::Set(Loc::unknown(), name.to_string(), value))
    }

    pub fn reset(&mut self) {
        for (value, component) in self.values.iter_mut().zip(self.circuit.components()) {
            *value = component.initial_value();
        }
        self.time = 0;
    }

    /// Runs a single settling pass and returns how many components changed.
    pub fn eval(&mut self) -> usize {
        eval::pass(&self.circuit, &mut self.values)
    }

    /// True when one more pass would leave every state as it is.
    pub fn is_settled(&self) -> bool {
        let mut values = self.values.clone();
        eval::pass(&self.circuit, &mut values) == 0
    }

    /// Applies `stimuli` in order, then runs the configured number of passes.
    pub fn step(&mut self, stimuli: &[Stimulus]) -> Result<(), CircuitError> {
        for stimulus in stimuli {
            self.apply(stimulus)?;
        }

        for _ in 0..self.evals_per_step {
            self.eval();
        }

        if log_enabled!(Level::Debug) {
            let status = if self.is_settled() { "settled" } else { "not settled" };
            debug!("step {}: {status} after {} passes", self.time, self.evals_per_step);
        }
        self.time += 1;
        Ok(())
    }

    /// Runs every step of `testbench`, sampling into `trace` after each one.
    /// The testbench's pass count replaces the one given to [`Sim::new`].
    ///
    /// The whole schedule is checked against the circuit first, so a bad
    /// stimulus target fails before anything is sampled.
    pub fn run(&mut self, testbench: &Testbench, trace: &mut dyn Trace) -> Result<(), CircuitError> {
        testbench.validate(&self.circuit)?;
        self.evals_per_step = testbench.evals_per_step();

        info!(
            "Running {} steps with {} passes per step ({} controlled inputs)",
            testbench.steps(),
            self.evals_per_step,
            self.circuit.controlled().len(),
        );
        for step in 0..testbench.steps() {
            let stimuli = testbench.stimuli_at(step);
            self.step(&stimuli)?;
            trace.sample(&self.circuit, &self.values);
        }
        Ok(())
    }

    fn apply(&mut self, stimulus: &Stimulus) -> Result<(), CircuitError> {
        match stimulus {
            Stimulus::Set(loc, name, value) => {
                let component_id = self.controlled_at(loc, name)?;
                trace!("    {name} <= {value}");
                self.values[component_id] = *value;
            },
            Stimulus::Toggle(loc, name) => {
                let component_id = self.controlled_at(loc, name)?;
                let value = self.values[component_id].toggle();
                trace!("    {name} <= {value} (toggle)");
                self.values[component_id] = value;
            },
        }
        Ok(())
    }

    fn controlled_at(&self, loc: &Loc, name: &str) -> Result<ComponentId, CircuitError> {
        let component_id = self.circuit.resolve_at(loc, name)?;
        if self.circuit.component(component_id).is_controlled() {
            Ok(component_id)
        } else {
            Err(CircuitError::NotControlled(name.to_string()))
        }
    }
}

impl std::fmt::Debug for Sim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        writeln!(f, "time {}", self.time)?;
        for (component, value) in self.circuit.components().iter().zip(&self.values) {
            writeln!(f, "    {:>3}   {} : {}", format!("{value:?}"), component.name(), component.gate.operator())?;
        }
        Ok(())
    }
}
