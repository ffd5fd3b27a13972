use super::*;
use crate::parse::parse_error;

use lalrpop_util::lalrpop_mod;
lalrpop_mod!(testbench_grammar);

pub const DEFAULT_STEPS: usize = 25;

/// An external change to a controlled component, applied before a step is evaluated.
#[derive(Debug, Clone)]
pub enum Stimulus {
    Set(Loc, String, Value),
    Toggle(Loc, String),
}

impl Stimulus {
    pub fn name(&self) -> &str {
        match self {
            Stimulus::Set(_loc, name, _value) => name,
            Stimulus::Toggle(_loc, name) => name,
        }
    }
}

impl HasLoc for Stimulus {
    fn loc(&self) -> Loc {
        match self {
            Stimulus::Set(loc, _name, _value) => loc.clone(),
            Stimulus::Toggle(loc, _name) => loc.clone(),
        }
    }
}

/// A controlled component toggled on every step divisible by `period`.
#[derive(Debug, Clone)]
pub struct Clock {
    pub loc: Loc,
    pub name: String,
    pub period: usize,
}

impl Clock {
    pub fn ticks_at(&self, step: usize) -> bool {
        step % self.period == 0
    }
}

/// The stimulus schedule and run settings for a simulation.
#[derive(Debug, Clone)]
pub struct Testbench {
    steps: usize,
    evals_per_step: usize,
    clocks: Vec<Clock>,
    schedule: BTreeMap<usize, Vec<Stimulus>>,
    watches: Vec<String>,
}

/// One line of a testbench file.
#[derive(Debug, Clone)]
pub enum TestbenchItem {
    Steps(usize),
    Evals(usize),
    Clock(Clock),
    Watch(Vec<String>),
    At(usize, Vec<Stimulus>),
}

impl Default for Testbench {
    fn default() -> Testbench {
        Testbench {
            steps: DEFAULT_STEPS,
            evals_per_step: DEFAULT_EVALS_PER_STEP,
            clocks: vec![],
            schedule: BTreeMap::new(),
            watches: vec![],
        }
    }
}

impl Testbench {
    pub fn new() -> Testbench {
        Testbench::default()
    }

    pub fn from_items(items: Vec<TestbenchItem>) -> Testbench {
        let mut testbench = Testbench::default();
        for item in items {
            match item {
                TestbenchItem::Steps(steps) => testbench.steps = steps,
                TestbenchItem::Evals(evals_per_step) => testbench.evals_per_step = evals_per_step,
                TestbenchItem::Clock(clock) => testbench.clocks.push(clock),
                TestbenchItem::Watch(names) => testbench.watches.extend(names),
                TestbenchItem::At(step, stimuli) => testbench.schedule.entry(step).or_default().extend(stimuli),
            }
        }
        testbench
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_evals_per_step(mut self, evals_per_step: usize) -> Self {
        self.evals_per_step = evals_per_step;
        self
    }

    pub fn with_clock(mut self, name: &str, period: usize) -> Self {
        self.clocks.push(Clock {
            loc: Loc::unknown(),
            name: name.to_string(),
            period: period.max(1),
        });
        self
    }

    pub fn with_stimulus(mut self, step: usize, name: &str, value: Value) -> Self {
        let stimulus = Stimulus::Set(Loc::unknown(), name.to_string(), value);
        self.schedule.entry(step).or_default().push(stimulus);
        self
    }

    pub fn with_watch(mut self, name: &str) -> Self {
        self.watches.push(name.to_string());
        self
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn evals_per_step(&self) -> usize {
        self.evals_per_step
    }

    pub fn clocks(&self) -> &[Clock] {
        &self.clocks
    }

    pub fn watches(&self) -> &[String] {
        &self.watches
    }

    /// Everything applied before `step` is evaluated: clock toggles first, then
    /// the scheduled assignments in the order they were written.
    pub fn stimuli_at(&self, step: usize) -> Vec<Stimulus> {
        let mut stimuli: Vec<Stimulus> = self
            .clocks
            .iter()
            .filter(|clock| clock.ticks_at(step))
            .map(|clock| Stimulus::Toggle(clock.loc.clone(), clock.name.clone()))
            .collect();

        if let Some(scheduled) = self.schedule.get(&step) {
            stimuli.extend(scheduled.iter().cloned());
        }
        stimuli
    }

    /// Checks that every clock and stimulus drives a controlled component of `circuit`,
    /// and that every watched name exists.
    pub fn validate(&self, circuit: &Circuit) -> Result<(), CircuitError> {
        let clock_targets = self.clocks.iter().map(|clock| (clock.loc.clone(), clock.name.as_str()));
        let stimulus_targets = self.schedule.values().flatten().map(|stimulus| (stimulus.loc(), stimulus.name()));

        for (loc, name) in clock_targets.chain(stimulus_targets) {
            let component_id = circuit.resolve_at(&loc, name)?;
            if !circuit.component(component_id).is_controlled() {
                return Err(CircuitError::NotControlled(name.to_string()));
            }
        }

        for name in &self.watches {
            circuit.resolve(name)?;
        }

        for step in self.schedule.keys().filter(|step| **step >= self.steps) {
            warn!("Stimulus scheduled at step {step} will never be applied (only {} steps are run)", self.steps);
        }
        Ok(())
    }
}

pub fn parse_testbench(testbench: &str) -> Result<Testbench, CircuitError> {
    let source_info = SourceInfo::from_string(testbench);
    testbench_from_string(source_info, testbench)
}

pub fn load_testbench_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Testbench, CircuitError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|err| CircuitError::Io(format!("Couldn't read testbench {}: {err}", path.display())))?;
    let source_info = SourceInfo::from_file(path, &text);
    testbench_from_string(source_info, &text)
}

fn testbench_from_string(source_info: SourceInfo, text: &str) -> Result<Testbench, CircuitError> {
    let testbench = testbench_grammar::TestbenchParser::new()
        .parse(&source_info, text)
        .map_err(|err| parse_error(&source_info, err))?;
    debug!(
        "Parsed testbench: {} steps, {} passes per step, {} clocks, {} scheduled steps",
        testbench.steps,
        testbench.evals_per_step,
        testbench.clocks.len(),
        testbench.schedule.len(),
    );
    Ok(testbench)
}
