use super::*;

/// Receives a snapshot of the circuit after every simulation step.
pub trait Trace {
    /// `values` holds the state of every component, in declaration order.
    fn sample(&mut self, circuit: &Circuit, values: &[Value]);

    /// The recorded time series for each of `names`, in the order given.
    fn traces(&self, names: &[&str]) -> Result<Vec<TraceRecord>, CircuitError>;
}

/// The values one signal took, one per step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRecord {
    pub name: String,
    pub values: Vec<Value>,
}

impl TraceRecord {
    /// The values as a string of `0`, `1` and `X`.
    pub fn bits(&self) -> String {
        self.values.iter().map(|value| value.to_char()).collect()
    }

    pub fn wave(&self) -> String {
        self.values
            .iter()
            .map(|value| match value {
                Value::Bit(true) => '‾',
                Value::Bit(false) => '_',
                Value::X => 'x',
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let values: Vec<String> = self.values.iter().map(|value| value.to_string()).collect();
        serde_json::json!({
            "name": self.name,
            "values": values,
        })
    }
}

/// Pads the name to the formatter's width, so `{record:8}` lines up a column of waves.
impl std::fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = f.width().unwrap_or(0);
        write!(f, "{:width$} {}", self.name, self.wave())
    }
}

/// Records every indexed component on every step.
#[derive(Debug, Default)]
pub struct Waveform {
    samples: usize,
    series: BTreeMap<String, Vec<Value>>,
}

impl Waveform {
    pub fn new() -> Waveform {
        Waveform::default()
    }

    pub fn samples(&self) -> usize {
        self.samples
    }
}

impl Trace for Waveform {
    fn sample(&mut self, circuit: &Circuit, values: &[Value]) {
        // Later declarations overwrite earlier ones of the same name, as in the index.
        let mut snapshot: BTreeMap<&str, Value> = BTreeMap::new();
        for (component, value) in circuit.components().iter().zip(values) {
            snapshot.insert(component.name(), *value);
        }

        let samples = self.samples;
        for (name, value) in snapshot {
            let series = self.series.entry(name.to_string()).or_insert_with(|| vec![Value::X; samples]);
            series.push(value);
        }
        self.samples += 1;
    }

    fn traces(&self, names: &[&str]) -> Result<Vec<TraceRecord>, CircuitError> {
        let mut records = vec![];
        for name in names {
            match self.series.get(*name) {
                Some(values) => records.push(TraceRecord {
                    name: name.to_string(),
                    values: values.clone(),
                }),
                None => return Err(CircuitError::UnknownComponent(Loc::unknown(), name.to_string())),
            }
        }
        Ok(records)
    }
}
