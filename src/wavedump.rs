use super::*;

use std::fmt::Write;

/// Writes trace records as a Value Change Dump, one time unit per step.
pub struct Wavedump<'a> {
    module: String,
    date: String,
    records: &'a [TraceRecord],
    shortnames: Vec<String>,
}

impl<'a> Wavedump<'a> {
    pub fn new(module: &str, records: &'a [TraceRecord]) -> Self {
        let shortnames = (1..=records.len()).map(gen_shortname).collect();
        Wavedump {
            module: module.to_string(),
            date: chrono::Local::now().format("%a %b %e %H:%M:%S %Y").to_string(),
            records,
            shortnames,
        }
    }

    /// Overrides the `$date` section, which otherwise holds the current time.
    pub fn date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    pub fn write(&self, f: &mut dyn Write) -> std::fmt::Result {
        self.write_header(f)?;
        self.write_definitions(f)?;
        self.write_changes(f)
    }

    fn write_header(&self, f: &mut dyn Write) -> std::fmt::Result {
        writeln!(f, "$date")?;
        writeln!(f, "    {}", self.date)?;
        writeln!(f, "$end")?;

        writeln!(f, "$version")?;
        writeln!(f, "    gatesim {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(f, "$end")?;

        writeln!(f, "$timescale 1ns $end")?;
        Ok(())
    }

    fn write_definitions(&self, f: &mut dyn Write) -> std::fmt::Result {
        writeln!(f, "$scope module {} $end", self.module)?;
        for (record, shortname) in self.records.iter().zip(&self.shortnames) {
            writeln!(f, "    $var wire 1 {shortname} {} $end", record.name)?;
        }
        writeln!(f, "$upscope $end")?;
        writeln!(f, "$enddefinitions $end")?;
        Ok(())
    }

    fn write_changes(&self, f: &mut dyn Write) -> std::fmt::Result {
        let steps = self.records.iter().map(|record| record.values.len()).max().unwrap_or(0);
        if steps == 0 {
            return Ok(());
        }

        writeln!(f, "#0")?;
        writeln!(f, "$dumpvars")?;
        for (record, shortname) in self.records.iter().zip(&self.shortnames) {
            writeln!(f, "{}{shortname}", vcd_char(record.values.first().copied()))?;
        }
        writeln!(f, "$end")?;

        for step in 1..steps {
            let mut changes = vec![];
            for (record, shortname) in self.records.iter().zip(&self.shortnames) {
                let previous = record.values.get(step - 1).copied();
                let current = record.values.get(step).copied();
                if previous != current {
                    changes.push(format!("{}{shortname}", vcd_char(current)));
                }
            }

            if !changes.is_empty() {
                writeln!(f, "#{step}")?;
                for change in changes {
                    writeln!(f, "{change}")?;
                }
            }
        }
        writeln!(f, "#{steps}")?;
        Ok(())
    }
}

fn vcd_char(value: Option<Value>) -> char {
    match value {
        Some(Value::Bit(false)) => '0',
        Some(Value::Bit(true)) => '1',
        Some(Value::X) | None => 'x',
    }
}

/// VCD identifiers use the printable characters `!` to `~`.
fn gen_shortname(mut i: usize) -> String {
    let mut shortname = Vec::new();
    while i > 0 {
        shortname.push(((i % 94) + 33) as u8);
        i /= 94;
    }
    String::from_utf8_lossy(shortname.as_slice()).into()
}

#[test]
fn shortnames() {
    assert_eq!(gen_shortname(1), "\"");
    assert_eq!(gen_shortname(2), "#");
    assert_eq!(gen_shortname(93), "~");
    assert_eq!(gen_shortname(94), "!\"");
}
