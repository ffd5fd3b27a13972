use gatesim::*;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Netlist to simulate.
    filename: String,

    /// Testbench file. Defaults to the netlist's name with a .tb extension, if present.
    #[arg(long)]
    tb: Option<String>,

    /// Number of steps to run. Overrides the testbench.
    #[arg(long)]
    steps: Option<usize>,

    /// Settling passes per step. Overrides the testbench.
    #[arg(long)]
    evals: Option<usize>,

    /// Comma-separated signals to report. Overrides the testbench.
    #[arg(long, value_delimiter = ',')]
    watch: Vec<String>,

    /// Also write a VCD file.
    #[arg(long)]
    vcd: Option<String>,

    /// Print traces as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Reject netlists that declare the same name twice.
    #[arg(long, default_value_t = false)]
    strict: bool,

    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.debug)?;

    let netlist = load_netlist_from_file(&args.filename)?;
    let circuit = if args.strict {
        Circuit::build_strict(&netlist)?
    } else {
        Circuit::build(&netlist)?
    };

    let testbench_filename = args.tb.clone().or_else(|| testbench_for(&args.filename));
    let mut testbench = match testbench_filename {
        Some(tb_filename) => {
            log::info!("Using testbench file: {tb_filename}");
            load_testbench_from_file(&tb_filename)?
        },
        None => {
            log::info!("No testbench file");
            Testbench::default()
        },
    };
    if let Some(steps) = args.steps {
        testbench = testbench.with_steps(steps);
    }
    if let Some(evals) = args.evals {
        testbench = testbench.with_evals_per_step(evals);
    }

    let mut sim = Sim::new(Arc::new(circuit), testbench.evals_per_step());
    let mut waveform = Waveform::new();
    sim.run(&testbench, &mut waveform)?;

    let watches: Vec<&str> = if !args.watch.is_empty() {
        args.watch.iter().map(|name| name.as_str()).collect()
    } else if !testbench.watches().is_empty() {
        testbench.watches().iter().map(|name| name.as_str()).collect()
    } else {
        sim.circuit().names()
    };
    let records = waveform.traces(&watches)?;

    if args.json {
        let json: Vec<serde_json::Value> = records.iter().map(|record| record.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        let width = records.iter().map(|record| record.name.len()).max().unwrap_or(0);
        for record in &records {
            println!("{record:width$}");
        }
    }

    if let Some(vcd_filename) = &args.vcd {
        let mut out = String::new();
        Wavedump::new("top", &records).write(&mut out)?;
        std::fs::write(vcd_filename, out).with_context(|| format!("Couldn't write {vcd_filename}"))?;
        log::info!("Wrote {vcd_filename}");
    }
    Ok(())
}

fn testbench_for(filename: &str) -> Option<String> {
    let path = std::path::Path::new(filename);
    let tb_path = path.with_extension("tb");
    if tb_path == path {
        return None;
    }
    let exists = std::fs::metadata(&tb_path).map(|metadata| metadata.is_file()).unwrap_or(false);

    if exists {
        tb_path.into_os_string().into_string().ok()
    } else {
        None
    }
}

fn init_logging(debug: bool) -> anyhow::Result<()> {
    use chrono::{DateTime, Utc};

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            let now: DateTime<Utc> = Utc::now();
            out.finish(format_args!(
                "[{} {} {}] {}",
                now.format("%Y-%m-%dT%H:%M:%S%.fZ"),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    let level = std::env::var("LEVEL").unwrap_or_default().to_string();

    if level == "TRACE" {
        dispatch = dispatch.level(log::LevelFilter::Trace);
    } else if debug || level == "DEBUG" {
        dispatch = dispatch.level(log::LevelFilter::Debug);
    } else {
        dispatch = dispatch.level(log::LevelFilter::Info);
    }

    dispatch.apply()?;
    Ok(())
}
