use super::*;

const DLATCH: &str = "
    clock     : controlled
    A         : controlled
    E         : controlled
    gated_clk : and(clock, E)
    not_d_in  : not(A)
    d_nand_a  : nand(A, gated_clk)
    q         : nand(d_nand_a, q_)
    d_nand_c  : nand(not_d_in, gated_clk)
    q_        : nand(d_nand_c, q)
";

#[test]
fn parse_dlatch() {
    let netlist = load_netlist_from_string(DLATCH).unwrap();
    let decls = netlist.decls();
    assert_eq!(decls.len(), 9);

    assert_eq!(decls[0].name, "clock");
    assert_eq!(decls[0].gate, Gate::Controlled);
    assert_eq!(decls[3].name, "gated_clk");
    assert_eq!(decls[3].gate, Gate::BinOp(BinOp::And, "clock".to_string(), "E".to_string()));
    assert_eq!(decls[4].gate, Gate::Not("A".to_string()));
    assert_eq!(decls[8].name, "q_");
    assert_eq!(decls[8].gate, Gate::BinOp(BinOp::Nand, "d_nand_c".to_string(), "q".to_string()));
    assert!(decls.iter().all(|decl| decl.init.is_none()));
}

#[test]
fn parse_every_operator() {
    let netlist = load_netlist_from_string("
        a : controlled
        b : controlled
        n : not(a)
        w : and(a, b)
        x : nand(a, b)
        y : or(a, b)
        z : nor(a, b)
        u : xor(a, b)
        v : xnor(a, b)
    ").unwrap();

    let operators: Vec<&str> = netlist.decls().iter().map(|decl| decl.gate.operator()).collect();
    assert_eq!(operators, vec!["controlled", "controlled", "not", "and", "nand", "or", "nor", "xor", "xnor"]);
}

#[test]
fn parse_xor_alias() {
    let netlist = load_netlist_from_string("
        a : controlled
        b : controlled
        c : xorR(a, b)
    ").unwrap();
    assert_eq!(netlist.decls()[2].gate, Gate::BinOp(BinOp::Xor, "a".to_string(), "b".to_string()));
}

#[test]
fn parse_round_trip() {
    let netlist = load_netlist_from_string(DLATCH).unwrap();
    let text = netlist.to_string();
    let reparsed = load_netlist_from_string(&text).unwrap();

    let summary = |netlist: &Netlist| -> Vec<(String, Gate<String>, Option<bool>)> {
        netlist.decls().iter().map(|decl| (decl.name.clone(), decl.gate.clone(), decl.init)).collect()
    };
    assert_eq!(summary(&netlist), summary(&reparsed));
}

#[test]
fn parse_initial_values() {
    let netlist = load_netlist_from_string("
        s : controlled = 1
        q : nand(s, q) = 0
        r : not(q)
    ").unwrap();
    let inits: Vec<Option<bool>> = netlist.decls().iter().map(|decl| decl.init).collect();
    assert_eq!(inits, vec![Some(true), Some(false), None]);
    assert_eq!(netlist.decls()[0].to_string(), "s : controlled = 1");
}

#[test]
fn parse_comments_and_whitespace() {
    let netlist = load_netlist_from_string("
        // inputs
        a : controlled   // the only input
        b:not(a)
    ").unwrap();
    assert_eq!(netlist.decls().len(), 2);
    assert_eq!(netlist.decls()[1].gate, Gate::Not("a".to_string()));
}

#[test]
fn parse_keywords_as_names() {
    let netlist = load_netlist_from_string("
        and : controlled
        not : not(and)
    ").unwrap();
    assert_eq!(netlist.decls()[0].name, "and");
    assert_eq!(netlist.decls()[1].gate, Gate::Not("and".to_string()));
}

#[test]
fn parse_errors() {
    let bad_netlists = vec![
        "",
        "a : controlled(b)",
        "a : controlled\nb : not(a, a)",
        "a : controlled\nb : and(a)",
        "a : controlled\nb : and(a, a, a)",
        "a : controlled\nb : mux(a, a)",
        "a : controlled\nb : not a",
        "a controlled",
        "a : controlled = 2",
        "a : controlled )",
    ];

    for text in bad_netlists {
        match load_netlist_from_string(text) {
            Err(CircuitError::ParseError(_loc, _message)) => (),
            other => panic!("{text:?} should fail to parse, got {other:?}"),
        }
    }
}

#[test]
fn parse_error_location() {
    let err = load_netlist_from_string("a : controlled\nb : mux(a, a)\n").unwrap_err();
    let loc = err.loc();
    assert_eq!(loc.start().line(), 2);
    assert_eq!(loc.start().col(), 5);
    assert_eq!(loc.end().col(), 8);
}

#[test]
fn build_unknown_component() {
    let netlist = load_netlist_from_string("
        a : controlled
        b : and(a, missing)
    ").unwrap();

    match Circuit::build(&netlist) {
        Err(CircuitError::UnknownComponent(loc, name)) => {
            assert_eq!(name, "missing");
            assert_eq!(loc.start().line(), 3);
        },
        other => panic!("expected an unknown component, got {other:?}"),
    }
}

#[test]
fn build_forward_references() {
    let netlist = load_netlist_from_string(DLATCH).unwrap();
    let circuit = Circuit::build(&netlist).unwrap();

    let q = circuit.resolve("q").unwrap();
    let q_ = circuit.resolve("q_").unwrap();
    let d_nand_a = circuit.resolve("d_nand_a").unwrap();
    assert_eq!(circuit.component(q).gate, Gate::BinOp(BinOp::Nand, d_nand_a, q_));
    assert_eq!(circuit.component(q_).gate.inputs(), vec![&circuit.resolve("d_nand_c").unwrap(), &q]);
    assert_eq!(circuit.len(), 9);
    assert_eq!(circuit.controlled(), vec![0, 1, 2]);
    assert!(circuit.duplicates().is_empty());
}

#[test]
fn build_duplicates() {
    let netlist = load_netlist_from_string("
        a : controlled
        b : not(a)
        b : and(a, a)
        c : not(b)
    ").unwrap();

    let circuit = Circuit::build(&netlist).unwrap();
    assert_eq!(circuit.len(), 4);
    assert_eq!(circuit.resolve("b").unwrap(), 2);
    assert_eq!(circuit.component(3).gate, Gate::Not(2));
    assert_eq!(circuit.duplicates(), vec!["b"]);
    assert_eq!(circuit.names(), vec!["a", "b", "c"]);

    match Circuit::build_strict(&netlist) {
        Err(CircuitError::DuplicateComponent(loc, name)) => {
            assert_eq!(name, "b");
            assert_eq!(loc.start().line(), 4);
        },
        other => panic!("expected a duplicate component, got {other:?}"),
    }
}

#[test]
fn names_follow_the_index() {
    let netlist = load_netlist_from_string("
        a : controlled
        b : controlled
        a : not(b)
        c : and(a, b)
        a : or(b, c)
    ").unwrap();

    let circuit = Circuit::build(&netlist).unwrap();
    assert_eq!(circuit.names(), vec!["b", "c", "a"]);
    assert_eq!(circuit.resolve("a").unwrap(), 4);
    assert_eq!(circuit.duplicates(), vec!["a"]);
}

#[test]
fn resolve_unknown() {
    let circuit = Circuit::build(&load_netlist_from_string(DLATCH).unwrap()).unwrap();
    assert!(matches!(circuit.resolve("nope"), Err(CircuitError::UnknownComponent(_, _))));
}

#[test]
fn parse_testbench_file() {
    let testbench = parse_testbench("
        // d latch
        steps 12;
        evals 3;
        clock clock;
        clock slow every 4;
        watch clock, A, q;
        at 0 { E = 1; }
        at 1 {
            E = 0;
            A = 1;
        }
        at 5 { A = X; }
    ").unwrap();

    assert_eq!(testbench.steps(), 12);
    assert_eq!(testbench.evals_per_step(), 3);
    assert_eq!(testbench.clocks().len(), 2);
    assert_eq!(testbench.clocks()[1].period, 4);
    assert_eq!(testbench.watches(), &["clock".to_string(), "A".to_string(), "q".to_string()]);

    let names = |stimuli: Vec<Stimulus>| -> Vec<String> {
        stimuli.iter().map(|stimulus| stimulus.name().to_string()).collect()
    };
    assert_eq!(names(testbench.stimuli_at(0)), vec!["clock", "slow", "E"]);
    assert_eq!(names(testbench.stimuli_at(1)), vec!["clock", "E", "A"]);
    assert_eq!(names(testbench.stimuli_at(2)), vec!["clock"]);
    assert_eq!(names(testbench.stimuli_at(4)), vec!["clock", "slow"]);

    match &testbench.stimuli_at(5)[1] {
        Stimulus::Set(_loc, name, value) => {
            assert_eq!(name, "A");
            assert_eq!(*value, Value::X);
        },
        other => panic!("expected an assignment, got {other:?}"),
    }
}

#[test]
fn parse_testbench_defaults() {
    let testbench = parse_testbench("").unwrap();
    assert_eq!(testbench.steps(), DEFAULT_STEPS);
    assert_eq!(testbench.evals_per_step(), DEFAULT_EVALS_PER_STEP);
    assert!(testbench.clocks().is_empty());
    assert!(testbench.stimuli_at(0).is_empty());
}

#[test]
fn parse_testbench_errors() {
    let bad_testbenches = vec![
        "clock clk every 0;",
        "at 0 { a = 2; }",
        "at 0 { a = 1 }",
        "steps;",
        "steps -1;",
        "watch;",
        "at { a = 1; }",
    ];

    for text in bad_testbenches {
        match parse_testbench(text) {
            Err(CircuitError::ParseError(_loc, _message)) => (),
            other => panic!("{text:?} should fail to parse, got {other:?}"),
        }
    }
}

#[test]
fn validate_testbench() {
    let circuit = Circuit::build(&load_netlist_from_string(DLATCH).unwrap()).unwrap();

    assert!(Testbench::new().with_clock("clock", 1).with_stimulus(0, "A", true.into()).validate(&circuit).is_ok());

    let computed = Testbench::new().with_stimulus(3, "q", true.into());
    assert!(matches!(computed.validate(&circuit), Err(CircuitError::NotControlled(_))));

    let missing = Testbench::new().with_clock("clk", 1);
    assert!(matches!(missing.validate(&circuit), Err(CircuitError::UnknownComponent(_, _))));

    let bad_watch = Testbench::new().with_watch("nope");
    assert!(matches!(bad_watch.validate(&circuit), Err(CircuitError::UnknownComponent(_, _))));
}
