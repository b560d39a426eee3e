use std::sync::{Arc, Mutex};

use combinate::grammar::expression;
use combinate::observe::{Observer, Tracer};
use combinate::parsing::*;

// Remembers every transition it sees.
#[derive(Default)]
struct Recorder {
    derived: Mutex<Vec<(usize, usize)>>,
    transitions: Mutex<Vec<(String, usize, usize)>>,
}

impl Observer for Recorder {
    fn derived(&self, state: &ParseState) {
        self.derived
            .lock()
            .unwrap()
            .push((state.index(), state.furthest_index()));
    }

    fn leave(&self, name: &str, before: &ParseState, after: &ParseState) {
        self.transitions
            .lock()
            .unwrap()
            .push((
                name.to_string(),
                before.furthest_index(),
                after.furthest_index(),
            ));
    }
}

const INPUTS: [&str; 6] = ["12+3+45", "(1+(2+3))", "(1+2", "2 ** pi", "1+2)", "abc"];

#[test]
fn furthest_index_never_falls() {
    for input in INPUTS {
        let recorder = Arc::new(Recorder::default());
        let options = Options::new().observe(recorder.clone());

        let state = expression().run_with(input, &options);

        let transitions = recorder
            .transitions
            .lock()
            .unwrap();
        assert!(!transitions.is_empty());

        for (name, before, after) in transitions.iter() {
            assert!(
                after >= before,
                "{} lowered furthest index from {} to {} on '{}'",
                name,
                before,
                after,
                input
            );
        }

        let derived = recorder
            .derived
            .lock()
            .unwrap();
        for (index, furthest) in derived.iter() {
            assert!(furthest >= index);
        }

        let deepest = transitions
            .iter()
            .map(|(_, _, after)| *after)
            .max()
            .unwrap();
        assert_eq!(state.furthest_index(), deepest, "on '{}'", input);
    }
}

#[test]
fn observing_changes_nothing() {
    for input in INPUTS {
        let plain = expression().run(input);

        let tracer = Arc::new(Tracer::verbose());
        let traced = expression().run_with(input, &Options::new().observe(tracer.clone()));

        assert_eq!(plain, traced, "observed run differed on '{}'", input);
        assert!(
            tracer
                .statistics()
                .transformations
                > 0
        );
    }
}

#[test]
fn tracer_statistics() {
    let tracer = Arc::new(Tracer::new());
    let options = Options::new().observe(tracer.clone());

    literal("a").run_with("a", &options);
    let flat = tracer.statistics();
    assert_eq!(flat.max_depth, 1);
    assert!(flat.transformations >= 1);

    tracer.reset();

    expression().run_with("((1))", &options);
    let nested = tracer.statistics();
    assert!(nested.max_depth > 6);
    assert!(nested.transformations > flat.transformations);
}
