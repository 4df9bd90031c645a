use mimalloc::MiMalloc;
use std::process::ExitCode;
use trigger_core::{Clock, MonotonicClock};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: pacer <scenario.toml>...";

fn main() -> ExitCode {
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() || paths.iter().any(|arg| arg == "-h" || arg == "--help") {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    }

    let mut failed = false;
    for path in &paths {
        let clock = MonotonicClock::new();
        let outcome = match scenario::load_file(path).and_then(|scenario| scenario.run()) {
            Ok(outcome) => outcome,
            Err(err) => {
                eprintln!("{path}: {err}");
                return ExitCode::from(2);
            }
        };

        let name = if outcome.name.is_empty() {
            path.as_str()
        } else {
            outcome.name.as_str()
        };
        println!("# {name}");
        for event in &outcome.trace {
            println!("{event}");
        }
        for failure in &outcome.failures {
            println!("FAIL {failure}");
        }
        eprintln!("{name}: replayed in {}ms", clock.now());
        failed |= !outcome.passed();
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
