use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use combinate::formatting::{render_result, Identity, Render, Terminal};
use combinate::grammar::{evaluate, expression};
use combinate::observe::Tracer;
use combinate::parsing::{Options, ParseState};
use combinate::problem::full_syntax_error;
use combinate::{output, source};

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("combinate")
        .version(VERSION)
        .propagate_version(true)
        .about("Parse and evaluate arithmetic with parser combinators.")
        .disable_help_subcommand(true)
        .subcommand(
            arguments(Command::new("parse").about("Parse the given expression and show the resulting tree")),
        )
        .subcommand(
            arguments(Command::new("evaluate").about("Parse the given expression and compute its value")),
        )
        .get_matches();

    let (evaluating, submatches) = match matches.subcommand() {
        Some(("parse", submatches)) => (false, submatches),
        Some(("evaluate", submatches)) => (true, submatches),
        Some(_) => {
            println!("No valid subcommand was used");
            std::process::exit(1);
        }
        None => {
            println!("usage: combinate [COMMAND] ...");
            println!("Try '--help' for more information.");
            std::process::exit(0);
        }
    };

    let level = log_level(submatches.get_flag("trace"), submatches.get_flag("debug"));

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Unable to install logging: {}", error);
    }

    let raw_output = submatches.get_flag("raw-control-chars");

    let code = if raw_output
        || std::io::stdout()
            .is_terminal()
    {
        run(evaluating, submatches, &Terminal)
    } else {
        run(evaluating, submatches, &Identity)
    };

    std::process::exit(code);
}

// Tracing a run reports each transition at TRACE and DEBUG, so it needs
// the most verbose level.
fn log_level(trace: bool, debug: bool) -> Level {
    if trace {
        Level::TRACE
    } else if debug {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

fn arguments(command: Command) -> Command {
    command
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .conflicts_with("expression")
                .help("Read the expression from the given file, or from standard input if '-'."),
        )
        .arg(
            Arg::new("traverse")
                .long("traverse")
                .action(ArgAction::SetTrue)
                .help("Let literal matches scan forward to their first occurrence rather than being anchored."),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .action(ArgAction::SetTrue)
                .help("Log every state transition, then report the number of transformations and the final state on completion."),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Emit debug logging to standard error."),
        )
        .arg(
            Arg::new("raw-control-chars")
                .short('R')
                .long("raw-control-chars")
                .action(ArgAction::SetTrue)
                .help("Emit ANSI escape codes for highlighting even if output is redirected to a pipe or file."),
        )
        .arg(
            Arg::new("expression")
                .required_unless_present("file")
                .help("The arithmetic expression to parse."),
        )
}

fn run(evaluating: bool, submatches: &ArgMatches, renderer: &impl Render) -> i32 {
    let (name, content) = match submatches.get_one::<String>("file") {
        Some(filename) => {
            let filename = Path::new(filename);
            match source::load(filename) {
                Ok(content) => (filename.display().to_string(), content),
                Err(error) => {
                    eprintln!("{}", error);
                    return 1;
                }
            }
        }
        None => match submatches.get_one::<String>("expression") {
            Some(expression) => ("<expression>".to_string(), expression.clone()),
            None => {
                eprintln!("No expression given");
                return 1;
            }
        },
    };

    let content = content.trim_end();

    let mut options = Options::new().traverse(submatches.get_flag("traverse"));
    let tracer = if submatches.get_flag("trace") {
        let tracer = Arc::new(Tracer::verbose());
        options = options.observe(tracer.clone());
        Some(tracer)
    } else {
        None
    };

    debug!(?options);

    let state = expression().run_with(content, &options);

    if let Some(tracer) = tracer {
        let statistics = tracer.statistics();
        eprintln!(
            "{} transformations, maximum depth {}",
            statistics.transformations, statistics.max_depth
        );
        report(&state);
    }

    if state.is_error() || state.is_incomplete_match() {
        eprintln!("{}", full_syntax_error(&state, &name, renderer));
        return 1;
    }

    if !evaluating {
        println!("{}", render_result(state.result(), renderer));
        return 0;
    }

    let value = match state.result() {
        Some(value) => value,
        None => {
            eprintln!("Nothing to evaluate");
            return 1;
        }
    };

    match evaluate(value) {
        Ok(number) => {
            println!("{}", number);
            0
        }
        Err(error) => {
            eprintln!("{}", error);
            1
        }
    }
}

fn report(state: &ParseState) {
    match output::report(state, true) {
        Ok(text) => eprint!("{}", text),
        Err(error) => eprintln!("Unable to render state: {}", error),
    }
}
