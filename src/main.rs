use std::fs;

use clap::Parser;
use linecalc::{
    interpreter::document::{Interpreter, LineOutcome},
    util::format::format_value,
};
use tracing_subscriber::{Layer, Registry, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// linecalc evaluates the calculations found in a text document, line by
/// line, and prints the result of every line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells linecalc to read the document from a file instead of the command
    /// line.
    #[arg(short, long)]
    file: bool,

    /// Locale used for number formats and keywords, such as `en-US` or
    /// `fr-FR`.
    #[arg(short, long, default_value = "en-US")]
    locale: String,

    /// Prints how each line was evaluated on stderr.
    #[arg(short, long)]
    verbose: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    let document = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let interpreter = Interpreter::new(&args.locale).unwrap_or_else(|e| {
                                                        eprintln!("{e}");
                                                        std::process::exit(2);
                                                    });

    let evaluation = interpreter.evaluate(&document);

    let mut variables: Vec<_> = evaluation.variables.iter().collect();
    variables.sort_unstable_by_key(|(name, _)| *name);
    for (name, value) in variables {
        tracing::debug!(name, %value, "variable");
    }

    for line in evaluation.lines {
        match line.outcome {
            LineOutcome::NoResult => println!("{}:", line.line_number),
            LineOutcome::Value { value, .. } => {
                println!("{}: {}", line.line_number, format_value(&value, interpreter.culture()));
            },
            LineOutcome::Error { error, .. } => println!("{}: error: {error}", line.line_number),
        }
    }
}

/// Installs a `[LEVEL] message` logger on stderr.
fn init_logger(verbose: bool) {
    let filter = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };

    let layer = tracing_subscriber::fmt::layer().without_time()
                                                .with_target(false)
                                                .with_level(true)
                                                .with_ansi(false)
                                                .with_writer(std::io::stderr)
                                                .compact()
                                                .with_filter(filter);

    Registry::default().with(layer).init();
}
