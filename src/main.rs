use clap::{ArgAction, Parser as ClapParser, Subcommand};
use simpleql::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::Level;

#[derive(ClapParser)]
#[command(name = "simpleql")]
#[command(about = "SimpleQL - parse field-mapping documents into their syntax tree")]
#[command(version)]
struct Cli {
    /// Log parser activity to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse SimpleQL source and print its tree as JSON
    Check {
        /// SimpleQL source (reads --file or stdin if not provided)
        source: Option<String>,

        /// Read the source from a file
        #[arg(short, long, conflicts_with = "source")]
        file: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't print the tree
        #[arg(long)]
        syntax_only: bool,

        /// Maximum nesting depth of { } blocks
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'simpleql docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            source,
            file,
            pretty,
            syntax_only,
            max_depth,
        } => run_check(source, file, pretty, syntax_only, max_depth),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run_check(
    source: Option<String>,
    file: Option<PathBuf>,
    pretty: bool,
    syntax_only: bool,
    max_depth: Option<usize>,
) -> Result<(), CliError> {
    let source = match (source, file) {
        (Some(s), _) => s,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        (None, None) => return Err(CliError::NoInput),
    };

    let options = CheckOptions {
        source,
        pretty,
        syntax_only,
        max_depth,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid(count) => println!("Syntax is valid ({} statements)", count),
        CheckResult::Success(json) => println!("{}", json),
    }
    Ok(())
}
