use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use tasq_lang::cli::{self, CliError, FilterOptions, FilterResult};

#[derive(ClapParser)]
#[command(name = "tasq")]
#[command(about = "Tasq - a boolean query language for filtering tagged task lists")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a JSON task list with a query
    Filter {
        /// The query to run, e.g. "tag:work AND NOT completed:true"
        query: String,

        /// JSON task list (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Rank matches by relevance score instead of input order
        #[arg(short, long)]
        scored: bool,

        /// Keep at most N results
        #[arg(short, long)]
        limit: Option<usize>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't execute
        #[arg(long)]
        syntax_only: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Filter {
            query,
            input,
            scored,
            limit,
            pretty,
            syntax_only,
        } => run_filter(query, input, scored, limit, pretty, syntax_only),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_filter(
    query: String,
    input: Option<String>,
    scored: bool,
    limit: Option<usize>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = FilterOptions {
        query,
        input,
        scored,
        limit,
        syntax_only,
    };

    match cli::execute_filter(&options)? {
        FilterResult::SyntaxValid => println!("Syntax is valid"),
        FilterResult::Matches(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }
            .map_err(CliError::Json)?;
            println!("{}", json);
        }
    }
    Ok(())
}
