use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use odfa::{
    Automaton, AutomatonKind, BuildOptions, DEFAULT_MAX_DEPTH, Parser as PatternParser,
};

#[derive(Parser)]
#[command(name = "odfa")]
#[command(about = "Odfa - build NFA, DFA and reduced DFA automata from regexes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the syntax tree of a pattern
    Tree {
        /// The regex pattern
        pattern: String,
        /// Maximum number of nested groups
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Build an automaton and print its tables
    Build {
        /// The regex pattern
        pattern: String,
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Test whether an input is recognized
    Test {
        /// The regex pattern
        pattern: String,
        /// The input string to test
        input: String,
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Print the automaton as a node/edge graph in JSON
    Export {
        /// The regex pattern
        pattern: String,
        #[command(flatten)]
        build: BuildArgs,
        /// Indent the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Which automaton to build
    #[arg(short, long, value_enum, default_value_t = Kind::Odfa)]
    kind: Kind,
    /// Maximum number of NFA nodes
    #[arg(long)]
    max_nodes: Option<usize>,
    /// Maximum number of DFA states
    #[arg(long)]
    max_states: Option<usize>,
    /// Maximum number of nested groups
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Nfa,
    Dfa,
    Odfa,
}

impl From<Kind> for AutomatonKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Nfa => AutomatonKind::Nfa,
            Kind::Dfa => AutomatonKind::Dfa,
            Kind::Odfa => AutomatonKind::Odfa,
        }
    }
}

impl BuildArgs {
    fn options(&self) -> BuildOptions {
        BuildOptions {
            max_nfa_nodes: self.max_nodes,
            max_dfa_states: self.max_states,
            max_depth: self.max_depth,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tree { pattern, max_depth } => cmd_tree(&pattern, max_depth),
        Commands::Build { pattern, build } => cmd_build(&pattern, &build),
        Commands::Test {
            pattern,
            input,
            build,
        } => cmd_test(&pattern, &input, &build),
        Commands::Export {
            pattern,
            build,
            pretty,
        } => cmd_export(&pattern, &build, pretty),
    }
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), e);
    std::process::exit(1);
}

fn build_or_exit(pattern: &str, args: &BuildArgs) -> Automaton {
    match Automaton::build(args.kind.into(), pattern, &args.options()) {
        Ok(automaton) => automaton,
        Err(e) => fail(e),
    }
}

fn cmd_tree(pattern: &str, max_depth: usize) {
    println!("{}", "Parsing pattern...".bold());
    println!("  Pattern: {}", pattern.cyan());
    println!();

    match PatternParser::with_max_depth(pattern, max_depth).parse() {
        Ok(tree) => {
            println!("{}", "Tree:".bold());
            println!("  {:?}", tree);
            println!("{}", "Rendered:".bold());
            println!("  {}", tree.to_string().green());
        }
        Err(e) => fail(e),
    }
}

fn cmd_build(pattern: &str, args: &BuildArgs) {
    let automaton = build_or_exit(pattern, args);
    automaton.report();
}

fn cmd_test(pattern: &str, input: &str, args: &BuildArgs) {
    println!("{}", "Testing pattern...".bold());
    println!("  Pattern: {}", pattern.cyan());
    println!("  Input:   {}", input.yellow());
    println!();

    let automaton = build_or_exit(pattern, args);
    let result = match automaton.recognize(input) {
        Ok(result) => result,
        Err(e) => fail(e),
    };

    println!("{}", "Route:".bold());
    for step in &result.route {
        println!("  {}", step);
    }
    println!();

    if result.recognized {
        println!("{}", "✓ Recognized".green().bold());
        std::process::exit(0);
    } else {
        println!("{}", "✗ Not recognized".red());
        std::process::exit(1);
    }
}

fn cmd_export(pattern: &str, args: &BuildArgs, pretty: bool) {
    let graph = build_or_exit(pattern, args).graph();
    let json = if pretty {
        graph.to_json_pretty()
    } else {
        graph.to_json()
    };

    match json {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}
