use calk::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_HEIGHT};

#[derive(clap::Parser, Debug)]
#[clap(about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub eval: EvalArgs,
}

#[derive(clap::Args, Debug)]
pub(crate) struct EvalArgs {
    /// Mathematical expression to evaluate. Example: 1/2 - (4 - cos(10+2))
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pub expr: String,

    /// Print the parsed tokens before the result
    #[arg(short = 't', long)]
    pub include_tokens: bool,

    /// Print the expression tree before the result
    #[arg(short = 'a', long)]
    pub include_ast: bool,

    /// Evaluate trigonometric functions using degrees instead of radians
    #[arg(short = 'd', long)]
    pub use_degrees: bool,

    /// Maximum nesting of parentheses and function calls
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Maximum height of the expression tree, which also bounds long operator chains
    #[arg(long, default_value_t = DEFAULT_MAX_HEIGHT)]
    pub max_height: usize,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Command {
    /// List the supported functions
    Functions,
}
