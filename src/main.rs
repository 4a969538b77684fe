mod cli;

use std::process;

use calk::{Config, Error, Evaluator, Token};
use clap::{CommandFactory, Parser};
use log::debug;

use cli::{Cli, Command, EvalArgs};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Functions) => {
            for name in calk::SUPPORTED_FUNCTIONS {
                println!("{name}");
            }
        }
        None if cli.eval.expr.trim().is_empty() => {
            if let Err(why) = Cli::command().print_help() {
                eprintln!("Failed to print help: {why}");
            }
            process::exit(2);
        }
        None => {
            if let Err(why) = run(&cli.eval) {
                report(&cli.eval.expr, &why);
                process::exit(1);
            }
        }
    }
}

fn run(args: &EvalArgs) -> Result<(), Error> {
    let config = Config::new()
        .with_degrees(args.use_degrees)
        .with_max_depth(args.max_depth)
        .with_max_height(args.max_height);
    debug!("{config:?}");

    let src = args.expr.as_str();
    let tokens = calk::tokenize(src)?;
    if args.include_tokens {
        println!("Tokens : {}\n", render_tokens(&tokens));
    }

    let tree = calk::parse(src, tokens, &config)?;
    if args.include_ast {
        println!("The Abstract Syntax Tree");
        println!("{tree}");
    }

    if let Some(value) = Evaluator::new(&config).eval_tree(&tree)? {
        println!("{value}");
    }
    Ok(())
}

fn render_tokens(tokens: &[Token]) -> String {
    let tokens: Vec<String> = tokens.iter().map(Token::to_string).collect();
    format!("[{}]", tokens.join(" "))
}

/// Prints the error, and for lex/parse errors the input with a `^` under the offending character.
fn report(src: &str, why: &Error) {
    eprintln!("{why}");

    if let Some(column) = why.position() {
        eprintln!("  {src}");
        eprintln!("  {}^", " ".repeat(column));
    }
}
