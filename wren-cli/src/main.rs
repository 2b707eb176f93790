//! Wren CLI
//!
//! Tokenizes an HTML file or string and prints the token stream.
//!
//! - wren index.html                 # One token per line
//! - wren --json --html '<p>hi</p>'  # Tokens as JSON
//! - wren --errors index.html        # Tokens, then parse errors with line:column

use std::fs;
use std::io::{IsTerminal, stdout};
use std::path::PathBuf;

use clap::Parser;
use owo_colors::OwoColorize;
use wren_common::warning::clear_warnings;
use wren_html::{ParseErrorRecord, Token, Tokenizer, TokenizerConfig};

/// Wren: WHATWG HTML tokenizer
#[derive(Parser, Debug)]
#[command(name = "wren")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tokens of a file
    wren ./index.html

    # Tokenize an inline string
    wren --html '<p class="a">Hi &amp; bye</p>'

    # JSON output with parse errors
    wren --json --errors ./index.html

    # Treat <title>, <style> and <script> bodies as markup
    wren --no-content-model ./index.html
"#)]
struct Cli {
    /// Path to the HTML file to tokenize
    #[arg(value_name = "FILE", required_unless_present = "html")]
    path: Option<PathBuf>,

    /// Tokenize this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Print tokens as JSON
    #[arg(long)]
    json: bool,

    /// Print parse errors after the tokens
    #[arg(long)]
    errors: bool,

    /// Maximum number of parse errors to record
    #[arg(long, value_name = "N", default_value = "100")]
    max_errors: usize,

    /// Do not switch to RCDATA, RAWTEXT or script data after the start tags that need it
    #[arg(long)]
    no_content_model: bool,

    /// Echo parse errors to stderr as they are found
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let html = load_html(&cli)?;

    let config = TokenizerConfig {
        max_errors: cli.max_errors,
        switch_content_models: !cli.no_content_model,
        echo_errors: cli.verbose,
        ..TokenizerConfig::default()
    };

    clear_warnings();
    let mut tokenizer = Tokenizer::with_config(&html, config);
    let tokens: Vec<Token> = tokenizer.by_ref().collect();
    let errors = tokenizer.take_errors();

    if cli.json {
        let output = if cli.errors {
            serde_json::json!({ "tokens": tokens, "errors": errors.as_slice() })
        } else {
            serde_json::to_value(&tokens)?
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let color = stdout().is_terminal();
    for token in &tokens {
        print_token(token, color);
    }

    if cli.errors {
        println!("\n=== Parse Errors ({}) ===", errors.len());
        for record in &errors {
            print_error(&tokenizer, record, color);
        }
    }

    Ok(())
}

/// Read the input named on the command line.
fn load_html(cli: &Cli) -> anyhow::Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Error reading file '{}': {e}", path.display()))
    } else {
        anyhow::bail!("Nothing to tokenize: pass a file path or --html")
    }
}

fn print_token(token: &Token, color: bool) {
    if !color {
        println!("{token}");
        return;
    }
    match token {
        Token::StartTag { .. } | Token::EndTag { .. } => println!("{}", token.cyan()),
        Token::Comment { .. } => println!("{}", token.dimmed()),
        Token::Doctype { .. } | Token::CData { .. } => println!("{}", token.magenta()),
        Token::Character { .. } => println!("{token}"),
        Token::EndOfFile => println!("{}", token.bold()),
    }
}

fn print_error(tokenizer: &Tokenizer<'_>, record: &ParseErrorRecord, color: bool) {
    let (line, column) = tokenizer.line_and_column(record.position);
    let location = format!("{line}:{column}");
    if color {
        println!("  {} {}", location.yellow(), record.message());
    } else {
        println!("  {location} {}", record.message());
    }
}
