use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thimble_cli::{RenderArgs, check_cmd, init_logging, render_cmd};

#[derive(Parser)]
#[command(name = "thimble", version, about = "Render t:if / t:each / t:text markup templates")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template with a JSON context.
    Render {
        /// Path to the template
        template: PathBuf,
        /// JSON file whose top-level keys become template variables
        #[arg(long)]
        context: Option<PathBuf>,
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Write t:text values without escaping `&`, `<`, `>`
        #[arg(long)]
        no_escape: bool,
        /// Render nothing for t:each over an empty list instead of failing
        #[arg(long)]
        allow_empty_each: bool,
    },
    /// Check that every directive in a template is well formed.
    Check {
        /// Path to the template
        template: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Commands::Render {
            template,
            context,
            out,
            no_escape,
            allow_empty_each,
        } => render_cmd(&RenderArgs {
            template: &template,
            context: context.as_deref(),
            out: out.as_deref(),
            no_escape,
            allow_empty_each,
        })?,
        Commands::Check { template } => {
            check_cmd(&template)?;
            println!("ok");
        }
    }
    Ok(())
}
