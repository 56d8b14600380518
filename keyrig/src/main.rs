//! Main entry point for the keyrig CLI

use anyhow::Result;
use clap::CommandFactory;
use clap::Parser;
use clap_complete::{Generator, generate};
use std::io;

use keyrig::cli::{Cli, Commands};
use keyrig::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Info { file } => commands::info::execute(&file),
        Commands::Validate { file } => commands::validate::execute(&file),
        Commands::Pose {
            file,
            state,
            progress,
            mode,
            attach_bone,
            attach_offset,
            world,
            json,
        } => commands::pose::execute(&commands::pose::PoseArgs {
            file,
            state,
            progress,
            mode: mode.map(Into::into),
            attach_bone,
            attach_offset: attach_offset.into(),
            world,
            json,
        }),
        Commands::Export { input, output } => commands::export::execute(&input, output.as_deref()),
        Commands::Layouts => commands::info::list_layouts(),
        Commands::Completions { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(())
        }
    }
}

/// Install env_logger at the level picked by `-v`/`-q`; `RUST_LOG` still wins
fn init_logger(verbose: u8, quiet: bool) {
    let level = match (verbose, quiet) {
        (0, true) => log::LevelFilter::Error,
        (0, false) => log::LevelFilter::Warn,
        (1, _) => log::LevelFilter::Info,
        (2, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}
