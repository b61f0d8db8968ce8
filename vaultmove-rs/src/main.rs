//! vaultmove CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use vaultmove::cli::args::{Cli, Commands};
use vaultmove::cli::output::Output;
use vaultmove::cli::{index, links, move_notes, resolve, scan};
use vaultmove::config::Config;
use vaultmove::error::{ExitCode as VaultExitCode, VaultError};
use vaultmove::logging;
use vaultmove::vault::Vault;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<VaultExitCode, VaultError> {
    let config = Config::load(cli.config.as_deref())?;
    logging::init(&config.logging.level, cli.verbose, cli.quiet);

    let mut scan_config = config.scan.clone();
    if let Some(selection) = cli.command.selection() {
        selection.apply(&mut scan_config);
    }

    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let vault = Vault::open(vault_path, scan_config)?;

    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Scan(args) => scan::run(&vault, args, &output),
        Commands::Move(args) => move_notes::run(&vault, &config, args, &output),
        Commands::Links(args) => links::run(&vault, args, &output),
        Commands::Resolve(args) => resolve::run(&vault, args, &output),
        Commands::Index(args) => index::run(&vault, args, &output),
    }
}
