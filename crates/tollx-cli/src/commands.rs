use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use tracing::{debug, info};

use tollx_contract::{Contract, ContractConfig, ContractError, Function};
use tollx_ledger::InMemoryLedger;

use crate::cli::{Cli, Command, InvokeArgs, OutputFormat};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let output = execute(&cli)?;
    println!("{output}");
    Ok(())
}

/// Run a command and return what it would print.
pub fn execute(cli: &Cli) -> anyhow::Result<String> {
    match &cli.command {
        Command::Invoke(args) => cmd_invoke(cli, args),
        Command::Functions => Ok(cmd_functions(&cli.format)),
        Command::Config => cmd_config(cli),
    }
}

fn rejected(err: ContractError) -> anyhow::Error {
    anyhow::anyhow!("{}: {err}", err.kind())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ContractConfig> {
    match path {
        Some(path) => ContractConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(ContractConfig::default()),
    }
}

fn cmd_invoke(cli: &Cli, args: &InvokeArgs) -> anyhow::Result<String> {
    let function: Function = args.function.parse().map_err(rejected)?;
    let config = load_config(cli.config.as_deref())?;
    let ledger = InMemoryLedger::open(&cli.state)
        .with_context(|| format!("failed to open ledger {}", cli.state.display()))?;
    let contract = Contract::with_config(ledger, config);

    let result = contract
        .invoke(function.name(), &args.args)
        .map_err(rejected)?;

    if function.is_write() {
        contract
            .ledger()
            .save(&cli.state)
            .with_context(|| format!("failed to save ledger {}", cli.state.display()))?;
        info!(function = %function, state = %cli.state.display(), "ledger saved");
    } else {
        debug!(function = %function, "read-only call, ledger not saved");
    }

    Ok(match cli.format {
        OutputFormat::Json => result,
        OutputFormat::Text => {
            let pretty = serde_json::from_str::<serde_json::Value>(&result)
                .and_then(|value| serde_json::to_string_pretty(&value))
                .unwrap_or(result);
            format!("{} {}\n{pretty}", "✓".green().bold(), function.to_string().cyan())
        }
    })
}

fn cmd_functions(format: &OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let listing: Vec<_> = Function::ALL
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "name": f.name(),
                        "params": f.params(),
                        "write": f.is_write(),
                    })
                })
                .collect();
            serde_json::Value::Array(listing).to_string()
        }
        OutputFormat::Text => Function::ALL
            .iter()
            .map(|f| {
                let kind = if f.is_write() {
                    "write".yellow()
                } else {
                    "read".normal()
                };
                format!("{:<38} {:<6} {}", f.name().cyan(), kind, f.params().join(" "))
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn cmd_config(cli: &Cli) -> anyhow::Result<String> {
    let config = load_config(cli.config.as_deref())?;
    match cli.format {
        OutputFormat::Json => Ok(serde_json::to_string(&config)?),
        OutputFormat::Text => Ok(toml::to_string(&config)?),
    }
}
