use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tollx",
    about = "Toll interoperability exchange: run contract operations against a local ledger",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Ledger snapshot file, created on the first write
    #[arg(long, global = true, default_value = "tollx-ledger.json")]
    pub state: PathBuf,

    /// Contract configuration (TOML); defaults apply when absent
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Invoke a contract function
    Invoke(InvokeArgs),
    /// List invocable functions and their arguments
    Functions,
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct InvokeArgs {
    /// Function name, e.g. CreateCharge
    pub function: String,
    /// Positional arguments; create functions take one JSON payload
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_invoke() {
        let cli = Cli::try_parse_from([
            "tollx",
            "invoke",
            "UpdateChargeStatus",
            "A2",
            "A1",
            "CHG-1",
            "posted",
        ])
        .unwrap();
        if let Command::Invoke(args) = cli.command {
            assert_eq!(args.function, "UpdateChargeStatus");
            assert_eq!(args.args, ["A2", "A1", "CHG-1", "posted"]);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_hyphenated_argument() {
        let cli = Cli::try_parse_from(["tollx", "invoke", "GetAgency", "-A1"]).unwrap();
        if let Command::Invoke(args) = cli.command {
            assert_eq!(args.args, ["-A1"]);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_global_paths() {
        let cli = Cli::try_parse_from([
            "tollx",
            "functions",
            "--state",
            "/tmp/ledger.json",
            "--config",
            "tollx.toml",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Functions));
        assert_eq!(cli.state, PathBuf::from("/tmp/ledger.json"));
        assert_eq!(cli.config, Some(PathBuf::from("tollx.toml")));
    }

    #[test]
    fn default_state_file() {
        let cli = Cli::try_parse_from(["tollx", "config"]).unwrap();
        assert_eq!(cli.state, PathBuf::from("tollx-ledger.json"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_verbose_and_format() {
        let cli = Cli::try_parse_from(["tollx", "--verbose", "--format", "json", "functions"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
