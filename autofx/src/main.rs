use autofx_analyzer::{AnalyzerConfig, Inspector, MatchMode, Report};
use clap::{Args, Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, MietteHandlerOpts, Result};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod generator;

use generator::Generator;

#[derive(Parser, Debug)]
#[command(
    name = "autofx",
    version,
    about = "Discover constructors and interface implementations in a Go package",
    long_about = "autofx inspects the declarations of a Go package, binds methods to their types, \
                  finds constructors and structural interface implementations, and can generate \
                  go.uber.org/fx modules from the result."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyse a package and print what was found
    Inspect {
        #[command(flatten)]
        common: CommonArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Report)]
        format: OutputFormat,

        /// Force ANSI colors in the report (default: only on a terminal)
        #[arg(long)]
        color: bool,
    },

    /// Analyse a package and write its fx module file
    Generate {
        #[command(flatten)]
        common: CommonArgs,

        /// Path of the generated module, relative to the package directory
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,

        /// Print the generated source instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Directory of the Go package to analyse
    #[arg(short = 'p', long = "path", value_name = "DIR")]
    path: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// How method parameter lists are compared (overrides autofx.toml)
    #[arg(long, value_enum)]
    match_mode: Option<MatchModeArg>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Info,
    Debug,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Report,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum MatchModeArg {
    Membership,
    Multiset,
}

impl From<MatchModeArg> for MatchMode {
    fn from(arg: MatchModeArg) -> Self {
        match arg {
            MatchModeArg::Membership => MatchMode::Membership,
            MatchModeArg::Multiset => MatchMode::Multiset,
        }
    }
}

fn main() -> Result<()> {
    setup_miette_handler();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            common,
            format,
            color,
        } => {
            setup_logging(common.log_level);
            handle_inspect_command(&common, format, color)
        }
        Commands::Generate {
            common,
            output,
            dry_run,
        } => {
            setup_logging(common.log_level);
            handle_generate_command(&common, output, dry_run)
        }
    }
}

/// Configure miette for error reporting
fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

/// Log to stderr; `AUTOFX_LOG` takes precedence over `--log-level`
fn setup_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_env("AUTOFX_LOG")
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

fn load_config(common: &CommonArgs) -> Result<AnalyzerConfig> {
    let mut config = AnalyzerConfig::load_from_directory(&common.path)?;
    if let Some(mode) = common.match_mode {
        config.analysis.match_mode = mode.into();
    }
    Ok(config)
}

fn handle_inspect_command(common: &CommonArgs, format: OutputFormat, color: bool) -> Result<()> {
    let config = load_config(common)?;
    let package = Inspector::from_config(&config).inspect_directory(&common.path)?;

    let rendered = match format {
        OutputFormat::Json => package.to_json()?,
        OutputFormat::Report => {
            let use_color = color || io::stdout().is_terminal();
            Report::new(&package).with_color(use_color).to_string()
        }
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered.trim_end()).into_diagnostic()?;
    Ok(())
}

fn handle_generate_command(common: &CommonArgs, output: Option<String>, dry_run: bool) -> Result<()> {
    let mut config = load_config(common)?;
    if let Some(output) = output {
        config.generate.output = output;
    }

    let package = Inspector::from_config(&config).inspect_directory(&common.path)?;
    let generator = Generator::from_settings(&package, &config.generate)?;

    if dry_run {
        let source = generator.render()?;
        io::stdout().lock().write_all(source.as_bytes()).into_diagnostic()?;
    } else {
        generator.write_to(&common.path.join(&config.generate.output))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_is_required() {
        assert!(Cli::try_parse_from(["autofx", "inspect"]).is_err());
    }

    #[test]
    fn test_log_level_restricted() {
        assert!(Cli::try_parse_from(["autofx", "inspect", "-p", ".", "--log-level", "trace"]).is_err());

        let cli = Cli::try_parse_from(["autofx", "inspect", "-p", ".", "--log-level", "debug"]).unwrap();
        match cli.command {
            Commands::Inspect { common, .. } => assert_eq!(common.log_level, LogLevel::Debug),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_generate_arguments() {
        let cli = Cli::try_parse_from([
            "autofx",
            "generate",
            "-p",
            "./pkg",
            "--output",
            "wire.go",
            "--dry-run",
            "--match-mode",
            "multiset",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate {
                common,
                output,
                dry_run,
            } => {
                assert_eq!(common.path, PathBuf::from("./pkg"));
                assert_eq!(common.log_level, LogLevel::Info);
                assert_eq!(common.match_mode.map(MatchMode::from), Some(MatchMode::Multiset));
                assert_eq!(output.as_deref(), Some("wire.go"));
                assert!(dry_run);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
