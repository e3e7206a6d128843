mod commands;
mod core;
mod ledger;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::publish::Bump;
use crate::core::error::{StagelineError, print_error};
use crate::ledger::{DEFAULT_FILE_NAME, ReleaseKind};

/// Track service releases through maturity stages in a tamper-evident ledger
#[derive(Parser)]
#[command(name = "stageline")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Path of the ledger file
  #[arg(long, global = true, default_value = DEFAULT_FILE_NAME)]
  file: PathBuf,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Create a new, empty ledger file
  Init {
    /// Overwrite an existing ledger file
    #[arg(long)]
    force: bool,
  },

  /// Show the latest release at each maturity stage
  Status {
    /// Output status in JSON format
    #[arg(long)]
    json: bool,
  },

  /// List the full release chain, newest first
  Log {
    /// Output the chain in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Inspect a single release
  Show {
    /// Full or 9-character short block hash of the release
    hash: String,
    /// Print only this service's version
    #[arg(short, long)]
    service: Option<String>,
    /// Output the release in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Create dev releases and promote them stage by stage
  #[command(subcommand)]
  Publish(PublishCommands),

  /// Discard the most recent release, whatever its stage
  Rollback,

  /// Remove every release of one stage
  Clean {
    /// Stage to remove (dev, alpha, beta, rc, ga, eol, unsupported)
    kind: String,
  },

  /// Verify the hash chain of the persisted ledger
  Verify {
    /// Output the report in JSON format
    #[arg(long)]
    json: bool,
  },
}

#[derive(Subcommand)]
enum PublishCommands {
  /// Create a new dev release
  Dev {
    /// Pin a service as <name@version>; repeatable
    #[arg(short, long = "service")]
    service: Vec<String>,

    /// Drop a service from the copied set; repeatable
    #[arg(long = "without-service")]
    without_service: Vec<String>,

    /// Bump the major version
    #[arg(long)]
    major: bool,

    /// Bump the minor version
    #[arg(long, conflicts_with = "major")]
    minor: bool,

    /// Bump the patch version (the default)
    #[arg(long, conflicts_with_all = ["major", "minor"])]
    patch: bool,

    /// Copy the service set of the release with this hash
    #[arg(short, long, value_name = "HASH")]
    from: Option<String>,

    /// Copy the service set of the latest release of this stage
    #[arg(short = 'k', long, value_name = "STAGE", conflicts_with = "from")]
    from_kind: Option<String>,
  },

  /// Promote the latest dev release to alpha
  Alpha,

  /// Promote the latest alpha release to beta
  Beta,

  /// Promote the latest beta release to rc
  Rc,

  /// Promote the latest rc release to ga
  Ga,

  /// Promote the latest ga release to eol
  Eol,

  /// Promote the latest eol release to unsupported
  Unsupported,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Cyan))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Cyan))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Init { force } => commands::run_init(&cli.file, force),
    Commands::Status { json } => commands::run_status(&cli.file, json),
    Commands::Log { json } => commands::run_log(&cli.file, json),
    Commands::Show { hash, service, json } => {
      commands::run_show(&cli.file, &hash, service.as_deref(), json)
    }

    Commands::Publish(publish) => match publish {
      PublishCommands::Dev {
        service,
        without_service,
        major,
        minor,
        patch,
        from,
        from_kind,
      } => commands::run_publish_dev(
        &cli.file,
        &service,
        &without_service,
        from.as_deref(),
        from_kind.as_deref(),
        Bump::from_flags(major, minor, patch),
      ),
      PublishCommands::Alpha => commands::run_publish_promote(&cli.file, ReleaseKind::Alpha),
      PublishCommands::Beta => commands::run_publish_promote(&cli.file, ReleaseKind::Beta),
      PublishCommands::Rc => commands::run_publish_promote(&cli.file, ReleaseKind::Rc),
      PublishCommands::Ga => commands::run_publish_promote(&cli.file, ReleaseKind::Ga),
      PublishCommands::Eol => commands::run_publish_promote(&cli.file, ReleaseKind::Eol),
      PublishCommands::Unsupported => {
        commands::run_publish_promote(&cli.file, ReleaseKind::Unsupported)
      }
    },

    Commands::Rollback => commands::run_rollback(&cli.file),
    Commands::Clean { kind } => commands::run_clean(&cli.file, &kind),
    Commands::Verify { json } => commands::run_verify(&cli.file, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: StagelineError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
