mod commands;
mod config;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tafweed_core::{DelegationStatus, DurationType, Language, ListView, Party, Platform, Toggle};
use tafweed_repository::{DelegationRepository, Identity, PreferencesStore, RepositoryError};
use tafweed_storage::FileStore;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Tafweed delegation manager.
#[derive(Parser)]
#[command(name = "tafweed", version, about = "Manage time-boxed service delegations")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Directory holding the stored collection and settings
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to a TOML config file (default: ./tafweed.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug events to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the delegable services
    Services {
        /// Only services on this platform (absher, absherBusiness, najiz)
        #[arg(long)]
        platform: Option<Platform>,
        /// Case-insensitive match against Arabic and English names
        #[arg(long)]
        search: Option<String>,
    },

    /// List delegations for the grantor or the delegate
    List {
        /// Which side to list for
        #[arg(long = "as", default_value = "grantor")]
        party: Party,
        /// all, inbox (hides archived) or archived
        #[arg(long, default_value = "all")]
        view: ListView,
        /// Only delegations with this status
        #[arg(long)]
        status: Option<DelegationStatus>,
    },

    /// Show one delegation
    Show {
        id: String,
        /// Side whose available actions are shown
        #[arg(long = "as", default_value = "grantor")]
        party: Party,
    },

    /// Create a delegation as the grantor
    Create {
        /// Catalog service id, e.g. drv-license
        #[arg(long, required_unless_present = "platform")]
        service: Option<String>,
        /// Without --service, use this platform's first catalog service
        #[arg(long)]
        platform: Option<Platform>,
        /// Delegate national id (10 characters)
        #[arg(long)]
        delegate_id: String,
        #[arg(long)]
        delegate_name: String,
        /// Delegate mobile number, 05xxxxxxxx
        #[arg(long)]
        phone: String,
        /// 24h, 7d or custom (default: the service's default, else 24h)
        #[arg(long)]
        duration: Option<DurationType>,
        /// Window start, RFC 3339 (default: now)
        #[arg(long, value_parser = parse_timestamp)]
        start: Option<OffsetDateTime>,
        /// Window end, RFC 3339 (required for custom)
        #[arg(long, value_parser = parse_timestamp)]
        end: Option<OffsetDateTime>,
    },

    /// Accept a pending delegation as the delegate
    Accept {
        id: String,
        /// Confirm the delegation terms were read and accepted
        #[arg(long)]
        accept_terms: bool,
    },

    /// Reject a pending delegation as the delegate
    Reject { id: String },

    /// Archive a delegation in one party's view
    Archive {
        id: String,
        #[arg(long = "as", default_value = "grantor")]
        party: Party,
        /// Move it back to the inbox instead
        #[arg(long)]
        undo: bool,
    },

    /// Delete a delegation from one party's view (the other party keeps it)
    Delete {
        id: String,
        #[arg(long = "as", default_value = "grantor")]
        party: Party,
    },

    /// Close delegations whose window has ended
    Sweep,

    /// Show what the assistant detects in a message
    Detect {
        text: String,
        /// Report every rule's result, not just the resolved draft
        #[arg(long)]
        explain: bool,
    },

    /// Draft a delegation through the assistant
    Chat {
        /// User message; repeat for several turns (default: read lines from stdin)
        #[arg(long = "message", short = 'm')]
        messages: Vec<String>,
        #[arg(long)]
        delegate_name: Option<String>,
        #[arg(long)]
        delegate_id: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Create the drafted delegation at the end
        #[arg(long)]
        create: bool,
        /// Reply language (default: the saved preference)
        #[arg(long)]
        lang: Option<Language>,
    },

    /// Dashboard counters and usage analytics
    Stats,

    /// Check the stored collection against the JSON Schema
    Validate,

    /// Show or change language and accessibility settings
    Prefs {
        #[command(subcommand)]
        command: Option<PrefsCommands>,
    },
}

#[derive(Subcommand)]
enum PrefsCommands {
    /// Print the current settings
    Show,
    /// Set the display language (ar or en); without a value, switch to the other one
    Language { language: Option<Language> },
    /// Flip large-text, high-contrast or big-buttons
    Toggle { setting: Toggle },
    /// Restore the defaults
    Reset,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            report_error(&format!("error: {}", e), cli.output, cli.quiet);
            process::exit(1);
        }
    };
    let ctx = Context {
        output: cli.output,
        quiet: cli.quiet,
        data_dir: cli.data_dir.unwrap_or(config.storage.data_dir),
        identity: config.identity,
    };
    tracing::debug!(data_dir = %ctx.data_dir.display(), "resolved configuration");

    match cli.command {
        Commands::Services { platform, search } => {
            commands::services::cmd_services(&ctx, platform, search.as_deref());
        }
        Commands::List {
            party,
            view,
            status,
        } => {
            commands::delegations::cmd_list(&ctx, party, view, status);
        }
        Commands::Show { id, party } => {
            commands::delegations::cmd_show(&ctx, &id, party);
        }
        Commands::Create {
            service,
            platform,
            delegate_id,
            delegate_name,
            phone,
            duration,
            start,
            end,
        } => {
            commands::delegations::cmd_create(
                &ctx,
                commands::delegations::CreateArgs {
                    service: service.as_deref(),
                    platform,
                    delegate_id: &delegate_id,
                    delegate_name: &delegate_name,
                    phone: &phone,
                    duration,
                    start,
                    end,
                },
            );
        }
        Commands::Accept { id, accept_terms } => {
            commands::actions::cmd_accept(&ctx, &id, accept_terms);
        }
        Commands::Reject { id } => {
            commands::actions::cmd_reject(&ctx, &id);
        }
        Commands::Archive { id, party, undo } => {
            commands::actions::cmd_archive(&ctx, &id, party, undo);
        }
        Commands::Delete { id, party } => {
            commands::actions::cmd_delete(&ctx, &id, party);
        }
        Commands::Sweep => {
            commands::actions::cmd_sweep(&ctx);
        }
        Commands::Detect { text, explain } => {
            commands::assistant::cmd_detect(&ctx, &text, explain);
        }
        Commands::Chat {
            messages,
            delegate_name,
            delegate_id,
            phone,
            create,
            lang,
        } => {
            commands::assistant::cmd_chat(
                &ctx,
                commands::assistant::ChatArgs {
                    messages,
                    delegate_name,
                    delegate_id,
                    phone,
                    create,
                    lang,
                },
            );
        }
        Commands::Stats => {
            commands::stats::cmd_stats(&ctx);
        }
        Commands::Validate => {
            commands::validate::cmd_validate(&ctx);
        }
        Commands::Prefs { command } => {
            let action = match command.unwrap_or(PrefsCommands::Show) {
                PrefsCommands::Show => commands::prefs::PrefsAction::Show,
                PrefsCommands::Language { language } => commands::prefs::PrefsAction::Language(language),
                PrefsCommands::Toggle { setting } => commands::prefs::PrefsAction::Toggle(setting),
                PrefsCommands::Reset => commands::prefs::PrefsAction::Reset,
            };
            commands::prefs::cmd_prefs(&ctx, action);
        }
    }
}

/// Logs go to stderr so JSON on stdout stays machine-readable.
fn init_tracing(verbose: bool, quiet: bool) {
    let default = match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "error",
        (false, false) => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_timestamp(s: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(s, &Rfc3339).map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}

/// Settings shared by every subcommand.
pub(crate) struct Context {
    pub output: OutputFormat,
    pub quiet: bool,
    pub data_dir: PathBuf,
    pub identity: Identity,
}

impl Context {
    /// Open and load the delegation repository, exiting on failure.
    pub fn repository(&self) -> DelegationRepository<FileStore> {
        match DelegationRepository::open(FileStore::new(&self.data_dir), self.identity.clone()) {
            Ok(repo) => repo,
            Err(e) => self.fail(&e),
        }
    }

    pub fn preferences(&self) -> PreferencesStore<FileStore> {
        match PreferencesStore::open(FileStore::new(&self.data_dir)) {
            Ok(prefs) => prefs,
            Err(e) => self.fail(&e),
        }
    }

    /// Display language for text output; falls back to Arabic if the
    /// settings cannot be read.
    pub fn language(&self) -> Language {
        PreferencesStore::open(FileStore::new(&self.data_dir))
            .map(|p| p.get().language)
            .unwrap_or_default()
    }

    pub fn fail(&self, err: &RepositoryError) -> ! {
        report_repository_error(err, self.output, self.quiet);
        process::exit(1);
    }

    pub fn party_id(&self, party: Party) -> &str {
        match party {
            Party::Grantor => &self.identity.grantor_id,
            Party::Delegate => &self.identity.delegate_id,
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

pub(crate) fn report_repository_error(err: &RepositoryError, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("error: {}", err),
        OutputFormat::Json => {
            eprintln!(
                "{}",
                serde_json::json!({ "error": err.to_string(), "kind": err.kind() })
            );
        }
    }
}
