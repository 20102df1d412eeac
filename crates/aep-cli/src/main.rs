mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "aep")]
#[command(about = "App exploit protection switch CLI", long_about = None)]
struct Cli {
    /// Layered device profile paths in merge order. Falls back to AEP_CONFIG
    /// (comma-separated).
    #[arg(long = "config", global = true)]
    config: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> device -> overrides...)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Resolve one switch for one app
    Resolve {
        /// Switch id (e.g. hardened_malloc, memtag)
        #[arg(long)]
        switch: String,

        #[arg(long)]
        package: String,

        #[arg(long, default_value_t = 0)]
        user: u32,
    },

    /// Per-switch summary lines of one app, as on its app info screen
    Summary {
        #[arg(long)]
        package: String,

        #[arg(long, default_value_t = 0)]
        user: u32,
    },

    /// Installed apps whose switch resolves to the given state
    List {
        #[arg(long)]
        switch: String,

        /// on | off
        #[arg(long)]
        state: String,

        #[arg(long, default_value_t = 0)]
        user: u32,
    },

    /// Defaults screen state of a switch
    Defaults {
        #[arg(long)]
        switch: String,

        #[arg(long, default_value_t = 0)]
        user: u32,
    },

    /// Answer a setup wizard config query
    SudConfig {
        #[arg(long)]
        method: String,

        /// Calling package (logged only)
        #[arg(long)]
        caller: Option<String>,
    },

    /// Report config keys nothing reads
    CheckConfig {
        /// Exit non-zero when unused keys are present
        #[arg(long, default_value_t = false)]
        fail_on_unused: bool,
    },
}

fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent if missing.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    let config = cli.config;

    match cli.cmd {
        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = aep_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::Resolve {
            switch,
            package,
            user,
        } => commands::resolve::run_resolve(&config, &switch, &package, user)?,

        Commands::Summary { package, user } => {
            commands::resolve::run_summary(&config, &package, user)?
        }

        Commands::List {
            switch,
            state,
            user,
        } => commands::resolve::run_list(&config, &switch, &state, user)?,

        Commands::Defaults { switch, user } => {
            commands::screens::run_defaults(&config, &switch, user)?
        }

        Commands::SudConfig { method, caller } => {
            commands::screens::run_sud_config(&config, &method, caller.as_deref())?
        }

        Commands::CheckConfig { fail_on_unused } => {
            commands::screens::run_check_config(&config, fail_on_unused)?
        }
    }

    Ok(())
}

// Logs go to stderr; stdout carries the key=value output.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
