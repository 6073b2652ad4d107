//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a logging subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve configuration, open the store, build the API
//! 3. **Dispatch**: Route commands to handlers
//! 4. **Shutdown**: Close the store explicitly once the command has run

use super::handlers::Context;
use super::setup::{Cli, Commands, ProductCommands, ProfileCommands};
use anyhow::{Context as _, Result};
use bazaarapp::config::BazaarConfig;
use bazaarapp::model::{ProductInput, Profile};
use bazaarapp::notify::{ChangeEvent, NotifyError};
use bazaarapp::store::fs::FileStore;
use bazaarapp::store::fs_backend::FsBackend;
use bazaarapp::BazaarApi;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = BazaarConfig::load(cli.config.as_deref())?;
    if let Some(data) = &cli.data {
        config.data_file = Some(data.clone());
    }
    debug!(?config, "resolved configuration");
    let path = config.data_file()?;

    // Reporting the location must not create the document.
    if let Some(Commands::Path) = &cli.command {
        println!("{}", path.display());
        return Ok(());
    }

    let store = FileStore::open_path(&path, config.seed_document()?)
        .with_context(|| format!("Could not open catalog at {}", path.display()))?;
    let ctx = Context::new(BazaarApi::new(store), cli.json);

    let _subscription = (cli.verbose > 0).then(|| {
        ctx.api
            .subscribe(|event: &ChangeEvent| -> Result<(), NotifyError> {
                info!(
                    collection = %event.collection,
                    kind = ?event.kind,
                    key = event.key.as_deref().unwrap_or("-"),
                    "change committed"
                );
                Ok(())
            })
    });

    let output = dispatch(&ctx, cli.command)?;
    print!("{}", output);

    ctx.api.close()?;
    Ok(())
}

fn dispatch(ctx: &Context<FsBackend>, command: Option<Commands>) -> Result<String> {
    let command = command.unwrap_or(Commands::Products {
        action: ProductCommands::List {
            status: None,
            limit: None,
        },
    });

    match command {
        Commands::Products { action } => match action {
            ProductCommands::List { status, limit } => ctx.list(status, limit),
            ProductCommands::Show { name } => ctx.show(&name),
            ProductCommands::Add {
                name,
                price,
                stock,
                details,
            } => ctx.add(ProductInput::new(name, price, stock), details),
            ProductCommands::Update {
                original,
                name,
                price,
                stock,
                details,
            } => ctx.update(&original, name, price, stock, details),
            ProductCommands::Remove { name } => ctx.remove(&name),
        },
        Commands::Profile { action } => match action {
            ProfileCommands::Show => ctx.profile_show(),
            ProfileCommands::Set {
                name,
                location,
                story,
                heritage,
                avatar,
            } => ctx.profile_set(Profile {
                name,
                location,
                story,
                heritage,
                avatar,
                ..Default::default()
            }),
        },
        Commands::Path => Ok(format!("{}\n", ctx.api.location().display())),
    }
}

/// Logs go to stderr so stdout stays clean for `--json`. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
