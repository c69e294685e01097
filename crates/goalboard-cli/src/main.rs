mod cli;
mod context;
mod handlers;
mod output;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use goalboard_core::AppConfig;
use goalboard_domain::RollbackPolicy;
use goalboard_tui::App;
use uuid::Uuid;

fn init_tracing() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("GOALBOARD_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Cannot open debug log {}", log_path))?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    let command = match cli.command {
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "goalboard", &mut std::io::stdout());
            return Ok(());
        }
        other => other,
    };

    let config = AppConfig::load();
    let file = cli
        .file
        .or_else(|| config.effective_data_file())
        .ok_or_else(|| anyhow::anyhow!("No data file: pass --file or set GOALBOARD_FILE"))?;
    // Single-user boards without a configured owner share the nil id
    let owner = cli.owner.or(config.owner_id).unwrap_or_else(Uuid::nil);
    let policy = RollbackPolicy::from_flag(cli.rollback || config.rollback_on_failure);
    tracing::debug!("Opening {} for owner {}", file.display(), owner);

    match command {
        None => {
            let mut app = App::new(context::open_board(&file, owner, policy));
            app.run().await?;
        }
        Some(Commands::Goal(goal_cmd)) => {
            let mut ctx = CliContext::load(&file, owner, policy).await;
            handlers::goal::handle(&mut ctx, goal_cmd.action).await?;
        }
        Some(Commands::Template(template_cmd)) => {
            let mut ctx = CliContext::load(&file, owner, policy).await;
            handlers::template::handle(&mut ctx, template_cmd.action).await?;
        }
        Some(Commands::Completions { .. }) => {}
    }

    Ok(())
}
