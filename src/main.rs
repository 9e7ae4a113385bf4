use clap::Parser;
use log::*;
use std::path::Path;
use tokio_util::sync::CancellationToken;

use milestone_notes::{
    ForgeFactory,
    cli::{Args, Command},
    command,
    config::Config,
};

fn initialize_logger(debug: bool) -> milestone_notes::Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("milestone_notes")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

/// Cancel in-flight forge requests on Ctrl-C.
fn cancel_on_interrupt(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted: cancelling forge requests");
            cancel.cancel();
        }
    });
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli_args = Args::parse();

    initialize_logger(cli_args.debug)?;

    let config = Config::load(Path::new(&cli_args.config)).await?;
    let remote = cli_args.get_remote()?;

    let cancel = CancellationToken::new();
    cancel_on_interrupt(cancel.clone());

    let forge = ForgeFactory::create(&remote, cancel)?;

    match cli_args.command {
        Command::Create { milestone, output } => {
            command::create::execute(
                forge.as_ref(),
                &config,
                &milestone,
                output.as_deref(),
            )
            .await?
        }
        Command::Linked {
            number,
            all_links,
            comments,
        } => {
            command::linked::execute(
                forge.as_ref(),
                number,
                all_links,
                comments,
            )
            .await?
        }
        Command::Labels => {
            command::labels::execute(forge.as_ref(), &config).await?
        }
        Command::Export {
            skip_prereleases,
            output,
        } => {
            command::export::execute(
                forge.as_ref(),
                &config,
                skip_prereleases,
                output.as_deref(),
            )
            .await?
        }
    }

    Ok(())
}
