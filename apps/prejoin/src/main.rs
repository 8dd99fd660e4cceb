use std::rc::Rc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    invite_link, HttpRoomEndpoints, RoomEndpoints, ViewController, NOBODY_HERE_LABEL,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::LocalSet,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

mod terminal;

use terminal::{CreateSlot, TerminalDisplay, TerminalWidget, TokioSpawner};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "http://127.0.0.1:8888")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Allocates a new room and prints its invite link.
    CreateRoom,
    /// Lists who is currently in a room.
    Presence {
        #[arg(long)]
        room_name: String,
    },
    /// Runs the prejoin page in the terminal.
    Join {
        /// Page address; pass an invite link to join its room directly.
        #[arg(long)]
        page_url: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let server_url = Url::parse(&cli.server_url)?;
    let endpoints = HttpRoomEndpoints::new(server_url.clone());

    match cli.command {
        Command::CreateRoom => {
            let room = endpoints.create_room().await?;
            println!("room_name={} room_url={}", room.name, room.url);
            println!("invite={}", invite_link(&server_url, &room).href);
        }
        Command::Presence { room_name } => {
            let participants = endpoints.fetch_presence(&room_name).await?;
            if participants.is_empty() {
                println!("{NOBODY_HERE_LABEL}");
            }
            for participant in &participants {
                println!("{}", participant.display_label());
            }
        }
        Command::Join { page_url } => {
            let page_url = match page_url {
                Some(raw) => Url::parse(&raw)?,
                None => server_url,
            };
            LocalSet::new()
                .run_until(run_page(endpoints, page_url))
                .await?;
        }
    }

    Ok(())
}

/// Enter activates whatever the page currently offers: room creation on the
/// entry panel, then the local join once the call panel is up. `q` quits.
async fn run_page(endpoints: HttpRoomEndpoints, page_url: Url) -> Result<()> {
    let create_slot = CreateSlot::default();
    let widget = TerminalWidget::default();
    let call = widget.clone();
    let controller = ViewController::new(
        endpoints,
        widget,
        TerminalDisplay::new(Rc::clone(&create_slot)),
        TokioSpawner,
        page_url,
    );

    let startup = controller.initialize().await;
    info!(?startup, "page initialized");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }

        let view = controller.view();
        if view.is_entry_visible() {
            if let Some(create) = create_slot.borrow().as_ref() {
                create();
            }
        } else if view.is_call_visible() && !view.local_joined() {
            call.confirm_joined();
        } else {
            break;
        }
        tokio::task::yield_now().await;
    }
    Ok(())
}
