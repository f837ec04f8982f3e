// Entrypoint for the ticketing CLI.
// - Sets up logging on stderr so the menu on stdout stays readable.
// - Opens the stores and hands the ticket office to the UI loop.

use ticketing_cli::{booking::TicketOffice, ui::main_menu};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Quiet by default; `RUST_LOG=info` shows every operation.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    // Paths come from `TICKETING_USERS_FILE` / `TICKETING_MOVIES_FILE` or
    // default to `users.json` / `movies.json`. See `StorePaths::from_env`.
    let office = TicketOffice::from_env()?;

    // Blocks until the user exits.
    main_menu(office)?;
    Ok(())
}
