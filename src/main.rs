use anyhow::Context;
use hangman::cli::{CliInterface, format_summary, parse_cli};
use hangman::logging::init_logging;
use hangman::tui::TuiInterface;
use hangman::{RandomWordApi, StandardWordSource, game_loop, info_log};
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = parse_cli();
    init_logging(cli.tui);
    info_log!("Starting hangman (source: {:?}, tui: {})", cli.source, cli.tui);

    let api = RandomWordApi::new(cli.api_url.clone(), cli.timeout())
        .context("failed to set up the random-word client")?;
    let source = StandardWordSource::new(api);
    let config = cli.session_config();

    if cli.tui {
        let mut interface = TuiInterface::new().context("failed to initialise the terminal")?;
        let summary = game_loop(&mut interface, &source, &config);
        // Restore the terminal before printing to it.
        drop(interface);
        println!("{}", format_summary(&summary));
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&mut interface, &source, &config);
    }
    Ok(())
}
