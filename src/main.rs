use hintword::cli::{CliInterface, parse_cli};
use hintword::logging::init_logging;
use hintword::tui::TuiInterface;
use hintword::wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};
use hintword::{Game, GameSummary, game_loop};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    if let Some(target) = cli.log_target()
        && let Err(e) = init_logging(&target)
    {
        eprintln!("Warning: {e}");
    }

    let config = match cli.game_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let words = match &cli.wordbank_path {
        Some(path) => match load_wordbank_from_file(path) {
            Ok(words) => words,
            Err(e) => {
                log::error!("{e}");
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => load_wordbank_from_str(EMBEDDED_WORDBANK),
    };

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut game = Game::new(words, config, rng);
    if let Err(e) = game.start() {
        eprintln!("Cannot start game: {e}");
        return ExitCode::FAILURE;
    }

    let summary = if cli.plain {
        println!("Loaded {} words.", game.words().len());
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&mut game, &mut interface)
    } else {
        let mut interface = match TuiInterface::new() {
            Ok(interface) => interface,
            Err(e) => {
                log::error!("Failed to initialise terminal: {e}");
                eprintln!("Failed to initialise terminal: {e}");
                return ExitCode::FAILURE;
            }
        };
        let summary = game_loop(&mut game, &mut interface);
        // Restore the terminal before printing the summary.
        drop(interface);
        summary
    };

    print_summary(&summary);
    ExitCode::SUCCESS
}

fn print_summary(summary: &GameSummary) {
    let ending = if summary.game_over { "Game over" } else { "Quit" };
    println!(
        "{ending}: solved {} of {} rounds.",
        summary.solved, summary.rounds
    );
}
