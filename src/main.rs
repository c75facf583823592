use std::{cell::RefCell, io, rc::Rc};

use clap::Parser;
use flagset::FlagSet;
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use naughts::{
    config::{Config, Opponent},
    play::{DisplayOptions, Game},
    player::{read_board_size, CpuPlayer, HumanPlayer, Player},
    Board, PlayerMarker,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::parse();
    if config.no_color {
        colored::control::set_override(false);
    }

    let size = match config.size {
        Some(size) => size,
        None => read_board_size(&mut io::stdin().lock())?,
    };
    let board = Board::new(size)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let players: [Box<dyn Player>; 2] = match config.opponent {
        Opponent::Human => {
            // both sides read from the same console
            let human = Rc::new(RefCell::new(HumanPlayer::new(io::stdin().lock())));
            let first: Box<dyn Player> = Box::new(Rc::clone(&human));
            let second: Box<dyn Player> = Box::new(human);
            [first, second]
        }
        Opponent::Cpu => {
            let cpu_marker = config.cpu_marker(&mut rng);
            info!("computer plays {} on {:?}", cpu_marker, config.difficulty);
            let cpu: Box<dyn Player> = Box::new(CpuPlayer::new(config.difficulty, rng));
            let human: Box<dyn Player> = Box::new(HumanPlayer::new(io::stdin().lock()));
            match cpu_marker {
                PlayerMarker::O => [cpu, human],
                PlayerMarker::X => [human, cpu],
            }
        }
    };

    let options = DisplayOptions {
        clear: !config.no_clear,
        highlights: FlagSet::full(),
    };
    let mut game = Game::new(board, players, options);

    let outcome = game.play()?;
    info!("finished with {:?}", outcome);
    Ok(())
}
