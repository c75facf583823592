use colored::Colorize;
use flagset::FlagSet;
use log::{info, warn};

use crate::{
    display::{clear_screen, render, Highlight},
    error::Result,
    game::{Board, Outcome, PlayerMarker},
    player::Player,
};

#[derive(Clone, Copy, Debug)]
pub struct DisplayOptions {
    pub clear: bool,
    pub highlights: FlagSet<Highlight>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions {
            clear: true,
            highlights: FlagSet::full(),
        }
    }
}

// ######################################
// Game
// ######################################

/// Runs one game. `players[0]` plays `O` and moves first.
pub struct Game {
    board: Board,
    players: [Box<dyn Player>; 2],
    current_player: PlayerMarker,
    options: DisplayOptions,
}

impl Game {
    pub fn new(board: Board, players: [Box<dyn Player>; 2], options: DisplayOptions) -> Self {
        Game {
            board,
            players,
            current_player: PlayerMarker::O,
            options,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn show(&self) {
        if self.options.clear {
            clear_screen();
        }
        print!("{}", render(&self.board, self.options.highlights));
    }

    pub fn play(&mut self) -> Result<Outcome> {
        info!("starting a {0}x{0} game", self.board.size());

        loop {
            self.show();

            let marker = self.current_player;
            let player = &mut self.players[marker.index()];
            let cell = player.get_move(&self.board, marker)?;

            // players hand back legal cells; anything else is a bug in the player
            let outcome = self.board.apply(cell, marker).inspect_err(|e| {
                warn!("player {} chose an illegal cell {}: {}", marker, cell, e);
            })?;
            println!("Player {} ({}) played {}", marker.index() + 1, marker, cell + 1);

            match outcome {
                Outcome::Win(winner) => {
                    self.show();
                    let message = format!(
                        "Congratulations, Player {} ({}), you won!",
                        winner.index() + 1,
                        winner
                    );
                    match winner {
                        PlayerMarker::O => println!("{}", message.green()),
                        PlayerMarker::X => println!("{}", message.blue()),
                    }
                    info!("game over: {} won", winner);
                    return Ok(outcome);
                }
                Outcome::Draw => {
                    self.show();
                    println!("{}", "It's a draw!".yellow());
                    info!("game over: draw");
                    return Ok(outcome);
                }
                Outcome::InProgress => self.current_player = marker.other(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::GameError,
        player::{CpuPlayer, HumanPlayer},
        policy::Difficulty,
    };
    use rand::{rngs::StdRng, SeedableRng};
    use std::io::Cursor;

    fn quiet() -> DisplayOptions {
        DisplayOptions {
            clear: false,
            highlights: FlagSet::default(),
        }
    }

    struct Scripted(Vec<usize>);

    impl Player for Scripted {
        fn get_move(&mut self, _board: &Board, _marker: PlayerMarker) -> Result<usize> {
            if self.0.is_empty() {
                return Err(GameError::InputClosed);
            }
            Ok(self.0.remove(0))
        }
    }

    #[test]
    fn test_two_humans_first_wins() {
        let o = HumanPlayer::new(Cursor::new("1\n2\n3\n"));
        let x = HumanPlayer::new(Cursor::new("4\n5\n"));
        let mut game = Game::new(Board::new(3).unwrap(), [Box::new(o), Box::new(x)], quiet());

        assert_eq!(game.play().unwrap(), Outcome::Win(PlayerMarker::O));
        assert_eq!(game.board().winning_cells(PlayerMarker::O), vec![0, 1, 2]);
    }

    #[test]
    fn test_draw() {
        let o = Scripted(vec![0, 2, 3, 7, 8]);
        let x = Scripted(vec![1, 4, 5, 6]);
        let mut game = Game::new(Board::new(3).unwrap(), [Box::new(o), Box::new(x)], quiet());
        assert_eq!(game.play().unwrap(), Outcome::Draw);
    }

    #[test]
    fn test_illegal_move_ends_game() {
        // X hands back the occupied cell 0 and would keep doing so
        let o = Scripted(vec![0, 1, 2]);
        let x = Scripted(vec![0; 100]);
        let mut game = Game::new(Board::new(3).unwrap(), [Box::new(o), Box::new(x)], quiet());
        assert!(matches!(game.play(), Err(GameError::CellOccupied { cell: 0 })));
        assert_eq!(game.board().bitboard(PlayerMarker::X), 0);
        assert_eq!(game.board().bitboard(PlayerMarker::O), 1 << 0);

        let o = Scripted(vec![9]);
        let x = Scripted(vec![]);
        let mut game = Game::new(Board::new(3).unwrap(), [Box::new(o), Box::new(x)], quiet());
        assert!(matches!(
            game.play(),
            Err(GameError::CellOutOfRange { cell: 9, cells: 9 })
        ));
        assert!(game.board().legal_moves().len() == 9);
    }

    #[test]
    fn test_input_closed_ends_game() {
        let o = HumanPlayer::new(Cursor::new(""));
        let x = Scripted(vec![]);
        let mut game = Game::new(Board::new(3).unwrap(), [Box::new(o), Box::new(x)], quiet());
        assert!(matches!(game.play(), Err(GameError::InputClosed)));
    }

    #[test]
    fn test_cpu_against_cpu() {
        let o = CpuPlayer::new(Difficulty::Hard, StdRng::seed_from_u64(10));
        let x = CpuPlayer::new(Difficulty::Hard, StdRng::seed_from_u64(11));
        let mut game = Game::new(Board::new(3).unwrap(), [Box::new(o), Box::new(x)], quiet());
        assert_eq!(game.play().unwrap(), Outcome::Draw);

        let o = CpuPlayer::new(Difficulty::Hard, StdRng::seed_from_u64(12));
        let x = CpuPlayer::new(Difficulty::Easy, StdRng::seed_from_u64(13));
        let mut game = Game::new(Board::new(5).unwrap(), [Box::new(o), Box::new(x)], quiet());
        assert!(game.play().unwrap().is_terminal());
    }
}
