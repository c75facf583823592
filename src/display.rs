use colored::Colorize;
use flagset::{flags, FlagSet};

use crate::game::{Board, Outcome};

flags! {
    pub enum Highlight: u8 {
        Winning,
        LastMove,
    }
}

/// Draws the board row by row. Empty cells stay blank.
pub fn render(board: &Board, highlights: impl Into<FlagSet<Highlight>>) -> String {
    let highlights = highlights.into();
    let size = board.size();

    let winning = match board.outcome() {
        Outcome::Win(player) if highlights.contains(Highlight::Winning) => {
            board.winning_cells(player)
        }
        _ => vec![],
    };
    let last_move = board
        .last_move()
        .filter(|_| highlights.contains(Highlight::LastMove));

    let mut result = String::new();
    for (row, cells) in board.cells().chunks(size).enumerate() {
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(col, marker)| {
                let cell = row * size + col;
                let symbol = marker.map_or(' ', |player| player.to_char()).to_string();
                if winning.contains(&cell) {
                    symbol.green().bold().to_string()
                } else if last_move == Some(cell) {
                    symbol.yellow().to_string()
                } else {
                    symbol
                }
            })
            .collect();
        result.push_str(&line.join("|"));
        result.push('\n');
    }
    result
}

pub fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
}
