use clap::{Parser, ValueEnum};
use rand::Rng;

use crate::{game::PlayerMarker, policy::Difficulty};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Opponent {
    Cpu,
    Human,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Side {
    O,
    X,
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "naughts-and-crosses")]
#[command(about = "N x N naughts and crosses with an optional computer opponent")]
pub struct Config {
    /// Board size N (asked for when omitted)
    #[arg(short = 'n', long)]
    pub size: Option<usize>,

    /// Who plays against you
    #[arg(long, value_enum, default_value_t = Opponent::Cpu)]
    pub opponent: Opponent,

    /// Computer strength
    #[arg(short, long, value_enum, default_value_t = Difficulty::Hard)]
    pub difficulty: Difficulty,

    /// Mark the computer plays; O always moves first
    #[arg(long, value_enum, default_value_t = Side::X)]
    pub cpu_side: Side,

    /// Seed for the computer's random choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Do not clear the console between turns
    #[arg(long)]
    pub no_clear: bool,
}

impl Config {
    pub fn cpu_marker<R: Rng + ?Sized>(&self, rng: &mut R) -> PlayerMarker {
        match self.cpu_side {
            Side::O => PlayerMarker::O,
            Side::X => PlayerMarker::X,
            Side::Random => rng.gen(),
        }
    }
}
