use crate::game::WinningMasks;

/// Counts the lines each side can still complete, weighting lines a side has
/// already started double. Positive values favour `me`.
pub fn evaluate(me: u128, opponent: u128, masks: &WinningMasks) -> i32 {
    line_potential(me, opponent, masks) - line_potential(opponent, me, masks)
}

fn line_potential(own: u128, blocker: u128, masks: &WinningMasks) -> i32 {
    masks
        .iter()
        .filter(|&mask| blocker & mask == 0)
        .map(|mask| if own & mask != 0 { 2 } else { 1 })
        .sum()
}
