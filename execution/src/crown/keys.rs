//! Keyboard shortcuts.

use crown_anchor_types::{
    api::{Intent, Panel},
    crown::Symbol,
};

/// Map a key press to an intent. Keys `1`-`4` select `chip_tiers` in order.
/// Letters are case-insensitive.
pub fn shortcut(key: char, chip_tiers: &[u64; 4]) -> Option<Intent> {
    let intent = match key.to_ascii_lowercase() {
        ' ' => Intent::Roll,
        digit @ '1'..='4' => Intent::SelectChip {
            value: chip_tiers[digit as usize - '1' as usize],
        },
        'c' => Intent::ClearBets,
        'r' => Intent::RepeatLastBet,
        'm' => Intent::ToggleSound,
        's' => Intent::TogglePanel {
            panel: Panel::Stats,
        },
        'l' => Intent::TogglePanel {
            panel: Panel::Limits,
        },
        'i' => Intent::TogglePanel {
            panel: Panel::Instructions,
        },
        other => Intent::PlaceBet {
            symbol: bet_key(other)?,
        },
    };
    Some(intent)
}

fn bet_key(key: char) -> Option<Symbol> {
    Some(match key {
        'q' => Symbol::Crown,
        'w' => Symbol::Anchor,
        'e' => Symbol::Heart,
        'a' => Symbol::Diamond,
        'd' => Symbol::Club,
        'f' => Symbol::Spade,
        _ => return None,
    })
}
