use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::DICE_PER_ROUND;

/// Faces of a Crown & Anchor die, one betting square each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Symbol {
    Crown = 0,
    Anchor = 1,
    Heart = 2,
    Diamond = 3,
    Club = 4,
    Spade = 5,
}

impl Symbol {
    /// Every symbol in table order.
    pub const ALL: [Symbol; 6] = [
        Symbol::Crown,
        Symbol::Anchor,
        Symbol::Heart,
        Symbol::Diamond,
        Symbol::Club,
        Symbol::Spade,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Symbol::Crown => "crown",
            Symbol::Anchor => "anchor",
            Symbol::Heart => "heart",
            Symbol::Diamond => "diamond",
            Symbol::Club => "club",
            Symbol::Spade => "spade",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Symbol::Crown => "👑",
            Symbol::Anchor => "⚓",
            Symbol::Heart => "♥️",
            Symbol::Diamond => "♦️",
            Symbol::Club => "♣️",
            Symbol::Spade => "♠️",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Write for Symbol {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for Symbol {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        Self::from_index(value as usize).ok_or(Error::InvalidEnum(value))
    }
}

impl FixedSize for Symbol {
    const SIZE: usize = 1;
}

/// The three dice of one round. Order only matters for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundOutcome(pub [Symbol; DICE_PER_ROUND]);

impl RoundOutcome {
    pub fn dice(&self) -> &[Symbol; DICE_PER_ROUND] {
        &self.0
    }

    /// How many dice show `symbol` (0-3).
    pub fn count(&self, symbol: Symbol) -> u64 {
        self.0.iter().filter(|&&d| d == symbol).count() as u64
    }

    /// All three dice show the same symbol.
    pub fn is_triple(&self) -> bool {
        self.0[0] == self.0[1] && self.0[1] == self.0[2]
    }

    /// Emoji rendering, e.g. "👑 👑 ⚓".
    pub fn display(&self) -> String {
        self.0
            .iter()
            .map(|s| s.emoji())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Write for RoundOutcome {
    fn write(&self, writer: &mut impl BufMut) {
        for symbol in &self.0 {
            symbol.write(writer);
        }
    }
}

impl Read for RoundOutcome {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self([
            Symbol::read(reader)?,
            Symbol::read(reader)?,
            Symbol::read(reader)?,
        ]))
    }
}

impl FixedSize for RoundOutcome {
    const SIZE: usize = DICE_PER_ROUND * Symbol::SIZE;
}
