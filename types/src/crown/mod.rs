mod achievement;
mod constants;
mod ledger;
mod progression;
mod receipt;
mod room;
mod settlement;
mod snapshot;
mod symbol;
mod tournament;

pub use achievement::*;
pub use constants::*;
pub use ledger::*;
pub use progression::*;
pub use receipt::*;
pub use room::*;
pub use settlement::*;
pub use snapshot::*;
pub use symbol::*;
pub use tournament::*;

#[cfg(test)]
mod tests;
