use serde::{Deserialize, Serialize};

/// Seat in a simulated multiplayer room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPlayer {
    pub name: String,
    pub ready: bool,
    pub is_host: bool,
}

/// Locally simulated multiplayer room. No transport exists behind the code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub code: String,
    pub players: Vec<RoomPlayer>,
    pub is_host: bool,
    pub player_name: String,
}

impl Room {
    pub fn host(&self) -> Option<&RoomPlayer> {
        self.players.iter().find(|p| p.is_host)
    }
}
