//! Locally simulated multiplayer room. Codes are generated locally and
//! nothing is ever sent anywhere.

use super::GameError;
use crown_anchor_types::crown::{
    Room, RoomPlayer, MAX_NAME_LENGTH, ROOM_CODE_LENGTH, SIMULATED_HOST_NAME,
};
use rand::Rng;
use tracing::info;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a room code of uppercase alphanumerics.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ROOM_CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

fn player_name(name: &str) -> Result<String, GameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GameError::MissingPlayerName);
    }
    Ok(name.chars().take(MAX_NAME_LENGTH).collect())
}

/// Open a new room hosted by `name`.
pub fn create<R: Rng + ?Sized>(name: &str, rng: &mut R) -> Result<Room, GameError> {
    let name = player_name(name)?;
    let code = generate_code(rng);
    info!(%code, "room created");
    Ok(Room {
        code,
        players: vec![RoomPlayer {
            name: name.clone(),
            ready: false,
            is_host: true,
        }],
        is_host: true,
        player_name: name,
    })
}

/// Join the room with `code`. The host is simulated.
pub fn join(name: &str, code: &str) -> Result<Room, GameError> {
    let name = player_name(name)?;
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(GameError::MissingRoomCode);
    }
    info!(%code, "joined room");
    Ok(Room {
        code,
        players: vec![
            RoomPlayer {
                name: SIMULATED_HOST_NAME.to_string(),
                ready: true,
                is_host: true,
            },
            RoomPlayer {
                name: name.clone(),
                ready: false,
                is_host: false,
            },
        ],
        is_host: false,
        player_name: name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_generate_code() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let code = generate_code(&mut rng);
            assert_eq!(code.len(), ROOM_CODE_LENGTH);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_create() {
        let mut rng = StdRng::seed_from_u64(3);
        let room = create("  Ada  ", &mut rng).unwrap();
        assert!(room.is_host);
        assert_eq!(room.player_name, "Ada");
        assert_eq!(room.players.len(), 1);
        assert_eq!(room.host().map(|p| p.name.as_str()), Some("Ada"));
        assert!(!room.players[0].ready);
    }

    #[test]
    fn test_create_requires_name() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(create("   ", &mut rng), Err(GameError::MissingPlayerName));
    }

    #[test]
    fn test_join() {
        let room = join("Bo", "ab12cd").unwrap();
        assert_eq!(room.code, "AB12CD");
        assert!(!room.is_host);
        assert_eq!(room.host().map(|p| p.name.as_str()), Some(SIMULATED_HOST_NAME));
        assert!(room.players[0].ready);
        assert_eq!(room.players[1].name, "Bo");
        assert!(!room.players[1].ready);
    }

    #[test]
    fn test_join_requires_name_and_code() {
        assert_eq!(join("", "ABCDEF"), Err(GameError::MissingPlayerName));
        assert_eq!(join("Bo", " "), Err(GameError::MissingRoomCode));
    }

    #[test]
    fn test_long_names_are_truncated() {
        let room = join(&"x".repeat(100), "ABCDEF").unwrap();
        assert_eq!(room.player_name.len(), MAX_NAME_LENGTH);
    }
}
