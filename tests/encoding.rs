//! Integration tests for the textual encoding: exact grammar, round-trips,
//! canonical re-sorting, and rejection of malformed records.

use dart_score::{DartGame, GameError, Player};
use rand::Rng;

#[test]
fn player_encodes_to_the_fixed_grammar() {
    let mut player = Player::new(373051, "John").unwrap();
    assert_eq!(player.encode(), "Player(i:373051,n:John,p:0)");
    player.add_points(140);
    assert_eq!(player.encode(), "Player(i:373051,n:John,p:140)");
}

#[test]
fn player_round_trips() {
    let mut player = Player::new(676584, "Doe").unwrap();
    player.add_points(57);
    assert_eq!(Player::decode(&player.encode()).unwrap(), player);
}

#[test]
fn player_names_keep_inner_spaces() {
    let player = Player::new(7, "🎯 John").unwrap();
    assert_eq!(Player::decode(&player.encode()).unwrap().name, "🎯 John");
}

#[test]
fn player_decode_rejects_malformed_records() {
    for text in [
        "",
        "Player()",
        "Player(i:12,n:John)",
        "Player(i:abc,n:John,p:0)",
        "Player(i:12,n:John,p:x)",
        "player(i:12,n:John,p:0)",
        "Player(i:12,n:John,p:0",
    ] {
        assert!(
            matches!(Player::decode(text), Err(GameError::MalformedPlayerRecord)),
            "accepted {text:?}"
        );
    }
}

#[test]
fn names_with_reserved_characters_are_rejected_at_construction() {
    for name in ["Jo,hn", "Jo:hn", "Jo(hn", "Jo)hn", "", "   "] {
        assert!(
            matches!(Player::new(1, name), Err(GameError::InvalidPlayerName)),
            "accepted {name:?}"
        );
    }
}

#[test]
fn game_encodes_to_the_fixed_grammar() {
    let players = vec![Player::new(1, "A").unwrap(), Player::new(2, "B").unwrap()];
    let game = DartGame::new(players, 42).unwrap();
    assert_eq!(
        game.encode(),
        "DartGame(d:42,r:0,pi:0,p:[Player(i:1,n:A,p:0),Player(i:2,n:B,p:0)])"
    );
}

#[test]
fn game_round_trips() {
    let players = vec![
        Player::new(10, "Ann").unwrap(),
        Player::new(20, "Ben").unwrap(),
        Player::new(30, "Cid").unwrap(),
    ];
    let game = DartGame::with_state(players, 1_700_000_000_000, 7, 2).unwrap();
    assert_eq!(DartGame::decode(&game.encode()).unwrap(), game);
}

#[test]
fn decode_re_sorts_players_by_id() {
    let blob = "DartGame(d:1,r:0,pi:0,p:[Player(i:20,n:B,p:5),Player(i:10,n:A,p:9)])";
    let game = DartGame::decode(blob).unwrap();
    let ids: Vec<u32> = game.players().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![10, 20]);
}

#[test]
fn decode_rejects_malformed_blobs() {
    for text in [
        "",
        "garbage",
        "DartGame()",
        "DartGame(d:1,r:0,pi:0)",
        "DartGame(d:abc,r:0,pi:0,p:[Player(i:1,n:A,p:0)])",
        "DartGame(d:1,r:x,pi:0,p:[Player(i:1,n:A,p:0)])",
        "DartGame(d:1,r:0,pi:0,p:Player(i:1,n:A,p:0))",
        "DartGame(d:1,r:0,pi:0,p:[Player(i:1,n:A,p:0)]",
    ] {
        assert!(
            matches!(DartGame::decode(text), Err(GameError::InvalidEncoding)),
            "accepted {text:?}"
        );
    }
}

#[test]
fn decode_rejects_a_malformed_inner_player() {
    let blob = "DartGame(d:1,r:0,pi:0,p:[Player(i:1,n:A,p:0),Player(oops)])";
    assert!(matches!(
        DartGame::decode(blob),
        Err(GameError::MalformedPlayerRecord)
    ));
}

#[test]
fn decode_rejects_an_empty_roster() {
    assert!(DartGame::decode("DartGame(d:1,r:0,pi:0,p:[])").is_err());
}

#[test]
fn decode_rejects_a_turn_pointer_past_the_roster() {
    let blob = "DartGame(d:1,r:0,pi:2,p:[Player(i:1,n:A,p:0),Player(i:2,n:B,p:0)])";
    assert!(matches!(
        DartGame::decode(blob),
        Err(GameError::InvalidMatchState)
    ));
}

#[test]
fn randomized_states_round_trip() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let count = rng.gen_range(1..=6);
        let mut ids = std::collections::BTreeSet::new();
        while ids.len() < count {
            ids.insert(rng.gen_range(0..1_000_000u32));
        }
        let players: Vec<Player> = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let mut p = Player::new(id, format!("Player {i}")).unwrap();
                p.set_points(rng.gen_range(0..=501));
                p
            })
            .collect();
        let game = DartGame::with_state(
            players,
            rng.gen_range(0..=2_000_000_000_000i64),
            rng.gen_range(0..=50),
            rng.gen_range(0..count),
        )
        .unwrap();

        let decoded = DartGame::decode(&game.encode()).unwrap();
        assert_eq!(decoded, game, "round trip changed {}", game.encode());
    }
}
