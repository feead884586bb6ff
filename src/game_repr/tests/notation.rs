use super::*;

// ==================== NOTATION TESTS ====================

#[test]
fn test_generated_moves_round_trip_through_text() {
    let mut positions = vec![
        board(Side::One, ".... .... r... .... rr.. .b.. .... ...."),
        board(Side::One, ".... .... .... .B.. r... .... .... ...."),
    ];
    let start = BoardState::starting();
    for first in start.legal_moves() {
        let after = start.apply_move(&first, true);
        for second in after.legal_moves() {
            positions.push(after.apply_move(&second, true));
        }
        positions.push(after);
    }

    for pos in &positions {
        for m in pos.legal_moves() {
            let text = m.to_string();
            assert_eq!(text.parse::<Move>(), Ok(m.clone()), "round trip of {text}");
        }
    }
}

#[test]
fn test_parse_is_case_insensitive() {
    assert_eq!("a6 b5".parse::<Move>(), Ok(mv("A6 B5")));
    assert_eq!("  C6   E4 ".parse::<Move>(), Ok(mv("C6 E4")));
}

#[test]
fn test_chain_display() {
    let m = Move::with_path(sq("A6"), &[sq("C4"), sq("E2")]).unwrap();
    assert_eq!(m.to_string(), "A6 C4 E2");
}

#[test]
fn test_parse_errors() {
    assert_eq!("".parse::<Move>(), Err(ParseMoveError::Empty));
    assert_eq!("A6".parse::<Move>(), Err(ParseMoveError::MissingDestination));
    assert_eq!(
        "6A B5".parse::<Move>(),
        Err(ParseMoveError::BadToken("6A".to_string()))
    );
    assert_eq!(
        "A6 B".parse::<Move>(),
        Err(ParseMoveError::BadToken("B".to_string()))
    );
    assert_eq!(
        "I1 H2".parse::<Move>(),
        Err(ParseMoveError::OffBoard("I1".to_string()))
    );
    assert_eq!(
        "A9 B8".parse::<Move>(),
        Err(ParseMoveError::OffBoard("A9".to_string()))
    );
    assert_eq!(
        "A1 B2".parse::<Move>(),
        Err(ParseMoveError::LightSquare("A1".to_string()))
    );
    assert!(matches!(
        "A6 A4".parse::<Move>(),
        Err(ParseMoveError::InvalidChain(MoveError::MalformedHop { .. }))
    ));
}
