use super::*;

// ==================== APPLY MOVE TESTS ====================

#[test]
fn test_apply_move_returns_new_board() {
    let start = BoardState::starting();
    let next = start.apply_move(&mv("C6 D5"), true);

    assert_eq!(start, BoardState::starting(), "original must be untouched");
    assert_ne!(start.canonical_hash(), next.canonical_hash());
    assert_eq!(next.piece_at(sq("C6")), Piece::Empty);
    assert_eq!(next.piece_at(sq("D5")), Piece::P1Man);
    assert_eq!(next.active_player(), Side::Two);
}

#[test]
fn test_clone_is_independent() {
    let next = BoardState::starting().apply_move(&mv("C6 D5"), true);
    let mut copy = next.clone();
    copy.set_piece(sq("A6"), Piece::Empty);
    copy.set_active_player(Side::One);

    assert_eq!(next.piece_at(sq("A6")), Piece::P1Man);
    assert_eq!(next.active_player(), Side::Two);
    assert_ne!(copy.canonical_hash(), next.canonical_hash());
}

#[test]
fn test_single_capture_removes_jumped_piece() {
    let pos = board(Side::One, ".... .... .... .... .r.. .b.b .... ....");
    let next = pos.apply_move(&mv("C6 E4"), true);

    assert_eq!(next.piece_at(sq("D5")), Piece::Empty);
    assert_eq!(next.piece_at(sq("E4")), Piece::P1Man);
    assert_eq!(next.count(Side::Two), 0);
    assert_eq!(next.count(Side::One), 2);
}

#[test]
fn test_chain_removes_every_jumped_piece() {
    let pos = board(Side::One, ".... .... .r.. .... r... b... .... ....");
    let next = pos.apply_move(&mv("A6 C4 E2"), true);

    assert_eq!(next.piece_at(sq("B5")), Piece::Empty);
    assert_eq!(next.piece_at(sq("D3")), Piece::Empty);
    assert_eq!(next.piece_at(sq("C4")), Piece::Empty, "intermediate square stays empty");
    assert_eq!(next.piece_at(sq("E2")), Piece::P1Man);
}

#[test]
fn test_every_generated_move_changes_the_hash() {
    let positions = [
        BoardState::starting(),
        board(Side::One, ".... .... r... .... rr.. .b.. .... ...."),
        board(Side::Two, ".... .... .r.. .b.. .... .... .... ...."),
    ];
    for pos in positions {
        for m in pos.legal_moves() {
            let next = pos.apply_move(&m, true);
            assert_ne!(pos.canonical_hash(), next.canonical_hash(), "move {m}");
        }
    }
}

#[test]
#[should_panic(expected = "neither a step nor a jump")]
fn test_malformed_move_is_fatal() {
    let pos = BoardState::starting();
    // Move::new skips validation, so the board has to catch it
    pos.apply_move(&Move::new(sq("A6"), sq("A4")), true);
}
