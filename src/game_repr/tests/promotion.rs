use super::*;

// ==================== PROMOTION TESTS ====================

#[test]
fn test_player_one_man_promotes_on_row_zero() {
    let pos = board(Side::One, ".... b... .... .... .... .... .... ....");

    let next = pos.apply_move(&mv("A2 B1"), true);
    assert_eq!(next.piece_at(sq("B1")), Piece::P1King);
    assert_eq!(next.piece_at(sq("A2")), Piece::Empty);
    assert_eq!(next.active_player(), Side::Two);
}

#[test]
fn test_player_two_man_promotes_on_row_seven() {
    let pos = board(Side::Two, ".... .... .... .... .... .... r... ....");

    let next = pos.apply_move(&mv("B7 A8"), true);
    assert_eq!(next.piece_at(sq("A8")), Piece::P2King);
}

#[test]
fn test_king_reaching_far_row_stays_king() {
    let pos = board(Side::One, ".... .... .... .... .... .... B... ....");

    let next = pos.apply_move(&mv("B7 A8"), true);
    assert_eq!(next.piece_at(sq("A8")), Piece::P1King);
}

#[test]
fn test_scratch_move_does_not_promote_or_end_turn() {
    let pos = board(Side::One, ".... b... .... .... .... .... .... ....");

    let scratch = pos.apply_move(&mv("A2 B1"), false);
    assert_eq!(scratch.piece_at(sq("B1")), Piece::P1Man);
    assert_eq!(scratch.active_player(), Side::One);
}

#[test]
fn test_chain_stops_when_man_reaches_back_rank() {
    // After B3xD1 a king could continue over E2, a man cannot
    let pos = board(Side::One, ".... .rr. b... .... .... .... .... ....");

    let moves = pos.legal_moves();
    assert_eq!(move_strings(&moves), vec!["B3 D1"]);

    let next = pos.apply_move(&moves[0], true);
    assert_eq!(next.piece_at(sq("D1")), Piece::P1King);
    assert_eq!(next.piece_at(sq("E2")), Piece::P2Man, "crowning ends the move");
}

#[test]
fn test_chain_ending_on_back_rank_promotes() {
    let pos = board(Side::One, ".... .r.. .... .r.. b... .... .... ....");

    let moves = pos.legal_moves();
    assert_eq!(move_strings(&moves), vec!["B5 D3 B1"]);

    let next = pos.apply_move(&moves[0], true);
    assert_eq!(next.piece_at(sq("B1")), Piece::P1King);
    assert_eq!(next.count(Side::Two), 0);
}
