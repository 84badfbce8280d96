//! Resolution tests - special creation, chain reactions and pass scoring

use match_three::core::{find_match_groups, resolve_matches, Board};
use match_three::types::{Color, Position, Token, TokenKind};

fn board(text: &str) -> Board {
    Board::from_text(text).unwrap()
}

#[test]
fn test_four_run_positions_across_rows() {
    for row in 0..4 {
        let mut lines = vec!["BGYP", "GYPB", "YPBG", "PBGY"];
        lines[row] = "RRRR";
        let b = board(&lines.join("\n"));
        let groups = find_match_groups(&b);
        let res = resolve_matches(&b, &groups);

        assert_eq!(res.created.len(), 1, "row {row}");
        assert_eq!(res.created[0].pos, Position::new(row, 1));
        assert_eq!(res.created[0].token.kind(), TokenKind::ColumnClear);
        assert_eq!(
            res.board.get(Position::new(row, 1)).unwrap().kind(),
            TokenKind::ColumnClear
        );
    }
}

#[test]
fn test_vertical_four_run_makes_row_clear() {
    let b = board(
        "GBYP
         GYPB
         GPBY
         GBPY",
    );
    let res = resolve_matches(&b, &find_match_groups(&b));
    assert_eq!(res.created.len(), 1);
    assert_eq!(res.created[0].pos, Position::new(1, 0));
    assert_eq!(res.created[0].token.kind(), TokenKind::RowClear);
    assert_eq!(res.created[0].token.color(), Color::Green);
    assert_eq!(res.cleared.len(), 3);
}

#[test]
fn test_five_run_makes_one_bomb_at_middle() {
    let b = board(
        "BGYPO
         OOOOO
         GYPBR
         YPBRG
         PBRGY",
    );
    let res = resolve_matches(&b, &find_match_groups(&b));
    assert_eq!(res.created.len(), 1);
    assert_eq!(res.created[0].pos, Position::new(1, 2));
    assert!(res.created[0].token.is_color_bomb());
    assert!(!res.cleared.contains(Position::new(1, 2)));
    assert!(res.board.get(Position::new(1, 2)).unwrap().is_color_bomb());
    assert_eq!(res.cleared.len(), 4);
    assert_eq!(res.score, 500 + 4 * 60);
}

#[test]
fn test_intersection_makes_single_area_clear() {
    // L shape of yellows sharing (2,2)
    let b = board(
        "RBYGR
         BGYRB
         YYYBG
         GRBGR
         RBGRB",
    );
    let groups = find_match_groups(&b);
    assert_eq!(groups.len(), 2);
    let res = resolve_matches(&b, &groups);

    assert_eq!(res.created.len(), 1);
    assert_eq!(res.created[0].pos, Position::new(2, 2));
    assert_eq!(res.created[0].token.kind(), TokenKind::AreaClear);
    assert_eq!(res.created[0].token.color(), Color::Yellow);
    // both groups minus the shared cell
    assert_eq!(res.cleared.len(), 4);
    assert_eq!(res.score, 500 + 4 * 60);
}

#[test]
fn test_row_clear_caught_in_match_takes_its_row() {
    let mut b = board(
        "RRRB
         BGYG
         GBGY
         YGBP",
    );
    // the red row clear inside the run also takes (0,3)
    b.set(Position::new(0, 2), Token::special(Color::Red, TokenKind::RowClear));
    let res = resolve_matches(&b, &find_match_groups(&b));
    assert_eq!(res.specials_destroyed, 1);
    assert_eq!(res.cleared.len(), 4);
    assert!(res.cleared.contains(Position::new(0, 3)));
    assert_eq!(res.score, 4 * 60 + 200);
}

#[test]
fn test_resolution_does_not_touch_input() {
    let b = board(
        "RRRB
         BGYG
         GBGY
         YGBP",
    );
    let before = b.clone();
    let res = resolve_matches(&b, &find_match_groups(&b));
    assert_eq!(b, before);
    assert_eq!(res.board.count_empty(), 3);
}

#[test]
fn test_four_run_crossing_three_run_makes_only_area_clear() {
    let b = board(
        "BGYPG
         GYPBY
         RRRRO
         RBGYB
         RYBGP",
    );
    let res = resolve_matches(&b, &find_match_groups(&b));

    assert_eq!(res.created.len(), 1);
    assert_eq!(res.created[0].pos, Position::new(2, 0));
    assert_eq!(
        res.created[0].token,
        Token::special(Color::Red, TokenKind::AreaClear)
    );
    assert!(res.created.iter().all(|c| !matches!(
        c.token.kind(),
        TokenKind::ColumnClear | TokenKind::RowClear
    )));
    assert_eq!(res.cleared.len(), 5);
    assert_eq!(res.score, 500 + 5 * 60);
}

#[test]
fn test_five_run_crossing_three_run_makes_bomb_and_area_clear() {
    let b = board(
        "BGYPG
         GYPBY
         RRRRR
         RBGYB
         RYBGP",
    );
    let res = resolve_matches(&b, &find_match_groups(&b));

    assert_eq!(res.created.len(), 2);
    assert!(res
        .created
        .iter()
        .any(|c| c.pos == Position::new(2, 2) && c.token == Token::color_bomb()));
    assert!(res.created.iter().any(|c| c.pos == Position::new(2, 0)
        && c.token == Token::special(Color::Red, TokenKind::AreaClear)));
    assert_eq!(res.board.get(Position::new(2, 2)), Some(Token::color_bomb()));
    assert_eq!(res.cleared.len(), 5);
    assert_eq!(res.score, 2 * 500 + 5 * 60);
}
