#![allow(clippy::unwrap_used, clippy::expect_used)]

use {
    fenbot_common::ReplyPayload,
    fenbot_config::RenderConfig,
    fenbot_game::{
        Anchor, AnchorRejection, ChatMessage, Command, GameEngine, Side, resolve_anchor,
    },
    fenbot_rules::START_FEN,
    rstest::{fixture, rstest},
};

const BOT: u64 = 1000;

#[fixture]
fn engine() -> GameEngine {
    GameEngine::new(&RenderConfig {
        size: 128,
        ..RenderConfig::default()
    })
    .unwrap()
}

/// Resolve `text` against `previous` as the bot would.
fn run(engine: &GameEngine, previous: &ReplyPayload, text: &str) -> ReplyPayload {
    let command = Command::parse(text).unwrap();
    let message = ChatMessage::new(BOT, previous.text.clone());
    let anchor = resolve_anchor(Some(&message), BOT).unwrap();
    engine.respond(&command, &anchor).unwrap()
}

#[rstest]
#[case(START_FEN)]
#[case("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")]
#[case("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")]
#[case("8/8/8/8/8/8/8/K6k b - - 12 60")]
fn setup_round_trips_fen(engine: GameEngine, #[case] fen: &str) {
    let reply = engine.setup(Some(fen)).unwrap();
    let anchor = Anchor::parse(&reply.text).unwrap();
    assert_eq!(anchor, Anchor::new(fen, Side::White));
    assert!(reply.attachment.is_some());
}

#[rstest]
fn setup_with_bad_fen_has_no_board(engine: GameEngine) {
    let reply = engine.setup(Some("not a fen")).unwrap();
    assert!(reply.text.starts_with("**Invalid FEN**\n`"));
    assert!(reply.text.ends_with('`'));
    assert!(reply.attachment.is_none());
    assert!(Anchor::parse(&reply.text).is_none());
}

#[rstest]
fn three_moves_from_start(engine: GameEngine) {
    let start = engine.setup(None).unwrap();
    let reply = run(&engine, &start, "move e4 e5 Nf3");

    let lines: Vec<&str> = reply.text.lines().collect();
    assert_eq!(
        lines,
        [
            "**FEN** `rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2` **W**",
            "**Moved `e4 e5 Nf3`**",
            "**Black to play, move 2**",
        ]
    );
    assert_eq!(reply.attachment.unwrap().filename, "position.png");
}

#[rstest]
fn illegal_move_aborts_the_batch(engine: GameEngine) {
    let start = engine.setup(None).unwrap();
    let reply = run(&engine, &start, "move e4 Ke3 d4");

    assert!(reply.text.starts_with("**Invalid move `Ke3`**\n`"));
    assert!(reply.attachment.is_none());
    // No board header, so nothing can chain from the error reply.
    assert!(Anchor::parse(&reply.text).is_none());

    // The earlier reply still anchors the untouched position.
    let again = run(&engine, &start, "status");
    assert!(again.first_line().contains(START_FEN));
}

#[rstest]
fn flip_toggles_side_and_keeps_fen(engine: GameEngine) {
    let start = engine.setup(None).unwrap();
    let flipped = run(&engine, &start, "flip");
    assert_eq!(flipped.first_line(), format!("**FEN** `{START_FEN}` **B**"));
    assert!(flipped.text.contains("**Flipped board**"));

    let back = run(&engine, &flipped, "flip");
    assert_eq!(back.first_line(), start.first_line());

    // Moves keep the flipped perspective.
    let moved = run(&engine, &flipped, "move d4");
    assert!(moved.first_line().ends_with("**B**"));
}

#[rstest]
fn status_repeats_position(engine: GameEngine) {
    let start = engine.setup(None).unwrap();
    let moved = run(&engine, &start, "move e4");
    let status = run(&engine, &moved, "status");

    assert_eq!(status.first_line(), moved.first_line());
    assert_eq!(status.text.lines().nth(1), Some("**Status**"));
    assert!(status.attachment.is_some());
}

#[rstest]
fn checkmate_is_reported(engine: GameEngine) {
    let start = engine.setup(None).unwrap();
    let reply = run(&engine, &start, "move f3 e5 g4 Qh4#");
    let lines: Vec<&str> = reply.text.lines().collect();
    assert_eq!(lines[2], "**White to play, move 3**");
    assert_eq!(lines[3], "**Checkmate**");
}

#[rstest]
fn uci_tokens_are_accepted(engine: GameEngine) {
    let start = engine.setup(None).unwrap();
    let san = run(&engine, &start, "move e4 e5 Nf3");
    let uci = run(&engine, &start, "move e2e4 e7e5 g1f3");
    assert_eq!(san.first_line(), uci.first_line());
}

#[rstest]
fn invalid_fen_in_anchor_is_reported(engine: GameEngine) {
    let anchor = Anchor::new("8/8/8 w - - 0 1", Side::White);
    let reply = engine.respond(&Command::Status, &anchor).unwrap();
    assert!(reply.text.starts_with("**Invalid FEN**"));
    assert!(reply.attachment.is_none());
}

#[rstest]
fn plain_setup_ignores_anchor(engine: GameEngine) {
    let anchor = Anchor::new("garbage", Side::Black);
    let command = Command::parse("setup").unwrap();
    let reply = engine.respond(&command, &anchor).unwrap();
    assert_eq!(reply.first_line(), format!("**FEN** `{START_FEN}` **W**"));
}

#[test]
fn non_bot_anchor_is_ignored() {
    let human = ChatMessage::new(7, format!("**FEN** `{START_FEN}` **W**"));
    assert_eq!(
        resolve_anchor(Some(&human), BOT),
        Err(AnchorRejection::WrongAuthor)
    );
}
