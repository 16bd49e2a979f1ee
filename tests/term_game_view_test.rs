use blockfall::core::{Board, EngineConfig, GameState, Randomizer};
use blockfall::term::game_view::ENCOURAGEMENTS;
use blockfall::term::{AnchorY, FrameBuffer, GameView, RecordsView, Viewport};
use blockfall::types::{Phase, PieceKind};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).unwrap().ch);
        }
        all.push('\n');
    }
    all
}

fn running_state() -> GameState {
    let mut gs = GameState::with_seed(1);
    gs.start();
    gs
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::with_seed(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_frame_follows_board_dimensions() {
    let config = EngineConfig {
        width: 6,
        height: 8,
        ..EngineConfig::default()
    };
    let snap = GameState::new(config).snapshot();

    // 6*2 + 2 = 14 wide, 8 + 2 = 10 tall.
    let fb = GameView::default().render(&snap, Viewport::new(14, 10));
    assert_eq!(fb.get(13, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 9).unwrap().ch, '└');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = running_state().snapshot();
    // Put a locked I block at bottom-left.
    snap.board[19 * 10] = Some(PieceKind::I);
    snap.active = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let x0 = 1;
    let y0 = 1 + 19;
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    // Neighbouring empty cell shows the grid dot.
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece() {
    let state = GameState::from_board(
        EngineConfig::default(),
        Board::standard(),
        Randomizer::scripted(vec![PieceKind::O]),
    );
    let snap = state.snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // O at board (4..=5, 0..=1) => columns 9..=12, rows 1..=2.
    for y in 1..=2 {
        for x in 9..=12 {
            let cell = fb.get(x, y).unwrap();
            assert_eq!(cell.ch, '█');
            assert!(cell.style.bold);
        }
    }
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = running_state().snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;
    snap.play_time_ms = 125_000;

    // Wider than the 22x22 board frame to allow a panel.
    let all = screen_text(&GameView::default().render(&snap, Viewport::new(60, 22)));

    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("LEVEL"));
    assert!(all.contains("LINES"));
    assert!(all.contains("COMBO"));
    assert!(all.contains("NEXT"));
    assert!(all.contains("02:05"));
}

#[test]
fn term_view_omits_side_panel_when_narrow() {
    let snap = running_state().snapshot();
    let all = screen_text(&GameView::default().render(&snap, Viewport::new(30, 22)));
    assert!(!all.contains("SCORE"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameState::with_seed(1).snapshot();

    // Board frame is 22 rows tall (20 + border).
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = GameState::with_seed(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    let fb = view.render(&snap, Viewport::new(22, 30));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_overlays_follow_phase() {
    let view = GameView::default();
    let mut snap = GameState::with_seed(1).snapshot();
    assert_eq!(snap.phase, Phase::Ready);
    let all = screen_text(&view.render(&snap, Viewport::new(22, 22)));
    assert!(all.contains("READY"));

    snap.phase = Phase::Paused;
    let all = screen_text(&view.render(&snap, Viewport::new(22, 22)));
    assert!(all.contains("PAUSED"));
    assert!(!all.contains("READY"));

    snap.phase = Phase::Running;
    let all = screen_text(&view.render(&snap, Viewport::new(22, 22)));
    assert!(!all.contains("PAUSED"));
}

#[test]
fn term_view_game_over_shows_score_and_unlock() {
    let mut snap = running_state().snapshot();
    snap.phase = Phase::GameOver;
    snap.active = None;
    snap.score = 4321;

    let records = RecordsView {
        best_score: 9000,
        games_played: 12,
        unlocked: Some("First Steps"),
    };
    let fb = GameView::default().render_with_records(&snap, Some(&records), Viewport::new(60, 22));
    let all = screen_text(&fb);

    assert!(all.contains("GAME OVER"));
    assert!(all.contains("SCORE 4321"));
    assert!(all.contains("First Steps"));
    assert!(all.contains("R TO RESTART"));
}

#[test]
fn term_view_shows_best_score_from_records() {
    let snap = running_state().snapshot();
    let records = RecordsView {
        best_score: 98765,
        games_played: 3,
        unlocked: None,
    };
    let fb = GameView::default().render_with_records(&snap, Some(&records), Viewport::new(60, 22));
    let all = screen_text(&fb);

    assert!(all.contains("BEST"));
    assert!(all.contains("98765"));
    assert!(all.contains("games"));
}

#[test]
fn term_view_game_over_without_unlock_encourages() {
    let mut snap = running_state().snapshot();
    snap.phase = Phase::GameOver;
    snap.active = None;
    snap.score = 120;

    let records = RecordsView {
        best_score: 9000,
        games_played: 4,
        unlocked: None,
    };
    let fb = GameView::default().render_with_records(&snap, Some(&records), Viewport::new(60, 22));
    let all = screen_text(&fb);

    assert!(all.contains("SCORE 120"));
    assert!(ENCOURAGEMENTS.iter().any(|line| all.contains(line)));
    assert!(all.contains("R TO RESTART"));
}
