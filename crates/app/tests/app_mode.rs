use app::app_loop::AppState;
use crawler_core::{
    Enemy, EnemyKind, GameConfig, Grid, LevelLayout, LevelState, Mode, Pos, RandomSource,
    ScriptedRng, TurnReport,
};
use macroquad::prelude::KeyCode;

fn corridor_with_zombie(faces: &[u8]) -> LevelState {
    let layout = LevelLayout {
        grid: Grid::from_ascii(".....").expect("fixture"),
        player: Pos::new(0, 0),
        portal: Pos::new(0, 4),
        enemies: vec![Enemy { health: 1, ..Enemy::spawn(EnemyKind::Zombie, Pos::new(0, 2), 1) }],
    };
    let factory = |_: &Grid, _: u32, _: &mut dyn RandomSource| Vec::<Enemy>::new();
    LevelState::from_layout(
        GameConfig::default(),
        layout,
        Box::new(ScriptedRng::dice(faces.iter().copied())),
        Box::new(factory),
    )
    .expect("fixture level")
}

#[test]
fn space_rolls_in_combat_and_arrows_are_rejected() {
    let mut level = corridor_with_zombie(&[6, 1]);
    let mut app = AppState::new();

    app.tick(&mut level, &[KeyCode::Right]);
    assert_eq!(level.mode(), Mode::InCombat);
    assert!(matches!(app.last_report, Some(TurnReport::CombatStarted { .. })));

    app.tick(&mut level, &[KeyCode::Left]);
    assert!(app.last_rejection.is_some(), "moving mid-fight is refused");
    assert_eq!(level.player().pos, Pos::new(0, 1));

    app.tick(&mut level, &[KeyCode::Space, KeyCode::Space, KeyCode::Space]);
    assert!(matches!(
        app.last_report,
        Some(TurnReport::CombatEnded(outcome)) if outcome.player_won
    ));
    assert!(app.last_rejection.is_none());
    assert_eq!(level.mode(), Mode::Exploring);
}

#[test]
fn space_descends_only_from_the_portal() {
    let mut level = corridor_with_zombie(&[6, 1]);
    let mut app = AppState::new();

    app.tick(&mut level, &[KeyCode::Space]);
    assert_eq!(app.last_report, Some(TurnReport::NotOnPortal));
    assert_eq!(level.level_number(), 1);
}

#[test]
fn escape_requests_quit_and_stops_the_frame() {
    let mut level = corridor_with_zombie(&[]);
    let mut app = AppState::new();

    app.tick(&mut level, &[KeyCode::Escape, KeyCode::Right]);
    assert!(app.quit_requested);
    assert_eq!(level.player().pos, Pos::new(0, 0), "keys after Escape are dropped");
}

#[test]
fn unbound_keys_leave_the_level_alone() {
    let mut level = LevelState::with_seed(GameConfig::default(), 12345).expect("level");
    let mut app = AppState::new();
    let before = level.snapshot_hash();

    for key in [KeyCode::U, KeyCode::PageUp, KeyCode::W] {
        app.tick(&mut level, &[key]);
    }
    assert_eq!(level.snapshot_hash(), before);
    assert_eq!(app.last_report, None);
}
