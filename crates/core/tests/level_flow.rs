use crawler_core::visibility::has_line_of_sight;
use crawler_core::{
    CombatPhase, CombatSession, CoreError, Enemy, EnemyKind, GameConfig, Grid, Intent,
    LevelLayout, LevelState, Mode, Pos, RandomSource, ScriptedRng, TurnReport,
};

fn fixture(text: &str) -> Grid {
    Grid::from_ascii(text).expect("fixture map should parse")
}

fn zombie(pos: Pos, health: i32) -> Enemy {
    Enemy { health, ..Enemy::spawn(EnemyKind::Zombie, pos, 1) }
}

fn level_on(layout: LevelLayout, rng: ScriptedRng, config: GameConfig) -> LevelState {
    let factory = |_: &Grid, _: u32, _: &mut dyn RandomSource| Vec::<Enemy>::new();
    LevelState::from_layout(config, layout, Box::new(rng), Box::new(factory))
        .expect("fixture level")
}

#[test]
fn two_floor_cells_see_each_other() {
    let map = fixture("..");
    assert_eq!(has_line_of_sight(&map, Pos::new(0, 0), Pos::new(0, 1)), Ok(true));
}

#[test]
fn six_against_three_on_last_health_wins() {
    let mut session = CombatSession::new(1, &zombie(Pos::new(0, 1), 1));
    let mut rng = ScriptedRng::dice([6, 3]);
    session.advance(&mut rng);
    session.advance(&mut rng);
    let CombatPhase::Concluded(outcome) = session.advance(&mut rng) else {
        panic!("a decisive roll on last health should end the duel");
    };
    assert!(outcome.player_won);
    assert_eq!(outcome.enemy_health, 0);
}

#[test]
fn move_into_wall_keeps_player_enemies_and_health() {
    let layout = LevelLayout {
        grid: fixture(
            "
            #####
            #...#
            #...#
            #####
            ",
        ),
        player: Pos::new(1, 1),
        portal: Pos::new(2, 3),
        enemies: vec![zombie(Pos::new(2, 3), 3)],
    };
    let mut level = level_on(layout, ScriptedRng::new([0, 1, 2, 3]), GameConfig::default());
    let before = level.snapshot();

    assert_eq!(level.apply(Intent::MoveUp), Ok(TurnReport::Blocked));
    assert_eq!(level.apply(Intent::MoveLeft), Ok(TurnReport::Blocked));
    assert_eq!(level.snapshot(), before);
    assert!(level.combat().is_none());
}

#[test]
fn descend_off_portal_keeps_the_level_number() {
    let layout = LevelLayout {
        grid: fixture("...."),
        player: Pos::new(0, 0),
        portal: Pos::new(0, 3),
        enemies: Vec::new(),
    };
    let mut level = level_on(layout, ScriptedRng::default(), GameConfig::default());
    assert_eq!(level.apply(Intent::Descend), Ok(TurnReport::NotOnPortal));
    assert_eq!(level.level_number(), 1);
}

#[test]
fn full_duel_through_the_level_reports_every_phase() {
    let layout = LevelLayout {
        grid: fixture("...."),
        player: Pos::new(0, 0),
        portal: Pos::new(0, 3),
        enemies: vec![zombie(Pos::new(0, 2), 1)],
    };
    let mut level = level_on(layout, ScriptedRng::dice([4, 4, 5, 2]), GameConfig::default());

    let Ok(TurnReport::CombatStarted { enemy }) = level.apply(Intent::MoveRight) else {
        panic!("the zombie should step onto the player");
    };
    assert_eq!(level.mode(), Mode::InCombat);

    let reports: Vec<TurnReport> = (0..6)
        .map(|_| level.apply(Intent::ConfirmOrRoll).expect("roll accepted"))
        .collect();
    assert_eq!(
        &reports[..5],
        &[
            TurnReport::CombatRolled(CombatPhase::AwaitingEnemyRoll { player_roll: 4 }),
            TurnReport::CombatRolled(CombatPhase::RoundResolved { player_roll: 4, enemy_roll: 4 }),
            TurnReport::CombatRolled(CombatPhase::AwaitingPlayerRoll),
            TurnReport::CombatRolled(CombatPhase::AwaitingEnemyRoll { player_roll: 5 }),
            TurnReport::CombatRolled(CombatPhase::RoundResolved { player_roll: 5, enemy_roll: 2 }),
        ]
    );
    let TurnReport::CombatEnded(outcome) = reports[5] else {
        panic!("second round should finish the duel, got {:?}", reports[5]);
    };
    assert!(outcome.player_won);
    assert_eq!(outcome.enemy, enemy);
    assert_eq!(level.enemy_count(), 0);
    assert_eq!(level.player().health, 100, "the tie cost nothing");
    assert_eq!(level.mode(), Mode::Exploring);
    assert_eq!(level.apply(Intent::MoveRight), Ok(TurnReport::Moved));
}

#[test]
fn defeat_freezes_the_run_until_quit() {
    let layout = LevelLayout {
        grid: fixture("..."),
        player: Pos::new(0, 0),
        portal: Pos::new(0, 0),
        enemies: vec![zombie(Pos::new(0, 2), 5)],
    };
    let config = GameConfig { player_max_health: 2, ..GameConfig::default() };
    let mut level = level_on(layout, ScriptedRng::dice([1, 2, 3, 4]), config);
    assert!(matches!(level.apply(Intent::MoveRight), Ok(TurnReport::CombatStarted { .. })));

    while level.mode() == Mode::InCombat {
        level.apply(Intent::ConfirmOrRoll).expect("roll accepted");
    }
    assert!(level.is_game_over());
    assert!(!level.is_game_won());
    assert_eq!(level.player().health, 0);

    let hash = level.snapshot_hash();
    for intent in [Intent::MoveLeft, Intent::Descend, Intent::ConfirmOrRoll] {
        assert_eq!(level.apply(intent), Ok(TurnReport::Ignored));
    }
    assert_eq!(level.snapshot_hash(), hash);
    assert_eq!(level.apply(Intent::Quit), Ok(TurnReport::QuitRequested));
}

#[test]
fn illegal_intents_name_the_current_mode() {
    let layout = LevelLayout {
        grid: fixture(".."),
        player: Pos::new(0, 0),
        portal: Pos::new(0, 1),
        enemies: Vec::new(),
    };
    let mut level = level_on(layout, ScriptedRng::default(), GameConfig::default());
    let err = level.apply(Intent::ConfirmOrRoll).expect_err("no duel to roll in");
    assert_eq!(
        err,
        CoreError::IllegalAction { intent: Intent::ConfirmOrRoll, mode: Mode::Exploring }
    );
    assert_eq!(err.to_string(), "ConfirmOrRoll is not accepted in Exploring mode");
}
