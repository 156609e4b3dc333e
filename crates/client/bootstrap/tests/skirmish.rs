use std::time::Duration;

use client_bootstrap::{ClientConfig, SandboxConfig, SandboxEngine, SessionBuilder};
use client_frontend_core::{Highlight, InteractionError, Preview};
use game_core::{Cell, CreatureId, PartId, PartTarget, Simulation, Stat};

const KNIGHT: CreatureId = CreatureId(1);
const GOBLIN: CreatureId = CreatureId(5);

fn goblin_head() -> PartTarget {
    PartTarget::new(GOBLIN, PartId(0))
}

/// Knight walks next to the goblin, previews and lands a lethal strike, then
/// the turn ends and action points are restored.
#[test]
fn test_knight_clears_the_goblin() {
    let setup = SessionBuilder::new(ClientConfig::default())
        .build()
        .expect("default config builds");
    let mut session = setup.session;

    session.tile_clicked(Cell::new(-1, 0)).unwrap();
    assert_eq!(session.active_mode(), Some("selected"));

    session.tile_clicked(Cell::ORIGIN).unwrap();
    session.advance(Duration::from_secs(1));
    assert_eq!(session.engine().creature(KNIGHT).unwrap().cell, Cell::ORIGIN);
    assert_eq!(session.mode_names(), ["idle", "selected"]);

    session.part_entered(goblin_head());
    let preview = session.snapshot();
    let preview = preview.get::<Preview>().unwrap();
    assert_eq!(preview.hp_delta(goblin_head()), Some(-4));
    assert_eq!(preview.floats().len(), 3, "cost, damage and the kill notice");
    session.part_left(goblin_head());

    session.part_clicked(goblin_head()).unwrap();
    session.advance(Duration::from_secs(1));
    assert!(session.engine().creature(GOBLIN).is_none());
    let knight = session.engine().creature(KNIGHT).unwrap();
    assert_eq!(knight.stat(Stat::ActionPoints), 1);
    assert_eq!(session.active_mode(), Some("selected"));

    session.end_turn().unwrap();
    assert_eq!(
        session.engine().creature(KNIGHT).unwrap().stat(Stat::ActionPoints),
        4
    );
    assert_eq!(session.mode_names(), ["idle", "selected"]);
    let snapshot = session.snapshot();
    let highlight = snapshot.get::<Highlight>().unwrap();
    assert_eq!(highlight.statics.creatures.count(&KNIGHT), 1);
}

#[test]
fn test_builder_rejects_tiny_boards() {
    let config = ClientConfig {
        sandbox: SandboxConfig { radius: 2 },
        ..ClientConfig::default()
    };
    let err = SessionBuilder::new(config).build().err().unwrap();
    assert!(err.to_string().contains("below the minimum"));
}

#[test]
fn test_builder_accepts_custom_engine() {
    let setup = SessionBuilder::new(ClientConfig::default())
        .engine(SandboxEngine::new(1))
        .build()
        .unwrap();
    assert_eq!(setup.session.engine().radius(), 1);
    assert_eq!(setup.session.active_mode(), Some("idle"));
}

#[test]
fn test_end_turn_is_refused_while_the_knight_walks() {
    let mut session = SessionBuilder::new(ClientConfig::default())
        .build()
        .unwrap()
        .session;
    session.tile_clicked(Cell::new(-1, 0)).unwrap();
    session.tile_clicked(Cell::ORIGIN).unwrap();

    let err = session.end_turn().unwrap_err();
    assert!(matches!(err, InteractionError::Busy { .. }));
    assert_eq!(session.mode_names(), ["idle", "animating"]);

    session.advance(Duration::from_secs(2));
    let knight = session.engine().creature(KNIGHT).unwrap();
    assert_eq!(knight.cell, Cell::ORIGIN);
    assert_eq!(session.engine().revision(), 1);
}

#[test]
fn test_extreme_click_is_an_invalid_target() {
    let mut session = SessionBuilder::new(ClientConfig::default())
        .build()
        .unwrap()
        .session;
    let err = session.tile_clicked(Cell::new(i32::MIN, 0)).unwrap_err();
    assert!(matches!(err, InteractionError::InvalidTarget { mode: "idle", .. }));
    assert_eq!(session.active_mode(), Some("idle"));
}
