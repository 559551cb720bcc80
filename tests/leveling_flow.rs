//! Leveling through ordinary care actions, and the MAX_LEVEL cap.

mod common;

use chrono::{Duration, Utc};
use wildtree::bot::MenuCommand;
use wildtree::tree::{UserPatch, MAX_LEVEL};

const UID: u64 = 5;

/// Backdate both short gates so the next action is allowed immediately.
fn open_gates(handlers: &wildtree::bot::TreeHandlers) {
    let past = Some(Utc::now() - Duration::seconds(601));
    handlers
        .store()
        .update(
            UID,
            &UserPatch {
                last_water_at: past,
                last_sun_at: past,
                ..Default::default()
            },
        )
        .unwrap();
}

#[test]
fn third_water_crosses_the_first_level_threshold() {
    let handlers = common::scratch_handlers();

    handlers.dispatch(&MenuCommand::Water, UID, "tester").unwrap();
    open_gates(&handlers);
    handlers.dispatch(&MenuCommand::Water, UID, "tester").unwrap();
    open_gates(&handlers);
    let third = handlers.dispatch(&MenuCommand::Water, UID, "tester").unwrap();

    // 6 exp total clears the 5-exp requirement: success reply then level-up.
    assert_eq!(third.len(), 2);
    assert_eq!(third[1], "🎉 New level: 2! Sun+1, Water+1");

    let record = handlers.store().get(UID).unwrap();
    assert_eq!(record.level, 2);
    assert_eq!(record.exp, 1);
    assert_eq!(record.water, 4); // three waterings + level bonus
    assert_eq!(record.sun, 1); // level bonus only
}

#[test]
fn mixed_sun_and_water_also_level_up() {
    let handlers = common::scratch_handlers();

    handlers.dispatch(&MenuCommand::Water, UID, "tester").unwrap();
    handlers.dispatch(&MenuCommand::Sun, UID, "tester").unwrap();
    open_gates(&handlers);
    let third = handlers.dispatch(&MenuCommand::Sun, UID, "tester").unwrap();

    assert_eq!(third.len(), 2);
    let record = handlers.store().get(UID).unwrap();
    assert_eq!(record.level, 2);
    assert_eq!(record.exp, 1);
    assert_eq!(record.sun, 3); // two suns + level bonus
    assert_eq!(record.water, 2); // one watering + level bonus
}

#[test]
fn max_level_tree_accrues_exp_without_leveling() {
    let handlers = common::scratch_handlers();
    handlers.store().ensure(UID).unwrap();
    handlers
        .store()
        .update(
            UID,
            &UserPatch {
                level: Some(MAX_LEVEL),
                exp: Some(0),
                ..Default::default()
            },
        )
        .unwrap();

    let daily = handlers.dispatch(&MenuCommand::Daily, UID, "tester").unwrap();
    assert_eq!(daily.len(), 1, "no level-up reply expected at the cap");
    let water = handlers.dispatch(&MenuCommand::Water, UID, "tester").unwrap();
    assert_eq!(water.len(), 1);

    let record = handlers.store().get(UID).unwrap();
    assert_eq!(record.level, MAX_LEVEL);
    // daily at level 20 grants 25 exp, watering grants 2 more
    assert_eq!(record.exp, 27);
}

#[test]
fn status_and_profile_read_without_mutating() {
    let handlers = common::scratch_handlers();
    handlers.dispatch(&MenuCommand::Water, UID, "tester").unwrap();
    let before = handlers.store().get(UID).unwrap();

    let status = handlers.dispatch(&MenuCommand::Status, UID, "tester").unwrap();
    assert!(status[0].contains("Level: 1/20"));
    assert!(status[0].contains("EXP: 2/5"));

    let profile = handlers
        .dispatch(&MenuCommand::Profile, UID, "Marta\n<x>")
        .unwrap();
    assert!(profile[0].contains("👤 Profile: Marta <x>"));

    assert_eq!(handlers.store().get(UID).unwrap(), before);
}
