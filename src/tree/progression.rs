//! Experience curve and level-up rollover.
//!
//! Leveling is a pure in-memory transformation: handlers apply it to a loaded
//! record and persist the result in a single write, so a crash mid-action can
//! never leave a half-leveled tree on disk.

use crate::tree::types::UserRecord;

/// Hard cap on tree level. Experience keeps accruing past this but no further
/// level-up occurs.
pub const MAX_LEVEL: u32 = 20;
/// Sun granted per level gained.
pub const LEVEL_SUN_BONUS: u32 = 1;
/// Water granted per level gained.
pub const LEVEL_WATER_BONUS: u32 = 1;

/// One level gained during [`apply_experience`], in the order the levels were
/// reached. The caller relays these to the user as follow-up replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    /// The level that was just reached.
    pub level: u32,
    pub sun_bonus: u32,
    pub water_bonus: u32,
}

/// Experience required to advance *from* `level` to the next one.
/// Strictly increasing in `level`, and strictly positive for `level >= 1`.
pub fn experience_required(level: u32) -> u32 {
    (5.0 * f64::from(level).powf(1.6)).ceil() as u32
}

/// Add `gained` experience to `record`, then roll over into level-ups while
/// the current level's requirement is met and [`MAX_LEVEL`] is not reached.
/// Each level gained grants the sun/water bonus and yields a [`LevelUp`].
pub fn apply_experience(record: &mut UserRecord, gained: u32) -> Vec<LevelUp> {
    record.exp = record.exp.saturating_add(gained);

    let mut level_ups = Vec::new();
    while record.level < MAX_LEVEL && record.exp >= experience_required(record.level) {
        record.exp -= experience_required(record.level);
        record.level += 1;
        record.sun = record.sun.saturating_add(LEVEL_SUN_BONUS);
        record.water = record.water.saturating_add(LEVEL_WATER_BONUS);
        level_ups.push(LevelUp {
            level: record.level,
            sun_bonus: LEVEL_SUN_BONUS,
            water_bonus: LEVEL_WATER_BONUS,
        });
    }
    level_ups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirement_matches_reference_curve() {
        // ceil(5 * 1^1.6) and ceil(5 * 2^1.6)
        assert_eq!(experience_required(1), 5);
        assert_eq!(experience_required(2), 16);
    }

    #[test]
    fn requirement_is_strictly_monotonic() {
        for level in 1..=MAX_LEVEL {
            assert!(
                experience_required(level + 1) > experience_required(level),
                "curve not increasing at level {}",
                level
            );
        }
    }

    #[test]
    fn exact_requirement_levels_up_once_with_zero_remainder() {
        let mut rec = UserRecord::new(1);
        let ups = apply_experience(&mut rec, experience_required(1));
        assert_eq!(ups.len(), 1);
        assert_eq!(ups[0].level, 2);
        assert_eq!(rec.level, 2);
        assert_eq!(rec.exp, 0);
        assert_eq!(rec.sun, 1);
        assert_eq!(rec.water, 1);
    }

    #[test]
    fn large_grant_rolls_through_multiple_levels_in_order() {
        let mut rec = UserRecord::new(1);
        let grant = experience_required(1) + experience_required(2) + 3;
        let ups = apply_experience(&mut rec, grant);
        assert_eq!(rec.level, 3);
        assert_eq!(rec.exp, 3);
        assert_eq!(rec.sun, 2);
        assert_eq!(rec.water, 2);
        let reached: Vec<u32> = ups.iter().map(|u| u.level).collect();
        assert_eq!(reached, vec![2, 3]);
    }

    #[test]
    fn leftover_exp_is_always_below_next_requirement() {
        let mut rec = UserRecord::new(1);
        apply_experience(&mut rec, 1234);
        assert!(rec.level <= MAX_LEVEL);
        if rec.level < MAX_LEVEL {
            assert!(rec.exp < experience_required(rec.level));
        }
    }

    #[test]
    fn capped_at_max_level_while_exp_keeps_accruing() {
        let mut rec = UserRecord::new(1);
        rec.level = MAX_LEVEL;
        rec.exp = 10;
        let ups = apply_experience(&mut rec, 1_000_000);
        assert!(ups.is_empty());
        assert_eq!(rec.level, MAX_LEVEL);
        assert_eq!(rec.exp, 1_000_010);
    }

    #[test]
    fn zero_gain_is_a_no_op_below_threshold() {
        let mut rec = UserRecord::new(1);
        rec.exp = 4;
        let ups = apply_experience(&mut rec, 0);
        assert!(ups.is_empty());
        assert_eq!(rec.exp, 4);
        assert_eq!(rec.level, 1);
    }
}
