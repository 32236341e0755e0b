//! Skill entity - a die size plus the wounds and scars it has taken
//!
//! Every transition is a pure function: it takes the current record and
//! returns the next one. Bounds are game constants, so out-of-range moves are
//! silently absorbed instead of reported.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::DieSize;

/// Boxes on a skill's wound track
pub const WOUND_TRACK: u8 = 3;
/// Boxes on a skill's scar track
pub const SCAR_TRACK: u8 = 3;

/// Logical state of one box on the scar track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScarSlot {
    /// No scar here yet
    Empty,
    /// A scar that has not been used
    Filled,
    /// A scar that has been burned for a benefit
    Burned,
}

/// Condition record for one skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Die currently rolled
    pub value: DieSize,
    /// Die the skill recovers to
    pub max: DieSize,
    pub wounds: u8,
    pub scars: u8,
    /// Never more than `scars`
    pub used_scars: u8,
}

impl Skill {
    pub fn new(max: DieSize) -> Self {
        Self {
            value: max,
            max,
            wounds: 0,
            scars: 0,
            used_scars: 0,
        }
    }

    /// Build from raw counters, clamping every field into its range
    pub fn clamped(value: DieSize, max: DieSize, wounds: u8, scars: u8, used_scars: u8) -> Self {
        let scars = scars.min(SCAR_TRACK);
        Self {
            value,
            max,
            wounds: wounds.min(WOUND_TRACK),
            scars,
            used_scars: used_scars.min(scars),
        }
    }

    pub fn with_max(mut self, max: DieSize) -> Self {
        self.max = max;
        self
    }

    pub fn is_wounded(&self) -> bool {
        self.wounds > 0
    }

    /// Clicking a marked wound heals one, clicking an unmarked box adds one.
    pub fn toggle_wound(self, currently_marked: bool) -> Self {
        let wounds = if currently_marked && self.wounds > 0 {
            self.wounds - 1
        } else if self.wounds < WOUND_TRACK {
            self.wounds + 1
        } else {
            self.wounds
        };
        Self { wounds, ..self }
    }

    /// Scar track transition, keyed on the state of the box that was clicked.
    ///
    /// Branch order matters: burned boxes are checked first, then filled ones,
    /// and only then is a new scar gained if the track has room.
    pub fn toggle_scar(self, slot: ScarSlot) -> Self {
        let (scars, used_scars) = match slot {
            ScarSlot::Burned if self.scars > 0 => {
                let scars = self.scars - 1;
                (scars, scars)
            }
            ScarSlot::Filled => {
                let scars = self.scars.saturating_sub(1);
                (scars, (self.used_scars + 1).min(scars))
            }
            _ if self.scars < SCAR_TRACK => (self.scars + 1, self.used_scars),
            _ => (self.scars, self.used_scars),
        };
        Self {
            scars,
            used_scars,
            ..self
        }
    }

    pub fn reduce_die(self) -> Self {
        Self {
            value: self.value.smaller(),
            ..self
        }
    }

    pub fn augment_die(self) -> Self {
        Self {
            value: self.value.larger(),
            ..self
        }
    }

    /// Back to the baseline die, unless a wound is holding the skill down
    pub fn restore_to_max(self) -> Self {
        if self.is_wounded() {
            return self;
        }
        Self {
            value: self.max,
            ..self
        }
    }

    /// Box `i` of the wound track is marked iff `wounds > i`
    pub fn wound_slots(&self) -> [bool; WOUND_TRACK as usize] {
        std::array::from_fn(|i| usize::from(self.wounds) > i)
    }

    pub fn scar_slot(&self, index: usize) -> ScarSlot {
        if index < usize::from(self.used_scars) {
            ScarSlot::Burned
        } else if index < usize::from(self.scars) {
            ScarSlot::Filled
        } else {
            ScarSlot::Empty
        }
    }

    pub fn scar_slots(&self) -> [ScarSlot; SCAR_TRACK as usize] {
        std::array::from_fn(|i| self.scar_slot(i))
    }
}

impl Default for Skill {
    fn default() -> Self {
        Self::new(DieSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_scar_invariant(skill: &Skill) {
        assert!(skill.scars <= SCAR_TRACK, "scars out of range: {:?}", skill);
        assert!(skill.used_scars <= skill.scars, "used scars exceed scars: {:?}", skill);
    }

    #[test]
    fn test_die_walk_clamps_at_both_ends() {
        let mut skill = Skill::clamped(DieSize::D6, DieSize::D8, 0, 0, 0);

        skill = skill.augment_die();
        assert_eq!(skill.value, DieSize::D8);
        skill = skill.augment_die();
        assert_eq!(skill.value, DieSize::D10);
        skill = skill.augment_die();
        assert_eq!(skill.value, DieSize::D10);

        for _ in 0..3 {
            skill = skill.reduce_die();
        }
        assert_eq!(skill.value, DieSize::D4);
        assert_eq!(skill.reduce_die().value, DieSize::D4);
    }

    #[test]
    fn test_toggle_wound() {
        let skill = Skill::default().toggle_wound(false);
        assert_eq!(skill.wounds, 1);
        assert_eq!(skill.wound_slots(), [true, false, false]);

        let skill = skill.toggle_wound(true);
        assert_eq!(skill.wounds, 0);

        let full = Skill::default()
            .toggle_wound(false)
            .toggle_wound(false)
            .toggle_wound(false)
            .toggle_wound(false);
        assert_eq!(full.wounds, WOUND_TRACK);
        assert_eq!(full.wound_slots(), [true, true, true]);
    }

    #[test]
    fn test_gaining_scars_stops_at_capacity() {
        let mut skill = Skill::default();
        for _ in 0..3 {
            skill = skill.toggle_scar(ScarSlot::Empty);
        }
        assert_eq!(skill.scars, 3);
        assert_eq!(skill.used_scars, 0);

        let unchanged = skill.toggle_scar(ScarSlot::Empty);
        assert_eq!(unchanged, skill);
    }

    #[test]
    fn test_burning_a_filled_scar() {
        let skill = Skill::clamped(DieSize::D6, DieSize::D6, 0, 3, 0);
        assert_eq!(skill.scar_slot(0), ScarSlot::Filled);

        let burned = skill.toggle_scar(ScarSlot::Filled);
        assert_eq!(burned.scars, 2);
        assert_eq!(burned.used_scars, 1);
        assert_eq!(
            burned.scar_slots(),
            [ScarSlot::Burned, ScarSlot::Filled, ScarSlot::Empty]
        );
        assert_scar_invariant(&burned);
    }

    #[test]
    fn test_burning_clamps_used_scars_to_scars() {
        let skill = Skill::clamped(DieSize::D6, DieSize::D6, 0, 3, 2);
        let burned = skill.toggle_scar(ScarSlot::Filled);
        assert_eq!(burned.scars, 2);
        assert_eq!(burned.used_scars, 2);
        assert_scar_invariant(&burned);
    }

    #[test]
    fn test_unburning_sets_used_to_remaining_scars() {
        let skill = Skill::clamped(DieSize::D6, DieSize::D6, 0, 2, 1);
        assert_eq!(skill.scar_slot(0), ScarSlot::Burned);

        let next = skill.toggle_scar(ScarSlot::Burned);
        assert_eq!(next.scars, 1);
        assert_eq!(next.used_scars, 1);
        assert_scar_invariant(&next);
    }

    #[test]
    fn test_burned_click_with_no_scars_gains_one() {
        let next = Skill::default().toggle_scar(ScarSlot::Burned);
        assert_eq!(next.scars, 1);
        assert_eq!(next.used_scars, 0);
    }

    #[test]
    fn test_restore_to_max_skips_wounded_skills() {
        let tired = Skill::clamped(DieSize::D4, DieSize::D8, 0, 0, 0);
        assert_eq!(tired.restore_to_max().value, DieSize::D8);

        let wounded = tired.toggle_wound(false);
        assert_eq!(wounded.restore_to_max().value, DieSize::D4);
    }

    #[test]
    fn test_clamped_enforces_ranges() {
        let skill = Skill::clamped(DieSize::D6, DieSize::D8, 7, 9, 9);
        assert_eq!(skill.wounds, 3);
        assert_eq!(skill.scars, 3);
        assert_eq!(skill.used_scars, 3);
    }

    #[test]
    fn test_serialized_shape() {
        let skill = Skill::clamped(DieSize::D6, DieSize::D8, 1, 2, 1);
        let json = serde_json::to_value(skill).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"value": 6, "max": 8, "wounds": 1, "scars": 2, "used_scars": 1})
        );
    }

    fn die_strategy() -> impl Strategy<Value = DieSize> {
        prop::sample::select(DieSize::ALL.to_vec())
    }

    fn slot_strategy() -> impl Strategy<Value = ScarSlot> {
        prop::sample::select(vec![ScarSlot::Empty, ScarSlot::Filled, ScarSlot::Burned])
    }

    proptest! {
        #[test]
        fn prop_die_stays_in_set(start in die_strategy(), steps in prop::collection::vec(any::<bool>(), 0..40)) {
            let mut skill = Skill::new(start);
            for grow in steps {
                skill = if grow { skill.augment_die() } else { skill.reduce_die() };
                prop_assert!(DieSize::ALL.contains(&skill.value));
            }
        }

        #[test]
        fn prop_wounds_stay_bounded(steps in prop::collection::vec(any::<bool>(), 0..40)) {
            let mut skill = Skill::default();
            for marked in steps {
                skill = skill.toggle_wound(marked);
                prop_assert!(skill.wounds <= WOUND_TRACK);
            }
        }

        #[test]
        fn prop_scars_keep_invariant(slots in prop::collection::vec(slot_strategy(), 0..40)) {
            let mut skill = Skill::default();
            for slot in slots {
                skill = skill.toggle_scar(slot);
                prop_assert!(skill.scars <= SCAR_TRACK);
                prop_assert!(skill.used_scars <= skill.scars);
            }
        }

        #[test]
        fn prop_scars_keep_invariant_with_derived_slots(clicks in prop::collection::vec(0usize..3, 0..40)) {
            let mut skill = Skill::default();
            for index in clicks {
                skill = skill.toggle_scar(skill.scar_slot(index));
                prop_assert!(skill.scars <= SCAR_TRACK);
                prop_assert!(skill.used_scars <= skill.scars);
            }
        }

        #[test]
        fn prop_restore_is_idempotent(value in die_strategy(), max in die_strategy(), wounds in 0u8..=3) {
            let skill = Skill::clamped(value, max, wounds, 0, 0);
            let once = skill.restore_to_max();
            prop_assert_eq!(once.restore_to_max(), once);
        }
    }
}
