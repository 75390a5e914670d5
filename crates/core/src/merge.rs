//! Merge resolver - decides what two tiles become when pushed together
//!
//! Two rules can make tiles compatible:
//!
//! 1. **Duplication**: both values have the same key and that key is not a
//!    single atomic component. The key is kept.
//! 2. **Recipe**: the sorted union of both keys is a recipe input. The key
//!    becomes the recipe result.
//!
//! In both cases intensities are summed per component. When any sum exceeds
//! [`MAX_INTENSITY`](crate::types::MAX_INTENSITY) the pair annihilates: the
//! outcome is [`MergeOutcome::Overflow`] carrying the key that would have
//! been produced, which is what gets scored.

use std::collections::BTreeMap;

use crate::codec::{parse, CanonicalValue, ValueKey};
use crate::table::CombinationTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Incompatible,
    Merged(CanonicalValue),
    Overflow(ValueKey),
}

impl MergeOutcome {
    pub fn is_compatible(&self) -> bool {
        !matches!(self, MergeOutcome::Incompatible)
    }
}

/// Resolve a merge between the displayed values of two tiles.
///
/// Values that fail to parse never merge.
pub fn try_merge(table: &CombinationTable, a: &str, b: &str) -> MergeOutcome {
    let (Ok(a), Ok(b)) = (parse(a, table), parse(b, table)) else {
        return MergeOutcome::Incompatible;
    };
    resolve(table, &a, &b)
}

/// Resolve a merge between two already parsed values.
pub fn resolve(table: &CombinationTable, a: &CanonicalValue, b: &CanonicalValue) -> MergeOutcome {
    let key = if a.key() == b.key() && !table.is_atomic_key(a.key()) {
        a.key().clone()
    } else {
        let pair = a.key().union(b.key());
        match table.recipe(&pair) {
            Some(recipe) => ValueKey::from_codes(recipe.result.iter().copied()),
            None => return MergeOutcome::Incompatible,
        }
    };

    let intensities = sum_intensities(a.intensities(), b.intensities());
    let merged = CanonicalValue::from_parts(
        key.clone(),
        table.display_order(&key).iter().copied(),
        intensities,
    );

    if merged.overflows() {
        MergeOutcome::Overflow(key)
    } else {
        MergeOutcome::Merged(merged)
    }
}

fn sum_intensities(a: &BTreeMap<char, u32>, b: &BTreeMap<char, u32>) -> BTreeMap<char, u32> {
    let mut out = a.clone();
    for (&code, &intensity) in b {
        *out.entry(code).or_insert(0) += intensity;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::serialize;

    const HAND_R: char = '\u{1FAF1}';
    const HAND_L: char = '\u{1FAF2}';
    const MAN: char = '\u{1F468}';
    const WOMAN: char = '\u{1F469}';
    const PAN: char = '\u{1F373}';

    fn merge(a: &str, b: &str) -> MergeOutcome {
        try_merge(&CombinationTable::standard(), a, b)
    }

    fn merged(a: &str, b: &str) -> CanonicalValue {
        match merge(a, b) {
            MergeOutcome::Merged(v) => v,
            other => panic!("expected a merge of {:?} and {:?}, got {:?}", a, b, other),
        }
    }

    #[test]
    fn test_same_key_sums_intensity() {
        let v = merged("\u{1FAF1}", "\u{1FAF1}");
        assert_eq!(v.key().to_string(), "1FAF1");
        assert_eq!(v.intensity(HAND_R), 2);
        assert_eq!(serialize(&v), "\u{1FAF1}\u{1F3FC}");
    }

    #[test]
    fn test_same_key_with_zero_intensity_stays_zero() {
        // Joined values start at zero intensity for every component.
        let v = merged("\u{1F468}\u{200D}\u{1F527}", "\u{1F468}\u{200D}\u{1F527}");
        assert_eq!(v.key().to_string(), "1F468;1F527");
        assert_eq!(v.total_intensity(), 0);
    }

    #[test]
    fn test_recipe_unions_intensities() {
        let v = merged("\u{1FAF1}\u{1F3FC}", "\u{1FAF2}");
        assert_eq!(v.key().to_string(), "1FAF1;1FAF2");
        assert_eq!(v.intensity(HAND_R), 2);
        assert_eq!(v.intensity(HAND_L), 1);
        assert_eq!(serialize(&v), "\u{1FAF1}\u{1F3FC}\u{200D}\u{1FAF2}\u{1F3FB}");
    }

    #[test]
    fn test_recipe_is_symmetric() {
        assert_eq!(merge("\u{1F469}", "\u{1F373}"), merge("\u{1F373}", "\u{1F469}"));
    }

    #[test]
    fn test_recipe_result_renders_person_first() {
        let v = merged("\u{1F373}", "\u{1F468}\u{1F3FD}");
        assert_eq!(v.key().to_string(), "1F373;1F468");
        assert_eq!(v.display_codes(), &[MAN, PAN]);
        assert_eq!(v.intensity(MAN), 3);
        assert_eq!(v.intensity(PAN), 0);
        assert_eq!(serialize(&v), "\u{1F468}\u{1F3FD}\u{200D}\u{1F373}");
    }

    #[test]
    fn test_cooked_tiles_merge_again_and_keep_order() {
        let a = "\u{1F469}\u{1F3FB}\u{200D}\u{1F373}";
        let v = merged(a, a);
        assert_eq!(v.display_codes(), &[WOMAN, PAN]);
        assert_eq!(serialize(&v), "\u{1F469}\u{1F3FC}\u{200D}\u{1F373}");
    }

    #[test]
    fn test_atomic_values_do_not_duplicate() {
        assert_eq!(merge("\u{1F527}", "\u{1F527}"), MergeOutcome::Incompatible);
        assert_eq!(merge("\u{1F373}", "\u{1F373}"), MergeOutcome::Incompatible);
        assert_eq!(merge("\u{1F527}", "\u{1F373}"), MergeOutcome::Incompatible);
    }

    #[test]
    fn test_unrelated_values_are_incompatible() {
        assert_eq!(merge("\u{1FAF1}", "\u{1F468}"), MergeOutcome::Incompatible);
        assert_eq!(merge("\u{1F468}", "\u{1F469}"), MergeOutcome::Incompatible);
        assert_eq!(merge("", "\u{1F468}"), MergeOutcome::Incompatible);
    }

    #[test]
    fn test_intensity_above_five_overflows() {
        // 3 + 3 = 6 > 5
        let out = merge("\u{1FAF1}\u{1F3FD}", "\u{1FAF1}\u{1F3FD}");
        match out {
            MergeOutcome::Overflow(key) => assert_eq!(key.to_string(), "1FAF1"),
            other => panic!("expected overflow, got {:?}", other),
        }
    }

    #[test]
    fn test_intensity_of_exactly_five_still_merges() {
        let v = merged("\u{1FAF1}\u{1F3FC}", "\u{1FAF1}\u{1F3FD}");
        assert_eq!(v.intensity(HAND_R), 5);
        assert_eq!(serialize(&v), "\u{1FAF1}\u{1F3FF}");
    }

    #[test]
    fn test_combined_value_overflow_carries_its_key() {
        let out = merge(
            "\u{1FAF1}\u{1F3FF}\u{200D}\u{1FAF2}\u{1F3FB}",
            "\u{1FAF1}\u{1F3FB}\u{200D}\u{1FAF2}\u{1F3FB}",
        );
        match out {
            MergeOutcome::Overflow(key) => assert_eq!(key.to_string(), "1FAF1;1FAF2"),
            other => panic!("expected overflow, got {:?}", other),
        }
    }
}
