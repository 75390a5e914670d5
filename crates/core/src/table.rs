//! Combination table - which values merge into what, and what they score
//!
//! The table is static configuration:
//!
//! - **atomic codes**: components that never merge with another copy of
//!   themselves (tools: wrench, frying pan). They only combine through a recipe.
//! - **recipes**: sorted input key → result components in display order
//! - **scores**: key → points awarded when a merge produces that key
//!
//! | Input | Result | Score |
//! |-------|--------|-------|
//! | 🫱 | 🫱 | 1 |
//! | 🫲 | 🫲 | 1 |
//! | 🫱 + 🫲 | 🫱‍🫲 | 2 |
//! | 👨 | 👨 | 3 |
//! | 👩 | 👩 | 3 |
//! | 👨 + 🔧 | 👨‍🔧 | 5 |
//! | 👨 + 🍳 | 👨‍🍳 | 5 |
//! | 👩 + 🔧 | 👩‍🔧 | 5 |
//! | 👩 + 🍳 | 👩‍🍳 | 5 |

use crate::codec::ValueKey;

const HAND_RIGHT: char = '\u{1FAF1}';
const HAND_LEFT: char = '\u{1FAF2}';
const MAN: char = '\u{1F468}';
const WOMAN: char = '\u{1F469}';
const WRENCH: char = '\u{1F527}';
const COOKING: char = '\u{1F373}';

/// A pair (or more) of components that merge into a new value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    /// Input components, sorted ascending
    pub inputs: &'static [char],
    /// Result components in rendering order
    pub result: &'static [char],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationTable {
    atomic: &'static [char],
    recipes: &'static [Recipe],
    scores: &'static [(&'static [char], u32)],
}

const ATOMIC: [char; 2] = [WRENCH, COOKING];

// Inputs are sorted by codepoint: 1F373 < 1F468 < 1F469 < 1F527 < 1FAF1 < 1FAF2.
const RECIPES: [Recipe; 5] = [
    Recipe {
        inputs: &[HAND_RIGHT, HAND_LEFT],
        result: &[HAND_RIGHT, HAND_LEFT],
    },
    Recipe {
        inputs: &[MAN, WRENCH],
        result: &[MAN, WRENCH],
    },
    Recipe {
        inputs: &[COOKING, MAN],
        result: &[MAN, COOKING],
    },
    Recipe {
        inputs: &[WOMAN, WRENCH],
        result: &[WOMAN, WRENCH],
    },
    Recipe {
        inputs: &[COOKING, WOMAN],
        result: &[WOMAN, COOKING],
    },
];

const SCORES: [(&[char], u32); 9] = [
    (&[HAND_RIGHT], 1),
    (&[HAND_LEFT], 1),
    (&[HAND_RIGHT, HAND_LEFT], 2),
    (&[MAN], 3),
    (&[WOMAN], 3),
    (&[MAN, WRENCH], 5),
    (&[COOKING, MAN], 5),
    (&[WOMAN, WRENCH], 5),
    (&[COOKING, WOMAN], 5),
];

impl CombinationTable {
    /// The game's built-in table
    pub fn standard() -> Self {
        Self {
            atomic: &ATOMIC,
            recipes: &RECIPES,
            scores: &SCORES,
        }
    }

    /// Build a custom table. `Recipe::inputs` and score keys must be sorted.
    pub fn new(
        atomic: &'static [char],
        recipes: &'static [Recipe],
        scores: &'static [(&'static [char], u32)],
    ) -> Self {
        Self {
            atomic,
            recipes,
            scores,
        }
    }

    /// True for a single component that never merges with itself
    pub fn is_atomic(&self, code: char) -> bool {
        self.atomic.contains(&code)
    }

    /// True when the whole key is one atomic component
    pub fn is_atomic_key(&self, key: &ValueKey) -> bool {
        key.len() == 1 && self.is_atomic(key.codes()[0])
    }

    pub fn recipe(&self, key: &ValueKey) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.inputs == key.codes())
    }

    /// Rendering order for a key: the recipe result if one produces this key,
    /// otherwise the sorted key itself.
    pub fn display_order<'a>(&self, key: &'a ValueKey) -> &'a [char] {
        self.recipes
            .iter()
            .find(|r| r.inputs == key.codes())
            .map(|r| r.result)
            .unwrap_or(key.codes())
    }

    /// Points awarded for producing `key` (0 when unlisted)
    pub fn score(&self, key: &ValueKey) -> u32 {
        self.scores
            .iter()
            .find(|(k, _)| *k == key.codes())
            .map(|(_, points)| *points)
            .unwrap_or(0)
    }
}

impl Default for CombinationTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_inputs_and_score_keys_are_sorted() {
        let table = CombinationTable::standard();
        for r in table.recipes {
            assert!(r.inputs.windows(2).all(|w| w[0] <= w[1]), "{:?}", r);
            assert_eq!(ValueKey::from_codes(r.result.iter().copied()).codes(), r.inputs);
        }
        for (k, _) in table.scores {
            assert!(k.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_scores_by_hex_key() {
        let table = CombinationTable::standard();
        let cook = ValueKey::from_codes([MAN, COOKING]);
        assert_eq!(cook.to_string(), "1F373;1F468");
        assert_eq!(table.score(&cook), 5);
        assert_eq!(table.score(&ValueKey::from_codes([HAND_LEFT])), 1);
        assert_eq!(table.score(&ValueKey::from_codes([WRENCH])), 0);
    }

    #[test]
    fn test_display_order_puts_person_first() {
        let table = CombinationTable::standard();
        let cook = ValueKey::from_codes([COOKING, WOMAN]);
        assert_eq!(table.display_order(&cook), &[WOMAN, COOKING]);

        let man = ValueKey::from_codes([MAN]);
        assert_eq!(table.display_order(&man), &[MAN]);
    }

    #[test]
    fn test_atomic_set() {
        let table = CombinationTable::standard();
        assert!(table.is_atomic(WRENCH));
        assert!(table.is_atomic(COOKING));
        assert!(!table.is_atomic(MAN));
        assert!(table.is_atomic_key(&ValueKey::from_codes([WRENCH])));
        assert!(!table.is_atomic_key(&ValueKey::from_codes([MAN, WRENCH])));
    }
}
