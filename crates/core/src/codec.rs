//! Value codec - emoji strings to canonical values and back
//!
//! A tile shows a composite emoji such as `👨🏻‍🍳` (man, light skin tone,
//! zero-width joiner, cooking). For comparisons the engine needs something
//! order independent, so a displayed value is parsed into:
//!
//! - a [`ValueKey`]: the base components sorted by codepoint
//! - an intensity map: how many skin-tone levels each base component carries
//!
//! Modifiers and joiners never appear in the key. Serialization walks the
//! base components in *display* order, which for merge results comes from
//! the combination table so that ZWJ sequences render as a single glyph.

use std::collections::BTreeMap;
use std::fmt;

use arrayvec::ArrayVec;

use crate::error::{EngineError, Result};
use crate::table::CombinationTable;
use crate::types::{skin_tone_intensity, skin_tone_modifier, MAX_BASE_COMPONENTS, MAX_INTENSITY, ZWJ};

/// Capacity of a key: large enough to hold the union of two parsed values.
pub const KEY_CAPACITY: usize = MAX_BASE_COMPONENTS * 2;

/// Sorted base components of a value.
///
/// `Display` renders the uppercase-hex form used by the combination table,
/// e.g. `1F373;1F468`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueKey(ArrayVec<char, KEY_CAPACITY>);

impl ValueKey {
    /// Build a key from components in any order (extra components beyond
    /// capacity are dropped).
    pub fn from_codes(codes: impl IntoIterator<Item = char>) -> Self {
        let mut v: ArrayVec<char, KEY_CAPACITY> = ArrayVec::new();
        for code in codes {
            if v.try_push(code).is_err() {
                break;
            }
        }
        v.sort_unstable();
        Self(v)
    }

    /// Sorted union of two keys (duplicates kept).
    pub fn union(&self, other: &ValueKey) -> Self {
        Self::from_codes(self.0.iter().chain(other.0.iter()).copied())
    }

    pub fn codes(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, code) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{:X}", *code as u32)?;
        }
        Ok(())
    }
}

/// Parsed form of a tile value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalValue {
    key: ValueKey,
    /// Base components in the order they are rendered.
    display: ArrayVec<char, KEY_CAPACITY>,
    intensities: BTreeMap<char, u32>,
}

impl CanonicalValue {
    /// Assemble a value from its parts. `display` must hold the same
    /// components as `key`, in rendering order.
    pub fn from_parts(
        key: ValueKey,
        display: impl IntoIterator<Item = char>,
        intensities: BTreeMap<char, u32>,
    ) -> Self {
        let display = display.into_iter().take(KEY_CAPACITY).collect();
        Self {
            key,
            display,
            intensities,
        }
    }

    pub fn key(&self) -> &ValueKey {
        &self.key
    }

    pub fn display_codes(&self) -> &[char] {
        &self.display
    }

    pub fn intensities(&self) -> &BTreeMap<char, u32> {
        &self.intensities
    }

    /// Accumulated intensity of a base component (0 when absent)
    pub fn intensity(&self, code: char) -> u32 {
        self.intensities.get(&code).copied().unwrap_or(0)
    }

    /// Sum of all intensities, used by renderers to shade tiles
    pub fn total_intensity(&self) -> u32 {
        self.intensities.values().sum()
    }

    /// True when some component carries more tone than a tile can show.
    pub fn overflows(&self) -> bool {
        self.intensities.values().any(|&i| i > MAX_INTENSITY)
    }
}

/// Parse a displayed value into canonical form.
///
/// Returns [`EngineError::InvalidValue`] for an empty value (no base
/// component) or one with more than [`MAX_BASE_COMPONENTS`] base components.
pub fn parse(value: &str, table: &CombinationTable) -> Result<CanonicalValue> {
    let mut bases: ArrayVec<char, MAX_BASE_COMPONENTS> = ArrayVec::new();
    let mut intensities: BTreeMap<char, u32> = BTreeMap::new();
    // Base component a modifier may still attach to.
    let mut attach_to: Option<char> = None;

    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if let Some(tone) = skin_tone_intensity(ch) {
            // A stray modifier (leading, doubled or after a joiner) is ignored.
            if let Some(base) = attach_to.take() {
                *intensities.entry(base).or_insert(0) += tone;
            }
            continue;
        }
        if ch == ZWJ {
            attach_to = None;
            continue;
        }

        bases
            .try_push(ch)
            .map_err(|_| EngineError::InvalidValue(value.to_string()))?;
        let entry = intensities.entry(ch).or_insert(0);

        let decorated = chars
            .peek()
            .is_some_and(|&next| next == ZWJ || skin_tone_intensity(next).is_some());
        if !decorated && !table.is_atomic(ch) {
            *entry += 1;
        }
        attach_to = Some(ch);
    }

    if bases.is_empty() {
        return Err(EngineError::InvalidValue(value.to_string()));
    }

    let key = ValueKey::from_codes(bases.iter().copied());
    let display = table
        .display_order(&key)
        .iter()
        .copied()
        .take(KEY_CAPACITY)
        .collect();
    Ok(CanonicalValue {
        key,
        display,
        intensities,
    })
}

/// Render a canonical value back into its displayed emoji string.
///
/// Intensities above the displayable range render as the darkest tone; the
/// merge resolver reports those as overflow and never hands them back.
pub fn serialize(value: &CanonicalValue) -> String {
    let mut out = String::new();
    for (i, &code) in value.display.iter().enumerate() {
        if i > 0 {
            out.push(ZWJ);
        }
        out.push(code);
        let intensity = value.intensity(code).min(MAX_INTENSITY);
        if let Some(modifier) = skin_tone_modifier(intensity) {
            out.push(modifier);
        }
    }
    out
}
