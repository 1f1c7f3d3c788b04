//! Longest-common-affix diffing over UTF-16 units.
//!
//! Everything between the common prefix and the common suffix is treated as
//! the changed middle. Ties are broken by taking the longest prefix first,
//! then the longest suffix of what remains.

use crate::text::is_word_break;

/// Lengths of the unchanged prefix and suffix shared by two texts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AffixDiff {
    pub prefix_len: usize,
    pub suffix_len: usize,
}

impl AffixDiff {
    /// The part of the old text that was removed.
    pub fn deleted<'a>(&self, old: &'a [u16]) -> &'a [u16] {
        middle(old, self.prefix_len, self.suffix_len)
    }

    /// The part of the new text that was added.
    pub fn inserted<'a>(&self, new: &'a [u16]) -> &'a [u16] {
        middle(new, self.prefix_len, self.suffix_len)
    }

    /// Back both affixes off until they end on a word break in `old`, so the
    /// changed middle always covers whole words.
    pub fn widen_to_word_boundaries(self, old: &[u16]) -> Self {
        let len = old.len();
        let mut prefix_len = self.prefix_len.min(len);
        while prefix_len > 0 && !is_word_break(old[prefix_len - 1]) {
            prefix_len -= 1;
        }
        let mut suffix_len = self.suffix_len.min(len - prefix_len);
        while suffix_len > 0 && !is_word_break(old[len - suffix_len]) {
            suffix_len -= 1;
        }
        Self {
            prefix_len,
            suffix_len,
        }
    }
}

/// Compute the maximal common prefix, then the maximal common suffix of the
/// remainder.
pub fn common_affix_diff(old: &[u16], new: &[u16]) -> AffixDiff {
    let prefix_len = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let old_rest = &old[prefix_len..];
    let new_rest = &new[prefix_len..];
    let suffix_len = old_rest
        .iter()
        .rev()
        .zip(new_rest.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    AffixDiff {
        prefix_len,
        suffix_len,
    }
}

/// `units` with `prefix_len` units removed from the front and `suffix_len`
/// from the back. Overlapping affixes yield an empty slice.
pub fn middle(units: &[u16], prefix_len: usize, suffix_len: usize) -> &[u16] {
    let start = prefix_len.min(units.len());
    let end = units.len().saturating_sub(suffix_len).max(start);
    &units[start..end]
}
