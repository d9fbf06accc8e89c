//! Synthetic categorisation and identifier helpers.
//!
//! The feed carries no element, channel or role metadata. Projections that
//! need a categorical breakdown assign one by position in the window, and
//! every such assignment goes through a named [`LabelTable`] so the simulated
//! nature of the category is visible at the call site.

/// A fixed label set indexed by position modulo its length.
#[derive(Debug, Clone, Copy)]
pub struct LabelTable<const N: usize> {
    labels: [&'static str; N],
}

impl<const N: usize> LabelTable<N> {
    pub const fn new(labels: [&'static str; N]) -> Self {
        Self { labels }
    }

    /// Label for position `index` (wraps around).
    pub fn for_index(&self, index: usize) -> &'static str {
        self.labels[index % N]
    }

    /// Bucket number for position `index`.
    pub const fn bucket(index: usize) -> usize {
        index % N
    }

    pub fn labels(&self) -> &[&'static str; N] {
        &self.labels
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

/// Last `n` characters of `s` (all of it when shorter).
pub fn suffix(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    match s.char_indices().nth(count.saturating_sub(n)) {
        Some((start, _)) => &s[start..],
        None => "",
    }
}

/// First `n` characters of `s` (all of it when shorter).
pub fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// `A`, `B`, `C`… for 0, 1, 2…; wraps after `Z`.
pub fn letter(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}
