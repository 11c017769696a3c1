//! Small extension traits for strings and vectors.

/// String predicates and parsing helpers.
pub trait StrExt {
    /// Returns `true` if the string is empty or contains only whitespace.
    fn is_blank(&self) -> bool;

    /// Parses a run of trailing ASCII digits.
    ///
    /// Returns the parsed number and the byte index where the digit run
    /// starts, or `None` if the string does not end in a digit (or the run
    /// overflows `u64`).
    fn trailing_number(&self) -> Option<(u64, usize)>;
}

impl StrExt for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }

    fn trailing_number(&self) -> Option<(u64, usize)> {
        let stripped = self.trim_end_matches(|c: char| c.is_ascii_digit());
        if stripped.len() == self.len() {
            return None;
        }
        let start = stripped.len();
        self[start..].parse().ok().map(|n| (n, start))
    }
}

/// Add-if-absent helpers for vectors.
pub trait VecExt<T> {
    /// Appends `item` unless an equal element is already present.
    fn push_unique(&mut self, item: T);

    /// Appends `item` unless an equal element is already present; returns
    /// whether it was added.
    fn try_push_unique(&mut self, item: T) -> bool;
}

impl<T: PartialEq> VecExt<T> for Vec<T> {
    fn push_unique(&mut self, item: T) {
        let _ = self.try_push_unique(item);
    }

    fn try_push_unique(&mut self, item: T) -> bool {
        if self.contains(&item) {
            return false;
        }
        self.push(item);
        true
    }
}
