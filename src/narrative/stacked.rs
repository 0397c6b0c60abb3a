use crate::foundation::math::clamp01;

/// Stacked-card deck driven by the shared gallery progress.
///
/// The deck position `s = p·(N−1)` says which card is in front: card `i` sits at offset
/// `clamp(i − s, −1, 1)` slide lengths, so as `s` passes from `i` to `i + 1` card `i` slides out
/// upward while card `i + 1` comes up from below.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackedDeck {
    count: usize,
}

impl StackedDeck {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn position(&self, progress: f64) -> f64 {
        clamp01(progress) * self.count.saturating_sub(1) as f64
    }

    /// Offset of card `index` in slide lengths, in `[−1, 1]`.
    pub fn offset(&self, index: usize, progress: f64) -> f64 {
        (index as f64 - self.position(progress)).clamp(-1.0, 1.0)
    }

    /// Index of the card nearest the front.
    pub fn front(&self, progress: f64) -> Option<usize> {
        (self.count > 0).then(|| (self.position(progress).round() as usize).min(self.count - 1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/narrative/stacked.rs"]
mod tests;
