//! Every-Nth selection
//!
//! Picks the items at positions `offset`, `offset + step`, `offset + 2 * step`, ...
//! of an already sorted listing.

use super::error::DistillError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    step: usize,
    offset: usize,
}

impl Selection {
    /// Validates the raw command-line values
    ///
    /// # Errors
    /// `InvalidStep` for a step of zero or below, `InvalidOffset` for a negative offset
    pub fn new(step: i64, offset: i64) -> Result<Self, DistillError> {
        let step = usize::try_from(step)
            .ok()
            .filter(|step| *step > 0)
            .ok_or(DistillError::InvalidStep(step))?;
        let offset = usize::try_from(offset).map_err(|_| DistillError::InvalidOffset(offset))?;

        Ok(Self { step, offset })
    }

    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().skip(self.offset).step_by(self.step).collect()
    }

    /// floor((len - offset - 1) / step) + 1, or 0 when the offset is past the end
    #[must_use]
    pub const fn expected_count(&self, len: usize) -> usize {
        if self.offset >= len {
            0
        } else {
            (len - self.offset - 1) / self.step + 1
        }
    }
}
