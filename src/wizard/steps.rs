/// Current-step pointer for a linear wizard. Steps are 1-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepNav {
    current: usize,
    total: usize,
}

impl StepNav {
    /// `total` is clamped to at least one step.
    pub fn new(total: usize) -> Self {
        Self {
            current: 1,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total
    }

    /// Moves forward one step. Returns false at the final step.
    pub fn advance(&mut self) -> bool {
        if self.current < self.total {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Moves back one step. Returns false at step 1.
    pub fn retreat(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Width of the progress indicator in percent.
    ///
    /// A single-step wizard is always on its final step, so it reports 100.
    pub fn progress_percent(&self) -> f64 {
        if self.total <= 1 {
            return 100.0;
        }
        (self.current - 1) as f64 / (self.total - 1) as f64 * 100.0
    }
}
