/// Re-randomizes the model when training stalls above a required error.
///
/// An iteration is bad when its error is not below `required_error`. After
/// `cycles` consecutive bad iterations a reset is requested and the count
/// starts over; any good iteration clears the count.
#[derive(Debug, Clone, PartialEq)]
pub struct ResetStrategy {
    required_error: f64,
    cycles: usize,
    bad_cycles: usize,
}

impl ResetStrategy {
    pub fn new(required_error: f64, cycles: usize) -> Self {
        ResetStrategy { required_error, cycles, bad_cycles: 0 }
    }

    /// Records one iteration's error; returns `true` if the model should be reset.
    pub fn post_iteration(&mut self, error: f64) -> bool {
        if error < self.required_error {
            self.bad_cycles = 0;
            return false;
        }
        self.bad_cycles += 1;
        if self.bad_cycles >= self.cycles {
            self.bad_cycles = 0;
            return true;
        }
        false
    }

    pub fn bad_cycles(&self) -> usize {
        self.bad_cycles
    }
}
