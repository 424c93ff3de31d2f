/// Step-wise execution of a finite-state machine over character input.
pub trait Simulate {
    /// Returns whether the machine currently sits in an accepting state.
    fn is_accepting(&self) -> bool;

    /// Returns whether the machine can no longer reach an accepting state,
    /// whatever input follows.
    fn is_dead(&self) -> bool;

    /// Feeds a single character to the finite-state machine and returns whether
    /// it has reached an accepting state.
    fn feed(&mut self, input: char) -> bool;

    /// Puts the machine back into its start configuration.
    fn reset(&mut self);

    /// Simulates the finite-state machine from start to finish and returns
    /// whether it accepts the input.
    fn run(&mut self, input: &str) -> bool {
        self.reset();
        for c in input.chars() {
            self.feed(c);
            if self.is_dead() {
                return false;
            }
        }
        self.is_accepting()
    }

    /// Returns the length in bytes of the longest non-empty prefix of `input`
    /// the machine accepts.
    ///
    /// Scanning stops as soon as the machine dies, so intermediate accepting
    /// states are remembered and the last one wins.
    fn longest_prefix(&mut self, input: &str) -> Option<usize> {
        self.reset();
        let mut longest = None;

        for (pos, c) in input.char_indices() {
            if self.feed(c) {
                longest = Some(pos + c.len_utf8());
            }

            if self.is_dead() {
                break;
            }
        }

        longest
    }
}
