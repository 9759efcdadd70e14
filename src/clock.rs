/*
 * Millisecond timestamps from a free-running 32 bit counter.
 *
 * The counter wraps after roughly 49.7 days. All comparisons go through
 * `elapsed_since`, which subtracts modulo 2^32, so an interval that spans the
 * wrap is still measured correctly as long as it is shorter than the full
 * counter range.
 */

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Millis(pub u32);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    pub const fn new(ms: u32) -> Self {
        Millis(ms)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Milliseconds from `earlier` to `self`, modulo the counter width.
    pub const fn elapsed_since(self, earlier: Millis) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    pub const fn wrapping_add(self, ms: u32) -> Millis {
        Millis(self.0.wrapping_add(ms))
    }

    /// True once at least `duration` milliseconds have passed since `since`.
    pub const fn has_elapsed(self, since: Millis, duration: u32) -> bool {
        self.elapsed_since(since) >= duration
    }
}

impl From<u32> for Millis {
    fn from(ms: u32) -> Self {
        Millis(ms)
    }
}
