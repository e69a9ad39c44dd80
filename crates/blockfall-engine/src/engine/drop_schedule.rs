/// Maps the current level to a gravity interval in logical ticks.
///
/// The piece falls one row every `start_ticks - level` ticks, but never
/// faster than every `final_ticks` ticks.
///
/// # Example
///
/// ```
/// use blockfall_engine::DropSchedule;
///
/// let schedule = DropSchedule::default();
/// assert_eq!(schedule.ticks_per_drop(0), 12);
/// assert_eq!(schedule.ticks_per_drop(3), 9);
/// assert_eq!(schedule.ticks_per_drop(50), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropSchedule {
    start_ticks: u64,
    final_ticks: u64,
}

impl Default for DropSchedule {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START_TICKS, Self::DEFAULT_FINAL_TICKS)
    }
}

impl DropSchedule {
    /// Logical ticks per second the default schedule is tuned for.
    pub const DEFAULT_TICK_RATE: f64 = 25.0;
    pub const DEFAULT_START_TICKS: u64 = 12;
    pub const DEFAULT_FINAL_TICKS: u64 = 2;

    /// Creates a schedule. Both intervals are clamped to at least one tick,
    /// and `start_ticks` to at least `final_ticks`.
    #[must_use]
    pub fn new(start_ticks: u64, final_ticks: u64) -> Self {
        let final_ticks = final_ticks.max(1);
        Self {
            start_ticks: start_ticks.max(final_ticks),
            final_ticks,
        }
    }

    #[must_use]
    pub fn start_ticks(&self) -> u64 {
        self.start_ticks
    }

    #[must_use]
    pub fn final_ticks(&self) -> u64 {
        self.final_ticks
    }

    #[must_use]
    pub fn ticks_per_drop(&self, level: usize) -> u64 {
        let level = u64::try_from(level).unwrap_or(u64::MAX);
        self.start_ticks
            .saturating_sub(level)
            .max(self.final_ticks)
    }
}
