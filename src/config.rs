/// Limits applied to a single evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalConfig {
    /// Largest absolute dice count accepted by one `d` operator.
    pub max_dice: u64,
    /// Characters of roll trace after which die values are elided.
    pub max_trace_chars: usize,
    /// Individual die values listed in the roll trace.
    pub max_trace_dice: usize,
    /// Ceiling on recursion across all precedence tiers. Every operator in a
    /// chain such as `1+1+1` adds a level, nested or not.
    pub max_depth: usize,
    /// Longest accepted expression, counted in characters after whitespace
    /// removal.
    pub max_length: usize,
}

impl EvalConfig {
    pub const DEFAULT_MAX_DICE: u64 = 999_999;
    pub const DEFAULT_MAX_TRACE_CHARS: usize = 80;
    pub const DEFAULT_MAX_TRACE_DICE: usize = 8;
    pub const DEFAULT_MAX_DEPTH: usize = 256;
    pub const DEFAULT_MAX_LENGTH: usize = 1000;

    pub fn with_max_dice(mut self, max_dice: u64) -> Self {
        self.max_dice = max_dice;
        self
    }

    pub fn with_trace_budget(mut self, chars: usize, dice: usize) -> Self {
        self.max_trace_chars = chars;
        self.max_trace_dice = dice;
        self
    }

    pub fn with_limits(mut self, max_depth: usize, max_length: usize) -> Self {
        self.max_depth = max_depth;
        self.max_length = max_length;
        self
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_dice: Self::DEFAULT_MAX_DICE,
            max_trace_chars: Self::DEFAULT_MAX_TRACE_CHARS,
            max_trace_dice: Self::DEFAULT_MAX_TRACE_DICE,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_length: Self::DEFAULT_MAX_LENGTH,
        }
    }
}
