pub const DEFAULT_MAX_DEPTH: usize = 128;
pub const DEFAULT_MAX_HEIGHT: usize = 1024;

/// Options shared by the parser and the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Forward trig functions (`sin`, `cos`, `tan`) take their argument in degrees.
    pub use_degrees: bool,
    /// Ceiling on parenthesis and call nesting.
    pub max_depth: usize,
    /// Ceiling on the height of the expression tree. A chain like `1+1+...+1` is as tall as it
    /// is long, so this bounds operator chains as well as nesting.
    pub max_height: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_degrees: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_degrees(mut self, use_degrees: bool) -> Self {
        self.use_degrees = use_degrees;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_height(mut self, max_height: usize) -> Self {
        self.max_height = max_height;
        self
    }
}
