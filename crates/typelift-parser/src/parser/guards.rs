//! Parser guards to prevent infinite loops and stack overflow

use super::ParseError;
use crate::token::Span;

/// Maximum iterations for any parser loop before erroring
const MAX_LOOP_ITERATIONS: usize = 10_000;

/// Maximum nesting depth before rejecting parse
///
/// Debug-build stacks overflow near 40 nested object expressions; 30
/// leaves a margin while still exceeding anything realistic sources do.
pub const MAX_PARSE_DEPTH: usize = 30;

#[inline]
fn default_span() -> Span {
    Span::new(0, 0, 0, 0)
}

/// Guard against infinite loops in parser
///
/// Tracks iteration count and returns an error once exceeded.
///
/// # Example
///
/// ```ignore
/// let mut guard = LoopGuard::new("class_members");
/// while !done {
///     guard.check()?;
///     // ... parse something ...
/// }
/// ```
pub struct LoopGuard {
    name: &'static str,
    count: usize,
    max: usize,
}

impl LoopGuard {
    /// Create a new loop guard with the default limit
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            count: 0,
            max: MAX_LOOP_ITERATIONS,
        }
    }

    /// Create a loop guard with a custom limit
    #[inline]
    pub fn with_limit(name: &'static str, max: usize) -> Self {
        Self { name, count: 0, max }
    }

    /// Check iteration count, return an error if exceeded
    #[inline]
    pub fn check(&mut self) -> Result<(), ParseError> {
        self.count += 1;
        if self.count > self.max {
            return Err(ParseError::parser_limit_exceeded(
                format!("loop '{}' exceeded {} iterations", self.name, self.max),
                default_span(),
            ));
        }
        Ok(())
    }

    /// Reset counter (for nested loops)
    #[inline]
    pub fn reset(&mut self) {
        self.count = 0;
    }
}
