/// Resource limits that bound the work done per input expression
///
/// Cross-reference matching enumerates every ordering of an expression's
/// factors, so its cost grows factorially with the factor count. These limits
/// are generous for real unit codes while keeping that enumeration bounded.
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// Maximum length of a single unit expression in bytes
    /// Real usage: ~10 bytes, Limit: 256
    pub max_input_bytes: usize,

    /// Maximum number of factors in one expression
    /// Real usage: 1-4 factors, Limit: 6 (720 orderings)
    pub max_factors: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: 256,
            max_factors: 6,
        }
    }
}

impl ResourceLimits {
    /// Create a new ResourceLimits with default values
    pub fn new() -> Self {
        Self::default()
    }
}
