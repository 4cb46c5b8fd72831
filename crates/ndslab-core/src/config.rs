//! Engine configuration parameters.

/// What the 1-D slicer does when a range bound lies outside the source.
///
/// Only the two recoverable cases are affected: an end past the source
/// length, and a start past the end. Empty and negative ranges are never
/// recovered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClampPolicy {
    /// Clamp the bound without reporting anything.
    #[default]
    Silent,
    /// Clamp the bound and print a diagnostic to stderr.
    Verbose,
    /// Refuse the slice with a [`SliceError`](crate::SliceError).
    Strict,
}

/// Configuration for fill and slice operations.
///
/// Neither parameter affects results of successful operations: both fill
/// branches write identical bytes, and clamping only changes which inputs
/// are accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayConfig {
    /// Element size in bytes below which the hybrid fill doubles instead
    /// of copying slot by slot.
    ///
    /// Default: 128.
    pub hybrid_threshold: usize,

    /// Out-of-bounds handling for the 1-D slicer.
    ///
    /// Default: [`ClampPolicy::Silent`].
    pub clamp_policy: ClampPolicy,
}

impl ArrayConfig {
    /// Default hybrid fill threshold in bytes.
    pub const DEFAULT_HYBRID_THRESHOLD: usize = 128;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            hybrid_threshold: Self::DEFAULT_HYBRID_THRESHOLD,
            clamp_policy: ClampPolicy::Silent,
        }
    }

    /// Same config with a different clamp policy.
    pub fn with_clamp_policy(mut self, clamp_policy: ClampPolicy) -> Self {
        self.clamp_policy = clamp_policy;
        self
    }

    /// Same config with a different hybrid threshold.
    pub fn with_hybrid_threshold(mut self, hybrid_threshold: usize) -> Self {
        self.hybrid_threshold = hybrid_threshold;
        self
    }

    /// Whether the hybrid fill takes the doubling branch for `element_size`.
    pub fn prefers_doubling(&self, element_size: usize) -> bool {
        element_size < self.hybrid_threshold
    }
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self::new()
    }
}
