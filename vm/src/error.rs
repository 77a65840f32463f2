use thiserror::Error;

/// Everything that can go wrong while configuring or driving a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    /// Rejected at reset/construction, never silently defaulted.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A reference outside `[0, page_count)`.
    #[error("unknown page {page}: the page table covers pages 0..{page_count}")]
    UnknownPage { page: usize, page_count: usize },

    /// `step()` was called after the reference string was exhausted.
    #[error("simulation complete: all {steps} references were processed")]
    SimulationComplete { steps: usize },

    /// Internal invariant broken by a replacement policy.
    #[error("policy invariant violated: {0}")]
    PolicyInvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, VmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = VmError::UnknownPage { page: 13, page_count: 12 };
        assert_eq!(err.to_string(), "unknown page 13: the page table covers pages 0..12");

        let err = VmError::SimulationComplete { steps: 20 };
        assert!(err.to_string().contains("20"));
    }
}
