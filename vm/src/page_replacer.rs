use std::{fmt, str::FromStr};

use crate::error::{Result, VmError};
use crate::frame_store::FrameStore;
use crate::page_table::PageTable;

mod clock;
mod fifo;
mod lru;
mod optimal;

pub use clock::ClockPageReplacer;
pub use fifo::FIFOPageReplacer;
pub use lru::LRUPageReplacer;
pub use optimal::OptimalPageReplacer;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PageEvent {
    Touched(usize),
    Loaded { page: usize, frame: usize },
    Evicted { page: usize, frame: usize },
}

// page table is mutable so Clock can hand out second chances
pub struct ReplacementContext<'a> {
    pub page_table: &'a mut PageTable,
    pub frames: &'a FrameStore,
    pub references: &'a [usize],
    pub step: usize,
}

pub trait PageReplacer: fmt::Debug {
    fn page_event(&mut self, _event: PageEvent) {}

    fn pick_victim(&mut self, ctx: &mut ReplacementContext<'_>) -> Result<usize>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Policy {
    Fifo,
    Lru,
    Optimal,
    Clock,
}

impl Policy {
    pub const ALL: [Policy; 4] = [Policy::Fifo, Policy::Lru, Policy::Optimal, Policy::Clock];

    pub fn replacer(self, frame_count: usize) -> Box<dyn PageReplacer> {
        match self {
            Policy::Fifo => Box::new(FIFOPageReplacer::new()),
            Policy::Lru => Box::new(LRUPageReplacer),
            Policy::Optimal => Box::new(OptimalPageReplacer),
            Policy::Clock => Box::new(ClockPageReplacer::new(frame_count)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Policy::Fifo => "FIFO",
            Policy::Lru => "LRU",
            Policy::Optimal => "Optimal",
            Policy::Clock => "Clock",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = VmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(Policy::Fifo),
            "lru" => Ok(Policy::Lru),
            "optimal" | "opt" => Ok(Policy::Optimal),
            "clock" | "second-chance" => Ok(Policy::Clock),
            "" => Err(VmError::InvalidConfiguration(
                "no replacement policy selected".to_string(),
            )),
            other => Err(VmError::InvalidConfiguration(format!(
                "unknown replacement policy {:?}",
                other
            ))),
        }
    }
}

fn occupied_frames(frames: &FrameStore) -> impl Iterator<Item = (usize, usize)> + '_ {
    frames
        .iter()
        .enumerate()
        .filter_map(|(frame, page)| page.map(|page| (frame, page)))
}

fn no_victim(policy: Policy) -> VmError {
    VmError::PolicyInvariantViolation(format!("{} found no resident page to evict", policy))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policies_parse_case_insensitively() {
        assert_eq!("FIFO".parse::<Policy>().unwrap(), Policy::Fifo);
        assert_eq!("lru".parse::<Policy>().unwrap(), Policy::Lru);
        assert_eq!("OPTIMAL".parse::<Policy>().unwrap(), Policy::Optimal);
        assert_eq!(" Clock ".parse::<Policy>().unwrap(), Policy::Clock);
    }

    #[test]
    fn empty_or_unknown_policy_is_invalid_configuration() {
        assert!(matches!(
            "".parse::<Policy>(),
            Err(VmError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            "mru".parse::<Policy>(),
            Err(VmError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for policy in Policy::ALL {
            assert_eq!(policy.to_string().parse::<Policy>().unwrap(), policy);
        }
    }
}
