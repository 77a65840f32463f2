//! Demand paging simulator: a page table, a fixed row of frames and four
//! replacement policies (FIFO, LRU, Optimal, Clock), driven one reference at
//! a time.
//!
//! ```
//! use vm::{Policy, SimulationConfig, Simulator};
//!
//! let config = SimulationConfig {
//!     frame_count: 3,
//!     virtual_page_count: 8,
//!     reference_string: vec![7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1],
//!     policy: Policy::Lru,
//!     seed: Some(0),
//! };
//!
//! let mut simulator = Simulator::new(config)?;
//! assert_eq!(simulator.run()?.faults, 12);
//! # Ok::<(), vm::VmError>(())
//! ```

pub mod comparator;
pub mod config;
pub mod error;
pub mod frame_store;
pub mod page_replacer;
pub mod page_table;
pub mod simulator;
pub mod workload;

pub use comparator::{compare, Comparison};
pub use config::{parse_reference_string, SimulationConfig, MAX_VIRTUAL_PAGES};
pub use error::{Result, VmError};
pub use frame_store::FrameStore;
pub use page_replacer::{PageEvent, PageReplacer, Policy, ReplacementContext};
pub use page_table::{PageTable, PageTableEntry};
pub use simulator::{SimulationState, Simulator, Statistics, TraceEntry};
pub use workload::{generate_reference_string, ReferencePattern};
