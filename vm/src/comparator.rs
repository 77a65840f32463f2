use std::collections::BTreeMap;

use log::debug;

use crate::config::SimulationConfig;
use crate::error::{Result, VmError};
use crate::page_replacer::Policy;
use crate::simulator::Simulator;

/// Total faults per policy for one reference string, in [`Policy::ALL`] order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comparison {
    faults: BTreeMap<Policy, usize>,
}

impl Comparison {
    pub fn faults(&self, policy: Policy) -> Option<usize> {
        self.faults.get(&policy).copied()
    }

    /// Policy with the fewest faults; the earlier policy wins a tie.
    pub fn best(&self) -> Option<(Policy, usize)> {
        self.iter().min_by_key(|&(policy, faults)| (faults, policy))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Policy, usize)> + '_ {
        self.faults.iter().map(|(&policy, &faults)| (policy, faults))
    }
}

/// Runs every policy over `reference` on its own simulator.
pub fn compare(reference: &[usize], frame_count: usize) -> Result<Comparison> {
    let virtual_page_count = match reference.iter().max() {
        Some(&max) => max.checked_add(1).ok_or_else(|| {
            VmError::InvalidConfiguration(format!("page {} has no room in a page table", max))
        })?,
        None => 1,
    };
    let mut faults = BTreeMap::new();

    for policy in Policy::ALL {
        let config = SimulationConfig {
            frame_count,
            virtual_page_count,
            reference_string: reference.to_vec(),
            policy,
            // the modified bit plays no part in the outcome
            seed: Some(0),
        };

        let stats = Simulator::new(config)?.run()?;

        debug!("comparator: {} took {} faults", policy, stats.faults);

        faults.insert(policy, stats.faults);
    }

    Ok(Comparison { faults })
}
