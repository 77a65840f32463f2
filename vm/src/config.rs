use rand::Rng;

use crate::error::{Result, VmError};
use crate::page_replacer::Policy;

/// Largest page table a simulation may ask for. Every page gets a dense entry.
pub const MAX_VIRTUAL_PAGES: usize = 1 << 20;

/// Parameters for one simulation run. Checked by [`SimulationConfig::validate`]
/// whenever a simulator is built or reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    pub frame_count: usize,
    pub virtual_page_count: usize,
    pub reference_string: Vec<usize>,
    pub policy: Policy,
    /// Seed for the modified-bit draw; `None` pulls from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            frame_count: 4,
            virtual_page_count: 12,
            reference_string: vec![7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1],
            policy: Policy::Fifo,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// A uniform workload of 10 to 24 references over 5 to 14 pages, with a
    /// page table five pages larger than the workload needs.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let length: usize = rng.gen_range(10..25);
        let max_page: usize = rng.gen_range(5..15);

        SimulationConfig {
            virtual_page_count: max_page + 5,
            reference_string: (0..length).map(|_| rng.gen_range(0..max_page)).collect(),
            ..SimulationConfig::default()
        }
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_count == 0 {
            return Err(VmError::InvalidConfiguration(
                "frame count must be at least 1".to_string(),
            ));
        }

        if self.virtual_page_count == 0 {
            return Err(VmError::InvalidConfiguration(
                "virtual page count must be at least 1".to_string(),
            ));
        }

        if self.virtual_page_count > MAX_VIRTUAL_PAGES {
            return Err(VmError::InvalidConfiguration(format!(
                "virtual page count {} exceeds the limit of {}",
                self.virtual_page_count, MAX_VIRTUAL_PAGES
            )));
        }

        if let Some(&max) = self.reference_string.iter().max() {
            if max >= self.virtual_page_count {
                return Err(VmError::InvalidConfiguration(format!(
                    "reference string touches page {} but only {} virtual pages exist",
                    max, self.virtual_page_count
                )));
            }
        }

        Ok(())
    }
}

/// Parses a comma separated reference string such as `"7, 0, 1"`.
pub fn parse_reference_string(input: &str) -> Result<Vec<usize>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    input
        .split(',')
        .map(|item| {
            item.trim().parse::<usize>().map_err(|_| {
                VmError::InvalidConfiguration(format!("bad page number {:?}", item.trim()))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        let config = SimulationConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.frame_count, 4);
        assert_eq!(config.reference_string.len(), 20);
    }

    #[test]
    fn zero_frames_is_rejected() {
        let config = SimulationConfig {
            frame_count: 0,
            ..SimulationConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(VmError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn virtual_size_must_cover_the_reference_string() {
        let config = SimulationConfig {
            virtual_page_count: 7,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SimulationConfig {
            virtual_page_count: 8,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = SimulationConfig {
            virtual_page_count: 0,
            reference_string: Vec::new(),
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_page_table_is_rejected_before_allocation() {
        let config = SimulationConfig {
            frame_count: 1,
            virtual_page_count: usize::MAX,
            reference_string: vec![0],
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(VmError::InvalidConfiguration(_))
        ));

        let config = SimulationConfig {
            virtual_page_count: MAX_VIRTUAL_PAGES,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn random_configuration_stays_within_its_page_table() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let config = SimulationConfig::random(&mut rng);

            assert!((10..25).contains(&config.reference_string.len()));
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn reference_strings_parse_from_text() {
        assert_eq!(parse_reference_string("7, 0,1 ,2").unwrap(), vec![7, 0, 1, 2]);
        assert_eq!(parse_reference_string("  ").unwrap(), Vec::<usize>::new());
        assert!(parse_reference_string("1, x, 2").is_err());
        assert!(parse_reference_string("1,,2").is_err());
        assert!(parse_reference_string("-1").is_err());
    }
}
