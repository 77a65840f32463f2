//! Synthetic reference strings.

use std::{fmt, str::FromStr};

use rand::Rng;

use crate::error::{Result, VmError};

/// Chance that a locality step stays near the cursor instead of jumping.
const LOCALITY_PROBABILITY: f64 = 0.7;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReferencePattern {
    /// Every page uniform in `[0, max_page)`.
    Random,
    /// A cursor that mostly drifts by -1, 0 or +1 and sometimes jumps.
    Locality,
    /// `0, 1, .., max_page - 1, 0, 1, ..`
    Sequential,
}

impl ReferencePattern {
    pub const ALL: [ReferencePattern; 3] = [
        ReferencePattern::Random,
        ReferencePattern::Locality,
        ReferencePattern::Sequential,
    ];
}

impl fmt::Display for ReferencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferencePattern::Random => "random",
            ReferencePattern::Locality => "locality",
            ReferencePattern::Sequential => "sequential",
        })
    }
}

impl FromStr for ReferencePattern {
    type Err = VmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(ReferencePattern::Random),
            "locality" => Ok(ReferencePattern::Locality),
            "sequential" => Ok(ReferencePattern::Sequential),
            other => Err(VmError::InvalidConfiguration(format!(
                "unknown reference pattern {:?}",
                other
            ))),
        }
    }
}

pub fn generate_reference_string<R: Rng + ?Sized>(
    length: usize,
    max_page: usize,
    pattern: ReferencePattern,
    rng: &mut R,
) -> Result<Vec<usize>> {
    if length == 0 {
        return Ok(Vec::new());
    }

    if max_page == 0 {
        return Err(VmError::InvalidConfiguration(
            "cannot draw pages from an empty range".to_string(),
        ));
    }

    let references: Vec<usize> = match pattern {
        ReferencePattern::Random => (0..length).map(|_| rng.gen_range(0..max_page)).collect(),
        ReferencePattern::Locality => {
            let mut cursor = rng.gen_range(0..max_page);

            (0..length)
                .map(|_| {
                    cursor = if rng.gen_bool(LOCALITY_PROBABILITY) {
                        match rng.gen_range(0..3) {
                            0 => cursor.saturating_sub(1),
                            1 => cursor,
                            _ => (cursor + 1).min(max_page - 1),
                        }
                    } else {
                        rng.gen_range(0..max_page)
                    };

                    cursor
                })
                .collect()
        }
        ReferencePattern::Sequential => (0..length).map(|i| i % max_page).collect(),
    };

    Ok(references)
}
