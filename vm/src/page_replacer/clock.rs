use log::trace;

use crate::error::{Result, VmError};

use super::{PageReplacer, ReplacementContext};

/// Second-chance replacement over a circular hand.
#[derive(Debug, Clone)]
pub struct ClockPageReplacer {
    hand: usize,
    frame_count: usize,
    last_scan: usize,
}

impl ClockPageReplacer {
    pub fn new(frame_count: usize) -> Self {
        ClockPageReplacer {
            hand: 0,
            frame_count,
            last_scan: 0,
        }
    }

    pub fn hand(&self) -> usize {
        self.hand
    }

    /// Frames visited by the most recent `pick_victim`.
    pub fn last_scan_length(&self) -> usize {
        self.last_scan
    }

    fn advance(&mut self) {
        self.hand = (self.hand + 1) % self.frame_count;
    }
}

impl PageReplacer for ClockPageReplacer {
    fn pick_victim(&mut self, ctx: &mut ReplacementContext<'_>) -> Result<usize> {
        if self.frame_count == 0 {
            return Err(VmError::PolicyInvariantViolation(
                "clock has no frames to scan".to_string(),
            ));
        }

        // every pass clears at least one bit, two passes always suffice
        let limit = 2 * self.frame_count;
        let mut visits = 0;

        while visits < limit {
            visits += 1;
            let frame = self.hand;

            let claim = match ctx.frames.get(frame) {
                None => true,
                Some(page) => {
                    if ctx.page_table.lookup(page)?.referenced {
                        trace!("clock: second chance for page {} in frame {}", page, frame);
                        ctx.page_table.set_referenced(page, false)?;
                        false
                    } else {
                        true
                    }
                }
            };

            self.advance();

            if claim {
                self.last_scan = visits;
                trace!("clock: claimed frame {} after {} visits", frame, visits);
                return Ok(frame);
            }
        }

        self.last_scan = visits;

        Err(VmError::PolicyInvariantViolation(format!(
            "clock scan visited {} frames without finding a victim",
            visits
        )))
    }
}
