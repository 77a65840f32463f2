use crate::error::Result;

use super::{no_victim, occupied_frames, PageReplacer, Policy, ReplacementContext};

/// Belady's optimal policy: evicts the page whose next use lies farthest ahead.
///
/// Scans the remaining reference string for every resident page, so each
/// fault costs O(frames * remaining). Fine for simulation inputs.
#[derive(Debug, Default, Clone, Copy)]
pub struct OptimalPageReplacer;

impl OptimalPageReplacer {
    /// Position of the next reference to `page` strictly after `step`.
    fn next_use(references: &[usize], step: usize, page: usize) -> Option<usize> {
        let start = step + 1;

        references
            .get(start..)?
            .iter()
            .position(|&p| p == page)
            .map(|offset| start + offset)
    }
}

impl PageReplacer for OptimalPageReplacer {
    fn pick_victim(&mut self, ctx: &mut ReplacementContext<'_>) -> Result<usize> {
        let mut victim: Option<(usize, usize)> = None;

        for (frame, page) in occupied_frames(ctx.frames) {
            // never used again counts as infinitely far
            let distance = Self::next_use(ctx.references, ctx.step, page).unwrap_or(usize::MAX);

            match victim {
                Some((_, farthest)) if distance <= farthest => {}
                _ => victim = Some((frame, distance)),
            }
        }

        victim.map(|(frame, _)| frame).ok_or_else(|| no_victim(Policy::Optimal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::page_replacer::test_support::loaded;

    #[test]
    fn next_use_looks_strictly_after_the_current_step() {
        let refs = [1, 2, 1, 3];

        assert_eq!(OptimalPageReplacer::next_use(&refs, 0, 1), Some(2));
        assert_eq!(OptimalPageReplacer::next_use(&refs, 2, 1), None);
        assert_eq!(OptimalPageReplacer::next_use(&refs, 3, 3), None);
        assert_eq!(OptimalPageReplacer::next_use(&refs, 10, 3), None);
    }

    #[test]
    fn evicts_the_page_used_farthest_in_the_future() {
        let (mut table, frames) = loaded(8, &[7, 0, 1]);
        let refs = [7, 0, 1, 2, 0, 3, 0, 4];

        let mut ctx = ReplacementContext {
            page_table: &mut table,
            frames: &frames,
            references: &refs,
            step: 3,
        };

        // 0 comes back at 4, 7 and 1 never do: first of the two wins
        assert_eq!(OptimalPageReplacer.pick_victim(&mut ctx).unwrap(), 0);
    }

    #[test]
    fn finite_distances_pick_the_largest() {
        let (mut table, frames) = loaded(8, &[2, 0, 1]);
        let refs = [9, 0, 1, 2];

        let mut ctx = ReplacementContext {
            page_table: &mut table,
            frames: &frames,
            references: &refs,
            step: 0,
        };

        assert_eq!(OptimalPageReplacer.pick_victim(&mut ctx).unwrap(), 0);
    }
}
