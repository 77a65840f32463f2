use std::collections::VecDeque;

use crate::error::Result;

use super::{no_victim, PageEvent, PageReplacer, Policy, ReplacementContext};

#[derive(Debug, Default)]
pub struct FIFOPageReplacer {
    fifo: VecDeque<usize>,
}

impl FIFOPageReplacer {
    pub fn new() -> Self {
        FIFOPageReplacer {
            fifo: VecDeque::new(),
        }
    }
}

impl PageReplacer for FIFOPageReplacer {
    fn page_event(&mut self, event: PageEvent) {
        if let PageEvent::Loaded { page, .. } = event {
            self.fifo.push_back(page)
        }
    }

    fn pick_victim(&mut self, ctx: &mut ReplacementContext<'_>) -> Result<usize> {
        while let Some(page) = self.fifo.pop_front() {
            // skip pages that already left memory
            if let Some(frame) = ctx.frames.frame_of(page) {
                return Ok(frame);
            }
        }

        Err(no_victim(Policy::Fifo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::page_replacer::test_support::loaded;

    #[test]
    fn victims_follow_load_order() {
        let (mut table, frames) = loaded(8, &[5, 2, 7]);
        let mut fifo = FIFOPageReplacer::new();

        // load order differs from frame order
        for (page, frame) in [(2, 1), (7, 2), (5, 0)] {
            fifo.page_event(PageEvent::Loaded { page, frame });
        }

        let mut ctx = ReplacementContext {
            page_table: &mut table,
            frames: &frames,
            references: &[],
            step: 0,
        };

        assert_eq!(fifo.pick_victim(&mut ctx).unwrap(), 1);
        assert_eq!(fifo.pick_victim(&mut ctx).unwrap(), 2);
        assert_eq!(fifo.pick_victim(&mut ctx).unwrap(), 0);
        assert!(fifo.pick_victim(&mut ctx).is_err());
    }

    #[test]
    fn hits_do_not_reorder_the_queue() {
        let (mut table, frames) = loaded(4, &[0, 1]);
        let mut fifo = FIFOPageReplacer::new();

        fifo.page_event(PageEvent::Loaded { page: 0, frame: 0 });
        fifo.page_event(PageEvent::Loaded { page: 1, frame: 1 });
        fifo.page_event(PageEvent::Touched(0));

        let mut ctx = ReplacementContext {
            page_table: &mut table,
            frames: &frames,
            references: &[],
            step: 0,
        };

        assert_eq!(fifo.pick_victim(&mut ctx).unwrap(), 0);
    }

    #[test]
    fn stale_entries_are_skipped() {
        let (mut table, frames) = loaded(4, &[3]);
        let mut fifo = FIFOPageReplacer::new();

        fifo.page_event(PageEvent::Loaded { page: 1, frame: 0 });
        fifo.page_event(PageEvent::Loaded { page: 3, frame: 0 });

        let mut ctx = ReplacementContext {
            page_table: &mut table,
            frames: &frames,
            references: &[],
            step: 0,
        };

        assert_eq!(fifo.pick_victim(&mut ctx).unwrap(), 0);
    }
}
