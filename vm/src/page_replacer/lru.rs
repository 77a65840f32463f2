use crate::error::Result;

use super::{no_victim, occupied_frames, PageReplacer, Policy, ReplacementContext};

#[derive(Debug, Default, Clone, Copy)]
pub struct LRUPageReplacer;

impl PageReplacer for LRUPageReplacer {
    fn pick_victim(&mut self, ctx: &mut ReplacementContext<'_>) -> Result<usize> {
        let mut victim: Option<(usize, Option<usize>)> = None;

        for (frame, page) in occupied_frames(ctx.frames) {
            let last_used = ctx.page_table.lookup(page)?.last_used;

            // strict comparison keeps the first frame among equals
            match victim {
                Some((_, oldest)) if last_used >= oldest => {}
                _ => victim = Some((frame, last_used)),
            }
        }

        victim.map(|(frame, _)| frame).ok_or_else(|| no_victim(Policy::Lru))
    }
}
