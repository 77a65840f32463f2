use rand::Rng;

use crate::error::{Result, VmError};
use crate::frame_store::FrameStore;

/// Chance that a page starts out dirty. Purely cosmetic, nothing reads it back.
const MODIFIED_PROBABILITY: f64 = 0.3;

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct PageTableEntry {
    pub frame_index: Option<usize>,
    pub resident: bool,
    pub referenced: bool,
    pub modified: bool,
    /// Step of the most recent access; `None` sorts before every step.
    pub last_used: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct PageTable {
    table: Vec<PageTableEntry>,
}

impl PageTable {
    pub fn new<R: Rng + ?Sized>(page_count: usize, rng: &mut R) -> Self {
        let table = (0..page_count)
            .map(|_| PageTableEntry {
                modified: rng.gen_bool(MODIFIED_PROBABILITY),
                ..PageTableEntry::default()
            })
            .collect();

        PageTable { table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn lookup(&self, page: usize) -> Result<&PageTableEntry> {
        self.table.get(page).ok_or(VmError::UnknownPage {
            page,
            page_count: self.table.len(),
        })
    }

    fn entry_mut(&mut self, page: usize) -> Result<&mut PageTableEntry> {
        let page_count = self.table.len();

        self.table
            .get_mut(page)
            .ok_or(VmError::UnknownPage { page, page_count })
    }

    pub fn touch(&mut self, page: usize, step: usize) -> Result<()> {
        let entry = self.entry_mut(page)?;

        entry.referenced = true;
        entry.last_used = Some(step);

        Ok(())
    }

    pub(crate) fn set_referenced(&mut self, page: usize, referenced: bool) -> Result<()> {
        self.entry_mut(page)?.referenced = referenced;

        Ok(())
    }

    pub fn assign(&mut self, frames: &mut FrameStore, page: usize, frame: usize) -> Result<()> {
        if frame >= frames.len() {
            return Err(VmError::PolicyInvariantViolation(format!(
                "frame {} out of range 0..{}",
                frame,
                frames.len()
            )));
        }

        if let Some(occupant) = frames.get(frame) {
            return Err(VmError::PolicyInvariantViolation(format!(
                "frame {} still holds page {}",
                frame, occupant
            )));
        }

        let entry = self.entry_mut(page)?;

        if entry.resident {
            return Err(VmError::PolicyInvariantViolation(format!(
                "page {} is already resident",
                page
            )));
        }

        entry.frame_index = Some(frame);
        entry.resident = true;
        entry.referenced = true;

        frames.set(frame, page);

        Ok(())
    }

    /// Empties `frame`, returning the page that lived there.
    pub fn evict(&mut self, frames: &mut FrameStore, frame: usize) -> Option<usize> {
        let page = frames.get(frame)?;

        if let Some(entry) = self.table.get_mut(page) {
            entry.frame_index = None;
            entry.resident = false;
        }

        frames.clear(frame)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &PageTableEntry)> + '_ {
        self.table.iter().enumerate()
    }

    pub fn resident_pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter()
            .filter(|(_, entry)| entry.resident)
            .map(|(page, _)| page)
    }
}
