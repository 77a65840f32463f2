/// Physical memory as a fixed row of frames, each holding at most one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameStore {
    frames: Vec<Option<usize>>,
}

impl FrameStore {
    pub fn new(frame_count: usize) -> Self {
        FrameStore {
            frames: vec![None; frame_count],
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, frame: usize) -> Option<usize> {
        self.frames.get(frame).copied().flatten()
    }

    pub fn first_free(&self) -> Option<usize> {
        self.frames.iter().position(Option::is_none)
    }

    pub fn frame_of(&self, page: usize) -> Option<usize> {
        self.frames.iter().position(|slot| *slot == Some(page))
    }

    pub fn occupied(&self) -> usize {
        self.frames.iter().filter(|slot| slot.is_some()).count()
    }

    pub(crate) fn set(&mut self, frame: usize, page: usize) {
        self.frames[frame] = Some(page);
    }

    pub(crate) fn clear(&mut self, frame: usize) -> Option<usize> {
        self.frames[frame].take()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.frames.iter().copied()
    }

    pub fn snapshot(&self) -> Vec<Option<usize>> {
        self.frames.clone()
    }
}
