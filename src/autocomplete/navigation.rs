/// Keyboard selection over the suggestion list. `None` means nothing is
/// highlighted (the `-1` position).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionIndex(Option<usize>);

impl SelectionIndex {
    pub fn get(&self) -> Option<usize> {
        self.0
    }

    /// Move down, stopping at the last of `len` entries
    pub fn down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.0 = match self.0 {
            None => Some(0),
            Some(i) if i + 1 < len => Some(i + 1),
            Some(i) => Some(i.min(len - 1)),
        };
    }

    /// Move up; stepping above the first entry clears the selection
    pub fn up(&mut self) {
        self.0 = match self.0 {
            Some(i) if i > 0 => Some(i - 1),
            _ => None,
        };
    }

    pub fn reset(&mut self) {
        self.0 = None;
    }
}
