use alloc::{string::{String, ToString}, vec::Vec};
use core::fmt::{self, Formatter, Display};

/// The materialized path of the node a depth-first pre-order traversal is currently at.
///
/// A path is the list of sibling indices leading from the root to a node, joined with `/`. The root is always `0`, its second child is `0/1`, that child's first child is `0/1/0`, and so on.
///
/// Instead of walking the ancestor chain for every node, the tracker keeps a single path and edits it on every step using only the level of the newly visited node and its position among its siblings. That is only correct if the nodes are fed in strict pre-order starting from the root, which is what [`PreOrder`] does; feeding nodes in any other order produces meaningless paths.
///
/// The path belongs to the traversal, not to the nodes: after the walk moves on, the tracker describes the next node.
///
/// [`PreOrder`]: algorithms/struct.PreOrder.html " "
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PathTracker {
    path: String,
    // Byte offset of the end of every segment in `path`, for cutting it back without re-parsing.
    segment_ends: Vec<usize>,
    last_level: Option<usize>,
}
impl PathTracker {
    /// Creates a tracker which has not seen any node yet.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
    /// Moves the tracker to the next node of a pre-order traversal.
    ///
    /// `level` is the node's distance from the root and `index` is its position among its parent's children; both are ignored for the root, whose path is always `0`.
    pub fn update(&mut self, is_root: bool, level: usize, index: usize) {
        if is_root {
            self.truncate_segments(0);
            self.push_segment(0);
            self.last_level = Some(0);
            return;
        }
        match self.last_level {
            Some(last) if level < last => {
                // Climbing back up: keep the ancestors shared with the previous node.
                self.truncate_segments(level);
                self.push_segment(index);
                self.last_level = Some(level);
            }
            Some(last) if level == last => {
                self.truncate_segments(self.segment_ends.len().saturating_sub(1));
                self.push_segment(index);
            }
            _ => {
                self.push_segment(index);
                self.last_level = Some(level);
            }
        }
    }
    /// Returns the path of the node visited last, or an empty string if no node has been visited yet.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }
    /// Returns the number of segments in the current path, which is one more than the level of the node visited last.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment_ends.len()
    }
    /// Returns `true` if no node has been visited yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment_ends.is_empty()
    }
    /// Returns the level of the node visited last, or `None` before the first node.
    #[inline]
    pub const fn last_level(&self) -> Option<usize> {
        self.last_level
    }
    /// Forgets all state, making the tracker ready for a new traversal.
    #[inline]
    pub fn reset(&mut self) {
        self.path.clear();
        self.segment_ends.clear();
        self.last_level = None;
    }

    fn truncate_segments(&mut self, keep: usize) {
        self.segment_ends.truncate(keep);
        let end = self.segment_ends.last().copied().unwrap_or(0);
        self.path.truncate(end);
    }
    fn push_segment(&mut self, index: usize) {
        if !self.path.is_empty() {
            self.path.push('/');
        }
        self.path.push_str(&index.to_string());
        self.segment_ends.push(self.path.len());
    }
}
impl Display for PathTracker {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(steps: &[(bool, usize, usize)]) -> alloc::vec::Vec<String> {
        let mut tracker = PathTracker::new();
        steps
            .iter()
            .map(|&(is_root, level, index)| {
                tracker.update(is_root, level, index);
                tracker.path().to_string()
            })
            .collect()
    }

    #[test]
    fn descends_and_moves_sideways() {
        let paths = feed(&[(true, 0, 0), (false, 1, 0), (false, 2, 0), (false, 2, 1)]);
        assert_eq!(paths, ["0", "0/0", "0/0/0", "0/0/1"]);
    }

    #[test]
    fn climbs_back_to_the_shared_prefix() {
        let paths = feed(&[
            (true, 0, 0),
            (false, 1, 0),
            (false, 2, 0),
            (false, 3, 1),
            (false, 1, 1),
            (false, 2, 0),
        ]);
        assert_eq!(paths, ["0", "0/0", "0/0/0", "0/0/0/1", "0/1", "0/1/0"]);
    }

    #[test]
    fn multi_digit_indices_are_cut_correctly() {
        let paths = feed(&[(true, 0, 0), (false, 1, 12), (false, 2, 345), (false, 2, 346), (false, 1, 13)]);
        assert_eq!(paths, ["0", "0/12", "0/12/345", "0/12/346", "0/13"]);
    }

    #[test]
    fn root_restarts_the_path() {
        let mut tracker = PathTracker::new();
        assert!(tracker.is_empty());
        assert_eq!(tracker.last_level(), None);
        tracker.update(true, 0, 0);
        tracker.update(false, 1, 3);
        assert_eq!(tracker.len(), 2);
        tracker.update(true, 0, 0);
        assert_eq!(tracker.path(), "0");
        assert_eq!(tracker.last_level(), Some(0));
        tracker.reset();
        assert_eq!(tracker.path(), "");
    }
}
