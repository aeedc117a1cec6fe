//! Read-only view of a binary search tree.
//!
//! The compiler only walks the tree; it never inserts, removes or rebalances.

/// A node of a binary search tree over `i32` keys.
///
/// Every key in `left()` is smaller than `key()` and every key in `right()`
/// is greater.
pub trait TreeNode {
    fn key(&self) -> i32;
    fn value(&self) -> i32;
    fn left(&self) -> Option<&Self>;
    fn right(&self) -> Option<&Self>;
}

pub trait SearchTree {
    type Node: TreeNode;

    fn root(&self) -> Option<&Self::Node>;

    /// Plain pointer-walking lookup.
    fn lookup(&self, key: i32) -> Option<i32> {
        let mut node = self.root();
        while let Some(n) = node {
            node = match key.cmp(&n.key()) {
                std::cmp::Ordering::Equal => return Some(n.value()),
                std::cmp::Ordering::Less => n.left(),
                std::cmp::Ordering::Greater => n.right(),
            };
        }
        None
    }
}
