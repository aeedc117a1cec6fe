//! Self-balancing search tree used as the compiler's input container.

use crate::tree::{SearchTree, TreeNode};

#[derive(Debug, Clone)]
pub struct Node {
    key: i32,
    value: i32,
    height: u32,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

fn height(node: &Option<Box<Node>>) -> u32 {
    node.as_ref().map_or(0, |n| n.height)
}

impl Node {
    fn new(key: i32, value: i32) -> Box<Node> {
        Box::new(Node {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance(&self) -> i64 {
        height(&self.left) as i64 - height(&self.right) as i64
    }

    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        match self.left.take() {
            Some(mut pivot) => {
                self.left = pivot.right.take();
                self.update();
                pivot.right = Some(self);
                pivot.update();
                pivot
            }
            None => self,
        }
    }

    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        match self.right.take() {
            Some(mut pivot) => {
                self.right = pivot.left.take();
                self.update();
                pivot.left = Some(self);
                pivot.update();
                pivot
            }
            None => self,
        }
    }

    fn rebalance(mut self: Box<Self>) -> Box<Self> {
        self.update();
        match self.balance() {
            b if b > 1 => {
                self.left = self.left.take().map(|l| match l.balance() < 0 {
                    true => l.rotate_left(),
                    false => l,
                });
                self.rotate_right()
            }
            b if b < -1 => {
                self.right = self.right.take().map(|r| match r.balance() > 0 {
                    true => r.rotate_right(),
                    false => r,
                });
                self.rotate_left()
            }
            _ => self,
        }
    }

    /// Returns the new subtree and the value `key` had before.
    fn insert(node: Option<Box<Node>>, key: i32, value: i32) -> (Box<Node>, Option<i32>) {
        let mut node = match node {
            Some(node) => node,
            None => return (Node::new(key, value), None),
        };
        let old = match key.cmp(&node.key) {
            std::cmp::Ordering::Equal => {
                let old = std::mem::replace(&mut node.value, value);
                return (node, Some(old));
            }
            std::cmp::Ordering::Less => {
                let (left, old) = Node::insert(node.left.take(), key, value);
                node.left = Some(left);
                old
            }
            std::cmp::Ordering::Greater => {
                let (right, old) = Node::insert(node.right.take(), key, value);
                node.right = Some(right);
                old
            }
        };
        (node.rebalance(), old)
    }
}

impl TreeNode for Node {
    fn key(&self) -> i32 {
        self.key
    }
    fn value(&self) -> i32 {
        self.value
    }
    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }
    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

/// AVL tree mapping `i32` keys to `i32` values.
#[derive(Debug, Clone, Default)]
pub struct AvlTree {
    root: Option<Box<Node>>,
    len: usize,
}

impl AvlTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Returns the previous value of `key`.
    pub fn insert(&mut self, key: i32, value: i32) -> Option<i32> {
        let (root, old) = Node::insert(self.root.take(), key, value);
        self.root = Some(root);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    pub fn get(&self, key: i32) -> Option<i32> {
        self.lookup(key)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn height(&self) -> u32 {
        height(&self.root)
    }
}

impl SearchTree for AvlTree {
    type Node = Node;

    fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }
}

impl Extend<(i32, i32)> for AvlTree {
    fn extend<I: IntoIterator<Item = (i32, i32)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl FromIterator<(i32, i32)> for AvlTree {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}
