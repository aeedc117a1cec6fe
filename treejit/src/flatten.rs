use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tree::{SearchTree, TreeNode};

/// One tree node, detached from the tree. Children are referred to by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeDesc {
    pub key: i32,
    pub value: i32,
    pub left: Option<i32>,
    pub right: Option<i32>,
}

impl NodeDesc {
    fn of<N: TreeNode>(node: &N) -> Self {
        NodeDesc {
            key: node.key(),
            value: node.value(),
            left: node.left().map(TreeNode::key),
            right: node.right().map(TreeNode::key),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Traversal used to flatten a tree. Both put every parent before its
/// children.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Order {
    #[default]
    #[serde(rename = "pre")]
    #[value(name = "pre")]
    PreOrder,
    #[serde(rename = "level")]
    #[value(name = "level")]
    LevelOrder,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::PreOrder => write!(f, "pre"),
            Order::LevelOrder => write!(f, "level"),
        }
    }
}

/// Flatten `tree` into one descriptor per node, root first.
///
/// Consumers pop from the end, so they see children before parents and the
/// root last.
pub fn flatten<T: SearchTree>(tree: &T, order: Order) -> Vec<NodeDesc> {
    let mut nodes = Vec::new();
    match order {
        Order::PreOrder => {
            let mut stack: Vec<&T::Node> = tree.root().into_iter().collect();
            while let Some(node) = stack.pop() {
                nodes.push(NodeDesc::of(node));
                stack.extend(node.right());
                stack.extend(node.left());
            }
        }
        Order::LevelOrder => {
            let mut queue: VecDeque<&T::Node> = tree.root().into_iter().collect();
            while let Some(node) = queue.pop_front() {
                nodes.push(NodeDesc::of(node));
                queue.extend(node.left());
                queue.extend(node.right());
            }
        }
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::AvlTree;
    use pretty_assertions::assert_eq;

    fn keys(nodes: &[NodeDesc]) -> Vec<i32> {
        nodes.iter().map(|n| n.key).collect()
    }

    fn parents_first(nodes: &[NodeDesc]) {
        for (idx, node) in nodes.iter().enumerate() {
            for child in node.left.iter().chain(node.right.iter()) {
                let pos = nodes.iter().position(|n| n.key == *child);
                assert!(matches!(pos, Some(p) if p > idx), "{child} before parent {}", node.key);
            }
        }
    }

    #[test]
    fn empty_tree() {
        let tree = AvlTree::new();
        assert!(flatten(&tree, Order::PreOrder).is_empty());
        assert!(flatten(&tree, Order::LevelOrder).is_empty());
    }

    #[test]
    fn three_nodes() {
        let tree: AvlTree = [(10, 100), (5, 50), (15, 150)].into_iter().collect();
        let nodes = flatten(&tree, Order::PreOrder);
        assert_eq!(
            nodes,
            vec![
                NodeDesc { key: 10, value: 100, left: Some(5), right: Some(15) },
                NodeDesc { key: 5, value: 50, left: None, right: None },
                NodeDesc { key: 15, value: 150, left: None, right: None },
            ]
        );
        assert!(nodes[1].is_leaf());
    }

    #[test]
    fn orders() {
        // 4 at the root; 2 and 6 below; 1 3 5 7 leaves
        let tree: AvlTree = (1..=7).map(|k| (k, k)).collect();
        assert_eq!(keys(&flatten(&tree, Order::PreOrder)), vec![4, 2, 1, 3, 6, 5, 7]);
        assert_eq!(keys(&flatten(&tree, Order::LevelOrder)), vec![4, 2, 6, 1, 3, 5, 7]);
    }

    #[test]
    fn every_node_once_parents_first() {
        let tree: AvlTree = (0..500).map(|k| (k * 3 % 1000, k)).collect();
        for order in [Order::PreOrder, Order::LevelOrder] {
            let nodes = flatten(&tree, order);
            let mut sorted = keys(&nodes);
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), tree.len());
            parents_first(&nodes);
        }
    }
}
