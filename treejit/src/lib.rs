//! Compiles binary search trees into branch-only lookup procedures.
//!
//! ```
//! use treejit::{avl::AvlTree, compile};
//!
//! let tree: AvlTree = [(10, 100), (5, 50), (15, 150)].into_iter().collect();
//! let lookup = compile(&tree).unwrap();
//! assert_eq!(lookup.call(5), 50);
//! assert_eq!(lookup.call(7), -1);
//! ```

pub mod avl;
pub mod compile;
pub mod config;
pub mod emit;
pub mod flatten;
pub mod tree;

mod error;

pub use compile::{compile, compile_with, BranchTreeCompiler, NOT_FOUND};
pub use config::BenchConfig;
pub use error::Error;
pub use flatten::{flatten, NodeDesc, Order};
pub use tree::{SearchTree, TreeNode};
