//! Turns a flattened search tree into branch code.
//!
//! Every node `k` gets three blocks:
//!
//! ```text
//! entry(k):     if arg == k goto equal(k) else goto dispatch(k)
//! equal(k):     return value(k)
//! dispatch(k):  if arg > k goto entry(right) else goto entry(left)
//! ```
//!
//! A missing child is replaced by the shared `not_found` block, which
//! returns [`NOT_FOUND`]. Nodes are compiled children first, so every entry
//! a dispatch refers to already has a label. The root's entry block is moved
//! to the start of the code.

use std::fmt;

use asm::Assembler;
use emu::Procedure;
use indexmap::IndexMap;

use crate::{
    emit::Emitter,
    error::Error,
    flatten::{flatten, NodeDesc, Order},
    tree::SearchTree,
};

/// Returned for keys that are not in the tree.
pub const NOT_FOUND: i32 = -1;

/// Name of a block in the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    NotFound,
    Root,
    Entry(i32),
    Equal(i32),
    Dispatch(i32),
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::NotFound => write!(f, "not_found"),
            Block::Root => write!(f, "root"),
            Block::Entry(k) => write!(f, "entry({k})"),
            Block::Equal(k) => write!(f, "equal({k})"),
            Block::Dispatch(k) => write!(f, "dispatch({k})"),
        }
    }
}

/// Labels of the blocks emitted so far, in emission order.
#[derive(Debug)]
pub struct LabelTable<L> {
    labels: IndexMap<Block, L>,
}

impl<L> Default for LabelTable<L> {
    fn default() -> Self {
        LabelTable {
            labels: IndexMap::new(),
        }
    }
}

impl<L: Copy> LabelTable<L> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, block: Block, label: L) -> Result<(), Error> {
        match self.labels.insert(block, label) {
            None => Ok(()),
            Some(_) => Err(Error::DuplicateBlock(block)),
        }
    }

    pub fn get(&self, block: Block) -> Result<L, Error> {
        self.labels
            .get(&block)
            .copied()
            .ok_or(Error::MissingLabel(block))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Block, &L)> {
        self.labels.iter()
    }
}

pub struct BranchTreeCompiler<E: Emitter> {
    emitter: E,
    labels: LabelTable<E::Label>,
}

impl<E> BranchTreeCompiler<E>
where
    E: Emitter,
    Error: From<E::Error>,
{
    pub fn new(emitter: E) -> Self {
        BranchTreeCompiler {
            emitter,
            labels: LabelTable::new(),
        }
    }

    /// Compile `nodes`, which must list every parent before its children.
    pub fn compile(mut self, mut nodes: Vec<NodeDesc>) -> Result<E::Output, Error> {
        let count = nodes.len();
        let arg = self.emitter.param();

        self.block(Block::NotFound)?;
        let sentinel = self.emitter.constant(NOT_FOUND);
        self.emitter.ret(sentinel);

        while let Some(node) = nodes.pop() {
            self.node(arg, &node, nodes.is_empty())?;
        }

        tracing::debug!(nodes = count, blocks = self.labels.len(), "emitted");
        Ok(self.emitter.finalize()?)
    }

    fn node(&mut self, arg: E::Value, node: &NodeDesc, is_root: bool) -> Result<(), Error> {
        tracing::trace!(key = node.key, value = node.value, is_root, "node");
        let key = self.emitter.constant(node.key);

        let equal = self.block(Block::Equal(node.key))?;
        let value = self.emitter.constant(node.value);
        self.emitter.ret(value);

        let dispatch = self.block(Block::Dispatch(node.key))?;
        if node.is_leaf() {
            let not_found = self.labels.get(Block::NotFound)?;
            self.emitter.branch(not_found);
        } else {
            let greater = self.child(node.right)?;
            let less = self.child(node.left)?;
            let cond = self.emitter.gt(arg, key);
            self.emitter.branch_if(cond, greater);
            self.emitter.branch_if_not(cond, less);
        }

        let entry = self.block(match is_root {
            true => Block::Root,
            false => Block::Entry(node.key),
        })?;
        let cond = self.emitter.eq(arg, key);
        self.emitter.branch_if(cond, equal);
        self.emitter.branch_if_not(cond, dispatch);

        if is_root {
            let end = self.emitter.new_label();
            self.emitter.place(end)?;
            self.emitter.nop();
            self.emitter.move_blocks_to_start(entry, end)?;
        }
        Ok(())
    }

    fn block(&mut self, block: Block) -> Result<E::Label, Error> {
        let label = self.emitter.new_label();
        self.emitter.place(label)?;
        self.labels.insert(block, label)?;
        Ok(label)
    }

    fn child(&self, key: Option<i32>) -> Result<E::Label, Error> {
        self.labels.get(match key {
            Some(key) => Block::Entry(key),
            None => Block::NotFound,
        })
    }
}

/// Compile `tree` into a callable lookup procedure.
pub fn compile<T: SearchTree>(tree: &T) -> Result<Procedure, Error> {
    compile_with(tree, Order::default())
}

#[tracing::instrument(level = "debug", skip_all, fields(order = %order))]
pub fn compile_with<T: SearchTree>(tree: &T, order: Order) -> Result<Procedure, Error> {
    let nodes = flatten(tree, order);
    BranchTreeCompiler::new(Assembler::new()).compile(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::AvlTree;
    use arch::{cmp::Cmp, inst::Inst, reg::Reg};
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy)]
    enum Val {
        Arg,
        Imm(i32),
    }

    impl fmt::Display for Val {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Val::Arg => write!(f, "arg"),
                Val::Imm(v) => write!(f, "{v}"),
            }
        }
    }

    /// Emitter that writes down every call.
    #[derive(Default)]
    struct Recorder {
        labels: usize,
        lines: Vec<String>,
    }

    impl Emitter for Recorder {
        type Label = usize;
        type Value = Val;
        type Cond = (&'static str, Val, Val);
        type Output = Vec<String>;
        type Error = Error;

        fn param(&mut self) -> Val {
            Val::Arg
        }
        fn new_label(&mut self) -> usize {
            self.labels += 1;
            self.labels - 1
        }
        fn place(&mut self, label: usize) -> Result<(), Error> {
            self.lines.push(format!("L{label}:"));
            Ok(())
        }
        fn constant(&mut self, value: i32) -> Val {
            Val::Imm(value)
        }
        fn ret(&mut self, value: Val) {
            self.lines.push(format!("  ret {value}"));
        }
        fn gt(&mut self, a: Val, b: Val) -> Self::Cond {
            (">", a, b)
        }
        fn eq(&mut self, a: Val, b: Val) -> Self::Cond {
            ("==", a, b)
        }
        fn branch_if(&mut self, (op, a, b): Self::Cond, label: usize) {
            self.lines.push(format!("  if {a} {op} {b} goto L{label}"));
        }
        fn branch_if_not(&mut self, (op, a, b): Self::Cond, label: usize) {
            self.lines.push(format!("  unless {a} {op} {b} goto L{label}"));
        }
        fn branch(&mut self, label: usize) {
            self.lines.push(format!("  goto L{label}"));
        }
        fn nop(&mut self) {
            self.lines.push("  nop".to_string());
        }
        fn move_blocks_to_start(&mut self, from: usize, to: usize) -> Result<(), Error> {
            self.lines.push(format!("move L{from}..L{to}"));
            Ok(())
        }
        fn finalize(self) -> Result<Vec<String>, Error> {
            Ok(self.lines)
        }
    }

    fn record(nodes: Vec<NodeDesc>) -> Vec<String> {
        BranchTreeCompiler::new(Recorder::default())
            .compile(nodes)
            .unwrap()
    }

    fn leaf(key: i32, value: i32) -> NodeDesc {
        NodeDesc {
            key,
            value,
            left: None,
            right: None,
        }
    }

    #[test]
    fn empty_emits_only_not_found() {
        assert_eq!(record(vec![]), vec!["L0:", "  ret -1"]);
    }

    #[test]
    fn single_node_blocks() {
        assert_eq!(
            record(vec![leaf(5, 50)]),
            vec![
                "L0:",
                "  ret -1",
                "L1:",
                "  ret 50",
                "L2:",
                "  goto L0",
                "L3:",
                "  if arg == 5 goto L1",
                "  unless arg == 5 goto L2",
                "L4:",
                "  nop",
                "move L3..L4",
            ]
        );
    }

    #[test]
    fn children_are_emitted_before_root() {
        let nodes = vec![
            NodeDesc {
                key: 10,
                value: 100,
                left: Some(5),
                right: None,
            },
            leaf(5, 50),
        ];
        assert_eq!(
            record(nodes),
            vec![
                "L0:",
                "  ret -1",
                // leaf 5
                "L1:",
                "  ret 50",
                "L2:",
                "  goto L0",
                "L3:",
                "  if arg == 5 goto L1",
                "  unless arg == 5 goto L2",
                // root 10
                "L4:",
                "  ret 100",
                "L5:",
                "  if arg > 10 goto L0",
                "  unless arg > 10 goto L3",
                "L6:",
                "  if arg == 10 goto L4",
                "  unless arg == 10 goto L5",
                "L7:",
                "  nop",
                "move L6..L7",
            ]
        );
    }

    #[test]
    fn child_missing_from_sequence() {
        let nodes = vec![NodeDesc {
            key: 10,
            value: 100,
            left: Some(5),
            right: None,
        }];
        let err = BranchTreeCompiler::new(Recorder::default())
            .compile(nodes)
            .unwrap_err();
        assert!(matches!(err, Error::MissingLabel(Block::Entry(5))));
    }

    #[test]
    fn duplicate_key_in_sequence() {
        let err = BranchTreeCompiler::new(Assembler::new())
            .compile(vec![leaf(3, 1), leaf(3, 2)])
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateBlock(Block::Equal(3))));
    }

    #[test]
    fn root_entry_comes_first() {
        let tree: AvlTree = [(10, 10), (5, 5), (15, 15)].into_iter().collect();
        let proc = compile(&tree).unwrap();
        assert!(matches!(proc.program().get(0), Some(Inst::BRI(Cmp::EQ, Reg::A0, 10, _))));
        assert!(matches!(proc.program().get(1), Some(Inst::BRI(Cmp::NE, Reg::A0, 10, _))));
        assert_eq!(proc.program().get(2), Some(&Inst::RETI(NOT_FOUND)));
    }

    #[test]
    fn label_table() {
        let mut table = LabelTable::new();
        assert!(table.is_empty());
        table.insert(Block::Root, 1u32).unwrap();
        table.insert(Block::Entry(3), 2).unwrap();
        assert!(matches!(table.insert(Block::Root, 3), Err(Error::DuplicateBlock(Block::Root))));
        assert_eq!(table.get(Block::Entry(3)).unwrap(), 2);
        assert!(matches!(table.get(Block::Entry(4)), Err(Error::MissingLabel(Block::Entry(4)))));
        let order: Vec<Block> = table.iter().map(|(b, _)| *b).collect();
        assert_eq!(order, vec![Block::Root, Block::Entry(3)]);
    }

    #[test]
    fn block_names() {
        assert_eq!(Block::NotFound.to_string(), "not_found");
        assert_eq!(Block::Dispatch(-4).to_string(), "dispatch(-4)");
    }
}
