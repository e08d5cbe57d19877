// Block tree: the root collection of configuration blocks
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::{debug, info};

use crate::data::DataError;
use super::{BlockId, BlockNode};

/// Owner of the root blocks. Each block exclusively owns its children.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTree {
    roots: Vec<BlockNode>,
    next_id: u64,
}

impl BlockTree {
    /// Create a tree holding one pinned root block
    pub fn new() -> Self {
        let mut tree = BlockTree {
            roots: Vec::new(),
            next_id: 1,
        };
        tree.add_root();
        tree
    }

    /// Build a tree from existing blocks, assigning fresh ids.
    ///
    /// The first root is pinned; every other block is removable.
    pub fn from_blocks(blocks: Vec<BlockNode>) -> Self {
        let mut tree = BlockTree {
            roots: blocks,
            next_id: 1,
        };

        for (index, root) in tree.roots.iter_mut().enumerate() {
            root.renumber(&mut tree.next_id);
            root.set_removable(index != 0);
        }

        tree
    }

    fn allocate_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a root block. Only the first block of an empty tree is pinned.
    pub fn add_root(&mut self) -> BlockId {
        let id = self.allocate_id();
        let removable = !self.roots.is_empty();
        self.roots.push(BlockNode::new(id, removable));
        debug!("Added root {}", id);
        id
    }

    /// Append a nested block under `parent`
    pub fn add_child(&mut self, parent: BlockId) -> Option<BlockId> {
        let id = self.allocate_id();
        let node = self.find_mut(parent)?;
        node.add_child(id);
        debug!("Added {} under {}", id, parent);
        Some(id)
    }

    /// Remove a block and its subtree once `confirm` agrees.
    ///
    /// Declining, unknown ids and pinned blocks leave the tree untouched.
    pub fn remove<F>(&mut self, id: BlockId, confirm: F) -> Option<BlockNode>
    where
        F: FnOnce(&BlockNode) -> bool,
    {
        let block = self.find(id)?;
        if !block.is_removable() || !confirm(block) {
            return None;
        }

        let removed = match self.roots.iter().position(|r| r.id() == id) {
            Some(index) => Some(self.roots.remove(index)),
            None => self.roots.iter_mut().find_map(|root| root.detach(id)),
        };

        if let Some(ref block) = removed {
            info!("Removed {} ({} blocks)", id, block.subtree_len());
        }

        removed
    }

    /// Find a block anywhere in the tree
    pub fn find(&self, id: BlockId) -> Option<&BlockNode> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    /// Find a block anywhere in the tree, mutably
    pub fn find_mut(&mut self, id: BlockId) -> Option<&mut BlockNode> {
        self.roots.iter_mut().find_map(|root| root.find_mut(id))
    }

    /// Get the root blocks
    pub fn roots(&self) -> &[BlockNode] {
        &self.roots
    }

    /// Total number of blocks
    pub fn len(&self) -> usize {
        self.roots.iter().map(|r| r.subtree_len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Load a workspace (a JSON array of block forms)
    pub fn load_workspace<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let file = File::open(path.as_ref())?;
        let blocks: Vec<BlockNode> = serde_json::from_reader(BufReader::new(file))?;
        info!("Loaded {} root blocks from {}", blocks.len(), path.as_ref().display());
        Ok(BlockTree::from_blocks(blocks))
    }

    /// Save the workspace as a JSON array of block forms
    pub fn save_workspace<P: AsRef<Path>>(&self, path: P) -> Result<(), DataError> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), &self.roots)?;
        Ok(())
    }
}

impl Default for BlockTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_pinned_root() {
        let mut tree = BlockTree::new();
        let first = tree.roots()[0].id();

        assert!(!tree.roots()[0].is_removable());
        assert!(tree.remove(first, |_| true).is_none());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let mut tree = BlockTree::new();
        let second = tree.add_root();

        assert!(tree.remove(second, |_| false).is_none());
        assert_eq!(tree.roots().len(), 2);

        assert!(tree.remove(second, |_| true).is_some());
        assert_eq!(tree.roots().len(), 1);
    }

    #[test]
    fn test_remove_nested_subtree() {
        let mut tree = BlockTree::new();
        let root = tree.roots()[0].id();
        let child = tree.add_child(root).unwrap();
        let grandchild = tree.add_child(child).unwrap();
        let sibling = tree.add_child(root).unwrap();

        let removed = tree.remove(child, |_| true).unwrap();
        assert_eq!(removed.subtree_len(), 2);
        assert!(tree.find(grandchild).is_none());
        assert!(tree.find(sibling).is_some());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_add_child_to_unknown_parent() {
        let mut tree = BlockTree::new();
        assert!(tree.add_child(BlockId(99)).is_none());
    }

    #[test]
    fn test_from_blocks_renumbers() {
        let mut a = BlockNode::default();
        a.add_child(BlockId(0));
        let b = BlockNode::default();

        let tree = BlockTree::from_blocks(vec![a, b]);
        let ids: Vec<u64> = vec![
            tree.roots()[0].id().0,
            tree.roots()[0].children()[0].id().0,
            tree.roots()[1].id().0,
        ];

        assert_eq!(ids, vec![1, 2, 3]);
        assert!(!tree.roots()[0].is_removable());
        assert!(tree.roots()[1].is_removable());
        assert!(tree.roots()[0].children()[0].is_removable());
    }
}
