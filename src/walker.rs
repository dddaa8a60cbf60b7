//! Pre-order traversal over a design node tree.

use crate::types::DesignNode;

/// Lazy pre-order iterator: a node is yielded before its children, and
/// children are visited left to right. Uses an explicit stack, so arbitrarily
/// deep documents do not grow the call stack.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<&'a DesignNode>,
}

impl<'a> Walk<'a> {
    pub fn new(root: &'a DesignNode) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a DesignNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Collect every node of the tree in pre-order.
pub fn flatten(root: &DesignNode) -> Vec<&DesignNode> {
    root.walk().collect()
}
