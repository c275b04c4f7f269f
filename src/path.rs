//! Parent-linked ancestry for frontier entries.
//!
//! Each expanded state becomes one shared node; successors point at it
//! instead of copying the whole path. The chain is walked once, when the
//! goal is reached.

use std::rc::Rc;

/// The ancestors of a frontier entry, nearest first. `None` at the root.
pub type Ancestry<T> = Option<Rc<PathNode<T>>>;

/// One expanded state and a link to the node it was reached from.
#[derive(Debug)]
pub struct PathNode<T> {
    state: T,
    parent: Ancestry<T>,
    depth: usize,
}

impl<T> PathNode<T> {
    /// Appends `state` to `parent`, sharing everything before it.
    pub fn extend(parent: &Ancestry<T>, state: T) -> Rc<Self> {
        let depth = parent.as_ref().map_or(0, |node| node.depth + 1);
        Rc::new(Self {
            state,
            parent: parent.clone(),
            depth,
        })
    }

    /// Number of states before this one on its path.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<T> Drop for PathNode<T> {
    // unlink iteratively so dropping a long chain cannot overflow the stack
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(node) = next {
            match Rc::try_unwrap(node) {
                Ok(mut node) => next = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Returns the path from the root to `goal`, with `goal` last.
pub fn reconstruct<T: Clone>(ancestry: &Ancestry<T>, goal: T) -> Vec<T> {
    let len = ancestry.as_ref().map_or(0, |node| node.depth + 1);
    let mut path = Vec::with_capacity(len + 1);
    let mut cursor = ancestry.as_deref();
    while let Some(node) = cursor {
        path.push(node.state.clone());
        cursor = node.parent.as_deref();
    }
    path.reverse();
    path.push(goal);
    path
}
