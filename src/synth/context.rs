//! Traversal state for one generation call.
//!
//! The visited path is shared by every branch of the walk (cycle detection
//! is global to the call); the alternation index belongs to a single branch.
use std::ops::{Deref, DerefMut};

/// Object types nested deeper than this come out empty.
pub const MAX_DEPTH: usize = 2;

/// Qualified names of the object types currently being expanded.
#[derive(Debug, Clone, Default)]
pub struct VisitedPath {
    names: Vec<String>,
}

impl VisitedPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.names.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug)]
pub struct Context<'s> {
    stack: &'s mut VisitedPath,
    index: usize,
}

impl<'s> Context<'s> {
    pub fn new(stack: &'s mut VisitedPath) -> Self {
        Self { stack, index: 0 }
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn is_too_deep(&self) -> bool {
        self.stack.depth() > MAX_DEPTH
    }

    /// Odd index: secondary example candidates surface first.
    pub fn is_alternate(&self) -> bool {
        self.index % 2 > 0
    }

    /// Same visited path, own index.
    pub fn with_index(&mut self, index: usize) -> Context<'_> {
        Context { stack: &mut *self.stack, index }
    }

    /// Push `name` for the lifetime of the returned guard. `None` when the
    /// type is already being expanded further up the path.
    pub fn enter(&mut self, name: &str) -> Option<Expansion<'_, 's>> {
        if self.stack.contains(name) {
            return None;
        }
        self.stack.names.push(name.to_string());
        Some(Expansion { ctx: self })
    }
}

/// One object type on the visited path; popped on drop.
pub struct Expansion<'c, 's> {
    ctx: &'c mut Context<'s>,
}

impl<'s> Deref for Expansion<'_, 's> {
    type Target = Context<'s>;

    fn deref(&self) -> &Context<'s> {
        &*self.ctx
    }
}

impl<'s> DerefMut for Expansion<'_, 's> {
    fn deref_mut(&mut self) -> &mut Context<'s> {
        &mut *self.ctx
    }
}

impl Drop for Expansion<'_, '_> {
    fn drop(&mut self) {
        self.ctx.stack.names.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_pops_on_drop() {
        let mut stack = VisitedPath::new();
        let mut ctx = Context::new(&mut stack);
        {
            let mut outer = ctx.enter("A").unwrap();
            assert_eq!(outer.depth(), 1);
            assert!(outer.enter("A").is_none());
            {
                let inner = outer.enter("B").unwrap();
                assert_eq!(inner.depth(), 2);
            }
            assert_eq!(outer.depth(), 1);
        }
        assert_eq!(ctx.depth(), 0);
        assert!(stack.is_empty());
    }

    #[test]
    fn child_context_shares_path_but_not_index() {
        let mut stack = VisitedPath::new();
        let mut ctx = Context::new(&mut stack);
        let mut guard = ctx.enter("A").unwrap();
        {
            let mut child = guard.with_index(1);
            assert!(child.is_alternate());
            assert!(child.enter("A").is_none());
            assert_eq!(child.depth(), 1);
        }
        assert!(!guard.is_alternate());
    }

    #[test]
    fn depth_guard_trips_past_the_bound() {
        let mut stack = VisitedPath::new();
        let mut ctx = Context::new(&mut stack);
        let mut a = ctx.enter("A").unwrap();
        let mut b = a.enter("B").unwrap();
        assert!(!b.is_too_deep());
        let c = b.enter("C").unwrap();
        assert!(c.is_too_deep());
    }
}
