//! Structural matching of trees.

use crate::tree::{Block, Infix, Name, Postfix, Prefix, Text, Tree};
use crate::Action;

/// Check whether trees match the shape and values of a test tree.
///
/// Instead of moving a cursor through the test tree and restoring it
/// after every attempt, every comparison of children
/// runs a fresh `TreeMatch` on the corresponding child of the test tree.
pub struct TreeMatch<'t> {
    test: &'t Tree,
}

impl<'t> TreeMatch<'t> {
    pub fn new(test: &'t Tree) -> Self {
        Self { test }
    }

    fn sub(test: &Tree, what: &Tree) -> bool {
        what.act(&mut TreeMatch::new(test))
    }
}

fn real_eq(r1: f64, r2: f64) -> bool {
    r1 == r2 || (r1.is_nan() && r2.is_nan())
}

impl<'t> Action for TreeMatch<'t> {
    type Output = bool;

    fn fallback(&mut self, _: &Tree) -> bool {
        false
    }

    fn integer(&mut self, _: &Tree, value: i64) -> bool {
        self.test.as_integer() == Some(value)
    }

    fn real(&mut self, _: &Tree, value: f64) -> bool {
        self.test.as_real().map_or(false, |r| real_eq(r, value))
    }

    fn text(&mut self, _: &Tree, text: &Text) -> bool {
        match self.test.as_text() {
            Some(tt) => tt.delimiters == text.delimiters && tt.value == text.value,
            None => false,
        }
    }

    fn name(&mut self, _: &Tree, name: &Name) -> bool {
        self.test.as_name().map_or(false, |nt| nt.value == name.value)
    }

    fn block(&mut self, _: &Tree, block: &Block) -> bool {
        match self.test.as_block() {
            Some(bt) if bt.delimiters == block.delimiters => Self::sub(&bt.child, &block.child),
            _ => false,
        }
    }

    fn infix(&mut self, _: &Tree, infix: &Infix) -> bool {
        match self.test.as_infix() {
            // e.g. `A+B` vs. `2+3`
            Some(it) if it.name == infix.name => {
                Self::sub(&it.left, &infix.left) && Self::sub(&it.right, &infix.right)
            }
            _ => false,
        }
    }

    fn prefix(&mut self, _: &Tree, prefix: &Prefix) -> bool {
        match self.test.as_prefix() {
            // e.g. `f(A)` vs. `f(2)`
            Some(pt) => Self::sub(&pt.left, &prefix.left) && Self::sub(&pt.right, &prefix.right),
            None => false,
        }
    }

    fn postfix(&mut self, _: &Tree, postfix: &Postfix) -> bool {
        match self.test.as_postfix() {
            // e.g. `A!` vs. `2!`
            Some(pt) => {
                Self::sub(&pt.right, &postfix.right) && Self::sub(&pt.left, &postfix.left)
            }
            None => false,
        }
    }
}

impl Tree {
    /// Return true if the candidate has the same shape and values as `self`.
    ///
    /// Source positions are ignored.
    ///
    /// ~~~
    /// use xlr::Tree;
    /// let pattern = Tree::infix("+", Tree::name("A"), Tree::integer(1));
    /// assert!(pattern.matches(&Tree::infix("+", Tree::name("A"), Tree::integer(1))));
    /// assert!(!pattern.matches(&Tree::infix("-", Tree::name("A"), Tree::integer(1))));
    /// ~~~
    pub fn matches(&self, candidate: &Tree) -> bool {
        let matched = candidate.act(&mut TreeMatch::new(self));
        trace!("match {} against {}: {}", candidate, self, matched);
        matched
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::{Delimiters, Node, Position};
    use crate::{Action, Tree};
    use alloc::vec::Vec;

    fn samples() -> Vec<Tree> {
        let x = || Tree::name("X");
        Vec::from([
            Tree::integer(42),
            Tree::real(2.5),
            Tree::real(f64::NAN),
            Tree::text("hello"),
            Tree::character("h"),
            Tree::name("sin"),
            Tree::block(x(), Delimiters::paren()),
            Tree::block(x(), Delimiters::indent()),
            Tree::prefix(Tree::name("sin"), x()),
            Tree::postfix(x(), Tree::name("!")),
            Tree::infix("+", x(), Tree::integer(1)),
            Tree::infix(
                "then",
                Tree::prefix(Tree::name("if"), x()),
                Tree::block(Tree::text("y"), Delimiters::brace()),
            ),
        ])
    }

    /// Rebuild a tree from scratch, moving every node to a given position.
    fn relocate(tm: &Tree, pos: usize) -> Tree {
        let node = match tm.node().clone() {
            Node::Block(mut b) => {
                b.child = relocate(&b.child, pos + 1);
                Node::Block(b)
            }
            Node::Prefix(mut p) => {
                p.left = relocate(&p.left, pos + 1);
                p.right = relocate(&p.right, pos + 2);
                Node::Prefix(p)
            }
            Node::Postfix(mut p) => {
                p.left = relocate(&p.left, pos + 1);
                p.right = relocate(&p.right, pos + 2);
                Node::Postfix(p)
            }
            Node::Infix(mut i) => {
                i.left = relocate(&i.left, pos + 1);
                i.right = relocate(&i.right, pos + 2);
                Node::Infix(i)
            }
            leaf => leaf,
        };
        Tree::new_at(node, Position::new(pos))
    }

    #[test]
    fn reflexive() {
        for tm in samples() {
            assert!(tm.matches(&tm), "{}", tm);
            assert!(tm.matches(&relocate(&tm, 0)), "{}", tm);
        }
    }

    #[test]
    fn position_insensitive() {
        for tm in samples() {
            assert!(relocate(&tm, 10).matches(&relocate(&tm, 100)), "{}", tm);
        }
    }

    #[test]
    fn distinct_samples_differ_symmetrically() {
        let samples = samples();
        for (i, p) in samples.iter().enumerate() {
            for (j, c) in samples.iter().enumerate() {
                assert_eq!(p.matches(c), i == j, "{} vs. {}", p, c);
                assert_eq!(p.matches(c), c.matches(p));
            }
        }
    }

    #[test]
    fn values() {
        assert!(!Tree::integer(1).matches(&Tree::integer(2)));
        assert!(!Tree::integer(1).matches(&Tree::real(1.0)));
        assert!(!Tree::name("x").matches(&Tree::text("x")));
        // texts agree on delimiters, too
        assert!(!Tree::text("c").matches(&Tree::character("c")));
        let other = Tree::text_with("c", Delimiters::new("<<", ">>"));
        assert!(other.matches(&Tree::text_with("c", Delimiters::new("<<", ">>"))));
    }

    #[test]
    fn composites() {
        let x = || Tree::name("X");
        let y = || Tree::name("Y");

        let paren = Tree::block(x(), Delimiters::paren());
        assert!(!paren.matches(&Tree::block(x(), Delimiters::bracket())));
        assert!(!paren.matches(&Tree::block(y(), Delimiters::paren())));

        let plus = Tree::infix("+", x(), y());
        assert!(!plus.matches(&Tree::infix("+", y(), x())));
        assert!(!plus.matches(&Tree::infix("-", x(), y())));
        assert!(!plus.matches(&Tree::prefix(x(), y())));

        // prefixes and postfixes are not interchangeable
        let pre = Tree::prefix(x(), y());
        assert!(!pre.matches(&Tree::postfix(x(), y())));
        assert!(!Tree::postfix(x(), y()).matches(&Tree::postfix(x(), x())));
        assert!(!Tree::postfix(x(), y()).matches(&Tree::postfix(y(), y())));
    }

    #[test]
    fn shared_subtrees() {
        // the same subtree may appear at several places
        let x = Tree::name("X");
        let tm = Tree::infix("+", x.clone(), x.clone());
        let other = Tree::infix("+", Tree::name("X"), Tree::name("X"));
        assert!(tm.matches(&other));
        assert!(!tm.matches(&Tree::infix("+", x.clone(), Tree::name("Z"))));
    }

    #[test]
    fn fallback_fails() {
        let one = Tree::integer(1);
        let mut tm = super::TreeMatch::new(&one);
        assert!(!tm.fallback(&Tree::integer(1)));
    }
}
