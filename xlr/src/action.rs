//! Recursive actions on trees.

use crate::tree::{Block, Infix, Name, Node, Postfix, Prefix, Text, Tree};

/// An operation performed on trees, specialised by the kind of tree.
///
/// Every handler defaults to [`Action::fallback`].
/// Handlers do not descend into children on their own;
/// an action that needs to recurse calls [`Tree::act`] on the children
/// in the order it requires.
pub trait Action {
    type Output;

    /// Handle trees of kinds without a specialised handler.
    fn fallback(&mut self, what: &Tree) -> Self::Output;

    fn integer(&mut self, what: &Tree, _value: i64) -> Self::Output {
        self.fallback(what)
    }

    fn real(&mut self, what: &Tree, _value: f64) -> Self::Output {
        self.fallback(what)
    }

    fn text(&mut self, what: &Tree, _text: &Text) -> Self::Output {
        self.fallback(what)
    }

    fn name(&mut self, what: &Tree, _name: &Name) -> Self::Output {
        self.fallback(what)
    }

    fn block(&mut self, what: &Tree, _block: &Block) -> Self::Output {
        self.fallback(what)
    }

    fn prefix(&mut self, what: &Tree, _prefix: &Prefix) -> Self::Output {
        self.fallback(what)
    }

    fn postfix(&mut self, what: &Tree, _postfix: &Postfix) -> Self::Output {
        self.fallback(what)
    }

    fn infix(&mut self, what: &Tree, _infix: &Infix) -> Self::Output {
        self.fallback(what)
    }
}

impl Tree {
    /// Perform an action on the tree, dispatching on its kind.
    pub fn act<A: Action + ?Sized>(&self, action: &mut A) -> A::Output {
        match self.node() {
            Node::Integer(i) => action.integer(self, *i),
            Node::Real(r) => action.real(self, *r),
            Node::Text(t) => action.text(self, t),
            Node::Name(n) => action.name(self, n),
            Node::Block(b) => action.block(self, b),
            Node::Prefix(p) => action.prefix(self, p),
            Node::Postfix(p) => action.postfix(self, p),
            Node::Infix(i) => action.infix(self, i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Delimiters;
    use alloc::{string::String, vec::Vec};

    /// Collect names from left to right, leaving other leaves alone.
    struct Names(Vec<String>);

    impl Action for Names {
        type Output = ();

        fn fallback(&mut self, _: &Tree) {}

        fn name(&mut self, _: &Tree, name: &Name) {
            self.0.push(name.value.clone())
        }

        fn block(&mut self, _: &Tree, block: &Block) {
            block.child.act(self)
        }

        fn infix(&mut self, _: &Tree, infix: &Infix) {
            infix.left.act(self);
            infix.right.act(self)
        }
    }

    #[test]
    fn specialised_and_fallback() {
        let tm = Tree::infix(
            "+",
            Tree::block(Tree::name("A"), Delimiters::paren()),
            Tree::infix("*", Tree::integer(2), Tree::name("B")),
        );
        let mut names = Names(Vec::new());
        tm.act(&mut names);
        assert_eq!(names.0, ["A", "B"]);

        // prefix has no handler, so its children are never visited
        let mut names = Names(Vec::new());
        Tree::prefix(Tree::name("sin"), Tree::name("X")).act(&mut names);
        assert!(names.0.is_empty());
    }

    #[test]
    fn dispatch_by_kind() {
        use crate::Kind;

        struct KindOf;
        impl Action for KindOf {
            type Output = Option<Kind>;
            fn fallback(&mut self, what: &Tree) -> Option<Kind> {
                Some(what.kind())
            }
            fn real(&mut self, _: &Tree, _: f64) -> Option<Kind> {
                None
            }
        }

        assert_eq!(Tree::integer(1).act(&mut KindOf), Some(Kind::Integer));
        assert_eq!(Tree::real(1.0).act(&mut KindOf), None);
        let post = Tree::postfix(Tree::integer(3), Tree::name("!"));
        assert_eq!(post.act(&mut KindOf), Some(Kind::Postfix));
    }
}
