use felangkit_span::SourcePosition;

/// Every AST node carries the position of its first token (data model
/// invariant 1). Nodes are immutable after construction, so unlike a
/// mutable-span `Node` trait this only ever reads.
pub trait Node {
    fn position(&self) -> SourcePosition;
}

/// Implements `Node` for a struct with a `position: SourcePosition` field.
macro_rules! simple_node_impl {
    ($ty:ty) => {
        impl $crate::node::Node for $ty {
            fn position(&self) -> felangkit_span::SourcePosition {
                self.position
            }
        }
    };
}

pub(crate) use simple_node_impl;
