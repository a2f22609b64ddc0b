/// Returned by [`AvlTree::find_min`](super::AvlTree::find_min) and
/// [`AvlTree::find_max`](super::AvlTree::find_max) on a tree with no keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("the tree is empty")]
pub struct EmptyCollection;

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseKeysError {
    /// Token number `position` (counting from 0) is not a valid key.
    #[error("token {position} ({token:?}) is not a valid key: {reason}")]
    InvalidToken {
        position: usize,
        token: String,
        reason: String,
    },
}
