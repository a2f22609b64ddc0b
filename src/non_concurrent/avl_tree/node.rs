use std::cmp::{Ordering, max};
use std::mem;

use log::trace;

// LEMMA: a subtree of height `h` holds at least `F(h+2) - 1` nodes (F = fibonacci),
//        so an AVL tree with `n` nodes has height below `1.4405*log₂(n+2) - 0.3277`

/// Each node owns both of its subtrees, there are no parent pointers.
pub(super) type Link<K> = Option<Box<Node<K>>>;

#[derive(Clone)]
pub(super) struct Node<K> {
    pub(super) key: K,
    pub(super) height: usize,
    pub(super) left: Link<K>,
    pub(super) right: Link<K>,
}

impl<K> Node<K> {
    fn leaf(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + max(height(&self.left), height(&self.right));
    }

    fn balance(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

/// The stored height of a subtree, 0 for an empty one.
pub(super) fn height<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

fn balance_factor<K>(link: &Link<K>) -> isize {
    link.as_ref().map_or(0, |n| n.balance())
}

//       y            x
//      / \          / \
//     x   c   →    a   y
//    / \              / \
//   a   b            b   c
fn rotate_right<K>(mut y: Box<Node<K>>) -> Box<Node<K>> {
    // only ever called on a left-heavy node, so `x` exists
    let Some(mut x) = y.left.take() else { return y };
    trace!("rotate right (pivot height {})", y.height);

    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

// mirror image of `rotate_right`
fn rotate_left<K>(mut x: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut y) = x.right.take() else { return x };
    trace!("rotate left (pivot height {})", x.height);

    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Inserts `key` into the subtree, returning its new root.
///
/// The second value is `None` if the key was already present. Otherwise it
/// records which way the key went at this level (`Equal` for the fresh leaf),
/// which is all the parent needs to tell the outer cases from the inner ones.
pub(super) fn insert<K: Ord>(link: Link<K>, key: K) -> (Box<Node<K>>, Option<Ordering>) {
    let Some(mut node) = link else {
        return (Node::leaf(key), Some(Ordering::Equal));
    };

    let dir = key.cmp(&node.key);
    let child_dir = match dir {
        Ordering::Less => {
            let (left, step) = insert(node.left.take(), key);
            node.left = Some(left);
            step
        }
        Ordering::Greater => {
            let (right, step) = insert(node.right.take(), key);
            node.right = Some(right);
            step
        }
        Ordering::Equal => return (node, None),
    };

    let Some(child_dir) = child_dir else {
        // duplicate somewhere below, nothing changed
        return (node, None);
    };

    node.update_height();
    let balance = node.balance();

    // `child_dir` is how the key compared against the root of the heavy
    // child, i.e. `key < left.key` / `key > right.key` for the outer cases
    let node = match (balance, child_dir) {
        (2.., Ordering::Less) => rotate_right(node),
        (..=-2, Ordering::Greater) => rotate_left(node),
        (2.., Ordering::Greater) => {
            node.left = node.left.take().map(rotate_left);
            rotate_right(node)
        }
        (..=-2, Ordering::Less) => {
            node.right = node.right.take().map(rotate_right);
            rotate_left(node)
        }
        _ => node,
    };

    (node, Some(dir))
}

/// Removes `key` from the subtree, returning the new root and the removed key.
pub(super) fn remove<K: Ord>(link: Link<K>, key: &K) -> (Link<K>, Option<K>) {
    let Some(mut node) = link else { return (None, None) };

    let removed = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, removed) = remove(node.left.take(), key);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = remove(node.right.take(), key);
            node.right = right;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => return (None, Some(node.key)),
            // the child takes the target's place; moving the box hands its
            // subtrees over without any copy of the links
            (Some(child), None) | (None, Some(child)) => {
                return (Some(rebalance(child)), Some(node.key));
            }
            (Some(left), Some(right)) => {
                let (right, successor) = take_min(right);
                node.left = Some(left);
                node.right = right;
                Some(mem::replace(&mut node.key, successor))
            }
        },
    };

    (Some(rebalance(node)), removed)
}

/// Detaches the smallest key of a non-empty subtree.
///
/// This is the same walk `remove` makes when asked for the in-order
/// successor: left all the way down, then the found node is replaced by its
/// right child, rebalancing every frame on the way back.
fn take_min<K>(mut node: Box<Node<K>>) -> (Link<K>, K) {
    match node.left.take() {
        None => {
            let Node { key, right, .. } = *node;
            (right.map(rebalance), key)
        }
        Some(left) => {
            let (left, min) = take_min(left);
            node.left = left;
            (Some(rebalance(node)), min)
        }
    }
}

// Runs on every frame a removal returns through. Removal can unbalance every
// ancestor on the path, so this never stops early.
fn rebalance<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    node.update_height();
    let balance = node.balance();

    if balance > 1 {
        if balance_factor(&node.left) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        rotate_right(node)
    } else if balance < -1 {
        if balance_factor(&node.right) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        rotate_left(node)
    } else {
        node
    }
}

pub(super) fn size<K>(link: &Link<K>) -> usize {
    match link {
        None => 0,
        Some(n) => 1 + size(&n.left) + size(&n.right),
    }
}

/// Recomputes the height from scratch, giving up (`None`) at the first node
/// whose children differ in height by more than one.
///
/// Deliberately ignores the cached `height` fields.
pub(super) fn balanced_height<K>(link: &Link<K>) -> Option<usize> {
    let Some(n) = link else { return Some(0) };
    let l = balanced_height(&n.left)?;
    let r = balanced_height(&n.right)?;
    (l.abs_diff(r) <= 1).then(|| 1 + max(l, r))
}
