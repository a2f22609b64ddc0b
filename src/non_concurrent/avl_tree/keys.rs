//! The flat text form a tree is stored in.
//!
//! Only the key set is stored: every key in ascending order, each one
//! followed by a single space (`"5 10 15 "`). Shape and heights are never
//! written, a tree is rebuilt by replaying the insertions.

use std::fmt::{self, Display, Write};
use std::str::FromStr;

use log::{debug, warn};

use super::{AvlTree, ParseKeysError};

impl<K: Display> AvlTree<K> {
    /// The stored form of the tree. Complexity: O(n)
    pub fn inorder_string(&self) -> String {
        let mut out = String::new();
        // writing into a `String` can't fail
        let _ = self.write_keys(&mut out);
        out
    }
    
    fn write_keys<W: Write>(&self, out: &mut W) -> fmt::Result {
        for key in self {
            write!(out, "{key} ")?;
        }
        Ok(())
    }
}

impl<K: Display> Display for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_keys(f)
    }
}

fn parse_keys<K>(line: &str) -> Result<Vec<K>, ParseKeysError>
where
    K: FromStr,
    K::Err: Display,
{
    line.split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse().map_err(|e: K::Err| {
                warn!("rejecting key line: token {position} ({token:?}) does not parse: {e}");
                ParseKeysError::InvalidToken {
                    position,
                    token: token.to_owned(),
                    reason: e.to_string(),
                }
            })
        })
        .collect()
}

impl<K> AvlTree<K>
where
    K: Ord + FromStr,
    K::Err: Display,
{
    /// Rebuilds a tree from its stored form, inserting keys in the order they appear.
    /// 
    /// Any whitespace separates keys and repeated keys are ignored. A token that
    /// is not a key fails the whole line.
    pub fn from_key_line(line: &str) -> Result<Self, ParseKeysError> {
        let keys = parse_keys(line)?;
        Ok(keys.into_iter().collect())
    }
    
    /// Adds every key of `line` to the tree, returning how many were new.
    /// 
    /// The line is fully parsed before anything is inserted, so on error the
    /// tree is left as it was.
    pub fn insert_key_line(&mut self, line: &str) -> Result<usize, ParseKeysError> {
        let keys = parse_keys(line)?;
        let total = keys.len();
        let mut added = 0;
        for key in keys {
            added += self.insert(key) as usize;
        }
        debug!("merged key line: {added} of {total} keys were new");
        Ok(added)
    }
}
