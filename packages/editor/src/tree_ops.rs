//! # Tree Operations
//!
//! Pure positional edits over one node list. Every function returns a new
//! `Vec` and leaves its input untouched.
//!
//! Indices are expected to come from the list being edited, so an
//! out-of-range index is a caller bug and panics. Input that crosses a trust
//! boundary goes through [`crate::Mutation`], which checks bounds first.

/// Splice `node` in before `index`; `index == len` appends.
pub fn insert_at<T: Clone>(list: &[T], index: usize, node: T) -> Vec<T> {
    assert!(
        index <= list.len(),
        "insert index {} out of range for list of length {}",
        index,
        list.len()
    );

    let mut out = Vec::with_capacity(list.len() + 1);
    out.extend_from_slice(&list[..index]);
    out.push(node);
    out.extend_from_slice(&list[index..]);
    out
}

/// Replace the element at `index`
pub fn update_at<T: Clone>(list: &[T], index: usize, node: T) -> Vec<T> {
    assert!(
        index < list.len(),
        "update index {} out of range for list of length {}",
        index,
        list.len()
    );

    let mut out = list.to_vec();
    out[index] = node;
    out
}

/// Remove the element at `index`, keeping the rest in order
pub fn delete_at<T: Clone>(list: &[T], index: usize) -> Vec<T> {
    assert!(
        index < list.len(),
        "delete index {} out of range for list of length {}",
        index,
        list.len()
    );

    let mut out = Vec::with_capacity(list.len() - 1);
    out.extend_from_slice(&list[..index]);
    out.extend_from_slice(&list[index + 1..]);
    out
}

/// Relocate the element at `from` so that it ends up at `to`;
/// elements in between shift by one.
pub fn move_to<T: Clone>(list: &[T], from: usize, to: usize) -> Vec<T> {
    assert!(
        from < list.len() && to < list.len(),
        "move {} -> {} out of range for list of length {}",
        from,
        to,
        list.len()
    );

    let mut out = list.to_vec();
    let node = out.remove(from);
    out.insert(to, node);
    out
}
