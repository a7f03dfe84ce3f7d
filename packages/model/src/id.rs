use crate::{Block, BlockKind};

/// Generate a block ID from its kind and insertion position.
///
/// IDs take the form `{kind}-{position}`. When a sibling already holds that
/// ID a numeric suffix is appended (`text-0-2`, `text-0-3`, ...), so IDs stay
/// unique within the container they are inserted into.
pub fn block_id(kind: BlockKind, position: usize, siblings: &[Block]) -> String {
    let base = format!("{}-{}", kind.as_str(), position);
    let taken = |candidate: &str| siblings.iter().any(|b| b.id() == candidate);

    if !taken(&base) {
        return base;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
