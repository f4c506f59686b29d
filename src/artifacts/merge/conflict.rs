use bytes::Bytes;

pub const CONFLICT_START: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_SEPARATOR: &str = "=======\n";
pub const CONFLICT_END: &str = ">>>>>>>\n";

/// Content written for a conflicting path
///
/// Both sides are copied verbatim between the markers, an absent side as
/// nothing. No newline is added after a side that lacks one.
pub fn conflict_content(current: &[u8], other: &[u8]) -> Bytes {
    let mut content = Vec::with_capacity(
        CONFLICT_START.len()
            + current.len()
            + CONFLICT_SEPARATOR.len()
            + other.len()
            + CONFLICT_END.len(),
    );

    content.extend_from_slice(CONFLICT_START.as_bytes());
    content.extend_from_slice(current);
    content.extend_from_slice(CONFLICT_SEPARATOR.as_bytes());
    content.extend_from_slice(other);
    content.extend_from_slice(CONFLICT_END.as_bytes());

    Bytes::from(content)
}
