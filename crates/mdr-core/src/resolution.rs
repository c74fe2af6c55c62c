//! Wire-format resolution token for aspect-preserving resizes.

/// Which dimension the size value fixes.
///
/// The other dimension is computed by the remote service in proportion to the
/// original resource ratio; this module never computes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedAxis {
    Width,
    Height,
}

/// Builds the resolution token in the processing API's `{W|X}x{H|Y}` format.
///
/// A fixed width of 640 yields `"640xY"`; a fixed height of 480 yields
/// `"Xx480"`. Pure and total over its input domain.
pub fn resolution_token(size: u32, fixed: FixedAxis) -> String {
    match fixed {
        FixedAxis::Width => format!("{size}xY"),
        FixedAxis::Height => format!("Xx{size}"),
    }
}
