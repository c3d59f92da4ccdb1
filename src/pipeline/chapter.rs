//! Chapter range notation.

/// Separator between the first and last chapter in a range.
const RANGE_SEPARATOR: char = '-';

/// Extract the latest chapter from a range like `"1-40"`.
///
/// Takes the segment after the last separator. Returns `None` when there is
/// no separator or that segment is not a number.
pub fn latest_chapter(range: &str) -> Option<u32> {
    let (_, last) = range.trim().rsplit_once(RANGE_SEPARATOR)?;
    last.trim().parse().ok()
}
