//! Pure ordered-collection utilities used by drag handling.

use thiserror::Error;

/// Errors returned by ordered-collection operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderingError {
    /// An index does not address a valid slot for the list it targets.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Length of the list the index was checked against.
        len: usize,
    },
}

/// Moves the element at `from` to `to` within the same list.
///
/// Every other element shifts accordingly; length and element multiset are
/// preserved.
///
/// # Errors
///
/// Returns [`OrderingError::IndexOutOfRange`] when either index is not a
/// valid element position. Callers resolve indices against the list they
/// pass in, so a failure here indicates a stale or inconsistent drop event.
pub fn reorder<T>(list: &mut Vec<T>, from: usize, to: usize) -> Result<(), OrderingError> {
    let len = list.len();
    if from >= len {
        return Err(OrderingError::IndexOutOfRange { index: from, len });
    }
    if to >= len {
        return Err(OrderingError::IndexOutOfRange { index: to, len });
    }
    let element = list.remove(from);
    list.insert(to, element);
    Ok(())
}

/// Moves the element at `from` in `source` to slot `to` in `destination`.
///
/// The element is removed from `source` and inserted unchanged into
/// `destination`; updating any ownership attribute on the element is the
/// caller's responsibility. `to` may equal `destination.len()` to append.
///
/// # Errors
///
/// Returns [`OrderingError::IndexOutOfRange`] when `from` does not address
/// an element of `source` or `to` exceeds the insertable range of
/// `destination`.
pub fn transfer<T>(
    source: &mut Vec<T>,
    destination: &mut Vec<T>,
    from: usize,
    to: usize,
) -> Result<(), OrderingError> {
    if from >= source.len() {
        return Err(OrderingError::IndexOutOfRange {
            index: from,
            len: source.len(),
        });
    }
    if to > destination.len() {
        return Err(OrderingError::IndexOutOfRange {
            index: to,
            len: destination.len(),
        });
    }
    let element = source.remove(from);
    destination.insert(to, element);
    Ok(())
}
