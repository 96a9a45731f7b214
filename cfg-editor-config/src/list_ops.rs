//! Ordered-list mutation primitives used by the list editor.
//!
//! All operations work in place on a `Vec<String>` and check their indices,
//! returning [`ListError`] instead of panicking.

use thiserror::Error;

/// Where an edited value lands in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// Append a new value at the end
    Add,
    /// Replace the value at this index
    Existing(usize),
}

impl EditTarget {
    pub fn is_add(&self) -> bool {
        matches!(self, EditTarget::Add)
    }
}

/// Index errors from list mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("index {index} is out of range for a list of {len} items")]
    OutOfRange { index: usize, len: usize },
}

fn check_index(values: &[String], index: usize) -> Result<(), ListError> {
    if index < values.len() {
        Ok(())
    } else {
        Err(ListError::OutOfRange {
            index,
            len: values.len(),
        })
    }
}

/// Remove the element at `from` and reinsert it at `to`.
///
/// `to` is a position in the list after removal, so moving `from = 1` to
/// `to = 0` swaps the first two elements.
pub fn move_item(values: &mut Vec<String>, from: usize, to: usize) -> Result<(), ListError> {
    check_index(values, from)?;
    // after removal the list is one shorter; `to` may equal that new length
    if to >= values.len() {
        return Err(ListError::OutOfRange {
            index: to,
            len: values.len(),
        });
    }
    let element = values.remove(from);
    values.insert(to, element);
    Ok(())
}

/// Remove and return the element at `index`.
pub fn remove_item(values: &mut Vec<String>, index: usize) -> Result<String, ListError> {
    check_index(values, index)?;
    Ok(values.remove(index))
}

/// Write `value` into the list: append for [`EditTarget::Add`], replace in
/// place for [`EditTarget::Existing`].
pub fn apply_edit(
    values: &mut Vec<String>,
    target: EditTarget,
    value: String,
) -> Result<(), ListError> {
    match target {
        EditTarget::Add => values.push(value),
        EditTarget::Existing(index) => {
            check_index(values, index)?;
            values[index] = value;
        }
    }
    Ok(())
}
