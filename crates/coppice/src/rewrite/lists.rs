//! Change-tracking traversal of node lists.
//!
//! Argument lists, binding lists, and element-initializer lists all follow
//! the same discipline, so it lives here once, parameterized by the per-item
//! visit function.

use std::sync::Arc;

use crate::error::Result;

/// Visit every item of `items` in order, exactly once each.
///
/// Returns `None` when every visited item came back as the same handle, so
/// the caller can keep its original vector untouched. Otherwise returns
/// `Some` of a fresh vector: items before the first change keep their
/// original handles, the changed item is the visited replacement, and every
/// later item is whatever its own visit returned (which may again be the
/// original handle).
pub fn rewrite_items<T, F>(items: &[Arc<T>], mut visit: F) -> Result<Option<Vec<Arc<T>>>>
where
    F: FnMut(&Arc<T>) -> Result<Arc<T>>,
{
    let mut rebuilt: Option<Vec<Arc<T>>> = None;
    for (i, item) in items.iter().enumerate() {
        let visited = visit(item)?;
        match rebuilt.as_mut() {
            Some(out) => out.push(visited),
            None if Arc::ptr_eq(&visited, item) => {}
            None => {
                let mut out = Vec::with_capacity(items.len());
                out.extend(items[..i].iter().cloned());
                out.push(visited);
                rebuilt = Some(out);
            }
        }
    }
    Ok(rebuilt)
}
