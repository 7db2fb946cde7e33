//! Processing order for the nesting pass.
//!
//! Attaching a table copies its records into every matching parent record,
//! so a table's own children must already be attached by then. The order
//! puts the root first and every other table strictly before its parent.

/// Orders table indices given each table's resolved parent index.
///
/// Index 0 is the root. Ties are broken by registration order. On failure
/// returns the indices that could never be scheduled (they form or lead
/// into a parent cycle).
pub(crate) fn processing_order(parents: &[Option<usize>]) -> Result<Vec<usize>, Vec<usize>> {
    let n = parents.len();
    let mut pending_children = vec![0usize; n];
    for parent in parents.iter().skip(1).flatten() {
        pending_children[*parent] += 1;
    }

    let mut scheduled = vec![false; n];
    let mut order = Vec::with_capacity(n);
    if n > 0 {
        scheduled[0] = true;
        order.push(0);
    }

    while let Some(next) = (1..n).find(|&i| !scheduled[i] && pending_children[i] == 0) {
        scheduled[next] = true;
        order.push(next);
        if let Some(parent) = parents[next] {
            pending_children[parent] -= 1;
        }
    }

    if order.len() == n {
        Ok(order)
    } else {
        Err((0..n).filter(|&i| !scheduled[i]).collect())
    }
}
