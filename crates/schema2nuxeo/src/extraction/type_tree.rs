//! Subtree selection and dependency ordering over the type graph.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

use crate::model::vocabulary::ResolvedType;

/// Root that every type descends from, whatever its declared ancestors.
pub const UNIVERSAL_ROOT: &str = "Thing";

// ---------------------------------------------------------------------------
// Descendant filter
// ---------------------------------------------------------------------------

/// Select the types equal to `root` or descending from it, keeping the
/// input order.
///
/// Ancestor chains are followed through `types`, so a type is selected even
/// when its own ancestor list is not transitively closed. Filtering by
/// [`UNIVERSAL_ROOT`] selects everything.
pub fn descendants<'t>(types: &'t [ResolvedType], root: &str) -> Vec<&'t ResolvedType> {
    let by_id: BTreeMap<&str, &ResolvedType> =
        types.iter().map(|t| (t.id.as_str(), t)).collect();

    types
        .iter()
        .filter(|ty| root == UNIVERSAL_ROOT || descends_from(ty, root, &by_id))
        .collect()
}

fn descends_from(ty: &ResolvedType, root: &str, by_id: &BTreeMap<&str, &ResolvedType>) -> bool {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut pending: Vec<&str> = vec![ty.id.as_str()];
    while let Some(id) = pending.pop() {
        if id == root {
            return true;
        }
        if !seen.insert(id) {
            continue;
        }
        if let Some(current) = by_id.get(id) {
            pending.extend(current.ancestor_ids());
        }
    }
    false
}

// ---------------------------------------------------------------------------
// Topological sort
// ---------------------------------------------------------------------------

/// Raised when ordering stalls with items left: their dependencies form a
/// cycle.
#[derive(Debug, Error)]
#[error("cyclic dependencies exist among these items: {}", DisplayRemaining(.remaining))]
pub struct CycleError {
    /// Each unresolved item with its outstanding dependencies.
    pub remaining: BTreeMap<String, BTreeSet<String>>,
}

struct DisplayRemaining<'a>(&'a BTreeMap<String, BTreeSet<String>>);

impl fmt::Display for DisplayRemaining<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (item, deps)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let deps: Vec<&str> = deps.iter().map(String::as_str).collect();
            write!(f, "{item} -> [{}]", deps.join(", "))?;
        }
        Ok(())
    }
}

/// Layered topological sort.
///
/// `deps` maps each item to the items it depends on. Returns layers: the
/// first holds items with no dependencies, each following layer holds items
/// whose dependencies all sit in earlier layers. Layers are sorted, so the
/// result is fully determined by the input. Self dependencies are ignored.
/// Dependencies that are not keys of `deps` are treated as already
/// satisfied and are not emitted.
pub fn toposort(
    deps: BTreeMap<String, BTreeSet<String>>,
) -> Result<Vec<BTreeSet<String>>, CycleError> {
    let keys: BTreeSet<String> = deps.keys().cloned().collect();
    let mut pending: BTreeMap<String, BTreeSet<String>> = deps
        .into_iter()
        .map(|(item, mut on)| {
            on.remove(&item);
            on.retain(|d| keys.contains(d));
            (item, on)
        })
        .collect();

    let mut layers = Vec::new();
    loop {
        let ready: BTreeSet<String> = pending
            .iter()
            .filter(|(_, on)| on.is_empty())
            .map(|(item, _)| item.clone())
            .collect();
        if ready.is_empty() {
            break;
        }
        pending.retain(|item, _| !ready.contains(item));
        for on in pending.values_mut() {
            on.retain(|d| !ready.contains(d));
        }
        layers.push(ready);
    }

    if pending.is_empty() {
        Ok(layers)
    } else {
        Err(CycleError { remaining: pending })
    }
}

/// Order the selected types so that each comes after all of its selected
/// ancestors.
pub fn order_types<'t>(selected: &[&'t ResolvedType]) -> Result<Vec<&'t ResolvedType>, CycleError> {
    let deps: BTreeMap<String, BTreeSet<String>> = selected
        .iter()
        .map(|ty| {
            let on = ty.ancestor_ids().map(str::to_string).collect();
            (ty.id.clone(), on)
        })
        .collect();

    let by_id: BTreeMap<&str, &'t ResolvedType> =
        selected.iter().map(|t| (t.id.as_str(), *t)).collect();

    let layers = toposort(deps)?;
    Ok(layers
        .iter()
        .flatten()
        .filter_map(|id| by_id.get(id.as_str()).copied())
        .collect())
}
