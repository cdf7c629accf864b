use std::collections::HashSet;

use insomniac_core::Environment;

use crate::store::trait_store::{Catalog, StoreError};

/// All environments below `root_id`, at any depth, whose name equals `name`.
///
/// Matches are returned depth-first in catalog order: an environment comes
/// before its own sub-environments, which come before its next sibling.
pub async fn find_environments_by_name(
    catalog: &dyn Catalog,
    root_id: &str,
    name: &str,
) -> Result<Vec<Environment>, StoreError> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();
    let mut stack: Vec<Environment> = catalog.environments_by_parent(root_id).await?;
    stack.reverse();

    while let Some(env) = stack.pop() {
        // A malformed export may parent environments in a loop.
        if !seen.insert(env.id.clone()) {
            continue;
        }
        let mut children = catalog.environments_by_parent(&env.id).await?;
        children.reverse();
        if env.name == name {
            found.push(env);
        }
        stack.extend(children);
    }

    Ok(found)
}
