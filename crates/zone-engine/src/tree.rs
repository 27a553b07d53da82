//! # Zone Tree
//!
//! Materializes the flat zone collection into a forest and answers ancestry queries.
//! Everything here is a pure function over a snapshot; nothing touches the store.
//!
//! [`build_forest`] runs in O(n): one pass builds a parent-id → children index, a
//! second pass attaches children by walking that index from the roots.
//!
//! Two defensive rules keep every zone visible even when the snapshot is
//! inconsistent:
//! - a zone whose parent is not in the snapshot is treated as a root;
//! - zones on a parent cycle (unreachable from any root) are emitted as extra roots,
//!   each zone still appearing exactly once.

use crate::model::{Zone, ZoneId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// A zone and its child zones, in snapshot order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub zone: Zone,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn id(&self) -> &ZoneId {
        &self.zone.id
    }

    /// Number of zones in this subtree, including this one.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Number of levels in this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }
}

// Deep chains would otherwise be dropped one stack frame per level.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Builds the forest for a snapshot of zones.
pub fn build_forest(zones: &[Zone]) -> Vec<TreeNode> {
    let present: HashSet<&ZoneId> = zones.iter().map(|z| &z.id).collect();
    let mut children: HashMap<&ZoneId, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();

    for (idx, zone) in zones.iter().enumerate() {
        match &zone.parent_id {
            Some(parent) if present.contains(parent) => {
                children.entry(parent).or_default().push(idx);
            }
            Some(parent) => {
                debug!(zone_id = %zone.id, parent_id = %parent, "Parent missing, treating as root");
                roots.push(idx);
            }
            None => roots.push(idx),
        }
    }

    let mut visited = vec![false; zones.len()];
    let mut order: Vec<(usize, Vec<usize>)> = Vec::with_capacity(zones.len());
    for &idx in &roots {
        claim(idx, zones, &children, &mut visited, &mut order);
    }

    // Anything left over sits on a parent cycle.
    for idx in 0..zones.len() {
        if !visited[idx] {
            warn!(zone_id = %zones[idx].id, "Zone is part of a parent cycle, promoting to root");
            roots.push(idx);
            claim(idx, zones, &children, &mut visited, &mut order);
        }
    }

    // `order` lists every parent before its children, so walking it backwards
    // finishes each subtree before the node that holds it.
    let mut built: Vec<Option<TreeNode>> = (0..zones.len()).map(|_| None).collect();
    for (idx, claimed) in order.into_iter().rev() {
        let node = TreeNode {
            zone: zones[idx].clone(),
            children: claimed.iter().filter_map(|&c| built[c].take()).collect(),
        };
        built[idx] = Some(node);
    }

    roots.into_iter().filter_map(|idx| built[idx].take()).collect()
}

/// Walks the subtree under `root` with an explicit stack, recording each zone
/// together with the child indices it claimed.
fn claim(
    root: usize,
    zones: &[Zone],
    children: &HashMap<&ZoneId, Vec<usize>>,
    visited: &mut [bool],
    order: &mut Vec<(usize, Vec<usize>)>,
) {
    visited[root] = true;
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        let mut claimed = Vec::new();
        for &child in children.get(&zones[idx].id).into_iter().flatten() {
            if !visited[child] {
                visited[child] = true;
                claimed.push(child);
            }
        }
        stack.extend(claimed.iter().copied());
        order.push((idx, claimed));
    }
}

fn parent_index(zones: &[Zone]) -> HashMap<&ZoneId, Option<&ZoneId>> {
    zones
        .iter()
        .map(|z| (&z.id, z.parent_id.as_ref()))
        .collect()
}

/// Ids of the zones above `id`, nearest first, stopping at a root.
///
/// Only zones present in the snapshot are returned, and the walk stops if it ever
/// revisits a zone.
pub fn ancestors(id: &ZoneId, zones: &[Zone]) -> Vec<ZoneId> {
    let parents = parent_index(zones);
    let mut seen: HashSet<&ZoneId> = HashSet::from([id]);
    let mut path = Vec::new();
    let mut current = parents.get(id).copied().flatten();

    while let Some(parent) = current {
        if !parents.contains_key(parent) || !seen.insert(parent) {
            break;
        }
        path.push(parent.clone());
        current = parents.get(parent).copied().flatten();
    }
    path
}

/// True if `of` lies on the path from `candidate` up to its root.
///
/// A zone is not its own descendant; callers check that case separately.
pub fn is_descendant(candidate: &ZoneId, of: &ZoneId, zones: &[Zone]) -> bool {
    ancestors(candidate, zones).iter().any(|a| a == of)
}

/// Number of zones whose parent is `id`.
pub fn count_children(id: &ZoneId, zones: &[Zone]) -> usize {
    zones
        .iter()
        .filter(|z| z.parent_id.as_ref() == Some(id))
        .count()
}
