use std::collections::BTreeSet;

use fieldcmp_types::{FieldInfo, FieldMap, FieldPath};
use tracing::{debug, warn};

use crate::mapping::FieldMapping;

/// Apply `mappings` to `source`, returning the relocated field map.
///
/// Every mapping is matched against the original paths, and the first
/// mapping that matches a path decides where it goes, so swaps such as
/// `X → Y` together with `Y → X` work. Unmapped fields keep their paths.
///
/// When a moved field lands on a path that is already taken (by an unmoved
/// field or by an earlier field in path order), it stays at its original
/// path and a warning is logged. No field is ever dropped, so a collision
/// still surfaces in the diff. A mapping that matches nothing is a no-op.
pub fn apply_mappings(source: FieldMap, mappings: &[FieldMapping]) -> FieldMap {
    if mappings.is_empty() {
        return source;
    }

    let mut hits = vec![0usize; mappings.len()];
    let mut stationary = Vec::new();
    let mut moving = Vec::new();

    for info in source {
        let planned = mappings.iter().enumerate().find_map(|(i, mapping)| {
            mapping.map_path(&info.path).map(|target| (i, target))
        });
        match planned {
            Some((i, target)) => {
                hits[i] += 1;
                if target == info.path {
                    stationary.push(info);
                } else {
                    moving.push((info, target));
                }
            }
            None => stationary.push(info),
        }
    }

    for (mapping, count) in mappings.iter().zip(&hits) {
        if *count == 0 {
            debug!(
                source = %mapping.source(),
                target = %mapping.target(),
                "field mapping matched nothing"
            );
        }
    }

    let blocked = resolve_collisions(&stationary, &moving);

    let mut mapped = FieldMap::new();
    let mut moved = 0usize;
    for info in stationary {
        mapped.insert(info);
    }
    for (info, target) in moving {
        if blocked.contains(&info.path) {
            warn!(
                from = %info.path,
                to = %target,
                "mapping target already occupied; field keeps its original path"
            );
            mapped.insert(info);
        } else {
            debug!(from = %info.path, to = %target, "field mapped");
            mapped.insert(info.relocated(target));
            moved += 1;
        }
    }

    debug!(mappings = mappings.len(), moved, fields = mapped.len(), "mappings applied");
    mapped
}

/// Original paths of the moving fields that must stay where they are.
///
/// Unmoved fields hold their paths first, then movers claim targets in
/// path order. A mover that finds its target taken stays put, which takes
/// its original path away from any mover that claimed it; that mover stays
/// put too. Repeats until stable, so every field ends on a distinct path
/// and none is lost.
fn resolve_collisions(
    stationary: &[FieldInfo],
    moving: &[(FieldInfo, FieldPath)],
) -> BTreeSet<FieldPath> {
    let mut blocked: BTreeSet<FieldPath> = BTreeSet::new();
    loop {
        let losers = {
            let mut claimed: BTreeSet<&FieldPath> = stationary.iter().map(|f| &f.path).collect();
            claimed.extend(blocked.iter());

            let mut losers = Vec::new();
            for (info, target) in moving {
                if !blocked.contains(&info.path) && !claimed.insert(target) {
                    losers.push(info.path.clone());
                }
            }
            losers
        };

        if losers.is_empty() {
            return blocked;
        }
        blocked.extend(losers);
    }
}
