//! Pure unlock selection.

use std::collections::HashSet;

use super::{AchievementDefinition, ProgressSnapshot};
use crate::domain::foundation::AchievementId;

/// An achievement that qualifies now, with the progress value to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockCandidate<'a> {
    pub achievement: &'a AchievementDefinition,
    pub progress: u32,
}

/// Returns the catalog entries that are not yet unlocked and whose condition
/// the snapshot satisfies, in catalog order.
///
/// The same catalog, unlocked set and snapshot always yield the same list.
pub fn select_unlockable<'a>(
    catalog: &'a [AchievementDefinition],
    unlocked: &HashSet<AchievementId>,
    snapshot: &ProgressSnapshot,
) -> Vec<UnlockCandidate<'a>> {
    catalog
        .iter()
        .filter(|achievement| !unlocked.contains(&achievement.id))
        .filter(|achievement| achievement.condition.is_met(snapshot))
        .filter_map(|achievement| {
            achievement
                .condition
                .measure(snapshot)
                .map(|progress| UnlockCandidate { achievement, progress })
        })
        .collect()
}

/// Sorts a catalog into evaluation order: `sort_order`, then id.
pub fn sort_catalog(catalog: &mut [AchievementDefinition]) {
    catalog.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.id.cmp(&b.id)));
}
