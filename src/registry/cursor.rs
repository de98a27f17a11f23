//! Start-after pagination over ordered maps.

use std::collections::BTreeMap;
use std::ops::Bound;

/// Returns up to `limit` entries strictly after `start_after` (or from the
/// first key when `None`), mapped through `f`, plus whether further
/// entries remain.
///
/// The cursor is the last key of the previous page, so a page boundary
/// stays stable under insertions elsewhere in the map.
pub(crate) fn next_page<K, V, T>(
    map: &BTreeMap<K, V>,
    start_after: Option<&K>,
    limit: usize,
    mut f: impl FnMut(&K, &V) -> T,
) -> (Vec<T>, bool)
where
    K: Ord,
{
    let lower = start_after.map_or(Bound::Unbounded, Bound::Excluded);
    let mut iter = map.range::<K, _>((lower, Bound::Unbounded));
    let items: Vec<T> = iter.by_ref().take(limit).map(|(k, v)| f(k, v)).collect();
    let more = iter.next().is_some();
    (items, more)
}
