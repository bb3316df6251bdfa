/// Merge mappings into one, later mappings overriding earlier ones.
///
/// Starts from `M::default()` and extends it with each mapping in order, so
/// on a key collision the last value wins. Works for any map whose `Extend`
/// overwrites existing keys, such as `HashMap` and `BTreeMap`.
///
/// ```
/// use std::collections::BTreeMap;
///
/// let merged: BTreeMap<&str, i32> = xsprims::merge([
///     BTreeMap::from([("a", 1)]),
///     BTreeMap::from([("a", 2)]),
///     BTreeMap::from([("b", 3)]),
/// ]);
/// assert_eq!(merged, BTreeMap::from([("a", 2), ("b", 3)]));
/// ```
pub fn merge<M, I, K, V>(mappings: I) -> M
where
    M: Default + Extend<(K, V)>,
    I: IntoIterator,
    I::Item: IntoIterator<Item = (K, V)>,
{
    let mut base = M::default();
    for mapping in mappings {
        base.extend(mapping);
    }
    base
}
