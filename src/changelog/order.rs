use crate::domain::ReleaseKey;
use std::cmp::Ordering;

/// Display ordering of two release keys: Unreleased first, then newest version first.
pub fn display_cmp(a: &ReleaseKey, b: &ReleaseKey) -> Ordering {
    match (a, b) {
        (ReleaseKey::Unreleased, ReleaseKey::Unreleased) => Ordering::Equal,
        (ReleaseKey::Unreleased, _) => Ordering::Less,
        (_, ReleaseKey::Unreleased) => Ordering::Greater,
        (ReleaseKey::Version(a), ReleaseKey::Version(b)) => b.cmp(a),
    }
}

/// Sort release keys into reverse-chronological display order, Unreleased on top.
pub fn version_order<'a, I>(keys: I) -> Vec<ReleaseKey>
where
    I: IntoIterator<Item = &'a ReleaseKey>,
{
    let mut ordered: Vec<ReleaseKey> = keys.into_iter().copied().collect();
    ordered.sort_by(display_cmp);
    ordered
}
