#![forbid(unsafe_code)]

use crate::domain::DisplayRecord;
use crate::transform::ALL_CATEGORY;

/// Records visible under `category`. `"all"` yields every record.
pub fn by_category<'a>(
    records: &'a [DisplayRecord],
    category: &'a str,
) -> impl Iterator<Item = &'a DisplayRecord> + 'a {
    records
        .iter()
        .filter(move |record| category == ALL_CATEGORY || record.platform == category)
}
