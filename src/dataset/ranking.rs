//! Rank assignment, merging and threshold culling of layout records

use crate::dataset::record::Record;

/// Stable sort by descending fill percentage and renumber ranks from 1
///
/// Records with equal fill keep their existing relative order.
pub fn rerank(records: &mut [Record]) {
    records.sort_by(|a, b| b.fill_pct.total_cmp(&a.fill_pct));
    for (index, record) in records.iter_mut().enumerate() {
        record.rank = index + 1;
    }
}

/// Append a new record to the dataset and re-rank the whole list
pub fn merge_run(mut records: Vec<Record>, record: Record) -> Vec<Record> {
    records.push(record);
    rerank(&mut records);
    records
}

/// Keep records at or above `threshold`, optionally capped to the best `top_n`
///
/// A `top_n` of `None` or `Some(0)` keeps every record that passes the
/// threshold. Ranks of the kept records are renumbered `1..=k`.
pub fn cull(records: Vec<Record>, threshold: f64, top_n: Option<usize>) -> Vec<Record> {
    let mut kept: Vec<Record> = records
        .into_iter()
        .filter(|r| r.fill_pct >= threshold)
        .collect();
    rerank(&mut kept);
    if let Some(limit) = top_n.filter(|&n| n > 0) {
        kept.truncate(limit);
    }
    kept
}
