// LogLens - core/aggregate.rs
//
// Per-category entry counts.
// Core layer: pure logic, no I/O.

use crate::core::model::{CategoryCount, Entry};
use std::collections::BTreeMap;

/// Count entries per category in one pass.
///
/// Output is ordered by category name using plain byte-wise string ordering,
/// so `LogAI` sorts before `LogNet` and uppercase before lowercase. Counts sum
/// to `entries.len()` and no category appears twice.
pub fn aggregate(entries: &[Entry]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.category.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(categories: &[&str]) -> Vec<Entry> {
        categories
            .iter()
            .enumerate()
            .map(|(idx, category)| Entry {
                category: category.to_string(),
                content: format!("message {idx}"),
                line_number: idx as u64 + 1,
            })
            .collect()
    }

    fn count(category: &str, count: usize) -> CategoryCount {
        CategoryCount {
            category: category.to_string(),
            count,
        }
    }

    #[test]
    fn test_counts_sorted_by_name() {
        let result = aggregate(&entries(&["LogNet", "LogAI", "LogNet"]));
        assert_eq!(result, vec![count("LogAI", 1), count("LogNet", 2)]);
    }

    #[test]
    fn test_empty_input_yields_no_counts() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_sum_of_counts_equals_entry_count() {
        let input = entries(&[
            "LogTemp", "LogNet", "LogTemp", "LogInit", "LogNet", "LogTemp", "LogRHI",
        ]);
        let result = aggregate(&input);
        let total: usize = result.iter().map(|c| c.count).sum();
        assert_eq!(total, input.len());
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let input = entries(&["LogTemp", "LogNet", "LogTemp"]);
        assert_eq!(aggregate(&input), aggregate(&input));
    }

    #[test]
    fn test_ordering_is_bytewise() {
        let result = aggregate(&entries(&["Logb", "LogZ", "LogA", "MP4"]));
        let names: Vec<_> = result.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["LogA", "LogZ", "Logb", "MP4"]);
    }
}
