use std::ops::Range;

use super::record::AssetRecord;

pub const RANGE_LABELS: [&str; 4] = ["Top 100", "101 - 200", "201 - 300", "301 - 400"];
pub const DEFAULT_RANGE: &str = "Top 100";

// Substrings matched against lower-cased warning text. Kept byte-for-byte
// in sync with the warning producer.
const TRAP_PATTERN: &str = "cycle is falling";
const HYPE_PATTERN_SPENT: &str = "cycle spent";
const HYPE_PATTERN_ABOVE: &str = "above 80";
const FAILED_PATTERN: &str = "cycle has previously failed";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WarningFilters {
    pub skip_traps: bool,
    pub avoid_hype: bool,
    pub market_cap_guard: bool,
}

impl WarningFilters {
    pub fn any_enabled(self) -> bool {
        self.skip_traps || self.avoid_hype || self.market_cap_guard
    }

    fn excludes(self, warning: &str) -> bool {
        let lowered = warning.to_lowercase();
        (self.skip_traps && lowered.contains(TRAP_PATTERN))
            || (self.avoid_hype
                && lowered.contains(HYPE_PATTERN_SPENT)
                && lowered.contains(HYPE_PATTERN_ABOVE))
            || (self.market_cap_guard && lowered.contains(FAILED_PATTERN))
    }

    fn passes(self, record: &AssetRecord) -> bool {
        record.warnings.is_empty()
            || !record.warnings.iter().any(|warning| self.excludes(warning))
    }
}

/// Half-open index range for a rank label over a list of `len` records.
/// `"Top 100"` means the first hundred; `"<start> - <end>"` labels are
/// 1-indexed inclusive and become `[start-1, end)`. Malformed labels
/// fall back to the top 100.
fn rank_slice(label: &str, len: usize) -> Range<usize> {
    let (start, end) = parse_range_label(label).unwrap_or((0, 100));
    let start = start.min(len);
    let end = end.clamp(start, len);
    start..end
}

fn parse_range_label(label: &str) -> Option<(usize, usize)> {
    if label == DEFAULT_RANGE {
        return Some((0, 100));
    }

    let (start_text, end_text) = label.split_once(" - ")?;
    let start: usize = start_text.trim().parse().ok()?;
    let end: usize = end_text.trim().parse().ok()?;
    Some((start.saturating_sub(1), end))
}

/// Derives the visible subset of a snapshot: warning-flag filtering over
/// the full record list, then rank-range slicing of what passed. Pure
/// function of its inputs.
pub fn visible_records(
    records: &[AssetRecord],
    range_label: &str,
    filters: WarningFilters,
) -> Vec<AssetRecord> {
    if !filters.any_enabled() {
        return records[rank_slice(range_label, records.len())].to_vec();
    }

    let passing = records
        .iter()
        .filter(|record| filters.passes(record))
        .cloned()
        .collect::<Vec<_>>();
    let slice = rank_slice(range_label, passing.len());
    passing[slice].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: &str, warnings: &[&str]) -> AssetRecord {
        AssetRecord {
            symbol: symbol.to_string(),
            risk: 50.0,
            price: 1.0,
            volume: 1.0,
            bubble_size: None,
            icon: None,
            moralis_link: None,
            warnings: warnings.iter().map(|w| w.to_string()).collect(),
            change_1m: None,
            change_2w: None,
            change_3m: None,
        }
    }

    fn numbered_records(count: usize) -> Vec<AssetRecord> {
        (0..count)
            .map(|index| record(&format!("SYM{index}"), &[]))
            .collect()
    }

    #[test]
    fn no_flags_short_circuits_to_full_snapshot() {
        let records = vec![
            record("AAA", &["Cycle is falling hard"]),
            record("BBB", &[]),
        ];
        let visible = visible_records(&records, DEFAULT_RANGE, WarningFilters::default());
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn skip_traps_excludes_only_matching_warnings() {
        let records = vec![
            record("TRAP", &["The cycle is falling sharply"]),
            record("OK", &["some unrelated warning"]),
            record("CLEAN", &[]),
        ];
        let filters = WarningFilters {
            skip_traps: true,
            ..WarningFilters::default()
        };

        let visible = visible_records(&records, DEFAULT_RANGE, filters);
        let symbols = visible
            .iter()
            .map(|r| r.symbol.as_str())
            .collect::<Vec<_>>();
        assert_eq!(symbols, ["OK", "CLEAN"]);
    }

    #[test]
    fn hype_flag_needs_both_substrings_in_one_warning() {
        let records = vec![
            record("HYPE", &["Cycle spent 12 days above 80"]),
            record("HALF", &["Cycle spent 3 days near the top"]),
        ];
        let filters = WarningFilters {
            avoid_hype: true,
            ..WarningFilters::default()
        };

        let visible = visible_records(&records, DEFAULT_RANGE, filters);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].symbol, "HALF");
    }

    #[test]
    fn market_cap_guard_matches_case_insensitively() {
        let records = vec![record("FAIL", &["CYCLE HAS PREVIOUSLY FAILED twice"])];
        let filters = WarningFilters {
            market_cap_guard: true,
            ..WarningFilters::default()
        };
        assert!(visible_records(&records, DEFAULT_RANGE, filters).is_empty());
    }

    #[test]
    fn empty_warning_list_always_passes() {
        let records = vec![record("CLEAN", &[])];
        let filters = WarningFilters {
            skip_traps: true,
            avoid_hype: true,
            market_cap_guard: true,
        };
        assert_eq!(visible_records(&records, DEFAULT_RANGE, filters).len(), 1);
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = vec![
            record("TRAP", &["cycle is falling"]),
            record("OK", &[]),
            record("ALSO", &["harmless"]),
        ];
        let filters = WarningFilters {
            skip_traps: true,
            ..WarningFilters::default()
        };

        let once = visible_records(&records, DEFAULT_RANGE, filters);
        let twice = visible_records(&once, DEFAULT_RANGE, filters);
        assert_eq!(once, twice);
    }

    #[test]
    fn top_100_slices_first_hundred() {
        let records = numbered_records(250);
        let visible = visible_records(&records, "Top 100", WarningFilters::default());
        assert_eq!(visible.len(), 100);
        assert_eq!(visible[0].symbol, "SYM0");
        assert_eq!(visible[99].symbol, "SYM99");
    }

    #[test]
    fn labeled_range_is_one_indexed_half_open() {
        let records = numbered_records(250);
        let visible = visible_records(&records, "101 - 200", WarningFilters::default());
        assert_eq!(visible.len(), 100);
        assert_eq!(visible[0].symbol, "SYM100");
        assert_eq!(visible[99].symbol, "SYM199");
    }

    #[test]
    fn range_beyond_snapshot_yields_empty_set() {
        let records = numbered_records(50);
        let visible = visible_records(&records, "101 - 200", WarningFilters::default());
        assert!(visible.is_empty());
    }

    #[test]
    fn range_is_clamped_to_snapshot_length() {
        let records = numbered_records(150);
        let visible = visible_records(&records, "101 - 200", WarningFilters::default());
        assert_eq!(visible.len(), 50);
        assert_eq!(visible[0].symbol, "SYM100");
    }

    #[test]
    fn malformed_label_falls_back_to_top_100() {
        let records = numbered_records(250);
        for label in ["", "garbage", "10 -", "a - b"] {
            let visible = visible_records(&records, label, WarningFilters::default());
            assert_eq!(visible.len(), 100, "label {label:?}");
        }
    }

    #[test]
    fn empty_snapshot_yields_empty_set() {
        assert!(visible_records(&[], DEFAULT_RANGE, WarningFilters::default()).is_empty());
    }
}
