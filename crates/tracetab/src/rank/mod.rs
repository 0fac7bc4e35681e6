use std::collections::BTreeMap;

use crate::flatten::RowDetails;

pub const DEFAULT_KEYWORD_BOOST: i32 = 25;
pub const DEFAULT_LONG_VALUE_PENALTY: i32 = 15;
pub const DEFAULT_LONG_VALUE_THRESHOLD: usize = 80;

/// Substrings that mark a key as high-signal: error/fault markers, status
/// codes, and identifier-like names.
pub const HIGH_SIGNAL_KEYWORDS: &[&str] = &[
    "error",
    "fault",
    "fail",
    "status",
    "code",
    "result",
    "severity",
    "id",
    "name",
    "operation",
    "duration",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankConfig {
    pub keyword_boost: i32,
    pub long_value_penalty: i32,
    /// Average sampled value length (in characters) above which a key is
    /// pushed toward the end of the header list.
    pub long_value_threshold: usize,
    pub keywords: Vec<String>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            keyword_boost: DEFAULT_KEYWORD_BOOST,
            long_value_penalty: DEFAULT_LONG_VALUE_PENALTY,
            long_value_threshold: DEFAULT_LONG_VALUE_THRESHOLD,
            keywords: HIGH_SIGNAL_KEYWORDS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Per-key statistics sampled over the visible rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStats {
    pub key: String,
    /// Index of the key in distinct first-seen order across the row sample.
    pub first_seen: usize,
    pub value_count: usize,
    pub total_value_chars: usize,
}

impl KeyStats {
    #[must_use]
    pub const fn average_value_chars(&self) -> usize {
        if self.value_count == 0 {
            0
        } else {
            self.total_value_chars / self.value_count
        }
    }
}

/// Collects distinct keys and value-length samples from the rows currently
/// being displayed, preserving first-seen order.
#[must_use]
pub fn collect_key_stats(rows: &[RowDetails]) -> Vec<KeyStats> {
    let mut order: Vec<KeyStats> = Vec::new();
    let mut index: BTreeMap<String, usize> = BTreeMap::new();

    for details in rows {
        for field in &details.fields {
            let slot = match index.get(field.key.as_str()) {
                Some(slot) => *slot,
                None => {
                    let slot = order.len();
                    index.insert(field.key.clone(), slot);
                    order.push(KeyStats {
                        key: field.key.clone(),
                        first_seen: slot,
                        value_count: 0,
                        total_value_chars: 0,
                    });
                    slot
                }
            };
            let stats = &mut order[slot];
            stats.value_count += 1;
            stats.total_value_chars += field.value.chars().count();
        }
    }

    order
}

/// Computes the left-to-right header order for a result batch. Pure and
/// idempotent: the same key sample always yields the same sequence. Every
/// distinct key appears exactly once; ranking never drops a key.
#[must_use]
pub fn rank_headers(
    fixed_primary: [&str; 2],
    stats: &[KeyStats],
    config: &RankConfig,
) -> Vec<String> {
    let mut scored: Vec<(&KeyStats, i32)> = stats
        .iter()
        .map(|entry| (entry, score_key(entry, config)))
        .collect();

    scored.sort_by(|(left, left_score), (right, right_score)| {
        right_score
            .cmp(left_score)
            .then_with(|| left.first_seen.cmp(&right.first_seen))
            .then_with(|| {
                left.key
                    .to_lowercase()
                    .cmp(&right.key.to_lowercase())
            })
    });

    let mut headers = Vec::with_capacity(stats.len() + fixed_primary.len());
    headers.extend(fixed_primary.iter().map(ToString::to_string));
    for (entry, _) in scored {
        if fixed_primary.contains(&entry.key.as_str()) {
            continue;
        }
        headers.push(entry.key.clone());
    }
    headers
}

fn score_key(stats: &KeyStats, config: &RankConfig) -> i32 {
    let mut score = 0;

    let lowered = stats.key.to_lowercase();
    if config
        .keywords
        .iter()
        .any(|keyword| lowered.contains(keyword.as_str()))
    {
        score += config.keyword_boost;
    }
    if stats.average_value_chars() > config.long_value_threshold {
        score -= config.long_value_penalty;
    }

    score
}

#[cfg(test)]
mod tests {
    use crate::flatten::RowDetails;
    use crate::models::DetailField;

    use super::{KeyStats, RankConfig, collect_key_stats, rank_headers};

    fn row(fields: Vec<DetailField>) -> RowDetails {
        RowDetails {
            timestamp: "2026-02-05T07:00:03Z".to_string(),
            message: "sample".to_string(),
            fields,
        }
    }

    #[test]
    fn stats_preserve_first_seen_order_across_rows() {
        let rows = vec![
            row(vec![
                DetailField::custom("zone", "eu", 10),
                DetailField::custom("error.code", "timeout", 10),
            ]),
            row(vec![
                DetailField::custom("error.code", "refused", 10),
                DetailField::custom("attempt", "2", 10),
            ]),
        ];

        let stats = collect_key_stats(&rows);
        let keys: Vec<&str> = stats.iter().map(|entry| entry.key.as_str()).collect();
        assert_eq!(keys, vec!["zone", "error.code", "attempt"]);
        assert_eq!(stats[1].value_count, 2);
        assert_eq!(stats[1].total_value_chars, "timeout".len() + "refused".len());
    }

    #[test]
    fn keyword_keys_rank_before_long_value_keys() {
        let stats = vec![
            KeyStats {
                key: "stack".to_string(),
                first_seen: 0,
                value_count: 1,
                total_value_chars: 400,
            },
            KeyStats {
                key: "error.code".to_string(),
                first_seen: 1,
                value_count: 1,
                total_value_chars: 7,
            },
        ];

        let headers = rank_headers(["timestamp", "message"], &stats, &RankConfig::default());
        assert_eq!(headers, vec!["timestamp", "message", "error.code", "stack"]);
    }

    #[test]
    fn ties_break_on_first_seen_then_name() {
        let stats = vec![
            KeyStats {
                key: "beta".to_string(),
                first_seen: 0,
                value_count: 1,
                total_value_chars: 4,
            },
            KeyStats {
                key: "alpha".to_string(),
                first_seen: 1,
                value_count: 1,
                total_value_chars: 4,
            },
        ];

        let headers = rank_headers(["timestamp", "message"], &stats, &RankConfig::default());
        assert_eq!(headers, vec!["timestamp", "message", "beta", "alpha"]);
    }

    #[test]
    fn ranking_is_idempotent() {
        let rows = vec![row(vec![
            DetailField::custom("operation.name", "GET /", 10),
            DetailField::custom("note", "n", 10),
        ])];
        let stats = collect_key_stats(&rows);
        let config = RankConfig::default();

        let first = rank_headers(["timestamp", "message"], &stats, &config);
        let second = rank_headers(["timestamp", "message"], &stats, &config);
        assert_eq!(first, second);
        assert_eq!(first[0], "timestamp");
        assert_eq!(first[1], "message");
    }
}
