use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use regex::Regex;

/// Queryable tables exposed by the telemetry backend. Matching is
/// case-sensitive; the backend treats `Traces` and `traces` as different
/// identifiers.
pub const KNOWN_TABLES: &[&str] = &[
    "traces",
    "requests",
    "dependencies",
    "exceptions",
    "customEvents",
    "customMetrics",
    "pageViews",
    "availabilityResults",
    "browserTimings",
    "performanceCounters",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    EmptyQuery,
    UnknownTable { table: String },
    UnbalancedDelimiters { detail: String },
}

impl GuardError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "empty_query",
            Self::UnknownTable { .. } => "unknown_table",
            Self::UnbalancedDelimiters { .. } => "unbalanced_delimiters",
        }
    }
}

impl Display for GuardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyQuery => f.write_str("query is empty"),
            Self::UnknownTable { table } => {
                write!(f, "query must start with a known table name, got `{table}`")
            }
            Self::UnbalancedDelimiters { detail } => {
                write!(f, "query has unbalanced delimiters: {detail}")
            }
        }
    }
}

impl std::error::Error for GuardError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitReason {
    NotTableFirst,
    FetchZero,
    EmptyStatement,
    UserExplicit,
    AppliedTableNoUserLimit,
}

impl LimitReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotTableFirst => "not_table_first",
            Self::FetchZero => "fetch_zero",
            Self::EmptyStatement => "empty_stmt",
            Self::UserExplicit => "user_explicit",
            Self::AppliedTableNoUserLimit => "applied_table_no_user_limit",
        }
    }
}

/// Result of the fetch-limit rewrite. `query` is the original text whenever
/// `applied` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitOutcome {
    pub query: String,
    pub applied: bool,
    pub reason: LimitReason,
}

/// Best-effort textual validation run before a query leaves the client. This
/// is deliberately not a parser: it must stay cheap on every submission and
/// robust to pipe stages it has never seen. The table check applies to the
/// first `;`-separated statement; the bracket scan covers the whole query and
/// ignores string literals, so a literal containing an unmatched bracket is
/// misreported.
pub fn validate(query: &str) -> Result<(), GuardError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(GuardError::EmptyQuery);
    }

    let first_statement = trimmed.split(';').next().unwrap_or_default();
    let first_stage = first_statement.split('|').next().unwrap_or_default();
    let token = first_stage.split_whitespace().next().unwrap_or_default();
    if !is_identifier(token) || !is_known_table(token) {
        return Err(GuardError::UnknownTable {
            table: token.to_string(),
        });
    }

    check_delimiters(query)
}

/// Rewrites the first statement to append `| take <max_rows>` unless the user
/// already bounded it. Statements after the first `;` are reattached verbatim.
#[must_use]
pub fn apply_fetch_limit(query: &str, max_rows: i64) -> LimitOutcome {
    let (statement, rest) = match query.find(';') {
        Some(index) => (&query[..index], &query[index..]),
        None => (query, ""),
    };

    let first_stage = statement.split('|').next().unwrap_or_default();
    let token = first_stage.split_whitespace().next();
    if let Some(token) = token
        && !is_known_table(token)
    {
        return unchanged(query, LimitReason::NotTableFirst);
    }
    if max_rows <= 0 {
        return unchanged(query, LimitReason::FetchZero);
    }
    if token.is_none() {
        return unchanged(query, LimitReason::EmptyStatement);
    }
    if has_row_limit_stage(statement) {
        return unchanged(query, LimitReason::UserExplicit);
    }

    LimitOutcome {
        query: format!("{statement} | take {max_rows}{rest}"),
        applied: true,
        reason: LimitReason::AppliedTableNoUserLimit,
    }
}

#[must_use]
pub fn is_known_table(name: &str) -> bool {
    KNOWN_TABLES.contains(&name)
}

fn unchanged(query: &str, reason: LimitReason) -> LimitOutcome {
    LimitOutcome {
        query: query.to_string(),
        applied: false,
        reason,
    }
}

fn check_delimiters(query: &str) -> Result<(), GuardError> {
    let mut open = Vec::new();
    for (index, ch) in query.char_indices() {
        match ch {
            '(' | '[' => open.push(ch),
            ')' => match open.pop() {
                Some('(') => {}
                _ => return Err(unbalanced(ch, index)),
            },
            ']' => match open.pop() {
                Some('[') => {}
                _ => return Err(unbalanced(ch, index)),
            },
            _ => {}
        }
    }

    match open.last() {
        Some(opener) => Err(GuardError::UnbalancedDelimiters {
            detail: format!("`{opener}` is never closed"),
        }),
        None => Ok(()),
    }
}

fn unbalanced(closer: char, index: usize) -> GuardError {
    GuardError::UnbalancedDelimiters {
        detail: format!("unexpected `{closer}` at byte {index}"),
    }
}

fn is_identifier(token: &str) -> bool {
    identifier_regex().is_match(token)
}

fn identifier_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex should compile")
    })
}

fn has_row_limit_stage(statement: &str) -> bool {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX
        .get_or_init(|| {
            Regex::new(r"(?i)\|\s*(?:take|limit)\b")
                .expect("row limit stage regex should compile")
        })
        .is_match(statement)
}
