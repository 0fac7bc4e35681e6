use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Current wall-clock time as an RFC3339 UTC string for report envelopes.
#[must_use]
pub fn utc_now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    use super::utc_now_rfc3339;

    #[test]
    fn now_is_parseable_rfc3339() {
        let stamp = utc_now_rfc3339();
        let parsed = OffsetDateTime::parse(&stamp, &Rfc3339).expect("stamp should parse back");
        assert!(parsed.unix_timestamp() > 0);
    }
}
