/// Strips invisible characters spreadsheet exports like to prepend and
/// collapses runs of whitespace.
pub(crate) fn clean_field(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lookup key for a header: lowercase ASCII alphanumerics only, so that
/// `Job Req ID`, `job_req_id` and `JobReqId` collide.
pub(crate) fn header_key(value: &str) -> String {
    clean_field(value)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
