use super::normalizer::{clean_field, header_key};
use crate::recruitment::domain::columns;
use std::collections::HashMap;
use std::sync::OnceLock;

static HEADER_ALIASES: OnceLock<HashMap<String, &'static str>> = OnceLock::new();

/// Maps a raw spreadsheet header onto its canonical column name. Headers
/// that are not recognised are kept, trimmed.
pub(crate) fn canonical_header(raw: &str) -> String {
    match header_aliases().get(&header_key(raw)) {
        Some(canonical) => (*canonical).to_string(),
        None => clean_field(raw),
    }
}

fn header_aliases() -> &'static HashMap<String, &'static str> {
    HEADER_ALIASES.get_or_init(|| {
        const ALIASES: &[(&str, &str)] = &[
            ("Job Req ID", columns::JOB_REQ_ID),
            ("Job Req", columns::JOB_REQ_ID),
            ("Req ID", columns::JOB_REQ_ID),
            ("Requisition ID", columns::JOB_REQ_ID),
            ("Department", columns::DEPARTMENT),
            ("Dept", columns::DEPARTMENT),
            ("Status", columns::STATUS),
            ("Candidate Status", columns::STATUS),
            ("Source", columns::SOURCE),
            ("Sourcing Channel", columns::SOURCE),
            ("Recruiter", columns::RECRUITER),
            ("Recruiter Name", columns::RECRUITER),
            ("Candidate", columns::CANDIDATE),
            ("Candidate Name", columns::CANDIDATE),
            ("Function", columns::FUNCTION),
            ("Month", columns::MONTH),
            ("Offer Date", columns::OFFER_DATE),
            ("Date of Offer", columns::OFFER_DATE),
            ("Joining Date", columns::JOINING_DATE),
            ("Date of Joining", columns::JOINING_DATE),
            ("DOJ", columns::DOJ),
        ];

        let mut map = HashMap::with_capacity(ALIASES.len());
        for (alias, canonical) in ALIASES {
            map.insert(header_key(alias), *canonical);
        }
        map
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreadsheet_headers_map_to_canonical_columns() {
        assert_eq!(canonical_header("Job Req ID"), "JobReqId");
        assert_eq!(canonical_header("job_req_id"), "JobReqId");
        assert_eq!(canonical_header("Date of Joining"), "JoiningDate");
        assert_eq!(canonical_header("doj"), "DOJ");
        assert_eq!(canonical_header(" Offer  Date "), "OfferDate");
    }

    #[test]
    fn unknown_headers_are_kept() {
        assert_eq!(canonical_header("  Hiring   Manager "), "Hiring Manager");
    }
}
