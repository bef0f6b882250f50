use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Reason phrase used for codes absent from the catalog.
pub const UNKNOWN_REASON: &str = "unknown status";

/// Valid status codes span `[100, 600)`.
pub fn is_valid_code(code: u16) -> bool {
    (100..600).contains(&code)
}

/// Canonical reason phrase for a well-known status code, `None` if the code
/// has no catalog entry.
pub fn reason_phrase(code: u16) -> Option<&'static str> {
    CATALOG.get(&code).copied()
}

static CATALOG: Lazy<HashMap<u16, &'static str>> =
    Lazy::new(|| STATUS_TEXTS.iter().copied().collect());

const STATUS_TEXTS: &[(u16, &str)] = &[
    (100, "Continue"),
    (101, "Switching Protocols"),
    (102, "Processing"),
    (103, "Early Hints"),
    (200, "OK"),
    (201, "Created"),
    (202, "Accepted"),
    (203, "Non-Authoritative Information"),
    (204, "No Content"),
    (205, "Reset Content"),
    (206, "Partial Content"),
    (207, "Multi-Status"),
    (208, "Already Reported"),
    (226, "IM Used"),
    (300, "Multiple Choices"),
    (301, "Moved Permanently"),
    (302, "Found"),
    (303, "See Other"),
    (304, "Not Modified"),
    (305, "Use Proxy"),
    (307, "Temporary Redirect"),
    (308, "Permanent Redirect"),
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (402, "Payment Required"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (405, "Method Not Allowed"),
    (406, "Not Acceptable"),
    (407, "Proxy Authentication Required"),
    (408, "Request Timeout"),
    (409, "Conflict"),
    (410, "Gone"),
    (411, "Length Required"),
    (412, "Precondition Failed"),
    (413, "Payload Too Large"),
    (414, "URI Too Long"),
    (415, "Unsupported Media Type"),
    (416, "Range Not Satisfiable"),
    (417, "Expectation Failed"),
    (421, "Misdirected Request"),
    (422, "Unprocessable Entity"),
    (423, "Locked"),
    (424, "Failed Dependency"),
    (425, "Too Early"),
    (426, "Upgrade Required"),
    (428, "Precondition Required"),
    (429, "Too Many Requests"),
    (431, "Request Header Fields Too Large"),
    (451, "Unavailable For Legal Reasons"),
    (500, "Internal Server Error"),
    (501, "Not Implemented"),
    (502, "Bad Gateway"),
    (503, "Service Unavailable"),
    (504, "Gateway Timeout"),
    (505, "HTTP Version Not Supported"),
    (506, "Variant Also Negotiates"),
    (507, "Insufficient Storage"),
    (508, "Loop Detected"),
    (510, "Not Extended"),
    (511, "Network Authentication Required"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup() {
        assert_eq!(reason_phrase(404), Some("Not Found"));
        assert_eq!(reason_phrase(429), Some("Too Many Requests"));
        assert_eq!(reason_phrase(511), Some("Network Authentication Required"));
    }

    #[test]
    fn uncataloged_code() {
        assert_eq!(reason_phrase(104), None);
        assert_eq!(reason_phrase(599), None);
    }

    #[test]
    fn code_range() {
        assert!(is_valid_code(100));
        assert!(is_valid_code(599));
        assert!(!is_valid_code(99));
        assert!(!is_valid_code(600));
    }
}
