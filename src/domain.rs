use std::collections::BTreeSet;
use tracing::debug;
use url::Url;

/// Unique hostnames, kept sorted so output is stable between runs.
pub type DomainSet = BTreeSet<String>;

/// Collects the hostname of every URL that parses; the rest are skipped without error.
pub fn extract_domains<S: AsRef<str>>(urls: &[S]) -> DomainSet {
    let mut domains = DomainSet::new();
    let mut unparseable = 0usize;

    for url in urls {
        match Url::parse(url.as_ref()) {
            Ok(parsed) => {
                if let Some(host) = parsed.host_str() {
                    domains.insert(host.to_string());
                }
            }
            Err(_) => unparseable += 1,
        }
    }

    debug!(
        action = "complete",
        component = "domain_extraction",
        unique_domains = domains.len(),
        unparseable,
        "Extracted domains"
    );
    domains
}

/// True when `domain` ends with one of `tlds` (entries carry their leading dot).
pub fn has_listed_tld<S: AsRef<str>>(domain: &str, tlds: &[S]) -> bool {
    tlds.iter().any(|tld| domain.ends_with(tld.as_ref()))
}

/// True when `domain` contains any of `known` as a substring.
pub fn matches_any<S: AsRef<str>>(domain: &str, known: &[S]) -> bool {
    known.iter().any(|k| domain.contains(k.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_duplicates_and_lowercases_hosts() {
        let urls = ["http://Example.COM/a", "https://example.com/b", "http://other.org"];
        let domains = extract_domains(&urls);
        assert_eq!(
            domains.into_iter().collect::<Vec<_>>(),
            vec!["example.com".to_string(), "other.org".to_string()]
        );
    }

    #[test]
    fn skips_unparseable_urls() {
        let urls = ["http://exa mple.com", "http://[zz]/", "http://good.net/x"];
        let domains = extract_domains(&urls);
        assert_eq!(domains.len(), 1);
        assert!(domains.contains("good.net"));
    }

    #[test]
    fn keeps_ip_hosts() {
        let domains = extract_domains(&["http://192.168.0.1/login"]);
        assert!(domains.contains("192.168.0.1"));
    }

    #[test]
    fn tld_and_substring_matching() {
        let tlds = [".com", ".org"];
        assert!(has_listed_tld("mail.example.com", &tlds));
        assert!(!has_listed_tld("example.co", &tlds));
        assert!(matches_any("accounts.google.com", &["google.com"]));
        assert!(!matches_any("g00gle.com", &["google.com"]));
    }
}
