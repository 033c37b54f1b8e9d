use phishparams::{
    analyze, extract_urls, Analyzer, CompiledPatterns, Indicator, SimulatedReputation,
};

fn seeded(text: &str, seed: u64) -> phishparams::AnalysisResult {
    let analyzer = Analyzer::default();
    let mut provider = SimulatedReputation::seeded(CompiledPatterns::embedded(), seed);
    analyzer.analyze(text, &mut provider)
}

#[test]
fn text_without_urls_gets_neutral_url_indicators() {
    let result = analyze("Hello team, the quarterly report is attached.");
    let p = result.parameters;
    assert_eq!(p[Indicator::UrlLength], 0);
    assert_eq!(p[Indicator::UrlDepth], 0);
    assert_eq!(p[Indicator::HaveIp], 0);
    assert_eq!(p[Indicator::HaveAt], 0);
    assert_eq!(p[Indicator::HttpsDomain], 1);
    assert_eq!(p[Indicator::TinyUrl], 0);
    assert_eq!(result.metadata.urls_found, 0);
    assert_eq!(result.metadata.domains_analyzed, 0);
}

#[test]
fn benign_text_resolves_to_benign_defaults() {
    let result = analyze("Lunch at noon? Bring the slides.");
    let p = result.parameters;
    for indicator in [
        Indicator::HaveIp,
        Indicator::HaveAt,
        Indicator::Redirection,
        Indicator::TinyUrl,
        Indicator::IFrame,
        Indicator::MouseOver,
        Indicator::RightClick,
        Indicator::WebForwards,
    ] {
        assert_eq!(p[indicator], 0, "{}", indicator.name());
    }
    assert_eq!(p[Indicator::HttpsDomain], 1);
    assert_eq!(p[Indicator::DnsRecord], 1);
    assert_eq!(p[Indicator::PrefixSuffix], -1);
}

#[test]
fn metadata_counts_matches_and_length() {
    let text = "a http://x.com b https://y.org/p c http://x.com";
    let result = analyze(text);
    assert_eq!(result.metadata.urls_found, extract_urls(text).len());
    assert_eq!(result.metadata.urls_found, 3);
    assert_eq!(result.metadata.domains_analyzed, 2);
    assert_eq!(result.metadata.content_length, text.len());
}

#[test]
fn ip_url_example() {
    let result = analyze("Visit http://192.168.0.1/login now");
    assert_eq!(result.parameters[Indicator::HaveIp], 1);
    assert_eq!(result.parameters[Indicator::UrlLength], 24);
    assert_eq!(result.parameters[Indicator::UrlDepth], 1);
}

#[test]
fn shortener_example() {
    assert_eq!(analyze("click http://bit.ly/xYz").parameters[Indicator::TinyUrl], 1);
}

#[test]
fn iframe_example() {
    let result = analyze("<iframe src='x'></iframe><iframe src='y'>");
    assert_eq!(result.parameters[Indicator::IFrame], 2);
}

#[test]
fn https_fraction_threshold() {
    let four = "https://a.com https://b.com https://c.com https://d.com http://e.com";
    assert_eq!(analyze(four).parameters[Indicator::HttpsDomain], 1);
    let three = "https://a.com https://b.com https://c.com http://d.com http://e.com";
    assert_eq!(analyze(three).parameters[Indicator::HttpsDomain], 0);
}

#[test]
fn deterministic_indicators_are_idempotent() {
    let text = r#"<a href="http://secure-login.xyz/redirect?url=http://bit.ly/x" onmouseover="go()">
        <script>window.location = "https://10.1.1.1/a/b/c";</script>"#;
    let first = analyze(text);
    let second = analyze(text);
    for indicator in Indicator::ALL {
        if matches!(
            indicator,
            Indicator::WebTraffic | Indicator::DomainAge | Indicator::DomainEnd
        ) {
            continue;
        }
        assert_eq!(
            first.parameters[indicator],
            second.parameters[indicator],
            "{}",
            indicator.name()
        );
    }
    assert_eq!(first.metadata, second.metadata);
}

#[test]
fn simulated_indicators_stay_in_range() {
    for seed in 0..64 {
        let unknown = seeded("http://unknown-host.biz/", seed).parameters;
        assert!((1_000..=1_000_999).contains(&unknown[Indicator::WebTraffic]));
        assert!((1..=24).contains(&unknown[Indicator::DomainAge]));
        assert!((1..=5).contains(&unknown[Indicator::DomainEnd]));

        let known = seeded("https://www.microsoft.com/en-us", seed).parameters;
        assert_eq!(known[Indicator::WebTraffic], 100);
        assert!((120..=359).contains(&known[Indicator::DomainAge]));
        assert!((1..=5).contains(&known[Indicator::DomainEnd]));
    }
}

#[test]
fn same_seed_reproduces_whole_vector() {
    let text = "http://promo-deals.biz/win and http://other.info";
    assert_eq!(seeded(text, 11), seeded(text, 11));
}

#[test]
fn phishing_sample_lights_up_expected_indicators() {
    let text = r#"Dear user, verify at http://secure-paypal.biz/login/verify/account
        or http://user@bit.ly/redir
        <iframe src="http://evil.example/x" style="display:none"></iframe>
        <body oncontextmenu="return false">
        <meta http-equiv="refresh" content="0;url=http://evil.example">"#;
    let p = analyze(text).parameters;
    assert_eq!(p[Indicator::HaveAt], 1);
    assert_eq!(p[Indicator::Redirection], 1);
    assert_eq!(p[Indicator::TinyUrl], 1);
    assert_eq!(p[Indicator::PrefixSuffix], 1);
    assert_eq!(p[Indicator::DnsRecord], 0);
    assert_eq!(p[Indicator::IFrame], 1);
    assert_eq!(p[Indicator::RightClick], 1);
    assert_eq!(p[Indicator::WebForwards], 1);
    assert_eq!(p[Indicator::HttpsDomain], 0);
}

#[test]
fn serialized_result_matches_contract() {
    let value = serde_json::to_value(analyze("click http://bit.ly/xYz")).unwrap();
    let params = value["parameters"].as_object().unwrap();
    assert_eq!(params.len(), 16);
    for indicator in Indicator::ALL {
        assert!(params.contains_key(indicator.name()), "{}", indicator.name());
    }
    assert_eq!(value["metadata"]["urlsFound"], 1);
    assert_eq!(value["metadata"]["domainsAnalyzed"], 1);
    assert_eq!(value["metadata"]["contentLength"], 23);
}
