use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::domain::DomainSet;
use crate::patterns::CompiledPatterns;
use crate::reputation::DomainReputationProvider;
use crate::urls::{path_depth, text_length};

static IP_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://(?:[0-9]{1,3}\.){3}[0-9]{1,3}").unwrap());

static IFRAME_TAG: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"<iframe[^>]*>")
        .case_insensitive(true)
        .build()
        .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Suspicious,
    /// Values below the threshold are suspicious.
    Reassuring(i64),
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    HaveIp,
    HaveAt,
    UrlLength,
    UrlDepth,
    Redirection,
    HttpsDomain,
    TinyUrl,
    PrefixSuffix,
    DnsRecord,
    WebTraffic,
    DomainAge,
    DomainEnd,
    IFrame,
    MouseOver,
    RightClick,
    WebForwards,
}

impl Indicator {
    pub const COUNT: usize = 16;

    pub const ALL: [Indicator; Self::COUNT] = [
        Indicator::HaveIp,
        Indicator::HaveAt,
        Indicator::UrlLength,
        Indicator::UrlDepth,
        Indicator::Redirection,
        Indicator::HttpsDomain,
        Indicator::TinyUrl,
        Indicator::PrefixSuffix,
        Indicator::DnsRecord,
        Indicator::WebTraffic,
        Indicator::DomainAge,
        Indicator::DomainEnd,
        Indicator::IFrame,
        Indicator::MouseOver,
        Indicator::RightClick,
        Indicator::WebForwards,
    ];

    /// Field name the classifier expects.
    pub fn name(self) -> &'static str {
        match self {
            Indicator::HaveIp => "Have_IP",
            Indicator::HaveAt => "Have_At",
            Indicator::UrlLength => "URL_Length",
            Indicator::UrlDepth => "URL_Depth",
            Indicator::Redirection => "Redirection",
            Indicator::HttpsDomain => "https_Domain",
            Indicator::TinyUrl => "TinyURL",
            Indicator::PrefixSuffix => "Prefix/Suffix",
            Indicator::DnsRecord => "DNS_Record",
            Indicator::WebTraffic => "Web_Traffic",
            Indicator::DomainAge => "Domain_Age",
            Indicator::DomainEnd => "Domain_End",
            Indicator::IFrame => "iFrame",
            Indicator::MouseOver => "Mouse_Over",
            Indicator::RightClick => "Right_Click",
            Indicator::WebForwards => "Web_Forwards",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            Indicator::HaveIp => "IP address used in a URL instead of a domain name",
            Indicator::HaveAt => "URL containing an \"@\" symbol",
            Indicator::UrlLength => "Average URL length",
            Indicator::UrlDepth => "Average number of path segments per URL",
            Indicator::Redirection => "Redirection keyword in a URL",
            Indicator::HttpsDomain => "At least 80% of URLs use HTTPS",
            Indicator::TinyUrl => "URL shortening service in use",
            Indicator::PrefixSuffix => "Suspicious hyphen or digit pattern in a domain name",
            Indicator::DnsRecord => "Every domain has a valid DNS record",
            Indicator::WebTraffic => "Best web traffic rank among the domains",
            Indicator::DomainAge => "Domain age in months",
            Indicator::DomainEnd => "Years until domain expiration",
            Indicator::IFrame => "Number of iframe elements",
            Indicator::MouseOver => "Mouse-over event handler present",
            Indicator::RightClick => "Right-click event handler present",
            Indicator::WebForwards => "Script or meta-refresh forwarding present",
        }
    }

    pub fn polarity(self) -> Polarity {
        match self {
            Indicator::HaveIp
            | Indicator::HaveAt
            | Indicator::Redirection
            | Indicator::TinyUrl
            | Indicator::PrefixSuffix
            | Indicator::IFrame
            | Indicator::MouseOver
            | Indicator::RightClick
            | Indicator::WebForwards => Polarity::Suspicious,
            Indicator::HttpsDomain | Indicator::DnsRecord | Indicator::DomainEnd => {
                Polarity::Reassuring(1)
            }
            Indicator::DomainAge => Polarity::Reassuring(12),
            Indicator::UrlLength | Indicator::UrlDepth | Indicator::WebTraffic => {
                Polarity::Neutral
            }
        }
    }

    pub fn is_flagged(self, value: i64) -> bool {
        match self.polarity() {
            Polarity::Suspicious => value > 0,
            Polarity::Reassuring(threshold) => value < threshold,
            Polarity::Neutral => false,
        }
    }
}

pub struct IndicatorContext<'a> {
    pub urls: &'a [String],
    pub domains: &'a DomainSet,
    pub content: &'a str,
    pub patterns: &'a CompiledPatterns,
}

pub type IndicatorFn = fn(&IndicatorContext<'_>, &mut dyn DomainReputationProvider) -> i64;

pub const REGISTRY: [(Indicator, IndicatorFn); Indicator::COUNT] = [
    (Indicator::HaveIp, have_ip),
    (Indicator::HaveAt, have_at),
    (Indicator::UrlLength, url_length),
    (Indicator::UrlDepth, url_depth),
    (Indicator::Redirection, redirection),
    (Indicator::HttpsDomain, https_domain),
    (Indicator::TinyUrl, tiny_url),
    (Indicator::PrefixSuffix, prefix_suffix),
    (Indicator::DnsRecord, dns_record),
    (Indicator::WebTraffic, web_traffic),
    (Indicator::DomainAge, domain_age),
    (Indicator::DomainEnd, domain_end),
    (Indicator::IFrame, iframe),
    (Indicator::MouseOver, mouse_over),
    (Indicator::RightClick, right_click),
    (Indicator::WebForwards, web_forwards),
];

fn flag(present: bool) -> i64 {
    i64::from(present)
}

fn rounded_mean(total: usize, count: usize) -> i64 {
    if count == 0 {
        return 0;
    }
    (total as f64 / count as f64).round() as i64
}

fn have_ip(ctx: &IndicatorContext<'_>, _: &mut dyn DomainReputationProvider) -> i64 {
    flag(ctx.urls.iter().any(|url| IP_HOST.is_match(url)))
}

fn have_at(ctx: &IndicatorContext<'_>, _: &mut dyn DomainReputationProvider) -> i64 {
    flag(ctx.urls.iter().any(|url| url.contains('@')))
}

fn url_length(ctx: &IndicatorContext<'_>, _: &mut dyn DomainReputationProvider) -> i64 {
    let total = ctx.urls.iter().map(|url| text_length(url)).sum();
    rounded_mean(total, ctx.urls.len())
}

fn url_depth(ctx: &IndicatorContext<'_>, _: &mut dyn DomainReputationProvider) -> i64 {
    let total = ctx.urls.iter().map(|url| path_depth(url)).sum();
    rounded_mean(total, ctx.urls.len())
}

fn redirection(ctx: &IndicatorContext<'_>, _: &mut dyn DomainReputationProvider) -> i64 {
    match &ctx.patterns.redirection {
        Some(keywords) => flag(ctx.urls.iter().any(|url| keywords.is_match(url))),
        None => 0,
    }
}

fn https_domain(ctx: &IndicatorContext<'_>, _: &mut dyn DomainReputationProvider) -> i64 {
    if ctx.urls.is_empty() {
        return 1;
    }
    let secure = ctx
        .urls
        .iter()
        .filter(|url| url.starts_with("https://"))
        .count();
    flag(secure as f64 / ctx.urls.len() as f64 >= 0.8)
}

fn tiny_url(ctx: &IndicatorContext<'_>, _: &mut dyn DomainReputationProvider) -> i64 {
    flag(ctx.urls.iter().any(|url| {
        ctx.patterns
            .shorteners
            .iter()
            .any(|service| url.contains(service.as_str()))
    }))
}

fn prefix_suffix(ctx: &IndicatorContext<'_>, _: &mut dyn DomainReputationProvider) -> i64 {
    let suspicious = ctx.domains.iter().any(|domain| {
        ctx.patterns
            .suspicious_domains
            .iter()
            .any(|pattern| pattern.is_match(domain))
    });
    if suspicious {
        1
    } else {
        -1
    }
}

fn dns_record(ctx: &IndicatorContext<'_>, provider: &mut dyn DomainReputationProvider) -> i64 {
    flag(provider.dns_valid(ctx.domains))
}

fn web_traffic(ctx: &IndicatorContext<'_>, provider: &mut dyn DomainReputationProvider) -> i64 {
    provider.traffic_rank(ctx.domains)
}

fn domain_age(ctx: &IndicatorContext<'_>, provider: &mut dyn DomainReputationProvider) -> i64 {
    provider.age_in_months(ctx.domains)
}

fn domain_end(ctx: &IndicatorContext<'_>, provider: &mut dyn DomainReputationProvider) -> i64 {
    provider.years_to_expiry(ctx.domains)
}

fn iframe(ctx: &IndicatorContext<'_>, _: &mut dyn DomainReputationProvider) -> i64 {
    IFRAME_TAG.find_iter(ctx.content).count() as i64
}

fn mouse_over(ctx: &IndicatorContext<'_>, _: &mut dyn DomainReputationProvider) -> i64 {
    flag(
        ctx.patterns
            .mouse_over
            .as_ref()
            .is_some_and(|events| events.is_match(ctx.content)),
    )
}

fn right_click(ctx: &IndicatorContext<'_>, _: &mut dyn DomainReputationProvider) -> i64 {
    flag(
        ctx.patterns
            .right_click
            .as_ref()
            .is_some_and(|events| events.is_match(ctx.content)),
    )
}

fn web_forwards(ctx: &IndicatorContext<'_>, _: &mut dyn DomainReputationProvider) -> i64 {
    flag(ctx.patterns.forwarding.is_match(ctx.content))
}
