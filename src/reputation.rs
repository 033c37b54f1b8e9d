//! Domain reputation signals.
//!
//! DNS validity, traffic rank, registration age and time to expiry would normally come
//! from DNS, a traffic ranking and WHOIS. The engine only sees them through
//! [`DomainReputationProvider`], so a real lookup service can be dropped in without
//! touching the indicator suite.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::domain::{has_listed_tld, matches_any, DomainSet};
use crate::patterns::CompiledPatterns;

pub const WELL_KNOWN_TRAFFIC_RANK: i64 = 100;
pub const TRAFFIC_RANK_RANGE: (i64, i64) = (1_000, 1_000_999);
pub const WELL_KNOWN_AGE_MONTHS: (i64, i64) = (120, 359);
pub const UNKNOWN_AGE_MONTHS: (i64, i64) = (1, 24);
pub const EXPIRY_YEARS: (i64, i64) = (1, 5);

/// Reputation lookups over the hostnames found in one piece of content.
///
/// Every method receives the whole [`DomainSet`] and must return a value for an empty
/// set too.
pub trait DomainReputationProvider {
    fn dns_valid(&mut self, domains: &DomainSet) -> bool;
    /// Best (lowest) traffic rank among the domains.
    fn traffic_rank(&mut self, domains: &DomainSet) -> i64;
    fn age_in_months(&mut self, domains: &DomainSet) -> i64;
    fn years_to_expiry(&mut self, domains: &DomainSet) -> i64;
}

/// Allow-list and randomness stand-in for real lookups.
///
/// A domain counts as DNS-valid when it ends with a legitimate TLD; a domain containing a
/// well-known name gets a top traffic rank and an old registration; everything else is
/// drawn from `rng`.
pub struct SimulatedReputation<R = ChaCha20Rng> {
    legitimate_tlds: Vec<String>,
    well_known_domains: Vec<String>,
    rng: R,
}

impl SimulatedReputation<ChaCha20Rng> {
    pub fn seeded(patterns: &CompiledPatterns, seed: u64) -> Self {
        Self::with_rng(patterns, ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn from_entropy(patterns: &CompiledPatterns) -> Self {
        Self::with_rng(patterns, ChaCha20Rng::from_entropy())
    }
}

impl<R: Rng> SimulatedReputation<R> {
    pub fn with_rng(patterns: &CompiledPatterns, rng: R) -> Self {
        Self {
            legitimate_tlds: patterns.legitimate_tlds.clone(),
            well_known_domains: patterns.well_known_domains.clone(),
            rng,
        }
    }

    fn any_well_known(&self, domains: &DomainSet) -> bool {
        domains
            .iter()
            .any(|d| matches_any(d, &self.well_known_domains))
    }

    fn draw(&mut self, (low, high): (i64, i64)) -> i64 {
        self.rng.gen_range(low..=high)
    }
}

impl<R: Rng> DomainReputationProvider for SimulatedReputation<R> {
    fn dns_valid(&mut self, domains: &DomainSet) -> bool {
        domains
            .iter()
            .all(|d| has_listed_tld(d, &self.legitimate_tlds))
    }

    fn traffic_rank(&mut self, domains: &DomainSet) -> i64 {
        if self.any_well_known(domains) {
            WELL_KNOWN_TRAFFIC_RANK
        } else {
            self.draw(TRAFFIC_RANK_RANGE)
        }
    }

    fn age_in_months(&mut self, domains: &DomainSet) -> i64 {
        if self.any_well_known(domains) {
            self.draw(WELL_KNOWN_AGE_MONTHS)
        } else {
            self.draw(UNKNOWN_AGE_MONTHS)
        }
    }

    fn years_to_expiry(&mut self, _domains: &DomainSet) -> i64 {
        self.draw(EXPIRY_YEARS)
    }
}
