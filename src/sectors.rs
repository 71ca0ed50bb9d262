// =============================================================================
// Sector Universe — the fixed, ordered set of scored entities
// =============================================================================
//
// The order here is the tie-break order for ranking.  It is configuration,
// never inferred from whatever data happens to be present in a snapshot.

/// GICS sector names paired with their SPDR ETF tickers, in ranking order.
pub const SECTOR_ETFS: [(&str, &str); 11] = [
    ("Information Technology", "XLK"),
    ("Financials", "XLF"),
    ("Energy", "XLE"),
    ("Health Care", "XLV"),
    ("Consumer Discretionary", "XLY"),
    ("Consumer Staples", "XLP"),
    ("Industrials", "XLI"),
    ("Materials", "XLB"),
    ("Utilities", "XLU"),
    ("Real Estate", "XLRE"),
    ("Communication Services", "XLC"),
];

/// Ticker of the market benchmark used for relative strength.
pub const MARKET_BENCHMARK: &str = "SPY";

/// Macro series key of the long-term rate used for rate sensitivity.
pub const TREASURY_10Y: &str = "treasury_10y";

/// Ordered sector names.
pub fn sector_names() -> impl Iterator<Item = &'static str> {
    SECTOR_ETFS.iter().map(|(name, _)| *name)
}

/// Resolve a sector name case-insensitively to its canonical spelling.
pub fn canonical_sector(name: &str) -> Option<&'static str> {
    sector_names().find(|s| s.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn universe_has_eleven_unique_sectors() {
        let names: Vec<_> = sector_names().collect();
        assert_eq!(names.len(), 11);
        let mut dedup = names.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(dedup.len(), 11);
        assert_eq!(names[0], "Information Technology");
    }

    #[test]
    fn canonical_lookup_ignores_case() {
        assert_eq!(canonical_sector("health care"), Some("Health Care"));
        assert_eq!(canonical_sector(" ENERGY "), Some("Energy"));
        assert_eq!(canonical_sector("Crypto"), None);
    }
}
