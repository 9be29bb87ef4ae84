use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The weight buckets a tier can be priced in, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriceBucket {
    Gram,
    Eighth,
    Quarter,
    Half,
    Ounce,
    Pound,
}

impl PriceBucket {
    pub const ALL: [PriceBucket; 6] = [
        PriceBucket::Gram,
        PriceBucket::Eighth,
        PriceBucket::Quarter,
        PriceBucket::Half,
        PriceBucket::Ounce,
        PriceBucket::Pound,
    ];

    /// Buckets that share a price line, left side first.
    pub const ROWS: [&'static [PriceBucket]; 4] = [
        &[PriceBucket::Gram, PriceBucket::Eighth],
        &[PriceBucket::Quarter, PriceBucket::Half],
        &[PriceBucket::Ounce],
        &[PriceBucket::Pound],
    ];

    /// The wire token used as a key in tier price maps.
    pub fn token(&self) -> &'static str {
        match self {
            PriceBucket::Gram => "1g",
            PriceBucket::Eighth => "3.5g",
            PriceBucket::Quarter => "7g",
            PriceBucket::Half => "14g",
            PriceBucket::Ounce => "28g",
            PriceBucket::Pound => "1lb",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        PriceBucket::ALL.into_iter().find(|b| b.token() == token.trim())
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A tier's prices keyed by weight bucket.
///
/// Unknown keys and blank prices are dropped on construction, so every
/// stored price is printable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct PriceTable {
    prices: BTreeMap<PriceBucket, String>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the price for a bucket. Blank prices clear the bucket.
    pub fn set(&mut self, bucket: PriceBucket, price: impl Into<String>) {
        let price = price.into().trim().to_string();
        if price.is_empty() {
            self.prices.remove(&bucket);
        } else {
            self.prices.insert(bucket, price);
        }
    }

    pub fn get(&self, bucket: PriceBucket) -> Option<&str> {
        self.prices.get(&bucket).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// The non-empty price rows in display order. Paired buckets with only
    /// one side present yield a single-entry row; rows with neither side
    /// are skipped.
    pub fn rows(&self) -> Vec<PriceRow<'_>> {
        PriceBucket::ROWS
            .iter()
            .filter_map(|buckets| {
                let entries: Vec<(PriceBucket, &str)> = buckets
                    .iter()
                    .filter_map(|b| self.get(*b).map(|p| (*b, p)))
                    .collect();
                (!entries.is_empty()).then_some(PriceRow { entries })
            })
            .collect()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = PriceTable::new();
        for (key, value) in iter {
            match PriceBucket::from_token(key.as_ref()) {
                Some(bucket) => table.set(bucket, value),
                None => log::debug!("Ignoring unrecognized price bucket '{}'", key.as_ref()),
            }
        }
        table
    }
}

impl From<BTreeMap<String, String>> for PriceTable {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<PriceTable> for BTreeMap<String, String> {
    fn from(table: PriceTable) -> Self {
        table
            .prices
            .into_iter()
            .map(|(b, p)| (b.token().to_string(), p))
            .collect()
    }
}

/// One printable price line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow<'a> {
    pub entries: Vec<(PriceBucket, &'a str)>,
}

impl PriceRow<'_> {
    /// Formats the row as `1g-$12 | 3.5g-$30`. A `$` is only added when
    /// the stored price does not already carry one.
    pub fn label(&self, separator: &str) -> String {
        self.entries
            .iter()
            .map(|(bucket, price)| {
                if price.starts_with('$') {
                    format!("{}-{}", bucket, price)
                } else {
                    format!("{}-${}", bucket, price)
                }
            })
            .collect::<Vec<_>>()
            .join(separator)
    }
}
