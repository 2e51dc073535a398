use std::collections::BTreeMap;
use std::fmt::Display;

use rust_decimal::Decimal;

use crate::errors::YarikuriError;

pub mod storage;

/// Number of months the ledger file retains before the oldest is dropped.
pub const MONTHS_RETAINED: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Rent,
    Gas,
    Food,
    Clothing,
    CarPayments,
    Misc,
}

impl Category {
    /// Column order of the ledger file. Every place a row is written,
    /// parsed, or summed iterates this list, never a map's own order.
    pub const ALL: [Category; 6] = [
        Category::Rent,
        Category::Gas,
        Category::Food,
        Category::Clothing,
        Category::CarPayments,
        Category::Misc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Rent => "Rent",
            Category::Gas => "Gas",
            Category::Food => "Food",
            Category::Clothing => "Clothing",
            Category::CarPayments => "Car payments",
            Category::Misc => "Misc",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A month index between 1 (January) and 12 (December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(u8);

impl Month {
    pub const JANUARY: Month = Month(1);

    pub fn new(value: u8) -> Result<Self, YarikuriError> {
        if (1..=12).contains(&value) {
            Ok(Self(value))
        } else {
            Err(YarikuriError::InvalidArgument(format!(
                "month out of range: {value}"
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// The following month, wrapping December back to January.
    pub fn next(self) -> Month {
        if self.0 == 12 {
            Month(1)
        } else {
            Month(self.0 + 1)
        }
    }

    pub fn is_december(self) -> bool {
        self.0 == 12
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One month's expenses. Categories without an entry read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthRecord {
    amounts: BTreeMap<Category, Decimal>,
}

impl MonthRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, category: Category, amount: Decimal) {
        self.amounts.insert(category, amount);
    }

    pub fn amount(&self, category: Category) -> Decimal {
        self.amounts
            .get(&category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total(&self) -> Decimal {
        Category::ALL.iter().map(|&c| self.amount(c)).sum()
    }

    /// Amounts in ledger column order.
    pub fn entries(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.amount(c)))
    }
}

/// All stored months, keyed by month index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    months: BTreeMap<Month, MonthRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first record seen for a month; later duplicates are dropped.
    pub fn insert_first(&mut self, month: Month, record: MonthRecord) {
        self.months.entry(month).or_insert(record);
    }

    pub fn get(&self, month: Month) -> Option<&MonthRecord> {
        self.months.get(&month)
    }

    /// Stored months in ascending order.
    pub fn months(&self) -> impl Iterator<Item = Month> + '_ {
        self.months.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Category-wise sum over every stored month.
    pub fn combine_all(&self) -> MonthRecord {
        let mut combined = MonthRecord::new();
        for category in Category::ALL {
            let sum = self.months.values().map(|r| r.amount(category)).sum();
            combined.set(category, sum);
        }
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(amounts: [&str; 6]) -> MonthRecord {
        let mut record = MonthRecord::new();
        for (category, raw) in Category::ALL.into_iter().zip(amounts) {
            record.set(category, raw.parse().unwrap());
        }
        record
    }

    fn month(value: u8) -> Month {
        Month::new(value).unwrap()
    }

    #[test]
    fn category_labels_follow_column_order() {
        let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec!["Rent", "Gas", "Food", "Clothing", "Car payments", "Misc"]
        );
    }

    #[test]
    fn labels_round_trip_through_from_label() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
        assert_eq!(Category::from_label("Groceries"), None);
    }

    #[test]
    fn month_rejects_out_of_range_values() {
        assert!(Month::new(0).is_err());
        assert!(Month::new(13).is_err());
        assert!(Month::new(1).is_ok());
        assert!(Month::new(12).is_ok());
    }

    #[test]
    fn month_wraps_from_december_to_january() {
        assert_eq!(month(3).next(), month(4));
        assert_eq!(month(12).next(), month(1));
        assert!(month(12).is_december());
    }

    #[test]
    fn missing_category_reads_as_zero() {
        let mut partial = MonthRecord::new();
        partial.set(Category::Rent, "800".parse().unwrap());
        assert_eq!(partial.amount(Category::Gas), Decimal::ZERO);
        assert_eq!(partial.total(), "800".parse().unwrap());
    }

    #[test]
    fn first_record_wins_for_a_duplicate_month() {
        let mut ledger = Ledger::new();
        ledger.insert_first(month(2), record(["1000", "50", "200", "0", "300", "25"]));
        ledger.insert_first(month(2), record(["900", "40", "180", "20", "280", "35"]));

        assert_eq!(ledger.len(), 1);
        let kept = ledger.get(month(2)).unwrap();
        assert_eq!(kept.amount(Category::Rent), "1000".parse().unwrap());
    }

    #[test]
    fn combine_all_on_empty_ledger_is_zero_for_every_category() {
        let combined = Ledger::new().combine_all();
        for category in Category::ALL {
            assert_eq!(combined.amount(category), Decimal::ZERO);
        }
    }

    #[test]
    fn combine_all_sums_each_category() {
        let mut ledger = Ledger::new();
        ledger.insert_first(month(1), record(["1000", "50", "200", "0", "300", "25"]));
        ledger.insert_first(month(2), record(["1000", "60", "220", "10", "300", "15"]));

        let combined = ledger.combine_all();
        assert_eq!(combined, record(["2000", "110", "420", "10", "600", "40"]));
    }

    #[test]
    fn combine_all_ignores_insertion_order() {
        let jan = record(["1000", "50", "200", "0", "300", "25"]);
        let jul = record(["950", "45", "180", "60", "300", "5"]);
        let dec = record(["1000", "80", "260", "120", "300", "95"]);

        let mut forward = Ledger::new();
        forward.insert_first(month(1), jan.clone());
        forward.insert_first(month(7), jul.clone());
        forward.insert_first(month(12), dec.clone());

        let mut backward = Ledger::new();
        backward.insert_first(month(12), dec);
        backward.insert_first(month(7), jul);
        backward.insert_first(month(1), jan);

        assert_eq!(forward.combine_all(), backward.combine_all());
    }

    #[test]
    fn months_iterate_in_ascending_order() {
        let mut ledger = Ledger::new();
        ledger.insert_first(month(9), record(["1", "2", "3", "4", "5", "6"]));
        ledger.insert_first(month(2), record(["1", "2", "3", "4", "5", "6"]));
        ledger.insert_first(month(11), record(["1", "2", "3", "4", "5", "6"]));

        let months: Vec<u8> = ledger.months().map(Month::value).collect();
        assert_eq!(months, vec![2, 9, 11]);
    }
}
