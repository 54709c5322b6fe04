//! Keyword categorizer: maps a free-text description to one category label.
//!
//! Rules are an ordered list of (category, keywords). The first rule with a
//! keyword contained in the lower-cased description wins; no match is `Other`.
//! The table is plain data so callers can extend or replace it.

use std::sync::LazyLock;

use crate::transaction::Category;

/// Canonical keyword table, in priority order
const CANONICAL_TABLE: &[(&str, &[&str])] = &[
    (
        "Food & Dining",
        &[
            "zomato", "swiggy", "dominos", "domino's", "pizza", "mcdonald", "kfc",
            "burger", "starbucks", "cafe", "coffee", "restaurant", "dining", "food",
            "eatery", "bakery", "dunzo",
        ],
    ),
    (
        "Transportation",
        &[
            "uber", "ola cabs", "olacabs", "rapido", "metro", "irctc", "railway",
            "redbus", "petrol", "diesel", "fuel", "indian oil", "hpcl", "bpcl",
            "fastag", "parking", "toll",
        ],
    ),
    (
        "Shopping",
        &[
            "amazon", "flipkart", "myntra", "ajio", "meesho", "nykaa", "bigbasket",
            "blinkit", "zepto", "dmart", "reliance retail", "decathlon", "ikea",
            "shopping",
        ],
    ),
    (
        "Utilities",
        &[
            "electricity", "power bill", "water bill", "gas bill", "indane", "airtel",
            "jio", "vodafone", "bsnl", "broadband", "recharge", "postpaid", "dth",
            "tata play",
        ],
    ),
    (
        "Entertainment",
        &[
            "netflix", "spotify", "hotstar", "prime video", "sonyliv", "zee5",
            "youtube", "bookmyshow", "pvr", "inox", "steam", "playstation", "xbox",
            "gaming", "movie",
        ],
    ),
    (
        "Banking",
        &[
            "atm-", "atm withdrawal", "atm wdl", "cash withdrawal", "interest",
            "bank charges", "service charge", "annual fee", "late fee", "loan",
            "emi payment", "credit card", "cheque", "minimum balance",
        ],
    ),
    (
        "Transfers",
        &[
            "upi", "neft", "imps", "rtgs", "transfer", "sent to", "received from",
            "paytm", "phonepe", "gpay", "google pay",
        ],
    ),
];

static DEFAULT_CATEGORIZER: LazyLock<Categorizer> = LazyLock::new(Categorizer::default);

/// One category and the keywords that select it
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    pub category: Category,
    keywords: Vec<String>,
}

impl CategoryRule {
    /// Keywords are lower-cased and trimmed; blank keywords are dropped
    /// so they cannot match every description.
    pub fn new<I, S>(category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { category, keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// `lowered` must already be lower-case
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Ordered rule table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
}

impl CategoryRules {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// The built-in table: Food & Dining, Transportation, Shopping, Utilities,
    /// Entertainment, Banking, Transfers.
    pub fn canonical() -> Self {
        let rules = CANONICAL_TABLE
            .iter()
            .map(|(label, keywords)| CategoryRule::new(Category::from_label(label), keywords.iter()))
            .collect();
        Self { rules }
    }

    /// Append a rule at the lowest priority
    pub fn push(&mut self, rule: CategoryRule) {
        self.rules.push(rule);
    }

    /// Put `first` ahead of the current rules
    pub fn prepend(self, first: CategoryRules) -> Self {
        let mut rules = first.rules;
        rules.extend(self.rules);
        Self { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Stateless categorizer over an injected rule table
#[derive(Debug, Clone, PartialEq)]
pub struct Categorizer {
    rules: CategoryRules,
}

impl Categorizer {
    pub fn new(rules: CategoryRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CategoryRules {
        &self.rules
    }

    /// Total over all inputs: empty or unmatched descriptions are `Other`.
    pub fn categorize(&self, description: &str) -> Category {
        let lowered = description.to_lowercase();
        if lowered.trim().is_empty() {
            return Category::Other;
        }
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.category.clone())
            .unwrap_or(Category::Other)
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(CategoryRules::canonical())
    }
}

/// Categorize with the canonical table
pub fn categorize(description: &str) -> Category {
    DEFAULT_CATEGORIZER.categorize(description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zomato_is_food_in_any_case() {
        for desc in ["zomato", "ZOMATO ORDER 1234", "Paid to Zomato Ltd", "upi-ZoMaTo"] {
            assert_eq!(categorize(desc), Category::FoodAndDining, "{desc}");
        }
    }

    #[test]
    fn test_unmatched_is_other() {
        assert_eq!(categorize("Grandma's birthday gift"), Category::Other);
        assert_eq!(categorize(""), Category::Other);
        assert_eq!(categorize("   "), Category::Other);
    }

    #[test]
    fn test_priority_order_wins() {
        // "upi" is a Transfers keyword but Food & Dining is checked first
        assert_eq!(categorize("UPI Payment to Swiggy"), Category::FoodAndDining);
        // "amazon" (Shopping) beats "prime video" (Entertainment)
        assert_eq!(categorize("Amazon Prime Video"), Category::Shopping);
        assert_eq!(categorize("NEFT to landlord"), Category::Transfers);
    }

    #[test]
    fn test_canonical_table_keywords() {
        assert_eq!(categorize("Dominos Pizza"), Category::FoodAndDining);
        assert_eq!(categorize("Airtel postpaid bill"), Category::Utilities);
        assert_eq!(categorize("Steam purchase"), Category::Entertainment);
        assert_eq!(categorize("Uber trip"), Category::Transportation);
        assert_eq!(categorize("ATM cash withdrawal"), Category::Banking);
    }

    #[test]
    fn test_deterministic() {
        let desc = "Flipkart Internet Pvt Ltd";
        let first = categorize(desc);
        for _ in 0..10 {
            assert_eq!(categorize(desc), first);
        }
    }

    #[test]
    fn test_injected_rules_extend_vocabulary() {
        let pets = CategoryRule::new(Category::from_label("Pets"), ["Petco", "vet clinic"]);
        let rules = CategoryRules::canonical().prepend(CategoryRules::new(vec![pets]));
        let categorizer = Categorizer::new(rules);
        assert_eq!(categorizer.categorize("PETCO STORE 12"), Category::Custom("Pets".into()));
        assert_eq!(categorizer.categorize("Zomato"), Category::FoodAndDining);
    }

    #[test]
    fn test_blank_keywords_are_ignored() {
        let rule = CategoryRule::new(Category::Shopping, ["", "  ", "Mall"]);
        assert_eq!(rule.keywords(), ["mall".to_string()]);
        let categorizer = Categorizer::new(CategoryRules::new(vec![rule]));
        assert_eq!(categorizer.categorize("anything"), Category::Other);
    }

    #[test]
    fn test_empty_table_always_other() {
        let categorizer = Categorizer::new(CategoryRules::default());
        assert_eq!(categorizer.categorize("zomato"), Category::Other);
    }
}
