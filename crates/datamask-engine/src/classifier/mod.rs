//! Header-based column classification.
//!
//! Classification is a pure function of the header text and the fixed rule
//! table below: the first rule that matches wins. Fuzzy rules guard the two
//! highest-liability categories, plain substring rules cover the rest.

mod fuzzy;
pub mod keywords;

use serde::{Deserialize, Serialize};

pub use fuzzy::partial_ratio;

/// Fuzzy scores must be strictly above this value to match.
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 80;

/// Semantic category of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Identifier,
    Email,
    Name,
    Address,
    Phone,
    Salary,
    Age,
    PlaceOfBirth,
    Department,
    Date,
    ExpirationDate,
    Unclassified,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Email => "email",
            Self::Name => "name",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::Salary => "salary",
            Self::Age => "age",
            Self::PlaceOfBirth => "place_of_birth",
            Self::Department => "department",
            Self::Date => "date",
            Self::ExpirationDate => "expiration_date",
            Self::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule tests a normalized header.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Best [`partial_ratio`] against any keyword above the threshold.
    Fuzzy(&'static [&'static str]),
    /// Header contains one of the keywords.
    Contains(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub matcher: Matcher,
    pub category: Category,
}

/// Priority-ordered classification rules.
pub const RULES: &[Rule] = &[
    Rule {
        matcher: Matcher::Fuzzy(keywords::IDENTIFIER),
        category: Category::Identifier,
    },
    Rule {
        matcher: Matcher::Fuzzy(keywords::EMAIL),
        category: Category::Email,
    },
    Rule {
        matcher: Matcher::Contains(keywords::NAME),
        category: Category::Name,
    },
    Rule {
        matcher: Matcher::Contains(keywords::ADDRESS),
        category: Category::Address,
    },
    Rule {
        matcher: Matcher::Contains(keywords::PHONE),
        category: Category::Phone,
    },
    Rule {
        matcher: Matcher::Contains(keywords::SALARY),
        category: Category::Salary,
    },
    Rule {
        matcher: Matcher::Contains(keywords::AGE),
        category: Category::Age,
    },
    Rule {
        matcher: Matcher::Contains(keywords::PLACE_OF_BIRTH),
        category: Category::PlaceOfBirth,
    },
    Rule {
        matcher: Matcher::Contains(keywords::DEPARTMENT),
        category: Category::Department,
    },
    Rule {
        matcher: Matcher::Contains(keywords::EXPIRATION),
        category: Category::ExpirationDate,
    },
    Rule {
        matcher: Matcher::Contains(keywords::DATE),
        category: Category::Date,
    },
];

/// Outcome of classifying a header, with the evidence that decided it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub header: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

/// Classifies column headers into [`Category`] values.
#[derive(Debug, Clone, Copy)]
pub struct ColumnClassifier {
    threshold: u8,
}

impl Default for ColumnClassifier {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

impl ColumnClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn classify(&self, header: &str) -> Category {
        self.explain(header).category
    }

    pub fn explain(&self, header: &str) -> Classification {
        let normalized = normalize_header(header);

        for rule in RULES {
            if let Some((keyword, score)) = self.evaluate(rule.matcher, &normalized) {
                return Classification {
                    header: header.to_string(),
                    category: rule.category,
                    keyword: Some(keyword.to_string()),
                    score,
                };
            }
        }

        Classification {
            header: header.to_string(),
            category: Category::Unclassified,
            keyword: None,
            score: None,
        }
    }

    fn evaluate(&self, matcher: Matcher, header: &str) -> Option<(&'static str, Option<u8>)> {
        match matcher {
            Matcher::Fuzzy(keywords) => {
                let (keyword, score) = best_fuzzy_match(header, keywords)?;
                (score > self.threshold).then_some((keyword, Some(score)))
            }
            Matcher::Contains(keywords) => keywords
                .iter()
                .find(|keyword| header.contains(*keyword))
                .map(|keyword| (*keyword, None)),
        }
    }
}

/// True when the header names an expiring value (passport expiry, valid until, ...).
pub fn is_expiration_header(header: &str) -> bool {
    let normalized = normalize_header(header);
    keywords::EXPIRATION
        .iter()
        .any(|keyword| normalized.contains(keyword))
}

/// Trim and lowercase a header.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

fn best_fuzzy_match(header: &str, keywords: &'static [&'static str]) -> Option<(&'static str, u8)> {
    let mut best: Option<(&'static str, u8)> = None;
    for keyword in keywords {
        let score = partial_ratio(header, keyword);
        if best.is_none_or(|(_, current)| score > current) {
            best = Some((keyword, score));
        }
    }
    best
}
