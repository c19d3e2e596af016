//! Priority tags and the client-side priority filter.

use crate::model::Product;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// How badly the product is wanted.
///
/// The store keeps the opaque tags `"Alta"`, `"no tanta"` and `"poquillo"`; the
/// variants give them names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "no tanta")]
    Medium,
    #[serde(rename = "poquillo")]
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// The tag as stored remotely.
    pub fn tag(self) -> &'static str {
        match self {
            Priority::High => "Alta",
            Priority::Medium => "no tanta",
            Priority::Low => "poquillo",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A string that is not one of the three priority tags.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown priority tag: {0}")]
pub struct UnknownPriority(pub String);

impl FromStr for Priority {
    type Err = UnknownPriority;

    /// Accepts the stored tag or the variant name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Alta" | "High" => Ok(Priority::High),
            "no tanta" | "Medium" => Ok(Priority::Medium),
            "poquillo" | "Low" => Ok(Priority::Low),
            other => Err(UnknownPriority(other.to_string())),
        }
    }
}

/// Client-side predicate over an already fetched catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn matches(self, product: &Product) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => product.priority == Some(priority),
        }
    }

    /// Never touches the network: filters what was already loaded.
    pub fn apply(self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect()
    }
}

impl FromStr for PriorityFilter {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(PriorityFilter::All)
        } else {
            s.parse().map(PriorityFilter::Only)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileId, ProductId};

    fn product(id: &str, priority: Option<Priority>) -> Product {
        Product {
            id: ProductId::from(id),
            title: id.to_string(),
            product_url: String::new(),
            image_id: FileId::from("file"),
            priority,
            purchased: false,
        }
    }

    #[test]
    fn test_tags_round_trip_through_serde() {
        let json = serde_json::to_string(&Priority::Medium).unwrap();
        assert_eq!(json, "\"no tanta\"");
        let parsed: Priority = serde_json::from_str("\"poquillo\"").unwrap();
        assert_eq!(parsed, Priority::Low);
    }

    #[test]
    fn test_parse_accepts_tags_and_names() {
        assert_eq!("Alta".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(
            "urgent".parse::<Priority>(),
            Err(UnknownPriority("urgent".to_string()))
        );
    }

    #[test]
    fn test_filter_exact_match_and_all() {
        let products = vec![
            product("a", Some(Priority::High)),
            product("b", Some(Priority::Low)),
            product("c", None),
            product("d", Some(Priority::High)),
        ];

        let high = PriorityFilter::Only(Priority::High).apply(&products);
        assert_eq!(high.len(), 2);
        assert!(high.iter().all(|p| p.priority == Some(Priority::High)));

        assert_eq!(PriorityFilter::All.apply(&products), products);
        assert!(PriorityFilter::Only(Priority::Medium).apply(&products).is_empty());
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<PriorityFilter>().unwrap(), PriorityFilter::All);
        assert_eq!(
            "no tanta".parse::<PriorityFilter>().unwrap(),
            PriorityFilter::Only(Priority::Medium)
        );
        assert!("some".parse::<PriorityFilter>().is_err());
    }
}
