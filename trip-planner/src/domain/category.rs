//! Stop categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0:?}")]
pub struct InvalidCategory(String);

/// What kind of place a stop is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Category {
    Transit,
    Food,
    Lodging,
    Sight,
    Shopping,
    #[default]
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 6] = [
        Category::Transit,
        Category::Food,
        Category::Lodging,
        Category::Sight,
        Category::Shopping,
        Category::Other,
    ];

    /// Parse a category name, case-insensitively.
    ///
    /// Accepts the canonical names as well as the short codes found in
    /// older itinerary data (`trans`, `stay`, `spot`, `shop`).
    ///
    /// ```
    /// use trip_planner::domain::Category;
    ///
    /// assert_eq!(Category::parse("Sight").unwrap(), Category::Sight);
    /// assert_eq!(Category::parse("stay").unwrap(), Category::Lodging);
    /// assert!(Category::parse("museum").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidCategory> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transit" | "trans" => Ok(Category::Transit),
            "food" => Ok(Category::Food),
            "lodging" | "stay" => Ok(Category::Lodging),
            "sight" | "spot" => Ok(Category::Sight),
            "shopping" | "shop" => Ok(Category::Shopping),
            "other" => Ok(Category::Other),
            _ => Err(InvalidCategory(s.to_string())),
        }
    }

    /// The canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Transit => "transit",
            Category::Food => "food",
            Category::Lodging => "lodging",
            Category::Sight => "sight",
            Category::Shopping => "shopping",
            Category::Other => "other",
        }
    }
}

impl TryFrom<String> for Category {
    type Error = InvalidCategory;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
