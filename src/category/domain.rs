//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, validation::is_long_enough};

/// The color given to new categories.
pub const DEFAULT_CATEGORY_COLOR: &str = "#3b82f6";

/// A category name with at least two characters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::CategoryNameTooShort] if `name`
    /// has fewer than two characters after trimming whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if is_long_enough(name) {
            Ok(Self(name.to_owned()))
        } else {
            Err(Error::CategoryNameTooShort)
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the name has at least two characters.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A CSS hex color such as `#fff` or `#3b82f6`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Hash)]
pub struct CategoryColor(String);

impl CategoryColor {
    /// Create a category color.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidColor] unless `color` is a `#` followed by
    /// exactly three or six hexadecimal digits.
    pub fn new(color: &str) -> Result<Self, Error> {
        let color = color.trim();

        let is_valid = color.strip_prefix('#').is_some_and(|digits| {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        });

        if is_valid {
            Ok(Self(color.to_owned()))
        } else {
            Err(Error::InvalidColor(color.to_owned()))
        }
    }

    /// Create a category color without validation.
    pub fn new_unchecked(color: &str) -> Self {
        Self(color.to_owned())
    }
}

impl Default for CategoryColor {
    fn default() -> Self {
        Self(DEFAULT_CATEGORY_COLOR.to_owned())
    }
}

impl AsRef<str> for CategoryColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a category.
pub type CategoryId = i64;

/// A label for grouping transactions, e.g. "Groceries" or "Rent".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The display name.
    pub name: CategoryName,
    /// The color used for the category in badges and charts.
    pub color: CategoryColor,
    /// An optional note about what belongs in the category.
    pub description: Option<String>,
}

/// A validated category that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// The display name.
    pub name: CategoryName,
    /// The color used for the category in badges and charts.
    pub color: CategoryColor,
    /// An optional note, `None` if blank.
    pub description: Option<String>,
}

impl NewCategory {
    /// Validate the fields of a category.
    ///
    /// A blank description is stored as no description.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is too short or the color is not a hex color.
    pub fn new(name: &str, color: &str, description: Option<&str>) -> Result<Self, Error> {
        Ok(Self {
            name: CategoryName::new(name)?,
            color: CategoryColor::new(color)?,
            description: description
                .map(str::trim)
                .filter(|description| !description.is_empty())
                .map(str::to_owned),
        })
    }
}

/// Form data for category creation and editing.
///
/// Also used as the JSON body of the category API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFormData {
    pub name: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_owned()
}

impl CategoryFormData {
    /// Validate the form into a [NewCategory].
    ///
    /// # Errors
    ///
    /// Returns an error if any field is invalid.
    pub fn validate(&self) -> Result<NewCategory, Error> {
        NewCategory::new(&self.name, &self.color, self.description.as_deref())
    }
}

impl From<&Category> for CategoryFormData {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.to_string(),
            color: category.color.to_string(),
            description: category.description.clone(),
        }
    }
}
