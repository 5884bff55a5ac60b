//! Core types for pantry-core.
//!
//! This module defines the data structures shared by every layer: the
//! canonical [`Recipe`] record and its [`RecordId`], the enumerated
//! [`Category`] and [`Difficulty`], the [`FilterCriteria`] the engines
//! consume, and the [`RecipeDraft`] / [`RecipePatch`] shapes used by create
//! and update.

use crate::error::ParseError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel category selector meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All Categories";
/// Sentinel difficulty selector meaning "no difficulty filter".
pub const ALL_DIFFICULTIES: &str = "All";
/// Default inclusive upper bound on cooking time, in minutes.
pub const DEFAULT_MAX_TIME: u32 = 180;

// ---------------------------------------------------------------------------
// RecordId
// ---------------------------------------------------------------------------

/// Opaque, stable record identifier. Assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// Recipe
// ---------------------------------------------------------------------------

/// A recipe record as held by the record store.
///
/// Field names serialize in camelCase to match the wire shape. `is_favorite`
/// is a read-time projection from the favorite overlay: it is never written
/// on the wire and always defaults to `false` when a record is decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    /// Image URL, carried through untouched.
    #[serde(default)]
    pub image: String,
    pub category: Category,
    pub difficulty: Difficulty,
    /// Cooking time in minutes.
    pub cooking_time: u32,
    pub servings: u32,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Average rating in `[0, 5]`.
    pub rating: f64,
    pub author: String,
    #[serde(with = "crate::wire::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub is_favorite: bool,
}

// ---------------------------------------------------------------------------
// Category / Difficulty
// ---------------------------------------------------------------------------

/// Recipe category, one of a fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Breakfast,
    #[serde(rename = "Main Course")]
    MainCourse,
    Dessert,
    Salad,
    Appetizer,
    Soup,
    Beverage,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 7] = [
        Category::Breakfast,
        Category::MainCourse,
        Category::Dessert,
        Category::Salad,
        Category::Appetizer,
        Category::Soup,
        Category::Beverage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::MainCourse => "Main Course",
            Category::Dessert => "Dessert",
            Category::Salad => "Salad",
            Category::Appetizer => "Appetizer",
            Category::Soup => "Soup",
            Category::Beverage => "Beverage",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseError;

    /// Case-insensitive; also accepts `main-course` / `main_course`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', '_'], " ");
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ParseError::UnknownCategory(s.to_string()))
    }
}

/// Labels for a category picker: the "All Categories" sentinel followed by
/// every category in display order.
pub fn category_labels() -> Vec<&'static str> {
    std::iter::once(ALL_CATEGORIES)
        .chain(Category::ALL.iter().map(|c| c.as_str()))
        .collect()
}

/// Recipe difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownDifficulty(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Filter selectors
// ---------------------------------------------------------------------------

/// Category selector: the "All Categories" sentinel or one exact category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn admits(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(c) => f.write_str(c.as_str()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_CATEGORIES) || s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Difficulty selector: the "All" sentinel or one exact difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    pub fn admits(self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(wanted) => wanted == difficulty,
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyFilter::All => f.write_str(ALL_DIFFICULTIES),
            DifficultyFilter::Only(d) => f.write_str(d.as_str()),
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_DIFFICULTIES) {
            return Ok(DifficultyFilter::All);
        }
        s.parse().map(DifficultyFilter::Only)
    }
}

impl From<DifficultyFilter> for String {
    fn from(filter: DifficultyFilter) -> Self {
        filter.to_string()
    }
}

impl TryFrom<String> for DifficultyFilter {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// Active filter state: free-text search plus three structured selectors.
///
/// `max_time` is inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub search: String,
    pub category: CategoryFilter,
    pub difficulty: DifficultyFilter,
    pub max_time: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            difficulty: DifficultyFilter::All,
            max_time: DEFAULT_MAX_TIME,
        }
    }
}

impl FilterCriteria {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_difficulty(mut self, difficulty: DifficultyFilter) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_max_time(mut self, max_time: u32) -> Self {
        self.max_time = max_time;
        self
    }

    /// `true` when these criteria select the whole catalog: empty search,
    /// both sentinels, and `max_time` at the configured default.
    pub fn is_unfiltered(&self, default_max_time: u32) -> bool {
        self.search.is_empty()
            && self.category == CategoryFilter::All
            && self.difficulty == DifficultyFilter::All
            && self.max_time == default_max_time
    }
}

// ---------------------------------------------------------------------------
// Drafts and patches
// ---------------------------------------------------------------------------

/// A record without its identity: what a collaborator submits to create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub cooking_time: u32,
    pub servings: u32,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub rating: f64,
    pub author: String,
}

impl RecipeDraft {
    /// Attach an identity and creation time.
    pub fn into_recipe(self, id: RecordId, created_at: DateTime<Utc>) -> Recipe {
        Recipe {
            id,
            title: self.title,
            description: self.description,
            image: self.image,
            category: self.category,
            difficulty: self.difficulty,
            cooking_time: self.cooking_time,
            servings: self.servings,
            ingredients: self.ingredients,
            instructions: self.instructions,
            tags: self.tags,
            rating: self.rating,
            author: self.author,
            created_at,
            is_favorite: false,
        }
    }
}

/// A partial update. `None` fields are left untouched; identity and
/// creation time cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl RecipePatch {
    /// Merge this patch into `recipe` in place.
    pub fn apply_to(&self, recipe: &mut Recipe) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = &self.$field {
                    recipe.$field = value.clone();
                })*
            };
        }
        merge!(
            title,
            description,
            image,
            category,
            difficulty,
            cooking_time,
            servings,
            ingredients,
            instructions,
            tags,
            rating,
            author,
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Main Course", Category::MainCourse)]
    #[case("main-course", Category::MainCourse)]
    #[case("dessert", Category::Dessert)]
    fn category_parses_loosely(#[case] raw: &str, #[case] expected: Category) {
        assert_eq!(raw.parse::<Category>().unwrap(), expected);
    }

    #[test]
    fn sentinels_parse_to_all() {
        assert_eq!("All Categories".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("All".parse::<DifficultyFilter>().unwrap(), DifficultyFilter::All);
        assert!("Snacks".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn default_criteria_are_unfiltered() {
        assert!(FilterCriteria::default().is_unfiltered(DEFAULT_MAX_TIME));
        assert!(!FilterCriteria::default().with_max_time(30).is_unfiltered(DEFAULT_MAX_TIME));
    }

    #[test]
    fn criteria_serialize_with_sentinels() {
        let json = serde_json::to_value(FilterCriteria::default()).unwrap();
        assert_eq!(json["category"], "All Categories");
        assert_eq!(json["difficulty"], "All");
        assert_eq!(json["maxTime"], 180);
    }

    #[test]
    fn category_labels_lead_with_sentinel() {
        let labels = category_labels();
        assert_eq!(labels[0], ALL_CATEGORIES);
        assert_eq!(labels.len(), 8);
    }
}
