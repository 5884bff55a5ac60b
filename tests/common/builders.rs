//! Test builders: ergonomic constructors for recipes, drafts and criteria.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{TimeZone, Utc};
use pantry_core::types::{
    Category, CategoryFilter, Difficulty, DifficultyFilter, FilterCriteria, Recipe, RecipeDraft, RecordId,
};

// ---------------------------------------------------------------------------
// RecipeBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Recipe`] test fixtures.
///
/// # Example
///
/// ```rust
/// let recipe = RecipeBuilder::new("7", "Green Curry")
///     .category(Category::MainCourse)
///     .rating(4.7)
///     .tag("Thai")
///     .build();
/// ```
pub struct RecipeBuilder {
    recipe: Recipe,
}

impl RecipeBuilder {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            recipe: Recipe {
                id: RecordId::from(id),
                title: title.to_string(),
                description: String::new(),
                image: String::new(),
                category: Category::MainCourse,
                difficulty: Difficulty::Medium,
                cooking_time: 30,
                servings: 4,
                ingredients: Vec::new(),
                instructions: Vec::new(),
                tags: Vec::new(),
                rating: 4.0,
                author: "Test Kitchen".to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
                is_favorite: false,
            },
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.recipe.description = description.to_string();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.recipe.category = category;
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.recipe.difficulty = difficulty;
        self
    }

    pub fn cooking_time(mut self, minutes: u32) -> Self {
        self.recipe.cooking_time = minutes;
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.recipe.rating = rating;
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.recipe.author = author.to_string();
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.recipe.tags.push(tag.to_string());
        self
    }

    pub fn ingredient(mut self, ingredient: &str) -> Self {
        self.recipe.ingredients.push(ingredient.to_string());
        self
    }

    pub fn build(self) -> Recipe {
        self.recipe
    }
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// A minimal valid draft with the given title.
pub fn draft(title: &str) -> RecipeDraft {
    RecipeDraft {
        title: title.to_string(),
        description: format!("{title}, from a test"),
        image: String::new(),
        category: Category::Dessert,
        difficulty: Difficulty::Easy,
        cooking_time: 10,
        servings: 2,
        ingredients: vec!["1 cup sugar".to_string()],
        instructions: vec!["Mix.".to_string()],
        tags: vec!["Quick".to_string()],
        rating: 0.0,
        author: "Test Kitchen".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

pub fn search(term: &str) -> FilterCriteria {
    FilterCriteria::default().with_search(term)
}

pub fn in_category(category: Category) -> FilterCriteria {
    FilterCriteria::default().with_category(CategoryFilter::Only(category))
}

pub fn at_difficulty(difficulty: Difficulty) -> FilterCriteria {
    FilterCriteria::default().with_difficulty(DifficultyFilter::Only(difficulty))
}

pub fn within(minutes: u32) -> FilterCriteria {
    FilterCriteria::default().with_max_time(minutes)
}
