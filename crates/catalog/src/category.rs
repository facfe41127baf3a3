//! Product categories.
//!
//! The source material modeled specializations as subclasses; here each
//! specialization is a variant carrying its extra display fields inline.

use core::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Electronics,
    Clothing { size: String },
    Food,
    Hygiene,
    VideoGame { platform: String, genre: String },
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Clothing { .. } => "clothing",
            Category::Food => "food",
            Category::Hygiene => "hygiene",
            Category::VideoGame { .. } => "video game",
        }
    }

    /// Append the category-specific display lines, if any.
    pub(crate) fn describe_into(&self, out: &mut String) {
        match self {
            Category::Clothing { size } => {
                let _ = write!(out, "\nSize: {size}.");
            }
            Category::VideoGame { platform, genre } => {
                let _ = write!(out, "\nPlatform: {platform}.\nGenre: {genre}.");
            }
            Category::Electronics | Category::Food | Category::Hygiene => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clothing_appends_size() {
        let mut out = String::new();
        Category::Clothing {
            size: "M".to_string(),
        }
        .describe_into(&mut out);
        assert_eq!(out, "\nSize: M.");
    }

    #[test]
    fn video_game_appends_platform_and_genre() {
        let mut out = String::new();
        Category::VideoGame {
            platform: "Switch".to_string(),
            genre: "platformer".to_string(),
        }
        .describe_into(&mut out);
        assert_eq!(out, "\nPlatform: Switch.\nGenre: platformer.");
    }

    #[test]
    fn plain_categories_append_nothing() {
        for category in [Category::Electronics, Category::Food, Category::Hygiene] {
            let mut out = String::new();
            category.describe_into(&mut out);
            assert!(out.is_empty());
        }
    }
}
