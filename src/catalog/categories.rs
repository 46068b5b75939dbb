//! Static category table backing the "Category" filter
use crate::models::FilterDescriptor;
use serde::Serialize;

/// A (label, path segment) pair shown in the category selector
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CategoryOption {
    pub label: &'static str,
    pub path: &'static str,
}

const fn category(label: &'static str, path: &'static str) -> CategoryOption {
    CategoryOption { label, path }
}

/// Filter name the host displays
pub const CATEGORY_FILTER_NAME: &str = "Category";

/// Index 0 is the default "all movies" listing.
pub static CATEGORIES: [CategoryOption; 21] = [
    category("Movies (All)", "categories/movies/"),
    category("English", "categories/movies/english/"),
    category("Hindi Movies", "categories/movies/hindi-movies/"),
    category("South Indian (Hindi Dub)", "categories/movies/southindianhindi-dubbed/"),
    category("Animated", "categories/movies/animated/"),
    category("Bangla Kolkata", "categories/movies/bangla-kolkata/"),
    category("Bangla BD", "categories/movies/banglabd/"),
    category("Korean", "categories/movies/korean/"),
    category("Chinese", "categories/movies/chiness-movie/"),
    category("Pakistani", "categories/movies/pakistani/"),
    category("Punjabi", "categories/movies/punjabi/"),
    category("4K", "categories/movies/4k/"),
    category("3D", "categories/movies/3d/"),
    category("Documentaries", "categories/movies/documentaried/"),
    category("TV Shows", "categories/tv-show/"),
    category("Bangla Drama", "categories/tv-show/bangla-drama/"),
    category("English Drama", "categories/tv-show/english-drama/"),
    category("Hindi Drama", "categories/tv-show/hindi-drama/"),
    category("Kids Cartoon", "categories/kids/cartoon/"),
    category("Kids Science", "categories/kids/science/"),
    category("Kids E-Book", "categories/kids/e-book/"),
];

/// Look up a selected category; absent or out-of-range falls back to index 0
pub fn category_at(index: Option<usize>) -> &'static CategoryOption {
    index
        .and_then(|i| CATEGORIES.get(i))
        .unwrap_or(&CATEGORIES[0])
}

/// The selector the host renders, labels in table order
pub fn category_filter() -> FilterDescriptor {
    FilterDescriptor::Select {
        name: CATEGORY_FILTER_NAME.to_string(),
        options: CATEGORIES.iter().map(|c| c.label.to_string()).collect(),
    }
}
