use crate::item::BrowsableItem;
use std::fmt;
use std::str::FromStr;

pub const ALL_LABEL: &str = "All";

/// Active filter tag. `All` is the synthetic category matching every item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    All,
    Named(String),
}

impl Category {
    pub fn named(name: impl Into<String>) -> Self {
        Category::Named(name.into())
    }

    pub fn label(&self) -> &str {
        match self {
            Category::All => ALL_LABEL,
            Category::Named(name) => name,
        }
    }

    /// Whether `item` belongs to this category. Uncategorized items only
    /// match `All`.
    pub fn matches(&self, item: &BrowsableItem) -> bool {
        match self {
            Category::All => true,
            Category::Named(name) => item.category.as_deref() == Some(name.as_str()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL_LABEL) {
            Ok(Category::All)
        } else {
            Ok(Category::Named(trimmed.to_string()))
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(category) => category,
            Err(never) => match never {},
        }
    }
}

/// Narrows a source list to the active category.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    active: Category,
}

impl CategoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &Category {
        &self.active
    }

    /// Switch to `category`. Returns `false` when it was already active.
    ///
    /// Categories absent from the source are accepted and simply match
    /// nothing.
    pub fn set(&mut self, category: Category) -> bool {
        if self.active == category {
            return false;
        }
        self.active = category;
        true
    }

    /// Source indices of the matching items, in source order.
    pub fn apply(&self, items: &[BrowsableItem]) -> Vec<usize> {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.active.matches(item))
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// `All` followed by every distinct category of `items`, in first-seen order.
pub fn categories(items: &[BrowsableItem]) -> Vec<Category> {
    let mut out = vec![Category::All];
    for name in items.iter().filter_map(|item| item.category.as_deref()) {
        let category = Category::named(name);
        if !out.contains(&category) {
            out.push(category);
        }
    }
    out
}
