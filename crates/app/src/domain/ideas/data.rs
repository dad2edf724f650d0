//! Idea Data

use crate::{
    domain::ideas::records::IdeaRecord,
    validation::{FieldErrors, all_unique},
};

const MAX_PAGE: u32 = 10_000_000;
const MAX_PAGE_SIZE: u32 = 100;

/// New Idea Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdea {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

pub(crate) fn validate_idea(
    title: &str,
    description: &str,
    category: &str,
    tags: &[String],
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    errors.check(!title.is_empty(), "title", "must be provided");
    errors.check(
        title.len() <= 500,
        "title",
        "must not be more than 500 bytes long",
    );

    errors.check(!description.is_empty(), "description", "must be provided");
    errors.check(
        description.len() <= 10_000,
        "description",
        "must not be more than 10000 bytes long",
    );

    errors.check(!category.is_empty(), "category", "must be provided");
    errors.check(
        category.len() <= 100,
        "category",
        "must not be more than 100 bytes long",
    );

    errors.check(!tags.is_empty(), "tags", "must contain at least 1 tag");
    errors.check(tags.len() <= 5, "tags", "must not contain more than 5 tags");
    errors.check(
        tags.iter().all(|tag| !tag.is_empty()),
        "tags",
        "must not contain empty tags",
    );
    errors.check(all_unique(tags), "tags", "must not contain duplicate values");

    errors.into_result()
}

/// Column an idea listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Title,
    Category,
}

/// Validated listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdeaSort {
    pub field: SortField,
    pub descending: bool,
}

impl IdeaSort {
    /// Parse `created_at`, `title`, or `category`, optionally prefixed with `-`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let (descending, column) = match value.strip_prefix('-') {
            Some(column) => (true, column),
            None => (false, value),
        };

        let field = match column {
            "created_at" => SortField::CreatedAt,
            "title" => SortField::Title,
            "category" => SortField::Category,
            _ => return None,
        };

        Some(Self { field, descending })
    }

    pub(crate) fn order_by(self) -> &'static str {
        match (self.field, self.descending) {
            (SortField::CreatedAt, false) => "created_at ASC",
            (SortField::CreatedAt, true) => "created_at DESC",
            (SortField::Title, false) => "title ASC",
            (SortField::Title, true) => "title DESC",
            (SortField::Category, false) => "category ASC",
            (SortField::Category, true) => "category DESC",
        }
    }
}

/// Listing request as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaFilters {
    /// Words that must all appear in the title; empty matches everything.
    pub title: String,

    /// Exact category, ignoring case; empty matches everything.
    pub category: String,

    /// Tags the idea must carry; empty matches everything.
    pub tags: Vec<String>,

    pub page: u32,
    pub page_size: u32,
    pub sort: String,
}

impl Default for IdeaFilters {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: String::new(),
            tags: Vec::new(),
            page: 1,
            page_size: 20,
            sort: "created_at".to_string(),
        }
    }
}

/// A validated listing query handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaQuery {
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub sort: IdeaSort,
    pub limit: u32,
    pub offset: u64,
}

impl IdeaFilters {
    pub(crate) fn into_query(self) -> Result<IdeaQuery, FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.check(self.page > 0, "page", "must be greater than zero");
        errors.check(
            self.page <= MAX_PAGE,
            "page",
            "must be a maximum of 10 million",
        );
        errors.check(self.page_size > 0, "page_size", "must be greater than zero");
        errors.check(
            self.page_size <= MAX_PAGE_SIZE,
            "page_size",
            "must be a maximum of 100",
        );

        let sort = IdeaSort::parse(&self.sort);

        errors.check(sort.is_some(), "sort", "invalid sort value");

        match sort {
            Some(sort) if errors.is_empty() => Ok(IdeaQuery {
                title: self.title,
                category: self.category,
                tags: self.tags,
                sort,
                limit: self.page_size,
                offset: u64::from(self.page - 1) * u64::from(self.page_size),
            }),
            _ => Err(errors),
        }
    }
}

/// Paging summary for a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub current_page: u32,
    pub page_size: u32,
    pub first_page: u32,
    pub last_page: u64,
    pub total_records: u64,
}

impl PageMetadata {
    /// All zeroes when nothing matched.
    #[must_use]
    pub fn calculate(total_records: u64, page: u32, page_size: u32) -> Self {
        if total_records == 0 || page_size == 0 {
            return Self::default();
        }

        Self {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: total_records.div_ceil(u64::from(page_size)),
            total_records,
        }
    }
}

/// One page of ideas.
#[derive(Debug, Clone, PartialEq)]
pub struct IdeasPage {
    pub ideas: Vec<IdeaRecord>,
    pub metadata: PageMetadata,
}
