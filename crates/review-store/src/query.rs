use crate::BookId;

/// Field a review query can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A sort key: a field and the direction to order it in.
///
/// Reviews that compare equal on the key are ordered by insertion
/// sequence in the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn newest_first() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Descending,
        }
    }

    pub fn oldest_first() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Ascending,
        }
    }
}

/// Builder for constructing review queries.
///
/// A query combines a structured filter (book equality and/or membership),
/// an optional sort key and pagination offsets. Each store translates it
/// into whatever its storage engine expects.
#[derive(Debug, Clone, Default)]
pub struct ReviewQuery {
    /// Filter by a single book.
    pub book_id: Option<BookId>,

    /// Filter by any of these books.
    pub book_ids: Option<Vec<BookId>>,

    /// Ordering of the results. Insertion order when unset.
    pub sort: Option<SortKey>,

    /// Maximum number of reviews to return.
    pub limit: Option<usize>,

    /// Number of reviews to skip.
    pub offset: Option<usize>,
}

impl ReviewQuery {
    /// Creates a new empty query matching every review.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query for the reviews of one book.
    pub fn for_book(book_id: BookId) -> Self {
        Self {
            book_id: Some(book_id),
            ..Default::default()
        }
    }

    /// Filters by book ID.
    pub fn book_id(mut self, book_id: BookId) -> Self {
        self.book_id = Some(book_id);
        self
    }

    /// Filters by a set of book IDs (any of these).
    pub fn book_ids(mut self, book_ids: Vec<BookId>) -> Self {
        self.book_ids = Some(book_ids);
        self
    }

    /// Orders results by the given key.
    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Orders results by creation time, newest first.
    pub fn newest_first(self) -> Self {
        self.sort(SortKey::newest_first())
    }

    /// Limits the number of reviews returned.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips this many reviews before returning results.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns true if a review for `book_id` passes the filter.
    pub fn matches(&self, book_id: BookId) -> bool {
        if let Some(id) = self.book_id
            && id != book_id
        {
            return false;
        }
        if let Some(ref ids) = self.book_ids
            && !ids.contains(&book_id)
        {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_for_book() {
        let query = ReviewQuery::for_book(BookId::new(3));

        assert_eq!(query.book_id, Some(BookId::new(3)));
        assert!(query.book_ids.is_none());
        assert!(query.sort.is_none());
    }

    #[test]
    fn query_builder_chain() {
        let query = ReviewQuery::new()
            .book_id(BookId::new(1))
            .newest_first()
            .limit(5)
            .offset(10);

        assert_eq!(query.book_id, Some(BookId::new(1)));
        assert_eq!(query.sort, Some(SortKey::newest_first()));
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.offset, Some(10));
    }

    #[test]
    fn matches_applies_both_filters() {
        let query = ReviewQuery::new()
            .book_id(BookId::new(1))
            .book_ids(vec![BookId::new(1), BookId::new(2)]);

        assert!(query.matches(BookId::new(1)));
        assert!(!query.matches(BookId::new(2)));
        assert!(!query.matches(BookId::new(3)));
    }

    #[test]
    fn empty_query_matches_everything() {
        let query = ReviewQuery::new();
        assert!(query.matches(BookId::new(0)));
        assert!(query.matches(BookId::new(-4)));
    }
}
