//! Integration tests for the review service.
//!
//! These tests drive the service end to end over the in-memory store and
//! book client, checking the externally visible guarantees of each
//! operation.

use chrono::{Duration, Utc};
use domain::{
    BookId, CreateReview, DomainError, InMemoryBookClient, ListReviews, ReviewCounts,
    ReviewService, ValidationError,
};
use review_store::{InMemoryReviewStore, NewReview, ReviewStore};

type Service = ReviewService<InMemoryReviewStore, InMemoryBookClient>;

/// Helper to create a service that knows books 1 to 3
fn create_service() -> (Service, InMemoryBookClient) {
    let books = InMemoryBookClient::with_books((1..=3).map(BookId::new));
    let service = ReviewService::new(InMemoryReviewStore::new(), books.clone());
    (service, books)
}

fn validation_message(err: DomainError) -> String {
    match err {
        DomainError::Validation(v) => v.message().to_string(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

mod create {
    use super::*;

    #[tokio::test]
    async fn valid_review_is_stored_and_returned() {
        let (service, books) = create_service();
        let before = Utc::now();

        let dto = service
            .create(CreateReview::new(BookId::new(1), 4, "ok text"))
            .await
            .unwrap();

        assert_eq!(dto.rating_value, 4);
        assert_eq!(dto.text, "ok text");
        assert_eq!(dto.book_id, BookId::new(1));
        assert!(dto.created_at >= before);
        assert_eq!(books.call_count(), 1);

        let stored = service.store().get(dto.id).await.unwrap().unwrap();
        assert_eq!(stored.rating_value, 4);
        assert_eq!(stored.text, "ok text");
        assert_eq!(stored.book_id, BookId::new(1));
    }

    #[tokio::test]
    async fn each_valid_rating_is_accepted() {
        let (service, _) = create_service();

        for rating in 1..=5 {
            let dto = service
                .create(CreateReview::new(BookId::new(2), rating, "fair enough"))
                .await
                .unwrap();
            assert_eq!(i64::from(dto.rating_value), rating);
        }
        assert_eq!(service.store().review_count().await, 5);
    }

    #[tokio::test]
    async fn rating_outside_range_is_rejected() {
        let (service, _) = create_service();

        for rating in [-10, 0, 6, 100] {
            let err = service
                .create(CreateReview::new(BookId::new(1), rating, "some review text"))
                .await
                .unwrap_err();
            assert_eq!(
                validation_message(err),
                "review rating value should be between 1 and 5!"
            );
        }
        assert_eq!(service.store().review_count().await, 0);
    }

    #[tokio::test]
    async fn short_text_is_rejected_even_with_bad_rating() {
        let (service, _) = create_service();

        let err = service
            .create(CreateReview::new(BookId::new(1), 6, "f"))
            .await
            .unwrap_err();
        assert_eq!(
            validation_message(err),
            "review text should have at least 3 symbols!"
        );
    }

    #[tokio::test]
    async fn unknown_book_is_rejected() {
        let (service, _) = create_service();

        let err = service
            .create(CreateReview::new(BookId::new(404), 3, "some review text"))
            .await
            .unwrap_err();
        assert_eq!(validation_message(err), "no book with such id exists!");
    }

    #[tokio::test]
    async fn book_added_later_becomes_reviewable() {
        let (service, books) = create_service();
        books.add_book(BookId::new(10)).await;

        let dto = service
            .create(CreateReview::new(BookId::new(10), 5, "new release"))
            .await
            .unwrap();
        assert_eq!(dto.book_id, BookId::new(10));
    }

    #[tokio::test]
    async fn book_service_outage_is_not_a_validation_error() {
        let (service, books) = create_service();
        books.set_unavailable(true);

        let err = service
            .create(CreateReview::new(BookId::new(1), 3, "some review text"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::BookService(_)));
        assert_eq!(service.store().review_count().await, 0);
    }

    #[tokio::test]
    async fn empty_request_reports_missing_book_id() {
        let (service, books) = create_service();

        let err = service.create(CreateReview::default()).await.unwrap_err();
        assert_eq!(validation_message(err), "review should have bookId!");
        assert_eq!(books.call_count(), 0);
    }
}

mod find_all {
    use super::*;

    async fn seed(service: &Service, book_id: i64, count: i64) {
        let base = Utc::now() - Duration::hours(1);
        for i in 0..count {
            service
                .store()
                .insert_at(
                    NewReview::new(BookId::new(book_id), 3, format!("book {book_id} #{i}")),
                    base + Duration::seconds(i),
                )
                .await;
        }
    }

    #[tokio::test]
    async fn pages_respect_size_and_from() {
        let (service, _) = create_service();
        seed(&service, 1, 12).await;
        seed(&service, 2, 3).await;

        let all = service
            .find_all(ListReviews::for_book(BookId::new(1)).with_size(100))
            .await
            .unwrap();
        assert_eq!(all.len(), 12);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert!(all.iter().all(|r| r.book_id == BookId::new(1)));

        for (size, from) in [(1, 0), (5, 3), (4, 10), (3, 12), (7, 20)] {
            let page = service
                .find_all(
                    ListReviews::for_book(BookId::new(1))
                        .with_size(size)
                        .with_from(from),
                )
                .await
                .unwrap();

            let from = from as usize;
            let expected: Vec<_> = all.iter().skip(from).take(size as usize).collect();
            assert!(page.len() <= size as usize);
            assert_eq!(page.iter().collect::<Vec<_>>(), expected);
        }
    }

    #[tokio::test]
    async fn unknown_book_gives_empty_page() {
        let (service, _) = create_service();
        seed(&service, 1, 3).await;

        let page = service
            .find_all(ListReviews::for_book(BookId::new(3)))
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn invalid_parameters_are_rejected() {
        let (service, _) = create_service();

        let err = service
            .find_all(ListReviews::default().with_size(5))
            .await
            .unwrap_err();
        assert_eq!(validation_message(err), "bookId parameter is required!");

        let err = service
            .find_all(ListReviews::for_book(BookId::new(1)).with_size(0))
            .await
            .unwrap_err();
        assert_eq!(
            validation_message(err),
            "size parameter should be positive number!"
        );

        let err = service
            .find_all(ListReviews::for_book(BookId::new(1)).with_from(-3))
            .await
            .unwrap_err();
        assert_eq!(
            validation_message(err),
            "from parameter should be greater than 0!"
        );
    }

    #[tokio::test]
    async fn repeated_queries_are_identical() {
        let (service, _) = create_service();
        seed(&service, 1, 9).await;

        let query = ListReviews::for_book(BookId::new(1)).with_size(4).with_from(2);
        let first = service.find_all(query.clone()).await.unwrap();
        let second = service.find_all(query).await.unwrap();
        assert_eq!(first, second);
    }
}

mod count_reviews {
    use super::*;

    async fn insert_many(service: &Service, book_id: i64, count: usize) {
        for _ in 0..count {
            service
                .store()
                .insert(NewReview::new(BookId::new(book_id), 4, "counted"))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn zero_fills_missing_books() {
        let (service, _) = create_service();
        insert_many(&service, 1, 5).await;
        insert_many(&service, 2, 2).await;

        let counts = service
            .count_reviews(Some((0..=3).map(BookId::new).collect()))
            .await
            .unwrap();

        let expected: ReviewCounts = [(0, 0), (1, 5), (2, 2), (3, 0)]
            .into_iter()
            .map(|(id, n)| (BookId::new(id), n))
            .collect();
        assert_eq!(counts, expected);
    }

    #[tokio::test]
    async fn only_requested_books_are_returned() {
        let (service, _) = create_service();
        insert_many(&service, 1, 2).await;
        insert_many(&service, 3, 4).await;

        let counts = service
            .count_reviews(Some(vec![BookId::new(3), BookId::new(3), BookId::new(8)]))
            .await
            .unwrap();

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&BookId::new(3)], 4);
        assert_eq!(counts[&BookId::new(8)], 0);
    }

    #[tokio::test]
    async fn input_order_does_not_matter() {
        let (service, _) = create_service();
        insert_many(&service, 1, 1).await;
        insert_many(&service, 2, 3).await;

        let forward = service
            .count_reviews(Some(vec![BookId::new(1), BookId::new(2)]))
            .await
            .unwrap();
        let backward = service
            .count_reviews(Some(vec![BookId::new(2), BookId::new(1)]))
            .await
            .unwrap();
        assert_eq!(forward, backward);
    }

    #[tokio::test]
    async fn missing_ids_are_rejected() {
        let (service, _) = create_service();

        let err = service.count_reviews(None).await.unwrap_err();
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::missing_book_ids())
        );
    }

    #[tokio::test]
    async fn counts_reflect_created_reviews() {
        let (service, _) = create_service();
        for text in ["first one", "second one", "third one"] {
            service
                .create(CreateReview::new(BookId::new(2), 3, text))
                .await
                .unwrap();
        }

        let counts = service
            .count_reviews(Some(vec![BookId::new(2)]))
            .await
            .unwrap();
        assert_eq!(counts[&BookId::new(2)], 3);
    }
}
