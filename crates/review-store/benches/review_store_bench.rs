use criterion::{Criterion, criterion_group, criterion_main};
use review_store::{BookId, InMemoryReviewStore, NewReview, ReviewQuery, ReviewStore};

fn seeded_store(rt: &tokio::runtime::Runtime, books: i64, per_book: usize) -> InMemoryReviewStore {
    let store = InMemoryReviewStore::new();
    rt.block_on(async {
        for book in 0..books {
            for i in 0..per_book {
                store
                    .insert(NewReview::new(
                        BookId::new(book),
                        (i % 5) as i32 + 1,
                        "benchmark review text",
                    ))
                    .await
                    .unwrap();
            }
        }
    });
    store
}

fn bench_insert(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryReviewStore::new();

    c.bench_function("review_store/insert", |b| {
        b.iter(|| {
            rt.block_on(async {
                store
                    .insert(NewReview::new(BookId::new(1), 4, "benchmark review text"))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_find_page(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store(&rt, 20, 100);

    c.bench_function("review_store/find_newest_page", |b| {
        b.iter(|| {
            rt.block_on(async {
                let page = store
                    .find(
                        ReviewQuery::for_book(BookId::new(7))
                            .newest_first()
                            .offset(10)
                            .limit(5),
                    )
                    .await
                    .unwrap();
                assert_eq!(page.len(), 5);
            });
        });
    });
}

fn bench_count_by_book(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = seeded_store(&rt, 20, 100);
    let ids: Vec<BookId> = (0..40).map(BookId::new).collect();

    c.bench_function("review_store/count_by_book_40_ids", |b| {
        b.iter(|| {
            rt.block_on(async {
                let counts = store.count_by_book(&ids).await.unwrap();
                assert_eq!(counts.len(), 20);
            });
        });
    });
}

criterion_group!(benches, bench_insert, bench_find_page, bench_count_by_book);
criterion_main!(benches);
