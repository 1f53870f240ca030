use std::collections::HashSet;
use std::sync::Arc;

use pinhole_core::{ShortCode, Shortener, ShortenerError};
use pinhole_generator::{ClockGenerator, ClockSettings, Generator, RandomGenerator, RandomSettings};
use pinhole_shortener::ShortenerService;
use pinhole_storage::InMemoryRepository;

const TASKS: usize = 100;
const PER_TASK: usize = 100;

fn url_for(task: usize, n: usize) -> String {
    format!("https://example.com/{task}/{n}?q=\u{e9}")
}

/// Runs 100 tasks each creating 100 mappings and checks the result.
async fn hammer<G: Generator>(service: Arc<ShortenerService<InMemoryRepository, G>>) {
    let mut handles = Vec::with_capacity(TASKS);
    for task in 0..TASKS {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let mut created = Vec::with_capacity(PER_TASK);
            for n in 0..PER_TASK {
                let url = url_for(task, n);
                let code = service.create(&url).await.unwrap();
                created.push((code, url));
            }
            created
        }));
    }

    let mut all = Vec::with_capacity(TASKS * PER_TASK);
    for handle in handles {
        all.extend(handle.await.unwrap());
    }

    let distinct: HashSet<&ShortCode> = all.iter().map(|(code, _)| code).collect();
    assert_eq!(distinct.len(), TASKS * PER_TASK);
    assert_eq!(service.repository().len(), TASKS * PER_TASK);

    for (code, url) in &all {
        assert_eq!(&service.resolve(code).await.unwrap(), url);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_creates_with_random_codes() {
    let generator = RandomGenerator::new(RandomSettings::default()).unwrap();
    let service = ShortenerService::new(InMemoryRepository::with_capacity(TASKS * PER_TASK), generator);
    hammer(Arc::new(service)).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_creates_with_clock_codes() {
    let generator = ClockGenerator::new(ClockSettings::default()).unwrap();
    let service = ShortenerService::new(InMemoryRepository::new(), generator);
    hammer(Arc::new(service)).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn tiny_keyspace_never_hands_out_a_code_twice() {
    // 9 codes in total; racing creates must claim each at most once
    let settings = RandomSettings::builder().length(2).alphabet("abc").build();
    let generator = RandomGenerator::seeded(settings, 11).unwrap();
    let service = Arc::new(
        ShortenerService::new(InMemoryRepository::new(), generator).with_max_attempts(500),
    );

    let mut handles = vec![];
    for i in 0..20 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.create(&format!("https://example.com/{i}")).await
        }));
    }

    let mut codes = HashSet::new();
    let mut exhausted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(code) => assert!(codes.insert(code), "code handed out twice"),
            Err(ShortenerError::GenerationExhausted { attempts: 500 }) => exhausted += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(codes.len(), service.repository().len());
    assert_eq!(codes.len() + exhausted, 20);
    assert!(codes.len() <= 9);
}

#[tokio::test]
async fn earlier_mappings_survive_later_creates() {
    let generator = RandomGenerator::seeded(RandomSettings::default(), 99).unwrap();
    let service = ShortenerService::new(InMemoryRepository::new(), generator);

    let code = service.create("https://example.com/a").await.unwrap();
    for i in 0..1_000 {
        service
            .create(&format!("https://example.com/{i}"))
            .await
            .unwrap();
        assert_eq!(
            service.resolve(&code).await.unwrap(),
            "https://example.com/a"
        );
    }
}

#[tokio::test]
async fn never_created_codes_are_not_found() {
    let generator = RandomGenerator::seeded(RandomSettings::default(), 5).unwrap();
    let service = ShortenerService::new(InMemoryRepository::new(), generator);
    for i in 0..100 {
        service
            .create(&format!("https://example.com/{i}"))
            .await
            .unwrap();
    }

    // 12 characters never come out of a 6-character generator
    for probe in ["doesnotexist", "Xk9pQ2Xk9pQ2", "------------"] {
        let err = service
            .resolve(&ShortCode::new(probe).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err, ShortenerError::NotFound(probe.to_string()));
    }
}
