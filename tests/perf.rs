use mdxedit::file_history::{DEFAULT_MAX_ENTRIES, FileHistory, FileHistoryRecord};
use mdxedit::history_filter::HistoryFilter;
use std::time::Instant;

/// Measures execution time of a function in nanoseconds
fn measure_time<F, R>(iterations: usize, mut f: F) -> u128
where
    F: FnMut() -> R,
{
    let start = Instant::now();
    for _ in 0..iterations {
        std::hint::black_box(f());
    }
    start.elapsed().as_nanos() / iterations as u128
}

/// A full history of realistic documentation paths.
fn full_history() -> FileHistory {
    let mut history = FileHistory::with_clock(DEFAULT_MAX_ENTRIES, || 1_700_000_000_000);
    let records = (0..DEFAULT_MAX_ENTRIES)
        .map(|i| {
            FileHistoryRecord::new(
                format!("/home/writer/projects/site/docs/section-{}/chapter-{}.mdx", i % 7, i),
                1_700_000_000_000 + i as i64,
            )
        })
        .collect();
    history.restore(records);
    history
}

#[test]
fn perf_history_filter_full_history() {
    let history = full_history();
    let mut filter = HistoryFilter::new();
    filter.set_query("Chapter-4");

    let iterations = 10000;
    let avg_time_max = 200_000;

    let avg_time = measure_time(iterations, || filter.entries(history.records()).len());

    println!("history filter (100 records): {} ns/iteration", avg_time);

    assert!(
        avg_time < avg_time_max,
        "history filter is too slow: {} ns (max allowed: {} ns)",
        avg_time,
        avg_time_max
    );
}

#[test]
fn perf_history_add_existing_path() {
    let mut history = full_history();
    let paths: Vec<String> = history.records().iter().map(|r| r.path.clone()).collect();

    let iterations = 10000;
    let avg_time_max = 50_000;

    let mut i = 0;
    let avg_time = measure_time(iterations, || {
        i = (i + 1) % paths.len();
        history.add(&paths[i])
    });

    println!("history add (existing, 100 records): {} ns/iteration", avg_time);

    assert!(
        avg_time < avg_time_max,
        "history add is too slow: {} ns (max allowed: {} ns)",
        avg_time,
        avg_time_max
    );
    assert_eq!(history.len(), DEFAULT_MAX_ENTRIES);
}
