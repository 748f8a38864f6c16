//! Integration tests for sharing statuses across threads.
//!
//! These tests verify that:
//! - Clones of one failure can be read and dropped on many threads
//! - A worker can hand a failure to a coordinator over a channel
//! - A panicking worker is reported as a status at the join point

#![forbid(clippy::unwrap_used)]
#![forbid(clippy::expect_used)]
#![allow(clippy::arithmetic_side_effects)]

use std::sync::mpsc;
use std::thread;

use errstat_core::{ErrorCode, Status};

/// # GIVEN
/// One failed status shared by many threads
///
/// # WHEN
/// Every thread clones, reads and drops its copies
///
/// # THEN
/// The original is still intact and equal to every copy
#[test]
fn test_shared_failure_survives_concurrent_drops() {
    const THREADS: usize = 16;
    const CLONES_PER_THREAD: usize = 100;

    let status = Status::new(ErrorCode::ConnectionClosed, "socket closed by peer");

    let observed: Vec<bool> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let copy = status.clone();
                scope.spawn(move || {
                    (0..CLONES_PER_THREAD)
                        .map(|_| copy.clone())
                        .all(|c| c == copy && c.reason() == "socket closed by peer")
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(false))
            .collect()
    });

    assert!(observed.iter().all(|ok| *ok));
    assert_eq!(status.code(), ErrorCode::ConnectionClosed);
    assert_eq!(status.reason(), "socket closed by peer");
}

/// # GIVEN
/// Workers that report their outcome over a channel
///
/// # WHEN
/// Some workers fail
///
/// # THEN
/// The coordinator receives each failure with its code and reason
#[test]
fn test_worker_reports_failure_to_coordinator() {
    let (tx, rx) = mpsc::channel::<(usize, Status)>();

    let workers: Vec<_> = (0..4_usize)
        .map(|id| {
            let tx = tx.clone();
            thread::spawn(move || {
                let status = if id % 2 == 0 {
                    Status::OK
                } else {
                    Status::new(ErrorCode::Timeout, format!("worker {id} timed out"))
                };
                tx.send((id, status)).is_ok()
            })
        })
        .collect();
    drop(tx);

    for worker in workers {
        assert!(matches!(worker.join(), Ok(true)));
    }

    let mut reports: Vec<(usize, Status)> = rx.into_iter().collect();
    reports.sort_by_key(|(id, _)| *id);

    let failures: Vec<String> = reports
        .iter()
        .filter(|(_, status)| !status.is_ok())
        .map(|(_, status)| status.to_string())
        .collect();

    assert_eq!(reports.len(), 4);
    assert_eq!(
        failures,
        vec![
            "Timeout: worker 1 timed out".to_string(),
            "Timeout: worker 3 timed out".to_string(),
        ]
    );
}

/// # GIVEN
/// A worker thread that raises a StatusError
///
/// # WHEN
/// The coordinator joins it
///
/// # THEN
/// The join payload converts back to the raised status
#[test]
fn test_panicking_worker_becomes_status() {
    let handle = thread::spawn(|| {
        std::panic::panic_any(Status::new(ErrorCode::OutOfDiskSpace, "volume full").into_error())
    });

    let status = match handle.join() {
        Ok(()) => Status::OK,
        Err(payload) => Status::from_panic(payload),
    };

    assert_eq!(status, ErrorCode::OutOfDiskSpace);
    assert_eq!(status.reason(), "volume full");
}
