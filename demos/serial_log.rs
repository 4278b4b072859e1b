//! # Example: serial_log
//!
//! Demonstrates the core ordering guarantee: operations submitted in rapid
//! succession run one at a time, in submission order, even though each one
//! suspends mid-body.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► submit four operations, each: push(id) → sleep → push(id)
//!   ├─► await all outcomes concurrently
//!   └─► print the log: four adjacent id pairs, in submission order
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example serial_log
//! cargo run --example serial_log --features logging
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use taskserial::SerialQueue;
use tokio::time;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== serial_log example ===\n");

    // 1. Create a queue with the default WaitOnPrevious policy.
    let queue = SerialQueue::default();

    // 2. Optional: print lifecycle events (requires "logging" feature).
    let stop = CancellationToken::new();
    #[cfg(feature = "logging")]
    let listener = {
        use taskserial::{LogWriter, Subscribe, SubscriberSet};
        let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];
        Some(SubscriberSet::new(subs).listen(queue.bus(), stop.clone()))
    };
    #[cfg(not(feature = "logging"))]
    let listener: Option<tokio::task::JoinHandle<()>> = None;

    // 3. Submit four operations back to back. Each one suspends mid-body,
    //    which would interleave them badly without the queue.
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut outcomes = Vec::new();
    for (id, delay_ms) in [(1u32, 40u64), (2, 20), (3, 10), (4, 5)] {
        let log = Arc::clone(&log);
        outcomes.push(queue.execute(move |_ctx| async move {
            log.lock().unwrap().push(id);
            time::sleep(Duration::from_millis(delay_ms)).await;
            log.lock().unwrap().push(id);
            Ok::<_, std::convert::Infallible>(id)
        }));
    }

    // 4. Await all outcomes; each call gets its own action's value.
    for outcome in futures::future::join_all(outcomes).await {
        println!("finished op {}", outcome?);
    }

    println!("\nexecution log: {:?}", *log.lock().unwrap());

    // 5. Shut the listener down (if any).
    stop.cancel();
    if let Some(listener) = listener {
        let _ = listener.await;
    }

    Ok(())
}
