//! # Example: cancel_latest
//!
//! Demonstrates [`CancelPolicy::CancelPrevious`]: when only the latest request
//! matters (type-ahead search, live preview rendering), every new submission
//! asks the one before it to stop, then takes its place.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► submit "query" operations in rapid succession
//!   │     each new submission cancels the one before it
//!   ├─► early queries: cancelled before or during their body
//!   └─► final query: runs to completion and returns its result
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example cancel_latest
//! ```

use std::time::Duration;

use taskserial::{CancelPolicy, SerialQueue};
use tokio::time;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== cancel_latest example ===\n");

    // 1. A queue that cancels the in-flight operation on each new submission.
    let queue = SerialQueue::new(CancelPolicy::CancelPrevious);

    // 2. Simulate a user typing: each keystroke submits a fresh "search".
    let mut searches = Vec::new();
    for query in ["r", "ru", "rus", "rust"] {
        searches.push((
            query,
            queue.execute(move |ctx| async move {
                // A cooperative body: stop as soon as cancellation arrives.
                tokio::select! {
                    _ = ctx.cancelled() => Err("superseded"),
                    _ = time::sleep(Duration::from_millis(80)) => {
                        Ok(format!("results for '{query}'"))
                    }
                }
            }),
        ));
    }

    // 3. Only the last search survives; the rest were cancelled either while
    //    queued or inside their body.
    for (query, search) in searches {
        match search.await {
            Ok(results) => println!("{query:>4}: {results}"),
            Err(err) => println!("{query:>4}: {}", err.as_message()),
        }
    }

    Ok(())
}
