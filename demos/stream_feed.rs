//! # Example: stream_feed
//!
//! Demonstrates composing the queue with a lazy async source: items are pulled
//! from a [`futures::stream::unfold`] generator and each one is executed
//! serially, so the handling of item N+1 never overlaps the handling of item N
//! even if the consumer loop races ahead.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► build an unfold stream producing pages 0..4
//!   ├─► for each page: submit a handler to the queue (don't await yet)
//!   └─► await all outcomes; handlers ran one at a time, in pull order
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example stream_feed
//! ```

use std::time::Duration;

use futures::{stream, StreamExt};
use taskserial::SerialQueue;
use tokio::time;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    println!("=== stream_feed example ===\n");

    let queue = SerialQueue::default();

    // 1. A lazy source: each pull "fetches" the next page until exhausted.
    let mut pages = Box::pin(stream::unfold(0u32, |page| async move {
        if page < 4 {
            time::sleep(Duration::from_millis(5)).await;
            Some((page, page + 1))
        } else {
            None
        }
    }));

    // 2. Drain the source, submitting a serialized handler per item. The
    //    submissions happen as fast as the stream yields; execution stays
    //    strictly one at a time.
    let mut outcomes = Vec::new();
    while let Some(page) = pages.next().await {
        outcomes.push(queue.execute(move |_ctx| async move {
            time::sleep(Duration::from_millis(10)).await;
            Ok::<_, std::convert::Infallible>(format!("page {page} processed"))
        }));
    }

    // 3. Collect the results in submission order.
    for outcome in futures::future::join_all(outcomes).await {
        println!("{}", outcome?);
    }

    Ok(())
}
