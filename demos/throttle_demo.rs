// Copyright (c) 2025 - Cowboy AI, Inc.
//! Throttle and Delay Demonstration
//!
//! Simulates a burst of "save" requests from an editor. The throttled save
//! runs once on the leading edge and once more on the trailing edge with the
//! latest document, while a delayed notice fires after the burst settles.
//!
//! ```text
//! requests: ●  ●  ●  ●  ●
//!           0  20 40 60 80ms
//! saves:    ●                    ●
//!           0 (rev 1)            250ms (rev 5)
//! ```
//!
//! Run with:
//! ```bash
//! RUST_LOG=underbar=debug cargo run --example throttle_demo
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::info;

use underbar::decorators::{delay, memoize, throttle, ThrottleCall};
use underbar::scheduler::{Scheduler, SchedulerConfig, TokioClock};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("═══════════════════════════════════════════════════════");
    println!("  Throttled Save Demo");
    println!("  Demonstrates: leading + trailing throttle, delay");
    println!("═══════════════════════════════════════════════════════\n");

    let scheduler = Scheduler::with_clock(SchedulerConfig::default().with_name("editor"), TokioClock);
    let saved = Rc::new(RefCell::new(Vec::new()));

    let sink = saved.clone();
    let save = throttle(
        &scheduler,
        move |revision: u32| {
            info!(revision, "document saved");
            sink.borrow_mut().push(revision);
        },
        Duration::from_millis(250),
    );

    let mut word_count = memoize(|text: String| text.split_whitespace().count());

    for revision in 1..=5 {
        let text = "lorem ipsum ".repeat(revision as usize);
        let words = word_count.call(text)?;
        let outcome = save.call(revision)?;
        println!("  rev {} ({} words) → {:?}", revision, words, outcome);
        if outcome == ThrottleCall::Invoked {
            println!("    saved immediately");
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let tally = saved.clone();
    delay(
        &scheduler,
        move |_: ()| println!("\n  notice: {} saves written", tally.borrow().len()),
        Duration::from_millis(400),
        (),
    )?;

    let fired = scheduler.run_until_idle().await?;

    println!("\n  timers fired: {}", fired);
    println!("  saved revisions: {:?}", saved.borrow());
    Ok(())
}
