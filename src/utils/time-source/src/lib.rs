// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Abstracts the system time source
#[async_trait::async_trait]
pub trait SystemTimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    async fn sleep(&self, duration: Duration);

    /// Current time as seconds since the Unix epoch
    fn now_epoch_seconds(&self) -> i64 {
        self.now().timestamp()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component]
#[dill::interface(dyn SystemTimeSource)]
pub struct SystemTimeSourceDefault;

#[async_trait::async_trait]
impl SystemTimeSource for SystemTimeSourceDefault {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Stub
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Manually driven clock: `now()` only moves on `set()` / `advance()`, and
/// sleepers are woken once the stub time reaches their deadline
#[derive(Debug, Clone)]
pub struct SystemTimeSourceStub {
    state: Arc<Mutex<StubState>>,
}

#[derive(Debug)]
struct StubState {
    t: DateTime<Utc>,
    sleepers: BinaryHeap<Reverse<Sleeper>>,
    next_seq: u64,
}

#[derive(Debug)]
struct Sleeper {
    wake_up_at: DateTime<Utc>,
    seq: u64,
    waker_tx: oneshot::Sender<()>,
}

impl PartialEq for Sleeper {
    fn eq(&self, other: &Self) -> bool {
        (self.wake_up_at, self.seq) == (other.wake_up_at, other.seq)
    }
}

impl Eq for Sleeper {}

impl PartialOrd for Sleeper {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sleeper {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.wake_up_at, self.seq).cmp(&(other.wake_up_at, other.seq))
    }
}

impl SystemTimeSourceStub {
    pub fn new() -> Self {
        Self::new_set(Utc::now())
    }

    pub fn new_set(t: DateTime<Utc>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StubState {
                t,
                sleepers: BinaryHeap::new(),
                next_seq: 0,
            })),
        }
    }

    pub fn set(&self, t: DateTime<Utc>) {
        let ready = {
            let mut state = self.state.lock().unwrap();

            assert!(
                state.t <= t,
                "The previous time [{}] is more than new time [{t}]",
                state.t
            );
            state.t = t;

            let mut ready = Vec::new();
            while state
                .sleepers
                .peek()
                .is_some_and(|Reverse(sleeper)| sleeper.wake_up_at <= t)
            {
                let Reverse(sleeper) = state.sleepers.pop().unwrap();
                ready.push(sleeper);
            }
            ready
        };

        for sleeper in ready {
            // The sleeping future may have been dropped already
            let _ = sleeper.waker_tx.send(());
        }
    }

    pub fn advance(&self, duration: chrono::Duration) {
        let t = self.now() + duration;
        self.set(t);
    }

    pub fn sleepers_count(&self) -> usize {
        self.state.lock().unwrap().sleepers.len()
    }
}

#[async_trait::async_trait]
impl SystemTimeSource for SystemTimeSourceStub {
    fn now(&self) -> DateTime<Utc> {
        self.state.lock().unwrap().t
    }

    async fn sleep(&self, duration: Duration) {
        let rx = {
            let mut state = self.state.lock().unwrap();

            let (tx, rx) = oneshot::channel();
            let seq = state.next_seq;
            state.next_seq += 1;
            let wake_up_at = state.t + chrono::Duration::from_std(duration).unwrap();
            state.sleepers.push(Reverse(Sleeper {
                wake_up_at,
                seq,
                waker_tx: tx,
            }));
            rx
        };

        let _ = rx.await;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
