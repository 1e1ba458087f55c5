use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::{db::Store, utils};

pub const SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Background task purging expired client check-ins.
///
/// A tick waits for its delete to finish before the next one is polled, ticks
/// missed in the meantime are skipped rather than queued.
pub struct Sweeper {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl Sweeper {
    pub fn spawn(store: Store, period: Duration) -> Self {
        let (stop, stopped) = oneshot::channel();
        let task = tokio::spawn(run(store, period, stopped));
        log::info!("client sweeper running every {}s", period.as_secs_f32());
        Self { stop, task }
    }

    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        if let Err(e) = self.task.await {
            log::error!("client sweeper ended abnormally: {e}");
        }
        log::info!("client sweeper stopped");
    }
}

async fn run(store: Store, period: Duration, mut stopped: oneshot::Receiver<()>) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let _ = sweep_once(&store, utils::now()).await;
            }
            _ = &mut stopped => break,
        }
    }
}

/// Deletes every check-in that expired before `now`. Failures are logged, not raised.
pub async fn sweep_once(store: &Store, now: NaiveDateTime) -> Option<usize> {
    let store = store.clone();
    match tokio::task::spawn_blocking(move || store.delete_expired_clients(now)).await {
        Ok(Ok(deleted)) => {
            if deleted > 0 {
                log::info!("swept {deleted} expired client(s)");
            } else {
                log::debug!("no expired clients");
            }
            Some(deleted)
        }
        Ok(Err(e)) => {
            log::error!("client sweep failed: {e}");
            None
        }
        Err(e) => {
            log::error!("client sweep task failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as TimeDelta;

    #[tokio::test]
    async fn sweep_once_removes_only_expired() {
        let store = Store::in_memory().unwrap();
        let now = utils::now();
        store.create_client_check_in("10.0.0.1", "room1", now).unwrap();

        assert_eq!(sweep_once(&store, now).await, Some(0));
        assert_eq!(
            sweep_once(&store, now + TimeDelta::seconds(61)).await,
            Some(1)
        );
        assert!(store.list_latest_clients().unwrap().is_empty());
    }

    #[tokio::test]
    async fn spawned_sweeper_purges_and_stops() {
        let store = Store::in_memory().unwrap();
        let past = utils::now() - TimeDelta::seconds(120);
        store.create_client_check_in("10.0.0.1", "room1", past).unwrap();
        store
            .create_client_check_in("10.0.0.2", "room1", utils::now())
            .unwrap();

        let sweeper = Sweeper::spawn(store.clone(), Duration::from_millis(20));
        time::sleep(Duration::from_millis(200)).await;
        sweeper.shutdown().await;

        let left = store.list_latest_clients().unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].ip_address, "10.0.0.2");
    }
}
