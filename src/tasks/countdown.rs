//! Countdown background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Interval whose first tick fires one full period from now
fn tick_interval() -> Interval {
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Background task that ticks the timer once per second while it runs.
///
/// The interval only exists while the timer is running; stopping, resetting
/// or expiry drops it, so no tick is ever pending for a stopped timer. Any
/// other change while running (a stop immediately followed by a start)
/// restarts the interval so the next tick is a full second away.
pub async fn countdown_task(state: Arc<AppState>) {
    info!("Starting countdown task");

    let mut timer_rx = state.subscribe_timer();

    loop {
        // Wait for the timer to be started
        if !timer_rx.borrow_and_update().is_running {
            if timer_rx.changed().await.is_err() {
                debug!("Timer channel closed, countdown task exiting");
                return;
            }
            continue;
        }

        debug!("Countdown running, scheduling ticks");
        let mut interval = tick_interval();

        loop {
            tokio::select! {
                // Timer tick - consume one second
                _ = interval.tick() => {
                    let ticked = match state.tick_timer() {
                        Ok(timer) => timer,
                        Err(e) => {
                            error!("Failed to tick timer: {}", e);
                            continue;
                        }
                    };

                    // Our own tick is published too; mark it seen
                    let latest = *timer_rx.borrow_and_update();
                    if !latest.is_running {
                        if latest.remaining_seconds == 0 {
                            info!("Countdown reached zero");
                        } else {
                            debug!("Timer stopped, cancelling scheduled ticks");
                        }
                        break;
                    }
                    if latest != ticked {
                        debug!("Timer changed during tick, restarting interval");
                        interval = tick_interval();
                    }
                }

                // State change - stop cancels, anything else restarts the interval
                changed = timer_rx.changed() => {
                    if changed.is_err() {
                        debug!("Timer channel closed, countdown task exiting");
                        return;
                    }
                    if !timer_rx.borrow_and_update().is_running {
                        debug!("Timer stopped, cancelling scheduled ticks");
                        break;
                    }
                    debug!("Timer restarted, restarting interval");
                    interval = tick_interval();
                }
            }
        }
    }
}
