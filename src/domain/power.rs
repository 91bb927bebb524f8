use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    On,
    /// Finish the backlog, then stop.
    Off,
    /// Stop now, abandoning any page in progress.
    Interrupted,
}

/// Writer half of the printer's power flag, held by the command side.
#[derive(Debug)]
pub struct PowerSwitch {
    tx: watch::Sender<Power>,
}

impl PowerSwitch {
    /// Returns false if the printer was already off or interrupted.
    pub fn power_off(&self) -> bool {
        self.tx.send_if_modified(|power| {
            if *power == Power::On {
                *power = Power::Off;
                true
            } else {
                false
            }
        })
    }

    pub fn interrupt(&self) -> bool {
        self.tx.send_if_modified(|power| {
            if *power == Power::Interrupted {
                false
            } else {
                *power = Power::Interrupted;
                true
            }
        })
    }
}

/// Reader half, owned by the worker.
#[derive(Debug, Clone)]
pub struct PowerState {
    rx: watch::Receiver<Power>,
}

impl PowerState {
    pub fn current(&self) -> Power {
        *self.rx.borrow()
    }

    /// A dropped switch can never turn the printer off, so it counts as off.
    pub fn is_on(&self) -> bool {
        self.current() == Power::On && self.rx.has_changed().is_ok()
    }

    pub fn is_interrupted(&self) -> bool {
        self.current() == Power::Interrupted
    }

    /// Resolves once the switch is interrupted. Never resolves otherwise.
    pub async fn interrupted(&mut self) {
        let closed = self
            .rx
            .wait_for(|power| *power == Power::Interrupted)
            .await
            .map(|_| ())
            .is_err();

        if closed {
            std::future::pending::<()>().await;
        }
    }
}

pub fn power_channel() -> (PowerSwitch, PowerState) {
    let (tx, rx) = watch::channel(Power::On);
    (PowerSwitch { tx }, PowerState { rx })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn power_off_happens_once() {
        let (switch, state) = power_channel();
        assert!(state.is_on());

        assert!(switch.power_off());
        assert!(!switch.power_off());
        assert_eq!(state.current(), Power::Off);
    }

    #[test]
    fn interrupt_overrides_power_off() {
        let (switch, state) = power_channel();

        switch.power_off();
        assert!(switch.interrupt());
        assert!(!switch.power_off());
        assert!(state.is_interrupted());
    }

    #[test]
    fn dropped_switch_counts_as_off() {
        let (switch, state) = power_channel();
        drop(switch);

        assert!(!state.is_on());
    }

    #[tokio::test(start_paused = true)]
    async fn interrupted_wakes_waiter() {
        let (switch, mut state) = power_channel();

        let waiter = tokio::spawn(async move { state.interrupted().await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!waiter.is_finished());

        switch.interrupt();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }
}
