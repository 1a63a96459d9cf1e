use std::time::Duration;

use super::DevisDiffApp;

impl DevisDiffApp {
    /// Applies every async result already waiting on the channel. Returns
    /// true when anything was dispatched.
    pub fn pump(&mut self) -> bool {
        let mut any = false;
        while let Ok(action) = self.action_rx.try_recv() {
            self.dispatch(action);
            any = true;
        }
        any
    }

    /// Awaits async results until the phase is quiet and nothing new
    /// arrives within `grace`.
    ///
    /// While a request is in flight the wait continues past `grace`; the
    /// window only bounds the trailing silence after the last result.
    pub async fn settle(&mut self, grace: Duration) {
        loop {
            let waited = tokio::time::timeout(grace, self.action_rx.recv()).await;
            match waited {
                Ok(Some(action)) => self.dispatch(action),
                Ok(None) => break,
                Err(_) => {
                    if !self.state.phase.is_busy() {
                        break;
                    }
                }
            }
        }
    }
}
