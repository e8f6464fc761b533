use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::fetcher::{self, FetchError, FetchOptions};
use crate::records::UserRecord;
use crate::utils;

// everything the controller tells its caller; rendering stays on the caller's
// side of the channel
#[derive(Debug)]
pub enum ControllerEvent {
    LoadingStarted,
    LoadingFinished,
    Loaded(Vec<UserRecord>),
    Cleared,
    Failed(FetchError),
}

// debounced fetch controller: owns the HTTP client, the pending debounce
// timer, and the event channel; at most one scheduled request is live at a
// time and scheduling a new one cancels the previous
pub struct FetchController {
    client: reqwest::Client,
    options: FetchOptions,
    events: mpsc::UnboundedSender<ControllerEvent>,
    pending: Option<JoinHandle<()>>,
}

impl FetchController {
    pub fn new(
        options: FetchOptions,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ControllerEvent>), FetchError> {
        let client = fetcher::build_client(&options)?;
        let (events, event_rx) = mpsc::unbounded_channel();
        Ok((
            Self {
                client,
                options,
                events,
                pending: None,
            },
            event_rx,
        ))
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    // schedules a fetch for `raw_value` after `delay`, replacing any pending
    // schedule; when the timer fires the value is parsed, clamped into the
    // supported range, and handed to the request path
    pub fn on_input_changed(&mut self, raw_value: &str, delay: Duration) {
        self.cancel_pending();

        let raw = raw_value.trim().to_string();
        let client = self.client.clone();
        let options = self.options.clone();
        let events = self.events.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match utils::parse_count_clamped(&raw) {
                Some(count) => run_request(&client, &options, count, &events).await,
                None => {
                    let _ = events.send(ControllerEvent::Failed(FetchError::InvalidCount {
                        value: raw,
                    }));
                }
            }
        }));
    }

    // immediate request with no debounce window
    pub async fn request_records(&self, count: u32) {
        run_request(&self.client, &self.options, count, &self.events).await;
    }

    pub fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for FetchController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

async fn run_request(
    client: &reqwest::Client,
    options: &FetchOptions,
    count: u32,
    events: &mpsc::UnboundedSender<ControllerEvent>,
) {
    if count == 0 {
        let _ = events.send(ControllerEvent::Cleared);
        return;
    }

    let _ = events.send(ControllerEvent::LoadingStarted);
    let result = fetcher::fetch_records(client, options, count).await;
    let _ = events.send(ControllerEvent::LoadingFinished);

    match result {
        Ok(records) => {
            let _ = events.send(ControllerEvent::Loaded(records));
        }
        Err(err) => {
            let _ = events.send(ControllerEvent::Failed(err));
        }
    }
}
