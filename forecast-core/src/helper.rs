use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    config::Config,
    model::{ForecastData, ForecastRequest},
    notification::Notification,
    provider::ForecastProvider,
};

/// Backend half of the forecast widget: consumes `GET_REQUEST` notifications
/// and answers each with a `DATA_RESPONSE` carrying the provider's JSON.
///
/// Every failure kind (validation, network, HTTP status, parse) is logged
/// and produces no outbound event; the widget treats silence as a miss and
/// retries on its own schedule.
#[derive(Debug)]
pub struct ForecastHelper {
    provider: Arc<dyn ForecastProvider>,
    config: Config,
    outbound: mpsc::Sender<Notification>,
}

impl ForecastHelper {
    pub fn new(
        provider: Arc<dyn ForecastProvider>,
        config: Config,
        outbound: mpsc::Sender<Notification>,
    ) -> Self {
        Self {
            provider,
            config,
            outbound,
        }
    }

    /// Consume inbound notifications until the channel closes. Each request
    /// runs in its own task, so slow fetches do not delay later requests.
    pub async fn run(self, mut inbound: mpsc::Receiver<Notification>) {
        info!("forecast helper started");
        while let Some(notification) = inbound.recv().await {
            match notification {
                Notification::GetRequest(request) => self.spawn_fetch(request),
                // The front-end never sends data back in; ignore.
                Notification::DataResponse(_) => {}
            }
        }
        debug!("inbound channel closed, helper stopping");
    }

    fn spawn_fetch(&self, mut request: ForecastRequest) {
        self.config.fill_defaults(&mut request);
        debug!(request_id = %request.request_id, "forecast request received");

        let provider = Arc::clone(&self.provider);
        let outbound = self.outbound.clone();
        tokio::spawn(async move {
            let request_id = request.request_id.clone();
            match provider.fetch(&request).await {
                Ok(body) => {
                    let data = ForecastData::new(request_id, body);
                    if outbound
                        .send(Notification::DataResponse(data))
                        .await
                        .is_err()
                    {
                        debug!("outbound channel closed, dropping forecast data");
                    }
                }
                Err(err) => error!(request_id = %request_id, "forecast fetch failed: {err}"),
            }
        });
    }
}
