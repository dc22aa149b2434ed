use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;

use crate::fetch::FetchError;

/// Something that can return the raw TLE text for a catalog number.
pub trait TleSource {
    fn fetch_tle_text(&self, norad_id: u32)
        -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Plain-text GP queries against CelesTrak.
#[derive(Debug, Clone)]
pub struct CelestrakClient {
    http: reqwest::Client,
    url_template: String,
}

impl CelestrakClient {
    /// `url_template` must contain a `{catnr}` placeholder.
    pub fn new(url_template: String, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url_template })
    }

    pub fn url_for(&self, norad_id: u32) -> String {
        self.url_template.replace("{catnr}", &norad_id.to_string())
    }
}

impl TleSource for CelestrakClient {
    async fn fetch_tle_text(&self, norad_id: u32) -> Result<String, FetchError> {
        let url = self.url_for(norad_id);
        log::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                norad_id,
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
