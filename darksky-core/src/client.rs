use chrono::Utc;
use reqwest::Client;
use serde_json::Value;

use crate::endpoint::{self, BASE_URL, Route};
use crate::error::{DecodeError, Error};
use crate::model::PrecipitationQuery;

/// Client for the Dark Sky v1 API.
///
/// Holds the developer API key and the error-suppression preference, both
/// fixed at construction. No call mutates the instance, so a client can be
/// cloned freely and shared across threads.
///
/// With `suppress_errors` enabled, transport failures are swallowed and an
/// empty body is handed to the decoder instead; decode and timestamp
/// validation failures always surface regardless.
#[derive(Debug, Clone)]
pub struct DarkSky {
    api_key: String,
    suppress_errors: bool,
    base_url: String,
    http: Client,
}

impl DarkSky {
    /// Create a client for the given developer API key. Errors are not
    /// suppressed by default.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            suppress_errors: false,
            base_url: BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Swallow transport failures instead of surfacing them; the decoder
    /// then sees an empty body and fails with a decode classification.
    pub fn suppress_errors(mut self, suppress: bool) -> Self {
        self.suppress_errors = suppress;
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, user agent).
    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Retrieve the forecast for the given latitude and longitude.
    ///
    /// Issues `GET {base}/forecast/{key}/{lat},{long}` and returns the
    /// decoded JSON document.
    pub async fn get_forecast(&self, latitude: f64, longitude: f64) -> Result<Value, Error> {
        let params = endpoint::point_params(latitude, longitude);
        self.request(Route::Forecast, Some(&params)).await
    }

    /// Retrieve the (slightly more brief) forecast for the given latitude
    /// and longitude.
    ///
    /// The service answers this from the same `/forecast` endpoint, so this
    /// is an alias of [`DarkSky::get_forecast`] kept for API parity.
    pub async fn get_brief_forecast(&self, latitude: f64, longitude: f64) -> Result<Value, Error> {
        self.get_forecast(latitude, longitude).await
    }

    /// Retrieve precipitation data for a batch of points.
    ///
    /// Entries missing a time are pinned to the current instant; every
    /// effective timestamp must lie within the accepted window (eight hours
    /// back to one hour ahead), and the first violation fails the whole
    /// batch before anything is sent. Issues
    /// `GET {base}/precipitation/{key}/{lat,long,time;…}`.
    pub async fn get_precipitation(
        &self,
        queries: &[PrecipitationQuery],
    ) -> Result<Value, Error> {
        let params = endpoint::batch_params(Utc::now(), queries)?;
        self.request(Route::Precipitation, Some(&params)).await
    }

    /// Retrieve the list of currently interesting storms.
    ///
    /// Issues `GET {base}/interesting/{key}`.
    pub async fn get_interesting_storms(&self) -> Result<Value, Error> {
        self.request(Route::Interesting, None).await
    }

    async fn request(&self, route: Route, params: Option<&str>) -> Result<Value, Error> {
        let url = format!(
            "{}{}",
            self.base_url,
            endpoint::endpoint(route, &self.api_key, params)
        );
        tracing::debug!("issuing {route} request");

        let body = match self.fetch(&url).await {
            Ok(body) => body,
            Err(err) if self.suppress_errors => {
                tracing::warn!("suppressed transport failure on {route}: {err}");
                String::new()
            }
            Err(err) => return Err(Error::Network(err)),
        };

        decode_body(&body)
    }

    /// Perform the GET as one unit: a non-success status fails the fetch
    /// the same way an unreachable host does.
    async fn fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.http.get(url).send().await?;
        response.error_for_status()?.text().await
    }
}

fn decode_body(body: &str) -> Result<Value, Error> {
    serde_json::from_str(body).map_err(|err| Error::Decode(DecodeError::classify(&err)))
}
