use std::time::Duration;

use thiserror::Error;

use crate::records::{ApiResponse, UserRecord};
use crate::utils::MAX_RESULT_COUNT;

pub const DEFAULT_API_URL: &str = "https://randomuser.me/api/";

#[derive(Clone, Debug)]
pub struct FetchOptions {
    pub api_url: String,
    pub nationalities: Vec<String>,
    pub seed: Option<String>,
    pub timeout_seconds: u64,
    pub proxy: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            nationalities: Vec::new(),
            seed: None,
            timeout_seconds: 10,
            proxy: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("enter a number between 0 and 1000, got '{value}'")]
    InvalidCount { value: String },

    #[error("request timed out after {seconds}s, check your connection and try again")]
    Timeout { seconds: u64 },

    #[error("API responded with status {status}")]
    HttpStatus { status: u16 },

    #[error("network error: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode API response: {source}")]
    Decode {
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid API URL: {url}")]
    InvalidUrl { url: String },

    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to setup proxy: {proxy}: {source}")]
    ProxySetup {
        proxy: String,
        #[source]
        source: reqwest::Error,
    },
}

pub fn build_client(options: &FetchOptions) -> Result<reqwest::Client, FetchError> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!("userfetch/", env!("CARGO_PKG_VERSION"))),
    );

    let mut builder = reqwest::Client::builder()
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(proxy) = options.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
        let proxy_url = proxy.to_string();
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| FetchError::ProxySetup {
            proxy: proxy_url,
            source: e,
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| FetchError::ClientBuild { source: e })
}

pub fn build_request_url(options: &FetchOptions, count: u32) -> Result<reqwest::Url, FetchError> {
    let mut url =
        reqwest::Url::parse(&options.api_url).map_err(|_| FetchError::InvalidUrl {
            url: options.api_url.clone(),
        })?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("results", &count.to_string());
        if !options.nationalities.is_empty() {
            query.append_pair("nat", &options.nationalities.join(","));
        }
        if let Some(seed) = options.seed.as_deref().filter(|s| !s.trim().is_empty()) {
            query.append_pair("seed", seed.trim());
        }
    }
    Ok(url)
}

// issues exactly one GET for `count` records, raced against the configured
// timeout; whichever side settles first wins and the loser is dropped
pub async fn fetch_records(
    client: &reqwest::Client,
    options: &FetchOptions,
    count: u32,
) -> Result<Vec<UserRecord>, FetchError> {
    if count > MAX_RESULT_COUNT {
        return Err(FetchError::InvalidCount {
            value: count.to_string(),
        });
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    let url = build_request_url(options, count)?;
    let seconds = options.timeout_seconds.max(1);

    let response = tokio::select! {
        response = client.get(url).send() => {
            response.map_err(|e| FetchError::Network { source: e })?
        }
        _ = tokio::time::sleep(Duration::from_secs(seconds)) => {
            return Err(FetchError::Timeout { seconds });
        }
    };

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
        });
    }

    let body: ApiResponse = response.json().await.map_err(|e| {
        if e.is_decode() {
            FetchError::Decode { source: e }
        } else {
            FetchError::Network { source: e }
        }
    })?;

    Ok(body.results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_count_short_circuits_without_touching_the_network() {
        // an unparseable URL would fail the request path, so success here
        // proves no request was attempted
        let options = FetchOptions {
            api_url: "not a url".to_string(),
            ..Default::default()
        };
        let client = build_client(&options).unwrap();
        let records = fetch_records(&client, &options, 0).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn over_range_count_is_rejected_before_any_request() {
        let options = FetchOptions {
            api_url: "not a url".to_string(),
            ..Default::default()
        };
        let client = build_client(&options).unwrap();
        let err = fetch_records(&client, &options, 1001).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidCount { .. }));
    }

    #[test]
    fn request_url_carries_count_nat_and_seed() {
        let options = FetchOptions {
            nationalities: vec!["US".to_string(), "GB".to_string()],
            seed: Some("abc".to_string()),
            ..Default::default()
        };
        let url = build_request_url(&options, 50).unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("results=50"));
        assert!(query.contains("nat=US%2CGB"));
        assert!(query.contains("seed=abc"));
    }

    #[test]
    fn request_url_omits_empty_filters() {
        let options = FetchOptions::default();
        let url = build_request_url(&options, 5).unwrap();
        assert_eq!(url.query().unwrap(), "results=5");
    }

    #[test]
    fn bad_proxy_is_a_setup_error() {
        let options = FetchOptions {
            proxy: Some("::::".to_string()),
            ..Default::default()
        };
        let err = build_client(&options).unwrap_err();
        assert!(matches!(err, FetchError::ProxySetup { .. }));
    }
}
