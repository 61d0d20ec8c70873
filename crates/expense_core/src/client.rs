use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use tracing::debug;
use url::Url;

use crate::errors::ExpenseError;
use crate::models::{ExpenseItem, SheetRef};

pub const DEFAULT_BASE_URL: &str = "https://www.whooweswho.net";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Newest rows first.
pub const ROW_ORDER: &str = "-ctime";

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub base_url: String,
    pub extra_headers: Vec<(String, String)>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            base_url: DEFAULT_BASE_URL.to_string(),
            extra_headers: Vec::new(),
        }
    }
}

/// Parses `Name:Value,Name:Value,...`, splitting each pair on its first colon.
pub fn parse_extra_headers(raw: &str) -> Result<Vec<(String, String)>, ExpenseError> {
    let mut headers = Vec::new();
    for segment in raw.split(',').filter(|segment| !segment.is_empty()) {
        let (name, value) = segment
            .split_once(':')
            .ok_or_else(|| ExpenseError::InvalidHeader(format!("missing ':' in \"{segment}\"")))?;
        if name.trim().is_empty() {
            return Err(ExpenseError::InvalidHeader(format!(
                "empty header name in \"{segment}\""
            )));
        }
        headers.push((name.to_string(), value.to_string()));
    }
    Ok(headers)
}

#[derive(Clone)]
pub struct WhoOwesWhoClient {
    client: Client,
    options: ClientOptions,
}

impl WhoOwesWhoClient {
    pub fn new(options: ClientOptions) -> Result<Self, ExpenseError> {
        let mut headers = HeaderMap::new();
        for (key, value) in &options.extra_headers {
            let header_name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|err| ExpenseError::InvalidHeader(format!("{key}: {err}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|err| ExpenseError::InvalidHeader(format!("{key}: {err}")))?;
            debug!(header = %header_name, "added request header");
            headers.append(header_name, header_value);
        }

        let client = Client::builder()
            .timeout(options.timeout)
            .default_headers(headers)
            .build()
            .map_err(ExpenseError::Request)?;

        Ok(Self { client, options })
    }

    pub fn rows_url(&self, sheet: &SheetRef) -> Result<Url, ExpenseError> {
        let base = Url::parse(&self.options.base_url)
            .map_err(|err| ExpenseError::Other(format!("invalid base url: {err}")))?;
        let mut url = base
            .join(&format!("api/Book/{}/Sheet/{}/Row", sheet.book, sheet.sheet))
            .map_err(|err| ExpenseError::Other(format!("invalid rows url: {err}")))?;
        url.query_pairs_mut().append_pair("order", ROW_ORDER);
        Ok(url)
    }

    pub async fn fetch_rows(&self, sheet: &SheetRef) -> Result<Vec<ExpenseItem>, ExpenseError> {
        let url = self.rows_url(sheet)?;
        debug!(book = %sheet.book, sheet = %sheet.sheet, %url, "query rows");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ExpenseError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExpenseError::Http { status });
        }
        let bytes = response.bytes().await.map_err(ExpenseError::Request)?;
        serde_json::from_slice(&bytes).map_err(|err| ExpenseError::InvalidJson(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> SheetRef {
        SheetRef {
            book: "1234".into(),
            sheet: "6789".into(),
        }
    }

    #[test]
    fn default_rows_url() {
        let client = WhoOwesWhoClient::new(ClientOptions::default()).unwrap();
        assert_eq!(
            client.rows_url(&sheet()).unwrap().as_str(),
            "https://www.whooweswho.net/api/Book/1234/Sheet/6789/Row?order=-ctime"
        );
    }

    #[test]
    fn default_timeout_is_ten_seconds() {
        assert_eq!(ClientOptions::default().timeout, Duration::from_secs(10));
    }

    #[test]
    fn headers_split_on_first_colon() {
        let headers = parse_extra_headers("Cookie:session=abc:def,X-My-Header:42").unwrap();
        assert_eq!(
            headers,
            vec![
                ("Cookie".to_string(), "session=abc:def".to_string()),
                ("X-My-Header".to_string(), "42".to_string()),
            ]
        );
    }

    #[test]
    fn empty_headers() {
        assert!(parse_extra_headers("").unwrap().is_empty());
        assert!(parse_extra_headers(",").unwrap().is_empty());
    }

    #[test]
    fn header_without_colon_is_rejected() {
        let err = parse_extra_headers("Cookie").unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidHeader(_)));
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let options = ClientOptions {
            extra_headers: vec![("Bad Name".into(), "1".into())],
            ..ClientOptions::default()
        };
        assert!(matches!(
            WhoOwesWhoClient::new(options),
            Err(ExpenseError::InvalidHeader(_))
        ));
    }
}
