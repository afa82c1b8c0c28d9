use std::time::Duration;

use futures::future::BoxFuture;
use serde::Deserialize;
use url::Url;

use crate::error::FetchError;
use crate::state::filter::BRAND_DELIMITER;
use crate::state::{FetchResult, GoodsQuery};

use super::CatalogSource;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Catalog backed by the shop's JSON API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base: Url,
    timeout: Duration,
}

/// Accepted shapes of the categories endpoint.
#[derive(Deserialize)]
#[serde(untagged)]
enum CategoriesPayload {
    Wrapped { categories: Vec<String> },
    Bare(Vec<String>),
}

impl HttpCatalog {
    /// What: Build a client for the API rooted at `api_url`.
    ///
    /// Inputs:
    /// - `api_url`: Base URL, e.g. `http://localhost:3000/api`
    /// - `timeout`: Connect and overall request bound
    ///
    /// Output:
    /// - `HttpCatalog`, or an error when the URL is unusable or the client cannot be built.
    ///
    /// # Errors
    /// - Returns `Err` when `api_url` does not parse as an absolute URL
    /// - Returns `Err` when the TLS backend fails to initialize
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let builder = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(format!("shopfront/{}", env!("CARGO_PKG_VERSION")));
        Self::with_builder(api_url, timeout, builder)
    }

    fn with_builder(
        api_url: &str,
        timeout: Duration,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self> {
        let mut base = Url::parse(api_url.trim())?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base,
            timeout,
        })
    }

    /// What: Compose the goods endpoint URL for `query`.
    ///
    /// Output:
    /// - `{api}/goods?...` with `category` only when set and price bounds only when present.
    #[must_use]
    pub fn goods_url(&self, query: &GoodsQuery) -> Url {
        let mut url = self.endpoint("goods");
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(category) = &query.category {
                pairs.append_pair("category", category);
            }
            if let Some(range) = query.price_range {
                pairs.append_pair("priceFrom", &range.from().to_string());
                pairs.append_pair("priceTo", &range.to().to_string());
            }
            if !query.brands.is_empty() {
                let mut joined = String::new();
                for (i, brand) in query.brands.iter().enumerate() {
                    if i > 0 {
                        joined.push(BRAND_DELIMITER);
                    }
                    joined.push_str(brand);
                }
                pairs.append_pair("brand", &joined);
            }
            pairs.append_pair("sort", query.sort_order.as_query_value());
            pairs.append_pair("page", &query.page.to_string());
            pairs.append_pair("limit", &query.per_page.to_string());
        }
        url
    }

    /// Categories endpoint URL.
    #[must_use]
    pub fn categories_url(&self) -> Url {
        self.endpoint("categories")
    }

    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base.clone();
        let path = format!("{}{name}", self.base.path());
        url.set_path(&path);
        url
    }
}

/// What: Decode a goods response body.
///
/// Output:
/// - `FetchResult`, or `FetchError::Malformed` describing the JSON problem.
pub fn parse_goods(body: &str) -> std::result::Result<FetchResult, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))
}

/// What: Decode a categories response body.
///
/// Details:
/// - Accepts `{"categories": [...]}` as well as a bare array.
pub fn parse_categories(body: &str) -> std::result::Result<Vec<String>, FetchError> {
    match serde_json::from_str(body) {
        Ok(CategoriesPayload::Wrapped { categories } | CategoriesPayload::Bare(categories)) => {
            Ok(categories)
        }
        Err(e) => Err(FetchError::Malformed(e.to_string())),
    }
}

async fn get_text(
    client: reqwest::Client,
    url: Url,
    limit: Duration,
) -> std::result::Result<String, FetchError> {
    tracing::debug!(url = %url, "catalog request");
    let classify = |err: reqwest::Error| FetchError::from_reqwest(err, limit);
    let response = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(classify)?;
    response.text().await.map_err(classify)
}

impl CatalogSource for HttpCatalog {
    fn fetch_goods(
        &self,
        query: GoodsQuery,
    ) -> BoxFuture<'static, std::result::Result<FetchResult, FetchError>> {
        let client = self.client.clone();
        let url = self.goods_url(&query);
        let limit = self.timeout;
        Box::pin(async move {
            let body = get_text(client, url, limit).await?;
            parse_goods(&body)
        })
    }

    fn fetch_categories(&self) -> BoxFuture<'static, std::result::Result<Vec<String>, FetchError>> {
        let client = self.client.clone();
        let url = self.categories_url();
        let limit = self.timeout;
        Box::pin(async move {
            let body = get_text(client, url, limit).await?;
            parse_categories(&body)
        })
    }

    fn describe(&self) -> String {
        format!("http {}", self.base)
    }
}
