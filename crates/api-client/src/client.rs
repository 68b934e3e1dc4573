//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{BrandsApi, CategoriesApi, ProductsApi};
use crate::error::{ApiError, ApiResult, ErrorPolicy};
use crate::middleware::{Failure, Interceptor, NormalizeFailures, PassThrough, RequestContext};
use crate::models::EntityKind;
use crate::response::{Envelope, RequestBody};
use crate::store::CatalogStore;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Client for the admin-panel backend
///
/// Every request goes to `base_url + path` with JSON default headers and runs
/// through the interceptor chain. The client shares a [`CatalogStore`] that
/// `save_result` and `fetch_into_store` write into.
#[derive(Clone)]
pub struct AdminClient {
    inner: Client,
    config: Arc<ClientConfig>,
    store: Arc<CatalogStore>,
    interceptors: Arc<Vec<Arc<dyn Interceptor>>>,
}

impl std::fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminClient")
            .field("config", &self.config)
            .field("interceptors", &self.interceptors.len())
            .finish_non_exhaustive()
    }
}

impl AdminClient {
    /// Create a new client from environment configuration, sharing the global store
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration, sharing the global store
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        Self::with_store(config, CatalogStore::global())
    }

    /// Create a new client that writes into `store`
    pub fn with_store(config: ClientConfig, store: Arc<CatalogStore>) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("adminpanel-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        let mut builder = Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder.build().map_err(ApiError::Request)?;

        let interceptors: Vec<Arc<dyn Interceptor>> =
            vec![Arc::new(PassThrough), Arc::new(NormalizeFailures)];

        Ok(Self {
            inner,
            config: Arc::new(config),
            store,
            interceptors: Arc::new(interceptors),
        })
    }

    /// Append an interceptor to the chain
    #[must_use]
    pub fn with_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        Arc::make_mut(&mut self.interceptors).push(Arc::new(interceptor));
        self
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Store this client saves results into
    #[must_use]
    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access brand endpoints
    #[must_use]
    pub fn brands(&self) -> BrandsApi {
        BrandsApi::new(self.clone())
    }

    /// Access category endpoints
    #[must_use]
    pub fn categories(&self) -> CategoriesApi {
        CategoriesApi::new(self.clone())
    }

    /// Access product endpoints
    #[must_use]
    pub fn products(&self) -> ProductsApi {
        ProductsApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // HTTP verbs
    // -------------------------------------------------------------------------

    /// GET `path` and decode the body, unwrapping a top-level `data` member.
    ///
    /// Failures always come back as [`ApiError::RequestFailed`] with the
    /// normalized message.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let envelope = self
            .dispatch(Method::GET, path, None)
            .await
            .map_err(ApiError::normalize)?;

        if !envelope.is_success() {
            return Err(envelope.into_error().normalize());
        }

        Ok(serde_json::from_value(envelope.into_data())?)
    }

    /// GET `path` and return the full envelope without unwrapping.
    ///
    /// Under [`ErrorPolicy::Legacy`] non-2xx responses are returned as-is.
    #[instrument(skip(self))]
    pub async fn get_origin(&self, path: &str) -> ApiResult<Envelope> {
        let envelope = self
            .dispatch(Method::GET, path, None)
            .await
            .map_err(|e| self.translate(e))?;
        self.envelope_result(envelope)
    }

    /// POST a JSON or multipart body and decode the response body
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: impl Into<RequestBody>,
    ) -> ApiResult<T> {
        let envelope = self
            .dispatch(Method::POST, path, Some(body.into()))
            .await
            .map_err(|e| self.translate(e))?;
        self.decode_body(envelope)
    }

    /// PATCH `path` with a JSON body and decode the response body
    #[instrument(skip(self, body))]
    pub async fn update<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = RequestBody::json(body)?;
        let envelope = self
            .dispatch(Method::PATCH, path, Some(body))
            .await
            .map_err(|e| self.translate(e))?;
        self.decode_body(envelope)
    }

    /// DELETE `path` and return the full envelope
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> ApiResult<Envelope> {
        let envelope = self
            .dispatch(Method::DELETE, path, None)
            .await
            .map_err(|e| self.translate(e))?;
        self.envelope_result(envelope)
    }

    // -------------------------------------------------------------------------
    // Store integration
    // -------------------------------------------------------------------------

    /// Replace the store slot for `kind` with `payload`, kept exactly as given
    pub fn save_result(&self, kind: EntityKind, payload: Value) {
        self.store.set_from_value(kind, payload);
    }

    /// Route `payload` by tag; returns `false` and changes nothing for an unknown tag
    pub fn save_result_tag(&self, tag: &str, payload: Value) -> bool {
        match tag.parse::<EntityKind>() {
            Ok(kind) => {
                self.save_result(kind, payload);
                true
            }
            Err(_) => {
                debug!(tag, "No store slot for tag, ignoring result");
                false
            }
        }
    }

    /// GET the collection for `kind` and store it unless a newer fetch already landed.
    ///
    /// Returns whether the store accepted the result.
    #[instrument(skip(self))]
    pub async fn fetch_into_store(&self, kind: EntityKind) -> ApiResult<bool> {
        let ticket = self.store.begin_fetch(kind);
        let payload: Value = self.get(kind.tag()).await?;
        Ok(self.store.apply_value(ticket, payload))
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Send one request through the interceptor chain.
    ///
    /// Any HTTP response, 2xx or not, comes back as `Ok`; only transport
    /// failures are `Err`.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> ApiResult<Envelope> {
        let url = self.config.url_for(path);
        let request_id = Uuid::new_v4().to_string();
        let ctx = RequestContext {
            request_id: &request_id,
            method: &method,
            url: &url,
        };

        let mut request = self
            .inner
            .request(method.clone(), &url)
            .header(X_REQUEST_ID, &request_id);

        request = match body {
            Some(RequestBody::Json(value)) => request.json(&value),
            Some(RequestBody::Multipart(form)) => request.multipart(form),
            None => request,
        };

        for interceptor in self.interceptors.iter() {
            request = interceptor.on_request(&ctx, request);
        }

        debug!(request_id = %request_id, method = %method, url = %url, "Sending request");
        let start = Instant::now();

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.transport_failure(&ctx, e)),
        };

        // the body can still break off after the headers arrived
        let envelope = match Envelope::read(response).await {
            Ok(envelope) => envelope,
            Err(ApiError::Request(e)) => return Err(self.transport_failure(&ctx, e)),
            Err(e) => return Err(e),
        };
        let elapsed = start.elapsed();

        if envelope.is_success() {
            debug!(
                request_id = %request_id,
                status = envelope.status.as_u16(),
                elapsed_ms = elapsed.as_millis(),
                "Request succeeded"
            );
            for interceptor in self.interceptors.iter() {
                interceptor.on_response(&ctx, &envelope);
            }
        } else {
            warn!(
                request_id = %request_id,
                status = envelope.status.as_u16(),
                elapsed_ms = elapsed.as_millis(),
                "Request returned error status"
            );
            let failure = Failure::Status(&envelope);
            for interceptor in self.interceptors.iter() {
                interceptor.on_failure(&ctx, &failure);
            }
        }

        Ok(envelope)
    }

    fn transport_failure(&self, ctx: &RequestContext<'_>, error: reqwest::Error) -> ApiError {
        warn!(request_id = %ctx.request_id, url = %ctx.url, error = %error, "Transport failure");
        let failure = Failure::Transport(&error);
        for interceptor in self.interceptors.iter() {
            interceptor.on_failure(ctx, &failure);
        }
        ApiError::Request(error)
    }

    /// Apply the configured policy to a failure from a non-`get` verb
    fn translate(&self, error: ApiError) -> ApiError {
        match self.config.error_policy {
            ErrorPolicy::Normalized => error.normalize(),
            ErrorPolicy::Legacy => error,
        }
    }

    fn envelope_result(&self, envelope: Envelope) -> ApiResult<Envelope> {
        if envelope.is_success() || !self.config.error_policy.normalizes_all() {
            Ok(envelope)
        } else {
            Err(envelope.into_error().normalize())
        }
    }

    fn decode_body<T: DeserializeOwned>(&self, envelope: Envelope) -> ApiResult<T> {
        if !envelope.is_success() {
            return Err(self.translate(envelope.into_error()));
        }
        Ok(serde_json::from_value(envelope.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> AdminClient {
        let config = ClientConfig::default().with_base_url("http://localhost:3000");
        AdminClient::with_store(config, Arc::new(CatalogStore::new())).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.interceptors.len(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ClientConfig::default().with_base_url("localhost:3000");
        assert!(AdminClient::with_config(config).is_err());
    }

    #[test]
    fn test_with_interceptor_appends() {
        let base = client();
        let extended = base.clone().with_interceptor(PassThrough);
        assert_eq!(extended.interceptors.len(), 3);
        assert_eq!(base.interceptors.len(), 2);
    }

    #[test]
    fn test_save_result_identity() {
        let client = client();
        let payload = json!([{"brand_id": 1, "brand_name": "Nike"}]);
        client.save_result(EntityKind::Brand, payload.clone());
        assert_eq!(*client.store().raw(EntityKind::Brand), payload);

        let short = json!([{"id": 1, "name": "Nike"}]);
        client.save_result(EntityKind::Brand, short.clone());
        assert_eq!(*client.store().raw(EntityKind::Brand), short);
    }

    #[test]
    fn test_save_result_unknown_tag_is_noop() {
        let client = client();
        let saved =
            client.save_result_tag("unknown-tag", json!([{"brand_id": 1, "brand_name": "Nike"}]));

        assert!(!saved);
        assert_eq!(client.store().revision(), 0);
        assert!(client.store().brand_list().is_empty());
    }

    #[test]
    fn test_save_result_tag_routes() {
        let client = client();
        let payload = json!([{"category_id": 4, "category_name": "Shoes"}]);
        assert!(client.save_result_tag("category", payload));
        assert_eq!(client.store().category_list()[0].name, "Shoes");
    }
}
