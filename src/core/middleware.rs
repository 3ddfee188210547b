use std::sync::Arc;

use http::Extensions;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use reqwest::{header, Request, Response};
use reqwest_middleware::{Middleware, Next};
use tokio::sync::OnceCell;
use yup_oauth2::authenticator::Authenticator;
use yup_oauth2::{ServiceAccountAuthenticator, ServiceAccountKey};

const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

type BearerAuthenticator = Authenticator<HttpsConnector<HttpConnector>>;

/// Request decoration for the two ways the Drive API accepts read
/// credentials: a public API key in the query string, or a service-account
/// bearer token.
#[derive(Clone)]
pub struct AuthMiddleware {
    mode: AuthMode,
}

#[derive(Clone)]
enum AuthMode {
    ApiKey(String),
    ServiceAccount {
        key: ServiceAccountKey,
        authenticator: Arc<OnceCell<BearerAuthenticator>>,
    },
}

impl AuthMiddleware {
    pub fn api_key(key: impl Into<String>) -> Self {
        Self {
            mode: AuthMode::ApiKey(key.into()),
        }
    }

    pub fn service_account(key: ServiceAccountKey) -> Self {
        Self {
            mode: AuthMode::ServiceAccount {
                key,
                authenticator: Arc::new(OnceCell::new()),
            },
        }
    }

    async fn bearer_token(
        key: &ServiceAccountKey,
        authenticator: &OnceCell<BearerAuthenticator>,
    ) -> Result<String, anyhow::Error> {
        let auth = authenticator
            .get_or_try_init(|| async {
                ServiceAccountAuthenticator::builder(key.clone())
                    .build()
                    .await
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
            })
            .await?;

        let token = auth.token(&[DRIVE_READONLY_SCOPE]).await?;

        Ok(token
            .token()
            .ok_or_else(|| anyhow::anyhow!("No token found"))?
            .to_string())
    }
}

#[async_trait::async_trait]
impl Middleware for AuthMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        match &self.mode {
            AuthMode::ApiKey(key) => {
                req.url_mut().query_pairs_mut().append_pair("key", key);
            }
            AuthMode::ServiceAccount { key, authenticator } => {
                let token = Self::bearer_token(key, authenticator).await.map_err(|e| {
                    reqwest_middleware::Error::Middleware(anyhow::anyhow!(
                        "Failed to get auth token: {}",
                        e
                    ))
                })?;

                let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| reqwest_middleware::Error::Middleware(e.into()))?;
                req.headers_mut().insert(header::AUTHORIZATION, value);
            }
        }

        next.run(req, extensions).await
    }
}
