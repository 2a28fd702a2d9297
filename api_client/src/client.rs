use reqwest::{header, Client, Method, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{
    error::{self, Error},
    model,
};

#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    const BOOKS_RESOURCE: &'static str = "livros";

    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http_client: Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_book(
        &self,
        authorization: &model::Authorization,
        id: &model::BookId,
    ) -> error::Result<model::BookInfo> {
        let uri = self.resolve_resource_uri(&[Self::BOOKS_RESOURCE, book_segment(id)?])?;
        self.request_resource(authorization, uri).await
    }

    pub async fn add_book(
        &self,
        authorization: &model::Authorization,
        info: &model::BookInfo,
    ) -> error::Result<()> {
        let uri = self.resolve_resource_uri(&[Self::BOOKS_RESOURCE])?;
        self.send_resource(Method::POST, authorization, uri, info)
            .await
    }

    pub async fn update_book(
        &self,
        authorization: &model::Authorization,
        id: &model::BookId,
        info: &model::BookInfo,
    ) -> error::Result<()> {
        let uri = self.resolve_resource_uri(&[Self::BOOKS_RESOURCE, book_segment(id)?])?;
        self.send_resource(Method::PUT, authorization, uri, info)
            .await
    }

    async fn request_resource<R>(
        &self,
        model::Authorization(token): &model::Authorization,
        uri: Url,
    ) -> error::Result<R>
    where
        R: DeserializeOwned,
    {
        let request = self
            .http_client
            .get(uri)
            .header(header::AUTHORIZATION, token);
        let response = self.execute(request).await?;
        Ok(serde_json::from_slice(&response.bytes().await?)?)
    }

    // The write endpoints answer with the stored record or nothing at all;
    // the body is not needed either way.
    async fn send_resource<R>(
        &self,
        method: Method,
        model::Authorization(token): &model::Authorization,
        uri: Url,
        resource: &R,
    ) -> error::Result<()>
    where
        R: Serialize,
    {
        let request = self
            .http_client
            .request(method, uri)
            .header(header::AUTHORIZATION, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(resource)?);
        self.execute(request).await?;
        Ok(())
    }

    async fn execute(&self, request: RequestBuilder) -> error::Result<Response> {
        let request = request.build()?;
        debug!(method = %request.method(), url = %request.url(), "sending request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(Error::Unavailable)?;
        let status = response.status();
        debug!(%status, "received response");

        if status.is_success() {
            Ok(response)
        } else {
            let payload = serde_json::from_slice(&response.bytes().await?).ok();
            Err(Error::Rejected { status, payload })
        }
    }

    // Each segment is percent-encoded on its own, so nothing in an id can
    // climb out of the resource or add a query or fragment.
    fn resolve_resource_uri(&self, segments: &[&str]) -> error::Result<Url> {
        let invalid = || Error::BaseUrl(self.base_url.clone());
        let mut uri = Url::parse(&self.base_url).map_err(|_| invalid())?;
        uri.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(uri)
    }
}

// `.` and `..` are dropped by URL path normalisation and would address
// the collection instead of a book.
fn book_segment(model::BookId(id): &model::BookId) -> error::Result<&str> {
    match id.as_str() {
        "" | "." | ".." => Err(Error::InvalidBookId(id.clone())),
        segment => Ok(segment),
    }
}
