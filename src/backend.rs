use api_client::{
    model::{Authorization, BookId, BookInfo},
    ApiClient, Result,
};

/// Where books are read from and written to.
pub trait BookBackend {
    async fn read(&self, authorization: &Authorization, id: &BookId) -> Result<BookInfo>;

    async fn create(&self, authorization: &Authorization, info: &BookInfo) -> Result<()>;

    async fn update(
        &self,
        authorization: &Authorization,
        id: &BookId,
        info: &BookInfo,
    ) -> Result<()>;
}

impl BookBackend for ApiClient {
    async fn read(&self, authorization: &Authorization, id: &BookId) -> Result<BookInfo> {
        self.get_book(authorization, id).await
    }

    async fn create(&self, authorization: &Authorization, info: &BookInfo) -> Result<()> {
        self.add_book(authorization, info).await
    }

    async fn update(
        &self,
        authorization: &Authorization,
        id: &BookId,
        info: &BookInfo,
    ) -> Result<()> {
        self.update_book(authorization, id, info).await
    }
}
