// Products endpoint

use tracing::debug;

use crate::demo::client::DemoClient;
use crate::demo::models::ProductResponse;
use crate::error::Error;

impl DemoClient {
    /// List the full product catalog.
    ///
    /// `GET {products}`. The shape already matches the domain product
    /// except for the optional `rating` sub-object.
    pub async fn list_products(&self) -> Result<Vec<ProductResponse>, Error> {
        let url = &self.endpoints().products;
        debug!("listing products");
        self.get_list(url).await
    }
}
