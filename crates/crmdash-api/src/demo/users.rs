// Users endpoint
//
// `GET {leads}` returns a bare array of user objects. Leads are derived
// from these in `crmdash-core`.

use tracing::debug;

use crate::demo::client::DemoClient;
use crate::demo::models::UserResponse;
use crate::error::Error;

impl DemoClient {
    /// List every user from the leads endpoint.
    pub async fn list_users(&self) -> Result<Vec<UserResponse>, Error> {
        let url = &self.endpoints().leads;
        debug!("listing users");
        self.get_list(url).await
    }
}
