//! Feed item 服务

use tracing::{info, instrument};

use crate::auth::oauth::{ApiRequest, MonzoAuth};
use crate::business::domain::FeedItem;
use crate::shared::ProviderResult;

/// 提交 feed item
#[instrument(skip(auth, item), fields(account_id = %item.account_id))]
pub async fn create_feed_item(auth: &MonzoAuth, item: &FeedItem) -> ProviderResult<()> {
    let mut request = ApiRequest::post("/feed");
    request.params = item.to_form();

    auth.make_request(request).await?;
    info!("✅ Feed item 已提交");
    Ok(())
}
