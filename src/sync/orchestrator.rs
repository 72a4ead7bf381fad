use crate::error::Result;
use crate::provider::{GroupQuery, ProviderClient, UserQuery};
use crate::sync::filter::{self, ProviderFilter};
use crate::sync::mode::select_mode;
use crate::sync::normalize::normalize;
use crate::sync::{EntityType, PageToken, Pagination, SyncRequest, SyncResponse};

/// Serve one platform sync call.
///
/// Every input check (timestamp, type, filters) runs before the provider is
/// contacted, so a client error never costs an outbound request. Exactly one
/// provider page is fetched. A 429 comes back as [`Error::RateLimited`] and
/// the platform is expected to replay the identical request later; the
/// cursor it holds stays valid because nothing is stored here.
///
/// [`Error::RateLimited`]: crate::Error::RateLimited
pub async fn synchronize(client: &ProviderClient, req: &SyncRequest) -> Result<SyncResponse> {
    let page = PageToken::from_cursor(req.page_cursor());
    let selection = select_mode(req.last_synchronized_at.as_deref())?;
    let entity = EntityType::parse(&req.requested_type)?;
    let provider_filter = filter::translate(entity, req.filter.as_ref())?;

    log::info!(
        "Syncing {entity} page {} ({} sync)",
        page.page(),
        selection.mode.as_str()
    );

    let token = req.account.access_token.as_str();
    let fetched = match provider_filter {
        ProviderFilter::User(user_filter) => {
            let query = UserQuery {
                active: user_filter.active,
                page: page.page(),
                modified_since: selection.modified_since.clone(),
            };
            client
                .users(&query, token)
                .await
                .map(|p| (normalize(p.items, selection.mode), p.more))
        }
        ProviderFilter::Group(_) => {
            let query = GroupQuery {
                page: page.page(),
                modified_since: selection.modified_since.clone(),
            };
            client
                .groups(&query, token)
                .await
                .map(|p| (normalize(p.items, selection.mode), p.more))
        }
    };

    let (items, more) = match fetched {
        Ok(result) => result,
        Err(e) if e.rate_limited => {
            log::warn!("Provider rate limited {entity} page {}: {e}", page.page());
            return Err(e.into());
        }
        Err(e) => {
            log::error!("Failed to fetch {entity} page {}: {e}", page.page());
            return Err(e.into());
        }
    };

    log::info!("Synced {} {entity} items (has next: {more})", items.len());

    Ok(SyncResponse {
        items,
        pagination: Pagination {
            has_next: more,
            next_page_config: page.next(),
        },
        synchronization_type: selection.mode,
    })
}
