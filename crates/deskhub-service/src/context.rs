//! The viewer: the signed-in user and their resolved role.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use deskhub_cache::keys;
use deskhub_client::backend::RoleSource;
use deskhub_core::result::AppResult;
use deskhub_core::traits::CacheProvider;
use deskhub_core::traits::cache::CacheProviderExt;
use deskhub_core::types::UserId;
use deskhub_entity::user::RoleAuthority;

/// Who is using the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerContext {
    /// The signed-in user.
    pub user_id: UserId,
    /// Raw authorities as the role source reported them.
    pub authorities: Vec<String>,
    /// The first authority, when it is a recognised one.
    pub role: Option<RoleAuthority>,
}

impl ViewerContext {
    /// Creates a context; the first authority is the primary one.
    pub fn new(user_id: UserId, authorities: Vec<String>) -> Self {
        let role = RoleAuthority::primary(authorities.iter().map(String::as_str));
        Self {
            user_id,
            authorities,
            role,
        }
    }

    /// Resolves the viewer's authorities, reading through the cache.
    pub async fn resolve(
        user_id: UserId,
        source: &dyn RoleSource,
        cache: &dyn CacheProvider,
    ) -> AppResult<Self> {
        let key = keys::user_role(&user_id);
        let cached: Option<Vec<String>> = cache.get_json(&key).await.unwrap_or_else(|e| {
            warn!("Role cache read failed: {}", e);
            None
        });

        let authorities = match cached {
            Some(authorities) => authorities,
            None => {
                let authorities = source.authorities().await?;
                if let Err(e) = cache.set_json(&key, &authorities).await {
                    warn!("Role cache write failed: {}", e);
                }
                authorities
            }
        };

        let ctx = Self::new(user_id, authorities);
        debug!(user_id = %ctx.user_id, role = ?ctx.role, "Viewer resolved");
        Ok(ctx)
    }
}
