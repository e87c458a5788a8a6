//! Authorization gate
//!
//! Every ledger operation starts by turning the [`Caller`] into a
//! [`TeamScope`] with either [`Caller::require_team`] (reads) or
//! [`Caller::require_admin`] (mutations). The scope's `team_id` is the only
//! team id that ever reaches the store.

use shared::error::AppError;
use shared::models::{Profile, Role};

use crate::db::Store;
use crate::error::{ServiceResult, StoreContext};

/// Identity handed over by the identity provider (decoded bearer token)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub profile_id: String,
}

impl Identity {
    pub fn new(profile_id: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.into(),
        }
    }
}

/// Who is calling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Unauthenticated,
    Authenticated(Profile),
}

/// Proof that the caller passed the gate for one team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamScope {
    pub team_id: i64,
    pub profile_id: String,
    pub role: Role,
}

/// Look up the caller's profile. An identity without a profile row is
/// treated as unauthenticated.
pub async fn resolve_caller(
    store: &dyn Store,
    identity: Option<&Identity>,
) -> ServiceResult<Caller> {
    let Some(identity) = identity else {
        return Ok(Caller::Unauthenticated);
    };

    let profile = store
        .find_profile(&identity.profile_id)
        .await
        .during("resolve caller")?;

    Ok(match profile {
        Some(p) => Caller::Authenticated(p),
        None => {
            tracing::debug!(profile_id = %identity.profile_id, "No profile for identity");
            Caller::Unauthenticated
        }
    })
}

impl Caller {
    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Caller::Authenticated(p) => Some(p),
            Caller::Unauthenticated => None,
        }
    }

    /// Authenticated only (team not required)
    pub fn require_profile(&self) -> Result<&Profile, AppError> {
        self.profile().ok_or_else(AppError::not_authenticated)
    }

    /// Any member of a team
    pub fn require_team(&self) -> Result<TeamScope, AppError> {
        let profile = self.require_profile()?;
        scope_of(profile)
    }

    /// Admin of a team. Role is checked before team membership.
    pub fn require_admin(&self) -> Result<TeamScope, AppError> {
        let profile = self.require_profile()?;
        if !profile.role.is_admin() {
            return Err(AppError::admin_required());
        }
        scope_of(profile)
    }
}

fn scope_of(profile: &Profile) -> Result<TeamScope, AppError> {
    let team_id = profile.team_id.ok_or_else(AppError::no_team)?;
    Ok(TeamScope {
        team_id,
        profile_id: profile.id.clone(),
        role: profile.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use shared::error::ErrorCode;

    fn caller(team_id: Option<i64>, role: Role) -> Caller {
        Caller::Authenticated(Profile {
            id: "p1".into(),
            team_id,
            role,
            display_name: String::new(),
        })
    }

    #[test]
    fn test_unauthenticated_takes_precedence() {
        let c = Caller::Unauthenticated;
        assert_eq!(c.require_team().unwrap_err().code, ErrorCode::NotAuthenticated);
        assert_eq!(c.require_admin().unwrap_err().code, ErrorCode::NotAuthenticated);
    }

    #[test]
    fn test_require_team() {
        let scope = caller(Some(7), Role::Member).require_team().unwrap();
        assert_eq!(scope.team_id, 7);
        assert_eq!(scope.role, Role::Member);

        let err = caller(None, Role::Member).require_team().unwrap_err();
        assert_eq!(err.code, ErrorCode::TeamNotSelected);
    }

    #[test]
    fn test_require_admin() {
        assert_eq!(
            caller(Some(7), Role::Member).require_admin().unwrap_err().code,
            ErrorCode::AdminRequired
        );
        assert_eq!(
            caller(None, Role::Admin).require_admin().unwrap_err().code,
            ErrorCode::TeamNotSelected
        );
        assert_eq!(caller(Some(7), Role::Admin).require_admin().unwrap().team_id, 7);
    }

    #[tokio::test]
    async fn test_resolve_caller() {
        let store = MemoryStore::new();
        let profile = Profile {
            id: "known".into(),
            team_id: Some(1),
            role: Role::Admin,
            display_name: "Coach".into(),
        };
        store.put_profile(profile.clone());

        let c = resolve_caller(&store, None).await.unwrap();
        assert_eq!(c, Caller::Unauthenticated);

        let c = resolve_caller(&store, Some(&Identity::new("ghost")))
            .await
            .unwrap();
        assert_eq!(c, Caller::Unauthenticated);

        let c = resolve_caller(&store, Some(&Identity::new("known")))
            .await
            .unwrap();
        assert_eq!(c, Caller::Authenticated(profile));
    }
}
