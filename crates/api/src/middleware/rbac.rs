//! Role-based access control (RBAC) extractors.
//!
//! [`Authorized<G>`] wraps [`AuthUser`] and evaluates the access gate for
//! the `(resource, operation)` pair named by the guard type `G`, so a
//! handler cannot run unless the caller's role is allowed. Authentication
//! failures reject with 401, role failures with 403.

use std::marker::PhantomData;

use agora_core::error::CoreError;
use agora_core::policy::{decide, Decision, Operation, ResourceKind};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Description of 403 responses.
pub const ACCESS_DENIED: &str = "Access Denied.";

/// A `(resource, operation)` pair checked by [`Authorized`].
pub trait Guard {
    const RESOURCE: ResourceKind;
    const OPERATION: Operation;
}

/// An authenticated user whose role may perform `G::OPERATION` on `G::RESOURCE`.
///
/// ```ignore
/// async fn create(auth: Authorized<CategoryCreate>) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user.user_id, "allowed");
///     Ok(Json(()))
/// }
/// ```
pub struct Authorized<G> {
    pub user: AuthUser,
    _guard: PhantomData<G>,
}

impl<G: Guard> FromRequestParts<AppState> for Authorized<G> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        check(&user, G::RESOURCE, G::OPERATION)?;
        Ok(Authorized {
            user,
            _guard: PhantomData,
        })
    }
}

/// Evaluate the access gate for an authenticated user.
pub fn check(user: &AuthUser, resource: ResourceKind, op: Operation) -> Result<(), AppError> {
    match decide(resource, op, Some(&user.role)) {
        Decision::Allow => Ok(()),
        Decision::Forbidden => {
            tracing::debug!(
                user_id = user.user_id,
                role = %user.role,
                ?resource,
                ?op,
                "Access denied",
            );
            Err(AppError::Core(CoreError::Forbidden(ACCESS_DENIED.into())))
        }
        // Only reachable when a guarded route is registered for an
        // operation the resource table marks unsupported.
        Decision::Unsupported | Decision::Unauthenticated => Err(AppError::InternalError(
            format!("{op:?} on {resource:?} is routed but not permitted by the access table"),
        )),
    }
}

macro_rules! guards {
    ($($name:ident => $resource:ident::$op:ident),* $(,)?) => {
        $(
            #[doc = concat!("Guard for `", stringify!($op), "` on `", stringify!($resource), "`.")]
            pub struct $name;

            impl Guard for $name {
                const RESOURCE: ResourceKind = ResourceKind::$resource;
                const OPERATION: Operation = Operation::$op;
            }
        )*
    };
}

guards! {
    CategoryCreate => Category::Create,
    CategoryUpdate => Category::Update,
    CategoryDelete => Category::Delete,
    FederalStateCreate => FederalState::Create,
    FederalStateUpdate => FederalState::Update,
    FederalStateDelete => FederalState::Delete,
    CouncilCreate => Council::Create,
    CouncilUpdate => Council::Update,
    CouncilDelete => Council::Delete,
    ProjectCreate => Project::Create,
    ProjectUpdate => Project::Update,
    ProjectDelete => Project::Delete,
    ProblemRead => Problem::ReadItem,
    ProblemCreate => Problem::Create,
    ProblemUpdate => Problem::Update,
    ProblemDelete => Problem::Delete,
    ProposalRead => Proposal::ReadItem,
    ProposalCreate => Proposal::Create,
    ProposalUpdate => Proposal::Update,
    ProposalDelete => Proposal::Delete,
    UsedProblemRead => UsedProblem::ReadItem,
    UsedProblemCreate => UsedProblem::Create,
    UsedProblemDelete => UsedProblem::Delete,
    UserRead => User::ReadItem,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn user(role: &str) -> AuthUser {
        AuthUser {
            user_id: 1,
            role: role.to_string(),
        }
    }

    #[test]
    fn manager_may_create_categories() {
        assert!(check(&user("process_manager"), ResourceKind::Category, Operation::Create).is_ok());
    }

    #[test]
    fn plain_user_is_forbidden() {
        assert_matches!(
            check(&user("user"), ResourceKind::Category, Operation::Create),
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
    }

    #[test]
    fn unknown_role_is_forbidden() {
        assert_matches!(
            check(&user("guest"), ResourceKind::Problem, Operation::ReadItem),
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
    }

    #[test]
    fn guards_match_resource_table() {
        assert_eq!(UsedProblemDelete::RESOURCE, ResourceKind::UsedProblem);
        assert_eq!(UsedProblemDelete::OPERATION, Operation::Delete);
    }
}
