//! Identity middleware.
//!
//! Requests without a user header continue anonymously; the services answer
//! them with an authentication error. Headers that are present but malformed
//! are rejected here.

use std::sync::Arc;

use salvo::prelude::*;
use storefront_app::identity::{Identity, UserUuid};
use uuid::Uuid;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let headers = match depot.obtain::<Arc<State>>() {
        Ok(state) => state.identity_headers.clone(),
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    match extract_identity(req, &headers.user, &headers.admin) {
        Ok(Some(identity)) => depot.insert_identity(identity),
        Ok(None) => {}
        Err(brief) => {
            res.render(StatusError::unauthorized().brief(brief));

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

fn header_str<'a>(req: &'a Request, name: &str) -> Result<Option<&'a str>, &'static str> {
    req.headers()
        .get(name)
        .map(|value| value.to_str().map(str::trim))
        .transpose()
        .map_err(|_ignored| "Identity header is not valid text")
}

fn extract_identity(
    req: &Request,
    user_header: &str,
    admin_header: &str,
) -> Result<Option<Identity>, &'static str> {
    let Some(user) = header_str(req, user_header)? else {
        return Ok(None);
    };

    let user = Uuid::parse_str(user).map_err(|_ignored| "Invalid user identity header")?;

    let is_admin = match header_str(req, admin_header)? {
        None => false,
        Some(flag) if flag.eq_ignore_ascii_case("true") || flag == "1" => true,
        Some(flag) if flag.eq_ignore_ascii_case("false") || flag == "0" => false,
        Some(_) => return Err("Invalid administrator identity header"),
    };

    Ok(Some(Identity {
        user: UserUuid::from_uuid(user),
        is_admin,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, strict_state};

    use super::*;

    #[salvo::handler]
    async fn echo_identity(depot: &mut Depot, res: &mut Response) {
        let identity = depot.identity().map_or_else(
            || "anonymous".to_string(),
            |identity| format!("{}:{}", identity.user, identity.is_admin),
        );

        res.render(identity);
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .hoop(salvo::affix_state::inject(strict_state()))
                .hoop(handler)
                .push(Router::new().get(echo_identity)),
        )
    }

    #[tokio::test]
    async fn test_missing_user_header_continues_anonymously() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "anonymous");

        Ok(())
    }

    #[tokio::test]
    async fn test_user_header_injects_customer_identity() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .add_header("x-user-uuid", TEST_USER_UUID.to_string(), true)
            .send(&make_service())
            .await;

        assert_eq!(res.take_string().await?, format!("{TEST_USER_UUID}:false"));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_header_grants_admin_capability() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .add_header("x-user-uuid", TEST_USER_UUID.to_string(), true)
            .add_header("x-user-admin", "true", true)
            .send(&make_service())
            .await;

        assert_eq!(res.take_string().await?, format!("{TEST_USER_UUID}:true"));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_user_header_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com")
            .add_header("x-user-uuid", "not-a-uuid", true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_admin_header_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com")
            .add_header("x-user-uuid", TEST_USER_UUID.to_string(), true)
            .add_header("x-user-admin", "sometimes", true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
