//! App Router

use salvo::Router;

use crate::{auth, carts};

/// Cart routes; every one of them requires a bearer token.
pub(crate) fn app_router() -> Router {
    Router::with_path("cart")
        .hoop(auth::middleware::handler)
        .post(carts::add::handler)
        .get(carts::get::handler)
        .push(
            Router::with_path("item/{item}")
                .patch(carts::items::update::handler)
                .delete(carts::items::delete::handler),
        )
}

#[cfg(test)]
mod tests {
    use hamper_app::auth::MockAuthService;
    use salvo::{
        http::{StatusCode, header::AUTHORIZATION},
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::{errors::ErrorResponse, test_helpers::service_with_auth};

    use super::*;

    #[tokio::test]
    async fn cart_routes_require_a_token() -> TestResult {
        let service = || {
            let mut auth = MockAuthService::new();

            auth.expect_authenticate_bearer().never();

            service_with_auth(auth, app_router())
        };

        for mut res in [
            TestClient::get("http://example.com/cart").send(&service()).await,
            TestClient::post("http://example.com/cart").send(&service()).await,
            TestClient::patch("http://example.com/cart/item/abc")
                .send(&service())
                .await,
            TestClient::delete("http://example.com/cart/item/abc")
                .send(&service())
                .await,
        ] {
            let body: ErrorResponse = res.take_json().await?;

            assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
            assert!(!body.success);
        }

        Ok(())
    }

    #[tokio::test]
    async fn invalid_token_stops_before_the_handler() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(hamper_app::auth::AuthServiceError::NotFound));

        let mut res = TestClient::get("http://example.com/cart")
            .add_header(AUTHORIZATION, "Bearer hp_v1_nope", true)
            .send(&service_with_auth(auth, app_router()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.message, "Invalid API token");

        Ok(())
    }
}
