//! Test helpers.

use std::{
    io,
    sync::{Arc, Mutex},
};

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use tracing::{Level, subscriber::DefaultGuard};
use tracing_subscriber::fmt::MakeWriter;
use uuid::Uuid;

use hamper_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            data::Quantity,
            models::CartLine,
            records::{CartItemUuid, CartRecord, CartUuid},
        },
        catalog::records::{ProductRecord, ProductUuid, VariantRecord, VariantUuid},
        users::UserUuid,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_add_item().never();
    carts.expect_get_cart().never();
    carts.expect_update_item().never();
    carts.expect_remove_item().never();

    carts
}

fn state_with(carts: MockCartsService, auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        carts: Arc::new(carts),
        auth: Arc::new(auth),
    })
}

pub(crate) fn service_with_auth(auth: MockAuthService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(strict_carts_mock(), auth)))
            .push(route),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(carts, strict_auth_mock())))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn make_cart_record(total_price: u64) -> CartRecord {
    CartRecord {
        uuid: CartUuid::new(),
        user_uuid: TEST_USER_UUID,
        total_price,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_line(price: u64, quantity: u32) -> CartLine {
    let product_uuid = ProductUuid::new();

    CartLine {
        item_uuid: CartItemUuid::new(),
        quantity: Quantity::new(u64::from(quantity)).expect("test quantity should be positive"),
        product: ProductRecord {
            uuid: product_uuid,
            name: "Tea Towel".to_string(),
            description: Some("Linen".to_string()),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        },
        images: vec!["https://cdn.example.com/towel.jpg".to_string()],
        variant: VariantRecord {
            uuid: VariantUuid::new(),
            product_uuid,
            name: "Blue".to_string(),
            sku: Some("TT-BLUE".to_string()),
            price,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        },
    }
}

/// Captures formatted log output for the current thread.
#[derive(Clone, Default)]
pub(crate) struct LogSink(Arc<Mutex<Vec<u8>>>);

pub(crate) struct LogSinkWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = LogSinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogSinkWriter(Arc::clone(&self.0))
    }
}

impl io::Write for LogSinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_poisoned| io::Error::other("log sink lock poisoned"))?;

        guard.extend_from_slice(buf);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogSink {
    /// Route `INFO` and above into this sink until the guard drops.
    pub(crate) fn install(&self) -> DefaultGuard {
        tracing::subscriber::set_default(
            tracing_subscriber::fmt()
                .with_writer(self.clone())
                .with_ansi(false)
                .with_max_level(Level::INFO)
                .finish(),
        )
    }

    pub(crate) fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log sink lock").clone();

        String::from_utf8_lossy(&bytes).into_owned()
    }
}
