//! Handler implementations and Flux wiring.
//!
//! `register_handlers` routes every request path to its handler,
//! downcasting the payload to the request type first.

pub mod app_handlers;
pub mod auth_handlers;
pub mod bill_handlers;
pub mod dues_handlers;
pub mod helpers;
pub mod profile_handlers;
pub mod screen_handlers;
pub mod user_handlers;

use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use stockdesk_client::{ApiClient, RetryPolicy};
use stockdesk_core::listing::DEFAULT_PAGE_SIZE;
use stockdesk_core::{
    Customer, DueRecord, Product, Purchase, Resource, Sale, Searchable, TransactionKind, User,
    Vendor,
};
use stockdesk_flux::{Flux, StateStore};
use tracing::warn;

use crate::request::bill as bill_req;
use crate::request::screen as screen_req;
use crate::request::*;
use crate::state::{CompanyBanner, StorageChanged};
use crate::storage::{read_json, KeyValueStorage, Session, COMPANY_KEY};

use self::helpers::Debouncer;

/// Tunables for the screens.
#[derive(Debug, Clone)]
pub struct Settings {
    pub page_size: usize,
    /// Quiet period before a search input is applied.
    pub search_debounce: Duration,
    pub retry: RetryPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: Duration::from_millis(300),
            retry: RetryPolicy::default(),
        }
    }
}

/// Backend context shared by all handlers.
pub struct BffContext {
    pub api: ApiClient,
    pub session: Session,
    pub settings: Settings,
    debounce: Debouncer,
}

impl BffContext {
    pub fn new(
        base_url: &str,
        storage: Arc<dyn KeyValueStorage>,
        store: Arc<StateStore>,
        settings: Settings,
    ) -> Self {
        let session = Session::new(storage, store);
        let api = ApiClient::new(base_url, Arc::new(session.token_source()))
            .with_retry(settings.retry.clone());
        Self { api, session, settings, debounce: Debouncer::default() }
    }

    pub(crate) fn debounce(&self) -> &Debouncer {
        &self.debounce
    }
}

/// Build a Flux with every handler registered.
pub fn bootstrap(
    base_url: &str,
    storage: Arc<dyn KeyValueStorage>,
    settings: Settings,
) -> (Flux, Arc<BffContext>) {
    let flux = Flux::new();
    let ctx = Arc::new(BffContext::new(base_url, storage, Arc::clone(flux.store()), settings));
    register_handlers(&flux, Arc::clone(&ctx));
    (flux, ctx)
}

/// Register `handler` for `path`, handing it an owned copy of the request.
fn route<R, F, Fut>(flux: &Flux, ctx: &Arc<BffContext>, path: &str, handler: F)
where
    R: Any + Clone + Send + Sync,
    F: Fn(Arc<BffContext>, Arc<StateStore>, R) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let ctx = Arc::clone(ctx);
    flux.on(path, move |path, payload, store: Arc<StateStore>| {
        let fut = payload
            .downcast_ref::<R>()
            .cloned()
            .map(|req| handler(Arc::clone(&ctx), store, req));
        async move {
            match fut {
                Some(fut) => fut.await,
                None => warn!(%path, "unexpected payload type, request dropped"),
            }
        }
    });
}

/// List screen: load, search, page, delete.
fn register_list<T>(flux: &Flux, ctx: &Arc<BffContext>)
where
    T: Resource + Searchable + Default,
{
    route(flux, ctx, &screen_path::<T>(screen_req::LOAD), |ctx, store, _: LoadReq| async move {
        screen_handlers::handle_load::<T>(&ctx, &store).await;
    });
    route(flux, ctx, &screen_path::<T>(screen_req::SEARCH), |ctx, store, req: SearchReq| async move {
        screen_handlers::handle_search::<T>(&req, &ctx, &store).await;
    });
    route(flux, ctx, &screen_path::<T>(screen_req::PAGE), |ctx, store, req: PageReq| async move {
        screen_handlers::handle_page::<T>(&req, &ctx, &store);
    });
    route(flux, ctx, &screen_path::<T>(screen_req::DELETE), |ctx, store, req: DeleteReq| async move {
        screen_handlers::handle_delete::<T>(&req, &ctx, &store).await;
    });
}

/// Full CRUD screen: the list plus the add/edit editor.
fn register_screen<T>(flux: &Flux, ctx: &Arc<BffContext>)
where
    T: Resource + Searchable + Default,
{
    register_list::<T>(flux, ctx);
    route(flux, ctx, &screen_path::<T>(screen_req::OPEN), |ctx, store, req: OpenReq| async move {
        screen_handlers::handle_open::<T>(&req, &ctx, &store).await;
    });
    route(flux, ctx, &screen_path::<T>(screen_req::CLOSE), |_, store, _: CloseReq| async move {
        screen_handlers::handle_close::<T>(&store);
    });
    route(flux, ctx, &screen_path::<T>(screen_req::SAVE), |ctx, store, req: SaveReq<T>| async move {
        screen_handlers::handle_save::<T>(req, &ctx, &store).await;
    });
}

fn register_bill(flux: &Flux, ctx: &Arc<BffContext>, kind: TransactionKind) {
    route(flux, ctx, &bill_path(kind, bill_req::NEW), move |_, store, _: BillNewReq| async move {
        bill_handlers::handle_new(kind, &store);
    });
    route(flux, ctx, &bill_path(kind, bill_req::LOAD), move |ctx, store, req: BillLoadReq| async move {
        bill_handlers::handle_load(kind, &req, &ctx, &store).await;
    });
    route(flux, ctx, &bill_path(kind, bill_req::EDIT), move |ctx, store, req: BillEditReq| async move {
        bill_handlers::handle_edit(kind, req, &ctx, &store).await;
    });
    route(flux, ctx, &bill_path(kind, bill_req::ADD_ROW), move |_, store, _: BillAddRowReq| async move {
        bill_handlers::handle_add_row(kind, &store);
    });
    route(flux, ctx, &bill_path(kind, bill_req::REMOVE_ROW), move |_, store, req: BillRemoveRowReq| async move {
        bill_handlers::handle_remove_row(kind, &req, &store);
    });
    route(flux, ctx, &bill_path(kind, bill_req::HEADER), move |_, store, req: BillHeaderReq| async move {
        bill_handlers::handle_header(kind, req, &store);
    });
    route(flux, ctx, &bill_path(kind, bill_req::SUBMIT), move |ctx, store, _: BillSubmitReq| async move {
        bill_handlers::handle_submit(kind, &ctx, &store).await;
    });
}

/// Register all handlers with a Flux instance.
pub fn register_handlers(flux: &Flux, ctx: Arc<BffContext>) {
    // storage/changed → app/company
    {
        let storage = Arc::clone(ctx.session.storage());
        let store = Arc::downgrade(flux.store());
        flux.subscribe(StorageChanged::PATH, move |_, value| {
            let touches_company = value
                .downcast_ref::<StorageChanged>()
                .is_some_and(|c| c.key == COMPANY_KEY);
            if !touches_company {
                return;
            }
            if let Some(store) = store.upgrade() {
                let company = read_json(storage.as_ref(), COMPANY_KEY);
                store.set(CompanyBanner::PATH, CompanyBanner::from_company(company.as_ref()));
            }
        });
    }

    route(flux, &ctx, InitializeReq::PATH, |ctx, store, _: InitializeReq| async move {
        app_handlers::handle_initialize(&ctx, &store).await;
    });
    route(flux, &ctx, LoginReq::PATH, |ctx, store, req: LoginReq| async move {
        auth_handlers::handle_login(&req, &ctx, &store).await;
    });
    route(flux, &ctx, LogoutReq::PATH, |ctx, store, _: LogoutReq| async move {
        auth_handlers::handle_logout(&ctx, &store).await;
    });

    register_screen::<Customer>(flux, &ctx);
    register_screen::<Vendor>(flux, &ctx);
    register_screen::<Product>(flux, &ctx);
    register_screen::<User>(flux, &ctx);
    register_list::<Sale>(flux, &ctx);
    register_list::<Purchase>(flux, &ctx);
    register_list::<DueRecord>(flux, &ctx);

    route(flux, &ctx, ProductInfoReq::PATH, |ctx, store, req: ProductInfoReq| async move {
        screen_handlers::handle_product_info(&req, &ctx, &store).await;
    });
    route(flux, &ctx, LookupLoadReq::PATH, |ctx, store, _: LookupLoadReq| async move {
        screen_handlers::handle_lookup_load(&ctx, &store).await;
    });

    route(flux, &ctx, BlockUserReq::PATH, |ctx, store, req: BlockUserReq| async move {
        user_handlers::handle_block(&req, &ctx, &store).await;
    });
    route(flux, &ctx, ChangeRoleReq::PATH, |ctx, store, req: ChangeRoleReq| async move {
        user_handlers::handle_role(&req, &ctx, &store).await;
    });

    register_bill(flux, &ctx, TransactionKind::Sale);
    register_bill(flux, &ctx, TransactionKind::Purchase);

    route(flux, &ctx, PayDueReq::PATH, |ctx, store, req: PayDueReq| async move {
        dues_handlers::handle_pay(&req, &ctx, &store).await;
    });

    route(flux, &ctx, ProfileLoadReq::PATH, |ctx, store, _: ProfileLoadReq| async move {
        profile_handlers::handle_load(&ctx, &store).await;
    });
    route(flux, &ctx, ProfileSaveReq::PATH, |ctx, store, req: ProfileSaveReq| async move {
        profile_handlers::handle_save(req, &ctx, &store).await;
    });
    route(flux, &ctx, PasswordChangeReq::PATH, |ctx, store, req: PasswordChangeReq| async move {
        profile_handlers::handle_password(&req, &ctx, &store).await;
    });
}
