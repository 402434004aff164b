use crate::alerts::{AlertStore, AlertToggle};
use crate::catalog::{self, SortKey, paginate};
use crate::fetcher::Fetch;
use crate::model::{AlertError, AlertRecord, Product, WishlistEntry};
use crate::normalizer::normalize_all;
use crate::ui::{Navigate, Notify, PageMeta, Render, Severity};
use crate::wishlist::WishlistStore;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Data handed to the interactive alert-creation step after a bell toggle on
/// a product without an existing alert.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertPrompt {
    pub product_id: String,
    pub product_name: String,
    pub current_price: f64,
    pub suggested_price: f64,
}

/// Owns the current `{page, sort, products}` state for one fetch cycle and
/// orchestrates fetch → normalize → sort → paginate → render. Collaborators
/// are injected; the render/interaction layer calls back in through the
/// `on_*` event methods.
pub struct DealsController {
    fetcher: Arc<dyn Fetch>,
    alerts: AlertStore,
    wishlist: WishlistStore,
    renderer: Arc<dyn Render>,
    notifier: Arc<dyn Notify>,
    navigator: Arc<dyn Navigate>,
    page_size: usize,
    page: usize,
    sort_by: SortKey,
    products: Vec<Product>,
}

impl DealsController {
    pub fn new(
        fetcher: Arc<dyn Fetch>,
        alerts: AlertStore,
        wishlist: WishlistStore,
        renderer: Arc<dyn Render>,
        notifier: Arc<dyn Notify>,
        navigator: Arc<dyn Navigate>,
        page_size: usize,
        sort_by: SortKey,
    ) -> Self {
        Self {
            fetcher,
            alerts,
            wishlist,
            renderer,
            notifier,
            navigator,
            page_size: page_size.max(1),
            page: 1,
            sort_by,
            products: Vec::new(),
        }
    }

    /// Full load cycle. Fetch failures and empty results degrade to the empty
    /// state with a retry hint; the previous product set is discarded either
    /// way. Callers serialize access, so at most one fetch is in flight.
    pub async fn refresh(&mut self) {
        info!("Refreshing deals...");
        let raw = match self.fetcher.fetch().await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Fetch failed: {e}");
                self.products.clear();
                self.page = 1;
                self.renderer.render_empty(Some(&e.to_string()));
                self.notifier
                    .toast("Load failed", &e.to_string(), Severity::Error);
                return;
            }
        };

        self.products = normalize_all(&raw);
        self.page = 1;
        info!(
            "Normalized {} of {} raw records",
            self.products.len(),
            raw.len()
        );
        self.render_current();
    }

    /// Re-slices the already fetched canonical set; no re-fetch. Bounds are
    /// the caller's responsibility, matching the paginator contract.
    pub fn change_page(&mut self, page: usize) {
        self.page = page;
        self.render_current();
    }

    /// Re-sorts the already fetched canonical set and starts over at page 1.
    pub fn change_sort(&mut self, sort_by: SortKey) {
        self.sort_by = sort_by;
        self.page = 1;
        self.render_current();
    }

    fn render_current(&self) {
        if self.products.is_empty() {
            self.renderer.render_empty(None);
            return;
        }
        let sorted = catalog::sort(&self.products, self.sort_by);
        let page = paginate(&sorted, self.page, self.page_size);
        let meta = PageMeta {
            page: self.page,
            total_pages: page.total_pages,
            total_products: self.products.len(),
            sort_by: self.sort_by,
        };
        self.renderer.render_page(&page.items, &meta);
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn sort_by(&self) -> SortKey {
        self.sort_by
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn total_pages(&self) -> usize {
        self.products.len().div_ceil(self.page_size).max(1)
    }

    pub fn find_product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    pub fn alerts(&self) -> &AlertStore {
        &self.alerts
    }

    pub fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    /// Alert bell toggled. Removal happens immediately; creation is deferred:
    /// the returned prompt carries the suggested threshold for the
    /// confirmation step.
    pub async fn on_alert_bell_click(&self, product_id: &str) -> Option<AlertPrompt> {
        let Some(product) = self.find_product(product_id) else {
            self.notifier
                .toast("Unknown product", product_id, Severity::Warning);
            return None;
        };

        match self
            .alerts
            .toggle(product_id, product.current_price.or_zero())
            .await
        {
            Ok(AlertToggle::Removed) => {
                self.notifier
                    .toast("Alert removed", &product.name, Severity::Info);
                None
            }
            Ok(AlertToggle::PromptCreate { suggested_price }) => Some(AlertPrompt {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                current_price: product.current_price.or_zero(),
                suggested_price,
            }),
            Err(e) => {
                warn!("Alert toggle failed: {e}");
                self.notifier
                    .toast("Alert failed", &e.to_string(), Severity::Error);
                None
            }
        }
    }

    /// Confirmation step for alert creation: threshold and optional email as
    /// chosen by the user.
    pub async fn on_alert_confirm(
        &self,
        product_id: &str,
        alert_price: f64,
        email: Option<String>,
    ) {
        let Some(product) = self.find_product(product_id) else {
            self.notifier
                .toast("Unknown product", product_id, Severity::Warning);
            return;
        };

        let record = AlertRecord {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            current_price: product.current_price.or_zero(),
            alert_price,
            email: email.unwrap_or_default(),
            date_created: Utc::now(),
        };

        match self.alerts.create(record).await {
            Ok(()) => {
                self.notifier.toast(
                    "Alert set",
                    &format!("{} below ${alert_price:.2}", product.name),
                    Severity::Success,
                );
            }
            Err(AlertError::InvalidPrice) => {
                self.notifier.toast(
                    "Invalid alert price",
                    "pick a price above zero and below the current price",
                    Severity::Warning,
                );
            }
            Err(e) => {
                warn!("Alert create failed: {e}");
                self.notifier
                    .toast("Alert failed", &e.to_string(), Severity::Error);
            }
        }
    }

    pub async fn on_wishlist_click(&self, product_id: &str) {
        let Some(product) = self.find_product(product_id) else {
            self.notifier
                .toast("Unknown product", product_id, Severity::Warning);
            return;
        };

        let entry = WishlistEntry {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.current_price.clone(),
            image: product.image_url.clone(),
            url: Some(format!("products/{}", product.id)),
        };

        match self.wishlist.toggle(entry).await {
            Ok(true) => {
                self.notifier
                    .toast("Added to wishlist", &product.name, Severity::Success);
            }
            Ok(false) => {
                self.notifier
                    .toast("Removed from wishlist", &product.name, Severity::Info);
            }
            Err(e) => {
                warn!("Wishlist toggle failed: {e}");
                self.notifier
                    .toast("Wishlist failed", &e.to_string(), Severity::Error);
            }
        }
    }

    pub fn on_compare_click(&self, product_id: &str) {
        self.navigator.go(&format!("compare/{product_id}"));
    }

    /// Sidebar-style navigation to a filtered listing, e.g. "android".
    pub fn on_category_click(&self, kind: &str) {
        self.navigator.go(&format!("category/{kind}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FetchError, RawProduct};
    use crate::storage::SqliteStorage;
    use crate::ui::{NoopNavigate, SilentNotify};
    use serde_json::json;
    use std::sync::Mutex as StdMutex;
    use tokio::sync::Mutex;

    struct StubFetcher {
        raw: Vec<RawProduct>,
    }

    #[async_trait::async_trait]
    impl Fetch for StubFetcher {
        async fn fetch(&self) -> Result<Vec<RawProduct>, FetchError> {
            Ok(self.raw.clone())
        }
    }

    struct FailingFetcher;

    #[async_trait::async_trait]
    impl Fetch for FailingFetcher {
        async fn fetch(&self) -> Result<Vec<RawProduct>, FetchError> {
            Err(FetchError::Status(503))
        }
    }

    #[derive(Default)]
    struct RecordingRender {
        pages: StdMutex<Vec<(Vec<String>, PageMeta)>>,
        empties: StdMutex<Vec<Option<String>>>,
    }

    impl Render for RecordingRender {
        fn render_page(&self, products: &[Product], meta: &PageMeta) {
            let ids = products.iter().map(|p| p.id.clone()).collect();
            self.pages.lock().unwrap().push((ids, meta.clone()));
        }

        fn render_empty(&self, reason: Option<&str>) {
            self.empties.lock().unwrap().push(reason.map(str::to_string));
        }
    }

    fn raw_products(count: usize) -> Vec<RawProduct> {
        // Descending prices so that the default sort has to reorder.
        (0..count)
            .map(|i| {
                json!({
                    "id": format!("p{i}"),
                    "name": format!("Phone {i}"),
                    "price": 1000.0 - i as f64,
                })
            })
            .collect()
    }

    fn controller(
        fetcher: Arc<dyn Fetch>,
        renderer: Arc<RecordingRender>,
        page_size: usize,
    ) -> DealsController {
        let storage = Arc::new(Mutex::new(SqliteStorage::new(":memory:").unwrap()));
        DealsController::new(
            fetcher,
            AlertStore::new(storage.clone()),
            WishlistStore::new(storage),
            renderer,
            Arc::new(SilentNotify),
            Arc::new(NoopNavigate),
            page_size,
            SortKey::Relevance,
        )
    }

    #[tokio::test]
    async fn refresh_renders_the_first_page_sorted_by_price() {
        let renderer = Arc::new(RecordingRender::default());
        let fetcher = Arc::new(StubFetcher {
            raw: raw_products(20),
        });
        let mut ctrl = controller(fetcher, renderer.clone(), 9);

        ctrl.refresh().await;

        let pages = renderer.pages.lock().unwrap();
        let (ids, meta) = &pages[0];
        assert_eq!(meta.page, 1);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.total_products, 20);
        assert_eq!(ids.len(), 9);
        // cheapest record (the last generated) first under the default sort
        assert_eq!(ids[0], "p19");
    }

    #[tokio::test]
    async fn fetch_failure_degrades_to_empty_state_with_reason() {
        let renderer = Arc::new(RecordingRender::default());
        let mut ctrl = controller(Arc::new(FailingFetcher), renderer.clone(), 9);

        ctrl.refresh().await;

        assert_eq!(ctrl.product_count(), 0);
        let empties = renderer.empties.lock().unwrap();
        assert_eq!(empties.len(), 1);
        assert!(empties[0].as_deref().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn empty_fetch_renders_empty_state_without_reason() {
        let renderer = Arc::new(RecordingRender::default());
        let fetcher = Arc::new(StubFetcher { raw: Vec::new() });
        let mut ctrl = controller(fetcher, renderer.clone(), 9);

        ctrl.refresh().await;

        let empties = renderer.empties.lock().unwrap();
        assert_eq!(empties.as_slice(), &[None]);
    }

    #[tokio::test]
    async fn change_page_reslices_without_refetching() {
        let renderer = Arc::new(RecordingRender::default());
        let fetcher = Arc::new(StubFetcher {
            raw: raw_products(20),
        });
        let mut ctrl = controller(fetcher, renderer.clone(), 9);
        ctrl.refresh().await;

        ctrl.change_page(2);

        let pages = renderer.pages.lock().unwrap();
        let (ids, meta) = &pages[1];
        assert_eq!(meta.page, 2);
        assert_eq!(ids.len(), 9);
        assert_eq!(ids[0], "p10");
        assert_eq!(ids[8], "p2");
    }

    #[tokio::test]
    async fn change_sort_resets_to_the_first_page() {
        let renderer = Arc::new(RecordingRender::default());
        let fetcher = Arc::new(StubFetcher {
            raw: raw_products(20),
        });
        let mut ctrl = controller(fetcher, renderer.clone(), 9);
        ctrl.refresh().await;
        ctrl.change_page(3);

        ctrl.change_sort(SortKey::PriceDesc);

        assert_eq!(ctrl.current_page(), 1);
        let pages = renderer.pages.lock().unwrap();
        let (ids, meta) = pages.last().unwrap();
        assert_eq!(meta.page, 1);
        assert_eq!(ids[0], "p0");
    }

    #[tokio::test]
    async fn bell_click_prompts_then_confirm_then_toggle_removes() {
        let renderer = Arc::new(RecordingRender::default());
        let fetcher = Arc::new(StubFetcher {
            raw: raw_products(3),
        });
        let mut ctrl = controller(fetcher, renderer, 9);
        ctrl.refresh().await;

        let prompt = ctrl.on_alert_bell_click("p0").await.unwrap();
        assert_eq!(prompt.current_price, 1000.0);
        assert_eq!(prompt.suggested_price, 900.0);

        ctrl.on_alert_confirm("p0", prompt.suggested_price, None).await;
        assert_eq!(ctrl.alerts().get_all().await.len(), 1);

        assert!(ctrl.on_alert_bell_click("p0").await.is_none());
        assert!(ctrl.alerts().get_all().await.is_empty());
    }

    #[tokio::test]
    async fn invalid_alert_price_leaves_state_unchanged() {
        let renderer = Arc::new(RecordingRender::default());
        let fetcher = Arc::new(StubFetcher {
            raw: raw_products(1),
        });
        let mut ctrl = controller(fetcher, renderer, 9);
        ctrl.refresh().await;

        ctrl.on_alert_confirm("p0", 1000.0, None).await;
        assert!(ctrl.alerts().get_all().await.is_empty());
    }

    #[tokio::test]
    async fn wishlist_click_round_trips() {
        let renderer = Arc::new(RecordingRender::default());
        let fetcher = Arc::new(StubFetcher {
            raw: raw_products(2),
        });
        let mut ctrl = controller(fetcher, renderer, 9);
        ctrl.refresh().await;

        ctrl.on_wishlist_click("p1").await;
        let entries = ctrl.wishlist().get_all().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["p1"].url.as_deref(), Some("products/p1"));

        ctrl.on_wishlist_click("p1").await;
        assert!(ctrl.wishlist().get_all().await.is_empty());
    }
}
