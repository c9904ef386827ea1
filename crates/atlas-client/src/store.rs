//! # Entity Store
//!
//! The console's read/write facade: cached reads per entity kind, and
//! mutating workflows that follow the two client-side correctness rules:
//!
//! 1. **One mutation at a time.** Every document-mutating action is a
//!    critical section. A second click on "Approve" waits for (and then
//!    observes the result of) the first - it can never fire a duplicate
//!    request off stale state.
//! 2. **Invalidate after every mutation.** The per-kind cache holds the
//!    last full fetch; any mutating call for that kind drops it, so the
//!    next read refetches. The client never assumes optimistic success -
//!    what the server returns is what happened.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      EntityStore Data Flow                              │
//! │                                                                         │
//! │  read:   store.products() ──► cache hit? ──► ApiClient.get ──► cache   │
//! │                                                                         │
//! │  write:  store.approve_sales_order(id)                                 │
//! │             │ acquire mutation lock                                     │
//! │             │ POST /sales-orders/{id}/approve                           │
//! │             │ invalidate sales-orders cache                             │
//! │             ▼ release lock, return the server's document                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use atlas_core::document::*;
use atlas_core::ledger::{MovementDraft, StockAlert, StockLedger, StockMovement};
use atlas_core::types::{Category, Color, Customer, Product, Supplier, UserAccount};

use crate::client::ApiClient;
use crate::error::ApiResult;

use crate::cache::EntityCache;

/// The entity kinds the store caches, one slot each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Products,
    Categories,
    Colors,
    Customers,
    Suppliers,
    SalesOrders,
    Deliveries,
    Invoices,
    Receipts,
    Returns,
    PurchaseOrders,
    StockMovements,
    Users,
}

/// Cached access to the external API.
pub struct EntityStore {
    api: ApiClient,
    /// Serializes mutating workflows: one document mutation at a time.
    mutation_lock: Mutex<()>,

    products: EntityCache<Product>,
    categories: EntityCache<Category>,
    colors: EntityCache<Color>,
    customers: EntityCache<Customer>,
    suppliers: EntityCache<Supplier>,
    sales_orders: EntityCache<SalesOrder>,
    deliveries: EntityCache<DeliveryOrder>,
    invoices: EntityCache<SalesInvoice>,
    receipts: EntityCache<CustomerReceipt>,
    returns: EntityCache<SalesReturn>,
    purchase_orders: EntityCache<PurchaseOrder>,
    stock_movements: EntityCache<StockMovement>,
    users: EntityCache<UserAccount>,
}

impl EntityStore {
    pub fn new(api: ApiClient) -> Self {
        EntityStore {
            api,
            mutation_lock: Mutex::new(()),
            products: EntityCache::new(),
            categories: EntityCache::new(),
            colors: EntityCache::new(),
            customers: EntityCache::new(),
            suppliers: EntityCache::new(),
            sales_orders: EntityCache::new(),
            deliveries: EntityCache::new(),
            invoices: EntityCache::new(),
            receipts: EntityCache::new(),
            returns: EntityCache::new(),
            purchase_orders: EntityCache::new(),
            stock_movements: EntityCache::new(),
            users: EntityCache::new(),
        }
    }

    /// The underlying client, for operations the store doesn't wrap.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Drops the cached list for one kind.
    pub async fn invalidate(&self, kind: EntityKind) {
        match kind {
            EntityKind::Products => self.products.invalidate().await,
            EntityKind::Categories => self.categories.invalidate().await,
            EntityKind::Colors => self.colors.invalidate().await,
            EntityKind::Customers => self.customers.invalidate().await,
            EntityKind::Suppliers => self.suppliers.invalidate().await,
            EntityKind::SalesOrders => self.sales_orders.invalidate().await,
            EntityKind::Deliveries => self.deliveries.invalidate().await,
            EntityKind::Invoices => self.invoices.invalidate().await,
            EntityKind::Receipts => self.receipts.invalidate().await,
            EntityKind::Returns => self.returns.invalidate().await,
            EntityKind::PurchaseOrders => self.purchase_orders.invalidate().await,
            EntityKind::StockMovements => self.stock_movements.invalidate().await,
            EntityKind::Users => self.users.invalidate().await,
        }
    }

    // =========================================================================
    // Cached Reads
    // =========================================================================

    pub async fn products(&self) -> ApiResult<Arc<Vec<Product>>> {
        let api = self.api.clone();
        self.products
            .get_or_fetch(move || async move { api.products().list().await })
            .await
    }

    pub async fn categories(&self) -> ApiResult<Arc<Vec<Category>>> {
        let api = self.api.clone();
        self.categories
            .get_or_fetch(move || async move { api.categories().list().await })
            .await
    }

    pub async fn colors(&self) -> ApiResult<Arc<Vec<Color>>> {
        let api = self.api.clone();
        self.colors
            .get_or_fetch(move || async move { api.colors().list().await })
            .await
    }

    pub async fn customers(&self) -> ApiResult<Arc<Vec<Customer>>> {
        let api = self.api.clone();
        self.customers
            .get_or_fetch(move || async move { api.customers().list().await })
            .await
    }

    pub async fn suppliers(&self) -> ApiResult<Arc<Vec<Supplier>>> {
        let api = self.api.clone();
        self.suppliers
            .get_or_fetch(move || async move { api.suppliers().list().await })
            .await
    }

    pub async fn sales_orders(&self) -> ApiResult<Arc<Vec<SalesOrder>>> {
        let api = self.api.clone();
        self.sales_orders
            .get_or_fetch(move || async move { api.sales_orders().list().await })
            .await
    }

    pub async fn deliveries(&self) -> ApiResult<Arc<Vec<DeliveryOrder>>> {
        let api = self.api.clone();
        self.deliveries
            .get_or_fetch(move || async move { api.deliveries().list().await })
            .await
    }

    pub async fn invoices(&self) -> ApiResult<Arc<Vec<SalesInvoice>>> {
        let api = self.api.clone();
        self.invoices
            .get_or_fetch(move || async move { api.invoices().list().await })
            .await
    }

    pub async fn receipts(&self) -> ApiResult<Arc<Vec<CustomerReceipt>>> {
        let api = self.api.clone();
        self.receipts
            .get_or_fetch(move || async move { api.receipts().list().await })
            .await
    }

    pub async fn returns(&self) -> ApiResult<Arc<Vec<SalesReturn>>> {
        let api = self.api.clone();
        self.returns
            .get_or_fetch(move || async move { api.returns().list().await })
            .await
    }

    pub async fn purchase_orders(&self) -> ApiResult<Arc<Vec<PurchaseOrder>>> {
        let api = self.api.clone();
        self.purchase_orders
            .get_or_fetch(move || async move { api.purchase_orders().list().await })
            .await
    }

    pub async fn stock_movements(&self) -> ApiResult<Arc<Vec<StockMovement>>> {
        let api = self.api.clone();
        self.stock_movements
            .get_or_fetch(move || async move { api.stock_movements().list().await })
            .await
    }

    pub async fn users(&self) -> ApiResult<Arc<Vec<UserAccount>>> {
        let api = self.api.clone();
        self.users
            .get_or_fetch(move || async move { api.users().list().await })
            .await
    }

    /// Customers an author may pick for a new document (active only).
    pub async fn selectable_customers(&self) -> ApiResult<Vec<Customer>> {
        let all = self.customers().await?;
        Ok(all.iter().filter(|c| c.selectable()).cloned().collect())
    }

    // =========================================================================
    // Derived Stock Views
    // =========================================================================

    /// Assembles the stock ledger: every product registered, with the full
    /// movement history replayed. Movements carry the entire history, so
    /// baselines start at zero.
    pub async fn stock_ledger(&self) -> ApiResult<StockLedger> {
        let products = self.products().await?;
        let movements = self.stock_movements().await?;

        let mut ledger = StockLedger::new();
        for product in products.iter() {
            ledger.register_product(product.id.clone(), 0);
        }
        ledger.load_movements(movements.iter().cloned().collect());
        Ok(ledger)
    }

    /// Products currently at or below their reorder level, worst first.
    pub async fn low_stock(&self) -> ApiResult<Vec<StockAlert>> {
        let products = self.products().await?;
        let ledger = self.stock_ledger().await?;
        Ok(ledger.low_stock_report(products.iter()))
    }

    // =========================================================================
    // Order-to-Cash Workflows
    // =========================================================================
    // Each workflow is one mutating API call under the mutation lock,
    // followed by invalidation of every kind the server may have touched.

    /// Creates a sales order from an authored draft.
    pub async fn create_sales_order(&self, draft: &SalesOrderDraft) -> ApiResult<SalesOrder> {
        let _guard = self.mutation_lock.lock().await;
        let order = self.api.sales_orders().create(draft).await?;
        self.invalidate(EntityKind::SalesOrders).await;
        info!(order = %order.number, "sales order created");
        Ok(order)
    }

    /// Approves a sales order (Draft → Confirmed). The core transition
    /// check runs first so an out-of-table request never leaves the client.
    pub async fn approve_sales_order(&self, order: &SalesOrder) -> ApiResult<SalesOrder> {
        let mut check = order.clone();
        check.approve()?;

        let _guard = self.mutation_lock.lock().await;
        let order = self.api.sales_orders().approve(&order.id).await?;
        self.invalidate(EntityKind::SalesOrders).await;
        info!(order = %order.number, "sales order approved");
        Ok(order)
    }

    /// Deletes a sales order. Only Draft orders may be deleted.
    pub async fn delete_sales_order(&self, order: &SalesOrder) -> ApiResult<()> {
        order.ensure_deletable()?;

        let _guard = self.mutation_lock.lock().await;
        self.api.sales_orders().delete(&order.id).await?;
        self.invalidate(EntityKind::SalesOrders).await;
        info!(order = %order.number, "sales order deleted");
        Ok(())
    }

    /// Derives and creates a delivery order from a Confirmed sales order.
    pub async fn create_delivery_from_order(
        &self,
        order: &SalesOrder,
    ) -> ApiResult<DeliveryOrder> {
        let draft = DeliveryOrderDraft::from_sales_order(order)?;

        let _guard = self.mutation_lock.lock().await;
        let delivery = self.api.deliveries().create(&draft).await?;
        self.invalidate(EntityKind::Deliveries).await;
        // the source order typically moves to Processing server-side
        self.invalidate(EntityKind::SalesOrders).await;
        info!(delivery = %delivery.number, order = %order.number, "delivery derived from order");
        Ok(delivery)
    }

    /// Approves a delivery order (Pending → Approved).
    pub async fn approve_delivery(&self, delivery: &DeliveryOrder) -> ApiResult<DeliveryOrder> {
        let mut check = delivery.clone();
        check.approve()?;

        let _guard = self.mutation_lock.lock().await;
        let delivery = self.api.deliveries().approve(&delivery.id).await?;
        self.invalidate(EntityKind::Deliveries).await;
        info!(delivery = %delivery.number, "delivery approved");
        Ok(delivery)
    }

    /// Deletes a delivery order. Only Pending deliveries may be deleted.
    pub async fn delete_delivery(&self, delivery: &DeliveryOrder) -> ApiResult<()> {
        delivery.ensure_deletable()?;

        let _guard = self.mutation_lock.lock().await;
        self.api.deliveries().delete(&delivery.id).await?;
        self.invalidate(EntityKind::Deliveries).await;
        info!(delivery = %delivery.number, "delivery deleted");
        Ok(())
    }

    /// Derives and creates an invoice from a delivery order.
    pub async fn create_invoice_from_delivery(
        &self,
        delivery: &DeliveryOrder,
        due_date: Option<chrono::DateTime<chrono::Utc>>,
    ) -> ApiResult<SalesInvoice> {
        let draft = SalesInvoiceDraft::from_delivery(delivery, due_date)?;

        let _guard = self.mutation_lock.lock().await;
        let invoice = self.api.invoices().create(&draft).await?;
        self.invalidate(EntityKind::Invoices).await;
        info!(invoice = %invoice.number, delivery = %delivery.number, "invoice derived from delivery");
        Ok(invoice)
    }

    /// Records a receipt against an invoice and returns it.
    ///
    /// The core re-derives the payment locally first (positive amount,
    /// invoice accepts payment, no overpayment); the server then applies
    /// it authoritatively.
    pub async fn pay_invoice(
        &self,
        invoice: &SalesInvoice,
        amount: atlas_core::Money,
        method: PaymentMethod,
    ) -> ApiResult<CustomerReceipt> {
        let draft = ReceiptDraft::for_invoice(invoice, amount, method)?;

        let _guard = self.mutation_lock.lock().await;
        let receipt = self.api.receipts().create(&draft).await?;
        self.invalidate(EntityKind::Receipts).await;
        self.invalidate(EntityKind::Invoices).await;
        self.invalidate(EntityKind::Customers).await;
        info!(invoice = %invoice.number, amount = %amount, "payment recorded");
        Ok(receipt)
    }

    /// Records an unlinked payment on account.
    pub async fn pay_on_account(
        &self,
        customer: &Customer,
        amount: atlas_core::Money,
        method: PaymentMethod,
    ) -> ApiResult<CustomerReceipt> {
        let draft = ReceiptDraft::on_account(customer, amount, method)?;

        let _guard = self.mutation_lock.lock().await;
        let receipt = self.api.receipts().create(&draft).await?;
        self.invalidate(EntityKind::Receipts).await;
        self.invalidate(EntityKind::Customers).await;
        info!(customer = %customer.id, amount = %amount, "on-account payment recorded");
        Ok(receipt)
    }

    /// Opens a sales return against an invoice.
    pub async fn open_return(&self, draft: &SalesReturnDraft) -> ApiResult<SalesReturn> {
        let _guard = self.mutation_lock.lock().await;
        let ret = self.api.returns().create(draft).await?;
        self.invalidate(EntityKind::Returns).await;
        info!(return_no = %ret.number, "sales return opened");
        Ok(ret)
    }

    /// Refunds an approved return.
    ///
    /// The server performs the cascade (payout, invoice reversal, customer
    /// credit, reversing movements), so every touched kind is invalidated.
    pub async fn refund_return(&self, ret: &SalesReturn) -> ApiResult<SalesReturn> {
        let mut check = ret.clone();
        check.refund()?;

        let _guard = self.mutation_lock.lock().await;
        let ret = self.api.returns().refund(&ret.id).await?;
        self.invalidate(EntityKind::Returns).await;
        self.invalidate(EntityKind::Invoices).await;
        self.invalidate(EntityKind::Customers).await;
        self.invalidate(EntityKind::StockMovements).await;
        info!(return_no = %ret.number, "sales return refunded");
        Ok(ret)
    }

    /// Receives a purchase order, stocking up every line.
    pub async fn receive_purchase_order(&self, po: &PurchaseOrder) -> ApiResult<PurchaseOrder> {
        let mut check = po.clone();
        check.receive()?;

        let _guard = self.mutation_lock.lock().await;
        let po = self.api.purchase_orders().receive(&po.id).await?;
        self.invalidate(EntityKind::PurchaseOrders).await;
        self.invalidate(EntityKind::StockMovements).await;
        self.invalidate(EntityKind::Products).await;
        info!(po = %po.number, "purchase order received");
        Ok(po)
    }

    /// Appends a manual stock movement.
    pub async fn record_movement(&self, draft: &MovementDraft) -> ApiResult<StockMovement> {
        let _guard = self.mutation_lock.lock().await;
        let movement = self.api.stock_movements().create(draft).await?;
        self.invalidate(EntityKind::StockMovements).await;
        self.invalidate(EntityKind::Products).await;
        info!(product = %movement.product_id, "stock movement recorded");
        Ok(movement)
    }
}
