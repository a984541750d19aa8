//! Central state store.
//!
//! Owns one slice per backend resource. Consumers read immutable
//! snapshots through the accessors; all mutation goes through slice
//! transitions (or the cart's optimistic setters). The store performs no
//! I/O - async orchestration lives in [`dispatch`] and the service
//! modules.
//!
//! The store is not a global: it is created by the embedding application
//! and passed by reference (or cheap clone) to whatever needs it.

mod cart;
mod slice;

pub use cart::{CartLine, CartSlice, CartState};
pub use slice::{ResourceState, Slice, dispatch};

use std::sync::Arc;

use partsgrid_core::Paged;

use crate::models::{
    DealerStatistics, Notification, Order, Payment, Product, Profile, ReturnRequest,
};

/// All per-resource slices, cheaply cloneable via `Arc`.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    profile: Slice<Profile>,
    orders: Slice<Paged<Order>>,
    order_detail: Slice<Order>,
    products: Slice<Paged<Product>>,
    dealer_statistics: Slice<DealerStatistics>,
    payments: Slice<Paged<Payment>>,
    returns: Slice<Paged<ReturnRequest>>,
    notifications: Slice<Vec<Notification>>,
    cart: CartSlice,
}

impl Store {
    /// Create a store with every slice empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The logged-in account's profile.
    #[must_use]
    pub fn profile(&self) -> &Slice<Profile> {
        &self.inner.profile
    }

    /// The last-fetched orders page.
    #[must_use]
    pub fn orders(&self) -> &Slice<Paged<Order>> {
        &self.inner.orders
    }

    /// The last-fetched single order.
    #[must_use]
    pub fn order_detail(&self) -> &Slice<Order> {
        &self.inner.order_detail
    }

    /// The last-fetched catalog page.
    #[must_use]
    pub fn products(&self) -> &Slice<Paged<Product>> {
        &self.inner.products
    }

    /// Dealer dashboard figures.
    #[must_use]
    pub fn dealer_statistics(&self) -> &Slice<DealerStatistics> {
        &self.inner.dealer_statistics
    }

    /// The last-fetched payments page.
    #[must_use]
    pub fn payments(&self) -> &Slice<Paged<Payment>> {
        &self.inner.payments
    }

    /// The last-fetched returns page.
    #[must_use]
    pub fn returns(&self) -> &Slice<Paged<ReturnRequest>> {
        &self.inner.returns
    }

    /// The account's notifications.
    #[must_use]
    pub fn notifications(&self) -> &Slice<Vec<Notification>> {
        &self.inner.notifications
    }

    /// The cart.
    #[must_use]
    pub fn cart(&self) -> &CartSlice {
        &self.inner.cart
    }

    /// Clear everything tied to the session, on logout or token expiry.
    /// The catalog slice survives - it is not session-scoped.
    pub fn clear_session(&self) {
        self.inner.profile.clear();
        self.inner.orders.clear();
        self.inner.order_detail.clear();
        self.inner.dealer_statistics.clear();
        self.inner.payments.clear();
        self.inner.returns.clear();
        self.inner.notifications.clear();
        self.inner.cart.clear();
    }
}
