//! Client-side cart store.
//!
//! Process-local holder for the current cart snapshot, the loading flag,
//! and the drawer flag. Transitions go through the sync protocol and
//! replace the snapshot wholesale; responses are applied in the order
//! their requests were issued, never the order they arrive.

use std::{
    fmt,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::{
    cart::{
        backend::{CartBackend, CartPayload, LineInput, LineUpdate},
        models::{Cart, CartId, LineId, VariantId},
        persistence::CartIdStore,
    },
    commerce::models::UserError,
};

/// Read-only view of the store, published on every change.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    /// Current snapshot; `None` until a cart has been created or
    /// rehydrated. A cart with zero lines is still a cart.
    pub cart: Option<Cart>,
    /// True while at least one transition is in flight.
    pub loading: bool,
    /// Presentational drawer flag, orthogonal to the cart itself.
    pub drawer_open: bool,
}

/// How a store transition ended.
///
/// Failures never propagate out of the store as errors or panics;
/// consumers observe an unchanged snapshot plus this value, and the
/// details go to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The returned snapshot replaced the local one.
    Applied,
    /// The backend rejected the mutation with user-facing validation
    /// errors; the snapshot is unchanged.
    Rejected(Vec<UserError>),
    /// Transport or protocol failure; the snapshot is unchanged.
    Failed,
    /// A later-issued mutation applied first; this response was
    /// discarded as stale.
    Superseded,
    /// The operation needs an active cart and there is none.
    NoActiveCart,
}

struct Inner {
    cart: Option<Cart>,
    drawer_open: bool,
    in_flight: u32,
    applied_seq: u64,
}

/// The cart state machine.
///
/// `Empty` (no snapshot) becomes `Populated` on the first successful
/// create and stays `Populated` from then on, even at zero lines; only
/// a failed rehydrate drops back to `Empty`.
pub struct CartStore {
    backend: Arc<dyn CartBackend>,
    storage: Arc<dyn CartIdStore>,
    inner: Mutex<Inner>,
    issue_seq: AtomicU64,
    changes: watch::Sender<CartState>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create a store over the given backend and identifier storage.
    #[must_use]
    pub fn new(backend: Arc<dyn CartBackend>, storage: Arc<dyn CartIdStore>) -> Self {
        let (changes, _) = watch::channel(CartState::default());

        Self {
            backend,
            storage,
            inner: Mutex::new(Inner {
                cart: None,
                drawer_open: false,
                in_flight: 0,
                applied_seq: 0,
            }),
            issue_seq: AtomicU64::new(0),
            changes,
        }
    }

    /// Current published state.
    #[must_use]
    pub fn state(&self) -> CartState {
        self.changes.borrow().clone()
    }

    /// Subscribe to state changes. Consumers re-render on every
    /// notification and treat the snapshot as read-only.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.changes.subscribe()
    }

    /// Latest hosted-checkout URL, if the backend has issued one.
    #[must_use]
    pub fn checkout_url(&self) -> Option<String> {
        self.lock().cart.as_ref().and_then(|cart| cart.checkout_url.clone())
    }

    /// Restore the cart referenced by persisted identity, if any.
    ///
    /// A null fetch result means the identifier expired upstream: the
    /// local reference is dropped and persistence cleared, returning to
    /// `Empty`. A transport failure leaves the identifier in place for
    /// the next start.
    #[tracing::instrument(name = "cart.store.rehydrate", skip(self))]
    pub async fn rehydrate(&self) {
        let stored = match self.storage.load() {
            Ok(Some(id)) => id,
            Ok(None) => return,
            Err(error) => {
                warn!(%error, "failed to read persisted cart identifier");
                return;
            }
        };

        let seq = self.begin();

        match self.backend.fetch_cart(&stored).await {
            Ok(Some(cart)) => {
                self.apply(seq, cart, false);
            }
            Ok(None) => {
                // Expected and recoverable: the cart expired upstream.
                info!(cart = %stored, "persisted cart identifier is no longer valid");

                if let Err(error) = self.storage.clear() {
                    warn!(%error, "failed to clear persisted cart identifier");
                }
            }
            Err(error) => {
                error!(%error, "failed to rehydrate cart");
            }
        }

        self.finish();
    }

    /// Add a variant to the cart, creating the cart on first use.
    ///
    /// Opens the drawer when the snapshot applies; on the first create
    /// the new identifier is persisted before the snapshot lands.
    #[tracing::instrument(name = "cart.store.add_to_cart", skip(self))]
    pub async fn add_to_cart(&self, variant: &VariantId, quantity: u32) -> MutationOutcome {
        let seq = self.begin();

        let existing = self.current_cart_id();
        let line = LineInput {
            merchandise_id: variant.clone(),
            quantity,
        };

        let result = match &existing {
            Some(cart) => self.backend.add_line(cart, line).await,
            None => self.backend.create_cart(line).await,
        };

        let outcome = match result {
            Ok(payload) => self.accept(seq, payload, existing.is_none(), true),
            Err(error) => {
                error!(%error, "add to cart failed");
                MutationOutcome::Failed
            }
        };

        self.finish();

        outcome
    }

    /// Change a line's quantity. Zero is a semantic remove and routes to
    /// [`CartStore::remove_from_cart`].
    #[tracing::instrument(name = "cart.store.update_quantity", skip(self))]
    pub async fn update_quantity(&self, line: &LineId, quantity: u32) -> MutationOutcome {
        if quantity == 0 {
            return self.remove_from_cart(line).await;
        }

        let Some(cart) = self.current_cart_id() else {
            return MutationOutcome::NoActiveCart;
        };

        let seq = self.begin();

        let update = LineUpdate {
            id: line.clone(),
            quantity,
        };

        let outcome = match self.backend.update_line(&cart, update).await {
            Ok(payload) => self.accept(seq, payload, false, false),
            Err(error) => {
                error!(%error, "cart line update failed");
                MutationOutcome::Failed
            }
        };

        self.finish();

        outcome
    }

    /// Remove a line from the cart. The result may have zero lines;
    /// that is still `Populated`, since the identifier stays valid.
    #[tracing::instrument(name = "cart.store.remove_from_cart", skip(self))]
    pub async fn remove_from_cart(&self, line: &LineId) -> MutationOutcome {
        let Some(cart) = self.current_cart_id() else {
            return MutationOutcome::NoActiveCart;
        };

        let seq = self.begin();

        let outcome = match self
            .backend
            .remove_lines(&cart, std::slice::from_ref(line))
            .await
        {
            Ok(payload) => self.accept(seq, payload, false, false),
            Err(error) => {
                error!(%error, "cart line removal failed");
                MutationOutcome::Failed
            }
        };

        self.finish();

        outcome
    }

    /// Open the cart drawer.
    pub fn open_drawer(&self) {
        let mut inner = self.lock();
        inner.drawer_open = true;
        self.publish(&inner);
    }

    /// Close the cart drawer.
    pub fn close_drawer(&self) {
        let mut inner = self.lock();
        inner.drawer_open = false;
        self.publish(&inner);
    }

    /// Flip the cart drawer.
    pub fn toggle_drawer(&self) {
        let mut inner = self.lock();
        inner.drawer_open = !inner.drawer_open;
        self.publish(&inner);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner) {
        self.changes.send_replace(CartState {
            cart: inner.cart.clone(),
            loading: inner.in_flight > 0,
            drawer_open: inner.drawer_open,
        });
    }

    /// Take a sequence ticket and raise the loading flag. The ticket is
    /// taken before the network call so responses can be ordered by
    /// issue time.
    fn begin(&self) -> u64 {
        let seq = self.issue_seq.fetch_add(1, Ordering::Relaxed) + 1;

        let mut inner = self.lock();
        inner.in_flight += 1;
        self.publish(&inner);

        seq
    }

    fn finish(&self) {
        let mut inner = self.lock();
        inner.in_flight = inner.in_flight.saturating_sub(1);
        self.publish(&inner);
    }

    fn current_cart_id(&self) -> Option<CartId> {
        self.lock().cart.as_ref().map(|cart| cart.id.clone())
    }

    /// Accept a snapshot if its ticket is newer than anything applied
    /// so far; stale responses are discarded.
    fn apply(&self, seq: u64, cart: Cart, open_drawer: bool) -> bool {
        let mut inner = self.lock();

        if seq <= inner.applied_seq {
            return false;
        }

        inner.applied_seq = seq;
        inner.cart = Some(cart);

        if open_drawer {
            inner.drawer_open = true;
        }

        self.publish(&inner);

        true
    }

    fn accept(
        &self,
        seq: u64,
        payload: CartPayload,
        persist_id: bool,
        open_drawer: bool,
    ) -> MutationOutcome {
        if !payload.user_errors.is_empty() {
            for user_error in &payload.user_errors {
                warn!(message = %user_error.message, "commerce backend rejected cart mutation");
            }

            return MutationOutcome::Rejected(payload.user_errors);
        }

        let Some(cart) = payload.cart else {
            warn!("cart mutation succeeded without a cart snapshot");
            return MutationOutcome::Failed;
        };

        if persist_id {
            // The stored identifier must only ever come from a
            // successful create response; this is that response.
            if let Err(error) = self.storage.store(&cart.id) {
                warn!(%error, "failed to persist cart identifier");
            }
        }

        if self.apply(seq, cart, open_drawer) {
            MutationOutcome::Applied
        } else {
            MutationOutcome::Superseded
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::atomic::AtomicUsize,
    };

    use async_trait::async_trait;
    use tokio::{sync::Notify, task};

    use crate::{
        cart::{
            backend::MockCartBackend,
            models::{CartCost, CartLine, Merchandise, MerchandiseProduct},
            persistence::MemoryCartIdStore,
        },
        commerce::{CommerceError, models::Money},
    };

    use super::*;

    fn usd(amount: &str) -> Money {
        Money {
            amount: amount.to_string(),
            currency_code: "USD".to_string(),
        }
    }

    fn variant(id: &str) -> VariantId {
        VariantId::new(id)
    }

    #[derive(Clone)]
    struct StubLine {
        id: LineId,
        variant: VariantId,
        quantity: u32,
    }

    #[derive(Default)]
    struct StubState {
        cart: Option<Vec<StubLine>>,
        next_line: u64,
    }

    /// In-memory commerce backend: one cart, flat $10 price per unit,
    /// quantity-merging adds. Individual calls can be held at a gate to
    /// control response ordering.
    struct StubBackend {
        state: Mutex<StubState>,
        reject_with: Mutex<Vec<UserError>>,
        started: AtomicUsize,
        gates: Mutex<HashMap<usize, Arc<Notify>>>,
    }

    const STUB_CART_ID: &str = "gid://cart/1";

    impl StubBackend {
        fn new() -> Self {
            Self {
                state: Mutex::new(StubState::default()),
                reject_with: Mutex::new(Vec::new()),
                started: AtomicUsize::new(0),
                gates: Mutex::new(HashMap::new()),
            }
        }

        fn state(&self) -> MutexGuard<'_, StubState> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Reject the next mutation with the given message.
        fn reject_next(&self, message: &str) {
            self.reject_with
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(UserError {
                    field: None,
                    message: message.to_string(),
                });
        }

        /// Hold the call with the given index until the gate is notified.
        fn gate(&self, call: usize, gate: Arc<Notify>) {
            self.gates
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(call, gate);
        }

        fn calls_started(&self) -> usize {
            self.started.load(Ordering::SeqCst)
        }

        async fn pause_point(&self) {
            let call = self.started.fetch_add(1, Ordering::SeqCst);

            let gate = self
                .gates
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&call)
                .cloned();

            if let Some(gate) = gate {
                gate.notified().await;
            }
        }

        fn take_rejection(&self) -> Vec<UserError> {
            std::mem::take(
                &mut *self
                    .reject_with
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
            )
        }

        fn snapshot(lines: &[StubLine]) -> Cart {
            let total: u32 = lines.iter().map(|line| line.quantity).sum();
            let subtotal = usd(&format!("{}.00", total * 10));

            Cart {
                id: CartId::new(STUB_CART_ID),
                checkout_url: Some("https://shop.example.com/checkout/1".to_string()),
                total_quantity: total,
                cost: CartCost {
                    subtotal_amount: subtotal.clone(),
                    total_amount: subtotal,
                    total_tax_amount: None,
                },
                lines: lines
                    .iter()
                    .map(|line| CartLine {
                        id: line.id.clone(),
                        quantity: line.quantity,
                        merchandise: Merchandise {
                            id: line.variant.clone(),
                            title: "Stub Variant".to_string(),
                            product: MerchandiseProduct {
                                title: "Stub Product".to_string(),
                                handle: "stub-product".to_string(),
                                featured_image: None,
                            },
                            price: usd("10.00"),
                            selected_options: Vec::new(),
                        },
                    })
                    .collect(),
            }
        }

        fn payload(lines: &[StubLine]) -> CartPayload {
            CartPayload {
                cart: Some(Self::snapshot(lines)),
                user_errors: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl CartBackend for StubBackend {
        async fn fetch_cart(&self, _cart: &CartId) -> Result<Option<Cart>, CommerceError> {
            self.pause_point().await;

            Ok(self.state().cart.as_deref().map(Self::snapshot))
        }

        async fn create_cart(&self, line: LineInput) -> Result<CartPayload, CommerceError> {
            self.pause_point().await;

            let rejection = self.take_rejection();
            if !rejection.is_empty() {
                return Ok(CartPayload {
                    cart: None,
                    user_errors: rejection,
                });
            }

            let mut state = self.state();
            state.next_line += 1;

            let lines = vec![StubLine {
                id: LineId::new(format!("gid://line/{}", state.next_line)),
                variant: line.merchandise_id,
                quantity: line.quantity,
            }];

            state.cart = Some(lines.clone());

            Ok(Self::payload(&lines))
        }

        async fn add_line(
            &self,
            _cart: &CartId,
            line: LineInput,
        ) -> Result<CartPayload, CommerceError> {
            self.pause_point().await;

            let rejection = self.take_rejection();
            if !rejection.is_empty() {
                return Ok(CartPayload {
                    cart: None,
                    user_errors: rejection,
                });
            }

            let mut state = self.state();
            state.next_line += 1;
            let next_line = state.next_line;

            let lines = state.cart.get_or_insert_with(Vec::new);

            // Backend-side merge for merchandise already in the cart.
            if let Some(existing) = lines
                .iter_mut()
                .find(|candidate| candidate.variant == line.merchandise_id)
            {
                existing.quantity += line.quantity;
            } else {
                lines.push(StubLine {
                    id: LineId::new(format!("gid://line/{next_line}")),
                    variant: line.merchandise_id,
                    quantity: line.quantity,
                });
            }

            Ok(Self::payload(lines))
        }

        async fn update_line(
            &self,
            _cart: &CartId,
            update: LineUpdate,
        ) -> Result<CartPayload, CommerceError> {
            self.pause_point().await;

            let rejection = self.take_rejection();
            if !rejection.is_empty() {
                return Ok(CartPayload {
                    cart: None,
                    user_errors: rejection,
                });
            }

            let mut state = self.state();
            let lines = state.cart.get_or_insert_with(Vec::new);

            if let Some(existing) = lines.iter_mut().find(|candidate| candidate.id == update.id) {
                existing.quantity = update.quantity;
            }

            Ok(Self::payload(lines))
        }

        async fn remove_lines(
            &self,
            _cart: &CartId,
            removed: &[LineId],
        ) -> Result<CartPayload, CommerceError> {
            self.pause_point().await;

            let rejection = self.take_rejection();
            if !rejection.is_empty() {
                return Ok(CartPayload {
                    cart: None,
                    user_errors: rejection,
                });
            }

            let mut state = self.state();
            let lines = state.cart.get_or_insert_with(Vec::new);

            lines.retain(|line| !removed.contains(&line.id));

            Ok(Self::payload(lines))
        }
    }

    fn store_over(stub: Arc<StubBackend>) -> (Arc<CartStore>, Arc<MemoryCartIdStore>) {
        let storage = Arc::new(MemoryCartIdStore::default());
        let store = Arc::new(CartStore::new(stub, storage.clone()));

        (store, storage)
    }

    fn first_line_id(store: &CartStore) -> LineId {
        store
            .state()
            .cart
            .and_then(|cart| cart.lines.first().map(|line| line.id.clone()))
            .expect("cart should have a line")
    }

    #[tokio::test]
    async fn first_add_creates_cart_and_persists_identifier() {
        let (store, storage) = store_over(Arc::new(StubBackend::new()));

        let outcome = store.add_to_cart(&variant("gid://v1"), 1).await;

        assert_eq!(outcome, MutationOutcome::Applied);

        let state = store.state();
        let cart = state.cart.expect("store should be populated");

        assert_eq!(cart.total_quantity, 1);
        assert_eq!(cart.lines.len(), 1);
        assert!(state.drawer_open, "drawer should open on add");
        assert!(!state.loading, "loading should clear after completion");
        assert_eq!(
            storage.load().expect("storage should be readable"),
            Some(cart.id),
            "persisted id must equal the created cart id"
        );
    }

    #[tokio::test]
    async fn repeat_add_defers_merging_to_the_backend() {
        let (store, _storage) = store_over(Arc::new(StubBackend::new()));

        store.add_to_cart(&variant("gid://v1"), 2).await;
        store.add_to_cart(&variant("gid://v1"), 3).await;

        let cart = store.state().cart.expect("store should be populated");

        // The merge result comes from the backend snapshot, never from
        // client-side counting.
        assert_eq!(cart.total_quantity, 5);
        assert_eq!(cart.lines.len(), 1);
    }

    #[tokio::test]
    async fn zero_quantity_update_matches_direct_removal() {
        let (updated, _) = store_over(Arc::new(StubBackend::new()));
        let (removed, _) = store_over(Arc::new(StubBackend::new()));

        updated.add_to_cart(&variant("gid://v1"), 2).await;
        removed.add_to_cart(&variant("gid://v1"), 2).await;

        let updated_outcome = updated.update_quantity(&first_line_id(&updated), 0).await;
        let removed_outcome = removed.remove_from_cart(&first_line_id(&removed)).await;

        assert_eq!(updated_outcome, MutationOutcome::Applied);
        assert_eq!(removed_outcome, MutationOutcome::Applied);
        assert_eq!(
            updated.state().cart,
            removed.state().cart,
            "zero-quantity update must end exactly like a removal"
        );
    }

    #[tokio::test]
    async fn emptied_cart_stays_populated() {
        let (store, storage) = store_over(Arc::new(StubBackend::new()));

        store.add_to_cart(&variant("gid://v1"), 1).await;
        store.remove_from_cart(&first_line_id(&store)).await;

        let cart = store.state().cart.expect("zero lines is still a cart");

        assert_eq!(cart.total_quantity, 0);
        assert!(cart.lines.is_empty(), "lines should be gone");
        assert_eq!(
            storage.load().expect("storage should be readable"),
            Some(cart.id),
            "the identifier stays valid and reusable"
        );
    }

    #[tokio::test]
    async fn user_errors_leave_snapshot_untouched() {
        let stub = Arc::new(StubBackend::new());
        let (store, _storage) = store_over(stub.clone());

        store.add_to_cart(&variant("gid://v1"), 1).await;
        store.close_drawer();

        let before = store.state().cart;

        stub.reject_next("insufficient inventory");
        let outcome = store.add_to_cart(&variant("gid://v1"), 99).await;

        assert!(
            matches!(outcome, MutationOutcome::Rejected(ref errors) if errors.len() == 1),
            "expected Rejected with one error, got {outcome:?}"
        );

        let state = store.state();
        assert_eq!(state.cart, before, "snapshot must be untouched");
        assert!(!state.drawer_open, "drawer must not open on rejection");
        assert!(!state.loading, "loading should clear after rejection");
    }

    #[tokio::test]
    async fn create_rejection_persists_no_identifier() {
        let stub = Arc::new(StubBackend::new());
        let (store, storage) = store_over(stub.clone());

        stub.reject_next("variant sold out");
        let outcome = store.add_to_cart(&variant("gid://v1"), 1).await;

        assert!(
            matches!(outcome, MutationOutcome::Rejected(_)),
            "expected Rejected, got {outcome:?}"
        );
        assert!(store.state().cart.is_none(), "store should stay empty");
        assert!(
            storage.load().expect("storage should be readable").is_none(),
            "no id may be persisted without a successful create"
        );
    }

    #[tokio::test]
    async fn rehydrate_restores_persisted_cart() {
        let stub = Arc::new(StubBackend::new());
        let (seed, seed_storage) = store_over(stub.clone());

        seed.add_to_cart(&variant("gid://v1"), 2).await;

        let store = CartStore::new(stub, seed_storage.clone());
        store.rehydrate().await;

        let state = store.state();
        let cart = state.cart.expect("rehydrate should restore the cart");

        assert_eq!(cart.id, CartId::new(STUB_CART_ID));
        assert_eq!(cart.total_quantity, 2);
        assert!(!state.loading, "loading should clear after rehydrate");
        assert!(!state.drawer_open, "rehydrate must not open the drawer");
    }

    #[tokio::test]
    async fn stale_identifier_rehydrate_clears_persistence() {
        let storage = Arc::new(MemoryCartIdStore::default());
        storage
            .store(&CartId::new("gid://cart/expired"))
            .expect("seed should store");

        // Stub backend with no cart answers every fetch with null.
        let store = CartStore::new(Arc::new(StubBackend::new()), storage.clone());
        store.rehydrate().await;

        let state = store.state();
        assert!(state.cart.is_none(), "store should return to empty");
        assert!(!state.loading, "loading should clear");
        assert!(
            storage.load().expect("storage should be readable").is_none(),
            "stale identifier must be cleared"
        );
    }

    #[tokio::test]
    async fn rehydrate_transport_failure_keeps_identifier() {
        let storage = Arc::new(MemoryCartIdStore::default());
        storage
            .store(&CartId::new("gid://cart/1"))
            .expect("seed should store");

        let mut backend = MockCartBackend::new();
        backend.expect_fetch_cart().returning(|_| {
            Err(CommerceError::Transport {
                status: 503,
                status_text: "Service Unavailable".to_string(),
            })
        });

        let store = CartStore::new(Arc::new(backend), storage.clone());
        store.rehydrate().await;

        let state = store.state();
        assert!(state.cart.is_none(), "no snapshot on failure");
        assert!(!state.loading, "loading should clear on failure");
        assert_eq!(
            storage.load().expect("storage should be readable"),
            Some(CartId::new("gid://cart/1")),
            "transport failure is not a stale identifier; keep it for retry"
        );
    }

    #[tokio::test]
    async fn transport_failure_is_a_state_no_op() {
        let mut backend = MockCartBackend::new();
        backend.expect_create_cart().returning(|_| {
            Err(CommerceError::Transport {
                status: 502,
                status_text: "Bad Gateway".to_string(),
            })
        });

        let storage = Arc::new(MemoryCartIdStore::default());
        let store = CartStore::new(Arc::new(backend), storage.clone());

        let outcome = store.add_to_cart(&variant("gid://v1"), 1).await;

        assert_eq!(outcome, MutationOutcome::Failed);

        let state = store.state();
        assert!(state.cart.is_none(), "snapshot must be unchanged");
        assert!(!state.loading, "loading must clear on the failure path");
        assert!(
            storage.load().expect("storage should be readable").is_none(),
            "nothing may be persisted on failure"
        );
    }

    #[tokio::test]
    async fn mutations_without_a_cart_are_refused_locally() {
        let (store, _storage) = store_over(Arc::new(StubBackend::new()));

        let update = store.update_quantity(&LineId::new("gid://line/1"), 2).await;
        let remove = store.remove_from_cart(&LineId::new("gid://line/1")).await;

        assert_eq!(update, MutationOutcome::NoActiveCart);
        assert_eq!(remove, MutationOutcome::NoActiveCart);
        assert!(!store.state().loading, "local refusals never set loading");
    }

    #[tokio::test]
    async fn out_of_order_responses_apply_in_issue_order() {
        let stub = Arc::new(StubBackend::new());
        let (store, _storage) = store_over(stub.clone());

        store.add_to_cart(&variant("gid://v1"), 1).await;
        let line = first_line_id(&store);

        // Calls 1 and 2 (the create was call 0) wait at their gates.
        let slow = Arc::new(Notify::new());
        let fast = Arc::new(Notify::new());
        stub.gate(1, slow.clone());
        stub.gate(2, fast.clone());

        let first = tokio::spawn({
            let store = store.clone();
            let line = line.clone();
            async move { store.update_quantity(&line, 2).await }
        });

        while stub.calls_started() < 2 {
            task::yield_now().await;
        }

        let second = tokio::spawn({
            let store = store.clone();
            let line = line.clone();
            async move { store.update_quantity(&line, 3).await }
        });

        while stub.calls_started() < 3 {
            task::yield_now().await;
        }

        // Resolve the later-issued mutation first.
        fast.notify_one();
        let second_outcome = second.await.expect("second task should join");

        slow.notify_one();
        let first_outcome = first.await.expect("first task should join");

        assert_eq!(second_outcome, MutationOutcome::Applied);
        assert_eq!(
            first_outcome,
            MutationOutcome::Superseded,
            "the stale response must be discarded, not applied"
        );

        let cart = store.state().cart.expect("store should be populated");
        let applied = cart.lines.first().expect("one line should remain");

        assert_eq!(applied.quantity, 3, "the later-issued snapshot wins");
        assert!(!store.state().loading, "loading clears once both settle");
    }

    #[tokio::test]
    async fn loading_flag_brackets_the_network_call() {
        let stub = Arc::new(StubBackend::new());
        let (store, _storage) = store_over(stub.clone());

        let gate = Arc::new(Notify::new());
        stub.gate(0, gate.clone());

        let pending = tokio::spawn({
            let store = store.clone();
            async move { store.add_to_cart(&variant("gid://v1"), 1).await }
        });

        while stub.calls_started() < 1 {
            task::yield_now().await;
        }

        assert!(
            store.state().loading,
            "loading must be observable while the call is in flight"
        );

        gate.notify_one();
        let outcome = pending.await.expect("task should join");

        assert_eq!(outcome, MutationOutcome::Applied);
        assert!(!store.state().loading, "loading must clear on completion");
    }

    #[tokio::test]
    async fn drawer_flags_are_purely_presentational() {
        let (store, _storage) = store_over(Arc::new(StubBackend::new()));

        store.open_drawer();
        assert!(store.state().drawer_open, "open should raise the flag");

        store.toggle_drawer();
        assert!(!store.state().drawer_open, "toggle should flip the flag");

        store.toggle_drawer();
        store.close_drawer();
        assert!(!store.state().drawer_open, "close should lower the flag");

        assert!(store.state().cart.is_none(), "drawer ops never touch the cart");
    }

    #[tokio::test]
    async fn subscribers_are_notified_of_changes() {
        let (store, _storage) = store_over(Arc::new(StubBackend::new()));
        let mut changes = store.subscribe();

        store.add_to_cart(&variant("gid://v1"), 1).await;

        assert!(
            changes.has_changed().expect("channel should be open"),
            "subscribers must see the mutation"
        );

        let state = changes.borrow_and_update().clone();
        assert!(state.cart.is_some(), "published state carries the snapshot");
    }

    #[tokio::test]
    async fn checkout_url_reflects_latest_snapshot() {
        let (store, _storage) = store_over(Arc::new(StubBackend::new()));

        assert!(store.checkout_url().is_none(), "no cart, no checkout url");

        store.add_to_cart(&variant("gid://v1"), 1).await;

        assert_eq!(
            store.checkout_url().as_deref(),
            Some("https://shop.example.com/checkout/1")
        );
    }
}
