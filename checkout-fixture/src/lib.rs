//! Randomized-but-valid [`Order`] values for tests.
//!
//! Every generated order has a unique uuid id, a non-blank payment method,
//! a shipping address and at least one line with positive quantity and price,
//! with a total that fits in an `i64`.
//! Individual fields can be pinned through [`OrderFixture::build`].

use checkout_core::{Order, OrderLine};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const PAYMENT_METHODS: &[&str] = &["SuperCard", "Visa", "Mastercard", "Amex", "PayPal"];
const STREETS: &[&str] = &["Harbour Road", "Mill Lane", "Station Street", "Kings Parade", "Quay Side"];
const CITIES: &[&str] = &["Leith", "Bristol", "Galway", "Utrecht", "Porto"];
const CURRENCIES: &[&str] = &["USD", "EUR", "GBP"];

const DEFAULT_REPEAT_COUNT: usize = 3;

pub struct OrderFixture {
    rng: StdRng,
    repeat_count: usize,
}

impl OrderFixture {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Same seed, same orders.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            repeat_count: DEFAULT_REPEAT_COUNT,
        }
    }

    /// Number of orders produced by `create_many`. Clamped to at least 2.
    pub fn repeat_count(mut self, count: usize) -> Self {
        self.repeat_count = count.max(2);
        self
    }

    pub fn create(&mut self) -> Order {
        self.generate(&Overrides::default())
    }

    pub fn create_many(&mut self) -> Vec<Order> {
        let count = self.repeat_count;
        (0..count).map(|_| self.create()).collect()
    }

    pub fn build(&mut self) -> OrderBuilder<'_> {
        OrderBuilder {
            fixture: self,
            overrides: Overrides::default(),
        }
    }

    fn generate(&mut self, overrides: &Overrides) -> Order {
        let order_id = match &overrides.order_id {
            Some(id) => id.clone(),
            None => uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid().to_string(),
        };
        let customer_id = match &overrides.customer_id {
            Some(id) => id.clone(),
            None => format!("{}@example.com", self.token(8).to_lowercase()),
        };
        let payment_method = match &overrides.payment_method {
            Some(method) => method.clone(),
            None => self.pick(PAYMENT_METHODS),
        };
        let shipping_address = match &overrides.shipping_address {
            Some(address) => address.clone(),
            None => format!(
                "{} {}, {}",
                self.rng.gen_range(1..=250),
                self.pick(STREETS),
                self.pick(CITIES)
            ),
        };

        let items = if overrides.without_items {
            Vec::new()
        } else {
            let lines = self.rng.gen_range(1..=3);
            (0..lines)
                .map(|_| {
                    OrderLine::new(
                        format!("SKU-{}", self.token(6).to_uppercase()),
                        self.rng.gen_range(1..=5),
                        self.rng.gen_range(100..=50_000),
                    )
                })
                .collect()
        };

        Order {
            order_id,
            customer_id,
            payment_method,
            shipping_address,
            items,
            currency: self.pick(CURRENCIES),
            created_at: chrono::Utc::now(),
        }
    }

    fn token(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    fn pick(&mut self, choices: &[&str]) -> String {
        choices.choose(&mut self.rng).copied().unwrap_or_default().to_string()
    }
}

impl Default for OrderFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct Overrides {
    order_id: Option<String>,
    customer_id: Option<String>,
    payment_method: Option<String>,
    shipping_address: Option<String>,
    without_items: bool,
}

/// Pins selected fields; everything else stays random.
pub struct OrderBuilder<'a> {
    fixture: &'a mut OrderFixture,
    overrides: Overrides,
}

impl OrderBuilder<'_> {
    /// Every order created by this builder shares the id.
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.overrides.order_id = Some(order_id.into());
        self
    }

    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.overrides.customer_id = Some(customer_id.into());
        self
    }

    pub fn with_payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.overrides.payment_method = Some(payment_method.into());
        self
    }

    pub fn with_shipping_address(mut self, address: impl Into<String>) -> Self {
        self.overrides.shipping_address = Some(address.into());
        self
    }

    pub fn without_items(mut self) -> Self {
        self.overrides.without_items = true;
        self
    }

    pub fn create(self) -> Order {
        self.fixture.generate(&self.overrides)
    }

    pub fn create_many(self) -> Vec<Order> {
        let count = self.fixture.repeat_count;
        (0..count).map(|_| self.fixture.generate(&self.overrides)).collect()
    }
}
