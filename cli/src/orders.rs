//! Order-intake model validated by the CLI.
//!
//! ```json
//! {
//!   "batchId": "B-2026-10-15",
//!   "channel": "Web",
//!   "orders": [
//!     {
//!       "id": "o-1",
//!       "sku": "ABC-1234",
//!       "quantity": 2,
//!       "total": "19.90",
//!       "priority": "Express",
//!       "gift": "true",
//!       "placedAt": "2026-10-15T09:30:00Z",
//!       "shipping": "{\"line1\": \"1 Main St\", \"city\": \"Springfield\", \"postalCode\": \"12345\", \"country\": \"US\"}"
//!     }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset};
use json_expectations_core::{
    shape, Admitted, Expectation, Field, ListExpectation, ObjectExpectation, ScalarExpectation,
    Symbols, Violation, Violations,
};
use regex::Regex;
use strum::{EnumString, IntoStaticStr, VariantNames};

/// Domain violation ids raised by this model.
pub mod ids {
    pub const BATCH_ID_BLANK: &str = "order.batch-id.blank";
    pub const BATCH_EMPTY: &str = "order.batch.empty";
    pub const BATCH_DUPLICATE_ID: &str = "order.batch.duplicate-id";
    pub const ID_BLANK: &str = "order.id.blank";
    pub const SKU_FORMAT: &str = "order.sku.format";
    pub const QUANTITY_NOT_POSITIVE: &str = "order.quantity.not-positive";
    pub const TOTAL_NEGATIVE: &str = "order.total.negative";
    pub const PLACED_AT_NOT_RFC3339: &str = "order.placed-at.not-rfc3339";
    pub const GIFT_NEEDS_SHIPPING: &str = "order.gift.needs-shipping";
    pub const ADDRESS_BLANK: &str = "order.address.blank";
    pub const COUNTRY_FORMAT: &str = "order.country.format";
}

fn sku_pattern() -> &'static Regex {
    static SKU: OnceLock<Regex> = OnceLock::new();
    SKU.get_or_init(|| Regex::new(r"^[A-Z]{3}-\d{4}$").expect("SKU pattern is a valid regex"))
}

fn reject_blank(text: &str, id: &'static str, path: &str, what: &str) -> Result<(), Violations> {
    if text.trim().is_empty() {
        Err(Violation::at(id, path, format!("The {what} cannot be blank.")).into())
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchId(String);

impl ScalarExpectation for BatchId {
    type Primitive = String;

    fn admit(value: Admitted<String>) -> Self {
        Self(value.into_inner())
    }

    fn primitive(&self) -> &String {
        &self.0
    }

    fn validate(self, path: &str) -> Result<Self, Violations> {
        reject_blank(&self.0, ids::BATCH_ID_BLANK, path, "batch id")?;
        Ok(self)
    }
}

impl Expectation for BatchId {
    type Shape = shape::Scalar;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ScalarExpectation for OrderId {
    type Primitive = String;

    fn admit(value: Admitted<String>) -> Self {
        Self(value.into_inner())
    }

    fn primitive(&self) -> &String {
        &self.0
    }

    fn validate(self, path: &str) -> Result<Self, Violations> {
        reject_blank(&self.0, ids::ID_BLANK, path, "order id")?;
        Ok(self)
    }
}

impl Expectation for OrderId {
    type Shape = shape::Scalar;
}

/// Stock-keeping unit: three capital letters, a dash, four digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sku(String);

impl ScalarExpectation for Sku {
    type Primitive = String;

    fn admit(value: Admitted<String>) -> Self {
        Self(value.into_inner())
    }

    fn primitive(&self) -> &String {
        &self.0
    }

    fn validate(self, path: &str) -> Result<Self, Violations> {
        if sku_pattern().is_match(&self.0) {
            Ok(self)
        } else {
            Err(Violation::at(
                ids::SKU_FORMAT,
                path,
                format!("The SKU \"{}\" does not look like ABC-1234.", self.0),
            )
            .into())
        }
    }
}

impl Expectation for Sku {
    type Shape = shape::Scalar;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quantity(i64);

impl Quantity {
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl ScalarExpectation for Quantity {
    type Primitive = i64;

    fn admit(value: Admitted<i64>) -> Self {
        Self(value.into_inner())
    }

    fn primitive(&self) -> &i64 {
        &self.0
    }

    fn validate(self, path: &str) -> Result<Self, Violations> {
        if self.0 >= 1 {
            Ok(self)
        } else {
            Err(Violation::at(
                ids::QUANTITY_NOT_POSITIVE,
                path,
                format!("Quantity must be at least 1, but was {}.", self.0),
            )
            .into())
        }
    }
}

impl Expectation for Quantity {
    type Shape = shape::Scalar;
}

/// Order total in the batch currency. Not `Hash`: doubles have no total
/// equality.
#[derive(Debug, Clone, PartialEq)]
pub struct Total(f64);

impl Total {
    pub fn get(&self) -> f64 {
        self.0
    }
}

impl ScalarExpectation for Total {
    type Primitive = f64;

    fn admit(value: Admitted<f64>) -> Self {
        Self(value.into_inner())
    }

    fn primitive(&self) -> &f64 {
        &self.0
    }

    fn validate(self, path: &str) -> Result<Self, Violations> {
        if self.0 >= 0.0 {
            Ok(self)
        } else {
            Err(Violation::at(ids::TOTAL_NEGATIVE, path, "Totals cannot be negative.").into())
        }
    }
}

impl Expectation for Total {
    type Shape = shape::Scalar;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, VariantNames)]
pub enum Priority {
    Standard,
    Express,
    Overnight,
}

impl Symbols for Priority {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PriorityField(Priority);

impl ScalarExpectation for PriorityField {
    type Primitive = Priority;

    fn admit(value: Admitted<Priority>) -> Self {
        Self(value.into_inner())
    }

    fn primitive(&self) -> &Priority {
        &self.0
    }
}

impl Expectation for PriorityField {
    type Shape = shape::Scalar;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, VariantNames)]
pub enum Channel {
    Web,
    Phone,
    Partner,
}

impl Symbols for Channel {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelField(Channel);

impl ScalarExpectation for ChannelField {
    type Primitive = Channel;

    fn admit(value: Admitted<Channel>) -> Self {
        Self(value.into_inner())
    }

    fn primitive(&self) -> &Channel {
        &self.0
    }
}

impl Expectation for ChannelField {
    type Shape = shape::Scalar;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gift(bool);

impl ScalarExpectation for Gift {
    type Primitive = bool;

    fn admit(value: Admitted<bool>) -> Self {
        Self(value.into_inner())
    }

    fn primitive(&self) -> &bool {
        &self.0
    }
}

impl Expectation for Gift {
    type Shape = shape::Scalar;
}

/// RFC 3339 timestamp, kept as written so normalization does not reformat it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacedAt(String);

impl PlacedAt {
    pub fn instant(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.0).ok()
    }
}

impl ScalarExpectation for PlacedAt {
    type Primitive = String;

    fn admit(value: Admitted<String>) -> Self {
        Self(value.into_inner())
    }

    fn primitive(&self) -> &String {
        &self.0
    }

    fn validate(self, path: &str) -> Result<Self, Violations> {
        match DateTime::parse_from_rfc3339(&self.0) {
            Ok(_) => Ok(self),
            Err(err) => Err(Violation::at(
                ids::PLACED_AT_NOT_RFC3339,
                path,
                format!("\"{}\" is not an RFC 3339 timestamp ({err}).", self.0),
            )
            .into()),
        }
    }
}

impl Expectation for PlacedAt {
    type Shape = shape::Scalar;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressText(String);

impl ScalarExpectation for AddressText {
    type Primitive = String;

    fn admit(value: Admitted<String>) -> Self {
        Self(value.into_inner())
    }

    fn primitive(&self) -> &String {
        &self.0
    }

    fn validate(self, path: &str) -> Result<Self, Violations> {
        reject_blank(&self.0, ids::ADDRESS_BLANK, path, "address line")?;
        Ok(self)
    }
}

impl Expectation for AddressText {
    type Shape = shape::Scalar;
}

/// ISO 3166-1 alpha-2 code, upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Country(String);

impl ScalarExpectation for Country {
    type Primitive = String;

    fn admit(value: Admitted<String>) -> Self {
        Self(value.into_inner())
    }

    fn primitive(&self) -> &String {
        &self.0
    }

    fn validate(self, path: &str) -> Result<Self, Violations> {
        if self.0.len() == 2 && self.0.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(self)
        } else {
            Err(Violation::at(
                ids::COUNTRY_FORMAT,
                path,
                format!("\"{}\" is not a two-letter upper-case country code.", self.0),
            )
            .into())
        }
    }
}

impl Expectation for Country {
    type Shape = shape::Scalar;
}

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub line1: AddressText,
    pub city: AddressText,
    pub postal_code: AddressText,
    pub country: Country,
}

#[derive(Default)]
pub struct AddressDraft {
    line1: Option<AddressText>,
    city: Option<AddressText>,
    postal_code: Option<AddressText>,
    country: Option<Country>,
}

impl ObjectExpectation for Address {
    type Draft = AddressDraft;

    fn fields() -> &'static [Field<Self>] {
        static FIELDS: OnceLock<Vec<Field<Address>>> = OnceLock::new();
        FIELDS.get_or_init(|| {
            vec![
                Field::required(
                    "line1",
                    |a: &Address| &a.line1,
                    |d: &mut AddressDraft, v| d.line1 = Some(v),
                ),
                Field::required(
                    "city",
                    |a: &Address| &a.city,
                    |d: &mut AddressDraft, v| d.city = Some(v),
                ),
                Field::required(
                    "postalCode",
                    |a: &Address| &a.postal_code,
                    |d: &mut AddressDraft, v| d.postal_code = Some(v),
                ),
                Field::required(
                    "country",
                    |a: &Address| &a.country,
                    |d: &mut AddressDraft, v| d.country = Some(v),
                ),
            ]
        })
    }

    fn finish(draft: AddressDraft) -> Option<Self> {
        Some(Address {
            line1: draft.line1?,
            city: draft.city?,
            postal_code: draft.postal_code?,
            country: draft.country?,
        })
    }
}

impl Expectation for Address {
    type Shape = shape::Object;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub sku: Sku,
    pub quantity: Quantity,
    pub total: Total,
    pub priority: PriorityField,
    pub gift: Option<Gift>,
    pub placed_at: PlacedAt,
    pub shipping: Option<Address>,
}

#[derive(Default)]
pub struct OrderDraft {
    id: Option<OrderId>,
    sku: Option<Sku>,
    quantity: Option<Quantity>,
    total: Option<Total>,
    priority: Option<PriorityField>,
    gift: Option<Gift>,
    placed_at: Option<PlacedAt>,
    shipping: Option<Address>,
}

impl ObjectExpectation for Order {
    type Draft = OrderDraft;

    fn fields() -> &'static [Field<Self>] {
        static FIELDS: OnceLock<Vec<Field<Order>>> = OnceLock::new();
        FIELDS.get_or_init(|| {
            vec![
                Field::required(
                    "id",
                    |o: &Order| &o.id,
                    |d: &mut OrderDraft, v| d.id = Some(v),
                ),
                Field::required(
                    "sku",
                    |o: &Order| &o.sku,
                    |d: &mut OrderDraft, v| d.sku = Some(v),
                ),
                Field::required(
                    "quantity",
                    |o: &Order| &o.quantity,
                    |d: &mut OrderDraft, v| d.quantity = Some(v),
                ),
                Field::required(
                    "total",
                    |o: &Order| &o.total,
                    |d: &mut OrderDraft, v| d.total = Some(v),
                ),
                Field::required(
                    "priority",
                    |o: &Order| &o.priority,
                    |d: &mut OrderDraft, v| d.priority = Some(v),
                ),
                Field::optional(
                    "gift",
                    |o: &Order| o.gift.as_ref(),
                    |d: &mut OrderDraft, v| d.gift = Some(v),
                ),
                Field::required(
                    "placedAt",
                    |o: &Order| &o.placed_at,
                    |d: &mut OrderDraft, v| d.placed_at = Some(v),
                ),
                Field::optional(
                    "shipping",
                    |o: &Order| o.shipping.as_ref(),
                    |d: &mut OrderDraft, v| d.shipping = Some(v),
                ),
            ]
        })
    }

    fn finish(draft: OrderDraft) -> Option<Self> {
        Some(Order {
            id: draft.id?,
            sku: draft.sku?,
            quantity: draft.quantity?,
            total: draft.total?,
            priority: draft.priority?,
            gift: draft.gift,
            placed_at: draft.placed_at?,
            shipping: draft.shipping,
        })
    }

    fn validate(self, path: &str) -> Result<Self, Violations> {
        let is_gift = self.gift.as_ref().is_some_and(|g| g.0);
        if is_gift && self.shipping.is_none() {
            return Err(Violation::at(
                ids::GIFT_NEEDS_SHIPPING,
                path,
                "Gift orders need a shipping address.",
            )
            .into());
        }
        Ok(self)
    }
}

impl Expectation for Order {
    type Shape = shape::Object;
}

/// Non-empty list of orders with unique ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Orders(Vec<Order>);

impl ListExpectation for Orders {
    type Element = Order;

    fn admit(elements: Admitted<Vec<Order>>) -> Self {
        Self(elements.into_inner())
    }

    fn elements(&self) -> &[Order] {
        &self.0
    }

    fn validate(self, path: &str) -> Result<Self, Violations> {
        if self.0.is_empty() {
            return Err(
                Violation::at(ids::BATCH_EMPTY, path, "A batch must contain at least one order.")
                    .into(),
            );
        }

        let mut seen = HashSet::new();
        let mut violations = Violations::new();
        for (index, order) in self.0.iter().enumerate() {
            if !seen.insert(order.id.as_str()) {
                violations.push(Violation::at(
                    ids::BATCH_DUPLICATE_ID,
                    &json_expectations_core::path::index(path, index),
                    format!("The order id \"{}\" appears more than once.", order.id.as_str()),
                ));
            }
        }

        if violations.is_empty() {
            Ok(self)
        } else {
            Err(violations)
        }
    }
}

impl Expectation for Orders {
    type Shape = shape::List;
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBatch {
    pub batch_id: BatchId,
    pub channel: Option<ChannelField>,
    pub orders: Orders,
}

impl OrderBatch {
    pub fn orders(&self) -> &[Order] {
        &self.orders.0
    }

    /// Earliest and latest `placedAt` in the batch.
    pub fn placed_window(&self) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let mut instants = self.orders().iter().filter_map(|o| o.placed_at.instant());
        let first = instants.next()?;
        Some(instants.fold((first, first), |(lo, hi), at| (lo.min(at), hi.max(at))))
    }
}

#[derive(Default)]
pub struct OrderBatchDraft {
    batch_id: Option<BatchId>,
    channel: Option<ChannelField>,
    orders: Option<Orders>,
}

impl ObjectExpectation for OrderBatch {
    type Draft = OrderBatchDraft;

    fn fields() -> &'static [Field<Self>] {
        static FIELDS: OnceLock<Vec<Field<OrderBatch>>> = OnceLock::new();
        FIELDS.get_or_init(|| {
            vec![
                Field::required(
                    "batchId",
                    |b: &OrderBatch| &b.batch_id,
                    |d: &mut OrderBatchDraft, v| d.batch_id = Some(v),
                ),
                Field::optional(
                    "channel",
                    |b: &OrderBatch| b.channel.as_ref(),
                    |d: &mut OrderBatchDraft, v| d.channel = Some(v),
                ),
                Field::required(
                    "orders",
                    |b: &OrderBatch| &b.orders,
                    |d: &mut OrderBatchDraft, v| d.orders = Some(v),
                ),
            ]
        })
    }

    fn finish(draft: OrderBatchDraft) -> Option<Self> {
        Some(OrderBatch {
            batch_id: draft.batch_id?,
            channel: draft.channel,
            orders: draft.orders?,
        })
    }
}

impl Expectation for OrderBatch {
    type Shape = shape::Object;
}
