//! Checkout: delivery and payment options, and order placement.

use std::sync::LazyLock;

use quickmart_core::{
    AddressId, CartTotals, DeliveryOptionId, OrderLine, OrderSummary, OrderTracking,
    PaymentMethodId, Price,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use super::Latency;
use super::catalog::CatalogService;
use crate::stores::CartStore;

const PROCESSING_DELAY_MS: u64 = 2000;

/// Errors rejecting an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Please select a delivery address")]
    MissingAddress,

    #[error("Unknown delivery address: {0}")]
    UnknownAddress(AddressId),

    #[error("Please select a payment method")]
    MissingPaymentMethod,

    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(PaymentMethodId),

    #[error("Please select a delivery option")]
    MissingDeliveryOption,

    #[error("Unknown delivery option: {0}")]
    UnknownDeliveryOption(DeliveryOptionId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub name: &'static str,
    pub address: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub zip_code: &'static str,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    /// Card brand.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Masked card number.
    pub card_number: &'static str,
    pub expiry_date: &'static str,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOption {
    pub id: DeliveryOptionId,
    pub name: &'static str,
    pub description: &'static str,
    pub price: Price,
    pub estimated_time: &'static str,
}

/// Everything the checkout screen offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOptions {
    pub addresses: Vec<Address>,
    pub payment_methods: Vec<PaymentMethod>,
    pub delivery_options: Vec<DeliveryOption>,
    /// The delivery option preselected on the checkout screen.
    pub default_delivery_option_id: DeliveryOptionId,
}

static OPTIONS: LazyLock<CheckoutOptions> = LazyLock::new(|| CheckoutOptions {
    addresses: vec![
        Address {
            id: AddressId::new("1"),
            name: "Home",
            address: "123 Main Street, Apt 4B",
            city: "New York",
            state: "NY",
            zip_code: "10001",
            is_default: true,
        },
        Address {
            id: AddressId::new("2"),
            name: "Work",
            address: "456 Business Ave, Suite 200",
            city: "New York",
            state: "NY",
            zip_code: "10022",
            is_default: false,
        },
    ],
    payment_methods: vec![
        PaymentMethod {
            id: PaymentMethodId::new("1"),
            kind: "visa",
            card_number: "**** **** **** 4242",
            expiry_date: "12/25",
            is_default: true,
        },
        PaymentMethod {
            id: PaymentMethodId::new("2"),
            kind: "mastercard",
            card_number: "**** **** **** 5555",
            expiry_date: "10/24",
            is_default: false,
        },
    ],
    delivery_options: vec![
        DeliveryOption {
            id: DeliveryOptionId::new("1"),
            name: "Express Delivery",
            description: "Delivery within 30 minutes",
            price: Price::from_cents(299),
            estimated_time: "30 min",
        },
        DeliveryOption {
            id: DeliveryOptionId::new("2"),
            name: "Standard Delivery",
            description: "Delivery within 1 hour",
            price: Price::ZERO,
            estimated_time: "60 min",
        },
    ],
    default_delivery_option_id: DeliveryOptionId::new("1"),
});

/// The customer's choices at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSelection {
    pub address_id: Option<AddressId>,
    pub payment_method_id: Option<PaymentMethodId>,
    pub delivery_option_id: Option<DeliveryOptionId>,
}

impl CheckoutSelection {
    /// The selection the checkout screen starts with: default address,
    /// default payment method and the preselected delivery option.
    #[must_use]
    pub fn defaults() -> Self {
        let options = &*OPTIONS;
        Self {
            address_id: options
                .addresses
                .iter()
                .find(|a| a.is_default)
                .map(|a| a.id.clone()),
            payment_method_id: options
                .payment_methods
                .iter()
                .find(|p| p.is_default)
                .map(|p| p.id.clone()),
            delivery_option_id: Some(options.default_delivery_option_id.clone()),
        }
    }
}

/// Price breakdown of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCharges {
    pub subtotal: Price,
    pub discount: Price,
    pub delivery_fee: Price,
    /// Cart total plus delivery fee.
    pub total: Price,
}

impl OrderCharges {
    #[must_use]
    pub fn new(cart: CartTotals, delivery_fee: Price) -> Self {
        Self {
            subtotal: cart.subtotal,
            discount: cart.discount,
            delivery_fee,
            total: cart.total + delivery_fee,
        }
    }
}

/// A successfully placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order: OrderSummary,
    pub charges: OrderCharges,
    pub address: Address,
    pub payment_method: PaymentMethod,
    pub delivery_option: DeliveryOption,
    pub tracking: OrderTracking,
}

/// Checkout service.
pub struct CheckoutService<'a> {
    cart: &'a CartStore,
    catalog: &'a CatalogService,
    latency: Latency,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub const fn new(cart: &'a CartStore, catalog: &'a CatalogService, latency: Latency) -> Self {
        Self {
            cart,
            catalog,
            latency,
        }
    }

    /// The static addresses, payment methods and delivery options.
    #[must_use]
    pub fn options() -> &'static CheckoutOptions {
        &OPTIONS
    }

    /// Place an order for the current cart.
    ///
    /// On success the order is added to the order history and the ordered
    /// lines leave the cart. Orders from the same cart are placed one at a
    /// time, so a second concurrent call sees the cart this one left behind.
    ///
    /// # Errors
    ///
    /// Returns a `CheckoutError` if the cart is empty or any selection is
    /// missing or unknown. Nothing changes in that case.
    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        selection: &CheckoutSelection,
    ) -> Result<PlacedOrder, CheckoutError> {
        let _checkout = self.cart.begin_checkout().await;
        let cart = self.cart.snapshot().await;
        if cart.items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let (address, payment_method, delivery_option) = resolve(selection)?;
        let charges = OrderCharges::new(cart.totals, delivery_option.price);

        self.latency.wait(PROCESSING_DELAY_MS).await;

        let items = cart
            .items
            .iter()
            .map(|line| OrderLine {
                id: line.id.clone(),
                name: line.name.clone(),
                quantity: line.quantity,
                price: line.price,
            })
            .collect();
        let order = self.catalog.record_order(items, charges.total).await;
        self.cart.remove_ordered(&cart.items).await;

        tracing::info!(
            order_id = %order.id,
            total = %charges.total,
            delivery = delivery_option.name,
            "Order placed"
        );

        Ok(PlacedOrder {
            order,
            charges,
            address,
            payment_method,
            delivery_option,
            tracking: OrderTracking::new(),
        })
    }
}

fn resolve(
    selection: &CheckoutSelection,
) -> Result<(Address, PaymentMethod, DeliveryOption), CheckoutError> {
    let options = &*OPTIONS;

    let address_id = selection
        .address_id
        .as_ref()
        .filter(|id| !id.as_str().is_empty())
        .ok_or(CheckoutError::MissingAddress)?;
    let address = options
        .addresses
        .iter()
        .find(|a| &a.id == address_id)
        .cloned()
        .ok_or_else(|| CheckoutError::UnknownAddress(address_id.clone()))?;

    let payment_id = selection
        .payment_method_id
        .as_ref()
        .filter(|id| !id.as_str().is_empty())
        .ok_or(CheckoutError::MissingPaymentMethod)?;
    let payment_method = options
        .payment_methods
        .iter()
        .find(|p| &p.id == payment_id)
        .cloned()
        .ok_or_else(|| CheckoutError::UnknownPaymentMethod(payment_id.clone()))?;

    let delivery_id = selection
        .delivery_option_id
        .as_ref()
        .filter(|id| !id.as_str().is_empty())
        .ok_or(CheckoutError::MissingDeliveryOption)?;
    let delivery_option = options
        .delivery_options
        .iter()
        .find(|d| &d.id == delivery_id)
        .cloned()
        .ok_or_else(|| CheckoutError::UnknownDeliveryOption(delivery_id.clone()))?;

    Ok((address, payment_method, delivery_option))
}
