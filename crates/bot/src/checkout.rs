use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use menubot_core::config::CheckoutConfig;
use menubot_core::domain::order::CustomerOrder;
use menubot_core::domain::user::UserInfo;
use menubot_core::errors::ApplicationError;

/// What the payment page needs to know about an order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckoutCart {
    pub item_name: String,
    /// Whole rands.
    pub cart_total: u64,
    pub order_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: String,
    pub email: Option<String>,
}

impl CheckoutCart {
    /// The sender's nickname and cell number stand in for first and last name.
    pub fn for_order(order: &CustomerOrder, user: &UserInfo, total: u64, prefix: &str) -> Self {
        Self {
            item_name: order.checkout_item_name(prefix),
            cart_total: total,
            order_id: order.order_id,
            first_name: user.nickname.clone(),
            last_name: user.cell_number.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("invalid {field}: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("cart total must be greater than zero")]
    EmptyCart,
    #[error("checkout gateway failure: {0}")]
    Gateway(String),
}

impl From<CheckoutError> for ApplicationError {
    fn from(value: CheckoutError) -> Self {
        Self::Integration(value.to_string())
    }
}

#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Starts a payment for `cart` and returns the link the customer should open.
    async fn initiate(&self, cart: &CheckoutCart) -> Result<String, CheckoutError>;
}

/// Builds a hosted payment page link by encoding the merchant settings and the
/// cart as query parameters on the configured host URL.
#[derive(Clone, Debug)]
pub struct HostedCheckoutLink {
    host_url: Url,
    merchant_id: String,
    merchant_key: SecretString,
    return_url: Option<Url>,
    cancel_url: Option<Url>,
    notify_url: Option<Url>,
}

impl HostedCheckoutLink {
    pub fn from_config(config: &CheckoutConfig) -> Result<Self, CheckoutError> {
        Ok(Self {
            host_url: parse_url("checkout.host_url", &config.host_url)?,
            merchant_id: config.merchant_id.clone(),
            merchant_key: config.merchant_key.clone(),
            return_url: parse_optional_url("checkout.return_url", config.return_url.as_deref())?,
            cancel_url: parse_optional_url("checkout.cancel_url", config.cancel_url.as_deref())?,
            notify_url: parse_optional_url("checkout.notify_url", config.notify_url.as_deref())?,
        })
    }

    pub fn link_for(&self, cart: &CheckoutCart) -> Result<Url, CheckoutError> {
        if cart.cart_total == 0 {
            return Err(CheckoutError::EmptyCart);
        }

        let mut link = self.host_url.clone();
        {
            let mut query = link.query_pairs_mut();
            query
                .append_pair("merchant_id", &self.merchant_id)
                .append_pair("merchant_key", self.merchant_key.expose_secret());
            for (key, url) in [
                ("return_url", &self.return_url),
                ("cancel_url", &self.cancel_url),
                ("notify_url", &self.notify_url),
            ] {
                if let Some(url) = url {
                    query.append_pair(key, url.as_str());
                }
            }
            if let Some(first_name) = &cart.first_name {
                query.append_pair("name_first", first_name);
            }
            query.append_pair("name_last", &cart.last_name);
            if let Some(email) = &cart.email {
                query.append_pair("email_address", email);
            }
            if let Some(order_id) = cart.order_id {
                query.append_pair("m_payment_id", &order_id.to_string());
            }
            query
                .append_pair("amount", &format!("{}.00", cart.cart_total))
                .append_pair("item_name", &cart.item_name);
        }

        Ok(link)
    }
}

#[async_trait]
impl CheckoutGateway for HostedCheckoutLink {
    async fn initiate(&self, cart: &CheckoutCart) -> Result<String, CheckoutError> {
        self.link_for(cart).map(String::from)
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, CheckoutError> {
    Url::parse(value).map_err(|source| CheckoutError::InvalidUrl { field, source })
}

fn parse_optional_url(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Url>, CheckoutError> {
    value.map(|value| parse_url(field, value)).transpose()
}
