//! Outbound order-created notifications.
//!
//! Invokes a webhook with the created order and the submitting consultant's
//! name. The call is fire-and-forget: a failure is logged and never rolls
//! back or re-surfaces as an order-creation failure.

use serde::Serialize;

use crate::models::Order;

/// Payload posted to the notification webhook.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderNotification<'a> {
    order: &'a Order,
    consultant: &'a str,
}

/// Notification client. A no-op when no webhook URL is configured.
pub struct Notifier {
    client: reqwest::Client,
    url: Option<String>,
}

impl Notifier {
    pub fn new(url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Send the order-created notification from a detached task.
    pub fn order_created(&self, order: &Order, consultant: &str) {
        let Some(url) = self.url.clone() else {
            return;
        };

        let body = match serde_json::to_value(OrderNotification { order, consultant }) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to serialize order notification: {}", e);
                return;
            }
        };

        let client = self.client.clone();
        let order_id = order.id.clone();
        tokio::spawn(async move {
            match client.post(&url).json(&body).send().await {
                Ok(resp) if resp.status().is_success() => {
                    tracing::debug!("Order notification sent for {}", order_id);
                }
                Ok(resp) => {
                    tracing::warn!(
                        "Order notification for {} returned status {}",
                        order_id,
                        resp.status()
                    );
                }
                Err(e) => {
                    tracing::warn!("Failed to send order notification for {}: {}", order_id, e);
                }
            }
        });
    }
}
