/// Vendor API clients
///
/// One client per Unisender API family. Handlers talk to the traits so
/// tests can substitute fakes; the production impls issue a single HTTP
/// request per call and never retry.
pub mod lists;
pub mod mailer;

pub use lists::{DoubleOptin, ListsClient, SubscribeContact, UnsubscribeContact};
pub use mailer::{MailerClient, SendMessage};

use crate::error::MailgateError;
use async_trait::async_trait;
use serde_json::Value;

/// Subscription-list management (Unisender classic API)
#[async_trait]
pub trait ListApi: Send + Sync {
    async fn subscribe(&self, contact: &SubscribeContact) -> Result<Value, MailgateError>;
    async fn unsubscribe(&self, contact: &UnsubscribeContact) -> Result<Value, MailgateError>;
}

/// Transactional sending (Unisender Go API)
#[async_trait]
pub trait MailerApi: Send + Sync {
    async fn send(&self, message: &SendMessage) -> Result<Value, MailgateError>;
}
