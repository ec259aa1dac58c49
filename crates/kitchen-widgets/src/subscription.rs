//! Bridge a tokio channel into an iced subscription
//!
//! # Usage
//!
//! ```ignore
//! use kitchen_widgets::channel_subscription;
//!
//! fn subscription(&self) -> Subscription<Message> {
//!     channel_subscription(self.events.clone()).map(Message::Timer)
//! }
//! ```

use std::any::TypeId;
use std::hash::Hash;
use std::sync::Arc;

use iced::advanced::subscription::{self, EventStream, Hasher, Recipe};
use iced::futures::stream::BoxStream;
use iced::Subscription;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;

/// Shared receiver handed to [`channel_subscription`]
pub type SharedReceiver<T> = Arc<Mutex<UnboundedReceiver<T>>>;

/// Wrap a receiver so it can be handed to [`channel_subscription`]
pub fn shared_receiver<T>(receiver: UnboundedReceiver<T>) -> SharedReceiver<T> {
    Arc::new(Mutex::new(receiver))
}

struct ChannelRecipe<T> {
    /// Identity of the receiver (pointer address)
    id: u64,
    receiver: SharedReceiver<T>,
}

impl<T: Send + 'static> Recipe for ChannelRecipe<T> {
    type Output = T;

    fn hash(&self, state: &mut Hasher) {
        TypeId::of::<Self>().hash(state);
        self.id.hash(state);
    }

    fn stream(self: Box<Self>, _input: EventStream) -> BoxStream<'static, Self::Output> {
        Box::pin(iced::futures::stream::unfold(
            self.receiver,
            |rx| async move {
                // Ends the stream once every sender is gone
                let item = rx.lock().await.recv().await?;
                Some((item, rx))
            },
        ))
    }
}

/// Subscription yielding every item sent into the channel
///
/// The same `SharedReceiver` always maps to the same subscription, so
/// calling this from `subscription()` on every update keeps one stream alive.
pub fn channel_subscription<T>(receiver: SharedReceiver<T>) -> Subscription<T>
where
    T: Send + 'static,
{
    let id = Arc::as_ptr(&receiver) as usize as u64;
    subscription::from_recipe(ChannelRecipe { id, receiver })
}
