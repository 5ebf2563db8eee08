mod history;
mod message;
mod service;
mod side;

pub use history::{PricePoint, TradeCountPoint, TradeEvent};
pub use message::{Message, MessageId, Performative};
pub use service::{EVENT_SUBSCRIBER, ServiceDescriptor};
pub use side::Side;
