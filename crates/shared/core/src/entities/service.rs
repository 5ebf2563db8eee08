use serde::{Deserialize, Serialize};

/// Service type companies broadcast their announcements to
pub const EVENT_SUBSCRIBER: &str = "event-subscriber";

/// A capability an agent advertises in the directory
///
/// Many agents may advertise the same `service_type`; lookups match on the
/// type only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub service_type: String,
    pub service_name: String,
}

impl ServiceDescriptor {
    pub fn new(service_type: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            service_name: service_name.into(),
        }
    }

    /// Descriptor for an agent consuming company announcements
    pub fn event_subscriber() -> Self {
        Self::new(EVENT_SUBSCRIBER, "EventSubscriberService")
    }
}
