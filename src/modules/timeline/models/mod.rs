pub mod timeline_event;

pub use timeline_event::{AddEventRequest, EventType, TimelineEvent};
