pub mod common;
pub mod documents;
pub mod events;
pub mod health;

pub use documents::{clear_documents, delete_documents, post_documents, query_documents};
pub use events::{
	post_events, post_seatgeek_events, post_stored_events, post_sync_events,
	post_ticketmaster_events,
};
pub use health::{health, ready};
