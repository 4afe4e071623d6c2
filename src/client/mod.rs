//! Form-side half of lead intake: field state, advisory validation and the
//! request to the intake endpoint.

pub mod form;
pub mod transport;

pub use form::{LeadForm, Phase};
pub use transport::HttpTransport;
