//! Normalized records produced by site adapters
//!
//! - `Solicitation`: one discovered procurement opportunity
//! - `Document`: a file attached to a solicitation's detail page

mod solicitation;

pub use solicitation::{Document, RawRecord, Solicitation};
