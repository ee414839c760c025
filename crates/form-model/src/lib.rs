//! Data model for client-side form validation.
//!
//! This crate holds the plain types shared by the validation engine and its
//! hosts:
//! - [`status`]: the derived [`FieldStatus`] shown next to each input
//! - [`spec`]: declarative field, checkbox-group and form definitions
//! - [`event`]: inbound host events (change, blur, toggle, submit attempt)
//! - [`error`]: configuration and loading errors
//!
//! Nothing here evaluates rules; see the `form-validate` crate.

pub mod error;
pub mod event;
pub mod spec;
pub mod status;

pub use error::{EntryKind, FormError, Result};
pub use event::FormEvent;
pub use spec::{FieldSpec, FormSpec, GroupSpec, InputType, NamedRule};
pub use status::FieldStatus;
