//! Client-side form validation engine.
//!
//! Components, leaves first:
//! - [`rule`]: pure rule evaluation (pattern, built-in, custom predicate)
//! - [`field`]: one text field with required/blur/success semantics
//! - [`group`]: one checkbox group with "at least one selected" semantics
//! - [`form`]: the container that aggregates entries and decides whether the
//!   form may be submitted
//!
//! Invalid user input is data ([`FieldStatus::Invalid`]), never an error.
//! [`FormError`] is reserved for configuration mistakes such as duplicate
//! names or toggling an option outside a group's vocabulary.
//!
//! # Example
//!
//! ```
//! use form_validate::{FieldConfig, FieldStatus, Form, GroupConfig, Rule};
//!
//! let mut form = Form::new();
//! form.register_field(
//!     "email",
//!     FieldConfig::new()
//!         .required("Please enter your email")
//!         .rule(Rule::pattern("email", r"\S+@\S+\.\S+")?),
//! )?;
//! form.register_group(
//!     "category",
//!     GroupConfig::new(["Romance", "Fantasy", "SF"]).required(true),
//! )?;
//!
//! form.set_value("email", "")?;
//! assert_eq!(
//!     form.blur("email")?,
//!     FieldStatus::Invalid("Please enter your email".to_string())
//! );
//!
//! form.set_value("email", "writer@example.com")?;
//! form.toggle_option("category", "SF")?;
//! assert!(form.is_submittable());
//! # Ok::<(), form_validate::FormError>(())
//! ```

pub mod field;
pub mod form;
pub mod group;
pub mod rule;
pub mod submit;

pub use field::{DEFAULT_VALIDATE_ERROR_MESSAGE, FieldConfig, FieldController};
pub use form::{ConfigPolicy, EntryRef, Form};
pub use group::{CheckboxGroup, DEFAULT_GROUP_REQUIRED_MESSAGE, GroupConfig};
pub use rule::{Predicate, Rule, evaluate};
pub use submit::{EventOutcome, FormValues, SubmitOutcome};

// Re-export the model so hosts need a single dependency.
pub use form_model::{
    EntryKind, FieldSpec, FieldStatus, FormError, FormEvent, FormSpec, GroupSpec, InputType,
    NamedRule,
};
