//! Props Palette - control selection and default resolution for story props.
//!
//! Each declared prop is classified ([`infer_prop_kind`]), given a default
//! ([`resolve_default`]) and bound to a control widget ([`control_binding`]).
//! File and function props are not bound to controls; they receive an empty
//! file or a callback stand-in instead.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use vize_docent::component::PropDeclaration;
//! use vize_docent::palette::{
//!     resolve_input, Acknowledge, ArgValue, EchoControls, LogAcknowledge, PropKind, PropOverrides,
//! };
//!
//! let prop = PropDeclaration::from_json(serde_json::json!({ "type": "Number" }));
//! let acknowledge: Rc<dyn Acknowledge> = Rc::new(LogAcknowledge);
//! let input = resolve_input("count", &prop, PropOverrides::default(), &EchoControls, &acknowledge);
//!
//! assert_eq!(input.kind, PropKind::Number);
//! assert_eq!(input.value.as_control(), Some(&ArgValue::Json(serde_json::json!(0))));
//! ```

mod controls;
mod inference;
mod placeholder;
mod resolve;
mod types;

pub use controls::{Acknowledge, AcknowledgeError, Controls, EchoControls, LogAcknowledge};
pub use inference::{infer_prop_kind, runtime_prop_kind};
pub use placeholder::{Member, Placeholder, PlaceholderOwner, StubFn};
pub use resolve::{
    control_binding, insert_default_choice, resolve_default, resolve_input, PropOverrides,
    ResolvedInput,
};
pub use types::*;
