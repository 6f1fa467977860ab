//! Collaborators supplied by the host: the control library and the
//! acknowledgment sink behind callback stand-ins.

use super::types::{ArgValue, ControlBinding};

/// Interactive control library.
///
/// Renders (or looks up) the widget for a binding and returns its live value.
pub trait Controls {
    fn value(&self, binding: &ControlBinding) -> ArgValue;
}

/// Headless control library that returns each binding's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoControls;

impl Controls for EchoControls {
    #[inline]
    fn value(&self, binding: &ControlBinding) -> ArgValue {
        binding.default_value.clone()
    }
}

impl<F> Controls for F
where
    F: Fn(&ControlBinding) -> ArgValue,
{
    #[inline]
    fn value(&self, binding: &ControlBinding) -> ArgValue {
        self(binding)
    }
}

/// Error reported by an acknowledgment sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AcknowledgeError {
    #[error("Acknowledgment sink is unavailable")]
    Unavailable,

    #[error("Acknowledgment failed: {0}")]
    Failed(String),
}

/// Visible acknowledgment performed when a callback stand-in is called.
pub trait Acknowledge {
    fn acknowledge(&self, prop_name: &str) -> Result<(), AcknowledgeError>;
}

/// Acknowledges by logging the prop name.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAcknowledge;

impl Acknowledge for LogAcknowledge {
    fn acknowledge(&self, prop_name: &str) -> Result<(), AcknowledgeError> {
        tracing::info!("{}", prop_name);
        Ok(())
    }
}
