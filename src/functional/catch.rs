use std::any::Any;
use std::fmt;

/// Panic payload for conditions that must never be turned into an ordinary
/// failure value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fatal {
    reason: String,
}

impl Fatal {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Panic payload signalling cooperative cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

pub(crate) fn is_fatal(payload: &(dyn Any + Send)) -> bool {
    payload.is::<Fatal>() || payload.is::<Cancelled>()
}

/// A panic captured by [`Either::catch`](super::Either::catch).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("panicked: {message}")]
pub struct Caught {
    message: String,
}

impl Caught {
    pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fatal: {}", self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_payloads() {
        let fatal: Box<dyn Any + Send> = Box::new(Fatal::new("link error"));
        let cancelled: Box<dyn Any + Send> = Box::new(Cancelled);
        let ordinary: Box<dyn Any + Send> = Box::new("oops");

        assert!(is_fatal(fatal.as_ref()));
        assert!(is_fatal(cancelled.as_ref()));
        assert!(!is_fatal(ordinary.as_ref()));
    }

    #[test]
    fn extracts_panic_messages() {
        let from_str = Caught::from_payload(Box::new("static"));
        let from_string = Caught::from_payload(Box::new(String::from("owned")));
        let from_other = Caught::from_payload(Box::new(42_u8));

        assert_eq!(from_str.message(), "static");
        assert_eq!(from_string.message(), "owned");
        assert_eq!(from_other.message(), "non-string panic payload");
    }
}
