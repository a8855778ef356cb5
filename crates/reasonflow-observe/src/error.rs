//! Errors from the rendering layer.

use thiserror::Error;

/// Convenience alias for results within the observe crate.
pub type Result<T> = std::result::Result<T, ObserveError>;

/// Errors that can occur when selecting or configuring a view.
///
/// Rendering itself never fails: cyclic and dangling chains still render.
#[derive(Debug, Error)]
pub enum ObserveError {
    #[error("unknown view: '{name}'. Available views: text, mermaid")]
    UnknownView { name: String },

    #[error("unknown flow direction: '{0}'. Expected one of TD, LR, BT, RL")]
    UnknownDirection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_input() {
        let err = ObserveError::UnknownView { name: "svg".into() };
        assert!(err.to_string().contains("'svg'"));
        assert!(err.to_string().contains("mermaid"));
        let err = ObserveError::UnknownDirection("UP".into());
        assert!(err.to_string().starts_with("unknown flow direction: 'UP'"));
    }
}
