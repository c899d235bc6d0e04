use wasm_bindgen::JsValue;

/// Errors from the browser side of the game: bootstrapping, DOM and storage.
///
/// Gameplay rules themselves cannot fail.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("2d canvas context unavailable")]
    NoContext,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config JSON error: {0}")]
    ConfigJson(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(feature = "serde_json")]
impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::ConfigJson(err.to_string())
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
