use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown demo '{0}' (expected 'grid' or 'feedback')")]
    UnknownDemo(String),
    #[error("unknown texture format '{0}' (expected 'rgba' or 'red')")]
    UnknownTexture(String),
    #[error("'{key}' must be a positive integer, got '{value}'")]
    NotPositive { key: &'static str, value: String },
    #[error("invalid light direction '{0}': expected three numbers, not all zero")]
    Light(String),
    #[error("unknown log level '{0}'")]
    LogLevel(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("{0} not available")]
    Missing(&'static str),
    #[error("WebGL2 not supported")]
    NoWebGl2,
    #[error("failed to compile shader: {0}")]
    Compile(String),
    #[error("failed to link program: {0}")]
    Link(String),
    #[error("uniform '{0}' not found in program")]
    Uniform(&'static str),
    #[error("failed to create {0}")]
    Alloc(&'static str),
    #[error("framebuffer incomplete (status 0x{0:x})")]
    Framebuffer(u32),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for DemoError {
    fn from(value: JsValue) -> Self {
        DemoError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<DemoError> for JsValue {
    fn from(err: DemoError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
