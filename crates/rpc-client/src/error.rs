use thiserror::Error;

/// Failure of a single JSON-RPC request: transport, RPC error object or an
/// unexpected result shape.
#[derive(Error, Debug)]
#[error("{client} request {method} failed: {source}")]
pub struct RPCRequestError {
    pub client: &'static str,
    pub method: String,
    pub source: anyhow::Error,
}

impl RPCRequestError {
    pub fn new<E: Into<anyhow::Error>>(client: &'static str, method: &str, source: E) -> Self {
        RPCRequestError {
            client,
            method: method.to_owned(),
            source: source.into(),
        }
    }
}
