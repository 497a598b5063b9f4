//! The execution capability behind the dispatch server.

use crate::HandlerError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

/// Executes JSON-RPC methods.
///
/// This is the only place method semantics live. The dispatch server forwards the method
/// name and parameters verbatim and maps the returned [`HandlerError`] onto a wire error.
#[async_trait]
#[auto_impl::auto_impl(&, Box, Arc)]
pub trait FullnodeHandler: Debug + Send + Sync {
    /// Handles `method` with the raw `params`, which are JSON `null` when absent.
    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, HandlerError>;
}

/// Tries `primary` first and falls through to `fallback` when `primary` does not serve the
/// method.
///
/// Any other outcome of `primary`, including errors, is final.
#[derive(Debug, Clone)]
pub struct FallbackHandler<A, B> {
    primary: A,
    fallback: B,
}

impl<A, B> FallbackHandler<A, B> {
    /// Creates a new [`FallbackHandler`].
    pub const fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<A, B> FullnodeHandler for FallbackHandler<A, B>
where
    A: FullnodeHandler,
    B: FullnodeHandler,
{
    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, HandlerError> {
        match self.primary.handle_request(method, params.clone()).await {
            Err(HandlerError::UnsupportedMethod(_)) => {
                self.fallback.handle_request(method, params).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// Serves a fixed set of methods with canned outcomes.
    #[derive(Debug, Default)]
    pub(crate) struct MockHandler;

    #[async_trait]
    impl FullnodeHandler for MockHandler {
        async fn handle_request(&self, method: &str, params: Value) -> Result<Value, HandlerError> {
            match method {
                "echo" => Ok(params),
                "revert" => Err(HandlerError::Revert("insufficient balance".to_string())),
                "bad_params" => Err(HandlerError::InvalidParams("expected index".to_string())),
                "internal" => Err(HandlerError::Internal("connection refused".to_string())),
                "sleep" => {
                    tokio::time::sleep(std::time::Duration::from_secs(60)).await;
                    Ok(Value::Null)
                }
                "panic" => panic!("handler exploded"),
                _ => Err(HandlerError::UnsupportedMethod(method.to_string())),
            }
        }
    }

    #[derive(Debug)]
    struct Constant(&'static str);

    #[async_trait]
    impl FullnodeHandler for Constant {
        async fn handle_request(&self, _: &str, _: Value) -> Result<Value, HandlerError> {
            Ok(json!(self.0))
        }
    }

    #[tokio::test]
    async fn test_fallback_only_on_unsupported() {
        let handler = FallbackHandler::new(MockHandler, Constant("fallback"));

        assert_eq!(handler.handle_request("echo", json!([1])).await, Ok(json!([1])));
        assert_eq!(handler.handle_request("eth_chainId", Value::Null).await, Ok(json!("fallback")));
        assert_eq!(
            handler.handle_request("revert", Value::Null).await,
            Err(HandlerError::Revert("insufficient balance".to_string()))
        );
    }
}
