//! JSON-RPC 2.0 envelopes and the response shapes the client reads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sol_core::Blockhash;

use crate::error::ClientError;

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> RpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    #[serde(default)]
    pub id: Option<u64>,
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

impl<T> RpcResponse<T> {
    pub fn into_result(self) -> Result<T, ClientError> {
        if let Some(err) = self.error {
            return Err(ClientError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        self.result
            .ok_or_else(|| ClientError::InvalidResponse("response has neither result nor error".into()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcContext {
    pub slot: u64,
}

/// Results that carry the slot they were evaluated at.
#[derive(Debug, Clone, Deserialize)]
pub struct WithContext<T> {
    pub context: RpcContext,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestBlockhash {
    pub blockhash: Blockhash,
    pub last_valid_block_height: u64,
}
