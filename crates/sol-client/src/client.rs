//! Fetch a blockhash, sign, and submit.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use sol_core::{signer, Keypair, MessageBuilder, Signature, SolError, Transaction};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::rpc::{LatestBlockhash, RpcRequest, RpcResponse, WithContext};
use crate::transport::Transport;

/// JSON-RPC client over a pluggable [`Transport`].
pub struct RpcClient<T> {
    transport: T,
    config: ClientConfig,
    next_id: AtomicU64,
}

impl<T: Transport> RpcClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn call<R: DeserializeOwned>(&self, method: &str, params: Value) -> Result<R, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::to_string(&RpcRequest::new(id, method, params))?;

        tracing::debug!(method, id, url = self.config.endpoint_url(), "rpc request");
        let text = self.transport.post(self.config.endpoint_url(), &body)?;

        let response: RpcResponse<R> = serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("{method}: {e}")))?;
        if response.id.is_some_and(|rid| rid != id) {
            return Err(ClientError::InvalidResponse(format!(
                "{method}: response id does not match request id {id}"
            )));
        }

        response.into_result().inspect_err(|e| {
            tracing::warn!(method, id, error = %e, "rpc call failed");
        })
    }

    pub fn latest_blockhash(&self) -> Result<LatestBlockhash, ClientError> {
        let result: WithContext<LatestBlockhash> = self.call(
            "getLatestBlockhash",
            json!([{ "commitment": self.config.commitment.as_str() }]),
        )?;
        tracing::debug!(
            slot = result.context.slot,
            blockhash = %result.value.blockhash,
            "fetched latest blockhash"
        );
        Ok(result.value)
    }

    /// Submit a fully signed transaction and return its signature.
    pub fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, ClientError> {
        if !transaction.is_fully_signed() {
            let signatures = &transaction.signatures;
            let missing = transaction
                .message
                .signer_keys()
                .iter()
                .enumerate()
                .find(|(i, _)| signatures.get(*i).is_none_or(Signature::is_placeholder))
                .map(|(_, key)| *key);
            return Err(match missing {
                Some(key) => SolError::MissingSigner(key),
                None => SolError::InvalidMessage("more signatures than required signers".into()),
            }
            .into());
        }

        let encoded = transaction.to_base64()?;
        let text: String = self.call(
            "sendTransaction",
            json!([
                encoded,
                {
                    "encoding": "base64",
                    "skipPreflight": self.config.skip_preflight,
                    "preflightCommitment": self.config.commitment.as_str()
                }
            ]),
        )?;
        let signature = Signature::from_base58(&text)?;

        if transaction.signature() != Some(&signature) {
            tracing::warn!(%signature, "node returned a signature other than the fee payer's");
        }
        tracing::info!(%signature, "transaction submitted");
        Ok(signature)
    }

    /// Set a fresh blockhash on `builder`, sign with `signers` (the first
    /// pays fees) and submit.
    pub fn sign_and_send(
        &self,
        builder: &mut MessageBuilder,
        signers: &[&Keypair],
    ) -> Result<Signature, ClientError> {
        let latest = self.latest_blockhash()?;
        builder.set_recent_blockhash(latest.blockhash);
        let transaction = signer::sign(builder, signers)?;
        self.send_transaction(&transaction)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use sol_core::programs::system;
    use sol_core::Blockhash;

    use super::*;

    const BLOCKHASH: &str = "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N";

    /// Replies to each method with a canned result and records requests.
    struct MockTransport {
        requests: RefCell<Vec<(String, Value)>>,
        send_result: Value,
    }

    impl MockTransport {
        fn new(send_result: Value) -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                send_result,
            }
        }
    }

    impl Transport for MockTransport {
        fn post(&self, url: &str, body: &str) -> Result<String, ClientError> {
            let request: Value = serde_json::from_str(body).unwrap();
            self.requests.borrow_mut().push((url.to_string(), request.clone()));

            let payload = match request["method"].as_str().unwrap() {
                "getLatestBlockhash" => json!({
                    "result": {
                        "context": { "slot": 1 },
                        "value": { "blockhash": BLOCKHASH, "lastValidBlockHeight": 100 }
                    }
                }),
                "sendTransaction" => self.send_result.clone(),
                other => panic!("unexpected method {other}"),
            };
            let mut response = payload;
            response["jsonrpc"] = json!("2.0");
            response["id"] = request["id"].clone();
            Ok(response.to_string())
        }
    }

    fn transfer_builder(from: &Keypair) -> MessageBuilder {
        let mut builder = MessageBuilder::new();
        builder.add_instruction(system::transfer(
            &from.address(),
            &sol_core::Address::new([2; 32]),
            1_000,
        ));
        builder
    }

    #[test]
    fn latest_blockhash_uses_configured_commitment() {
        let client = RpcClient::new(MockTransport::new(Value::Null), ClientConfig::default());
        let latest = client.latest_blockhash().unwrap();
        assert_eq!(latest.blockhash.to_base58(), BLOCKHASH);

        let requests = client.transport.requests.borrow();
        let (url, req) = &requests[0];
        assert_eq!(url, "https://api.devnet.solana.com");
        assert_eq!(req["params"], json!([{ "commitment": "finalized" }]));
    }

    #[test]
    fn sign_and_send_round_trip() {
        let payer = Keypair::from_seed(&[1; 32]);
        let mut builder = transfer_builder(&payer);

        // Work out the signature the node should echo back.
        let mut expected_builder = builder.clone();
        expected_builder.set_recent_blockhash(Blockhash::from_base58(BLOCKHASH).unwrap());
        let expected = signer::sign(&expected_builder, &[&payer]).unwrap();
        let expected_sig = *expected.signature().unwrap();

        let config = ClientConfig {
            skip_preflight: true,
            ..ClientConfig::default()
        };
        let client = RpcClient::new(
            MockTransport::new(json!({ "result": expected_sig.to_base58() })),
            config,
        );

        let sig = client.sign_and_send(&mut builder, &[&payer]).unwrap();
        assert_eq!(sig, expected_sig);
        assert_eq!(
            builder.recent_blockhash().unwrap().to_base58(),
            BLOCKHASH
        );

        let requests = client.transport.requests.borrow();
        assert_eq!(requests.len(), 2);
        let send = &requests[1].1;
        assert_eq!(send["method"], "sendTransaction");
        assert_eq!(send["params"][0], json!(expected.to_base64().unwrap()));
        assert_eq!(send["params"][1]["encoding"], "base64");
        assert_eq!(send["params"][1]["skipPreflight"], true);
        assert_eq!(send["params"][1]["preflightCommitment"], "finalized");

        // Request ids increase.
        assert_eq!(requests[0].1["id"], 1);
        assert_eq!(requests[1].1["id"], 2);
    }

    #[test]
    fn rpc_error_is_surfaced() {
        let payer = Keypair::from_seed(&[1; 32]);
        let client = RpcClient::new(
            MockTransport::new(json!({ "error": { "code": -32002, "message": "Blockhash not found" } })),
            ClientConfig::default(),
        );
        let err = client
            .sign_and_send(&mut transfer_builder(&payer), &[&payer])
            .unwrap_err();
        assert!(matches!(err, ClientError::Rpc { code: -32002, .. }));
    }

    #[test]
    fn unsigned_transaction_is_not_sent() {
        let payer = Keypair::from_seed(&[1; 32]);
        let mut builder = transfer_builder(&payer);
        builder.set_recent_blockhash(Blockhash::new([3; 32]));
        let message = builder.compile(&payer.address()).unwrap();
        let tx = Transaction::new_unsigned(message);

        let client = RpcClient::new(MockTransport::new(Value::Null), ClientConfig::default());
        assert!(matches!(
            client.send_transaction(&tx),
            Err(ClientError::Sol(SolError::MissingSigner(addr))) if addr == payer.address()
        ));
        assert!(client.transport.requests.borrow().is_empty());
    }

    #[test]
    fn closure_transport() {
        let transport = |_url: &str, _body: &str| -> Result<String, ClientError> {
            Err(ClientError::Transport("offline".into()))
        };
        let client = RpcClient::new(transport, ClientConfig::default());
        assert!(matches!(
            client.latest_blockhash(),
            Err(ClientError::Transport(_))
        ));
    }

    #[test]
    fn mismatched_response_id() {
        let transport = |_url: &str, _body: &str| -> Result<String, ClientError> {
            Ok(r#"{"jsonrpc":"2.0","id":99,"result":"x"}"#.to_string())
        };
        let client = RpcClient::new(transport, ClientConfig::default());
        assert!(matches!(
            client.latest_blockhash(),
            Err(ClientError::InvalidResponse(_))
        ));
    }
}
