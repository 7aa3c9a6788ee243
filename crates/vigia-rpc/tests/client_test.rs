use ethers::types::{Address, H256};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use vigia_core::{Error, RpcProvider};
use vigia_rpc::{RpcConfig, VigiaRpcClient};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Responde requisições JSON-RPC ecoando o `id` recebido
struct JsonRpcNode {
    results: HashMap<&'static str, Value>,
    slow_methods: Vec<&'static str>,
    delay: Duration,
}

impl JsonRpcNode {
    fn new(results: &[(&'static str, Value)]) -> Self {
        Self {
            results: results.iter().cloned().collect(),
            slow_methods: Vec::new(),
            delay: Duration::ZERO,
        }
    }

    fn slow(mut self, method: &'static str, delay: Duration) -> Self {
        self.slow_methods.push(method);
        self.delay = delay;
        self
    }
}

impl Respond for JsonRpcNode {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        let rpc_method = body["method"].as_str().unwrap_or_default();
        let response = match self.results.get(rpc_method) {
            Some(result) => json!({"jsonrpc": "2.0", "id": body["id"], "result": result}),
            None => json!({
                "jsonrpc": "2.0",
                "id": body["id"],
                "error": {"code": -32000, "message": "execution reverted"}
            }),
        };
        let template = ResponseTemplate::new(200).set_body_json(response);
        if self.slow_methods.iter().any(|m| *m == rpc_method) {
            template.set_delay(self.delay)
        } else {
            template
        }
    }
}

async fn start_node(node: JsonRpcNode) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(node).mount(&server).await;
    server
}

fn config(server: &MockServer, timeout: Duration) -> RpcConfig {
    RpcConfig {
        endpoint: server.uri(),
        timeout,
    }
}

fn word(last_byte: u8) -> String {
    format!("0x{}{:02x}", "00".repeat(31), last_byte)
}

#[tokio::test]
async fn connects_and_reads_block_number() {
    let server = start_node(JsonRpcNode::new(&[("eth_blockNumber", json!("0x10"))])).await;
    let client = VigiaRpcClient::new(config(&server, Duration::from_secs(5))).await.unwrap();
    assert_eq!(client.get_block_number().await.unwrap(), 16);
}

#[tokio::test]
async fn eth_call_returns_raw_bytes() {
    let server = start_node(JsonRpcNode::new(&[
        ("eth_blockNumber", json!("0x1")),
        ("eth_call", json!(word(0x2a))),
    ]))
    .await;
    let client = VigiaRpcClient::new(config(&server, Duration::from_secs(5))).await.unwrap();
    let provider: &dyn RpcProvider = &client;
    let out = provider.call(Address::repeat_byte(0x11), vec![0x0d, 0xfe, 0x16, 0x81]).await.unwrap();
    assert_eq!(out.len(), 32);
    assert_eq!(out[31], 0x2a);
}

#[tokio::test]
async fn reverted_call_is_rpc_error() {
    let server = start_node(JsonRpcNode::new(&[("eth_blockNumber", json!("0x1"))])).await;
    let client = VigiaRpcClient::new(config(&server, Duration::from_secs(5))).await.unwrap();
    let res = client.call(Address::repeat_byte(0x11), vec![]).await;
    assert!(matches!(res, Err(Error::RpcError(_))));
}

#[tokio::test]
async fn slow_call_times_out() {
    let node = JsonRpcNode::new(&[("eth_blockNumber", json!("0x1")), ("eth_call", json!("0x"))])
        .slow("eth_call", Duration::from_millis(500));
    let server = start_node(node).await;
    let client = VigiaRpcClient::new(config(&server, Duration::from_millis(50))).await.unwrap();
    let res = client.call(Address::repeat_byte(0x11), vec![]).await;
    assert!(matches!(res, Err(Error::TimeoutError(_))));
}

#[tokio::test]
async fn missing_receipt_is_not_found() {
    let server = start_node(JsonRpcNode::new(&[
        ("eth_blockNumber", json!("0x1")),
        ("eth_getTransactionReceipt", Value::Null),
    ]))
    .await;
    let client = VigiaRpcClient::new(config(&server, Duration::from_secs(5))).await.unwrap();
    let res = client.get_transaction_event(H256::repeat_byte(0x01)).await;
    assert!(matches!(res, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn receipt_logs_become_transaction_event() {
    let tx_hash = H256::repeat_byte(0x01);
    let receipt = json!({
        "transactionHash": format!("{:?}", tx_hash),
        "transactionIndex": "0x0",
        "blockHash": format!("{:?}", H256::repeat_byte(0x02)),
        "blockNumber": "0x64",
        "from": format!("{:?}", Address::repeat_byte(0x03)),
        "to": format!("{:?}", Address::repeat_byte(0x04)),
        "cumulativeGasUsed": "0x5208",
        "gasUsed": "0x5208",
        "contractAddress": null,
        "status": "0x1",
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "logs": [{
            "address": format!("{:?}", Address::repeat_byte(0xaa)),
            "topics": [format!("{:?}", H256::repeat_byte(0x05))],
            "data": "0x",
            "logIndex": "0x0"
        }]
    });
    let server = start_node(JsonRpcNode::new(&[
        ("eth_blockNumber", json!("0x1")),
        ("eth_getTransactionReceipt", receipt),
    ]))
    .await;
    let client = VigiaRpcClient::new(config(&server, Duration::from_secs(5))).await.unwrap();
    let tx = client.get_transaction_event(tx_hash).await.unwrap();
    assert_eq!(tx.hash, Some(tx_hash));
    assert_eq!(tx.block_number, Some(100));
    assert_eq!(tx.logs.len(), 1);
    assert_eq!(tx.logs[0].address, Address::repeat_byte(0xaa));
    assert_eq!(tx.logs[0].topics, vec![H256::repeat_byte(0x05)]);
}
