/*!
 * Vigia RPC
 *
 * Cliente RPC para leituras on-chain feitas pelos bots
 */

use async_trait::async_trait;
use ethers::types::{Address, Bytes as EthBytes, Log, H256, U256};
use std::future::Future;
use std::time::Duration;
use vigia_core::{error::Result, Error, TransactionEvent};
use web3::{
    transports::{Http, WebSocket},
    types::{Bytes, CallRequest, H160, H256 as Web3H256},
    Web3,
};

/// Variável com o endpoint do node
pub const RPC_URL_VAR: &str = "VIGIA_RPC_URL";
/// Variável com o timeout por requisição, em segundos
pub const RPC_TIMEOUT_VAR: &str = "VIGIA_RPC_TIMEOUT_SECS";

/// Configuração do cliente RPC
#[derive(Debug, Clone, PartialEq)]
pub struct RpcConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8545".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl RpcConfig {
    /// Lê a configuração das variáveis de ambiente, com os valores padrão
    /// para as ausentes
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(endpoint) = lookup(RPC_URL_VAR) {
            config.endpoint = endpoint;
        }
        if let Some(raw) = lookup(RPC_TIMEOUT_VAR) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| Error::ConfigError(format!("{RPC_TIMEOUT_VAR} inválido: {raw}")))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

/// Enum para diferentes tipos de transporte
pub enum TransportType {
    Http(Web3<Http>),
    WebSocket(Web3<WebSocket>),
}

/// Cliente RPC para Ethereum
pub struct VigiaRpcClient {
    transport: TransportType,
    config: RpcConfig,
}

impl VigiaRpcClient {
    /// Cria um novo cliente RPC HTTP
    pub async fn new_http(config: RpcConfig) -> Result<Self> {
        let transport = Http::new(&config.endpoint)
            .map_err(|e| Error::RpcError(format!("Falha ao conectar via HTTP: {}", e)))?;
        let client = Self {
            transport: TransportType::Http(Web3::new(transport)),
            config,
        };
        client.check_connection().await?;
        Ok(client)
    }

    /// Cria um novo cliente RPC WebSocket
    pub async fn new_websocket(config: RpcConfig) -> Result<Self> {
        let transport = WebSocket::new(&config.endpoint)
            .await
            .map_err(|e| Error::RpcError(format!("Falha ao conectar via WebSocket: {}", e)))?;
        let client = Self {
            transport: TransportType::WebSocket(Web3::new(transport)),
            config,
        };
        client.check_connection().await?;
        Ok(client)
    }

    /// Cria um novo cliente baseado na URL
    pub async fn new(config: RpcConfig) -> Result<Self> {
        if config.endpoint.starts_with("ws") {
            Self::new_websocket(config).await
        } else {
            Self::new_http(config).await
        }
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    async fn check_connection(&self) -> Result<()> {
        let block = self.get_block_number().await?;
        tracing::debug!(endpoint = %self.config.endpoint, block, "conectado ao node");
        Ok(())
    }

    /// Aplica o timeout configurado a uma requisição
    async fn timed<T, F>(&self, what: &str, request: F) -> Result<T>
    where
        F: Future<Output = web3::Result<T>>,
    {
        match tokio::time::timeout(self.config.timeout, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(Error::RpcError(format!("Falha ao {}: {}", what, e))),
            Err(_) => Err(Error::TimeoutError(format!(
                "{} excedeu {:?}",
                what, self.config.timeout
            ))),
        }
    }

    /// Obtém o número do bloco atual
    pub async fn get_block_number(&self) -> Result<u64> {
        let block_number = match &self.transport {
            TransportType::Http(web3) => {
                self.timed("obter número do bloco", web3.eth().block_number()).await?
            }
            TransportType::WebSocket(web3) => {
                self.timed("obter número do bloco", web3.eth().block_number()).await?
            }
        };

        Ok(block_number.as_u64())
    }

    /// Executa `eth_call` contra o bloco mais recente
    pub async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>> {
        let request = CallRequest::builder()
            .to(H160::from_slice(to.as_bytes()))
            .data(Bytes(data))
            .build();

        let result = match &self.transport {
            TransportType::Http(web3) => {
                self.timed("executar eth_call", web3.eth().call(request, None)).await?
            }
            TransportType::WebSocket(web3) => {
                self.timed("executar eth_call", web3.eth().call(request, None)).await?
            }
        };

        Ok(result.0)
    }

    /// Obtém o recibo de uma transação como `TransactionEvent`
    pub async fn get_transaction_event(&self, tx_hash: H256) -> Result<TransactionEvent> {
        let web3_hash = Web3H256::from_slice(tx_hash.as_bytes());

        let receipt = match &self.transport {
            TransportType::Http(web3) => {
                self.timed("obter recibo da transação", web3.eth().transaction_receipt(web3_hash))
                    .await?
            }
            TransportType::WebSocket(web3) => {
                self.timed("obter recibo da transação", web3.eth().transaction_receipt(web3_hash))
                    .await?
            }
        };

        let receipt = receipt.ok_or_else(|| {
            Error::NotFound(format!("Recibo da transação 0x{:x} não encontrado", tx_hash))
        })?;

        let logs = receipt.logs.into_iter().map(convert_log).collect();
        Ok(TransactionEvent::new(
            Some(tx_hash),
            receipt.block_number.map(|n| n.as_u64()),
            logs,
        ))
    }
}

/// Converte um log do `web3` para o tipo do `ethers`
fn convert_log(log: web3::types::Log) -> Log {
    Log {
        address: Address::from_slice(log.address.as_bytes()),
        topics: log.topics.iter().map(|t| H256::from_slice(t.as_bytes())).collect(),
        data: EthBytes::from(log.data.0),
        block_hash: log.block_hash.map(|h| H256::from_slice(h.as_bytes())),
        block_number: log.block_number.map(|n| n.as_u64().into()),
        transaction_hash: log.transaction_hash.map(|h| H256::from_slice(h.as_bytes())),
        transaction_index: log.transaction_index.map(|i| i.as_u64().into()),
        log_index: log.log_index.map(|i| U256::from(i.as_u64())),
        transaction_log_index: log.transaction_log_index.map(|i| U256::from(i.as_u64())),
        log_type: log.log_type,
        removed: log.removed,
    }
}

/// Implementação da trait RpcProvider do vigia-core
#[async_trait]
impl vigia_core::RpcProvider for VigiaRpcClient {
    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>> {
        self.call(to, data).await
    }

    async fn get_block_number(&self) -> Result<u64> {
        self.get_block_number().await
    }

    async fn get_transaction_event(&self, tx_hash: H256) -> Result<TransactionEvent> {
        self.get_transaction_event(tx_hash).await
    }
}
