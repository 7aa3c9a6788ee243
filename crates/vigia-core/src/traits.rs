/*!
 * Vigia Traits
 *
 * Fronteiras entre os bots, o node Ethereum e o framework de monitoramento
 */

use async_trait::async_trait;
use crate::error::Result;
use crate::events::TransactionEvent;
use crate::finding::Finding;
use ethers::types::{Address, H256};

/// Trait para provedores RPC
#[async_trait]
pub trait RpcProvider: Send + Sync {
    /// Chama um método de contrato (somente leitura)
    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>>;

    /// Obtém o número do bloco atual
    async fn get_block_number(&self) -> Result<u64>;

    /// Obtém os logs do recibo de uma transação
    async fn get_transaction_event(&self, tx_hash: H256) -> Result<TransactionEvent>;
}

/// Handler invocado uma vez por transação
#[async_trait]
pub trait TransactionHandler: Send + Sync {
    /// Analisa a transação e retorna os findings gerados (possivelmente nenhum)
    async fn handle_transaction(&self, tx: &TransactionEvent) -> Vec<Finding>;
}
