use crate::constants::{ALERT_ID, PROTOCOL, SWAP_SIGNATURE, UNISWAPV3_FACTORY_ADDRESS};
use crate::verifier::{PoolVerifier, UniswapV3PoolVerifier};
use async_trait::async_trait;
use ethers::types::Address;
use futures::future::join_all;
use std::sync::Arc;
use vigia_core::utils::{format_address, format_i256, hex_to_address};
use vigia_core::{
    DecodedLog, Finding, FindingSeverity, FindingType, RpcProvider, TransactionEvent, TransactionHandler,
};

/// Handler que alerta swaps de pools confirmadas pela factory
pub struct SwapMonitor<V> {
    factory: Address,
    verifier: V,
}

impl SwapMonitor<UniswapV3PoolVerifier> {
    /// Monitor apontado para a factory oficial, verificando via `provider`
    pub fn uniswap_v3(provider: Arc<dyn RpcProvider>) -> Self {
        let factory = hex_to_address(UNISWAPV3_FACTORY_ADDRESS).expect("endereço da factory");
        Self::new(factory, UniswapV3PoolVerifier::new(provider))
    }
}

impl<V: PoolVerifier> SwapMonitor<V> {
    pub fn new(factory: Address, verifier: V) -> Self {
        Self { factory, verifier }
    }

    pub fn factory(&self) -> Address {
        self.factory
    }

    /// Verifica todos os emissores de `Swap` da transação e gera um finding
    /// por log das pools confirmadas
    pub async fn detect(&self, tx: &TransactionEvent) -> Vec<Finding> {
        let candidates = candidate_pools(tx);
        if candidates.is_empty() {
            return Vec::new();
        }

        // todas as verificações terminam antes de qualquer finding
        let verifications = join_all(
            candidates
                .iter()
                .map(|pool| self.verifier.verify(*pool, self.factory)),
        )
        .await;

        let findings: Vec<Finding> = candidates
            .into_iter()
            .zip(verifications)
            .filter(|(_, verification)| verification.is_genuine())
            .flat_map(|(pool, _)| tx.filter_log(&SWAP_SIGNATURE, Some(pool)))
            .filter_map(|log| swap_finding(&log))
            .collect();

        tracing::debug!(tx = ?tx.hash, findings = findings.len(), "swaps analisados");
        findings
    }
}

/// Emissores de `Swap` sem repetição, na ordem em que aparecem
pub fn candidate_pools(tx: &TransactionEvent) -> Vec<Address> {
    let mut pools: Vec<Address> = Vec::new();
    for log in tx.filter_log(&SWAP_SIGNATURE, None) {
        if !pools.contains(&log.address) {
            pools.push(log.address);
        }
    }
    pools
}

/// Finding de um log `Swap` decodificado
pub fn swap_finding(log: &DecodedLog) -> Option<Finding> {
    let sender = log.address_param("sender")?;
    let recipient = log.address_param("recipient")?;
    let amount0 = log.int_param("amount0")?;
    let amount1 = log.int_param("amount1")?;

    Some(
        Finding::new(
            "Swap detected",
            "A swap has been executed on a UniswapV3 Pool contract",
            ALERT_ID,
            FindingSeverity::Info,
            FindingType::Info,
        )
        .with_protocol(PROTOCOL)
        .with_metadata("sender", format_address(&sender))
        .with_metadata("recipient", format_address(&recipient))
        .with_metadata("amount0", format_i256(&amount0))
        .with_metadata("amount1", format_i256(&amount1)),
    )
}

#[async_trait]
impl<V: PoolVerifier> TransactionHandler for SwapMonitor<V> {
    async fn handle_transaction(&self, tx: &TransactionEvent) -> Vec<Finding> {
        self.detect(tx).await
    }
}
