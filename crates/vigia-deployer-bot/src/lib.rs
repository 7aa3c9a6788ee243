/*! Vigia Deployer Bot
 *
 * Detecta o registro de novos agentes no contrato de registro da Forta
 * quando o evento `AgentUpdated` é emitido pelo deployer monitorado.
 */

use async_trait::async_trait;
use ethers::types::Address;
use once_cell::sync::Lazy;
use vigia_core::utils::{format_checksum_address, format_u256, hex_to_address};
use vigia_core::{EventSignature, Finding, FindingSeverity, FindingType, TransactionEvent, TransactionHandler};

/// Deployer cujos registros de agentes são alertados
pub const NETHERMIND_DEPLOYER_ADDRESS: &str = "0x88dC3a2284FA62e0027d6D6B1fCfDd2141a143b8";
/// Contrato de registro de agentes da Forta
pub const FORTA_CONTRACT_ADDRESS: &str = "0x61447385B019187daa48e91c55c02AF1F1f3F863";
pub const CREATE_AGENT_EVENT: &str =
    "event AgentUpdated(uint256 indexed agentId, address indexed by, string metadata, uint256[] chainIds)";

pub const ALERT_ID: &str = "FORTA-1";

pub static CREATE_AGENT_SIGNATURE: Lazy<EventSignature> =
    Lazy::new(|| EventSignature::parse(CREATE_AGENT_EVENT).expect("assinatura AgentUpdated"));

/// Endereços monitorados pelo bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployerMonitorConfig {
    pub deployer: Address,
    pub registry: Address,
}

impl Default for DeployerMonitorConfig {
    fn default() -> Self {
        Self {
            deployer: hex_to_address(NETHERMIND_DEPLOYER_ADDRESS).expect("endereço do deployer"),
            registry: hex_to_address(FORTA_CONTRACT_ADDRESS).expect("endereço do registro"),
        }
    }
}

/// Handler que gera um finding por agente registrado pelo deployer
#[derive(Debug, Clone, Default)]
pub struct DeployerMonitor {
    config: DeployerMonitorConfig,
}

impl DeployerMonitor {
    pub fn new(config: DeployerMonitorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeployerMonitorConfig {
        &self.config
    }

    /// Versão síncrona do handler; não há leituras on-chain neste bot
    pub fn detect(&self, tx: &TransactionEvent) -> Vec<Finding> {
        let findings: Vec<Finding> = tx
            .filter_log(&CREATE_AGENT_SIGNATURE, Some(self.config.registry))
            .into_iter()
            .filter_map(|log| {
                let agent_id = log.uint_param("agentId")?;
                let by = log.address_param("by")?;
                (by == self.config.deployer).then(|| deployment_finding(&format_u256(&agent_id), &by))
            })
            .collect();

        tracing::debug!(tx = ?tx.hash, findings = findings.len(), "AgentUpdated analisado");
        findings
    }
}

/// Finding emitido para cada agente registrado
pub fn deployment_finding(agent_id: &str, by: &Address) -> Finding {
    Finding::new("Bot deployed", "Bot deployed", ALERT_ID, FindingSeverity::Low, FindingType::Info)
        .with_metadata("agentId", agent_id)
        .with_metadata("by", format_checksum_address(by))
}

#[async_trait]
impl TransactionHandler for DeployerMonitor {
    async fn handle_transaction(&self, tx: &TransactionEvent) -> Vec<Finding> {
        self.detect(tx)
    }
}
