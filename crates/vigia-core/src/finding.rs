/*!
 * Findings
 *
 * Alertas emitidos pelos bots, serializados com os mesmos nomes de campo
 * usados pela rede Forta.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Protocolo atribuído quando o bot não informa outro
pub const DEFAULT_PROTOCOL: &str = "ethereum";

/// Severidade de um finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FindingSeverity {
    Unknown,
    Info,
    Low,
    Medium,
    High,
    Critical,
}

/// Tipo de um finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingType {
    Unknown,
    Exploit,
    Suspicious,
    Degraded,
    Info,
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingSeverity::Unknown => write!(f, "unknown"),
            FindingSeverity::Info => write!(f, "info"),
            FindingSeverity::Low => write!(f, "low"),
            FindingSeverity::Medium => write!(f, "medium"),
            FindingSeverity::High => write!(f, "high"),
            FindingSeverity::Critical => write!(f, "critical"),
        }
    }
}

impl fmt::Display for FindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingType::Unknown => write!(f, "unknown"),
            FindingType::Exploit => write!(f, "exploit"),
            FindingType::Suspicious => write!(f, "suspicious"),
            FindingType::Degraded => write!(f, "degraded"),
            FindingType::Info => write!(f, "info"),
        }
    }
}

/// Alerta imutável produzido por um bot.
///
/// Os valores de `metadata` são sempre strings; números são convertidos
/// para a forma decimal antes de entrar aqui.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub name: String,
    pub description: String,
    pub alert_id: String,
    pub protocol: String,
    pub severity: FindingSeverity,
    #[serde(rename = "type")]
    pub finding_type: FindingType,
    pub metadata: BTreeMap<String, String>,
}

impl Finding {
    /// Cria um finding sem metadata e com o protocolo padrão
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        alert_id: impl Into<String>,
        severity: FindingSeverity,
        finding_type: FindingType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            alert_id: alert_id.into(),
            protocol: DEFAULT_PROTOCOL.to_string(),
            severity,
            finding_type,
            metadata: BTreeMap::new(),
        }
    }

    /// Define o protocolo do finding
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Adiciona uma entrada de metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
