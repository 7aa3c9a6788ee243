/*!
 * Vigia Core
 *
 * Tipos e utilitários compartilhados pelos bots Vigia: findings, eventos de
 * transação com filtragem de logs e as interfaces de acesso à chain.
 */

pub mod error;
pub mod events;
pub mod finding;
pub mod traits;
pub mod utils;

// Re-exportações públicas
pub use error::{Error, Result};
pub use events::{DecodedLog, EventSignature, TransactionEvent, TransactionEventBuilder};
pub use finding::{Finding, FindingSeverity, FindingType};
pub use traits::{RpcProvider, TransactionHandler};
