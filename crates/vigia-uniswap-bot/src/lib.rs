/*! Vigia Uniswap Bot
 *
 * Detecta eventos `Swap` emitidos por pools da Uniswap V3. Antes de gerar
 * qualquer alerta, cada contrato emissor é confrontado com a factory oficial
 * para descartar contratos que apenas imitam a interface de uma pool.
 */

pub mod constants;
pub mod swap_monitor;
pub mod verifier;

pub use constants::*;
pub use swap_monitor::{candidate_pools, swap_finding, SwapMonitor};
pub use verifier::{PoolVerification, PoolVerifier, UniswapV3PoolVerifier};
