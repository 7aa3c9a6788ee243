use ethers::abi::{AbiParser, Function};
use once_cell::sync::Lazy;
use vigia_core::EventSignature;

/// Factory oficial da Uniswap V3
pub const UNISWAPV3_FACTORY_ADDRESS: &str = "0x1F98431c8aD98523631AE4a59f267346ea31F984";

pub const SWAP_EVENT: &str = "event Swap(address indexed sender, address indexed recipient, int256 amount0, int256 amount1, uint160 sqrtPriceX96, uint128 liquidity, int24 tick)";

pub const ALERT_ID: &str = "UNISWAP-1";
pub const PROTOCOL: &str = "Uniswapv3";

pub static SWAP_SIGNATURE: Lazy<EventSignature> =
    Lazy::new(|| EventSignature::parse(SWAP_EVENT).expect("assinatura Swap"));

fn function(signature: &str) -> Function {
    AbiParser::default()
        .parse_function(signature)
        .expect("assinatura de função válida")
}

// Leituras usadas na verificação de pools
pub(crate) static TOKEN0: Lazy<Function> = Lazy::new(|| function("token0() view returns (address)"));
pub(crate) static TOKEN1: Lazy<Function> = Lazy::new(|| function("token1() view returns (address)"));
pub(crate) static FEE: Lazy<Function> = Lazy::new(|| function("fee() view returns (uint24)"));
pub(crate) static GET_POOL: Lazy<Function> =
    Lazy::new(|| function("getPool(address,address,uint24) view returns (address)"));
