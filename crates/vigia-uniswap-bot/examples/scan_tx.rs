use std::env;
use std::sync::Arc;

use anyhow::Context;
use ethers::types::H256;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vigia_core::TransactionHandler;
use vigia_deployer_bot::DeployerMonitor;
use vigia_rpc::{RpcConfig, VigiaRpcClient};
use vigia_uniswap_bot::SwapMonitor;

/// Executa os dois bots sobre uma transação já minerada
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Uso: {} <TX_HASH>", args[0]);
        eprintln!("Endpoint lido de VIGIA_RPC_URL (padrão http://localhost:8545)");
        std::process::exit(1);
    }
    let tx_hash: H256 = args[1].parse().context("hash de transação inválido")?;

    let config = RpcConfig::from_env().context("configuração RPC inválida")?;
    let client = Arc::new(
        VigiaRpcClient::new(config)
            .await
            .context("falha ao conectar no node")?,
    );

    let tx = client
        .get_transaction_event(tx_hash)
        .await
        .context("falha ao obter recibo da transação")?;
    info!("Transação com {} logs no bloco {:?}", tx.logs.len(), tx.block_number);

    let handlers: Vec<(&str, Box<dyn TransactionHandler>)> = vec![
        ("deployer", Box::new(DeployerMonitor::default())),
        ("uniswap", Box::new(SwapMonitor::uniswap_v3(client.clone()))),
    ];

    for (name, handler) in &handlers {
        let findings = handler.handle_transaction(&tx).await;
        info!("{name}: {} findings", findings.len());
        for finding in findings {
            println!("{}", serde_json::to_string_pretty(&finding)?);
        }
    }

    Ok(())
}
