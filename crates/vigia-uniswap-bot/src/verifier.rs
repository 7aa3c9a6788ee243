//! Verificação de procedência de pools Uniswap V3.
//!
//! Uma pool é considerada genuína quando a factory, consultada com o
//! `(token0, token1, fee)` informado pela própria pool, devolve o mesmo
//! endereço. Qualquer falha de consulta resulta em pool não verificada.

use crate::constants::{FEE, GET_POOL, TOKEN0, TOKEN1};
use async_trait::async_trait;
use ethers::abi::{Function, Token};
use ethers::types::{Address, U256};
use std::sync::Arc;
use vigia_core::{error::Result, Error, RpcProvider};

/// Resultado da verificação de um contrato candidato
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolVerification {
    /// A factory reconhece o candidato como pool
    Genuine,
    /// A factory aponta outro endereço para o mesmo `(token0, token1, fee)`
    NotGenuine { canonical: Address },
    /// Alguma leitura falhou; tratado como não verificado
    QueryFailed(String),
}

impl PoolVerification {
    pub fn is_genuine(&self) -> bool {
        matches!(self, PoolVerification::Genuine)
    }
}

/// Estratégia de verificação injetada no [`crate::SwapMonitor`]
#[async_trait]
pub trait PoolVerifier: Send + Sync {
    /// Verifica se `candidate` foi criada por `factory`. Nunca falha:
    /// erros de consulta viram [`PoolVerification::QueryFailed`].
    async fn verify(&self, candidate: Address, factory: Address) -> PoolVerification;
}

#[async_trait]
impl<V: PoolVerifier + ?Sized> PoolVerifier for Arc<V> {
    async fn verify(&self, candidate: Address, factory: Address) -> PoolVerification {
        (**self).verify(candidate, factory).await
    }
}

/// Verificador que consulta a pool e a factory via [`RpcProvider`]
pub struct UniswapV3PoolVerifier {
    provider: Arc<dyn RpcProvider>,
}

impl UniswapV3PoolVerifier {
    pub fn new(provider: Arc<dyn RpcProvider>) -> Self {
        Self { provider }
    }

    async fn read(&self, to: Address, function: &Function, args: &[Token]) -> Result<Token> {
        let data = function
            .encode_input(args)
            .map_err(|e| Error::EncodeError(format!("{}: {}", function.name, e)))?;
        let out = self.provider.call(to, data).await?;
        function
            .decode_output(&out)
            .map_err(|e| Error::DecodeError(format!("{}: {}", function.name, e)))?
            .into_iter()
            .next()
            .ok_or_else(|| Error::DecodeError(format!("{}: resposta vazia", function.name)))
    }

    async fn read_address(&self, to: Address, function: &Function, args: &[Token]) -> Result<Address> {
        self.read(to, function, args)
            .await?
            .into_address()
            .ok_or_else(|| Error::DecodeError(format!("{}: endereço esperado", function.name)))
    }

    async fn read_uint(&self, to: Address, function: &Function) -> Result<U256> {
        self.read(to, function, &[])
            .await?
            .into_uint()
            .ok_or_else(|| Error::DecodeError(format!("{}: inteiro esperado", function.name)))
    }

    /// Endereço que a factory registra para o `(token0, token1, fee)` do candidato
    pub async fn canonical_pool(&self, candidate: Address, factory: Address) -> Result<Address> {
        let (token0, token1, fee) = futures::try_join!(
            self.read_address(candidate, &TOKEN0, &[]),
            self.read_address(candidate, &TOKEN1, &[]),
            self.read_uint(candidate, &FEE),
        )?;

        self.read_address(
            factory,
            &GET_POOL,
            &[Token::Address(token0), Token::Address(token1), Token::Uint(fee)],
        )
        .await
    }
}

#[async_trait]
impl PoolVerifier for UniswapV3PoolVerifier {
    async fn verify(&self, candidate: Address, factory: Address) -> PoolVerification {
        match self.canonical_pool(candidate, factory).await {
            Ok(pool) if pool == candidate => PoolVerification::Genuine,
            Ok(canonical) => {
                tracing::debug!(?candidate, ?canonical, "contrato não registrado na factory");
                PoolVerification::NotGenuine { canonical }
            }
            Err(e) => {
                tracing::debug!(?candidate, "falha ao verificar pool: {e}");
                PoolVerification::QueryFailed(e.to_string())
            }
        }
    }
}
