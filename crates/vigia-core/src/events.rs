//! Eventos de transação e filtragem de logs por assinatura de evento.
//!
//! `TransactionEvent` agrupa os logs emitidos por uma transação e expõe
//! `filter_log`, que seleciona e decodifica os logs de um evento conhecido,
//! opcionalmente restritos a um contrato emissor.

use crate::error::{Error, Result};
use crate::utils::keccak256;
use ethers::abi::{encode, encode_packed, AbiParser, Event, RawLog, Token};
use ethers::types::{Address, Bytes, Log, H256, I256, U256};

/// Assinatura de evento já interpretada
#[derive(Debug, Clone)]
pub struct EventSignature {
    event: Event,
    topic: H256,
}

impl EventSignature {
    /// Interpreta uma assinatura legível, ex.:
    /// `event Transfer(address indexed from, address indexed to, uint256 value)`
    pub fn parse(signature: &str) -> Result<Self> {
        let event = AbiParser::default()
            .parse_event(signature)
            .map_err(|e| Error::DecodeError(format!("assinatura de evento inválida `{signature}`: {e}")))?;
        let topic = event.signature();
        Ok(Self { event, topic })
    }

    /// Nome do evento
    pub fn name(&self) -> &str {
        &self.event.name
    }

    /// Hash keccak da assinatura canônica (topic0)
    pub fn topic(&self) -> H256 {
        self.topic
    }

    fn decode(&self, log: &Log) -> Option<Vec<(String, Token)>> {
        let raw = RawLog {
            topics: log.topics.clone(),
            data: log.data.to_vec(),
        };
        match self.event.parse_log(raw) {
            Ok(decoded) => Some(decoded.params.into_iter().map(|p| (p.name, p.value)).collect()),
            Err(e) => {
                tracing::trace!(event = %self.event.name, address = ?log.address, "log ignorado: {e}");
                None
            }
        }
    }

    /// Codifica os parâmetros em um log emitido por `address`.
    /// Parâmetros indexados viram topics, os demais vão para `data`.
    pub fn encode_log(&self, address: Address, params: &[Token]) -> Result<Log> {
        if params.len() != self.event.inputs.len() {
            return Err(Error::EncodeError(format!(
                "evento {} espera {} parâmetros, recebeu {}",
                self.event.name,
                self.event.inputs.len(),
                params.len()
            )));
        }

        let mut topics = vec![self.topic];
        let mut data_tokens = Vec::new();
        for (input, token) in self.event.inputs.iter().zip(params) {
            if !token.type_check(&input.kind) {
                return Err(Error::EncodeError(format!(
                    "parâmetro {} não corresponde ao tipo {}",
                    input.name, input.kind
                )));
            }
            if input.indexed {
                let topic = if input.kind.is_dynamic() {
                    let packed = encode_packed(std::slice::from_ref(token))
                        .map_err(|e| Error::EncodeError(e.to_string()))?;
                    H256::from(keccak256(&packed))
                } else {
                    H256::from_slice(&encode(std::slice::from_ref(token)))
                };
                topics.push(topic);
            } else {
                data_tokens.push(token.clone());
            }
        }

        Ok(Log {
            address,
            topics,
            data: Bytes::from(encode(&data_tokens)),
            ..Default::default()
        })
    }
}

/// Log decodificado com os parâmetros nomeados do evento
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLog {
    /// Contrato emissor
    pub address: Address,
    /// Posição do log dentro da transação
    pub log_index: usize,
    pub name: String,
    pub params: Vec<(String, Token)>,
}

impl DecodedLog {
    pub fn param(&self, name: &str) -> Option<&Token> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn address_param(&self, name: &str) -> Option<Address> {
        self.param(name)?.clone().into_address()
    }

    pub fn uint_param(&self, name: &str) -> Option<U256> {
        self.param(name)?.clone().into_uint()
    }

    /// Inteiro com sinal (complemento de dois em 256 bits)
    pub fn int_param(&self, name: &str) -> Option<I256> {
        self.param(name)?.clone().into_int().map(I256::from_raw)
    }
}

/// Logs de uma transação entregues aos bots
#[derive(Debug, Clone, Default)]
pub struct TransactionEvent {
    pub hash: Option<H256>,
    pub block_number: Option<u64>,
    pub logs: Vec<Log>,
}

impl TransactionEvent {
    pub fn new(hash: Option<H256>, block_number: Option<u64>, logs: Vec<Log>) -> Self {
        Self { hash, block_number, logs }
    }

    pub fn builder() -> TransactionEventBuilder {
        TransactionEventBuilder::default()
    }

    /// Retorna os logs do evento `signature`, na ordem da transação.
    /// Com `address`, apenas os logs emitidos por esse contrato.
    /// Logs com o topic certo mas que não decodificam são descartados.
    pub fn filter_log(&self, signature: &EventSignature, address: Option<Address>) -> Vec<DecodedLog> {
        self.logs
            .iter()
            .enumerate()
            .filter(|(_, log)| log.topics.first() == Some(&signature.topic))
            .filter(|(_, log)| address.map_or(true, |a| log.address == a))
            .filter_map(|(index, log)| {
                let params = signature.decode(log)?;
                Some(DecodedLog {
                    address: log.address,
                    log_index: index,
                    name: signature.name().to_string(),
                    params,
                })
            })
            .collect()
    }
}

/// Monta um `TransactionEvent` a partir de logs codificados localmente
#[derive(Debug, Clone, Default)]
pub struct TransactionEventBuilder {
    hash: Option<H256>,
    block_number: Option<u64>,
    logs: Vec<Log>,
}

impl TransactionEventBuilder {
    pub fn hash(mut self, hash: H256) -> Self {
        self.hash = Some(hash);
        self
    }

    pub fn block_number(mut self, block_number: u64) -> Self {
        self.block_number = Some(block_number);
        self
    }

    /// Adiciona um log já pronto
    pub fn add_log(mut self, log: Log) -> Self {
        self.logs.push(log);
        self
    }

    /// Codifica e adiciona um log do evento `signature` emitido por `address`
    pub fn add_event_log(mut self, address: Address, signature: &EventSignature, params: &[Token]) -> Result<Self> {
        let log = signature.encode_log(address, params)?;
        self.logs.push(log);
        Ok(self)
    }

    pub fn build(self) -> TransactionEvent {
        let logs = self
            .logs
            .into_iter()
            .enumerate()
            .map(|(i, mut log)| {
                if log.log_index.is_none() {
                    log.log_index = Some(U256::from(i));
                }
                log.transaction_hash = log.transaction_hash.or(self.hash);
                log
            })
            .collect();
        TransactionEvent {
            hash: self.hash,
            block_number: self.block_number,
            logs,
        }
    }
}
