//! Sources of observed rollup blocks.

use crate::BlockSourceError;
use alloy_primitives::U64;
use alloy_rpc_client::ReqwestClient;
use async_trait::async_trait;
use kona_transport_types::RawL2Block;
use std::fmt::Debug;
use url::Url;

/// Serves observed rollup blocks with their full transactions.
#[async_trait]
#[auto_impl::auto_impl(&, Box, Arc)]
pub trait BlockSource: Debug + Send + Sync {
    /// Returns the number of the latest rollup block.
    async fn latest_block_number(&self) -> Result<u64, BlockSourceError>;

    /// Returns the block at `number`, or `None` if it does not exist yet.
    async fn block_by_number(&self, number: u64) -> Result<Option<RawL2Block>, BlockSourceError>;
}

/// A [`BlockSource`] backed by a rollup node's JSON-RPC API.
#[derive(Debug, Clone)]
pub struct RpcBlockSource {
    rpc: ReqwestClient,
}

impl RpcBlockSource {
    /// Creates a new [`RpcBlockSource`] talking to `url` over HTTP.
    pub fn new_http(url: Url) -> Self {
        Self { rpc: ReqwestClient::new_http(url) }
    }
}

#[async_trait]
impl BlockSource for RpcBlockSource {
    async fn latest_block_number(&self) -> Result<u64, BlockSourceError> {
        let number: U64 = self.rpc.request("eth_blockNumber", ()).await?;
        Ok(number.to())
    }

    async fn block_by_number(&self, number: u64) -> Result<Option<RawL2Block>, BlockSourceError> {
        let block: Option<RawL2Block> =
            self.rpc.request("eth_getBlockByNumber", (U64::from(number), true)).await?;
        Ok(block)
    }
}
