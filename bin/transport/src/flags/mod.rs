//! CLI flags.

mod globals;
pub(crate) use globals::GlobalArgs;

mod rpc;
pub(crate) use rpc::RpcArgs;

mod ingest;
pub(crate) use ingest::IngestArgs;

mod sequencer;
pub(crate) use sequencer::SequencerArgs;
