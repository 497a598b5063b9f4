//! Prometheus metrics CLI arguments.

use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};

/// Configuration for the prometheus exporter.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct MetricsArgs {
    /// Controls whether prometheus metrics are enabled.
    #[arg(
        long = "metrics.enabled",
        global = true,
        default_value_t = false,
        env = "KONA_TRANSPORT_METRICS_ENABLED"
    )]
    pub enabled: bool,
    /// The port to serve prometheus metrics on.
    #[arg(
        long = "metrics.port",
        global = true,
        default_value = "9090",
        env = "KONA_TRANSPORT_METRICS_PORT"
    )]
    pub port: u16,
    /// The ip address to serve prometheus metrics on.
    #[arg(
        long = "metrics.addr",
        global = true,
        default_value = "0.0.0.0",
        env = "KONA_TRANSPORT_METRICS_ADDR"
    )]
    pub addr: IpAddr,
}

impl Default for MetricsArgs {
    fn default() -> Self {
        Self { enabled: false, port: 9090, addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_args_defaults() {
        let args = MetricsArgs::try_parse_from(["test"]).unwrap();
        assert_eq!(args, MetricsArgs::default());
    }

    #[test]
    fn test_metrics_args_custom() {
        let args = MetricsArgs::try_parse_from([
            "test",
            "--metrics.enabled",
            "--metrics.port",
            "7300",
            "--metrics.addr",
            "127.0.0.1",
        ])
        .unwrap();

        assert!(args.enabled);
        assert_eq!(args.port, 7300);
        assert_eq!(args.addr, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
}
