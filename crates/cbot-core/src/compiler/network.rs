use crate::{
    domain::{CoreModule, Environment, FormSelections},
    report::{Block, DnsRecord},
};

/// Port the load balancer must expose for WebSocket traffic.
pub const WEBSOCKET_PORT: u16 = 5000;

/// Services that need a DNS record, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DnsService {
    Panel,
    Fusion,
    Core,
    /// WebSocket endpoint that accompanies the core.
    Socket,
}

impl DnsService {
    const ORDER: [Self; 4] = [Self::Panel, Self::Fusion, Self::Core, Self::Socket];

    const fn name(self) -> &'static str {
        match self {
            Self::Panel => "panel",
            Self::Fusion => "fusion",
            Self::Core => "core",
            Self::Socket => "socket",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Panel => "Panel",
            Self::Fusion => "Fusion",
            Self::Core => "Core",
            Self::Socket => "Socket",
        }
    }

    const fn port(self) -> u16 {
        match self {
            Self::Panel => 3000,
            Self::Fusion => 9600,
            Self::Core => 5351,
            Self::Socket => WEBSOCKET_PORT,
        }
    }

    const fn websocket(self) -> bool {
        matches!(self, Self::Socket)
    }

    /// The module whose selection brings in this record. The socket has no
    /// module of its own and follows the core.
    const fn module(self) -> CoreModule {
        match self {
            Self::Panel => CoreModule::Panel,
            Self::Fusion => CoreModule::Fusion,
            Self::Core | Self::Socket => CoreModule::Core,
        }
    }

    fn record(self, label: String, hostname: String) -> DnsRecord {
        DnsRecord {
            service: label,
            hostname,
            port: self.port(),
            websocket: self.websocket(),
        }
    }
}

/// DNS records for the selected modules.
///
/// The primary record of a service is suffixed `-test` for a test-only
/// installation. When both stages are requested, a `-test` record follows
/// each primary record.
pub(crate) fn dns_records(selections: &FormSelections) -> Vec<DnsRecord> {
    let environment = selections.environment();
    let mut records = Vec::new();

    for service in DnsService::ORDER {
        if !selections.has_module(service.module()) {
            continue;
        }

        let host = format!("cbot-{}", service.name());
        let primary = if environment == Environment::Test {
            format!("{host}-test")
        } else {
            host.clone()
        };
        records.push(service.record(service.label().to_string(), primary));

        if environment == Environment::Both {
            records.push(service.record(
                format!("{} (Test)", service.label()),
                format!("{host}-test"),
            ));
        }
    }

    records
}

pub(crate) fn blocks(selections: &FormSelections) -> Vec<Block> {
    vec![
        Block::List {
            items: vec![
                "Servers must have internet access".to_string(),
                format!(
                    "Database ports must be open ({})",
                    selections.database().port()
                ),
                format!("The load balancer must support WebSocket on port {WEBSOCKET_PORT}"),
            ],
        },
        Block::Subheading {
            text: "DNS Records".to_string(),
        },
        Block::Dns {
            records: dns_records(selections),
        },
    ]
}
