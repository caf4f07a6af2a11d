use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Well-known ports
// ---------------------------------------------------------------------------

/// System ports, IANA assigned.
pub const SYSTEM_PORTS: RangeInclusive<u32> = 0..=1023;

/// Ranges commonly claimed by dev servers and ephemeral allocators.
pub const RESERVED_RANGES: &[RangeInclusive<u32>] = &[
    3000..=3010,   // Node.js, React, Grafana
    4000..=4010,   // Ruby, Rails
    5000..=5010,   // Flask, Django
    8000..=8010,   // Django, HTTP alternates, Tomcat
    9000..=9010,   // SonarQube and friends
    32768..=32775, // Linux ephemeral start
    49152..=49159, // Windows ephemeral start
];

/// Individual service ports.
pub const RESERVED_PORTS: &[u32] = &[
    // Databases
    1433,  // SQL Server
    1521,  // Oracle
    3306,  // MySQL
    5432,  // PostgreSQL
    5984,  // CouchDB
    6379,  // Redis
    8086,  // InfluxDB
    27017, // MongoDB
    50000, // DB2
    7000, 7001, // Cassandra
    // Search
    8983, // Solr
    9200, 9300, // Elasticsearch
    // Message brokers
    1883,  // MQTT
    5672,  // RabbitMQ
    9092,  // Kafka
    15672, // RabbitMQ management
    61616, // ActiveMQ
    // Web servers and proxies
    1080, 8080, 8443, 8888, 9999,
    // Containers and orchestration
    2375, 2376, 2377, // Docker
    2379, 2380, // etcd
    6443, // Kubernetes API
    10250, 10251, 10252, 10255, // Kubelet and friends
    // Monitoring
    4040, // Spark UI
    9090, // Prometheus
    9093, // Alertmanager
    9100, // Node Exporter
    // Application servers
    7002, // WebLogic
    9080, // WebSphere
    // Caching
    11211, // Memcached
    // Control panels
    2082, 2083, 2086, 2087, 2095, 2096,
    // Coordination
    2181, 2888, 3888, // Zookeeper
    // Sinatra
    4567, 4568,
    // Hadoop
    8020, 8088, 50070, 50075,
];

// ---------------------------------------------------------------------------
// ReservedPorts
// ---------------------------------------------------------------------------

/// Immutable set of ports that are never handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedPorts {
    ports: BTreeSet<u32>,
}

static STANDARD: OnceLock<ReservedPorts> = OnceLock::new();

impl ReservedPorts {
    /// The built-in table: system ports plus common service ports.
    /// Built on first use and shared for the rest of the process.
    pub fn standard() -> &'static ReservedPorts {
        STANDARD.get_or_init(|| {
            let mut ports: BTreeSet<u32> = SYSTEM_PORTS.collect();
            for range in RESERVED_RANGES {
                ports.extend(range.clone());
            }
            ports.extend(RESERVED_PORTS.iter().copied());
            ReservedPorts { ports }
        })
    }

    pub fn from_ports(ports: impl IntoIterator<Item = u32>) -> Self {
        Self {
            ports: ports.into_iter().collect(),
        }
    }

    pub fn contains(&self, port: u32) -> bool {
        self.ports.contains(&port)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_ports_are_reserved() {
        let reserved = ReservedPorts::standard();
        for port in [0, 22, 80, 443, 1023] {
            assert!(reserved.contains(port), "expected reserved: {port}");
        }
        assert!(!reserved.contains(1024));
    }

    #[test]
    fn service_ports_are_reserved() {
        let reserved = ReservedPorts::standard();
        for port in [3000, 3010, 5432, 6379, 8080, 27017, 32775, 49152, 61616] {
            assert!(reserved.contains(port), "expected reserved: {port}");
        }
    }

    #[test]
    fn ordinary_ports_are_free() {
        let reserved = ReservedPorts::standard();
        for port in [1169, 3011, 4521, 30000, 65535] {
            assert!(!reserved.contains(port), "expected free: {port}");
        }
    }

    #[test]
    fn standard_is_shared() {
        assert!(std::ptr::eq(ReservedPorts::standard(), ReservedPorts::standard()));
    }
}
