//! Static topology: the components of the diagram and how they connect

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::rgb_u32;
use crate::constants::TOPOLOGY_VERSION;

/// Topology errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Duplicate component name: {0}")]
    DuplicateComponent(String),
    #[error("Connection {from} -> {to} references unknown component {missing}")]
    UnknownEndpoint {
        from: String,
        to: String,
        missing: String,
    },
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Architectural layer a component belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Client,
    Gateway,
    Service,
    Database,
    Blockchain,
    Security,
}

impl ComponentKind {
    /// All kinds, in legend order
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::Client,
        ComponentKind::Gateway,
        ComponentKind::Service,
        ComponentKind::Security,
        ComponentKind::Database,
        ComponentKind::Blockchain,
    ];

    /// Lowercase identifier, as shown in label captions
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Client => "client",
            ComponentKind::Gateway => "gateway",
            ComponentKind::Service => "service",
            ComponentKind::Database => "database",
            ComponentKind::Blockchain => "blockchain",
            ComponentKind::Security => "security",
        }
    }

    /// Legend title for the layer
    pub fn layer_label(&self) -> &'static str {
        match self {
            ComponentKind::Client => "Client Layer",
            ComponentKind::Gateway => "Gateway Layer",
            ComponentKind::Service => "Service Layer",
            ComponentKind::Database => "Database Layer",
            ComponentKind::Blockchain => "Blockchain Layer",
            ComponentKind::Security => "Security Layer",
        }
    }

    /// Legend swatch color (RGBA)
    pub fn legend_color(&self) -> [f32; 4] {
        let rgb = match self {
            ComponentKind::Client => 0x00ff88,
            ComponentKind::Gateway => 0xff6600,
            ComponentKind::Service => 0x0088ff,
            ComponentKind::Security => 0xff3366,
            ComponentKind::Database => 0xaa00ff,
            ComponentKind::Blockchain => 0xffaa00,
        };
        rgb_u32(rgb, 1.0)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A box in the diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    /// Unique display name, also used as the pick id
    pub name: String,
    /// Center position in world space
    pub position: [f32; 3],
    /// Hex color (`#RRGGBB`)
    pub color: String,
    /// Box extents (x, y, z)
    pub size: [f32; 3],
    #[serde(rename = "type")]
    pub kind: ComponentKind,
}

impl ComponentDescriptor {
    pub fn new(
        name: impl Into<String>,
        position: [f32; 3],
        color: impl Into<String>,
        size: [f32; 3],
        kind: ComponentKind,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            color: color.into(),
            size,
            kind,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    pub fn size(&self) -> Vec3 {
        Vec3::from(self.size)
    }
}

/// Kind of traffic a connection carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    Data,
    Api,
    Secure,
}

/// Line color and opacity for a connection kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionStyle {
    pub color: [f32; 4],
    pub opacity: f32,
}

impl ConnectionKind {
    pub fn style(&self) -> ConnectionStyle {
        let (rgb, opacity) = match self {
            ConnectionKind::Secure => (0xff4444, 0.8),
            ConnectionKind::Data => (0x44ff44, 0.6),
            ConnectionKind::Api => (0x4444ff, 0.7),
        };
        ConnectionStyle {
            color: rgb_u32(rgb, 1.0),
            opacity,
        }
    }
}

/// Directed link between two named components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: ConnectionKind,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: ConnectionKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }
}

/// A connection whose endpoints were found in the topology
#[derive(Debug, Clone, Copy)]
pub struct ResolvedConnection<'a> {
    pub connection: &'a Connection,
    pub from: Vec3,
    pub to: Vec3,
}

/// Read access to a static list of components and connections
pub trait TopologySource {
    fn components(&self) -> &[ComponentDescriptor];
    fn connections(&self) -> &[Connection];

    /// Look up a component by name
    fn component(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.components().iter().find(|c| c.name == name)
    }

    /// Connections with both endpoints present, paired with endpoint positions.
    ///
    /// Connections that reference unknown components are skipped.
    fn resolved_connections(&self) -> Vec<ResolvedConnection<'_>> {
        self.connections()
            .iter()
            .filter_map(|connection| {
                let from = self.component(&connection.from);
                let to = self.component(&connection.to);
                match (from, to) {
                    (Some(from), Some(to)) => Some(ResolvedConnection {
                        connection,
                        from: from.position(),
                        to: to.position(),
                    }),
                    _ => {
                        tracing::warn!(
                            "Skipping connection {} -> {}: unknown endpoint",
                            connection.from,
                            connection.to
                        );
                        None
                    }
                }
            })
            .collect()
    }
}

/// Topology file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    #[serde(default = "default_version")]
    pub version: u32,
    pub components: Vec<ComponentDescriptor>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

fn default_version() -> u32 {
    TOPOLOGY_VERSION
}

impl Default for Topology {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TopologySource for Topology {
    fn components(&self) -> &[ComponentDescriptor] {
        &self.components
    }

    fn connections(&self) -> &[Connection] {
        &self.connections
    }
}

impl Topology {
    /// Create a topology from explicit lists
    pub fn new(components: Vec<ComponentDescriptor>, connections: Vec<Connection>) -> Self {
        Self {
            version: TOPOLOGY_VERSION,
            components,
            connections,
        }
    }

    /// The built-in wallet platform architecture
    pub fn builtin() -> Self {
        use ComponentKind::*;
        use ConnectionKind::*;

        const CLIENT: &str = "#4CAF50";
        const GATEWAY: &str = "#FF9800";
        const SERVICE: &str = "#2196F3";
        const SECURITY: &str = "#F44336";
        const DATABASE: &str = "#9C27B0";
        const BLOCKCHAIN: &str = "#FFD700";

        let c = ComponentDescriptor::new;
        let components = vec![
            // Client layer
            c("Web App", [-8.0, 4.0, 0.0], CLIENT, [1.5, 1.0, 0.8], Client),
            c("Mobile App", [-8.0, 2.0, 0.0], CLIENT, [1.5, 1.0, 0.8], Client),
            c("Admin Panel", [-8.0, 0.0, 0.0], CLIENT, [1.5, 1.0, 0.8], Client),
            // Gateway layer
            c("Load Balancer", [-4.0, 3.0, 0.0], GATEWAY, [1.2, 0.8, 0.6], Gateway),
            c("API Gateway", [-4.0, 1.0, 0.0], GATEWAY, [1.2, 0.8, 0.6], Gateway),
            // Service layer
            c("Auth Service", [0.0, 4.0, 0.0], SERVICE, [1.8, 1.2, 1.0], Service),
            c("Wallet Service", [0.0, 2.0, 0.0], SERVICE, [1.8, 1.2, 1.0], Service),
            c("Transaction Service", [0.0, 0.0, 0.0], SERVICE, [1.8, 1.2, 1.0], Service),
            c("Notification Service", [0.0, -2.0, 0.0], SERVICE, [1.8, 1.2, 1.0], Service),
            // Security layer
            c("Key Management", [4.0, 3.0, 2.0], SECURITY, [1.5, 1.5, 1.2], Security),
            c("HSM", [4.0, 1.0, 2.0], SECURITY, [1.2, 1.2, 1.0], Security),
            c("Encryption Service", [4.0, -1.0, 2.0], SECURITY, [1.5, 1.0, 1.0], Security),
            // Database layer
            c("User DB", [4.0, 4.0, -2.0], DATABASE, [1.5, 0.8, 1.2], Database),
            c("Wallet DB", [4.0, 2.0, -2.0], DATABASE, [1.5, 0.8, 1.2], Database),
            c("Transaction DB", [4.0, 0.0, -2.0], DATABASE, [1.5, 0.8, 1.2], Database),
            c("Audit DB", [4.0, -2.0, -2.0], DATABASE, [1.5, 0.8, 1.2], Database),
            // Blockchain layer
            c("Bitcoin Node", [8.0, 2.0, 0.0], BLOCKCHAIN, [1.2, 1.2, 1.2], Blockchain),
            c("Ethereum Node", [8.0, 0.0, 0.0], BLOCKCHAIN, [1.2, 1.2, 1.2], Blockchain),
            c("Blockchain Monitor", [8.0, -2.0, 0.0], BLOCKCHAIN, [1.2, 1.2, 1.2], Blockchain),
        ];

        let l = Connection::new;
        let connections = vec![
            // Client to gateway
            l("Web App", "Load Balancer", Api),
            l("Mobile App", "Load Balancer", Api),
            l("Admin Panel", "API Gateway", Api),
            // Gateway to services
            l("Load Balancer", "Auth Service", Api),
            l("API Gateway", "Wallet Service", Api),
            l("API Gateway", "Transaction Service", Api),
            l("API Gateway", "Notification Service", Api),
            // Services to security
            l("Wallet Service", "Key Management", Secure),
            l("Transaction Service", "HSM", Secure),
            l("Auth Service", "Encryption Service", Secure),
            // Services to databases
            l("Auth Service", "User DB", Data),
            l("Wallet Service", "Wallet DB", Data),
            l("Transaction Service", "Transaction DB", Data),
            l("Transaction Service", "Audit DB", Data),
            // Services to blockchain
            l("Transaction Service", "Bitcoin Node", Api),
            l("Transaction Service", "Ethereum Node", Api),
            l("Wallet Service", "Blockchain Monitor", Api),
        ];

        Self::new(components, connections)
    }

    /// Check names are unique and every connection endpoint exists
    pub fn validate(&self) -> Result<(), TopologyError> {
        let mut names = HashSet::new();
        for component in &self.components {
            if !names.insert(component.name.as_str()) {
                return Err(TopologyError::DuplicateComponent(component.name.clone()));
            }
        }

        for connection in &self.connections {
            for endpoint in [&connection.from, &connection.to] {
                if !names.contains(endpoint.as_str()) {
                    return Err(TopologyError::UnknownEndpoint {
                        from: connection.from.clone(),
                        to: connection.to.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Components of a given kind, in declaration order
    pub fn components_of_kind(
        &self,
        kind: ComponentKind,
    ) -> impl Iterator<Item = &ComponentDescriptor> {
        self.components.iter().filter(move |c| c.kind == kind)
    }

    /// Load a topology from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| TopologyError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Parse a topology from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, TopologyError> {
        ron::from_str(content).map_err(|e| TopologyError::Deserialize(e.to_string()))
    }

    /// Save the topology as pretty RON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TopologyError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| TopologyError::Io(e.to_string()))
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String, TopologyError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| TopologyError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let topology = Topology::builtin();
        assert_eq!(topology.components.len(), 19);
        assert_eq!(topology.connections.len(), 17);
        assert!(topology.validate().is_ok());
    }

    #[test]
    fn test_component_lookup() {
        let topology = Topology::builtin();
        let auth = topology.component("Auth Service").unwrap();
        assert_eq!(auth.kind, ComponentKind::Service);
        assert_eq!(auth.position(), Vec3::new(0.0, 4.0, 0.0));
        assert!(topology.component("Mainframe").is_none());
    }

    #[test]
    fn test_validate_duplicate() {
        let mut topology = Topology::builtin();
        topology.components.push(topology.components[0].clone());
        assert_eq!(
            topology.validate(),
            Err(TopologyError::DuplicateComponent("Web App".to_string()))
        );
    }

    #[test]
    fn test_validate_unknown_endpoint() {
        let mut topology = Topology::builtin();
        topology
            .connections
            .push(Connection::new("Web App", "Mainframe", ConnectionKind::Api));
        assert!(matches!(
            topology.validate(),
            Err(TopologyError::UnknownEndpoint { missing, .. }) if missing == "Mainframe"
        ));
    }

    #[test]
    fn test_resolved_connections_skip_unknown() {
        let mut topology = Topology::builtin();
        topology
            .connections
            .push(Connection::new("Ghost", "Web App", ConnectionKind::Data));
        let resolved = topology.resolved_connections();
        assert_eq!(resolved.len(), 17);
        assert_eq!(resolved[0].from, Vec3::new(-8.0, 4.0, 0.0));
        assert_eq!(resolved[0].to, Vec3::new(-4.0, 3.0, 0.0));
    }

    #[test]
    fn test_components_of_kind() {
        let topology = Topology::builtin();
        let names: Vec<_> = topology
            .components_of_kind(ComponentKind::Gateway)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["Load Balancer", "API Gateway"]);
    }

    #[test]
    fn test_connection_styles() {
        assert_eq!(ConnectionKind::Secure.style().opacity, 0.8);
        assert_eq!(ConnectionKind::Data.style().opacity, 0.6);
        assert_eq!(ConnectionKind::Api.style().color, rgb_u32(0x4444ff, 1.0));
    }

    #[test]
    fn test_ron_uses_lowercase_type() {
        let text = r##"(
            components: [
                (name: "Edge", position: (0.0, 0.0, 0.0), color: "#ffffff",
                 size: (1.0, 1.0, 1.0), type: gateway),
            ],
        )"##;
        let topology = Topology::from_ron_str(text).unwrap();
        assert_eq!(topology.version, TOPOLOGY_VERSION);
        assert_eq!(topology.components[0].kind, ComponentKind::Gateway);
        assert!(topology.connections.is_empty());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topology.ron");
        let topology = Topology::builtin();
        topology.save(&path).unwrap();
        assert_eq!(Topology::load(&path).unwrap(), topology);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Topology::load(dir.path().join("nope.ron")),
            Err(TopologyError::Io(_))
        ));
    }
}
