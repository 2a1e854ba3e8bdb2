//! Architecture diagram core
//!
//! Static topology data (components and the connections between them) plus
//! the small amount of geometry the diagram derives from it: hex colors,
//! curved connection paths and the particles that flow along them.

pub mod color;
pub mod constants;
pub mod curve;
pub mod flow;
pub mod topology;

pub use color::{parse_hex_color, rgb_u32};
pub use curve::QuadraticBezier;
pub use flow::FlowParticle;
pub use topology::{
    ComponentDescriptor, ComponentKind, Connection, ConnectionKind, ConnectionStyle,
    ResolvedConnection, Topology, TopologyError, TopologySource,
};
