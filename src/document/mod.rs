//! Document layer: the node tree pointers operate on, plus YAML text
//! parsing and emission.

pub mod emitter;
pub mod node;
pub mod parser;

pub use emitter::{to_yaml_stream_string, to_yaml_string};
pub use node::{NodeKind, NodeStyle, Position, YamlNode, YamlValue};
pub use parser::{parse_yaml, parse_yaml_documents};
