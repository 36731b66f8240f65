//! Output formats for token trees
//!
//! Every format implements [Formatter] and is looked up by name in a [FormatRegistry].
//! The built-in formats are:
//!
//!     treeviz  one line per token, box-drawing connectors and icons
//!     json     the marshalled form, pretty printed
//!     yaml     the marshalled form as YAML
//!     kinds    one line per classified leaf, then the last kind

pub mod json;
pub mod kinds;
pub mod registry;
pub mod treeviz;

pub use json::{to_json_str, to_yaml_str, JsonFormatter, YamlFormatter};
pub use kinds::{to_kinds_str, KindsFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
