//! Graph layer: datasource model, palette, typed instructions and the builder.
//!
//! It owns no text syntax; serialization lives in `render`.

pub mod builder;
pub mod datasource;
pub mod error;
pub mod instr;
pub mod palette;

pub use builder::{GraphConfig, GraphOptions, GraphTemplate, build};
pub use datasource::{Datasource, DatasourceSet};
pub use error::GraphError;
pub use instr::{Cf, GraphDefinition, Instruction, LineWidth, ThresholdKind, Var};
pub use palette::{CORE_PALETTE, Color, PalettePolicy};
