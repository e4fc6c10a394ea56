use thiserror::Error;

/// Failures raised while turning a datasource set into a graph template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// There is no aggregate entry to bind `var1` to.
    #[error("datasource set is empty: the aggregate CPU datasource is required")]
    EmptyDatasourceSet,

    /// More cores than the fixed palette has colors, under the strict palette policy.
    #[error("{cores} cores exceed the {palette_size}-color palette (use the cycle or generated palette policy)")]
    PaletteExhausted { cores: usize, palette_size: usize },
}
