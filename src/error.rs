use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfiguratorError {
    #[error("Unknown printer preset: {0}")]
    UnknownPreset(String),
}

/// Authoring mistakes in a catalog file. Detected once at load time.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("Duplicate preset id: {0}")]
    DuplicatePreset(String),

    #[error("Duplicate component category: {0}")]
    DuplicateCategory(String),

    #[error("Duplicate component '{component}' in category '{category}'")]
    DuplicateComponent { category: String, component: String },

    #[error("Preset '{preset}' defaults to unknown category '{category}'")]
    UnknownDefaultCategory { preset: String, category: String },

    #[error("Preset '{preset}' defaults to unknown component '{component}' in category '{category}'")]
    UnknownDefaultComponent {
        preset: String,
        category: String,
        component: String,
    },

    #[error("Component '{component}' references undeclared parameter '{parameter}'")]
    UndeclaredParameter { component: String, parameter: String },

    #[error("Component '{component}' declares parameter '{parameter}' but never uses it")]
    UnusedParameter { component: String, parameter: String },

    #[error("Component '{component}' uses parameter '{parameter}' outside of a [section]")]
    ParameterOutsideSection { component: String, parameter: String },

    #[error("Component '{component}' uses parameter '{parameter}' on an indented continuation line")]
    ParameterOnContinuationLine { component: String, parameter: String },
}

impl From<ConfiguratorError> for String {
    fn from(err: ConfiguratorError) -> Self {
        err.to_string()
    }
}
