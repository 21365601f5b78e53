use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("API key must not be empty")]
    Empty,
}

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Registry needs at least one specialist")]
    NoSpecialists,

    #[error("Duplicate specialist name: {0}")]
    DuplicateName(String),

    #[error("Manager name collides with specialist: {0}")]
    ManagerCollision(String),

    #[error("Default specialist not found: {0}")]
    UnknownDefault(String),
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Query must not be empty")]
    EmptyQuery,

    #[error("Unknown specialist: {0}")]
    UnknownSpecialist(String),

    #[error("Completion request failed: {0:#}")]
    Completion(anyhow::Error),
}

pub type RouteResult<T> = Result<T, RouteError>;
