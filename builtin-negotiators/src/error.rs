#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum PolicyError {
    #[error("No decision rule matches dialogue state: {0}")]
    PolicyGap(String),
}
