use crate::model::StatusCode;
use crate::navigator::ViewKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid status name: {0:?}")]
    InvalidName(String),

    #[error("an active status named {0:?} already exists")]
    DuplicateName(String),

    #[error("status {0} is assigned to a project")]
    ReferencedByProject(StatusCode),

    #[error("unknown status code {0}")]
    UnknownCode(StatusCode),

    #[error("status {0} is already retired")]
    AlreadyRetired(StatusCode),

    #[error("no status code left after {0}")]
    CodeSpaceExhausted(StatusCode),
}

impl RegistryError {
    /// Text shown inline next to the form or confirmation that failed.
    pub fn user_message(&self) -> String {
        match self {
            RegistryError::InvalidName(_) => "The data entered is not valid. Try again.".into(),
            RegistryError::DuplicateName(_) => {
                "A status with that name already exists. Try again.".into()
            }
            RegistryError::ReferencedByProject(_) => {
                "This status cannot be retired because it is assigned to a project.".into()
            }
            RegistryError::UnknownCode(code) => format!("Status {code} no longer exists."),
            RegistryError::AlreadyRetired(code) => format!("Status {code} is already retired."),
            RegistryError::CodeSpaceExhausted(_) => {
                "No more status codes are available. New statuses cannot be added.".into()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigatorError {
    #[error("{action} is not available from the {view:?} view")]
    NotAvailable {
        view: ViewKind,
        action: &'static str,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
