use crate::domain::services::Deletion;
use crate::error::AppError;
use serde::Serialize;

#[derive(Serialize)]
pub struct DeletedResponse {
    pub status: &'static str,
}

/// A refused delete becomes `DeleteBlocked`; both other outcomes are success.
impl TryFrom<Deletion> for DeletedResponse {
    type Error = AppError;

    fn try_from(deletion: Deletion) -> Result<Self, Self::Error> {
        match deletion {
            Deletion::Deleted => Ok(Self { status: "deleted" }),
            Deletion::AlreadyAbsent => Ok(Self { status: "already_absent" }),
            Deletion::Blocked(message) => Err(AppError::DeleteBlocked(message)),
        }
    }
}
