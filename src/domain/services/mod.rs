pub mod booking_admission;
pub mod catalog;

/// Result of a delete that may be refused while other rows still reference the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    Deleted,
    /// Nothing had that id; reported as success.
    AlreadyAbsent,
    Blocked(String),
}
