#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify { kind: NotificationKind, text: String },
    Sleep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    StatusChange,
    ErrorReport,
}
