use time::PrimitiveDateTime;

/// Time source used to fill `created_at` on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Leave `created_at` to the column default (`CURRENT_TIMESTAMP`, UTC).
    #[default]
    Database,
    /// Stamp every insert with this exact value.
    Fixed(PrimitiveDateTime),
}

impl Clock {
    /// The value to bind for `created_at`, or `None` to use the server default.
    pub fn fixed_now(&self) -> Option<PrimitiveDateTime> {
        match self {
            Clock::Database => None,
            Clock::Fixed(at) => Some(*at),
        }
    }
}
