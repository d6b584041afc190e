/// Limits and toggles for the pass ledger, passed in explicitly rather than
/// read from ambient globals.
#[derive(Debug, Clone)]
pub struct PassPolicy {
    /// Maximum number of students out at once, across the whole school.
    pub hall_limit: usize,
    /// Passes a student may use per academic quarter.
    pub max_quarter_passes: usize,
    /// Two sign-outs for the same student inside this window count as one
    /// double-submitted form.
    pub duplicate_window_seconds: i64,
    /// Open passes older than this are force-closed by the reclaimer.
    pub stale_after_minutes: i64,
    /// When set, sign-outs are permitted outside every configured quarter
    /// (and the quarterly quota cannot apply, having no quarter to count in).
    pub allow_outside_quarter: bool,
    /// When set, sign-out requires a roster PIN match.
    pub pin_required: bool,
}

impl Default for PassPolicy {
    fn default() -> Self {
        Self {
            hall_limit: 10,
            max_quarter_passes: 18,
            duplicate_window_seconds: 60,
            stale_after_minutes: 30,
            allow_outside_quarter: false,
            pin_required: false,
        }
    }
}
