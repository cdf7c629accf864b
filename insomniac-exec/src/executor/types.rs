#[derive(Debug, Clone, Default)]
pub struct CoordinatorConfig {
    /// Treat an ordinary send failure as a dependency failure.
    ///
    /// When set, `ERROR` records carry the failure message in their `error`
    /// field and skipped records carry one too, so every transitive
    /// dependent of a failed request is reported `NOT RUN` instead of being
    /// sent. Off by default: dependents of a failed request are still sent.
    pub cascade_failures: bool,
}
