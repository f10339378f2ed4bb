/// Failure to run an external program at all.
///
/// A program that starts and exits non-zero is not an error at this level;
/// callers inspect [`CommandOutput`](crate::CommandOutput) instead. Arguments
/// are never part of the message since they may carry credentials.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{program} not found or could not be started")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}
