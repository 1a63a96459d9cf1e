use std::path::PathBuf;

use crate::domain::VersionId;

/// Side effects the reducer asks the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    UploadFile {
        path: PathBuf,
    },
    FetchVersions,
    CompareVersions {
        reference: VersionId,
        candidate: VersionId,
        token: u64,
    },
    ResetService,
}
