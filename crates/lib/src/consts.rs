//! Names fixed by Go toolchain conventions.

/// Trailing handler segment that marks a standalone Go program.
pub const GO_SOURCE_SUFFIX: &str = "go";

/// File name of every generated entrypoint program.
pub const GENERATED_FILE_NAME: &str = "main.go";

/// Environment variable consulted when no workspace root is configured.
pub const GOPATH_ENV: &str = "GOPATH";

/// Directory under the Go workspace where import paths are rooted.
pub const WORKSPACE_SRC_DIR: &str = "src";
