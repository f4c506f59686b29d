pub mod branch_name;

/// Branch created by `init` and checked out initially
pub const DEFAULT_BRANCH: &str = "main";

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
