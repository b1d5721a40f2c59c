//! Process exit codes shared by all commands.

/// Exit codes returned by the `docindex` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    NotFound = 3,
    MalformedIndex = 4,
    IoError = 5,
    ValidationFailed = 6,
}

impl ExitCode {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(ExitCode::NotFound.code(), 3);
        assert_eq!(ExitCode::MalformedIndex.code(), 4);
        assert_eq!(ExitCode::ValidationFailed.code(), 6);
        assert!(ExitCode::Success.is_success());
        assert!(!ExitCode::IoError.is_success());
    }
}
