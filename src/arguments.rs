use clap::Parser;

/// The manifest is always `pom.xml` in the working directory, so the only flag is `--help`.
#[derive(Debug, Parser)]
#[command(about = "Update the project version", bin_name = "bump-version")]
pub struct Arguments {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parse_no_arguments() {
        assert!(Arguments::try_parse_from(["bump-version"]).is_ok());
    }

    #[test]
    fn test_help_flag() {
        let err = Arguments::try_parse_from(["bump-version", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("Update the project version"));

        let err = Arguments::try_parse_from(["bump-version", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_rejects_positional_version() {
        let err = Arguments::try_parse_from(["bump-version", "1.2.3"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_rejects_unknown_flag() {
        let err = Arguments::try_parse_from(["bump-version", "--verbose"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_no_version_flag() {
        assert!(Arguments::try_parse_from(["bump-version", "--version"]).is_err());
    }
}
