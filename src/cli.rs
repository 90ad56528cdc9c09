use clap::Parser;

#[derive(Debug, Parser, Clone, Default, PartialEq)]
#[command(name = "vinyl", version)]
#[command(about = "A terminal music player with synchronized lyrics")]
pub struct Cli {
    /// Playlist manifest: a local path or an http(s) URL [default: data/songs.json]
    #[arg(env = "VINYL_MANIFEST")]
    pub manifest: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn takes_manifest_as_positional() {
        let cli = Cli::try_parse_from(["vinyl", "https://example.com/songs.json"]).unwrap();
        assert_eq!(cli.manifest.as_deref(), Some("https://example.com/songs.json"));
    }

    #[test]
    fn help_and_version_are_not_manifests() {
        let help = Cli::try_parse_from(["vinyl", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        let version = Cli::try_parse_from(["vinyl", "--version"]).unwrap_err();
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn rejects_unknown_flags_and_extra_arguments() {
        assert!(Cli::try_parse_from(["vinyl", "-v"]).is_err());
        assert!(Cli::try_parse_from(["vinyl", "a.json", "b.json"]).is_err());
    }
}
