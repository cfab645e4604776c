use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use starsphere::DeviceProfile;

/// Starsphere: a rotating point-cloud sphere with ring overlays and a starfield.
#[derive(Parser, Debug)]
#[command(name = "starsphere", version, about)]
pub struct Args {
    /// Which scene density to use.
    #[arg(long, value_enum, default_value_t = ProfileArg::Auto)]
    pub profile: ProfileArg,

    /// User-agent string used by `--profile auto` to detect mobile devices.
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Load the scene from a JSON config file instead of a built-in profile.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the starfield.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the effective scene config as JSON and exit.
    #[arg(long)]
    pub dump_config: bool,

    /// Log filter directive (e.g. debug, starsphere=trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 720)]
    pub height: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// Detect from the user agent and target platform.
    Auto,
    Mobile,
    Desktop,
}

impl Args {
    pub fn device_profile(&self) -> DeviceProfile {
        match self.profile {
            ProfileArg::Auto => DeviceProfile::detect(self.user_agent.as_deref()),
            ProfileArg::Mobile => DeviceProfile::Reduced,
            ProfileArg::Desktop => DeviceProfile::Full,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["starsphere"]).unwrap();
        assert_eq!(args.profile, ProfileArg::Auto);
        assert_eq!((args.width, args.height), (1280, 720));
        assert!(!args.dump_config);
    }

    #[test]
    fn test_explicit_profiles() {
        let args = Args::try_parse_from(["starsphere", "--profile", "mobile"]).unwrap();
        assert_eq!(args.device_profile(), DeviceProfile::Reduced);
        let args = Args::try_parse_from(["starsphere", "--profile", "desktop"]).unwrap();
        assert_eq!(args.device_profile(), DeviceProfile::Full);
    }

    #[test]
    fn test_auto_profile_reads_user_agent() {
        let args = Args::try_parse_from([
            "starsphere",
            "--user-agent",
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)",
        ])
        .unwrap();
        assert_eq!(args.device_profile(), DeviceProfile::Reduced);
    }
}
