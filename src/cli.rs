use anyhow::{anyhow, bail, Result};

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run one sync pass and exit.
    Sync,
    /// Sync immediately, then keep syncing on an interval.
    Watch { interval_minutes: Option<u64> },
    /// Print usage.
    Help,
}

/// Parse the command-line arguments (program name already stripped).
pub fn parse(args: &[String]) -> Result<Command> {
    let Some(command) = args.first() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "sync" => {
            if args.len() > 1 {
                bail!("Usage: glnotes sync");
            }
            Ok(Command::Sync)
        }
        "watch" => parse_watch_args(&args[1..]),
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => bail!("Unknown command '{other}'. Run `glnotes help` for usage"),
    }
}

/// Parse `glnotes watch` arguments.
///
/// Supported forms:
///   glnotes watch
///   glnotes watch -i 5
///   glnotes watch --interval 5
fn parse_watch_args(args: &[String]) -> Result<Command> {
    let mut interval_minutes = None;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-i" | "--interval" => {
                i += 1;
                let Some(value) = args.get(i) else {
                    bail!("Missing value for -i/--interval flag");
                };
                let minutes: u64 = value.parse().map_err(|_| {
                    anyhow!("--interval must be a whole number of minutes, got '{value}'")
                })?;
                if minutes == 0 {
                    bail!("--interval must be at least 1 minute");
                }
                interval_minutes = Some(minutes);
            }
            other => bail!("Unknown watch option '{other}'"),
        }
        i += 1;
    }

    Ok(Command::Watch { interval_minutes })
}

pub fn print_help() {
    println!("glnotes — sync GitLab merge requests into markdown notes\n");
    println!("USAGE:");
    println!("  glnotes sync                      Fetch and rewrite the notes once");
    println!("  glnotes watch [--interval <min>]  Sync now, then every <min> minutes");
    println!("  glnotes help                      Show this help");
    println!();
    println!("CONFIGURATION (~/.glnotes/config.toml):");
    println!("  token             GitLab personal access token with read_api scope");
    println!("  username          GitLab username");
    println!("  folder            Folder the notes are written into");
    println!("  interval_minutes  Minutes between passes in watch mode (default 15)");
    println!("  base_url          API endpoint (default https://gitlab.com/api/v4)");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_shows_help() {
        assert_eq!(parse(&args(&[])).unwrap(), Command::Help);
    }

    #[test]
    fn parse_sync() {
        assert_eq!(parse(&args(&["sync"])).unwrap(), Command::Sync);
    }

    #[test]
    fn sync_takes_no_options() {
        let result = parse(&args(&["sync", "--now"]));
        assert!(result.is_err());
    }

    #[test]
    fn parse_watch_without_interval() {
        assert_eq!(
            parse(&args(&["watch"])).unwrap(),
            Command::Watch {
                interval_minutes: None
            }
        );
    }

    #[test]
    fn parse_watch_with_long_interval_flag() {
        assert_eq!(
            parse(&args(&["watch", "--interval", "5"])).unwrap(),
            Command::Watch {
                interval_minutes: Some(5)
            }
        );
    }

    #[test]
    fn parse_watch_with_short_interval_flag() {
        assert_eq!(
            parse(&args(&["watch", "-i", "30"])).unwrap(),
            Command::Watch {
                interval_minutes: Some(30)
            }
        );
    }

    #[test]
    fn watch_interval_must_be_numeric() {
        let result = parse(&args(&["watch", "--interval", "soon"]));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("whole number of minutes"));
    }

    #[test]
    fn watch_interval_rejects_zero() {
        let result = parse(&args(&["watch", "--interval", "0"]));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at least 1"));
    }

    #[test]
    fn watch_interval_rejects_fractions() {
        let result = parse(&args(&["watch", "--interval", "1.5"]));
        assert!(result.is_err());
    }

    #[test]
    fn watch_missing_interval_value_fails() {
        let result = parse(&args(&["watch", "-i"]));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Missing value"));
    }

    #[test]
    fn watch_rejects_unknown_option() {
        let result = parse(&args(&["watch", "--once"]));
        assert!(result.is_err());
    }

    #[test]
    fn parse_help_aliases() {
        for alias in ["help", "--help", "-h"] {
            assert_eq!(parse(&args(&[alias])).unwrap(), Command::Help);
        }
    }

    #[test]
    fn unknown_command_names_itself() {
        let err = parse(&args(&["synk"])).unwrap_err();
        assert!(err.to_string().contains("synk"));
    }
}
