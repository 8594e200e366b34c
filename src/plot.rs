use super::{SAVE_NAME, VERSION};
use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use std::path::PathBuf;

/// Environment variable overriding the command used to open the chart
pub const VIEWER_ENV: &str = "CHANNEL_PLOT_VIEWER";

pub const LOGLEVELS: [&str; 4] = ["ERROR", "WARNING", "INFO", "DEBUG"];

/// Everything the loader and the renderer need, parsed once in main
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub file: PathBuf,
    /// where to save the png, `SAVE_NAME` in the working directory with --save
    pub save: Option<PathBuf>,
    pub show: bool,
    pub loglevel: LevelFilter,
    /// accepted for compatibility, no effect
    pub dryrun: bool,
    pub viewer: String,
}

impl PlotConfig {
    pub fn from_matches(cli_args: &ArgMatches, viewer: Option<String>) -> PlotConfig {
        let file = PathBuf::from(cli_args.value_of("file").unwrap_or_default());
        let save = if cli_args.is_present("save") {
            Some(PathBuf::from(SAVE_NAME))
        } else {
            None
        };
        let loglevel = cli_args
            .value_of("loglevel")
            .and_then(parse_loglevel)
            .unwrap_or(LevelFilter::Info);
        PlotConfig {
            file,
            save,
            show: !cli_args.is_present("no_show"),
            loglevel,
            dryrun: cli_args.is_present("dryrun"),
            viewer: viewer.unwrap_or_else(|| default_viewer().to_string()),
        }
    }
}

/// ERROR, WARNING, INFO, DEBUG in any case
pub fn parse_loglevel(level: &str) -> Option<LevelFilter> {
    match level.to_uppercase().as_str() {
        "ERROR" => Some(LevelFilter::Error),
        "WARNING" => Some(LevelFilter::Warn),
        "INFO" => Some(LevelFilter::Info),
        "DEBUG" => Some(LevelFilter::Debug),
        _ => None,
    }
}

pub fn default_viewer() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

pub fn cli_app() -> App<'static, 'static> {
    let arg_file = Arg::with_name("file")
        .help("Path to input file")
        .long_help("newline-delimited json, one {\"channel\", \"time\", \"value\"} object per line; the last line is ignored")
        .short("f")
        .long("file")
        .takes_value(true)
        .required(true);
    let arg_save = Arg::with_name("save")
        .help("Save the plotted graph into graph.png")
        .short("s")
        .long("save")
        .takes_value(false);
    let arg_loglevel = Arg::with_name("loglevel")
        .help("Choose one of: ERROR, WARNING, INFO, DEBUG")
        .short("l")
        .long("loglevel")
        .takes_value(true)
        .possible_values(&LOGLEVELS)
        .case_insensitive(true)
        .default_value("INFO");
    let arg_dryrun = Arg::with_name("dryrun")
        .help("accepted for compatibility, has no effect")
        .long("dryrun")
        .takes_value(false);
    let arg_no_show = Arg::with_name("no_show")
        .help("do not open the plot in a viewer")
        .long("no-show")
        .takes_value(false);
    App::new("channel_plot")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("Plot points that are saved in a file in json format")
        .arg(arg_file)
        .arg(arg_save)
        .arg(arg_loglevel)
        .arg(arg_dryrun)
        .arg(arg_no_show)
}

/// Takes the CLI arguments that control the plotting of the channel.
pub fn parse_cli() -> PlotConfig {
    let cli_args = cli_app().get_matches();
    PlotConfig::from_matches(&cli_args, std::env::var(VIEWER_ENV).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> PlotConfig {
        let matches = cli_app().get_matches_from_safe(args).unwrap();
        PlotConfig::from_matches(&matches, None)
    }

    #[test]
    fn defaults() {
        let c = config(&["channel_plot", "-f", "output.log"]);
        assert_eq!(c.file, PathBuf::from("output.log"));
        assert_eq!(c.save, None);
        assert!(c.show);
        assert!(!c.dryrun);
        assert_eq!(c.loglevel, LevelFilter::Info);
        assert_eq!(c.viewer, default_viewer());
    }

    #[test]
    fn all_flags() {
        let c = config(&[
            "channel_plot",
            "--file",
            "in.jsonl",
            "--save",
            "--loglevel",
            "debug",
            "--dryrun",
            "--no-show",
        ]);
        assert_eq!(c.save, Some(PathBuf::from(SAVE_NAME)));
        assert_eq!(c.loglevel, LevelFilter::Debug);
        assert!(c.dryrun);
        assert!(!c.show);
    }

    #[test]
    fn short_flags() {
        let c = config(&["channel_plot", "-f", "in.jsonl", "-s", "-l", "WARNING"]);
        assert!(c.save.is_some());
        assert_eq!(c.loglevel, LevelFilter::Warn);
    }

    #[test]
    fn file_is_required() {
        assert!(cli_app().get_matches_from_safe(&["channel_plot", "-s"]).is_err());
    }

    #[test]
    fn unknown_loglevel_is_rejected() {
        let r = cli_app().get_matches_from_safe(&["channel_plot", "-f", "x", "-l", "TRACE"]);
        assert!(r.is_err());
    }

    #[test]
    fn viewer_override() {
        let matches = cli_app()
            .get_matches_from_safe(&["channel_plot", "-f", "x"])
            .unwrap();
        let c = PlotConfig::from_matches(&matches, Some("feh".to_string()));
        assert_eq!(c.viewer, "feh");
    }

    #[test]
    fn loglevels() {
        assert_eq!(parse_loglevel("ERROR"), Some(LevelFilter::Error));
        assert_eq!(parse_loglevel("warning"), Some(LevelFilter::Warn));
        assert_eq!(parse_loglevel("Info"), Some(LevelFilter::Info));
        assert_eq!(parse_loglevel("DEBUG"), Some(LevelFilter::Debug));
        assert_eq!(parse_loglevel("WARN"), None);
    }
}
